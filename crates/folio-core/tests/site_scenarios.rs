//! Scenario tests driving [`Site`] through realistic event sequences.
//!
//! Covers:
//! 1. Home boot → load → paginate → "see all" navigation.
//! 2. Load failure: inline error, store unset, search stays pages-only.
//! 3. Card click precedence (detail > url > inert).
//! 4. Keyboard surface: `/`, Cmd/Ctrl+K, Escape, Enter/Space on controls.
//! 5. Search sees projects only after they are published.
//! 6. Menu close paths: Escape, backdrop, close control, outside click.

use core::time::Duration;

use folio_core::card::{CardAction, ProjectCard};
use folio_core::input::{FocusKind, Key, KeyInput, Modifiers};
use folio_core::menu::MenuKind;
use folio_core::pager::ViewMoreMode;
use folio_core::search::PalettePhase;
use folio_core::site::{FOCUS_DELAY, LOAD_FAILED_MESSAGE};
use folio_core::{
    Capabilities, ClickContext, Effect, LoadError, Outcome, ProjectEntry, ResultRow, Site,
    SiteConfig, SiteEvent, Target,
};
use pretty_assertions::assert_eq;

// ── Helpers ───────────────────────────────────────────────────────────

fn home_site() -> Site {
    let mut site = Site::new(SiteConfig::default(), Capabilities::all(), true);
    site.boot();
    site
}

fn projects(n: usize) -> Vec<ProjectEntry> {
    (0..n)
        .map(|i| ProjectEntry {
            title: format!("Project {i}"),
            category: "Web Design".into(),
            url: format!("projects/{i}.html"),
            ..ProjectEntry::default()
        })
        .collect()
}

fn click(site: &mut Site, target: Target) -> Outcome {
    site.handle(SiteEvent::Click(ClickContext::on(target)))
}

fn key(site: &mut Site, dom_key: &str, mods: Modifiers, focus: FocusKind, target: Target) -> Outcome {
    site.handle(SiteEvent::Key {
        input: KeyInput::new(Key::from_dom(dom_key), mods),
        focus,
        target,
    })
}

fn appended(out: &Outcome) -> Vec<ProjectCard> {
    out.effects
        .iter()
        .flat_map(|e| match e {
            Effect::AppendCards { cards, .. } => cards.clone(),
            _ => Vec::new(),
        })
        .collect()
}

fn rendered_rows(out: &Outcome) -> Option<&Vec<ResultRow>> {
    out.effects.iter().find_map(|e| match e {
        Effect::RenderResults(rows) => Some(rows),
        _ => None,
    })
}

// ── Home grid ─────────────────────────────────────────────────────────

#[test]
fn home_grid_paginates_then_links_to_all_projects() {
    let mut site = home_site();

    let out = site.handle(SiteEvent::ProjectsLoaded(projects(10)));
    assert_eq!(appended(&out).len(), 4);
    assert!(out.effects.contains(&Effect::SetViewMore {
        label: "View More ↗"
    }));
    assert_eq!(site.store().len(), 10);

    let out = click(&mut site, Target::ViewMore);
    assert!(matches!(
        out.effects.first(),
        Some(Effect::AppendCards { first_index: 4, .. })
    ));
    assert_eq!(site.view_more_mode(), Some(ViewMoreMode::RevealNext));

    let out = click(&mut site, Target::ViewMore);
    assert_eq!(appended(&out).len(), 2);
    assert!(out.effects.contains(&Effect::SetViewMore {
        label: "See all projects ↗"
    }));
    assert_eq!(site.cards_shown(), 10);

    let out = click(&mut site, Target::ViewMore);
    assert_eq!(out.navigation(), Some("./pages/projects.html"));
    assert!(appended(&out).is_empty());
}

#[test]
fn short_list_is_exhausted_after_first_reveal() {
    let mut site = home_site();
    let out = site.handle(SiteEvent::ProjectsLoaded(projects(3)));
    assert_eq!(appended(&out).len(), 3);
    assert_eq!(site.view_more_mode(), Some(ViewMoreMode::SeeAll));
}

#[test]
fn view_more_before_load_does_nothing() {
    let mut site = home_site();
    let out = click(&mut site, Target::ViewMore);
    assert!(out.effects.is_empty());
}

#[test]
fn load_without_grid_still_feeds_search() {
    let mut site = Site::new(
        SiteConfig::default(),
        Capabilities::all() - Capabilities::GRID,
        true,
    );
    site.boot();
    let out = site.handle(SiteEvent::ProjectsLoaded(projects(2)));
    assert!(out.effects.is_empty());
    assert_eq!(site.store().len(), 2);

    click(&mut site, Target::SearchButton);
    let out = site.handle(SiteEvent::QueryChanged("project 1".into()));
    assert_eq!(rendered_rows(&out).map(Vec::len), Some(1));
}

// ── Load failure ──────────────────────────────────────────────────────

#[test]
fn fetch_failure_shows_error_and_leaves_store_unset() {
    let mut site = home_site();
    let out = site.handle(SiteEvent::ProjectsFailed(LoadError::Status {
        path: "./data/recent-projects.json".into(),
        status: 500,
    }));
    assert_eq!(
        out.effects,
        vec![Effect::ShowGridError(LOAD_FAILED_MESSAGE.into())]
    );
    assert!(!site.store().is_loaded());
    assert_eq!(site.view_more_mode(), None);

    click(&mut site, Target::SearchButton);
    let out = site.handle(SiteEvent::QueryChanged("design".into()));
    let rows = rendered_rows(&out).expect("rows");
    assert!(rows.iter().all(|r| r.subtitle.starts_with("Page — ")));
    assert_eq!(rows.len(), 4);
}

// ── Cards ─────────────────────────────────────────────────────────────

#[test]
fn card_with_detail_and_url_opens_modal_never_navigates() {
    let mut site = home_site();
    let project = ProjectEntry {
        title: "Orbit".into(),
        url: "https://example.com/orbit".into(),
        detail: "<p>Gravity toy</p>".into(),
        ..ProjectEntry::default()
    };
    site.handle(SiteEvent::ProjectsLoaded(vec![project]));

    let out = click(&mut site, Target::ProjectCard(0));
    assert_eq!(out.navigation(), None);
    assert!(out.effects.contains(&Effect::ShowModal {
        title: "Orbit".into(),
        body_html: "<p>Gravity toy</p>".into(),
    }));
    assert!(site.modal().is_some_and(|m| m.is_open()));

    let out = click(&mut site, Target::ModalBackdrop);
    assert_eq!(out.effects, vec![Effect::HideModal]);
    assert!(click(&mut site, Target::ModalClose).effects.is_empty());
}

#[test]
fn card_with_hash_url_is_inert() {
    let mut site = home_site();
    let project = ProjectEntry {
        title: "Draft".into(),
        url: "#".into(),
        ..ProjectEntry::default()
    };
    let out = site.handle(SiteEvent::ProjectsLoaded(vec![project]));
    assert_eq!(appended(&out)[0].action, CardAction::Inert);

    let out = click(&mut site, Target::ProjectCard(0));
    assert!(out.effects.is_empty());
    assert!(!site.modal().is_some_and(|m| m.is_open()));
}

#[test]
fn card_with_url_navigates() {
    let mut site = home_site();
    site.handle(SiteEvent::ProjectsLoaded(projects(1)));
    let out = click(&mut site, Target::ProjectCard(0));
    assert_eq!(out.navigation(), Some("projects/0.html"));
}

#[test]
fn detail_card_without_modal_markup_does_nothing() {
    let mut site = Site::new(
        SiteConfig::default(),
        Capabilities::all() - Capabilities::MODAL,
        true,
    );
    site.boot();
    let project = ProjectEntry {
        title: "Orbit".into(),
        url: "https://example.com/orbit".into(),
        detail: "<p>x</p>".into(),
        ..ProjectEntry::default()
    };
    site.handle(SiteEvent::ProjectsLoaded(vec![project]));
    assert!(click(&mut site, Target::ProjectCard(0)).effects.is_empty());
}

// ── Menus ─────────────────────────────────────────────────────────────

const DROPDOWN_CLOSED: Effect = Effect::SetMenuOpen {
    menu: MenuKind::Dropdown,
    open: false,
};
const OVERLAY_CLOSED: Effect = Effect::SetMenuOpen {
    menu: MenuKind::Overlay,
    open: false,
};

#[test]
fn escape_closes_dropdown() {
    let mut site = home_site();
    let out = click(&mut site, Target::WorkTrigger);
    assert!(out.stop_propagation);
    assert!(site.dropdown_open());

    let out = key(&mut site, "Escape", Modifiers::empty(), FocusKind::Other, Target::Other);
    assert_eq!(out.effects, vec![DROPDOWN_CLOSED]);
    assert!(!site.dropdown_open());
}

#[test]
fn mobile_backdrop_and_close_control_close_overlay() {
    for target in [Target::MobileBackdrop, Target::MobileClose] {
        let mut site = home_site();
        click(&mut site, Target::MobileTrigger);
        assert!(site.mobile_menu_open());

        let out = click(&mut site, target);
        assert_eq!(out.effects, vec![OVERLAY_CLOSED]);
        assert!(!site.mobile_menu_open());
    }
}

#[test]
fn outside_click_closes_mobile_menu_but_inside_clicks_do_not() {
    let mut site = home_site();
    click(&mut site, Target::MobileTrigger);

    for region in [
        folio_core::Regions::MOBILE_MENU,
        folio_core::Regions::MOBILE_TRIGGER,
    ] {
        let out = site.handle(SiteEvent::Click(ClickContext::outside().within(region)));
        assert!(!out.effects.contains(&OVERLAY_CLOSED));
        assert!(site.mobile_menu_open());
    }

    let out = site.handle(SiteEvent::Click(ClickContext::outside()));
    assert_eq!(out.effects, vec![OVERLAY_CLOSED]);
    assert!(!site.mobile_menu_open());
}

// ── Keyboard ──────────────────────────────────────────────────────────

#[test]
fn slash_opens_palette_unless_typing() {
    let mut site = home_site();

    let out = key(&mut site, "/", Modifiers::empty(), FocusKind::TextEntry, Target::Other);
    assert!(!out.prevent_default);
    assert!(out.effects.is_empty());

    let out = key(&mut site, "/", Modifiers::empty(), FocusKind::Other, Target::Other);
    assert!(out.prevent_default);
    assert_eq!(out.effects[0], Effect::ShowPalette);
    assert_eq!(out.effects[1], Effect::ClearQuery);
    assert_eq!(rendered_rows(&out).map(Vec::len), Some(6));
    assert_eq!(
        out.effects.last(),
        Some(&Effect::FocusQuery { delay: FOCUS_DELAY })
    );
    assert_eq!(
        site.palette().map(|p| p.phase()),
        Some(PalettePhase::OpenEmptyQuery)
    );
}

#[test]
fn command_k_opens_and_escape_closes_everything() {
    let mut site = home_site();
    click(&mut site, Target::MobileTrigger);

    let out = key(&mut site, "K", Modifiers::META, FocusKind::TextEntry, Target::Other);
    assert!(out.prevent_default);
    assert!(out.effects.contains(&Effect::ShowPalette));

    let out = key(&mut site, "Escape", Modifiers::empty(), FocusKind::TextEntry, Target::Other);
    assert!(out.effects.contains(&Effect::HidePalette));
    assert!(out.effects.contains(&Effect::SetMenuOpen {
        menu: MenuKind::Overlay,
        open: false
    }));
    assert!(!site.mobile_menu_open());

    let again = key(&mut site, "Escape", Modifiers::empty(), FocusKind::Other, Target::Other);
    assert!(again.effects.is_empty());
}

#[test]
fn escape_leaves_modal_open() {
    let mut site = home_site();
    site.handle(SiteEvent::ProjectsLoaded(vec![ProjectEntry {
        title: "Orbit".into(),
        detail: "<p>x</p>".into(),
        ..ProjectEntry::default()
    }]));
    click(&mut site, Target::ProjectCard(0));
    key(&mut site, "Escape", Modifiers::empty(), FocusKind::Other, Target::Other);
    assert!(site.modal().is_some_and(|m| m.is_open()));
}

#[test]
fn close_control_responds_to_enter_and_space() {
    for dom_key in ["Enter", " "] {
        let mut site = home_site();
        click(&mut site, Target::SearchButton);
        let out = key(&mut site, dom_key, Modifiers::empty(), FocusKind::Other, Target::SearchClose);
        assert!(out.prevent_default);
        assert_eq!(out.effects, vec![Effect::HidePalette]);
    }
}

#[test]
fn enter_on_result_row_activates_it() {
    let mut site = home_site();
    click(&mut site, Target::SearchButton);
    site.handle(SiteEvent::QueryChanged("GAME".into()));

    let out = key(
        &mut site,
        "Enter",
        Modifiers::empty(),
        FocusKind::Other,
        Target::SearchResult(0),
    );
    assert_eq!(out.navigation(), Some("./pages/game-design.html"));
    assert!(out.effects.contains(&Effect::HidePalette));
}

// ── Search ────────────────────────────────────────────────────────────

#[test]
fn project_results_navigate_unless_hash() {
    let mut site = home_site();
    site.handle(SiteEvent::ProjectsLoaded(vec![
        ProjectEntry {
            title: "Linked".into(),
            url: "linked.html".into(),
            ..ProjectEntry::default()
        },
        ProjectEntry {
            title: "Unlinked".into(),
            category: "Graphic Design".into(),
            ..ProjectEntry::default()
        },
    ]));

    click(&mut site, Target::SearchButton);
    let out = site.handle(SiteEvent::QueryChanged("unlinked".into()));
    assert_eq!(
        rendered_rows(&out).cloned(),
        Some(vec![ResultRow {
            title: "Unlinked".into(),
            subtitle: "Project — Graphic Design".into(),
        }])
    );
    let out = click(&mut site, Target::SearchResult(0));
    assert_eq!(out.navigation(), None);
    assert_eq!(out.effects, vec![Effect::HidePalette]);

    click(&mut site, Target::SearchButton);
    site.handle(SiteEvent::QueryChanged("linked".into()));
    let out = click(&mut site, Target::SearchResult(0));
    assert_eq!(out.navigation(), Some("linked.html"));
}

#[test]
fn backdrop_click_closes_palette_but_inner_click_does_not() {
    let mut site = home_site();
    click(&mut site, Target::SearchButton);

    let inner = site.handle(SiteEvent::Click(
        ClickContext::outside().within(folio_core::Regions::SEARCH_OVERLAY),
    ));
    assert!(!inner.effects.contains(&Effect::HidePalette));

    let out = click(&mut site, Target::SearchBackdrop);
    assert_eq!(out.effects, vec![Effect::HidePalette]);
}

#[test]
fn typing_ticks_follow_scheduled_delays() {
    let mut config = SiteConfig::default();
    config.typing.phrases = vec!["Hi".into()];
    let mut site = Site::new(config, Capabilities::all(), false);

    let out = site.boot();
    assert_eq!(
        out.effects,
        vec![
            Effect::SetTypingText("H".into()),
            Effect::ScheduleTyping(Duration::from_millis(70)),
        ]
    );
    let out = site.handle(SiteEvent::TypingTick);
    assert_eq!(out.effects[0], Effect::SetTypingText("Hi".into()));
    assert_eq!(out.effects[1], Effect::ScheduleTyping(Duration::from_millis(1200)));
    let out = site.handle(SiteEvent::TypingTick);
    assert_eq!(out.effects[0], Effect::SetTypingText("H".into()));
}
