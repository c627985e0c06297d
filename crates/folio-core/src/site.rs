#![forbid(unsafe_code)]

//! The site model.
//!
//! [`Site`] owns every component and turns normalized [`SiteEvent`]s into
//! [`Effect`]s. The host (browser glue) is responsible for:
//!
//! 1. Detecting which DOM elements exist and passing [`Capabilities`].
//! 2. Classifying each DOM event into a [`SiteEvent`].
//! 3. Applying the returned [`Outcome`] (effects, `preventDefault`,
//!    `stopPropagation`).
//! 4. Performing requested fetches and timers, and feeding the results back.
//!
//! A component whose elements are missing is `None` here; events aimed at it
//! are no-ops.
//!
//! Click handling reproduces element-level listeners first, then the
//! document-level "outside click" listeners, unless propagation was stopped.

use core::time::Duration;
use std::rc::Rc;

use bitflags::bitflags;

use crate::card::{CardAction, ProjectCard};
use crate::config::SiteConfig;
use crate::error::LoadError;
use crate::input::{FocusKind, Key, KeyInput, Shortcut, resolve_shortcut};
use crate::menu::{Menu, MenuKind};
use crate::modal::Modal;
use crate::model::{ProjectEntry, ProjectStore};
use crate::pager::{Pager, ViewMoreMode};
use crate::search::CommandPalette;
use crate::typing::TypingAnimation;

/// Delay before the query field receives focus after the palette opens.
pub const FOCUS_DELAY: Duration = Duration::from_millis(10);

/// Inline message shown in the grid when the project list cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load projects.";

bitflags! {
    /// Features whose DOM elements were found at boot.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u16 {
        /// Work menu trigger and panel.
        const DROPDOWN        = 1 << 0;
        /// Mobile menu trigger and overlay.
        const MOBILE_MENU     = 1 << 1;
        /// Search overlay and query input.
        const PALETTE         = 1 << 2;
        /// Search results container.
        const PALETTE_RESULTS = 1 << 3;
        /// Modal, its title and its body.
        const MODAL           = 1 << 4;
        const TYPING          = 1 << 5;
        const GRID            = 1 << 6;
        const VIEW_MORE       = 1 << 7;
    }
}

bitflags! {
    /// DOM regions that contain a click target.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Regions: u8 {
        const WORK_MENU      = 1 << 0;
        const MOBILE_TRIGGER = 1 << 1;
        const MOBILE_MENU    = 1 << 2;
        const SEARCH_OVERLAY = 1 << 3;
        const MODAL          = 1 << 4;
        const GRID           = 1 << 5;
    }
}

/// The innermost actionable element of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    WorkTrigger,
    MobileTrigger,
    /// The mobile menu element itself, not its content.
    MobileBackdrop,
    MobileClose,
    MobileSearch,
    SearchButton,
    /// The search overlay element itself, not its content.
    SearchBackdrop,
    SearchClose,
    SearchResult(usize),
    /// The modal element itself, not its content.
    ModalBackdrop,
    ModalClose,
    ProjectCard(usize),
    ViewMore,
    Other,
}

impl Target {
    /// Regions a target is always inside of.
    #[must_use]
    pub const fn implied_regions(self) -> Regions {
        match self {
            Self::MobileTrigger => Regions::MOBILE_TRIGGER,
            Self::MobileBackdrop | Self::MobileClose | Self::MobileSearch => Regions::MOBILE_MENU,
            Self::SearchBackdrop | Self::SearchClose | Self::SearchResult(_) => {
                Regions::SEARCH_OVERLAY
            }
            Self::ModalBackdrop | Self::ModalClose => Regions::MODAL,
            Self::ProjectCard(_) | Self::ViewMore => Regions::GRID,
            Self::WorkTrigger | Self::SearchButton | Self::Other => Regions::empty(),
        }
    }
}

/// A classified click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClickContext {
    pub target: Target,
    pub regions: Regions,
}

impl ClickContext {
    /// Click on `target`, inside its implied regions.
    #[must_use]
    pub const fn on(target: Target) -> Self {
        Self {
            target,
            regions: target.implied_regions(),
        }
    }

    /// Click on nothing in particular.
    #[must_use]
    pub const fn outside() -> Self {
        Self::on(Target::Other)
    }

    /// Add regions detected by the host.
    #[must_use]
    pub const fn within(mut self, regions: Regions) -> Self {
        self.regions = self.regions.union(regions);
        self
    }
}

/// Normalized input to [`Site::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteEvent {
    Click(ClickContext),
    /// Key-down; `target` is the element the event was dispatched to.
    Key {
        input: KeyInput,
        focus: FocusKind,
        target: Target,
    },
    /// The palette query field changed.
    QueryChanged(String),
    /// A previously scheduled typing timer fired.
    TypingTick,
    ProjectsLoaded(Vec<ProjectEntry>),
    ProjectsFailed(LoadError),
}

/// One row of rendered search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub title: String,
    pub subtitle: String,
}

/// Instruction for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SetMenuOpen { menu: MenuKind, open: bool },
    ShowModal { title: String, body_html: String },
    HideModal,
    ShowPalette,
    HidePalette,
    ClearQuery,
    FocusQuery { delay: Duration },
    /// Replace the result list.
    RenderResults(Vec<ResultRow>),
    Navigate(String),
    /// Append cards to the grid; card `i` has index `first_index + i`.
    AppendCards {
        first_index: usize,
        cards: Vec<ProjectCard>,
    },
    /// Enable the view-more control with this label.
    SetViewMore { label: &'static str },
    ShowGridError(String),
    SetTypingText(String),
    /// Arm the typing timer; feed [`SiteEvent::TypingTick`] back when it fires.
    ScheduleTyping(Duration),
    /// Fetch the project list; feed back `ProjectsLoaded` or `ProjectsFailed`.
    FetchProjects { url: String },
}

/// Result of handling one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub effects: Vec<Effect>,
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl Outcome {
    fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && !self.prevent_default && !self.stop_propagation
    }

    /// First navigation requested, if any.
    #[must_use]
    pub fn navigation(&self) -> Option<&str> {
        self.effects.iter().find_map(|e| match e {
            Effect::Navigate(url) => Some(url.as_str()),
            _ => None,
        })
    }
}

/// Grid of project cards plus the mode of its view-more control.
#[derive(Debug)]
struct HomeGrid {
    pager: Pager<ProjectEntry>,
    mode: ViewMoreMode,
}

/// All client-side state of one page view.
#[derive(Debug)]
pub struct Site {
    config: SiteConfig,
    capabilities: Capabilities,
    store: ProjectStore,
    home: bool,
    booted: bool,
    dropdown: Option<Menu>,
    mobile: Option<Menu>,
    modal: Option<Modal>,
    palette: Option<CommandPalette>,
    typing: Option<TypingAnimation>,
    grid: Option<HomeGrid>,
    cards: Vec<CardAction>,
}

impl Site {
    #[must_use]
    pub fn new(config: SiteConfig, capabilities: Capabilities, home: bool) -> Self {
        let store = ProjectStore::new();
        let has = |cap| capabilities.contains(cap);

        let palette = has(Capabilities::PALETTE).then(|| {
            CommandPalette::new(config.page_entries(), store.clone(), config.search)
        });
        let typing = has(Capabilities::TYPING)
            .then(|| TypingAnimation::new(&config.typing.phrases, config.typing.timing()));

        for (cap, name) in [
            (Capabilities::DROPDOWN, "dropdown"),
            (Capabilities::MOBILE_MENU, "mobile menu"),
            (Capabilities::PALETTE, "command palette"),
            (Capabilities::MODAL, "modal"),
            (Capabilities::TYPING, "typing animation"),
            (Capabilities::GRID, "project grid"),
        ] {
            if !has(cap) {
                tracing::debug!(feature = name, "elements missing; feature disabled");
            }
        }

        Self {
            dropdown: has(Capabilities::DROPDOWN).then(Menu::dropdown),
            mobile: has(Capabilities::MOBILE_MENU).then(Menu::overlay),
            modal: has(Capabilities::MODAL).then(Modal::new),
            palette,
            typing,
            grid: None,
            cards: Vec::new(),
            config,
            capabilities,
            store,
            home,
            booted: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Shared project store (empty until the home view finishes loading).
    #[must_use]
    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        self.home
    }

    #[must_use]
    pub fn dropdown_open(&self) -> bool {
        self.dropdown.is_some_and(|m| m.is_open())
    }

    #[must_use]
    pub fn mobile_menu_open(&self) -> bool {
        self.mobile.is_some_and(|m| m.is_open())
    }

    #[must_use]
    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    #[must_use]
    pub fn palette(&self) -> Option<&CommandPalette> {
        self.palette.as_ref()
    }

    #[must_use]
    pub fn typing(&self) -> Option<&TypingAnimation> {
        self.typing.as_ref()
    }

    /// Mode of the view-more control, once the grid exists.
    #[must_use]
    pub fn view_more_mode(&self) -> Option<ViewMoreMode> {
        self.grid.as_ref().map(|g| g.mode)
    }

    /// Number of cards rendered into the grid so far.
    #[must_use]
    pub fn cards_shown(&self) -> usize {
        self.cards.len()
    }

    /// Start the page: first typing frame, and the project fetch on the home
    /// view. Only the first call does anything.
    pub fn boot(&mut self) -> Outcome {
        let mut out = Outcome::default();
        if std::mem::replace(&mut self.booted, true) {
            tracing::warn!("boot called twice; ignoring");
            return out;
        }
        tracing::info!(home = self.home, "booting site runtime");

        self.tick_typing(&mut out);
        if self.home {
            out.push(Effect::FetchProjects {
                url: self.config.projects_url(),
            });
        }
        out
    }

    /// Cancel hook for the typing animation.
    pub fn stop_typing(&mut self) {
        if let Some(typing) = self.typing.as_mut() {
            typing.cancel();
        }
    }

    pub fn handle(&mut self, event: SiteEvent) -> Outcome {
        let mut out = Outcome::default();
        match event {
            SiteEvent::Click(ctx) => self.click(ctx, &mut out),
            SiteEvent::Key {
                input,
                focus,
                target,
            } => self.key(&input, focus, target, &mut out),
            SiteEvent::QueryChanged(query) => self.query_changed(&query, &mut out),
            SiteEvent::TypingTick => self.tick_typing(&mut out),
            SiteEvent::ProjectsLoaded(projects) => self.projects_loaded(projects, &mut out),
            SiteEvent::ProjectsFailed(err) => self.projects_failed(&err, &mut out),
        }
        out
    }

    // --- Events ---

    fn click(&mut self, ctx: ClickContext, out: &mut Outcome) {
        match ctx.target {
            Target::WorkTrigger if self.dropdown.is_some() => {
                self.toggle_dropdown(out);
                out.stop_propagation = true;
                return;
            }
            Target::MobileTrigger => self.toggle_mobile(out),
            Target::MobileBackdrop | Target::MobileClose => self.close_mobile(out),
            Target::MobileSearch => {
                self.close_mobile(out);
                self.open_palette(out);
            }
            Target::SearchButton => self.open_palette(out),
            Target::SearchBackdrop | Target::SearchClose => self.close_palette(out),
            Target::SearchResult(index) => self.activate_result(index, out),
            Target::ModalBackdrop | Target::ModalClose => self.close_modal(out),
            Target::ProjectCard(index) => self.activate_card(index, out),
            Target::ViewMore => self.activate_view_more(out),
            Target::WorkTrigger | Target::Other => {}
        }

        // Document-level outside-click handling.
        if !ctx.regions.contains(Regions::WORK_MENU) {
            self.close_dropdown(out);
        }
        if !ctx
            .regions
            .intersects(Regions::MOBILE_TRIGGER | Regions::MOBILE_MENU)
        {
            self.close_mobile(out);
        }
    }

    fn key(&mut self, input: &KeyInput, focus: FocusKind, target: Target, out: &mut Outcome) {
        match target {
            Target::SearchClose if input.key.is_activation() && self.palette.is_some() => {
                out.prevent_default = true;
                self.close_palette(out);
            }
            Target::SearchResult(index) if input.key == Key::Enter => {
                self.click(ClickContext::on(Target::SearchResult(index)), out);
            }
            _ => {}
        }

        match resolve_shortcut(input, focus) {
            Some(Shortcut::OpenSearch) if self.palette.is_some() => {
                out.prevent_default = true;
                self.open_palette(out);
            }
            Some(Shortcut::Dismiss) => {
                self.close_dropdown(out);
                self.close_mobile(out);
                self.close_palette(out);
            }
            // No palette on this page: the key keeps its browser default.
            Some(Shortcut::OpenSearch) | None => {}
        }
    }

    fn query_changed(&mut self, query: &str, out: &mut Outcome) {
        let Some(palette) = self.palette.as_mut() else {
            return;
        };
        palette.set_query(query);
        self.render_results(out);
    }

    fn tick_typing(&mut self, out: &mut Outcome) {
        let Some(frame) = self.typing.as_mut().and_then(TypingAnimation::tick) else {
            return;
        };
        out.push(Effect::SetTypingText(frame.text));
        out.push(Effect::ScheduleTyping(frame.next_delay));
    }

    fn projects_loaded(&mut self, projects: Vec<ProjectEntry>, out: &mut Outcome) {
        let projects = self.store.publish(projects);
        tracing::info!(count = projects.len(), "project list loaded");

        if self.grid.is_some() || !self.capabilities.contains(Capabilities::GRID) {
            return;
        }
        self.grid = Some(HomeGrid {
            pager: Pager::new(Rc::clone(&projects), self.config.chunk_size),
            mode: ViewMoreMode::RevealNext,
        });
        self.reveal_next(out);
    }

    fn projects_failed(&mut self, err: &LoadError, out: &mut Outcome) {
        tracing::error!(error = %err, path = err.path(), "failed to load projects");
        if self.capabilities.contains(Capabilities::GRID) {
            out.push(Effect::ShowGridError(LOAD_FAILED_MESSAGE.to_string()));
        }
    }

    // --- Menus ---

    fn toggle_dropdown(&mut self, out: &mut Outcome) {
        if let Some(menu) = self.dropdown.as_mut() {
            let open = menu.toggle();
            out.push(Effect::SetMenuOpen {
                menu: MenuKind::Dropdown,
                open,
            });
        }
    }

    fn close_dropdown(&mut self, out: &mut Outcome) {
        if let Some(menu) = self.dropdown.as_mut()
            && menu.close()
        {
            out.push(Effect::SetMenuOpen {
                menu: MenuKind::Dropdown,
                open: false,
            });
        }
    }

    fn toggle_mobile(&mut self, out: &mut Outcome) {
        if let Some(menu) = self.mobile.as_mut() {
            let open = menu.toggle();
            out.push(Effect::SetMenuOpen {
                menu: MenuKind::Overlay,
                open,
            });
        }
    }

    fn close_mobile(&mut self, out: &mut Outcome) {
        if let Some(menu) = self.mobile.as_mut()
            && menu.close()
        {
            out.push(Effect::SetMenuOpen {
                menu: MenuKind::Overlay,
                open: false,
            });
        }
    }

    // --- Modal ---

    fn close_modal(&mut self, out: &mut Outcome) {
        if let Some(modal) = self.modal.as_mut()
            && modal.close()
        {
            out.push(Effect::HideModal);
        }
    }

    // --- Palette ---

    fn open_palette(&mut self, out: &mut Outcome) {
        let Some(palette) = self.palette.as_mut() else {
            return;
        };
        palette.open();
        tracing::debug!("command palette opened");
        out.push(Effect::ShowPalette);
        out.push(Effect::ClearQuery);
        self.render_results(out);
        out.push(Effect::FocusQuery { delay: FOCUS_DELAY });
    }

    fn close_palette(&mut self, out: &mut Outcome) {
        if let Some(palette) = self.palette.as_mut()
            && palette.close()
        {
            out.push(Effect::HidePalette);
        }
    }

    fn render_results(&self, out: &mut Outcome) {
        if !self.capabilities.contains(Capabilities::PALETTE_RESULTS) {
            return;
        }
        let Some(palette) = self.palette.as_ref() else {
            return;
        };
        let rows = palette
            .results()
            .iter()
            .map(|item| ResultRow {
                title: item.title.clone(),
                subtitle: item.subtitle(),
            })
            .collect();
        out.push(Effect::RenderResults(rows));
    }

    fn activate_result(&mut self, index: usize, out: &mut Outcome) {
        let Some(palette) = self.palette.as_mut() else {
            return;
        };
        let was_open = palette.is_open();
        if let Some(href) = palette.activate(index) {
            out.push(Effect::Navigate(href));
        }
        if was_open {
            out.push(Effect::HidePalette);
        }
    }

    // --- Grid ---

    fn activate_card(&mut self, index: usize, out: &mut Outcome) {
        match self.cards.get(index) {
            Some(CardAction::OpenModal { title, body_html }) => {
                if let Some(modal) = self.modal.as_mut() {
                    let content = modal.open(title.clone(), body_html.clone());
                    out.push(Effect::ShowModal {
                        title: content.title.clone(),
                        body_html: content.body_html.clone(),
                    });
                }
            }
            Some(CardAction::Navigate(url)) => out.push(Effect::Navigate(url.clone())),
            Some(CardAction::Inert) | None => {}
        }
    }

    fn activate_view_more(&mut self, out: &mut Outcome) {
        match self.grid.as_ref().map(|g| g.mode) {
            Some(ViewMoreMode::RevealNext) => self.reveal_next(out),
            Some(ViewMoreMode::SeeAll) => out.push(Effect::Navigate(self.config.all_projects_url())),
            None => {}
        }
    }

    fn reveal_next(&mut self, out: &mut Outcome) {
        let Some(grid) = self.grid.as_mut() else {
            return;
        };
        let first_index = self.cards.len();
        let mut cards = Vec::new();
        let exhausted = grid
            .pager
            .render_more(|_, project| cards.push(ProjectCard::render(project)));
        grid.mode = ViewMoreMode::from_exhausted(exhausted);
        tracing::debug!(
            shown = grid.pager.shown(),
            total = grid.pager.len(),
            "project grid advanced"
        );

        self.cards.extend(cards.iter().map(|c| c.action.clone()));
        if !cards.is_empty() {
            out.push(Effect::AppendCards { first_index, cards });
        }
        if self.capabilities.contains(Capabilities::VIEW_MORE) {
            out.push(Effect::SetViewMore {
                label: grid.mode.label(),
            });
        }
    }
}
