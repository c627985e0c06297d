#![forbid(unsafe_code)]

//! DOM event classification.
//!
//! Turns a raw click or key-down into the normalized [`SiteEvent`] the core
//! understands. Targets are resolved innermost-first; regions record every
//! known container the event target sits in.

use folio_core::input::{FocusKind, Key, KeyInput, Modifiers};
use folio_core::{ClickContext, Regions, SiteEvent, Target};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, Node};

use crate::dom::{CARD_INDEX_ATTR, Dom, RESULT_INDEX_ATTR};

/// Element an event was dispatched to, if it is an element.
pub(crate) fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

pub(crate) fn classify_click(dom: &Dom, target: &Element) -> SiteEvent {
    let node: &Node = target;
    let inside = |el: &Option<Element>| el.as_ref().is_some_and(|el| el.contains(Some(node)));
    let is = |el: &Option<Element>| el.as_ref().is_some_and(|el| el.is_same_node(Some(node)));

    let resolved = if inside(&dom.work_button) {
        Target::WorkTrigger
    } else if inside(&dom.mobile_button) {
        Target::MobileTrigger
    } else if inside(&dom.mobile_close) {
        Target::MobileClose
    } else if inside(&dom.mobile_search) {
        Target::MobileSearch
    } else if is(&dom.mobile_menu) {
        Target::MobileBackdrop
    } else if inside(&dom.search_button) {
        Target::SearchButton
    } else if inside(&dom.search_close) {
        Target::SearchClose
    } else if let Some(index) = indexed(target, RESULT_INDEX_ATTR, &dom.search_results) {
        Target::SearchResult(index)
    } else if is(&dom.search_overlay) {
        Target::SearchBackdrop
    } else if inside(&dom.modal_close) {
        Target::ModalClose
    } else if is(&dom.modal) {
        Target::ModalBackdrop
    } else if inside(&dom.view_more) {
        Target::ViewMore
    } else if let Some(index) = indexed(target, CARD_INDEX_ATTR, &dom.projects_grid) {
        Target::ProjectCard(index)
    } else {
        Target::Other
    };

    let mut regions = Regions::empty();
    regions.set(Regions::WORK_MENU, inside(&dom.work_menu));
    regions.set(Regions::MOBILE_TRIGGER, inside(&dom.mobile_button));
    regions.set(Regions::MOBILE_MENU, inside(&dom.mobile_menu));
    regions.set(Regions::SEARCH_OVERLAY, inside(&dom.search_overlay));
    regions.set(Regions::MODAL, inside(&dom.modal));
    regions.set(Regions::GRID, inside(&dom.projects_grid));

    SiteEvent::Click(ClickContext::on(resolved).within(regions))
}

pub(crate) fn classify_key(dom: &Dom, event: &KeyboardEvent) -> SiteEvent {
    let input = KeyInput::new(
        Key::from_dom(&event.key()),
        Modifiers::from_dom(
            event.shift_key(),
            event.alt_key(),
            event.ctrl_key(),
            event.meta_key(),
        ),
    );
    let focus = dom
        .document
        .active_element()
        .map_or(FocusKind::Other, |el| FocusKind::from_tag_name(&el.tag_name()));
    let target = event_element(event).map_or(Target::Other, |el| key_target(dom, &el));
    SiteEvent::Key {
        input,
        focus,
        target,
    }
}

fn key_target(dom: &Dom, target: &Element) -> Target {
    let node: &Node = target;
    if dom
        .search_close
        .as_ref()
        .is_some_and(|close| close.contains(Some(node)))
    {
        return Target::SearchClose;
    }
    indexed(target, RESULT_INDEX_ATTR, &dom.search_results).map_or(Target::Other, Target::SearchResult)
}

/// Index stored on the closest ancestor carrying `attr`, if that ancestor
/// lives inside `container`.
fn indexed(target: &Element, attr: &str, container: &Option<Element>) -> Option<usize> {
    let container = container.as_ref()?;
    let holder = target.closest(&format!("[{attr}]")).ok().flatten()?;
    let node: &Node = &holder;
    if !container.contains(Some(node)) {
        return None;
    }
    holder.get_attribute(attr)?.parse().ok()
}
