#![forbid(unsafe_code)]

//! DOM lookup and effect application.

use core::time::Duration;

use folio_core::card::{ProjectCard, Thumbnail};
use folio_core::config::ElementIds;
use folio_core::menu::MenuKind;
use folio_core::{Capabilities, Effect, ResultRow};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, Window};

/// Attribute carrying a card's position in the grid.
pub(crate) const CARD_INDEX_ATTR: &str = "data-card-index";
/// Attribute carrying a result row's position in the result list.
pub(crate) const RESULT_INDEX_ATTR: &str = "data-result-index";

const SHOW_CLASS: &str = "show";
const NO_SCROLL_CLASS: &str = "no-scroll";
const HIDDEN_ATTR: &str = "hidden";

/// Elements found at boot. Every lookup is optional.
pub(crate) struct Dom {
    pub window: Window,
    pub document: Document,
    pub work_button: Option<Element>,
    pub work_menu: Option<Element>,
    pub mobile_button: Option<Element>,
    pub mobile_menu: Option<Element>,
    pub mobile_close: Option<Element>,
    pub mobile_search: Option<Element>,
    pub search_button: Option<Element>,
    pub search_overlay: Option<Element>,
    pub search_input: Option<HtmlInputElement>,
    pub search_results: Option<Element>,
    pub search_close: Option<Element>,
    pub typing_text: Option<Element>,
    pub modal: Option<Element>,
    pub modal_title: Option<Element>,
    pub modal_body: Option<Element>,
    pub modal_close: Option<Element>,
    pub projects_grid: Option<Element>,
    pub view_more: Option<Element>,
}

impl Dom {
    pub fn lookup(window: Window, ids: &ElementIds) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let find = |id: &str| {
            let element = document.get_element_by_id(id);
            if element.is_none() {
                tracing::debug!(id, "element not found");
            }
            element
        };

        let search_input =
            find(&ids.search_input).and_then(|el| match el.dyn_into::<HtmlInputElement>() {
                Ok(input) => Some(input),
                Err(_) => {
                    tracing::debug!(id = %ids.search_input, "search field is not an <input>");
                    None
                }
            });

        let dom = Self {
            work_button: find(&ids.work_button),
            work_menu: find(&ids.work_menu),
            mobile_button: find(&ids.mobile_button),
            mobile_menu: find(&ids.mobile_menu),
            mobile_close: find(&ids.mobile_close),
            mobile_search: find(&ids.mobile_search),
            search_button: find(&ids.search_button),
            search_overlay: find(&ids.search_overlay),
            search_input,
            search_results: find(&ids.search_results),
            search_close: find(&ids.search_close),
            typing_text: find(&ids.typing_text),
            modal: find(&ids.modal),
            modal_title: find(&ids.modal_title),
            modal_body: find(&ids.modal_body),
            modal_close: find(&ids.modal_close),
            projects_grid: find(&ids.projects_grid),
            view_more: find(&ids.view_more),
            document,
            window,
        };

        // The close control is a plain element; make it keyboard reachable.
        if let Some(close) = &dom.search_close {
            close.set_attribute("role", "button")?;
            close.set_attribute("tabindex", "0")?;
        }
        Ok(dom)
    }

    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(
            Capabilities::DROPDOWN,
            self.work_button.is_some() && self.work_menu.is_some(),
        );
        caps.set(
            Capabilities::MOBILE_MENU,
            self.mobile_button.is_some() && self.mobile_menu.is_some(),
        );
        caps.set(
            Capabilities::PALETTE,
            self.search_overlay.is_some() && self.search_input.is_some(),
        );
        caps.set(Capabilities::PALETTE_RESULTS, self.search_results.is_some());
        caps.set(
            Capabilities::MODAL,
            self.modal.is_some() && self.modal_title.is_some() && self.modal_body.is_some(),
        );
        caps.set(Capabilities::TYPING, self.typing_text.is_some());
        caps.set(Capabilities::GRID, self.projects_grid.is_some());
        caps.set(Capabilities::VIEW_MORE, self.view_more.is_some());
        caps
    }

    /// Apply one DOM effect. Timer and fetch effects are owned by the runtime
    /// and ignored here.
    pub fn apply(&self, effect: &Effect) -> Result<(), JsValue> {
        match effect {
            Effect::SetMenuOpen {
                menu: MenuKind::Dropdown,
                open,
            } => self.set_dropdown(*open),
            Effect::SetMenuOpen {
                menu: MenuKind::Overlay,
                open,
            } => self.set_mobile_menu(*open),
            Effect::ShowModal { title, body_html } => {
                if let Some(el) = &self.modal_title {
                    el.set_text_content(Some(title.as_str()));
                }
                if let Some(el) = &self.modal_body {
                    el.set_inner_html(body_html);
                }
                set_hidden(self.modal.as_ref(), false)
            }
            Effect::HideModal => set_hidden(self.modal.as_ref(), true),
            Effect::ShowPalette => set_hidden(self.search_overlay.as_ref(), false),
            Effect::HidePalette => set_hidden(self.search_overlay.as_ref(), true),
            Effect::ClearQuery => {
                if let Some(input) = &self.search_input {
                    input.set_value("");
                }
                Ok(())
            }
            Effect::FocusQuery { delay } => self.focus_query_later(*delay),
            Effect::RenderResults(rows) => self.render_results(rows),
            Effect::Navigate(url) => self.window.location().set_href(url),
            Effect::AppendCards { first_index, cards } => self.append_cards(*first_index, cards),
            Effect::SetViewMore { label } => {
                if let Some(button) = &self.view_more {
                    button.set_text_content(Some(*label));
                    button.remove_attribute("disabled")?;
                }
                Ok(())
            }
            Effect::ShowGridError(message) => self.show_grid_error(message),
            Effect::SetTypingText(text) => {
                if let Some(el) = &self.typing_text {
                    el.set_text_content(Some(text.as_str()));
                }
                Ok(())
            }
            Effect::ScheduleTyping(_) | Effect::FetchProjects { .. } => Ok(()),
        }
    }

    fn set_dropdown(&self, open: bool) -> Result<(), JsValue> {
        let (Some(button), Some(menu)) = (&self.work_button, &self.work_menu) else {
            return Ok(());
        };
        menu.class_list().toggle_with_force(SHOW_CLASS, open)?;
        button.set_attribute("aria-expanded", bool_attr(open))
    }

    fn set_mobile_menu(&self, open: bool) -> Result<(), JsValue> {
        let (Some(button), Some(menu)) = (&self.mobile_button, &self.mobile_menu) else {
            return Ok(());
        };
        set_hidden(Some(menu), !open)?;
        menu.class_list().toggle_with_force(SHOW_CLASS, open)?;
        if let Some(root) = self.document.document_element() {
            root.class_list().toggle_with_force(NO_SCROLL_CLASS, open)?;
        }
        if let Some(body) = self.document.body() {
            body.class_list().toggle_with_force(NO_SCROLL_CLASS, open)?;
        }
        button.set_attribute("aria-expanded", bool_attr(open))
    }

    fn focus_query_later(&self, delay: Duration) -> Result<(), JsValue> {
        let Some(input) = self.search_input.clone() else {
            return Ok(());
        };
        let callback = Closure::once_into_js(move || {
            if let Err(err) = input.focus() {
                tracing::warn!(?err, "failed to focus search field");
            }
        });
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis(delay),
            )
            .map(drop)
    }

    fn render_results(&self, rows: &[ResultRow]) -> Result<(), JsValue> {
        let Some(container) = &self.search_results else {
            return Ok(());
        };
        container.set_inner_html("");
        for (index, row) in rows.iter().enumerate() {
            let item = self.element("div", "cmd-item")?;
            item.set_attribute("role", "option")?;
            item.set_attribute("tabindex", "0")?;
            item.set_attribute(RESULT_INDEX_ATTR, &index.to_string())?;
            item.append_child(&self.text_element("div", "cmd-title", &row.title)?)?;
            item.append_child(&self.text_element("div", "cmd-desc", &row.subtitle)?)?;
            container.append_child(&item)?;
        }
        Ok(())
    }

    fn append_cards(&self, first_index: usize, cards: &[ProjectCard]) -> Result<(), JsValue> {
        let Some(grid) = &self.projects_grid else {
            return Ok(());
        };
        for (offset, card) in cards.iter().enumerate() {
            grid.append_child(&self.card_element(first_index + offset, card)?)?;
        }
        Ok(())
    }

    fn card_element(&self, index: usize, card: &ProjectCard) -> Result<Element, JsValue> {
        let root = self.element("div", "project-card")?;
        root.set_attribute(CARD_INDEX_ATTR, &index.to_string())?;

        let thumb = self.element("div", "project-thumb")?;
        thumb.set_attribute("aria-label", &card.thumb_label)?;
        thumb.set_attribute("role", "img")?;
        match &card.thumbnail {
            Thumbnail::Image { src, alt } => {
                let img = self.document.create_element("img")?;
                img.set_attribute("src", src)?;
                img.set_attribute("alt", alt)?;
                thumb.append_child(&img)?;
            }
            Thumbnail::Placeholder(text) => thumb.set_text_content(Some(text.as_str())),
        }

        let row = self.element("div", "project-row")?;
        row.append_child(&self.text_element("div", "project-title", &card.title)?)?;
        row.append_child(&self.text_element("div", "project-arrow", "→")?)?;

        let meta = self.element("div", "project-meta")?;
        meta.append_child(&self.text_element("div", "project-kicker", &card.kicker)?)?;
        meta.append_child(&row)?;
        meta.append_child(&self.text_element(
            "div",
            "experience-description",
            &card.description,
        )?)?;

        root.append_child(&thumb)?;
        root.append_child(&meta)?;
        Ok(root)
    }

    fn show_grid_error(&self, message: &str) -> Result<(), JsValue> {
        let Some(grid) = &self.projects_grid else {
            return Ok(());
        };
        let note = self.document.create_element("div")?;
        note.set_attribute("style", "color:var(--muted)")?;
        note.set_text_content(Some(message));
        grid.set_inner_html("");
        grid.append_child(&note).map(drop)
    }

    fn element(&self, tag: &str, class: &str) -> Result<Element, JsValue> {
        let el = self.document.create_element(tag)?;
        el.set_class_name(class);
        Ok(el)
    }

    fn text_element(&self, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
        let el = self.element(tag, class)?;
        el.set_text_content(Some(text));
        Ok(el)
    }
}

fn set_hidden(element: Option<&Element>, hidden: bool) -> Result<(), JsValue> {
    match element {
        Some(el) if hidden => el.set_attribute(HIDDEN_ATTR, ""),
        Some(el) => el.remove_attribute(HIDDEN_ATTR),
        None => Ok(()),
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Timer delay in whole milliseconds, saturating at `i32::MAX`.
pub(crate) fn millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}
