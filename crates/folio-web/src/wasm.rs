#![forbid(unsafe_code)]

use core::cell::{Cell, OnceCell, RefCell};
use core::time::Duration;
use std::rc::Rc;

use folio_core::{Effect, Outcome, Site, SiteConfig, SiteEvent};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, KeyboardEvent, MouseEvent};

use crate::boot_slot::BootSlot;
use crate::dom::{Dom, millis};
use crate::{events, fetch, logging};

/// Live page state once the DOM is ready.
struct Runtime {
    site: Site,
    dom: Dom,
    typing_timer: Option<i32>,
}

type Shared = Rc<RefCell<Runtime>>;

impl Runtime {
    fn apply(&mut self, shared: &Shared, effect: &Effect) -> Result<(), JsValue> {
        match effect {
            Effect::ScheduleTyping(delay) => self.schedule_typing(shared, *delay),
            Effect::FetchProjects { url } => {
                spawn_fetch(shared, &self.dom, url.clone());
                Ok(())
            }
            other => self.dom.apply(other),
        }
    }

    /// Re-arm the single typing timeout.
    fn schedule_typing(&mut self, shared: &Shared, delay: Duration) -> Result<(), JsValue> {
        self.cancel_typing_timer();
        let shared = Rc::clone(shared);
        let callback = Closure::once_into_js(move || {
            if let Ok(mut rt) = shared.try_borrow_mut() {
                rt.typing_timer = None;
            }
            dispatch(&shared, SiteEvent::TypingTick);
        });
        let handle = self
            .dom
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                millis(delay),
            )?;
        self.typing_timer = Some(handle);
        Ok(())
    }

    fn cancel_typing_timer(&mut self) {
        if let Some(handle) = self.typing_timer.take() {
            self.dom.window.clear_timeout_with_handle(handle);
        }
    }
}

/// Run `step` against the runtime and apply the resulting effects.
fn run<F>(shared: &Shared, step: F) -> Outcome
where
    F: FnOnce(&mut Runtime) -> Outcome,
{
    let Ok(mut rt) = shared.try_borrow_mut() else {
        tracing::warn!("runtime busy; event dropped");
        return Outcome::default();
    };
    let outcome = step(&mut rt);
    for effect in &outcome.effects {
        if let Err(err) = rt.apply(shared, effect) {
            tracing::warn!(?err, ?effect, "failed to apply effect");
        }
    }
    outcome
}

fn dispatch(shared: &Shared, event: SiteEvent) -> Outcome {
    run(shared, |rt| rt.site.handle(event))
}

fn spawn_fetch(shared: &Shared, dom: &Dom, url: String) {
    let shared = Rc::clone(shared);
    let window = dom.window.clone();
    wasm_bindgen_futures::spawn_local(async move {
        tracing::debug!(%url, "fetching project list");
        let event = match fetch::load_projects(&window, &url).await {
            Ok(projects) => SiteEvent::ProjectsLoaded(projects),
            Err(err) => SiteEvent::ProjectsFailed(err),
        };
        dispatch(&shared, event);
    });
}

fn finish(event: &Event, outcome: &Outcome) {
    if outcome.prevent_default {
        event.prevent_default();
    }
    if outcome.stop_propagation {
        event.stop_propagation();
    }
}

fn install_listeners(shared: &Shared, document: &web_sys::Document) -> Result<(), JsValue> {
    {
        let shared = Rc::clone(shared);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = events::event_element(&event) else {
                return;
            };
            let outcome = run(&shared, |rt| {
                let classified = events::classify_click(&rt.dom, &target);
                rt.site.handle(classified)
            });
            finish(&event, &outcome);
        });
        document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let shared = Rc::clone(shared);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let outcome = run(&shared, |rt| {
                let classified = events::classify_key(&rt.dom, &event);
                rt.site.handle(classified)
            });
            finish(&event, &outcome);
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let input = shared.borrow().dom.search_input.clone();
    if let Some(input) = input {
        let shared = Rc::clone(shared);
        let field = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            dispatch(&shared, SiteEvent::QueryChanged(field.value()));
        });
        input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

/// Handle returned to JS; valid before and after the DOM is ready.
struct Handle {
    runtime: OnceCell<Shared>,
    typing_stopped: Cell<bool>,
}

/// Build the runtime against the now-ready DOM and run the boot step.
fn start(handle: &Handle, config: SiteConfig, home: bool) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let dom = Dom::lookup(window, &config.elements)?;
    let capabilities = dom.capabilities();
    tracing::debug!(?capabilities, "dom scanned");

    let document = dom.document.clone();
    let shared: Shared = Rc::new(RefCell::new(Runtime {
        site: Site::new(config, capabilities, home),
        dom,
        typing_timer: None,
    }));
    if handle.runtime.set(Rc::clone(&shared)).is_err() {
        tracing::warn!("site already started");
        return Ok(());
    }
    install_listeners(&shared, &document)?;

    if handle.typing_stopped.get() {
        shared.borrow_mut().site.stop_typing();
    }
    run(&shared, |rt| rt.site.boot());
    Ok(())
}

/// Read `window.HOME_PAGE` as a JS truthy value.
fn global_home_flag(window: &web_sys::Window) -> bool {
    js_sys::Reflect::get(window, &JsValue::from_str("HOME_PAGE")).is_ok_and(|v| v.is_truthy())
}

fn parse_options(options: Option<JsValue>) -> Result<SiteConfig, JsValue> {
    let json = match options {
        Some(value) if !value.is_undefined() && !value.is_null() => {
            String::from(js_sys::JSON::stringify(&value)?)
        }
        _ => "{}".to_string(),
    };
    SiteConfig::from_json_str(&json).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Site runtime handle.
#[wasm_bindgen]
pub struct FolioSite {
    handle: Rc<Handle>,
    home: bool,
}

#[wasm_bindgen]
impl FolioSite {
    /// Cancel hook for the typing animation.
    #[wasm_bindgen(js_name = stopTyping)]
    pub fn stop_typing(&self) {
        self.handle.typing_stopped.set(true);
        let Some(shared) = self.handle.runtime.get() else {
            return;
        };
        if let Ok(mut rt) = shared.try_borrow_mut() {
            rt.site.stop_typing();
            rt.cancel_typing_timer();
        }
    }

    /// Number of loaded projects; 0 until the home fetch completes.
    #[wasm_bindgen(js_name = projectCount)]
    pub fn project_count(&self) -> usize {
        self.handle
            .runtime
            .get()
            .and_then(|shared| shared.try_borrow().ok().map(|rt| rt.site.store().len()))
            .unwrap_or(0)
    }

    #[wasm_bindgen(js_name = isHome)]
    pub fn is_home(&self) -> bool {
        self.home
    }
}

thread_local! {
    static BOOTED: BootSlot<(Rc<Handle>, bool)> = const { BootSlot::new() };
}

/// Start the site runtime.
///
/// `options` deserializes into the site configuration; invalid options are
/// rejected before the DOM is touched. Work starts at `DOMContentLoaded`, or
/// immediately if the document has already been parsed. A page boots once:
/// later calls return a handle to the running site and ignore their options.
#[wasm_bindgen]
pub fn boot(options: Option<JsValue>) -> Result<FolioSite, JsValue> {
    let config = parse_options(options)?;
    logging::init(&config.log_level);

    let (handle, home) = BOOTED.with(|slot| {
        let (booted, fresh) = slot.get_or_try_init(|| begin(config))?;
        if !fresh {
            tracing::warn!("site already booted; returning the running instance");
        }
        Ok::<_, JsValue>(booted)
    })?;
    Ok(FolioSite { handle, home })
}

fn begin(config: SiteConfig) -> Result<(Rc<Handle>, bool), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let home = config.home.unwrap_or_else(|| global_home_flag(&window));
    tracing::info!(home, root = %config.root(), "folio boot requested");

    let handle = Rc::new(Handle {
        runtime: OnceCell::new(),
        typing_stopped: Cell::new(false),
    });

    if document.ready_state() == "loading" {
        let pending = Rc::clone(&handle);
        let callback = Closure::once_into_js(move || {
            if let Err(err) = start(&pending, config, home) {
                tracing::warn!(?err, "site start failed");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
    } else {
        start(&handle, config, home)?;
    }

    Ok((handle, home))
}
