#![forbid(unsafe_code)]

//! WASM frontend for the Folio portfolio site.
//!
//! This crate is intentionally host-specific (web/WASM). It is a thin shell
//! around [`folio_core::Site`]:
//! - looks up the page's DOM elements once and derives capabilities,
//! - classifies DOM events into core events,
//! - applies the returned effects to the DOM,
//! - performs the one-shot project fetch and arms the typing timer.
//!
//! JS entry point: `boot(options?) -> FolioSite`.

#[cfg(any(target_arch = "wasm32", test))]
mod boot_slot;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{FolioSite, boot};

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct FolioSite {
    home: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl FolioSite {
    pub fn new(home: bool) -> Self {
        Self { home }
    }

    pub fn stop_typing(&mut self) {}

    pub fn project_count(&self) -> usize {
        0
    }

    pub fn is_home(&self) -> bool {
        self.home
    }
}
