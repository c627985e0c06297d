#![forbid(unsafe_code)]

//! Host-independent core of the Folio portfolio site runtime.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (the browser glue in
//!   `folio-web`) classifies DOM events into [`SiteEvent`]s and applies the
//!   returned [`Effect`]s. Nothing in this crate touches the DOM.
//! - **Deterministic time**: timers are requested as delays in [`Effect`]s;
//!   the host decides when a tick actually fires.
//! - **No threads / no blocking**: suitable for `wasm32-unknown-unknown`.
//!
//! Every component is a small state machine that can be driven and asserted
//! on natively:
//!
//! - [`menu`]: dropdown and mobile overlay menu toggles.
//! - [`modal`]: the single reusable quick-view dialog.
//! - [`card`]: project record → card description + click action.
//! - [`pager`]: chunked reveal of an ordered list, plus the "view more" mode.
//! - [`search`]: the command palette and its substring index.
//! - [`typing`]: the typing-text animation.
//! - [`site`]: the model that wires all of the above together.

pub mod card;
pub mod config;
pub mod error;
pub mod input;
pub mod menu;
pub mod modal;
pub mod model;
pub mod pager;
pub mod search;
pub mod site;
pub mod typing;

pub use config::SiteConfig;
pub use error::{ConfigError, LoadError};
pub use model::{PageEntry, ProjectEntry, ProjectStore};
pub use site::{
    Capabilities, ClickContext, Effect, Outcome, Regions, ResultRow, Site, SiteEvent, Target,
};
