#![forbid(unsafe_code)]

//! One-shot project list fetch.

use folio_core::LoadError;
use folio_core::ProjectEntry;
use folio_core::model::decode_projects;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

/// Fetch and decode the project list at `url`. No retry, no timeout.
pub(crate) async fn load_projects(window: &Window, url: &str) -> Result<Vec<ProjectEntry>, LoadError> {
    let network = |err: JsValue| LoadError::Network {
        path: url.to_string(),
        reason: describe(&err),
    };

    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(network)?;
    let resp: Response = resp.dyn_into().map_err(network)?;
    if !resp.ok() {
        return Err(LoadError::Status {
            path: url.to_string(),
            status: resp.status(),
        });
    }

    let body = JsFuture::from(resp.text().map_err(network)?)
        .await
        .map_err(network)?;
    let text = body.as_string().ok_or_else(|| LoadError::Decode {
        path: url.to_string(),
        reason: "response body is not text".to_string(),
    })?;
    decode_projects(&text).map_err(|err| LoadError::Decode {
        path: url.to_string(),
        reason: err.to_string(),
    })
}

/// Best-effort message for a thrown JS value.
fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
