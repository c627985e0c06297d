#![forbid(unsafe_code)]

//! Data model: static pages, loaded projects, and the shared project store.

use std::cell::OnceCell;
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// URL meaning "no link".
pub const NO_LINK: &str = "#";

/// Discriminant for anything the command palette can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Page,
    Project,
}

impl EntryKind {
    /// Human label used in result rows.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Page => "Page",
            Self::Project => "Project",
        }
    }
}

/// A static site page. Immutable for the lifetime of the page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub href: String,
}

/// One record of the project data file.
///
/// The file is not validated: missing fields, `null`s and values of the wrong
/// type all collapse to an empty string instead of failing the whole list.
/// `detail` is stricter: only a JSON string counts as inline content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "lenient_string")]
    pub image: String,
    #[serde(deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(deserialize_with = "string_only")]
    pub detail: String,
}

impl ProjectEntry {
    /// Convenience constructor for a bare record.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// The link target, or `None` for a missing or `#` URL.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        if self.url.is_empty() || self.url == NO_LINK {
            None
        } else {
            Some(&self.url)
        }
    }

    /// Inline detail markup, when present.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        (!self.detail.is_empty()).then_some(self.detail.as_str())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

fn string_only<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Decode the project data file: a JSON array of project records.
pub fn decode_projects(json: &str) -> Result<Vec<ProjectEntry>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Write-once, read-many holder for the loaded project list.
///
/// Cloning shares the same slot. Boot publishes into it once; the command
/// palette reads from it on every query.
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    slot: Rc<OnceCell<Rc<[ProjectEntry]>>>,
}

impl ProjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the list. A second publish is ignored and the first list
    /// is returned.
    pub fn publish(&self, projects: Vec<ProjectEntry>) -> Rc<[ProjectEntry]> {
        if let Some(existing) = self.slot.get() {
            tracing::warn!("project list already published; ignoring reload");
            return Rc::clone(existing);
        }
        let projects: Rc<[ProjectEntry]> = projects.into();
        let _ = self.slot.set(Rc::clone(&projects));
        tracing::debug!(count = projects.len(), "projects published");
        projects
    }

    #[must_use]
    pub fn get(&self) -> Option<Rc<[ProjectEntry]>> {
        self.slot.get().cloned()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Number of loaded projects (0 before load).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slot.get().map_or(0, |p| p.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
