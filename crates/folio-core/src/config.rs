#![forbid(unsafe_code)]

//! Boot configuration.
//!
//! The page passes a plain options object to `boot()`; it deserializes into
//! [`SiteConfig`]. Every field has a default matching the stock site, so an
//! empty object (or no object at all) is a valid configuration.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::PageEntry;

/// Top-level runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    /// Prefix for every site-relative link and data path.
    pub root: String,
    /// Explicit home-view flag. `None` defers to the host's global flag.
    pub home: Option<bool>,
    /// Project list location, relative to `root`.
    pub projects_path: String,
    /// Full project listing page, relative to `root`.
    pub all_projects_path: String,
    /// Cards revealed per "view more" activation.
    pub chunk_size: usize,
    pub search: SearchConfig,
    pub typing: TypingConfig,
    /// Static pages indexed by the command palette.
    pub pages: Vec<PageDef>,
    pub elements: ElementIds,
    /// Maximum log level (`trace`, `debug`, `info`, `warn`, `error`).
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: "./".to_string(),
            home: None,
            projects_path: "data/recent-projects.json".to_string(),
            all_projects_path: "pages/projects.html".to_string(),
            chunk_size: 4,
            search: SearchConfig::default(),
            typing: TypingConfig::default(),
            pages: default_pages(),
            elements: ElementIds::default(),
            log_level: "info".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON options document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall pagination, search, or the ticker.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("chunkSize", self.chunk_size as u64),
            ("search.emptyLimit", self.search.empty_limit as u64),
            ("search.maxResults", self.search.max_results as u64),
            ("typing.typeMs", self.typing.type_ms),
            ("typing.deleteMs", self.typing.delete_ms),
            ("typing.pauseMs", self.typing.pause_ms),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(ConfigError::ZeroValue { field });
            }
        }
        Ok(())
    }

    /// `root`, always ending in `/`.
    #[must_use]
    pub fn root(&self) -> String {
        if self.root.is_empty() {
            "./".to_string()
        } else if self.root.ends_with('/') {
            self.root.clone()
        } else {
            format!("{}/", self.root)
        }
    }

    /// Join a site-relative path onto the root.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        format!("{}{}", self.root(), path.trim_start_matches('/'))
    }

    #[must_use]
    pub fn projects_url(&self) -> String {
        self.resolve(&self.projects_path)
    }

    #[must_use]
    pub fn all_projects_url(&self) -> String {
        self.resolve(&self.all_projects_path)
    }

    /// Static page entries with fully resolved hrefs.
    #[must_use]
    pub fn page_entries(&self) -> Vec<PageEntry> {
        self.pages
            .iter()
            .map(|p| PageEntry {
                id: p.id.clone(),
                title: p.title.clone(),
                description: p.description.clone(),
                href: self.resolve(&p.path),
            })
            .collect()
    }
}

/// Command palette limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Items shown for an empty query.
    pub empty_limit: usize,
    /// Cap on filtered results.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            empty_limit: 8,
            max_results: 20,
        }
    }
}

/// Typing animation timings (milliseconds) and phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypingConfig {
    pub type_ms: u64,
    pub delete_ms: u64,
    pub pause_ms: u64,
    pub phrases: Vec<String>,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            type_ms: 70,
            delete_ms: 40,
            pause_ms: 1200,
            phrases: [
                "Farhan Sadeque Kamal",
                "A Game Developer",
                "A UX/UI Designer",
                "A Web Designer",
                "An Aspiring Entrepreneur",
                "A Tech Enthusiast",
                "A Learner",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl TypingConfig {
    #[must_use]
    pub fn timing(&self) -> TypingTiming {
        TypingTiming {
            type_delay: Duration::from_millis(self.type_ms),
            delete_delay: Duration::from_millis(self.delete_ms),
            pause: Duration::from_millis(self.pause_ms),
        }
    }
}

/// Resolved ticker delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTiming {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    pub pause: Duration,
}

impl Default for TypingTiming {
    fn default() -> Self {
        TypingConfig::default().timing()
    }
}

/// A static page as written in configuration (path is root-relative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDef {
    pub id: String,
    pub title: String,
    pub description: String,
    pub path: String,
}

impl PageDef {
    fn new(id: &str, title: &str, description: &str, path: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            path: path.to_string(),
        }
    }
}

fn default_pages() -> Vec<PageDef> {
    vec![
        PageDef::new(
            "home",
            "Home",
            "Main portfolio page with recent projects and experience",
            "index.html",
        ),
        PageDef::new(
            "projects",
            "Projects",
            "All projects across categories",
            "pages/projects.html",
        ),
        PageDef::new(
            "graphic-design",
            "Graphic Design",
            "Visual storytelling through creative design",
            "pages/graphic-design.html",
        ),
        PageDef::new(
            "web-design",
            "Web Design",
            "Creating beautiful and functional web experiences",
            "pages/web-design.html",
        ),
        PageDef::new(
            "ux-ui-design",
            "UX/UI Design",
            "Designing intuitive user experiences",
            "pages/ux-ui-design.html",
        ),
        PageDef::new(
            "game-design",
            "Game Design",
            "Creating immersive gaming experiences",
            "pages/game-design.html",
        ),
    ]
}

/// DOM element ids the host looks up at boot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub work_button: String,
    pub work_menu: String,
    pub mobile_button: String,
    pub mobile_menu: String,
    pub mobile_close: String,
    pub mobile_search: String,
    pub search_button: String,
    pub search_overlay: String,
    pub search_input: String,
    pub search_results: String,
    pub search_close: String,
    pub typing_text: String,
    pub modal: String,
    pub modal_title: String,
    pub modal_body: String,
    pub modal_close: String,
    pub projects_grid: String,
    pub view_more: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            work_button: "workMenuBtn".into(),
            work_menu: "workMenu".into(),
            mobile_button: "mobileMenuBtn".into(),
            mobile_menu: "mobileMenu".into(),
            mobile_close: "mobileClose".into(),
            mobile_search: "mobileSearch".into(),
            search_button: "openSearchBtn".into(),
            search_overlay: "cmd".into(),
            search_input: "cmdInput".into(),
            search_results: "cmdResults".into(),
            search_close: "cmdClose".into(),
            typing_text: "typingText".into(),
            modal: "quickModal".into(),
            modal_title: "modalTitle".into(),
            modal_body: "modalBody".into(),
            modal_close: "modalClose".into(),
            projects_grid: "projectsGrid".into(),
            view_more: "viewMoreBtn".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_default() {
        let config = SiteConfig::from_json_str("{}").expect("parse");
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.chunk_size, 4);
        assert_eq!(config.search.empty_limit, 8);
        assert_eq!(config.search.max_results, 20);
    }

    #[test]
    fn partial_nested_override_keeps_other_defaults() {
        let config =
            SiteConfig::from_json_str(r#"{"root":"../","typing":{"pauseMs":500}}"#).expect("parse");
        assert_eq!(config.root, "../");
        assert_eq!(config.typing.pause_ms, 500);
        assert_eq!(config.typing.type_ms, 70);
        assert_eq!(config.typing.phrases.len(), 7);
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let err = SiteConfig::from_json_str(r#"{"chunkSize":0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroValue { field: "chunkSize" }));
    }

    #[test]
    fn zero_timing_is_rejected() {
        let err = SiteConfig::from_json_str(r#"{"typing":{"deleteMs":0}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroValue {
                field: "typing.deleteMs"
            }
        ));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = SiteConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn root_is_normalized_before_join() {
        let mut config = SiteConfig::default();
        assert_eq!(config.projects_url(), "./data/recent-projects.json");

        config.root = "..".into();
        assert_eq!(config.all_projects_url(), "../pages/projects.html");

        config.root = String::new();
        assert_eq!(config.resolve("/index.html"), "./index.html");
    }

    #[test]
    fn page_entries_resolve_against_root() {
        let config = SiteConfig {
            root: "../".into(),
            ..SiteConfig::default()
        };
        let pages = config.page_entries();
        assert_eq!(pages.len(), 6);
        assert_eq!(pages[0].id, "home");
        assert_eq!(pages[0].href, "../index.html");
        assert_eq!(pages[5].href, "../pages/game-design.html");
    }
}
