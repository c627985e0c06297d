#![forbid(unsafe_code)]

//! Project card rendering.
//!
//! A [`ProjectCard`] is a pure description of what the host should build for
//! one project record, including what activating the card does.

use crate::model::ProjectEntry;

/// Thumbnail area of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    Image { src: String, alt: String },
    /// Text shown when the record has no image.
    Placeholder(String),
}

/// What activating a card does.
///
/// Precedence: inline detail beats a URL, and a missing or `#` URL is inert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    OpenModal { title: String, body_html: String },
    Navigate(String),
    Inert,
}

impl CardAction {
    #[must_use]
    pub fn for_project(project: &ProjectEntry) -> Self {
        if let Some(detail) = project.detail() {
            Self::OpenModal {
                title: project.title.clone(),
                body_html: detail.to_string(),
            }
        } else if let Some(url) = project.link() {
            Self::Navigate(url.to_string())
        } else {
            Self::Inert
        }
    }
}

/// Everything needed to build one card element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub thumbnail: Thumbnail,
    /// Accessible label for the thumbnail region.
    pub thumb_label: String,
    pub kicker: String,
    pub title: String,
    pub description: String,
    pub action: CardAction,
}

impl ProjectCard {
    #[must_use]
    pub fn render(project: &ProjectEntry) -> Self {
        let preview = format!("{} preview", project.title);
        let thumbnail = if project.image.is_empty() {
            Thumbnail::Placeholder(format!("{} • preview", project.category))
        } else {
            Thumbnail::Image {
                src: project.image.clone(),
                alt: preview.clone(),
            }
        };
        Self {
            thumbnail,
            thumb_label: preview,
            kicker: project.category.clone(),
            title: project.title.clone(),
            description: project.description.clone(),
            action: CardAction::for_project(project),
        }
    }
}
