#![forbid(unsafe_code)]

//! The reusable quick-view dialog.
//!
//! The body is trusted markup supplied by the project data; it is injected
//! as-is by the host.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,
    pub body_html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modal {
    content: Option<ModalContent>,
}

impl Modal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the dialog, replacing any current content.
    pub fn open(&mut self, title: impl Into<String>, body_html: impl Into<String>) -> &ModalContent {
        self.content.insert(ModalContent {
            title: title.into(),
            body_html: body_html.into(),
        })
    }

    /// Hide the dialog. Returns `true` if it was visible.
    pub fn close(&mut self) -> bool {
        self.content.take().is_some()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    #[must_use]
    pub fn content(&self) -> Option<&ModalContent> {
        self.content.as_ref()
    }
}
