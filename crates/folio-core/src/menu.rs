#![forbid(unsafe_code)]

//! Menu open/closed state.
//!
//! Both the desktop dropdown and the mobile overlay are a single boolean
//! mirrored into DOM attributes. Mutators report whether the flag actually
//! changed so the host only touches the DOM on transitions.

/// Which menu a state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    /// Desktop "work" dropdown.
    Dropdown,
    /// Full-screen mobile menu; locks page scroll while open.
    Overlay,
}

/// Open/closed flag for one menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    kind: MenuKind,
    open: bool,
}

impl Menu {
    #[must_use]
    pub const fn new(kind: MenuKind) -> Self {
        Self { kind, open: false }
    }

    #[must_use]
    pub const fn dropdown() -> Self {
        Self::new(MenuKind::Dropdown)
    }

    #[must_use]
    pub const fn overlay() -> Self {
        Self::new(MenuKind::Overlay)
    }

    #[must_use]
    pub const fn kind(&self) -> MenuKind {
        self.kind
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the flag; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Force closed. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.open;
        self.open = false;
        was_open
    }

    /// Value for the trigger's `aria-expanded` attribute.
    #[must_use]
    pub const fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    /// Whether page scrolling should be locked.
    #[must_use]
    pub const fn locks_scroll(&self) -> bool {
        self.open && matches!(self.kind, MenuKind::Overlay)
    }
}
