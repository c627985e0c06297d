#![forbid(unsafe_code)]

//! Keyboard normalization and global shortcut resolution.
//!
//! The host hands over the DOM `key` string, the modifier state, and the tag
//! name of the focused element. Everything else is decided here.

use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const META  = 0b1000;
    }
}

impl Modifiers {
    /// Build from the four DOM modifier booleans.
    #[must_use]
    pub fn from_dom(shift: bool, alt: bool, ctrl: bool, meta: bool) -> Self {
        let mut mods = Self::empty();
        mods.set(Self::SHIFT, shift);
        mods.set(Self::ALT, alt);
        mods.set(Self::CTRL, ctrl);
        mods.set(Self::META, meta);
        mods
    }

    /// Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub const fn has_command(self) -> bool {
        self.intersects(Self::CTRL.union(Self::META))
    }
}

/// Normalized key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Other(Box<str>),
}

impl Key {
    /// Normalize a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        let mut chars = key.chars();
        if let Some(first) = chars.next()
            && chars.next().is_none()
        {
            return Self::Char(first);
        }
        match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Spacebar" => Self::Char(' '),
            other => Self::Other(other.into()),
        }
    }

    /// Keys that activate a focused button-like control.
    #[must_use]
    pub fn is_activation(&self) -> bool {
        matches!(self, Self::Enter | Self::Char(' '))
    }
}

/// Normalized key-down event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub mods: Modifiers,
}

impl KeyInput {
    #[must_use]
    pub fn new(key: Key, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    /// Shorthand for an unmodified DOM key.
    #[must_use]
    pub fn plain(dom_key: &str) -> Self {
        Self::new(Key::from_dom(dom_key), Modifiers::empty())
    }
}

/// What currently holds keyboard focus, as far as shortcuts care.
///
/// This is a tag-name heuristic: only `INPUT` and `TEXTAREA` count as text
/// entry. Content-editable regions and custom widgets are not detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FocusKind {
    TextEntry,
    #[default]
    Other,
}

impl FocusKind {
    #[must_use]
    pub fn from_tag_name(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("INPUT") || tag.eq_ignore_ascii_case("TEXTAREA") {
            Self::TextEntry
        } else {
            Self::Other
        }
    }
}

/// Document-level shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// Open the command palette. The browser default must be suppressed.
    OpenSearch,
    /// Close whatever overlays are open.
    Dismiss,
}

/// Resolve a key-down at document level into a shortcut.
#[must_use]
pub fn resolve_shortcut(input: &KeyInput, focus: FocusKind) -> Option<Shortcut> {
    match &input.key {
        Key::Char('/') if !input.mods.has_command() && focus != FocusKind::TextEntry => {
            Some(Shortcut::OpenSearch)
        }
        Key::Char(c) if input.mods.has_command() && c.eq_ignore_ascii_case(&'k') => {
            Some(Shortcut::OpenSearch)
        }
        Key::Escape => Some(Shortcut::Dismiss),
        _ => None,
    }
}
