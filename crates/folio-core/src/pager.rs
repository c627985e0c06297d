#![forbid(unsafe_code)]

//! Chunked reveal of an ordered list.
//!
//! [`Pager`] owns the cursor; the host owns the container. Each
//! [`Pager::render_more`] call hands the next chunk to an emitter and reports
//! whether the list is exhausted.
//!
//! # Invariants
//!
//! 1. `shown <= len` at all times.
//! 2. `shown` never decreases.
//! 3. Once exhausted, `render_more` emits nothing and keeps returning `true`.

use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct Pager<T> {
    items: Rc<[T]>,
    chunk_size: usize,
    shown: usize,
}

impl<T> Pager<T> {
    /// Create a pager. A chunk size of 0 is treated as 1.
    #[must_use]
    pub fn new(items: impl Into<Rc<[T]>>, chunk_size: usize) -> Self {
        Self {
            items: items.into(),
            chunk_size: chunk_size.max(1),
            shown: 0,
        }
    }

    /// Emit the next chunk and return whether every item is now shown.
    pub fn render_more<F: FnMut(usize, &T)>(&mut self, mut emit: F) -> bool {
        let end = self.shown.saturating_add(self.chunk_size).min(self.items.len());
        for (index, item) in self.items[self.shown..end].iter().enumerate() {
            emit(self.shown + index, item);
        }
        self.shown = end;
        self.is_exhausted()
    }

    #[must_use]
    pub fn shown(&self) -> usize {
        self.shown
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.shown >= self.items.len()
    }
}

/// Phase of the single "view more" control under the project grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMoreMode {
    /// More cards remain; activation reveals the next chunk.
    #[default]
    RevealNext,
    /// Everything is shown; activation goes to the full listing page.
    SeeAll,
}

impl ViewMoreMode {
    #[must_use]
    pub const fn from_exhausted(exhausted: bool) -> Self {
        if exhausted { Self::SeeAll } else { Self::RevealNext }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RevealNext => "View More ↗",
            Self::SeeAll => "See all projects ↗",
        }
    }
}
