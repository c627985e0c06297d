#![forbid(unsafe_code)]

//! Command palette: a substring index over pages and projects plus the
//! open/closed state of the search overlay.
//!
//! Matching is deliberately plain: the trimmed, lower-cased query must occur
//! in the title or the description. There is no scoring; results keep the
//! source order (pages first, then projects in file order).
//!
//! # Invariants
//!
//! 1. An empty query yields the first `empty_limit` items in source order.
//! 2. A non-empty query yields at most `max_results` items.
//! 3. Results are a subsequence of the source list.

use crate::config::SearchConfig;
use crate::model::{EntryKind, NO_LINK, PageEntry, ProjectEntry, ProjectStore};

/// Where activating a result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    /// Pages always navigate to their fixed href.
    Page { href: String },
    /// Projects navigate to their id (the URL) unless it is `#`.
    Project,
}

/// One searchable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target: SearchTarget,
    title_folded: String,
    description_folded: String,
}

impl SearchItem {
    fn new(id: String, title: String, description: String, target: SearchTarget) -> Self {
        Self {
            title_folded: title.to_lowercase(),
            description_folded: description.to_lowercase(),
            id,
            title,
            description,
            target,
        }
    }

    #[must_use]
    pub fn from_page(page: &PageEntry) -> Self {
        Self::new(
            page.id.clone(),
            page.title.clone(),
            page.description.clone(),
            SearchTarget::Page {
                href: page.href.clone(),
            },
        )
    }

    /// Projects are keyed by URL (or `#`) and described by their
    /// description, falling back to the category.
    #[must_use]
    pub fn from_project(project: &ProjectEntry) -> Self {
        let id = if project.url.is_empty() {
            NO_LINK.to_string()
        } else {
            project.url.clone()
        };
        let description = if project.description.is_empty() {
            project.category.clone()
        } else {
            project.description.clone()
        };
        Self::new(id, project.title.clone(), description, SearchTarget::Project)
    }

    #[must_use]
    pub fn kind(&self) -> EntryKind {
        match self.target {
            SearchTarget::Page { .. } => EntryKind::Page,
            SearchTarget::Project => EntryKind::Project,
        }
    }

    /// Navigation target, if activating this item goes anywhere.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        match &self.target {
            SearchTarget::Page { href } => Some(href),
            SearchTarget::Project if self.id.is_empty() || self.id == NO_LINK => None,
            SearchTarget::Project => Some(&self.id),
        }
    }

    /// Second line of a result row, e.g. `"Page — All projects"`.
    #[must_use]
    pub fn subtitle(&self) -> String {
        format!("{} — {}", self.kind().label(), self.description)
    }

    fn matches(&self, folded_query: &str) -> bool {
        self.title_folded.contains(folded_query) || self.description_folded.contains(folded_query)
    }
}

/// Ordered list of searchable items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    items: Vec<SearchItem>,
}

impl SearchIndex {
    /// Pages first, then projects (if loaded) in file order.
    #[must_use]
    pub fn build(pages: &[PageEntry], projects: Option<&[ProjectEntry]>) -> Self {
        let items = pages
            .iter()
            .map(SearchItem::from_page)
            .chain(projects.into_iter().flatten().map(SearchItem::from_project))
            .collect();
        Self { items }
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
    pub fn items(&self) -> &[SearchItem] {
        &self.items
    }

    /// Run a query.
    #[must_use]
    pub fn search(&self, query: &str, limits: SearchConfig) -> Vec<&SearchItem> {
        let folded = query.trim().to_lowercase();
        if folded.is_empty() {
            return self.items.iter().take(limits.empty_limit).collect();
        }
        self.items
            .iter()
            .filter(|item| item.matches(&folded))
            .take(limits.max_results)
            .collect()
    }
}

/// Observable palette state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PalettePhase {
    Closed,
    OpenEmptyQuery,
    OpenWithQuery,
}

/// The command palette overlay.
///
/// Holds the static pages and a handle to the shared project store. The
/// index is rebuilt lazily the first time a query runs after the store is
/// filled.
#[derive(Debug, Clone)]
pub struct CommandPalette {
    pages: Vec<PageEntry>,
    store: ProjectStore,
    limits: SearchConfig,
    index: SearchIndex,
    indexed_projects: bool,
    open: bool,
    query: String,
    results: Vec<SearchItem>,
}

impl CommandPalette {
    #[must_use]
    pub fn new(pages: Vec<PageEntry>, store: ProjectStore, limits: SearchConfig) -> Self {
        let index = SearchIndex::build(&pages, None);
        Self {
            pages,
            store,
            limits,
            index,
            indexed_projects: false,
            open: false,
            query: String::new(),
            results: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn phase(&self) -> PalettePhase {
        match (self.open, self.query.trim().is_empty()) {
            (false, _) => PalettePhase::Closed,
            (true, true) => PalettePhase::OpenEmptyQuery,
            (true, false) => PalettePhase::OpenWithQuery,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Rows currently rendered.
    #[must_use]
    pub fn results(&self) -> &[SearchItem] {
        &self.results
    }

    /// Show the overlay with an empty query. Opening an open palette resets it.
    pub fn open(&mut self) -> &[SearchItem] {
        self.open = true;
        self.set_query("")
    }

    /// Hide the overlay. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Re-filter for a new query.
    pub fn set_query(&mut self, query: &str) -> &[SearchItem] {
        self.refresh_index();
        self.query = query.to_string();
        self.results = self
            .index
            .search(&self.query, self.limits)
            .into_iter()
            .cloned()
            .collect();
        tracing::trace!(
            query = %self.query,
            results = self.results.len(),
            "palette filtered"
        );
        &self.results
    }

    /// Activate the row at `index`: closes the palette and returns where to
    /// navigate, if anywhere.
    pub fn activate(&mut self, index: usize) -> Option<String> {
        let href = self
            .results
            .get(index)
            .and_then(|item| item.href().map(str::to_string));
        self.close();
        href
    }

    fn refresh_index(&mut self) {
        if self.indexed_projects {
            return;
        }
        if let Some(projects) = self.store.get() {
            self.index = SearchIndex::build(&self.pages, Some(&projects[..]));
            self.indexed_projects = true;
            tracing::debug!(items = self.index.len(), "search index includes projects");
        }
    }
}
