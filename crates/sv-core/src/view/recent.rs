use serde::Serialize;

use crate::entities::{RecentSearches, SearchEntry};

/// Number of entries shown from the recent-search cache.
pub const RECENT_LIMIT: usize = 5;

/// Recent searches for one user: the bounded cache and the full history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentSearchesView {
    recent: Vec<SearchEntry>,
    all: Vec<SearchEntry>,
    show_all: bool,
}

impl From<RecentSearches> for RecentSearchesView {
    fn from(searches: RecentSearches) -> Self {
        Self {
            recent: searches
                .cache
                .into_iter()
                .take(RECENT_LIMIT)
                .map(SearchEntry::from)
                .collect(),
            all: searches.database.into_iter().map(SearchEntry::from).collect(),
            show_all: false,
        }
    }
}

impl RecentSearchesView {
    #[must_use]
    pub fn with_show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    #[must_use]
    pub const fn show_all(&self) -> bool {
        self.show_all
    }

    #[must_use]
    pub const fn heading(&self) -> &'static str {
        if self.show_all {
            "All Searches"
        } else {
            "Recent Searches"
        }
    }

    /// Entries for the active tab.
    #[must_use]
    pub fn visible(&self) -> &[SearchEntry] {
        if self.show_all { &self.all } else { &self.recent }
    }

    /// Whether the history holds more than the recent tab shows.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.show_all && self.all.len() > RECENT_LIMIT
    }

    /// Nothing to show in either tab.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.recent.is_empty() && self.all.is_empty()
    }
}
