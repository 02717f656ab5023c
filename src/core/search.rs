//! # Search Page
//!
//! Vibe search over the recommender. Owns the query, the fetched results and a
//! client-side paging cursor (`visible_count`); the API is always asked for the
//! full `top_k` and pagination only reveals more of what is already fetched.

use log::{debug, info, warn};

use crate::api::{ApiError, Game, RecommendRequest};

/// Cards revealed per page ("show more" step and initial count).
pub const DEFAULT_PAGE_SIZE: usize = 8;
/// Number of results requested from the recommender.
pub const DEFAULT_TOP_K: usize = 64;

/// Quick-pick tags shown under the search box.
pub const TRENDING_TAGS: [&str; 10] = [
    "Cozy",
    "Cyberpunk",
    "RPG",
    "Open World",
    "Survival",
    "Roguelike",
    "FPS",
    "Horror",
    "Strategy",
    "Indie",
];

/// A user-visible toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn empty_query() -> Self {
        Self::new(
            "Describe your vibe",
            "Try something like “Cozy farming sim with pixel art”.",
        )
    }

    pub fn search_failed() -> Self {
        Self::new(
            "Search failed",
            "Could not fetch recommendations. Check the API URL / backend.",
        )
    }
}

pub struct SearchPage {
    pub query: String,
    pub games: Vec<Game>,
    pub is_loading: bool,
    pub has_searched: bool,
    pub visible_count: usize,
    pub notice: Option<Notice>,
    page_size: usize,
    top_k: usize,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_TOP_K)
    }
}

impl SearchPage {
    pub fn new(page_size: usize, top_k: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            query: String::new(),
            games: Vec::new(),
            is_loading: false,
            has_searched: false,
            visible_count: page_size,
            notice: None,
            page_size,
            top_k,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Validates the current query and, if it is searchable, moves into the
    /// loading state and returns the request to send.
    ///
    /// A blank query raises the validation notice and returns `None`. A search
    /// already in flight also returns `None`.
    pub fn begin_search(&mut self) -> Option<RecommendRequest> {
        if self.is_loading {
            debug!("Search ignored: request already in flight");
            return None;
        }
        if self.query.trim().is_empty() {
            self.notice = Some(Notice::empty_query());
            return None;
        }

        self.is_loading = true;
        self.has_searched = true;
        self.visible_count = self.page_size;
        self.notice = None;

        Some(RecommendRequest {
            query: self.query.clone(),
            top_k: self.top_k,
        })
    }

    /// Applies the outcome of a recommend call. Failures keep the previous results.
    pub fn finish_search(&mut self, result: Result<Vec<Game>, ApiError>) {
        self.is_loading = false;
        match result {
            Ok(games) => {
                info!("Search for {:?} produced {} results", self.query, games.len());
                self.games = games;
            }
            Err(e) => {
                warn!("Search for {:?} failed: {}", self.query, e);
                self.notice = Some(Notice::search_failed());
            }
        }
    }

    pub fn show_more(&mut self) {
        self.visible_count += self.page_size;
    }

    /// Whether fetched results remain hidden behind "show more".
    pub fn has_more(&self) -> bool {
        self.visible_count < self.games.len()
    }

    /// The rendered slice of results.
    pub fn visible_games(&self) -> &[Game] {
        let end = self.visible_count.min(self.games.len());
        &self.games[..end]
    }

    /// A visible result by card index.
    pub fn visible_game(&self, index: usize) -> Option<&Game> {
        self.visible_games().get(index)
    }

    /// Replaces the query with a trending tag without searching.
    pub fn use_tag(&mut self, tag: &str) {
        self.query = tag.to_string();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
