//! # Application State
//!
//! Core business state for GameFinder. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── api: Arc<dyn GameFinderApi>   // recommend + chat endpoints
//! ├── storage: LocalStorage         // selectedGame hand-off slot
//! ├── route: Route                  // current page
//! ├── search: SearchPage            // vibe search state
//! ├── chat: ChatPage                // chat transcript
//! ├── detail: Option<DetailPage>    // mounted while on /game/{id}
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::api::GameFinderApi;
use crate::core::chat::ChatPage;
use crate::core::config::ResolvedConfig;
use crate::core::detail::DetailPage;
use crate::core::route::Route;
use crate::core::search::SearchPage;
use crate::core::storage::LocalStorage;

pub struct App {
    pub api: Arc<dyn GameFinderApi>,
    pub storage: LocalStorage,
    pub route: Route,
    pub search: SearchPage,
    pub chat: ChatPage,
    pub detail: Option<DetailPage>,
    pub status_message: String,
}

impl App {
    pub fn new(api: Arc<dyn GameFinderApi>, storage: LocalStorage) -> Self {
        Self {
            api,
            storage,
            route: Route::Search,
            search: SearchPage::default(),
            chat: ChatPage::default(),
            detail: None,
            status_message: String::from("Welcome to GameFinder!"),
        }
    }

    pub fn from_config(api: Arc<dyn GameFinderApi>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(api, LocalStorage::new(config.storage_dir.clone()));
        app.search = SearchPage::new(config.page_size, config.top_k);
        app.chat = ChatPage::new(config.history_window);
        app
    }

    /// True while any page is waiting on the backend.
    pub fn is_loading(&self) -> bool {
        self.search.is_loading || self.chat.is_loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeApi, test_app};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to GameFinder!");
        assert_eq!(app.route, Route::Search);
        assert!(!app.is_loading());
        assert!(app.detail.is_none());
        assert_eq!(app.chat.messages.len(), 1);
    }

    #[test]
    fn test_from_config_applies_limits() {
        let config = ResolvedConfig {
            api_base: "http://localhost:8000".to_string(),
            top_k: 12,
            page_size: 3,
            history_window: 4,
            request_timeout: Some(Duration::from_secs(5)),
            storage_dir: PathBuf::from("/tmp/gamefinder-state-test"),
        };
        let app = App::from_config(Arc::new(FakeApi::default()), &config);
        assert_eq!(app.search.page_size(), 3);
        assert_eq!(app.search.visible_count, 3);
        assert_eq!(app.storage.dir(), config.storage_dir.as_path());
    }
}
