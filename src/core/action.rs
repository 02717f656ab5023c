//! # Actions
//!
//! Everything that can happen in GameFinder becomes an `Action`.
//! User presses Enter in the search box? That's `Action::SubmitSearch`.
//! The recommender responds? That's `Action::SearchCompleted(result)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state and returns an [`Effect`] describing any I/O the runtime should do.
//! Network I/O happens in [`perform`], which turns the effect back into a
//! completion action.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//!                                                │
//!                       perform(effect)  ←───────┘
//!                             │
//!                             └──→ completion Action
//! ```

use log::{debug, info, warn};

use crate::api::{ApiError, ChatRequest, ChatResponse, Game, GameFinderApi, RecommendRequest};
use crate::core::detail::DetailPage;
use crate::core::route::Route;
use crate::core::search::TRENDING_TAGS;
use crate::core::state::App;
use crate::core::storage::store_selected_game;

#[derive(Debug)]
pub enum Action {
    Navigate(Route),
    // Search page
    SetQuery(String),
    UseTag(usize),
    SubmitSearch,
    SearchCompleted(Result<Vec<Game>, ApiError>),
    ShowMore,
    OpenGame(usize),
    DismissNotice,
    // Chat page
    SendChat(String),
    ChatCompleted(Result<ChatResponse, ApiError>),
    // Detail page
    NextMedia,
    PrevMedia,
    SelectMedia(usize),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Recommend(RecommendRequest),
    Chat(ChatRequest),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Navigate(route) => {
            navigate(app, route);
            Effect::None
        }
        Action::SetQuery(query) => {
            app.search.query = query;
            Effect::None
        }
        Action::UseTag(index) => {
            if let Some(tag) = TRENDING_TAGS.get(index) {
                app.search.use_tag(tag);
            }
            Effect::None
        }
        Action::SubmitSearch => match app.search.begin_search() {
            Some(request) => {
                app.status_message = String::from("Searching...");
                Effect::Recommend(request)
            }
            None => Effect::None,
        },
        Action::SearchCompleted(result) => {
            app.search.finish_search(result);
            app.status_message = match &app.search.notice {
                Some(notice) => notice.title.clone(),
                None => format!("{} games found", app.search.games.len()),
            };
            Effect::None
        }
        Action::ShowMore => {
            if app.search.has_more() {
                app.search.show_more();
            }
            Effect::None
        }
        Action::OpenGame(index) => {
            open_game(app, index);
            Effect::None
        }
        Action::DismissNotice => {
            app.search.dismiss_notice();
            Effect::None
        }
        Action::SendChat(text) => match app.chat.begin_send(&text) {
            Some(request) => {
                app.status_message = String::from("Thinking...");
                Effect::Chat(request)
            }
            None => Effect::None,
        },
        Action::ChatCompleted(result) => {
            app.status_message = match &result {
                Ok(_) => String::from("Ready"),
                Err(_) => String::from("Chat failed"),
            };
            app.chat.finish_send(result);
            Effect::None
        }
        Action::NextMedia => {
            if let Some(detail) = app.detail.as_mut() {
                detail.next();
            }
            Effect::None
        }
        Action::PrevMedia => {
            if let Some(detail) = app.detail.as_mut() {
                detail.prev();
            }
            Effect::None
        }
        Action::SelectMedia(index) => {
            if let Some(detail) = app.detail.as_mut()
                && !detail.select(index)
            {
                debug!("Ignoring out-of-range media index {}", index);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Switches pages. The detail page mounts from storage and falls back to
/// search when the slot is empty or unreadable.
fn navigate(app: &mut App, route: Route) {
    match route {
        Route::Game(id) => match DetailPage::mount(&app.storage) {
            Some(detail) => {
                if detail.game.id != id {
                    debug!(
                        "Route id {} differs from stored game {}; showing stored game",
                        id, detail.game.id
                    );
                }
                app.status_message = detail.game.title.clone();
                app.route = Route::Game(id);
                app.detail = Some(detail);
            }
            None => {
                debug!("No selected game in storage, redirecting to /");
                app.route = Route::Search;
                app.detail = None;
            }
        },
        other => {
            debug!("Navigating to {}", other);
            app.route = other;
            app.detail = None;
        }
    }
}

fn open_game(app: &mut App, index: usize) {
    let Some(game) = app.search.visible_game(index) else {
        debug!("No visible game at index {}", index);
        return;
    };
    let id = game.id.clone();
    match store_selected_game(&app.storage, game) {
        Ok(()) => navigate(app, Route::Game(id)),
        Err(e) => {
            warn!("Failed to store selected game {}: {}", id, e);
            app.status_message = format!("Could not open game: {e}");
        }
    }
}

/// Runs the I/O an effect asks for and returns the completion action, if any.
pub async fn perform(api: &dyn GameFinderApi, effect: Effect) -> Option<Action> {
    match effect {
        Effect::Recommend(request) => {
            info!("Recommend: {:?} (top_k={})", request.query, request.top_k);
            Some(Action::SearchCompleted(api.recommend(&request).await))
        }
        Effect::Chat(request) => {
            info!("Chat: {} history messages", request.history.len());
            Some(Action::ChatCompleted(api.chat(&request).await))
        }
        Effect::None | Effect::Quit => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::{CONNECTION_ERROR, FALLBACK_ANSWER, Role};
    use crate::core::search::Notice;
    use crate::core::storage::load_selected_game;
    use crate::test_support::{FakeApi, sample_games, test_app, test_app_with};
    use std::sync::Arc;

    /// Feeds an action through update and, like the event loop, performs the
    /// resulting effect and applies its completion.
    async fn dispatch(app: &mut App, action: Action) {
        let effect = update(app, action);
        let api = app.api.clone();
        if let Some(done) = perform(api.as_ref(), effect).await {
            update(app, done);
        }
    }

    #[test]
    fn test_blank_query_shows_notice_without_request() {
        let mut app = test_app();
        update(&mut app, Action::SetQuery("   ".into()));
        let effect = update(&mut app, Action::SubmitSearch);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.search.notice, Some(Notice::empty_query()));
        assert!(!app.search.is_loading);
        assert!(!app.search.has_searched);
    }

    #[test]
    fn test_submit_search_requests_top_k() {
        let mut app = test_app();
        update(&mut app, Action::SetQuery("cozy farming".into()));
        let effect = update(&mut app, Action::SubmitSearch);
        assert_eq!(
            effect,
            Effect::Recommend(RecommendRequest {
                query: "cozy farming".into(),
                top_k: 64,
            })
        );
        assert!(app.search.is_loading);

        // A second submit while loading is ignored.
        assert_eq!(update(&mut app, Action::SubmitSearch), Effect::None);
    }

    #[tokio::test]
    async fn test_search_flow_populates_results() {
        let api = Arc::new(FakeApi::with_games(sample_games(20)));
        let mut app = test_app_with(api.clone());
        update(&mut app, Action::SetQuery("roguelike".into()));
        dispatch(&mut app, Action::SubmitSearch).await;

        assert_eq!(api.recommend_count(), 1);
        assert!(!app.search.is_loading);
        assert_eq!(app.search.visible_games().len(), 8);
        assert_eq!(app.status_message, "20 games found");

        update(&mut app, Action::ShowMore);
        update(&mut app, Action::ShowMore);
        assert_eq!(app.search.visible_games().len(), 20);
        assert!(!app.search.has_more());
        update(&mut app, Action::ShowMore);
        assert_eq!(app.search.visible_count, 24);
    }

    #[tokio::test]
    async fn test_failed_search_keeps_previous_results() {
        let mut app = test_app();
        app.search.games = sample_games(3);
        app.api = Arc::new(FakeApi::failing());
        update(&mut app, Action::SetQuery("horror".into()));
        dispatch(&mut app, Action::SubmitSearch).await;

        assert_eq!(app.search.games.len(), 3);
        assert_eq!(app.search.notice, Some(Notice::search_failed()));
        assert!(!app.search.is_loading);
    }

    #[test]
    fn test_use_tag_sets_query_only() {
        let mut app = test_app();
        let effect = update(&mut app, Action::UseTag(1));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.search.query, "Cyberpunk");
        assert!(!app.search.has_searched);

        update(&mut app, Action::UseTag(99));
        assert_eq!(app.search.query, "Cyberpunk");
    }

    #[test]
    fn test_open_game_stores_and_navigates() {
        let mut app = test_app();
        app.search.games = sample_games(4);
        update(&mut app, Action::OpenGame(2));

        assert_eq!(app.route, Route::Game("game-2".into()));
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.game, app.search.games[2]);
        let stored = load_selected_game(&app.storage).unwrap().unwrap();
        assert_eq!(stored.id, "game-2");
    }

    #[test]
    fn test_open_hidden_game_is_ignored() {
        let mut app = test_app();
        app.search.games = sample_games(10);
        update(&mut app, Action::OpenGame(9));
        assert_eq!(app.route, Route::Search);
        assert!(load_selected_game(&app.storage).unwrap().is_none());
    }

    #[test]
    fn test_navigate_to_game_without_slot_redirects() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(Route::Game("123".into())));
        assert_eq!(app.route, Route::Search);
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_media_actions_drive_detail_page() {
        let mut app = test_app();
        let mut games = sample_games(1);
        games[0].screenshots = vec!["a".into(), "b".into()];
        app.search.games = games;
        update(&mut app, Action::OpenGame(0));

        update(&mut app, Action::NextMedia);
        assert_eq!(app.detail.as_ref().unwrap().index(), 1);
        update(&mut app, Action::NextMedia);
        assert_eq!(app.detail.as_ref().unwrap().index(), 0);
        update(&mut app, Action::PrevMedia);
        assert_eq!(app.detail.as_ref().unwrap().index(), 1);
        update(&mut app, Action::SelectMedia(5));
        assert_eq!(app.detail.as_ref().unwrap().index(), 1);
        update(&mut app, Action::SelectMedia(0));
        assert_eq!(app.detail.as_ref().unwrap().index(), 0);

        update(&mut app, Action::Navigate(Route::Chat));
        assert!(app.detail.is_none());
    }

    #[tokio::test]
    async fn test_chat_flow_appends_answer() {
        let api = Arc::new(FakeApi::with_answer("Try **Hades**."));
        let mut app = test_app_with(api.clone());
        dispatch(&mut app, Action::SendChat("  something fast  ".into())).await;

        let calls = api.chat_calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].message, "something fast");
        assert_eq!(calls[0].history.len(), 1);

        let last = app.chat.messages.last().unwrap();
        assert_eq!(last.role, Role::Ai);
        assert_eq!(last.content, "Try **Hades**.");
        assert!(!app.chat.is_loading);
    }

    #[tokio::test]
    async fn test_chat_without_answer_uses_fallback() {
        let mut app = test_app();
        dispatch(&mut app, Action::SendChat("hi".into())).await;
        assert_eq!(app.chat.messages.last().unwrap().content, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_repeated_chat_failures_get_distinct_ids() {
        let api = Arc::new(FakeApi::failing());
        let mut app = test_app_with(api.clone());
        dispatch(&mut app, Action::SendChat("one".into())).await;
        dispatch(&mut app, Action::SendChat("two".into())).await;

        let errors: Vec<_> = app.chat.messages.iter().filter(|m| m.is_error()).collect();
        assert_eq!(errors.len(), 2);
        assert_ne!(errors[0].id, errors[1].id);
        assert!(errors.iter().all(|m| m.content == CONNECTION_ERROR));
        assert_eq!(app.status_message, "Chat failed");
    }

    #[test]
    fn test_blank_chat_is_noop() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::SendChat(" \n ".into())), Effect::None);
        assert_eq!(app.chat.messages.len(), 1);
    }

    #[test]
    fn test_quit_returns_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_perform_without_io_yields_nothing() {
        let api = Arc::new(FakeApi::default());
        assert!(tokio_test::block_on(perform(api.as_ref(), Effect::None)).is_none());
        assert!(tokio_test::block_on(perform(api.as_ref(), Effect::Quit)).is_none());
        assert_eq!(api.recommend_count() + api.chat_count(), 0);
    }
}
