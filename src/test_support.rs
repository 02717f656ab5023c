//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{
    ApiError, ChatRequest, ChatResponse, Game, GameFinderApi, Price, RecommendRequest,
};
use crate::core::state::App;
use crate::core::storage::LocalStorage;

/// An in-memory API that records every request and answers with canned data.
#[derive(Default)]
pub struct FakeApi {
    pub games: Vec<Game>,
    pub answer: Option<String>,
    pub fail: bool,
    pub recommend_calls: Mutex<Vec<RecommendRequest>>,
    pub chat_calls: Mutex<Vec<ChatRequest>>,
}

impl FakeApi {
    pub fn with_games(games: Vec<Game>) -> Self {
        Self {
            games,
            ..Default::default()
        }
    }

    pub fn with_answer(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn recommend_count(&self) -> usize {
        self.recommend_calls.lock().unwrap().len()
    }

    pub fn chat_count(&self) -> usize {
        self.chat_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl GameFinderApi for FakeApi {
    fn base_url(&self) -> &str {
        "fake://"
    }

    async fn recommend(&self, request: &RecommendRequest) -> Result<Vec<Game>, ApiError> {
        self.recommend_calls.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(self.games.clone())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.chat_calls.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(ApiError::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        Ok(ChatResponse {
            answer: self.answer.clone(),
            related_games: Vec::new(),
        })
    }
}

/// A fully populated game with the given id.
pub fn sample_game(id: &str) -> Game {
    Game {
        id: id.to_string(),
        title: format!("Game {id}"),
        description: "A test game.".to_string(),
        genres: vec!["RPG".to_string(), "Indie".to_string()],
        tags: vec!["Cozy".to_string(), "Pixel Graphics".to_string()],
        price: Price::Amount(9.99),
        image: String::new(),
        score: 0.9,
        reviews: 1200,
        positive_ratio: 0.87,
        metacritic: 82,
        release_date: "2020-05-14".to_string(),
        screenshots: Vec::new(),
        trailer: None,
        final_score: None,
    }
}

/// `n` games with ids `game-0` .. `game-{n-1}`.
pub fn sample_games(n: usize) -> Vec<Game> {
    (0..n).map(|i| sample_game(&format!("game-{i}"))).collect()
}

/// Storage rooted in a fresh temp directory.
pub fn temp_storage() -> LocalStorage {
    LocalStorage::new(
        std::env::temp_dir().join(format!("gamefinder-test-{}", uuid::Uuid::new_v4())),
    )
}

/// Creates a test App over a FakeApi and temp storage.
pub fn test_app() -> App {
    App::new(Arc::new(FakeApi::default()), temp_storage())
}

/// Creates a test App sharing `api` so tests can inspect recorded calls.
pub fn test_app_with(api: Arc<FakeApi>) -> App {
    App::new(api, temp_storage())
}
