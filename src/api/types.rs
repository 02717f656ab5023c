//! Wire types for the recommendation/chat API.
//!
//! `Game` doubles as the payload persisted in the `selectedGame` storage slot,
//! so every field must survive a serialize/deserialize cycle unchanged.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Base URL for Steam header images, used when a game has no absolute image URL.
const STEAM_CDN_BASE: &str = "https://cdn.cloudflare.steamstatic.com/steam/apps";
const STEAM_STORE_BASE: &str = "https://store.steampowered.com/app";

/// Release date formats seen in the catalogue (ISO and Steam's display formats).
const RELEASE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d, %Y", "%d %b, %Y", "%B %d, %Y"];

/// A game's price. The API sends either a number or a preformatted string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Label(String),
}

impl Price {
    /// A price that renders as `"0"` is free.
    pub fn is_free(&self) -> bool {
        match self {
            Price::Amount(amount) => *amount == 0.0,
            Price::Label(label) => label.trim() == "0",
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_free() {
            return write!(f, "Free");
        }
        match self {
            Price::Amount(amount) => write!(f, "${amount}"),
            Price::Label(label) => write!(f, "${}", label.trim()),
        }
    }
}

/// One recommendation result.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Game {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub reviews: u64,
    #[serde(default)]
    pub positive_ratio: f64,
    #[serde(default)]
    pub metacritic: u32,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub trailer: Option<String>,
    /// Ranking score from the recommender, only present on some deployments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
}

impl Game {
    /// The card/header image: the game's own URL if absolute, otherwise the Steam CDN header.
    pub fn header_image(&self) -> String {
        if self.image.starts_with("http") {
            self.image.clone()
        } else {
            format!("{STEAM_CDN_BASE}/{}/header.jpg", self.id)
        }
    }

    /// Trailer URL, treating an empty string as no trailer.
    pub fn trailer_url(&self) -> Option<&str> {
        self.trailer.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Positive review ratio as a whole percentage.
    pub fn rating_percent(&self) -> u32 {
        (self.positive_ratio.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    pub fn metacritic_label(&self) -> String {
        if self.metacritic == 0 {
            "--".to_string()
        } else {
            self.metacritic.to_string()
        }
    }

    pub fn has_good_metacritic(&self) -> bool {
        self.metacritic >= 80
    }

    pub fn release_year(&self) -> Option<i32> {
        let raw = self.release_date.trim();
        RELEASE_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
            .map(|date| date.year())
    }

    pub fn release_label(&self) -> &str {
        let raw = self.release_date.trim();
        if raw.is_empty() { "TBA" } else { raw }
    }

    /// First genre, used as the detail page's kicker.
    pub fn primary_genre(&self) -> &str {
        self.genres.first().map(String::as_str).unwrap_or("Featured")
    }

    pub fn store_url(&self) -> String {
        format!("{STEAM_STORE_BASE}/{}", self.id)
    }
}

/// Body of `POST /recommend`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RecommendRequest {
    pub query: String,
    pub top_k: usize,
}

/// Upstream role names for chat history (OpenAI terminology).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub content: String,
}

/// Body of `POST /chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<HistoryEntry>,
}

/// Response of `POST /chat`. `related_games` is accepted but not displayed.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ChatResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub related_games: Vec<Game>,
}
