//! # Chat Page
//!
//! Transcript with the GameFinder assistant. The transcript is append-only and
//! starts with a fixed greeting that is never sent upstream. Each request
//! carries a bounded window of recent history rather than the whole log.

use log::{debug, warn};

use crate::api::{ApiError, ChatRequest, ChatResponse, HistoryEntry, HistoryRole};

/// Reserved id of the greeting message.
pub const SYSTEM_MESSAGE_ID: &str = "system";
/// Prefix of ids given to transport-failure messages.
pub const ERROR_MESSAGE_ID_PREFIX: &str = "error";
/// Messages of recent history sent with each request.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

pub const GREETING: &str = "Hey gamer 👋🎮\n\n\
I’m **GameFinder AI**, your personal game discovery companion.\n\n\
You can ask me:\n\
• Game recommendations based on your vibe\n\
• Comparisons between games\n\
• Whether a game is worth playing\n\
• Or any gaming-related question\n\n\
Tell me what you’re in the mood for, and let’s find your next obsession 🔥";

/// Shown when the API answers without an `answer`.
pub const FALLBACK_ANSWER: &str = "Hmm… I couldn’t generate a response for that.";
/// Shown when the request fails.
pub const CONNECTION_ERROR: &str = "⚠️ Neural link failed. Please check the backend connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Ai,
}

impl Role {
    fn upstream(self) -> HistoryRole {
        match self {
            Role::User => HistoryRole::User,
            Role::Ai => HistoryRole::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn greeting() -> Self {
        Self {
            id: SYSTEM_MESSAGE_ID.to_string(),
            role: Role::Ai,
            content: GREETING.to_string(),
        }
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
        }
    }

    fn connection_error() -> Self {
        Self {
            id: format!("{ERROR_MESSAGE_ID_PREFIX}-{}", uuid::Uuid::new_v4()),
            role: Role::Ai,
            content: CONNECTION_ERROR.to_string(),
        }
    }

    pub fn is_greeting(&self) -> bool {
        self.id == SYSTEM_MESSAGE_ID
    }

    pub fn is_error(&self) -> bool {
        self.id.starts_with(ERROR_MESSAGE_ID_PREFIX)
    }
}

pub struct ChatPage {
    pub messages: Vec<ChatMessage>,
    pub is_loading: bool,
    history_window: usize,
}

impl Default for ChatPage {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW)
    }
}

impl ChatPage {
    pub fn new(history_window: usize) -> Self {
        Self {
            messages: vec![ChatMessage::greeting()],
            is_loading: false,
            history_window,
        }
    }

    /// Appends the user's message and returns the request to send.
    ///
    /// Blank input and sends while a reply is pending are no-ops.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        let content = text.trim();
        if content.is_empty() || self.is_loading {
            debug!(
                "Chat send ignored (blank={}, loading={})",
                content.is_empty(),
                self.is_loading
            );
            return None;
        }

        self.messages.push(ChatMessage::new(Role::User, content));
        self.is_loading = true;

        Some(ChatRequest {
            message: content.to_string(),
            history: self.history(),
        })
    }

    /// The most recent messages, greeting excluded, in upstream role terms.
    pub fn history(&self) -> Vec<HistoryEntry> {
        let relevant: Vec<&ChatMessage> =
            self.messages.iter().filter(|m| !m.is_greeting()).collect();
        let start = relevant.len().saturating_sub(self.history_window);
        relevant[start..]
            .iter()
            .map(|m| HistoryEntry {
                role: m.role.upstream(),
                content: m.content.clone(),
            })
            .collect()
    }

    /// Appends the assistant's reply (or a failure message) and clears loading.
    pub fn finish_send(&mut self, result: Result<ChatResponse, ApiError>) {
        self.is_loading = false;
        let message = match result {
            Ok(response) => {
                let answer = response
                    .answer
                    .filter(|a| !a.trim().is_empty())
                    .unwrap_or_else(|| FALLBACK_ANSWER.to_string());
                ChatMessage::new(Role::Ai, answer)
            }
            Err(e) => {
                warn!("Chat request failed: {}", e);
                ChatMessage::connection_error()
            }
        };
        self.messages.push(message);
    }
}
