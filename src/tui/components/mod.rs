//! # TUI Components
//!
//! UI building blocks for the three pages and the shell around them.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display-only widgets that receive all data as parameters:
//! - `NavBar`: brand, page tabs and status line
//! - `Hero`: rotating featured-game banner
//! - `GameCard`: one recommendation result
//! - `ChatBubble`: one chat message (markdown for AI answers)
//! - `NoticeOverlay`: validation/error toast
//!
//! ### Stateful Components (Event-Driven)
//!
//! A persistent `...State` struct owned by `TuiState` implements
//! `EventHandler`, and a short-lived wrapper borrowing that state plus the core
//! page implements `Component` for one frame:
//! - `SearchViewState` / `SearchView`
//! - `ChatViewState` / `ChatView` (with `ChatLogState` / `ChatLog`)
//! - `DetailViewState` / `DetailView`
//! - `InputBox` (single-line text field, used by search and chat)
//!
//! Components never mutate core state. They emit page events which the event
//! loop turns into `core::action::Action`s.

pub mod chat_bubble;
pub mod chat_log;
pub mod chat_view;
pub mod detail_view;
pub mod game_card;
pub mod hero;
pub mod input_box;
pub mod nav_bar;
pub mod notice;
pub mod search_view;

pub use chat_view::{ChatEvent, ChatView, ChatViewState};
pub use detail_view::{DetailEvent, DetailView, DetailViewState};
pub use nav_bar::NavBar;
pub use notice::NoticeOverlay;
pub use search_view::{SearchEvent, SearchView, SearchViewState};

/// Flattens a test buffer into one string, row after row.
#[cfg(test)]
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                text.push_str(cell.symbol());
            }
        }
        text.push('\n');
    }
    text
}
