//! # ChatBubble Component
//!
//! A single transcript entry. Assistant messages are rendered as markdown;
//! user messages as plain text. Heights are measured with the same
//! `Paragraph` that renders, so the scroll canvas and the drawing agree.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::chat::{ChatMessage, Role};
use crate::tui::markdown;

/// Borders plus one column of padding per side.
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top and bottom borders.
const VERTICAL_OVERHEAD: u16 = 2;

pub struct ChatBubble<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> ChatBubble<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    fn body(message: &ChatMessage) -> Paragraph<'static> {
        let text = match message.role {
            Role::Ai if message.is_error() => Text::styled(
                message.content.clone(),
                Style::default().fg(Color::Red),
            ),
            Role::Ai => markdown::render(message.content.trim(), Color::Gray),
            Role::User => Text::styled(message.content.clone(), Style::default().fg(Color::White)),
        };
        Paragraph::new(text).wrap(Wrap { trim: false })
    }

    /// Rows this message occupies at `width` columns, borders included.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        let inner = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if inner == 0 {
            return 1;
        }
        let lines = Self::body(message).line_count(inner) as u16;
        lines.max(1) + VERTICAL_OVERHEAD
    }
}

impl Widget for ChatBubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (label, border) = match self.message.role {
            Role::User => (" you ", Style::default().fg(Color::White)),
            Role::Ai => (
                " GameFinder AI ",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::DIM),
            ),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(label)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);
        Self::body(self.message).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat::ChatPage;

    fn user(content: &str) -> ChatMessage {
        let mut page = ChatPage::default();
        page.begin_send(content);
        page.messages.pop().unwrap()
    }

    #[test]
    fn test_single_line_height() {
        assert_eq!(ChatBubble::calculate_height(&user("hi"), 40), 3);
    }

    #[test]
    fn test_wrapped_height() {
        // 10 chars at 5 columns of text → "abcde" / "fghij"
        assert_eq!(ChatBubble::calculate_height(&user("abcdefghij"), 9), 4);
    }

    #[test]
    fn test_degenerate_width() {
        assert_eq!(ChatBubble::calculate_height(&user("hi"), 3), 1);
    }

    #[test]
    fn test_greeting_is_markdown_and_multiline() {
        let greeting = ChatMessage::greeting();
        assert!(ChatBubble::calculate_height(&greeting, 80) > 8);
    }
}
