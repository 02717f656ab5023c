//! # InputBox Component
//!
//! Single-line text field used by the search box and the chat composer.
//!
//! The buffer and cursor are internal state; `title`, `placeholder`,
//! `focused` and `clear_on_submit` are props set by the parent. Enter always
//! emits `Submit` with the raw text: validation (blank queries, blank chat
//! messages) belongs to the page state machines, not the widget.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders on each side.
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Rendered height: one text row plus borders.
pub const INPUT_HEIGHT: u16 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Submit(String),
    Changed,
}

pub struct InputBox {
    buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    cursor: usize,
    pub title: String,
    pub placeholder: String,
    pub focused: bool,
    pub clear_on_submit: bool,
}

impl InputBox {
    pub fn new(title: &str, placeholder: &str) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            title: title.to_string(),
            placeholder: placeholder.to_string(),
            focused: true,
            clear_on_submit: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replaces the content and moves the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.replace(['\n', '\r'], " ");
        self.cursor = self.buffer.len();
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// Horizontal scroll so the cursor stays inside `width` columns.
    /// Returns the byte offset of the first visible char.
    fn scroll_start(&self, width: usize) -> usize {
        if width == 0 {
            return self.cursor;
        }
        let mut start = 0;
        let mut before_cursor = self.buffer[..self.cursor].width();
        // Reserve one column for the cursor itself
        for (i, c) in self.buffer[..self.cursor].char_indices() {
            if before_cursor < width {
                break;
            }
            before_cursor -= c.width().unwrap_or(0);
            start = i + c.len_utf8();
        }
        start
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title.as_str());

        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD) as usize;
        let start = self.scroll_start(inner_width);

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder.as_str()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Paragraph::new(&self.buffer[start..]).style(Style::default().fg(Color::White))
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused && area.width > HORIZONTAL_OVERHEAD && area.height >= INPUT_HEIGHT {
            let offset = self.buffer[start..self.cursor].width() as u16;
            let max_x = area.x + area.width - 2;
            frame.set_cursor_position(((area.x + 1 + offset).min(max_x), area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                let text = text.replace(['\n', '\r'], " ");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(InputEvent::Changed)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::Changed)
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::Changed)
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => {
                let text = if self.clear_on_submit {
                    self.cursor = 0;
                    std::mem::take(&mut self.buffer)
                } else {
                    self.buffer.clone()
                };
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_str(input: &mut InputBox, s: &str) {
        for c in s.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_editing() {
        let mut input = InputBox::new("Search", "");
        type_str(&mut input, "cozy");
        assert_eq!(input.text(), "cozy");

        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.text(), "coy");

        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.text(), "oy");
        assert_eq!(input.handle_event(&TuiEvent::CursorHome), None);
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_multibyte_backspace() {
        let mut input = InputBox::new("Chat", "");
        type_str(&mut input, "hé🎮");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.text(), "hé");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.text(), "h");
    }

    #[test]
    fn test_submit_keeps_or_clears_buffer() {
        let mut search = InputBox::new("Search", "");
        search.set_text("rpg");
        assert_eq!(
            search.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("rpg".into()))
        );
        assert_eq!(search.text(), "rpg");

        let mut chat = InputBox::new("Chat", "");
        chat.clear_on_submit = true;
        chat.set_text("hello");
        assert_eq!(
            chat.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("hello".into()))
        );
        assert_eq!(chat.text(), "");
    }

    #[test]
    fn test_blank_submit_still_emits() {
        let mut input = InputBox::new("Search", "");
        input.set_text("   ");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("   ".into()))
        );
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new("Search", "");
        input.handle_event(&TuiEvent::Paste("open\nworld".into()));
        assert_eq!(input.text(), "open world");
    }

    #[test]
    fn test_render_placeholder_and_text() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::new("Search", "Describe your vibe");

        terminal.draw(|f| input.render(f, f.area())).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Search"));
        assert!(text.contains("Describe your vibe"));

        input.set_text("pixel farming");
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("pixel farming"));
        assert!(!text.contains("Describe your vibe"));
    }

    #[test]
    fn test_long_text_scrolls_to_cursor() {
        let backend = TestBackend::new(12, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::new("", "");
        input.set_text("abcdefghijklmnopqrstuvwxyz");

        terminal.draw(|f| input.render(f, f.area())).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("wxyz"));
        assert!(!text.contains("abc"));
    }
}
