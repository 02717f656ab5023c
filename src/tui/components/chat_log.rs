//! # ChatLog Component
//!
//! Scrollable transcript. `ChatLog` is a transient component (created each
//! frame) wrapping `&mut ChatLogState` (persistent) and the message slice
//! (props).
//!
//! The transcript is append-only, so measured heights stay valid until the
//! width changes; only new messages are measured each frame.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::chat::{ChatMessage, Role};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::chat_bubble::ChatBubble;
use crate::tui::event::TuiEvent;

/// Share of the log width a bubble takes.
const BUBBLE_WIDTH_PERCENT: u16 = 80;
const SPINNER: [&str; 4] = ["·  ", "·· ", "···", " ··"];

pub struct ChatLogState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    pub viewport_height: u16,
    heights: Vec<u16>,
    measured_width: u16,
}

impl Default for ChatLogState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatLogState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true,
            viewport_height: 0,
            heights: Vec::new(),
            measured_width: 0,
        }
    }

    /// Measures messages not yet in the cache.
    fn measure(&mut self, messages: &[ChatMessage], bubble_width: u16) {
        if bubble_width != self.measured_width || messages.len() < self.heights.len() {
            self.heights.clear();
            self.measured_width = bubble_width;
        }
        for message in &messages[self.heights.len()..] {
            self.heights.push(ChatBubble::calculate_height(message, bubble_width));
        }
    }

    fn content_height(&self) -> u16 {
        self.heights.iter().sum()
    }

    /// Re-engage auto-scroll once the user scrolls back to the end.
    fn repin_if_at_bottom(&mut self, total: u16) {
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

impl EventHandler for ChatLogState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let total = self.content_height() + 1;
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom(total);
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom(total);
            }
            _ => {}
        }
        None
    }
}

pub struct ChatLog<'a> {
    pub state: &'a mut ChatLogState,
    pub messages: &'a [ChatMessage],
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> ChatLog<'a> {
    pub fn new(
        state: &'a mut ChatLogState,
        messages: &'a [ChatMessage],
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            is_loading,
            spinner_frame,
        }
    }
}

impl Component for ChatLog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar column
        let bubble_width = (content_width * BUBBLE_WIDTH_PERCENT / 100).max(1);
        self.state.measure(self.messages, bubble_width);
        self.state.viewport_height = area.height;

        // One trailing row for the "thinking" line
        let canvas_height = self.state.content_height() + 1;
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = 0u16;
        for (message, &height) in self.messages.iter().zip(self.state.heights.iter()) {
            let x = match message.role {
                Role::User => content_width.saturating_sub(bubble_width),
                Role::Ai => 0,
            };
            scroll_view.render_widget(ChatBubble::new(message), Rect::new(x, y, bubble_width, height));
            y += height;
        }

        if self.is_loading {
            let dots = SPINNER[self.spinner_frame % SPINNER.len()];
            scroll_view.render_widget(
                Paragraph::new(Span::styled(
                    format!("GameFinder AI is thinking {dots}"),
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::ITALIC),
                )),
                Rect::new(0, y, content_width, 1),
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChatResponse;
    use crate::core::chat::ChatPage;
    use crate::tui::components::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut ChatLogState, page: &ChatPage, height: u16) -> String {
        let backend = TestBackend::new(60, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                ChatLog::new(state, &page.messages, page.is_loading, 0).render(f, f.area())
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_renders_greeting_and_thinking_line() {
        let mut page = ChatPage::default();
        page.begin_send("anything like Hades?");
        let mut state = ChatLogState::new();
        let text = draw(&mut state, &page, 40);
        assert!(text.contains("GameFinder AI"));
        assert!(text.contains("anything like Hades?"));
        assert!(text.contains("is thinking"));
    }

    #[test]
    fn test_heights_measured_incrementally() {
        let mut page = ChatPage::default();
        let mut state = ChatLogState::new();
        draw(&mut state, &page, 40);
        assert_eq!(state.heights.len(), 1);

        page.begin_send("hi");
        page.finish_send(Ok(ChatResponse {
            answer: Some("hello".into()),
            related_games: vec![],
        }));
        draw(&mut state, &page, 40);
        assert_eq!(state.heights.len(), 3);
        assert_eq!(state.heights[1], 3);
    }

    #[test]
    fn test_sticks_to_bottom_until_scrolled_up() {
        let mut page = ChatPage::default();
        for i in 0..6 {
            page.begin_send(&format!("question {i}"));
            page.finish_send(Ok(ChatResponse::default()));
        }
        let mut state = ChatLogState::new();
        let text = draw(&mut state, &page, 10);
        assert!(text.contains("question 5"));
        assert!(state.scroll_state.offset().y > 0);

        state.handle_event(&TuiEvent::ScrollPageUp);
        assert!(!state.stick_to_bottom);
    }
}
