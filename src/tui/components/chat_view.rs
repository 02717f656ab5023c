//! # ChatView Component
//!
//! The chat page: header, scrollable transcript and the composer. The
//! composer clears itself on submit; whether the text is actually sent is
//! up to the chat state machine.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::chat::ChatPage;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::chat_log::{ChatLog, ChatLogState};
use crate::tui::components::input_box::{INPUT_HEIGHT, InputBox, InputEvent};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Send(String),
}

pub struct ChatViewState {
    pub input: InputBox,
    pub log: ChatLogState,
}

impl Default for ChatViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatViewState {
    pub fn new() -> Self {
        let mut input = InputBox::new(" Message ", "Describe your gaming vibe…");
        input.clear_on_submit = true;
        Self {
            input,
            log: ChatLogState::new(),
        }
    }
}

impl EventHandler for ChatViewState {
    type Event = ChatEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown
            | TuiEvent::CursorUp
            | TuiEvent::CursorDown => {
                self.log.handle_event(event);
                None
            }
            _ => match self.input.handle_event(event)? {
                InputEvent::Submit(text) => {
                    // A sent message always brings the view back to the latest reply
                    self.log.stick_to_bottom = true;
                    Some(ChatEvent::Send(text))
                }
                InputEvent::Changed => None,
            },
        }
    }
}

pub struct ChatView<'a> {
    state: &'a mut ChatViewState,
    page: &'a ChatPage,
    spinner_frame: usize,
}

impl<'a> ChatView<'a> {
    pub fn new(state: &'a mut ChatViewState, page: &'a ChatPage, spinner_frame: usize) -> Self {
        Self {
            state,
            page,
            spinner_frame,
        }
    }
}

impl Component for ChatView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, log_area, input_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .areas(area);

        let header = vec![
            Line::from(Span::styled(
                "GameFinder AI",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Your personalized Steam game expert",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(header), header_area);

        ChatLog::new(
            &mut self.state.log,
            &self.page.messages,
            self.page.is_loading,
            self.spinner_frame,
        )
        .render(frame, log_area);

        self.state.input.focused = true;
        self.state.input.render(frame, input_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_submit_clears_composer_and_emits_send() {
        let mut state = ChatViewState::new();
        for c in "co-op?".chars() {
            state.handle_event(&TuiEvent::InputChar(c));
        }
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(ChatEvent::Send("co-op?".into()))
        );
        assert_eq!(state.input.text(), "");
    }

    #[test]
    fn test_arrow_keys_scroll_log() {
        let mut state = ChatViewState::new();
        assert_eq!(state.handle_event(&TuiEvent::CursorUp), None);
        assert!(!state.log.stick_to_bottom);
    }

    #[test]
    fn test_renders_header_and_placeholder() {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = ChatViewState::new();
        let page = ChatPage::default();
        terminal
            .draw(|f| ChatView::new(&mut state, &page, 0).render(f, f.area()))
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Your personalized Steam game expert"));
        assert!(text.contains("Describe your gaming vibe"));
        assert!(text.contains("personal game discovery companion"));
    }
}
