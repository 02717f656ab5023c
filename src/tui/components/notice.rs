//! Toast overlay for the search page's pending notice.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::core::search::Notice;
use crate::tui::component::Component;

const NOTICE_WIDTH: u16 = 56;
/// Borders, padding and the title line around the wrapped description.
const HORIZONTAL_OVERHEAD: u16 = 4;
const VERTICAL_OVERHEAD: u16 = 3;

pub struct NoticeOverlay<'a> {
    pub notice: &'a Notice,
}

impl<'a> NoticeOverlay<'a> {
    pub fn new(notice: &'a Notice) -> Self {
        Self { notice }
    }

    /// Rows needed to show the whole description at `width` columns.
    pub fn height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(HORIZONTAL_OVERHEAD).max(1) as usize;
        let options = textwrap::Options::new(inner)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let lines = textwrap::wrap(&self.notice.description, options).len().max(1);
        lines as u16 + VERTICAL_OVERHEAD
    }
}

impl Component for NoticeOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = NOTICE_WIDTH.min(area.width.saturating_sub(1));
        let overlay = bottom_right_rect(width, self.height(width), area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title_bottom(Line::from(" any key to dismiss ").right_aligned())
            .padding(Padding::horizontal(1));
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                self.notice.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.notice.description.clone(),
                Style::default().fg(Color::Gray),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(block);
        frame.render_widget(body, overlay);
    }
}

/// A `width` x `height` rect anchored to the bottom-right corner, clamped to `outer`.
fn bottom_right_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let [_, row] = Layout::vertical([Constraint::Min(0), Constraint::Length(height)]).areas(outer);
    let [_, rect, _] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Length(1),
    ])
    .areas(row);
    rect
}
