//! # Hero Component
//!
//! Landing banner above the search box. The backdrop rotates through the
//! featured games; the terminal can't show the artwork, so the banner names it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::preview::FeaturedGame;
use crate::tui::component::Component;

pub const HERO_HEIGHT: u16 = 6;

pub struct Hero<'a> {
    pub featured: &'a FeaturedGame,
}

impl<'a> Hero<'a> {
    pub fn new(featured: &'a FeaturedGame) -> Self {
        Self { featured }
    }
}

impl Component for Hero<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "✦ AI-Powered Recommendations",
                Style::default().fg(Color::Magenta),
            )),
            Line::from(Span::styled(
                "DISCOVER YOUR NEXT OBSESSION",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Stop searching, start playing. Describe your vibe and let the AI find hidden gems you'll love.",
                Style::default().fg(Color::Gray),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Courtesy: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    self.featured.title,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
                ),
            ]),
            Line::from(Span::styled(
                self.featured.image,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )),
        ];

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}
