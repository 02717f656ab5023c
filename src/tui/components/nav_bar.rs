//! # NavBar Component
//!
//! Top bar: brand, page tabs, status message and the backend the client talks to.
//!
//! Stateless: every field is a prop. The tab rectangles are returned from
//! [`NavBar::tab_at`] so the event loop can hit-test clicks without keeping
//! layout state around.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::route::Route;
use crate::tui::component::Component;

const BRAND: &str = " GAMEFINDER ";
const TABS: [(&str, Route); 2] = [(" Discover ", Route::Search), (" AI Chat ", Route::Chat)];

pub struct NavBar<'a> {
    pub route: &'a Route,
    pub status_message: &'a str,
    pub api_base: &'a str,
}

impl<'a> NavBar<'a> {
    pub fn new(route: &'a Route, status_message: &'a str, api_base: &'a str) -> Self {
        Self {
            route,
            status_message,
            api_base,
        }
    }

    /// Which tab (if any) sits under column `x` of a nav bar drawn at `area`.
    pub fn tab_at(area: Rect, x: u16, y: u16) -> Option<Route> {
        if y != area.y {
            return None;
        }
        let mut start = area.x + BRAND.len() as u16 + 1;
        for (label, route) in TABS.iter() {
            let width = label.chars().count() as u16;
            if x >= start && x < start + width {
                return Some(route.clone());
            }
            start += width + 1;
        }
        None
    }

    fn is_active(&self, tab: &Route) -> bool {
        match self.route {
            // Detail pages hang off the discover tab
            Route::Game(_) => *tab == Route::Search,
            other => other == tab,
        }
    }
}

impl Component for NavBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                BRAND,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
        ];
        for (label, route) in TABS.iter() {
            let style = if self.is_active(route) {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(*label, style));
            spans.push(Span::raw(" "));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!("| {} ", self.status_message),
                Style::default().fg(Color::Yellow),
            ));
        }
        spans.push(Span::styled(
            format!("| {}", self.api_base),
            Style::default().fg(Color::DarkGray),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
