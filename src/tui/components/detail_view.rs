//! # DetailView Component
//!
//! The game page: media viewer with a thumbnail strip, description, genre
//! badges and tags on the left; price, scores, release date, review count and
//! store link on the right.
//!
//! Follows the persistent state + transient wrapper pattern. The state only
//! records hit-test rectangles; the media index itself lives in the core
//! `DetailPage`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::core::detail::{DetailPage, MediaKind};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const MAX_GENRE_BADGES: usize = 4;
const MEDIA_HEIGHT: u16 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEvent {
    Back,
    Next,
    Prev,
    Select(usize),
}

#[derive(Default)]
pub struct DetailViewState {
    back_rect: Rect,
    thumb_rects: Vec<(usize, Rect)>,
}

impl DetailViewState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for DetailViewState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape | TuiEvent::Backspace => Some(DetailEvent::Back),
            TuiEvent::CursorLeft | TuiEvent::InputChar('h') => Some(DetailEvent::Prev),
            TuiEvent::CursorRight | TuiEvent::InputChar('l') => Some(DetailEvent::Next),
            TuiEvent::InputChar(c @ '1'..='9') => c
                .to_digit(10)
                .map(|d| DetailEvent::Select(d as usize - 1)),
            TuiEvent::MouseClick(x, y) => {
                let pos = Position::new(*x, *y);
                if self.back_rect.contains(pos) {
                    return Some(DetailEvent::Back);
                }
                self.thumb_rects
                    .iter()
                    .find(|(_, rect)| rect.contains(pos))
                    .map(|(i, _)| DetailEvent::Select(*i))
            }
            _ => None,
        }
    }
}

pub struct DetailView<'a> {
    state: &'a mut DetailViewState,
    page: &'a DetailPage,
}

impl<'a> DetailView<'a> {
    pub fn new(state: &'a mut DetailViewState, page: &'a DetailPage) -> Self {
        Self { state, page }
    }

    fn render_media(&mut self, frame: &mut Frame, area: Rect) {
        let page = self.page;
        let media = page.media();
        let title = match page.active_media() {
            Some(item) if item.kind == MediaKind::Video => " ▶ Trailer ".to_string(),
            Some(_) => format!(" Screenshot {}/{} ", page.index() + 1, media.len()),
            None => " Header ".to_string(),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title(title)
            .title_bottom(Line::from(" ← prev · next → · 1-9 jump ").centered())
            .padding(Padding::horizontal(1));
        let viewer = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                page.active_url(),
                Style::default().fg(Color::Cyan),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(block);

        let [viewer_area, strip_area] =
            Layout::vertical([Constraint::Length(MEDIA_HEIGHT), Constraint::Length(1)]).areas(area);
        frame.render_widget(viewer, viewer_area);

        // Thumbnail strip: one numbered chip per item
        self.state.thumb_rects.clear();
        let mut spans = Vec::new();
        let mut x = strip_area.x;
        for (i, item) in media.iter().enumerate() {
            let icon = match item.kind {
                MediaKind::Video => "▶",
                MediaKind::Image => "▣",
            };
            let label = format!("[{} {icon}]", i + 1);
            let width = label.chars().count() as u16;
            let style = if i == page.index() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            if x + width <= strip_area.x + strip_area.width {
                self.state
                    .thumb_rects
                    .push((i, Rect::new(x, strip_area.y, width, 1)));
            }
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
            x += width + 1;
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), strip_area);
    }

    fn info_lines(&self) -> Vec<Line<'static>> {
        let game = &self.page.game;
        let label = Style::default().fg(Color::DarkGray);
        let metacritic_color = if game.metacritic == 0 {
            Color::DarkGray
        } else if game.has_good_metacritic() {
            Color::Green
        } else {
            Color::Yellow
        };
        let row = |name: &str, value: String, style: Style| {
            Line::from(vec![
                Span::styled(format!("{name:<12}"), label),
                Span::styled(value, style),
            ])
        };
        vec![
            row(
                "Price",
                game.price.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            row(
                "Metacritic",
                game.metacritic_label(),
                Style::default().fg(metacritic_color),
            ),
            row(
                "Rating",
                format!("{}% positive", game.rating_percent()),
                Style::default().fg(Color::Green),
            ),
            row(
                "Released",
                game.release_label().to_string(),
                Style::default().fg(Color::White),
            ),
            row(
                "Reviews",
                game.reviews.to_string(),
                Style::default().fg(Color::White),
            ),
            Line::default(),
            Line::from(Span::styled("View on Steam", label)),
            Line::from(Span::styled(
                game.store_url(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            )),
        ]
    }
}

impl Component for DetailView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let page = self.page;
        let game = &page.game;
        let [back_area, title_area, _, body_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let back = "← Back to search (Esc)";
        frame.render_widget(
            Paragraph::new(back).style(Style::default().fg(Color::DarkGray)),
            back_area,
        );
        self.state.back_rect = Rect::new(
            back_area.x,
            back_area.y,
            (back.chars().count() as u16).min(back_area.width),
            1,
        );

        let kicker = match game.release_year() {
            Some(year) => format!("{} · {year}", game.primary_genre()),
            None => game.primary_genre().to_string(),
        };
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    game.title.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(kicker, Style::default().fg(Color::Magenta))),
            ]),
            title_area,
        );

        let [main_area, side_area] =
            Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                .spacing(2)
                .areas(body_area);
        let [media_area, _, about_area] = Layout::vertical([
            Constraint::Length(MEDIA_HEIGHT + 1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(main_area);

        self.render_media(frame, media_area);

        let mut about = vec![Line::from(
            game.genres
                .iter()
                .take(MAX_GENRE_BADGES)
                .flat_map(|g| {
                    [
                        Span::styled(
                            format!(" {g} "),
                            Style::default().fg(Color::Black).bg(Color::Gray),
                        ),
                        Span::raw(" "),
                    ]
                })
                .collect::<Vec<_>>(),
        )];
        about.push(Line::default());
        about.push(Line::from(Span::styled(
            game.description.clone(),
            Style::default().fg(Color::Gray),
        )));
        about.push(Line::default());
        about.push(Line::from(Span::styled(
            game.tags
                .iter()
                .map(|t| format!("#{t}"))
                .collect::<Vec<_>>()
                .join(" "),
            Style::default().fg(Color::Cyan),
        )));
        frame.render_widget(
            Paragraph::new(about).wrap(Wrap { trim: true }),
            about_area,
        );

        let info = Paragraph::new(self.info_lines())
            .wrap(Wrap { trim: false })
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Info ")
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(info, side_area);
    }
}
