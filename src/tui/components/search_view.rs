//! # SearchView Component
//!
//! The discover page: hero banner, search box, trending tags and the results
//! grid with its "show more" button.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SearchViewState` lives in `TuiState` (focus, selection, hover preview,
//!   hit-test rectangles from the last frame)
//! - `SearchView` is created each frame with borrowed state and the core
//!   `SearchPage` as props

use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::preview::{CardPreview, FeaturedCarousel};
use crate::core::search::{SearchPage, TRENDING_TAGS};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::game_card::{CARD_HEIGHT, GameCard, MIN_CARD_WIDTH};
use crate::tui::components::hero::{HERO_HEIGHT, Hero};
use crate::tui::components::input_box::{INPUT_HEIGHT, InputBox, InputEvent};
use crate::tui::event::TuiEvent;

const MAX_COLUMNS: usize = 4;
const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    Input,
    Tags,
    Results,
}

/// Events the search page raises for the event loop to turn into actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    QueryChanged(String),
    Submit,
    UseTag(usize),
    Open(usize),
    ShowMore,
}

pub struct SearchViewState {
    pub input: InputBox,
    pub focus: SearchFocus,
    pub selected_tag: usize,
    pub selected_card: usize,
    pub preview: CardPreview,
    pub featured: FeaturedCarousel,
    /// First grid row on screen.
    first_row: usize,
    /// Card under the mouse pointer.
    mouse_card: Option<usize>,
    // Synced from the SearchPage each loop iteration
    visible_len: usize,
    has_more: bool,
    // Layout from the last frame, for mouse hit testing
    input_rect: Rect,
    tag_rects: Vec<Rect>,
    card_rects: Vec<(usize, Rect)>,
    show_more_rect: Option<Rect>,
    columns: usize,
}

impl Default for SearchViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchViewState {
    pub fn new() -> Self {
        Self {
            input: InputBox::new(
                " Search ",
                "Describe your vibe (e.g. 'Cyberpunk RPG with great story')...",
            ),
            focus: SearchFocus::Input,
            selected_tag: 0,
            selected_card: 0,
            preview: CardPreview::default(),
            featured: FeaturedCarousel::default(),
            first_row: 0,
            mouse_card: None,
            visible_len: 0,
            has_more: false,
            input_rect: Rect::default(),
            tag_rects: Vec::new(),
            card_rects: Vec::new(),
            show_more_rect: None,
            columns: 1,
        }
    }

    /// Pulls the props event handling depends on from the page state.
    pub fn sync(&mut self, page: &SearchPage) {
        self.visible_len = page.visible_games().len();
        self.has_more = page.has_more();
        if self.visible_len == 0 {
            self.selected_card = 0;
            self.mouse_card = None;
            if self.focus == SearchFocus::Results {
                self.focus = SearchFocus::Input;
            }
        } else {
            self.selected_card = self.selected_card.min(self.visible_len - 1);
        }
        self.input.focused = self.focus == SearchFocus::Input;

        let hovered = self.mouse_card.or(match self.focus {
            SearchFocus::Results => Some(self.selected_card),
            _ => None,
        });
        self.preview.hover(hovered);
    }

    /// Advances the hero carousel and the hovered card's slideshow.
    /// Returns true if anything on screen changed.
    pub fn tick(&mut self, dt: Duration, page: &SearchPage) -> bool {
        let hovered_game = self.preview.hovered().and_then(|i| page.visible_game(i));
        let card_moved = self.preview.tick(dt, hovered_game);
        let hero_moved = self.featured.tick(dt);
        card_moved || hero_moved
    }

    /// Resets selection after a new result set arrives.
    pub fn reset_results(&mut self) {
        self.selected_card = 0;
        self.first_row = 0;
        self.mouse_card = None;
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order: &[SearchFocus] = if self.visible_len > 0 {
            &[SearchFocus::Input, SearchFocus::Tags, SearchFocus::Results]
        } else {
            &[SearchFocus::Input, SearchFocus::Tags]
        };
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % order.len()
        } else {
            (pos + order.len() - 1) % order.len()
        };
        self.focus = order[next];
        self.input.focused = self.focus == SearchFocus::Input;
    }

    fn focus_input(&mut self) {
        self.focus = SearchFocus::Input;
        self.input.focused = true;
    }

    fn card_at(&self, x: u16, y: u16) -> Option<usize> {
        self.card_rects
            .iter()
            .find(|(_, rect)| rect.contains(Position::new(x, y)))
            .map(|(i, _)| *i)
    }

    fn input_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match self.input.handle_event(event)? {
            InputEvent::Changed => Some(SearchEvent::QueryChanged(self.input.text().to_string())),
            InputEvent::Submit(_) => Some(SearchEvent::Submit),
        }
    }

    fn move_card(&mut self, delta: isize) {
        if self.visible_len == 0 {
            return;
        }
        let target = self.selected_card as isize + delta;
        if target < 0 {
            self.focus = SearchFocus::Tags;
        } else {
            self.selected_card = (target as usize).min(self.visible_len - 1);
        }
    }
}

impl EventHandler for SearchViewState {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::FocusNext => {
                self.cycle_focus(true);
                return None;
            }
            TuiEvent::FocusPrev => {
                self.cycle_focus(false);
                return None;
            }
            TuiEvent::MouseMove(x, y) => {
                self.mouse_card = self.card_at(*x, *y);
                return None;
            }
            TuiEvent::MouseClick(x, y) => {
                let pos = Position::new(*x, *y);
                if let Some(i) = self.card_at(*x, *y) {
                    self.selected_card = i;
                    return Some(SearchEvent::Open(i));
                }
                if let Some(i) = self.tag_rects.iter().position(|r| r.contains(pos)) {
                    self.selected_tag = i;
                    self.focus_input();
                    return Some(SearchEvent::UseTag(i));
                }
                if self.show_more_rect.is_some_and(|r| r.contains(pos)) {
                    return Some(SearchEvent::ShowMore);
                }
                if self.input_rect.contains(pos) {
                    self.focus_input();
                }
                return None;
            }
            TuiEvent::ScrollUp => {
                self.first_row = self.first_row.saturating_sub(1);
                return None;
            }
            TuiEvent::ScrollDown => {
                self.first_row += 1;
                return None;
            }
            _ => {}
        }

        match self.focus {
            SearchFocus::Input => match event {
                TuiEvent::CursorDown => {
                    self.focus = SearchFocus::Tags;
                    self.input.focused = false;
                    None
                }
                _ => self.input_event(event),
            },
            SearchFocus::Tags => match event {
                TuiEvent::CursorLeft => {
                    self.selected_tag = self.selected_tag.saturating_sub(1);
                    None
                }
                TuiEvent::CursorRight => {
                    self.selected_tag = (self.selected_tag + 1).min(TRENDING_TAGS.len() - 1);
                    None
                }
                TuiEvent::CursorUp => {
                    self.focus_input();
                    None
                }
                TuiEvent::CursorDown if self.visible_len > 0 => {
                    self.focus = SearchFocus::Results;
                    None
                }
                TuiEvent::Submit => {
                    self.focus_input();
                    Some(SearchEvent::UseTag(self.selected_tag))
                }
                // Typing jumps back into the search box
                TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                    self.focus_input();
                    self.input_event(event)
                }
                _ => None,
            },
            SearchFocus::Results => {
                let columns = self.columns.max(1) as isize;
                match event {
                    TuiEvent::CursorLeft => {
                        self.move_card(-1);
                        None
                    }
                    TuiEvent::CursorRight => {
                        self.move_card(1);
                        None
                    }
                    TuiEvent::CursorUp => {
                        self.move_card(-columns);
                        None
                    }
                    TuiEvent::CursorDown => {
                        self.move_card(columns);
                        None
                    }
                    TuiEvent::Submit => Some(SearchEvent::Open(self.selected_card)),
                    TuiEvent::InputChar('m') if self.has_more => Some(SearchEvent::ShowMore),
                    TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                        self.focus_input();
                        self.input_event(event)
                    }
                    _ => None,
                }
            }
        }
    }
}

/// Transient render wrapper for the discover page.
pub struct SearchView<'a> {
    state: &'a mut SearchViewState,
    page: &'a SearchPage,
    spinner_frame: usize,
}

impl<'a> SearchView<'a> {
    pub fn new(state: &'a mut SearchViewState, page: &'a SearchPage, spinner_frame: usize) -> Self {
        Self {
            state,
            page,
            spinner_frame,
        }
    }

    fn render_tags(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled("Trending: ", Style::default().fg(Color::DarkGray))];
        self.state.tag_rects.clear();
        let mut x = area.x + 10;
        for (i, tag) in TRENDING_TAGS.iter().enumerate() {
            let label = format!("[{tag}]");
            let width = label.chars().count() as u16;
            let selected = self.state.focus == SearchFocus::Tags && self.state.selected_tag == i;
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            if x + width <= area.x + area.width {
                self.state.tag_rects.push(Rect::new(x, area.y, width, 1));
            }
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
            x += width + 1;
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_message(frame: &mut Frame, area: Rect, title: &str, hint: &str) {
        let [_, body] = Layout::vertical([Constraint::Length(area.height / 3), Constraint::Min(0)])
            .areas(area);
        let lines = vec![
            Line::from(Span::styled(
                title.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(hint.to_string(), Style::default().fg(Color::DarkGray))),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        self.state.card_rects.clear();
        self.state.show_more_rect = None;

        if !self.page.has_searched {
            Self::render_message(
                frame,
                area,
                "Ready to play?",
                "Type a genre, mood, or game title above to get started.",
            );
            return;
        }
        if self.page.is_loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            Self::render_message(
                frame,
                area,
                &format!("{spinner} Curating your picks..."),
                "Matching your vibe against the catalogue.",
            );
            return;
        }
        let games = self.page.visible_games();
        if games.is_empty() {
            Self::render_message(
                frame,
                area,
                "No signals found.",
                "Try broader terms like “Action RPG” or “Sci-Fi Shooter”.",
            );
            return;
        }

        let footer = if self.page.has_more() { 1 } else { 0 };
        let [header_area, grid_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(footer),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    "Curated For You",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} of {}", games.len(), self.page.games.len()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])),
            header_area,
        );

        let columns = ((grid_area.width / MIN_CARD_WIDTH) as usize).clamp(1, MAX_COLUMNS);
        self.state.columns = columns;
        let total_rows = games.len().div_ceil(columns);
        let rows_fit = ((grid_area.height / CARD_HEIGHT) as usize).max(1);

        // Keep the selected card on screen when navigating by keyboard
        let max_first = total_rows.saturating_sub(rows_fit);
        let mut first_row = self.state.first_row.min(max_first);
        if self.state.focus == SearchFocus::Results {
            let selected_row = self.state.selected_card / columns;
            if selected_row < first_row {
                first_row = selected_row;
            } else if selected_row >= first_row + rows_fit {
                first_row = selected_row + 1 - rows_fit;
            }
        }
        self.state.first_row = first_row;

        let card_width = grid_area.width / columns as u16;
        for (row_on_screen, row) in (first_row..total_rows).take(rows_fit).enumerate() {
            let y = grid_area.y + row_on_screen as u16 * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(grid_area.y + grid_area.height - y);
            for col in 0..columns {
                let index = row * columns + col;
                let Some(game) = games.get(index) else {
                    break;
                };
                let rect = Rect::new(grid_area.x + col as u16 * card_width, y, card_width, height);
                let image = self.state.preview.display_image(index, game);
                let selected = self.state.preview.hovered() == Some(index)
                    || (self.state.focus == SearchFocus::Results
                        && self.state.selected_card == index);
                frame.render_widget(GameCard::new(game, &image, selected), rect);
                self.state.card_rects.push((index, rect));
            }
        }

        if footer > 0 {
            let hidden = self.page.games.len() - games.len();
            let label = format!("[ Show more ({hidden} more) · m ]");
            let width = (label.chars().count() as u16).min(footer_area.width);
            let x = footer_area.x + (footer_area.width - width) / 2;
            let rect = Rect::new(x, footer_area.y, width, 1);
            frame.render_widget(
                Paragraph::new(label).style(Style::default().fg(Color::Magenta)),
                rect,
            );
            self.state.show_more_rect = Some(rect);
        }
    }
}

impl Component for SearchView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hero_height = if area.height >= HERO_HEIGHT + 2 * CARD_HEIGHT + INPUT_HEIGHT {
            HERO_HEIGHT
        } else {
            0
        };
        let [hero_area, input_area, tags_area, _, results_area] = Layout::vertical([
            Constraint::Length(hero_height),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        if hero_height > 0 {
            Hero::new(self.state.featured.current()).render(frame, hero_area);
        }

        let title = if self.page.is_loading {
            " Search · searching... "
        } else {
            " Search "
        };
        self.state.input.title = title.to_string();
        self.state.input.render(frame, input_area);
        self.state.input_rect = input_area;

        self.render_tags(frame, tags_area);
        self.render_results(frame, results_area);
    }
}
