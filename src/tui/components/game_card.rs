//! # GameCard Component
//!
//! One search result: title, genre and year, top tags, rating, metacritic,
//! price and the image currently shown for the card (its header image, or a
//! cycling screenshot while hovered).

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::api::Game;

/// Fixed card height: four content rows plus borders.
pub const CARD_HEIGHT: u16 = 6;
/// Narrowest a card gets before the grid drops a column.
pub const MIN_CARD_WIDTH: u16 = 30;

#[derive(Clone, Copy)]
pub struct GameCard<'a> {
    pub game: &'a Game,
    pub image: &'a str,
    pub is_selected: bool,
}

impl<'a> GameCard<'a> {
    pub fn new(game: &'a Game, image: &'a str, is_selected: bool) -> Self {
        Self {
            game,
            image,
            is_selected,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let game = self.game;
        let dim = Style::default().fg(Color::DarkGray);

        let year = game
            .release_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "TBA".to_string());
        let subtitle = Line::from(vec![
            Span::styled(game.primary_genre().to_string(), Style::default().fg(Color::Magenta)),
            Span::styled(format!(" · {year}"), dim),
        ]);

        let tags = Line::from(
            game.tags
                .iter()
                .take(3)
                .map(|t| Span::styled(format!("#{t} "), Style::default().fg(Color::Cyan)))
                .collect::<Vec<_>>(),
        );

        let mut stats = vec![
            Span::styled(
                format!("▲ {}%", game.rating_percent()),
                Style::default().fg(Color::Green),
            ),
            Span::raw("  "),
        ];
        if game.metacritic > 0 {
            let color = if game.has_good_metacritic() {
                Color::Green
            } else {
                Color::Yellow
            };
            stats.push(Span::styled(
                format!("MC {}", game.metacritic),
                Style::default().fg(color),
            ));
            stats.push(Span::raw("  "));
        }
        stats.push(Span::styled(
            game.price.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));

        let image = Line::from(Span::styled(format!("▣ {}", self.image), dim));

        vec![subtitle, tags, Line::from(stats), image]
    }
}

impl Widget for GameCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.is_selected {
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title_style = if self.is_selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(self.game.title.clone(), title_style))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);
        // No wrap: long lines are clipped so every card keeps the same height
        Paragraph::new(self.lines()).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Price;
    use crate::tui::components::buffer_text;
    use crate::test_support::sample_game;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(game: &Game, image: &str) -> String {
        let backend = TestBackend::new(60, CARD_HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(GameCard::new(game, image, true), f.area()))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_card_shows_summary() {
        let mut game = sample_game("413150");
        game.title = "Stardew Valley".into();
        game.tags = vec!["Farming".into(), "Cozy".into(), "Pixel".into(), "Hidden".into()];
        let text = draw(&game, &game.header_image());

        assert!(text.contains("Stardew Valley"));
        assert!(text.contains("RPG · 2020"));
        assert!(text.contains("#Farming #Cozy #Pixel"));
        assert!(!text.contains("#Hidden"));
        assert!(text.contains("87%"));
        assert!(text.contains("MC 82"));
        assert!(text.contains("$9.99"));
        assert!(text.contains("steamstatic"));
    }

    #[test]
    fn test_free_game_without_metacritic() {
        let mut game = sample_game("1");
        game.price = Price::Amount(0.0);
        game.metacritic = 0;
        let text = draw(&game, "x.jpg");
        assert!(text.contains("Free"));
        assert!(!text.contains("MC"));
    }
}
