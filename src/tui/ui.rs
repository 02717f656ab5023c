use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ChatView, DetailView, NavBar, NoticeOverlay, SearchView};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [nav_area, main_area, help_area] = layout.areas(frame.area());

    tui.nav_area = nav_area;
    NavBar::new(&app.route, &app.status_message, app.api.base_url()).render(frame, nav_area);

    let [_, page_area, _] = Layout::horizontal([Length(1), Min(0), Length(1)]).areas(main_area);
    match (&app.route, app.detail.as_ref()) {
        (Route::Search, _) => {
            SearchView::new(&mut tui.search, &app.search, spinner_frame).render(frame, page_area)
        }
        (Route::Chat, _) => {
            ChatView::new(&mut tui.chat, &app.chat, spinner_frame).render(frame, page_area)
        }
        (Route::Game(_), Some(detail)) => {
            DetailView::new(&mut tui.detail, detail).render(frame, page_area)
        }
        // Navigation redirects before this can be reached
        (Route::Game(_), None) => draw_missing_game(frame, page_area),
    }

    frame.render_widget(
        Paragraph::new(help_text(&app.route)).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(notice) = &app.search.notice {
        NoticeOverlay::new(notice).render(frame, main_area);
    }
}

fn draw_missing_game(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("No game selected.")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn help_text(route: &Route) -> &'static str {
    match route {
        Route::Search => {
            " Enter search · Tab focus · ←→↑↓ move · m more · Ctrl+T chat · Ctrl+Q quit"
        }
        Route::Chat => " Enter send · ↑↓ scroll · Ctrl+S discover · Ctrl+Q quit",
        Route::Game(_) => " ←→ media · 1-9 jump · Esc back · Ctrl+T chat · Ctrl+Q quit",
    }
}
