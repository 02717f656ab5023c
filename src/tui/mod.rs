//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the pages,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Loading**: draws every ~80ms so the spinner turns.
//! - **Search page**: wakes every ~250ms to advance the hero carousel and the
//!   hovered card's screenshot slideshow, redrawing only when either moved.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! Requests run as tokio tasks. Each one posts its completion action back
//! through an mpsc channel that the loop drains before the next frame.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::api::{GameFinderApi, HttpApi};
use crate::core::action::{Action, Effect, perform, update};
use crate::core::config::ResolvedConfig;
use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ChatEvent, ChatViewState, DetailEvent, DetailViewState, NavBar, SearchEvent, SearchViewState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// How long a notice stays up without a key press.
const NOTICE_TIMEOUT: Duration = Duration::from_secs(4);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub search: SearchViewState,
    pub chat: ChatViewState,
    pub detail: DetailViewState,
    // Layout from the last frame, for tab clicks
    pub nav_area: Rect,
    /// When the current notice first appeared.
    pub notice_since: Option<Instant>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        let mut chat = ChatViewState::new();
        chat.input.focused = true;
        Self {
            search: SearchViewState::new(),
            chat,
            detail: DetailViewState::new(),
            nav_area: Rect::default(),
            notice_since: None,
        }
    }

    /// Pulls per-frame props from the core state into the component states.
    fn sync(&mut self, app: &App) {
        self.search.sync(&app.search);
        if self.search.input.text() != app.search.query {
            self.search.input.set_text(&app.search.query);
        }
    }

    /// Tracks how long the notice has been visible. Returns true once it has
    /// outlived `NOTICE_TIMEOUT`.
    fn notice_expired(&mut self, has_notice: bool, now: Instant) -> bool {
        match (has_notice, self.notice_since) {
            (false, _) => {
                self.notice_since = None;
                false
            }
            (true, None) => {
                self.notice_since = Some(now);
                false
            }
            (true, Some(since)) => now.duration_since(since) >= NOTICE_TIMEOUT,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is ignored by terminals that lack it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Non-blinking: continuous redraws reset the blink timer
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig, start: Route) -> std::io::Result<()> {
    let api = HttpApi::new(&config.api_base, config.request_timeout)
        .map_err(std::io::Error::other)?;
    info!("Using API at {}", api.base_url());
    let mut app = App::from_config(Arc::new(api), &config);
    let mut tui = TuiState::new();
    update(&mut app, Action::Navigate(start));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for completion actions from request tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut last_tick = start_time;
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.sync(&app);

        let now = Instant::now();
        let dt = now.duration_since(last_tick);
        last_tick = now;
        if app.route == Route::Search && tui.search.tick(dt, &app.search) {
            needs_redraw = true;
        }
        if tui.notice_expired(app.search.notice.is_some(), now) {
            debug!("Notice timed out");
            update(&mut app, Action::DismissNotice);
            needs_redraw = true;
        }

        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else if app.route == Route::Search {
            Duration::from_millis(250)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if app.search.notice.is_some() && is_key_event(&event) {
                update(&mut app, Action::DismissNotice);
            }
            // Keep props fresh between events drained in the same batch
            tui.sync(&app);

            let Some(action) = action_for_event(&app, &mut tui, &event) else {
                continue;
            };
            if apply(&mut app, &mut tui, action, &tx) {
                break 'main;
            }
        }

        // Handle completions from request tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(&mut app, &mut tui, action, &tx) {
                break 'main;
            }
        }
    }

    info!("GameFinder shutting down");
    ratatui::restore();
    Ok(())
}

/// Runs one action through the reducer and starts any request it asks for.
/// Returns true when the app should quit.
fn apply(app: &mut App, tui: &mut TuiState, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    let new_results = matches!(action, Action::SearchCompleted(Ok(_)));
    let effect = update(app, action);
    if new_results {
        tui.search.reset_results();
    }
    match effect {
        Effect::Quit => true,
        Effect::None => false,
        effect => {
            spawn_effect(app.api.clone(), effect, tx.clone());
            false
        }
    }
}

fn spawn_effect(api: Arc<dyn GameFinderApi>, effect: Effect, tx: mpsc::Sender<Action>) {
    tokio::spawn(async move {
        if let Some(action) = perform(api.as_ref(), effect).await
            && let Err(e) = tx.send(action)
        {
            warn!("Dropped completion, event loop has exited: {:?}", e.0);
        }
    });
}

fn is_key_event(event: &TuiEvent) -> bool {
    !matches!(
        event,
        TuiEvent::MouseMove(..)
            | TuiEvent::MouseClick(..)
            | TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::Resize
    )
}

/// Translates a terminal event into an action for the current page.
fn action_for_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::GoSearch => return Some(Action::Navigate(Route::Search)),
        TuiEvent::GoChat => return Some(Action::Navigate(Route::Chat)),
        TuiEvent::MouseClick(x, y) => {
            if let Some(route) = NavBar::tab_at(tui.nav_area, *x, *y) {
                return Some(Action::Navigate(route));
            }
        }
        _ => {}
    }

    match &app.route {
        Route::Search => match tui.search.handle_event(event)? {
            SearchEvent::QueryChanged(query) => Some(Action::SetQuery(query)),
            SearchEvent::Submit => Some(Action::SubmitSearch),
            SearchEvent::UseTag(i) => Some(Action::UseTag(i)),
            SearchEvent::Open(i) => Some(Action::OpenGame(i)),
            SearchEvent::ShowMore => Some(Action::ShowMore),
        },
        Route::Chat => {
            // Leave the draft in place until the in-flight answer arrives
            if app.chat.is_loading && matches!(event, TuiEvent::Submit) {
                return None;
            }
            match tui.chat.handle_event(event)? {
                ChatEvent::Send(text) => Some(Action::SendChat(text)),
            }
        }
        Route::Game(_) => match tui.detail.handle_event(event)? {
            DetailEvent::Back => Some(Action::Navigate(Route::Search)),
            DetailEvent::Next => Some(Action::NextMedia),
            DetailEvent::Prev => Some(Action::PrevMedia),
            DetailEvent::Select(i) => Some(Action::SelectMedia(i)),
        },
    }
}
