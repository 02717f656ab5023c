//! Page routes: `/`, `/chat` and `/game/{id}`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Search,
    Chat,
    /// The id is informational; the detail page reads the selected-game slot.
    Game(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Search => "/".to_string(),
            Route::Chat => "/chat".to_string(),
            Route::Game(id) => format!("/game/{id}"),
        }
    }

    /// Parses a path. Unknown paths are `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let path = trimmed.trim_end_matches('/');
        match path {
            "" => Some(Route::Search),
            "/chat" => Some(Route::Chat),
            _ => {
                let id = path.strip_prefix("/game/")?;
                if id.is_empty() || id.contains('/') {
                    None
                } else {
                    Some(Route::Game(id.to_string()))
                }
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
