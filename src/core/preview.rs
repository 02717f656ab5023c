//! Timed image rotation: the landing hero's featured-game carousel and the
//! screenshot slideshow on a hovered result card.
//!
//! Both are driven by elapsed time passed in from the event loop, so they stay
//! deterministic under test.

use std::time::Duration;

use crate::api::Game;

/// Screenshot rotation period on a hovered card.
pub const HOVER_CYCLE_INTERVAL: Duration = Duration::from_millis(950);
/// Featured game rotation period on the landing hero.
pub const FEATURED_ROTATE_INTERVAL: Duration = Duration::from_secs(5);

/// A cyclic index that advances once per `interval` of accumulated time.
#[derive(Debug, Clone)]
pub struct Cycler {
    index: usize,
    interval: Duration,
    elapsed: Duration,
}

impl Cycler {
    pub fn new(interval: Duration) -> Self {
        Self {
            index: 0,
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.elapsed = Duration::ZERO;
    }

    /// Accumulates `dt` and advances over a sequence of length `len`.
    /// Returns true if the index moved.
    pub fn tick(&mut self, dt: Duration, len: usize) -> bool {
        if len == 0 || self.interval.is_zero() {
            return false;
        }
        self.elapsed += dt;
        let mut moved = false;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.index = (self.index + 1) % len;
            moved = true;
        }
        // Keep the index valid if the sequence shrank.
        self.index %= len;
        moved
    }
}

/// A hand-picked game shown on the landing hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedGame {
    pub title: &'static str,
    pub id: &'static str,
    pub image: &'static str,
}

pub const FEATURED_GAMES: [FeaturedGame; 6] = [
    FeaturedGame {
        title: "Cyberpunk 2077",
        id: "1091500",
        image: "https://cdn.akamai.steamstatic.com/steam/apps/1091500/ss_429db1d013a0366417d650d84f1eff02d1a18c2d.1920x1080.jpg",
    },
    FeaturedGame {
        title: "Sekiro: Shadows Die Twice - GOTY Edition",
        id: "814380",
        image: "https://cdn.akamai.steamstatic.com/steam/apps/814380/ss_15f0e9982621aed44900215ad283811af0779b1d.1920x1080.jpg",
    },
    FeaturedGame {
        title: "God of War",
        id: "1593500",
        image: "https://cdn.akamai.steamstatic.com/steam/apps/1593500/ss_1bd99270dcbd4ff9fe9c94b0d9c8ffc50ebb42c7.1920x1080.jpg",
    },
    FeaturedGame {
        title: "The Elder Scrolls V: Skyrim",
        id: "72850",
        image: "https://cdn.akamai.steamstatic.com/steam/apps/72850/ss_038abb71457edf636529dd7b5f898a7311dea359.1920x1080.jpg",
    },
    FeaturedGame {
        title: "The Witcher 3: Wild Hunt",
        id: "292030",
        image: "https://cdn.akamai.steamstatic.com/steam/apps/292030/ss_eda99e7f705a113d04ab2a7a36068f3e7b343d17.1920x1080.jpg",
    },
    FeaturedGame {
        title: "Assassin's Creed Odyssey",
        id: "812140",
        image: "https://cdn.akamai.steamstatic.com/steam/apps/812140/ss_0ef33c0f230da6ebac94f5959f0e0a8bbc48cf8a.1920x1080.jpg",
    },
];

pub struct FeaturedCarousel {
    cycler: Cycler,
}

impl Default for FeaturedCarousel {
    fn default() -> Self {
        Self {
            cycler: Cycler::new(FEATURED_ROTATE_INTERVAL),
        }
    }
}

impl FeaturedCarousel {
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.cycler.tick(dt, FEATURED_GAMES.len())
    }

    pub fn current(&self) -> &'static FeaturedGame {
        &FEATURED_GAMES[self.cycler.index() % FEATURED_GAMES.len()]
    }
}

/// Screenshot slideshow for whichever result card is under the pointer or cursor.
pub struct CardPreview {
    hovered: Option<usize>,
    cycler: Cycler,
}

impl Default for CardPreview {
    fn default() -> Self {
        Self {
            hovered: None,
            cycler: Cycler::new(HOVER_CYCLE_INTERVAL),
        }
    }
}

impl CardPreview {
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Moves the hover to another card (or none); the slideshow restarts.
    pub fn hover(&mut self, card: Option<usize>) {
        if self.hovered != card {
            self.hovered = card;
            self.cycler.reset();
        }
    }

    pub fn tick(&mut self, dt: Duration, hovered_game: Option<&Game>) -> bool {
        match hovered_game {
            Some(game) if self.hovered.is_some() => self.cycler.tick(dt, game.screenshots.len()),
            _ => false,
        }
    }

    /// The image a card shows: a cycling screenshot while hovered, else its header.
    pub fn display_image(&self, card: usize, game: &Game) -> String {
        if self.hovered == Some(card) && !game.screenshots.is_empty() {
            let index = self.cycler.index() % game.screenshots.len();
            game.screenshots[index].clone()
        } else {
            game.header_image()
        }
    }
}
