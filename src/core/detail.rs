//! # Detail Page
//!
//! Shows the game captured at selection time. There is no fetch-by-id: the page
//! mounts from the `selectedGame` storage slot, so it can go stale relative to
//! the backend.

use log::{debug, warn};

use crate::api::Game;
use crate::core::storage::{LocalStorage, load_selected_game};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub url: String,
    pub thumbnail: String,
}

/// Trailer first (thumbnailed by the header image), then screenshots in order.
pub fn media_list(game: &Game) -> Vec<MediaItem> {
    let trailer = game.trailer_url().map(|url| MediaItem {
        kind: MediaKind::Video,
        url: url.to_string(),
        thumbnail: game.header_image(),
    });
    let screenshots = game.screenshots.iter().map(|url| MediaItem {
        kind: MediaKind::Image,
        url: url.clone(),
        thumbnail: url.clone(),
    });
    trailer.into_iter().chain(screenshots).collect()
}

pub struct DetailPage {
    pub game: Game,
    media: Vec<MediaItem>,
    index: usize,
}

impl DetailPage {
    pub fn new(game: Game) -> Self {
        let media = media_list(&game);
        Self {
            game,
            media,
            index: 0,
        }
    }

    /// Reads the selected game from storage. `None` means the caller should
    /// fall back to the search page.
    pub fn mount(storage: &LocalStorage) -> Option<Self> {
        match load_selected_game(storage) {
            Ok(Some(game)) => {
                debug!("Detail page mounted for {} ({})", game.title, game.id);
                Some(Self::new(game))
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Unreadable selected game slot: {}", e);
                None
            }
        }
    }

    pub fn media(&self) -> &[MediaItem] {
        &self.media
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn active_media(&self) -> Option<&MediaItem> {
        self.media.get(self.index)
    }

    /// URL currently on screen: the active item, or the header image when
    /// the game has no media at all.
    pub fn active_url(&self) -> String {
        self.active_media()
            .map(|item| item.url.clone())
            .unwrap_or_else(|| self.game.header_image())
    }

    /// Advances to the next item, wrapping to the start.
    pub fn next(&mut self) -> usize {
        if !self.media.is_empty() {
            self.index = (self.index + 1) % self.media.len();
        }
        self.index
    }

    /// Steps back one item, wrapping to the end.
    pub fn prev(&mut self) -> usize {
        if !self.media.is_empty() {
            let len = self.media.len();
            self.index = (self.index + len - 1) % len;
        }
        self.index
    }

    /// Jumps to a thumbnail. Out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.media.len() {
            self.index = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::store_selected_game;
    use crate::test_support::{sample_game, temp_storage};

    fn game_with_media(trailer: Option<&str>, screenshots: &[&str]) -> Game {
        let mut game = sample_game("42");
        game.trailer = trailer.map(str::to_string);
        game.screenshots = screenshots.iter().map(|s| s.to_string()).collect();
        game
    }

    #[test]
    fn test_media_list_puts_trailer_first() {
        let game = game_with_media(Some("t.mp4"), &["s1.jpg", "s2.jpg"]);
        let media = media_list(&game);
        assert_eq!(media.len(), 3);
        assert_eq!(media[0].kind, MediaKind::Video);
        assert_eq!(media[0].url, "t.mp4");
        assert_eq!(media[0].thumbnail, game.header_image());
        assert_eq!(media[1].url, "s1.jpg");
        assert_eq!(media[2].thumbnail, "s2.jpg");
    }

    #[test]
    fn test_media_list_without_trailer() {
        let game = game_with_media(None, &["s1.jpg", "s2.jpg"]);
        let media = media_list(&game);
        assert!(media.iter().all(|m| m.kind == MediaKind::Image));
        assert_eq!(media.len(), 2);

        let blank_trailer = game_with_media(Some(""), &["s1.jpg"]);
        assert_eq!(media_list(&blank_trailer).len(), 1);
    }

    #[test]
    fn test_next_n_times_returns_to_start() {
        let mut page = DetailPage::new(game_with_media(Some("t"), &["a", "b", "c"]));
        let n = page.media().len();
        page.select(2);
        for _ in 0..n {
            page.next();
        }
        assert_eq!(page.index(), 2);
    }

    #[test]
    fn test_prev_from_zero_wraps_to_last() {
        let mut page = DetailPage::new(game_with_media(Some("t"), &["a", "b", "c"]));
        assert_eq!(page.prev(), 3);
        assert_eq!(page.active_media().unwrap().url, "c");
    }

    #[test]
    fn test_single_item_navigation_is_stable() {
        let mut page = DetailPage::new(game_with_media(None, &["only.jpg"]));
        assert_eq!(page.next(), 0);
        assert_eq!(page.prev(), 0);
    }

    #[test]
    fn test_no_media_falls_back_to_header_image() {
        let mut page = DetailPage::new(game_with_media(None, &[]));
        assert_eq!(page.next(), 0);
        assert_eq!(page.prev(), 0);
        assert!(page.active_media().is_none());
        assert_eq!(page.active_url(), page.game.header_image());
    }

    #[test]
    fn test_select_sets_index_directly() {
        let mut page = DetailPage::new(game_with_media(Some("t"), &["a", "b"]));
        assert!(page.select(2));
        assert_eq!(page.active_url(), "b");
        assert!(!page.select(3));
        assert_eq!(page.index(), 2);
    }

    #[test]
    fn test_mount_without_selection_is_none() {
        let storage = temp_storage();
        assert!(DetailPage::mount(&storage).is_none());
    }

    #[test]
    fn test_mount_reads_selected_game() {
        let storage = temp_storage();
        let game = game_with_media(Some("t"), &["a"]);
        store_selected_game(&storage, &game).unwrap();

        let page = DetailPage::mount(&storage).unwrap();
        assert_eq!(page.game, game);
        assert_eq!(page.index(), 0);
        assert_eq!(page.active_media().unwrap().kind, MediaKind::Video);
    }
}
