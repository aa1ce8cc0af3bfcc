//! Application state: everything the UI renders and the controller mutates.
//!
//! There is deliberately no global state; one `App` value is owned by the
//! runtime and passed by reference to callbacks.

use std::path::Path;
use std::time::Duration;

use image::RgbImage;
use tracing::info;

use crate::config::{LibrarySettings, Settings};
use crate::library::{self, MetadataCache, TrackInfo};
use crate::playback::Session;
use crate::playlist::{Playlist, SortKey};
use crate::viz::Visualizer;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing has been loaded yet (startup, or after clearing the playlist).
    #[default]
    Idle,
    Playing,
    Paused,
    /// A track is loaded but playback is halted and the position reset.
    Stopped,
}

/// Input mode for the bottom prompt line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a directory path to scan.
    ScanPrompt,
}

pub struct App {
    pub playlist: Playlist,
    pub metadata: MetadataCache,
    pub playback: PlaybackState,
    pub session: Session,
    /// Elapsed time as shown in the UI; written by the poll tick.
    pub elapsed: Duration,
    pub volume: f32,
    pub shuffle: bool,
    pub sort_key: SortKey,
    pub viz: Visualizer,

    /// Cursor position in the playlist pane.
    pub selected: usize,
    pub input_mode: InputMode,
    /// The directory path being typed into the scan prompt.
    pub scan_input: String,
    /// Metadata shown in the now-playing pane.
    pub now_playing: Option<TrackInfo>,
    /// Fixed-size album-art thumbnail for the now-playing track.
    pub album_art: Option<RgbImage>,
    art_size: u32,
    /// Transient one-line status message.
    pub status: Option<String>,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            playlist: Playlist::new(),
            metadata: MetadataCache::new(),
            playback: PlaybackState::Idle,
            session: Session::default(),
            elapsed: Duration::ZERO,
            volume: settings.playback.volume,
            shuffle: settings.playback.shuffle,
            sort_key: SortKey::Name,
            viz: Visualizer::new(settings.ui.visualizer_bars),
            selected: 0,
            input_mode: InputMode::Normal,
            scan_input: String::new(),
            now_playing: None,
            album_art: None,
            art_size: settings.ui.art_size,
            status: None,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.playlist.is_empty()
    }

    /// Scan `dir` into the playlist, skipping duplicates. Anything newly
    /// added triggers a re-sort by the active key, matching the behavior of
    /// scanning into an already-sorted list. Returns the count added.
    pub fn scan_into_playlist(&mut self, dir: &Path, settings: &LibrarySettings) -> usize {
        let found = library::scan(dir, settings);
        let added = self.playlist.extend_unique(found);
        if added > 0 {
            self.playlist.sort(self.sort_key, &mut self.metadata);
            self.clamp_cursor();
        }
        info!(dir = %dir.display(), added, "directory scan finished");
        added
    }

    /// Re-sort by `key` and remember it as the active sort.
    pub fn sort_playlist(&mut self, key: SortKey) {
        self.sort_key = key;
        self.playlist.sort(key, &mut self.metadata);
    }

    /// Empty the playlist, the metadata cache and all now-playing state.
    /// The caller is expected to stop playback first.
    pub fn clear_playlist(&mut self) {
        self.playlist.clear();
        self.metadata.clear();
        self.now_playing = None;
        self.album_art = None;
        self.selected = 0;
        self.playback = PlaybackState::Idle;
        self.session = Session::default();
        self.elapsed = Duration::ZERO;
    }

    /// Refresh now-playing metadata and album art from the current track.
    pub fn refresh_now_playing(&mut self) {
        match self.playlist.current_path().map(Path::to_path_buf) {
            Some(path) => {
                self.now_playing = Some(self.metadata.get(&path).clone());
                self.album_art = Some(library::album_art(&path, self.art_size));
            }
            None => {
                self.now_playing = None;
                self.album_art = None;
            }
        }
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    pub fn cursor_down(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.playlist.len();
        }
    }

    pub fn cursor_up(&mut self) {
        if self.has_tracks() {
            self.selected = match self.selected {
                0 => self.playlist.len() - 1,
                i => i - 1,
            };
        }
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status = Some(msg.into());
    }

    fn clamp_cursor(&mut self) {
        if self.selected >= self.playlist.len() {
            self.selected = self.playlist.len().saturating_sub(1);
        }
    }
}
