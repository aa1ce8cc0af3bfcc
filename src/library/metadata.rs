use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::ItemKey;
use tracing::debug;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Tag metadata for one track. Fields are always populated: failed or
/// missing tags are replaced by the filename stem and "Unknown" fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    pub album: String,
}

/// The filename without its extension, or "UNKNOWN" for pathological paths.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}

/// Total track length read from the file's audio properties.
pub fn track_length(path: &Path) -> Option<Duration> {
    let tagged = Probe::open(path).ok()?.read().ok()?;
    Some(tagged.properties().duration())
}

fn read_info(path: &Path) -> TrackInfo {
    let mut info = TrackInfo {
        title: file_stem(path),
        artist: UNKNOWN_ARTIST.to_string(),
        album: UNKNOWN_ALBUM.to_string(),
    };

    let tagged = match Probe::open(path).and_then(|p| p.read()) {
        Ok(t) => t,
        Err(_) => {
            debug!(path = %path.display(), "unreadable tags, using filename fallback");
            return info;
        }
    };

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
            if !v.trim().is_empty() {
                info.title = v.to_string();
            }
        }
        if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
            let v = v.trim();
            if !v.is_empty() {
                info.artist = v.to_string();
            }
        }
        if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
            let v = v.trim();
            if !v.is_empty() {
                info.album = v.to_string();
            }
        }
    }

    info
}

/// Memoized per-path metadata lookups. Entries live until `clear`; the cache
/// is unbounded, which is fine at playlist scale.
#[derive(Default)]
pub struct MetadataCache {
    entries: HashMap<PathBuf, TrackInfo>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata for `path`, reading tags on first access. Never fails: any
    /// problem yields the fallback triple.
    pub fn get(&mut self, path: &Path) -> &TrackInfo {
        if !self.entries.contains_key(path) {
            let info = read_info(path);
            self.entries.insert(path.to_path_buf(), info);
        }
        &self.entries[path]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, path: PathBuf, info: TrackInfo) {
        self.entries.insert(path, info);
    }
}
