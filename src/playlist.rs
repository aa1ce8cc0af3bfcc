//! The playlist: an ordered, duplicate-free sequence of track paths plus the
//! index of the current track.
//!
//! Invariant: `current`, when `Some`, always indexes into the sequence.
//! Sorting re-locates the current track by path so its identity survives.

use std::path::{Path, PathBuf};

use rand::RngExt;

use crate::library::MetadataCache;

/// Sort criteria for the playlist.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Track title, case-insensitive.
    Name,
    /// Artist, then title.
    Artist,
    /// Album, then title.
    Album,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::Artist => "Artist",
            SortKey::Album => "Album",
        }
    }
}

#[derive(Default)]
pub struct Playlist {
    paths: Vec<PathBuf>,
    current: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn path_at(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current.and_then(|i| self.path_at(i))
    }

    /// Select `index` as the current track. Out-of-range indices are
    /// rejected so the index invariant holds.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.paths.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Append `candidates`, skipping any path already present. Returns the
    /// number actually added.
    pub fn extend_unique<I>(&mut self, candidates: I) -> usize
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut added = 0;
        for path in candidates {
            if !self.paths.contains(&path) {
                self.paths.push(path);
                added += 1;
            }
        }
        added
    }

    /// Stable sort by `key`, case-insensitive. The current track keeps its
    /// identity across the sort: its index is re-located by path afterwards
    /// (sentinel if the path is somehow gone).
    pub fn sort(&mut self, key: SortKey, cache: &mut MetadataCache) {
        let current_path = self.current.and_then(|i| self.paths.get(i).cloned());

        match key {
            SortKey::Name => self
                .paths
                .sort_by_cached_key(|p| cache.get(p).title.to_lowercase()),
            SortKey::Artist => self.paths.sort_by_cached_key(|p| {
                let info = cache.get(p);
                (info.artist.to_lowercase(), info.title.to_lowercase())
            }),
            SortKey::Album => self.paths.sort_by_cached_key(|p| {
                let info = cache.get(p);
                (info.album.to_lowercase(), info.title.to_lowercase())
            }),
        }

        self.current = current_path.and_then(|cp| self.paths.iter().position(|p| *p == cp));
    }

    /// Drop every track and reset the current index to the sentinel.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.current = None;
    }

    /// Advance the current index: a uniformly random pick when `shuffle`
    /// (repeats allowed, including the track already playing), otherwise
    /// `(current + 1) % len`. No-op on an empty playlist.
    pub fn next(&mut self, shuffle: bool) -> Option<usize> {
        if self.paths.is_empty() {
            return None;
        }

        let next = if shuffle {
            rand::rng().random_range(0..self.paths.len())
        } else {
            match self.current {
                Some(i) => (i + 1) % self.paths.len(),
                None => 0,
            }
        };

        self.current = Some(next);
        Some(next)
    }

    /// Step the current index back one, wrapping from 0 to `len - 1`.
    /// No-op on an empty playlist.
    pub fn previous(&mut self) -> Option<usize> {
        if self.paths.is_empty() {
            return None;
        }

        let prev = match self.current {
            Some(0) | None => self.paths.len() - 1,
            Some(i) => i - 1,
        };

        self.current = Some(prev);
        Some(prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::TrackInfo;

    fn playlist_of(names: &[&str]) -> Playlist {
        let mut pl = Playlist::new();
        pl.extend_unique(names.iter().map(PathBuf::from));
        pl
    }

    fn info(title: &str, artist: &str, album: &str) -> TrackInfo {
        TrackInfo {
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
        }
    }

    #[test]
    fn extend_unique_skips_paths_already_present() {
        let mut pl = playlist_of(&["/m/a.mp3", "/m/b.mp3"]);
        let added = pl.extend_unique(vec![PathBuf::from("/m/b.mp3"), PathBuf::from("/m/c.mp3")]);
        assert_eq!(added, 1);
        assert_eq!(pl.len(), 3);

        // A second identical scan adds nothing.
        let added = pl.extend_unique(vec![
            PathBuf::from("/m/a.mp3"),
            PathBuf::from("/m/b.mp3"),
            PathBuf::from("/m/c.mp3"),
        ]);
        assert_eq!(added, 0);
        assert_eq!(pl.len(), 3);
    }

    #[test]
    fn next_is_cyclic_with_period_len() {
        let mut pl = playlist_of(&["/m/a.mp3", "/m/b.mp3", "/m/c.mp3"]);
        pl.set_current(0);

        assert_eq!(pl.next(false), Some(1));
        assert_eq!(pl.next(false), Some(2));
        assert_eq!(pl.next(false), Some(0));
    }

    #[test]
    fn previous_is_the_inverse_of_next() {
        let mut pl = playlist_of(&["/m/a.mp3", "/m/b.mp3", "/m/c.mp3", "/m/d.mp3"]);
        for start in 0..4 {
            pl.set_current(start);
            pl.next(false);
            assert_eq!(pl.previous(), Some(start));
        }
    }

    #[test]
    fn previous_wraps_from_zero_to_last() {
        let mut pl = playlist_of(&["/m/a.mp3", "/m/b.mp3", "/m/c.mp3"]);
        pl.set_current(0);
        assert_eq!(pl.previous(), Some(2));
    }

    #[test]
    fn next_with_no_selection_starts_at_zero() {
        let mut pl = playlist_of(&["/m/a.mp3", "/m/b.mp3"]);
        assert_eq!(pl.current(), None);
        assert_eq!(pl.next(false), Some(0));
    }

    #[test]
    fn navigation_on_empty_playlist_is_a_noop() {
        let mut pl = Playlist::new();
        assert_eq!(pl.next(false), None);
        assert_eq!(pl.next(true), None);
        assert_eq!(pl.previous(), None);
        assert_eq!(pl.current(), None);
    }

    #[test]
    fn shuffle_next_stays_in_range() {
        let mut pl = playlist_of(&["/m/a.mp3", "/m/b.mp3", "/m/c.mp3"]);
        for _ in 0..50 {
            let i = pl.next(true).unwrap();
            assert!(i < pl.len());
            assert_eq!(pl.current(), Some(i));
        }
    }

    #[test]
    fn set_current_rejects_out_of_range() {
        let mut pl = playlist_of(&["/m/a.mp3"]);
        assert!(pl.set_current(0));
        assert!(!pl.set_current(1));
        assert_eq!(pl.current(), Some(0));
    }

    #[test]
    fn sort_by_name_is_case_insensitive_and_follows_current() {
        let mut cache = MetadataCache::new();
        cache.insert(PathBuf::from("/m/1.mp3"), info("Zebra", "X", "X"));
        cache.insert(PathBuf::from("/m/2.mp3"), info("apple", "X", "X"));

        let mut pl = playlist_of(&["/m/1.mp3", "/m/2.mp3"]);
        pl.set_current(0); // "Zebra"

        pl.sort(SortKey::Name, &mut cache);

        assert_eq!(pl.path_at(0), Some(Path::new("/m/2.mp3")));
        assert_eq!(pl.path_at(1), Some(Path::new("/m/1.mp3")));
        // The current track is still "Zebra", now at index 1.
        assert_eq!(pl.current(), Some(1));
    }

    #[test]
    fn sort_by_artist_uses_title_as_secondary_key() {
        let mut cache = MetadataCache::new();
        cache.insert(PathBuf::from("/m/1.mp3"), info("B side", "Same Artist", "A"));
        cache.insert(PathBuf::from("/m/2.mp3"), info("A side", "Same Artist", "A"));
        cache.insert(PathBuf::from("/m/3.mp3"), info("Z side", "another", "A"));

        let mut pl = playlist_of(&["/m/1.mp3", "/m/2.mp3", "/m/3.mp3"]);
        pl.sort(SortKey::Artist, &mut cache);

        assert_eq!(pl.path_at(0), Some(Path::new("/m/3.mp3")));
        assert_eq!(pl.path_at(1), Some(Path::new("/m/2.mp3")));
        assert_eq!(pl.path_at(2), Some(Path::new("/m/1.mp3")));
    }

    #[test]
    fn sorting_twice_by_the_same_key_is_idempotent() {
        let mut cache = MetadataCache::new();
        cache.insert(PathBuf::from("/m/1.mp3"), info("b", "one", "r"));
        cache.insert(PathBuf::from("/m/2.mp3"), info("a", "two", "r"));
        cache.insert(PathBuf::from("/m/3.mp3"), info("c", "one", "r"));

        let mut pl = playlist_of(&["/m/1.mp3", "/m/2.mp3", "/m/3.mp3"]);
        pl.sort(SortKey::Album, &mut cache);
        let first: Vec<PathBuf> = pl.paths().to_vec();
        pl.sort(SortKey::Album, &mut cache);
        assert_eq!(pl.paths(), first.as_slice());
    }

    #[test]
    fn clear_resets_sequence_and_current() {
        let mut pl = playlist_of(&["/m/a.mp3", "/m/b.mp3"]);
        pl.set_current(1);
        pl.clear();
        assert!(pl.is_empty());
        assert_eq!(pl.current(), None);
        assert_eq!(pl.current_path(), None);
    }
}
