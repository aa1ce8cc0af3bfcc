//! Library services: directory scanning, tag metadata and album art.
//!
//! Lookups in this module are total: missing tags, unreadable files and
//! undecodable images fall back to placeholder values instead of surfacing
//! errors to the player.

mod artwork;
mod metadata;
mod scan;

pub use artwork::{album_art, placeholder_art};
pub use metadata::{MetadataCache, TrackInfo, UNKNOWN_ALBUM, UNKNOWN_ARTIST, file_stem, track_length};
pub use scan::scan;
