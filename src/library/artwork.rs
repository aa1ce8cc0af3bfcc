use std::path::Path;

use image::imageops::FilterType;
use image::{Rgb, RgbImage};
use lofty::prelude::*;
use lofty::probe::Probe;
use tracing::debug;

/// Solid dark square shown when a track has no usable embedded art.
pub fn placeholder_art(size: u32) -> RgbImage {
    RgbImage::from_pixel(size.max(1), size.max(1), Rgb([0x1a, 0x1a, 0x1a]))
}

/// The first embedded picture in `path`, decoded and resized to a
/// `size`x`size` thumbnail. Missing art, unreadable files and undecodable
/// image data all yield the placeholder; this never fails.
pub fn album_art(path: &Path, size: u32) -> RgbImage {
    embedded_art(path, size.max(1)).unwrap_or_else(|| placeholder_art(size))
}

fn embedded_art(path: &Path, size: u32) -> Option<RgbImage> {
    let tagged = Probe::open(path).ok()?.read().ok()?;
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;
    let picture = tag.pictures().first()?;

    let img = match image::load_from_memory(picture.data()) {
        Ok(img) => img,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "embedded art did not decode");
            return None;
        }
    };

    Some(img.resize_exact(size, size, FilterType::Triangle).to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_has_requested_dimensions_and_dark_fill() {
        let art = placeholder_art(16);
        assert_eq!(art.dimensions(), (16, 16));
        assert_eq!(art.get_pixel(0, 0), &Rgb([0x1a, 0x1a, 0x1a]));
        assert_eq!(art.get_pixel(15, 15), &Rgb([0x1a, 0x1a, 0x1a]));
    }

    #[test]
    fn art_for_nonexistent_file_is_the_placeholder() {
        let art = album_art(Path::new("/no/such/track.mp3"), 12);
        assert_eq!(art.dimensions(), (12, 12));
        assert_eq!(art.get_pixel(5, 5), &Rgb([0x1a, 0x1a, 0x1a]));
    }

    #[test]
    fn zero_size_is_clamped() {
        assert_eq!(placeholder_art(0).dimensions(), (1, 1));
    }
}
