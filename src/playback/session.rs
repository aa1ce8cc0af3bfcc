use std::time::Duration;

/// Used when a track's real length cannot be determined.
pub const FALLBACK_TRACK_LENGTH: Duration = Duration::from_secs(100);

/// Transient state for one loaded track. Reset whenever a new track starts;
/// mutated by pause/resume/seek.
#[derive(Debug, Clone)]
pub struct Session {
    /// Seconds already elapsed when the current playback segment started.
    /// The engine reports positions relative to the segment start.
    pub seek_offset: Duration,
    /// Snapshot of the track's total length.
    pub track_length: Duration,
    /// True while the user is adjusting the seek position. Poll-driven
    /// updates to the displayed position are suppressed until the scrub is
    /// committed or abandoned.
    pub seeking: bool,
    /// The uncommitted scrub target while `seeking`.
    pub scrub_position: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            seek_offset: Duration::ZERO,
            track_length: FALLBACK_TRACK_LENGTH,
            seeking: false,
            scrub_position: Duration::ZERO,
        }
    }
}

impl Session {
    /// Fresh session for a newly started track.
    pub fn for_track(track_length: Option<Duration>) -> Self {
        Self {
            track_length: track_length.unwrap_or(FALLBACK_TRACK_LENGTH),
            ..Self::default()
        }
    }

    /// Absolute elapsed time given the engine's segment-relative position,
    /// clamped to the cached track length.
    pub fn elapsed(&self, engine_position: Duration) -> Duration {
        (self.seek_offset + engine_position).min(self.track_length)
    }

    /// Start a scrub at `from`; the displayed position freezes there until
    /// the scrub ends.
    pub fn begin_scrub(&mut self, from: Duration) {
        self.seeking = true;
        self.scrub_position = from.min(self.track_length);
    }

    /// Move the pending scrub target, clamped to `[0, track_length]`.
    pub fn adjust_scrub(&mut self, delta_secs: i64) {
        let current = self.scrub_position.as_secs() as i64;
        let limit = self.track_length.as_secs() as i64;
        let target = (current + delta_secs).clamp(0, limit);
        self.scrub_position = Duration::from_secs(target as u64);
    }

    /// Abandon the scrub without seeking.
    pub fn cancel_scrub(&mut self) {
        self.seeking = false;
    }

    /// Commit the scrub: the chosen position becomes the new seek offset and
    /// is returned for the actual engine reload.
    pub fn commit_scrub(&mut self) -> Duration {
        self.seeking = false;
        self.seek_offset = self.scrub_position;
        self.scrub_position
    }
}
