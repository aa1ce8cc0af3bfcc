//! Playback orchestration: the controller state machine and the per-track
//! session (seek offset, cached length, scrub state).

mod controller;
mod session;

pub use controller::PlaybackController;
pub use session::{FALLBACK_TRACK_LENGTH, Session};

#[cfg(test)]
mod tests;
