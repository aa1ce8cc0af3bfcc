//! Audio output: a thin wrapper around rodio's stream, sink and decoder.
//!
//! The engine plays one track at a time; seeking is expressed by rebuilding
//! the sink with `Source::skip_duration`, so the reported position is always
//! relative to the start of the current playback segment.

mod engine;

pub use engine::{AudioEngine, AudioError};
