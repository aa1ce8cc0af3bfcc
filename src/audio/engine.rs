use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(#[from] rodio::StreamError),
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        source: rodio::decoder::DecoderError,
    },
}

/// One output stream, one sink. Loading a new track stops and replaces the
/// previous sink; decoding and mixing run on rodio's own thread.
pub struct AudioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    volume: f32,
}

impl AudioEngine {
    pub fn new(volume: f32) -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            volume: volume.clamp(0.0, 1.0),
        })
    }

    /// Load `path` and start playing `start_at` seconds into the track.
    /// `skip_duration` is the seeking primitive; `Duration::ZERO` is fine.
    pub fn play_from(&mut self, path: &Path, start_at: Duration) -> Result<(), AudioError> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let file = File::open(path).map_err(|e| AudioError::Open {
            path: path.display().to_string(),
            source: e,
        })?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| AudioError::Decode {
                path: path.display().to_string(),
                source: e,
            })?
            .skip_duration(start_at);

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.play();
        self.sink = Some(sink);

        Ok(())
    }

    pub fn pause(&self) {
        if let Some(s) = &self.sink {
            s.pause();
        }
    }

    pub fn resume(&self) {
        if let Some(s) = &self.sink {
            s.play();
        }
    }

    pub fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    /// True while the current sink still holds queued audio (paused or not).
    pub fn is_busy(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.empty())
    }

    pub fn is_paused(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| s.is_paused())
    }

    /// Playback position within the current segment. Excludes whatever was
    /// skipped to get here; callers add their seek offset.
    pub fn position(&self) -> Duration {
        self.sink
            .as_ref()
            .map(|s| s.get_pos())
            .unwrap_or(Duration::ZERO)
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(s) = &self.sink {
            s.set_volume(self.volume);
        }
    }
}
