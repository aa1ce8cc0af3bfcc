use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::app::{App, PlaybackState};
use crate::audio::AudioEngine;
use crate::library;

use super::session::Session;

/// Drives the `Idle -> Playing -> Paused/Stopped` state machine over the
/// playlist and the audio engine.
///
/// The engine is optional: when no output device exists the player stays
/// fully interactive and every engine call degrades to a no-op.
pub struct PlaybackController {
    engine: Option<AudioEngine>,
}

impl PlaybackController {
    pub fn new(volume: f32) -> Self {
        let engine = match AudioEngine::new(volume) {
            Ok(engine) => Some(engine),
            Err(e) => {
                warn!(error = %e, "audio output unavailable, playback disabled");
                None
            }
        };
        Self { engine }
    }

    /// Play/resume: resumes the engine when paused, otherwise (re)loads the
    /// current track from the top. Empty playlist is a no-op.
    pub fn play(&mut self, app: &mut App) {
        if app.playlist.is_empty() {
            debug!("play requested with an empty playlist");
            return;
        }

        match app.playback {
            PlaybackState::Paused => {
                if let Some(engine) = &self.engine {
                    engine.resume();
                }
                app.playback = PlaybackState::Playing;
            }
            _ => self.start_current(app, Duration::ZERO),
        }
    }

    /// Pause, but only while the engine reports active playback.
    pub fn pause(&mut self, app: &mut App) {
        if app.playback != PlaybackState::Playing {
            return;
        }
        if let Some(engine) = &self.engine {
            if engine.is_busy() {
                engine.pause();
                app.playback = PlaybackState::Paused;
            }
        }
    }

    pub fn toggle_pause(&mut self, app: &mut App) {
        match app.playback {
            PlaybackState::Playing => self.pause(app),
            _ => self.play(app),
        }
    }

    /// Halt the engine and reset the position display and visualizer. The
    /// loaded track stays current (`Stopped`, not `Idle`).
    pub fn stop(&mut self, app: &mut App) {
        if let Some(engine) = self.engine.as_mut() {
            engine.stop();
        }
        if app.playback != PlaybackState::Idle {
            app.playback = PlaybackState::Stopped;
        }
        app.session.cancel_scrub();
        app.elapsed = Duration::ZERO;
        app.viz.reset();
    }

    /// Stop, advance the playlist (shuffle-aware), play.
    pub fn next(&mut self, app: &mut App) {
        if app.playlist.is_empty() {
            return;
        }
        self.stop(app);
        if app.playlist.next(app.shuffle).is_some() {
            self.start_current(app, Duration::ZERO);
        }
    }

    /// Stop, step back one track, play.
    pub fn previous(&mut self, app: &mut App) {
        if app.playlist.is_empty() {
            return;
        }
        self.stop(app);
        if app.playlist.previous().is_some() {
            self.start_current(app, Duration::ZERO);
        }
    }

    /// Direct selection from the playlist display: equivalent to stop + play
    /// of the chosen entry.
    pub fn play_index(&mut self, app: &mut App, index: usize) {
        if !app.playlist.set_current(index) {
            return;
        }
        self.stop(app);
        self.start_current(app, Duration::ZERO);
    }

    /// Reload the current track starting at `position`; the offset becomes
    /// the new baseline for elapsed time. If playback was paused it is
    /// re-paused immediately after the reload.
    pub fn seek(&mut self, app: &mut App, position: Duration) {
        let Some(path) = app.playlist.current_path().map(PathBuf::from) else {
            return;
        };
        let was_paused = app.playback == PlaybackState::Paused;
        let position = position.min(app.session.track_length);

        app.session.seek_offset = position;
        app.elapsed = position;

        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        match engine.play_from(&path, position) {
            Ok(()) => {
                if was_paused {
                    engine.pause();
                    app.playback = PlaybackState::Paused;
                } else {
                    app.playback = PlaybackState::Playing;
                }
                debug!(secs = position.as_secs(), "seeked");
            }
            Err(e) => {
                warn!(error = %e, "seek reload failed");
                app.playback = PlaybackState::Stopped;
            }
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        if let Some(engine) = self.engine.as_mut() {
            engine.set_volume(volume);
        }
    }

    /// The ~1 s poll: refresh the displayed position, or treat "not busy and
    /// not paused" as natural end of track and auto-advance.
    pub fn on_tick(&mut self, app: &mut App) {
        if app.playback == PlaybackState::Idle {
            return;
        }

        let engine_active = self
            .engine
            .as_ref()
            .is_some_and(|e| e.is_busy() || e.is_paused());

        if engine_active {
            // Never overwrite the position the user is currently choosing.
            if !app.session.seeking {
                let position = self
                    .engine
                    .as_ref()
                    .map(|e| e.position())
                    .unwrap_or(Duration::ZERO);
                app.elapsed = app.session.elapsed(position);
            }
        } else if app.playback == PlaybackState::Playing {
            if !app.playlist.is_empty() && app.playlist.current().is_some() {
                debug!("track ended, auto-advancing");
                self.next(app);
            } else {
                app.elapsed = Duration::ZERO;
                app.playback = PlaybackState::Idle;
            }
        }
    }

    /// Load the current track (defaulting to the first) and start playback
    /// at `start_at`. Any engine failure is logged and leaves the machine in
    /// `Stopped`; the player stays interactive.
    fn start_current(&mut self, app: &mut App, start_at: Duration) {
        if app.playlist.current().is_none() && !app.playlist.set_current(0) {
            return;
        }
        let Some(path) = app.playlist.current_path().map(PathBuf::from) else {
            return;
        };

        app.session = Session::for_track(library::track_length(&path));
        app.session.seek_offset = start_at;
        app.elapsed = start_at;
        app.refresh_now_playing();

        let Some(engine) = self.engine.as_mut() else {
            app.playback = PlaybackState::Stopped;
            return;
        };
        match engine.play_from(&path, start_at) {
            Ok(()) => {
                app.playback = PlaybackState::Playing;
                info!(track = %path.display(), "playback started");
            }
            Err(e) => {
                warn!(error = %e, "failed to start playback");
                app.playback = PlaybackState::Stopped;
            }
        }
    }
}
