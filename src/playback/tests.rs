use std::time::Duration;

use super::*;
use crate::app::{App, PlaybackState};
use crate::config::Settings;

fn app_with_tracks(names: &[&str]) -> App {
    let mut app = App::new(&Settings::default());
    app.playlist
        .extend_unique(names.iter().map(std::path::PathBuf::from));
    app
}

// Session ---------------------------------------------------------------

#[test]
fn fresh_session_uses_fallback_length_when_unknown() {
    let session = Session::for_track(None);
    assert_eq!(session.track_length, FALLBACK_TRACK_LENGTH);
    assert_eq!(session.seek_offset, Duration::ZERO);
    assert!(!session.seeking);
}

#[test]
fn elapsed_adds_offset_and_clamps_to_track_length() {
    let mut session = Session::for_track(Some(Duration::from_secs(180)));
    session.seek_offset = Duration::from_secs(30);

    assert_eq!(
        session.elapsed(Duration::from_secs(10)),
        Duration::from_secs(40)
    );
    assert_eq!(
        session.elapsed(Duration::from_secs(500)),
        Duration::from_secs(180)
    );
}

#[test]
fn scrub_adjusts_are_clamped_to_the_track() {
    let mut session = Session::for_track(Some(Duration::from_secs(60)));
    session.begin_scrub(Duration::from_secs(50));
    assert!(session.seeking);

    session.adjust_scrub(30);
    assert_eq!(session.scrub_position, Duration::from_secs(60));
    session.adjust_scrub(-120);
    assert_eq!(session.scrub_position, Duration::ZERO);
}

#[test]
fn commit_scrub_moves_the_seek_offset() {
    let mut session = Session::for_track(Some(Duration::from_secs(180)));
    session.begin_scrub(Duration::from_secs(10));
    session.adjust_scrub(20);

    let committed = session.commit_scrub();
    assert_eq!(committed, Duration::from_secs(30));
    assert_eq!(session.seek_offset, Duration::from_secs(30));
    assert!(!session.seeking);
}

#[test]
fn cancel_scrub_keeps_the_old_offset() {
    let mut session = Session::for_track(Some(Duration::from_secs(180)));
    session.seek_offset = Duration::from_secs(5);
    session.begin_scrub(Duration::from_secs(5));
    session.adjust_scrub(60);
    session.cancel_scrub();

    assert!(!session.seeking);
    assert_eq!(session.seek_offset, Duration::from_secs(5));
}

// Controller state machine ----------------------------------------------
//
// These run with fabricated paths (and possibly no audio device), so a
// successful decode is never observed; transitions that depend only on the
// playlist and session are asserted exactly, engine-dependent ones loosely.

#[test]
fn play_on_empty_playlist_is_a_noop() {
    let mut app = App::new(&Settings::default());
    let mut controller = PlaybackController::new(0.7);

    controller.play(&mut app);
    assert_eq!(app.playback, PlaybackState::Idle);
    assert_eq!(app.playlist.current(), None);
}

#[test]
fn play_defaults_to_the_first_track() {
    let mut app = app_with_tracks(&["/m/a.mp3", "/m/b.mp3"]);
    let mut controller = PlaybackController::new(0.7);

    controller.play(&mut app);
    assert_eq!(app.playlist.current(), Some(0));
    // Decode of a fabricated path can never succeed.
    assert_ne!(app.playback, PlaybackState::Playing);
    assert!(app.now_playing.is_some());
}

#[test]
fn next_and_previous_cycle_the_playlist() {
    let mut app = app_with_tracks(&["/m/a.mp3", "/m/b.mp3", "/m/c.mp3"]);
    app.playlist.set_current(0);
    let mut controller = PlaybackController::new(0.7);

    controller.next(&mut app);
    assert_eq!(app.playlist.current(), Some(1));
    controller.next(&mut app);
    assert_eq!(app.playlist.current(), Some(2));
    controller.next(&mut app);
    assert_eq!(app.playlist.current(), Some(0));
    controller.previous(&mut app);
    assert_eq!(app.playlist.current(), Some(2));
}

#[test]
fn navigation_on_empty_playlist_changes_nothing() {
    let mut app = App::new(&Settings::default());
    let mut controller = PlaybackController::new(0.7);

    controller.next(&mut app);
    controller.previous(&mut app);
    assert_eq!(app.playback, PlaybackState::Idle);
    assert_eq!(app.playlist.current(), None);
}

#[test]
fn play_index_selects_the_chosen_entry() {
    let mut app = app_with_tracks(&["/m/a.mp3", "/m/b.mp3", "/m/c.mp3"]);
    let mut controller = PlaybackController::new(0.7);

    controller.play_index(&mut app, 2);
    assert_eq!(app.playlist.current(), Some(2));

    // Out-of-range selection is rejected.
    controller.play_index(&mut app, 9);
    assert_eq!(app.playlist.current(), Some(2));
}

#[test]
fn stop_resets_position_but_keeps_the_track_loaded() {
    let mut app = app_with_tracks(&["/m/a.mp3"]);
    let mut controller = PlaybackController::new(0.7);
    controller.play(&mut app);
    app.elapsed = Duration::from_secs(33);

    controller.stop(&mut app);
    assert_eq!(app.playback, PlaybackState::Stopped);
    assert_eq!(app.elapsed, Duration::ZERO);
    assert_eq!(app.playlist.current(), Some(0));
    assert!(app.viz.heights().iter().all(|&h| h == 0.0));
}

#[test]
fn seek_while_paused_keeps_the_session_out_of_playing() {
    let mut app = app_with_tracks(&["/m/a.mp3"]);
    app.playlist.set_current(0);
    app.session = Session::for_track(Some(Duration::from_secs(180)));
    app.playback = PlaybackState::Paused;
    let mut controller = PlaybackController::new(0.7);

    controller.seek(&mut app, Duration::from_secs(30));

    assert_eq!(app.session.seek_offset, Duration::from_secs(30));
    assert_eq!(app.elapsed, Duration::from_secs(30));
    // Was paused, so the machine must not come back playing on its own.
    assert_ne!(app.playback, PlaybackState::Playing);
}

#[test]
fn seek_without_a_current_track_is_a_noop() {
    let mut app = app_with_tracks(&["/m/a.mp3"]);
    let mut controller = PlaybackController::new(0.7);

    controller.seek(&mut app, Duration::from_secs(10));
    assert_eq!(app.session.seek_offset, Duration::ZERO);
}

#[test]
fn tick_is_inert_while_idle() {
    let mut app = App::new(&Settings::default());
    let mut controller = PlaybackController::new(0.7);

    controller.on_tick(&mut app);
    assert_eq!(app.playback, PlaybackState::Idle);
    assert_eq!(app.elapsed, Duration::ZERO);
}

#[test]
fn tick_auto_advances_when_the_track_runs_out() {
    let mut app = app_with_tracks(&["/m/a.mp3", "/m/b.mp3"]);
    app.playlist.set_current(0);
    app.playback = PlaybackState::Playing;
    let mut controller = PlaybackController::new(0.7);

    // Nothing is queued in the engine, so a Playing machine has hit the
    // natural end of its track: the tick must advance sequentially.
    controller.on_tick(&mut app);

    assert_eq!(app.playlist.current(), Some(1));
    // The fabricated path cannot decode, so the advance lands in Stopped.
    assert_eq!(app.playback, PlaybackState::Stopped);
}

#[test]
fn tick_without_a_current_track_resets_to_idle() {
    let mut app = app_with_tracks(&["/m/a.mp3"]);
    app.playback = PlaybackState::Playing;
    app.elapsed = Duration::from_secs(37);
    let mut controller = PlaybackController::new(0.7);

    controller.on_tick(&mut app);

    assert_eq!(app.playback, PlaybackState::Idle);
    assert_eq!(app.elapsed, Duration::ZERO);
    assert_eq!(app.playlist.current(), None);
}

#[test]
fn tick_does_not_advance_a_stopped_player() {
    let mut app = app_with_tracks(&["/m/a.mp3", "/m/b.mp3"]);
    app.playlist.set_current(0);
    app.playback = PlaybackState::Stopped;
    let mut controller = PlaybackController::new(0.7);

    controller.on_tick(&mut app);
    assert_eq!(app.playback, PlaybackState::Stopped);
    assert_eq!(app.playlist.current(), Some(0));
}
