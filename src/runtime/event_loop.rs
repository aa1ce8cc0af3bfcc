use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode, PlaybackState};
use crate::config::Settings;
use crate::playback::PlaybackController;
use crate::playlist::SortKey;
use crate::ui;

/// Main terminal event loop: input handling, UI drawing and the two timers
/// (playback poll and visualizer animation). Returns `Ok(())` when shutdown
/// is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &Settings,
    app: &mut App,
    controller: &mut PlaybackController,
) -> Result<(), Box<dyn std::error::Error>> {
    let poll_interval = Duration::from_millis(settings.playback.poll_interval_ms);
    let animation_interval = Duration::from_millis(settings.ui.animation_interval_ms);
    let mut last_poll = Instant::now();
    let mut last_frame = Instant::now();

    loop {
        if last_poll.elapsed() >= poll_interval {
            controller.on_tick(app);
            last_poll = Instant::now();
        }
        if last_frame.elapsed() >= animation_interval {
            app.viz.step(app.playback == PlaybackState::Playing);
            last_frame = Instant::now();
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(key, settings, app, controller) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Dispatch one key press. Returns `true` to request shutdown.
fn handle_key(
    key: KeyEvent,
    settings: &Settings,
    app: &mut App,
    controller: &mut PlaybackController,
) -> bool {
    if app.input_mode == InputMode::ScanPrompt {
        handle_prompt_key(key, settings, app);
        return false;
    }
    if app.session.seeking {
        handle_scrub_key(key, settings, app, controller);
        return false;
    }

    match key.code {
        KeyCode::Char('q') => {
            controller.stop(app);
            return true;
        }
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Enter => {
            let selected = app.selected;
            controller.play_index(app, selected);
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => controller.toggle_pause(app),
        KeyCode::Char('x') => controller.stop(app),
        KeyCode::Char('l') | KeyCode::Char('n') => controller.next(app),
        KeyCode::Char('h') | KeyCode::Char('b') => controller.previous(app),
        KeyCode::Char('s') => app.toggle_shuffle(),
        KeyCode::Char('o') => {
            app.input_mode = InputMode::ScanPrompt;
            app.scan_input.clear();
            app.status = None;
        }
        KeyCode::Char('c') => {
            controller.stop(app);
            app.clear_playlist();
            app.set_status("playlist cleared");
        }
        KeyCode::Char('1') => app.sort_playlist(SortKey::Name),
        KeyCode::Char('2') => app.sort_playlist(SortKey::Artist),
        KeyCode::Char('3') => app.sort_playlist(SortKey::Album),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            adjust_volume(app, controller, settings.controls.volume_step)
        }
        KeyCode::Char('-') => adjust_volume(app, controller, -settings.controls.volume_step),
        KeyCode::Left | KeyCode::Right if app.playback != PlaybackState::Idle => {
            // First press enters scrub mode and already moves the target.
            app.session.begin_scrub(app.elapsed);
            let delta = settings.controls.scrub_seconds as i64;
            app.session.adjust_scrub(if key.code == KeyCode::Right {
                delta
            } else {
                -delta
            });
        }
        _ => {}
    }

    false
}

/// Keys while typing a directory into the scan prompt.
fn handle_prompt_key(key: KeyEvent, settings: &Settings, app: &mut App) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.scan_input.clear();
        }
        KeyCode::Enter => {
            let dir = app.scan_input.trim().to_string();
            app.input_mode = InputMode::Normal;
            app.scan_input.clear();
            if !dir.is_empty() {
                let added = app.scan_into_playlist(Path::new(&dir), &settings.library);
                app.set_status(format!("added {added} track(s) from {dir}"));
            }
        }
        KeyCode::Backspace => {
            app.scan_input.pop();
        }
        KeyCode::Char(c) if !c.is_control() => app.scan_input.push(c),
        _ => {}
    }
}

/// Keys while a scrub is pending: adjust, commit or abandon.
fn handle_scrub_key(
    key: KeyEvent,
    settings: &Settings,
    app: &mut App,
    controller: &mut PlaybackController,
) {
    let delta = settings.controls.scrub_seconds as i64;
    match key.code {
        KeyCode::Right => app.session.adjust_scrub(delta),
        KeyCode::Left => app.session.adjust_scrub(-delta),
        KeyCode::Enter => {
            let position = app.session.commit_scrub();
            controller.seek(app, position);
        }
        KeyCode::Esc => app.session.cancel_scrub(),
        _ => {}
    }
}

fn adjust_volume(app: &mut App, controller: &mut PlaybackController, step: f32) {
    app.volume = (app.volume + step).clamp(0.0, 1.0);
    controller.set_volume(app.volume);
}
