//! Terminal lifecycle and the top-level run function.

use std::env;
use std::path::Path;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::App;
use crate::config::Settings;
use crate::playback::PlaybackController;

mod event_loop;

pub fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(&settings);

    // Optional directory argument scans before the UI comes up; everything
    // else goes through the in-app scan prompt.
    if let Some(dir) = env::args().nth(1) {
        let added = app.scan_into_playlist(Path::new(&dir), &settings.library);
        info!(dir = %dir, added, "startup scan");
    }

    let mut controller = PlaybackController::new(app.volume);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut controller);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
