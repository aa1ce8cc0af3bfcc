//! UI rendering for the terminal interface.
//!
//! Everything here is a pure function of the `App` state; no widget holds
//! state of its own between frames.

use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use image::RgbImage;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
};
use regex::Regex;

use crate::app::{App, InputMode, PlaybackState};
use crate::config::UiSettings;
use crate::library;

/// Leading track numbering like "07. " or "07 - ", stripped for display.
static TRACK_NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.\-\s]+").unwrap());

const CONTROLS_HELP: &str = "[enter] play  [space] pause  [x] stop  [h/l] prev/next  [s] shuffle  [1/2/3] sort  [o] scan  [c] clear  [←/→] seek  [+/-] vol  [q] quit";

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Playlist display name: filename stem without any leading numbering.
fn display_name(path: &Path) -> String {
    let stem = library::file_stem(path);
    TRACK_NUMBER_PREFIX.replace(&stem, "").into_owned()
}

pub fn draw(f: &mut Frame, app: &App, ui: &UiSettings) {
    let art_rows = (ui.art_size as u16).div_ceil(2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // header
            Constraint::Min(5),               // playlist
            Constraint::Length(8),            // visualizer
            Constraint::Length(3),            // seek gauge
            Constraint::Length(art_rows + 2), // now playing
            Constraint::Length(3),            // status / prompt
        ])
        .split(f.area());

    draw_header(f, chunks[0], ui);
    draw_playlist(f, chunks[1], app);
    draw_visualizer(f, chunks[2], app);
    draw_seek(f, chunks[3], app);
    draw_now_playing(f, chunks[4], app);
    draw_footer(f, chunks[5], app);
}

fn draw_header(f: &mut Frame, area: Rect, ui: &UiSettings) {
    let header = Paragraph::new(ui.header_text.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" rondo "));
    f.render_widget(header, area);
}

fn draw_playlist(f: &mut Frame, area: Rect, app: &App) {
    let current = app.playlist.current();
    let items: Vec<ListItem> = app
        .playlist
        .paths()
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let marker = if Some(i) == current { "▶ " } else { "  " };
            let line = format!("{marker}{:>3}. {}", i + 1, display_name(path));
            let item = ListItem::new(line);
            if Some(i) == current {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let title = format!(
        " Playlist ({}) — sort: {}{} ",
        app.playlist.len(),
        app.sort_key.label(),
        if app.shuffle { " — shuffle" } else { "" }
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if app.has_tracks() {
        state.select(Some(app.selected.min(app.playlist.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn bar_color(height: f32) -> Color {
    if height > 0.6 {
        Color::Red
    } else if height > 0.3 {
        Color::Blue
    } else {
        Color::Green
    }
}

fn draw_visualizer(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Visualizer ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let heights = app.viz.heights();
    let cell_w = ((inner.width as usize) / heights.len().max(1)).max(1);
    let rows = inner.height as usize;

    let lines: Vec<Line> = (0..rows)
        .map(|row| {
            // Top row represents full scale.
            let threshold = (rows - row) as f32 / rows as f32;
            let spans: Vec<Span> = heights
                .iter()
                .map(|&h| {
                    if h >= threshold {
                        Span::styled(
                            "█".repeat(cell_w.saturating_sub(1).max(1)),
                            Style::default().fg(bar_color(h)),
                        )
                    } else {
                        Span::raw(" ".repeat(cell_w.saturating_sub(1).max(1)))
                    }
                })
                .flat_map(|s| [s, Span::raw(" ")])
                .collect();
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_seek(f: &mut Frame, area: Rect, app: &App) {
    let total = app.session.track_length;
    let shown = if app.session.seeking {
        app.session.scrub_position
    } else {
        app.elapsed
    };

    let ratio = if total.as_secs_f64() > 0.0 {
        (shown.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let label = if app.session.seeking {
        format!("seek → {} / {}", format_mmss(shown), format_mmss(total))
    } else {
        format!("{} / {}", format_mmss(shown), format_mmss(total))
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, area);
}

/// Render the album-art thumbnail with half blocks: each terminal row shows
/// two pixel rows (upper pixel as foreground, lower as background).
fn art_lines(art: &RgbImage) -> Vec<Line<'static>> {
    let (w, h) = art.dimensions();
    (0..h.div_ceil(2))
        .map(|row| {
            let spans: Vec<Span> = (0..w)
                .map(|x| {
                    let upper = art.get_pixel(x, row * 2).0;
                    let lower = if row * 2 + 1 < h {
                        art.get_pixel(x, row * 2 + 1).0
                    } else {
                        upper
                    };
                    Span::styled(
                        "▀",
                        Style::default()
                            .fg(Color::Rgb(upper[0], upper[1], upper[2]))
                            .bg(Color::Rgb(lower[0], lower[1], lower[2])),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn playback_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "idle",
        PlaybackState::Playing => "playing",
        PlaybackState::Paused => "paused",
        PlaybackState::Stopped => "stopped",
    }
}

fn draw_now_playing(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title(" Now Playing ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let art_width = app.album_art.as_ref().map(|a| a.width() as u16).unwrap_or(0);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(art_width + 1), Constraint::Min(10)])
        .split(inner);

    if let Some(art) = &app.album_art {
        f.render_widget(Paragraph::new(art_lines(art)), halves[0]);
    }

    let mut lines: Vec<Line> = Vec::new();
    match &app.now_playing {
        Some(info) => {
            lines.push(Line::from(Span::styled(
                info.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(info.artist.clone()));
            lines.push(Line::from(Span::styled(
                info.album.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        None => lines.push(Line::from("No track loaded")),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "state: {}   volume: {:3.0}%",
        playback_label(app.playback),
        app.volume * 100.0
    )));

    f.render_widget(Paragraph::new(lines), halves[1]);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let text = match app.input_mode {
        InputMode::ScanPrompt => format!("Scan directory: {}▏ (enter to scan, esc to cancel)", app.scan_input),
        InputMode::Normal => match &app.status {
            Some(status) => status.clone(),
            None => CONTROLS_HELP.to_string(),
        },
    };

    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
