//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::{AddForm, App, FormField};
use crate::config::{ControlsSettings, UiSettings};
use crate::transport::{PlaybackHandle, PlayerState};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play selected");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next song");
    // H/L is filled dynamically from config.
    map.insert("0", "restart");
    map.insert("-/+", "volume");
    map.insert("a", "add song");
    map.insert("d", "remove song");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_seconds: u64) -> String {
    let order = [
        "j/k", "h/l", "H/L", "0", "enter", "space/p", "-/+", "a", "d", "gg/G", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{}s", seek_seconds))
            } else {
                CONTROLS_MAP.get(k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `MM:SS / MM:SS` for the transport bar.
fn time_text(state: &PlayerState, separator: &str) -> String {
    format!(
        "{}{}{}",
        format_mmss(state.elapsed()),
        separator,
        format_mmss(state.duration())
    )
}

/// Position of the seek bar in `[0, 1]`; empty while the duration is unknown.
fn seek_ratio(state: &PlayerState) -> f64 {
    let total = state.duration().as_secs();
    if total == 0 {
        return 0.0;
    }
    (state.elapsed().as_secs() as f64 / total as f64).clamp(0.0, 1.0)
}

fn play_glyph(playing: bool) -> &'static str {
    if playing { "⏸" } else { "▶" }
}

/// Track list label; the active row carries the same glyph as the transport bar.
fn track_row(title: &str, active: bool, playing: bool) -> String {
    if active {
        format!("{} {}", play_glyph(playing), title)
    } else {
        format!("  {}", title)
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<H: PlaybackHandle>(
    frame: &mut Frame,
    app: &App<H>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" mixtape ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    draw_track_list(frame, app, chunks[1]);
    draw_transport(frame, app, ui_settings, chunks[2]);

    if app.form.open {
        draw_add_form(frame, &app.form, chunks[1]);
    }

    let footer = Paragraph::new(controls_text(controls_settings.seek_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

fn draw_track_list<H: PlaybackHandle>(frame: &mut Frame, app: &App<H>, area: Rect) {
    let playing = app.state().is_playing();
    let items: Vec<ListItem> = app
        .playlist()
        .iter()
        .map(|t| {
            let active = app.is_active(t.id);
            let item = ListItem::new(track_row(&t.title, active, playing));
            if active { item.bold() } else { item }
        })
        .collect();

    let title = format!(" songs ({}) ", app.playlist().len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !app.playlist().is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_transport<H: PlaybackHandle>(
    frame: &mut Frame,
    app: &App<H>,
    ui_settings: &UiSettings,
    area: Rect,
) {
    let state = app.state();
    let block = Block::bordered().padding(left_pad()).title(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let title = match app.current_track() {
        Some(t) => format!("{} {}", play_glyph(state.is_playing()), t.title),
        None => ui_settings.empty_title.clone(),
    };
    frame.render_widget(Paragraph::new(title), rows[0]);

    let seek = Gauge::default()
        .ratio(seek_ratio(state))
        .label(time_text(state, &ui_settings.time_separator))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(seek, rows[1]);

    let volume = Gauge::default()
        .ratio(f64::from(state.volume()).clamp(0.0, 1.0))
        .label(format!("vol {:>3}%", (state.volume() * 100.0).round() as u8));
    frame.render_widget(volume, rows[2]);
}

fn draw_add_form(frame: &mut Frame, form: &AddForm, area: Rect) {
    let popup_area = centered_rect_sized(64, 8, area);
    frame.render_widget(Clear, popup_area);

    let field = |label: &str, value: &str, focused: bool| {
        let marker = if focused { ">" } else { " " };
        let cursor = if focused { "_" } else { "" };
        Line::from(format!("{marker} {label}: {value}{cursor}"))
    };

    let lines = vec![
        field("Title", &form.title, form.focus == FormField::Title),
        field("Source", &form.source, form.focus == FormField::Source),
        Line::from(""),
        Line::from("[tab] switch field | [enter] add | [esc] cancel").italic(),
    ];

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(left_pad())
                .title(" add song "),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(popup, popup_area);
}
