use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::transport::{HandleEvent, PlaybackHandle};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: applies handle reports, draws, handles input.
/// Returns `Ok(())` when shutdown is requested.
pub fn run<H: PlaybackHandle>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<H>,
    events: &Receiver<HandleEvent>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Each report is applied on its own, in arrival order.
        while let Ok(ev) = events.try_recv() {
            app.handle_event(ev);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press. Returns `true` when the user asked to quit.
pub(super) fn handle_key_event<H: PlaybackHandle>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<H>,
    state: &mut EventLoopState,
) -> bool {
    if app.form.open {
        state.pending_gg = false;
        handle_form_key(key, app);
        return false;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    let seek_step = i64::try_from(settings.controls.seek_seconds).unwrap_or(i64::MAX);
    let volume_step = settings.controls.volume_step;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Enter => {
            app.play_selected();
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            // Nothing loaded yet: behave like enter.
            if app.state().current().is_none() {
                app.play_selected();
            } else {
                app.toggle();
            }
        }
        KeyCode::Char('l') => {
            app.play_next();
        }
        KeyCode::Char('h') => {
            app.play_prev();
        }
        KeyCode::Char('0') => app.seek(Duration::ZERO),
        KeyCode::Char('L') => app.seek_by(seek_step),
        KeyCode::Char('H') => app.seek_by(-seek_step),
        KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_volume(volume_step),
        KeyCode::Char('-') => app.adjust_volume(-volume_step),
        KeyCode::Char('a') => app.form.open(),
        KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => {
            app.remove_selected();
        }
        _ => {}
    }

    false
}

fn handle_form_key<H: PlaybackHandle>(key: KeyEvent, app: &mut App<H>) {
    match key.code {
        KeyCode::Esc => app.form.cancel(),
        KeyCode::Tab | KeyCode::BackTab => app.form.switch_focus(),
        KeyCode::Backspace => app.form.pop_char(),
        KeyCode::Enter => {
            if let Some(id) = app.submit_form() {
                if let Some(pos) = app.playlist().position(id) {
                    app.selected = pos;
                }
            }
        }
        KeyCode::Char(c) => {
            if !c.is_control() {
                app.form.push_char(c);
            }
        }
        _ => {}
    }
}
