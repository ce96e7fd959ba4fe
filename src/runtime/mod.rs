use std::env;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::AudioPlayer;

mod event_loop;
mod logging;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();
    if let Some(msg) = &config_problem {
        eprintln!("mixtape: {msg}");
    }

    logging::init_logging(&settings.log);
    if let Some(msg) = config_problem {
        warn!("{msg}");
    }

    let (audio_player, events) = AudioPlayer::spawn(settings.audio.clone());
    let mut app = App::new(audio_player, settings.audio.initial_volume);
    startup::prepare_session(&mut app, &settings, env::args().skip(1));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &events, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.transport().handle().quit();
    info!("shut down");

    run_result
}
