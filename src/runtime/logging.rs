use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogSettings;

/// Install the global subscriber writing to the configured log file.
///
/// Stdout belongs to the TUI, so without a file nothing is logged.
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(settings: &LogSettings) {
    let Some(path) = settings.file.as_deref() else {
        return;
    };

    let file = match open_log_file(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("mixtape: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init();
}

/// Open `path` for appending, creating missing parent directories.
pub(super) fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
