use tracing::{info, warn};

use crate::app::App;
use crate::audio::Locator;
use crate::config;
use crate::transport::PlaybackHandle;

/// Apply playback defaults and fill the playlist from the configured seed
/// list followed by command-line sources. Returns how many tracks were added.
pub fn prepare_session<H: PlaybackHandle>(
    app: &mut App<H>,
    settings: &config::Settings,
    args: impl IntoIterator<Item = String>,
) -> usize {
    app.auto_advance = settings.playback.auto_advance;

    let mut added = 0;
    for seed in &settings.playlist.seed {
        if app.add_track(&seed.title, &seed.source).is_some() {
            added += 1;
        } else {
            warn!(title = %seed.title, source = %seed.source, "skipping blank seed track");
        }
    }

    for source in args {
        let title = Locator::parse(&source)
            .suggested_title()
            .unwrap_or_else(|| source.clone());
        if app.add_track(&title, &source).is_some() {
            added += 1;
        } else {
            warn!(%source, "skipping blank source argument");
        }
    }

    info!(added, "playlist prepared");
    added
}
