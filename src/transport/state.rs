use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::playlist::TrackId;

/// Observable playback state. Only the transport controller writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub(super) current: Option<TrackId>,
    pub(super) playing: bool,
    /// Whole seconds.
    pub(super) elapsed: u64,
    /// Whole seconds; zero until metadata is known.
    pub(super) duration: u64,
    pub(super) volume: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current: None,
            playing: false,
            elapsed: 0,
            duration: 0,
            volume: 1.0,
        }
    }
}

impl PlayerState {
    /// Id of the active track. Non-owning: it may point at nothing once the
    /// track leaves the playlist, until the controller clears it.
    pub fn current(&self) -> Option<TrackId> {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_secs(self.elapsed)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration)
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub(super) fn clear_track(&mut self) {
        self.current = None;
        self.playing = false;
        self.elapsed = 0;
        self.duration = 0;
    }

    pub(super) fn set_elapsed(&mut self, secs: u64) {
        self.elapsed = if self.duration > 0 {
            secs.min(self.duration)
        } else {
            secs
        };
    }
}
