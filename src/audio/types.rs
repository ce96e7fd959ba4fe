//! Commands understood by the audio thread.

use std::time::Duration;

use crate::transport::{PlayRequest, SubscriptionId};

#[derive(Debug)]
pub enum AudioCmd {
    /// Bind a new source locator, dropping the current sink.
    Bind(String),
    /// Forget the bound source.
    Release,
    /// Open and decode the bound source into a paused sink.
    Load,
    /// Start or resume playback and report the outcome for the request.
    Play(PlayRequest),
    Pause,
    /// Jump to an absolute position in the loaded source.
    SetPosition(Duration),
    SetVolume(f32),
    Subscribe(SubscriptionId),
    Unsubscribe(SubscriptionId),
    /// Stop playback and end the audio thread.
    Quit,
}
