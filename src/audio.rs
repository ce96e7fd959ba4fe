//! Audio subsystem: the `rodio`-backed playback handle.
//!
//! `AudioPlayer` implements `PlaybackHandle` by forwarding commands to a
//! dedicated audio thread, which owns the output stream and the current
//! `Sink` and reports status back over a channel.

mod player;
mod sink;
mod source;
mod thread;
mod types;

pub use player::*;
pub use source::Locator;

#[cfg(test)]
mod tests;
