//! Transport controller: the only owner of the playback handle.
//!
//! Commands go out through the `PlaybackHandle` trait, status comes back as
//! `HandleEvent`s which are mirrored into a serializable `PlayerState`.

mod controller;
mod handle;
mod state;

pub use controller::*;
pub use handle::*;
pub use state::*;

#[cfg(test)]
pub(crate) mod fake;
