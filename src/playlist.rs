//! Playlist store: the ordered list of tracks the player cycles through.
//!
//! Insertion order is play order. The store hands out `TrackId`s and knows
//! how to walk the list circularly; it never touches playback.

mod model;
mod store;

pub use model::*;
pub use store::*;
