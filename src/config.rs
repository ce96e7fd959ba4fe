//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive the player (initial volume,
//! seek step, seeded playlist, logging) and helpers to load them from disk.

mod load;
mod schema;

pub use load::*;
pub use schema::*;

#[cfg(test)]
mod tests;
