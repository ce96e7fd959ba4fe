//! Error types for playback.

use thiserror::Error;

/// Why a play request was rejected by the playback handle.
///
/// Carries rendered messages rather than the underlying errors so it can be
/// sent across the audio thread boundary and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    /// Play was requested with nothing bound.
    #[error("no source bound")]
    NoSource,

    /// The audio output device could not be opened.
    #[error("audio output unavailable: {0}")]
    Output(String),

    /// A local file could not be opened.
    #[error("failed to open {locator}: {reason}")]
    Open { locator: String, reason: String },

    /// A remote source could not be downloaded.
    #[error("failed to fetch {locator}: {reason}")]
    Fetch { locator: String, reason: String },

    /// The bytes could not be decoded as audio.
    #[error("failed to decode {locator}: {reason}")]
    Decode { locator: String, reason: String },
}
