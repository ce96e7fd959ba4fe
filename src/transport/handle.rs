//! The playback handle seam and the events it reports.

use std::time::Duration;

use crate::error::PlayError;

/// Token identifying one play request. Only the latest one counts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlayRequest(pub(crate) u64);

/// Token identifying one status subscription on the handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Status reported asynchronously by a playback handle.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleEvent {
    /// Outcome of the play request `request`.
    PlayResolved {
        request: PlayRequest,
        outcome: Result<(), PlayError>,
    },
    /// Periodic playback position.
    Position {
        subscription: SubscriptionId,
        elapsed: Duration,
    },
    /// The bound source was loaded; `duration` is `None` when unknown.
    MetadataReady {
        subscription: SubscriptionId,
        duration: Option<Duration>,
    },
    /// The bound source played to its end.
    Ended { subscription: SubscriptionId },
}

/// A single-tenant media playback capability (one bound source at a time).
///
/// Every method returns immediately; results arrive later as `HandleEvent`s.
pub trait PlaybackHandle {
    /// Bind `source`, replacing whatever was bound before.
    fn bind_source(&mut self, source: &str);
    /// Drop the current binding.
    fn release_source(&mut self);
    /// Prepare the bound source; reports `MetadataReady` when done.
    fn load(&mut self);
    /// Start or resume playback; reports `PlayResolved` for `request`.
    fn play(&mut self, request: PlayRequest);
    fn pause(&mut self);
    fn set_position(&mut self, position: Duration);
    fn set_volume(&mut self, volume: f32);
    /// Start reporting position/metadata/end events tagged with `subscription`.
    fn subscribe(&mut self, subscription: SubscriptionId);
    /// Stop reporting events for `subscription`.
    fn unsubscribe(&mut self, subscription: SubscriptionId);
}

/// A live event subscription on a playback handle.
///
/// Not `Clone`: there is exactly one per active track, and giving it back
/// through `release` is the only way to end it.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: SubscriptionId,
}

impl Subscription {
    pub fn acquire<H: PlaybackHandle + ?Sized>(handle: &mut H, id: SubscriptionId) -> Self {
        handle.subscribe(id);
        Self { id }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn release<H: PlaybackHandle + ?Sized>(self, handle: &mut H) {
        handle.unsubscribe(self.id);
    }
}
