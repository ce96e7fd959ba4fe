use std::time::Duration;

use tracing::{debug, warn};

use crate::playlist::{Track, TrackId};

use super::handle::{HandleEvent, PlayRequest, PlaybackHandle, Subscription, SubscriptionId};
use super::state::PlayerState;

/// What applying a `HandleEvent` did to the state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventEffect {
    /// The event was stale (old request or released subscription).
    Ignored,
    Updated,
    /// The active track played to its end.
    TrackEnded,
}

/// Mediates every command against the playback handle and mirrors the
/// handle's reports into `PlayerState`.
pub struct Transport<H: PlaybackHandle> {
    handle: H,
    state: PlayerState,
    pending_play: Option<PlayRequest>,
    subscription: Option<Subscription>,
    next_token: u64,
}

impl<H: PlaybackHandle> Transport<H> {
    pub fn new(mut handle: H, volume: f32) -> Self {
        let volume = clamp_volume(volume);
        handle.set_volume(volume);
        let state = PlayerState {
            volume,
            ..PlayerState::default()
        };

        Self {
            handle,
            state,
            pending_play: None,
            subscription: None,
            next_token: 0,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Stop whatever is playing and start `track` from the beginning.
    ///
    /// `current` points at `track` right away; `playing` only flips once the
    /// handle resolves the play request.
    pub fn load_and_play(&mut self, track: &Track) {
        self.handle.pause();
        self.pending_play = None;

        // Every load gets a fresh subscription so reports from the previous
        // binding never reach the new track.
        self.resubscribe();

        self.handle.bind_source(&track.source);
        self.handle.load();

        self.state.current = Some(track.id);
        self.state.playing = false;
        self.state.elapsed = 0;
        self.state.duration = 0;
        debug!(id = %track.id, source = %track.source, "loading track");

        self.request_play();
    }

    /// Pause when playing, resume when paused. No-op without an active track.
    pub fn toggle(&mut self) {
        if self.state.current.is_none() {
            return;
        }

        if self.state.playing {
            self.handle.pause();
            self.pending_play = None;
            self.state.playing = false;
        } else {
            self.request_play();
        }
    }

    /// Jump to `position`, clamped to `[0, duration]`. `elapsed` is updated
    /// immediately instead of waiting for the next position report.
    pub fn seek(&mut self, position: Duration) {
        if self.state.current.is_none() {
            return;
        }

        let target = position.min(self.state.duration());
        self.handle.set_position(target);
        self.state.elapsed = target.as_secs();
    }

    /// Seek relative to the current position, saturating at zero.
    pub fn seek_by(&mut self, delta_secs: i64) {
        let target = self.state.elapsed.saturating_add_signed(delta_secs);
        self.seek(Duration::from_secs(target));
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = clamp_volume(volume);
        self.handle.set_volume(volume);
        self.state.volume = volume;
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        self.set_volume(self.state.volume + delta);
    }

    /// If `id` is the active track, stop playback and forget it.
    /// Returns whether anything changed.
    pub fn remove_active_if(&mut self, id: TrackId) -> bool {
        if self.state.current != Some(id) {
            return false;
        }

        self.handle.pause();
        self.handle.release_source();
        if let Some(sub) = self.subscription.take() {
            sub.release(&mut self.handle);
        }
        self.pending_play = None;
        self.state.clear_track();
        debug!(%id, "active track removed, playback stopped");
        true
    }

    /// Apply a status report from the handle.
    pub fn handle_event(&mut self, event: HandleEvent) -> EventEffect {
        match event {
            HandleEvent::PlayResolved { request, outcome } => {
                if self.pending_play != Some(request) {
                    debug!(?request, "ignoring stale play resolution");
                    return EventEffect::Ignored;
                }
                self.pending_play = None;
                match outcome {
                    Ok(()) => self.state.playing = true,
                    Err(e) => {
                        warn!(error = %e, track = ?self.state.current, "playback rejected");
                        self.state.playing = false;
                    }
                }
                EventEffect::Updated
            }
            HandleEvent::Position {
                subscription,
                elapsed,
            } => {
                if !self.is_live(subscription) {
                    return EventEffect::Ignored;
                }
                self.state.set_elapsed(elapsed.as_secs());
                EventEffect::Updated
            }
            HandleEvent::MetadataReady {
                subscription,
                duration,
            } => {
                if !self.is_live(subscription) {
                    return EventEffect::Ignored;
                }
                self.state.duration = duration.map_or(0, |d| d.as_secs());
                let elapsed = self.state.elapsed;
                self.state.set_elapsed(elapsed);
                EventEffect::Updated
            }
            HandleEvent::Ended { subscription } => {
                if !self.is_live(subscription) {
                    return EventEffect::Ignored;
                }
                self.pending_play = None;
                self.state.playing = false;
                EventEffect::TrackEnded
            }
        }
    }

    fn is_live(&self, subscription: SubscriptionId) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|s| s.id() == subscription)
    }

    fn resubscribe(&mut self) {
        if let Some(old) = self.subscription.take() {
            old.release(&mut self.handle);
        }
        let id = SubscriptionId(self.fresh_token());
        self.subscription = Some(Subscription::acquire(&mut self.handle, id));
    }

    fn request_play(&mut self) {
        let request = PlayRequest(self.fresh_token());
        self.pending_play = Some(request);
        self.handle.play(request);
    }

    fn fresh_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }
}

/// Clamp to `[0, 1]`; NaN counts as silence.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
