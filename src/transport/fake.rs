//! Recording `PlaybackHandle` used by unit tests.

use std::time::Duration;

use super::handle::{PlayRequest, PlaybackHandle, SubscriptionId};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Bind(String),
    Release,
    Load,
    Play(PlayRequest),
    Pause,
    SetPosition(Duration),
    SetVolume(f32),
    Subscribe(SubscriptionId),
    Unsubscribe(SubscriptionId),
}

#[derive(Debug, Default)]
pub struct FakeHandle {
    pub calls: Vec<Call>,
    pub bound: Option<String>,
    pub subscribed: Option<SubscriptionId>,
}

impl FakeHandle {
    pub fn last_play(&self) -> Option<PlayRequest> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Play(r) => Some(*r),
            _ => None,
        })
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl PlaybackHandle for FakeHandle {
    fn bind_source(&mut self, source: &str) {
        self.bound = Some(source.to_string());
        self.calls.push(Call::Bind(source.to_string()));
    }

    fn release_source(&mut self) {
        self.bound = None;
        self.calls.push(Call::Release);
    }

    fn load(&mut self) {
        self.calls.push(Call::Load);
    }

    fn play(&mut self, request: PlayRequest) {
        self.calls.push(Call::Play(request));
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn set_position(&mut self, position: Duration) {
        self.calls.push(Call::SetPosition(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.calls.push(Call::SetVolume(volume));
    }

    fn subscribe(&mut self, subscription: SubscriptionId) {
        self.subscribed = Some(subscription);
        self.calls.push(Call::Subscribe(subscription));
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        if self.subscribed == Some(subscription) {
            self.subscribed = None;
        }
        self.calls.push(Call::Unsubscribe(subscription));
    }
}
