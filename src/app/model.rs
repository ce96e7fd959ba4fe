//! Application model: `App` owns the playlist and the transport.
//!
//! Every mutation goes through a method here so the cross-component rules
//! hold: removing the active track stops playback, and next/prev resolve
//! through the playlist before playing through the transport.

use std::time::Duration;

use tracing::info;

use crate::playlist::{Playlist, Track, TrackId};
use crate::transport::{EventEffect, HandleEvent, PlaybackHandle, PlayerState, Transport};

use super::form::AddForm;

/// The main application model.
pub struct App<H: PlaybackHandle> {
    playlist: Playlist,
    transport: Transport<H>,

    /// Highlighted row in the track list.
    pub selected: usize,
    pub form: AddForm,
    /// Start the next track when the current one ends.
    pub auto_advance: bool,
}

impl<H: PlaybackHandle> App<H> {
    /// Create an empty session around `handle` at the given starting volume.
    pub fn new(handle: H, volume: f32) -> Self {
        Self {
            playlist: Playlist::new(),
            transport: Transport::new(handle, volume),
            selected: 0,
            form: AddForm::default(),
            auto_advance: false,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn transport(&self) -> &Transport<H> {
        &self.transport
    }

    pub fn state(&self) -> &PlayerState {
        self.transport.state()
    }

    /// The active track, if it is still in the playlist.
    pub fn current_track(&self) -> Option<&Track> {
        self.state().current().and_then(|id| self.playlist.get(id))
    }

    pub fn is_active(&self, id: TrackId) -> bool {
        self.state().current() == Some(id)
    }

    pub fn add_track(&mut self, title: &str, source: &str) -> Option<TrackId> {
        self.playlist.add(title, source)
    }

    /// Add the track typed into the form. On success the form is cleared
    /// and closed; on a blank field it stays open as it was.
    pub fn submit_form(&mut self) -> Option<TrackId> {
        let id = self.playlist.add(&self.form.title, &self.form.source)?;
        self.form.cancel();
        Some(id)
    }

    /// Remove `id` from the playlist, stopping playback if it was active.
    pub fn remove_track(&mut self, id: TrackId) -> bool {
        let Some(track) = self.playlist.remove(id) else {
            return false;
        };
        if self.transport.remove_active_if(id) {
            info!(title = %track.title, "stopped playback of removed track");
        }
        self.clamp_selection();
        true
    }

    pub fn remove_selected(&mut self) -> bool {
        match self.selected_id() {
            Some(id) => self.remove_track(id),
            None => false,
        }
    }

    /// Start `id` from the beginning. No-op if it is not in the playlist.
    pub fn play(&mut self, id: TrackId) -> bool {
        let Some(track) = self.playlist.get(id) else {
            return false;
        };
        info!(title = %track.title, "play");
        self.transport.load_and_play(track);
        true
    }

    pub fn play_selected(&mut self) -> bool {
        match self.selected_id() {
            Some(id) => self.play(id),
            None => false,
        }
    }

    /// Play the track after the active one, wrapping. No-op without one.
    pub fn play_next(&mut self) -> bool {
        let next = self
            .state()
            .current()
            .and_then(|current| self.playlist.next(current));
        match next {
            Some(id) => self.play(id),
            None => false,
        }
    }

    /// Play the track before the active one, wrapping. No-op without one.
    pub fn play_prev(&mut self) -> bool {
        let prev = self
            .state()
            .current()
            .and_then(|current| self.playlist.prev(current));
        match prev {
            Some(id) => self.play(id),
            None => false,
        }
    }

    pub fn toggle(&mut self) {
        self.transport.toggle();
    }

    pub fn seek(&mut self, position: Duration) {
        self.transport.seek(position);
    }

    pub fn seek_by(&mut self, delta_secs: i64) {
        self.transport.seek_by(delta_secs);
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        self.transport.adjust_volume(delta);
    }

    /// Mirror a handle report into the state; advances on end of track
    /// when `auto_advance` is set.
    pub fn handle_event(&mut self, event: HandleEvent) -> EventEffect {
        let effect = self.transport.handle_event(event);
        if effect == EventEffect::TrackEnded && self.auto_advance {
            self.play_next();
        }
        effect
    }

    pub fn selected_id(&self) -> Option<TrackId> {
        self.playlist.tracks().get(self.selected).map(|t| t.id)
    }

    /// Move the cursor down, wrapping to the top.
    pub fn select_next(&mut self) {
        let len = self.playlist.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn select_prev(&mut self) {
        let len = self.playlist.len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.playlist.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.playlist.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
