use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::config::AudioSettings;
use crate::transport::{HandleEvent, PlayRequest, PlaybackHandle, SubscriptionId};

use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Start the audio thread. Status reports arrive on the returned receiver.
    pub fn spawn(settings: AudioSettings) -> (Self, Receiver<HandleEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<HandleEvent>();

        let join = spawn_audio_thread(rx, event_tx, settings);

        let player = Self {
            tx,
            join: Mutex::new(Some(join)),
        };
        (player, event_rx)
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!(cmd = ?e.0, "audio thread is gone, dropping command");
        }
    }

    /// Stop playback and wait for the audio thread to exit.
    pub fn quit(&self) {
        self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl PlaybackHandle for AudioPlayer {
    fn bind_source(&mut self, source: &str) {
        self.send(AudioCmd::Bind(source.to_string()));
    }

    fn release_source(&mut self) {
        self.send(AudioCmd::Release);
    }

    fn load(&mut self) {
        self.send(AudioCmd::Load);
    }

    fn play(&mut self, request: PlayRequest) {
        self.send(AudioCmd::Play(request));
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn set_position(&mut self, position: Duration) {
        self.send(AudioCmd::SetPosition(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(AudioCmd::SetVolume(volume));
    }

    fn subscribe(&mut self, subscription: SubscriptionId) {
        self.send(AudioCmd::Subscribe(subscription));
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) {
        self.send(AudioCmd::Unsubscribe(subscription));
    }
}
