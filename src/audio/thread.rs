use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::config::AudioSettings;
use crate::error::PlayError;
use crate::transport::{HandleEvent, PlayRequest, SubscriptionId};

use super::sink::{create_sink, decode};
use super::source::{open_source, probe_duration};
use super::types::AudioCmd;

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<HandleEvent>,
    settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut s) => {
                // rodio logs to stderr when the stream is dropped, which
                // scribbles over the TUI.
                s.log_on_drop(false);
                Ok(s)
            }
            Err(e) => {
                error!(error = %e, "no audio output device");
                Err(PlayError::Output(e.to_string()))
            }
        };

        let tick = Duration::from_millis(settings.tick_ms.max(1));
        let mut deck = Deck::new(stream, events, settings);
        let mut last_tick = Instant::now();

        loop {
            match rx.recv_timeout(tick) {
                Ok(AudioCmd::Quit) => {
                    deck.clear();
                    break;
                }
                Ok(cmd) => deck.apply(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            // Commands can arrive faster than the tick; report on wall time.
            if last_tick.elapsed() >= tick {
                deck.tick();
                last_tick = Instant::now();
            }
        }
        debug!("audio thread exiting");
    })
}

/// Everything the audio thread knows about the bound source.
pub(super) struct Deck {
    stream: Result<OutputStream, PlayError>,
    events: Sender<HandleEvent>,
    settings: AudioSettings,

    bound: Option<String>,
    sink: Option<Sink>,
    load_error: Option<PlayError>,
    subscription: Option<SubscriptionId>,
    volume: f32,
    playing: bool,
    /// End of track was already reported for the current sink.
    ended: bool,
}

impl Deck {
    pub(super) fn new(
        stream: Result<OutputStream, PlayError>,
        events: Sender<HandleEvent>,
        settings: AudioSettings,
    ) -> Self {
        Self {
            stream,
            events,
            volume: settings.initial_volume,
            settings,
            bound: None,
            sink: None,
            load_error: None,
            subscription: None,
            playing: false,
            ended: false,
        }
    }

    pub(super) fn apply(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Bind(source) => {
                self.clear();
                self.bound = Some(source);
            }
            AudioCmd::Release => {
                self.clear();
                self.bound = None;
            }
            AudioCmd::Load => self.load(),
            AudioCmd::Play(request) => self.play(request),
            AudioCmd::Pause => {
                if let Some(s) = &self.sink {
                    s.pause();
                }
                self.playing = false;
            }
            AudioCmd::SetPosition(pos) => self.seek(pos),
            AudioCmd::SetVolume(v) => {
                self.volume = v;
                if let Some(s) = &self.sink {
                    s.set_volume(v);
                }
            }
            AudioCmd::Subscribe(id) => self.subscription = Some(id),
            AudioCmd::Unsubscribe(id) => {
                if self.subscription == Some(id) {
                    self.subscription = None;
                }
            }
            AudioCmd::Quit => self.clear(),
        }
    }

    /// Drop the current sink and any load outcome, keeping the binding.
    fn clear(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.load_error = None;
        self.playing = false;
        self.ended = false;
    }

    fn load(&mut self) {
        self.clear();

        let Some(source) = self.bound.clone() else {
            self.load_error = Some(PlayError::NoSource);
            return;
        };

        match self.open(&source) {
            Ok((sink, duration)) => {
                debug!(source, ?duration, "source loaded");
                self.sink = Some(sink);
                self.emit_subscribed(|subscription| HandleEvent::MetadataReady {
                    subscription,
                    duration,
                });
            }
            Err(e) => {
                warn!(source, error = %e, "failed to load source");
                self.load_error = Some(e);
            }
        }
    }

    fn open(&self, source: &str) -> Result<(Sink, Option<Duration>), PlayError> {
        // Source problems are reported ahead of a missing output device.
        let reader = open_source(source, &self.settings)?;
        let decoder = decode(reader, source)?;
        let stream = self.stream.as_ref().map_err(|e| e.clone())?;
        let (sink, duration) = create_sink(stream, decoder, self.volume);
        Ok((sink, duration.or_else(|| probe_duration(source))))
    }

    /// Reload a sink that ran dry so it can play again from the start.
    fn rewind_if_finished(&mut self) {
        if self.sink.as_ref().is_some_and(Sink::empty) {
            self.load();
        }
    }

    fn play(&mut self, request: PlayRequest) {
        if self.sink.is_none() && self.load_error.is_none() && self.bound.is_some() {
            self.load();
        } else {
            self.rewind_if_finished();
        }

        let outcome = match (&self.sink, &self.load_error) {
            (Some(sink), _) => {
                sink.play();
                self.playing = true;
                self.ended = false;
                Ok(())
            }
            (None, Some(e)) => Err(e.clone()),
            (None, None) => Err(PlayError::NoSource),
        };

        let _ = self
            .events
            .send(HandleEvent::PlayResolved { request, outcome });
    }

    fn seek(&mut self, pos: Duration) {
        self.rewind_if_finished();
        let Some(sink) = &self.sink else {
            return;
        };

        if let Err(e) = sink.try_seek(pos) {
            warn!(error = %e, ?pos, "seek failed");
            return;
        }
        self.ended = false;
        if self.playing {
            sink.play();
        }
    }

    /// Periodic status: position while playing, end of track once.
    fn tick(&mut self) {
        if !self.playing {
            return;
        }
        let Some(sink) = &self.sink else {
            return;
        };

        if sink.empty() {
            if !self.ended {
                self.ended = true;
                self.playing = false;
                self.emit_subscribed(|subscription| HandleEvent::Ended { subscription });
            }
        } else {
            let elapsed = sink.get_pos();
            self.emit_subscribed(|subscription| HandleEvent::Position {
                subscription,
                elapsed,
            });
        }
    }

    pub(super) fn emit_subscribed(&self, event: impl FnOnce(SubscriptionId) -> HandleEvent) {
        if let Some(id) = self.subscription {
            let _ = self.events.send(event(id));
        }
    }
}
