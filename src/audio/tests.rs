use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use rodio::Source;

use super::sink::decode;
use super::source::{Locator, SourceReader, open_source, probe_duration};
use super::thread::Deck;
use super::types::AudioCmd;
use crate::config::AudioSettings;
use crate::error::PlayError;
use crate::transport::{HandleEvent, PlayRequest, SubscriptionId};

/// Silent 16-bit mono PCM WAV, 8 kHz.
fn wav_bytes(secs: u32) -> Vec<u8> {
    let rate: u32 = 8000;
    let data_len = rate * secs * 2;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // channels
    out.extend_from_slice(&rate.to_le_bytes());
    out.extend_from_slice(&(rate * 2).to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(44 + data_len as usize, 0);
    out
}

fn deck_without_output() -> (Deck, Receiver<HandleEvent>) {
    let (tx, rx) = mpsc::channel();
    let deck = Deck::new(
        Err(PlayError::Output("no device".into())),
        tx,
        AudioSettings::default(),
    );
    (deck, rx)
}

fn resolved(request: u64, outcome: Result<(), PlayError>) -> HandleEvent {
    HandleEvent::PlayResolved {
        request: PlayRequest(request),
        outcome,
    }
}

#[test]
fn locator_recognizes_remote_and_local_sources() {
    assert_eq!(
        Locator::parse("https://freepd.com/music/Battle%20Ready.mp3"),
        Locator::Remote("https://freepd.com/music/Battle%20Ready.mp3".into())
    );
    assert_eq!(
        Locator::parse("HTTP://example.com/a.mp3"),
        Locator::Remote("HTTP://example.com/a.mp3".into())
    );
    assert_eq!(
        Locator::parse("file:///tmp/a.mp3"),
        Locator::File(PathBuf::from("/tmp/a.mp3"))
    );
    assert_eq!(
        Locator::parse("  music/b.mp3 "),
        Locator::File(PathBuf::from("music/b.mp3"))
    );
}

#[test]
fn suggested_title_uses_stem_or_last_segment() {
    assert_eq!(
        Locator::parse("/tmp/music/Song One.mp3").suggested_title(),
        Some("Song One".to_string())
    );
    assert_eq!(
        Locator::parse("https://freepd.com/music/Battle%20Ready.mp3?x=1").suggested_title(),
        Some("Battle Ready".to_string())
    );
    assert_eq!(Locator::parse("https://example.com/").suggested_title(), Some("example".to_string()));
}

#[test]
fn open_missing_file_reports_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.mp3");
    let source = missing.to_str().unwrap();

    let err = open_source(source, &AudioSettings::default()).err().unwrap();
    assert!(matches!(err, PlayError::Open { ref locator, .. } if locator == source));
}

#[test]
fn garbage_bytes_report_decode_error() {
    let reader = SourceReader::Memory(Cursor::new(b"definitely not audio".to_vec()));
    let err = decode(reader, "mem://garbage").err().unwrap();
    assert!(matches!(err, PlayError::Decode { .. }));
}

#[test]
fn source_reader_reads_and_seeks_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bytes.mp3");
    std::fs::write(&path, b"0123456789").unwrap();

    let mut reader = open_source(path.to_str().unwrap(), &AudioSettings::default()).unwrap();
    reader.seek(SeekFrom::Start(4)).unwrap();
    let mut rest = String::new();
    reader.read_to_string(&mut rest).unwrap();
    assert_eq!(rest, "456789");
}

#[test]
fn probe_duration_skips_remote_and_unreadable_sources() {
    assert_eq!(probe_duration("https://example.com/a.mp3"), None);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.mp3");
    std::fs::write(&path, b"not a real mp3").unwrap();
    assert_eq!(probe_duration(path.to_str().unwrap()), None);
}

#[test]
fn decoder_seeks_back_in_memory_source() {
    let reader = SourceReader::Memory(Cursor::new(wav_bytes(5)));
    let mut decoder = decode(reader, "mem://silence.wav").unwrap();

    decoder.try_seek(Duration::from_secs(3)).unwrap();
    decoder.try_seek(Duration::from_secs(1)).unwrap();
    decoder.try_seek(Duration::ZERO).unwrap();
}

#[test]
fn decoder_seeks_back_in_file_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("silence.wav");
    std::fs::write(&path, wav_bytes(4)).unwrap();
    let source = path.to_str().unwrap();

    let reader = open_source(source, &AudioSettings::default()).unwrap();
    assert_eq!(reader.byte_len().unwrap(), 44 + 8000 * 4 * 2);

    let mut decoder = decode(reader, source).unwrap();
    assert!(
        decoder
            .total_duration()
            .is_some_and(|d| d > Duration::from_secs(3) && d <= Duration::from_secs(4))
    );
    decoder.try_seek(Duration::from_secs(2)).unwrap();
    decoder.try_seek(Duration::from_millis(500)).unwrap();
}

#[test]
fn deck_play_with_nothing_bound_is_rejected() {
    let (mut deck, rx) = deck_without_output();

    deck.apply(AudioCmd::Play(PlayRequest(1)));
    deck.apply(AudioCmd::Bind("/tmp/whatever.mp3".into()));
    deck.apply(AudioCmd::Release);
    deck.apply(AudioCmd::Play(PlayRequest(2)));

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(
        events,
        [
            resolved(1, Err(PlayError::NoSource)),
            resolved(2, Err(PlayError::NoSource)),
        ]
    );
}

#[test]
fn deck_without_output_device_rejects_every_play() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("silence.wav");
    std::fs::write(&path, wav_bytes(1)).unwrap();

    let (mut deck, rx) = deck_without_output();
    deck.apply(AudioCmd::Subscribe(SubscriptionId(1)));
    deck.apply(AudioCmd::Bind(path.to_str().unwrap().into()));
    deck.apply(AudioCmd::Load);
    deck.apply(AudioCmd::Play(PlayRequest(1)));
    deck.apply(AudioCmd::Play(PlayRequest(2)));

    let no_device = PlayError::Output("no device".into());
    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(
        events,
        [resolved(1, Err(no_device.clone())), resolved(2, Err(no_device))]
    );
}

#[test]
fn deck_missing_file_rejects_play_without_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.mp3");
    let source = missing.to_str().unwrap();

    let (mut deck, rx) = deck_without_output();
    deck.apply(AudioCmd::Subscribe(SubscriptionId(1)));
    deck.apply(AudioCmd::Bind(source.into()));
    deck.apply(AudioCmd::Load);
    deck.apply(AudioCmd::Play(PlayRequest(3)));

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        HandleEvent::PlayResolved {
            request: PlayRequest(3),
            outcome: Err(PlayError::Open { locator, .. }),
        } if locator == source
    ));
}

#[test]
fn deck_unsubscribe_stops_tagged_events() {
    let (mut deck, rx) = deck_without_output();
    let ended = |subscription: SubscriptionId| HandleEvent::Ended { subscription };

    deck.apply(AudioCmd::Subscribe(SubscriptionId(1)));
    deck.emit_subscribed(ended);

    // Releasing some other subscription leaves the live one alone.
    deck.apply(AudioCmd::Unsubscribe(SubscriptionId(9)));
    deck.emit_subscribed(ended);

    deck.apply(AudioCmd::Unsubscribe(SubscriptionId(1)));
    deck.emit_subscribed(ended);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events, [ended(SubscriptionId(1)), ended(SubscriptionId(1))]);
}
