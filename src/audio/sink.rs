//! Building `rodio` sinks from opened sources.

use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::PlayError;

use super::source::SourceReader;

/// Build a seekable decoder over `reader`.
///
/// The byte length lets symphonia seek backwards and estimate the duration
/// of streams without a Xing/VBRI header.
pub(super) fn decode(reader: SourceReader, locator: &str) -> Result<Decoder<SourceReader>, PlayError> {
    let decode_err = |reason: String| PlayError::Decode {
        locator: locator.to_string(),
        reason,
    };

    let byte_len = reader.byte_len().map_err(|e| decode_err(e.to_string()))?;
    Decoder::builder()
        .with_data(reader)
        .with_byte_len(byte_len)
        .with_seekable(true)
        .build()
        .map_err(|e| decode_err(e.to_string()))
}

/// Create a paused `Sink` playing `source` at `volume`.
///
/// Returns the sink and the decoder-reported duration, if any.
pub(super) fn create_sink(
    stream: &OutputStream,
    source: Decoder<SourceReader>,
    volume: f32,
) -> (Sink, Option<Duration>) {
    let duration = source.total_duration();
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    (sink, duration)
}
