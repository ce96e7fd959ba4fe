//! Resolving a source locator into readable audio bytes.

use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::AudioFile;
use tracing::debug;
use ureq::Agent;

use crate::config::AudioSettings;
use crate::error::PlayError;

/// Where a track's audio lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    File(PathBuf),
    Remote(String),
}

impl Locator {
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        let lower = source.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote(source.to_string())
        } else if let Some(rest) = source.strip_prefix("file://") {
            Self::File(PathBuf::from(rest))
        } else {
            Self::File(PathBuf::from(source))
        }
    }

    /// A short human title for the source: file stem or last URL segment.
    pub fn suggested_title(&self) -> Option<String> {
        match self {
            Self::File(path) => path
                .file_stem()
                .and_then(|s| s.to_str())
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            Self::Remote(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                let segment = path.trim_end_matches('/').rsplit('/').next()?;
                let stem = Path::new(segment).file_stem()?.to_str()?;
                let stem = stem.replace("%20", " ");
                (!stem.trim().is_empty()).then_some(stem)
            }
        }
    }
}

/// Seekable audio bytes, either streamed from disk or buffered in memory.
pub(super) enum SourceReader {
    File(BufReader<File>),
    Memory(Cursor<Vec<u8>>),
}

impl SourceReader {
    /// Total length of the underlying bytes.
    pub(super) fn byte_len(&self) -> io::Result<u64> {
        match self {
            Self::File(r) => r.get_ref().metadata().map(|m| m.len()),
            Self::Memory(r) => Ok(r.get_ref().len() as u64),
        }
    }
}

impl Read for SourceReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(r) => r.read(buf),
            Self::Memory(r) => r.read(buf),
        }
    }
}

impl Seek for SourceReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Self::File(r) => r.seek(pos),
            Self::Memory(r) => r.seek(pos),
        }
    }
}

/// Open `source`, downloading it first when it is remote.
pub(super) fn open_source(source: &str, settings: &AudioSettings) -> Result<SourceReader, PlayError> {
    match Locator::parse(source) {
        Locator::File(path) => {
            let file = File::open(&path).map_err(|e| PlayError::Open {
                locator: source.to_string(),
                reason: e.to_string(),
            })?;
            Ok(SourceReader::File(BufReader::new(file)))
        }
        Locator::Remote(url) => fetch_remote(&url, settings).map(SourceReader::Memory),
    }
}

fn fetch_remote(url: &str, settings: &AudioSettings) -> Result<Cursor<Vec<u8>>, PlayError> {
    let fetch_err = |reason: String| PlayError::Fetch {
        locator: url.to_string(),
        reason,
    };

    debug!(url, "fetching remote source");
    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(settings.fetch_timeout_secs)))
        .build()
        .into();

    let response = agent.get(url).call().map_err(|e| fetch_err(e.to_string()))?;
    let mut body = response.into_body();
    let bytes = body
        .with_config()
        .limit(settings.max_remote_bytes)
        .read_to_vec()
        .map_err(|e| fetch_err(e.to_string()))?;

    debug!(url, bytes = bytes.len(), "remote source fetched");
    Ok(Cursor::new(bytes))
}

/// Read the duration from a local file's tags/stream info.
pub(super) fn probe_duration(source: &str) -> Option<Duration> {
    let Locator::File(path) = Locator::parse(source) else {
        return None;
    };
    let tagged = lofty::read_from_path(&path).ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}
