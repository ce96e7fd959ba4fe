use tracing::debug;

use super::model::{Track, TrackId};

/// Ordered collection of tracks with a monotonic id counter.
#[derive(Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    next_id: u64,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a track. Both fields are trimmed; if either ends up empty the
    /// playlist is left untouched and `None` is returned.
    pub fn add(&mut self, title: &str, source: &str) -> Option<TrackId> {
        let title = title.trim();
        let source = source.trim();
        if title.is_empty() || source.is_empty() {
            return None;
        }

        self.next_id += 1;
        let id = TrackId::new(self.next_id);
        self.tracks.push(Track {
            id,
            title: title.to_string(),
            source: source.to_string(),
        });
        debug!(%id, title, source, "track added");
        Some(id)
    }

    /// Remove the track with `id`, returning it if it was present.
    pub fn remove(&mut self, id: TrackId) -> Option<Track> {
        let pos = self.position(id)?;
        let removed = self.tracks.remove(pos);
        debug!(%id, "track removed");
        Some(removed)
    }

    /// Id of the track after `current`, wrapping to the first one.
    ///
    /// An unknown `current` behaves like a position before the first track.
    pub fn next(&self, current: TrackId) -> Option<TrackId> {
        if self.tracks.is_empty() {
            return None;
        }

        let next = match self.position(current) {
            Some(p) if p + 1 < self.tracks.len() => p + 1,
            Some(_) => 0,
            None => 0,
        };
        Some(self.tracks[next].id)
    }

    /// Id of the track before `current`, wrapping to the last one.
    pub fn prev(&self, current: TrackId) -> Option<TrackId> {
        if self.tracks.is_empty() {
            return None;
        }

        let prev = match self.position(current) {
            Some(p) if p > 0 => p - 1,
            _ => self.tracks.len() - 1,
        };
        Some(self.tracks[prev].id)
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
