use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Stable identity of a track within a `TrackList`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub duration: Duration,
    /// Where the audio lives. `None` for catalog entries without a file.
    pub source: Option<PathBuf>,
}

/// Ordered collection of tracks. Insertion order drives next/previous.
///
/// Ids are not de-duplicated on insert; lookups return the first match.
#[derive(Debug, Clone, Default)]
pub struct TrackList {
    tracks: Vec<Track>,
}

impl TrackList {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn as_slice(&self) -> &[Track] {
        &self.tracks
    }

    /// Position of the first track carrying `id`.
    pub fn position(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Remove every track carrying `id`, returning how many were dropped.
    pub fn remove(&mut self, id: TrackId) -> usize {
        let before = self.tracks.len();
        self.tracks.retain(|t| t.id != id);
        before - self.tracks.len()
    }

    /// One past the largest id in the list, for allocating ids to new tracks.
    pub fn next_free_id(&self) -> TrackId {
        let max = self.tracks.iter().map(|t| t.id.0).max().unwrap_or(0);
        TrackId(max + 1)
    }
}

impl<'a> IntoIterator for &'a TrackList {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.iter()
    }
}
