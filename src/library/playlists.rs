use std::fmt;

use thiserror::Error;

use super::model::TrackId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaylistId(pub u64);

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A named selection of catalog tracks.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub description: String,
    pub tracks: Vec<TrackId>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("playlist name must not be blank")]
    BlankName,
}

const SEEDED: &[(&str, &str, &[u64])] = &[
    ("Favorites", "Your most loved tracks", &[1, 3, 5, 7, 10]),
    ("Chill Vibes", "Perfect for relaxing", &[3, 5, 7]),
    ("Workout Mix", "High energy tracks", &[2, 4, 6, 8]),
    ("Road Trip", "Best driving songs", &[1, 2, 4, 9, 10]),
];

/// The user's playlists, in creation order.
#[derive(Debug, Clone, Default)]
pub struct Playlists {
    playlists: Vec<Playlist>,
}

impl Playlists {
    /// The four built-in playlists, ids 1-4, referring to catalog track ids.
    pub fn seed() -> Self {
        let playlists = SEEDED
            .iter()
            .zip(1u64..)
            .map(|(&(name, description, tracks), id)| Playlist {
                id: PlaylistId(id),
                name: name.to_string(),
                description: description.to_string(),
                tracks: tracks.iter().copied().map(TrackId).collect(),
            })
            .collect();
        Self { playlists }
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Playlist> {
        self.playlists.iter()
    }

    pub fn get(&self, id: PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Append an empty playlist. Name and description are trimmed; a blank
    /// name is rejected.
    pub fn create(&mut self, name: &str, description: &str) -> Result<&Playlist, PlaylistError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlaylistError::BlankName);
        }

        let id = self
            .playlists
            .iter()
            .map(|p| p.id.0)
            .max()
            .map_or(1, |max| max + 1);
        let index = self.playlists.len();
        self.playlists.push(Playlist {
            id: PlaylistId(id),
            name: name.to_string(),
            description: description.trim().to_string(),
            tracks: Vec::new(),
        });
        Ok(&self.playlists[index])
    }
}

impl<'a> IntoIterator for &'a Playlists {
    type Item = &'a Playlist;
    type IntoIter = std::slice::Iter<'a, Playlist>;

    fn into_iter(self) -> Self::IntoIter {
        self.playlists.iter()
    }
}
