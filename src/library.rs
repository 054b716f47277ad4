//! Library module: tracks, the ordered track list and the ways tracks enter it.
//!
//! Tracks come either from the seeded catalog or from importing audio files
//! found on disk. Durations are kept as `Duration` everywhere and only turned
//! into `m:ss` text at the display boundary. Named playlists refer to tracks
//! by id.

mod catalog;
mod duration;
mod import;
mod model;
mod playlists;
mod search;

pub use catalog::seed;
pub use duration::{ParseDurationError, format_duration, parse_duration};
pub use import::scan;
pub use model::*;
pub use playlists::{Playlist, PlaylistError, PlaylistId, Playlists};
pub use search::filter;

#[cfg(test)]
mod tests;
