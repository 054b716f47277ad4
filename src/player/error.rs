use thiserror::Error;

use crate::library::TrackId;

/// Operations the controller refuses outright. State is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("track {0} is not in the track list")]
    TrackNotFound(TrackId),
}

/// Playback failures the controller recovered from by stopping.
///
/// Recorded in `PlaybackState::last_fault`; the current track stays selected
/// so the user can retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlaybackFault {
    #[error("track has no audio source")]
    MissingSource,
    #[error("audio output error: {0}")]
    Output(String),
}
