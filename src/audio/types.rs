//! Commands, errors and elapsed-time bookkeeping for the audio thread.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::player::LoadToken;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("no audio output device: {0}")]
    NoDevice(String),
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("audio thread is gone")]
    Disconnected,
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Decode `source` into a paused sink, replacing the current one.
    Load { source: PathBuf, token: LoadToken },
    Play,
    Pause,
    /// Rebuild the sink starting at the given position.
    Seek(Duration),
    /// Volume multiplier in `0.0..=1.0`.
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Elapsed playback time of the loaded sink, tracked as an accumulated
/// offset plus the instant playback last resumed.
#[derive(Debug, Clone, Default)]
pub(crate) struct Clock {
    accumulated: Duration,
    started_at: Option<Instant>,
}

impl Clock {
    pub(crate) fn starting_at(offset: Duration) -> Self {
        Self {
            accumulated: offset,
            started_at: None,
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(crate) fn resume(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub(crate) fn pause(&mut self, now: Instant) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(st);
        }
    }

    pub(crate) fn elapsed(&self, now: Instant) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |st| now.saturating_duration_since(st))
    }
}
