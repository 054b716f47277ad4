use std::time::Duration;

use crate::library::Track;

use super::error::PlaybackFault;

/// Snapshot of everything a consumer needs to render playback.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    /// Position of `current_track` in the track list, `None` when nothing is loaded.
    pub current_index: Option<usize>,
    pub is_playing: bool,
    pub current_time: Duration,
    pub duration: Duration,
    /// Percentage, 0-100.
    pub volume: u8,
    pub last_fault: Option<PlaybackFault>,
}

impl PlaybackState {
    pub fn new(volume: u8) -> Self {
        Self {
            current_track: None,
            current_index: None,
            is_playing: false,
            current_time: Duration::ZERO,
            duration: Duration::ZERO,
            volume: volume.min(100),
            last_fault: None,
        }
    }

    /// Elapsed share of the track in percent; 0 while the duration is unknown.
    pub fn progress_percent(&self) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        self.current_time.as_secs_f64() / self.duration.as_secs_f64() * 100.0
    }

    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.current_time)
    }

    pub(super) fn clear_track(&mut self) {
        self.current_track = None;
        self.current_index = None;
        self.is_playing = false;
        self.current_time = Duration::ZERO;
        self.duration = Duration::ZERO;
    }
}

#[cfg(test)]
impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(75)
    }
}
