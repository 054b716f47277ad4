use std::time::{Duration, Instant};

use tracing::{debug, info, trace, warn};

use crate::config::PlaybackSettings;
use crate::library::{Track, TrackId, TrackList};

use super::error::{PlaybackFault, PlayerError};
use super::output::{AudioOutput, LoadToken, OutputEvent, OutputEventKind};
use super::state::PlaybackState;
use super::ticker::Ticker;

/// Where playback progress comes from.
enum Progress {
    /// No audio device: position advances one tick period at a time.
    Simulated(Ticker),
    /// A real output reports position, metadata, end and errors.
    Output(Box<dyn AudioOutput>),
}

/// Owns the track list and playback state and mediates every transition.
///
/// All methods run on the caller's thread. Output events are only applied
/// from `poll`, so state never changes behind the caller's back.
pub struct PlaybackController {
    tracks: TrackList,
    state: PlaybackState,
    progress: Progress,
    token: LoadToken,
    shut_down: bool,
}

impl PlaybackController {
    /// Controller whose progress is a simulated tick of `settings.tick_ms`.
    pub fn simulated(tracks: TrackList, settings: &PlaybackSettings) -> Self {
        let ticker = Ticker::new(Duration::from_millis(settings.tick_ms.max(1)));
        Self::with_progress(tracks, settings, Progress::Simulated(ticker))
    }

    /// Controller bound to a real output for its whole lifetime.
    pub fn with_output(
        tracks: TrackList,
        settings: &PlaybackSettings,
        output: Box<dyn AudioOutput>,
    ) -> Self {
        let mut controller = Self::with_progress(tracks, settings, Progress::Output(output));
        let level = volume_level(controller.state.volume);
        if let Progress::Output(output) = &mut controller.progress {
            output.set_volume_level(level);
        }
        controller
    }

    fn with_progress(tracks: TrackList, settings: &PlaybackSettings, progress: Progress) -> Self {
        Self {
            tracks,
            state: PlaybackState::new(settings.initial_volume),
            progress,
            token: LoadToken::default(),
            shut_down: false,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn tracks(&self) -> &TrackList {
        &self.tracks
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_track.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn current_time(&self) -> Duration {
        self.state.current_time
    }

    pub fn duration(&self) -> Duration {
        self.state.duration
    }

    pub fn volume(&self) -> u8 {
        self.state.volume
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self.progress, Progress::Simulated(_))
    }

    /// Make the track with `id` current and start playing it from the top.
    pub fn select_track(&mut self, id: TrackId) -> Result<(), PlayerError> {
        let index = self
            .tracks
            .position(id)
            .ok_or(PlayerError::TrackNotFound(id))?;
        self.select_index(index);
        Ok(())
    }

    fn select_index(&mut self, index: usize) {
        let Some(track) = self.tracks.get(index).cloned() else {
            return;
        };
        debug!(id = %track.id, index, title = %track.title, "select track");

        let source = track.source.clone();
        self.state.duration = track.duration;
        self.state.current_time = Duration::ZERO;
        self.state.current_index = Some(index);
        self.state.current_track = Some(track);
        self.state.is_playing = true;
        self.state.last_fault = None;

        let started = match &mut self.progress {
            Progress::Simulated(ticker) => {
                ticker.restart(Instant::now());
                true
            }
            Progress::Output(output) => {
                self.token = self.token.next();
                match source {
                    Some(source) => {
                        output.load(&source, self.token);
                        output.play();
                        true
                    }
                    None => {
                        // Silence whatever the previous track left playing.
                        output.pause();
                        false
                    }
                }
            }
        };

        if !started {
            self.fail(PlaybackFault::MissingSource);
        }
    }

    /// Flip between playing and paused. With nothing selected, start the
    /// first track; with an empty list, do nothing.
    pub fn toggle_play_pause(&mut self) {
        if self.state.current_track.is_none() {
            if !self.tracks.is_empty() {
                self.select_index(0);
            }
            return;
        }

        if self.state.is_playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    fn pause(&mut self) {
        debug!("pause");
        self.state.is_playing = false;
        match &mut self.progress {
            Progress::Simulated(ticker) => ticker.cancel(),
            Progress::Output(output) => output.pause(),
        }
    }

    fn resume(&mut self) {
        debug!("resume");
        let has_source = self
            .state
            .current_track
            .as_ref()
            .is_some_and(|t| t.source.is_some());

        let started = match &mut self.progress {
            Progress::Simulated(ticker) => {
                ticker.arm(Instant::now());
                true
            }
            Progress::Output(output) if has_source => {
                output.play();
                true
            }
            Progress::Output(_) => false,
        };

        if started {
            self.state.is_playing = true;
            self.state.last_fault = None;
        } else {
            self.fail(PlaybackFault::MissingSource);
        }
    }

    /// Next track, wrapping from the last to the first.
    pub fn advance(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let next = self.resolved_index().map_or(0, |i| (i + 1) % len);
        self.select_index(next);
    }

    /// Previous track, wrapping from the first to the last.
    pub fn retreat(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let prev = match self.resolved_index() {
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => 0,
        };
        self.select_index(prev);
    }

    /// Jump to `position` in the current track. Not clamped to the duration.
    pub fn seek(&mut self, position: Duration) {
        if self.state.current_track.is_none() {
            return;
        }
        debug!(position_ms = position.as_millis() as u64, "seek");
        self.state.current_time = position;
        if let Progress::Output(output) = &mut self.progress {
            output.set_position(position);
        }
    }

    /// Set the volume percentage; values above 100 are capped.
    pub fn set_volume(&mut self, percent: u8) {
        let volume = percent.min(100);
        self.state.volume = volume;
        if let Progress::Output(output) = &mut self.progress {
            output.set_volume_level(volume_level(volume));
        }
    }

    pub fn add_track(&mut self, track: Track) {
        debug!(id = %track.id, title = %track.title, "add track");
        self.tracks.push(track);
    }

    /// Drop every track with `id`. Removing the current track stops playback.
    ///
    /// Returns `false` when no track carried `id`.
    pub fn remove_track(&mut self, id: TrackId) -> bool {
        let removed = self.tracks.remove(id);
        if removed == 0 {
            return false;
        }
        debug!(%id, removed, "remove track");

        let was_current = self
            .state
            .current_track
            .as_ref()
            .is_some_and(|t| t.id == id);
        if was_current {
            self.stop();
        } else {
            self.state.current_index = self.resolved_index();
        }
        true
    }

    fn stop(&mut self) {
        debug!("stop");
        self.state.clear_track();
        // Anything the output still reports belongs to the removed track.
        self.token = self.token.next();
        match &mut self.progress {
            Progress::Simulated(ticker) => ticker.cancel(),
            Progress::Output(output) => output.pause(),
        }
    }

    /// Index of the current track, re-resolved by id when the cached index no
    /// longer points at it.
    fn resolved_index(&self) -> Option<usize> {
        let current = self.state.current_track.as_ref()?;
        match self.state.current_index {
            Some(i) if self.tracks.get(i).is_some_and(|t| t.id == current.id) => Some(i),
            _ => self.tracks.position(current.id),
        }
    }

    /// One simulated tick: advance by the tick period, moving on to the next
    /// track once the end is reached. Ignored when driven by an output.
    pub fn tick(&mut self) {
        let period = match &mut self.progress {
            Progress::Simulated(ticker) => {
                if !self.state.is_playing || self.state.current_track.is_none() {
                    ticker.cancel();
                    return;
                }
                ticker.period()
            }
            Progress::Output(_) => return,
        };

        // A seek far past the end can leave no room to add another period.
        match self.state.current_time.checked_add(period) {
            Some(next) if next < self.state.duration => self.state.current_time = next,
            _ => {
                trace!("track finished");
                self.advance();
            }
        }
    }

    /// Apply everything that happened up to `now`: due ticks in simulated
    /// mode, queued output events otherwise.
    pub fn poll(&mut self, now: Instant) {
        loop {
            let due = match &mut self.progress {
                Progress::Simulated(ticker) => ticker.take_due(now),
                Progress::Output(_) => false,
            };
            if !due {
                break;
            }
            self.tick();
        }

        loop {
            let event = match &mut self.progress {
                Progress::Output(output) => output.try_recv_event(),
                Progress::Simulated(_) => None,
            };
            let Some(event) = event else {
                break;
            };
            self.handle_output_event(event);
        }
    }

    fn handle_output_event(&mut self, event: OutputEvent) {
        if event.token != self.token {
            trace!(token = event.token.0, current = self.token.0, "stale output event");
            return;
        }

        match event.kind {
            OutputEventKind::PositionChanged(position) => self.state.current_time = position,
            OutputEventKind::MetadataReady(duration) => {
                debug!(duration_ms = duration.as_millis() as u64, "duration from output");
                self.state.duration = duration;
            }
            OutputEventKind::Ended => self.advance(),
            OutputEventKind::Error(details) => self.fail(PlaybackFault::Output(details)),
        }
    }

    fn fail(&mut self, fault: PlaybackFault) {
        warn!(%fault, "playback stopped");
        self.state.is_playing = false;
        self.state.last_fault = Some(fault);
    }

    /// Stop progress and release the output. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.state.is_playing = false;
        match &mut self.progress {
            Progress::Simulated(ticker) => ticker.cancel(),
            Progress::Output(output) => output.shutdown(),
        }
        info!("playback controller shut down");
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn volume_level(percent: u8) -> f32 {
    f32::from(percent) / 100.0
}
