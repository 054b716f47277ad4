use std::path::Path;
use std::time::Duration;

/// Identifies one `load` on an output. Events tagged with an older token
/// belong to a track that is no longer current.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadToken(pub u64);

impl LoadToken {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputEventKind {
    PositionChanged(Duration),
    /// The decoder learned the real length of the loaded source.
    MetadataReady(Duration),
    Ended,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputEvent {
    pub token: LoadToken,
    pub kind: OutputEventKind,
}

impl OutputEvent {
    pub fn new(token: LoadToken, kind: OutputEventKind) -> Self {
        Self { token, kind }
    }
}

/// A single audio output owned by the controller.
///
/// Every call is fire-and-forget. Success and failure come back later through
/// `try_recv_event`, never through a return value.
pub trait AudioOutput {
    fn load(&mut self, source: &Path, token: LoadToken);
    fn play(&mut self);
    fn pause(&mut self);
    fn set_position(&mut self, position: Duration);
    /// `level` is a multiplier in `0.0..=1.0`.
    fn set_volume_level(&mut self, level: f32);
    fn try_recv_event(&mut self) -> Option<OutputEvent>;
    /// Stop playback and release the device. Further calls are ignored.
    fn shutdown(&mut self);
}
