//! Playback module: the controller that owns playback state.
//!
//! `PlaybackController` is the single authority over what is playing. It is
//! driven either by a simulated tick or by an `AudioOutput` that reports
//! position, metadata, end-of-track and errors back as events.

mod controller;
mod error;
mod output;
mod state;
mod ticker;

pub use controller::PlaybackController;
pub use error::{PlaybackFault, PlayerError};
pub use output::{AudioOutput, LoadToken, OutputEvent, OutputEventKind};
pub use state::PlaybackState;
pub use ticker::Ticker;
