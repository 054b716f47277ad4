//! rodio-backed audio output.
//!
//! A dedicated thread owns the output stream and at most one sink. The
//! controller talks to it through `RodioOutput`, which forwards commands over
//! a channel and hands back the notifications the thread produces.

mod player;
mod sink;
mod thread;
mod types;

pub use player::RodioOutput;
pub use types::OutputError;
