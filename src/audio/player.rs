use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::AudioSettings;
use crate::player::{AudioOutput, LoadToken, OutputEvent};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, OutputError};

/// `AudioOutput` backed by a rodio sink on its own thread.
pub struct RodioOutput {
    tx: Sender<AudioCmd>,
    events: Receiver<OutputEvent>,
    join: Option<JoinHandle<()>>,
    quit_fade_out: Duration,
}

impl RodioOutput {
    /// Spawn the audio thread and wait until it has opened the default device.
    pub fn open(settings: &AudioSettings) -> Result<Self, OutputError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<OutputEvent>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), OutputError>>();

        let join = spawn_audio_thread(
            rx,
            events_tx,
            ready_tx,
            Duration::from_millis(settings.position_interval_ms.max(1)),
        );

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                let _ = join.join();
                return Err(e);
            }
            Err(_) => {
                let _ = join.join();
                return Err(OutputError::Disconnected);
            }
        }

        info!("audio output opened");
        Ok(Self {
            tx,
            events: events_rx,
            join: Some(join),
            quit_fade_out: Duration::from_millis(settings.quit_fade_out_ms),
        })
    }

    fn send(&self, cmd: AudioCmd) {
        if self.tx.send(cmd).is_err() {
            warn!("audio thread is not accepting commands");
        }
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, source: &Path, token: LoadToken) {
        self.send(AudioCmd::Load {
            source: source.to_path_buf(),
            token,
        });
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn set_position(&mut self, position: Duration) {
        self.send(AudioCmd::Seek(position));
    }

    fn set_volume_level(&mut self, level: f32) {
        self.send(AudioCmd::SetVolume(level));
    }

    fn try_recv_event(&mut self) -> Option<OutputEvent> {
        self.events.try_recv().ok()
    }

    fn shutdown(&mut self) {
        let Some(join) = self.join.take() else {
            return;
        };
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: self.quit_fade_out.as_millis() as u64,
        });
        let _ = join.join();
        info!("audio output closed");
    }
}

impl Drop for RodioOutput {
    fn drop(&mut self) {
        self.shutdown();
    }
}
