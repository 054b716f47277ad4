use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};
use tracing::{debug, warn};

use crate::player::{LoadToken, OutputEvent, OutputEventKind};

use super::sink::create_sink_at;
use super::types::{AudioCmd, Clock, OutputError};

/// The sink for the most recent successful `Load`.
struct Loaded {
    sink: Sink,
    source: PathBuf,
    clock: Clock,
}

fn notify(events: &Sender<OutputEvent>, token: LoadToken, kind: OutputEventKind) {
    // The controller may already be gone during shutdown.
    let _ = events.send(OutputEvent::new(token, kind));
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64, from: f32) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

/// Report position for a running sink, or `Ended` once it has drained.
fn report_progress(current: &mut Option<Loaded>, token: LoadToken, events: &Sender<OutputEvent>) {
    let Some(loaded) = current.as_mut() else {
        return;
    };
    if !loaded.clock.is_running() {
        return;
    }

    let now = Instant::now();
    if loaded.sink.empty() {
        loaded.clock.pause(now);
        debug!(source = %loaded.source.display(), "sink drained");
        notify(events, token, OutputEventKind::Ended);
    } else {
        notify(
            events,
            token,
            OutputEventKind::PositionChanged(loaded.clock.elapsed(now)),
        );
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<OutputEvent>,
    ready: Sender<Result<(), OutputError>>,
    position_interval: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => {
                let _ = ready.send(Ok(()));
                stream
            }
            Err(e) => {
                let _ = ready.send(Err(OutputError::NoDevice(e.to_string())));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped.
        stream.log_on_drop(false);

        let mut current: Option<Loaded> = None;
        let mut token = LoadToken::default();
        let mut volume: f32 = 1.0;

        loop {
            match rx.recv_timeout(position_interval) {
                Ok(AudioCmd::Load { source, token: t }) => {
                    if let Some(old) = current.take() {
                        old.sink.stop();
                    }
                    token = t;
                    match create_sink_at(&stream, &source, Duration::ZERO, volume) {
                        Ok(prepared) => {
                            debug!(source = %source.display(), "loaded");
                            if let Some(total) = prepared.total {
                                notify(&events, token, OutputEventKind::MetadataReady(total));
                            }
                            current = Some(Loaded {
                                sink: prepared.sink,
                                source,
                                clock: Clock::default(),
                            });
                        }
                        Err(e) => {
                            warn!(error = %e, "load failed");
                            notify(&events, token, OutputEventKind::Error(e.to_string()));
                        }
                    }
                }

                Ok(AudioCmd::Play) => match current.as_mut() {
                    Some(loaded) => {
                        loaded.sink.play();
                        loaded.clock.resume(Instant::now());
                    }
                    None => notify(
                        &events,
                        token,
                        OutputEventKind::Error("nothing loaded".to_string()),
                    ),
                },

                Ok(AudioCmd::Pause) => {
                    if let Some(loaded) = current.as_mut() {
                        loaded.sink.pause();
                        loaded.clock.pause(Instant::now());
                    }
                }

                Ok(AudioCmd::Seek(position)) => {
                    // Scrubbing: rebuild the sink and skip into the file.
                    let Some(mut loaded) = current.take() else {
                        continue;
                    };
                    let was_running = loaded.clock.is_running();
                    loaded.sink.stop();

                    match create_sink_at(&stream, &loaded.source, position, volume) {
                        Ok(prepared) => {
                            loaded.sink = prepared.sink;
                            loaded.clock = Clock::starting_at(position);
                            if was_running {
                                loaded.sink.play();
                                loaded.clock.resume(Instant::now());
                            }
                            current = Some(loaded);
                            notify(&events, token, OutputEventKind::PositionChanged(position));
                        }
                        Err(e) => {
                            warn!(error = %e, "seek failed");
                            notify(&events, token, OutputEventKind::Error(e.to_string()));
                        }
                    }
                }

                Ok(AudioCmd::SetVolume(level)) => {
                    volume = level.clamp(0.0, 1.0);
                    if let Some(loaded) = current.as_ref() {
                        loaded.sink.set_volume(volume);
                    }
                }

                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    if let Some(loaded) = current.take() {
                        if loaded.clock.is_running() {
                            fade_out_sink(&loaded.sink, fade_out_ms, volume);
                        }
                        loaded.sink.stop();
                    }
                    break;
                }

                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            report_progress(&mut current, token, &events);
        }

        debug!("audio thread exiting");
    })
}
