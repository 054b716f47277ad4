use std::io::Write;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config;
use crate::library::{self, Playlists, TrackId};
use crate::player::{PlaybackController, PlaybackFault};

use super::commands::{ControlCmd, HELP};
use super::status::{playlist_row, status_line, track_row};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What was last printed, so the status line is only repeated on change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventLoopState {
    last_track: Option<TrackId>,
    last_playing: bool,
    last_volume: u8,
    last_fault: Option<PlaybackFault>,
}

impl EventLoopState {
    pub fn observe(controller: &PlaybackController) -> Self {
        let state = controller.state();
        Self {
            last_track: state.current_track.as_ref().map(|t| t.id),
            last_playing: state.is_playing,
            last_volume: state.volume,
            last_fault: state.last_fault.clone(),
        }
    }
}

/// Main loop: apply stdin commands, poll the controller, print changes.
/// Returns `Ok(())` when `quit` is entered or stdin closes.
pub fn run(
    settings: &config::Settings,
    controller: &mut PlaybackController,
    playlists: &mut Playlists,
    lines: &Receiver<String>,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState::observe(controller);
    writeln!(out, "{}", status_line(controller.state(), &settings.ui))?;

    loop {
        match lines.recv_timeout(POLL_INTERVAL) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    match line.parse::<ControlCmd>() {
                        Ok(cmd) => {
                            if handle_control_cmd(cmd, settings, controller, playlists, out)? {
                                return Ok(());
                            }
                        }
                        Err(e) => writeln!(out, "error: {e}")?,
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                info!("input closed");
                return Ok(());
            }
        }

        controller.poll(Instant::now());

        let observed = EventLoopState::observe(controller);
        if observed != state {
            writeln!(out, "{}", status_line(controller.state(), &settings.ui))?;
            state = observed;
        }
    }
}

/// Apply one command. Returns `Ok(true)` when the loop should end.
pub fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    controller: &mut PlaybackController,
    playlists: &mut Playlists,
    out: &mut impl Write,
) -> std::io::Result<bool> {
    debug!(?cmd, "command");
    match cmd {
        ControlCmd::Quit => return Ok(true),
        ControlCmd::Play(id) => {
            if let Err(e) = controller.select_track(id) {
                writeln!(out, "error: {e}")?;
            }
        }
        ControlCmd::Toggle => controller.toggle_play_pause(),
        ControlCmd::Next => controller.advance(),
        ControlCmd::Prev => controller.retreat(),
        ControlCmd::Seek(position) => controller.seek(position),
        ControlCmd::SeekBy(secs) => {
            let delta = Duration::from_secs(secs.unsigned_abs());
            let current = controller.current_time();
            let target = if secs >= 0 {
                current.saturating_add(delta)
            } else {
                current.saturating_sub(delta)
            };
            controller.seek(target);
        }
        ControlCmd::Volume(v) => controller.set_volume(v),
        ControlCmd::Add(path) => {
            let first = controller.tracks().next_free_id();
            let tracks = library::scan(&path, &settings.library, first);
            if tracks.is_empty() {
                writeln!(out, "no audio files found in {}", path.display())?;
            } else {
                writeln!(out, "added {} track(s)", tracks.len())?;
                for track in tracks {
                    controller.add_track(track);
                }
            }
        }
        ControlCmd::Remove(id) => {
            if !controller.remove_track(id) {
                writeln!(out, "no track {id}")?;
            }
        }
        ControlCmd::List => {
            let current = controller.current_index();
            for (i, track) in controller.tracks().iter().enumerate() {
                writeln!(out, "{}", track_row(track, current == Some(i)))?;
            }
        }
        ControlCmd::Search(query) => {
            let current = controller.current_track().map(|t| t.id);
            let hits = library::filter(controller.tracks().as_slice(), &query);
            if hits.is_empty() {
                writeln!(out, "no matches for {query:?}")?;
            }
            for track in hits {
                writeln!(out, "{}", track_row(track, current == Some(track.id)))?;
            }
        }
        ControlCmd::Playlists => {
            if playlists.is_empty() {
                writeln!(out, "no playlists")?;
            }
            for playlist in playlists.iter() {
                writeln!(out, "{}", playlist_row(playlist))?;
            }
        }
        ControlCmd::NewPlaylist { name, description } => {
            match playlists.create(&name, &description) {
                Ok(playlist) => writeln!(out, "created playlist {}", playlist.id)?,
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }
        ControlCmd::Status => {
            writeln!(out, "{}", status_line(controller.state(), &settings.ui))?;
        }
        ControlCmd::Help => writeln!(out, "{HELP}")?,
    }
    Ok(false)
}
