use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use tracing::{info, warn};

use crate::library::Playlists;

mod commands;
mod event_loop;
mod logging;
mod settings;
mod startup;
mod status;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback_reason) = settings::load_settings();
    logging::init_logging(&settings.logging.level);
    if let Some(reason) = fallback_reason {
        warn!("{reason}; using defaults");
    }

    let import_path = env::args_os().nth(1).map(PathBuf::from);
    let tracks = startup::initial_tracks(import_path.as_deref(), &settings.library);
    let mut controller = startup::build_controller(tracks, &settings);
    startup::apply_playback_defaults(&mut controller, &settings);

    let (line_tx, line_rx) = mpsc::channel::<String>();
    commands::spawn_stdin_reader(line_tx);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut playlists = Playlists::seed();
    let result = event_loop::run(
        &settings,
        &mut controller,
        &mut playlists,
        &line_rx,
        &mut out,
    );

    controller.shutdown();
    info!("bye");
    result
}
