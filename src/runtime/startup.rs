use std::path::Path;

use tracing::{info, warn};

use crate::audio::RodioOutput;
use crate::config::{self, BackendSetting};
use crate::library::{self, TrackId, TrackList};
use crate::player::PlaybackController;

/// Tracks imported from `import_path`, or the seeded catalog when no path is
/// given or nothing playable was found there.
pub fn initial_tracks(import_path: Option<&Path>, settings: &config::LibrarySettings) -> TrackList {
    if let Some(path) = import_path {
        let tracks = library::scan(path, settings, TrackId(1));
        if !tracks.is_empty() {
            info!(count = tracks.len(), path = %path.display(), "imported tracks");
            return TrackList::new(tracks);
        }
        warn!(path = %path.display(), "no audio files found, using the built-in catalog");
    }
    TrackList::new(library::seed())
}

/// Whether the controller should drive a real device for these tracks.
pub fn wants_audio_output(backend: BackendSetting, tracks: &TrackList) -> bool {
    match backend {
        BackendSetting::Rodio => true,
        BackendSetting::Simulated => false,
        BackendSetting::Auto => tracks.iter().any(|t| t.source.is_some()),
    }
}

pub fn build_controller(tracks: TrackList, settings: &config::Settings) -> PlaybackController {
    if wants_audio_output(settings.audio.backend, &tracks) {
        match RodioOutput::open(&settings.audio) {
            Ok(output) => {
                return PlaybackController::with_output(tracks, &settings.playback, Box::new(output));
            }
            Err(e) => warn!(error = %e, "audio output unavailable, simulating playback"),
        }
    }
    PlaybackController::simulated(tracks, &settings.playback)
}

pub fn apply_playback_defaults(controller: &mut PlaybackController, settings: &config::Settings) {
    info!(
        tracks = controller.tracks().len(),
        simulated = controller.is_simulated(),
        "playback ready"
    );
    if settings.playback.autoplay {
        controller.toggle_play_pause();
    }
}
