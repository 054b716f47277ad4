//! Text rendering of playback state for stdout.

use crate::config::{TimeField, TrackDisplayField, UiSettings};
use crate::library::{Playlist, Track, format_duration};
use crate::player::PlaybackState;

/// Build the "now playing" track text according to `ui` settings.
fn now_playing_track_text(track: &Track, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in &ui.now_playing_track_fields {
        match f {
            TrackDisplayField::Id => parts.push(track.id.to_string()),
            TrackDisplayField::Title => {
                if !track.title.trim().is_empty() {
                    parts.push(track.title.trim().to_string());
                }
            }
            TrackDisplayField::Artist => {
                if !track.artist.trim().is_empty() {
                    parts.push(track.artist.trim().to_string());
                }
            }
            TrackDisplayField::Filename => {
                if let Some(stem) = track
                    .source
                    .as_deref()
                    .and_then(|p| p.file_stem())
                    .and_then(|s| s.to_str())
                {
                    parts.push(stem.to_string());
                }
            }
            TrackDisplayField::Path => {
                if let Some(p) = track.source.as_deref() {
                    parts.push(p.display().to_string());
                }
            }
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(&ui.now_playing_track_separator)
    }
}

fn now_playing_time_text(state: &PlaybackState, ui: &UiSettings) -> String {
    ui.now_playing_time_fields
        .iter()
        .map(|f| match f {
            TimeField::Elapsed => format_duration(state.current_time),
            TimeField::Total => format_duration(state.duration),
            TimeField::Remaining => format!("-{}", format_duration(state.remaining())),
            TimeField::Progress => format!("{:.0}%", state.progress_percent()),
        })
        .collect::<Vec<_>>()
        .join(&ui.now_playing_time_separator)
}

/// One-line summary: transport marker, track, times, volume and any fault.
pub fn status_line(state: &PlaybackState, ui: &UiSettings) -> String {
    let mut line = match &state.current_track {
        None => "[stopped] nothing selected".to_string(),
        Some(track) => {
            let marker = if state.is_playing { "playing" } else { "paused" };
            format!(
                "[{marker}] {}  {}",
                now_playing_track_text(track, ui),
                now_playing_time_text(state, ui)
            )
        }
    };

    line.push_str(&format!("  vol {}%", state.volume));
    if let Some(fault) = &state.last_fault {
        line.push_str(&format!("  ({fault})"));
    }
    line
}

/// Row for the track listing; the current track is marked with `>`.
pub fn track_row(track: &Track, is_current: bool) -> String {
    let marker = if is_current { '>' } else { ' ' };
    format!(
        "{marker} {:>3}  {} - {} ({})",
        track.id,
        track.title,
        track.artist,
        format_duration(track.duration)
    )
}

pub fn playlist_row(playlist: &Playlist) -> String {
    let mut row = format!(
        "  {:>3}  {} ({} tracks)",
        playlist.id,
        playlist.name,
        playlist.tracks.len()
    );
    if !playlist.description.is_empty() {
        row.push_str(" - ");
        row.push_str(&playlist.description);
    }
    row
}
