//! Importing audio files from disk into tracks.
//!
//! Accepts either a single file or a directory. Files are kept when their
//! extension is configured as audio; tag data fills in title and artist when
//! present, otherwise the file stem and the configured default artist are used.

use std::path::Path;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::duration::parse_duration;
use super::model::{Track, TrackId};

const FALLBACK_DURATION: Duration = Duration::from_secs(225);

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

struct Probed {
    title: String,
    artist: String,
    duration: Duration,
}

fn probe(path: &Path, settings: &LibrarySettings) -> Probed {
    let mut probed = Probed {
        title: path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string(),
        artist: settings.default_artist.clone(),
        duration: parse_duration(&settings.default_duration).unwrap_or(FALLBACK_DURATION),
    };

    let tagged = match lofty::read_from_path(path) {
        Ok(tagged) => tagged,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable tags, using defaults");
            return probed;
        }
    };

    let duration = tagged.properties().duration();
    if !duration.is_zero() {
        probed.duration = duration;
    }

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(v) = tag.title() {
            let v = v.trim();
            if !v.is_empty() {
                probed.title = v.to_string();
            }
        }
        if let Some(v) = tag.artist() {
            let v = v.trim();
            if !v.is_empty() {
                probed.artist = v.to_string();
            }
        }
    }

    probed
}

/// Import audio files under `path` (or `path` itself when it is a file).
///
/// Tracks are sorted by title, case-insensitively, and receive sequential ids
/// starting at `first_id`.
pub fn scan(path: &Path, settings: &LibrarySettings, first_id: TrackId) -> Vec<Track> {
    let mut walker = WalkDir::new(path).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut found: Vec<(std::path::PathBuf, Probed)> = Vec::new();
    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let file = entry.path();
        if file.is_file()
            && (settings.include_hidden || entry.depth() == 0 || !is_hidden(file))
            && is_audio_file(file, settings)
        {
            found.push((file.to_path_buf(), probe(file, settings)));
        }
    }

    found.sort_by(|a, b| a.1.title.to_lowercase().cmp(&b.1.title.to_lowercase()));

    found
        .into_iter()
        .zip(first_id.0..)
        .map(|((source, probed), id)| Track {
            id: TrackId(id),
            title: probed.title,
            artist: probed.artist,
            duration: probed.duration,
            source: Some(source),
        })
        .collect()
}
