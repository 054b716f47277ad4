use super::duration::parse_duration;
use super::model::{Track, TrackId};

const CATALOG: &[(&str, &str, &str)] = &[
    ("Midnight Dreams", "Luna Wave", "3:45"),
    ("Electric Pulse", "Neon Lights", "4:12"),
    ("Ocean Breeze", "Coastal Sound", "3:28"),
    ("City Nights", "Urban Echo", "4:01"),
    ("Starlight", "Cosmic Vibes", "3:56"),
    ("Thunder Storm", "Nature Sounds", "5:23"),
    ("Golden Hour", "Sunset Collective", "3:33"),
    ("Digital Love", "Synth Masters", "4:18"),
    ("Mountain High", "Alpine Echoes", "4:45"),
    ("Neon Nights", "Retro Future", "3:52"),
];

/// The built-in catalog used when nothing is imported. Ids start at 1; no
/// entry has an audio source.
pub fn seed() -> Vec<Track> {
    CATALOG
        .iter()
        .zip(1u64..)
        .filter_map(|(&(title, artist, duration), id)| {
            let duration = parse_duration(duration).ok()?;
            Some(Track {
                id: TrackId(id),
                title: title.to_string(),
                artist: artist.to_string(),
                duration,
                source: None,
            })
        })
        .collect()
}
