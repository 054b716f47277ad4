use super::model::Track;

/// Tracks whose title or artist contains `query`, ignoring case.
///
/// A blank query matches everything. Order is preserved.
pub fn filter<'a>(tracks: &'a [Track], query: &str) -> Vec<&'a Track> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return tracks.iter().collect();
    }

    tracks
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&query) || t.artist.to_lowercase().contains(&query)
        })
        .collect()
}
