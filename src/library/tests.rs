use super::*;
use std::time::Duration;

fn t(id: u64, title: &str, artist: &str) -> Track {
    Track {
        id: TrackId(id),
        title: title.into(),
        artist: artist.into(),
        duration: Duration::from_secs(180),
        source: None,
    }
}

#[test]
fn parse_duration_reads_minutes_and_seconds() {
    assert_eq!(parse_duration("3:45"), Ok(Duration::from_secs(225)));
    assert_eq!(parse_duration(" 0:07 "), Ok(Duration::from_secs(7)));
    assert_eq!(parse_duration("12:00"), Ok(Duration::from_secs(720)));
}

#[test]
fn parse_duration_rejects_overflowing_minutes() {
    assert_eq!(
        parse_duration("999999999999999999:00"),
        Err(ParseDurationError::Malformed("999999999999999999:00".into()))
    );
    // Largest value that still fits.
    assert_eq!(
        parse_duration("307445734561825860:15"),
        Ok(Duration::from_secs(u64::MAX))
    );
}

#[test]
fn parse_duration_rejects_malformed_input() {
    assert!(matches!(
        parse_duration("345"),
        Err(ParseDurationError::Malformed(_))
    ));
    assert!(matches!(
        parse_duration("a:bc"),
        Err(ParseDurationError::Malformed(_))
    ));
    assert!(matches!(
        parse_duration("3:75"),
        Err(ParseDurationError::SecondsOutOfRange(_))
    ));
}

#[test]
fn format_duration_pads_seconds_and_floors_fractions() {
    assert_eq!(format_duration(Duration::from_secs(225)), "3:45");
    assert_eq!(format_duration(Duration::from_secs(5)), "0:05");
    assert_eq!(format_duration(Duration::from_millis(61_900)), "1:01");
    assert_eq!(format_duration(Duration::ZERO), "0:00");
}

#[test]
fn seed_catalog_has_ten_tracks_with_sequential_ids() {
    let tracks = seed();
    assert_eq!(tracks.len(), 10);
    for (i, track) in tracks.iter().enumerate() {
        assert_eq!(track.id, TrackId(i as u64 + 1));
        assert!(track.source.is_none());
    }
    assert_eq!(tracks[0].title, "Midnight Dreams");
    assert_eq!(tracks[0].duration, Duration::from_secs(225));
    assert_eq!(tracks[5].duration, Duration::from_secs(5 * 60 + 23));
}

#[test]
fn track_list_remove_drops_every_match() {
    let mut list = TrackList::new(vec![t(1, "A", "x"), t(2, "B", "x"), t(1, "A again", "x")]);
    assert_eq!(list.remove(TrackId(1)), 2);
    assert_eq!(list.len(), 1);
    assert_eq!(list.remove(TrackId(42)), 0);
    assert_eq!(list.len(), 1);
}

#[test]
fn track_list_push_keeps_order_and_duplicates() {
    let mut list = TrackList::default();
    list.push(t(3, "C", "x"));
    list.push(t(1, "A", "x"));
    list.push(t(3, "C", "x"));
    let ids: Vec<u64> = list.iter().map(|t| t.id.0).collect();
    assert_eq!(ids, vec![3, 1, 3]);
    assert_eq!(list.position(TrackId(3)), Some(0));
    assert_eq!(list.position(TrackId(1)), Some(1));
}

#[test]
fn next_free_id_is_one_past_the_largest() {
    assert_eq!(TrackList::default().next_free_id(), TrackId(1));
    let list = TrackList::new(vec![t(4, "A", "x"), t(9, "B", "x"), t(2, "C", "x")]);
    assert_eq!(list.next_free_id(), TrackId(10));
}

#[test]
fn filter_matches_title_or_artist_case_insensitively() {
    let tracks = vec![
        t(1, "Midnight Dreams", "Luna Wave"),
        t(2, "Electric Pulse", "Neon Lights"),
        t(3, "Neon Nights", "Retro Future"),
    ];

    let ids = |q: &str| filter(&tracks, q).iter().map(|t| t.id.0).collect::<Vec<_>>();
    assert_eq!(ids("neon"), vec![2, 3]);
    assert_eq!(ids("WAVE"), vec![1]);
    assert_eq!(ids("   "), vec![1, 2, 3]);
    assert!(ids("polka").is_empty());
}

#[test]
fn seeded_playlists_refer_to_catalog_tracks() {
    let playlists = Playlists::seed();
    let names: Vec<&str> = playlists.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Favorites", "Chill Vibes", "Workout Mix", "Road Trip"]);

    let catalog = TrackList::new(seed());
    for playlist in &playlists {
        assert!(!playlist.tracks.is_empty());
        assert!(playlist.tracks.iter().all(|id| catalog.position(*id).is_some()));
    }
    assert_eq!(
        playlists.get(PlaylistId(2)).map(|p| p.description.as_str()),
        Some("Perfect for relaxing")
    );
}

#[test]
fn create_playlist_trims_and_appends() {
    let mut playlists = Playlists::seed();
    let created = playlists.create("  Late Night ", " quiet ones ").unwrap();
    assert_eq!(created.id, PlaylistId(5));
    assert_eq!(created.name, "Late Night");
    assert_eq!(created.description, "quiet ones");
    assert!(created.tracks.is_empty());
    assert_eq!(playlists.len(), 5);

    let mut empty = Playlists::default();
    assert_eq!(empty.create("First", "").map(|p| p.id), Ok(PlaylistId(1)));
}

#[test]
fn create_playlist_rejects_blank_name() {
    let mut playlists = Playlists::seed();
    assert_eq!(playlists.create("   ", "desc"), Err(PlaylistError::BlankName));
    assert_eq!(playlists.len(), 4);
}
