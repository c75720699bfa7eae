use axum::http::StatusCode;
use serde_json::{Value, json};
use spotistat::{
    api::status_for,
    error::ApiError,
    report::aggregate,
    types::{AudioFeatures, Playlist, Track},
};

fn track(id: &str, name: &str, release: &str, explicit: bool, popularity: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": [{ "name": format!("Artist {id}") }],
        "explicit": explicit,
        "popularity": popularity,
        "album": {
            "release_date": release,
            "release_date_precision": "day",
            "images": [{ "url": format!("https://img.test/{id}.jpg") }]
        },
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{id}") }
    })
}

fn playlist(tracks: &[Value]) -> Playlist {
    let items: Vec<Value> = tracks.iter().map(|t| json!({ "track": t })).collect();
    serde_json::from_value(json!({
        "id": "pl",
        "name": "Road Trip",
        "owner": { "display_name": "someone" },
        "images": [{ "url": "https://img.test/pl.jpg" }],
        "external_urls": { "spotify": "https://open.spotify.com/playlist/pl" },
        "tracks": { "items": items, "next": null, "total": items.len() }
    }))
    .unwrap()
}

fn tracks_of(playlist: &Playlist) -> Vec<Track> {
    playlist
        .tracks
        .items
        .iter()
        .filter_map(|item| item.track.clone())
        .collect()
}

fn features(id: &str, energy: f64, key: i32, duration_ms: f64) -> AudioFeatures {
    AudioFeatures {
        id: id.to_string(),
        energy,
        key,
        mode: 1,
        duration_ms,
        ..Default::default()
    }
}

fn sample() -> (Playlist, Vec<Track>, Vec<AudioFeatures>) {
    let playlist = playlist(&[
        track("a", "Walking in the Rain", "1985-03-01", false, 40),
        track("b", "Rain (Remix)", "1991-07-20", true, 80),
        track("c", "Summer", "not a date", false, 60),
    ]);
    let tracks = tracks_of(&playlist);
    let features = vec![
        features("a", 0.2, 0, 200_000.0),
        features("b", 0.8, 7, 240_000.0),
        features("c", 0.5, -1, 100_000.0),
    ];
    (playlist, tracks, features)
}

#[test]
fn test_report_playlist_metadata() {
    let (playlist, tracks, features) = sample();
    let report = aggregate(&playlist, tracks, &features);

    assert_eq!(report.playlist.name, "Road Trip");
    assert_eq!(report.playlist.owner.as_deref(), Some("someone"));
    assert_eq!(report.playlist.track_count, 3);
    assert_eq!(
        report.playlist.cover_image.as_deref(),
        Some("https://img.test/pl.jpg")
    );
}

#[test]
fn test_report_numeric_groups() {
    let (playlist, tracks, features) = sample();
    let report = aggregate(&playlist, tracks, &features);
    let json = serde_json::to_value(&report).unwrap();
    let raw = &json["stats"]["raw"];

    assert_eq!(raw["popularity"]["min"]["value"], 40.0);
    assert_eq!(raw["popularity"]["max"]["value"], 80.0);
    assert_eq!(raw["popularity"]["avg"]["value"], 60.0);
    assert_eq!(raw["popularity"]["max"]["name"], "Artist b – Rain (Remix)");
    assert_eq!(
        raw["popularity"]["max"]["cover_image"],
        "https://img.test/b.jpg"
    );

    // fractions are presented as percentages
    assert_eq!(raw["energy"]["min"]["value"], 20.0);
    assert_eq!(raw["energy"]["max"]["value"], 80.0);
    assert_eq!(raw["energy"]["avg"]["value"], 50.0);

    assert_eq!(raw["duration"]["min"]["value"], "1m 40s");
    assert_eq!(raw["duration"]["max"]["value"], "4m 0s");

    // the unparseable date only drops out of the date dimensions
    assert_eq!(raw["release_date"]["min"]["value"], "01/03/1985");
    assert_eq!(raw["release_date"]["max"]["value"], "20/07/1991");
}

#[test]
fn test_report_breakdowns() {
    let (playlist, tracks, features) = sample();
    let report = aggregate(&playlist, tracks, &features);
    let b = &report.stats.breakdowns;

    assert_eq!(b.explicitness.keys, vec!["explicit", "non-explicit"]);
    assert_eq!(b.explicitness.values, vec![1, 2]);

    assert_eq!(b.release_years.keys, vec!["1985", "1991"]);

    assert_eq!(b.title_words.keys[0], "Rain");
    assert_eq!(b.title_words.values[0], 2);
    assert!(!b.title_words.keys.contains(&"In".to_string()));
    assert!(b.title_words.keys.contains(&"Remix".to_string()));

    assert_eq!(b.keys.len(), 12);
    assert_eq!(b.keys.keys[0], "C");
    assert_eq!(b.keys.values[0], 1);
    assert_eq!(b.keys.values[7], 1);
    assert_eq!(b.keys.values.iter().sum::<u64>(), 2);

    assert_eq!(b.modes.keys, vec!["major", "minor"]);
    assert_eq!(b.modes.values, vec![3, 0]);

    assert_eq!(b.top_artists.len(), 3);
}

#[test]
fn test_report_generation_from_average_release_year() {
    let (playlist, tracks, features) = sample();
    let report = aggregate(&playlist, tracks, &features);

    let generation = report.generation.expect("generation");
    assert_eq!(generation.year, 1988);
    assert_eq!(generation.name, "the Millennials");
}

#[test]
fn test_report_ignores_year_zero_release_dates() {
    let playlist = playlist(&[
        track("a", "Walking in the Rain", "1985-03-01", false, 40),
        track("b", "Rain (Remix)", "1991-07-20", true, 80),
        track("z", "Lost Tapes", "0000", false, 10),
    ]);
    let tracks = tracks_of(&playlist);
    let report = aggregate(&playlist, tracks, &[]);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["stats"]["raw"]["release_date"]["min"]["value"], "01/03/1985");
    assert!(!report.stats.breakdowns.release_years.keys.contains(&"0000".to_string()));
    assert_eq!(report.generation.expect("generation").year, 1988);
}

#[test]
fn test_report_without_tracks_omits_groups_and_generation() {
    let playlist = playlist(&[]);
    let report = aggregate(&playlist, Vec::new(), &[]);
    let json = serde_json::to_value(&report).unwrap();

    assert!(report.stats.raw.is_empty());
    assert!(json.get("generation").is_none());
    assert_eq!(json["stats"]["explicitness"]["values"], json!([0, 0]));
    assert_eq!(json["stats"]["title_words"]["keys"], json!([]));
}

#[test]
fn test_error_status_mapping() {
    assert_eq!(status_for(&ApiError::NotFound), StatusCode::NOT_FOUND);
    assert_eq!(
        status_for(&ApiError::RetriesExhausted {
            attempts: 10,
            last: Box::new(ApiError::RateLimited),
        }),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        status_for(&ApiError::Decode("bad".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
