//! Turns a playlist id into the JSON payload served to visualisation
//! clients. Retrieval goes through [`CatalogClient`]; every number comes from
//! [`crate::stats`].

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    error::ApiError,
    spotify::CatalogClient,
    stats::{
        Generation, Group, GroupSummary, Mapping, OrderOptions, OrderedPairs, Sort, SortBy,
        Transform, count_words, generation_for_year, pitch,
    },
    types::{AudioFeatures, Playlist, Track},
    utils,
};

const TOP_WORDS: usize = 25;
const TOP_ARTISTS: usize = 10;

type FeatureStat = (&'static str, fn(&AudioFeatures) -> f64, Transform);

const FEATURE_STATS: [FeatureStat; 10] = [
    ("energy", |f: &AudioFeatures| f.energy, Transform::Scale(100.0)),
    ("danceability", |f: &AudioFeatures| f.danceability, Transform::Scale(100.0)),
    ("valence", |f: &AudioFeatures| f.valence, Transform::Scale(100.0)),
    ("acousticness", |f: &AudioFeatures| f.acousticness, Transform::Scale(100.0)),
    ("speechiness", |f: &AudioFeatures| f.speechiness, Transform::Scale(100.0)),
    ("instrumentalness", |f: &AudioFeatures| f.instrumentalness, Transform::Scale(100.0)),
    ("liveness", |f: &AudioFeatures| f.liveness, Transform::Scale(100.0)),
    ("tempo", |f: &AudioFeatures| f.tempo, Transform::Round),
    ("loudness", |f: &AudioFeatures| f.loudness, Transform::Round),
    ("duration", |f: &AudioFeatures| f.duration_ms, Transform::Duration),
];

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistMeta {
    pub id: String,
    pub name: String,
    pub owner: Option<String>,
    pub cover_image: Option<String>,
    pub spotify_url: Option<String>,
    pub track_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Breakdowns {
    pub explicitness: OrderedPairs,
    pub release_years: OrderedPairs,
    pub title_words: OrderedPairs,
    pub keys: OrderedPairs,
    pub modes: OrderedPairs,
    pub top_artists: OrderedPairs,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    /// Keyed by stat name. Groups without data are left out.
    pub raw: BTreeMap<&'static str, GroupSummary>,
    #[serde(flatten)]
    pub breakdowns: Breakdowns,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistReport {
    pub playlist: PlaylistMeta,
    pub stats: Stats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<Generation>,
}

/// Fetches `playlist_id` with its audio features and aggregates everything.
pub async fn build_report(
    client: &CatalogClient,
    playlist_id: &str,
) -> Result<PlaylistReport, ApiError> {
    let fetched = client.get_playlist(playlist_id).await?;
    info!(
        playlist = playlist_id,
        tracks = fetched.tracks.len(),
        pages = fetched.pages_fetched,
        "fetched playlist"
    );

    let track_ids: Vec<String> = fetched.tracks.iter().map(|t| t.id.clone()).collect();
    let features = client.get_audio_features(&track_ids).await?;

    Ok(aggregate(&fetched.playlist, fetched.tracks, &features))
}

/// Aggregates already retrieved data in one pass over tracks and one over
/// features.
pub fn aggregate(playlist: &Playlist, tracks: Vec<Track>, features: &[AudioFeatures]) -> PlaylistReport {
    let mut popularity = Group::new();
    let mut release_dates = Group::new();
    let mut explicitness = Mapping::with_defaults(["explicit", "non-explicit"]);
    let mut release_years = Mapping::new();
    let mut title_words = Mapping::new();
    let mut artists = Mapping::new();

    for track in &tracks {
        popularity.push(&track.id, track.popularity);

        match track.release_date() {
            Ok(date) => {
                release_dates.push(&track.id, utils::date_to_unix(date));
                release_years.push(date.format("%Y").to_string());
            }
            Err(e) => debug!(track = %track.id, error = %e, "skipping release date"),
        }

        explicitness.push(if track.explicit { "explicit" } else { "non-explicit" });
        count_words(&track.name, &mut title_words);
        for artist in &track.artists {
            artists.push(artist.name.clone());
        }
    }

    let mut feature_groups: Vec<Group> = FEATURE_STATS.iter().map(|_| Group::new()).collect();
    let mut keys = Mapping::with_defaults(pitch::PITCH_CLASSES);
    let mut modes = Mapping::with_defaults(pitch::MODES);

    for feature in features {
        for ((_, value, _), group) in FEATURE_STATS.iter().zip(feature_groups.iter_mut()) {
            group.push(&feature.id, value(feature));
        }
        if let Some(key) = pitch::pitch_class(feature.key) {
            keys.push(key);
        }
        if let Some(mode) = pitch::mode_name(feature.mode) {
            modes.push(mode);
        }
    }

    let track_count = tracks.len();
    let lookup: HashMap<String, Track> = tracks.into_iter().map(|t| (t.id.clone(), t)).collect();

    let mut raw = BTreeMap::new();
    let mut resolve = |name: &'static str, group: Group, transform: Transform| {
        match group.resolve(&lookup, transform) {
            Ok(summary) => {
                raw.insert(name, summary);
            }
            Err(e) => debug!(stat = name, error = %e, "omitting stat"),
        }
    };

    resolve("popularity", popularity, Transform::Round);
    resolve("release_date", release_dates, Transform::Date);
    for ((name, _, transform), group) in FEATURE_STATS.iter().zip(feature_groups) {
        resolve(*name, group, *transform);
    }

    let generation = raw.get("release_date").and_then(|summary| {
        let year = utils::unix_year(summary.mean())?;
        generation_for_year(year)
            .inspect_err(|e| info!(error = %e, "no generation for playlist"))
            .ok()
    });

    let breakdowns = Breakdowns {
        explicitness: explicitness.to_ordered(OrderOptions::sorted(Sort::ascending(SortBy::Label))),
        release_years: release_years.to_ordered(OrderOptions::sorted(Sort::ascending(SortBy::Label))),
        title_words: title_words
            .to_ordered(OrderOptions::sorted(Sort::descending(SortBy::Value)).truncate(TOP_WORDS)),
        keys: keys.to_ordered(OrderOptions::sorted(Sort::ascending(SortBy::PitchClass))),
        modes: modes.to_ordered(OrderOptions::sorted(Sort::ascending(SortBy::Label))),
        top_artists: artists
            .to_ordered(OrderOptions::sorted(Sort::descending(SortBy::Value)).truncate(TOP_ARTISTS)),
    };

    PlaylistReport {
        playlist: PlaylistMeta {
            id: playlist.id.clone(),
            name: playlist.name.clone(),
            owner: playlist.owner.display_name.clone(),
            cover_image: playlist.cover_image(),
            spotify_url: playlist.external_urls.spotify.clone(),
            track_count,
        },
        stats: Stats { raw, breakdowns },
        generation,
    }
}
