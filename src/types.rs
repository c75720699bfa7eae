use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::{error::StatsError, utils};

/// Body returned by the client-credentials token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

/// Spotify returns `null` for missing image lists, so these stay optional.
fn first_image(images: &Option<Vec<Image>>) -> Option<String> {
    images
        .as_ref()
        .and_then(|imgs| imgs.first())
        .map(|img| img.url.clone())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// One page of a cursor-paginated collection.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner: Owner,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub tracks: Page<PlaylistItem>,
}

impl Playlist {
    pub fn cover_image(&self) -> Option<String> {
        first_image(&self.images)
    }
}

/// A playlist entry. `track` is null for removed or unavailable tracks.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub release_date_precision: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
}

impl Album {
    pub fn cover_image(&self) -> Option<String> {
        first_image(&self.images)
    }
}

/// Wire shape of a track. Converted into [`Track`] so the derived display
/// strings are built exactly once, at deserialisation time.
#[derive(Debug, Clone, Deserialize)]
struct TrackPayload {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    artists: Vec<Artist>,
    #[serde(default)]
    explicit: bool,
    #[serde(default)]
    popularity: f64,
    #[serde(default)]
    album: Album,
    #[serde(default)]
    external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(from = "TrackPayload")]
pub struct Track {
    /// Empty for local files, which the catalog cannot describe.
    pub id: String,
    pub name: String,
    pub artists: Vec<Artist>,
    pub explicit: bool,
    /// 0-100
    pub popularity: f64,
    pub album: Album,
    pub external_urls: ExternalUrls,
    artist_names: String,
    display_name: String,
}

impl From<TrackPayload> for Track {
    fn from(raw: TrackPayload) -> Self {
        let artist_names = raw
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let display_name = utils::track_display_name(&artist_names, &raw.name);

        Track {
            id: raw.id.unwrap_or_default(),
            name: raw.name,
            artists: raw.artists,
            explicit: raw.explicit,
            popularity: raw.popularity,
            album: raw.album,
            external_urls: raw.external_urls,
            artist_names,
            display_name,
        }
    }
}

impl Track {
    /// Comma separated artist names, e.g. `"Daft Punk, Pharrell Williams"`.
    pub fn artist_names(&self) -> &str {
        &self.artist_names
    }

    /// `"Artist – Title"` as shown next to min/max values.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn cover_image(&self) -> Option<String> {
        self.album.cover_image()
    }

    pub fn spotify_url(&self) -> Option<String> {
        self.external_urls.spotify.clone()
    }

    pub fn release_date(&self) -> Result<NaiveDate, StatsError> {
        match &self.album.release_date {
            Some(date) => {
                utils::parse_release_date(date, self.album.release_date_precision.as_deref())
            }
            None => Err(StatsError::Ungroupable(format!(
                "track {} has no release date",
                self.id
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesResponse {
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeatures>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioFeatures {
    pub id: String,
    #[serde(default)]
    pub danceability: f64,
    #[serde(default)]
    pub energy: f64,
    /// Pitch class 0-11, -1 when no key was detected.
    #[serde(default = "undetected_key")]
    pub key: i32,
    #[serde(default)]
    pub loudness: f64,
    /// 1 = major, 0 = minor
    #[serde(default)]
    pub mode: i32,
    #[serde(default)]
    pub speechiness: f64,
    #[serde(default)]
    pub acousticness: f64,
    #[serde(default)]
    pub instrumentalness: f64,
    #[serde(default)]
    pub liveness: f64,
    #[serde(default)]
    pub valence: f64,
    #[serde(default)]
    pub tempo: f64,
    #[serde(default)]
    pub duration_ms: f64,
}

fn undetected_key() -> i32 {
    -1
}

#[derive(Tabled)]
pub struct StatTableRow {
    pub stat: String,
    pub min: String,
    pub avg: String,
    pub max: String,
}

#[derive(Tabled)]
pub struct BreakdownTableRow {
    pub breakdown: String,
    pub top: String,
}
