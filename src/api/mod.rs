//! # API Module
//!
//! HTTP endpoints served by `spotistat serve`.
//!
//! ## Endpoints
//!
//! - [`health`] - `GET /health`, status and crate version for probes.
//! - [`playlist_stats`] - `GET /api/v1/data/playlists/{id}`, the aggregated
//!   statistics payload for one playlist.
//!
//! Failures carry no body. A playlist the catalog does not know answers
//! `404`; any other failure, including exhausted retries, answers `500`.

mod health;
mod playlist;

use crate::spotify::CatalogClient;

pub use health::health;
pub use playlist::{playlist_stats, status_for};

/// State shared by every request handler.
pub struct AppState {
    pub client: CatalogClient,
}

impl AppState {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }
}
