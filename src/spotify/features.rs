use tracing::debug;

use crate::{
    error::ApiError,
    types::{AudioFeatures, AudioFeaturesResponse},
};

use super::CatalogClient;

/// Spotify accepts at most this many ids per audio-features request.
pub const FEATURES_BATCH_SIZE: usize = 100;

impl CatalogClient {
    /// Fetches audio features for `track_ids`, one request per 100 ids.
    ///
    /// Results keep the order of the input. Tracks the catalog has no
    /// analysis for come back as `null` and are dropped, so the output can be
    /// shorter than `track_ids`. An empty slice sends no request.
    ///
    /// # Arguments
    ///
    /// * `track_ids` - Spotify track ids, any number of them
    ///
    /// # Errors
    ///
    /// The first batch that fails ends the call with its error. Batches
    /// already fetched are discarded.
    ///
    /// # API Endpoint
    ///
    /// `GET /audio-features?ids={a},{b},...` with at most
    /// [`FEATURES_BATCH_SIZE`] ids per request.
    pub async fn get_audio_features(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<AudioFeatures>, ApiError> {
        let mut features = Vec::with_capacity(track_ids.len());

        for (batch, chunk) in track_ids.chunks(FEATURES_BATCH_SIZE).enumerate() {
            let url = format!("{}/audio-features?ids={}", self.api_url(), chunk.join(","));
            let response: AudioFeaturesResponse = self.get_json(&url).await?;
            debug!(batch, requested = chunk.len(), "fetched audio features batch");

            features.extend(response.audio_features.into_iter().flatten());
        }

        Ok(features)
    }
}
