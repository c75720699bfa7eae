use tracing::{debug, warn};

use crate::{
    error::ApiError,
    types::{Page, Playlist, PlaylistItem, Track},
};

use super::CatalogClient;

/// Hard cap on pages followed per playlist, first page included
/// (about 3000 tracks at 100 per page).
pub const MAX_PAGES: usize = 30;

/// A playlist together with every track gathered across its pages.
#[derive(Debug, Clone)]
pub struct PlaylistTracks {
    pub playlist: Playlist,
    /// Tracks in playlist order. Null entries and local files are left out.
    pub tracks: Vec<Track>,
    pub pages_fetched: usize,
}

impl CatalogClient {
    /// Fetches a playlist and follows its `next` cursor until it runs out or
    /// [`MAX_PAGES`] pages have been read.
    ///
    /// Hitting the cap is not an error: whatever was gathered so far is
    /// returned and a warning is logged.
    ///
    /// # Arguments
    ///
    /// * `id` - Spotify playlist id, e.g. `37i9dQZF1DXcBWIGoYBM5M`
    ///
    /// # Returns
    ///
    /// A [`PlaylistTracks`] with the playlist metadata, its tracks in order
    /// and the number of pages read. Null items and local files without an
    /// id are skipped.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] when the playlist does not exist, on the first
    ///   page or any later one
    /// - [`ApiError::RetriesExhausted`] when a page keeps failing
    /// - [`ApiError::Decode`] when a page is not a valid playlist payload
    ///
    /// # API Endpoint
    ///
    /// `GET /playlists/{id}` for the first page, then the absolute `next` URL
    /// of each page verbatim.
    pub async fn get_playlist(&self, id: &str) -> Result<PlaylistTracks, ApiError> {
        let url = format!("{}/playlists/{}", self.api_url(), id);
        let mut playlist: Playlist = self.get_json(&url).await?;

        let mut tracks = Vec::with_capacity((playlist.tracks.total as usize).min(MAX_PAGES * 100));
        collect_tracks(&mut tracks, std::mem::take(&mut playlist.tracks.items));

        let mut next = playlist.tracks.next.take();
        let mut pages_fetched = 1;

        while let Some(cursor) = next {
            if pages_fetched >= MAX_PAGES {
                warn!(
                    playlist = id,
                    pages = pages_fetched,
                    "page cap reached, returning partial playlist"
                );
                break;
            }

            let page: Page<PlaylistItem> = self.get_json(&cursor).await?;
            pages_fetched += 1;
            debug!(playlist = id, page = pages_fetched, items = page.items.len(), "fetched track page");

            collect_tracks(&mut tracks, page.items);
            next = page.next;
        }

        Ok(PlaylistTracks {
            playlist,
            tracks,
            pages_fetched,
        })
    }
}

fn collect_tracks(tracks: &mut Vec<Track>, items: Vec<PlaylistItem>) {
    tracks.extend(
        items
            .into_iter()
            .filter_map(|item| item.track)
            .filter(|track| !track.id.is_empty()),
    );
}
