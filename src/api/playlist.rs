use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info};

use crate::{error::ApiError, report};

use super::AppState;

/// `GET /api/v1/data/playlists/{id}`
pub async fn playlist_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match report::build_report(&state.client, &id).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => {
            let status = status_for(&e);
            if status == StatusCode::NOT_FOUND {
                info!(playlist = %id, "playlist not found");
            } else {
                error!(playlist = %id, error = %e, "failed to build playlist stats");
            }
            status.into_response()
        }
    }
}

pub fn status_for(err: &ApiError) -> StatusCode {
    if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
