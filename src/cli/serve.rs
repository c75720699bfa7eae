use std::sync::Arc;

use crate::{api::AppState, config, error, info, server, spotify::CatalogClient};

pub async fn serve(address: Option<String>) {
    let client = match CatalogClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot set up Spotify client. Err: {}", e),
    };

    // fail fast on bad credentials instead of on the first request
    if let Err(e) = client.credentials().get().await {
        error!("Cannot authenticate with Spotify. Err: {}", e);
    }

    let addr = address.unwrap_or_else(config::server_addr);
    info!("Serving playlist stats on http://{}", addr);

    let state = Arc::new(AppState::new(client));
    if let Err(e) = server::start_api_server(state, &addr).await {
        error!("Server stopped. Err: {}", e);
    }
}
