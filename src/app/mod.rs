mod handler;
mod models;

pub use models::{MagnetResponse, SearchResponse};

use crate::client::NcoreClient;
use crate::Result;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(client: Arc<NcoreClient>) -> Router {
    Router::new()
        .route("/api/ncore/search", get(handler::search))
        .route("/api/ncore/magnet", get(handler::magnet))
        .route("/api/ncore/logout", post(handler::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(client)
}

/// Serves the API until ctrl-c, then logs the session out before returning.
pub async fn serve(client: Arc<NcoreClient>, port: u16) -> Result<()> {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!(%addr, "listening");

    axum::Server::bind(&addr)
        .serve(router(Arc::clone(&client)).into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .map_err(|e| crate::Error::Generic(e.to_string()))?;

    client.logout().await;
    Ok(())
}
