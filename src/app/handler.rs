use super::models::{MagnetQuery, MagnetResponse, SearchQuery, SearchResponse};
use crate::client::NcoreClient;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::error;

pub async fn search(
    State(client): State<Arc<NcoreClient>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let title = match query.title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => {
            return Json(SearchResponse::error("movie title is required")).into_response();
        }
    };

    match client.search(&title).await {
        Ok(torrents) => Json(SearchResponse::ok(torrents)).into_response(),
        Err(err) => {
            error!(err = ?err, %title, "search failed");
            Json(SearchResponse::error(err.to_string())).into_response()
        }
    }
}

pub async fn magnet(
    State(client): State<Arc<NcoreClient>>,
    Query(query): Query<MagnetQuery>,
) -> Response {
    let id = match query.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            return Json(MagnetResponse::error("torrent id is required")).into_response();
        }
    };

    match client.fetch_magnet(&id).await {
        Ok(descriptor) => Json(MagnetResponse::ok(descriptor.to_uri())).into_response(),
        Err(err) => {
            error!(err = ?err, %id, "magnet fetch failed");
            Json(MagnetResponse::error(err.to_string())).into_response()
        }
    }
}

/// Always succeeds from the caller's perspective.
pub async fn logout(State(client): State<Arc<NcoreClient>>) -> Response {
    client.logout().await;
    StatusCode::NO_CONTENT.into_response()
}
