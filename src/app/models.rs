use crate::client::TorrentSummary;
use serde::{Deserialize, Serialize};

/// Body of `GET /api/ncore/search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub torrents: Vec<TorrentSummary>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub fn ok(torrents: Vec<TorrentSummary>) -> Self {
        Self {
            success: true,
            count: torrents.len(),
            torrents,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            torrents: vec![],
            count: 0,
            error: Some(message.into()),
        }
    }
}

/// Body of `GET /api/ncore/magnet`.
#[derive(Debug, Serialize)]
pub struct MagnetResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MagnetResponse {
    pub fn ok(magnet: String) -> Self {
        Self {
            success: true,
            magnet: Some(magnet),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            magnet: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MagnetQuery {
    pub id: Option<String>,
}
