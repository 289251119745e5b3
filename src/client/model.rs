use super::Category;
use crate::Result;
use serde::Serialize;
use tracing::warn;

/// The merged result list is capped at this many entries.
pub const MAX_RESULTS: usize = 20;

/// One parsed result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TorrentSummary {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub size: String,
    pub seeders: u32,
    pub leechers: u32,
    pub uploaded: String,
    pub url: String,
}

/// Merges the per-category outcomes into the final ranking. A failed
/// category is logged and contributes nothing; it never fails the merge.
/// The stable sort keeps category priority order between equal seeder
/// counts, and the list is truncated to [`MAX_RESULTS`].
pub fn merge_ranked(outcomes: Vec<(Category, Result<Vec<TorrentSummary>>)>) -> Vec<TorrentSummary> {
    let mut merged = vec![];
    for (category, outcome) in outcomes {
        match outcome {
            Ok(rows) => merged.extend(rows),
            Err(err) => {
                warn!(%category, err = ?err, "category search failed, skipping");
            }
        }
    }
    merged.sort_by(|a, b| b.seeders.cmp(&a.seeders));
    merged.truncate(MAX_RESULTS);
    merged
}
