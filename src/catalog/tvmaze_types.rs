/// TVMaze API response types for deserialization.
///
/// Wire-only wrappers that do not surface in the public data model.
use serde::Deserialize;

use super::Show;

/// A single result from the TVMaze search endpoint.
///
/// The endpoint pairs each show with a relevance score; the client
/// unwraps these to a flat list of shows, preserving order.
#[derive(Debug, Deserialize)]
pub(super) struct SearchResult {
    /// Relevance score assigned by the API (unused)
    #[serde(default)]
    #[allow(dead_code)]
    pub score: Option<f64>,
    /// The matched show
    pub show: Show,
}
