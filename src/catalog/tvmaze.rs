/// TVMaze catalog client implementation.
use serde::de::DeserializeOwned;

use super::tvmaze_types::SearchResult;
use super::{CastMember, CatalogApi, FetchFailed, Show};

/// Client for the TVMaze API.
///
/// Issues unauthenticated GET requests against https://api.tvmaze.com.
/// Every failure mode of a request (transport error, non-2xx status,
/// undecodable payload) is reported as the same [`FetchFailed`] kind,
/// logged here for diagnostics only.
#[derive(Debug)]
pub struct TvMazeClient {
    client: reqwest::Client,
    base_url: String,
}

impl TvMazeClient {
    /// Creates a client against the public TVMaze API.
    pub fn new() -> Self {
        Self::with_base_url("https://api.tvmaze.com")
    }

    /// Creates a client against a custom base URL (used to point tests at
    /// a local mock server).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Sends a request and decodes the JSON body, folding every failure
    /// into a [`FetchFailed`] carrying the operation's fixed message.
    async fn dispatch<T>(
        &self,
        request: reqwest::RequestBuilder,
        context: &'static str,
    ) -> Result<T, FetchFailed>
    where
        T: DeserializeOwned,
    {
        let outcome = async {
            let response = request.send().await?.error_for_status()?;
            response.json::<T>().await
        }
        .await;

        outcome.map_err(|e| {
            tracing::warn!(operation = context, error = %e, "catalog request failed");
            FetchFailed::new(context, e)
        })
    }
}

impl Default for TvMazeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogApi for TvMazeClient {
    async fn shows(&self) -> Result<Vec<Show>, FetchFailed> {
        let url = format!("{}/shows", self.base_url);
        self.dispatch(self.client.get(&url), "failed to fetch shows")
            .await
    }

    async fn show(&self, id: u32) -> Result<Show, FetchFailed> {
        let url = format!("{}/shows/{}", self.base_url, id);
        self.dispatch(self.client.get(&url), "failed to fetch show details")
            .await
    }

    async fn cast(&self, id: u32) -> Result<Vec<CastMember>, FetchFailed> {
        let url = format!("{}/shows/{}/cast", self.base_url, id);
        self.dispatch(self.client.get(&url), "failed to fetch show cast")
            .await
    }

    async fn search(&self, query: &str) -> Result<Vec<Show>, FetchFailed> {
        let url = format!("{}/search/shows", self.base_url);
        let results: Vec<SearchResult> = self
            .dispatch(
                self.client.get(&url).query(&[("q", query)]),
                "failed to search shows",
            )
            .await?;

        // Unwrap the { score, show } records to a flat list, keeping the
        // API's relevance order.
        Ok(results.into_iter().map(|r| r.show).collect())
    }
}
