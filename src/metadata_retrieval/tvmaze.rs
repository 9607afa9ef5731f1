/// TVMaze metadata provider implementation.
use super::tvmaze_types::{TvMazeCastCredit, TvMazeEpisode, TvMazeShow};
use super::{MetadataProvider, MetadataRetrievalError};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Public TVMaze API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Metadata provider for the TVMaze API.
///
/// This provider fetches show information from https://api.tvmaze.com
/// using the singlesearch endpoint, followed by the episode and cast
/// endpoints of the resolved show.
pub struct TvMazeProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TvMazeProvider {
    /// Creates a new TVMaze provider instance.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a provider talking to a different TVMaze compatible endpoint.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/singlesearch/shows", self.base_url)
    }

    fn episodes_url(&self, show_id: u64) -> String {
        format!("{}/shows/{}/episodes", self.base_url, show_id)
    }

    fn cast_url(&self, show_id: u64) -> String {
        format!("{}/shows/{}/cast", self.base_url, show_id)
    }

    /// Issues a GET request and decodes the JSON body.
    ///
    /// `subject` names what was requested and ends up in the not-found error.
    fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        subject: &str,
    ) -> Result<T, MetadataRetrievalError> {
        debug!(url, ?query, "requesting TVMaze document");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| MetadataRetrievalError::RequestError(e.to_string()))?;

        check_status(response.status(), subject)?;

        response
            .json()
            .map_err(|e| MetadataRetrievalError::ParseError(e.to_string()))
    }
}

impl Default for TvMazeProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps an HTTP status to the provider error model.
///
/// 404 means the subject does not exist, every other non-success status is a
/// failed request.
fn check_status(status: StatusCode, subject: &str) -> Result<(), MetadataRetrievalError> {
    if status == StatusCode::NOT_FOUND {
        return Err(MetadataRetrievalError::SeriesNotFound(subject.to_string()));
    }

    if !status.is_success() {
        return Err(MetadataRetrievalError::RequestError(format!(
            "HTTP {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    Ok(())
}

impl MetadataProvider for TvMazeProvider {
    fn search_show(&self, query: &str) -> Result<TvMazeShow, MetadataRetrievalError> {
        self.get_json(&self.search_url(), &[("q", query)], query)
    }

    fn fetch_episodes(&self, show_id: u64) -> Result<Vec<TvMazeEpisode>, MetadataRetrievalError> {
        self.get_json(
            &self.episodes_url(show_id),
            &[],
            &format!("show #{}", show_id),
        )
    }

    fn fetch_cast(&self, show_id: u64) -> Result<Vec<TvMazeCastCredit>, MetadataRetrievalError> {
        self.get_json(&self.cast_url(show_id), &[], &format!("show #{}", show_id))
    }
}
