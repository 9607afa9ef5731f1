/// Retrieval of raw TV show documents from a metadata service.
///
/// This module defines the provider trait used by the aggregation layer,
/// the errors a provider can report, and the TVMaze implementation.
mod tvmaze;
mod tvmaze_types;

pub use tvmaze::{DEFAULT_BASE_URL, TvMazeProvider};
pub use tvmaze_types::{TvMazeCastCredit, TvMazeEpisode, TvMazePerson, TvMazeRating, TvMazeShow};

use thiserror::Error;

/// Errors that can occur during metadata retrieval operations.
#[derive(Debug, Error)]
pub enum MetadataRetrievalError {
    /// Request to the metadata provider failed
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Failed to parse the provider's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The requested series was not found
    #[error("Series not found: {0}")]
    SeriesNotFound(String),
}

/// Trait for metadata providers that can fetch TV show documents.
///
/// The three methods correspond to the three documents a show is assembled
/// from. Implementors only transport and decode; presence checks and folding
/// happen in [`crate::ShowInformation`].
pub trait MetadataProvider {
    /// Resolves a show name to its search document.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataRetrievalError::SeriesNotFound`] if the service has
    /// no matching show.
    fn search_show(&self, query: &str) -> Result<TvMazeShow, MetadataRetrievalError>;

    /// Fetches the episode list of the show with the given identifier.
    fn fetch_episodes(&self, show_id: u64) -> Result<Vec<TvMazeEpisode>, MetadataRetrievalError>;

    /// Fetches the cast list of the show with the given identifier.
    fn fetch_cast(&self, show_id: u64) -> Result<Vec<TvMazeCastCredit>, MetadataRetrievalError>;
}
