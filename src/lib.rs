//! showinfo - Look up TV show information from TVMaze
//!
//! This library resolves a show by name, fetches its episode and cast lists
//! and answers queries about seasons, episodes, runtimes, cast and genres.

mod html;
mod metadata_retrieval;
mod show_information;

pub use html::strip_html;
pub use metadata_retrieval::{
    DEFAULT_BASE_URL, MetadataProvider, MetadataRetrievalError, TvMazeCastCredit, TvMazeEpisode,
    TvMazePerson, TvMazeProvider, TvMazeRating, TvMazeShow,
};
pub use show_information::{
    Episode, NO_CAST_LIST, NO_GENRE_LISTED, QueryError, ShowInformation, ShowInformationError,
    parse_index,
};

/// Progress event emitted while a show is being assembled
///
/// These events allow library users to track progress and provide feedback
/// while the documents are fetched.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Searching the show by its (lowercased) name
    Searching { query: String },

    /// The search resolved to a show
    ShowResolved { id: u64, name: String },

    /// Fetching the episode list
    FetchingEpisodes { id: u64 },

    /// Episode list fetched
    EpisodesFetched { count: usize },

    /// Fetching the cast list
    FetchingCast { id: u64 },

    /// Cast list fetched
    CastFetched { count: usize },
}
