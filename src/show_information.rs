//! Show aggregation and queries
//!
//! [`ShowInformation`] is assembled from the search, episode list and cast
//! list documents of a metadata provider and answers read-only queries over
//! the folded result. Seasons and episodes are addressed 1-based; index 0 is
//! never an episode.

use crate::ProgressEvent;
use crate::html::strip_html;
use crate::metadata_retrieval::{MetadataProvider, MetadataRetrievalError, TvMazeEpisode, TvMazeShow};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info};

/// Returned by [`ShowInformation::cast_as_string`] when no cast is listed
pub const NO_CAST_LIST: &str = "No Cast List";

/// Returned by [`ShowInformation::genres_as_string`] when no genre is listed
pub const NO_GENRE_LISTED: &str = "No Genre Listed";

/// Name used for episodes the service lists without a title
const UNKNOWN_EPISODE_NAME: &str = "Unknown";

/// Errors that abort building a [`ShowInformation`]
#[derive(Debug, Error)]
pub enum ShowInformationError {
    /// The search did not match any show
    #[error("TV Show could not be found: {0}")]
    NotFound(String),

    /// A required field is absent from an otherwise valid document
    #[error("Could not retrieve {0} from the show document")]
    MissingField(&'static str),

    /// A field is present but does not hold the expected kind of value
    #[error("Malformed show data: {0}")]
    MalformedData(String),

    /// Transport or decoding failure of the metadata provider
    #[error("Metadata retrieval error: {0}")]
    MetadataRetrieval(#[from] MetadataRetrievalError),
}

/// Recoverable errors of the query operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The argument is not a valid 1-based index
    #[error("Invalid input: {0}")]
    InvalidArgument(String),

    /// The show has no episode data at all
    #[error("No season data available")]
    NoData,

    /// The season does not exist
    #[error("Season {0} does not exist")]
    SeasonNotFound(u32),

    /// The season or episode index exceeds the available data
    #[error("Season {season} episode {episode} is out of range")]
    OutOfRange { season: u32, episode: u32 },

    /// No episode details are stored for the requested episode
    #[error("No details found for season {season} episode {episode}")]
    EpisodeNotFound { season: u32, episode: u32 },
}

/// Details of a single episode
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// The episode title
    pub name: String,
    /// Runtime in minutes, if known
    pub runtime: Option<u32>,
    /// Episode description with paragraph and bold tags removed
    pub description: Option<String>,
}

/// All information gathered about a single TV show
#[derive(Debug, Clone, PartialEq)]
pub struct ShowInformation {
    id: u64,
    query_name: String,
    name: Option<String>,
    description: Option<String>,
    rating: f64,
    genres: Option<Vec<String>>,
    cast: Vec<String>,
    /// Episodes per season, ordered by episode number
    seasons: BTreeMap<u32, Vec<Episode>>,
}

impl ShowInformation {
    /// Looks up a show and assembles its information without progress output
    ///
    /// See [`ShowInformation::fetch_with_progress`].
    pub fn fetch<P>(provider: &P, show_name: &str) -> Result<Self, ShowInformationError>
    where
        P: MetadataProvider + ?Sized,
    {
        Self::fetch_with_progress(provider, show_name, |_| {})
    }

    /// Looks up a show and assembles its information
    ///
    /// The show name is matched case-insensitively. The search, episode list
    /// and cast list documents are fetched in that order. Progress events are
    /// emitted through the provided callback.
    ///
    /// # Errors
    ///
    /// * [`ShowInformationError::NotFound`] if the search yields no document,
    ///   because no show matches or the search request failed
    /// * [`ShowInformationError::MissingField`] if the search result has no id
    /// * [`ShowInformationError::MalformedData`] if there is no numeric rating
    /// * [`ShowInformationError::MetadataRetrieval`] for undecodable documents
    ///   and failed episode or cast requests
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use showinfo::{ShowInformation, TvMazeProvider};
    ///
    /// let provider = TvMazeProvider::new();
    /// let show = ShowInformation::fetch(&provider, "Breaking Bad").unwrap();
    /// println!("{} seasons", show.season_count().unwrap());
    /// ```
    pub fn fetch_with_progress<P, F>(
        provider: &P,
        show_name: &str,
        mut progress_callback: F,
    ) -> Result<Self, ShowInformationError>
    where
        P: MetadataProvider + ?Sized,
        F: FnMut(ProgressEvent),
    {
        let query_name = show_name.to_lowercase();

        progress_callback(ProgressEvent::Searching {
            query: query_name.clone(),
        });

        // A search that yields no document, for whatever transport reason,
        // means the show could not be found.
        let document = provider.search_show(&query_name).map_err(|e| match e {
            MetadataRetrievalError::SeriesNotFound(_) | MetadataRetrievalError::RequestError(_) => {
                debug!(query = %query_name, error = %e, "show search yielded no document");
                ShowInformationError::NotFound(show_name.to_string())
            }
            other => other.into(),
        })?;

        let TvMazeShow {
            id,
            name,
            summary,
            rating,
            genres,
        } = document;

        let id = id.ok_or(ShowInformationError::MissingField("id"))?;
        let description = strip_html(summary.as_deref());

        let rating = rating
            .and_then(|rating| rating.average)
            .and_then(|average| rating_value(&average))
            .ok_or_else(|| {
                ShowInformationError::MalformedData(format!(
                    "show #{} has no numeric average rating",
                    id
                ))
            })?;

        info!(id, query = %query_name, "resolved show");
        progress_callback(ProgressEvent::ShowResolved {
            id,
            name: name.clone().unwrap_or_else(|| query_name.clone()),
        });

        progress_callback(ProgressEvent::FetchingEpisodes { id });
        let episodes = provider.fetch_episodes(id)?;
        progress_callback(ProgressEvent::EpisodesFetched {
            count: episodes.len(),
        });

        let seasons = fold_episodes(episodes);

        progress_callback(ProgressEvent::FetchingCast { id });
        let cast: Vec<String> = provider
            .fetch_cast(id)?
            .into_iter()
            .map(|credit| credit.person.name)
            .collect();
        progress_callback(ProgressEvent::CastFetched { count: cast.len() });

        Ok(Self {
            id,
            query_name,
            name,
            description,
            rating,
            genres,
            cast,
            seasons,
        })
    }

    /// The identifier of the show at the metadata service
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The lowercased name the show was looked up by
    pub fn query_name(&self) -> &str {
        &self.query_name
    }

    /// The name of the show as listed by the service, falling back to the
    /// query name
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.query_name)
    }

    /// Average user rating
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Genres, or `None` if the service did not list any
    pub fn genres(&self) -> Option<&[String]> {
        self.genres.as_deref()
    }

    /// Cast member names in billing order
    pub fn cast(&self) -> &[String] {
        &self.cast
    }

    /// Season numbers with the number of episodes in each, in season order
    pub fn season_episode_counts(&self) -> impl Iterator<Item = (u32, usize)> + '_ {
        self.seasons
            .iter()
            .map(|(season, episodes)| (*season, episodes.len()))
    }

    /// All episodes as `(season, episode, details)`, in season and episode order
    pub fn episodes(&self) -> impl Iterator<Item = (u32, u32, &Episode)> + '_ {
        self.seasons.iter().flat_map(|(season, episodes)| {
            (1u32..)
                .zip(episodes)
                .map(move |(number, episode)| (*season, number, episode))
        })
    }

    /// The highest season number
    pub fn season_count(&self) -> Result<u32, QueryError> {
        self.seasons
            .keys()
            .next_back()
            .copied()
            .ok_or(QueryError::NoData)
    }

    /// The number of episodes over all seasons
    pub fn total_episode_count(&self) -> usize {
        self.seasons.values().map(Vec::len).sum()
    }

    /// The number of episodes in `season`
    pub fn episode_count_in_season(&self, season: u32) -> Result<usize, QueryError> {
        check_index(season, "Season")?;

        self.seasons
            .get(&season)
            .map(Vec::len)
            .ok_or(QueryError::SeasonNotFound(season))
    }

    /// The name of an episode
    pub fn episode_name(&self, season: u32, episode: u32) -> Result<&str, QueryError> {
        self.episode(season, episode)
            .map(|details| details.name.as_str())
            .inspect_err(|e| debug!(season, episode, error = %e, "episode name lookup failed"))
    }

    /// Sum of all episode runtimes in minutes
    ///
    /// Episodes without a known runtime count as zero minutes.
    pub fn total_runtime_minutes(&self) -> u64 {
        self.seasons
            .values()
            .flatten()
            .map(|episode| u64::from(episode.runtime.unwrap_or(0)))
            .sum()
    }

    /// Runtime of an episode in minutes, `None` if the service lists none
    pub fn episode_runtime(&self, season: u32, episode: u32) -> Result<Option<u32>, QueryError> {
        self.episode_details(season, episode)
            .map(|details| details.runtime)
    }

    /// Description of an episode, `None` if the service lists none
    pub fn episode_description(
        &self,
        season: u32,
        episode: u32,
    ) -> Result<Option<&str>, QueryError> {
        self.episode_details(season, episode)
            .map(|details| details.description.as_deref())
    }

    /// The show description
    pub fn show_summary(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Cast members joined by commas
    pub fn cast_as_string(&self) -> String {
        join_or(&self.cast, NO_CAST_LIST)
    }

    /// Genres joined by commas
    pub fn genres_as_string(&self) -> String {
        join_or(self.genres.as_deref().unwrap_or_default(), NO_GENRE_LISTED)
    }

    fn episode(&self, season: u32, episode: u32) -> Result<&Episode, QueryError> {
        check_index(season, "Season")?;
        check_index(episode, "Episode")?;

        self.seasons
            .get(&season)
            .and_then(|episodes| episodes.get(episode as usize - 1))
            .ok_or(QueryError::OutOfRange { season, episode })
    }

    /// Like [`Self::episode`], reporting a missing episode as not found
    fn episode_details(&self, season: u32, episode: u32) -> Result<&Episode, QueryError> {
        self.episode(season, episode).map_err(|e| match e {
            QueryError::OutOfRange { season, episode } => {
                QueryError::EpisodeNotFound { season, episode }
            }
            other => other,
        })
    }
}

/// Parses a textual season or episode number
///
/// Numbers are 1-based, so `0` is rejected like any non-integer input.
///
/// # Examples
///
/// ```
/// use showinfo::{QueryError, parse_index};
///
/// assert_eq!(parse_index(" 3 "), Ok(3));
/// assert!(matches!(parse_index("two"), Err(QueryError::InvalidArgument(_))));
/// ```
pub fn parse_index(input: &str) -> Result<u32, QueryError> {
    let value = input.trim().parse::<u32>().map_err(|_| {
        QueryError::InvalidArgument(format!("'{}' is not a positive integer", input.trim()))
    })?;

    check_index(value, "Index")
}

fn check_index(value: u32, what: &str) -> Result<u32, QueryError> {
    if value == 0 {
        return Err(QueryError::InvalidArgument(format!(
            "{} numbers start at 1",
            what
        )));
    }

    Ok(value)
}

/// Reads a rating given either as a JSON number or as a numeric string
fn rating_value(average: &Value) -> Option<f64> {
    match average {
        Value::String(text) => text.trim().parse().ok(),
        other => other.as_f64(),
    }
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

/// Groups episodes by season and orders them by episode number
///
/// Grouping is explicit, so the service's document order does not matter.
/// Episodes without a number keep their document order behind the numbered
/// ones of the same season.
fn fold_episodes(episodes: Vec<TvMazeEpisode>) -> BTreeMap<u32, Vec<Episode>> {
    let mut grouped: BTreeMap<u32, Vec<TvMazeEpisode>> = BTreeMap::new();

    for episode in episodes {
        if episode.season == 0 {
            debug!(name = ?episode.name, "skipping episode without a season");
            continue;
        }

        grouped.entry(episode.season).or_default().push(episode);
    }

    grouped
        .into_iter()
        .map(|(season, mut episodes)| {
            episodes.sort_by_key(|e| e.number.unwrap_or(u32::MAX));
            (season, episodes.into_iter().map(convert_episode).collect())
        })
        .collect()
}

fn convert_episode(episode: TvMazeEpisode) -> Episode {
    Episode {
        name: episode
            .name
            .unwrap_or_else(|| UNKNOWN_EPISODE_NAME.to_string()),
        runtime: episode.runtime,
        description: strip_html(episode.summary.as_deref()),
    }
}
