/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
/// Fields the service may omit are optional so that presence checks happen
/// in the aggregation layer rather than as decode failures.
use serde::Deserialize;

/// The response from the TVMaze singlesearch endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TvMazeShow {
    /// The TVMaze identifier of the show
    pub id: Option<u64>,
    /// The name of the TV show as listed by TVMaze
    pub name: Option<String>,
    /// Show summary in HTML format (may be null)
    pub summary: Option<String>,
    /// Rating block, containing the average user rating
    pub rating: Option<TvMazeRating>,
    /// Genres of the show; absent is distinct from an empty list
    pub genres: Option<Vec<String>>,
}

/// Rating block of a TVMaze show.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TvMazeRating {
    /// Average rating, null when the show has too few votes
    ///
    /// Kept as a raw JSON value so both numbers and numeric strings are
    /// accepted, and anything else is reported as malformed show data
    /// instead of failing the whole search document.
    pub average: Option<serde_json::Value>,
}

/// A single episode from the TVMaze episode list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TvMazeEpisode {
    /// Season number
    pub season: u32,
    /// Episode number within the season (null for some specials)
    pub number: Option<u32>,
    /// Episode title (may be null for episodes without a title)
    pub name: Option<String>,
    /// Runtime in minutes (may be null)
    pub runtime: Option<u32>,
    /// Episode summary in HTML format (may be null)
    pub summary: Option<String>,
}

/// A single credit from the TVMaze cast endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TvMazeCastCredit {
    /// The person credited
    pub person: TvMazePerson,
}

/// A person as referenced by a cast credit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TvMazePerson {
    /// Full name of the person
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_with_missing_fields() {
        let show: TvMazeShow = serde_json::from_str(r#"{"id": 82, "name": "Game of Thrones"}"#)
            .expect("valid show json");

        assert_eq!(show.id, Some(82));
        assert_eq!(show.summary, None);
        assert_eq!(show.rating, None);
        assert_eq!(show.genres, None);
    }

    #[test]
    fn test_show_with_null_rating_and_empty_genres() {
        let show: TvMazeShow =
            serde_json::from_str(r#"{"id": 1, "rating": {"average": null}, "genres": []}"#)
                .expect("valid show json");

        assert_eq!(show.rating, Some(TvMazeRating { average: None }));
        assert_eq!(show.genres, Some(Vec::new()));
    }

    #[test]
    fn test_show_with_numeric_rating() {
        let show: TvMazeShow = serde_json::from_str(r#"{"id": 1, "rating": {"average": 8.7}}"#)
            .expect("valid show json");

        let average = show.rating.and_then(|r| r.average).and_then(|v| v.as_f64());
        assert_eq!(average, Some(8.7));
    }

    #[test]
    fn test_episode_with_nulls() {
        let episode: TvMazeEpisode = serde_json::from_str(
            r#"{"season": 2, "number": null, "name": "Special", "runtime": null, "summary": null}"#,
        )
        .expect("valid episode json");

        assert_eq!(episode.season, 2);
        assert_eq!(episode.number, None);
        assert_eq!(episode.runtime, None);
        assert_eq!(episode.summary, None);
    }

    #[test]
    fn test_cast_credit_ignores_extra_fields() {
        let credits: Vec<TvMazeCastCredit> = serde_json::from_str(
            r#"[{"person": {"id": 7, "name": "Peter Dinklage"}, "character": {"name": "Tyrion"}}]"#,
        )
        .expect("valid cast json");

        assert_eq!(credits[0].person.name, "Peter Dinklage");
    }
}
