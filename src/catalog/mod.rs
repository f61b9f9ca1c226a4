/// Data structures and traits for TVMaze catalog access.
///
/// This module provides structures to represent shows and cast members as
/// returned by the catalog API, the error type for failed fetches, and the
/// trait implemented by catalog providers.
mod cached;
mod tvmaze;
mod tvmaze_types;

pub use cached::{CachedCatalog, DEFAULT_TTL};
pub use tvmaze::TvMazeClient;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned by catalog operations.
///
/// Transport failures, non-2xx statuses and payload decode failures are
/// all folded into this one kind; callers only see a fixed message
/// identifying the operation that failed. The underlying cause is kept
/// as the error source for diagnostics.
#[derive(Debug, Error)]
#[error("{context}")]
pub struct FetchFailed {
    context: &'static str,
    #[source]
    source: reqwest::Error,
}

impl FetchFailed {
    pub(crate) fn new(context: &'static str, source: reqwest::Error) -> Self {
        Self { context, source }
    }
}

/// A show's aggregate rating. The average is null for unrated shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rating {
    /// Average rating, typically on a 0-10 scale
    pub average: Option<f64>,
}

/// Image URLs in the two resolutions the API serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// URL of the medium-resolution image
    pub medium: Option<String>,
    /// URL of the original-resolution image
    pub original: Option<String>,
}

/// The network a show airs on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    /// Network name, e.g. "HBO"
    pub name: String,
}

/// A show's airing schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Schedule {
    /// Air time, e.g. "21:00"
    #[serde(default)]
    pub time: String,
    /// Days of the week the show airs
    #[serde(default)]
    pub days: Vec<String>,
}

/// A single show from the catalog.
///
/// Immutable once fetched; identity is the integer id. Fields the API may
/// omit or null out are optional — responses are not validated beyond
/// their JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    /// Unique show id
    pub id: u32,
    /// The show's title
    pub name: String,
    /// Genre tags, non-unique across shows
    #[serde(default)]
    pub genres: Vec<String>,
    /// Aggregate rating (null average for unrated shows)
    #[serde(default)]
    pub rating: Option<Rating>,
    /// Poster images, when available
    #[serde(default)]
    pub image: Option<Image>,
    /// Summary text, may contain HTML markup
    #[serde(default)]
    pub summary: Option<String>,
    /// Airing status, e.g. "Running" or "Ended"
    #[serde(default)]
    pub status: String,
    /// Premiere date as reported by the API
    #[serde(default)]
    pub premiered: Option<String>,
    /// End date, for shows that have concluded
    #[serde(default)]
    pub ended: Option<String>,
    /// Broadcasting network
    #[serde(default)]
    pub network: Option<Network>,
    /// Airing schedule
    #[serde(default)]
    pub schedule: Option<Schedule>,
    /// The show's official site
    #[serde(default, rename = "officialSite")]
    pub official_site: Option<String>,
    /// TVMaze page for the show
    #[serde(default)]
    pub url: Option<String>,
}

impl Show {
    /// Returns the rating average, if the show has one.
    pub fn rating_average(&self) -> Option<f64> {
        self.rating.as_ref().and_then(|r| r.average)
    }

    /// Returns the summary with HTML markup stripped, for display.
    pub fn summary_text(&self) -> Option<String> {
        self.summary
            .as_ref()
            .map(|s| nanohtml2text::html2text(s).trim().to_string())
    }
}

/// A person appearing in a show's cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique person id
    pub id: u32,
    /// The person's name
    pub name: String,
    /// Headshot images, when available
    #[serde(default)]
    pub image: Option<Image>,
}

/// The character a cast member plays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique character id
    pub id: u32,
    /// The character's name
    pub name: String,
}

/// Pairs a person with the character they play in a show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    /// The actor
    pub person: Person,
    /// The role
    pub character: Character,
}

/// Trait for catalog providers that can fetch show data.
///
/// Implemented by the HTTP client and by the caching wrapper around it,
/// so callers can be written against either. Consumers are
/// single-threaded, so no `Send` bound is imposed on the futures.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    /// Fetches the full show catalog.
    async fn shows(&self) -> Result<Vec<Show>, FetchFailed>;

    /// Fetches a single show by id.
    async fn show(&self, id: u32) -> Result<Show, FetchFailed>;

    /// Fetches the cast of a show.
    async fn cast(&self, id: u32) -> Result<Vec<CastMember>, FetchFailed>;

    /// Searches shows by name, returning matches in relevance order.
    async fn search(&self, query: &str) -> Result<Vec<Show>, FetchFailed>;
}
