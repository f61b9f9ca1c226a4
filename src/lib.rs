//! showdeck - browse, rank and search the TVMaze show catalog
//!
//! This library provides the client side of a show catalog: a cached
//! TVMaze API client, pure derived views over the fetched collection
//! (genre grouping, top-N ranking), a debounced search state machine,
//! and the window computation for virtualized horizontal rows.

mod cache;
mod catalog;
mod search;
mod viewport;
mod views;

pub use catalog::{
    CachedCatalog, CastMember, CatalogApi, Character, DEFAULT_TTL, FetchFailed, Image, Network,
    Person, Rating, Schedule, Show, TvMazeClient,
};
pub use search::{
    DEBOUNCE_WINDOW, MIN_QUERY_LEN, SEARCH_ERROR_MESSAGE, SearchDebouncer, SearchState,
};
pub use viewport::{ITEM_WIDTH, OVERSCAN, VirtualWindow, visible_window};
pub use views::{DEFAULT_TOP_LIMIT, group_by_genre, top_shows};

use serde::Serialize;

/// A show together with its cast, loaded as one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowDetails {
    /// The show record
    pub show: Show,
    /// The show's cast in API order
    pub cast: Vec<CastMember>,
}

/// Loads a show and its cast concurrently.
///
/// Both requests are in flight at once; the load reports completion only
/// after both finish, and either failure fails the whole load.
pub async fn load_show_details<P>(catalog: &P, id: u32) -> Result<ShowDetails, FetchFailed>
where
    P: CatalogApi,
{
    let (show, cast) = tokio::join!(catalog.show(id), catalog.cast(id));
    Ok(ShowDetails {
        show: show?,
        cast: cast?,
    })
}
