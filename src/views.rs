//! Derived views over a show collection
//!
//! Pure transforms recomputed by the presentation layer whenever the
//! underlying collection changes: grouping by genre and top-N ranking.
//! Both are total over any input, including the empty collection.

use std::collections::{BTreeMap, HashMap};

use crate::catalog::Show;

/// Default number of shows in the top ranking.
pub const DEFAULT_TOP_LIMIT: usize = 10;

/// Sort key: rating average with unrated shows below everything else.
fn rating_key(show: &Show) -> f64 {
    show.rating_average().unwrap_or(f64::NEG_INFINITY)
}

/// Sorts shows descending by rating average, unrated shows last. The
/// sort is stable, so ties keep their existing relative order.
fn sort_by_rating_desc(shows: &mut [Show]) {
    shows.sort_by(|a, b| rating_key(b).total_cmp(&rating_key(a)));
}

/// Groups shows into genre buckets, each sorted descending by rating.
///
/// A show listing N genres appears in N buckets; shows are read-only
/// value data, so this fan-out carries no ownership conflict. Within a
/// bucket, insertion order follows input order before the rating sort.
pub fn group_by_genre(shows: &[Show]) -> BTreeMap<String, Vec<Show>> {
    let mut grouped: BTreeMap<String, Vec<Show>> = BTreeMap::new();

    for show in shows {
        for genre in &show.genres {
            grouped.entry(genre.clone()).or_default().push(show.clone());
        }
    }

    for bucket in grouped.values_mut() {
        sort_by_rating_desc(bucket);
    }

    grouped
}

/// Returns the top `limit` shows by rating average.
///
/// Duplicate ids are collapsed before ranking: the last occurrence wins,
/// at the position of the first.
pub fn top_shows(shows: &[Show], limit: usize) -> Vec<Show> {
    let mut unique: Vec<Show> = Vec::new();
    let mut position: HashMap<u32, usize> = HashMap::new();

    for show in shows {
        match position.get(&show.id) {
            Some(&index) => unique[index] = show.clone(),
            None => {
                position.insert(show.id, unique.len());
                unique.push(show.clone());
            }
        }
    }

    sort_by_rating_desc(&mut unique);
    unique.truncate(limit);
    unique
}
