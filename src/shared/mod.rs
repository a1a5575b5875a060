pub mod fuzzy;
pub mod geo;
pub mod time;

pub use geo::*;
pub use time::*;

use rayon::prelude::*;
use std::cmp::Ordering;

const MIN_SCORE: f64 = 0.1;

pub trait Searchable {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    /// Extra text matched when the name alone does not hit.
    fn keywords(&self) -> &str {
        ""
    }
}

/// Ranked fuzzy search over any searchable collection, scored in parallel.
pub fn search<'a, T>(needle: &str, haystack: &'a [T]) -> Vec<&'a T>
where
    T: Send + Sync + Searchable,
{
    let normalized_needle = needle.trim().to_lowercase();
    if normalized_needle.is_empty() {
        return Vec::new();
    }
    let mut results: Vec<(&T, f64)> = haystack
        .par_iter()
        .filter_map(|hay| {
            let name = fuzzy::score(&normalized_needle, &hay.name().to_lowercase());
            let keywords = fuzzy::score(&normalized_needle, &hay.keywords().to_lowercase()) * 0.8;
            let score = name.max(keywords);
            if score > MIN_SCORE {
                Some((hay, score))
            } else {
                None
            }
        })
        .collect();

    results.par_sort_by(|(_, a): &(_, f64), (_, b): &(_, f64)| {
        b.partial_cmp(a).unwrap_or(Ordering::Equal)
    });
    results.into_iter().map(|(entity, _)| entity).collect()
}

/// Case-insensitive substring filter used by the directory menus.
pub fn contains_ignore_case(hay: &str, needle: &str) -> bool {
    needle.is_empty() || hay.to_lowercase().contains(&needle.to_lowercase())
}
