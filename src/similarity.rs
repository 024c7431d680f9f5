//! Taste similarity between users.
//!
//! Two preference vectors are compared only on the genres they share:
//!
//! ```text
//! score(a, b) = 1 - Σ |a[g] - b[g]| / |common|     for g in common(a, b)
//! ```
//!
//! Users sharing no genre are not comparable and never appear in a ranking.

use crate::graph::Preferences;
use log::trace;
use serde::Serialize;

/// One entry of a similarity ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarUser {
    pub name: String,
    pub score: f64,
}

/// Similarity of two preference vectors, `None` when they share no genre.
///
/// Symmetric in its arguments and within `[0, 1]`; exactly `1.0` when every
/// shared genre carries the same value.
#[must_use]
pub fn similarity_score(a: &Preferences, b: &Preferences) -> Option<f64> {
    let (count, total_difference) = a
        .iter()
        .filter_map(|(genre, left)| b.get(genre).map(|right| (left.value() - right.value()).abs()))
        .fold((0_usize, 0.0_f64), |(n, sum), diff| (n + 1, sum + diff));

    if count == 0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let mean_difference = total_difference / count as f64;
    Some(1.0 - mean_difference)
}

/// Ranks `existing` users by similarity to `new_prefs`, best first.
///
/// The user called `new_name` is skipped, as is every user sharing no genre
/// with `new_prefs`. Equal scores keep the order in which `existing` yields
/// the users.
pub fn rank_similar<'a, I>(new_name: &str, new_prefs: &Preferences, existing: I) -> Vec<SimilarUser>
where
    I: IntoIterator<Item = (&'a str, &'a Preferences)>,
{
    let mut ranked: Vec<SimilarUser> = existing
        .into_iter()
        .filter(|(name, _)| *name != new_name)
        .filter_map(|(name, prefs)| {
            let score = similarity_score(new_prefs, prefs);
            trace!("Similarity `{new_name}' ~ `{name}': {score:?}");
            score.map(|score| SimilarUser { name: name.to_string(), score })
        })
        .collect();

    // `sort_by` is stable, so ties stay in iteration order
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    ranked
}
