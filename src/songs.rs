//! Song recommendations from a user's two favourite genres.

use crate::graph::{Catalog, Preferences};
use log::debug;
use serde::Serialize;

/// How many top-rated genres feed the song list.
pub const TOP_GENRES: usize = 2;

/// Outcome of a song recommendation.
///
/// `NoPreference` means every rating was zero. `Songs` with an empty list
/// means the chosen genres have no catalog entry; the two must be shown to
/// the user differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "songs", rename_all = "snake_case")]
pub enum SongRecommendation {
    NoPreference,
    Songs(Vec<String>),
}

impl SongRecommendation {
    /// The recommended songs; empty for [`SongRecommendation::NoPreference`].
    #[must_use]
    pub fn songs(&self) -> &[String] {
        match self {
            Self::NoPreference => &[],
            Self::Songs(songs) => songs,
        }
    }
}

/// The `n` highest-rated genres, best first.
///
/// Ties keep the order of `preferences`.
#[must_use]
pub fn top_genres(preferences: &Preferences, n: usize) -> Vec<&str> {
    let mut ranked: Vec<_> = preferences.iter().collect();
    ranked.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    ranked.into_iter().take(n).map(|(genre, _)| genre).collect()
}

/// Songs of the two highest-rated genres, in genre order.
///
/// Unknown genres are skipped and songs are not deduplicated across genres.
#[must_use]
pub fn recommend_songs(preferences: &Preferences, catalog: &Catalog) -> SongRecommendation {
    if preferences.is_all_zero() {
        debug!("All preferences are zero, nothing to recommend");
        return SongRecommendation::NoPreference;
    }

    let genres = top_genres(preferences, TOP_GENRES);
    debug!("Recommending songs from {genres:?}");

    SongRecommendation::Songs(
        genres
            .into_iter()
            .flat_map(|genre| catalog.songs(genre).iter().cloned())
            .collect(),
    )
}
