//! # Recommendation Service
//!
//! Runs one "new user" submission through the whole pipeline:
//!
//! 1. validate the name and preferences (nothing is stored on failure)
//! 2. add the user to the graph
//! 3. musical path from the new user to the configured reference user
//! 4. identical-taste groups over every user
//! 5. similarity ranking against every other user
//! 6. song recommendations from the submitted preferences
//!
//! and hands back a single [`Recommendation`] for display.

use crate::config::RecommenderConfig;
use crate::error::Result;
use crate::graph::{parse_preferences, GraphStore, Preferences};
use crate::groups::find_identical_groups;
use crate::path::{shortest_path, MusicalPath};
use crate::similarity::{rank_similar, SimilarUser};
use crate::songs::{recommend_songs, SongRecommendation};
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt::Write as _;

/// Result of the path step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    Found(MusicalPath),
    /// Both users exist but no chain of shared taste connects them
    NotFound,
    /// The reference user is not in the graph, so no search was run
    NotApplicable,
}

impl PathOutcome {
    #[must_use]
    pub fn path(&self) -> Option<&MusicalPath> {
        match self {
            Self::Found(path) => Some(path),
            Self::NotFound | Self::NotApplicable => None,
        }
    }
}

/// Everything computed for one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub user: String,
    pub reference_user: String,
    pub path: PathOutcome,
    pub groups: Vec<Vec<String>>,
    pub similar_users: Vec<SimilarUser>,
    pub songs: SongRecommendation,
}

impl Recommendation {
    /// Human-readable report of every section.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let reference = &self.reference_user;

        // Writing into a String cannot fail
        match &self.path {
            PathOutcome::Found(path) => {
                let _ = writeln!(out, "Path to {reference}: {}", path.nodes.join(" → "));
                let _ = writeln!(out, "Distance: {:.2}", path.cost);
            }
            PathOutcome::NotFound => {
                let _ = writeln!(out, "No path to {reference}");
            }
            PathOutcome::NotApplicable => {
                let _ = writeln!(out, "Reference user {reference} not found, path skipped");
            }
        }
        out.push('\n');

        if self.groups.is_empty() {
            out.push_str("No groups with identical taste.\n");
        } else {
            out.push_str("Groups with identical taste:\n");
            for (i, group) in self.groups.iter().enumerate() {
                let _ = writeln!(out, "  Group {}: {}", i + 1, group.join(", "));
            }
        }

        out.push_str("\nSimilar users:\n");
        if self.similar_users.is_empty() {
            out.push_str("  (no user shares a genre with you)\n");
        }
        for similar in &self.similar_users {
            let _ = writeln!(out, "- {} (Similarity: {:.2})", similar.name, similar.score);
        }

        out.push_str("\nRecommended songs:\n");
        match &self.songs {
            SongRecommendation::NoPreference => {
                out.push_str("  No recommendations (all preferences are 0)\n");
            }
            SongRecommendation::Songs(songs) if songs.is_empty() => {
                out.push_str("  No songs found for your top genres\n");
            }
            SongRecommendation::Songs(songs) => {
                for song in songs {
                    let _ = writeln!(out, "- {song}");
                }
            }
        }

        out
    }
}

/// Owns the graph and runs submissions against it.
///
/// All mutation goes through `&mut self`, so a submission and the queries
/// that follow it always see the same graph.
#[derive(Debug, Clone)]
pub struct RecommendationService {
    store: GraphStore,
    config: RecommenderConfig,
}

impl RecommendationService {
    #[must_use]
    pub fn new(store: GraphStore, config: RecommenderConfig) -> Self {
        Self { store, config }
    }

    #[must_use]
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    #[must_use]
    pub fn into_store(self) -> GraphStore {
        self.store
    }

    /// Adds `name` with `preferences` and computes every recommendation.
    ///
    /// `preferences` may contain zero ratings; they are dropped from the
    /// graph but still take part in similarity and song selection.
    ///
    /// # Errors
    ///
    /// Any validation error from [`GraphStore::add_user`]; the graph is left
    /// untouched in that case.
    pub fn submit(&mut self, name: &str, preferences: &Preferences) -> Result<Recommendation> {
        self.store.add_user(name, preferences)?;
        info!("Computing recommendations for `{name}'");

        let reference = self.config.reference_user.as_str();
        let path = if self.store.contains_user(reference) {
            shortest_path(&self.store, name, reference).map_or(PathOutcome::NotFound, PathOutcome::Found)
        } else {
            warn!("Reference user `{reference}' is not in the graph, skipping path");
            PathOutcome::NotApplicable
        };
        debug!("Path step: {path:?}");

        let groups = find_identical_groups(&self.store);
        debug!("Found {} identical-taste group(s)", groups.len());

        let similar_users = rank_similar(name, preferences, self.store.users());
        debug!("Ranked {} similar user(s)", similar_users.len());

        let songs = recommend_songs(preferences, self.store.songs());

        Ok(Recommendation {
            user: name.to_string(),
            reference_user: reference.to_string(),
            path,
            groups,
            similar_users,
            songs,
        })
    }

    /// [`submit`](Self::submit) for raw form fields.
    ///
    /// The name is checked first, then every value is parsed before anything
    /// is stored.
    ///
    /// # Errors
    ///
    /// A missing name, the first unparsable or out-of-range value, or any
    /// other validation error.
    pub fn submit_raw<G, V>(&mut self, name: &str, raw: &[(G, V)]) -> Result<Recommendation>
    where
        G: AsRef<str>,
        V: AsRef<str>,
    {
        self.store.validate(name, &Preferences::new())?;
        let preferences = parse_preferences(raw)?;
        self.submit(name, &preferences)
    }
}
