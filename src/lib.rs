//! Music recommendations from a small graph of users and genres.
//!
//! Core modules:
//! - [`graph`] - Preference graph, affinities and the song catalog
//! - [`similarity`] - Taste similarity ranking between users
//! - [`songs`] - Song picks from a user's top genres
//! - [`path`] - Musical paths (Dijkstra over `1 - affinity` costs)
//! - [`groups`] - Identical-taste groups (maximal cliques)
//! - [`service`] - The full pipeline for a new user
//!
//! ### Supporting Modules
//!
//! - [`config`] - Reference user and config file handling
//! - [`seed`] - Built-in catalog and seed users
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//! - [`error`] - Validation errors
//!
//! ## Quick Start Example
//!
//! ```
//! use muse_graph::config::RecommenderConfig;
//! use muse_graph::service::RecommendationService;
//! use muse_graph::seed;
//!
//! let store = seed::seeded_store()?;
//! let mut service = RecommendationService::new(store, RecommenderConfig::default());
//!
//! let result = service.submit_raw("Nuevo", &[("Pop", "0.8"), ("Rock", "0.6")])?;
//! assert_eq!(result.similar_users[0].name, "Juan");
//! println!("{}", result.render_text());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Algorithm Details
//!
//! ### Similarity
//! `1 - mean |Δ|` over the genres two users share. Users sharing nothing are
//! left out of the ranking rather than scored 0.
//!
//! ### Musical Path
//! Edges are undirected and cost `1 - affinity`, so the cheapest path follows
//! the strongest tastes.
//!
//! ### Identical Taste
//! Exact equality of stored preference vectors, no tolerance. The relation is
//! transitive, so every maximal clique is a full equivalence class.
//!
//! ## Error Handling
//!
//! Submissions are validated before the graph changes; failures come back as
//! [`error::RecommendError`]. Every query after that is total: a missing path
//! is `None`, an all-zero rating gives
//! [`songs::SongRecommendation::NoPreference`].
//!
//! ## Logging
//!
//! Uses the `log` facade. The binary initializes `env_logger`, so
//! `RUST_LOG=muse_graph::path=trace` shows every Dijkstra relaxation.

pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod graph;
pub mod groups;
pub mod path;
pub mod seed;
pub mod service;
pub mod similarity;
pub mod songs;
