//! # Muse Graph
//!
//! Command-line front end for the genre-graph recommender. Builds the seeded
//! graph, reads the configuration and runs one query per invocation.
//!
//! ## Usage
//!
//! ```bash
//! # Add a new user and get everything at once
//! muse-graph recommend Nuevo -p Pop=0.8 -p Rock=0.6
//!
//! # Individual queries against the seeded users
//! muse-graph similar Nuevo -p Jazz=0.9
//! muse-graph songs -p Jazz=0.9 -p Clásica=0.85
//! muse-graph path Adriana Juan
//! muse-graph groups
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use muse_graph::cli::{self, Command};
use muse_graph::config::RecommenderConfig;
use muse_graph::graph::{parse_preferences, GraphStore};
use muse_graph::service::RecommendationService;
use muse_graph::{completion, groups, path, seed, similarity, songs};

/// Lays raw ratings out like the form: one field per catalog genre, in
/// catalog order, `0` where nothing was given. Genres outside the catalog
/// are kept at the end so validation can reject them.
fn fill_form(store: &GraphStore, given: &[(String, String)]) -> Vec<(String, String)> {
    let value_of = |genre: &str| {
        given
            .iter()
            .rev()
            .find(|(g, _)| g == genre)
            .map_or_else(|| "0".to_string(), |(_, v)| v.clone())
    };

    let mut form: Vec<(String, String)> = store
        .genres()
        .map(|genre| (genre.to_string(), value_of(genre)))
        .collect();

    form.extend(
        given
            .iter()
            .filter(|(g, _)| !store.songs().contains(g))
            .cloned(),
    );
    form
}

/// Main entry point for Muse Graph.
///
/// Initializes logging, parses command-line arguments, and routes commands
/// to the library.
///
/// # Logging
///
/// Controlled via `RUST_LOG`:
/// - `RUST_LOG=debug muse-graph recommend ...` - Pipeline steps
/// - `RUST_LOG=muse_graph::path=trace muse-graph path A B` - Dijkstra details
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    let config = RecommenderConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?
        .override_reference(args.reference);
    debug!("Using config {config:?}");

    let store = seed::seeded_store().context("Failed to build the seeded graph")?;

    match args.command {
        Command::Recommend { name, preferences, json } => {
            info!("Running recommendations for new user `{name}'");
            let form = fill_form(&store, &preferences);
            let mut service = RecommendationService::new(store, config);
            debug!("Reference user is `{}'", service.config().reference_user);
            let result = service
                .submit_raw(&name, &form)
                .with_context(|| format!("Could not add user `{name}'"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", result.render_text());
            }
        }
        Command::Similar { name, preferences } => {
            let prefs = parse_preferences(&preferences).context("Invalid preferences")?;
            let ranked = similarity::rank_similar(&name, &prefs, store.users());
            if ranked.is_empty() {
                println!("No user shares a genre with these preferences");
            }
            for user in ranked {
                println!("{} (Similarity: {:.2})", user.name, user.score);
            }
        }
        Command::Songs { preferences } => {
            let prefs = parse_preferences(&preferences).context("Invalid preferences")?;
            match songs::recommend_songs(&prefs, store.songs()) {
                songs::SongRecommendation::NoPreference => {
                    println!("No recommendations (all preferences are 0)");
                }
                songs::SongRecommendation::Songs(list) if list.is_empty() => {
                    println!("No songs found for your top genres");
                }
                songs::SongRecommendation::Songs(list) => {
                    for song in list {
                        println!("{song}");
                    }
                }
            }
        }
        Command::Path { from, to } => match path::shortest_path(&store, &from, &to) {
            Some(found) => {
                println!("{}", found.nodes.join(" → "));
                println!("Distance: {:.2}", found.cost);
            }
            None => println!("No path from {from} to {to}"),
        },
        Command::Groups => {
            let groups = groups::find_identical_groups(&store);
            if groups.is_empty() {
                println!("No groups with identical taste.");
            }
            for (i, group) in groups.iter().enumerate() {
                println!("Group {}: {}", i + 1, group.join(", "));
            }
        }
        Command::Graph => {
            println!("Genres: {}", store.genres().collect::<Vec<_>>().join(", "));
            println!("Users: {} ({} edges)", store.user_count(), store.edge_count());
            for (user, prefs) in store.users() {
                let edges: Vec<String> = prefs.iter().map(|(genre, a)| format!("{genre}={a}")).collect();
                println!("  {user} -> {}", edges.join(", "));
            }
        }
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(
                completion::shell_to_completion_shell(&shell),
                &mut cmd,
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
