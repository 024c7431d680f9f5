//! Startup data: the genre catalog and the initial users.
//!
//! Loaded once when the store is built; the catalog is never mutated
//! afterwards.

use crate::graph::{Affinity, Catalog, GraphStore, Preferences};
use anyhow::{Context, Result};

/// Genres in display order, each with its catalog songs.
const CATALOG: &[(&str, &[&str])] = &[
    ("Pop", &["Shape of You - Ed Sheeran", "Blinding Lights - The Weeknd"]),
    ("Rock", &["Bohemian Rhapsody - Queen", "Sweet Child O' Mine - Guns N' Roses"]),
    ("Electrónica", &["Strobe - Deadmau5", "Animals - Martin Garrix"]),
    ("Clásica", &["Fur Elise - Beethoven", "Moonlight Sonata - Beethoven"]),
    ("Hip-Hop", &["SICKO MODE - Travis Scott", "God's Plan - Drake"]),
    ("Jazz", &["Take Five - Dave Brubeck", "So What - Miles Davis"]),
    ("Kpop", &["Kingdom Come - Red Velvet", "favOrite - LOONA"]),
];

/// Users known before anyone submits the form.
const USERS: &[(&str, &[(&str, f64)])] = &[
    ("Juan", &[("Pop", 0.8), ("Rock", 0.6), ("Electrónica", 0.7)]),
    ("Marianna", &[("Clásica", 0.9), ("Jazz", 0.85)]),
    ("Adriana", &[("Hip-Hop", 0.75), ("Electrónica", 0.6), ("Pop", 0.4)]),
    ("Kat", &[]),
];

/// The built-in genre catalog.
#[must_use]
pub fn catalog() -> Catalog {
    CATALOG
        .iter()
        .fold(Catalog::new(), |catalog, (genre, songs)| {
            catalog.with_genre(*genre, songs.iter().copied())
        })
}

/// The built-in seed users with their preference vectors.
///
/// # Errors
///
/// Fails if a seed value is outside `[0, 1]`.
pub fn users() -> Result<Vec<(String, Preferences)>> {
    USERS
        .iter()
        .map(|(name, prefs)| {
            let prefs = prefs
                .iter()
                .map(|&(genre, value)| {
                    Affinity::new(value)
                        .map(|a| (genre, a))
                        .with_context(|| format!("Seed affinity {value} for {name}/{genre} is out of range"))
                })
                .collect::<Result<Preferences>>()?;
            Ok(((*name).to_string(), prefs))
        })
        .collect()
}

/// A store holding the built-in catalog and seed users.
///
/// # Errors
///
/// Fails if the seed data does not pass store validation.
pub fn seeded_store() -> Result<GraphStore> {
    let mut store = GraphStore::new(catalog());
    for (name, prefs) in users()? {
        store
            .add_user(&name, &prefs)
            .with_context(|| format!("Failed to seed user `{name}'"))?;
    }
    Ok(store)
}
