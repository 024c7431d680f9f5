//! # Preference Graph
//!
//! The bipartite graph every recommendation is computed from. Users point at
//! genres with a weighted edge, the edge weight being the user's [`Affinity`]
//! for that genre. Genres own the song catalog, which is fixed at startup.
//!
//! ```text
//!   Juan ──0.8──▶ Pop ──▶ ["Shape of You - Ed Sheeran", ...]
//!     └───0.6──▶ Rock
//!   Marianna ──0.9──▶ Clásica
//! ```
//!
//! Only genres with an affinity above zero become edges, so a stored
//! preference vector never contains a zero. Users are never removed; adding a
//! user whose name already exists replaces that user's edges in place.

use crate::error::{RecommendError, Result};
use log::{debug, info};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A user's rating of a genre, guaranteed to be a finite value in `[0, 1]`.
///
/// The only ways to build one are [`Affinity::new`] and [`Affinity::parse`],
/// so every component downstream of validation can rely on the range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, serde::Serialize)]
#[serde(transparent)]
pub struct Affinity(f64);

impl Affinity {
    /// No stated preference.
    pub const ZERO: Self = Self(0.0);

    /// Wraps `value` if it lies in `[0, 1]`.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (0.0..=1.0).contains(&value).then_some(Self(value))
    }

    /// Parses a raw form value for `genre`.
    ///
    /// Surrounding whitespace is ignored. The error names the genre so the
    /// caller can point at the offending field.
    ///
    /// # Errors
    ///
    /// [`RecommendError::NotNumeric`] when `raw` is not a number,
    /// [`RecommendError::OutOfRange`] when it is outside `[0, 1]` (or NaN).
    pub fn parse(genre: &str, raw: &str) -> Result<Self> {
        let value: f64 = raw.trim().parse().map_err(|_| RecommendError::NotNumeric {
            genre: genre.to_string(),
            value: raw.to_string(),
        })?;

        Self::new(value).ok_or_else(|| RecommendError::OutOfRange {
            genre: genre.to_string(),
            value,
        })
    }

    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Traversal cost of an edge carrying this affinity: `1 - affinity`.
    #[must_use]
    pub fn cost(self) -> f64 {
        1.0 - self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl std::fmt::Display for Affinity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A user's preference vector: genre name → [`Affinity`].
///
/// Keeps insertion order, which is what ranking ties fall back on.
/// Inserting an existing genre replaces its value without moving it.
/// Equality ignores order: two vectors are equal when they hold the same
/// genres with bit-identical values.
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    entries: Vec<(String, Affinity)>,
}

impl Preferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `genre` to `affinity`, replacing any earlier value in place.
    pub fn insert(&mut self, genre: impl Into<String>, affinity: Affinity) {
        let genre = genre.into();
        match self.entries.iter_mut().find(|(g, _)| *g == genre) {
            Some(entry) => entry.1 = affinity,
            None => self.entries.push((genre, affinity)),
        }
    }

    /// Builder form of [`Preferences::insert`].
    #[must_use]
    pub fn with(mut self, genre: impl Into<String>, affinity: Affinity) -> Self {
        self.insert(genre, affinity);
        self
    }

    #[must_use]
    pub fn get(&self, genre: &str) -> Option<Affinity> {
        self.entries
            .iter()
            .find(|(g, _)| g == genre)
            .map(|&(_, affinity)| affinity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Affinity)> + '_ {
        self.entries.iter().map(|(g, a)| (g.as_str(), *a))
    }

    pub fn genres(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(g, _)| g.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every value is zero. An empty vector counts as all zero.
    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        self.entries.iter().all(|(_, a)| a.is_zero())
    }

    /// The subset of entries with a strictly positive affinity.
    #[must_use]
    pub fn positive(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(_, a)| !a.is_zero())
                .cloned()
                .collect(),
        }
    }
}

impl PartialEq for Preferences {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(genre, affinity)| other.get(genre) == Some(affinity))
    }
}

impl<S: Into<String>> FromIterator<(S, Affinity)> for Preferences {
    fn from_iter<I: IntoIterator<Item = (S, Affinity)>>(iter: I) -> Self {
        let mut prefs = Self::new();
        for (genre, affinity) in iter {
            prefs.insert(genre, affinity);
        }
        prefs
    }
}

impl Serialize for Preferences {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (genre, affinity) in self.iter() {
            map.serialize_entry(genre, &affinity)?;
        }
        map.end()
    }
}

/// Fixed mapping genre → ordered song list ("Title - Artist").
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    genres: Vec<(String, Vec<String>)>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a genre with its songs. A repeated genre replaces the song list.
    #[must_use]
    pub fn with_genre<I, S>(mut self, genre: impl Into<String>, songs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let genre = genre.into();
        let songs: Vec<String> = songs.into_iter().map(Into::into).collect();
        match self.genres.iter_mut().find(|(g, _)| *g == genre) {
            Some(entry) => entry.1 = songs,
            None => self.genres.push((genre, songs)),
        }
        self
    }

    /// Songs of `genre`, or an empty slice when the genre is unknown.
    #[must_use]
    pub fn songs(&self, genre: &str) -> &[String] {
        self.genres
            .iter()
            .find(|(g, _)| g == genre)
            .map(|(_, songs)| songs.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn contains(&self, genre: &str) -> bool {
        self.genres.iter().any(|(g, _)| g == genre)
    }

    pub fn genres(&self) -> impl Iterator<Item = &str> + '_ {
        self.genres.iter().map(|(g, _)| g.as_str())
    }
}

/// A neighbour in the undirected projection of the preference graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub node: &'a str,
    pub weight: Affinity,
}

/// Owner of the preference graph and the catalog.
///
/// Built once at startup and handed to whoever needs it; nothing in the
/// crate keeps a global graph.
#[derive(Debug, Clone)]
pub struct GraphStore {
    catalog: Catalog,
    users: Vec<(String, Preferences)>,
}

impl GraphStore {
    /// Creates a store whose genre nodes are the catalog's genres.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog, users: Vec::new() }
    }

    /// Inserts `name`, or replaces its edges if it already exists.
    ///
    /// Only genres with an affinity above zero become edges. A user with no
    /// such genre stays in the graph as an isolated node.
    ///
    /// # Errors
    ///
    /// Fails without touching the store when the name is blank, the name is a
    /// genre, or a preference names a genre outside the catalog.
    pub fn add_user(&mut self, name: &str, preferences: &Preferences) -> Result<()> {
        self.validate(name, preferences)?;

        let edges = preferences.positive();
        info!("Adding user `{name}' with {} genre edge(s)", edges.len());

        match self.users.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => {
                debug!("User `{name}' already present, replacing preferences");
                entry.1 = edges;
            }
            None => self.users.push((name.to_string(), edges)),
        }
        Ok(())
    }

    /// Parses raw `(genre, value)` form fields and adds the user.
    ///
    /// Every field is parsed before the store is touched, so a single bad
    /// value rejects the whole submission.
    ///
    /// # Errors
    ///
    /// The first parse error (naming its genre), or any [`add_user`] error.
    ///
    /// [`add_user`]: GraphStore::add_user
    pub fn add_user_raw<G, V>(&mut self, name: &str, raw: &[(G, V)]) -> Result<Preferences>
    where
        G: AsRef<str>,
        V: AsRef<str>,
    {
        let preferences = parse_preferences(raw)?;
        self.add_user(name, &preferences)?;
        Ok(preferences)
    }

    /// Checks a submission against the store without mutating it.
    ///
    /// # Errors
    ///
    /// See [`GraphStore::add_user`].
    pub fn validate(&self, name: &str, preferences: &Preferences) -> Result<()> {
        if name.is_empty() {
            return Err(RecommendError::MissingName);
        }
        if self.catalog.contains(name) {
            return Err(RecommendError::NameIsGenre(name.to_string()));
        }
        if let Some(genre) = preferences.genres().find(|g| !self.catalog.contains(g)) {
            return Err(RecommendError::UnknownGenre(genre.to_string()));
        }
        Ok(())
    }

    /// Users with their stored preference vectors, in insertion order.
    pub fn users(&self) -> impl Iterator<Item = (&str, &Preferences)> + '_ {
        self.users.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// Genre names in catalog order.
    pub fn genres(&self) -> impl Iterator<Item = &str> + '_ {
        self.catalog.genres()
    }

    #[must_use]
    pub fn catalog(&self, genre: &str) -> &[String] {
        self.catalog.songs(genre)
    }

    #[must_use]
    pub fn songs(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn preferences(&self, user: &str) -> Option<&Preferences> {
        self.users.iter().find(|(n, _)| n == user).map(|(_, p)| p)
    }

    #[must_use]
    pub fn contains_user(&self, user: &str) -> bool {
        self.preferences(user).is_some()
    }

    /// True for any user or genre node.
    #[must_use]
    pub fn contains_node(&self, node: &str) -> bool {
        self.catalog.contains(node) || self.contains_user(node)
    }

    /// Neighbours of `node` with each edge read in both directions.
    ///
    /// A user's neighbours are its genres (preference order); a genre's
    /// neighbours are the users rating it (user insertion order).
    #[must_use]
    pub fn neighbors(&self, node: &str) -> Vec<Neighbor<'_>> {
        if let Some(prefs) = self.preferences(node) {
            return prefs
                .iter()
                .map(|(genre, weight)| Neighbor { node: genre, weight })
                .collect();
        }

        self.users
            .iter()
            .filter_map(|(user, prefs)| {
                prefs.get(node).map(|weight| Neighbor { node: user.as_str(), weight })
            })
            .collect()
    }

    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.users.iter().map(|(_, p)| p.len()).sum()
    }
}

/// Parses raw form fields into a preference vector, zeros included.
///
/// # Errors
///
/// The first field that is not a number in `[0, 1]`.
pub fn parse_preferences<G, V>(raw: &[(G, V)]) -> Result<Preferences>
where
    G: AsRef<str>,
    V: AsRef<str>,
{
    raw.iter()
        .map(|(genre, value)| {
            let genre = genre.as_ref();
            Affinity::parse(genre, value.as_ref()).map(|a| (genre, a))
        })
        .collect()
}
