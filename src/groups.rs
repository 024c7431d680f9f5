//! Groups of users with identical taste.
//!
//! Two users are compatible when their stored preference vectors are exactly
//! equal: same genres, bit-identical values, no tolerance. Compatibility is
//! an equivalence relation, so the maximal cliques of the compatibility graph
//! are exactly its equivalence classes.

use crate::graph::{GraphStore, Preferences};
use log::{debug, trace};
use petgraph::algo::maximal_cliques;
use petgraph::graph::{NodeIndex, UnGraph};

/// Undirected graph over users; an edge joins identical preferences.
///
/// Node indices follow store order, which is what output ordering uses.
#[derive(Debug, Clone)]
pub struct CompatibilityGraph<'a> {
    graph: UnGraph<&'a str, ()>,
}

impl<'a> CompatibilityGraph<'a> {
    /// Compares every unordered pair of distinct users.
    #[must_use]
    pub fn build<I>(users: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Preferences)>,
    {
        let mut graph = UnGraph::new_undirected();
        let nodes: Vec<(NodeIndex, &Preferences)> = users
            .into_iter()
            .map(|(name, prefs)| (graph.add_node(name), prefs))
            .collect();

        for (i, &(a, prefs_a)) in nodes.iter().enumerate() {
            for &(b, prefs_b) in &nodes[i + 1..] {
                if prefs_a == prefs_b {
                    trace!("`{}' and `{}' share identical taste", graph[a], graph[b]);
                    graph.add_edge(a, b, ());
                }
            }
        }

        Self { graph }
    }

    #[must_use]
    pub fn are_compatible(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(i), Some(j)) => self.graph.contains_edge(i, j),
            _ => false,
        }
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn index_of(&self, user: &str) -> Option<NodeIndex> {
        self.graph.node_indices().find(|&i| self.graph[i] == user)
    }

    /// All maximal cliques, singletons included.
    ///
    /// Members follow user order; cliques are sorted by their first member.
    #[must_use]
    pub fn maximal_cliques(&self) -> Vec<Vec<&'a str>> {
        let mut cliques: Vec<Vec<NodeIndex>> = maximal_cliques(&self.graph)
            .into_iter()
            .filter(|clique| !clique.is_empty())
            .map(|clique| {
                let mut members: Vec<NodeIndex> = clique.into_iter().collect();
                members.sort_unstable();
                members
            })
            .collect();
        cliques.sort();

        cliques
            .into_iter()
            .map(|clique| clique.into_iter().map(|i| self.graph[i]).collect())
            .collect()
    }
}

/// Groups of at least two users with identical preference vectors.
///
/// Members are listed in store order and groups are ordered by their first
/// member. No user appears in more than one group.
#[must_use]
pub fn find_identical_groups(store: &GraphStore) -> Vec<Vec<String>> {
    let graph = CompatibilityGraph::build(store.users());
    debug!("Compatibility graph has {} edge(s)", graph.edge_count());

    graph
        .maximal_cliques()
        .into_iter()
        .filter(|clique| clique.len() > 1)
        .map(|clique| clique.into_iter().map(str::to_string).collect())
        .collect()
}

/// Same grouping computed as equivalence classes in a single pass.
#[must_use]
pub fn identical_taste_classes(store: &GraphStore) -> Vec<Vec<String>> {
    let mut classes: Vec<(&Preferences, Vec<String>)> = Vec::new();
    for (name, prefs) in store.users() {
        match classes.iter_mut().find(|(p, _)| *p == prefs) {
            Some((_, members)) => members.push(name.to_string()),
            None => classes.push((prefs, vec![name.to_string()])),
        }
    }

    classes
        .into_iter()
        .map(|(_, members)| members)
        .filter(|members| members.len() > 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Affinity, Catalog};
    use crate::seed;
    use std::collections::HashSet;

    fn prefs(entries: &[(&str, f64)]) -> Preferences {
        entries
            .iter()
            .map(|&(g, v)| (g, Affinity::new(v).unwrap()))
            .collect()
    }

    fn store_with(users: &[(&str, &[(&str, f64)])]) -> GraphStore {
        let mut store = GraphStore::new(seed::catalog());
        for (name, entries) in users {
            store.add_user(name, &prefs(entries)).unwrap();
        }
        store
    }

    fn assert_partition(store: &GraphStore, groups: &[Vec<String>]) {
        let mut seen = HashSet::new();
        for group in groups {
            assert!(group.len() >= 2, "group {group:?} is a singleton");
            for member in group {
                assert!(seen.insert(member.clone()), "{member} appears in two groups");
                for other in group {
                    assert_eq!(store.preferences(member), store.preferences(other));
                }
            }
        }
    }

    #[test]
    fn test_no_groups_when_all_distinct() {
        let store = store_with(&[("Ana", &[("Pop", 0.8)]), ("Ben", &[("Pop", 0.7)])]);
        assert!(find_identical_groups(&store).is_empty());
    }

    #[test]
    fn test_identical_users_grouped() {
        let store = store_with(&[
            ("Juan", &[("Pop", 0.8), ("Rock", 0.6)]),
            ("Marianna", &[("Clásica", 0.9)]),
            ("Nuevo", &[("Rock", 0.6), ("Pop", 0.8)]),
        ]);

        let groups = find_identical_groups(&store);
        assert_eq!(groups, vec![vec!["Juan".to_string(), "Nuevo".to_string()]]);
    }

    #[test]
    fn test_several_classes_partition_users() {
        let store = store_with(&[
            ("A", &[("Pop", 0.5)]),
            ("B", &[("Jazz", 0.5)]),
            ("C", &[("Pop", 0.5)]),
            ("D", &[("Jazz", 0.5)]),
            ("E", &[("Pop", 0.5)]),
            ("F", &[("Kpop", 1.0)]),
        ]);

        let groups = find_identical_groups(&store);
        assert_eq!(
            groups,
            vec![
                vec!["A".to_string(), "C".to_string(), "E".to_string()],
                vec!["B".to_string(), "D".to_string()],
            ]
        );
        assert_partition(&store, &groups);
    }

    #[test]
    fn test_close_values_are_not_identical() {
        let store = store_with(&[("A", &[("Pop", 0.3)]), ("B", &[("Pop", 0.1 + 0.2)])]);
        assert!(find_identical_groups(&store).is_empty());
    }

    #[test]
    fn test_zero_ratings_are_ignored_for_equality() {
        let store = store_with(&[("A", &[("Pop", 0.5), ("Rock", 0.0)]), ("B", &[("Pop", 0.5)])]);
        assert_eq!(find_identical_groups(&store).len(), 1);
    }

    #[test]
    fn test_users_without_edges_group_together() {
        let store = store_with(&[("Kat", &[]), ("Lu", &[("Pop", 0.0)]), ("Ana", &[("Pop", 0.2)])]);
        assert_eq!(find_identical_groups(&store), vec![vec!["Kat".to_string(), "Lu".to_string()]]);
    }

    #[test]
    fn test_cliques_match_equivalence_classes() {
        let store = store_with(&[
            ("A", &[("Pop", 0.5), ("Rock", 0.2)]),
            ("B", &[("Jazz", 0.9)]),
            ("C", &[("Rock", 0.2), ("Pop", 0.5)]),
            ("D", &[]),
            ("E", &[("Jazz", 0.9)]),
            ("F", &[]),
            ("G", &[("Pop", 0.5), ("Rock", 0.2)]),
            ("H", &[("Hip-Hop", 0.1)]),
        ]);

        let cliques = find_identical_groups(&store);
        assert_eq!(cliques, identical_taste_classes(&store));
        assert_eq!(cliques.len(), 3);
        assert_partition(&store, &cliques);
    }

    #[test]
    fn test_large_class_is_one_clique() {
        let names = ["A", "B", "C", "D", "E"];
        let rock: &[(&str, f64)] = &[("Rock", 0.7)];
        let users: Vec<(&str, &[(&str, f64)])> = names.iter().map(|&n| (n, rock)).collect();
        let store = store_with(&users);

        let graph = CompatibilityGraph::build(store.users());
        assert_eq!(graph.edge_count(), 10);
        assert_eq!(graph.maximal_cliques(), vec![names.to_vec()]);
        assert_eq!(find_identical_groups(&store), identical_taste_classes(&store));
    }

    #[test]
    fn test_compatibility_graph_queries() {
        let store = store_with(&[("A", &[("Pop", 0.5)]), ("B", &[("Pop", 0.5)]), ("C", &[])]);
        let graph = CompatibilityGraph::build(store.users());

        assert!(graph.are_compatible("A", "B"));
        assert!(graph.are_compatible("B", "A"));
        assert!(!graph.are_compatible("A", "C"));
        assert!(!graph.are_compatible("A", "Ghost"));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.maximal_cliques(), vec![vec!["A", "B"], vec!["C"]]);
    }

    #[test]
    fn test_empty_store_has_no_groups() {
        let store = GraphStore::new(Catalog::new());
        assert!(find_identical_groups(&store).is_empty());
        assert!(CompatibilityGraph::build(store.users()).maximal_cliques().is_empty());
    }
}
