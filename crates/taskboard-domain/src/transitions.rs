//! Directed graph of allowed column-to-column moves.

use std::collections::{BTreeMap, BTreeSet};

use crate::column::ColumnKey;

/// Maps each column to the set of columns reachable from it in one move.
///
/// Columns without an entry have no outgoing edges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitionGraph {
    edges: BTreeMap<ColumnKey, BTreeSet<ColumnKey>>,
}

impl TransitionGraph {
    /// An empty graph: every move is rejected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The workflow used by the board:
    ///
    /// ```text
    /// backlog -> todo
    /// todo    -> doing
    /// doing   -> waiting, done
    /// waiting -> doing, done
    /// done    -> (none)
    /// ```
    pub fn standard() -> Self {
        use ColumnKey::*;
        Self::new()
            .with_edge(Backlog, Todo)
            .with_edge(Todo, Doing)
            .with_edge(Doing, Waiting)
            .with_edge(Doing, Done)
            .with_edge(Waiting, Doing)
            .with_edge(Waiting, Done)
    }

    pub fn with_edge(mut self, from: ColumnKey, to: ColumnKey) -> Self {
        self.add_edge(from, to);
        self
    }

    pub fn add_edge(&mut self, from: ColumnKey, to: ColumnKey) {
        self.edges.entry(from).or_default().insert(to);
    }

    pub fn allows(&self, from: ColumnKey, to: ColumnKey) -> bool {
        self.edges.get(&from).is_some_and(|targets| targets.contains(&to))
    }

    pub fn targets(&self, from: ColumnKey) -> Vec<ColumnKey> {
        self.edges
            .get(&from)
            .map(|targets| targets.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ColumnKey::*;

    #[test]
    fn test_standard_graph_edges() {
        let graph = TransitionGraph::standard();
        assert_eq!(graph.targets(Backlog), vec![Todo]);
        assert_eq!(graph.targets(Todo), vec![Doing]);
        assert_eq!(graph.targets(Doing), vec![Waiting, Done]);
        assert_eq!(graph.targets(Waiting), vec![Doing, Done]);
        assert!(graph.targets(Done).is_empty());
    }

    #[test]
    fn test_allows_is_directed() {
        let graph = TransitionGraph::standard();
        assert!(graph.allows(Backlog, Todo));
        assert!(!graph.allows(Todo, Backlog));
        assert!(!graph.allows(Backlog, Doing));
        assert!(!graph.allows(Done, Doing));
    }

    #[test]
    fn test_self_loops_are_not_edges() {
        let graph = TransitionGraph::standard();
        for key in ColumnKey::ALL {
            assert!(!graph.allows(key, key));
        }
    }

    #[test]
    fn test_custom_graph() {
        let graph = TransitionGraph::new().with_edge(Backlog, Todo);
        assert!(graph.allows(Backlog, Todo));
        assert!(!graph.allows(Todo, Doing));
    }
}
