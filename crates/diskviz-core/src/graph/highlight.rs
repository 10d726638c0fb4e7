/// Ancestry highlighting for the force graph.
///
/// Clicking a node emphasises the node and every ancestor directory on its
/// path; everything else is dimmed. This is view state only and never
/// touches simulated positions.
use super::build::{DiskGraph, GraphEdge};
use std::collections::HashSet;

/// Every `/`-separated prefix of `path`, including `path` itself.
pub fn ancestor_chain(path: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut current = String::new();
    for part in path.split('/').filter(|p| !p.is_empty()) {
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(part);
        chain.push(current.clone());
    }
    chain
}

/// How a node or edge should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Nothing is selected.
    Normal,
    Emphasized,
    Dimmed,
}

/// The set of highlighted ids. Empty means nothing is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlight {
    ids: HashSet<String>,
}

impl Highlight {
    /// Select the ancestor chain of `id`.
    pub fn select(&mut self, id: &str) {
        self.ids = ancestor_chain(id).into_iter().collect();
    }

    /// Click on empty canvas.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn node(&self, id: &str) -> Emphasis {
        if self.ids.is_empty() {
            Emphasis::Normal
        } else if self.ids.contains(id) {
            Emphasis::Emphasized
        } else {
            Emphasis::Dimmed
        }
    }

    pub fn edge(&self, edge: &GraphEdge) -> Emphasis {
        if self.ids.is_empty() {
            Emphasis::Normal
        } else if self.ids.contains(&edge.source_id) && self.ids.contains(&edge.target_id) {
            Emphasis::Emphasized
        } else {
            Emphasis::Dimmed
        }
    }

    /// Per-node emphasis in graph order.
    pub fn node_states(&self, graph: &DiskGraph) -> Vec<Emphasis> {
        graph.nodes.iter().map(|n| self.node(&n.id)).collect()
    }

    /// Per-edge emphasis in graph order.
    pub fn edge_states(&self, graph: &DiskGraph) -> Vec<Emphasis> {
        graph.edges.iter().map(|e| self.edge(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use crate::model::DiskNode;

    #[test]
    fn chain_lists_every_prefix() {
        assert_eq!(ancestor_chain("a/b/c.txt"), ["a", "a/b", "a/b/c.txt"]);
        assert_eq!(ancestor_chain("solo"), ["solo"]);
        assert!(ancestor_chain("").is_empty());
    }

    #[test]
    fn empty_selection_is_all_normal() {
        let h = Highlight::default();
        assert!(!h.is_active());
        assert_eq!(h.node("anything"), Emphasis::Normal);
    }

    #[test]
    fn selection_emphasises_ancestry_only() {
        let root = DiskNode::dir(
            "root",
            vec![DiskNode::dir(
                "a",
                vec![
                    DiskNode::dir("b", vec![DiskNode::file("deep.bin", 50)]),
                    DiskNode::file("side.bin", 40),
                ],
            )],
        );
        let graph = build_graph(&root, 10);
        let mut h = Highlight::default();
        h.select("a/b/deep.bin");

        assert_eq!(h.node("a"), Emphasis::Emphasized);
        assert_eq!(h.node("a/b"), Emphasis::Emphasized);
        assert_eq!(h.node("a/side.bin"), Emphasis::Dimmed);

        let states = h.edge_states(&graph);
        for (edge, state) in graph.edges.iter().zip(states) {
            let expected = if edge.target_id == "a/side.bin" {
                Emphasis::Dimmed
            } else {
                Emphasis::Emphasized
            };
            assert_eq!(state, expected, "{edge:?}");
        }

        h.clear();
        assert!(h.node_states(&graph).iter().all(|&e| e == Emphasis::Normal));
    }
}
