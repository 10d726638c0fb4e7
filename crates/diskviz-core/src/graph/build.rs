/// Graph builder: the top-N largest files plus the directories that
/// connect them to the scan root.
///
/// The scan root itself is never a node; its direct children have no
/// incoming edge.
use crate::analysis::largest_files;
use crate::model::{DiskNode, NodeKind};
use crate::palette::{ColorAssigner, Rgb, CATEGORY_PALETTE, NEUTRAL};
use compact_str::CompactString;
use std::collections::{HashMap, HashSet};

/// Default bound on the number of files placed in the graph.
pub const DEFAULT_TOP_N: usize = 100;

/// Colour key for files without an extension.
const UNKNOWN_KEY: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    pub top_n: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Full path below the scan root, unique within the graph.
    pub id: String,
    pub name: CompactString,
    pub kind: NodeKind,
    /// File size; always 0 for directories.
    pub size: u64,
    /// Index of the last path segment, 0 for children of the scan root.
    pub depth: usize,
    pub extension: Option<CompactString>,
}

impl GraphNode {
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// Directed parent → child edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    pub source_id: String,
    pub target_id: String,
}

/// Nodes and edges in creation order, with an id → index lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    index: HashMap<String, usize>,
}

impl DiskGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    /// Edges as `(source, target)` node indices.
    pub fn edge_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().filter_map(|e| {
            Some((self.index_of(&e.source_id)?, self.index_of(&e.target_id)?))
        })
    }

    /// Fill colour per node: files cycle through the categorical palette
    /// by extension in creation order, directories are neutral.
    pub fn node_colors(&self) -> Vec<Rgb> {
        let mut assigner = ColorAssigner::new(CATEGORY_PALETTE);
        self.nodes
            .iter()
            .map(|n| {
                if n.is_dir() {
                    NEUTRAL
                } else {
                    assigner.assign(n.extension.as_deref().unwrap_or(UNKNOWN_KEY))
                }
            })
            .collect()
    }

    fn insert_node(&mut self, node: GraphNode) {
        if !self.index.contains_key(&node.id) {
            self.index.insert(node.id.clone(), self.nodes.len());
            self.nodes.push(node);
        }
    }
}

/// Build the graph of the `top_n` largest files under `root`.
///
/// Deterministic: the same tree and `top_n` always produce the same
/// nodes and edges in the same order. A file whose path has an empty
/// segment, or whose ids clash with a node of the other kind, is left out
/// so every edge runs from a directory.
pub fn build_graph(root: &DiskNode, top_n: usize) -> DiskGraph {
    let mut graph = DiskGraph::default();
    let mut seen_edges: HashSet<(String, String)> = HashSet::new();

    for file in largest_files(root, top_n) {
        let Some(ids) = segment_ids(&file.path) else {
            tracing::debug!(path = file.path.as_str(), "skipping file with an empty path segment");
            continue;
        };
        let last = ids.len() - 1;
        let clashes = ids.iter().enumerate().any(|(depth, id)| match graph.node(id) {
            Some(existing) => depth == last || !existing.is_dir(),
            None => false,
        });
        if clashes {
            tracing::debug!(path = file.path.as_str(), "skipping file whose path clashes with another node");
            continue;
        }

        let mut parent: Option<&str> = None;
        for (depth, id) in ids.iter().enumerate() {
            let name = CompactString::from(id.rsplit('/').next().unwrap_or(id));
            let node = if depth == last {
                GraphNode {
                    id: id.clone(),
                    name,
                    kind: NodeKind::File,
                    size: file.size,
                    depth,
                    extension: file.extension.clone(),
                }
            } else {
                GraphNode {
                    id: id.clone(),
                    name,
                    kind: NodeKind::Directory,
                    size: 0,
                    depth,
                    extension: None,
                }
            };
            graph.insert_node(node);

            if let Some(parent) = parent {
                if seen_edges.insert((parent.to_owned(), id.clone())) {
                    graph.edges.push(GraphEdge {
                        source_id: parent.to_owned(),
                        target_id: id.clone(),
                    });
                }
            }
            parent = Some(id);
        }
    }

    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        top_n,
        "graph built"
    );
    graph
}

/// Cumulative ids of every segment of `path`: `a/b/c` gives `a`, `a/b`,
/// `a/b/c`. `None` for an empty path or one with an empty segment.
fn segment_ids(path: &str) -> Option<Vec<String>> {
    let mut ids: Vec<String> = Vec::new();
    for segment in path.split('/') {
        if segment.is_empty() {
            return None;
        }
        let id = match ids.last() {
            Some(parent) => format!("{parent}/{segment}"),
            None => segment.to_owned(),
        };
        ids.push(id);
    }
    Some(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> DiskNode {
        DiskNode::dir(
            "root",
            vec![
                DiskNode::dir(
                    "a",
                    vec![
                        DiskNode::file("big.iso", 900),
                        DiskNode::dir("b", vec![DiskNode::file("mid.mp4", 500)]),
                        DiskNode::file("small.txt", 1),
                    ],
                ),
                DiskNode::file("top.zip", 700),
                DiskNode::dir("c", vec![DiskNode::file("README", 300)]),
            ],
        )
    }

    #[test]
    fn builds_spanning_directories() {
        let g = build_graph(&tree(), 4);
        let ids: Vec<&str> = g.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            ["a", "a/big.iso", "top.zip", "a/b", "a/b/mid.mp4", "c", "c/README"]
        );
        let edges: Vec<(&str, &str)> = g
            .edges
            .iter()
            .map(|e| (e.source_id.as_str(), e.target_id.as_str()))
            .collect();
        assert_eq!(
            edges,
            [
                ("a", "a/big.iso"),
                ("a", "a/b"),
                ("a/b", "a/b/mid.mp4"),
                ("c", "c/README"),
            ]
        );
    }

    #[test]
    fn directories_have_zero_size_and_segment_depth() {
        let g = build_graph(&tree(), 4);
        let b = g.node("a/b").unwrap();
        assert!(b.is_dir());
        assert_eq!(b.size, 0);
        assert_eq!(b.depth, 1);
        let mp4 = g.node("a/b/mid.mp4").unwrap();
        assert_eq!(mp4.depth, 2);
        assert_eq!(mp4.size, 500);
        assert_eq!(mp4.extension.as_deref(), Some("mp4"));
    }

    #[test]
    fn edges_reference_existing_nodes_and_are_unique() {
        let g = build_graph(&tree(), 100);
        let mut pairs = HashSet::new();
        for edge in &g.edges {
            assert!(g.node(&edge.source_id).is_some_and(GraphNode::is_dir));
            assert!(g.node(&edge.target_id).is_some());
            assert!(pairs.insert(edge.clone()), "duplicate edge {edge:?}");
        }
        assert_eq!(g.edge_indices().count(), g.edges.len());
    }

    #[test]
    fn clashing_names_never_make_a_file_a_parent() {
        let root = DiskNode::dir(
            "root",
            vec![
                DiskNode::file("a", 900),
                DiskNode::dir("a", vec![DiskNode::file("c.txt", 100)]),
                DiskNode::dir("x", vec![DiskNode::file("y", 50)]),
                DiskNode::file("x/y", 800),
                DiskNode::dir("d", vec![DiskNode::file("", 700)]),
            ],
        );
        let g = build_graph(&root, 100);
        let ids: Vec<&str> = g.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["a", "x", "x/y"]);
        assert!(!g.node("a").unwrap().is_dir());
        assert_eq!(g.node("x/y").unwrap().size, 800);

        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        for edge in &g.edges {
            assert!(g.node(&edge.source_id).is_some_and(GraphNode::is_dir));
        }
    }

    #[test]
    fn segment_ids_reject_empty_segments() {
        assert_eq!(segment_ids("a/b").unwrap(), ["a", "a/b"]);
        assert!(segment_ids("").is_none());
        assert!(segment_ids("d/").is_none());
        assert!(segment_ids("a//b").is_none());
    }

    #[test]
    fn empty_inputs_give_empty_graph() {
        assert!(build_graph(&tree(), 0).is_empty());
        let g = build_graph(&DiskNode::dir("root", Vec::new()), 100);
        assert!(g.nodes.is_empty());
        assert!(g.edges.is_empty());
    }

    #[test]
    fn build_is_deterministic() {
        assert_eq!(build_graph(&tree(), 3), build_graph(&tree(), 3));
    }

    #[test]
    fn colors_by_extension_in_creation_order() {
        let g = build_graph(&tree(), 100);
        let colors = g.node_colors();
        let of = |id: &str| colors[g.index_of(id).unwrap()];
        assert_eq!(of("a"), NEUTRAL);
        assert_eq!(of("a/big.iso"), CATEGORY_PALETTE[0]);
        assert_eq!(of("top.zip"), CATEGORY_PALETTE[1]);
        assert_eq!(of("a/b/mid.mp4"), CATEGORY_PALETTE[2]);
        // README has no extension.
        assert_eq!(of("c/README"), CATEGORY_PALETTE[3]);
    }
}
