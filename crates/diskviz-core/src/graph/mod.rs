/// Graph builder and ancestry highlighting for the force-directed view.
pub mod build;
pub mod highlight;

pub use build::{build_graph, DiskGraph, GraphConfig, GraphEdge, GraphNode, DEFAULT_TOP_N};
pub use highlight::{ancestor_chain, Emphasis, Highlight};
