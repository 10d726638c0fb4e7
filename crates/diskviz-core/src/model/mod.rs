/// Data model for diskviz: the owned directory tree and label helpers.
pub mod disk_node;
pub mod size;

pub use disk_node::{derive_extension, DiskNode, NodeKind, Walk, MAX_TRAVERSAL_DEPTH};
