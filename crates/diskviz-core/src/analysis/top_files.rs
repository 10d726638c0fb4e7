/// Top-N largest files.
///
/// A full collect-then-sort rather than a streaming top-K. A scan result is
/// already bounded by the caller's `max_files`, so the simple version is
/// cheap enough.
use crate::model::{DiskNode, MAX_TRAVERSAL_DEPTH};
use compact_str::CompactString;

/// A single entry in the "largest files" results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: CompactString,
    /// Slash-joined names below the scan root, ending with `name`.
    pub path: String,
    pub size: u64,
    pub extension: Option<CompactString>,
}

/// The `limit` largest files under `root`, biggest first.
///
/// Equal sizes keep depth-first traversal order.
pub fn largest_files(root: &DiskNode, limit: usize) -> Vec<FileRef> {
    if limit == 0 {
        return Vec::new();
    }

    let mut files = Vec::new();
    // (node, path of its parent relative to the root, depth)
    let mut stack: Vec<(&DiskNode, String, usize)> = root
        .children()
        .iter()
        .rev()
        .map(|child| (child, String::new(), 1))
        .collect();

    while let Some((node, parent_path, depth)) = stack.pop() {
        let path = if parent_path.is_empty() {
            node.name.to_string()
        } else {
            format!("{parent_path}/{}", node.name)
        };

        if node.is_file() {
            files.push(FileRef {
                name: node.name.clone(),
                path,
                size: node.size,
                extension: node.extension(),
            });
        } else if depth < MAX_TRAVERSAL_DEPTH {
            for child in node.children().iter().rev() {
                stack.push((child, path.clone(), depth + 1));
            }
        }
    }

    files.sort_by(|a, b| b.size.cmp(&a.size));
    files.truncate(limit);
    files
}
