/// Drill-down state for the treemap.
///
/// The focus path is the list of directory names from the scan root (not
/// included) down to the subtree currently on screen. An empty path shows
/// the whole tree.
use super::TreemapLayout;
use crate::model::DiskNode;
use compact_str::CompactString;

/// Walk `focus_path` down from `root`.
///
/// Fails soft: a segment that no longer names a child directory (for
/// example after a rescan) yields `root` itself.
pub fn resolve_focus_root<'a, S: AsRef<str>>(root: &'a DiskNode, focus_path: &[S]) -> &'a DiskNode {
    let mut cursor = root;
    for segment in focus_path {
        match cursor.child_dir(segment.as_ref()) {
            Some(next) => cursor = next,
            None => {
                tracing::warn!(
                    segment = segment.as_ref(),
                    "focus path no longer resolves, showing whole tree"
                );
                return root;
            }
        }
    }
    cursor
}

/// What the status line shows for the rect under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverInfo {
    pub name: CompactString,
    pub size: u64,
    /// Focus path followed by the rect's chain, joined with `/`.
    pub full_path: String,
}

/// Focus path plus its named transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreemapFocus {
    path: Vec<CompactString>,
}

impl TreemapFocus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[CompactString] {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Subtree currently on screen.
    pub fn resolve<'a>(&self, root: &'a DiskNode) -> &'a DiskNode {
        resolve_focus_root(root, &self.path)
    }

    /// Descend into the rect at `index`. Files are a no-op.
    ///
    /// Returns `true` if the focus changed.
    pub fn descend(&mut self, layout: &TreemapLayout<'_>, index: usize) -> bool {
        let Some(rect) = layout.rects().get(index) else {
            return false;
        };
        if !rect.node.is_dir() {
            return false;
        }
        self.path
            .extend(layout.chain(index).into_iter().map(CompactString::from));
        tracing::debug!(focus = %self.path.join("/"), "treemap focus descended");
        true
    }

    /// Pop one segment. Returns `false` when already at the root.
    pub fn back(&mut self) -> bool {
        self.path.pop().is_some()
    }

    pub fn reset(&mut self) {
        self.path.clear();
    }

    /// A new tree never keeps the old focus.
    pub fn on_tree_replaced(&mut self) {
        self.reset();
    }

    pub fn full_path(&self, layout: &TreemapLayout<'_>, index: usize) -> String {
        self.path
            .iter()
            .map(CompactString::as_str)
            .chain(layout.chain(index))
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn hover(&self, layout: &TreemapLayout<'_>, index: usize) -> Option<HoverInfo> {
        let rect = layout.rects().get(index)?;
        Some(HoverInfo {
            name: rect.node.name.clone(),
            size: rect.node.size,
            full_path: self.full_path(layout, index),
        })
    }

    /// Header text: the root name, or the focus path joined with ` / `.
    pub fn breadcrumb(&self, root_name: &str) -> String {
        if self.path.is_empty() {
            root_name.to_owned()
        } else {
            self.path.join(" / ")
        }
    }
}
