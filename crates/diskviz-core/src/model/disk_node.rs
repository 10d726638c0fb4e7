/// A single node in a scanned (or mocked) directory tree.
///
/// Unlike an arena, the tree is a plain owned recursion: every directory
/// owns its children. This makes the tree trivially immutable once built
/// and lets every consumer borrow it for the duration of one render cycle.
///
/// Deserialisation is deliberately forgiving. Scan payloads come from an
/// external collaborator, so a missing or negative `size` is clamped to 0
/// and a missing (or `null`) `children` list becomes empty instead of
/// failing the whole payload.
use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize};

/// Maximum nesting depth any traversal descends into.
///
/// Directories deeper than this are treated as leaves. Owned trees cannot
/// contain cycles, but a hostile payload can still be deep enough to make
/// recursive consumers overflow the stack.
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// File or directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    #[default]
    File,
    Directory,
}

/// A file or directory in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskNode {
    /// Entry name only (NOT the full path). Unique among siblings.
    pub name: CompactString,

    /// Size in bytes. For a directory this is expected to equal the sum of
    /// its children, but consumers never rely on it.
    #[serde(default, deserialize_with = "clamped_size")]
    pub size: u64,

    #[serde(rename = "type", default)]
    pub kind: NodeKind,

    /// Children in scan order. Always empty for files.
    #[serde(
        default,
        deserialize_with = "nullable_children",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<DiskNode>,
}

impl DiskNode {
    /// Create a file node.
    pub fn file(name: impl Into<CompactString>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    /// Create a directory node whose size is the sum of its children.
    pub fn dir(name: impl Into<CompactString>, children: Vec<DiskNode>) -> Self {
        let size = children.iter().fold(0u64, |acc, c| acc.saturating_add(c.size));
        Self {
            name: name.into(),
            size,
            kind: NodeKind::Directory,
            children,
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Children to traverse. A malformed file node carrying children is
    /// still a leaf.
    #[inline]
    pub fn children(&self) -> &[DiskNode] {
        if self.is_dir() {
            &self.children
        } else {
            &[]
        }
    }

    /// Lowercase extension derived from the name.
    pub fn extension(&self) -> Option<CompactString> {
        derive_extension(&self.name)
    }

    /// Find a direct child directory by name.
    pub fn child_dir(&self, name: &str) -> Option<&DiskNode> {
        self.children()
            .iter()
            .find(|c| c.is_dir() && c.name == name)
    }

    /// Pre-order walk over this node and all descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(self, 0)],
        }
    }
}

/// Derive the lowercase extension from a file name.
///
/// Absent when the name has no `.`, starts with `.` (dotfiles), or ends
/// with a bare `.`.
pub fn derive_extension(name: &str) -> Option<CompactString> {
    if name.starts_with('.') {
        return None;
    }
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(CompactString::from(ext.to_lowercase()))
}

/// Iterator produced by [`DiskNode::walk`].
///
/// Uses an explicit stack so arbitrarily deep payloads cannot overflow the
/// call stack. Children are yielded in their original order.
pub struct Walk<'a> {
    stack: Vec<(&'a DiskNode, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    /// `(node, depth)` where the walk root has depth 0.
    type Item = (&'a DiskNode, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        if depth < MAX_TRAVERSAL_DEPTH {
            for child in node.children().iter().rev() {
                self.stack.push((child, depth + 1));
            }
        }
        Some((node, depth))
    }
}

// ── Tolerant deserialisation ────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSize {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

fn clamped_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawSize>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawSize::Unsigned(v)) => v,
        Some(RawSize::Signed(v)) => v.max(0) as u64,
        Some(RawSize::Float(v)) if v.is_finite() && v > 0.0 => v as u64,
        _ => 0,
    })
}

fn nullable_children<'de, D>(deserializer: D) -> Result<Vec<DiskNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DiskNode>>::deserialize(deserializer)?.unwrap_or_default())
}
