/// Treemap layout engine.
///
/// Converts a (sub)tree into nested, non-overlapping rectangles whose
/// areas follow a log-scaled file weight. Every call is a pure function of
/// the tree, the canvas size and the [`LayoutConfig`]; callers re-run it
/// whenever any of those change.
///
/// Padding follows a padding stack: each directory reserves a label band
/// at the top and a strip on the right, and siblings are separated by the
/// inner padding, half of which is taken from each side.
pub mod focus;
pub mod squarify;

pub use focus::{resolve_focus_root, HoverInfo, TreemapFocus};
pub use squarify::{squarify, Bounds, PHI};

use crate::model::DiskNode;
use crate::palette::{ColorAssigner, Rgb, TABLEAU10};
use std::collections::{HashMap, VecDeque};

/// Treemap tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Label band reserved at the top of every directory.
    pub padding_top: f64,
    pub padding_right: f64,
    /// Gap between siblings.
    pub padding_inner: f64,
    /// Files smaller than this are weighted as if they had this size.
    pub min_file_weight_bytes: u64,
    /// Directories deeper than this are laid out as single leaves.
    pub max_depth: usize,
    /// Target aspect ratio for squarified rows.
    pub ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding_top: 28.0,
            padding_right: 7.0,
            padding_inner: 3.0,
            min_file_weight_bytes: 1024 * 1024,
            max_depth: 64,
            ratio: PHI,
        }
    }
}

impl LayoutConfig {
    /// Layout weight of a single file.
    #[inline]
    pub fn file_weight(&self, size: u64) -> f64 {
        (size as f64).ln_1p().max((self.min_file_weight_bytes as f64).ln_1p())
    }
}

/// One visible node of the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutRect<'a> {
    pub node: &'a DiskNode,
    /// Index of the parent rect, `None` for children of the layout root.
    pub parent: Option<usize>,
    /// 1 for direct children of the layout root.
    pub depth: usize,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    /// Aggregate layout weight.
    pub weight: f64,
}

impl LayoutRect<'_> {
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x0, self.y0, self.x1, self.y1)
    }

    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.bounds().contains(x, y)
    }
}

/// Result of [`layout`]: rects in breadth-first order (parents before
/// children, siblings in descending weight order). The layout root itself
/// is not included.
#[derive(Debug, Clone)]
pub struct TreemapLayout<'a> {
    root: &'a DiskNode,
    rects: Vec<LayoutRect<'a>>,
}

impl<'a> TreemapLayout<'a> {
    pub fn root(&self) -> &'a DiskNode {
        self.root
    }

    pub fn rects(&self) -> &[LayoutRect<'a>] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Indices from the depth-1 ancestor down to `index`, inclusive.
    pub fn lineage(&self, index: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut cursor = Some(index);
        while let Some(i) = cursor {
            let Some(rect) = self.rects.get(i) else { break };
            chain.push(i);
            cursor = rect.parent;
        }
        chain.reverse();
        chain
    }

    /// Names from the depth-1 ancestor down to `index`, inclusive.
    pub fn chain(&self, index: usize) -> Vec<&'a str> {
        self.lineage(index)
            .into_iter()
            .map(|i| self.rects[i].node.name.as_str())
            .collect()
    }

    /// Deepest rect containing the point.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        // Breadth-first order: the last match is the deepest.
        self.rects.iter().rposition(|r| r.contains(x, y))
    }

    /// Name of the colour group `index` belongs to.
    ///
    /// Normally the depth-1 ancestor. When the layout root has at most one
    /// top-level child, that child would colour everything the same, so
    /// the depth-2 ancestor is used instead where there is one.
    pub fn group_key(&self, index: usize) -> &'a str {
        let lineage = self.lineage(index);
        let Some(&top) = lineage.first() else {
            return "";
        };
        let top_level_count = self.rects.iter().take_while(|r| r.depth == 1).count();
        if top_level_count <= 1 {
            if let Some(&second) = lineage.get(1) {
                return self.rects[second].node.name.as_str();
            }
        }
        self.rects[top].node.name.as_str()
    }

    /// Fill colour per rect: an explicit group override first, otherwise
    /// cyclic Tableau10 assignment in first-seen order.
    pub fn group_colors(&self, overrides: &HashMap<String, Rgb>) -> Vec<Rgb> {
        let mut assigner = ColorAssigner::new(TABLEAU10);
        (0..self.rects.len())
            .map(|i| {
                let key = self.group_key(i);
                match overrides.get(key) {
                    Some(&color) => color,
                    None => assigner.assign(key),
                }
            })
            .collect()
    }
}

/// Lay out `root` on a `width × height` canvas with the default config.
pub fn layout(root: &DiskNode, width: f64, height: f64) -> TreemapLayout<'_> {
    layout_with(root, width, height, &LayoutConfig::default())
}

/// Lay out `root` on a `width × height` canvas.
pub fn layout_with<'a>(
    root: &'a DiskNode,
    width: f64,
    height: f64,
    config: &LayoutConfig,
) -> TreemapLayout<'a> {
    let mut cells = build_cells(root, config);
    let canvas = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    cells[0].bounds = Bounds::new(0.0, 0.0, canvas(width), canvas(height));

    let half = config.padding_inner / 2.0;
    let mut rects = Vec::with_capacity(cells.len().saturating_sub(1));
    let mut rect_index: Vec<Option<usize>> = vec![None; cells.len()];
    let mut queue = VecDeque::from([0usize]);

    while let Some(id) = queue.pop_front() {
        if !cells[id].children.is_empty() {
            // Children never leave the parent minus its label band and
            // right strip, even when those leave no room at all.
            let inner = cells[id]
                .bounds
                .inset(0.0, config.padding_top, config.padding_right, 0.0);
            let area = inner.inset(-half, -half, -half, -half);
            let values: Vec<f64> = cells[id].children.iter().map(|&c| cells[c].value).collect();
            let tiles = squarify(&values, area, config.ratio);
            for (k, tile) in tiles.into_iter().enumerate() {
                let child = cells[id].children[k];
                cells[child].bounds = tile.inset(half, half, half, half).clamp_within(inner);
                queue.push_back(child);
            }
        }

        if cells[id].depth > 0 {
            let cell = &cells[id];
            rect_index[id] = Some(rects.len());
            rects.push(LayoutRect {
                node: cell.node,
                parent: cell.parent.and_then(|p| rect_index[p]),
                depth: cell.depth,
                x0: cell.bounds.x0,
                y0: cell.bounds.y0,
                x1: cell.bounds.x1,
                y1: cell.bounds.y1,
                weight: cell.value,
            });
        }
    }

    tracing::debug!(
        rects = rects.len(),
        width,
        height,
        root = %root.name,
        "treemap laid out"
    );
    TreemapLayout { root, rects }
}

// ── Weighted hierarchy ──────────────────────────────────────────────

struct Cell<'a> {
    node: &'a DiskNode,
    parent: Option<usize>,
    depth: usize,
    value: f64,
    /// Sorted by value, descending.
    children: Vec<usize>,
    bounds: Bounds,
}

/// Flatten the tree into an arena with aggregated weights.
///
/// Cells are created breadth-first, so every child has a larger index than
/// its parent and weights can be summed in one reverse sweep.
fn build_cells<'a>(root: &'a DiskNode, config: &LayoutConfig) -> Vec<Cell<'a>> {
    let mut cells = vec![Cell {
        node: root,
        parent: None,
        depth: 0,
        value: 0.0,
        children: Vec::new(),
        bounds: Bounds::default(),
    }];

    let mut next = 0;
    while next < cells.len() {
        let (node, depth) = (cells[next].node, cells[next].depth);
        if node.is_file() {
            cells[next].value = config.file_weight(node.size);
        } else if depth >= config.max_depth {
            // Too deep to subdivide; keep the subtree's weight as one leaf.
            cells[next].value = node
                .walk()
                .filter(|(n, _)| n.is_file())
                .map(|(n, _)| config.file_weight(n.size))
                .sum();
        } else {
            for child in node.children() {
                let id = cells.len();
                cells.push(Cell {
                    node: child,
                    parent: Some(next),
                    depth: depth + 1,
                    value: 0.0,
                    children: Vec::new(),
                    bounds: Bounds::default(),
                });
                cells[next].children.push(id);
            }
        }
        next += 1;
    }

    for id in (1..cells.len()).rev() {
        if let Some(parent) = cells[id].parent {
            let value = cells[id].value;
            cells[parent].value += value;
        }
    }

    for id in 0..cells.len() {
        let mut children = std::mem::take(&mut cells[id].children);
        // Stable, so equal weights keep scan order.
        children.sort_by(|&a, &b| cells[b].value.total_cmp(&cells[a].value));
        cells[id].children = children;
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const MIB: u64 = 1024 * 1024;

    fn sample() -> DiskNode {
        DiskNode::dir(
            "root",
            vec![
                DiskNode::dir(
                    "docs",
                    vec![
                        DiskNode::file("a.pdf", 5 * MIB),
                        DiskNode::file("b.txt", 100),
                        DiskNode::dir("old", vec![DiskNode::file("c.csv", 15 * MIB)]),
                    ],
                ),
                DiskNode::dir(
                    "media",
                    vec![DiskNode::file("clip.mp4", 450 * MIB), DiskNode::file("song.mp3", 8 * MIB)],
                ),
                DiskNode::file("notes.md", 0),
            ],
        )
    }

    #[test]
    fn test_small_files_use_floor_weight() {
        let cfg = LayoutConfig::default();
        assert_relative_eq!(cfg.file_weight(0), cfg.file_weight(MIB));
        assert_relative_eq!(cfg.file_weight(10), (MIB as f64).ln_1p());
        assert!(cfg.file_weight(450 * MIB) > cfg.file_weight(MIB));
    }

    /// Root is not rendered; everything else is, parents before children.
    #[test]
    fn test_breadth_first_without_root() {
        let tree = sample();
        let layout = layout(&tree, 800.0, 600.0);
        assert_eq!(layout.len(), 9);
        assert!(layout.rects().iter().all(|r| r.depth >= 1));
        for (i, rect) in layout.rects().iter().enumerate() {
            if let Some(p) = rect.parent {
                assert!(p < i);
                assert_eq!(layout.rects()[p].depth + 1, rect.depth);
            } else {
                assert_eq!(rect.depth, 1);
            }
        }
    }

    /// Siblings are ordered by weight: "docs" has three floored files and
    /// outweighs "media" with two.
    #[test]
    fn test_children_sorted_by_weight() {
        let tree = sample();
        let layout = layout(&tree, 800.0, 600.0);
        let top: Vec<&str> = layout
            .rects()
            .iter()
            .filter(|r| r.depth == 1)
            .map(|r| r.node.name.as_str())
            .collect();
        assert_eq!(top, ["docs", "media", "notes.md"]);
    }

    #[test]
    fn test_children_inside_padded_parent() {
        let tree = sample();
        let cfg = LayoutConfig::default();
        let layout = layout_with(&tree, 1600.0, 1200.0, &cfg);
        for rect in layout.rects() {
            let Some(p) = rect.parent else { continue };
            let parent = &layout.rects()[p];
            let eps = 1e-9;
            assert!(rect.x0 >= parent.x0 - eps);
            assert!(rect.y0 >= parent.y0 + cfg.padding_top - eps);
            assert!(rect.x1 <= parent.x1 - cfg.padding_right + eps);
            assert!(rect.y1 <= parent.y1 + eps);
        }
    }

    /// Every rect within its parent's box minus the label band and right
    /// strip (the canvas for top-level rects). Bands that do not fit are
    /// clamped to the parent's bottom and left edges.
    fn assert_padded_containment(layout: &TreemapLayout<'_>, cfg: &LayoutConfig, w: f64, h: f64) {
        let eps = 1e-9;
        for rect in layout.rects() {
            let (px0, py0, px1, py1) = match rect.parent {
                Some(p) => {
                    let parent = &layout.rects()[p];
                    (parent.x0, parent.y0, parent.x1, parent.y1)
                }
                None => (0.0, 0.0, w, h),
            };
            let top = (py0 + cfg.padding_top).min(py1);
            let right = (px1 - cfg.padding_right).max(px0);
            assert!(rect.x0 >= px0 - eps && rect.x1 <= right + eps, "{} escapes horizontally", rect.node.name);
            assert!(rect.y0 >= top - eps && rect.y1 <= py1 + eps, "{} escapes vertically", rect.node.name);
            assert!(rect.x1 >= rect.x0 && rect.y1 >= rect.y0);
        }
    }

    #[test]
    fn test_deep_chain_stays_inside_parents() {
        let mut node = DiskNode::file("leaf.bin", MIB);
        for depth in (0..30).rev() {
            node = DiskNode::dir(format!("d{depth}"), vec![node]);
        }
        let tree = DiskNode::dir("root", vec![node]);
        let cfg = LayoutConfig::default();
        let layout = layout_with(&tree, 800.0, 600.0, &cfg);
        assert_eq!(layout.len(), 31);
        assert_padded_containment(&layout, &cfg, 800.0, 600.0);
        let deepest = layout.rects().last().unwrap();
        assert_eq!(deepest.height(), 0.0);
        assert!(deepest.y1 <= 600.0);
    }

    #[test]
    fn test_empty_directory_stays_inside_padding() {
        let tree = DiskNode::dir(
            "root",
            vec![DiskNode::file("a.txt", MIB), DiskNode::dir("empty", Vec::new())],
        );
        let cfg = LayoutConfig::default();
        let layout = layout_with(&tree, 800.0, 600.0, &cfg);
        assert_padded_containment(&layout, &cfg, 800.0, 600.0);
        let empty = layout.rects().iter().find(|r| r.node.name == "empty").unwrap();
        assert!(empty.x1 <= 800.0 - cfg.padding_right);
        assert_eq!(empty.width() * empty.height(), 0.0);
    }

    #[test]
    fn test_sample_stays_inside_padding_on_small_canvas() {
        let tree = sample();
        let cfg = LayoutConfig::default();
        for (w, h) in [(800.0, 600.0), (120.0, 90.0), (30.0, 20.0)] {
            assert_padded_containment(&layout_with(&tree, w, h, &cfg), &cfg, w, h);
        }
    }

    #[test]
    fn test_zero_canvas_is_degenerate_not_nan() {
        let tree = sample();
        for (w, h) in [(0.0, 600.0), (800.0, 0.0), (0.0, 0.0), (f64::NAN, -5.0)] {
            let layout = layout(&tree, w, h);
            assert_eq!(layout.len(), 9);
            for r in layout.rects() {
                assert!(r.x0.is_finite() && r.x1.is_finite() && r.y0.is_finite() && r.y1.is_finite());
                assert!(r.x1 >= r.x0 && r.y1 >= r.y0);
            }
        }
    }

    #[test]
    fn test_empty_root_has_no_rects() {
        let tree = DiskNode::dir("root", Vec::new());
        assert!(layout(&tree, 800.0, 600.0).is_empty());
    }

    #[test]
    fn test_chain_and_hit_test() {
        let tree = sample();
        let layout = layout(&tree, 800.0, 600.0);
        let idx = layout
            .rects()
            .iter()
            .position(|r| r.node.name == "c.csv")
            .unwrap();
        assert_eq!(layout.chain(idx), ["docs", "old", "c.csv"]);

        let r = &layout.rects()[idx];
        let hit = layout.hit_test((r.x0 + r.x1) / 2.0, (r.y0 + r.y1) / 2.0);
        assert_eq!(hit, Some(idx));
        assert_eq!(layout.hit_test(-10.0, -10.0), None);
    }

    #[test]
    fn test_group_key_uses_top_level_ancestor() {
        let tree = sample();
        let layout = layout(&tree, 800.0, 600.0);
        let csv = layout.rects().iter().position(|r| r.node.name == "c.csv").unwrap();
        assert_eq!(layout.group_key(csv), "docs");
    }

    /// A single top-level directory would paint everything one colour, so
    /// grouping moves down a level.
    #[test]
    fn test_group_key_with_single_top_level_child() {
        let tree = DiskNode::dir("root", vec![sample()]);
        let layout = layout(&tree, 800.0, 600.0);
        let csv = layout.rects().iter().position(|r| r.node.name == "c.csv").unwrap();
        assert_eq!(layout.group_key(csv), "docs");
        assert_eq!(layout.group_key(0), "root");
    }

    #[test]
    fn test_group_colors_prefer_overrides() {
        let tree = sample();
        let layout = layout(&tree, 800.0, 600.0);
        let red = Rgb::new(255, 0, 0);
        let overrides = HashMap::from([("media".to_owned(), red)]);
        let colors = layout.group_colors(&overrides);
        assert_eq!(colors[0], TABLEAU10[0]);
        assert_eq!(colors[1], red);
        // "notes.md" is the second automatically coloured group.
        assert_eq!(colors[2], TABLEAU10[1]);
    }

    #[test]
    fn test_max_depth_turns_deep_directories_into_leaves() {
        let tree = sample();
        let cfg = LayoutConfig {
            max_depth: 1,
            ..LayoutConfig::default()
        };
        let layout = layout_with(&tree, 800.0, 600.0, &cfg);
        assert_eq!(layout.len(), 3);
        let docs = &layout.rects()[0];
        let expected =
            cfg.file_weight(5 * MIB) + cfg.file_weight(100) + cfg.file_weight(15 * MIB);
        assert_relative_eq!(docs.weight, expected, max_relative = 1e-12);
    }
}
