/// Per-extension aggregation and broad file-type categories.
///
/// `aggregate_by_extension` walks the whole tree once and accumulates size
/// and count per uppercased extension. The dashboard and the File Types
/// view then fold those stats into categories or chart slices.
use crate::model::DiskNode;
use crate::palette::{self, Rgb, EXTENSION_PALETTE, NEUTRAL};
use compact_str::CompactString;
use std::collections::HashMap;

/// Key used for files without an extension.
pub const UNKNOWN_EXTENSION: &str = "UNKNOWN";

/// Aggregated totals for one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionStat {
    /// Uppercased extension, or [`UNKNOWN_EXTENSION`].
    pub name: CompactString,
    pub total_size: u64,
    pub file_count: u64,
    /// Position in the sorted output modulo the palette length.
    pub color_index: usize,
}

impl ExtensionStat {
    pub fn color(&self) -> Rgb {
        palette::cyclic(&EXTENSION_PALETTE, self.color_index)
    }
}

/// Aggregate file sizes and counts per extension.
///
/// Output is sorted by `total_size` descending. Ties keep the order in
/// which each extension was first encountered during the walk.
pub fn aggregate_by_extension(root: &DiskNode) -> Vec<ExtensionStat> {
    let mut stats: Vec<ExtensionStat> = Vec::new();
    let mut index: HashMap<CompactString, usize> = HashMap::new();

    for (node, _) in root.walk() {
        if !node.is_file() {
            continue;
        }
        let key = match node.extension() {
            Some(ext) => CompactString::from(ext.to_uppercase()),
            None => CompactString::const_new(UNKNOWN_EXTENSION),
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            stats.push(ExtensionStat {
                name: key,
                total_size: 0,
                file_count: 0,
                color_index: 0,
            });
            stats.len() - 1
        });
        let entry = &mut stats[slot];
        entry.total_size = entry.total_size.saturating_add(node.size);
        entry.file_count += 1;
    }

    // `sort_by` is stable, so first-encountered order breaks ties.
    stats.sort_by(|a, b| b.total_size.cmp(&a.total_size));
    for (i, stat) in stats.iter_mut().enumerate() {
        stat.color_index = i % EXTENSION_PALETTE.len();
    }

    tracing::debug!(extensions = stats.len(), "aggregated extension stats");
    stats
}

// ── Categories ──────────────────────────────────────────────────────

/// Broad file type categories shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionCategory {
    Media,
    Text,
    Documents,
    Archives,
    Other,
}

impl ExtensionCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Media => "Media",
            Self::Text => "Text",
            Self::Documents => "Documents",
            Self::Archives => "Archives",
            Self::Other => "Other",
        }
    }
}

/// Categorise an extension (case-insensitive, with or without a `.`).
///
/// Uppercased into a fixed stack buffer; anything longer than 8 bytes
/// cannot match a known extension and is `Other`.
pub fn categorize_extension(ext: &str) -> ExtensionCategory {
    let bytes = ext.trim_start_matches('.').as_bytes();
    if bytes.len() > 8 {
        return ExtensionCategory::Other;
    }
    let mut upper = [0u8; 8];
    for (dest, &src) in upper.iter_mut().zip(bytes) {
        *dest = src.to_ascii_uppercase();
    }
    let Ok(upper) = std::str::from_utf8(&upper[..bytes.len()]) else {
        return ExtensionCategory::Other;
    };

    match upper {
        "MP4" | "AVI" | "MOV" | "MKV" | "MP3" | "WAV" | "FLAC" | "AAC" => ExtensionCategory::Media,
        "TXT" | "TOML" | "JSON" | "MD" | "CSV" | "YAML" | "YML" | "XML" | "LOG" => {
            ExtensionCategory::Text
        }
        "PDF" | "DOC" | "DOCX" | "XLS" | "XLSX" | "PPT" | "PPTX" => ExtensionCategory::Documents,
        "ZIP" | "RAR" | "7Z" | "TAR" | "GZ" => ExtensionCategory::Archives,
        _ => ExtensionCategory::Other,
    }
}

/// Size and count totals for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStats {
    pub category: ExtensionCategory,
    pub total_size: u64,
    pub file_count: u64,
}

/// Fold extension stats into categories, sorted by size descending.
///
/// Only categories that actually occur are returned.
pub fn category_breakdown(stats: &[ExtensionStat]) -> Vec<CategoryStats> {
    let mut out: Vec<CategoryStats> = Vec::with_capacity(5);
    for stat in stats {
        let category = categorize_extension(&stat.name);
        match out.iter_mut().find(|c| c.category == category) {
            Some(entry) => {
                entry.total_size = entry.total_size.saturating_add(stat.total_size);
                entry.file_count += stat.file_count;
            }
            None => out.push(CategoryStats {
                category,
                total_size: stat.total_size,
                file_count: stat.file_count,
            }),
        }
    }
    out.sort_by(|a, b| b.total_size.cmp(&a.total_size));
    out
}

// ── Chart series ────────────────────────────────────────────────────

/// Label of the folded tail slice.
pub const OTHER_SLICE: &str = "Other";

/// One slice of the file-type donut chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: CompactString,
    pub value: u64,
    pub count: u64,
    pub color: Rgb,
}

/// Keep the first `head` stats and fold the rest into one "Other" slice.
///
/// Zero-sized slices are dropped.
pub fn pie_series(stats: &[ExtensionStat], head: usize) -> Vec<ChartSlice> {
    let split = head.min(stats.len());
    let mut slices: Vec<ChartSlice> = stats[..split]
        .iter()
        .map(|s| ChartSlice {
            label: s.name.clone(),
            value: s.total_size,
            count: s.file_count,
            color: s.color(),
        })
        .collect();

    let tail = &stats[split..];
    if !tail.is_empty() {
        slices.push(ChartSlice {
            label: CompactString::const_new(OTHER_SLICE),
            value: tail.iter().fold(0u64, |acc, s| acc.saturating_add(s.total_size)),
            count: tail.iter().map(|s| s.file_count).sum(),
            color: NEUTRAL,
        });
    }

    slices.retain(|s| s.value > 0);
    slices
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    fn stat(name: &str, total_size: u64, file_count: u64) -> ExtensionStat {
        ExtensionStat {
            name: CompactString::from(name),
            total_size,
            file_count,
            color_index: 0,
        }
    }

    // ── aggregate_by_extension ───────────────────────────────────────────

    /// `root{ a.txt=1MiB, dir/b.txt=2MiB }` collapses into one TXT entry.
    #[test]
    fn aggregate_merges_same_extension() {
        let root = DiskNode::dir(
            "root",
            vec![
                DiskNode::file("a.txt", MIB),
                DiskNode::dir("dir", vec![DiskNode::file("b.txt", 2 * MIB)]),
            ],
        );
        let stats = aggregate_by_extension(&root);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].name, "TXT");
        assert_eq!(stats[0].total_size, 3 * MIB);
        assert_eq!(stats[0].file_count, 2);
    }

    #[test]
    fn aggregate_uses_unknown_for_missing_extension() {
        let root = DiskNode::dir(
            "root",
            vec![DiskNode::file("Makefile", 10), DiskNode::file(".env", 5)],
        );
        let stats = aggregate_by_extension(&root);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].name, UNKNOWN_EXTENSION);
        assert_eq!(stats[0].file_count, 2);
    }

    /// Equal totals keep first-encountered order; colours follow position.
    #[test]
    fn aggregate_sorted_with_stable_ties() {
        let root = DiskNode::dir(
            "root",
            vec![
                DiskNode::file("a.log", 5),
                DiskNode::file("b.csv", 5),
                DiskNode::file("c.iso", 50),
            ],
        );
        let stats = aggregate_by_extension(&root);
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["ISO", "LOG", "CSV"]);
        let colors: Vec<usize> = stats.iter().map(|s| s.color_index).collect();
        assert_eq!(colors, [0, 1, 2]);
    }

    #[test]
    fn aggregate_empty_tree() {
        assert!(aggregate_by_extension(&DiskNode::dir("root", Vec::new())).is_empty());
    }

    #[test]
    fn color_index_wraps_around_palette() {
        let files = (0..10)
            .map(|i| DiskNode::file(format!("f.e{i}"), 100 - i))
            .collect();
        let stats = aggregate_by_extension(&DiskNode::dir("root", files));
        assert_eq!(stats[8].color_index, 0);
        assert_eq!(stats[9].color_index, 1);
        assert_eq!(stats[9].color(), EXTENSION_PALETTE[1]);
    }

    // ── categories ───────────────────────────────────────────────────────

    #[test]
    fn categorize_known_extensions() {
        assert_eq!(categorize_extension("MP4"), ExtensionCategory::Media);
        assert_eq!(categorize_extension("flac"), ExtensionCategory::Media);
        assert_eq!(categorize_extension("log"), ExtensionCategory::Text);
        assert_eq!(categorize_extension(".Json"), ExtensionCategory::Text);
        assert_eq!(categorize_extension("PPTX"), ExtensionCategory::Documents);
        assert_eq!(categorize_extension("7z"), ExtensionCategory::Archives);
    }

    #[test]
    fn categorize_unknown_is_other() {
        assert_eq!(categorize_extension("RAW"), ExtensionCategory::Other);
        assert_eq!(categorize_extension(UNKNOWN_EXTENSION), ExtensionCategory::Other);
        assert_eq!(categorize_extension(""), ExtensionCategory::Other);
        assert_eq!(categorize_extension("averyverylongext"), ExtensionCategory::Other);
    }

    #[test]
    fn breakdown_sums_and_sorts() {
        let stats = [
            stat("MP4", 400, 1),
            stat("ZIP", 300, 2),
            stat("MP3", 200, 3),
            stat("DLL", 10, 1),
        ];
        let cats = category_breakdown(&stats);
        assert_eq!(cats.len(), 3);
        assert_eq!(cats[0].category, ExtensionCategory::Media);
        assert_eq!(cats[0].total_size, 600);
        assert_eq!(cats[0].file_count, 4);
        assert_eq!(cats[1].category, ExtensionCategory::Archives);
        assert_eq!(cats[2].category, ExtensionCategory::Other);
    }

    #[test]
    fn totals_saturate_on_huge_sizes() {
        let root = DiskNode::dir(
            "root",
            vec![DiskNode::file("a.iso", u64::MAX), DiskNode::file("b.iso", u64::MAX)],
        );
        let stats = aggregate_by_extension(&root);
        assert_eq!(stats[0].total_size, u64::MAX);
        assert_eq!(stats[0].file_count, 2);

        let huge = [stat("ISO", u64::MAX, 1), stat("IMG", u64::MAX, 1)];
        assert_eq!(category_breakdown(&huge)[0].total_size, u64::MAX);
        let slices = pie_series(&[stat("A", 1, 1), stat("ISO", u64::MAX, 1), stat("IMG", u64::MAX, 1)], 1);
        assert_eq!(slices[1].value, u64::MAX);
    }

    // ── pie_series ───────────────────────────────────────────────────────

    #[test]
    fn pie_series_folds_tail_into_other() {
        let stats = [stat("A", 30, 1), stat("B", 20, 1), stat("C", 5, 2), stat("D", 1, 1)];
        let slices = pie_series(&stats, 2);
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[2].label, OTHER_SLICE);
        assert_eq!(slices[2].value, 6);
        assert_eq!(slices[2].count, 3);
        assert_eq!(slices[2].color, NEUTRAL);
    }

    #[test]
    fn pie_series_drops_zero_slices() {
        let stats = [stat("A", 30, 1), stat("EMPTY", 0, 4)];
        let slices = pie_series(&stats, 12);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].label, "A");
    }
}
