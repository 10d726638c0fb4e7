/// Dashboard summary computed from a tree in one pass over the analysis
/// results.
use super::file_types::{aggregate_by_extension, category_breakdown, CategoryStats, ExtensionStat};
use super::top_files::{largest_files, FileRef};
use crate::model::DiskNode;

/// Number of extension stats highlighted on the dashboard.
pub const TOP_TYPES: usize = 3;

/// Share of the total occupied by one extension or category.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub total_size: u64,
    /// 0–100.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiskSummary {
    pub total_size: u64,
    pub file_count: u64,
    /// `None` when the tree has no files.
    pub average_file_size: Option<u64>,
    pub largest_file: Option<FileRef>,
    pub top_types: Vec<Share>,
    pub categories: Vec<Share>,
}

impl DiskSummary {
    pub fn from_tree(root: &DiskNode) -> Self {
        let stats = aggregate_by_extension(root);
        Self::from_stats(root, &stats)
    }

    /// Build from stats the caller already computed for the same tree.
    pub fn from_stats(root: &DiskNode, stats: &[ExtensionStat]) -> Self {
        let total_size = stats.iter().fold(0u64, |acc, s| acc.saturating_add(s.total_size));
        let file_count: u64 = stats.iter().map(|s| s.file_count).sum();
        let average_file_size = (file_count > 0).then(|| total_size / file_count);
        let largest_file = largest_files(root, 1).into_iter().next();

        let top_types = stats
            .iter()
            .take(TOP_TYPES)
            .map(|s| share(s.name.to_string(), s.total_size, total_size))
            .collect();
        let categories = category_breakdown(stats)
            .into_iter()
            .map(|CategoryStats { category, total_size: size, .. }| {
                share(category.label().to_owned(), size, total_size)
            })
            .collect();

        Self {
            total_size,
            file_count,
            average_file_size,
            largest_file,
            top_types,
            categories,
        }
    }
}

fn share(label: String, size: u64, total: u64) -> Share {
    Share {
        label,
        total_size: size,
        percent: size as f64 / total.max(1) as f64 * 100.0,
    }
}
