/// Analysis modules: per-extension aggregation, largest files and the
/// dashboard summary built from them.
pub mod file_types;
pub mod summary;
pub mod top_files;

pub use file_types::{
    aggregate_by_extension, categorize_extension, category_breakdown, pie_series, CategoryStats,
    ChartSlice, ExtensionCategory, ExtensionStat, OTHER_SLICE, UNKNOWN_EXTENSION,
};
pub use summary::{DiskSummary, Share};
pub use top_files::{largest_files, FileRef};
