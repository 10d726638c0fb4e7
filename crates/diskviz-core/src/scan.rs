/// Boundary with the external scan collaborator.
///
/// diskviz never walks a real filesystem. A scan result arrives as a JSON
/// payload (from a scanner service or a snapshot file saved from one) and
/// is parsed into a [`ScanResponse`]. Field names match the scanner's wire
/// format.
use crate::model::DiskNode;
use crate::palette::Rgb;
use crate::sample;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MAX_FILES: u32 = 20_000;
pub const MAX_FILES_LIMIT: u32 = 200_000;

/// Everything that can go wrong obtaining a scan result.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scan payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// Transport or status failure reported by the scanner, verbatim.
    #[error("scan failed ({status}): {message}")]
    Scan { status: u16, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub path: String,
    #[serde(default = "default_max_files")]
    pub max_files: u32,
}

fn default_max_files() -> u32 {
    DEFAULT_MAX_FILES
}

impl ScanRequest {
    /// `max_files` is clamped to `1..=200_000`.
    pub fn new(path: impl Into<String>, max_files: u32) -> Self {
        Self {
            path: path.into(),
            max_files: max_files.clamp(1, MAX_FILES_LIMIT),
        }
    }

    pub fn with_default_limit(path: impl Into<String>) -> Self {
        Self::new(path, DEFAULT_MAX_FILES)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawScanResponse")]
pub struct ScanResponse {
    pub root: DiskNode,
    /// Display data, passed through from the scanner.
    pub file_count: u64,
    pub total_size: u64,
    /// Top-level directory name → `#rrggbb`.
    pub group_colors: BTreeMap<String, String>,
}

/// Wire form. Counts the payload leaves out are recomputed from the tree.
#[derive(Deserialize)]
struct RawScanResponse {
    root: DiskNode,
    #[serde(default)]
    file_count: Option<u64>,
    #[serde(default)]
    total_size: Option<u64>,
    #[serde(default)]
    group_colors: BTreeMap<String, String>,
}

impl From<RawScanResponse> for ScanResponse {
    fn from(raw: RawScanResponse) -> Self {
        let counted = match (raw.file_count, raw.total_size) {
            (Some(file_count), Some(total_size)) => (file_count, total_size),
            (file_count, total_size) => {
                let (count, size) = count_files(&raw.root);
                (file_count.unwrap_or(count), total_size.unwrap_or(size))
            }
        };
        Self {
            root: raw.root,
            file_count: counted.0,
            total_size: counted.1,
            group_colors: raw.group_colors,
        }
    }
}

/// File count and saturating byte total of every file under `root`.
fn count_files(root: &DiskNode) -> (u64, u64) {
    root.walk()
        .filter(|(n, _)| n.is_file())
        .fold((0u64, 0u64), |(count, size), (n, _)| {
            (count + 1, size.saturating_add(n.size))
        })
}

impl ScanResponse {
    pub fn from_json_str(payload: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Wrap a locally built tree, counting its files.
    pub fn from_tree(root: DiskNode) -> Self {
        let (file_count, total_size) = count_files(&root);
        Self {
            root,
            file_count,
            total_size,
            group_colors: BTreeMap::new(),
        }
    }

    /// Parsed group colour overrides. Entries that are not `#rrggbb` are
    /// skipped so the group falls back to automatic colouring.
    pub fn group_color_overrides(&self) -> HashMap<String, Rgb> {
        self.group_colors
            .iter()
            .filter_map(|(group, value)| match Rgb::parse_hex(value) {
                Some(color) => Some((group.clone(), color)),
                None => {
                    tracing::warn!(
                        group = group.as_str(),
                        value = value.as_str(),
                        "ignoring unparsable group colour"
                    );
                    None
                }
            })
            .collect()
    }
}

/// Read and parse a snapshot file.
pub fn load_snapshot(path: &Path) -> Result<ScanResponse, SnapshotError> {
    let payload = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let response = ScanResponse::from_json_str(&payload)?;
    tracing::info!(
        path = %path.display(),
        files = response.file_count,
        total_size = response.total_size,
        "snapshot loaded"
    );
    Ok(response)
}

/// Anything that can answer a scan request.
pub trait ScanSource {
    /// Short label for the status bar.
    fn describe(&self) -> String;

    fn scan(&self, request: &ScanRequest) -> Result<ScanResponse, SnapshotError>;
}

/// The built-in sample tree; ignores the request path.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSource;

impl ScanSource for SampleSource {
    fn describe(&self) -> String {
        "sample data".to_owned()
    }

    fn scan(&self, _request: &ScanRequest) -> Result<ScanResponse, SnapshotError> {
        Ok(ScanResponse::from_tree(sample::sample_tree()))
    }
}

/// A JSON snapshot on disk, re-read on every scan.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    pub path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScanSource for SnapshotFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn scan(&self, _request: &ScanRequest) -> Result<ScanResponse, SnapshotError> {
        load_snapshot(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_clamps_max_files() {
        assert_eq!(ScanRequest::new("/data", 0).max_files, 1);
        assert_eq!(ScanRequest::new("/data", 500_000).max_files, MAX_FILES_LIMIT);
        assert_eq!(ScanRequest::with_default_limit("/data").max_files, 20_000);
    }

    #[test]
    fn request_uses_wire_names() {
        let json = serde_json::to_string(&ScanRequest::new("/home", 10)).unwrap();
        assert_eq!(json, r#"{"path":"/home","max_files":10}"#);
        let parsed: ScanRequest = serde_json::from_str(r#"{"path":"/x"}"#).unwrap();
        assert_eq!(parsed.max_files, DEFAULT_MAX_FILES);
    }

    #[test]
    fn response_parses_payload() {
        let payload = r##"{
            "root": {
                "name": "proj", "size": 30, "type": "directory",
                "children": [
                    { "name": "src", "size": 20, "type": "directory",
                      "children": [{ "name": "main.rs", "size": 20, "type": "file", "extension": "rs" }] },
                    { "name": "README.md", "size": 10, "type": "file", "extension": "md" }
                ]
            },
            "file_count": 2,
            "total_size": 30,
            "group_colors": { "src": "#ff8800", "README.md": "not-a-colour" }
        }"##;
        let response = ScanResponse::from_json_str(payload).unwrap();
        assert_eq!(response.file_count, 2);
        assert_eq!(response.root.children.len(), 2);

        let overrides = response.group_color_overrides();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides["src"], Rgb::new(0xff, 0x88, 0x00));
    }

    #[test]
    fn payload_counts_pass_through() {
        let payload = r#"{
            "root": { "name": "r", "type": "directory", "children": [
                { "name": "a.txt", "type": "file", "size": 5 },
                { "name": "b.txt", "type": "file", "size": 7 }
            ]},
            "file_count": 99,
            "total_size": 4096
        }"#;
        let response = ScanResponse::from_json_str(payload).unwrap();
        assert_eq!(response.file_count, 99);
        assert_eq!(response.total_size, 4096);
    }

    #[test]
    fn missing_counts_come_from_the_tree() {
        let payload = r#"{
            "root": { "name": "r", "type": "directory", "children": [
                { "name": "a.txt", "type": "file", "size": 5 },
                { "name": "b.txt", "type": "file", "size": 7 }
            ]},
            "file_count": 40
        }"#;
        let response = ScanResponse::from_json_str(payload).unwrap();
        assert_eq!(response.file_count, 40);
        assert_eq!(response.total_size, 12);
    }

    #[test]
    fn huge_sizes_saturate() {
        let payload = r#"{
            "root": { "name": "r", "type": "directory", "children": [
                { "name": "a.bin", "type": "file", "size": 1e20 },
                { "name": "b.bin", "type": "file", "size": 1e20 }
            ]}
        }"#;
        let response = ScanResponse::from_json_str(payload).unwrap();
        assert_eq!(response.file_count, 2);
        assert_eq!(response.total_size, u64::MAX);
    }

    #[test]
    fn malformed_payload_is_parse_error() {
        let err = ScanResponse::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
    }

    #[test]
    fn missing_snapshot_is_io_error() {
        let err = load_snapshot(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn scan_error_message_is_verbatim() {
        let err = SnapshotError::Scan {
            status: 404,
            message: "path does not exist".to_owned(),
        };
        assert_eq!(err.to_string(), "scan failed (404): path does not exist");
    }

    #[test]
    fn from_tree_counts_files() {
        let response = ScanResponse::from_tree(DiskNode::dir(
            "r",
            vec![DiskNode::file("a", 3), DiskNode::dir("d", vec![DiskNode::file("b", 4)])],
        ));
        assert_eq!(response.file_count, 2);
        assert_eq!(response.total_size, 7);
        assert!(response.group_colors.is_empty());
    }

    #[test]
    fn snapshot_source_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        let response = ScanResponse::from_tree(DiskNode::dir("r", vec![DiskNode::file("a.txt", 5)]));
        std::fs::write(&path, serde_json::to_string(&response).unwrap()).unwrap();

        let source = SnapshotFile::new(&path);
        let loaded = source.scan(&ScanRequest::with_default_limit("r")).unwrap();
        assert_eq!(loaded, response);
    }

    #[test]
    fn sample_source_ignores_path() {
        let response = SampleSource.scan(&ScanRequest::with_default_limit("/nowhere")).unwrap();
        assert_eq!(response.root.name, "root");
        assert!(response.file_count > 0);
    }
}
