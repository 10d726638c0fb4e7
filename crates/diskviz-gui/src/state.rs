/// Application state management.
///
/// Centralises all mutable state that the UI reads and writes. Everything
/// derived from the scan tree (extension stats, dashboard summary, chart
/// series, the force graph) is recomputed in one place, `load_response`,
/// whenever the tree is replaced. There is no incremental update path.
use anyhow::Context;
use diskviz_core::analysis::{
    aggregate_by_extension, largest_files, pie_series, ChartSlice, DiskSummary, ExtensionStat, FileRef,
};
use diskviz_core::force::GraphSession;
use diskviz_core::graph::DEFAULT_TOP_N;
use diskviz_core::palette::Rgb;
use diskviz_core::sample::sample_tree;
use diskviz_core::scan::{SampleSource, ScanRequest, ScanResponse, ScanSource};
use diskviz_core::treemap::{HoverInfo, TreemapFocus};
use std::collections::HashMap;

/// Slices shown in the file-type pie before the tail folds into "Other".
pub const PIE_HEAD: usize = 12;

/// Rows in the dashboard's largest-files list.
pub const TOP_FILES_SHOWN: usize = 10;

/// Canvas the graph is seeded on before the first frame reports a size.
const INITIAL_CANVAS: (f64, f64) = (960.0, 640.0);

/// Largest top-N the toolbar accepts. Pairwise repulsion is quadratic.
pub const MAX_TOP_N: usize = 500;

/// Which visualisation fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Treemap,
    FileTypes,
    ForceGraph,
}

impl View {
    pub const ALL: [View; 4] = [View::Dashboard, View::Treemap, View::FileTypes, View::ForceGraph];

    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "📊 Dashboard",
            View::Treemap => "🗺 Treemap",
            View::FileTypes => "🥧 File Types",
            View::ForceGraph => "🕸 Force Graph",
        }
    }
}

/// All application state.
pub struct AppState {
    // ── Source ─────────────────────────────────────────
    source: Box<dyn ScanSource>,
    pub source_label: String,
    pub loaded_at: chrono::DateTime<chrono::Local>,
    /// Last scan failure, shown verbatim in the status bar.
    pub last_error: Option<String>,

    // ── Results ────────────────────────────────────────
    pub response: ScanResponse,
    pub stats: Vec<ExtensionStat>,
    pub summary: DiskSummary,
    pub pie: Vec<ChartSlice>,
    pub top_files: Vec<FileRef>,
    pub group_overrides: HashMap<String, Rgb>,

    // ── Treemap ────────────────────────────────────────
    pub focus: TreemapFocus,
    pub hovered: Option<HoverInfo>,

    // ── Force graph ────────────────────────────────────
    pub graph: GraphSession,
    /// Node currently pinned by the pointer.
    pub dragging: Option<usize>,

    // ── UI state ───────────────────────────────────────
    view: View,
    pub show_about: bool,
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,
}

impl AppState {
    /// Run the first scan against `source` and derive everything from it.
    pub fn from_source(source: Box<dyn ScanSource>, top_n: usize) -> anyhow::Result<Self> {
        let label = source.describe();
        let response = source
            .scan(&ScanRequest::with_default_limit(label.clone()))
            .with_context(|| format!("initial scan of {label} failed"))?;
        tracing::info!(source = %label, files = response.file_count, "initial scan loaded");
        Ok(Self::with_response(source, label, response, top_n))
    }

    fn with_response(
        source: Box<dyn ScanSource>,
        source_label: String,
        response: ScanResponse,
        top_n: usize,
    ) -> Self {
        let stats = aggregate_by_extension(&response.root);
        let top_n = top_n.clamp(1, MAX_TOP_N);
        Self {
            source,
            source_label,
            loaded_at: chrono::Local::now(),
            last_error: None,
            summary: DiskSummary::from_stats(&response.root, &stats),
            pie: pie_series(&stats, PIE_HEAD),
            top_files: largest_files(&response.root, TOP_FILES_SHOWN),
            group_overrides: response.group_color_overrides(),
            graph: GraphSession::new(&response.root, top_n, INITIAL_CANVAS.0, INITIAL_CANVAS.1),
            stats,
            response,
            focus: TreemapFocus::new(),
            hovered: None,
            dragging: None,
            view: View::Dashboard,
            show_about: false,
            dark_mode: true,
        }
    }

    /// Replace the tree and recompute every derived structure.
    ///
    /// The treemap focus is reset and the previous simulator is stopped
    /// before the new graph is seeded.
    pub fn load_response(&mut self, response: ScanResponse) {
        self.stats = aggregate_by_extension(&response.root);
        self.summary = DiskSummary::from_stats(&response.root, &self.stats);
        self.pie = pie_series(&self.stats, PIE_HEAD);
        self.top_files = largest_files(&response.root, TOP_FILES_SHOWN);
        self.group_overrides = response.group_color_overrides();

        self.focus.on_tree_replaced();
        self.hovered = None;
        self.dragging = None;
        self.graph.rebuild(&response.root, self.graph.top_n());

        self.response = response;
        self.loaded_at = chrono::Local::now();
        self.last_error = None;
        tracing::info!(
            files = self.response.file_count,
            total_size = self.response.total_size,
            "scan result replaced"
        );
    }

    /// Ask the source again. On failure the previous results stay on
    /// screen and the error message is kept for the status bar.
    pub fn rescan(&mut self) -> anyhow::Result<()> {
        let request = ScanRequest::with_default_limit(self.source_label.clone());
        match self.source.scan(&request) {
            Ok(response) => {
                self.load_response(response);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(source = %self.source_label, error = %e, "rescan failed");
                self.last_error = Some(e.to_string());
                Err(e).context("rescan failed")
            }
        }
    }

    /// Rebuild the graph with a new top-N bound.
    pub fn set_top_n(&mut self, top_n: usize) {
        let top_n = top_n.clamp(1, MAX_TOP_N);
        if top_n != self.graph.top_n() {
            self.dragging = None;
            self.graph.rebuild(&self.response.root, top_n);
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Switch views. Leaving the force graph stops its simulator, coming
    /// back seeds a fresh one.
    pub fn set_view(&mut self, view: View) {
        if view == self.view {
            return;
        }
        if self.view == View::ForceGraph {
            self.dragging = None;
            self.graph.teardown();
        }
        if view == View::ForceGraph && self.graph.simulation().is_stopped() {
            self.graph.rebuild(&self.response.root, self.graph.top_n());
        }
        self.hovered = None;
        self.view = view;
    }

    // ── Treemap navigation ─────────────────────────────

    pub fn treemap_back(&mut self) {
        self.focus.back();
    }

    pub fn treemap_reset(&mut self) {
        self.focus.reset();
    }
}

impl Default for AppState {
    /// The built-in sample tree with the default graph bound.
    fn default() -> Self {
        let source = SampleSource;
        let response = ScanResponse::from_tree(sample_tree());
        Self::with_response(Box::new(source), source.describe(), response, DEFAULT_TOP_N)
    }
}
