/// One force-graph visualisation session: the graph, its simulator and the
/// view state (highlight, zoom) that goes with it.
///
/// Pointer input arrives in screen coordinates and is mapped through the
/// view transform before it reaches the simulator.
use super::{ForceSimulation, SimulationConfig, ViewTransform, ZoomConfig};
use crate::graph::{build_graph, DiskGraph, Highlight};
use crate::model::DiskNode;
use crate::palette::Rgb;

#[derive(Debug, Clone)]
pub struct GraphSession {
    graph: DiskGraph,
    colors: Vec<Rgb>,
    simulation: ForceSimulation,
    pub highlight: Highlight,
    pub view: ViewTransform,
    zoom: ZoomConfig,
    top_n: usize,
    canvas: (f64, f64),
}

impl GraphSession {
    pub fn new(root: &DiskNode, top_n: usize, width: f64, height: f64) -> Self {
        Self::with_config(
            root,
            top_n,
            width,
            height,
            SimulationConfig::default(),
            ZoomConfig::default(),
        )
    }

    pub fn with_config(
        root: &DiskNode,
        top_n: usize,
        width: f64,
        height: f64,
        config: SimulationConfig,
        zoom: ZoomConfig,
    ) -> Self {
        let graph = build_graph(root, top_n);
        let colors = graph.node_colors();
        let simulation = ForceSimulation::new(&graph, width, height, config);
        Self {
            graph,
            colors,
            simulation,
            highlight: Highlight::default(),
            view: ViewTransform::IDENTITY,
            zoom,
            top_n,
            canvas: (width, height),
        }
    }

    pub fn graph(&self) -> &DiskGraph {
        &self.graph
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn simulation(&self) -> &ForceSimulation {
        &self.simulation
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Replace the graph. The previous simulator is stopped before the new
    /// one is seeded, and the old highlight is dropped.
    pub fn rebuild(&mut self, root: &DiskNode, top_n: usize) {
        self.simulation.stop();
        let config = self.simulation.config().clone();
        self.graph = build_graph(root, top_n);
        self.colors = self.graph.node_colors();
        self.simulation = ForceSimulation::new(&self.graph, self.canvas.0, self.canvas.1, config);
        self.highlight.clear();
        self.top_n = top_n;
    }

    /// Stop stepping for good, e.g. when the view is closed.
    pub fn teardown(&mut self) {
        self.simulation.stop();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        if (width, height) != self.canvas {
            self.canvas = (width, height);
            self.simulation.set_center(width, height);
        }
    }

    pub fn step(&mut self, dt: f64) -> usize {
        self.simulation.step(dt)
    }

    // ── Pointer input (screen space) ────────────────────────────────

    pub fn node_at_screen(&self, sx: f64, sy: f64) -> Option<usize> {
        let (wx, wy) = self.view.invert(sx, sy);
        self.simulation.node_at(wx, wy)
    }

    pub fn begin_drag(&mut self, index: usize) -> bool {
        self.simulation.drag_start(index)
    }

    pub fn drag_to(&mut self, index: usize, sx: f64, sy: f64) {
        let (wx, wy) = self.view.invert(sx, sy);
        self.simulation.drag_move(index, wx, wy);
    }

    pub fn end_drag(&mut self, index: usize) {
        self.simulation.drag_end(index);
    }

    /// Click: highlight the ancestry of the node under the pointer, or
    /// clear the highlight on empty canvas.
    pub fn click(&mut self, sx: f64, sy: f64) {
        match self.node_at_screen(sx, sy) {
            Some(index) => {
                let id = self.graph.nodes[index].id.clone();
                self.highlight.select(&id);
            }
            None => self.highlight.clear(),
        }
    }

    pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
        self.view.zoom_about(sx, sy, factor, &self.zoom);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.view.pan(dx, dy);
    }

    /// Screen position of node `index`.
    pub fn screen_pos(&self, index: usize) -> Option<(f64, f64)> {
        let node = self.simulation.nodes().get(index)?;
        Some(self.view.apply(node.x, node.y))
    }
}
