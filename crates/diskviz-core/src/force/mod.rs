/// Force-directed layout for the file graph.
///
/// A velocity-Verlet style relaxation: every tick applies charge
/// (repulsion), centering, link springs and collision to node velocities,
/// then integrates with velocity decay. An `alpha` temperature scales the
/// soft forces and decays toward `alpha_target`; once it drops below
/// `alpha_min` the layout is considered settled.
///
/// The simulator owns no timer. Hosts call [`ForceSimulation::step`] with
/// the elapsed time from whatever loop they run (a frame callback, a test)
/// and the simulator converts it into a bounded number of fixed ticks.
mod forces;
pub mod session;
pub mod view;

pub use forces::Link;
pub use session::GraphSession;
pub use view::{ViewTransform, ZoomConfig};

use crate::graph::DiskGraph;
use forces::Lcg;
use std::collections::BTreeSet;

/// Force and cooling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Negative repels.
    pub charge_strength: f64,
    pub link_distance: f64,
    pub link_strength: f64,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f64,
    pub alpha_min: f64,
    pub alpha_decay: f64,
    /// Temperature the simulation heats toward while a node is dragged.
    pub drag_alpha_target: f64,
    /// Temperature it cools toward once every drag has ended.
    pub release_alpha_target: f64,
    pub collide_strength: f64,
    /// Added to the drawn radius for collision.
    pub collide_padding: f64,
    pub directory_radius: f64,
    pub min_file_radius: f64,
    pub max_file_radius: f64,
    /// Spacing of the initial phyllotaxis spiral.
    pub initial_radius: f64,
    /// Fixed ticks per second of host time.
    pub tick_rate: f64,
    /// Ticks allowed per `step` call; a long frame drops the backlog.
    pub max_ticks_per_step: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            charge_strength: -180.0,
            link_distance: 60.0,
            link_strength: 0.6,
            velocity_decay: 0.4,
            alpha_min: 0.001,
            // Reach alpha_min from 1.0 in 300 ticks.
            alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
            drag_alpha_target: 0.35,
            release_alpha_target: 0.0,
            collide_strength: 1.0,
            collide_padding: 4.0,
            directory_radius: 6.0,
            min_file_radius: 4.0,
            max_file_radius: 18.0,
            initial_radius: 10.0,
            tick_rate: 60.0,
            max_ticks_per_step: 4,
        }
    }
}

/// Square-root scale from file size to drawn radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeScale {
    max_size: f64,
    min_radius: f64,
    max_radius: f64,
}

impl SizeScale {
    /// Domain `[0, max_size]`; an all-zero graph uses `[0, 1]`.
    pub fn new(max_size: u64, config: &SimulationConfig) -> Self {
        Self {
            max_size: if max_size == 0 { 1.0 } else { max_size as f64 },
            min_radius: config.min_file_radius,
            max_radius: config.max_file_radius,
        }
    }

    pub fn apply(&self, size: u64) -> f64 {
        let t = (size as f64 / self.max_size).sqrt();
        self.min_radius + (self.max_radius - self.min_radius) * t
    }

    /// Drawn radius of a file, never below the scale minimum.
    pub fn file_radius(&self, size: u64) -> f64 {
        self.apply(size).max(self.min_radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    /// Stopped, or nothing to simulate.
    Idle,
    Running,
    /// At least one node is pinned by a drag.
    Dragging,
    /// Alpha has decayed below `alpha_min`.
    Settled,
}

/// Simulated state of one graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct SimNode {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Drawn radius.
    pub radius: f64,
    /// Fixed position while dragged.
    pub pin: Option<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct ForceSimulation {
    config: SimulationConfig,
    nodes: Vec<SimNode>,
    links: Vec<Link>,
    center: (f64, f64),
    alpha: f64,
    alpha_target: f64,
    dragging: BTreeSet<usize>,
    accumulator: f64,
    ticks: u64,
    stopped: bool,
    rng: Lcg,
}

impl ForceSimulation {
    /// Seed nodes on a phyllotaxis spiral around the canvas centre.
    pub fn new(graph: &DiskGraph, width: f64, height: f64, config: SimulationConfig) -> Self {
        let scale = SizeScale::new(
            graph.nodes.iter().map(|n| n.size).max().unwrap_or(0),
            &config,
        );
        let center = (width / 2.0, height / 2.0);
        let angle_step = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());

        let nodes: Vec<SimNode> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let r = config.initial_radius * (0.5 + i as f64).sqrt();
                let a = i as f64 * angle_step;
                SimNode {
                    x: center.0 + r * a.cos(),
                    y: center.1 + r * a.sin(),
                    vx: 0.0,
                    vy: 0.0,
                    radius: if n.is_dir() {
                        config.directory_radius
                    } else {
                        scale.file_radius(n.size)
                    },
                    pin: None,
                }
            })
            .collect();

        let pairs: Vec<(usize, usize)> = graph.edge_indices().collect();
        let links = Link::resolve(&pairs, nodes.len());

        tracing::debug!(nodes = nodes.len(), links = links.len(), "force simulation seeded");
        Self {
            config,
            nodes,
            links,
            center,
            alpha: 1.0,
            alpha_target: 0.0,
            dragging: BTreeSet::new(),
            accumulator: 0.0,
            ticks: 0,
            stopped: false,
            rng: Lcg::new(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    /// Total ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn phase(&self) -> SimulationPhase {
        if self.stopped || self.nodes.is_empty() {
            SimulationPhase::Idle
        } else if !self.dragging.is_empty() {
            SimulationPhase::Dragging
        } else if self.alpha < self.config.alpha_min {
            SimulationPhase::Settled
        } else {
            SimulationPhase::Running
        }
    }

    /// Whether the host should keep scheduling frames.
    pub fn needs_animation(&self) -> bool {
        matches!(
            self.phase(),
            SimulationPhase::Running | SimulationPhase::Dragging
        )
    }

    /// Move the centring target, e.g. after the canvas was resized.
    pub fn set_center(&mut self, width: f64, height: f64) {
        self.center = (width / 2.0, height / 2.0);
    }

    /// Stop stepping. The node set stays readable but never moves again.
    pub fn stop(&mut self) {
        if !self.stopped {
            tracing::debug!(ticks = self.ticks, "force simulation stopped");
        }
        self.stopped = true;
        self.dragging.clear();
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Advance by `dt` seconds of host time. Returns the number of ticks run.
    pub fn step(&mut self, dt: f64) -> usize {
        if self.stopped || self.nodes.is_empty() {
            return 0;
        }
        let tick_dt = 1.0 / self.config.tick_rate;
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }

        let mut ran = 0;
        while self.accumulator >= tick_dt && ran < self.config.max_ticks_per_step {
            self.tick();
            self.accumulator -= tick_dt;
            ran += 1;
        }
        // Drop whatever a long frame left behind instead of catching up.
        self.accumulator = self.accumulator.min(tick_dt);
        ran
    }

    /// One fixed simulation tick.
    pub fn tick(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        let cfg = &self.config;
        self.alpha += (self.alpha_target - self.alpha) * cfg.alpha_decay;
        let alpha = self.alpha;

        forces::many_body(&mut self.nodes, cfg.charge_strength, alpha, &mut self.rng);
        forces::center(&mut self.nodes, self.center.0, self.center.1);
        forces::link(
            &mut self.nodes,
            &self.links,
            cfg.link_distance,
            cfg.link_strength,
            alpha,
            &mut self.rng,
        );
        forces::collide(
            &mut self.nodes,
            cfg.collide_padding,
            cfg.collide_strength,
            &mut self.rng,
        );

        let keep = 1.0 - cfg.velocity_decay;
        for node in &mut self.nodes {
            match node.pin {
                Some((px, py)) => {
                    node.x = px;
                    node.y = py;
                    node.vx = 0.0;
                    node.vy = 0.0;
                }
                None => {
                    node.vx *= keep;
                    node.vy *= keep;
                    node.x += node.vx;
                    node.y += node.vy;
                }
            }
        }
        self.ticks += 1;
    }

    // ── Drag ────────────────────────────────────────────────────────

    /// Pin `index` where it is. The first active drag heats the layout.
    pub fn drag_start(&mut self, index: usize) -> bool {
        if self.stopped {
            return false;
        }
        let Some(node) = self.nodes.get_mut(index) else {
            return false;
        };
        node.pin = Some((node.x, node.y));
        if self.dragging.is_empty() {
            self.alpha_target = self.config.drag_alpha_target;
        }
        self.dragging.insert(index);
        true
    }

    /// Move a dragged node's pin.
    pub fn drag_move(&mut self, index: usize, x: f64, y: f64) {
        if !self.dragging.contains(&index) || !(x.is_finite() && y.is_finite()) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(index) {
            node.pin = Some((x, y));
        }
    }

    /// Release `index`. Once no drags remain the layout cools again.
    pub fn drag_end(&mut self, index: usize) {
        if !self.dragging.remove(&index) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(index) {
            node.pin = None;
        }
        if self.dragging.is_empty() {
            self.alpha_target = self.config.release_alpha_target;
        }
    }

    pub fn is_dragging(&self, index: usize) -> bool {
        self.dragging.contains(&index)
    }

    /// Closest node whose circle contains `(x, y)`, in simulation space.
    pub fn node_at(&self, x: f64, y: f64) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| {
                let d = ((n.x - x).powi(2) + (n.y - y).powi(2)).sqrt();
                (d <= n.radius).then_some((i, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}
