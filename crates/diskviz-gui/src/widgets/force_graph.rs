/// Force graph widget — the top-N largest files and their directories as a
/// node-link diagram.
///
/// The simulator is stepped once per frame with egui's stable frame delta,
/// and a repaint is requested only while it is still moving or a node is
/// being dragged. Pointer input is in screen space; `GraphSession` maps it
/// through the zoom/pan transform.
///
/// - Drag a node to pin it; the rest of the graph relaxes around it.
/// - Drag empty canvas to pan, scroll to zoom.
/// - Click a node to emphasise its ancestry, click empty canvas to clear.
use crate::state::AppState;
use crate::theme::{to_color32, DiskVizTheme};
use diskviz_core::graph::Emphasis;
use diskviz_core::model::size::{format_size, truncate_middle};
use egui::{Pos2, Sense, Stroke, Ui, Vec2};

/// Zoom factor per scrolled point.
const ZOOM_SPEED: f64 = 0.002;

/// Labels are drawn for nodes at least this large on screen.
const MIN_LABEL_RADIUS: f32 = 9.0;

fn emphasis_alpha(emphasis: Emphasis) -> f32 {
    match emphasis {
        Emphasis::Normal => 0.85,
        Emphasis::Emphasized => 1.0,
        Emphasis::Dimmed => 0.15,
    }
}

/// Draw and drive the force graph.
pub fn force_graph(ui: &mut Ui, state: &mut AppState, theme: &DiskVizTheme) {
    let (bounds, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
    if bounds.width() < 10.0 || bounds.height() < 10.0 {
        return;
    }
    state
        .graph
        .resize(bounds.width() as f64, bounds.height() as f64);

    let painter = ui.painter_at(bounds);
    painter.rect_filled(bounds, 0.0, theme.canvas);

    if state.graph.graph().is_empty() {
        painter.text(
            bounds.center(),
            egui::Align2::CENTER_CENTER,
            "No files to graph",
            egui::FontId::proportional(14.0),
            theme.text_muted,
        );
        return;
    }

    let local = |p: Pos2| ((p.x - bounds.min.x) as f64, (p.y - bounds.min.y) as f64);

    // ── Input ──────────────────────────────────────────────────────
    if response.drag_started() {
        if let Some((sx, sy)) = response.interact_pointer_pos().map(local) {
            if let Some(index) = state.graph.node_at_screen(sx, sy) {
                if state.graph.begin_drag(index) {
                    state.dragging = Some(index);
                }
            }
        }
    }
    if response.dragged() {
        match state.dragging {
            Some(index) => {
                if let Some((sx, sy)) = response.interact_pointer_pos().map(local) {
                    state.graph.drag_to(index, sx, sy);
                }
            }
            None => {
                let delta = response.drag_delta();
                state.graph.pan_by(delta.x as f64, delta.y as f64);
            }
        }
    }
    if response.drag_stopped() {
        if let Some(index) = state.dragging.take() {
            state.graph.end_drag(index);
        }
    }
    if response.clicked() {
        if let Some((sx, sy)) = response.interact_pointer_pos().map(local) {
            state.graph.click(sx, sy);
        }
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            if let Some((sx, sy)) = response.hover_pos().map(local) {
                state.graph.zoom_at(sx, sy, (scroll as f64 * ZOOM_SPEED).exp());
            }
        }
    }

    // ── Step ───────────────────────────────────────────────────────
    let dt = ui.input(|i| i.stable_dt) as f64;
    state.graph.step(dt);
    if state.graph.simulation().needs_animation() {
        ui.ctx().request_repaint();
    }

    // ── Render ─────────────────────────────────────────────────────
    let session = &state.graph;
    let graph = session.graph();
    let nodes = session.simulation().nodes();
    let colors = session.colors();
    let k = session.view.k as f32;
    let screen = |i: usize| {
        session
            .screen_pos(i)
            .map(|(x, y)| bounds.min + Vec2::new(x as f32, y as f32))
    };

    let edge_states = session.highlight.edge_states(graph);
    for (edge, emphasis) in graph.edges.iter().zip(edge_states) {
        let (Some(s), Some(t)) = (graph.index_of(&edge.source_id), graph.index_of(&edge.target_id)) else {
            continue;
        };
        let (Some(a), Some(b)) = (screen(s), screen(t)) else {
            continue;
        };
        let width = if emphasis == Emphasis::Emphasized { 2.0 } else { 1.0 };
        painter.line_segment(
            [a, b],
            Stroke::new(width, theme.edge.gamma_multiply(emphasis_alpha(emphasis) * 0.6)),
        );
    }

    let node_states = session.highlight.node_states(graph);
    for (i, (node, emphasis)) in graph.nodes.iter().zip(node_states).enumerate() {
        let Some(center) = screen(i) else { continue };
        let radius = nodes[i].radius as f32 * k;
        let alpha = emphasis_alpha(emphasis);
        let fill = to_color32(colors[i]).gamma_multiply(alpha);
        painter.circle_filled(center, radius, fill);
        if node.is_dir() || emphasis == Emphasis::Emphasized {
            painter.circle_stroke(center, radius, Stroke::new(1.0, theme.text_secondary.gamma_multiply(alpha)));
        }
        if radius >= MIN_LABEL_RADIUS && emphasis != Emphasis::Dimmed {
            painter.text(
                center + Vec2::new(0.0, radius + 2.0),
                egui::Align2::CENTER_TOP,
                truncate_middle(&node.name, 18),
                egui::FontId::proportional(10.0),
                theme.text_primary.gamma_multiply(alpha),
            );
        }
    }

    // ── Hover tooltip ──────────────────────────────────────────────
    let hovered = response
        .hover_pos()
        .map(local)
        .and_then(|(sx, sy)| session.node_at_screen(sx, sy));
    if let Some(i) = hovered {
        if let Some(center) = screen(i) {
            painter.circle_stroke(
                center,
                nodes[i].radius as f32 * k + 2.0,
                Stroke::new(2.0, theme.highlight),
            );
        }
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        let node = &graph.nodes[i];
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            egui::LayerId::new(egui::Order::Tooltip, response.id),
            response.id.with("graph_tip"),
            |ui| {
                ui.label(egui::RichText::new(node.name.as_str()).strong().size(12.0));
                let detail = if node.is_dir() {
                    "Directory".to_owned()
                } else {
                    format_size(node.size)
                };
                ui.label(egui::RichText::new(detail).color(theme.text_secondary));
                ui.label(
                    egui::RichText::new(truncate_middle(&node.id, 72))
                        .size(11.0)
                        .color(theme.text_muted),
                );
            },
        );
    }
}
