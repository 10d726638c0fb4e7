/// Bottom status bar — loaded source, totals and the hovered item.
use crate::state::{AppState, View};
use crate::theme::DiskVizTheme;
use diskviz_core::force::SimulationPhase;
use diskviz_core::model::size::{format_count, format_size, truncate_middle};
use egui::Ui;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState, theme: &DiskVizTheme) {
    // Extract theme-adaptive colours once for this frame.
    let color_accent = ui.visuals().hyperlink_color;
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();
    let color_warning = theme.warning;

    ui.horizontal(|ui| {
        if let Some(ref message) = state.last_error {
            ui.label(
                egui::RichText::new(format!("⚠ {message}"))
                    .size(12.0)
                    .color(color_warning),
            );
            ui.separator();
        }

        ui.label(
            egui::RichText::new(truncate_middle(&state.source_label, 60))
                .size(12.0)
                .color(color_normal),
        );

        ui.separator();

        ui.label(
            egui::RichText::new(format!("{} files", format_count(state.response.file_count)))
                .size(12.0)
                .color(color_normal),
        );

        ui.separator();

        ui.label(
            egui::RichText::new(format_size(state.response.total_size))
                .size(12.0)
                .color(color_accent),
        );

        ui.separator();

        ui.label(
            egui::RichText::new(format!("loaded {}", state.loaded_at.format("%H:%M:%S")))
                .size(12.0)
                .color(color_weak),
        );

        if state.view() == View::ForceGraph {
            ui.separator();
            let sim = state.graph.simulation();
            let phase = match sim.phase() {
                SimulationPhase::Idle => "idle",
                SimulationPhase::Running => "running",
                SimulationPhase::Dragging => "dragging",
                SimulationPhase::Settled => "settled",
            };
            ui.label(
                egui::RichText::new(format!(
                    "{} nodes · {} edges · {phase}",
                    state.graph.graph().nodes.len(),
                    state.graph.graph().edges.len(),
                ))
                .size(12.0)
                .color(color_weak),
            );
        }

        // Hovered treemap rect, right-aligned.
        if let Some(ref info) = state.hovered {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format_size(info.size))
                        .size(12.0)
                        .color(color_accent),
                );
                ui.label(
                    egui::RichText::new(truncate_middle(&info.full_path, 80))
                        .size(12.0)
                        .color(color_normal),
                );
            });
        }
    });
}
