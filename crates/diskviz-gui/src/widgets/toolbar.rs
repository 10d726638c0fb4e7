/// Top action bar -- view selector, reload, graph bound, theme toggle and branding.
use crate::state::{AppState, View, MAX_TOP_N};
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        // App title -- uses the egui accent/hyperlink colour so it adapts to
        // dark and light mode automatically.
        ui.label(
            egui::RichText::new("◼ diskviz")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        for view in View::ALL {
            if ui
                .selectable_label(state.view() == view, view.label())
                .clicked()
            {
                state.set_view(view);
            }
        }

        ui.separator();

        if ui
            .add(egui::Button::new("🔄 Reload").min_size(egui::vec2(70.0, 28.0)))
            .on_hover_text(format!("Scan {} again", state.source_label))
            .clicked()
        {
            // The error is already kept for the status bar.
            let _ = state.rescan();
        }

        // Graph bound only matters for the force view.
        if state.view() == View::ForceGraph {
            ui.separator();
            ui.label(egui::RichText::new("Top").size(12.0));
            let mut top_n = state.graph.top_n();
            let changed = ui
                .add(egui::DragValue::new(&mut top_n).range(1..=MAX_TOP_N).speed(1.0))
                .on_hover_text("Number of largest files in the graph")
                .changed();
            if changed {
                state.set_top_n(top_n);
            }
            if ui.button("⟲ View").on_hover_text("Reset zoom and pan").clicked() {
                state.graph.view.reset();
            }
        }

        // Right-aligned controls.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("ℹ").on_hover_text("About diskviz").clicked() {
                state.show_about = true;
            }

            // ── Theme toggle (☀ light / 🌙 dark) ──────────────────
            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }
        });
    });
}
