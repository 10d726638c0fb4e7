/// Main `eframe::App` implementation for diskviz.
///
/// This is the top-level UI layout: toolbar on top, status bar at the
/// bottom and the selected view filling the central panel.
use crate::panels;
use crate::state::{AppState, View};
use crate::theme::DiskVizTheme;
use crate::widgets;
use diskviz_core::scan::ScanSource;

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so that the
/// initial scan and every derived structure are ready for the first frame.
pub struct DiskVizState {
    pub(crate) inner: AppState,
}

impl DiskVizState {
    /// Run the initial scan against `source`. Call this before
    /// `eframe::run_native`.
    pub fn build(source: Box<dyn ScanSource>, top_n: usize) -> anyhow::Result<Self> {
        Ok(Self {
            inner: AppState::from_source(source, top_n)?,
        })
    }
}

/// The diskviz application.
pub struct DiskVizApp {
    state: AppState,
}

impl DiskVizApp {
    /// Create a new application instance from pre-built state.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: DiskVizState) -> Self {
        DiskVizTheme::for_dark_mode(state.inner.dark_mode).apply(&cc.egui_ctx);
        Self { state: state.inner }
    }
}

impl eframe::App for DiskVizApp {
    /// Override the GPU clear colour to match the active theme background,
    /// preventing a colour mismatch flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        // Called every frame so that toggling dark_mode takes effect
        // immediately on the next rendered frame.
        let theme = DiskVizTheme::for_dark_mode(self.state.dark_mode);
        theme.apply(ctx);

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── About dialog ──────────────────────────────────────────────────
        let mut show_about = self.state.show_about;
        egui::Window::new("About diskviz")
            .open(&mut show_about)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([340.0, 0.0])
            .show(ctx, |ui| {
                let accent = ui.visuals().hyperlink_color;
                let muted = ui.visuals().weak_text_color();
                let normal = ui.visuals().text_color();

                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("◼ diskviz")
                            .size(24.0)
                            .strong()
                            .color(accent),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .size(13.0)
                            .color(muted),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(
                            "Disk usage at a glance.\n\
                             Zoomable treemap, file-type breakdown\n\
                             and a force graph of the largest files.",
                        )
                        .size(12.0)
                        .color(normal),
                    );
                    ui.add_space(12.0);
                    ui.separator();
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new("MIT License · Built with Rust & egui")
                            .size(11.0)
                            .color(muted),
                    );
                    ui.add_space(8.0);
                });
            });
        self.state.show_about = show_about;

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state, &theme);
                ui.add_space(2.0);
            });

        // ── Central panel ─────────────────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view() {
            View::Dashboard => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    panels::dashboard_panel::dashboard_panel(ui, &self.state, &theme);
                });
            }
            View::Treemap => widgets::treemap::treemap(ui, &mut self.state, &theme),
            View::FileTypes => panels::chart_panel::chart_panel(ui, &self.state, &theme),
            View::ForceGraph => widgets::force_graph::force_graph(ui, &mut self.state, &theme),
        });
    }
}
