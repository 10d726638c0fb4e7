/// Dashboard — headline numbers, top file types, categories and the
/// largest files.
use crate::state::AppState;
use crate::theme::{to_color32, DiskVizTheme};
use diskviz_core::analysis::Share;
use diskviz_core::model::size::{format_count, format_size, truncate_middle};
use diskviz_core::palette::{cyclic, EXTENSION_PALETTE};
use egui::{Color32, Rect, Ui, Vec2};

const CARD_WIDTH: f32 = 200.0;

/// Draw the dashboard.
pub fn dashboard_panel(ui: &mut Ui, state: &AppState, theme: &DiskVizTheme) {
    let summary = &state.summary;

    ui.heading("Overview");
    ui.add_space(6.0);

    // ── Headline cards ──────────────────────────────────────────────
    ui.horizontal_wrapped(|ui| {
        card(ui, theme, "Total size", &format_size(summary.total_size), None);
        card(ui, theme, "Files", &format_count(summary.file_count), None);
        let average = summary
            .average_file_size
            .map_or_else(|| "—".to_owned(), format_size);
        card(ui, theme, "Average file", &average, None);
        match summary.largest_file {
            Some(ref file) => card(
                ui,
                theme,
                "Largest file",
                &format_size(file.size),
                Some(truncate_middle(&file.path, 28).as_str()),
            ),
            None => card(ui, theme, "Largest file", "—", None),
        }
    });

    ui.add_space(12.0);

    // ── Breakdowns ──────────────────────────────────────────────────
    ui.columns(2, |columns| {
        columns[0].label(egui::RichText::new("Top file types").strong());
        columns[0].add_space(4.0);
        share_bars(&mut columns[0], theme, &summary.top_types);

        columns[1].label(egui::RichText::new("Categories").strong());
        columns[1].add_space(4.0);
        share_bars(&mut columns[1], theme, &summary.categories);
    });

    ui.add_space(12.0);
    ui.separator();
    ui.add_space(4.0);

    // ── Largest files ───────────────────────────────────────────────
    ui.label(egui::RichText::new("Largest files").strong());
    ui.add_space(4.0);
    if state.top_files.is_empty() {
        ui.label(egui::RichText::new("No files.").color(theme.text_muted).size(12.0));
        return;
    }
    egui::Grid::new("largest_files")
        .striped(true)
        .num_columns(3)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            for (rank, file) in state.top_files.iter().enumerate() {
                ui.label(
                    egui::RichText::new(format!("{}.", rank + 1))
                        .color(theme.text_muted)
                        .size(12.0),
                );
                ui.label(egui::RichText::new(truncate_middle(&file.path, 64)).size(12.0))
                    .on_hover_text(file.path.as_str());
                ui.label(
                    egui::RichText::new(format_size(file.size))
                        .color(theme.accent)
                        .size(12.0),
                );
                ui.end_row();
            }
        });
}

fn card(ui: &mut Ui, theme: &DiskVizTheme, title: &str, value: &str, detail: Option<&str>) {
    egui::Frame::group(ui.style())
        .fill(theme.surface)
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.label(egui::RichText::new(title).color(theme.text_muted).size(11.0));
            ui.label(
                egui::RichText::new(value)
                    .color(theme.text_primary)
                    .size(20.0)
                    .strong(),
            );
            if let Some(detail) = detail {
                ui.label(egui::RichText::new(detail).color(theme.text_secondary).size(11.0));
            }
        });
}

/// One labelled mini bar per share.
fn share_bars(ui: &mut Ui, theme: &DiskVizTheme, shares: &[Share]) {
    if shares.is_empty() {
        ui.label(egui::RichText::new("Nothing to show.").color(theme.text_muted).size(12.0));
        return;
    }
    let bar_track_bg = ui.visuals().extreme_bg_color;

    for (i, share) in shares.iter().enumerate() {
        let color = to_color32(cyclic(&EXTENSION_PALETTE, i));
        ui.horizontal(|ui| {
            dot(ui, color);
            ui.label(egui::RichText::new(&share.label).size(12.0));
            ui.label(egui::RichText::new(format_size(share.total_size)).size(12.0));
            ui.label(
                egui::RichText::new(format!("({:.1}%)", share.percent))
                    .color(theme.text_muted)
                    .size(11.0),
            );
        });

        // Mini bar.
        let bar_width = (ui.available_width() - 16.0).max(0.0);
        let bar_height = 4.0;
        let (bar_rect, _) =
            ui.allocate_exact_size(Vec2::new(bar_width, bar_height), egui::Sense::hover());
        let painter = ui.painter_at(bar_rect);
        painter.rect_filled(bar_rect, 2.0, bar_track_bg);

        let fill_w = bar_width * (share.percent as f32 / 100.0).clamp(0.0, 1.0);
        if fill_w > 0.5 {
            let fill_rect = Rect::from_min_size(bar_rect.min, Vec2::new(fill_w, bar_height));
            painter.rect_filled(fill_rect, 2.0, color);
        }

        ui.add_space(2.0);
    }
}

/// Small colour swatch in front of a legend label.
pub(crate) fn dot(ui: &mut Ui, color: Color32) {
    let (dot_rect, _) = ui.allocate_exact_size(Vec2::new(10.0, 10.0), egui::Sense::hover());
    ui.painter_at(dot_rect)
        .circle_filled(dot_rect.center(), 4.0, color);
}
