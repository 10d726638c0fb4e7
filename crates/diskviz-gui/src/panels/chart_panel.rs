/// Chart panel — file type breakdown as a donut chart, a bar chart of the
/// largest files, and the full per-extension table.
///
/// Uses `AppState::pie` and `AppState::stats` (computed once per loaded
/// tree) rather than aggregating on every render frame.
use crate::panels::dashboard_panel::dot;
use crate::state::AppState;
use crate::theme::{to_color32, DiskVizTheme};
use diskviz_core::analysis::{ChartSlice, FileRef};
use diskviz_core::model::size::{format_count, format_size, truncate_middle};
use diskviz_core::palette::{cyclic, EXTENSION_PALETTE};
use egui::{Color32, Mesh, Pos2, Rect, Sense, Shape, Ui, Vec2};
use std::f32::consts::{FRAC_PI_2, TAU};

const OUTER_RADIUS: f32 = 130.0;
const INNER_RADIUS: f32 = 70.0;

/// Arc segments for a full turn.
const SEGMENTS_PER_TURN: f32 = 128.0;

/// Largest files shown in the bar chart.
pub const TOP_FILE_BARS: usize = 6;
const BAR_LABEL_CHARS: usize = 28;
const BAR_WIDTH: f32 = 260.0;
const BAR_HEIGHT: f32 = 14.0;

/// One bar of the largest-files chart.
#[derive(Debug, Clone, PartialEq)]
pub struct FileBar {
    pub label: String,
    pub size: u64,
    /// Length relative to the largest bar, in `0.0..=1.0`.
    pub fraction: f32,
}

/// Bars for the first [`TOP_FILE_BARS`] of `files` (already sorted by
/// size, descending).
pub fn file_bars(files: &[FileRef]) -> Vec<FileBar> {
    let files = &files[..files.len().min(TOP_FILE_BARS)];
    let max = files.iter().map(|f| f.size).max().unwrap_or(0);
    files
        .iter()
        .map(|f| FileBar {
            label: truncate_middle(f.name.as_str(), BAR_LABEL_CHARS),
            size: f.size,
            fraction: if max > 0 {
                (f.size as f64 / max as f64) as f32
            } else {
                0.0
            },
        })
        .collect()
}

/// Draw the file types view.
pub fn chart_panel(ui: &mut Ui, state: &AppState, theme: &DiskVizTheme) {
    let color_normal = ui.visuals().text_color();
    let color_muted = theme.text_muted;

    ui.heading("File Types");
    ui.add_space(4.0);

    if state.pie.is_empty() {
        ui.label(
            egui::RichText::new("No files with a size to chart.")
                .color(color_muted)
                .size(12.0),
        );
        return;
    }

    let total: u64 = state.pie.iter().map(|s| s.value).sum();

    ui.horizontal_top(|ui| {
        donut(ui, theme, &state.pie, total);

        ui.add_space(16.0);

        // Legend.
        ui.vertical(|ui| {
            for slice in &state.pie {
                let pct = percent(slice.value, total);
                ui.horizontal(|ui| {
                    dot(ui, to_color32(slice.color));
                    ui.label(
                        egui::RichText::new(slice.label.as_str())
                            .color(color_normal)
                            .size(12.0),
                    );
                    ui.label(
                        egui::RichText::new(format_size(slice.value))
                            .color(color_normal)
                            .size(12.0),
                    );
                    ui.label(
                        egui::RichText::new(format!("({:.1}%)", pct))
                            .color(color_muted)
                            .size(11.0),
                    );
                });
            }
        });

        ui.add_space(24.0);
        largest_file_bars(ui, theme, &state.top_files);
    });

    ui.add_space(12.0);
    ui.separator();
    ui.add_space(4.0);

    // ── Every extension ─────────────────────────────────────────────
    let grand_total = state.summary.total_size;
    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("extension_table")
            .striped(true)
            .num_columns(4)
            .spacing([20.0, 4.0])
            .show(ui, |ui| {
                for header in ["Extension", "Size", "Files", "Share"] {
                    ui.label(egui::RichText::new(header).strong().size(12.0));
                }
                ui.end_row();

                for stat in &state.stats {
                    ui.horizontal(|ui| {
                        dot(ui, to_color32(stat.color()));
                        ui.label(egui::RichText::new(stat.name.as_str()).size(12.0));
                    });
                    ui.label(egui::RichText::new(format_size(stat.total_size)).size(12.0));
                    ui.label(egui::RichText::new(format_count(stat.file_count)).size(12.0));
                    ui.label(
                        egui::RichText::new(format!(
                            "{:.1}%",
                            percent(stat.total_size, grand_total)
                        ))
                        .color(color_muted)
                        .size(12.0),
                    );
                    ui.end_row();
                }
            });
    });
}

fn percent(value: u64, total: u64) -> f64 {
    if total > 0 {
        value as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Horizontal bars for the largest files, each with its path on hover.
fn largest_file_bars(ui: &mut Ui, theme: &DiskVizTheme, files: &[FileRef]) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new("Largest files").strong().size(13.0));
        ui.add_space(4.0);

        let bars = file_bars(files);
        if bars.is_empty() {
            ui.label(egui::RichText::new("Nothing to show.").color(theme.text_muted).size(12.0));
            return;
        }
        let track = ui.visuals().extreme_bg_color;

        for (i, (bar, file)) in bars.iter().zip(files).enumerate() {
            let color = to_color32(cyclic(&EXTENSION_PALETTE, i));
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&bar.label).size(12.0));
                ui.label(
                    egui::RichText::new(format_size(bar.size))
                        .color(theme.text_muted)
                        .size(11.0),
                );
            });

            let (rect, response) =
                ui.allocate_exact_size(Vec2::new(BAR_WIDTH, BAR_HEIGHT), Sense::hover());
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 3.0, track);
            let fill = BAR_WIDTH * bar.fraction;
            if fill > 0.5 {
                painter.rect_filled(
                    Rect::from_min_size(rect.min, Vec2::new(fill, BAR_HEIGHT)),
                    3.0,
                    color,
                );
            }
            response.on_hover_text(file.path.as_str());
            ui.add_space(4.0);
        }
    });
}

/// Paint the donut and show a tooltip for the slice under the pointer.
fn donut(ui: &mut Ui, theme: &DiskVizTheme, slices: &[ChartSlice], total: u64) {
    let (rect, response) =
        ui.allocate_exact_size(Vec2::splat(OUTER_RADIUS * 2.0 + 8.0), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();

    let hovered = response
        .hover_pos()
        .and_then(|pos| slice_at(pos - center, slices, total));

    let mut start = -FRAC_PI_2;
    for (i, slice) in slices.iter().enumerate() {
        let sweep = (slice.value as f64 / total as f64) as f32 * TAU;
        let outer = if hovered == Some(i) {
            OUTER_RADIUS + 4.0
        } else {
            OUTER_RADIUS
        };
        painter.add(arc_mesh(center, INNER_RADIUS, outer, start, sweep, to_color32(slice.color)));
        start += sweep;
    }

    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        format_size(total),
        egui::FontId::proportional(16.0),
        theme.text_primary,
    );

    if let Some(i) = hovered {
        let slice = &slices[i];
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            egui::LayerId::new(egui::Order::Tooltip, response.id),
            response.id.with("donut_tip"),
            |ui| {
                ui.label(egui::RichText::new(slice.label.as_str()).strong().size(12.0));
                ui.label(
                    egui::RichText::new(format!(
                        "{} in {} files ({:.1}%)",
                        format_size(slice.value),
                        format_count(slice.count),
                        percent(slice.value, total)
                    ))
                    .color(theme.text_secondary),
                );
            },
        );
    }
}

/// Index of the slice under `offset` (relative to the centre), if inside
/// the ring.
fn slice_at(offset: Vec2, slices: &[ChartSlice], total: u64) -> Option<usize> {
    let r = offset.length();
    if total == 0 || !(INNER_RADIUS..=OUTER_RADIUS).contains(&r) {
        return None;
    }
    // Angle clockwise from twelve o'clock, in 0..TAU.
    let angle = (offset.y.atan2(offset.x) + FRAC_PI_2).rem_euclid(TAU);
    let mut start = 0.0;
    for (i, slice) in slices.iter().enumerate() {
        let sweep = (slice.value as f64 / total as f64) as f32 * TAU;
        if angle < start + sweep {
            return Some(i);
        }
        start += sweep;
    }
    slices.len().checked_sub(1)
}

/// Ring segment as a triangle strip.
fn arc_mesh(center: Pos2, inner: f32, outer: f32, start: f32, sweep: f32, color: Color32) -> Shape {
    let steps = ((sweep / TAU) * SEGMENTS_PER_TURN).ceil().max(1.0) as u32;
    let mut mesh = Mesh::default();
    for s in 0..=steps {
        let dir = Vec2::angled(start + sweep * s as f32 / steps as f32);
        mesh.colored_vertex(center + dir * outer, color);
        mesh.colored_vertex(center + dir * inner, color);
    }
    for s in 0..steps {
        let i = 2 * s;
        mesh.add_triangle(i, i + 1, i + 2);
        mesh.add_triangle(i + 1, i + 3, i + 2);
    }
    Shape::mesh(mesh)
}
