/// Treemap widget — nested, zoomable disk usage map.
///
/// Rectangles come from `diskviz_core::treemap`, recomputed every frame
/// from the focused subtree and the widget's size. This widget only maps
/// layout coordinates to screen space, paints, and routes pointer input
/// into the focus transitions.
///
/// **Navigation**:
/// - Click a directory to focus it (its chain is appended to the focus path).
/// - ◀ pops one level, ⌂ returns to the whole tree.
///
/// **Colour**: one colour per top-level group, overridable by the scan's
/// `group_colors`.
use crate::state::AppState;
use crate::theme::{darken, lighten, to_color32, DiskVizTheme};
use diskviz_core::model::size::{format_size, truncate_middle};
use diskviz_core::treemap::{layout_with, LayoutConfig, LayoutRect};
use egui::{Color32, Rect, Sense, Stroke, StrokeKind, Ui, Vec2};

/// Minimum rectangle dimension to show a label.
const MIN_LABEL_W: f32 = 60.0;
const MIN_LABEL_H: f32 = 16.0;

/// Approximate glyph width at label size, for truncation.
const CHAR_W: f32 = 6.0;

/// Draw the treemap for the current focus.
pub fn treemap(ui: &mut Ui, state: &mut AppState, theme: &DiskVizTheme) {
    let is_light = theme.is_light();

    // ── Navigation bar ─────────────────────────────────────────────
    let mut go_back = false;
    let mut go_home = false;
    ui.horizontal(|ui| {
        let at_root = state.focus.is_root();
        if ui
            .add_enabled(!at_root, egui::Button::new("◀").min_size(Vec2::new(28.0, 22.0)))
            .on_hover_text("Up one level")
            .clicked()
        {
            go_back = true;
        }
        if ui
            .add_enabled(!at_root, egui::Button::new("⌂").min_size(Vec2::new(28.0, 22.0)))
            .on_hover_text("Whole tree")
            .clicked()
        {
            go_home = true;
        }

        ui.add_space(8.0);

        ui.label(
            egui::RichText::new(state.focus.breadcrumb(&state.response.root.name))
                .color(theme.text_primary)
                .size(12.0)
                .strong(),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(format_size(state.focus.resolve(&state.response.root).size))
                    .color(theme.accent)
                    .size(12.0),
            );
        });
    });
    if go_back {
        state.treemap_back();
    }
    if go_home {
        state.treemap_reset();
    }

    ui.add_space(2.0);

    // ── Allocate the treemap area ──────────────────────────────────
    let (bounds, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
    if bounds.width() < 10.0 || bounds.height() < 10.0 {
        return;
    }

    let painter = ui.painter_at(bounds);
    painter.rect_filled(bounds, 0.0, theme.canvas);

    let root = state.focus.resolve(&state.response.root);
    let config = LayoutConfig::default();
    let map = layout_with(root, bounds.width() as f64, bounds.height() as f64, &config);

    if map.is_empty() {
        painter.text(
            bounds.center(),
            egui::Align2::CENTER_CENTER,
            if root.is_dir() { "Empty directory" } else { root.name.as_str() },
            egui::FontId::proportional(14.0),
            theme.text_muted,
        );
        state.hovered = None;
        return;
    }

    let colors = map.group_colors(&state.group_overrides);
    let to_screen = |r: &LayoutRect<'_>| {
        Rect::from_min_max(
            bounds.min + Vec2::new(r.x0 as f32, r.y0 as f32),
            bounds.min + Vec2::new(r.x1 as f32, r.y1 as f32),
        )
    };

    // ── Render (parents first, so children paint on top) ───────────
    for (rect, &color) in map.rects().iter().zip(&colors) {
        let screen = to_screen(rect);
        if screen.width() < 0.5 || screen.height() < 0.5 {
            continue;
        }
        let base = to_color32(color);

        if rect.node.is_dir() {
            let frame_bg = if is_light {
                lighten(base, 0.6)
            } else {
                darken(base, 0.6)
            };
            painter.rect_filled(screen, 0.0, frame_bg);
            painter.rect_stroke(screen, 0.0, Stroke::new(1.0, base), StrokeKind::Inside);

            // Name and size in the label band.
            if screen.width() >= MIN_LABEL_W && screen.height() >= config.padding_top as f32 {
                let max_chars = ((screen.width() - 8.0) / CHAR_W) as usize;
                painter.text(
                    screen.left_top() + Vec2::new(4.0, 3.0),
                    egui::Align2::LEFT_TOP,
                    truncate_middle(&rect.node.name, max_chars),
                    egui::FontId::proportional(11.0),
                    theme.text_primary,
                );
                painter.text(
                    screen.left_top() + Vec2::new(4.0, 15.0),
                    egui::Align2::LEFT_TOP,
                    format_size(rect.node.size),
                    egui::FontId::proportional(9.0),
                    theme.text_muted,
                );
            }
        } else {
            // Darken slightly with depth for visual distinction.
            let fill = darken(base, 0.06 * rect.depth.saturating_sub(1) as f32);
            painter.rect_filled(screen, 0.0, fill);

            let border_color = if is_light {
                Color32::from_rgba_premultiplied(255, 255, 255, 180)
            } else {
                Color32::from_rgba_premultiplied(0, 0, 0, 80)
            };
            painter.rect_stroke(
                screen,
                0.0,
                Stroke::new(0.5, border_color),
                StrokeKind::Inside,
            );

            if screen.width() >= MIN_LABEL_W && screen.height() >= MIN_LABEL_H {
                let max_chars = ((screen.width() - 6.0) / CHAR_W) as usize;
                let label_color = theme.label_on(fill);
                painter.text(
                    screen.left_top() + Vec2::new(3.0, 2.0),
                    egui::Align2::LEFT_TOP,
                    truncate_middle(&rect.node.name, max_chars),
                    egui::FontId::proportional(10.0),
                    label_color,
                );
                if screen.height() >= 28.0 {
                    painter.text(
                        screen.left_top() + Vec2::new(3.0, 14.0),
                        egui::Align2::LEFT_TOP,
                        format_size(rect.node.size),
                        egui::FontId::proportional(9.0),
                        label_color.gamma_multiply(0.8),
                    );
                }
            }
        }
    }

    // ── Hover highlight + tooltip (deepest hovered item wins) ──────
    let hit = response.hover_pos().and_then(|pos| {
        let local = pos - bounds.min;
        map.hit_test(local.x as f64, local.y as f64)
    });
    state.hovered = hit.and_then(|i| state.focus.hover(&map, i));

    let Some(index) = hit else {
        return;
    };
    let rect = &map.rects()[index];
    painter.rect_stroke(
        to_screen(rect),
        0.0,
        Stroke::new(2.0, theme.highlight),
        StrokeKind::Inside,
    );
    if rect.node.is_dir() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    if let Some(ref info) = state.hovered {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            egui::LayerId::new(egui::Order::Tooltip, response.id),
            response.id.with("treemap_tip"),
            |ui| {
                ui.label(egui::RichText::new(info.name.as_str()).strong().size(12.0));
                let kind = if rect.node.is_dir() { "Directory" } else { "File" };
                ui.label(
                    egui::RichText::new(format!("{} ({kind})", format_size(info.size)))
                        .color(theme.text_secondary),
                );
                ui.label(
                    egui::RichText::new(truncate_middle(&info.full_path, 72))
                        .size(11.0)
                        .color(theme.text_muted),
                );
            },
        );
    }

    // Click on a directory focuses it; files are a no-op.
    if response.clicked() {
        state.focus.descend(&map, index);
    }
}
