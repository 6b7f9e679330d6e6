//! Dark theme visuals for egui

use egui::style::WidgetVisuals;
use egui::{Color32, CornerRadius, Shadow, Stroke, Visuals};

use super::palette;

fn widget(visuals: &mut WidgetVisuals, bg: Color32, border: Color32, fg: Color32, fg_width: f32) {
    visuals.bg_fill = bg;
    visuals.weak_bg_fill = bg;
    visuals.bg_stroke = Stroke::new(1.0, border);
    visuals.fg_stroke = Stroke::new(fg_width, fg);
    visuals.corner_radius = CornerRadius::same(4);
}

/// Create dark theme visuals
pub fn visuals() -> Visuals {
    let mut v = Visuals::dark();

    v.panel_fill = palette::BG_PANEL;
    v.window_fill = palette::BG_ELEVATED;
    v.extreme_bg_color = palette::BG_BASE;
    v.faint_bg_color = palette::BG_INPUT;
    v.override_text_color = Some(palette::TEXT_PRIMARY);
    v.hyperlink_color = palette::ACCENT_PRIMARY;

    v.selection.bg_fill = palette::ACCENT_SUBTLE;
    v.selection.stroke = Stroke::new(1.0, palette::ACCENT_PRIMARY);

    widget(
        &mut v.widgets.noninteractive,
        palette::BG_PANEL,
        palette::BORDER_SUBTLE,
        palette::TEXT_SECONDARY,
        1.0,
    );
    widget(
        &mut v.widgets.inactive,
        palette::BG_INPUT,
        palette::BORDER_SUBTLE,
        palette::TEXT_PRIMARY,
        1.0,
    );
    widget(
        &mut v.widgets.hovered,
        palette::BG_HOVER,
        palette::BORDER_NORMAL,
        palette::TEXT_PRIMARY,
        1.5,
    );
    widget(
        &mut v.widgets.active,
        palette::ACCENT_PRIMARY,
        palette::ACCENT_PRIMARY,
        palette::TEXT_PRIMARY,
        2.0,
    );
    widget(
        &mut v.widgets.open,
        palette::BG_ELEVATED,
        palette::BORDER_NORMAL,
        palette::TEXT_PRIMARY,
        1.0,
    );

    v.window_corner_radius = CornerRadius::same(6);
    v.window_stroke = Stroke::new(1.0, palette::BORDER_SUBTLE);
    v.window_shadow = Shadow {
        offset: [0, 4],
        blur: 16,
        spread: 0,
        color: Color32::from_black_alpha(80),
    };
    v.popup_shadow = Shadow {
        offset: [0, 2],
        blur: 8,
        spread: 0,
        color: Color32::from_black_alpha(60),
    };

    v.text_cursor.stroke = Stroke::new(2.0, palette::TEXT_PRIMARY);
    v
}
