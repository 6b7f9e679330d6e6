//! Theme module for UI styling

mod dark;
pub mod palette;

/// Apply the application theme to the egui context
pub fn apply_theme(ctx: &egui::Context) {
    ctx.set_visuals(dark::visuals());
    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 4.0);
    });
}

/// Frame for modal dialogs
pub fn dialog_frame() -> egui::Frame {
    egui::Frame::window(&egui::Style::default())
        .fill(palette::BG_ELEVATED)
        .corner_radius(6.0)
        .stroke(egui::Stroke::new(1.0, palette::BORDER_NORMAL))
        .inner_margin(16.0)
}
