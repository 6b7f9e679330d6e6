//! Completion dialog shown when a run finishes

use crate::state::{AppAction, SharedAppState};
use crate::theme::{self, palette};

/// Show the completion dialog if a run has finished
pub fn show_completion_dialog(ctx: &egui::Context, app_state: &SharedAppState) {
    let Some(completion) = app_state.lock().completion.clone() else {
        return;
    };

    // Semi-transparent background overlay
    let screen_rect = ctx.screen_rect();
    egui::Area::new(egui::Id::new("completion_overlay"))
        .fixed_pos(screen_rect.min)
        .order(egui::Order::Background)
        .show(ctx, |ui| {
            ui.painter()
                .rect_filled(screen_rect, 0.0, palette::modal_backdrop());
        });

    let (title, color) = if completion.success {
        ("Success", palette::SUCCESS)
    } else {
        ("Error", palette::ERROR)
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(380.0)
        .order(egui::Order::Foreground)
        .frame(theme::dialog_frame())
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(title).heading().color(color));
                ui.add_space(8.0);
                ui.label(&completion.message);
                ui.add_space(16.0);

                ui.horizontal(|ui| {
                    if completion.output.is_some() && ui.button("Open folder").clicked() {
                        app_state.lock().queue_action(AppAction::OpenOutputFolder);
                    }
                    if ui.button("OK").clicked() {
                        app_state.lock().queue_action(AppAction::DismissCompletion);
                    }
                });
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app_state.lock().queue_action(AppAction::DismissCompletion);
    }
}
