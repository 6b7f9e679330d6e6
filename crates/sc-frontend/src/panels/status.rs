//! Scrolling status log

use egui::Ui;

use crate::panels::Panel;
use crate::state::{AppAction, LogLevel, SharedAppState};
use crate::theme::palette;

#[derive(Default)]
pub struct StatusPanel;

impl StatusPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for StatusPanel {
    fn name(&self) -> &str {
        "Status"
    }

    fn ui(&mut self, ui: &mut Ui, app_state: &SharedAppState) {
        let entries = app_state.lock().log.entries().to_vec();

        ui.horizontal(|ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Clear").clicked() {
                    app_state.lock().queue_action(AppAction::ClearLog);
                }
            });
        });

        egui::Frame::new()
            .fill(palette::BG_BASE)
            .corner_radius(4.0)
            .inner_margin(6.0)
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("status_log_scroll")
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for entry in &entries {
                            let color = match entry.level {
                                LogLevel::Info => palette::TEXT_PRIMARY,
                                LogLevel::Success => palette::SUCCESS,
                                LogLevel::Error => palette::ERROR,
                            };
                            ui.label(
                                egui::RichText::new(&entry.message)
                                    .monospace()
                                    .color(color),
                            );
                        }
                    });
            });
    }
}
