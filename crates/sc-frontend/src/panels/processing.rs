//! Process button and progress bar

use egui::Ui;

use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState};

#[derive(Default)]
pub struct ProcessingPanel;

impl ProcessingPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for ProcessingPanel {
    fn name(&self) -> &str {
        "Processing"
    }

    fn ui(&mut self, ui: &mut Ui, app_state: &SharedAppState) {
        let state = app_state.lock();
        let can_process = state.can_process();
        let busy = state.is_processing();
        let progress = state.progress;
        drop(state);

        ui.vertical_centered(|ui| {
            let button = egui::Button::new(egui::RichText::new("Process File").strong())
                .min_size(egui::vec2(160.0, 28.0));
            if ui.add_enabled(can_process, button).clicked() {
                app_state.lock().queue_action(AppAction::StartProcessing);
            }
        });

        if busy {
            ui.add_space(6.0);
            ui.add(
                egui::ProgressBar::new(f32::from(progress) / 100.0)
                    .show_percentage()
                    .animate(true),
            );
        }
    }
}
