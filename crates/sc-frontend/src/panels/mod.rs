//! UI panels

mod file_selection;
mod processing;
mod settings;
mod status;

pub use file_selection::FileSelectionPanel;
pub use processing::ProcessingPanel;
pub use settings::SettingsPanel;
pub use status::StatusPanel;

use crate::state::SharedAppState;

/// A titled section of the main window
pub trait Panel {
    /// Section title
    fn name(&self) -> &str;

    /// Draw the panel UI
    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState);

    /// Draw the panel inside a titled group
    fn show(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(self.name()).strong());
            ui.add_space(4.0);
            self.ui(ui, app_state);
        });
    }
}
