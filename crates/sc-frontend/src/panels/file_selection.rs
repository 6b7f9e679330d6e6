//! Input and output file selection

use egui::Ui;

use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState, display_name};
use crate::theme::palette;

#[derive(Default)]
pub struct FileSelectionPanel;

impl FileSelectionPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for FileSelectionPanel {
    fn name(&self) -> &str {
        "File Selection"
    }

    fn ui(&mut self, ui: &mut Ui, app_state: &SharedAppState) {
        let state = app_state.lock();
        let input = state.input_path.clone();
        let input_size = state.input_size;
        let output = state.output_path.clone();
        let busy = state.is_processing();
        drop(state);

        egui::Grid::new("file_selection_grid")
            .num_columns(3)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Input:");
                match &input {
                    Some(path) => {
                        ui.label(display_name(path)).on_hover_text(path.display().to_string());
                    }
                    None => {
                        ui.colored_label(palette::TEXT_SECONDARY, "No file selected");
                    }
                }
                if ui
                    .add_enabled(!busy, egui::Button::new("Select STEP File"))
                    .clicked()
                    && let Some(path) = rfd::FileDialog::new()
                        .add_filter("STEP Files", &["stp", "step", "STP", "STEP"])
                        .add_filter("All Files", &["*"])
                        .pick_file()
                {
                    app_state.lock().queue_action(AppAction::SelectInput(path));
                }
                ui.end_row();

                if let Some(size) = input_size {
                    ui.label("Size:");
                    ui.label(format!("{size} bytes"));
                    ui.end_row();
                }

                ui.label("Output:");
                match &output {
                    Some(path) => {
                        ui.label(display_name(path)).on_hover_text(path.display().to_string());
                    }
                    None => {
                        ui.colored_label(palette::TEXT_SECONDARY, "-");
                    }
                }
                let can_change = output.is_some() && !busy;
                if ui
                    .add_enabled(can_change, egui::Button::new("Change..."))
                    .clicked()
                    && let Some(current) = &output
                {
                    let mut dialog =
                        rfd::FileDialog::new().add_filter("STEP Files", &["step", "stp"]);
                    if let Some(dir) = current.parent() {
                        dialog = dialog.set_directory(dir);
                    }
                    dialog = dialog.set_file_name(display_name(current));
                    if let Some(path) = dialog.save_file() {
                        app_state.lock().queue_action(AppAction::SetOutput(path));
                    }
                }
                ui.end_row();
            });
    }
}
