//! Orientation and coloring settings form

use egui::Ui;

use sc_core::constants::COLOR_COUNT_CHOICES;
use sc_core::{ColoringMethod, OrientationMode};

use crate::panels::Panel;
use crate::state::SharedAppState;

/// Seed shown when the user first enables a fixed seed
const DEFAULT_SEED: u64 = 42;

#[derive(Default)]
pub struct SettingsPanel;

impl SettingsPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Panel for SettingsPanel {
    fn name(&self) -> &str {
        "Processing Settings"
    }

    fn ui(&mut self, ui: &mut Ui, app_state: &SharedAppState) {
        let mut state = app_state.lock();
        let busy = state.is_processing();
        let settings = &mut state.settings;

        ui.add_enabled_ui(!busy, |ui| {
            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Orientation:");
                    egui::ComboBox::from_id_salt("orientation_mode")
                        .selected_text(settings.orientation.name())
                        .show_ui(ui, |ui| {
                            for mode in OrientationMode::all() {
                                ui.selectable_value(&mut settings.orientation, mode, mode.name());
                            }
                        });
                    ui.end_row();

                    ui.label("Coloring method:");
                    egui::ComboBox::from_id_salt("coloring_method")
                        .selected_text(settings.coloring.method.name())
                        .show_ui(ui, |ui| {
                            for method in ColoringMethod::all() {
                                ui.selectable_value(
                                    &mut settings.coloring.method,
                                    method,
                                    method.name(),
                                );
                            }
                        });
                    ui.end_row();

                    ui.label("Number of colors:");
                    ui.add_enabled_ui(settings.coloring.method.uses_count(), |ui| {
                        egui::ComboBox::from_id_salt("color_count")
                            .selected_text(settings.coloring.count.to_string())
                            .show_ui(ui, |ui| {
                                for count in COLOR_COUNT_CHOICES {
                                    ui.selectable_value(
                                        &mut settings.coloring.count,
                                        count,
                                        count.to_string(),
                                    );
                                }
                            });
                    });
                    ui.end_row();

                    if settings.coloring.method == ColoringMethod::Random {
                        ui.label("Seed:");
                        ui.horizontal(|ui| {
                            let mut fixed = settings.coloring.seed.is_some();
                            if ui.checkbox(&mut fixed, "Fixed").changed() {
                                settings.coloring.seed = fixed.then_some(DEFAULT_SEED);
                            }
                            if let Some(seed) = settings.coloring.seed.as_mut() {
                                ui.add(egui::DragValue::new(seed).speed(1.0));
                            }
                        });
                        ui.end_row();
                    }
                });
        });
    }
}
