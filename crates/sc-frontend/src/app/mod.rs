//! Main application module

mod dialogs;

use std::sync::Arc;
use std::time::Duration;

use sc_cad::{CadKernel, default_kernel};
use sc_core::ProcessSettings;

use crate::actions::{ActionContext, dispatch_action};
use crate::panels::{FileSelectionPanel, Panel, ProcessingPanel, SettingsPanel, StatusPanel};
use crate::state::{AppAction, SharedAppState, create_shared_state};
use crate::theme::apply_theme;
use dialogs::show_completion_dialog;

/// Storage key for the last used processing settings
const SETTINGS_KEY: &str = "stepcolor_settings";

/// Repaint interval while a job is running
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub const WINDOW_TITLE: &str = "STEP File Face Coloring Tool";

/// Main application
pub struct StepColorApp {
    app_state: SharedAppState,
    kernel: Arc<dyn CadKernel>,
    file_panel: FileSelectionPanel,
    settings_panel: SettingsPanel,
    processing_panel: ProcessingPanel,
    status_panel: StatusPanel,
}

impl StepColorApp {
    /// Create a new app
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        apply_theme(&cc.egui_ctx);

        let stored = cc.storage.and_then(|s| s.get_string(SETTINGS_KEY));
        let settings = settings_from_storage(stored);

        let kernel: Arc<dyn CadKernel> = Arc::from(default_kernel());
        tracing::info!(
            "Using CAD kernel '{}' (available: {})",
            kernel.name(),
            kernel.is_available()
        );

        Self {
            app_state: create_shared_state(settings),
            kernel,
            file_panel: FileSelectionPanel::new(),
            settings_panel: SettingsPanel::new(),
            processing_panel: ProcessingPanel::new(),
            status_panel: StatusPanel::new(),
        }
    }

    /// Process pending actions
    fn process_actions(&mut self) {
        let actions = self.app_state.lock().take_pending_actions();
        let ctx = ActionContext::new(&self.app_state, &self.kernel);

        for action in actions {
            dispatch_action(action, &ctx);
        }
    }

    /// Accept a STEP file dropped onto the window
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            self.app_state
                .lock()
                .queue_action(AppAction::SelectInput(path));
        }
    }
}

/// Restore settings saved by a previous session
fn settings_from_storage(stored: Option<String>) -> ProcessSettings {
    let Some(text) = stored else {
        return ProcessSettings::default();
    };
    match ProcessSettings::from_ron(&text) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Ignoring stored settings: {}", e);
            ProcessSettings::default()
        }
    }
}

impl eframe::App for StepColorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.process_actions();

        if self.app_state.lock().poll_processing() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(true)
            .default_height(180.0)
            .min_height(100.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                self.status_panel.show(ui, &self.app_state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(WINDOW_TITLE);
            });
            ui.add_space(8.0);

            self.file_panel.show(ui, &self.app_state);
            ui.add_space(6.0);
            self.settings_panel.show(ui, &self.app_state);
            ui.add_space(6.0);
            self.processing_panel.show(ui, &self.app_state);
        });

        show_completion_dialog(ctx, &self.app_state);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.app_state.lock().settings.to_ron() {
            Ok(text) => storage.set_string(SETTINGS_KEY, text),
            Err(e) => tracing::warn!("Failed to save settings: {}", e),
        }
    }
}
