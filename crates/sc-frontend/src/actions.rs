//! Action handling
//!
//! Actions are queued in AppState and processed each frame.

use std::path::Path;
use std::sync::Arc;

use sc_cad::CadKernel;
use sc_core::{ProcessingJob, is_step_path, spawn_processing};

use crate::state::{AppAction, SharedAppState, display_name};

/// Context for action handlers
pub struct ActionContext<'a> {
    pub app_state: &'a SharedAppState,
    pub kernel: &'a Arc<dyn CadKernel>,
}

impl<'a> ActionContext<'a> {
    pub fn new(app_state: &'a SharedAppState, kernel: &'a Arc<dyn CadKernel>) -> Self {
        Self { app_state, kernel }
    }
}

/// Dispatch an action to the appropriate handler
pub fn dispatch_action(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::SelectInput(path) => handle_select_input(&path, ctx),
        AppAction::SetOutput(path) => ctx.app_state.lock().set_output(path),
        AppAction::StartProcessing => handle_start_processing(ctx),
        AppAction::OpenOutputFolder => handle_open_output_folder(ctx),
        AppAction::DismissCompletion => ctx.app_state.lock().completion = None,
        AppAction::ClearLog => ctx.app_state.lock().log.clear(),
    }
}

fn handle_select_input(path: &Path, ctx: &ActionContext) {
    let mut state = ctx.app_state.lock();
    if state.is_processing() {
        tracing::warn!("Ignoring file selection while processing");
        return;
    }
    if !is_step_path(path) {
        tracing::warn!("Not a STEP file: {}", path.display());
        state
            .log
            .error(format!("Not a STEP file: {}", display_name(path)));
        return;
    }
    state.select_input(path.to_path_buf());
}

fn handle_start_processing(ctx: &ActionContext) {
    let mut state = ctx.app_state.lock();
    if !state.can_process() {
        return;
    }
    let (Some(input), Some(output)) = (state.input_path.clone(), state.output_path.clone()) else {
        return;
    };

    if !ctx.kernel.is_available() {
        state
            .log
            .error(format!("CAD kernel '{}' is not available", ctx.kernel.name()));
        return;
    }

    let job = ProcessingJob {
        input,
        output: output.clone(),
        settings: state.settings.clone(),
    };
    tracing::info!(
        "Starting job: {} -> {} ({:?})",
        job.input.display(),
        job.output.display(),
        job.settings
    );

    match spawn_processing(ctx.kernel.clone(), job) {
        Ok(handle) => state.start_processing(handle, output),
        Err(e) => {
            tracing::error!("Failed to start processing thread: {}", e);
            state
                .log
                .error(format!("Failed to start processing: {e}"));
        }
    }
}

fn handle_open_output_folder(ctx: &ActionContext) {
    let folder = ctx
        .app_state
        .lock()
        .completion
        .as_ref()
        .and_then(|c| c.output.as_ref())
        .and_then(|output| output.parent())
        .map(Path::to_path_buf);

    let Some(folder) = folder else {
        return;
    };
    if let Err(e) = open::that(&folder) {
        tracing::warn!("Failed to open folder {}: {}", folder.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_shared_state;
    use sc_cad::NullKernel;
    use sc_core::ProcessSettings;

    #[test]
    fn test_rejects_non_step_input() {
        let app_state = create_shared_state(ProcessSettings::default());
        let kernel: Arc<dyn CadKernel> = Arc::new(NullKernel);
        let ctx = ActionContext::new(&app_state, &kernel);

        dispatch_action(AppAction::SelectInput("part.stl".into()), &ctx);

        let state = app_state.lock();
        assert!(state.input_path.is_none());
        assert_eq!(
            state.log.entries().last().map(|e| e.message.as_str()),
            Some("Not a STEP file: part.stl")
        );
    }

    #[test]
    fn test_unavailable_kernel_does_not_start() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("part.step");
        std::fs::write(&input, "ISO-10303-21;").unwrap();

        let app_state = create_shared_state(ProcessSettings::default());
        let kernel: Arc<dyn CadKernel> = Arc::new(NullKernel);
        let ctx = ActionContext::new(&app_state, &kernel);

        dispatch_action(AppAction::SelectInput(input), &ctx);
        dispatch_action(AppAction::StartProcessing, &ctx);

        let state = app_state.lock();
        assert!(!state.is_processing());
        assert_eq!(
            state.log.entries().last().map(|e| e.message.as_str()),
            Some("CAD kernel 'null' is not available")
        );
    }

    #[test]
    fn test_set_output_and_clear_log() {
        let app_state = create_shared_state(ProcessSettings::default());
        let kernel: Arc<dyn CadKernel> = Arc::new(NullKernel);
        let ctx = ActionContext::new(&app_state, &kernel);

        dispatch_action(AppAction::SetOutput("/tmp/custom.step".into()), &ctx);
        assert_eq!(
            app_state.lock().output_path.as_deref(),
            Some(Path::new("/tmp/custom.step"))
        );

        dispatch_action(AppAction::ClearLog, &ctx);
        assert!(app_state.lock().log.entries().is_empty());
    }
}
