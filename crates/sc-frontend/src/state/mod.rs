//! Application state module

mod log;

pub use log::{LogEntry, LogLevel, StatusLog};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use sc_core::{ProcessMessage, ProcessSettings, ProcessingHandle, derive_output_path};

/// Actions queued by the UI and handled once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Use a file as the processing input
    SelectInput(PathBuf),
    /// Override the derived output path
    SetOutput(PathBuf),
    /// Start processing the selected input
    StartProcessing,
    /// Open the folder containing the last output
    OpenOutputFolder,
    /// Close the completion dialog
    DismissCompletion,
    /// Clear the status log
    ClearLog,
}

/// Result of the last processing run, shown in a modal
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub success: bool,
    pub message: String,
    pub output: Option<PathBuf>,
}

/// Application state
pub struct AppState {
    /// Selected input file
    pub input_path: Option<PathBuf>,
    /// Size of the input file in bytes
    pub input_size: Option<u64>,
    /// Where the colored file is written
    pub output_path: Option<PathBuf>,
    /// Settings for the next run
    pub settings: ProcessSettings,
    /// Last reported progress (percent)
    pub progress: u8,
    /// Status log shown at the bottom of the window
    pub log: StatusLog,
    /// Pending completion dialog
    pub completion: Option<Completion>,
    /// Running job, if any
    processing: Option<ProcessingHandle>,
    /// Output of the running job
    processing_output: Option<PathBuf>,
    /// Pending actions
    pending_actions: Vec<AppAction>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ProcessSettings::default())
    }
}

impl AppState {
    /// Create a new app state
    pub fn new(settings: ProcessSettings) -> Self {
        let mut log = StatusLog::default();
        log.info("Ready to process STEP files...");

        Self {
            input_path: None,
            input_size: None,
            output_path: None,
            settings,
            progress: 0,
            log,
            completion: None,
            processing: None,
            processing_output: None,
            pending_actions: Vec::new(),
        }
    }

    /// Use `path` as input and derive the default output next to it
    pub fn select_input(&mut self, path: PathBuf) {
        self.input_size = match std::fs::metadata(&path) {
            Ok(meta) => Some(meta.len()),
            Err(e) => {
                tracing::warn!("Failed to read metadata for {}: {}", path.display(), e);
                None
            }
        };
        self.output_path = Some(derive_output_path(&path));
        self.log
            .info(format!("Selected file: {}", display_name(&path)));
        self.input_path = Some(path);
    }

    /// Override the output path
    pub fn set_output(&mut self, path: PathBuf) {
        self.log.info(format!("Output file: {}", path.display()));
        self.output_path = Some(path);
    }

    /// Whether a job is running
    pub fn is_processing(&self) -> bool {
        self.processing.is_some()
    }

    /// Whether the Process button should be enabled
    pub fn can_process(&self) -> bool {
        self.input_path.is_some() && self.output_path.is_some() && !self.is_processing()
    }

    /// Track a freshly spawned job
    pub fn start_processing(&mut self, handle: ProcessingHandle, output: PathBuf) {
        self.progress = 0;
        self.completion = None;
        self.processing = Some(handle);
        self.processing_output = Some(output);
        self.log.info("Starting processing...");
    }

    /// Drain messages from the running job
    ///
    /// Returns `true` while a job is still running.
    pub fn poll_processing(&mut self) -> bool {
        let Some(handle) = self.processing.as_mut() else {
            return false;
        };

        let messages = handle.poll();
        for message in messages {
            self.handle_message(message);
        }
        self.processing.is_some()
    }

    /// Apply one worker notification
    pub fn handle_message(&mut self, message: ProcessMessage) {
        match message {
            ProcessMessage::Progress(percent) => {
                self.progress = percent.max(self.progress);
            }
            ProcessMessage::Status(text) => {
                self.log.info(text);
            }
            ProcessMessage::Finished { success, message } => {
                if success {
                    tracing::info!("{}", message);
                    self.log.success(format!("\u{2713} {message}"));
                } else {
                    tracing::error!("{}", message);
                    self.log.error(format!("\u{2717} {message}"));
                }

                let output = self.processing_output.take().filter(|_| success);
                self.completion = Some(Completion {
                    success,
                    message,
                    output,
                });
                self.processing = None;
                self.progress = 0;
            }
        }
    }

    /// Queue an action
    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    /// Take pending actions
    pub fn take_pending_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }
}

/// File name for display, falling back to the full path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub type SharedAppState = Arc<Mutex<AppState>>;

/// Create a new shared app state
pub fn create_shared_state(settings: ProcessSettings) -> SharedAppState {
    Arc::new(Mutex::new(AppState::new(settings)))
}
