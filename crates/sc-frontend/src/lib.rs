//! STEP face coloring desktop shell
//!
//! egui-based front end: pick a STEP file, choose coloring settings and run
//! the pipeline on a background thread.

pub mod actions;
pub mod app;
pub mod panels;
pub mod state;
pub mod theme;

// Re-exports for convenience
pub use app::{StepColorApp, WINDOW_TITLE};
pub use state::{AppAction, AppState, SharedAppState};
