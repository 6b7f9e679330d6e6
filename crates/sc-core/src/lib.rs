//! STEP face coloring core
//!
//! This crate provides:
//! - Face color assignment policy (random, gradient, fixed palette)
//! - The load → orient → color → save processing pipeline
//! - A background worker reporting progress over a channel
//! - Serializable processing settings

pub mod color;
pub mod constants;
pub mod error;
pub mod face_colors;
pub mod orient;
pub mod pipeline;
pub mod settings;
pub mod worker;

#[cfg(test)]
pub(crate) mod test_kernel;

pub use color::{
    Color, ColorError, ColoringConfig, ColoringMethod, FIXED_PALETTE, assign_colors, base_palette,
    gradient_palette, random_palette,
};
pub use error::{ErrorKind, ProcessError, Stage};
pub use face_colors::FaceColorMap;
pub use orient::{OrientationMode, UnknownOrientation, orient_solid};
pub use pipeline::{
    NoProgress, PipelineState, ProcessSummary, ProgressReporter, StepProcessor, process_file,
};
pub use settings::{
    ExportSettings, ProcessSettings, SettingsError, derive_output_path, is_step_path,
};
pub use worker::{ProcessMessage, ProcessingHandle, ProcessingJob, spawn_processing};
