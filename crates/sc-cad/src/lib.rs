//! CAD Kernel Abstraction
//!
//! This crate provides:
//! - Abstract CAD kernel trait for STEP import, face traversal and STEP export
//! - Opaque handle types for shapes and faces owned by a kernel
//! - A pure Rust backend built on Truck (feature `truck`, enabled by default)

pub mod kernel;

// Re-exports for convenience
pub use kernel::{
    BoundingBox, CadError, CadKernel, CadResult, FaceId, FaceStyle, NullKernel, Solid,
    StepExportOptions, StepExportReport, StepImportResult, default_kernel,
};

#[cfg(feature = "truck")]
pub use kernel::TruckKernel;
