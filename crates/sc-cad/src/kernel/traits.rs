//! CAD Kernel trait definitions
//!
//! These traits define the interface that all CAD kernels must implement.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a face within a solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaceId {
    /// ID of the solid this face belongs to
    pub solid_id: Uuid,
    /// Index of the face in kernel traversal order
    pub index: u32,
}

impl FaceId {
    /// Create a new face ID
    pub fn new(solid_id: Uuid, index: u32) -> Self {
        Self { solid_id, index }
    }
}

/// Axis-aligned bounding box of a solid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Create a bounding box from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all points, or `None` for an empty slice
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let bbox = rest.iter().fold(Self::new(*first, *first), |acc, p| Self {
            min: acc.min.min(*p),
            max: acc.max.max(*p),
        });
        Some(bbox)
    }

    /// Center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Color assigned to a single face, handed to the STEP writer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceStyle {
    pub face: FaceId,
    /// Linear RGB in [0, 1]
    pub rgb: [f32; 3],
}

/// Error type for CAD kernel operations
#[derive(Debug, Clone, Error)]
pub enum CadError {
    #[error("Kernel not available: {0}")]
    KernelNotAvailable(String),

    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("STEP import failed: {0}")]
    StepImport(String),

    #[error("STEP export failed: {0}")]
    StepExport(String),

    #[error("Solid not found: {0}")]
    SolidNotFound(Uuid),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for CAD operations
pub type CadResult<T> = Result<T, CadError>;

/// A handle to a B-Rep solid held by a kernel
///
/// The geometry itself lives inside the kernel that created the handle.
/// Handles are cheap to clone; every clone refers to the same kernel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solid {
    /// Unique identifier
    pub id: Uuid,
}

impl Solid {
    /// Create a new solid with the given ID
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

// ========== STEP File I/O Types ==========

/// Options for STEP file export
#[derive(Debug, Clone)]
pub struct StepExportOptions {
    /// Originating system written to the STEP header
    pub application_name: String,
    /// File name written to the STEP header (defaults to the output file name)
    pub file_name: Option<String>,
}

impl Default for StepExportOptions {
    fn default() -> Self {
        Self {
            application_name: concat!("stepcolor ", env!("CARGO_PKG_VERSION")).to_string(),
            file_name: None,
        }
    }
}

/// Result of STEP import
#[derive(Debug, Clone, Default)]
pub struct StepImportResult {
    /// Imported solids, in file order
    pub solids: Vec<Solid>,
}

/// What the writer did with the per-face styles it was given
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepExportReport {
    /// Styles written as presentation data
    pub styles_written: usize,
    /// Styles the backend could not represent and dropped
    pub styles_discarded: usize,
}

/// The main CAD kernel trait
///
/// Implementations of this trait provide the actual geometry operations
/// using different backends. Every handle a kernel returns is only
/// meaningful to that same kernel instance.
pub trait CadKernel: Send + Sync {
    /// Get the name of this kernel
    fn name(&self) -> &str;

    /// Check if the kernel is available
    fn is_available(&self) -> bool;

    /// Import a STEP file
    ///
    /// Fails if the file cannot be read or parsed. An empty `solids` list is
    /// not an error at this level.
    fn import_step(&self, path: &Path) -> CadResult<StepImportResult>;

    /// Get all faces of a solid, in traversal order
    ///
    /// The order is stable for one kernel instance and one solid.
    fn get_faces(&self, solid: &Solid) -> CadResult<Vec<FaceId>>;

    /// Get all vertex positions of a solid
    fn get_vertices(&self, solid: &Solid) -> CadResult<Vec<Vec3>>;

    /// Compute the axis-aligned bounding box of a solid
    fn bounding_box(&self, solid: &Solid) -> CadResult<BoundingBox> {
        let vertices = self.get_vertices(solid)?;
        BoundingBox::from_points(&vertices)
            .ok_or_else(|| CadError::OperationFailed("Solid has no vertices".into()))
    }

    /// Export a solid to a STEP file
    ///
    /// # Arguments
    /// * `solid` - The solid to export
    /// * `styles` - Per-face colors; backends that cannot write them report
    ///   them as discarded
    /// * `path` - Output file path
    /// * `options` - Export options
    fn export_step(
        &self,
        solid: &Solid,
        styles: &[FaceStyle],
        path: &Path,
        options: &StepExportOptions,
    ) -> CadResult<StepExportReport>;

    /// Drop the kernel data behind a handle
    ///
    /// Releasing an unknown handle is a no-op.
    fn release(&self, solid: &Solid);
}

/// A null kernel that always returns errors (used when no kernel is available)
#[derive(Debug, Default)]
pub struct NullKernel;

impl CadKernel for NullKernel {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn import_step(&self, _path: &Path) -> CadResult<StepImportResult> {
        Err(CadError::KernelNotAvailable(
            "No CAD kernel available for STEP import".into(),
        ))
    }

    fn get_faces(&self, _solid: &Solid) -> CadResult<Vec<FaceId>> {
        Err(CadError::KernelNotAvailable(
            "No CAD kernel available".into(),
        ))
    }

    fn get_vertices(&self, _solid: &Solid) -> CadResult<Vec<Vec3>> {
        Err(CadError::KernelNotAvailable(
            "No CAD kernel available".into(),
        ))
    }

    fn export_step(
        &self,
        _solid: &Solid,
        _styles: &[FaceStyle],
        _path: &Path,
        _options: &StepExportOptions,
    ) -> CadResult<StepExportReport> {
        Err(CadError::KernelNotAvailable(
            "No CAD kernel available for STEP export".into(),
        ))
    }

    fn release(&self, _solid: &Solid) {}
}

/// Get the default CAD kernel based on available features
pub fn default_kernel() -> Box<dyn CadKernel> {
    #[cfg(feature = "truck")]
    {
        Box::new(super::TruckKernel::new())
    }

    #[cfg(not(feature = "truck"))]
    {
        Box::new(NullKernel)
    }
}
