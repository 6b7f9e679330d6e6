//! Truck CAD Kernel Backend
//!
//! Pure Rust B-Rep kernel using the Truck library. STEP files are parsed with
//! `ruststep` and converted to Truck topology by `truck-stepio`.
//!
//! Each shell is converted once at import. The kernel keeps the extracted
//! vertices and face count plus a writer that owns the converted shell.
//!
//! Note: Truck's STEP writer emits geometry only. Per-face styles passed to
//! [`CadKernel::export_step`] are reported back as discarded.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use glam::Vec3;
use parking_lot::Mutex;
use truck_stepio::out;
use truck_stepio::r#in::Table;
use uuid::Uuid;

use super::{
    CadError, CadKernel, CadResult, FaceId, FaceStyle, Solid, StepExportOptions,
    StepExportReport, StepImportResult,
};

/// Renders the owned shell as a complete STEP file
type ShellWriter = dyn Fn(out::StepHeaderDescriptor) -> String + Send + Sync;

/// A converted shell
#[derive(Clone)]
struct StoredShell {
    vertices: Arc<Vec<Vec3>>,
    face_count: usize,
    writer: Arc<ShellWriter>,
}

impl StoredShell {
    /// Convert one shell of a parsed table
    fn convert(table: &Table, shell_id: u64) -> Result<Self, String> {
        let holder = table
            .shell
            .get(&shell_id)
            .ok_or_else(|| format!("no shell entity #{shell_id}"))?;
        let shell = table
            .to_compressed_shell(holder)
            .map_err(|e| e.to_string())?;

        let vertices = shell
            .vertices
            .iter()
            .map(|p| Vec3::new(p.x as f32, p.y as f32, p.z as f32))
            .collect();
        let face_count = shell.faces.len();

        let writer = move |header: out::StepHeaderDescriptor| {
            out::CompleteStepDisplay::new(out::StepModel::from(&shell), header).to_string()
        };

        Ok(Self {
            vertices: Arc::new(vertices),
            face_count,
            writer: Arc::new(writer),
        })
    }
}

/// Truck-based CAD kernel
pub struct TruckKernel {
    /// Storage for converted shells (keyed by UUID)
    shells: Mutex<HashMap<Uuid, StoredShell>>,
}

impl TruckKernel {
    /// Create a new Truck kernel
    pub fn new() -> Self {
        Self {
            shells: Mutex::new(HashMap::new()),
        }
    }

    /// Store a shell and return a Solid reference
    fn store_shell(&self, shell: StoredShell) -> Solid {
        let id = Uuid::new_v4();
        self.shells.lock().insert(id, shell);
        Solid::new(id)
    }

    /// Get a stored shell by ID
    fn get_shell(&self, id: Uuid) -> CadResult<StoredShell> {
        self.shells
            .lock()
            .get(&id)
            .cloned()
            .ok_or(CadError::SolidNotFound(id))
    }

    /// Number of shells currently held
    pub fn stored_count(&self) -> usize {
        self.shells.lock().len()
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl CadKernel for TruckKernel {
    fn name(&self) -> &str {
        "truck"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn import_step(&self, path: &Path) -> CadResult<StepImportResult> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CadError::FileIo(format!("Failed to read {}: {e}", path.display())))?;

        let exchange = ruststep::parser::parse(&raw)
            .map_err(|e| CadError::StepImport(format!("Failed to parse STEP file: {e}")))?;
        let section = exchange
            .data
            .first()
            .ok_or_else(|| CadError::StepImport("STEP file has no data sections".into()))?;
        let table = Table::from_data_section(section);

        // Entity ids give a stable file order
        let mut shell_ids: Vec<u64> = table.shell.keys().copied().collect();
        shell_ids.sort_unstable();

        let mut result = StepImportResult::default();
        for shell_id in shell_ids {
            match StoredShell::convert(&table, shell_id) {
                Ok(shell) => result.solids.push(self.store_shell(shell)),
                Err(e) => tracing::warn!("Skipping STEP shell #{}: {}", shell_id, e),
            }
        }

        tracing::debug!(
            "Imported {} shell(s) from {}",
            result.solids.len(),
            path.display()
        );

        Ok(result)
    }

    fn get_faces(&self, solid: &Solid) -> CadResult<Vec<FaceId>> {
        let count = self.get_shell(solid.id)?.face_count;
        Ok((0..count as u32)
            .map(|index| FaceId::new(solid.id, index))
            .collect())
    }

    fn get_vertices(&self, solid: &Solid) -> CadResult<Vec<Vec3>> {
        Ok(self.get_shell(solid.id)?.vertices.to_vec())
    }

    fn export_step(
        &self,
        solid: &Solid,
        styles: &[FaceStyle],
        path: &Path,
        options: &StepExportOptions,
    ) -> CadResult<StepExportReport> {
        let stored = self.get_shell(solid.id)?;

        let file_name = options.file_name.clone().unwrap_or_else(|| {
            path.file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("model.step")
                .to_string()
        });
        let header = out::StepHeaderDescriptor {
            file_name,
            organization_system: options.application_name.clone(),
            ..Default::default()
        };

        let step_string = (stored.writer)(header);
        std::fs::write(path, step_string)
            .map_err(|e| CadError::FileIo(format!("Failed to write {}: {e}", path.display())))?;

        if !styles.is_empty() {
            tracing::warn!(
                "Truck STEP writer has no presentation support; {} face color(s) not written",
                styles.len()
            );
        }

        Ok(StepExportReport {
            styles_written: 0,
            styles_discarded: styles.len(),
        })
    }

    fn release(&self, solid: &Solid) {
        self.shells.lock().remove(&solid.id);
    }
}
