//! In-memory kernel and STEP fixtures for pipeline tests

use std::collections::HashSet;
use std::path::Path;

use glam::Vec3;
use parking_lot::Mutex;
use sc_cad::{
    CadError, CadKernel, CadResult, FaceId, FaceStyle, Solid, StepExportOptions, StepExportReport,
    StepImportResult,
};
use uuid::Uuid;

/// Kernel returning a fixed number of unit-box-like solids
pub struct FakeKernel {
    faces: u32,
    shapes: usize,
    fail_export: bool,
    no_vertices: bool,
    live: Mutex<HashSet<Uuid>>,
    pub exported_styles: Mutex<Vec<FaceStyle>>,
}

impl FakeKernel {
    /// One solid with `faces` faces
    pub fn new(faces: u32) -> Self {
        Self {
            faces,
            shapes: 1,
            fail_export: false,
            no_vertices: false,
            live: Mutex::new(HashSet::new()),
            exported_styles: Mutex::new(Vec::new()),
        }
    }

    pub fn with_shapes(mut self, shapes: usize) -> Self {
        self.shapes = shapes;
        self
    }

    pub fn failing_export(mut self) -> Self {
        self.fail_export = true;
        self
    }

    /// Solids report no vertices, so no bounding box can be measured
    pub fn without_vertices(mut self) -> Self {
        self.no_vertices = true;
        self
    }

    /// Number of solids imported and not yet released
    pub fn live_count(&self) -> usize {
        self.live.lock().len()
    }

    fn check(&self, solid: &Solid) -> CadResult<()> {
        if self.live.lock().contains(&solid.id) {
            Ok(())
        } else {
            Err(CadError::SolidNotFound(solid.id))
        }
    }
}

impl CadKernel for FakeKernel {
    fn name(&self) -> &str {
        "fake"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn import_step(&self, path: &Path) -> CadResult<StepImportResult> {
        if !path.exists() {
            return Err(CadError::FileIo(format!(
                "Failed to read {}: not found",
                path.display()
            )));
        }

        let mut result = StepImportResult::default();
        let mut live = self.live.lock();
        for _ in 0..self.shapes {
            let solid = Solid::new(Uuid::new_v4());
            live.insert(solid.id);
            result.solids.push(solid);
        }
        Ok(result)
    }

    fn get_faces(&self, solid: &Solid) -> CadResult<Vec<FaceId>> {
        self.check(solid)?;
        Ok((0..self.faces).map(|i| FaceId::new(solid.id, i)).collect())
    }

    fn get_vertices(&self, solid: &Solid) -> CadResult<Vec<Vec3>> {
        self.check(solid)?;
        if self.no_vertices {
            return Ok(Vec::new());
        }
        Ok(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-1.0, 0.5, 2.0),
        ])
    }

    fn export_step(
        &self,
        solid: &Solid,
        styles: &[FaceStyle],
        path: &Path,
        _options: &StepExportOptions,
    ) -> CadResult<StepExportReport> {
        self.check(solid)?;
        if self.fail_export {
            return Err(CadError::StepExport("injected failure".into()));
        }

        std::fs::write(path, "ISO-10303-21;\nEND-ISO-10303-21;\n")
            .map_err(|e| CadError::FileIo(e.to_string()))?;
        *self.exported_styles.lock() = styles.to_vec();
        Ok(StepExportReport {
            styles_written: styles.len(),
            styles_discarded: 0,
        })
    }

    fn release(&self, solid: &Solid) {
        self.live.lock().remove(&solid.id);
    }
}

/// Write a 1 x 2 x 3 box at the origin as a STEP file
pub fn write_box_step(path: &Path) {
    use truck_modeling::{Point3, Vector3, builder};
    use truck_stepio::out;

    let vertex = builder::vertex(Point3::new(0.0, 0.0, 0.0));
    let edge = builder::tsweep(&vertex, Vector3::new(1.0, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, 2.0, 0.0));
    let solid = builder::tsweep(&face, Vector3::new(0.0, 0.0, 3.0));

    let compressed = solid.compress();
    let step = out::CompleteStepDisplay::new(
        out::StepModel::from(&compressed),
        out::StepHeaderDescriptor::default(),
    )
    .to_string();
    std::fs::write(path, step).unwrap();
}

/// Points in a fixed order, for comparing vertex sets
pub fn sorted_points(points: Vec<Vec3>) -> Vec<[f32; 3]> {
    let mut points: Vec<[f32; 3]> = points.into_iter().map(|p| p.to_array()).collect();
    points.sort_by(|a, b| a.partial_cmp(b).unwrap());
    points
}
