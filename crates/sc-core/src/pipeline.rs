//! STEP file processing pipeline
//!
//! A [`StepProcessor`] walks one file through
//! `Idle → Loaded → Oriented → Colored → Saved`. Any failure moves it to
//! `Failed` and releases the kernel shape; there is no retry.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sc_cad::{CadKernel, FaceStyle, Solid, StepExportReport};

use crate::color::ColoringConfig;
use crate::constants::{
    PROGRESS_COLORING, PROGRESS_DONE, PROGRESS_LOADING, PROGRESS_ORIENTING, PROGRESS_SAVING,
};
use crate::error::{ProcessError, Stage};
use crate::face_colors::FaceColorMap;
use crate::orient::{OrientationMode, orient_solid};
use crate::settings::{ExportSettings, ProcessSettings};

/// Where a processor is in its single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    #[default]
    Idle,
    Loaded,
    Oriented,
    Colored,
    Saved,
    Failed,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Loaded => "loaded",
            PipelineState::Oriented => "oriented",
            PipelineState::Colored => "colored",
            PipelineState::Saved => "saved",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Receives progress and status notifications from a run
pub trait ProgressReporter {
    /// Percent complete, 0..=100
    fn progress(&mut self, percent: u8);

    /// Human-readable status line
    fn status(&mut self, message: &str);
}

/// Reporter that drops every notification
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn progress(&mut self, _percent: u8) {}
    fn status(&mut self, _message: &str) {}
}

/// Forwards to a reporter while keeping percentages non-decreasing
struct ProgressTracker<'a> {
    reporter: &'a mut dyn ProgressReporter,
    last: u8,
}

impl<'a> ProgressTracker<'a> {
    fn new(reporter: &'a mut dyn ProgressReporter) -> Self {
        Self { reporter, last: 0 }
    }

    fn advance(&mut self, percent: u8) {
        self.last = percent.clamp(self.last, PROGRESS_DONE);
        self.reporter.progress(self.last);
    }

    fn status(&mut self, message: &str) {
        tracing::debug!("{}", message);
        self.reporter.status(message);
    }
}

/// Owns a kernel shape and releases it on drop
struct ShapeGuard {
    kernel: Arc<dyn CadKernel>,
    solid: Solid,
}

impl ShapeGuard {
    fn new(kernel: Arc<dyn CadKernel>, solid: Solid) -> Self {
        Self { kernel, solid }
    }
}

impl Drop for ShapeGuard {
    fn drop(&mut self) {
        tracing::trace!("Releasing shape {}", self.solid.id);
        self.kernel.release(&self.solid);
    }
}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct ProcessSummary {
    pub output: PathBuf,
    pub face_count: usize,
    pub face_colors: FaceColorMap,
    pub report: StepExportReport,
}

/// Single-use processor for one input file
pub struct StepProcessor {
    kernel: Arc<dyn CadKernel>,
    state: PipelineState,
    shape: Option<ShapeGuard>,
    face_colors: FaceColorMap,
}

impl StepProcessor {
    pub fn new(kernel: Arc<dyn CadKernel>) -> Self {
        Self {
            kernel,
            state: PipelineState::Idle,
            shape: None,
            face_colors: FaceColorMap::default(),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Colors from the last successful coloring stage
    pub fn face_colors(&self) -> &FaceColorMap {
        &self.face_colors
    }

    /// The loaded shape, if any
    pub fn shape(&self) -> Option<&Solid> {
        self.shape.as_ref().map(|guard| &guard.solid)
    }

    // ========== Stages ==========

    /// `Idle → Loaded`: import the file and keep its first solid
    pub fn load_step_file(&mut self, path: &Path) -> Result<(), ProcessError> {
        let result = self.try_load(path);
        self.settle(result, PipelineState::Loaded)
    }

    /// `Loaded → Oriented`: apply the (identity) orientation
    pub fn orient_shape(&mut self, mode: OrientationMode) -> Result<(), ProcessError> {
        let result = self.try_orient(mode);
        self.settle(result, PipelineState::Oriented)
    }

    /// `Oriented → Colored`: enumerate faces and assign colors
    pub fn color_faces(&mut self, config: &ColoringConfig) -> Result<&FaceColorMap, ProcessError> {
        let result = self.try_color(config);
        self.settle(result, PipelineState::Colored)?;
        Ok(&self.face_colors)
    }

    /// `Colored → Saved`: write geometry and styles, then move into place
    pub fn save_colored_step(
        &mut self,
        output: &Path,
        export: &ExportSettings,
    ) -> Result<StepExportReport, ProcessError> {
        let result = self.try_save(output, export);
        let report = self.settle(result, PipelineState::Saved)?;
        self.shape = None;
        Ok(report)
    }

    /// Run every stage on `input`, writing `output`
    pub fn process_file(
        &mut self,
        input: &Path,
        output: &Path,
        settings: &ProcessSettings,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<ProcessSummary, ProcessError> {
        let mut progress = ProgressTracker::new(reporter);
        progress.status("Loading STEP file...");

        if let Err(e) = settings.validate() {
            self.fail();
            return Err(e.into());
        }

        tracing::info!("Processing {} -> {}", input.display(), output.display());

        progress.advance(PROGRESS_LOADING);
        self.load_step_file(input)?;

        progress.status("Processing orientation...");
        progress.advance(PROGRESS_ORIENTING);
        self.orient_shape(settings.orientation)?;

        progress.status("Applying face colors...");
        progress.advance(PROGRESS_COLORING);
        let face_count = self.color_faces(&settings.coloring)?.len();
        progress.status(&format!("Colored {face_count} faces"));

        progress.status("Saving colored STEP file...");
        progress.advance(PROGRESS_SAVING);
        let report = self.save_colored_step(output, &settings.export)?;
        if report.styles_discarded > 0 {
            progress.status(&format!(
                "Warning: the {} kernel could not write {} face colors; \
                 geometry was saved without them",
                self.kernel.name(),
                report.styles_discarded
            ));
        }

        progress.advance(PROGRESS_DONE);
        progress.status("Processing complete!");
        tracing::info!("Saved {}", output.display());

        Ok(ProcessSummary {
            output: output.to_path_buf(),
            face_count,
            face_colors: self.face_colors.clone(),
            report,
        })
    }

    // ========== Stage bodies ==========

    fn try_load(&mut self, path: &Path) -> Result<(), ProcessError> {
        self.expect_state(PipelineState::Idle, Stage::Load)?;

        let imported = self
            .kernel
            .import_step(path)
            .map_err(|source| ProcessError::Load {
                path: path.to_path_buf(),
                source,
            })?;

        let mut solids = imported.solids.into_iter();
        let Some(first) = solids.next() else {
            return Err(ProcessError::NoShapes {
                path: path.to_path_buf(),
            });
        };

        let extra: Vec<Solid> = solids.collect();
        if !extra.is_empty() {
            tracing::warn!(
                "{} contains {} shapes, using the first",
                path.display(),
                extra.len() + 1
            );
            for solid in &extra {
                self.kernel.release(solid);
            }
        }

        tracing::info!("Loaded shape {} from {}", first.id, path.display());
        self.shape = Some(ShapeGuard::new(self.kernel.clone(), first));
        Ok(())
    }

    fn try_orient(&mut self, mode: OrientationMode) -> Result<(), ProcessError> {
        self.expect_state(PipelineState::Loaded, Stage::Orient)?;
        let solid = self.loaded_solid(Stage::Orient)?.clone();

        let oriented = orient_solid(self.kernel.as_ref(), solid.clone(), mode).map_err(|source| {
            ProcessError::Kernel {
                stage: Stage::Orient,
                source,
            }
        })?;
        if oriented.id != solid.id {
            self.shape = Some(ShapeGuard::new(self.kernel.clone(), oriented));
        }
        Ok(())
    }

    fn try_color(&mut self, config: &ColoringConfig) -> Result<(), ProcessError> {
        self.expect_state(PipelineState::Oriented, Stage::Color)?;
        let solid = self.loaded_solid(Stage::Color)?;

        let faces = self
            .kernel
            .get_faces(solid)
            .map_err(|source| ProcessError::Kernel {
                stage: Stage::Color,
                source,
            })?;
        tracing::debug!("Found {} faces", faces.len());

        self.face_colors = FaceColorMap::build(&faces, config)?;
        Ok(())
    }

    fn try_save(
        &mut self,
        output: &Path,
        export: &ExportSettings,
    ) -> Result<StepExportReport, ProcessError> {
        self.expect_state(PipelineState::Colored, Stage::Save)?;
        let solid = self.loaded_solid(Stage::Save)?;
        let styles: Vec<FaceStyle> = self.face_colors.to_face_styles();

        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let temp = tempfile::Builder::new()
            .prefix(".stepcolor-")
            .suffix(".step")
            .tempfile_in(&dir)
            .map_err(|source| ProcessError::TempFile {
                dir: dir.clone(),
                source,
            })?
            .into_temp_path();

        let report = self
            .kernel
            .export_step(solid, &styles, &temp, &export.to_export_options(output))
            .map_err(|source| ProcessError::Save {
                path: output.to_path_buf(),
                source,
            })?;

        temp.persist(output).map_err(|e| ProcessError::Persist {
            path: output.to_path_buf(),
            source: e.error,
        })?;

        if report.styles_discarded > 0 {
            tracing::warn!(
                "{} of {} face colors were not written to {}",
                report.styles_discarded,
                styles.len(),
                output.display()
            );
        }
        Ok(report)
    }

    // ========== Helpers ==========

    fn expect_state(&self, expected: PipelineState, stage: Stage) -> Result<(), ProcessError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ProcessError::OutOfOrder {
                stage,
                state: self.state,
            })
        }
    }

    fn loaded_solid(&self, stage: Stage) -> Result<&Solid, ProcessError> {
        self.shape
            .as_ref()
            .map(|guard| &guard.solid)
            .ok_or(ProcessError::OutOfOrder {
                stage,
                state: self.state,
            })
    }

    /// Apply the transition on success, fail the processor otherwise
    fn settle<T>(
        &mut self,
        result: Result<T, ProcessError>,
        next: PipelineState,
    ) -> Result<T, ProcessError> {
        match result {
            Ok(value) => {
                self.state = next;
                Ok(value)
            }
            Err(e) => {
                tracing::error!("{}", e.report());
                self.fail();
                Err(e)
            }
        }
    }

    fn fail(&mut self) {
        self.state = PipelineState::Failed;
        self.shape = None;
    }
}

/// Process one file with a fresh processor
pub fn process_file(
    kernel: Arc<dyn CadKernel>,
    input: &Path,
    output: &Path,
    settings: &ProcessSettings,
    reporter: &mut dyn ProgressReporter,
) -> Result<ProcessSummary, ProcessError> {
    StepProcessor::new(kernel).process_file(input, output, settings, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, ColoringMethod};
    use crate::error::ErrorKind;
    use crate::test_kernel::{FakeKernel, sorted_points, write_box_step};
    use sc_cad::TruckKernel;

    #[derive(Default)]
    struct Recorder {
        progress: Vec<u8>,
        status: Vec<String>,
    }

    impl ProgressReporter for Recorder {
        fn progress(&mut self, percent: u8) {
            self.progress.push(percent);
        }

        fn status(&mut self, message: &str) {
            self.status.push(message.to_string());
        }
    }

    fn input_file(dir: &Path) -> PathBuf {
        let path = dir.join("part.step");
        std::fs::write(&path, "ISO-10303-21;").unwrap();
        path
    }

    fn settings(method: ColoringMethod, count: u32) -> ProcessSettings {
        ProcessSettings {
            coloring: ColoringConfig::new(method, count),
            ..Default::default()
        }
    }

    #[test]
    fn test_six_faces_gradient_three() {
        let dir = tempfile::tempdir().unwrap();
        let input = input_file(dir.path());
        let output = dir.path().join("part_colored.step");
        let kernel = Arc::new(FakeKernel::new(6));

        let summary = process_file(
            kernel.clone(),
            &input,
            &output,
            &settings(ColoringMethod::Gradient, 3),
            &mut NoProgress,
        )
        .unwrap();

        let blue = Color::rgb(0.0, 0.0, 1.0);
        let mid = Color::rgb(0.5, 0.5, 0.5);
        let red = Color::rgb(1.0, 0.0, 0.0);
        assert_eq!(summary.face_count, 6);
        assert_eq!(summary.face_colors.colors(), vec![blue, mid, red, blue, mid, red]);
        assert_eq!(summary.report.styles_written, 6);
        assert!(output.exists());

        let styles = kernel.exported_styles.lock().clone();
        assert_eq!(styles.len(), 6);
        assert_eq!(styles[4].rgb, [0.5, 0.5, 0.5]);
        assert_eq!(kernel.live_count(), 0);
    }

    #[test]
    fn test_truck_box_gradient_three() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("box.step");
        let output = dir.path().join("box_colored.step");
        write_box_step(&input);
        let kernel = Arc::new(TruckKernel::new());

        let summary = process_file(
            kernel.clone(),
            &input,
            &output,
            &settings(ColoringMethod::Gradient, 3),
            &mut NoProgress,
        )
        .unwrap();

        let blue = Color::rgb(0.0, 0.0, 1.0);
        let mid = Color::rgb(0.5, 0.5, 0.5);
        let red = Color::rgb(1.0, 0.0, 0.0);
        assert_eq!(summary.face_count, 6);
        assert_eq!(summary.face_colors.colors(), vec![blue, mid, red, blue, mid, red]);
        assert_eq!(summary.report.styles_written, 0);
        assert_eq!(summary.report.styles_discarded, 6);
        assert_eq!(kernel.stored_count(), 0);

        let original = kernel.import_step(&input).unwrap().solids.remove(0);
        let reread = kernel.import_step(&output).unwrap().solids;
        assert_eq!(reread.len(), 1);
        assert_eq!(kernel.get_faces(&reread[0]).unwrap().len(), 6);
        assert_eq!(
            sorted_points(kernel.get_vertices(&reread[0]).unwrap()),
            sorted_points(kernel.get_vertices(&original).unwrap())
        );
    }

    #[test]
    fn test_fixed_palette_two_faces() {
        let dir = tempfile::tempdir().unwrap();
        let input = input_file(dir.path());
        let output = dir.path().join("out.step");

        let summary = process_file(
            Arc::new(FakeKernel::new(2)),
            &input,
            &output,
            &settings(ColoringMethod::FixedPalette, 10),
            &mut NoProgress,
        )
        .unwrap();

        assert_eq!(summary.face_colors.colors(), vec![Color::RED, Color::GREEN]);
    }

    #[test]
    fn test_zero_shapes_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = input_file(dir.path());
        let mut processor = StepProcessor::new(Arc::new(FakeKernel::new(6).with_shapes(0)));

        let err = processor
            .process_file(
                &input,
                &dir.path().join("out.step"),
                &ProcessSettings::default(),
                &mut NoProgress,
            )
            .unwrap_err();
        assert!(matches!(err, ProcessError::NoShapes { .. }));
        assert_eq!(err.kind(), ErrorKind::Load);
        assert_eq!(processor.state(), PipelineState::Failed);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.step");

        let err = process_file(
            Arc::new(FakeKernel::new(6)),
            &dir.path().join("missing.step"),
            &output,
            &ProcessSettings::default(),
            &mut NoProgress,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Load);
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_count_fails_before_loading() {
        let dir = tempfile::tempdir().unwrap();
        let input = input_file(dir.path());
        let kernel = Arc::new(FakeKernel::new(6));
        let mut processor = StepProcessor::new(kernel.clone());
        let mut recorder = Recorder::default();

        let err = processor
            .process_file(
                &input,
                &dir.path().join("out.step"),
                &settings(ColoringMethod::Gradient, 0),
                &mut recorder,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        assert_eq!(processor.state(), PipelineState::Failed);
        assert_eq!(kernel.live_count(), 0);
        assert_eq!(recorder.status, vec!["Loading STEP file...".to_string()]);
        assert!(recorder.progress.is_empty());
    }

    #[test]
    fn test_failed_save_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = input_file(dir.path());
        let output = dir.path().join("out.step");
        let kernel = Arc::new(FakeKernel::new(4).failing_export());

        let err = process_file(
            kernel.clone(),
            &input,
            &output,
            &ProcessSettings::default(),
            &mut NoProgress,
        )
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Save);
        assert!(!output.exists());
        // Only the input remains; the temporary file is gone
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(kernel.live_count(), 0);
    }

    #[test]
    fn test_missing_output_dir_is_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = input_file(dir.path());
        let output = dir.path().join("no/such/dir/out.step");

        let err = process_file(
            Arc::new(FakeKernel::new(4)),
            &input,
            &output,
            &ProcessSettings::default(),
            &mut NoProgress,
        )
        .unwrap_err();
        assert!(matches!(err, ProcessError::TempFile { .. }));
        assert_eq!(err.kind(), ErrorKind::Save);
    }

    #[test]
    fn test_progress_is_monotone_and_completes() {
        let dir = tempfile::tempdir().unwrap();
        let input = input_file(dir.path());
        let mut recorder = Recorder::default();

        process_file(
            Arc::new(FakeKernel::new(3)),
            &input,
            &dir.path().join("out.step"),
            &ProcessSettings::default(),
            &mut recorder,
        )
        .unwrap();

        assert_eq!(recorder.progress, vec![10, 30, 50, 75, 100]);
        assert!(recorder.progress.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(recorder.status.first().map(String::as_str), Some("Loading STEP file..."));
        assert_eq!(recorder.status.last().map(String::as_str), Some("Processing complete!"));
    }

    #[test]
    fn test_tracker_clamps() {
        let mut recorder = Recorder::default();
        {
            let mut tracker = ProgressTracker::new(&mut recorder);
            tracker.advance(50);
            tracker.advance(30);
            tracker.advance(200);
        }
        assert_eq!(recorder.progress, vec![50, 50, 100]);
    }

    #[test]
    fn test_extra_shapes_released() {
        let dir = tempfile::tempdir().unwrap();
        let input = input_file(dir.path());
        let kernel = Arc::new(FakeKernel::new(2).with_shapes(3));
        let mut processor = StepProcessor::new(kernel.clone());

        processor.load_step_file(&input).unwrap();
        assert_eq!(processor.state(), PipelineState::Loaded);
        assert_eq!(kernel.live_count(), 1);

        drop(processor);
        assert_eq!(kernel.live_count(), 0);
    }

    #[test]
    fn test_stage_out_of_order() {
        let mut processor = StepProcessor::new(Arc::new(FakeKernel::new(2)));
        let err = processor
            .color_faces(&ColoringConfig::default())
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessError::OutOfOrder {
                stage: Stage::Color,
                state: PipelineState::Idle
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(processor.state(), PipelineState::Failed);
    }

    #[test]
    fn test_stages_by_hand() {
        let dir = tempfile::tempdir().unwrap();
        let input = input_file(dir.path());
        let output = dir.path().join("by_hand.step");
        let mut processor = StepProcessor::new(Arc::new(FakeKernel::new(5)));

        processor.load_step_file(&input).unwrap();
        processor.orient_shape(OrientationMode::Manual).unwrap();
        assert_eq!(processor.state(), PipelineState::Oriented);

        let map = processor
            .color_faces(&ColoringConfig::new(ColoringMethod::Random, 5).with_seed(9))
            .unwrap();
        assert_eq!(map.len(), 5);

        processor
            .save_colored_step(&output, &ExportSettings::default())
            .unwrap();
        assert_eq!(processor.state(), PipelineState::Saved);
        assert!(processor.shape().is_none());
        assert!(output.exists());
    }
}
