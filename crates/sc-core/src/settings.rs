//! Processing settings and output path helpers

use std::path::{Path, PathBuf};

use sc_cad::StepExportOptions;
use serde::{Deserialize, Serialize};

use crate::color::{ColorError, ColoringConfig};
use crate::constants::{OUTPUT_EXTENSION, OUTPUT_SUFFIX, STEP_EXTENSIONS};
use crate::orient::OrientationMode;

/// STEP writer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Originating system written to the STEP header
    pub application_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            application_name: StepExportOptions::default().application_name,
        }
    }
}

impl ExportSettings {
    /// Writer options for one output file
    pub fn to_export_options(&self, output: &Path) -> StepExportOptions {
        StepExportOptions {
            application_name: self.application_name.clone(),
            file_name: output
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
        }
    }
}

/// Complete configuration of one processing request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessSettings {
    pub orientation: OrientationMode,
    pub coloring: ColoringConfig,
    pub export: ExportSettings,
}

impl ProcessSettings {
    /// Check everything that can be checked before touching a file
    pub fn validate(&self) -> Result<(), ColorError> {
        self.coloring.validate()
    }

    /// Serialize to pretty-printed RON
    pub fn to_ron(&self) -> Result<String, SettingsError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SettingsError::Serialize(e.to_string()))
    }

    /// Parse from RON
    pub fn from_ron(content: &str) -> Result<Self, SettingsError> {
        ron::from_str(content).map_err(|e| SettingsError::Deserialize(e.to_string()))
    }

    /// Save settings to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let content = self.to_ron()?;
        std::fs::write(path.as_ref(), content).map_err(|e| SettingsError::Io(e.to_string()))
    }

    /// Load settings from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| SettingsError::Io(e.to_string()))?;
        Self::from_ron(&content)
    }
}

/// Settings persistence errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Whether a path has a STEP extension (case-insensitive)
pub fn is_step_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            STEP_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Default output path: `<stem>_colored.step` next to the input
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColoringMethod;

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path(Path::new("/data/bracket.stp")),
            PathBuf::from("/data/bracket_colored.step")
        );
        assert_eq!(
            derive_output_path(Path::new("parts/gear.v2.STEP")),
            PathBuf::from("parts/gear.v2_colored.step")
        );
        assert_eq!(
            derive_output_path(Path::new("housing")),
            PathBuf::from("housing_colored.step")
        );
    }

    #[test]
    fn test_is_step_path() {
        assert!(is_step_path(Path::new("a.step")));
        assert!(is_step_path(Path::new("a.STP")));
        assert!(is_step_path(Path::new("dir/a.Step")));
        assert!(!is_step_path(Path::new("a.stl")));
        assert!(!is_step_path(Path::new("step")));
    }

    #[test]
    fn test_ron_round_trip() {
        let settings = ProcessSettings {
            orientation: OrientationMode::PrincipalAxes,
            coloring: ColoringConfig::new(ColoringMethod::Gradient, 15).with_seed(3),
            export: ExportSettings {
                application_name: "test suite".into(),
            },
        };

        let text = settings.to_ron().unwrap();
        assert!(text.contains("principal_axes"));
        assert_eq!(ProcessSettings::from_ron(&text).unwrap(), settings);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let settings = ProcessSettings::from_ron("(orientation: manual)").unwrap();
        assert_eq!(settings.orientation, OrientationMode::Manual);
        assert_eq!(settings.coloring, ColoringConfig::default());
    }

    #[test]
    fn test_negative_count_rejected() {
        let text = "(coloring: (method: random, count: -5))";
        assert!(matches!(
            ProcessSettings::from_ron(text),
            Err(SettingsError::Deserialize(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");

        let mut settings = ProcessSettings::default();
        settings.coloring.count = 20;
        settings.save(&path).unwrap();

        assert_eq!(ProcessSettings::load(&path).unwrap(), settings);
        assert!(matches!(
            ProcessSettings::load(dir.path().join("missing.ron")),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_export_options_use_output_name() {
        let options =
            ExportSettings::default().to_export_options(Path::new("/out/part_colored.step"));
        assert_eq!(options.file_name.as_deref(), Some("part_colored.step"));
        assert!(options.application_name.starts_with("stepcolor"));
    }
}
