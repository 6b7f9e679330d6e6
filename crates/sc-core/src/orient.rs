//! Shape orientation
//!
//! Orientation is an identity transform for every mode. `Auto` measures the
//! bounding box and logs its center; a shape that cannot be measured is
//! logged and passed through. `Manual` and `PrincipalAxes` are accepted and
//! leave the shape untouched.

use std::fmt;
use std::str::FromStr;

use sc_cad::{CadKernel, CadResult, Solid};
use serde::{Deserialize, Serialize};

/// Orientation criteria selectable in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationMode {
    #[default]
    Auto,
    Manual,
    PrincipalAxes,
}

impl OrientationMode {
    /// All modes, in UI order
    pub fn all() -> [OrientationMode; 3] {
        [
            OrientationMode::Auto,
            OrientationMode::Manual,
            OrientationMode::PrincipalAxes,
        ]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            OrientationMode::Auto => "Auto",
            OrientationMode::Manual => "Manual",
            OrientationMode::PrincipalAxes => "Principal Axes",
        }
    }
}

impl fmt::Display for OrientationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            OrientationMode::Auto => "auto",
            OrientationMode::Manual => "manual",
            OrientationMode::PrincipalAxes => "principal-axes",
        };
        f.write_str(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown orientation mode: {0}")]
pub struct UnknownOrientation(pub String);

impl FromStr for OrientationMode {
    type Err = UnknownOrientation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "auto" => Ok(OrientationMode::Auto),
            "manual" => Ok(OrientationMode::Manual),
            "principal_axes" => Ok(OrientationMode::PrincipalAxes),
            _ => Err(UnknownOrientation(s.to_string())),
        }
    }
}

/// Orient a solid according to `mode`
///
/// Always returns the input solid unchanged.
pub fn orient_solid(
    kernel: &dyn CadKernel,
    solid: Solid,
    mode: OrientationMode,
) -> CadResult<Solid> {
    match mode {
        OrientationMode::Auto => match kernel.bounding_box(&solid) {
            Ok(bbox) => {
                let center = bbox.center();
                tracing::debug!(
                    "Shape center: ({:.3}, {:.3}, {:.3}), size: {:?}",
                    center.x,
                    center.y,
                    center.z,
                    bbox.size()
                );
            }
            Err(e) => {
                tracing::warn!("Could not measure shape {}: {}", solid.id, e);
            }
        },
        OrientationMode::Manual | OrientationMode::PrincipalAxes => {
            tracing::warn!(
                "Orientation mode '{}' is not implemented, shape left unchanged",
                mode
            );
        }
    }
    Ok(solid)
}
