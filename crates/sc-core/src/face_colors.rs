//! Face → color mapping for one processing run

use sc_cad::{FaceId, FaceStyle};

use crate::color::{Color, ColorError, ColoringConfig, assign_colors};

/// Colors assigned to faces, in kernel traversal order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceColorMap {
    entries: Vec<(FaceId, Color)>,
}

impl FaceColorMap {
    /// Pair every face with the color at its traversal index
    pub fn build(faces: &[FaceId], config: &ColoringConfig) -> Result<Self, ColorError> {
        let colors = assign_colors(faces.len(), config)?;
        let entries = faces
            .iter()
            .zip(colors)
            .map(|(face, color)| (*face, color))
            .collect();
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(FaceId, Color)> {
        self.entries.iter()
    }

    /// Color of a face, if it was mapped
    pub fn get(&self, face: FaceId) -> Option<Color> {
        self.entries
            .iter()
            .find(|(id, _)| *id == face)
            .map(|(_, color)| *color)
    }

    /// Colors in face order
    pub fn colors(&self) -> Vec<Color> {
        self.entries.iter().map(|(_, color)| *color).collect()
    }

    /// Convert to the kernel's writer input
    pub fn to_face_styles(&self) -> Vec<FaceStyle> {
        self.entries
            .iter()
            .map(|(face, color)| FaceStyle {
                face: *face,
                rgb: color.to_rgb(),
            })
            .collect()
    }
}
