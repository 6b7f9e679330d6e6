//! Face color assignment policy
//!
//! Pure functions that turn a [`ColoringConfig`] into a base palette and
//! cycle that palette over a face sequence: face `i` gets
//! `palette[i % palette.len()]`.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_COLOR_COUNT;

/// An RGB color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Opacity; generated colors are always opaque
    pub alpha: f32,
}

impl Color {
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);

    /// Create an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// RGB components as an array
    pub fn to_rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Quantize to 8-bit RGBA
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.alpha)]
    }
}

/// Constant palette used by [`ColoringMethod::FixedPalette`]
pub const FIXED_PALETTE: [Color; 5] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::MAGENTA,
];

/// How the base palette is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColoringMethod {
    /// Uniformly random components
    #[default]
    Random,
    /// Blue → green → red sweep
    Gradient,
    /// Red, green, blue, yellow, magenta
    FixedPalette,
}

impl ColoringMethod {
    /// All methods, in UI order
    pub fn all() -> [ColoringMethod; 3] {
        [
            ColoringMethod::Random,
            ColoringMethod::Gradient,
            ColoringMethod::FixedPalette,
        ]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ColoringMethod::Random => "Random Colors",
            ColoringMethod::Gradient => "Gradient",
            ColoringMethod::FixedPalette => "Custom Palette",
        }
    }

    /// Whether `count` affects the palette
    pub fn uses_count(&self) -> bool {
        !matches!(self, ColoringMethod::FixedPalette)
    }
}

impl fmt::Display for ColoringMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            ColoringMethod::Random => "random",
            ColoringMethod::Gradient => "gradient",
            ColoringMethod::FixedPalette => "fixed-palette",
        };
        f.write_str(key)
    }
}

impl FromStr for ColoringMethod {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "random" | "random_colors" => Ok(ColoringMethod::Random),
            "gradient" => Ok(ColoringMethod::Gradient),
            "fixed_palette" | "custom_palette" | "palette" => Ok(ColoringMethod::FixedPalette),
            _ => Err(ColorError::UnknownMethod(s.to_string())),
        }
    }
}

/// Coloring parameters for one processing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColoringConfig {
    pub method: ColoringMethod,
    /// Palette size / gradient resolution; must be positive
    pub count: u32,
    /// Seed for [`ColoringMethod::Random`]; `None` draws a fresh one
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ColoringConfig {
    fn default() -> Self {
        Self {
            method: ColoringMethod::default(),
            count: DEFAULT_COLOR_COUNT,
            seed: None,
        }
    }
}

impl ColoringConfig {
    /// Create a config without a seed
    pub fn new(method: ColoringMethod, count: u32) -> Self {
        Self {
            method,
            count,
            seed: None,
        }
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations no method can honor
    pub fn validate(&self) -> Result<(), ColorError> {
        if self.count == 0 {
            return Err(ColorError::InvalidCount(self.count));
        }
        Ok(())
    }
}

/// Coloring configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color count must be positive, got {0}")]
    InvalidCount(u32),
    #[error("unknown coloring method: {0}")]
    UnknownMethod(String),
}

/// Evenly spaced blue → green → red gradient with `count` stops
///
/// Stop `i` uses `t = i / (count - 1)` (or `0` for a single stop):
/// red is `t`, blue is `1 - t` and green peaks at `t = 0.5`.
pub fn gradient_palette(count: u32) -> Vec<Color> {
    (0..count)
        .map(|i| {
            let t = if count > 1 {
                i as f32 / (count - 1) as f32
            } else {
                0.0
            };
            Color::rgb(t, 0.5 * (1.0 - (2.0 * t - 1.0).abs()), 1.0 - t)
        })
        .collect()
}

/// `count` colors with independent uniform components
pub fn random_palette(count: u32, seed: Option<u64>) -> Vec<Color> {
    let seed = seed.unwrap_or_else(rand::random);
    tracing::debug!("Generating {} random colors with seed {}", count, seed);

    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Color::rgb(rng.random(), rng.random(), rng.random()))
        .collect()
}

/// Base palette for a configuration
pub fn base_palette(config: &ColoringConfig) -> Result<Vec<Color>, ColorError> {
    config.validate()?;

    let palette = match config.method {
        ColoringMethod::Random => random_palette(config.count, config.seed),
        ColoringMethod::Gradient => gradient_palette(config.count),
        ColoringMethod::FixedPalette => FIXED_PALETTE.to_vec(),
    };
    Ok(palette)
}

/// One color per face, cycling the base palette
pub fn assign_colors(face_count: usize, config: &ColoringConfig) -> Result<Vec<Color>, ColorError> {
    let palette = base_palette(config)?;
    Ok((0..face_count)
        .map(|i| palette[i % palette.len()])
        .collect())
}
