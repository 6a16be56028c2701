//! Fractal registry and engine tuning.
//!
//! `FractalConfig` entries are the canonical defaults for each supported
//! fractal type; `SoiConfig` holds the tunable constants of the
//! simultaneous orbit iteration engine.

use crate::{CoreError, Viewport};
use serde::{Deserialize, Serialize};

/// Configuration for a fractal type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractalConfig {
    /// Unique identifier (matches the formula id in the compute layer)
    pub id: &'static str,
    /// Human-readable name
    pub display_name: &'static str,
    /// Default center coordinates as strings (preserves precision)
    pub default_center: (&'static str, &'static str),
    pub default_width: &'static str,
    pub default_height: &'static str,
    /// Iteration budget for the default view
    pub max_iterations: u32,
    /// |z|² limit used when coloring pixels
    pub bailout_sq: f64,
    /// Fixed parameter of the formula (Julia constant); unused by Mandelbrot
    pub default_param: (f64, f64),
}

impl FractalConfig {
    /// Create the default viewport for this fractal at the given precision.
    pub fn default_viewport(&self, precision_bits: usize) -> Result<Viewport, CoreError> {
        Viewport::from_strings(
            self.default_center.0,
            self.default_center.1,
            self.default_width,
            self.default_height,
            precision_bits,
        )
    }
}

/// Classic Mandelbrot set over [-2, 1] x [-1.5, 1.5].
pub static MANDELBROT_CONFIG: FractalConfig = FractalConfig {
    id: "mandelbrot",
    display_name: "Mandelbrot Set",
    default_center: ("-0.5", "0.0"),
    default_width: "3.0",
    default_height: "3.0",
    max_iterations: 256,
    bailout_sq: 4.0,
    default_param: (0.0, 0.0),
};

pub static JULIA_CONFIG: FractalConfig = FractalConfig {
    id: "julia",
    display_name: "Julia Set",
    default_center: ("0.0", "0.0"),
    default_width: "3.0",
    default_height: "3.0",
    max_iterations: 256,
    bailout_sq: 4.0,
    default_param: (-0.8, 0.156),
};

pub static FRACTAL_CONFIGS: &[&FractalConfig] = &[&MANDELBROT_CONFIG, &JULIA_CONFIG];

/// Look up a fractal configuration by ID.
pub fn get_fractal_config(id: &str) -> Option<&'static FractalConfig> {
    FRACTAL_CONFIGS.iter().copied().find(|c| c.id == id)
}

/// Tunable constants of the SOI engine.
///
/// The defaults are the values the algorithm was tuned with; they are
/// empirical, not derived.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoiConfig {
    /// Allowed relative interpolation error across the whole canvas width.
    pub tolerance: f64,
    /// Rectangles this many rows tall or less are scanned instead of iterated.
    pub scan_threshold: u32,
    /// Stride of the scan-line sampling shortcut. 1 scans every pixel.
    pub interleave: u32,
    /// Lock-step iterations that must succeed before subdividing pays off;
    /// fewer and the rectangle is scanned from the saved key values.
    pub min_profitable_iterations: u32,
    /// Upper bound on pending rectangles in the work-list.
    pub max_pending_work: usize,
}

impl Default for SoiConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.1,
            scan_threshold: 16,
            interleave: 4,
            min_profitable_iterations: 10,
            max_pending_work: 4096,
        }
    }
}

impl SoiConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: SoiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "tolerance must be a finite non-negative number, got {}",
                self.tolerance
            )));
        }
        if self.scan_threshold == 0 {
            return Err(CoreError::InvalidConfig(
                "scan_threshold must be at least 1".to_string(),
            ));
        }
        if self.interleave == 0 {
            return Err(CoreError::InvalidConfig(
                "interleave must be at least 1".to_string(),
            ));
        }
        if self.max_pending_work == 0 {
            return Err(CoreError::InvalidConfig(
                "max_pending_work must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-pixel share of the tolerance for a canvas `width` pixels wide.
    pub fn tolerance_per_pixel(&self, width: u32) -> f64 {
        self.tolerance / (width.saturating_sub(1).max(1)) as f64
    }
}
