use crate::{BigFloat, CoreError, PlaneBounds};
use serde::{Deserialize, Serialize};

/// Viewport in fractal space with BigFloat precision
///
/// Defines a rectangular region in fractal coordinates:
/// - `center`: Center point (x, y) in fractal space
/// - `width`: Visible width in fractal space
/// - `height`: Visible height in fractal space
///
/// Deep zooms keep their coordinates here; [`Viewport::bounds`] resolves the
/// corners in big-number arithmetic and hands native floats to the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: (BigFloat, BigFloat),
    pub width: BigFloat,
    pub height: BigFloat,
}

impl Viewport {
    pub fn with_bigfloat(
        center_x: BigFloat,
        center_y: BigFloat,
        width: BigFloat,
        height: BigFloat,
    ) -> Self {
        Self {
            center: (center_x, center_y),
            width,
            height,
        }
    }

    /// Create new viewport from f64 values with explicit precision
    pub fn from_f64(
        center_x: f64,
        center_y: f64,
        width: f64,
        height: f64,
        precision_bits: usize,
    ) -> Self {
        Self {
            center: (
                BigFloat::with_precision(center_x, precision_bits),
                BigFloat::with_precision(center_y, precision_bits),
            ),
            width: BigFloat::with_precision(width, precision_bits),
            height: BigFloat::with_precision(height, precision_bits),
        }
    }

    /// Create viewport from decimal strings (saved positions, registry defaults).
    pub fn from_strings(
        center_x: &str,
        center_y: &str,
        width: &str,
        height: &str,
        precision_bits: usize,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            center: (
                BigFloat::from_string(center_x, precision_bits)?,
                BigFloat::from_string(center_y, precision_bits)?,
            ),
            width: BigFloat::from_string(width, precision_bits)?,
            height: BigFloat::from_string(height, precision_bits)?,
        })
    }

    pub fn precision_bits(&self) -> usize {
        self.width.precision_bits()
    }

    /// True when corners must be resolved in big-number arithmetic.
    pub fn needs_big_math(&self) -> bool {
        self.width.is_wide()
            || self.height.is_wide()
            || self.center.0.is_wide()
            || self.center.1.is_wide()
    }

    /// Resolve the four plane extents and convert each to f64 once.
    pub fn bounds(&self) -> PlaneBounds<f64> {
        let half_w = self.width.half();
        let half_h = self.height.half();
        PlaneBounds {
            re_min: self.center.0.sub(&half_w).to_f64(),
            re_max: self.center.0.add(&half_w).to_f64(),
            im_min: self.center.1.sub(&half_h).to_f64(),
            im_max: self.center.1.add(&half_h).to_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f64_bounds_are_centered() {
        let vp = Viewport::from_f64(-0.5, 0.0, 3.0, 3.0, 64);
        let b = vp.bounds();
        assert_eq!(b.re_min, -2.0);
        assert_eq!(b.re_max, 1.0);
        assert_eq!(b.im_min, -1.5);
        assert_eq!(b.im_max, 1.5);
        assert!(!vp.needs_big_math());
    }

    #[test]
    fn from_strings_reports_parse_errors() {
        let err = Viewport::from_strings("-0.5", "zero", "4", "4", 64).unwrap_err();
        assert!(matches!(err, CoreError::Parse { .. }));
    }

    #[test]
    fn deep_viewport_resolves_with_big_math() {
        // Center offset is below f64 resolution relative to 1.0 but the
        // extents relative to the center still resolve.
        let vp = Viewport::from_strings("1.0000000000000000000001", "0", "1e-10", "1e-10", 256)
            .unwrap();
        assert!(vp.needs_big_math());
        let b = vp.bounds();
        assert!(b.re_max > b.re_min);
        assert!((b.re_max - b.re_min - 1e-10).abs() < 1e-15);
        assert!((b.im_max - 5e-11).abs() < 1e-24);
    }

    #[test]
    fn precision_bits_come_from_width() {
        let vp = Viewport::from_f64(0.0, 0.0, 1.0, 1.0, 512);
        assert_eq!(vp.precision_bits(), 512);
    }

    #[test]
    fn serialization_roundtrip_native() {
        let vp = Viewport::from_f64(-0.75, 0.1, 0.5, 0.25, 64);
        let json = serde_json::to_string(&vp).unwrap();
        let restored: Viewport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, vp);
    }
}
