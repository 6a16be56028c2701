//! Plane extents and the pixel → plane mapping.

use crate::{Complex, CoreError, Real};
use serde::{Deserialize, Serialize};

/// Axis-aligned region of the complex plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneBounds<T> {
    pub re_min: T,
    pub re_max: T,
    pub im_min: T,
    pub im_max: T,
}

impl<T: Real> PlaneBounds<T> {
    pub fn new(re_min: T, re_max: T, im_min: T, im_max: T) -> Self {
        Self {
            re_min,
            re_max,
            im_min,
            im_max,
        }
    }

    /// Check that the region is finite and has positive extent on both axes.
    pub fn validate(&self) -> Result<(), CoreError> {
        let finite = [self.re_min, self.re_max, self.im_min, self.im_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(CoreError::DegenerateBounds(format!("{self:?} is not finite")));
        }
        if !(self.re_max > self.re_min && self.im_max > self.im_min) {
            return Err(CoreError::DegenerateBounds(format!(
                "{self:?} has no positive extent"
            )));
        }
        Ok(())
    }

    /// Convert to another scalar type.
    pub fn cast<U: Real>(&self) -> PlaneBounds<U> {
        PlaneBounds {
            re_min: U::from_f64(self.re_min.to_f64()),
            re_max: U::from_f64(self.re_max.to_f64()),
            im_min: U::from_f64(self.im_min.to_f64()),
            im_max: U::from_f64(self.im_max.to_f64()),
        }
    }

    /// Mapping for a canvas of `width` x `height` pixels. Pixel (0, 0) is the
    /// top-left corner `(re_min, im_max)`; the bottom-right corner
    /// `(re_max, im_min)` sits at pixel `(width, height)`, one past the last.
    pub fn pixel_mapping(&self, width: u32, height: u32) -> PixelMapping<T> {
        let step = Complex::new(
            (self.re_max - self.re_min) / T::from_f64(width as f64),
            (self.im_min - self.im_max) / T::from_f64(height as f64),
        );
        PixelMapping {
            origin: Complex::new(self.re_min, self.im_max),
            step,
        }
    }
}

/// Affine pixel → plane mapping shared by every renderer, so that a pixel
/// always gets the same plane coordinate no matter which path computes it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelMapping<T> {
    pub origin: Complex<T>,
    pub step: Complex<T>,
}

impl<T: Real> PixelMapping<T> {
    #[inline]
    pub fn re_at(&self, x: u32) -> T {
        self.origin.re + T::from_f64(x as f64) * self.step.re
    }

    #[inline]
    pub fn im_at(&self, y: u32) -> T {
        self.origin.im + T::from_f64(y as f64) * self.step.im
    }

    #[inline]
    pub fn point(&self, x: u32, y: u32) -> Complex<T> {
        Complex::new(self.re_at(x), self.im_at(y))
    }

    /// Smaller of the two absolute step sizes.
    pub fn min_step(&self) -> T {
        let sx = self.step.re.abs();
        let sy = self.step.im.abs();
        if sx < sy {
            sx
        } else {
            sy
        }
    }
}
