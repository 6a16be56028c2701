//! Orbit formulas: the per-step capability the engine iterates.
//!
//! Both formulas start their orbit at the pixel's own coordinate, which is
//! what lets the driver seed the key points with their plane positions.

use rhombus_core::{Complex, FractalConfig, Real};

/// One step of an escape-time formula.
pub trait OrbitFormula {
    /// Identifier matching the `FractalConfig` registry
    fn id(&self) -> &'static str;

    /// Advance `z` by one iteration for the orbit belonging to `pixel`.
    fn next<T: Real>(&self, pixel: Complex<T>, z: Complex<T>) -> Complex<T>;

    /// |z|² above which a pixel's orbit counts as escaped when coloring.
    fn bailout_sq(&self) -> f64;

    /// Advance `z` in place and report whether it escaped.
    #[inline]
    fn step<T: Real>(&self, pixel: Complex<T>, z: &mut Complex<T>) -> bool {
        *z = self.next(pixel, *z);
        // Negated so a NaN orbit counts as escaped
        !(z.norm_sq().to_f64() <= self.bailout_sq())
    }
}

/// z → z² + c with c the pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mandelbrot {
    pub bailout_sq: f64,
}

impl Mandelbrot {
    pub fn new(bailout_sq: f64) -> Self {
        Self { bailout_sq }
    }

    pub fn from_config(config: &FractalConfig) -> Self {
        Self::new(config.bailout_sq)
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl OrbitFormula for Mandelbrot {
    fn id(&self) -> &'static str {
        "mandelbrot"
    }

    #[inline]
    fn next<T: Real>(&self, pixel: Complex<T>, z: Complex<T>) -> Complex<T> {
        z.square() + pixel
    }

    fn bailout_sq(&self) -> f64 {
        self.bailout_sq
    }
}

/// z → z² + k for a fixed k; the pixel only seeds the orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Julia {
    pub k: (f64, f64),
    pub bailout_sq: f64,
}

impl Julia {
    pub fn new(k: (f64, f64), bailout_sq: f64) -> Self {
        Self { k, bailout_sq }
    }

    pub fn from_config(config: &FractalConfig) -> Self {
        Self::new(config.default_param, config.bailout_sq)
    }
}

impl OrbitFormula for Julia {
    fn id(&self) -> &'static str {
        "julia"
    }

    #[inline]
    fn next<T: Real>(&self, _pixel: Complex<T>, z: Complex<T>) -> Complex<T> {
        z.square() + Complex::from_f64_pair(self.k.0, self.k.1)
    }

    fn bailout_sq(&self) -> f64 {
        self.bailout_sq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhombus_core::{JULIA_CONFIG, MANDELBROT_CONFIG};

    #[test]
    fn mandelbrot_step_squares_and_adds_pixel() {
        let m = Mandelbrot::default();
        let c = Complex::new(0.5_f64, -1.0);
        let z = m.next(c, Complex::new(1.0, 1.0));
        // (1+i)² = 2i
        assert_eq!(z, Complex::new(0.5, 1.0));
    }

    #[test]
    fn step_reports_escape_against_bailout() {
        let m = Mandelbrot::new(4.0);
        let c = Complex::new(2.0_f64, 0.0);
        let mut z = c;
        // 2² + 2 = 6 escapes
        assert!(m.step(c, &mut z));
        assert_eq!(z.re, 6.0);

        let c = Complex::new(-1.0_f64, 0.0);
        let mut z = c;
        // (-1)² - 1 = 0 stays
        assert!(!m.step(c, &mut z));
    }

    #[test]
    fn nan_orbit_counts_as_escaped() {
        let m = Mandelbrot::default();
        let c = Complex::new(f64::NAN, 0.0);
        let mut z = Complex::zero();
        assert!(m.step(c, &mut z));
    }

    #[test]
    fn julia_ignores_pixel() {
        let j = Julia::new((-0.8, 0.156), 4.0);
        let z0 = Complex::new(0.0_f64, 0.0);
        let a = j.next(Complex::new(5.0, 5.0), z0);
        let b = j.next(Complex::new(-5.0, 1.0), z0);
        assert_eq!(a, b);
        assert_eq!(a, Complex::new(-0.8, 0.156));
    }

    #[test]
    fn formulas_built_from_registry() {
        assert_eq!(Mandelbrot::from_config(&MANDELBROT_CONFIG).bailout_sq, 4.0);
        assert_eq!(Julia::from_config(&JULIA_CONFIG).k, (-0.8, 0.156));
        assert_eq!(Mandelbrot::default().id(), MANDELBROT_CONFIG.id);
        assert_eq!(Julia::from_config(&JULIA_CONFIG).id(), JULIA_CONFIG.id);
    }
}
