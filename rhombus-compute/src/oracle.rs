use crate::formula::OrbitFormula;
use rhombus_core::{Complex, Real};

/// Color painted for points whose orbit never escapes.
pub const BASIN_COLOR: u32 = 0;

/// Escape-time coloring of a single point.
///
/// Continues an orbit from an arbitrary starting value and iteration
/// count, which is what lets the scan-line renderer pick up where the
/// interpolated key grid left off.
pub struct EscapeTimeOracle<'a, F> {
    formula: &'a F,
    max_iterations: u32,
}

impl<'a, F: OrbitFormula> EscapeTimeOracle<'a, F> {
    pub fn new(formula: &'a F, max_iterations: u32) -> Self {
        Self {
            formula,
            max_iterations,
        }
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Iterate `z0` for parameter `c` starting the count at `start`.
    ///
    /// Returns the count at which the orbit escaped, or `BASIN_COLOR` once
    /// the count reaches `max_iterations`. The escaping step itself is not
    /// counted.
    #[inline]
    pub fn iterate<T: Real>(&self, c: Complex<T>, z0: Complex<T>, start: u32) -> u32 {
        let mut z = z0;
        let mut n = start;
        while n < self.max_iterations {
            if self.formula.step(c, &mut z) {
                return n;
            }
            n += 1;
        }
        BASIN_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Mandelbrot;

    #[test]
    fn origin_never_escapes() {
        let m = Mandelbrot::default();
        let oracle = EscapeTimeOracle::new(&m, 100);
        let c = Complex::new(0.0_f64, 0.0);
        assert_eq!(oracle.iterate(c, c, 1), BASIN_COLOR);
    }

    #[test]
    fn escaping_step_is_not_counted() {
        let m = Mandelbrot::default();
        let oracle = EscapeTimeOracle::new(&m, 100);
        // c = 2: z1 = 2, z2 = 6 escapes on the first step
        let c = Complex::new(2.0_f64, 0.0);
        assert_eq!(oracle.iterate(c, c, 1), 1);
        // c = 1: z1 = 1, z2 = 2, z3 = 5
        let c = Complex::new(1.0_f64, 0.0);
        assert_eq!(oracle.iterate(c, c, 1), 2);
    }

    #[test]
    fn start_offsets_the_count() {
        let m = Mandelbrot::default();
        let oracle = EscapeTimeOracle::new(&m, 100);
        let c = Complex::new(1.0_f64, 0.0);
        // Resuming at z2 = 2 with count 2 reaches the same answer
        assert_eq!(oracle.iterate(c, Complex::new(2.0, 0.0), 2), 2);
        assert_eq!(oracle.iterate(c, c, 10), 11);
    }

    #[test]
    fn start_at_budget_is_basin_without_stepping() {
        let m = Mandelbrot::default();
        let oracle = EscapeTimeOracle::new(&m, 50);
        let c = Complex::new(10.0_f64, 0.0);
        assert_eq!(oracle.iterate(c, c, 50), BASIN_COLOR);
        assert_eq!(oracle.iterate(c, c, 51), BASIN_COLOR);
    }

    #[test]
    fn works_with_f32() {
        let m = Mandelbrot::default();
        let oracle = EscapeTimeOracle::new(&m, 64);
        let c = Complex::new(1.0_f32, 0.0);
        assert_eq!(oracle.iterate(c, c, 1), 2);
    }
}
