//! Newton-form quadratic interpolation through three samples.
//!
//! Used in two ways by the subdivider: one-off evaluation when predicting
//! test points and seeding child rectangles, and cached coefficients when
//! scanning, where the same polynomial is evaluated once per pixel.

use crate::Real;

/// Coefficients `(b0, b1, b2)` of the Newton polynomial through
/// `(x0, w0)`, `(x1, w1)`, `(x2, w2)`.
#[inline]
pub fn compute_coefficients<T: Real>(x0: T, x1: T, x2: T, w0: T, w1: T, w2: T) -> (T, T, T) {
    let b1 = (w1 - w0) / (x1 - x0);
    let b2 = ((w2 - w1) / (x2 - x1) - b1) / (x2 - x0);
    (w0, b1, b2)
}

/// Evaluate the Newton polynomial given by `(x0, b0)`, `(x1, b1)`, `b2` at `t`.
#[inline]
pub fn evaluate<T: Real>(x0: T, x1: T, b0: T, b1: T, b2: T, t: T) -> T {
    (b2 * (t - x1) + b1) * (t - x0) + b0
}

/// Value at `t` of the quadratic through the three samples.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn interpolate<T: Real>(x0: T, x1: T, x2: T, w0: T, w1: T, w2: T, t: T) -> T {
    let (b0, b1, b2) = compute_coefficients(x0, x1, x2, w0, w1, w2);
    evaluate(x0, x1, b0, b1, b2, t)
}

/// Cached Newton polynomial, fitted once and evaluated many times.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NewtonPoly<T> {
    x0: T,
    x1: T,
    b0: T,
    b1: T,
    b2: T,
}

impl<T: Real> NewtonPoly<T> {
    /// Fit the polynomial through `(xs[i], ws[i])`.
    #[inline]
    pub fn fit(xs: [T; 3], ws: [T; 3]) -> Self {
        let (b0, b1, b2) = compute_coefficients(xs[0], xs[1], xs[2], ws[0], ws[1], ws[2]);
        Self {
            x0: xs[0],
            x1: xs[1],
            b0,
            b1,
            b2,
        }
    }

    #[inline]
    pub fn eval(&self, t: T) -> T {
        evaluate(self.x0, self.x1, self.b0, self.b1, self.b2, t)
    }
}
