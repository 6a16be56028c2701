//! Key point geometry and interpolation for one rectangle.
//!
//! A rectangle carries a 3x3 grid of orbit values: rows at the top, middle
//! and bottom imaginary coordinates, columns at the left, middle and right
//! real coordinates. Every value in the grid has been iterated the same
//! number of times, so any point inside the rectangle can be estimated by
//! quadratic interpolation across the grid.

use rhombus_core::{interpolate, Complex, Real};

/// Index of the top-left, top-right, bottom-left and bottom-right quadrant.
pub const QUADRANTS: [(usize, usize); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

/// Plane abscissas of a rectangle's key grid.
///
/// `re` runs left to right and `im` top to bottom; the imaginary axis is
/// usually inverted so `im[0] > im[2]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectFrame<T> {
    pub re: [T; 3],
    pub im: [T; 3],
}

impl<T: Real> RectFrame<T> {
    pub fn new(re_left: T, re_right: T, im_top: T, im_bottom: T) -> Self {
        let two = T::from_f64(2.0);
        Self {
            re: [re_left, (re_left + re_right) / two, re_right],
            im: [im_top, (im_top + im_bottom) / two, im_bottom],
        }
    }

    /// Plane coordinate of key `(row, col)`.
    #[inline]
    pub fn key_point(&self, row: usize, col: usize) -> Complex<T> {
        Complex::new(self.re[col], self.im[row])
    }

    pub fn key_points(&self) -> [[Complex<T>; 3]; 3] {
        std::array::from_fn(|row| std::array::from_fn(|col| self.key_point(row, col)))
    }

    /// Real coordinates at one and three quarters of the width.
    pub fn quarter_re(&self) -> [T; 2] {
        quarters(self.re)
    }

    pub fn quarter_im(&self) -> [T; 2] {
        quarters(self.im)
    }

    /// Test points in quadrant order. Each sits at a child's centre.
    pub fn test_points(&self) -> [Complex<T>; 4] {
        let qre = self.quarter_re();
        let qim = self.quarter_im();
        QUADRANTS.map(|(r, c)| Complex::new(qre[c], qim[r]))
    }

    /// The four quadrant frames, split at the middle key row and column.
    pub fn children(&self) -> [RectFrame<T>; 4] {
        QUADRANTS.map(|(r, c)| RectFrame {
            re: [self.re[c], (self.re[c] + self.re[c + 1]) / T::from_f64(2.0), self.re[c + 1]],
            im: [self.im[r], (self.im[r] + self.im[r + 1]) / T::from_f64(2.0), self.im[r + 1]],
        })
    }
}

fn quarters<T: Real>(axis: [T; 3]) -> [T; 2] {
    let two = T::from_f64(2.0);
    [(axis[0] + axis[1]) / two, (axis[1] + axis[2]) / two]
}

/// Orbit values at the nine key points, `z[row][col]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyGrid<T> {
    pub z: [[Complex<T>; 3]; 3],
}

impl<T: Real> KeyGrid<T> {
    /// Keys before the first iteration: each orbit starts at its own point.
    pub fn identity(frame: &RectFrame<T>) -> Self {
        Self {
            z: frame.key_points(),
        }
    }

    /// Estimate the orbit value at `at`.
    ///
    /// The real part is interpolated along each row, then down the middle;
    /// the imaginary part along each column, then across.
    pub fn interpolate(&self, frame: &RectFrame<T>, at: Complex<T>) -> Complex<T> {
        let rows: [T; 3] = std::array::from_fn(|r| {
            let row = &self.z[r];
            interpolate(
                frame.re[0], frame.re[1], frame.re[2],
                row[0].re, row[1].re, row[2].re,
                at.re,
            )
        });
        let cols: [T; 3] = std::array::from_fn(|c| {
            interpolate(
                frame.im[0], frame.im[1], frame.im[2],
                self.z[0][c].im, self.z[1][c].im, self.z[2][c].im,
                at.im,
            )
        });
        Complex::new(
            interpolate(frame.im[0], frame.im[1], frame.im[2], rows[0], rows[1], rows[2], at.im),
            interpolate(frame.re[0], frame.re[1], frame.re[2], cols[0], cols[1], cols[2], at.re),
        )
    }

    /// Seed the four quadrant grids.
    ///
    /// Corner and edge-midpoint keys of the children that coincide with
    /// parent keys are copied. Quarter points along the parent's rows and
    /// columns are interpolated in one dimension. Each child's centre takes
    /// the matching entry of `centers`, the iterated test orbits.
    pub fn children(&self, frame: &RectFrame<T>, centers: &[Complex<T>; 4]) -> [KeyGrid<T>; 4] {
        let fine = self.refine(frame, centers);
        QUADRANTS.map(|(qr, qc)| KeyGrid {
            z: std::array::from_fn(|r| std::array::from_fn(|c| fine[2 * qr + r][2 * qc + c])),
        })
    }

    /// 5x5 grid at half the key spacing.
    fn refine(&self, frame: &RectFrame<T>, centers: &[Complex<T>; 4]) -> [[Complex<T>; 5]; 5] {
        let qre = frame.quarter_re();
        let qim = frame.quarter_im();
        let mut fine = [[Complex::zero(); 5]; 5];

        for (r, row) in self.z.iter().enumerate() {
            for (c, &z) in row.iter().enumerate() {
                fine[2 * r][2 * c] = z;
            }
            for (q, &t) in qre.iter().enumerate() {
                fine[2 * r][2 * q + 1] = along(frame.re, [row[0], row[1], row[2]], t);
            }
        }
        for c in 0..3 {
            let col = [self.z[0][c], self.z[1][c], self.z[2][c]];
            for (q, &t) in qim.iter().enumerate() {
                fine[2 * q + 1][2 * c] = along(frame.im, col, t);
            }
        }
        for (&(qr, qc), &center) in QUADRANTS.iter().zip(centers) {
            fine[2 * qr + 1][2 * qc + 1] = center;
        }
        fine
    }
}

/// Interpolate both components of three collinear keys.
fn along<T: Real>(xs: [T; 3], zs: [Complex<T>; 3], t: T) -> Complex<T> {
    Complex::new(
        interpolate(xs[0], xs[1], xs[2], zs[0].re, zs[1].re, zs[2].re, t),
        interpolate(xs[0], xs[1], xs[2], zs[0].im, zs[1].im, zs[2].im, t),
    )
}
