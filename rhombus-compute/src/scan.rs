//! Scan-line fallback: color a rectangle pixel by pixel, starting each
//! pixel's orbit from the value interpolated out of the key grid.

use crate::cancellation::CancellationChecker;
use crate::formula::OrbitFormula;
use crate::keys::{KeyGrid, RectFrame};
use crate::oracle::EscapeTimeOracle;
use crate::sink::PixelSink;
use crate::stats::RenderStatus;
use rhombus_core::{Complex, NewtonPoly, PixelMapping, PixelRect, Real};

/// Shared, per-render inputs of the scan-line renderer.
pub(crate) struct ScanContext<'a, T, F> {
    pub oracle: &'a EscapeTimeOracle<'a, F>,
    pub mapping: &'a PixelMapping<T>,
    pub interleave: u32,
}

/// Column polynomials of one rectangle, fitted along the imaginary axis.
struct ScanCoefficients<T> {
    re_axis: [T; 3],
    re_cols: [NewtonPoly<T>; 3],
    im_cols: [NewtonPoly<T>; 3],
}

impl<T: Real> ScanCoefficients<T> {
    fn new(frame: &RectFrame<T>, keys: &KeyGrid<T>) -> Self {
        let column = |c: usize, part: fn(&Complex<T>) -> T| {
            NewtonPoly::fit(frame.im, [part(&keys.z[0][c]), part(&keys.z[1][c]), part(&keys.z[2][c])])
        };
        Self {
            re_axis: frame.re,
            re_cols: std::array::from_fn(|c| column(c, |z| z.re)),
            im_cols: std::array::from_fn(|c| column(c, |z| z.im)),
        }
    }

    /// Cross-axis polynomials for the row at `im`.
    fn row(&self, im: T) -> RowPoly<T> {
        RowPoly {
            re: NewtonPoly::fit(self.re_axis, self.re_cols.map(|p| p.eval(im))),
            im: NewtonPoly::fit(self.re_axis, self.im_cols.map(|p| p.eval(im))),
        }
    }
}

struct RowPoly<T> {
    re: NewtonPoly<T>,
    im: NewtonPoly<T>,
}

impl<T: Real> RowPoly<T> {
    #[inline]
    fn at(&self, re: T) -> Complex<T> {
        Complex::new(self.re.eval(re), self.im.eval(re))
    }
}

/// Colors pixels of a single row on demand.
struct RowSampler<'a, T, F> {
    oracle: &'a EscapeTimeOracle<'a, F>,
    mapping: &'a PixelMapping<T>,
    poly: RowPoly<T>,
    im: T,
    start: u32,
    calls: u64,
}

impl<T: Real, F: OrbitFormula> RowSampler<'_, T, F> {
    #[inline]
    fn color(&mut self, x: u32) -> u32 {
        self.calls += 1;
        let re = self.mapping.re_at(x);
        let c = Complex::new(re, self.im);
        self.oracle.iterate(c, self.poly.at(re), self.start)
    }
}

/// Scan `pixels` row by row. Returns the number of oracle calls made and
/// whether the scan ran to completion.
pub(crate) fn scan_rect<T, F, S, C>(
    ctx: &ScanContext<'_, T, F>,
    frame: &RectFrame<T>,
    keys: &KeyGrid<T>,
    pixels: PixelRect,
    iter: u32,
    sink: &mut S,
    cancel: &C,
) -> (RenderStatus, u64)
where
    T: Real,
    F: OrbitFormula,
    S: PixelSink + ?Sized,
    C: CancellationChecker + ?Sized,
{
    let coeffs = ScanCoefficients::new(frame, keys);
    let mut calls = 0;

    for y in pixels.y..pixels.y_end() {
        if cancel.is_cancelled() {
            return (RenderStatus::Cancelled, calls);
        }
        let im = ctx.mapping.im_at(y);
        let mut sampler = RowSampler {
            oracle: ctx.oracle,
            mapping: ctx.mapping,
            poly: coeffs.row(im),
            im,
            start: iter,
            calls: 0,
        };
        scan_row(&mut sampler, pixels.x, pixels.x_end(), y, ctx.interleave, sink);
        calls += sampler.calls;
    }
    (RenderStatus::Completed, calls)
}

/// Paint columns `x1..x2` of row `y`, sampling every `interleave`-th pixel
/// and searching back for the boundary whenever the color changes.
fn scan_row<T, F, S>(sampler: &mut RowSampler<'_, T, F>, x1: u32, x2: u32, y: u32, interleave: u32, sink: &mut S)
where
    T: Real,
    F: OrbitFormula,
    S: PixelSink + ?Sized,
{
    let mut save_color = sampler.color(x1);
    let mut save_x = x1;

    let mut x = x1 + interleave;
    while x < x2 {
        let color = sampler.color(x);
        if color != save_color {
            let z = walk_back(sampler, x - 1, x - interleave, y, save_color, sink);
            paint_run(sink, save_x, z, y, save_color);
            save_x = x;
            save_color = color;
        }
        x += interleave;
    }

    let z = walk_back(sampler, x2 - 1, save_x, y, save_color, sink);
    paint_run(sink, save_x, z, y, save_color);
}

/// Plot pixels from `from` down to (exclusive) `floor` until one matches
/// `run_color`. Returns the rightmost pixel of the `run_color` run.
fn walk_back<T, F, S>(
    sampler: &mut RowSampler<'_, T, F>,
    from: u32,
    floor: u32,
    y: u32,
    run_color: u32,
    sink: &mut S,
) -> u32
where
    T: Real,
    F: OrbitFormula,
    S: PixelSink + ?Sized,
{
    let mut z = from;
    while z > floor {
        let color = sampler.color(z);
        if color == run_color {
            break;
        }
        sink.plot(z, y, color);
        z -= 1;
    }
    z
}

#[inline]
fn paint_run<S: PixelSink + ?Sized>(sink: &mut S, from: u32, to: u32, y: u32, color: u32) {
    if from < to {
        sink.hline(from, to, y, color);
    } else {
        sink.plot(from, y, color);
    }
}
