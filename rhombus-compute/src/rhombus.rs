//! Rectangle subdivision driven by simultaneous orbit iteration.
//!
//! A rectangle's nine key orbits and four test orbits are advanced in lock
//! step for as long as quadratic interpolation across the keys still
//! predicts the test orbits. Once it stops doing so, the rectangle is
//! either split into quadrants seeded from the last good keys, or scanned
//! pixel by pixel starting from them.

use crate::cancellation::CancellationChecker;
use crate::formula::OrbitFormula;
use crate::keys::{KeyGrid, RectFrame};
use crate::oracle::{EscapeTimeOracle, BASIN_COLOR};
use crate::scan::{scan_rect, ScanContext};
use crate::sink::PixelSink;
use crate::stats::{RenderStats, RenderStatus};
use log::{trace, warn};
use rhombus_core::{Complex, PixelMapping, PixelRect, Real, SoiConfig};

/// |z|² above which a key or test orbit stops the lock-step iteration.
pub const KEY_BAILOUT_SQ: f64 = 16.0;

/// Pending slots one subdivision consumes.
const CHILDREN: usize = 4;

/// One pending rectangle: geometry, pixels and its own key orbits.
#[derive(Clone, Debug)]
pub struct Rhombus<T> {
    pub frame: RectFrame<T>,
    pub pixels: PixelRect,
    pub keys: KeyGrid<T>,
    /// Iterations already applied to every key
    pub iter: u32,
    pub depth: u32,
}

impl<T: Real> Rhombus<T> {
    /// Root rectangle with every key at its own plane coordinate.
    pub fn root(frame: RectFrame<T>, pixels: PixelRect) -> Self {
        Self {
            keys: KeyGrid::identity(&frame),
            frame,
            pixels,
            iter: 1,
            depth: 0,
        }
    }
}

/// What became of one rectangle.
enum Step<T> {
    Done,
    Subdivide([Rhombus<T>; 4]),
    Cancelled,
}

/// Works through the rectangles of one render.
pub(crate) struct Subdivider<'a, T, F, C: ?Sized> {
    pub formula: &'a F,
    pub oracle: &'a EscapeTimeOracle<'a, F>,
    pub mapping: &'a PixelMapping<T>,
    pub config: &'a SoiConfig,
    pub tolerance: T,
    pub cancel: &'a C,
    pub stats: RenderStats,
}

impl<T, F, C> Subdivider<'_, T, F, C>
where
    T: Real,
    F: OrbitFormula,
    C: CancellationChecker + ?Sized,
{
    /// Process `root` and everything it splits into.
    ///
    /// Pending rectangles are kept on a LIFO list with children pushed in
    /// reverse, so quadrants are visited top-left, top-right, bottom-left,
    /// bottom-right and depth first.
    pub fn run<S: PixelSink + ?Sized>(&mut self, root: Rhombus<T>, sink: &mut S) -> RenderStatus {
        let limit = self.config.max_pending_work;
        let mut pending: Vec<Rhombus<T>> = Vec::with_capacity(limit.min(64));
        if !root.pixels.is_empty() {
            pending.push(root);
        }

        while let Some(rhombus) = pending.pop() {
            let headroom = limit.saturating_sub(pending.len());
            self.stats.record_rhombus(rhombus.depth, headroom);

            match self.process(rhombus, headroom, sink) {
                Step::Done => {}
                Step::Cancelled => return RenderStatus::Cancelled,
                Step::Subdivide(children) => {
                    for child in children.into_iter().rev() {
                        if !child.pixels.is_empty() {
                            pending.push(child);
                        }
                    }
                }
            }
        }
        RenderStatus::Completed
    }

    fn process<S: PixelSink + ?Sized>(&mut self, rhombus: Rhombus<T>, headroom: usize, sink: &mut S) -> Step<T> {
        if self.cancel.is_cancelled() {
            return Step::Cancelled;
        }

        let max = self.oracle.max_iterations();
        if rhombus.iter > max {
            return self.fill_basin(rhombus.pixels, sink);
        }

        if rhombus.pixels.height <= self.config.scan_threshold {
            return self.scan(&rhombus.frame, &rhombus.keys, rhombus.pixels, rhombus.iter, sink);
        }
        if headroom < CHILDREN {
            warn!(
                "work-list headroom {} at depth {}, scanning {:?} instead of subdividing",
                headroom, rhombus.depth, rhombus.pixels
            );
            return self.scan(&rhombus.frame, &rhombus.keys, rhombus.pixels, rhombus.iter, sink);
        }

        let Rhombus {
            frame,
            pixels,
            mut keys,
            iter: before,
            depth,
        } = rhombus;

        let points = frame.key_points();
        let test_points = frame.test_points();
        let mut tests = test_points.map(|p| keys.interpolate(&frame, p));
        let mut iter = before;

        let (saved_keys, saved_tests) = loop {
            let saved = (keys, tests);

            let mut escaped = false;
            for (row, row_points) in keys.z.iter_mut().zip(&points) {
                for (z, &c) in row.iter_mut().zip(row_points) {
                    *z = self.formula.next(c, *z);
                    escaped |= key_escaped(z);
                }
            }
            for (z, &c) in tests.iter_mut().zip(&test_points) {
                *z = self.formula.next(c, *z);
                escaped |= key_escaped(z);
            }
            iter += 1;
            self.stats.lockstep_cycles += 1;

            if escaped {
                break saved;
            }
            if iter > max {
                trace!("{:?} reached the iteration limit at depth {}", pixels, depth);
                return self.fill_basin(pixels, sink);
            }
            if !self.predicts(&frame, &keys, &test_points, &tests) {
                break saved;
            }
        };
        iter -= 1;

        if iter - before < self.config.min_profitable_iterations {
            trace!(
                "{:?} gained {} iterations at depth {}, scanning from {}",
                pixels,
                iter - before,
                depth,
                iter
            );
            return self.scan(&frame, &saved_keys, pixels, iter, sink);
        }

        trace!("{:?} subdivides at depth {} after {} iterations", pixels, depth, iter);
        self.stats.subdivisions += 1;

        let child_keys = saved_keys.children(&frame, &saved_tests);
        let child_frames = frame.children();
        let child_pixels = pixels.quadrants();
        Step::Subdivide(std::array::from_fn(|i| Rhombus {
            frame: child_frames[i],
            pixels: child_pixels[i],
            keys: child_keys[i],
            iter,
            depth: depth + 1,
        }))
    }

    /// Does interpolating the keys still predict every test orbit?
    fn predicts(
        &self,
        frame: &RectFrame<T>,
        keys: &KeyGrid<T>,
        test_points: &[Complex<T>; 4],
        tests: &[Complex<T>; 4],
    ) -> bool {
        test_points.iter().zip(tests).all(|(&p, actual)| {
            let predicted = keys.interpolate(frame, p);
            within_tolerance(predicted.re, actual.re, self.tolerance)
                && within_tolerance(predicted.im, actual.im, self.tolerance)
        })
    }

    fn scan<S: PixelSink + ?Sized>(
        &mut self,
        frame: &RectFrame<T>,
        keys: &KeyGrid<T>,
        pixels: PixelRect,
        iter: u32,
        sink: &mut S,
    ) -> Step<T> {
        self.stats.scans += 1;
        let ctx = ScanContext {
            oracle: self.oracle,
            mapping: self.mapping,
            interleave: self.config.interleave,
        };
        let (status, calls) = scan_rect(&ctx, frame, keys, pixels, iter, sink, self.cancel);
        self.stats.oracle_calls += calls;
        match status {
            RenderStatus::Completed => Step::Done,
            RenderStatus::Cancelled => Step::Cancelled,
        }
    }

    fn fill_basin<S: PixelSink + ?Sized>(&mut self, pixels: PixelRect, sink: &mut S) -> Step<T> {
        self.stats.basin_fills += 1;
        sink.fill_rect(pixels, BASIN_COLOR);
        Step::Done
    }
}

#[inline]
fn key_escaped<T: Real>(z: &Complex<T>) -> bool {
    !(z.norm_sq().to_f64() <= KEY_BAILOUT_SQ)
}

/// Relative agreement of an interpolated and an iterated component.
#[inline]
fn within_tolerance<T: Real>(predicted: T, actual: T, tolerance: T) -> bool {
    let ratio = if actual == T::ZERO {
        if predicted == T::ZERO {
            T::ONE
        } else {
            T::from_f64(1000.0)
        }
    } else {
        predicted / actual
    };
    // NaN ratios fail the comparison
    (T::ONE - ratio).abs() <= tolerance
}
