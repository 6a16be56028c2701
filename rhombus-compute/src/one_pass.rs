use crate::cancellation::CancellationChecker;
use crate::formula::OrbitFormula;
use crate::oracle::EscapeTimeOracle;
use crate::renderer_trait::Renderer;
use crate::sink::PixelSink;
use crate::stats::{RenderOutcome, RenderStats, RenderStatus};
use log::{debug, info};
use rhombus_core::{CoreError, PlaneBounds, Real};
use std::marker::PhantomData;

/// Brute-force renderer: iterates every pixel from its own coordinate.
///
/// Uses the same pixel mapping and oracle as `SoiRenderer`, so its output
/// is the reference the SOI image is measured against.
#[derive(Clone, Debug)]
pub struct OnePassRenderer<F, T = f64> {
    formula: F,
    max_iterations: u32,
    _scalar: PhantomData<T>,
}

impl<F: OrbitFormula, T: Real> OnePassRenderer<F, T> {
    pub fn new(formula: F, max_iterations: u32) -> Self {
        Self {
            formula,
            max_iterations,
            _scalar: PhantomData,
        }
    }

    pub fn render<S, C>(
        &self,
        bounds: &PlaneBounds<f64>,
        canvas: (u32, u32),
        sink: &mut S,
        cancel: &C,
    ) -> Result<RenderOutcome, CoreError>
    where
        S: PixelSink + ?Sized,
        C: CancellationChecker + ?Sized,
    {
        let (width, height) = canvas;
        if width == 0 || height == 0 {
            return Err(CoreError::EmptyCanvas { width, height });
        }
        bounds.validate()?;

        let mapping = bounds.cast::<T>().pixel_mapping(width, height);
        let oracle = EscapeTimeOracle::new(&self.formula, self.max_iterations);
        let mut stats = RenderStats {
            min_step: mapping.min_step().to_f64(),
            ..Default::default()
        };
        debug!("one-pass render {}x{}, max_iterations={}", width, height, self.max_iterations);

        let mut status = RenderStatus::Completed;
        for y in 0..height {
            if cancel.is_cancelled() {
                status = RenderStatus::Cancelled;
                break;
            }
            for x in 0..width {
                let c = mapping.point(x, y);
                sink.plot(x, y, oracle.iterate(c, c, 1));
            }
            stats.oracle_calls += width as u64;
        }

        info!("one-pass render {:?}: {} pixels iterated", status, stats.oracle_calls);
        Ok(RenderOutcome { status, stats })
    }
}

impl<F: OrbitFormula, T: Real> Renderer for OnePassRenderer<F, T> {
    fn id(&self) -> &'static str {
        "one_pass"
    }

    fn render(
        &self,
        bounds: &PlaneBounds<f64>,
        canvas: (u32, u32),
        sink: &mut dyn PixelSink,
        cancel: &dyn CancellationChecker,
    ) -> Result<RenderOutcome, CoreError> {
        OnePassRenderer::render(self, bounds, canvas, sink, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::{AtomicBoolChecker, NeverCancel};
    use crate::formula::Mandelbrot;
    use crate::sink::ColorBuffer;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    #[test]
    fn paints_every_pixel() {
        let r: OnePassRenderer<Mandelbrot> = OnePassRenderer::new(Mandelbrot::default(), 32);
        let mut buf = ColorBuffer::new(20, 10);
        let bounds = PlaneBounds::new(-2.0, 1.0, -1.5, 1.5);
        let outcome = r.render(&bounds, (20, 10), &mut buf, &NeverCancel).unwrap();
        assert!(outcome.is_completed());
        assert_eq!(outcome.stats.oracle_calls, 200);
        assert_eq!(buf.unpainted_count(), 0);
    }

    #[test]
    fn top_row_is_imaginary_maximum() {
        let r: OnePassRenderer<Mandelbrot> = OnePassRenderer::new(Mandelbrot::default(), 32);
        // Row 0 samples im = 4 and escapes at once; row 1 samples im = 0
        let bounds = PlaneBounds::new(-0.1, 0.1, -4.0, 4.0);
        let mut buf = ColorBuffer::new(2, 2);
        r.render(&bounds, (2, 2), &mut buf, &NeverCancel).unwrap();
        assert_eq!(buf.get(0, 0), Some(1));
        assert_eq!(buf.get(0, 1), Some(0));
    }

    #[test]
    fn cancelled_before_first_row() {
        let r: OnePassRenderer<Mandelbrot> = OnePassRenderer::new(Mandelbrot::default(), 32);
        let mut buf = ColorBuffer::new(8, 8);
        let cancel = AtomicBoolChecker::new(Arc::new(AtomicBool::new(true)));
        let bounds = PlaneBounds::new(-2.0, 1.0, -1.5, 1.5);
        let outcome = r.render(&bounds, (8, 8), &mut buf, &cancel).unwrap();
        assert_eq!(outcome.status, RenderStatus::Cancelled);
        assert_eq!(buf.unpainted_count(), 64);
    }
}
