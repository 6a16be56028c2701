use crate::cancellation::CancellationChecker;
use crate::formula::OrbitFormula;
use crate::keys::RectFrame;
use crate::oracle::EscapeTimeOracle;
use crate::renderer_trait::Renderer;
use crate::rhombus::{Rhombus, Subdivider};
use crate::sink::PixelSink;
use crate::stats::{RenderOutcome, RenderStats};
use log::{debug, info};
use rhombus_core::{CoreError, PixelRect, PlaneBounds, Real, SoiConfig, Viewport};
use std::marker::PhantomData;

/// Renders escape-time images by simultaneous orbit iteration.
///
/// `T` is the float type the orbits are iterated in; plane bounds are
/// always supplied as `f64` and converted once per render.
#[derive(Clone, Debug)]
pub struct SoiRenderer<F, T = f64> {
    formula: F,
    max_iterations: u32,
    config: SoiConfig,
    _scalar: PhantomData<T>,
}

impl<F: OrbitFormula, T: Real> SoiRenderer<F, T> {
    pub fn new(formula: F, max_iterations: u32, config: SoiConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            formula,
            max_iterations,
            config,
            _scalar: PhantomData,
        })
    }

    pub fn formula(&self) -> &F {
        &self.formula
    }

    pub fn config(&self) -> &SoiConfig {
        &self.config
    }

    /// Render `bounds` onto a `canvas` of (width, height) pixels.
    ///
    /// Pixel row 0 is the top of the plane (`im_max`). Cancellation is not
    /// an error: the outcome reports it and already painted rows stay.
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

        let plane: PlaneBounds<T> = bounds.cast();
        let mapping = plane.pixel_mapping(width, height);
        let tolerance = self.config.tolerance_per_pixel(width);
        let stats = RenderStats {
            min_headroom: self.config.max_pending_work,
            tolerance_per_pixel: tolerance,
            min_step: mapping.min_step().to_f64(),
            ..Default::default()
        };

        debug!(
            "SOI render {}x{} over re [{}, {}] im [{}, {}], max_iterations={}, tolerance/px={:e}, min_step={:e}",
            width,
            height,
            bounds.re_min,
            bounds.re_max,
            bounds.im_min,
            bounds.im_max,
            self.max_iterations,
            tolerance,
            stats.min_step
        );

        let oracle = EscapeTimeOracle::new(&self.formula, self.max_iterations);
        let mut subdivider = Subdivider {
            formula: &self.formula,
            oracle: &oracle,
            mapping: &mapping,
            config: &self.config,
            tolerance: T::from_f64(tolerance),
            cancel,
            stats,
        };

        let frame = RectFrame::new(plane.re_min, plane.re_max, plane.im_max, plane.im_min);
        let root = Rhombus::root(frame, PixelRect::full_canvas(width, height));
        let status = subdivider.run(root, sink);

        info!("SOI render {:?}: {}", status, subdivider.stats);
        Ok(RenderOutcome {
            status,
            stats: subdivider.stats,
        })
    }

    /// Render a viewport, resolving its corners at the viewport's precision.
    pub fn render_viewport<S, C>(
        &self,
        viewport: &Viewport,
        canvas: (u32, u32),
        sink: &mut S,
        cancel: &C,
    ) -> Result<RenderOutcome, CoreError>
    where
        S: PixelSink + ?Sized,
        C: CancellationChecker + ?Sized,
    {
        self.render(&viewport.bounds(), canvas, sink, cancel)
    }
}

impl<F: OrbitFormula, T: Real> Renderer for SoiRenderer<F, T> {
    fn id(&self) -> &'static str {
        "soi"
    }

    fn render(
        &self,
        bounds: &PlaneBounds<f64>,
        canvas: (u32, u32),
        sink: &mut dyn PixelSink,
        cancel: &dyn CancellationChecker,
    ) -> Result<RenderOutcome, CoreError> {
        SoiRenderer::render(self, bounds, canvas, sink, cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancellation::NeverCancel;
    use crate::formula::Mandelbrot;
    use crate::sink::ColorBuffer;
    use crate::stats::RenderStatus;

    fn renderer(config: SoiConfig) -> SoiRenderer<Mandelbrot> {
        SoiRenderer::new(Mandelbrot::default(), 64, config).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SoiConfig {
            scan_threshold: 0,
            ..Default::default()
        };
        let result: Result<SoiRenderer<Mandelbrot>, _> = SoiRenderer::new(Mandelbrot::default(), 64, config);
        assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_empty_canvas() {
        let mut buf = ColorBuffer::new(1, 1);
        let bounds = PlaneBounds::new(-2.0, 1.0, -1.5, 1.5);
        let err = renderer(SoiConfig::default())
            .render(&bounds, (0, 10), &mut buf, &NeverCancel)
            .unwrap_err();
        assert_eq!(err, CoreError::EmptyCanvas { width: 0, height: 10 });
    }

    #[test]
    fn rejects_degenerate_bounds() {
        let mut buf = ColorBuffer::new(8, 8);
        let bounds = PlaneBounds::new(1.0, 1.0, -1.5, 1.5);
        let err = renderer(SoiConfig::default())
            .render(&bounds, (8, 8), &mut buf, &NeverCancel)
            .unwrap_err();
        assert!(matches!(err, CoreError::DegenerateBounds(_)));
    }

    #[test]
    fn records_geometry_in_stats() {
        let mut buf = ColorBuffer::new(101, 50);
        let bounds = PlaneBounds::new(-2.0, 1.0, -1.5, 1.5);
        let outcome = renderer(SoiConfig::default())
            .render(&bounds, (101, 50), &mut buf, &NeverCancel)
            .unwrap();

        assert_eq!(outcome.status, RenderStatus::Completed);
        assert!((outcome.stats.tolerance_per_pixel - 0.001).abs() < 1e-15);
        // Horizontal pitch 3/101 is finer than vertical 3/50
        assert!((outcome.stats.min_step - 3.0 / 101.0).abs() < 1e-15);
        assert_eq!(buf.unpainted_count(), 0);
    }

    #[test]
    fn single_pixel_canvas() {
        let mut buf = ColorBuffer::new(1, 1);
        let bounds = PlaneBounds::new(-0.1, 0.1, -0.1, 0.1);
        let outcome = renderer(SoiConfig::default())
            .render(&bounds, (1, 1), &mut buf, &NeverCancel)
            .unwrap();
        assert!(outcome.is_completed());
        assert_eq!(buf.get(0, 0), Some(0));
    }

    #[test]
    fn usable_as_trait_object() {
        let r: Box<dyn Renderer> = Box::new(renderer(SoiConfig::default()));
        let mut buf = ColorBuffer::new(16, 16);
        let bounds = PlaneBounds::new(-2.0, 2.0, -2.0, 2.0);
        let outcome = r.render(&bounds, (16, 16), &mut buf, &NeverCancel).unwrap();
        assert_eq!(r.id(), "soi");
        assert!(outcome.is_completed());
        assert_eq!(buf.unpainted_count(), 0);
    }
}
