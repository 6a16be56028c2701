use crate::cancellation::CancellationChecker;
use crate::sink::PixelSink;
use crate::stats::RenderOutcome;
use rhombus_core::{CoreError, PlaneBounds};

/// A calculation mode that can paint a whole canvas.
pub trait Renderer {
    /// Calculation mode id from `CALC_MODES`
    fn id(&self) -> &'static str;

    /// Renders `bounds` onto a canvas of `canvas` (width, height) pixels.
    /// Row 0 is the top of the plane.
    fn render(
        &self,
        bounds: &PlaneBounds<f64>,
        canvas: (u32, u32),
        sink: &mut dyn PixelSink,
        cancel: &dyn CancellationChecker,
    ) -> Result<RenderOutcome, CoreError>;
}
