pub mod cancellation;
pub mod formula;
pub mod keys;
pub mod one_pass;
pub mod oracle;
pub mod render_config;
pub mod renderer_factory;
pub mod renderer_trait;
pub mod rhombus;
mod scan;
pub mod sink;
pub mod soi;
pub mod stats;

pub use cancellation::{AtomicBoolChecker, CancellationChecker, NeverCancel, PollFn};
pub use formula::{Julia, Mandelbrot, OrbitFormula};
pub use keys::{KeyGrid, RectFrame};
pub use one_pass::OnePassRenderer;
pub use oracle::{EscapeTimeOracle, BASIN_COLOR};
pub use render_config::{get_calc_mode, CalcModeConfig, CALC_MODES};
pub use renderer_factory::create_renderer;
pub use renderer_trait::Renderer;
pub use rhombus::{Rhombus, KEY_BAILOUT_SQ};
pub use sink::{ColorBuffer, PixelSink};
pub use soi::SoiRenderer;
pub use stats::{RenderOutcome, RenderStats, RenderStatus, HEADROOM_DEPTHS};

// Re-export core types for convenience
pub use rhombus_core::*;
