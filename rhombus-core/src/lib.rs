pub mod bigfloat;
pub mod bounds;
pub mod complex;
pub mod config;
pub mod error;
pub mod newton;
pub mod pixel_rect;
pub mod real;
pub mod viewport;

pub use bigfloat::BigFloat;
pub use bounds::{PixelMapping, PlaneBounds};
pub use complex::Complex;
pub use config::{
    get_fractal_config, FractalConfig, SoiConfig, FRACTAL_CONFIGS, JULIA_CONFIG,
    MANDELBROT_CONFIG,
};
pub use error::CoreError;
pub use newton::{compute_coefficients, evaluate, interpolate, NewtonPoly};
pub use pixel_rect::PixelRect;
pub use real::Real;
pub use viewport::Viewport;
