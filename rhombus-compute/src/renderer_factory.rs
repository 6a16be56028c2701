use crate::formula::{Julia, Mandelbrot, OrbitFormula};
use crate::one_pass::OnePassRenderer;
use crate::render_config::get_calc_mode;
use crate::renderer_trait::Renderer;
use crate::soi::SoiRenderer;
use log::warn;
use rhombus_core::{get_fractal_config, CoreError, SoiConfig};

/// Create a renderer for a calculation mode and fractal type.
///
/// Uses the fractal's registered iteration budget. Fails for an unknown
/// mode or fractal, or when `config` does not validate.
pub fn create_renderer(
    mode_id: &str,
    fractal_id: &str,
    config: &SoiConfig,
) -> Result<Box<dyn Renderer>, CoreError> {
    let mode = get_calc_mode(mode_id).ok_or_else(|| CoreError::UnknownCalcMode(mode_id.to_string()))?;
    let fractal = get_fractal_config(fractal_id).ok_or_else(|| CoreError::UnknownFractal(fractal_id.to_string()))?;
    match fractal.id {
        "mandelbrot" => build(mode.id, Mandelbrot::from_config(fractal), fractal.max_iterations, config),
        "julia" => build(mode.id, Julia::from_config(fractal), fractal.max_iterations, config),
        other => Err(CoreError::UnknownFractal(other.to_string())),
    }
}

fn build<F: OrbitFormula + 'static>(
    mode_id: &str,
    formula: F,
    max_iterations: u32,
    config: &SoiConfig,
) -> Result<Box<dyn Renderer>, CoreError> {
    match mode_id {
        "soi" => match SoiRenderer::<F, f64>::new(formula, max_iterations, config.clone()) {
            Ok(renderer) => Ok(Box::new(renderer)),
            Err(err) => {
                warn!("cannot build SOI renderer: {err}");
                Err(err)
            }
        },
        "one_pass" => Ok(Box::new(OnePassRenderer::<F, f64>::new(formula, max_iterations))),
        other => Err(CoreError::UnknownCalcMode(other.to_string())),
    }
}
