use serde::Serialize;

/// A calculation mode offered to the host.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CalcModeConfig {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Whether the mode honours `SoiConfig`
    pub uses_soi_config: bool,
}

pub static CALC_MODES: &[CalcModeConfig] = &[
    CalcModeConfig {
        id: "soi",
        display_name: "Simultaneous Orbit Iteration",
        uses_soi_config: true,
    },
    CalcModeConfig {
        id: "one_pass",
        display_name: "Single Pass",
        uses_soi_config: false,
    },
];

pub fn get_calc_mode(id: &str) -> Option<&'static CalcModeConfig> {
    CALC_MODES.iter().find(|c| c.id == id)
}
