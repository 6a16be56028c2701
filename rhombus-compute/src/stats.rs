use serde::Serialize;
use std::fmt;

/// Depths for which the work-list headroom is recorded.
pub const HEADROOM_DEPTHS: usize = 10;

/// Per-render counters. Diagnostic only; never influence the image.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderStats {
    /// Rectangles taken off the work-list
    pub rhombi: u64,
    pub subdivisions: u64,
    pub scans: u64,
    pub basin_fills: u64,
    /// Lock-step cycles advancing all 13 orbits
    pub lockstep_cycles: u64,
    /// Pixels colored by running the escape-time oracle
    pub oracle_calls: u64,
    pub max_depth: u32,
    /// Lowest free work-list capacity seen during the render
    pub min_headroom: usize,
    /// Free capacity the last time a rectangle at each depth was taken
    pub headroom_by_depth: [Option<usize>; HEADROOM_DEPTHS],
    pub tolerance_per_pixel: f64,
    /// Smaller of the two pixel pitches in plane units
    pub min_step: f64,
}

impl RenderStats {
    pub(crate) fn record_rhombus(&mut self, depth: u32, headroom: usize) {
        self.rhombi += 1;
        self.max_depth = self.max_depth.max(depth);
        self.min_headroom = self.min_headroom.min(headroom);
        if let Some(slot) = self.headroom_by_depth.get_mut(depth as usize) {
            *slot = Some(headroom);
        }
    }
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rhombi={} subdivisions={} scans={} basin_fills={} cycles={} oracle_calls={} max_depth={} min_headroom={}",
            self.rhombi,
            self.subdivisions,
            self.scans,
            self.basin_fills,
            self.lockstep_cycles,
            self.oracle_calls,
            self.max_depth,
            self.min_headroom
        )?;
        write!(f, " headroom=[")?;
        for (depth, headroom) in self.headroom_by_depth.iter().enumerate() {
            if depth > 0 {
                write!(f, " ")?;
            }
            match headroom {
                Some(h) => write!(f, "{h}")?,
                None => write!(f, "-")?,
            }
        }
        write!(f, "]")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RenderStatus {
    Completed,
    /// Stopped at a cancellation poll; painted rows stay painted
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderOutcome {
    pub status: RenderStatus,
    pub stats: RenderStats,
}

impl RenderOutcome {
    pub fn is_completed(&self) -> bool {
        self.status == RenderStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tracks_watermarks() {
        let mut stats = RenderStats {
            min_headroom: 100,
            ..Default::default()
        };
        stats.record_rhombus(0, 99);
        stats.record_rhombus(2, 40);
        stats.record_rhombus(1, 70);

        assert_eq!(stats.rhombi, 3);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.min_headroom, 40);
        assert_eq!(stats.headroom_by_depth[0], Some(99));
        assert_eq!(stats.headroom_by_depth[1], Some(70));
        assert_eq!(stats.headroom_by_depth[3], None);
    }

    #[test]
    fn deep_rhombi_skip_headroom_table() {
        let mut stats = RenderStats::default();
        stats.record_rhombus(12, 5);
        assert_eq!(stats.max_depth, 12);
        assert!(stats.headroom_by_depth.iter().all(Option::is_none));
    }

    #[test]
    fn display_lists_headroom_per_depth() {
        let mut stats = RenderStats::default();
        stats.record_rhombus(0, 7);
        let text = stats.to_string();
        assert!(text.contains("rhombi=1"));
        assert!(text.contains("headroom=[7 - - - - - - - - -]"));
    }

    #[test]
    fn outcome_serializes() {
        let outcome = RenderOutcome {
            status: RenderStatus::Cancelled,
            stats: RenderStats::default(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"status\":\"Cancelled\""));
        assert!(json.contains("\"headroom_by_depth\""));
        assert!(!outcome.is_completed());
    }
}
