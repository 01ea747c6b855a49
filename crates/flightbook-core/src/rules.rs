//! Thresholds for the metrics engine and the path reducer.

use serde::{Deserialize, Serialize};

/// Tunables shared by [`crate::metrics`] and [`crate::path`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingRules {
    /// A sample counts as airborne when its altitude (meters) is above this
    pub airborne_min_altitude_m: f64,
    /// 3-D segments at or below this length (meters) are treated as GPS jitter
    pub min_segment_m: f64,
    /// Keep every n-th raw line for the globe path
    pub path_stride: usize,
    /// Altitude in feet that maps to `path_max_altitude`
    pub path_ceiling_ft: f64,
    /// Rendering height above a unit sphere at `path_ceiling_ft`
    pub path_max_altitude: f64,
}

impl Default for ProcessingRules {
    fn default() -> Self {
        Self {
            airborne_min_altitude_m: 0.0,
            min_segment_m: 5.0,
            path_stride: 20,
            path_ceiling_ft: 45_000.0,
            path_max_altitude: 0.07,
        }
    }
}

impl ProcessingRules {
    pub(crate) fn is_airborne(&self, altitude_m: f64) -> bool {
        altitude_m > self.airborne_min_altitude_m
    }

    /// Stride used for sampling, never zero.
    pub(crate) fn stride(&self) -> usize {
        self.path_stride.max(1)
    }

    /// Map an altitude in feet onto the globe's rendering offset.
    pub(crate) fn normalize_altitude(&self, altitude_ft: f64) -> f64 {
        if self.path_ceiling_ft <= 0.0 {
            return 0.0;
        }
        let normalized = (altitude_ft / self.path_ceiling_ft) * self.path_max_altitude;
        // NaN fails the comparison too.
        if normalized > 0.0 {
            normalized
        } else {
            0.0
        }
    }
}
