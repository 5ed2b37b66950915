//! Zone observations: reported KPIs and the latest sensor readings.
//!
//! These are measured values attached to a zone. They are summarized as
//! they are and never scaled by the zone's area share.

use serde::{Deserialize, Serialize};

/// Risk flag used when a zone reports KPIs without one.
pub const DEFAULT_RISK_FLAG: &str = "NORMAL";

fn default_risk_flag() -> String {
    DEFAULT_RISK_FLAG.to_string()
}

/// KPIs reported for a zone by its operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneKpis {
    /// Average air temperature (°C).
    #[serde(default)]
    pub temp_avg_c: Option<f64>,
    /// Daily water use (m³/day).
    #[serde(default)]
    pub water_m3_day: Option<f64>,
    /// Free-form risk label, `"NORMAL"` when omitted.
    #[serde(default = "default_risk_flag")]
    pub risk_flag: String,
}

impl Default for ZoneKpis {
    fn default() -> Self {
        Self {
            temp_avg_c: None,
            water_m3_day: None,
            risk_flag: default_risk_flag(),
        }
    }
}

/// Latest reading of one sensor installed in a zone. Any channel may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorReading {
    /// Sensor label.
    pub name: String,
    /// Air temperature (°C).
    #[serde(default)]
    pub temp_c: Option<f64>,
    /// Relative humidity (%).
    #[serde(default)]
    pub rh_pct: Option<f64>,
    /// Soil moisture (%).
    #[serde(default)]
    pub soil_moist_pct: Option<f64>,
    /// Irrigation flow (L/min).
    #[serde(default)]
    pub flow_lpm: Option<f64>,
}

impl SensorReading {
    /// Creates a reading with no channels set.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            temp_c: None,
            rh_pct: None,
            soil_moist_pct: None,
            flow_lpm: None,
        }
    }
}

/// Per-zone summary of its sensors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSummary {
    /// Sensors attached to the zone, including ones with no readings.
    pub sensor_count: usize,
    /// Mean temperature over sensors that report one (°C).
    pub temp_avg_c: Option<f64>,
    /// Mean relative humidity over sensors that report one (%).
    pub rh_avg_pct: Option<f64>,
    /// Mean soil moisture over sensors that report one (%).
    pub soil_moist_avg_pct: Option<f64>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Summarizes a zone's sensors: how many there are and the mean of each channel.
///
/// Each mean skips sensors that do not report that channel and is `None`
/// when no sensor does. Returns `None` for a zone with no sensors.
pub fn zone_sensor_summary(sensors: &[SensorReading]) -> Option<SensorSummary> {
    if sensors.is_empty() {
        return None;
    }
    Some(SensorSummary {
        sensor_count: sensors.len(),
        temp_avg_c: mean(sensors.iter().filter_map(|s| s.temp_c)),
        rh_avg_pct: mean(sensors.iter().filter_map(|s| s.rh_pct)),
        soil_moist_avg_pct: mean(sensors.iter().filter_map(|s| s.soil_moist_pct)),
    })
}
