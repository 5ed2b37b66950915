//! Proportional allocation of facility totals to sub-zones by floor area.
//!
//! The allocation assumes uniform intensity per unit area across zones. It is
//! linear and lossy: every scalar of the facility result is multiplied by the
//! zone's area share.

use serde::{Deserialize, Serialize};

use super::aggregate::{FacilityResult, OperationalGainResult};
use super::carbon::CarbonResult;
use super::error::{EngineError, positive_denominator};
use super::hvac::HvacResult;
use super::sensors::{SensorSummary, ZoneKpis};
use super::water::WaterResult;

/// Share of a facility result attributed to one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneResult {
    /// Zone label.
    pub zone_name: String,
    /// Zone floor area (m²).
    pub zone_area_m2: f64,
    /// `clamp(zone_area / total_area, 0, 1)`.
    pub share: f64,
    /// Facility carbon result scaled by `share`.
    pub carbon: CarbonResult,
    /// Facility HVAC result scaled by `share`, reduction ratio included.
    pub hvac: HvacResult,
    /// Facility water result scaled by `share`.
    pub water: WaterResult,
    /// Facility operational gain scaled by `share`.
    pub total_gain: OperationalGainResult,
    /// Operator note for the zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Reported zone KPIs, carried through unscaled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpis: Option<ZoneKpis>,
    /// Summary of the zone's sensors; `None` when it has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensors: Option<SensorSummary>,
}

trait Scale {
    fn scaled(&self, k: f64) -> Self;
}

impl Scale for CarbonResult {
    fn scaled(&self, k: f64) -> Self {
        Self {
            scope1_tons: self.scope1_tons * k,
            scope2_tons: self.scope2_tons * k,
            total_tons: self.total_tons * k,
            risk: self.risk * k,
        }
    }
}

impl Scale for HvacResult {
    fn scaled(&self, k: f64) -> Self {
        Self {
            reduction_ratio: self.reduction_ratio * k,
            saved_kwh: self.saved_kwh * k,
            saved_tons: self.saved_tons * k,
            saved_cost: self.saved_cost * k,
        }
    }
}

impl Scale for WaterResult {
    fn scaled(&self, k: f64) -> Self {
        Self {
            saved_water_m3: self.saved_water_m3 * k,
            saved_pump_kwh: self.saved_pump_kwh * k,
            saved_tons: self.saved_tons * k,
            saved_cost: self.saved_cost * k,
            increase_m3: self.increase_m3 * k,
        }
    }
}

impl Scale for OperationalGainResult {
    fn scaled(&self, k: f64) -> Self {
        Self {
            total_saved_kwh: self.total_saved_kwh * k,
            total_saved_tons: self.total_saved_tons * k,
            total_saved_cost: self.total_saved_cost * k,
        }
    }
}

/// Validated area share of a zone, for callers that cannot guarantee a
/// positive total area.
///
/// # Errors
///
/// Returns [`EngineError::NonPositiveDenominator`] when `total_area_m2` is
/// zero, negative, or not finite.
pub fn zone_share(zone_area_m2: f64, total_area_m2: f64) -> Result<f64, EngineError> {
    let total = positive_denominator("total_area_m2", total_area_m2)?;
    Ok(clamped_share(zone_area_m2, total))
}

fn clamped_share(zone_area_m2: f64, total_area_m2: f64) -> f64 {
    let share = zone_area_m2 / total_area_m2;
    if share.is_nan() {
        return 0.0;
    }
    share.clamp(0.0, 1.0)
}

/// Allocates a share of a facility result to a zone by floor area.
///
/// `total_area_m2` must be strictly positive; use [`zone_share`] first when
/// that is not already guaranteed. Zone observations are left empty for the
/// caller to attach.
///
/// # Arguments
///
/// * `result` - Facility-level result to allocate
/// * `zone_name` - Zone label carried into the output
/// * `zone_area_m2` - Zone floor area (m²)
/// * `total_area_m2` - Facility floor area (m², > 0)
pub fn allocate_to_zone(
    result: &FacilityResult,
    zone_name: &str,
    zone_area_m2: f64,
    total_area_m2: f64,
) -> ZoneResult {
    debug_assert!(total_area_m2 > 0.0, "total_area_m2 must be > 0");
    let share = clamped_share(zone_area_m2, total_area_m2);

    ZoneResult {
        zone_name: zone_name.to_string(),
        zone_area_m2,
        share,
        carbon: result.carbon.scaled(share),
        hvac: result.hvac.scaled(share),
        water: result.water.scaled(share),
        total_gain: result.total_gain.scaled(share),
        note: None,
        kpis: None,
        sensors: None,
    }
}
