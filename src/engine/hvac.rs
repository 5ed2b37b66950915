//! Microclimate-driven HVAC savings heuristic.

use serde::{Deserialize, Serialize};

use super::KG_PER_TON;

/// Policy ceiling on the fractional HVAC energy reduction.
///
/// This is the largest microclimate-driven reduction the heuristic will ever
/// report, however large the cooling effect.
pub const HVAC_REDUCTION_CAP: f64 = 0.30;

/// Estimated HVAC savings for one facility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HvacResult {
    /// Fractional reduction in electricity use, in `[0, HVAC_REDUCTION_CAP]`.
    pub reduction_ratio: f64,
    /// Avoided electricity (kWh).
    pub saved_kwh: f64,
    /// Avoided emissions (t CO2).
    pub saved_tons: f64,
    /// Avoided carbon cost.
    pub saved_cost: f64,
}

/// Reduction ratio from the cooling effect, before it is applied to consumption.
///
/// Each factor is floored at zero on its own before multiplying, so a
/// negative beta or delta-T can never flip the sign of the effect.
pub fn reduction_ratio(delta_t_c: f64, sensitivity_per_c: f64, beta: f64) -> f64 {
    let raw_effect = delta_t_c.max(0.0) * sensitivity_per_c.max(0.0);
    let ratio = raw_effect * beta.max(0.0);
    if ratio.is_nan() {
        // inf * 0
        return 0.0;
    }
    ratio.clamp(0.0, HVAC_REDUCTION_CAP)
}

/// Estimates avoided electricity, emissions, and cost from a cooling effect.
///
/// # Arguments
///
/// * `electricity_kwh` - Annual grid electricity (kWh)
/// * `delta_t_c` - Cooling delta-T (°C)
/// * `sensitivity_per_c` - Fractional energy sensitivity per degree
/// * `beta` - Building elasticity coefficient
/// * `grid_kg_per_kwh` - Grid emission factor (kg CO2/kWh)
/// * `carbon_price_per_ton` - Price per ton of CO2
pub fn compute_hvac_savings(
    electricity_kwh: f64,
    delta_t_c: f64,
    sensitivity_per_c: f64,
    beta: f64,
    grid_kg_per_kwh: f64,
    carbon_price_per_ton: f64,
) -> HvacResult {
    let reduction_ratio = reduction_ratio(delta_t_c, sensitivity_per_c, beta);
    let saved_kwh = electricity_kwh * reduction_ratio;
    let saved_tons = saved_kwh * grid_kg_per_kwh / KG_PER_TON;

    HvacResult {
        reduction_ratio,
        saved_kwh,
        saved_tons,
        saved_cost: saved_tons * carbon_price_per_ton,
    }
}
