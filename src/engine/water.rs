//! Water and pump-energy savings heuristic.

use serde::{Deserialize, Serialize};

use super::KG_PER_TON;

/// Estimated water savings and the pump energy they avoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterResult {
    /// `max(0, baseline - actual)` (m³).
    pub saved_water_m3: f64,
    /// Pump energy avoided by the saved volume (kWh).
    pub saved_pump_kwh: f64,
    /// Avoided emissions (t CO2).
    pub saved_tons: f64,
    /// Avoided carbon cost.
    pub saved_cost: f64,
    /// `max(0, actual - baseline)` (m³). Non-zero when consumption went up.
    pub increase_m3: f64,
}

impl WaterResult {
    /// Returns `true` when actual consumption exceeded the baseline.
    ///
    /// Savings are floored at zero in that case, so this is the only place
    /// the increase shows up.
    pub fn is_regression(&self) -> bool {
        self.increase_m3 > 0.0
    }
}

/// Estimates saved water and the pump energy, emissions, and cost it avoids.
///
/// A consumption increase reports zero savings, never negative ones; the
/// size of the increase is kept in [`WaterResult::increase_m3`].
///
/// # Arguments
///
/// * `water_baseline_m3` - Baseline annual water volume (m³)
/// * `water_actual_m3` - Actual annual water volume (m³)
/// * `pump_kwh_per_m3` - Pump energy index (kWh/m³)
/// * `grid_kg_per_kwh` - Grid emission factor (kg CO2/kWh)
/// * `carbon_price_per_ton` - Price per ton of CO2
pub fn compute_water_savings(
    water_baseline_m3: f64,
    water_actual_m3: f64,
    pump_kwh_per_m3: f64,
    grid_kg_per_kwh: f64,
    carbon_price_per_ton: f64,
) -> WaterResult {
    let saved_water_m3 = (water_baseline_m3 - water_actual_m3).max(0.0);
    let saved_pump_kwh = saved_water_m3 * pump_kwh_per_m3;
    let saved_tons = saved_pump_kwh * grid_kg_per_kwh / KG_PER_TON;

    WaterResult {
        saved_water_m3,
        saved_pump_kwh,
        saved_tons,
        saved_cost: saved_tons * carbon_price_per_ton,
        increase_m3: (water_actual_m3 - water_baseline_m3).max(0.0),
    }
}
