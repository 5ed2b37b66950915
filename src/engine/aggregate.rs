//! Facility aggregator: composes carbon, HVAC, and water results.

use serde::{Deserialize, Serialize};

use super::ENGINE_VERSION;
use super::carbon::{CarbonResult, compute_carbon};
use super::hvac::{HvacResult, compute_hvac_savings};
use super::inputs::FacilityInputs;
use super::water::{WaterResult, compute_water_savings};

/// Combined operational gain of the HVAC and water heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationalGainResult {
    /// `hvac.saved_kwh + water.saved_pump_kwh`.
    pub total_saved_kwh: f64,
    /// `hvac.saved_tons + water.saved_tons`.
    pub total_saved_tons: f64,
    /// `hvac.saved_cost + water.saved_cost`.
    pub total_saved_cost: f64,
}

impl OperationalGainResult {
    /// Sums the HVAC and water savings dimension by dimension.
    pub fn combine(hvac: &HvacResult, water: &WaterResult) -> Self {
        Self {
            total_saved_kwh: hvac.saved_kwh + water.saved_pump_kwh,
            total_saved_tons: hvac.saved_tons + water.saved_tons,
            total_saved_cost: hvac.saved_cost + water.saved_cost,
        }
    }
}

/// Full calculation output for one facility.
///
/// Freshly built on every [`run_facility`] call. Field order is the key order
/// of the JSON export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityResult {
    /// Scope 1/2 emissions and carbon-price exposure.
    pub carbon: CarbonResult,
    /// HVAC microclimate savings.
    pub hvac: HvacResult,
    /// Water and pump-energy savings.
    pub water: WaterResult,
    /// HVAC + water savings.
    pub total_gain: OperationalGainResult,
    /// Inputs the result was computed from.
    pub inputs: FacilityInputs,
    /// Version of the calculation engine.
    pub engine_version: String,
}

/// Runs every calculation for one facility and sums the savings.
///
/// Purely compositional: no validation and no side effects. Identical inputs
/// give bit-identical results.
///
/// # Examples
///
/// ```
/// use biolot::engine::{FacilityInputs, run_facility};
///
/// let inputs = FacilityInputs {
///     electricity_kwh: 2_500_000.0,
///     gas_m3: 180_000.0,
///     floor_area_m2: 12_000.0,
///     carbon_price_per_ton: 85.5,
///     grid_kg_per_kwh: 0.43,
///     gas_kg_per_m3: 2.0,
///     delta_t_c: 2.4,
///     sensitivity_per_c: 0.04,
///     beta: 0.5,
///     water_baseline_m3: 12_000.0,
///     water_actual_m3: 8_000.0,
///     pump_kwh_per_m3: 0.4,
/// };
/// let r = run_facility(&inputs);
/// assert_eq!(
///     r.total_gain.total_saved_kwh,
///     r.hvac.saved_kwh + r.water.saved_pump_kwh
/// );
/// ```
pub fn run_facility(inputs: &FacilityInputs) -> FacilityResult {
    let carbon = compute_carbon(
        inputs.electricity_kwh,
        inputs.gas_m3,
        inputs.grid_kg_per_kwh,
        inputs.gas_kg_per_m3,
        inputs.carbon_price_per_ton,
    );
    let hvac = compute_hvac_savings(
        inputs.electricity_kwh,
        inputs.delta_t_c,
        inputs.sensitivity_per_c,
        inputs.beta,
        inputs.grid_kg_per_kwh,
        inputs.carbon_price_per_ton,
    );
    let water = compute_water_savings(
        inputs.water_baseline_m3,
        inputs.water_actual_m3,
        inputs.pump_kwh_per_m3,
        inputs.grid_kg_per_kwh,
        inputs.carbon_price_per_ton,
    );
    let total_gain = OperationalGainResult::combine(&hvac, &water);

    FacilityResult {
        carbon,
        hvac,
        water,
        total_gain,
        inputs: *inputs,
        engine_version: ENGINE_VERSION.to_string(),
    }
}
