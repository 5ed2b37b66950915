//! Scope 1/2 carbon accounting.

use serde::{Deserialize, Serialize};

use super::KG_PER_TON;

/// Annual emissions split by scope, with the carbon-price exposure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbonResult {
    /// Direct emissions from natural-gas combustion (t CO2).
    pub scope1_tons: f64,
    /// Indirect emissions from grid electricity (t CO2).
    pub scope2_tons: f64,
    /// `scope1_tons + scope2_tons`.
    pub total_tons: f64,
    /// `total_tons * carbon_price`.
    pub risk: f64,
}

/// Computes scope 1 and scope 2 emissions and their carbon-price exposure.
///
/// Negative inputs are not rejected here; callers validate ranges first.
///
/// # Arguments
///
/// * `electricity_kwh` - Annual grid electricity (kWh)
/// * `gas_m3` - Annual natural-gas volume (m³)
/// * `grid_kg_per_kwh` - Grid emission factor (kg CO2/kWh)
/// * `gas_kg_per_m3` - Gas emission factor (kg CO2/m³)
/// * `carbon_price_per_ton` - Price per ton of CO2
///
/// # Examples
///
/// ```
/// use biolot::engine::compute_carbon;
///
/// let c = compute_carbon(1_000.0, 500.0, 0.5, 2.0, 100.0);
/// assert_eq!(c.scope2_tons, 0.5);
/// assert_eq!(c.scope1_tons, 1.0);
/// assert_eq!(c.risk, 150.0);
/// ```
pub fn compute_carbon(
    electricity_kwh: f64,
    gas_m3: f64,
    grid_kg_per_kwh: f64,
    gas_kg_per_m3: f64,
    carbon_price_per_ton: f64,
) -> CarbonResult {
    let scope2_tons = electricity_kwh * grid_kg_per_kwh / KG_PER_TON;
    let scope1_tons = gas_m3 * gas_kg_per_m3 / KG_PER_TON;
    let total_tons = scope1_tons + scope2_tons;

    CarbonResult {
        scope1_tons,
        scope2_tons,
        total_tons,
        risk: total_tons * carbon_price_per_ton,
    }
}
