//! Emission intensity metrics with guarded denominators.

use serde::{Deserialize, Serialize};

use super::carbon::CarbonResult;
use super::error::{EngineError, positive_denominator};

const KWH_PER_GWH: f64 = 1_000_000.0;
const M2_PER_KILO_M2: f64 = 1_000.0;

/// Total emissions normalised by electricity use and by floor area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionIntensity {
    /// t CO2 per GWh of grid electricity.
    pub tons_per_gwh: f64,
    /// t CO2 per 1000 m² of floor area.
    pub tons_per_1000_m2: f64,
}

/// Computes emission intensity per GWh and per 1000 m².
///
/// # Errors
///
/// Returns [`EngineError::NonPositiveDenominator`] if `electricity_kwh` or
/// `floor_area_m2` is zero, negative, or not finite.
pub fn emission_intensity(
    carbon: &CarbonResult,
    electricity_kwh: f64,
    floor_area_m2: f64,
) -> Result<EmissionIntensity, EngineError> {
    let kwh = positive_denominator("electricity_kwh", electricity_kwh)?;
    let area = positive_denominator("floor_area_m2", floor_area_m2)?;

    Ok(EmissionIntensity {
        tons_per_gwh: carbon.total_tons / (kwh / KWH_PER_GWH),
        tons_per_1000_m2: carbon.total_tons / (area / M2_PER_KILO_M2),
    })
}
