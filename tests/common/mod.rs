//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use biolot::engine::FacilityInputs;
use biolot::portfolio::{Facility, Zone};

/// Reference facility: 2.5 GWh, 180000 m³ gas, 12000 m², default factors,
/// ΔT 2.4 °C, sensitivity 0.04, β 0.5, water 12000 → 8000 m³ at 0.4 kWh/m³.
pub fn reference_inputs() -> FacilityInputs {
    FacilityInputs {
        electricity_kwh: 2_500_000.0,
        gas_m3: 180_000.0,
        floor_area_m2: 12_000.0,
        carbon_price_per_ton: 85.5,
        grid_kg_per_kwh: 0.43,
        gas_kg_per_m3: 2.0,
        delta_t_c: 2.4,
        sensitivity_per_c: 0.04,
        beta: 0.5,
        water_baseline_m3: 12_000.0,
        water_actual_m3: 8_000.0,
        pump_kwh_per_m3: 0.4,
    }
}

/// Reference facility wrapped for the portfolio runner, with one 3000 m² zone.
pub fn reference_facility(id: &str) -> Facility {
    Facility {
        id: id.to_string(),
        name: format!("Facility {id}"),
        inputs: reference_inputs(),
        zones: vec![Zone::new("Green roof", 3_000.0)],
    }
}

/// Path of a scenario file shipped with the crate.
pub fn scenario_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}
