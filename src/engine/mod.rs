//! Deterministic sustainability calculations.
//!
//! Every function here is pure: a result is built fresh from its arguments,
//! nothing is cached, and nothing is logged or written. Callers validate
//! inputs (see [`FacilityInputs::validate`]) before calling.

mod aggregate;
/// Scope 1/2 carbon accounting.
pub mod carbon;
/// Denominator guards shared by intensity and zone allocation.
pub mod error;
/// HVAC microclimate savings heuristic.
pub mod hvac;
/// Flat per-facility input record and its range checks.
pub mod inputs;
/// Emission intensity per GWh and per floor area.
pub mod intensity;
/// Zone KPIs and sensor-reading summaries.
pub mod sensors;
/// Water and pump-energy savings heuristic.
pub mod water;
/// Area-proportional allocation to sub-zones.
pub mod zone;

pub use aggregate::{FacilityResult, OperationalGainResult, run_facility};
pub use carbon::{CarbonResult, compute_carbon};
pub use error::{EngineError, positive_denominator};
pub use hvac::{HVAC_REDUCTION_CAP, HvacResult, compute_hvac_savings};
pub use inputs::{FacilityInputs, InputError};
pub use intensity::{EmissionIntensity, emission_intensity};
pub use sensors::{SensorReading, SensorSummary, ZoneKpis, zone_sensor_summary};
pub use water::{WaterResult, compute_water_savings};
pub use zone::{ZoneResult, allocate_to_zone, zone_share};

/// Version tag stamped on every result and audit record.
pub const ENGINE_VERSION: &str = concat!("biolot-engine/", env!("CARGO_PKG_VERSION"));

pub(crate) const KG_PER_TON: f64 = 1_000.0;
