//! Sequential portfolio runner over a caller-owned list of facilities.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::{
    EmissionIntensity, FacilityInputs, FacilityResult, InputError, SensorReading, ZoneKpis,
    ZoneResult, allocate_to_zone, emission_intensity, positive_denominator, run_facility,
    zone_sensor_summary,
};

/// A named sub-area of a facility with optional observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Zone {
    /// Zone label.
    pub name: String,
    /// Zone floor area (m²).
    pub area_m2: f64,
    /// Operator note.
    #[serde(default)]
    pub note: Option<String>,
    /// Reported KPIs.
    #[serde(default)]
    pub kpis: Option<ZoneKpis>,
    /// Latest sensor readings (`[[facility.zone.sensor]]` in TOML, `sensors` in JSON).
    #[serde(default, alias = "sensor")]
    pub sensors: Vec<SensorReading>,
}

impl Zone {
    /// Creates a zone with no observations.
    pub fn new(name: &str, area_m2: f64) -> Self {
        Self {
            name: name.to_string(),
            area_m2,
            note: None,
            kpis: None,
            sensors: Vec::new(),
        }
    }

    /// Allocates `result` to this zone and attaches its observations.
    fn allocate(&self, result: &FacilityResult, total_area_m2: f64) -> ZoneResult {
        let mut z = allocate_to_zone(result, &self.name, self.area_m2, total_area_m2);
        z.note = self.note.clone();
        z.kpis = self.kpis.clone();
        z.sensors = zone_sensor_summary(&self.sensors);
        z
    }
}

/// One facility of a portfolio: identity, engine inputs, and zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Facility {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Engine inputs.
    pub inputs: FacilityInputs,
    /// Sub-zones to allocate results to.
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl Facility {
    /// Checks inputs, zones, and sensor readings; field paths start with `path`.
    ///
    /// Zone areas must be finite and non-negative and may not sum past the
    /// floor area. Sensor channels must be finite; humidity and soil
    /// moisture lie in `[0, 100]` and flow is non-negative.
    pub fn validate(&self, path: &str) -> Vec<InputError> {
        let mut errors = Vec::new();

        if self.id.trim().is_empty() {
            errors.push(input_error(format!("{path}.id"), "must not be empty".into()));
        }

        for e in self.inputs.validate() {
            errors.push(input_error(format!("{path}.{}", e.field), e.message));
        }

        let mut zone_total = 0.0;
        for (j, z) in self.zones.iter().enumerate() {
            let zpath = format!("{path}.zone[{j}]");
            if z.name.trim().is_empty() {
                errors.push(input_error(format!("{zpath}.name"), "must not be empty".into()));
            }
            if !z.area_m2.is_finite() || z.area_m2 < 0.0 {
                errors.push(input_error(
                    format!("{zpath}.area_m2"),
                    format!("must be a finite number >= 0, got {}", z.area_m2),
                ));
            } else {
                zone_total += z.area_m2;
            }
            for (k, sensor) in z.sensors.iter().enumerate() {
                validate_sensor(sensor, &format!("{zpath}.sensor[{k}]"), &mut errors);
            }
        }
        if self.inputs.floor_area_m2 > 0.0 && zone_total > self.inputs.floor_area_m2 {
            errors.push(input_error(
                format!("{path}.zone"),
                format!(
                    "zone areas sum to {zone_total} m², more than floor_area_m2 ({})",
                    self.inputs.floor_area_m2
                ),
            ));
        }

        errors
    }
}

fn validate_sensor(sensor: &SensorReading, path: &str, errors: &mut Vec<InputError>) {
    for (field, value, min, max) in [
        ("temp_c", sensor.temp_c, f64::NEG_INFINITY, f64::INFINITY),
        ("rh_pct", sensor.rh_pct, 0.0, 100.0),
        ("soil_moist_pct", sensor.soil_moist_pct, 0.0, 100.0),
        ("flow_lpm", sensor.flow_lpm, 0.0, f64::INFINITY),
    ] {
        let Some(v) = value else { continue };
        if !v.is_finite() || v < min || v > max {
            errors.push(input_error(
                format!("{path}.{field}"),
                format!("must be a finite number in [{min}, {max}], got {v}"),
            ));
        }
    }
}

fn input_error(field: String, message: String) -> InputError {
    InputError { field, message }
}

/// Validates every facility plus portfolio-wide constraints.
///
/// Facility `i` reports under `facility[i]`; ids must be unique.
pub fn validate_facilities(facilities: &[Facility]) -> Vec<InputError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for (i, f) in facilities.iter().enumerate() {
        let path = format!("facility[{i}]");
        errors.extend(f.validate(&path));
        if !f.id.trim().is_empty() && !seen.insert(f.id.as_str()) {
            errors.push(input_error(
                format!("{path}.id"),
                format!("duplicate facility id \"{}\"", f.id),
            ));
        }
    }
    errors
}

/// Result for one facility within a portfolio run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioEntry {
    /// Facility identifier.
    pub id: String,
    /// Facility display name.
    pub name: String,
    /// Aggregator output.
    pub result: FacilityResult,
    /// Emission intensity; `None` when electricity or area is not positive.
    pub intensity: Option<EmissionIntensity>,
    /// Per-zone allocations, in configured order.
    pub zones: Vec<ZoneResult>,
}

/// Summed totals across all facilities of a portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Number of facilities summed.
    pub facility_count: usize,
    /// Total floor area (m²).
    pub floor_area_m2: f64,
    /// Scope 1 emissions (t CO2).
    pub scope1_tons: f64,
    /// Scope 2 emissions (t CO2).
    pub scope2_tons: f64,
    /// Total emissions (t CO2).
    pub total_tons: f64,
    /// Carbon-price exposure.
    pub risk: f64,
    /// HVAC avoided electricity (kWh).
    pub hvac_saved_kwh: f64,
    /// HVAC avoided emissions (t CO2).
    pub hvac_saved_tons: f64,
    /// HVAC avoided cost.
    pub hvac_saved_cost: f64,
    /// Saved water (m³).
    pub water_saved_m3: f64,
    /// Pump energy avoided (kWh).
    pub water_saved_pump_kwh: f64,
    /// Water avoided emissions (t CO2).
    pub water_saved_tons: f64,
    /// Water avoided cost.
    pub water_saved_cost: f64,
    /// Summed water consumption increases (m³).
    pub water_increase_m3: f64,
    /// Operational gain: avoided energy (kWh).
    pub total_saved_kwh: f64,
    /// Operational gain: avoided emissions (t CO2).
    pub total_saved_tons: f64,
    /// Operational gain: avoided cost.
    pub total_saved_cost: f64,
    /// Facilities whose water use went up against baseline.
    pub water_regressions: usize,
}

impl PortfolioTotals {
    /// Sums every facility result field by field.
    pub fn from_entries(entries: &[PortfolioEntry]) -> Self {
        let mut t = Self::default();
        for e in entries {
            let r = &e.result;
            t.facility_count += 1;
            t.floor_area_m2 += r.inputs.floor_area_m2;

            t.scope1_tons += r.carbon.scope1_tons;
            t.scope2_tons += r.carbon.scope2_tons;
            t.total_tons += r.carbon.total_tons;
            t.risk += r.carbon.risk;

            t.hvac_saved_kwh += r.hvac.saved_kwh;
            t.hvac_saved_tons += r.hvac.saved_tons;
            t.hvac_saved_cost += r.hvac.saved_cost;

            t.water_saved_m3 += r.water.saved_water_m3;
            t.water_saved_pump_kwh += r.water.saved_pump_kwh;
            t.water_saved_tons += r.water.saved_tons;
            t.water_saved_cost += r.water.saved_cost;
            t.water_increase_m3 += r.water.increase_m3;

            t.total_saved_kwh += r.total_gain.total_saved_kwh;
            t.total_saved_tons += r.total_gain.total_saved_tons;
            t.total_saved_cost += r.total_gain.total_saved_cost;

            if r.water.is_regression() {
                t.water_regressions += 1;
            }
        }
        t
    }
}

/// Ordered per-facility results with their totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioResult {
    /// Per-facility results in input order.
    pub entries: Vec<PortfolioEntry>,
    /// Sums over `entries`.
    pub totals: PortfolioTotals,
}

/// Evaluates one facility: aggregate, intensity, and zone allocations.
///
/// Run [`validate_facilities`] first; a non-positive floor area skips the
/// zones and invalid zone areas are clamped into `[0, 1]` shares.
pub fn evaluate_facility(facility: &Facility) -> PortfolioEntry {
    let result = run_facility(&facility.inputs);

    let intensity = match emission_intensity(
        &result.carbon,
        facility.inputs.electricity_kwh,
        facility.inputs.floor_area_m2,
    ) {
        Ok(i) => Some(i),
        Err(e) => {
            warn!(facility = %facility.id, "skipping emission intensity: {e}");
            None
        }
    };

    let zones = match positive_denominator("floor_area_m2", facility.inputs.floor_area_m2) {
        Ok(total_area) => facility
            .zones
            .iter()
            .map(|z| z.allocate(&result, total_area))
            .collect(),
        Err(e) if !facility.zones.is_empty() => {
            warn!(facility = %facility.id, "skipping zone allocation: {e}");
            Vec::new()
        }
        Err(_) => Vec::new(),
    };

    debug!(
        facility = %facility.id,
        total_tons = result.carbon.total_tons,
        saved_kwh = result.total_gain.total_saved_kwh,
        "facility evaluated"
    );

    PortfolioEntry {
        id: facility.id.clone(),
        name: facility.name.clone(),
        result,
        intensity,
        zones,
    }
}

/// Runs the aggregator once per facility, in order, and sums the results.
///
/// # Arguments
///
/// * `facilities` - Caller-owned facility list; not modified
pub fn run_portfolio(facilities: &[Facility]) -> PortfolioResult {
    info!(count = facilities.len(), "running portfolio");
    let entries: Vec<PortfolioEntry> = facilities.iter().map(evaluate_facility).collect();
    let totals = PortfolioTotals::from_entries(&entries);
    info!(
        total_tons = totals.total_tons,
        total_saved_cost = totals.total_saved_cost,
        "portfolio complete"
    );
    PortfolioResult { entries, totals }
}
