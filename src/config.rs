//! TOML-based portfolio configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{FacilityInputs, SensorReading, ZoneKpis};
use crate::portfolio::{Facility, Zone, validate_facilities};

/// Top-level portfolio configuration parsed from TOML.
///
/// The `[factors]` table is shared by every facility. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::demo`] for the
/// built-in single-facility default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Emission factors and carbon price.
    #[serde(default)]
    pub factors: FactorsConfig,
    /// Facilities in portfolio order (`[[facility]]` in TOML).
    #[serde(default, rename = "facility")]
    pub facilities: Vec<FacilityConfig>,
}

/// Emission factors and carbon price applied to every facility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactorsConfig {
    /// Grid emission factor (kg CO2/kWh).
    pub grid_kg_per_kwh: f64,
    /// Natural-gas emission factor (kg CO2/m³).
    pub gas_kg_per_m3: f64,
    /// Carbon price per ton of CO2.
    pub carbon_price_per_ton: f64,
}

impl Default for FactorsConfig {
    fn default() -> Self {
        Self {
            grid_kg_per_kwh: 0.43,
            gas_kg_per_m3: 2.0,
            carbon_price_per_ton: 85.5,
        }
    }
}

/// One facility entry. Every consumption field is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FacilityConfig {
    /// Unique facility identifier, used in audit records and exports.
    pub id: String,
    /// Display name; defaults to `id`.
    #[serde(default)]
    pub name: Option<String>,
    /// Grid electricity (kWh/year).
    pub electricity_kwh: f64,
    /// Natural gas (m³/year).
    pub gas_m3: f64,
    /// Floor area (m²).
    pub floor_area_m2: f64,
    /// Cooling delta-T (°C).
    pub delta_t_c: f64,
    /// Energy sensitivity per degree.
    pub sensitivity_per_c: f64,
    /// Building elasticity coefficient.
    pub beta: f64,
    /// Baseline water volume (m³/year).
    pub water_baseline_m3: f64,
    /// Actual water volume (m³/year).
    pub water_actual_m3: f64,
    /// Pump energy index (kWh/m³).
    pub pump_kwh_per_m3: f64,
    /// Sub-zones (`[[facility.zone]]` in TOML).
    #[serde(default, rename = "zone")]
    pub zones: Vec<Zone>,
}

impl FacilityConfig {
    /// Merges this entry with the shared factors into engine inputs.
    pub fn inputs(&self, factors: &FactorsConfig) -> FacilityInputs {
        FacilityInputs {
            electricity_kwh: self.electricity_kwh,
            gas_m3: self.gas_m3,
            floor_area_m2: self.floor_area_m2,
            carbon_price_per_ton: factors.carbon_price_per_ton,
            grid_kg_per_kwh: factors.grid_kg_per_kwh,
            gas_kg_per_m3: factors.gas_kg_per_m3,
            delta_t_c: self.delta_t_c,
            sensitivity_per_c: self.sensitivity_per_c,
            beta: self.beta,
            water_baseline_m3: self.water_baseline_m3,
            water_actual_m3: self.water_actual_m3,
            pump_kwh_per_m3: self.pump_kwh_per_m3,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"facility[0].floor_area_m2"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ScenarioConfig {
    /// Returns the dashboard's default single-facility scenario.
    pub fn demo() -> Self {
        Self {
            factors: FactorsConfig::default(),
            facilities: vec![FacilityConfig {
                id: "demo".to_string(),
                name: Some("Demo facility".to_string()),
                electricity_kwh: 2_500_000.0,
                gas_m3: 180_000.0,
                floor_area_m2: 12_000.0,
                delta_t_c: 2.4,
                sensitivity_per_c: 0.04,
                beta: 0.5,
                water_baseline_m3: 12_000.0,
                water_actual_m3: 8_000.0,
                pump_kwh_per_m3: 0.4,
                zones: Vec::new(),
            }],
        }
    }

    /// Returns the campus preset: three facilities, zones, and one water regression.
    ///
    /// The library courtyard carries KPIs and two sensors.
    pub fn campus() -> Self {
        Self {
            factors: FactorsConfig::default(),
            facilities: vec![
                FacilityConfig {
                    id: "library".to_string(),
                    name: Some("Central library".to_string()),
                    electricity_kwh: 1_200_000.0,
                    gas_m3: 60_000.0,
                    floor_area_m2: 8_000.0,
                    delta_t_c: 1.8,
                    sensitivity_per_c: 0.05,
                    beta: 0.6,
                    water_baseline_m3: 6_000.0,
                    water_actual_m3: 5_200.0,
                    pump_kwh_per_m3: 0.35,
                    zones: vec![
                        Zone::new("Reading hall", 3_000.0),
                        courtyard(),
                    ],
                },
                FacilityConfig {
                    id: "lab".to_string(),
                    name: Some("Research laboratories".to_string()),
                    electricity_kwh: 4_800_000.0,
                    gas_m3: 320_000.0,
                    floor_area_m2: 15_000.0,
                    delta_t_c: 3.0,
                    sensitivity_per_c: 0.06,
                    beta: 0.9,
                    water_baseline_m3: 25_000.0,
                    water_actual_m3: 19_000.0,
                    pump_kwh_per_m3: 0.5,
                    zones: vec![Zone::new("Wet labs", 6_000.0)],
                },
                FacilityConfig {
                    id: "dorm".to_string(),
                    name: Some("Student housing".to_string()),
                    electricity_kwh: 900_000.0,
                    gas_m3: 140_000.0,
                    floor_area_m2: 10_000.0,
                    delta_t_c: 0.0,
                    sensitivity_per_c: 0.04,
                    beta: 0.5,
                    water_baseline_m3: 14_000.0,
                    water_actual_m3: 15_500.0,
                    pump_kwh_per_m3: 0.4,
                    zones: Vec::new(),
                },
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "campus"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "campus" => Ok(Self::campus()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, a facility is missing a
    /// required field, or an unknown field is present.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Keeps only the facility with the given id.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if no facility has that id.
    pub fn select_facility(mut self, id: &str) -> Result<Self, ConfigError> {
        let known: Vec<String> = self.facilities.iter().map(|f| f.id.clone()).collect();
        self.facilities.retain(|f| f.id == id);
        if self.facilities.is_empty() {
            return Err(ConfigError {
                field: "facility".to_string(),
                message: format!("no facility \"{id}\", available: {}", known.join(", ")),
            });
        }
        Ok(self)
    }

    /// Builds the caller-owned facility list for the portfolio runner.
    pub fn facilities(&self) -> Vec<Facility> {
        self.facilities
            .iter()
            .map(|f| Facility {
                id: f.id.clone(),
                name: f.name.clone().unwrap_or_else(|| f.id.clone()),
                inputs: f.inputs(&self.factors),
                zones: f.zones.clone(),
            })
            .collect()
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.facilities.is_empty() {
            errors.push(ConfigError {
                field: "facility".into(),
                message: "at least one facility is required".into(),
            });
        }

        // Factor errors are reported once below, not per facility.
        for e in validate_facilities(&self.facilities()) {
            if is_factor_field(&e.field) {
                continue;
            }
            errors.push(ConfigError {
                field: e.field,
                message: e.message,
            });
        }

        let fa = &self.factors;
        for (name, value) in [
            ("factors.grid_kg_per_kwh", fa.grid_kg_per_kwh),
            ("factors.gas_kg_per_m3", fa.gas_kg_per_m3),
            ("factors.carbon_price_per_ton", fa.carbon_price_per_ton),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError {
                    field: name.into(),
                    message: "must be a finite number >= 0".into(),
                });
            }
        }

        errors
    }
}

fn courtyard() -> Zone {
    Zone {
        note: Some("Planted courtyard with drip irrigation".to_string()),
        kpis: Some(ZoneKpis {
            temp_avg_c: Some(24.8),
            water_m3_day: Some(3.2),
            risk_flag: "WATCH".to_string(),
        }),
        sensors: vec![
            SensorReading {
                temp_c: Some(24.2),
                rh_pct: Some(58.0),
                soil_moist_pct: Some(31.0),
                ..SensorReading::new("courtyard-north")
            },
            SensorReading {
                temp_c: Some(25.4),
                rh_pct: Some(52.0),
                flow_lpm: Some(6.5),
                ..SensorReading::new("courtyard-drip")
            },
        ],
        ..Zone::new("Green courtyard", 1_000.0)
    }
}

fn is_factor_field(path: &str) -> bool {
    let field = path.rsplit('.').next().unwrap_or(path);
    matches!(
        field,
        "grid_kg_per_kwh" | "gas_kg_per_m3" | "carbon_price_per_ton"
    )
}
