//! Flat per-facility input record consumed by the aggregator.

use serde::{Deserialize, Serialize};

/// Annual consumption figures and factors for one facility.
///
/// Every field is required when deserializing, so a missing key is rejected
/// before any calculation runs. Range checks live in
/// [`FacilityInputs::validate`]; the engine functions themselves accept any
/// numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FacilityInputs {
    /// Grid electricity consumption (kWh/year, >= 0).
    pub electricity_kwh: f64,
    /// Natural-gas consumption (m³/year, >= 0).
    pub gas_m3: f64,
    /// Conditioned floor area (m², > 0).
    pub floor_area_m2: f64,
    /// Carbon price (currency per ton CO2, >= 0).
    pub carbon_price_per_ton: f64,
    /// Grid emission factor (kg CO2/kWh, >= 0).
    pub grid_kg_per_kwh: f64,
    /// Gas emission factor (kg CO2/m³, >= 0).
    pub gas_kg_per_m3: f64,
    /// Microclimate cooling delta-T (°C). Negative values contribute no effect.
    pub delta_t_c: f64,
    /// Fractional energy sensitivity per degree of cooling.
    pub sensitivity_per_c: f64,
    /// Building elasticity coefficient.
    pub beta: f64,
    /// Baseline water volume (m³/year, >= 0).
    pub water_baseline_m3: f64,
    /// Actual water volume (m³/year, >= 0).
    pub water_actual_m3: f64,
    /// Pump energy index (kWh/m³, >= 0).
    pub pump_kwh_per_m3: f64,
}

/// Range violation for a single input field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("input error: {field}: {message}")]
pub struct InputError {
    /// Field name as it appears in serialized inputs.
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl FacilityInputs {
    /// Checks every field and returns the list of violations.
    ///
    /// All fields must be finite. Consumption, factors, price, water volumes,
    /// and the pump index must be non-negative; floor area must be strictly
    /// positive since callers divide by it. Delta-T, sensitivity, and beta
    /// only need to be finite: the HVAC heuristic floors negatives itself.
    pub fn validate(&self) -> Vec<InputError> {
        let mut errors = Vec::new();

        let non_negative = [
            ("electricity_kwh", self.electricity_kwh),
            ("gas_m3", self.gas_m3),
            ("carbon_price_per_ton", self.carbon_price_per_ton),
            ("grid_kg_per_kwh", self.grid_kg_per_kwh),
            ("gas_kg_per_m3", self.gas_kg_per_m3),
            ("water_baseline_m3", self.water_baseline_m3),
            ("water_actual_m3", self.water_actual_m3),
            ("pump_kwh_per_m3", self.pump_kwh_per_m3),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() {
                errors.push(not_finite(field));
            } else if value < 0.0 {
                errors.push(InputError {
                    field: field.to_string(),
                    message: format!("must be >= 0, got {value}"),
                });
            }
        }

        if !self.floor_area_m2.is_finite() {
            errors.push(not_finite("floor_area_m2"));
        } else if self.floor_area_m2 <= 0.0 {
            errors.push(InputError {
                field: "floor_area_m2".to_string(),
                message: format!("must be > 0, got {}", self.floor_area_m2),
            });
        }

        for (field, value) in [
            ("delta_t_c", self.delta_t_c),
            ("sensitivity_per_c", self.sensitivity_per_c),
            ("beta", self.beta),
        ] {
            if !value.is_finite() {
                errors.push(not_finite(field));
            }
        }

        errors
    }
}

fn not_finite(field: &str) -> InputError {
    InputError {
        field: field.to_string(),
        message: "must be a finite number".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FacilityInputs {
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

    #[test]
    fn sample_inputs_are_valid() {
        let errors = sample().validate();
        assert!(errors.is_empty(), "sample should be valid: {errors:?}");
    }

    #[test]
    fn zero_floor_area_rejected() {
        let mut inputs = sample();
        inputs.floor_area_m2 = 0.0;
        let errors = inputs.validate();
        assert!(errors.iter().any(|e| e.field == "floor_area_m2"));
    }

    #[test]
    fn negative_consumption_rejected() {
        let mut inputs = sample();
        inputs.electricity_kwh = -1.0;
        inputs.water_actual_m3 = -5.0;
        let errors = inputs.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == "electricity_kwh"));
        assert!(errors.iter().any(|e| e.field == "water_actual_m3"));
    }

    #[test]
    fn negative_heuristic_parameters_allowed() {
        let mut inputs = sample();
        inputs.delta_t_c = -3.0;
        inputs.beta = -0.2;
        assert!(inputs.validate().is_empty());
    }

    #[test]
    fn nan_rejected_everywhere() {
        let mut inputs = sample();
        inputs.beta = f64::NAN;
        inputs.gas_m3 = f64::INFINITY;
        let errors = inputs.validate();
        assert!(errors.iter().any(|e| e.field == "beta"));
        assert!(errors.iter().any(|e| e.field == "gas_m3"));
    }

    #[test]
    fn missing_key_fails_deserialization() {
        let json = r#"{"electricity_kwh": 1.0, "gas_m3": 1.0}"#;
        let parsed: Result<FacilityInputs, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }

    #[test]
    fn unknown_key_fails_deserialization() {
        let mut value = serde_json::to_value(sample()).expect("inputs should serialize");
        value["bogus"] = serde_json::json!(1.0);
        let parsed: Result<FacilityInputs, _> = serde_json::from_value(value);
        assert!(parsed.is_err());
    }

    #[test]
    fn error_display_names_field() {
        let e = InputError {
            field: "gas_m3".to_string(),
            message: "must be >= 0".to_string(),
        };
        assert_eq!(e.to_string(), "input error: gas_m3: must be >= 0");
    }
}
