//! Engine behavior on reference figures and randomized inputs.

mod common;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use biolot::engine::{
    FacilityInputs, HVAC_REDUCTION_CAP, allocate_to_zone, compute_carbon, compute_hvac_savings,
    compute_water_savings, run_facility,
};

const SWEEP: usize = 500;

fn random_inputs(rng: &mut StdRng) -> FacilityInputs {
    FacilityInputs {
        electricity_kwh: rng.random_range(0.0..1.0e7),
        gas_m3: rng.random_range(0.0..1.0e6),
        floor_area_m2: rng.random_range(1.0..1.0e5),
        carbon_price_per_ton: rng.random_range(0.0..300.0),
        grid_kg_per_kwh: rng.random_range(0.0..1.2),
        gas_kg_per_m3: rng.random_range(0.0..3.0),
        delta_t_c: rng.random_range(-10.0..50.0),
        sensitivity_per_c: rng.random_range(-1.0..2.0),
        beta: rng.random_range(-1.0..2.0),
        water_baseline_m3: rng.random_range(0.0..1.0e5),
        water_actual_m3: rng.random_range(0.0..1.0e5),
        pump_kwh_per_m3: rng.random_range(0.0..2.0),
    }
}

#[test]
fn carbon_reference_figures() {
    let c = compute_carbon(2_500_000.0, 180_000.0, 0.43, 2.0, 85.5);
    assert_relative_eq!(c.scope2_tons, 1075.0, max_relative = 1e-12);
    assert_relative_eq!(c.scope1_tons, 360.0, max_relative = 1e-12);
    assert_relative_eq!(c.total_tons, 1435.0, max_relative = 1e-12);
    assert_relative_eq!(c.risk, 122_692.5, max_relative = 1e-12);
}

#[test]
fn hvac_reference_figures() {
    let h = compute_hvac_savings(2_500_000.0, 2.4, 0.04, 0.5, 0.43, 85.5);
    assert_relative_eq!(h.reduction_ratio, 0.048, max_relative = 1e-12);
    assert_relative_eq!(h.saved_kwh, 120_000.0, max_relative = 1e-12);
    assert_relative_eq!(h.saved_tons, 51.6, max_relative = 1e-12);
    assert_relative_eq!(h.saved_cost, 4_411.8, max_relative = 1e-9);
}

#[test]
fn hvac_ratio_caps_at_thirty_percent() {
    let h = compute_hvac_savings(1_000_000.0, 100.0, 1.0, 1.0, 0.43, 85.5);
    assert_eq!(h.reduction_ratio, HVAC_REDUCTION_CAP);
    assert_relative_eq!(h.saved_kwh, 300_000.0, max_relative = 1e-12);
}

#[test]
fn water_reference_figures() {
    let w = compute_water_savings(12_000.0, 8_000.0, 0.4, 0.43, 85.5);
    assert_eq!(w.saved_water_m3, 4_000.0);
    assert_relative_eq!(w.saved_pump_kwh, 1_600.0, max_relative = 1e-12);
    assert_relative_eq!(w.saved_tons, 0.688, max_relative = 1e-12);
}

#[test]
fn water_increase_saves_nothing() {
    let w = compute_water_savings(12_000.0, 15_000.0, 0.4, 0.43, 85.5);
    assert_eq!(w.saved_water_m3, 0.0);
    assert_eq!(w.saved_pump_kwh, 0.0);
    assert_eq!(w.saved_cost, 0.0);
    assert!(w.is_regression());
    assert_eq!(w.increase_m3, 3_000.0);
}

#[test]
fn facility_reference_totals() {
    let r = run_facility(&common::reference_inputs());
    assert_relative_eq!(r.total_gain.total_saved_kwh, 121_600.0, max_relative = 1e-12);
    assert_relative_eq!(r.total_gain.total_saved_tons, 52.288, max_relative = 1e-12);
    assert!(!r.engine_version.is_empty());
}

#[test]
fn ratio_stays_within_bounds_for_any_inputs() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..SWEEP {
        let i = random_inputs(&mut rng);
        let h = compute_hvac_savings(
            i.electricity_kwh,
            i.delta_t_c,
            i.sensitivity_per_c,
            i.beta,
            i.grid_kg_per_kwh,
            i.carbon_price_per_ton,
        );
        assert!(
            (0.0..=HVAC_REDUCTION_CAP).contains(&h.reduction_ratio),
            "ratio {} out of range for {i:?}",
            h.reduction_ratio
        );
        assert!(h.saved_kwh >= 0.0);
    }
}

#[test]
fn saved_water_never_negative() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..SWEEP {
        let i = random_inputs(&mut rng);
        let w = compute_water_savings(
            i.water_baseline_m3,
            i.water_actual_m3,
            i.pump_kwh_per_m3,
            i.grid_kg_per_kwh,
            i.carbon_price_per_ton,
        );
        assert!(w.saved_water_m3 >= 0.0);
        assert_eq!(
            w.saved_water_m3,
            (i.water_baseline_m3 - i.water_actual_m3).max(0.0)
        );
    }
}

#[test]
fn totals_and_gain_are_additive() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..SWEEP {
        let r = run_facility(&random_inputs(&mut rng));
        assert_relative_eq!(
            r.carbon.total_tons,
            r.carbon.scope1_tons + r.carbon.scope2_tons,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            r.total_gain.total_saved_kwh,
            r.hvac.saved_kwh + r.water.saved_pump_kwh,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            r.total_gain.total_saved_tons,
            r.hvac.saved_tons + r.water.saved_tons,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            r.total_gain.total_saved_cost,
            r.hvac.saved_cost + r.water.saved_cost,
            max_relative = 1e-12
        );
    }
}

#[test]
fn aggregator_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..50 {
        let i = random_inputs(&mut rng);
        assert_eq!(run_facility(&i), run_facility(&i));
    }
}

#[test]
fn zone_allocation_is_linear() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..SWEEP {
        let i = random_inputs(&mut rng);
        let r = run_facility(&i);
        let zone = rng.random_range(0.0..i.floor_area_m2);
        let z = allocate_to_zone(&r, "z", zone, i.floor_area_m2);
        let s = zone / i.floor_area_m2;
        assert_relative_eq!(z.share, s, max_relative = 1e-12);
        assert_relative_eq!(
            z.carbon.total_tons,
            r.carbon.total_tons * s,
            max_relative = 1e-12
        );
        assert_relative_eq!(z.hvac.saved_kwh, r.hvac.saved_kwh * s, max_relative = 1e-12);
        assert_relative_eq!(
            z.water.saved_water_m3,
            r.water.saved_water_m3 * s,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            z.total_gain.total_saved_cost,
            r.total_gain.total_saved_cost * s,
            max_relative = 1e-12
        );
    }
}

#[test]
fn inputs_are_echoed_unchanged() {
    let i = common::reference_inputs();
    assert_eq!(run_facility(&i).inputs, i);
}
