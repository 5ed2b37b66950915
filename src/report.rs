//! Human-readable terminal report for facility and portfolio results.

use std::fmt;

use crate::portfolio::{PortfolioEntry, PortfolioResult};

impl fmt::Display for PortfolioEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;
        writeln!(f, "=== {} ({}) ===", self.name, self.id)?;
        writeln!(
            f,
            "Emissions:          {:.2} t CO2 (scope 1 {:.2} t, scope 2 {:.2} t)",
            r.carbon.total_tons, r.carbon.scope1_tons, r.carbon.scope2_tons
        )?;
        writeln!(f, "Carbon risk:        {:.2}", r.carbon.risk)?;
        if let Some(i) = &self.intensity {
            writeln!(
                f,
                "Intensity:          {:.2} t/GWh, {:.2} t/1000 m²",
                i.tons_per_gwh, i.tons_per_1000_m2
            )?;
        }
        writeln!(
            f,
            "HVAC savings:       {:.1}% -> {:.0} kWh, {:.2} t, {:.2}",
            r.hvac.reduction_ratio * 100.0,
            r.hvac.saved_kwh,
            r.hvac.saved_tons,
            r.hvac.saved_cost
        )?;
        write!(
            f,
            "Water savings:      {:.0} m³ -> {:.0} kWh, {:.2} t, {:.2}",
            r.water.saved_water_m3, r.water.saved_pump_kwh, r.water.saved_tons, r.water.saved_cost
        )?;
        if r.water.is_regression() {
            write!(f, "  [REGRESSION +{:.0} m³]", r.water.increase_m3)?;
        }
        writeln!(f)?;
        write!(
            f,
            "Operational gain:   {:.0} kWh, {:.2} t, {:.2}",
            r.total_gain.total_saved_kwh, r.total_gain.total_saved_tons, r.total_gain.total_saved_cost
        )?;
        for z in &self.zones {
            write!(
                f,
                "\n  zone {:<20} {:>5.1}%  {:.2} t  gain {:.2}",
                z.zone_name,
                z.share * 100.0,
                z.carbon.total_tons,
                z.total_gain.total_saved_cost
            )?;
            if let Some(k) = &z.kpis {
                write!(
                    f,
                    "\n    kpis: {} avg, {} m³/day, risk {}",
                    opt(k.temp_avg_c, "°C", 1),
                    opt(k.water_m3_day, "", 1),
                    k.risk_flag
                )?;
            }
            if let Some(s) = &z.sensors {
                write!(
                    f,
                    "\n    sensors: {} (temp {}, rh {}, soil {})",
                    s.sensor_count,
                    opt(s.temp_avg_c, "°C", 1),
                    opt(s.rh_avg_pct, "%", 0),
                    opt(s.soil_moist_avg_pct, "%", 0)
                )?;
            }
        }
        Ok(())
    }
}

/// Formats an optional reading, `-` when absent.
fn opt(value: Option<f64>, unit: &str, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}{unit}"))
}

impl fmt::Display for PortfolioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.entries {
            writeln!(f, "{e}\n")?;
        }
        let t = &self.totals;
        writeln!(f, "--- Portfolio Totals ---")?;
        writeln!(f, "Facilities:         {}", t.facility_count)?;
        writeln!(f, "Floor area:         {:.0} m²", t.floor_area_m2)?;
        writeln!(f, "Total emissions:    {:.2} t", t.total_tons)?;
        writeln!(f, "Carbon risk:        {:.2}", t.risk)?;
        writeln!(f, "Saved energy:       {:.2} kWh", t.total_saved_kwh)?;
        writeln!(f, "Saved emissions:    {:.3} t", t.total_saved_tons)?;
        writeln!(f, "Saved cost:         {:.2}", t.total_saved_cost)?;
        write!(f, "Water regressions:  {}", t.water_regressions)
    }
}
