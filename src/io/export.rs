//! JSON and CSV export for portfolio results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::portfolio::PortfolioResult;

/// Column header for the CSV table export.
const HEADER: &str = "facility_id,name,floor_area_m2,scope1_tons,scope2_tons,\
                      total_tons,risk,hvac_reduction_ratio,hvac_saved_kwh,\
                      water_saved_m3,water_saved_pump_kwh,water_increase_m3,\
                      total_saved_kwh,total_saved_tons,total_saved_cost";

/// Label of the trailing totals row.
pub const TOTAL_ROW_ID: &str = "TOTAL";

/// Serializes the full result tree as pretty-printed JSON.
///
/// Keys follow struct declaration order, so identical results always
/// produce identical text.
///
/// # Errors
///
/// Returns a `serde_json::Error` if serialization fails.
pub fn to_json(result: &PortfolioResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Writes the JSON report to a file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if serialization, file creation, or writing fails.
pub fn export_json(result: &PortfolioResult, path: &Path) -> io::Result<()> {
    let json = to_json(result).map_err(io::Error::other)?;
    let mut file = io::BufWriter::new(File::create(path)?);
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()
}

/// Exports the portfolio table to a CSV file at the given path.
///
/// Writes a header row, one row per facility in portfolio order, and a
/// trailing [`TOTAL_ROW_ID`] row.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(result: &PortfolioResult, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(result, buf)
}

/// Writes the portfolio table as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(result: &PortfolioResult, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for e in &result.entries {
        let r = &e.result;
        wtr.write_record(&[
            e.id.clone(),
            e.name.clone(),
            format!("{:.2}", r.inputs.floor_area_m2),
            format!("{:.4}", r.carbon.scope1_tons),
            format!("{:.4}", r.carbon.scope2_tons),
            format!("{:.4}", r.carbon.total_tons),
            format!("{:.2}", r.carbon.risk),
            format!("{:.4}", r.hvac.reduction_ratio),
            format!("{:.2}", r.hvac.saved_kwh),
            format!("{:.2}", r.water.saved_water_m3),
            format!("{:.2}", r.water.saved_pump_kwh),
            format!("{:.2}", r.water.increase_m3),
            format!("{:.2}", r.total_gain.total_saved_kwh),
            format!("{:.4}", r.total_gain.total_saved_tons),
            format!("{:.2}", r.total_gain.total_saved_cost),
        ])?;
    }

    let t = &result.totals;
    wtr.write_record(&[
        TOTAL_ROW_ID.to_string(),
        format!("{} facilities", t.facility_count),
        format!("{:.2}", t.floor_area_m2),
        format!("{:.4}", t.scope1_tons),
        format!("{:.4}", t.scope2_tons),
        format!("{:.4}", t.total_tons),
        format!("{:.2}", t.risk),
        String::new(),
        format!("{:.2}", t.hvac_saved_kwh),
        format!("{:.2}", t.water_saved_m3),
        format!("{:.2}", t.water_saved_pump_kwh),
        format!("{:.2}", t.water_increase_m3),
        format!("{:.2}", t.total_saved_kwh),
        format!("{:.4}", t.total_saved_tons),
        format!("{:.2}", t.total_saved_cost),
    ])?;

    wtr.flush()?;
    Ok(())
}
