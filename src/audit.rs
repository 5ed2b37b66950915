//! Append-only newline-delimited JSON audit log of calculation runs.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{FacilityInputs, FacilityResult};

/// Errors raised while writing or reading the audit log.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The log file could not be opened, written, or read.
    #[error("audit log \"{path}\": {source}")]
    Io {
        /// Log file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A record could not be serialized.
    #[error("cannot serialize audit record: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A line of an existing log is not a valid record.
    #[error("audit log line {line}: {source}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Fixed subset of result fields kept in each audit record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Total emissions (t CO2).
    pub total_tons: f64,
    /// Carbon-price exposure.
    pub risk: f64,
    /// Operational gain: avoided energy (kWh).
    pub total_saved_kwh: f64,
    /// Operational gain: avoided emissions (t CO2).
    pub total_saved_tons: f64,
    /// Operational gain: avoided cost.
    pub total_saved_cost: f64,
}

impl From<&FacilityResult> for AuditSummary {
    fn from(r: &FacilityResult) -> Self {
        Self {
            total_tons: r.carbon.total_tons,
            risk: r.carbon.risk,
            total_saved_kwh: r.total_gain.total_saved_kwh,
            total_saved_tons: r.total_gain.total_saved_tons,
            total_saved_cost: r.total_gain.total_saved_cost,
        }
    }
}

/// One line of the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Random 64-bit hex identifier of this run.
    pub run_id: String,
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
    /// Engine version that produced the result.
    pub engine_version: String,
    /// Facility the run was for.
    pub facility_id: String,
    /// Inputs echoed from the result.
    pub inputs: FacilityInputs,
    /// Summary fields.
    pub summary: AuditSummary,
}

impl AuditRecord {
    /// Builds a record for `result`, stamped with a fresh run id and the current time.
    pub fn new(facility_id: &str, result: &FacilityResult) -> Self {
        Self {
            run_id: format!("{:016x}", rand::random::<u64>()),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            engine_version: result.engine_version.clone(),
            facility_id: facility_id.to_string(),
            inputs: result.inputs,
            summary: AuditSummary::from(result),
        }
    }
}

/// Append-only audit log file.
///
/// Each append opens the file in append mode and writes exactly one line;
/// earlier lines are never rewritten. Appends from one process are
/// serialized.
#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl AuditLog {
    /// Creates a handle for the log at `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records one facility run and returns the record written.
    ///
    /// # Errors
    ///
    /// Returns an `AuditError` if serialization or the file write fails.
    pub fn append(
        &self,
        facility_id: &str,
        result: &FacilityResult,
    ) -> Result<AuditRecord, AuditError> {
        let record = AuditRecord::new(facility_id, result);
        self.append_record(&record)?;
        Ok(record)
    }

    /// Writes an already-built record as one JSON line.
    ///
    /// # Errors
    ///
    /// Returns an `AuditError` if serialization or the file write fails.
    pub fn append_record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        file.write_all(line.as_bytes())
            .map_err(|source| self.io_error(source))?;

        debug!(run_id = %record.run_id, facility = %record.facility_id, "audit record appended");
        Ok(())
    }

    /// Reads every record in file order. A missing file reads as empty.
    ///
    /// # Errors
    ///
    /// Returns an `AuditError` if the file cannot be read or a line is not a
    /// valid record.
    pub fn read_all(&self) -> Result<Vec<AuditRecord>, AuditError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        let mut records = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| self.io_error(source))?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .map_err(|source| AuditError::Parse { line: i + 1, source })?;
            records.push(record);
        }
        Ok(records)
    }

    fn io_error(&self, source: io::Error) -> AuditError {
        AuditError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
