//! Persisted solve records.
//!
//! One flat JSON object per solve. Provable infeasibility and solver
//! failures land in the `error` field instead of aborting, so a sweep over
//! many parameter combinations runs to completion and downstream tooling can
//! tell "no solution exists" from "tool crashed".

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    /// Experiment identifier: the graph id, or the network file stem when
    /// the file never parsed.
    pub id: String,
    pub number_of_facilities: usize,
    pub facility_capacity: u32,
    /// True when capacities came from a facility file instead of the single
    /// uniform value.
    pub multicapacity: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<f64>,
    /// Solver wall-clock seconds (phase 2 in equalization mode).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<f64>,
    /// Distance computation wall-clock seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sptime: Option<f64>,
    /// Comma-delimited opened site ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optloc: Option<String>,
    /// Phase 1 objective of an equalization run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_objective: Option<f64>,
    /// Phase 1 solver wall-clock seconds of an equalization run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_runtime: Option<f64>,
    /// Present only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SolutionRecord {
    /// A record carrying only the experiment parameters, ready to receive
    /// either a solution or an error.
    pub fn new(id: String, number_of_facilities: usize, facility_capacity: u32, multicapacity: bool) -> Self {
        SolutionRecord {
            id,
            number_of_facilities,
            facility_capacity,
            multicapacity,
            objective: None,
            runtime: None,
            sptime: None,
            optloc: None,
            location_objective: None,
            location_runtime: None,
            error: None,
        }
    }

    pub fn with_error(mut self, err: &Error) -> Self {
        self.error = Some(err.to_string());
        self
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Opened site ids parsed back out of `optloc`.
    pub fn opened_sites(&self) -> Vec<usize> {
        self.optloc
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter(|token| !token.is_empty())
            .filter_map(|token| token.parse().ok())
            .collect()
    }

    pub fn format_optloc(opened: &[usize]) -> String {
        opened
            .iter()
            .map(|site| site.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn write(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self).map_err(invalid_data)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file)).map_err(invalid_data)
    }
}

fn invalid_data(err: serde_json::Error) -> Error {
    Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved_record() -> SolutionRecord {
        let mut record = SolutionRecord::new("99".to_string(), 3, 1, true);
        record.objective = Some(51.0);
        record.runtime = Some(0.25);
        record.sptime = Some(0.125);
        record.optloc = Some(SolutionRecord::format_optloc(&[7, 5, 9]));
        record
    }

    #[test]
    fn roundtrip_is_exact() {
        let record = solved_record();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        record.write(&path).unwrap();
        assert_eq!(SolutionRecord::read(&path).unwrap(), record);
    }

    #[test]
    fn opened_sites_parse_back() {
        assert_eq!(solved_record().opened_sites(), vec![7, 5, 9]);
        let empty = SolutionRecord::new("1".into(), 0, 0, false);
        assert!(empty.opened_sites().is_empty());
    }

    #[test]
    fn success_omits_the_error_field() {
        let json = serde_json::to_string(&solved_record()).unwrap();
        assert!(!json.contains("error"));
        assert!(!json.contains("location_objective"));
    }

    #[test]
    fn failure_carries_the_message() {
        let record = SolutionRecord::new("1".into(), 2, 3, false).with_error(
            &Error::InsufficientSites {
                requested: 2,
                available: 1,
            },
        );
        assert!(record.is_failure());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("not enough potential facility sites"));
        assert!(!json.contains("objective"));
    }
}
