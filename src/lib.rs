//! Exact capacitated facility location over road networks.
//!
//! Loads a weighted graph in the `.ntw` edge-list format, computes
//! client-to-candidate shortest-path distances with optional on-disk
//! caching, checks feasibility per connected component, and solves the
//! location-and-assignment 0/1 program with HiGHS. A two-phase
//! "equalization" variant fixes the locations chosen under one capacity
//! regime and re-measures the assignment cost under another.

pub mod distance;
pub mod error;
pub mod facility;
pub mod feasibility;
pub mod graph;
pub mod locate;
pub mod network;
pub mod record;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::Error;
pub use record::SolutionRecord;

use crate::facility::FacilityCatalog;
use crate::locate::cflp::{self, OpenDecisions};
use crate::locate::equalize;
use crate::locate::solver::SolverOptions;
use crate::network::Network;
use log::info;
use std::path::{Path, PathBuf};

/// Everything one solve invocation needs, passed explicitly. No environment
/// lookups happen inside the core.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub network_file: PathBuf,
    /// Per-facility capacity of the uniform regime.
    pub facility_capacity: u32,
    /// Exact number of facilities to open.
    pub number_of_facilities: usize,
    /// Restrict candidates to the sites listed in this file.
    pub facility_file: Option<PathBuf>,
    /// Distance cache artifact to reuse or create. Identity is the caller's
    /// responsibility: the artifact is only valid for one (graph, candidate
    /// ordering) pair.
    pub distance_cache: Option<PathBuf>,
    /// Run the two-phase locate-then-reassign protocol.
    pub equalize: bool,
    pub solver: SolverOptions,
}

impl RunConfig {
    pub fn new(network_file: impl Into<PathBuf>, facility_capacity: u32, number_of_facilities: usize) -> Self {
        RunConfig {
            network_file: network_file.into(),
            facility_capacity,
            number_of_facilities,
            facility_file: None,
            distance_cache: None,
            equalize: false,
            solver: SolverOptions::default(),
        }
    }
}

/// Run one solve and fold any failure into the record's `error` field.
/// Never returns `Err` and never panics: batch sweeps keep going past
/// individual failures.
pub fn solve_to_record(config: &RunConfig) -> SolutionRecord {
    match try_solve(config) {
        Ok(record) => record,
        Err(err) => {
            let record = base_record(config, file_stem(&config.network_file));
            record.with_error(&err)
        }
    }
}

fn try_solve(config: &RunConfig) -> Result<SolutionRecord, Error> {
    let network = Network::load(&config.network_file)?;
    info!(
        "loaded network {}: {} nodes, {} edges, {} clients",
        network.id,
        network.vertex_count(),
        network.edge_count(),
        network.client_count()
    );

    let multicapacity = config.facility_file.is_some();
    let catalog = match &config.facility_file {
        Some(path) => FacilityCatalog::from_file(path, network.vertex_count())?,
        None => FacilityCatalog::uniform(network.vertex_count(), config.facility_capacity),
    };

    let p = config.number_of_facilities;
    // the uniform global check also covers phase 1 of an equalization run,
    // which opens locations under the uniform capacity
    let uniform_capacity = if multicapacity && !config.equalize {
        None
    } else {
        Some(config.facility_capacity)
    };
    feasibility::check(&network, &catalog, p, uniform_capacity)?;

    let (distances, sptime) =
        distance::load_or_compute(&network, &catalog, config.distance_cache.as_deref());

    let mut record = base_record(config, network.id.clone());
    record.sptime = Some(sptime);

    if config.equalize {
        let solution = equalize::solve(
            &catalog,
            config.facility_capacity,
            &distances,
            p,
            &config.solver,
        )?;
        record.objective = Some(solution.objective);
        record.runtime = Some(solution.runtime);
        record.optloc = Some(SolutionRecord::format_optloc(&solution.opened));
        record.location_objective = Some(solution.location_objective);
        record.location_runtime = Some(solution.location_runtime);
    } else {
        let solution = cflp::solve(&catalog, &distances, p, OpenDecisions::Free, &config.solver)?;
        record.objective = Some(solution.objective);
        record.runtime = Some(solution.runtime);
        record.optloc = Some(SolutionRecord::format_optloc(&solution.opened));
    }
    Ok(record)
}

fn base_record(config: &RunConfig, id: String) -> SolutionRecord {
    SolutionRecord::new(
        id,
        config.number_of_facilities,
        config.facility_capacity,
        config.facility_file.is_some(),
    )
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
