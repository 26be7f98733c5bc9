//! Error taxonomy for the solve pipeline.
//!
//! Provable infeasibility and solver failures are reported, not fatal: the
//! entry points fold them into the `error` field of the solution record so a
//! parameter sweep can run to completion. Structural input errors abort the
//! single invocation they belong to.

use crate::locate::solver::SolveStatus;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Bad file structure: token counts, numeric fields, or node ids out of
    /// range. Fatal for the invocation that read the file.
    #[error("malformed input in {path}: {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    /// The requested open count cannot seat all clients even at full
    /// utilization (uniform-capacity mode).
    #[error(
        "not enough facilities: {facilities} x capacity {capacity} < {clients} clients"
    )]
    InsufficientCapacity {
        facilities: usize,
        capacity: u32,
        clients: usize,
    },

    /// More facilities requested than candidate sites exist.
    #[error("not enough potential facility sites: requested {requested}, available {available}")]
    InsufficientSites { requested: usize, available: usize },

    /// Some connected component holds more clients than candidate capacity.
    /// No cross-component assignment exists, so the whole problem is
    /// infeasible regardless of global totals.
    #[error(
        "component of {nodes} nodes has {clients} clients but only capacity {capacity}"
    )]
    ComponentInfeasible {
        nodes: usize,
        clients: usize,
        capacity: u64,
    },

    /// The solver finished without an optimal solution.
    #[error("solver returned non-optimal status: {status}")]
    SolveFailed { status: SolveStatus },

    /// Distance cache read or write problem. Recoverable: callers fall back
    /// to recomputation.
    #[error("distance cache {path}: {reason}")]
    Cache { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable lower-case code for the `error` field of a solution record.
    pub fn code(&self) -> &'static str {
        match self {
            Error::MalformedInput { .. } => "malformed_input",
            Error::InsufficientCapacity { .. } => "insufficient_capacity",
            Error::InsufficientSites { .. } => "insufficient_sites",
            Error::ComponentInfeasible { .. } => "component_infeasible",
            Error::SolveFailed { .. } => "solve_failed",
            Error::Cache { .. } => "cache_io",
            Error::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_deficit() {
        let err = Error::ComponentInfeasible {
            nodes: 3,
            clients: 2,
            capacity: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("3 nodes"));
        assert!(msg.contains("2 clients"));
        assert!(msg.contains("capacity 1"));
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            Error::InsufficientSites {
                requested: 5,
                available: 2
            }
            .code(),
            "insufficient_sites"
        );
        assert_eq!(
            Error::SolveFailed {
                status: SolveStatus::Infeasible
            }
            .code(),
            "solve_failed"
        );
    }
}
