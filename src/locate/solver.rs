//! HiGHS MIP solver interface
//!
//! The single boundary where the crate defers to the external solver:
//! option handling, wall-clock measurement, and status mapping live here.

use highs::{Col, HighsModelStatus, RowProblem, Sense};
use log::debug;
use std::fmt;
use std::time::Instant;

/// Solver-reported outcome classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    TimeLimit,
    IterationLimit,
    Unknown,
}

impl SolveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unbounded => "unbounded",
            SolveStatus::TimeLimit => "time_limit",
            SolveStatus::IterationLimit => "iteration_limit",
            SolveStatus::Unknown => "unknown",
        }
    }

    fn from_highs(status: HighsModelStatus) -> Self {
        match status {
            HighsModelStatus::Optimal | HighsModelStatus::ModelEmpty => SolveStatus::Optimal,
            HighsModelStatus::Infeasible => SolveStatus::Infeasible,
            HighsModelStatus::Unbounded => SolveStatus::Unbounded,
            HighsModelStatus::ReachedTimeLimit => SolveStatus::TimeLimit,
            HighsModelStatus::ReachedIterationLimit => SolveStatus::IterationLimit,
            _ => SolveStatus::Unknown,
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options forwarded to HiGHS for one solve.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverOptions {
    /// Wall-clock bound in seconds; expiry returns a non-optimal status
    /// instead of hanging.
    pub time_limit: Option<f64>,
    /// Forward solver chatter to the console.
    pub log_to_console: bool,
}

/// Result of one solver invocation.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// Objective value; NaN unless the status is optimal.
    pub objective: f64,
    /// Solved values of the requested columns, in request order. Empty
    /// unless the status is optimal.
    pub values: Vec<f64>,
    /// Solver wall-clock time in seconds.
    pub runtime: f64,
}

/// Minimize a fully built row problem and read back the `columns` of
/// interest. Never panics on a bad status; the caller decides what a
/// non-optimal outcome means.
pub fn minimise(problem: RowProblem, columns: &[Col], options: &SolverOptions) -> SolveOutcome {
    let mut model = problem.optimise(Sense::Minimise);
    model.set_option("output_flag", options.log_to_console);
    if let Some(limit) = options.time_limit {
        model.set_option("time_limit", limit);
    }

    let started = Instant::now();
    let solved = model.solve();
    let runtime = started.elapsed().as_secs_f64();
    let status = SolveStatus::from_highs(solved.status());
    debug!("highs finished with status {status} in {runtime:.3}s");

    match status {
        SolveStatus::Optimal => {
            let solution = solved.get_solution();
            SolveOutcome {
                status,
                objective: solved.objective_value(),
                values: columns.iter().map(|&col| solution[col]).collect(),
                runtime,
            }
        }
        _ => SolveOutcome {
            status,
            objective: f64::NAN,
            values: Vec::new(),
            runtime,
        },
    }
}
