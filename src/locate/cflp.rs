//! Capacitated facility location model.
//!
//! Select exactly p sites from the candidate catalog and assign every client
//! to one open site, minimizing total assignment distance subject to
//! per-site capacities. Built row-wise for HiGHS; solving is delegated to
//! [`crate::locate::solver`].

use crate::distance::DistanceMatrix;
use crate::error::Error;
use crate::facility::FacilityCatalog;
use crate::locate::solver::{self, SolveStatus, SolverOptions};
use highs::{Col, RowProblem};
use log::debug;

/// Whether the open decisions are free or pinned by a previous solve.
#[derive(Debug, Clone, Copy)]
pub enum OpenDecisions<'a> {
    Free,
    /// Facility indices that stay open; every other candidate stays closed.
    Fixed(&'a [usize]),
}

/// Outcome of one location-and-assignment solve.
#[derive(Debug, Clone)]
pub struct CflpSolution {
    pub objective: f64,
    /// Solver wall-clock time in seconds.
    pub runtime: f64,
    /// Opened sites as graph node ids, in facility-index order.
    pub opened: Vec<usize>,
    /// Opened sites as facility indices into the catalog.
    pub opened_index: Vec<usize>,
}

/// Build the 0/1 program and solve it. Any non-optimal solver status maps to
/// [`Error::SolveFailed`]; no partial or default answer is ever substituted.
pub fn solve(
    catalog: &FacilityCatalog,
    distances: &DistanceMatrix,
    p: usize,
    open: OpenDecisions,
    options: &SolverOptions,
) -> Result<CflpSolution, Error> {
    let n_clients = distances.clients();
    let n_fac = catalog.len();
    debug!(
        "building model: {n_clients} clients x {n_fac} candidates, p = {p}, open {}",
        match open {
            OpenDecisions::Free => "free",
            OpenDecisions::Fixed(_) => "fixed",
        }
    );

    let mut pb = RowProblem::new();

    // y[j] = 1 if site j is opened. A fixed regime pins the bounds instead
    // of dropping the columns, so the cardinality row below stays intact.
    let open_cols: Vec<Col> = match open {
        OpenDecisions::Free => (0..n_fac)
            .map(|_| pb.add_integer_column(0.0, 0.0..=1.0))
            .collect(),
        OpenDecisions::Fixed(kept) => (0..n_fac)
            .map(|j| {
                let v = if kept.contains(&j) { 1.0 } else { 0.0 };
                pb.add_integer_column(0.0, v..=v)
            })
            .collect(),
    };

    // x[i][j] = 1 if client i is served by site j. A pair in another
    // component is pinned to zero rather than given an infinite cost.
    let mut assign_cols: Vec<Col> = Vec::with_capacity(n_clients * n_fac);
    for i in 0..n_clients {
        for j in 0..n_fac {
            let col = if distances.is_reachable(i, j) {
                pb.add_integer_column(distances.get(i, j), 0.0..=1.0)
            } else {
                pb.add_integer_column(0.0, 0.0..=0.0)
            };
            assign_cols.push(col);
        }
    }

    // Constraint 1: x[i][j] <= y[j] (only open sites can be assigned)
    for i in 0..n_clients {
        for j in 0..n_fac {
            let terms = vec![(assign_cols[i * n_fac + j], 1.0), (open_cols[j], -1.0)];
            pb.add_row(..=0.0, terms);
        }
    }

    // Constraint 2: sum_j x[i][j] = 1 (each client served exactly once)
    for i in 0..n_clients {
        let terms: Vec<(Col, f64)> = (0..n_fac)
            .map(|j| (assign_cols[i * n_fac + j], 1.0))
            .collect();
        pb.add_row(1.0..=1.0, terms);
    }

    // Constraint 3: sum_i x[i][j] <= capacity[j]
    for j in 0..n_fac {
        let terms: Vec<(Col, f64)> = (0..n_clients)
            .map(|i| (assign_cols[i * n_fac + j], 1.0))
            .collect();
        pb.add_row(..=f64::from(catalog.capacity(j)), terms);
    }

    // Constraint 4: sum_j y[j] = p (exact amount of facilities to place)
    let terms: Vec<(Col, f64)> = open_cols.iter().map(|&c| (c, 1.0)).collect();
    pb.add_row(p as f64..=p as f64, terms);

    let outcome = solver::minimise(pb, &open_cols, options);
    if outcome.status != SolveStatus::Optimal {
        return Err(Error::SolveFailed {
            status: outcome.status,
        });
    }

    let opened_index: Vec<usize> = outcome
        .values
        .iter()
        .enumerate()
        .filter(|(_, &v)| v > 0.5)
        .map(|(j, _)| j)
        .collect();
    let opened = opened_index.iter().map(|&j| catalog.site(j)).collect();

    Ok(CflpSolution {
        objective: outcome.objective,
        runtime: outcome.runtime,
        opened,
        opened_index,
    })
}
