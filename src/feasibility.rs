//! Pre-solve infeasibility checks.
//!
//! Advisory shortcuts that detect certain infeasibility before paying for a
//! solve. Passing them does not guarantee feasibility: capacity and
//! connectivity alone ignore how the exact open count distributes across
//! components, so the solver's own infeasibility report stays authoritative.

use crate::error::Error;
use crate::facility::FacilityCatalog;
use crate::graph::component_labels;
use crate::network::Network;

/// Run the global and per-component checks for opening exactly `p`
/// facilities. `uniform_capacity` is the shared capacity in uniform mode;
/// restricted catalogs pass `None` and rely on the site-count and
/// per-component checks.
pub fn check(
    network: &Network,
    catalog: &FacilityCatalog,
    p: usize,
    uniform_capacity: Option<u32>,
) -> Result<(), Error> {
    let clients = network.client_count();

    if let Some(capacity) = uniform_capacity {
        if (p as u64) * u64::from(capacity) < clients as u64 {
            return Err(Error::InsufficientCapacity {
                facilities: p,
                capacity,
                clients,
            });
        }
    }

    if p > catalog.len() {
        return Err(Error::InsufficientSites {
            requested: p,
            available: catalog.len(),
        });
    }

    per_component(network, catalog)
}

/// Every connected component must hold at least as much candidate capacity
/// as it holds clients; an edge never crosses components, so a local deficit
/// is global infeasibility.
fn per_component(network: &Network, catalog: &FacilityCatalog) -> Result<(), Error> {
    let labels = component_labels(&network.graph);
    let components = labels.iter().max().map_or(0, |&m| m + 1);

    let mut nodes = vec![0usize; components];
    let mut capacity = vec![0u64; components];
    let mut clients = vec![0usize; components];

    for &label in &labels {
        nodes[label] += 1;
    }
    for j in 0..catalog.len() {
        capacity[labels[catalog.site(j)]] += u64::from(catalog.capacity(j));
    }
    for &source in &network.sources {
        clients[labels[source]] += 1;
    }

    for c in 0..components {
        if capacity[c] < clients[c] as u64 {
            return Err(Error::ComponentInfeasible {
                nodes: nodes[c],
                clients: clients[c],
                capacity: capacity[c],
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{grid_network, grid_sites};

    #[test]
    fn grid_with_all_components_covered_passes() {
        let network = grid_network();
        check(&network, &grid_sites(&[1, 1, 1]), 3, None).unwrap();
    }

    #[test]
    fn too_few_seats_globally() {
        let network = grid_network();
        let catalog = FacilityCatalog::uniform(network.vertex_count(), 1);
        let err = check(&network, &catalog, 2, Some(1)).unwrap_err();
        assert!(matches!(err, Error::InsufficientCapacity { .. }));
    }

    #[test]
    fn more_facilities_than_sites() {
        let network = grid_network();
        let err = check(&network, &grid_sites(&[1, 1, 1]), 4, None).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientSites {
                requested: 4,
                available: 3
            }
        ));
    }

    #[test]
    fn component_without_candidates_is_infeasible() {
        let network = grid_network();
        // no candidate in the {9, 10, 11} component, where client 10 lives
        let catalog = crate::testutil::catalog_of(&[(7, 5), (5, 5)]);
        let err = check(&network, &catalog, 2, None).unwrap_err();
        match err {
            Error::ComponentInfeasible {
                nodes,
                clients,
                capacity,
            } => {
                assert_eq!(nodes, 3);
                assert_eq!(clients, 1);
                assert_eq!(capacity, 0);
            }
            other => panic!("expected ComponentInfeasible, got {other:?}"),
        }
    }

    #[test]
    fn sufficient_global_capacity_does_not_mask_a_local_deficit() {
        let network = grid_network();
        // plenty of capacity at site 5, but component {9, 10, 11} still starves
        let catalog = crate::testutil::catalog_of(&[(5, 100)]);
        let err = check(&network, &catalog, 1, None).unwrap_err();
        assert!(matches!(err, Error::ComponentInfeasible { .. }));
    }
}
