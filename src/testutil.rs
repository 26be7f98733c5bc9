//! Shared fixtures for unit tests.

use crate::facility::FacilityCatalog;
use crate::network::Network;
use petgraph::graph::{NodeIndex, UnGraph};

/// Text of the 13-node grid fixture in `.ntw` format.
pub const GRID_NTW: &str = "\
99 13 15 3
0 3 6
0 1 1
1 4 2
1 2 12
2 5 13
3 6 30
3 4 7
4 7 20
4 5 3
5 8 4
6 7 11
7 8 5
9 10 30
10 11 40
0 12 0
0
10
12
";

/// A 3x3 grid (nodes 0-8) plus the chain 9-10-11 and the appendix node 12
/// hanging off node 0 at weight zero. Clients are {0, 10, 12}; client 10
/// lives in the second component.
pub fn grid_network() -> Network {
    let edges: &[(usize, usize, f64)] = &[
        (0, 3, 6.0),
        (0, 1, 1.0),
        (1, 4, 2.0),
        (1, 2, 12.0),
        (2, 5, 13.0),
        (3, 6, 30.0),
        (3, 4, 7.0),
        (4, 7, 20.0),
        (4, 5, 3.0),
        (5, 8, 4.0),
        (6, 7, 11.0),
        (7, 8, 5.0),
        (9, 10, 30.0),
        (10, 11, 40.0),
        (0, 12, 0.0),
    ];
    let mut graph = UnGraph::with_capacity(13, edges.len());
    for _ in 0..13 {
        graph.add_node(());
    }
    for &(a, b, w) in edges {
        graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), w);
    }
    Network {
        id: "99".to_string(),
        graph,
        sources: vec![0, 10, 12],
    }
}

/// The fixture's candidate sites {7, 5, 9} with the given capacities.
pub fn grid_sites(capacities: &[u32; 3]) -> FacilityCatalog {
    catalog_of(&[
        (7, capacities[0]),
        (5, capacities[1]),
        (9, capacities[2]),
    ])
}

pub fn catalog_of(pairs: &[(usize, u32)]) -> FacilityCatalog {
    FacilityCatalog::from_pairs(pairs)
}
