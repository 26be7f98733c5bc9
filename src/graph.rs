//! Connected-component labelling for undirected networks.

use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;

/// Find connected components using union-find
///
/// Returns one label per node, `0..component_count`, numbered in order of
/// first appearance.
pub fn component_labels(graph: &UnGraph<(), f64>) -> Vec<usize> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }

    // Union-find data structure
    let mut parent: Vec<usize> = (0..n).collect();
    let mut rank: Vec<usize> = vec![0; n];

    fn find(parent: &mut [usize], x: usize) -> usize {
        if parent[x] != x {
            parent[x] = find(parent, parent[x]); // Path compression
        }
        parent[x]
    }

    fn union(parent: &mut [usize], rank: &mut [usize], x: usize, y: usize) {
        let root_x = find(parent, x);
        let root_y = find(parent, y);

        if root_x != root_y {
            // Union by rank
            if rank[root_x] < rank[root_y] {
                parent[root_x] = root_y;
            } else if rank[root_x] > rank[root_y] {
                parent[root_y] = root_x;
            } else {
                parent[root_y] = root_x;
                rank[root_x] += 1;
            }
        }
    }

    for edge in graph.edge_references() {
        union(
            &mut parent,
            &mut rank,
            edge.source().index(),
            edge.target().index(),
        );
    }

    let final_parents: Vec<usize> = (0..n).map(|idx| find(&mut parent, idx)).collect();

    // Relabel roots densely in order of first appearance
    let mut label_of_root: Vec<Option<usize>> = vec![None; n];
    let mut next_label = 0usize;

    final_parents
        .iter()
        .map(|&root| {
            *label_of_root[root].get_or_insert_with(|| {
                let label = next_label;
                next_label += 1;
                label
            })
        })
        .collect()
}

/// Check if graph is connected
pub fn is_connected(graph: &UnGraph<(), f64>) -> bool {
    let labels = component_labels(graph);
    match labels.first() {
        Some(&first) => labels.iter().all(|&c| c == first),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::{NodeIndex, UnGraph};

    fn graph_from(n: usize, edges: &[(usize, usize)]) -> UnGraph<(), f64> {
        let mut graph = UnGraph::with_capacity(n, edges.len());
        for _ in 0..n {
            graph.add_node(());
        }
        for &(a, b) in edges {
            graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), 1.0);
        }
        graph
    }

    #[test]
    fn single_component() {
        let graph = graph_from(4, &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(component_labels(&graph), vec![0, 0, 0, 0]);
        assert!(is_connected(&graph));
    }

    #[test]
    fn two_components_and_an_isolated_node() {
        let graph = graph_from(5, &[(0, 1), (2, 3)]);
        assert_eq!(component_labels(&graph), vec![0, 0, 1, 1, 2]);
        assert!(!is_connected(&graph));
    }

    #[test]
    fn empty_graph_is_connected() {
        let graph = graph_from(0, &[]);
        assert!(component_labels(&graph).is_empty());
        assert!(is_connected(&graph));
    }
}
