//! Loader for the `.ntw` network format.
//!
//! Line-oriented, whitespace-separated: a header
//! `<graphId> <vertexCount> <edgeCount> <clientCount>`, then one line per
//! edge `<fromId> <toId> <weight>`, then one client node id per line.
//! Isolated nodes carry no edge lines and exist purely through
//! `vertexCount`, which keeps node ids dense.

use crate::error::Error;
use petgraph::graph::{NodeIndex, UnGraph};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// An immutable road network: the weighted graph plus the ordered client
/// list. Node ids are dense, `0..vertex_count`.
#[derive(Debug, Clone)]
pub struct Network {
    /// Graph identity from the file header; keys the distance cache.
    pub id: String,
    pub graph: UnGraph<(), f64>,
    /// Client node ids in file order. Duplicates model repeated demand.
    pub sources: Vec<usize>,
}

impl Network {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        let mut lines = BufReader::new(file).lines();

        let header = next_line(&mut lines, path, "header")?;
        let fields: Vec<&str> = header.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(malformed(
                path,
                format!("header has {} fields, expected 4", fields.len()),
            ));
        }
        let id = fields[0].to_string();
        let vertex_count = parse_count(fields[1], path, "vertex count")?;
        let edge_count = parse_count(fields[2], path, "edge count")?;
        let client_count = parse_count(fields[3], path, "client count")?;

        let mut graph = UnGraph::with_capacity(vertex_count, edge_count);
        for _ in 0..vertex_count {
            graph.add_node(());
        }

        for e in 0..edge_count {
            let line = next_line(&mut lines, path, "edge line")?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 3 {
                return Err(malformed(
                    path,
                    format!("edge {} has {} fields, expected 3", e, fields.len()),
                ));
            }
            let from = parse_node(fields[0], vertex_count, path, e)?;
            let to = parse_node(fields[1], vertex_count, path, e)?;
            let weight: u64 = fields[2]
                .parse()
                .map_err(|_| malformed(path, format!("edge {e}: bad weight '{}'", fields[2])))?;
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), weight as f64);
        }

        let mut sources = Vec::with_capacity(client_count);
        for c in 0..client_count {
            let line = next_line(&mut lines, path, "client line")?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 1 {
                return Err(malformed(
                    path,
                    format!("client {} has {} fields, expected 1", c, fields.len()),
                ));
            }
            let source: usize = fields[0]
                .parse()
                .map_err(|_| malformed(path, format!("client {c}: bad node id '{}'", fields[0])))?;
            if source >= vertex_count {
                return Err(malformed(
                    path,
                    format!("client {c}: node id {source} out of range ({vertex_count} nodes)"),
                ));
            }
            sources.push(source);
        }

        Ok(Network { id, graph, sources })
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn client_count(&self) -> usize {
        self.sources.len()
    }
}

fn next_line(
    lines: &mut Lines<BufReader<File>>,
    path: &Path,
    what: &str,
) -> Result<String, Error> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(malformed(path, format!("file truncated, missing {what}"))),
    }
}

fn parse_count(token: &str, path: &Path, what: &str) -> Result<usize, Error> {
    token
        .parse()
        .map_err(|_| malformed(path, format!("bad {what} '{token}'")))
}

fn parse_node(token: &str, vertex_count: usize, path: &Path, edge: usize) -> Result<usize, Error> {
    let id: usize = token
        .parse()
        .map_err(|_| malformed(path, format!("edge {edge}: bad node id '{token}'")))?;
    if id >= vertex_count {
        return Err(malformed(
            path,
            format!("edge {edge}: node id {id} out of range ({vertex_count} nodes)"),
        ));
    }
    Ok(id)
}

fn malformed(path: &Path, reason: String) -> Error {
    Error::MalformedInput {
        path: path.to_path_buf(),
        reason,
    }
}
