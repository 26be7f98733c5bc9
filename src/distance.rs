//! Client-to-candidate shortest-path distances.
//!
//! One single-source Dijkstra per client over the whole graph, projected
//! onto the candidate ordering. A pair in another connected component maps
//! to the [`UNREACHABLE`] sentinel; infeasibility is a modeling fact for the
//! feasibility checker, never a fault here.

use crate::error::Error;
use crate::facility::FacilityCatalog;
use crate::network::Network;
use log::{info, warn};
use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

/// Sentinel distance for (client, facility) pairs with no connecting path.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Distance rows below this element count are computed sequentially.
const PARALLEL_THRESHOLD: usize = 10_000;

/// Dense row-major matrix of client-to-candidate distances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    clients: usize,
    facilities: usize,
    #[serde(with = "sentinel")]
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute all client rows. Deterministic: a pure function of the graph
    /// weights and the candidate ordering.
    pub fn compute(network: &Network, catalog: &FacilityCatalog) -> Self {
        let clients = network.sources.len();
        let facilities = catalog.len();

        // Compute rows in parallel for large instances
        let rows: Vec<Vec<f64>> = if clients * facilities > PARALLEL_THRESHOLD {
            network
                .sources
                .par_iter()
                .map(|&source| client_row(network, catalog, source))
                .collect()
        } else {
            network
                .sources
                .iter()
                .map(|&source| client_row(network, catalog, source))
                .collect()
        };

        DistanceMatrix {
            clients,
            facilities,
            values: rows.concat(),
        }
    }

    pub fn get(&self, client: usize, facility: usize) -> f64 {
        self.values[client * self.facilities + facility]
    }

    pub fn is_reachable(&self, client: usize, facility: usize) -> bool {
        self.get(client, facility).is_finite()
    }

    pub fn clients(&self) -> usize {
        self.clients
    }

    pub fn facilities(&self) -> usize {
        self.facilities
    }
}

fn client_row(network: &Network, catalog: &FacilityCatalog, source: usize) -> Vec<f64> {
    let reached = dijkstra(&network.graph, NodeIndex::new(source), None, |e| {
        *e.weight()
    });
    catalog
        .sites()
        .iter()
        .map(|&site| {
            reached
                .get(&NodeIndex::new(site))
                .copied()
                .unwrap_or(UNREACHABLE)
        })
        .collect()
}

/// On-disk cache artifact: the matrix together with the wall-clock cost of
/// computing it, so a cache hit can still report the true computation time.
#[derive(Serialize, Deserialize)]
struct CacheArtifact {
    sptime: f64,
    matrix: DistanceMatrix,
}

/// Load the matrix from `cache` if present, otherwise compute it (and, when
/// a cache path was given, persist it). Returns the matrix and the distance
/// computation time in seconds.
///
/// Caching is an optimization, never a correctness dependency: any read or
/// write failure logs a warning and the matrix is recomputed.
pub fn load_or_compute(
    network: &Network,
    catalog: &FacilityCatalog,
    cache: Option<&Path>,
) -> (DistanceMatrix, f64) {
    if let Some(path) = cache {
        if path.exists() {
            match read_cache(path) {
                Ok(artifact)
                    if artifact.matrix.clients == network.sources.len()
                        && artifact.matrix.facilities == catalog.len() =>
                {
                    info!("distance matrix loaded from {}", path.display());
                    return (artifact.matrix, artifact.sptime);
                }
                Ok(artifact) => warn!(
                    "distance cache {} has shape {}x{}, expected {}x{}; recomputing",
                    path.display(),
                    artifact.matrix.clients,
                    artifact.matrix.facilities,
                    network.sources.len(),
                    catalog.len()
                ),
                Err(err) => warn!("{err}; recomputing"),
            }
        }
    }

    let started = Instant::now();
    let matrix = DistanceMatrix::compute(network, catalog);
    let sptime = started.elapsed().as_secs_f64();
    info!(
        "computed {}x{} distance matrix in {:.3}s",
        matrix.clients, matrix.facilities, sptime
    );

    let artifact = CacheArtifact { sptime, matrix };
    if let Some(path) = cache {
        if let Err(err) = write_cache(path, &artifact) {
            warn!("{err}; continuing without cache");
        } else {
            info!("distance matrix written to {}", path.display());
        }
    }
    (artifact.matrix, artifact.sptime)
}

fn read_cache(path: &Path) -> Result<CacheArtifact, Error> {
    let file = File::open(path).map_err(|e| cache_error(path, e.to_string()))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| cache_error(path, e.to_string()))
}

/// Write to a private temporary file in the destination directory, then
/// atomically rename into the cache slot: a concurrent reader sees the old
/// artifact or the complete new one, never a partial file.
fn write_cache(path: &Path, artifact: &CacheArtifact) -> Result<(), Error> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))
        .map_err(|e| cache_error(path, e.to_string()))?;
    let mut writer = BufWriter::new(tmp.as_file());
    serde_json::to_writer(&mut writer, artifact).map_err(|e| cache_error(path, e.to_string()))?;
    writer
        .flush()
        .map_err(|e| cache_error(path, e.to_string()))?;
    drop(writer);
    tmp.persist(path)
        .map_err(|e| cache_error(path, e.to_string()))?;
    Ok(())
}

fn cache_error(path: &Path, reason: String) -> Error {
    Error::Cache {
        path: path.to_path_buf(),
        reason,
    }
}

/// JSON cannot carry IEEE infinities; unreachable entries travel as `null`.
mod sentinel {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], ser: S) -> Result<S::Ok, S::Error> {
        let encoded: Vec<Option<f64>> = values
            .iter()
            .map(|&v| if v.is_finite() { Some(v) } else { None })
            .collect();
        encoded.serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<f64>, D::Error> {
        let encoded = Vec::<Option<f64>>::deserialize(de)?;
        Ok(encoded
            .into_iter()
            .map(|v| v.unwrap_or(super::UNREACHABLE))
            .collect())
    }
}
