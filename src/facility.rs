//! Candidate facility sites and their service capacities.

use crate::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Candidate sites in facility-index order, each with an integer capacity.
///
/// One structure serves both capacity regimes: [`FacilityCatalog::uniform`]
/// enumerates every graph node under a shared capacity, while
/// [`FacilityCatalog::from_file`] restricts to an explicit site list. The
/// site ordering is the facility-index ordering everywhere downstream,
/// including the distance cache identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityCatalog {
    sites: Vec<usize>,
    capacities: Vec<u32>,
}

impl FacilityCatalog {
    /// Every node of an `n`-node graph is a candidate with the same capacity.
    pub fn uniform(node_count: usize, capacity: u32) -> Self {
        FacilityCatalog {
            sites: (0..node_count).collect(),
            capacities: vec![capacity; node_count],
        }
    }

    /// The same candidate sites under one shared capacity. Phase 1 of the
    /// equalization protocol runs on this regime.
    pub fn uniform_over(&self, capacity: u32) -> Self {
        FacilityCatalog {
            sites: self.sites.clone(),
            capacities: vec![capacity; self.sites.len()],
        }
    }

    /// Build a catalog from explicit (site, capacity) pairs.
    pub fn from_pairs(pairs: &[(usize, u32)]) -> Self {
        FacilityCatalog {
            sites: pairs.iter().map(|&(site, _)| site).collect(),
            capacities: pairs.iter().map(|&(_, capacity)| capacity).collect(),
        }
    }

    /// Load a restricted catalog: one `<siteId> <capacity>` line per site.
    pub fn from_file(path: &Path, node_count: usize) -> Result<Self, Error> {
        let file = File::open(path)?;
        let mut sites = Vec::new();
        let mut capacities = Vec::new();
        for (n, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 2 {
                return Err(malformed(
                    path,
                    format!("line {}: {} fields, expected 2", n + 1, fields.len()),
                ));
            }
            let site: usize = fields[0]
                .parse()
                .map_err(|_| malformed(path, format!("line {}: bad site id '{}'", n + 1, fields[0])))?;
            if site >= node_count {
                return Err(malformed(
                    path,
                    format!(
                        "line {}: site id {site} out of range ({node_count} nodes)",
                        n + 1
                    ),
                ));
            }
            let capacity: u32 = fields[1].parse().map_err(|_| {
                malformed(path, format!("line {}: bad capacity '{}'", n + 1, fields[1]))
            })?;
            sites.push(site);
            capacities.push(capacity);
        }
        Ok(FacilityCatalog { sites, capacities })
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Graph node id of facility index `j`.
    pub fn site(&self, j: usize) -> usize {
        self.sites[j]
    }

    pub fn sites(&self) -> &[usize] {
        &self.sites
    }

    pub fn capacity(&self, j: usize) -> u32 {
        self.capacities[j]
    }
}

fn malformed(path: &Path, reason: String) -> Error {
    Error::MalformedInput {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn uniform_covers_every_node() {
        let catalog = FacilityCatalog::uniform(4, 7);
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.sites(), &[0, 1, 2, 3]);
        assert_eq!(catalog.capacity(3), 7);
    }

    #[test]
    fn uniform_over_keeps_the_site_ordering() {
        let catalog = FacilityCatalog {
            sites: vec![7, 5, 9],
            capacities: vec![1, 2, 3],
        };
        let levelled = catalog.uniform_over(4);
        assert_eq!(levelled.sites(), &[7, 5, 9]);
        assert_eq!(
            (0..3).map(|j| levelled.capacity(j)).collect::<Vec<_>>(),
            vec![4, 4, 4]
        );
    }

    #[test]
    fn from_file_preserves_line_order() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"7 1\n5 2\n9 3\n").unwrap();
        let catalog = FacilityCatalog::from_file(file.path(), 13).unwrap();
        assert_eq!(catalog.sites(), &[7, 5, 9]);
        assert_eq!(catalog.capacity(1), 2);
    }

    #[test]
    fn from_file_rejects_unknown_site() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"42 1\n").unwrap();
        let err = FacilityCatalog::from_file(file.path(), 13).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn from_file_rejects_missing_capacity() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"3\n").unwrap();
        let err = FacilityCatalog::from_file(file.path(), 13).unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }
}
