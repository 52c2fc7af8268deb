//! Keyspaces for routing nets
//!
//! Every routing net inherits the keyspace of the signal its original net
//! implements. Default-scheme keyspaces additionally get the cluster id of
//! the sources the routing net's synthetic source stands in for.

use crate::error::{NetlistError, Result};
use crate::keyspace::Keyspace;
use crate::net::{NMNet, Net, SignalNets};
use crate::resources::{placement_of, PlacementMap};
use crate::routing::DerivedNets;
use crate::vertex::{ChipCoord, ClusterId, Vertex};
use indexmap::{IndexMap, IndexSet};

/// Routing net -> keyspace, keyed by the net's synthetic source
#[derive(Debug, Clone)]
pub struct NetKeyspaces<K> {
    keyspaces: IndexMap<Vertex, K>,
}

impl<K> Default for NetKeyspaces<K> {
    fn default() -> Self {
        Self {
            keyspaces: IndexMap::new(),
        }
    }
}

impl<K> NetKeyspaces<K> {
    /// Keyspace assigned to a routing net
    pub fn get(&self, net: &Net) -> Option<&K> {
        self.keyspaces.get(&net.source)
    }

    pub fn len(&self) -> usize {
        self.keyspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyspaces.is_empty()
    }

    /// (routing net source, keyspace) pairs in resolution order
    pub fn iter(&self) -> impl Iterator<Item = (&Vertex, &K)> {
        self.keyspaces.iter()
    }
}

/// Assign a keyspace to every net derived by routing expansion
///
/// Fails if the sources merged into one synthetic source carry different
/// cluster ids; the whole resolution is abandoned in that case.
pub fn resolve_net_keyspaces<K: Keyspace>(
    placements: &PlacementMap,
    nets: &SignalNets<K>,
    derived: &DerivedNets,
) -> Result<NetKeyspaces<K>> {
    let mut resolved = NetKeyspaces::default();

    for (signal, original) in nets {
        let keyspace = &signal.keyspace;
        let Some(routing_nets) = derived.nets_for(original.id) else {
            continue;
        };

        for (&coord, net) in routing_nets {
            let net_keyspace = if keyspace.is_default_scheme() {
                let cluster = cluster_at(original, placements, coord)?;
                keyspace.with_cluster(cluster)?
            } else {
                keyspace.clone()
            };
            resolved.keyspaces.insert(net.source, net_keyspace);
        }
    }

    log::debug!("Resolved keyspaces for {} routing nets", resolved.len());
    Ok(resolved)
}

/// Single cluster id shared by the sources of `net` placed at `coord`
fn cluster_at(net: &NMNet, placements: &PlacementMap, coord: ChipCoord) -> Result<ClusterId> {
    let mut clusters = IndexSet::new();
    for source in &net.sources {
        if placement_of(placements, source)? == coord {
            // Untagged sources belong to cluster 0
            clusters.insert(source.cluster().unwrap_or(0));
        }
    }

    match clusters.len() {
        0 => Err(NetlistError::NoSourceAtChip { net: net.id, coord }),
        1 => Ok(clusters[0]),
        _ => {
            log::error!(
                "Net {} has sources from clusters {:?} on chip {}",
                net.id,
                clusters,
                coord
            );
            Err(NetlistError::InconsistentClusterIds {
                net: net.id,
                coord,
                clusters: clusters.into_iter().collect(),
            })
        }
    }
}
