//! Net and signal types
//!
//! [`NMNet`]s are the many-source nets produced by connectivity analysis.
//! [`Net`]s have a single source and are what placement and routing consume.

use crate::error::Result;
use crate::resources::{placement_of, PlacementMap};
use crate::vertex::{ChipCoord, Vertex};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of an N:M net
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetId(pub u32);

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Identity of a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SignalId(pub u32);

/// Many-source, many-sink net
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NMNet {
    /// Net identity; nets with the same id are the same net
    pub id: NetId,
    /// Source vertices in order
    pub sources: Vec<Vertex>,
    /// Sink vertices
    pub sinks: IndexSet<Vertex>,
    /// Net weight
    pub weight: f64,
}

impl NMNet {
    pub fn new(
        id: NetId,
        sources: impl IntoIterator<Item = Vertex>,
        sinks: impl IntoIterator<Item = Vertex>,
        weight: f64,
    ) -> Self {
        Self {
            id,
            sources: sources.into_iter().collect(),
            sinks: sinks.into_iter().collect(),
            weight,
        }
    }

    /// Distinct chips occupied by the sources, in first-seen order
    pub fn source_coords(&self, placements: &PlacementMap) -> Result<IndexSet<ChipCoord>> {
        self.sources
            .iter()
            .map(|v| placement_of(placements, v))
            .collect()
    }
}

/// Single-source net
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    pub source: Vertex,
    pub sinks: IndexSet<Vertex>,
    pub weight: f64,
}

impl Net {
    pub fn new(source: Vertex, sinks: IndexSet<Vertex>, weight: f64) -> Self {
        Self {
            source,
            sinks,
            weight,
        }
    }
}

/// A signal and the keyspace its packets are sent with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal<K> {
    pub id: SignalId,
    pub keyspace: K,
}

impl<K> Signal<K> {
    pub fn new(id: SignalId, keyspace: K) -> Self {
        Self { id, keyspace }
    }
}

impl<K> PartialEq for Signal<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K> Eq for Signal<K> {}

impl<K> Hash for Signal<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Signal -> the N:M net implementing it. Several signals may share a net.
pub type SignalNets<K> = IndexMap<Signal<K>, Arc<NMNet>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_coords_deduplicates() {
        let (a, b, c) = (Vertex::real(0), Vertex::real(1), Vertex::real(2));
        let mut placements = PlacementMap::new();
        placements.insert(a, ChipCoord::new(1, 1));
        placements.insert(b, ChipCoord::new(0, 0));
        placements.insert(c, ChipCoord::new(1, 1));

        let net = NMNet::new(NetId(0), [a, b, c], [Vertex::real(9)], 1.0);
        let coords = net.source_coords(&placements).unwrap();

        assert_eq!(
            coords.into_iter().collect::<Vec<_>>(),
            vec![ChipCoord::new(1, 1), ChipCoord::new(0, 0)]
        );
    }

    #[test]
    fn test_source_coords_missing_placement() {
        let net = NMNet::new(NetId(0), [Vertex::real(0)], [], 1.0);
        assert!(net.source_coords(&PlacementMap::new()).is_err());
    }

    #[test]
    fn test_signal_identity_ignores_keyspace() {
        assert_eq!(Signal::new(SignalId(1), 10u32), Signal::new(SignalId(1), 20u32));
        assert_ne!(Signal::new(SignalId(1), 10u32), Signal::new(SignalId(2), 10u32));
    }
}
