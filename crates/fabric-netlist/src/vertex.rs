//! Vertices and chip coordinates
//!
//! A [`Vertex`] is either a real endpoint supplied by the caller or a
//! synthetic source created during routing expansion. Synthetic ids come
//! from a [`SyntheticAllocator`] owned by a single expansion call.

use crate::error::{NetlistError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Cluster identifier carried by real vertices
pub type ClusterId = u32;

/// Identifier of a caller-supplied vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// Identifier of a synthetic routing source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SyntheticId(pub u32);

/// Source or sink endpoint of a net
///
/// Equality, hashing and ordering use the vertex id only. The cluster tag is
/// an attribute of a real vertex, so `Vertex::real(1)` and
/// `Vertex::clustered(1, 3)` name the same vertex and the same map key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Vertex {
    /// Vertex supplied by the caller, optionally tagged with a cluster
    Real {
        id: VertexId,
        cluster: Option<ClusterId>,
    },
    /// Placeholder source created for routing
    Synthetic(SyntheticId),
}

impl Vertex {
    /// Create a real vertex with no cluster
    pub fn real(id: u32) -> Self {
        Vertex::Real {
            id: VertexId(id),
            cluster: None,
        }
    }

    /// Create a real vertex tagged with a cluster
    pub fn clustered(id: u32, cluster: ClusterId) -> Self {
        Vertex::Real {
            id: VertexId(id),
            cluster: Some(cluster),
        }
    }

    /// Cluster tag, `None` for untagged and synthetic vertices
    pub fn cluster(&self) -> Option<ClusterId> {
        match self {
            Vertex::Real { cluster, .. } => *cluster,
            Vertex::Synthetic(_) => None,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Vertex::Synthetic(_))
    }

    fn identity(&self) -> (bool, u32) {
        match self {
            Vertex::Real { id, .. } => (false, id.0),
            Vertex::Synthetic(id) => (true, id.0),
        }
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl PartialOrd for Vertex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Vertex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertex::Real { id, cluster: None } => write!(f, "v{}", id.0),
            Vertex::Real {
                id,
                cluster: Some(c),
            } => write!(f, "v{}[cluster {}]", id.0, c),
            Vertex::Synthetic(id) => write!(f, "synthetic#{}", id.0),
        }
    }
}

/// Chip coordinate on the fabric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChipCoord {
    pub x: u32,
    pub y: u32,
}

impl ChipCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for ChipCoord {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for ChipCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Hands out synthetic vertices for one expansion
#[derive(Debug, Default)]
pub struct SyntheticAllocator {
    next: u64,
}

impl SyntheticAllocator {
    /// Create an allocator starting at id 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator whose ids are all above any synthetic vertex in `existing`
    pub fn after<'a>(existing: impl IntoIterator<Item = &'a Vertex>) -> Self {
        let next = existing
            .into_iter()
            .filter_map(|v| match v {
                Vertex::Synthetic(id) => Some(u64::from(id.0) + 1),
                Vertex::Real { .. } => None,
            })
            .max()
            .unwrap_or(0);
        Self { next }
    }

    /// Allocate a fresh synthetic vertex
    ///
    /// Fails once the 32-bit id space is used up.
    pub fn allocate(&mut self) -> Result<Vertex> {
        let id = u32::try_from(self.next).map_err(|_| NetlistError::SyntheticIdsExhausted)?;
        self.next += 1;
        Ok(Vertex::Synthetic(SyntheticId(id)))
    }
}
