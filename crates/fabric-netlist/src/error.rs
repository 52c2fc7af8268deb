//! Error types for net expansion and keyspace resolution

use crate::net::NetId;
use crate::vertex::{ChipCoord, ClusterId, Vertex};
use thiserror::Error;

/// Errors that can occur while preparing nets for place and route
#[derive(Debug, Error)]
pub enum NetlistError {
    /// A vertex referenced as a net source has no placement
    #[error("No placement for vertex {vertex}")]
    MissingPlacement { vertex: Vertex },

    /// Sources merged into one synthetic source disagree on their cluster
    #[error("Inconsistent cluster IDs {clusters:?} for net {net} at chip {coord}")]
    InconsistentClusterIds {
        net: NetId,
        coord: ChipCoord,
        clusters: Vec<ClusterId>,
    },

    /// A derived net has no original source at its chip
    #[error("Net {net} has no source placed at chip {coord}")]
    NoSourceAtChip { net: NetId, coord: ChipCoord },

    /// No synthetic ids left to allocate
    #[error("Synthetic vertex ids exhausted")]
    SyntheticIdsExhausted,

    /// A keyspace field value does not fit in the field
    #[error("Keyspace field '{field}' cannot hold {value}: only {bits} bits available")]
    KeyspaceFieldOverflow {
        field: &'static str,
        value: u32,
        bits: u32,
    },

    /// Invalid keyspace layout
    #[error("Invalid keyspace layout: {0}")]
    InvalidLayout(String),

    /// Keyspace layout could not be parsed
    #[error("Layout parse error: {0}")]
    LayoutParse(#[from] toml::de::Error),
}

/// Result type for net expansion operations
pub type Result<T> = std::result::Result<T, NetlistError>;
