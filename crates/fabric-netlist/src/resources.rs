//! Per-vertex resource, placement and allocation maps

use crate::error::{NetlistError, Result};
use crate::vertex::{ChipCoord, Vertex};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Chip resources a vertex may require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Application cores
    Cores,
    /// Shared off-die memory (bytes)
    Sdram,
    /// Core-local memory (bytes)
    Sram,
}

/// Resource requirements of a single vertex
pub type Requirements = IndexMap<Resource, u32>;

/// Resource ranges allocated to a single vertex at its placement
pub type Allocation = IndexMap<Resource, Range<u32>>;

/// Vertex -> resource requirements
pub type ResourceMap = IndexMap<Vertex, Requirements>;

/// Vertex -> chip coordinate
pub type PlacementMap = IndexMap<Vertex, ChipCoord>;

/// Vertex -> allocated resource ranges
pub type AllocationMap = IndexMap<Vertex, Allocation>;

/// Look up the chip a vertex is placed on
pub fn placement_of(placements: &PlacementMap, vertex: &Vertex) -> Result<ChipCoord> {
    placements
        .get(vertex)
        .copied()
        .ok_or(NetlistError::MissingPlacement { vertex: *vertex })
}
