//! Netlist preparation for multi-chip place and route
//!
//! This crate handles:
//! - Expanding N:M nets into 1:M nets for placement
//! - Expanding N:M nets into 1:M nets for routing, with synthetic sources
//! - Resolving the routing keyspace of every routing net
//!
//! ```text
//! SignalNets ──► expand_for_placement ──► placement
//!     │
//!     └────────► expand_for_routing ──► RoutingNets ──► resolve_net_keyspaces
//! ```

pub mod config;
pub mod error;
pub mod keyspace;
pub mod net;
pub mod placement;
pub mod resolve;
pub mod resources;
pub mod routing;
pub mod vertex;

pub use config::KeyspaceLayout;
pub use error::{NetlistError, Result};
pub use keyspace::{FabricKeyspace, Keyspace};
pub use net::{NMNet, Net, NetId, Signal, SignalId, SignalNets};
pub use placement::expand_for_placement;
pub use resolve::{resolve_net_keyspaces, NetKeyspaces};
pub use resources::{
    Allocation, AllocationMap, PlacementMap, Requirements, Resource, ResourceMap,
};
pub use routing::{expand_for_routing, DerivedNets, ExpansionStats, RoutingNets};
pub use vertex::{ChipCoord, ClusterId, SyntheticAllocator, SyntheticId, Vertex, VertexId};
