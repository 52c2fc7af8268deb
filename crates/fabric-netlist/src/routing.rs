//! Nets for routing
//!
//! Routing needs exactly one physical source per net. Each N:M net is
//! replaced by one net per distinct chip its sources sit on, driven by a
//! synthetic source placed on that chip. Sources sharing a chip are merged
//! so the router does not route identical trees twice.

use crate::error::Result;
use crate::net::{NMNet, Net, NetId, SignalNets};
use crate::resources::{Allocation, AllocationMap, PlacementMap, Requirements, ResourceMap};
use crate::vertex::{ChipCoord, SyntheticAllocator, Vertex};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Original net -> chip -> derived routing net
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DerivedNets {
    nets: IndexMap<NetId, IndexMap<ChipCoord, Net>>,
}

impl DerivedNets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the routing net derived from `original` at `coord`
    pub fn insert(&mut self, original: NetId, coord: ChipCoord, net: Net) {
        self.nets.entry(original).or_default().insert(coord, net);
    }

    /// Routing nets derived from an original net, keyed by chip
    pub fn nets_for(&self, original: NetId) -> Option<&IndexMap<ChipCoord, Net>> {
        self.nets.get(&original)
    }

    /// Number of original nets with derived nets
    pub fn len(&self) -> usize {
        self.nets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NetId, &IndexMap<ChipCoord, Net>)> {
        self.nets.iter()
    }
}

/// Summary of a routing expansion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionStats {
    /// Distinct N:M nets expanded
    pub original_nets: usize,
    /// 1:M nets produced
    pub routing_nets: usize,
    /// Sources folded into a shared synthetic source
    pub merged_sources: usize,
}

/// Output of [`expand_for_routing`]
///
/// The extended maps are copies of the caller's maps with entries added for
/// every synthetic source; they must be used when routing `nets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingNets {
    /// Nets to route
    pub nets: Vec<Net>,
    /// Extended resource requirements
    pub resources: ResourceMap,
    /// Extended placements
    pub placements: PlacementMap,
    /// Extended allocations
    pub allocations: AllocationMap,
    /// Which routing nets came from which original net
    pub derived: DerivedNets,
    /// Expansion summary
    pub stats: ExpansionStats,
}

impl RoutingNets {
    /// Split into (nets, resources, placements, allocations, derived)
    pub fn into_parts(
        self,
    ) -> (
        Vec<Net>,
        ResourceMap,
        PlacementMap,
        AllocationMap,
        DerivedNets,
    ) {
        (
            self.nets,
            self.resources,
            self.placements,
            self.allocations,
            self.derived,
        )
    }

    /// Synthetic sources of the routing nets
    pub fn synthetic_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.nets.iter().map(|net| &net.source)
    }
}

/// Expand N:M nets into 1:M nets suitable for routing
///
/// Nets shared by several signals are expanded once. The caller's maps are
/// left untouched; every source of every net must have a placement.
pub fn expand_for_routing<K>(
    resources: &ResourceMap,
    nets: &SignalNets<K>,
    placements: &PlacementMap,
    allocations: &AllocationMap,
) -> Result<RoutingNets> {
    let mut routing_nets = Vec::new();
    let mut extended_resources = resources.clone();
    let mut extended_placements = placements.clone();
    let mut extended_allocations = allocations.clone();
    let mut derived = DerivedNets::new();
    let mut stats = ExpansionStats::default();

    // Synthetic ids must not collide with anything already in the maps
    let mut synthetic = SyntheticAllocator::after(
        resources
            .keys()
            .chain(placements.keys())
            .chain(allocations.keys()),
    );

    let mut seen = IndexSet::new();
    for net in nets.values() {
        if !seen.insert(net.id) {
            continue;
        }

        let start_coords = net.source_coords(placements)?;
        stats.original_nets += 1;
        stats.merged_sources += net.sources.len() - start_coords.len();

        for coord in start_coords {
            let vertex = synthetic.allocate()?;
            extended_placements.insert(vertex, coord);
            extended_resources.insert(vertex, Requirements::new());
            extended_allocations.insert(vertex, Allocation::new());

            let routing_net = derive_net(net, vertex);
            derived.insert(net.id, coord, routing_net.clone());
            routing_nets.push(routing_net);
        }
    }

    stats.routing_nets = routing_nets.len();
    log::debug!(
        "Expanded {} nets into {} routing nets ({} sources merged)",
        stats.original_nets,
        stats.routing_nets,
        stats.merged_sources
    );

    Ok(RoutingNets {
        nets: routing_nets,
        resources: extended_resources,
        placements: extended_placements,
        allocations: extended_allocations,
        derived,
        stats,
    })
}

fn derive_net(original: &NMNet, source: Vertex) -> Net {
    Net::new(source, original.sinks.clone(), original.weight)
}
