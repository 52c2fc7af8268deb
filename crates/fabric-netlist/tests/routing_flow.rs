//! End-to-end tests: routing expansion followed by keyspace resolution

use fabric_netlist::{
    expand_for_placement, expand_for_routing, resolve_net_keyspaces, AllocationMap, ChipCoord,
    FabricKeyspace, Keyspace, NMNet, NetId, NetlistError, PlacementMap, Requirements, Resource,
    ResourceMap, Signal, SignalId, SignalNets, Vertex,
};
use std::sync::Arc;

struct Design {
    resources: ResourceMap,
    placements: PlacementMap,
    nets: SignalNets<FabricKeyspace>,
}

fn design(sources: &[(Vertex, (u32, u32))], sink: Vertex, keyspace: FabricKeyspace) -> Design {
    let mut resources = ResourceMap::new();
    let mut placements = PlacementMap::new();
    for &(v, coord) in sources {
        resources.insert(v, Requirements::from([(Resource::Cores, 1)]));
        placements.insert(v, coord.into());
    }
    placements.insert(sink, ChipCoord::new(3, 3));

    let net = NMNet::new(NetId(0), sources.iter().map(|(v, _)| *v), [sink], 5.0);
    let mut nets = SignalNets::new();
    nets.insert(Signal::new(SignalId(0), keyspace), Arc::new(net));

    Design {
        resources,
        placements,
        nets,
    }
}

#[test]
fn test_two_chips_two_clusters() {
    let a = Vertex::clustered(0, 1);
    let b = Vertex::clustered(1, 1);
    let c = Vertex::clustered(2, 2);
    let x = Vertex::real(10);
    let ks = FabricKeyspace::default().with_object(3).unwrap();
    let d = design(&[(a, (0, 0)), (b, (0, 0)), (c, (1, 0))], x, ks);

    let routing = expand_for_routing(
        &d.resources,
        &d.nets,
        &d.placements,
        &AllocationMap::new(),
    )
    .unwrap();

    assert_eq!(routing.nets.len(), 2);
    for net in &routing.nets {
        assert_eq!(net.sinks.iter().copied().collect::<Vec<_>>(), vec![x]);
        assert_eq!(net.weight, 5.0);
    }

    // Every synthetic source is present in all three extended maps
    for v in routing.synthetic_vertices() {
        assert!(routing.resources.contains_key(v));
        assert!(routing.placements.contains_key(v));
        assert!(routing.allocations.contains_key(v));
    }

    let keyspaces =
        resolve_net_keyspaces(&routing.placements, &d.nets, &routing.derived).unwrap();
    let derived = routing.derived.nets_for(NetId(0)).unwrap();

    let at_origin = keyspaces.get(&derived[&ChipCoord::new(0, 0)]).unwrap();
    let at_east = keyspaces.get(&derived[&ChipCoord::new(1, 0)]).unwrap();
    assert_eq!(*at_origin, ks.with_cluster(1).unwrap());
    assert_eq!(*at_east, ks.with_cluster(2).unwrap());
    assert_eq!(at_origin.object(), Some(3));
}

#[test]
fn test_conflicting_clusters_abort_resolution() {
    let a = Vertex::clustered(0, 1);
    let b = Vertex::clustered(1, 2);
    let d = design(
        &[(a, (0, 0)), (b, (0, 0))],
        Vertex::real(10),
        FabricKeyspace::default(),
    );

    let routing = expand_for_routing(
        &d.resources,
        &d.nets,
        &d.placements,
        &AllocationMap::new(),
    )
    .unwrap();
    assert_eq!(routing.nets.len(), 1);

    let err = resolve_net_keyspaces(&routing.placements, &d.nets, &routing.derived).unwrap_err();
    assert!(matches!(
        err,
        NetlistError::InconsistentClusterIds { coord, .. } if coord == ChipCoord::new(0, 0)
    ));
}

#[test]
fn test_placement_and_routing_views_of_same_nets() {
    let sources = [
        (Vertex::real(0), (0, 0)),
        (Vertex::real(1), (0, 0)),
        (Vertex::real(2), (0, 1)),
        (Vertex::real(3), (0, 1)),
    ];
    let d = design(&sources, Vertex::real(10), FabricKeyspace::default());

    let placement_nets: Vec<_> = expand_for_placement(d.nets.values().map(Arc::as_ref)).collect();
    assert_eq!(placement_nets.len(), 4);

    let routing = expand_for_routing(
        &d.resources,
        &d.nets,
        &d.placements,
        &AllocationMap::new(),
    )
    .unwrap();
    assert_eq!(routing.nets.len(), 2);
    assert_eq!(routing.stats.merged_sources, 2);

    // Original entries survive extension unchanged
    for (v, req) in &d.resources {
        assert_eq!(&routing.resources[v], req);
    }
    for (v, coord) in &d.placements {
        assert_eq!(&routing.placements[v], coord);
    }
}

#[test]
fn test_signals_sharing_a_net() {
    let a = Vertex::clustered(0, 4);
    let mut placements = PlacementMap::new();
    placements.insert(a, ChipCoord::new(0, 0));

    let shared = Arc::new(NMNet::new(NetId(1), [a], [Vertex::real(9)], 1.0));
    let external = FabricKeyspace::default().with_user(1).unwrap();
    let mut nets = SignalNets::new();
    nets.insert(Signal::new(SignalId(0), FabricKeyspace::default()), shared.clone());
    nets.insert(Signal::new(SignalId(1), external), shared);

    let routing =
        expand_for_routing(&ResourceMap::new(), &nets, &placements, &AllocationMap::new())
            .unwrap();
    assert_eq!(routing.nets.len(), 1);

    // Later signals overwrite earlier ones for a shared routing net
    let keyspaces = resolve_net_keyspaces(&routing.placements, &nets, &routing.derived).unwrap();
    assert_eq!(keyspaces.len(), 1);
    assert_eq!(keyspaces.get(&routing.nets[0]), Some(&external));
}
