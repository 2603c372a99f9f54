//! Unit tests for sweep-graph.
//!
//! All tests use small hand-built graphs.

#[cfg(test)]
mod helpers {
    use sweep_core::{Point, WaypointId, WaypointKind};
    use crate::{BuildingGraph, BuildingGraphBuilder};

    /// Straight line A-B-C with walkway lengths 3 and 4.
    pub fn line() -> (BuildingGraph, [WaypointId; 3]) {
        let mut b = BuildingGraphBuilder::new();
        let a = b.add_waypoint("A", 1, Point::new(0.0, 0.0), WaypointKind::CorridorPoint);
        let m = b.add_waypoint("B", 1, Point::new(3.0, 0.0), WaypointKind::CorridorPoint);
        let c = b.add_waypoint("C", 1, Point::new(7.0, 0.0), WaypointKind::CorridorPoint);
        b.add_walkway(a, m, 3.0);
        b.add_walkway(m, c, 4.0);
        (b.build().unwrap(), [a, m, c])
    }

    /// Diamond with two equal-length routes from S to T:
    ///
    /// ```text
    ///   S ─2─ X ─2─ T
    ///   S ─1─ Y ─1─ Z ─2─ T
    /// ```
    ///
    /// Both routes are 4 m; the one through X has fewer hops.
    pub fn diamond() -> (BuildingGraph, [WaypointId; 5]) {
        let mut b = BuildingGraphBuilder::new();
        let s = b.add_waypoint("S", 1, Point::default(), WaypointKind::Exit);
        let y = b.add_waypoint("Y", 1, Point::default(), WaypointKind::CorridorPoint);
        let z = b.add_waypoint("Z", 1, Point::default(), WaypointKind::CorridorPoint);
        let x = b.add_waypoint("X", 1, Point::default(), WaypointKind::CorridorPoint);
        let t = b.add_waypoint("T", 1, Point::default(), WaypointKind::CorridorPoint);
        b.add_walkway(s, y, 1.0);
        b.add_walkway(y, z, 1.0);
        b.add_walkway(z, t, 2.0);
        b.add_walkway(s, x, 2.0);
        b.add_walkway(x, t, 2.0);
        (b.build().unwrap(), [s, x, y, z, t])
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use sweep_core::{Point, TraversalMode, WaypointKind};
    use crate::{BuildingGraphBuilder, GraphError};

    #[test]
    fn empty_build() {
        let g = BuildingGraphBuilder::new().build().unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn walkway_is_bidirectional() {
        let (g, [a, m, c]) = super::helpers::line();
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.out_degree(a), 1);
        assert_eq!(g.out_degree(m), 2);
        assert_eq!(g.out_degree(c), 1);
    }

    #[test]
    fn csr_edges_are_grouped_by_source() {
        let (g, _) = super::helpers::diamond();
        for w in 0..g.node_count() {
            let w = sweep_core::WaypointId(w as u32);
            for e in g.out_edges(w) {
                assert_eq!(g.edge_from[e.index()], w);
            }
        }
    }

    #[test]
    fn labels_resolve() {
        let (g, [a, _, c]) = super::helpers::line();
        assert_eq!(g.find("A"), Some(a));
        assert_eq!(g.find("C"), Some(c));
        assert_eq!(g.find("nope"), None);
        assert_eq!(g.label(c), "C");
    }

    #[test]
    fn duplicate_label_rejected() {
        let mut b = BuildingGraphBuilder::new();
        b.add_waypoint("A", 1, Point::default(), WaypointKind::CorridorPoint);
        b.add_waypoint("A", 1, Point::default(), WaypointKind::CorridorPoint);
        assert!(matches!(b.build(), Err(GraphError::DuplicateWaypoint(l)) if l == "A"));
    }

    #[test]
    fn negative_length_rejected() {
        let mut b = BuildingGraphBuilder::new();
        let a = b.add_waypoint("A", 1, Point::default(), WaypointKind::CorridorPoint);
        let c = b.add_waypoint("C", 1, Point::default(), WaypointKind::CorridorPoint);
        b.add_walkway(a, c, -1.0);
        assert!(matches!(b.build(), Err(GraphError::InvalidLength { .. })));
    }

    #[test]
    fn dangling_edge_rejected() {
        let mut b = BuildingGraphBuilder::new();
        let a = b.add_waypoint("A", 1, Point::default(), WaypointKind::CorridorPoint);
        b.add_walkway(a, sweep_core::WaypointId(9), 1.0);
        assert!(matches!(b.build(), Err(GraphError::WaypointNotFound(_))));
    }

    #[test]
    fn room_centre_needs_a_door() {
        let mut b = BuildingGraphBuilder::new();
        let r = b.add_waypoint("R1", 1, Point::default(), WaypointKind::RoomCenter);
        let c = b.add_waypoint("C#0", 1, Point::default(), WaypointKind::CorridorPoint);
        b.add_walkway(r, c, 2.0);
        assert!(matches!(b.build(), Err(GraphError::RoomShortcut { .. })));
    }

    #[test]
    fn room_to_room_rejected() {
        let mut b = BuildingGraphBuilder::new();
        let r1 = b.add_waypoint("R1", 1, Point::default(), WaypointKind::RoomCenter);
        let r2 = b.add_waypoint("R2", 1, Point::default(), WaypointKind::RoomCenter);
        b.add_walkway(r1, r2, 2.0);
        assert!(matches!(b.build(), Err(GraphError::RoomShortcut { .. })));
    }

    #[test]
    fn room_through_door_accepted() {
        let mut b = BuildingGraphBuilder::new();
        let r = b.add_waypoint("R1", 1, Point::default(), WaypointKind::RoomCenter);
        let d = b.add_waypoint("R1/door", 1, Point::default(), WaypointKind::Door);
        let c = b.add_waypoint("C#0", 1, Point::default(), WaypointKind::CorridorPoint);
        b.add_walkway(r, d, 2.0);
        b.add_walkway(d, c, 1.0);
        assert!(b.build().is_ok());
    }

    #[test]
    fn stair_flight_modes() {
        let mut b = BuildingGraphBuilder::new();
        let lo = b.add_waypoint("S_F1", 1, Point::default(), WaypointKind::StairLanding);
        let hi = b.add_waypoint("S_F2", 2, Point::default(), WaypointKind::StairLanding);
        b.add_stair_flight(lo, hi, 4.0);
        let g = b.build().unwrap();
        let up: Vec<_> = g.out_edges(lo).collect();
        let down: Vec<_> = g.out_edges(hi).collect();
        assert_eq!(g.edge_mode[up[0].index()], TraversalMode::StairUp);
        assert_eq!(g.edge_mode[down[0].index()], TraversalMode::StairDown);
        assert_eq!(g.floor(hi), 2);
    }

    #[test]
    fn reachability() {
        let mut b = BuildingGraphBuilder::new();
        let a = b.add_waypoint("A", 1, Point::default(), WaypointKind::Exit);
        let c = b.add_waypoint("C", 1, Point::default(), WaypointKind::CorridorPoint);
        let island = b.add_waypoint("I", 1, Point::default(), WaypointKind::CorridorPoint);
        b.add_walkway(a, c, 1.0);
        let g = b.build().unwrap();
        let seen = g.reachable_from(&[a]);
        assert!(seen[c.index()]);
        assert!(!seen[island.index()]);
        assert_eq!(g.waypoints_of_kind(WaypointKind::Exit), vec![a]);
    }
}

// ── Routing ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use sweep_core::{EdgeId, Point, TraversalMode, WaypointKind};
    use crate::{
        BuildingGraph, BuildingGraphBuilder, DijkstraRouter, Distance, EdgeCost, GraphError,
        Router,
    };

    #[test]
    fn shortest_path_through_middle() {
        let (g, [a, m, c]) = super::helpers::line();
        let (dist, path) = g.shortest_path(a, c).unwrap();
        assert!((dist - 7.0).abs() < 1e-6);
        assert_eq!(path, vec![a, m, c]);
    }

    #[test]
    fn trivial_route() {
        let (g, [a, _, _]) = super::helpers::line();
        let route = DijkstraRouter.route(&g, a, a, &Distance).unwrap();
        assert!(route.is_trivial());
        assert_eq!(route.cost, 0);
        assert_eq!(route.waypoints, vec![a]);
    }

    #[test]
    fn distance_cost_in_millimetres() {
        let (g, [a, _, c]) = super::helpers::line();
        let route = DijkstraRouter.route(&g, a, c, &Distance).unwrap();
        assert_eq!(route.cost, 7_000);
        assert_eq!(route.edges.len(), 2);
    }

    #[test]
    fn fewer_hops_win_ties() {
        let (g, [s, x, _, _, t]) = super::helpers::diamond();
        let (dist, path) = g.shortest_path(s, t).unwrap();
        assert!((dist - 4.0).abs() < 1e-6);
        assert_eq!(path, vec![s, x, t]);
    }

    #[test]
    fn repeated_queries_agree() {
        let (g, [s, _, _, _, t]) = super::helpers::diamond();
        let first = g.shortest_path(s, t).unwrap();
        for _ in 0..10 {
            assert_eq!(g.shortest_path(s, t).unwrap(), first);
        }
    }

    #[test]
    fn no_route() {
        let mut b = BuildingGraphBuilder::new();
        let a = b.add_waypoint("A", 1, Point::default(), WaypointKind::CorridorPoint);
        let c = b.add_waypoint("C", 1, Point::default(), WaypointKind::CorridorPoint);
        let g = b.build().unwrap();
        assert!(matches!(g.shortest_path(a, c), Err(GraphError::NoRoute { .. })));
    }

    #[test]
    fn unknown_waypoint() {
        let (g, [a, _, _]) = super::helpers::line();
        let bogus = sweep_core::WaypointId(99);
        assert!(matches!(
            DijkstraRouter.route(&g, a, bogus, &Distance),
            Err(GraphError::WaypointNotFound(_))
        ));
        assert!(matches!(
            DijkstraRouter.tree(&g, bogus, &Distance),
            Err(GraphError::WaypointNotFound(_))
        ));
    }

    #[test]
    fn tree_covers_every_reachable_waypoint() {
        let (g, [a, m, c]) = super::helpers::line();
        let tree = DijkstraRouter.tree(&g, a, &Distance).unwrap();
        assert_eq!(tree.cost_to(a), Some(0));
        assert_eq!(tree.cost_to(m), Some(3_000));
        assert_eq!(tree.cost_to(c), Some(7_000));
        assert_eq!(tree.route_to(&g, c).unwrap().waypoints, vec![a, m, c]);
    }

    /// Climbing costs ten times as much as descending.
    struct SlowClimb;

    impl EdgeCost for SlowClimb {
        fn edge_cost(&self, graph: &BuildingGraph, edge: EdgeId) -> u64 {
            let base = Distance.edge_cost(graph, edge);
            match graph.edge_mode[edge.index()] {
                TraversalMode::StairUp => base * 10,
                _ => base,
            }
        }
    }

    #[test]
    fn stair_direction_priced_separately() {
        let mut b = BuildingGraphBuilder::new();
        let lo = b.add_waypoint("S_F1", 1, Point::default(), WaypointKind::StairLanding);
        let hi = b.add_waypoint("S_F2", 2, Point::default(), WaypointKind::StairLanding);
        b.add_stair_flight(lo, hi, 4.0);
        let g = b.build().unwrap();
        let up = DijkstraRouter.route(&g, lo, hi, &SlowClimb).unwrap();
        let down = DijkstraRouter.route(&g, hi, lo, &SlowClimb).unwrap();
        assert_eq!(up.cost, 40_000);
        assert_eq!(down.cost, 4_000);
        assert_eq!(up.length_m, down.length_m);
    }
}
