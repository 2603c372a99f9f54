//! Routing trait, cost models, and the default Dijkstra implementation.
//!
//! # Cost units
//!
//! Dijkstra runs on integer costs.  [`Distance`] prices an edge in
//! millimetres; responder speed profiles (in `sweep-nav`) price it in
//! milliseconds.  Each edge is rounded once when priced, so equal-length
//! alternatives compare exactly and tie-breaking is reproducible.
//!
//! # Tie-breaking
//!
//! Labels are `(cost, hops)` pairs compared lexicographically: among
//! equal-cost paths the one with fewer edges wins, and the heap's third key
//! (`WaypointId`) settles anything left.  Paths are therefore identical
//! across runs and platforms.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use sweep_core::{EdgeId, WaypointId};

use crate::network::BuildingGraph;
use crate::{GraphError, GraphResult};

// ── Cost models ───────────────────────────────────────────────────────────────

/// Prices a single directed edge for Dijkstra.
///
/// Implementations must return the same value for the same edge on every
/// call; the router assumes costs are fixed for the lifetime of a query.
pub trait EdgeCost: Sync {
    fn edge_cost(&self, graph: &BuildingGraph, edge: EdgeId) -> u64;
}

/// Physical length in millimetres, regardless of traversal mode.
#[derive(Copy, Clone, Debug, Default)]
pub struct Distance;

impl EdgeCost for Distance {
    #[inline]
    fn edge_cost(&self, graph: &BuildingGraph, edge: EdgeId) -> u64 {
        (graph.edge_length_m[edge.index()] as f64 * 1000.0).round() as u64
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a point-to-point query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Waypoints visited in order, including both endpoints.
    pub waypoints: Vec<WaypointId>,
    /// Edges traversed in order (`waypoints.len() - 1` of them).
    pub edges: Vec<EdgeId>,
    /// Total cost in the cost model's unit.
    pub cost: u64,
    /// Total physical length in metres.
    pub length_m: f32,
}

impl Route {
    /// `true` if source and destination are the same waypoint.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

// ── ShortestPathTree ──────────────────────────────────────────────────────────

/// Single-source shortest paths from `source` to every reachable waypoint.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    pub source: WaypointId,
    /// Best cost per waypoint; `u64::MAX` if unreachable.
    pub cost: Vec<u64>,
    /// Edge count of the best path per waypoint.
    pub hops: Vec<u32>,
    /// Edge that reached each waypoint; `EdgeId::INVALID` for the source and
    /// unreachable waypoints.
    pub prev_edge: Vec<EdgeId>,
}

impl ShortestPathTree {
    #[inline]
    pub fn reaches(&self, to: WaypointId) -> bool {
        self.cost.get(to.index()).is_some_and(|&c| c != u64::MAX)
    }

    /// Cost to `to`, or `None` if unreachable.
    #[inline]
    pub fn cost_to(&self, to: WaypointId) -> Option<u64> {
        self.cost.get(to.index()).copied().filter(|&c| c != u64::MAX)
    }

    /// Rebuild the full route from `source` to `to`.
    pub fn route_to(&self, graph: &BuildingGraph, to: WaypointId) -> GraphResult<Route> {
        let cost = self
            .cost_to(to)
            .ok_or(GraphError::NoRoute { from: self.source, to })?;

        let mut edges = Vec::with_capacity(self.hops[to.index()] as usize);
        let mut cur = to;
        loop {
            let e = self.prev_edge[cur.index()];
            if e == EdgeId::INVALID {
                break;
            }
            edges.push(e);
            cur = graph.edge_from[e.index()];
        }
        edges.reverse();

        let mut waypoints = Vec::with_capacity(edges.len() + 1);
        waypoints.push(self.source);
        waypoints.extend(edges.iter().map(|e| graph.edge_to[e.index()]));
        let length_m = edges.iter().map(|e| graph.edge_length_m[e.index()]).sum();

        Ok(Route { waypoints, edges, cost, length_m })
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync`: the optimizer shares one router
/// across Rayon workers during parallel fitness evaluation.
pub trait Router: Send + Sync {
    /// Best route from `from` to `to` under `cost`.
    ///
    /// `from == to` yields a trivial route rather than an error.
    fn route(
        &self,
        graph: &BuildingGraph,
        from:  WaypointId,
        to:    WaypointId,
        cost:  &dyn EdgeCost,
    ) -> GraphResult<Route>;

    /// Shortest paths from `from` to every waypoint.
    fn tree(
        &self,
        graph: &BuildingGraph,
        from:  WaypointId,
        cost:  &dyn EdgeCost,
    ) -> GraphResult<ShortestPathTree>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Dijkstra's algorithm over the CSR graph with fewest-hops tie-breaking.
///
/// Edge costs are never negative (they are unsigned), which is all Dijkstra
/// needs.
#[derive(Copy, Clone, Debug, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(
        &self,
        graph: &BuildingGraph,
        from:  WaypointId,
        to:    WaypointId,
        cost:  &dyn EdgeCost,
    ) -> GraphResult<Route> {
        check_waypoint(graph, to)?;
        let tree = dijkstra(graph, from, Some(to), cost)?;
        tree.route_to(graph, to)
    }

    fn tree(
        &self,
        graph: &BuildingGraph,
        from:  WaypointId,
        cost:  &dyn EdgeCost,
    ) -> GraphResult<ShortestPathTree> {
        dijkstra(graph, from, None, cost)
    }
}

impl BuildingGraph {
    /// Shortest physical path from `a` to `b`: `(distance_m, waypoints)`.
    ///
    /// # Errors
    ///
    /// [`GraphError::NoRoute`] if `b` is not reachable from `a`.
    pub fn shortest_path(&self, a: WaypointId, b: WaypointId) -> GraphResult<(f32, Vec<WaypointId>)> {
        let route = DijkstraRouter.route(self, a, b, &Distance)?;
        Ok((route.length_m, route.waypoints))
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn check_waypoint(graph: &BuildingGraph, w: WaypointId) -> GraphResult<()> {
    if graph.contains(w) {
        Ok(())
    } else {
        Err(GraphError::WaypointNotFound(w))
    }
}

/// Run Dijkstra from `from`.  With `target = Some(t)` the search stops as
/// soon as `t` is settled; the returned tree is then only complete for
/// waypoints settled before `t`.
fn dijkstra(
    graph:  &BuildingGraph,
    from:   WaypointId,
    target: Option<WaypointId>,
    cost:   &dyn EdgeCost,
) -> GraphResult<ShortestPathTree> {
    check_waypoint(graph, from)?;

    let n = graph.node_count();
    let mut best      = vec![u64::MAX; n];
    let mut hops      = vec![u32::MAX; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];

    best[from.index()] = 0;
    hops[from.index()] = 0;

    // Min-heap on (cost, hops, waypoint).
    let mut heap: BinaryHeap<Reverse<(u64, u32, WaypointId)>> = BinaryHeap::new();
    heap.push(Reverse((0, 0, from)));

    while let Some(Reverse((c, h, node))) = heap.pop() {
        // Skip stale heap entries.
        if (c, h) > (best[node.index()], hops[node.index()]) {
            continue;
        }
        if target == Some(node) {
            break;
        }

        for edge in graph.out_edges(node) {
            let next = graph.edge_to[edge.index()];
            let nc = c.saturating_add(cost.edge_cost(graph, edge));
            let nh = h + 1;
            if (nc, nh) < (best[next.index()], hops[next.index()]) {
                best[next.index()] = nc;
                hops[next.index()] = nh;
                prev_edge[next.index()] = edge;
                heap.push(Reverse((nc, nh, next)));
            }
        }
    }

    Ok(ShortestPathTree { source: from, cost: best, hops, prev_edge })
}
