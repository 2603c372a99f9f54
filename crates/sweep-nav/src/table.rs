//! Precomputed responder travel tables.
//!
//! A [`TravelTable`] holds one shortest-path tree per *anchor* waypoint
//! (every exit and every room centre) under one [`SpeedProfile`].  Lookups
//! between anchors and any other waypoint are O(1) for time and distance and
//! O(path) for the waypoint sequence.

use std::collections::HashMap;

use sweep_core::{ResponderId, SimTime, WaypointId};
use sweep_graph::{BuildingGraph, Router, ShortestPathTree};

use crate::responder::SpeedProfile;
use crate::NavResult;

pub struct TravelTable {
    profile: SpeedProfile,
    slot:    HashMap<WaypointId, usize>,
    trees:   Vec<ShortestPathTree>,
    /// Physical path length from each anchor to every waypoint.
    lengths: Vec<Vec<f32>>,
    exits:   Vec<WaypointId>,
}

impl TravelTable {
    pub(crate) fn compute(
        graph:   &BuildingGraph,
        router:  &dyn Router,
        profile: SpeedProfile,
        anchors: &[WaypointId],
        exits:   &[WaypointId],
    ) -> NavResult<Self> {
        let mut slot = HashMap::with_capacity(anchors.len());
        let mut trees = Vec::with_capacity(anchors.len());
        let mut lengths = Vec::with_capacity(anchors.len());
        for &anchor in anchors {
            if slot.contains_key(&anchor) {
                continue;
            }
            let tree = router.tree(graph, anchor, &profile)?;
            lengths.push(path_lengths(graph, &tree));
            slot.insert(anchor, trees.len());
            trees.push(tree);
        }
        Ok(Self { profile, slot, trees, lengths, exits: exits.to_vec() })
    }

    pub fn profile(&self) -> SpeedProfile {
        self.profile
    }

    /// `true` if `from` is an anchor of this table.
    pub fn has_anchor(&self, from: WaypointId) -> bool {
        self.slot.contains_key(&from)
    }

    /// Travel time from anchor `from` to `to`; `None` if `from` is not an
    /// anchor or `to` is unreachable.
    #[inline]
    pub fn time(&self, from: WaypointId, to: WaypointId) -> Option<SimTime> {
        let &s = self.slot.get(&from)?;
        self.trees[s].cost_to(to).map(SimTime)
    }

    /// Length in metres of the fastest path from `from` to `to`.
    #[inline]
    pub fn distance_m(&self, from: WaypointId, to: WaypointId) -> Option<f32> {
        let &s = self.slot.get(&from)?;
        if !self.trees[s].reaches(to) {
            return None;
        }
        self.lengths[s].get(to.index()).copied()
    }

    /// Waypoints on the fastest path, both endpoints included.
    pub fn path(&self, graph: &BuildingGraph, from: WaypointId, to: WaypointId) -> Option<Vec<WaypointId>> {
        let &s = self.slot.get(&from)?;
        self.trees[s].route_to(graph, to).ok().map(|r| r.waypoints)
    }

    /// The exit fastest to reach from `from`; ties go to the lowest waypoint
    /// id.
    pub fn nearest_exit(&self, from: WaypointId) -> Option<(WaypointId, SimTime)> {
        self.exits
            .iter()
            .filter_map(|&e| self.time(from, e).map(|t| (e, t)))
            .min_by_key(|&(e, t)| (t, e))
    }
}

/// Path length to every waypoint of `tree`, accumulated in hop order so
/// each parent is finished before its children.
fn path_lengths(graph: &BuildingGraph, tree: &ShortestPathTree) -> Vec<f32> {
    let mut order: Vec<usize> = (0..graph.node_count()).filter(|&i| tree.cost[i] != u64::MAX).collect();
    order.sort_by_key(|&i| tree.hops[i]);

    let mut len = vec![0.0f32; graph.node_count()];
    for i in order {
        let e = tree.prev_edge[i];
        if e.index() < graph.edge_count() {
            len[i] = len[graph.edge_from[e.index()].index()] + graph.edge_length_m[e.index()];
        }
    }
    len
}

// ── TravelTables ──────────────────────────────────────────────────────────────

/// One table per distinct speed profile in a team, plus the mapping from
/// responder to table.
pub struct TravelTables {
    tables:       Vec<TravelTable>,
    of_responder: Vec<usize>,
}

impl TravelTables {
    pub(crate) fn new(tables: Vec<TravelTable>, of_responder: Vec<usize>) -> Self {
        Self { tables, of_responder }
    }

    /// Table for `responder`; panics on an out-of-range id.
    #[inline]
    pub fn for_responder(&self, responder: ResponderId) -> &TravelTable {
        &self.tables[self.of_responder[responder.index()]]
    }

    pub fn get(&self, responder: ResponderId) -> Option<&TravelTable> {
        self.of_responder.get(responder.index()).map(|&t| &self.tables[t])
    }

    pub fn responder_count(&self) -> usize {
        self.of_responder.len()
    }

    /// Number of distinct profiles actually computed.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}
