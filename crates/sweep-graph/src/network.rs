//! Waypoint graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `WaypointId w`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[w] .. node_out_start[w+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`, `edge_mode`)
//! are sorted by source waypoint and indexed by `EdgeId`.  Iteration over a
//! waypoint's outgoing edges is a contiguous memory scan.
//!
//! Edges are directed.  Level walkways are stored once per direction with
//! [`TraversalMode::Flat`]; a stair flight is stored as a `StairUp` edge from
//! the lower landing and a `StairDown` edge from the upper one, so cost
//! models can price the two directions differently.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use sweep_core::{EdgeId, Point, TraversalMode, WaypointId, WaypointKind};

use crate::{GraphError, GraphResult};

// ── BuildingGraph ─────────────────────────────────────────────────────────────

/// Directed waypoint graph in CSR format.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`BuildingGraphBuilder`].  Immutable once built.
#[derive(Debug)]
pub struct BuildingGraph {
    // ── Waypoint data (indexed by WaypointId) ─────────────────────────────
    /// Unique human-readable label of each waypoint (`"R101"`, `"C1#3"`, …).
    pub node_label: Vec<String>,

    /// Floor index of each waypoint.
    pub node_floor: Vec<i32>,

    /// Floor-plan position of each waypoint.
    pub node_pos: Vec<Point>,

    /// What each waypoint physically is.
    pub node_kind: Vec<WaypointKind>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source waypoint of each edge (needed for path reconstruction).
    pub edge_from: Vec<WaypointId>,

    /// Destination waypoint of each edge.
    pub edge_to: Vec<WaypointId>,

    /// Physical length of each edge in metres.
    pub edge_length_m: Vec<f32>,

    /// Traversal mode of each edge; selects the speed in cost models.
    pub edge_mode: Vec<TraversalMode>,

    by_label: HashMap<String, WaypointId>,
}

impl BuildingGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Resolve a waypoint label to its id.
    pub fn find(&self, label: &str) -> Option<WaypointId> {
        self.by_label.get(label).copied()
    }

    /// Label of `waypoint`; panics on an out-of-range id.
    #[inline]
    pub fn label(&self, waypoint: WaypointId) -> &str {
        &self.node_label[waypoint.index()]
    }

    #[inline]
    pub fn kind(&self, waypoint: WaypointId) -> WaypointKind {
        self.node_kind[waypoint.index()]
    }

    #[inline]
    pub fn floor(&self, waypoint: WaypointId) -> i32 {
        self.node_floor[waypoint.index()]
    }

    #[inline]
    pub fn contains(&self, waypoint: WaypointId) -> bool {
        waypoint.index() < self.node_count()
    }

    /// All waypoints of the given kind, in ascending id order.
    pub fn waypoints_of_kind(&self, kind: WaypointKind) -> Vec<WaypointId> {
        self.node_kind
            .iter()
            .enumerate()
            .filter(|(_, k)| **k == kind)
            .map(|(i, _)| WaypointId(i as u32))
            .collect()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `waypoint`.
    #[inline]
    pub fn out_edges(&self, waypoint: WaypointId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[waypoint.index()] as usize;
        let end   = self.node_out_start[waypoint.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, waypoint: WaypointId) -> usize {
        let start = self.node_out_start[waypoint.index()] as usize;
        let end   = self.node_out_start[waypoint.index() + 1] as usize;
        end - start
    }

    /// Breadth-first reachability from any of `sources`.
    ///
    /// Returns one flag per waypoint.  Unknown source ids are ignored.
    pub fn reachable_from(&self, sources: &[WaypointId]) -> Vec<bool> {
        let mut seen = vec![false; self.node_count()];
        let mut queue = VecDeque::new();
        for &s in sources {
            if self.contains(s) && !seen[s.index()] {
                seen[s.index()] = true;
                queue.push_back(s);
            }
        }
        while let Some(w) = queue.pop_front() {
            for e in self.out_edges(w) {
                let next = self.edge_to[e.index()];
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }
}

// ── BuildingGraphBuilder ──────────────────────────────────────────────────────

/// Construct a [`BuildingGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use sweep_core::{Point, WaypointKind};
/// use sweep_graph::BuildingGraphBuilder;
///
/// let mut b = BuildingGraphBuilder::new();
/// let a = b.add_waypoint("A", 1, Point::new(0.0, 0.0), WaypointKind::CorridorPoint);
/// let c = b.add_waypoint("C", 1, Point::new(5.0, 0.0), WaypointKind::Exit);
/// b.add_walkway(a, c, 5.0);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // one per direction
/// ```
#[derive(Default)]
pub struct BuildingGraphBuilder {
    labels:    Vec<String>,
    floors:    Vec<i32>,
    positions: Vec<Point>,
    kinds:     Vec<WaypointKind>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:     WaypointId,
    to:       WaypointId,
    length_m: f32,
    mode:     TraversalMode,
}

impl BuildingGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a waypoint and return its `WaypointId` (sequential from 0).
    ///
    /// Label uniqueness is checked in [`build`](Self::build).
    pub fn add_waypoint(
        &mut self,
        label: impl Into<String>,
        floor: i32,
        pos:   Point,
        kind:  WaypointKind,
    ) -> WaypointId {
        let id = WaypointId(self.labels.len() as u32);
        self.labels.push(label.into());
        self.floors.push(floor);
        self.positions.push(pos);
        self.kinds.push(kind);
        id
    }

    /// Add a single **directed** edge.
    pub fn add_directed_edge(
        &mut self,
        from:     WaypointId,
        to:       WaypointId,
        length_m: f32,
        mode:     TraversalMode,
    ) {
        self.raw_edges.push(RawEdge { from, to, length_m, mode });
    }

    /// Level walkway usable in both directions.
    pub fn add_walkway(&mut self, a: WaypointId, b: WaypointId, length_m: f32) {
        self.add_directed_edge(a, b, length_m, TraversalMode::Flat);
        self.add_directed_edge(b, a, length_m, TraversalMode::Flat);
    }

    /// One stair flight between two landings: `StairUp` from `lower`,
    /// `StairDown` from `upper`.
    pub fn add_stair_flight(&mut self, lower: WaypointId, upper: WaypointId, length_m: f32) {
        self.add_directed_edge(lower, upper, length_m, TraversalMode::StairUp);
        self.add_directed_edge(upper, lower, length_m, TraversalMode::StairDown);
    }

    pub fn position(&self, id: WaypointId) -> Option<Point> {
        self.positions.get(id.index()).copied()
    }

    pub fn node_count(&self) -> usize { self.labels.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Validate and consume the builder, producing a [`BuildingGraph`].
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateWaypoint`] if two waypoints share a label.
    /// - [`GraphError::WaypointNotFound`] if an edge references an id that
    ///   was never added.
    /// - [`GraphError::InvalidLength`] for negative or non-finite lengths.
    /// - [`GraphError::RoomShortcut`] if an edge touches a room centre from
    ///   anything other than a door.
    pub fn build(self) -> GraphResult<BuildingGraph> {
        let node_count = self.labels.len();

        let mut by_label = HashMap::with_capacity(node_count);
        for (i, label) in self.labels.iter().enumerate() {
            if by_label.insert(label.clone(), WaypointId(i as u32)).is_some() {
                return Err(GraphError::DuplicateWaypoint(label.clone()));
            }
        }

        for e in &self.raw_edges {
            for end in [e.from, e.to] {
                if end.index() >= node_count {
                    return Err(GraphError::WaypointNotFound(end));
                }
            }
            if !e.length_m.is_finite() || e.length_m < 0.0 {
                return Err(GraphError::InvalidLength {
                    from:     e.from,
                    to:       e.to,
                    length_m: e.length_m,
                });
            }
            let (kf, kt) = (self.kinds[e.from.index()], self.kinds[e.to.index()]);
            let shortcut = (kf == WaypointKind::RoomCenter && kt != WaypointKind::Door)
                || (kt == WaypointKind::RoomCenter && kf != WaypointKind::Door);
            if shortcut {
                return Err(GraphError::RoomShortcut {
                    from: self.labels[e.from.index()].clone(),
                    to:   self.labels[e.to.index()].clone(),
                });
            }
        }

        // Stable sort keeps insertion order within a source, so edge ids are
        // reproducible for identical inputs.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:     Vec<WaypointId>    = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<WaypointId>    = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f32>           = raw.iter().map(|e| e.length_m).collect();
        let edge_mode:     Vec<TraversalMode> = raw.iter().map(|e| e.mode).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        debug!(waypoints = node_count, edges = raw.len(), "built building graph");

        Ok(BuildingGraph {
            node_label: self.labels,
            node_floor: self.floors,
            node_pos: self.positions,
            node_kind: self.kinds,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_mode,
            by_label,
        })
    }
}
