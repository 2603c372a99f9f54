//! The navigation layer: a validated building graph plus per-responder
//! travel-time queries.

use tracing::debug;

use sweep_core::{RoomId, SimTime, WaypointId, WaypointKind};
use sweep_graph::{BuildingGraph, DijkstraRouter, Route, Router};

use crate::building::Building;
use crate::layout::lay_out;
use crate::responder::{Responder, SpeedProfile};
use crate::table::{TravelTable, TravelTables};
use crate::{NavError, NavResult};

/// Immutable navigation layer shared by the optimizer and the simulator.
///
/// Built once per building by [`Navigator::build`], which also performs all
/// input validation; every later query is read-only.
pub struct Navigator {
    graph:  BuildingGraph,
    router: DijkstraRouter,
    /// Room centre per `RoomId`.
    rooms:  Vec<WaypointId>,
    exits:  Vec<WaypointId>,
}

impl Navigator {
    /// Lay out and validate `building`.
    ///
    /// # Errors
    ///
    /// Any [`NavError`] input error, naming the offending entity.
    pub fn build(building: &Building) -> NavResult<Self> {
        let layout = lay_out(building)?;
        Ok(Self {
            graph:  layout.graph,
            router: DijkstraRouter,
            rooms:  layout.rooms,
            exits:  layout.exits,
        })
    }

    pub fn graph(&self) -> &BuildingGraph {
        &self.graph
    }

    /// Centre waypoint of `room`; panics on an out-of-range id.
    #[inline]
    pub fn room_waypoint(&self, room: RoomId) -> WaypointId {
        self.rooms[room.index()]
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn exits(&self) -> &[WaypointId] {
        &self.exits
    }

    /// Resolve an exit id.
    pub fn exit(&self, label: &str) -> Option<WaypointId> {
        self.graph
            .find(label)
            .filter(|&w| self.graph.kind(w) == WaypointKind::Exit)
    }

    /// The exit `responder` starts from.
    pub fn start_of(&self, responder: &Responder) -> NavResult<WaypointId> {
        self.exit(&responder.start).ok_or_else(|| NavError::NotAnExit {
            responder: responder.id.clone(),
            start:     responder.start.clone(),
        })
    }

    // ── Ad-hoc queries ────────────────────────────────────────────────────

    /// Fastest route for `responder` between any two waypoints.
    pub fn route(&self, responder: &Responder, from: WaypointId, to: WaypointId) -> NavResult<Route> {
        Ok(self.router.route(&self.graph, from, to, &responder.profile())?)
    }

    /// Travel time for `responder` from `from` to `to`, using that
    /// responder's walk and stair speeds.
    pub fn travel_time(&self, responder: &Responder, from: WaypointId, to: WaypointId) -> NavResult<SimTime> {
        self.route(responder, from, to).map(|r| SimTime(r.cost))
    }

    // ── Precomputed tables ────────────────────────────────────────────────

    /// All exits and room centres, the sources a sweep can start a leg from.
    fn anchors(&self) -> Vec<WaypointId> {
        self.exits.iter().chain(self.rooms.iter()).copied().collect()
    }

    fn table_for(&self, profile: SpeedProfile) -> NavResult<TravelTable> {
        TravelTable::compute(&self.graph, &self.router, profile, &self.anchors(), &self.exits)
    }

    /// Precompute `responder`'s travel table.
    pub fn travel_table(&self, responder: &Responder) -> NavResult<TravelTable> {
        responder.validate()?;
        self.table_for(responder.profile())
    }

    /// Travel tables for a whole team.  Responders with identical speed
    /// profiles share one table.
    pub fn travel_tables(&self, responders: &[Responder]) -> NavResult<TravelTables> {
        let mut tables: Vec<TravelTable> = Vec::new();
        let mut of_responder = Vec::with_capacity(responders.len());
        for responder in responders {
            responder.validate()?;
            self.start_of(responder)?;
            let profile = responder.profile();
            let slot = match tables.iter().position(|t| t.profile() == profile) {
                Some(slot) => slot,
                None => {
                    tables.push(self.table_for(profile)?);
                    tables.len() - 1
                }
            };
            of_responder.push(slot);
        }
        debug!(responders = responders.len(), profiles = tables.len(), "computed travel tables");
        Ok(TravelTables::new(tables, of_responder))
    }
}
