//! The `Simulator`: replays assignments against precomputed travel tables.
//!
//! # Timing model
//!
//! Responders are independent; nobody waits for anybody.  For each
//! responder the replay is a left fold over its room sequence:
//!
//! ```text
//! t = 0, pos = entry exit
//! for room in sequence:
//!     depart(pos) @ t
//!     t += travel(pos → room)          arrive(room)        @ t
//!                                      check_start(room)   @ t
//!     t += check_time(room)            check_complete(room) @ t
//!     pos = room
//! ReturnToExit policy:   t += travel(pos → nearest exit)  return_to_exit @ t
//! ```
//!
//! All durations are whole milliseconds, so the fold is exact and the same
//! assignment always produces the same report.

use tracing::debug;

use sweep_core::{ResponderId, RoomId, SimTime, WaypointId};
use sweep_nav::{Building, Navigator, Responder, TravelTable, TravelTables};

use crate::assignment::{route_inversions, Assignment};
use crate::config::{ClearancePolicy, SimConfig};
use crate::event::{Action, Event};
use crate::report::{Metrics, ResponderReport, RoomClearance, SweepReport};
use crate::{SimError, SimResult};

/// Cheap summary of an assignment, without timelines or paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// Latest responder completion time.
    pub total_time:          SimTime,
    /// Completion time per responder.
    pub responder_times:     Vec<SimTime>,
    pub priority_inversions: usize,
}

impl Evaluation {
    pub fn sum_time(&self) -> SimTime {
        self.responder_times.iter().copied().sum()
    }
}

/// Replays assignments for one building and team.
///
/// Construction computes the team's travel tables, entry waypoints and
/// per-room check times once; [`simulate`](Self::simulate) and
/// [`evaluate`](Self::evaluate) are then read-only and may be called from
/// several threads at once.
pub struct Simulator<'a> {
    building:    &'a Building,
    nav:         &'a Navigator,
    responders:  &'a [Responder],
    tables:      TravelTables,
    starts:      Vec<WaypointId>,
    /// `check_times[responder][room]`.
    check_times: Vec<Vec<SimTime>>,
    config:      SimConfig,
}

impl<'a> Simulator<'a> {
    pub fn new(
        building:   &'a Building,
        nav:        &'a Navigator,
        responders: &'a [Responder],
        config:     SimConfig,
    ) -> SimResult<Self> {
        if responders.is_empty() {
            return Err(SimError::NoResponders);
        }
        let tables = nav.travel_tables(responders)?;
        let starts = responders
            .iter()
            .map(|r| nav.start_of(r))
            .collect::<Result<Vec<_>, _>>()?;
        let check_times = responders
            .iter()
            .map(|r| building.rooms.iter().map(|room| r.check_time(room)).collect())
            .collect();

        debug!(
            responders = responders.len(),
            rooms = building.room_count(),
            policy = %config.policy,
            "simulator ready"
        );
        Ok(Self { building, nav, responders, tables, starts, check_times, config })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn building(&self) -> &'a Building {
        self.building
    }

    pub fn navigator(&self) -> &'a Navigator {
        self.nav
    }

    pub fn responders(&self) -> &'a [Responder] {
        self.responders
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn responder_count(&self) -> usize {
        self.responders.len()
    }

    pub fn room_count(&self) -> usize {
        self.building.room_count()
    }

    /// Entry exit of `responder`.
    #[inline]
    pub fn start(&self, responder: ResponderId) -> WaypointId {
        self.starts[responder.index()]
    }

    #[inline]
    pub fn table(&self, responder: ResponderId) -> &TravelTable {
        self.tables.for_responder(responder)
    }

    #[inline]
    pub fn check_time(&self, responder: ResponderId, room: RoomId) -> SimTime {
        self.check_times[responder.index()][room.index()]
    }

    #[inline]
    pub fn room_waypoint(&self, room: RoomId) -> WaypointId {
        self.nav.room_waypoint(room)
    }

    /// Travel time for `responder` from anchor `from` to `room`.
    pub fn travel_to_room(&self, responder: ResponderId, from: WaypointId, room: RoomId) -> SimResult<SimTime> {
        let to = self.room_waypoint(room);
        self.table(responder)
            .time(from, to)
            .ok_or_else(|| self.no_route(responder, to))
    }

    /// Travel plus check time for visiting `room` from `from`.
    #[inline]
    pub fn visit_cost(&self, responder: ResponderId, from: WaypointId, room: RoomId) -> SimResult<SimTime> {
        Ok(self.travel_to_room(responder, from, room)? + self.check_time(responder, room))
    }

    fn no_route(&self, responder: ResponderId, to: WaypointId) -> SimError {
        SimError::NoRoute {
            responder: self.responders[responder.index()].id.clone(),
            to:        self.nav.graph().label(to).to_string(),
        }
    }

    fn check_shape(&self, assignment: &Assignment) -> SimResult<()> {
        if assignment.responder_count() != self.responders.len() {
            return Err(SimError::ResponderCountMismatch {
                expected: self.responders.len(),
                got:      assignment.responder_count(),
            });
        }
        assignment.validate(self.room_count())
    }

    /// Exit and travel time for the return leg, if the policy has one.
    fn return_leg(&self, responder: ResponderId, pos: WaypointId) -> SimResult<Option<(WaypointId, SimTime)>> {
        match self.config.policy {
            ClearancePolicy::LastCheckComplete => Ok(None),
            ClearancePolicy::ReturnToExit => self
                .table(responder)
                .nearest_exit(pos)
                .map(Some)
                .ok_or_else(|| self.no_route(responder, pos)),
        }
    }

    // ── Replay ────────────────────────────────────────────────────────────

    /// Completion time of one responder's sequence.
    pub fn route_time(&self, responder: ResponderId, route: &[RoomId]) -> SimResult<SimTime> {
        let mut t = SimTime::ZERO;
        let mut pos = self.start(responder);
        for &room in route {
            t += self.visit_cost(responder, pos, room)?;
            pos = self.room_waypoint(room);
        }
        if !route.is_empty() {
            if let Some((_, back)) = self.return_leg(responder, pos)? {
                t += back;
            }
        }
        Ok(t)
    }

    /// Total, per-responder and priority figures for `assignment`, without
    /// building timelines.  Always agrees with [`simulate`](Self::simulate).
    pub fn evaluate(&self, assignment: &Assignment) -> SimResult<Evaluation> {
        self.check_shape(assignment)?;
        let responder_times = assignment
            .iter()
            .map(|(r, route)| self.route_time(r, route))
            .collect::<SimResult<Vec<_>>>()?;
        let total_time = responder_times.iter().copied().max().unwrap_or_default();
        let priority_inversions = assignment
            .routes()
            .iter()
            .map(|route| route_inversions(self.building, route))
            .sum();
        Ok(Evaluation { total_time, responder_times, priority_inversions })
    }

    /// Replay `assignment` in full: timelines, paths, clearance times and
    /// metrics.
    pub fn simulate(&self, assignment: &Assignment) -> SimResult<SweepReport> {
        self.check_shape(assignment)?;

        let mut clearance: Vec<Option<RoomClearance>> = vec![None; self.room_count()];
        let mut responders = Vec::with_capacity(self.responders.len());
        for (r, route) in assignment.iter() {
            responders.push(self.replay(r, route, &mut clearance)?);
        }
        let rooms: Vec<RoomClearance> = clearance.into_iter().flatten().collect();

        let total_time = responders.iter().map(|r| r.total_time).max().unwrap_or_default();
        let success = self.config.max_time.is_none_or(|max| total_time <= max);
        let metrics = self.metrics(assignment, &responders, &rooms);

        debug!(
            total = %total_time,
            success,
            load_balance = metrics.load_balance,
            "simulated sweep"
        );
        Ok(SweepReport { total_time, success, responders, rooms, metrics })
    }

    fn replay(
        &self,
        r:         ResponderId,
        route:     &[RoomId],
        clearance: &mut [Option<RoomClearance>],
    ) -> SimResult<ResponderReport> {
        let table = self.table(r);
        let graph = self.nav.graph();

        let mut t = SimTime::ZERO;
        let mut pos = self.start(r);
        let mut path = vec![pos];
        let mut timeline = Vec::with_capacity(route.len() * 4 + 2);
        let mut distance_m = 0.0f32;

        let event = |time, action, location, room| Event { time, responder: r, action, location, room };
        let mut walk = |from: WaypointId, to: WaypointId, path: &mut Vec<WaypointId>| -> SimResult<()> {
            let leg = table.path(graph, from, to).ok_or_else(|| self.no_route(r, to))?;
            path.extend_from_slice(&leg[1..]);
            distance_m += table.distance_m(from, to).unwrap_or_default();
            Ok(())
        };

        for &room in route {
            let target = self.room_waypoint(room);
            timeline.push(event(t, Action::Depart, pos, None));
            t += self.travel_to_room(r, pos, room)?;
            walk(pos, target, &mut path)?;
            timeline.push(event(t, Action::Arrive, target, Some(room)));
            timeline.push(event(t, Action::CheckStart, target, Some(room)));
            t += self.check_time(r, room);
            timeline.push(event(t, Action::CheckComplete, target, Some(room)));
            clearance[room.index()] = Some(RoomClearance { room, cleared_at: t, cleared_by: r });
            pos = target;
        }

        if !route.is_empty() {
            if let Some((exit, back)) = self.return_leg(r, pos)? {
                timeline.push(event(t, Action::Depart, pos, None));
                t += back;
                walk(pos, exit, &mut path)?;
                timeline.push(event(t, Action::ReturnToExit, exit, None));
            }
        }

        Ok(ResponderReport {
            responder: r,
            label: self.responders[r.index()].id.clone(),
            rooms: route.to_vec(),
            path,
            timeline,
            total_time: t,
            distance_m,
        })
    }

    fn metrics(&self, assignment: &Assignment, responders: &[ResponderReport], rooms: &[RoomClearance]) -> Metrics {
        let average_clearance_secs = if rooms.is_empty() {
            0.0
        } else {
            rooms.iter().map(|c| c.cleared_at.as_secs_f64()).sum::<f64>() / rooms.len() as f64
        };
        let longest = responders.iter().map(|r| r.total_time).max().unwrap_or_default();
        let shortest = responders.iter().map(|r| r.total_time).min().unwrap_or_default();
        let load_balance = if longest == SimTime::ZERO {
            1.0
        } else {
            shortest.as_secs_f64() / longest.as_secs_f64()
        };
        Metrics {
            average_clearance_secs,
            load_balance,
            total_distance_m: responders.iter().map(|r| r.distance_m as f64).sum(),
            priority_inversions: assignment.priority_inversions(self.building),
            responder_count: responders.len(),
            room_count: rooms.len(),
        }
    }
}

/// One-shot convenience: build a [`Simulator`] and replay `assignment`.
pub fn simulate(
    building:   &Building,
    nav:        &Navigator,
    responders: &[Responder],
    assignment: &Assignment,
    config:     &SimConfig,
) -> SimResult<SweepReport> {
    Simulator::new(building, nav, responders, config.clone())?.simulate(assignment)
}
