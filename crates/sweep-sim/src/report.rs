//! The outcome of one replay.

use sweep_core::{ResponderId, RoomId, SimTime, WaypointId};

use crate::event::Event;

/// One responder's part of the sweep.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponderReport {
    pub responder:  ResponderId,
    /// The responder's string id.
    pub label:      String,
    pub rooms:      Vec<RoomId>,
    /// Every waypoint walked through, starting at the entry exit.
    pub path:       Vec<WaypointId>,
    pub timeline:   Vec<Event>,
    /// Completion time under the configured clearance policy.
    pub total_time: SimTime,
    pub distance_m: f32,
}

impl ResponderReport {
    pub fn rooms_checked(&self) -> usize {
        self.rooms.len()
    }
}

/// When a room was confirmed clear and by whom.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomClearance {
    pub room:       RoomId,
    pub cleared_at: SimTime,
    pub cleared_by: ResponderId,
}

/// Aggregate statistics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// Mean room clearance time in seconds.
    pub average_clearance_secs: f64,
    /// Shortest over longest responder time; 1.0 when nobody moves.
    pub load_balance:           f64,
    pub total_distance_m:       f64,
    pub priority_inversions:    usize,
    pub responder_count:        usize,
    pub room_count:             usize,
}

/// Full result of replaying an assignment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepReport {
    /// Latest responder completion time.
    pub total_time: SimTime,
    /// `false` only if a configured time bound was exceeded.
    pub success:    bool,
    pub responders: Vec<ResponderReport>,
    /// Indexed by `RoomId`.
    pub rooms:      Vec<RoomClearance>,
    pub metrics:    Metrics,
}

impl SweepReport {
    pub fn clearance(&self, room: RoomId) -> Option<&RoomClearance> {
        self.rooms.get(room.index())
    }

    pub fn responder(&self, responder: ResponderId) -> Option<&ResponderReport> {
        self.responders.get(responder.index())
    }
}
