//! Responders and their movement cost profile.

use sweep_core::{EdgeId, SimTime, TraversalMode};
use sweep_graph::{BuildingGraph, EdgeCost};

use crate::building::Room;
use crate::{NavError, NavResult};

pub const DEFAULT_WALK_SPEED:       f32 = 1.5;
pub const DEFAULT_STAIR_UP_SPEED:   f32 = 0.4;
pub const DEFAULT_STAIR_DOWN_SPEED: f32 = 0.7;
pub const DEFAULT_CHECK_RATE:       f32 = 1.0;
pub const DEFAULT_BASE_CHECK_SECS:  f32 = 10.0;

/// A member of the sweep team.  Stateless between runs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Responder {
    pub id:               String,
    /// Exit id the responder enters from.
    pub start:            String,
    /// Level walking speed, m/s.
    pub walk_speed:       f32,
    pub stair_up_speed:   f32,
    pub stair_down_speed: f32,
    /// Seconds of check time per m² of (complexity-weighted) room area.
    pub check_rate:       f32,
    /// Fixed seconds spent on every room regardless of size.
    pub base_check_secs:  f32,
}

impl Responder {
    /// A responder with default speeds and check parameters.
    pub fn new(id: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            id:               id.into(),
            start:            start.into(),
            walk_speed:       DEFAULT_WALK_SPEED,
            stair_up_speed:   DEFAULT_STAIR_UP_SPEED,
            stair_down_speed: DEFAULT_STAIR_DOWN_SPEED,
            check_rate:       DEFAULT_CHECK_RATE,
            base_check_secs:  DEFAULT_BASE_CHECK_SECS,
        }
    }

    pub fn with_speeds(mut self, walk: f32, stair_up: f32, stair_down: f32) -> Self {
        self.walk_speed = walk;
        self.stair_up_speed = stair_up;
        self.stair_down_speed = stair_down;
        self
    }

    pub fn with_check(mut self, base_check_secs: f32, check_rate: f32) -> Self {
        self.base_check_secs = base_check_secs;
        self.check_rate = check_rate;
        self
    }

    /// The speeds that determine this responder's travel costs.
    pub fn profile(&self) -> SpeedProfile {
        SpeedProfile {
            walk:       self.walk_speed,
            stair_up:   self.stair_up_speed,
            stair_down: self.stair_down_speed,
        }
    }

    /// Time to check `room`: base + rate × area × complexity.
    pub fn check_time(&self, room: &Room) -> SimTime {
        let secs = self.base_check_secs as f64
            + self.check_rate as f64 * room.area_m2 as f64 * room.check_complexity as f64;
        SimTime::from_secs_f64(secs)
    }

    /// Reject non-positive speeds and negative check parameters.
    pub fn validate(&self) -> NavResult<()> {
        let speeds = [
            ("walk_speed", self.walk_speed),
            ("stair_up_speed", self.stair_up_speed),
            ("stair_down_speed", self.stair_down_speed),
        ];
        for (field, value) in speeds {
            if !value.is_finite() || value <= 0.0 {
                return Err(NavError::InvalidValue { entity: self.id.clone(), field, value });
            }
        }
        let check = [("check_rate", self.check_rate), ("base_check_secs", self.base_check_secs)];
        for (field, value) in check {
            if !value.is_finite() || value < 0.0 {
                return Err(NavError::InvalidValue { entity: self.id.clone(), field, value });
            }
        }
        Ok(())
    }
}

// ── SpeedProfile ──────────────────────────────────────────────────────────────

/// Per-mode speeds in m/s.  Prices graph edges in **milliseconds**.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpeedProfile {
    pub walk:       f32,
    pub stair_up:   f32,
    pub stair_down: f32,
}

impl SpeedProfile {
    #[inline]
    pub fn speed(&self, mode: TraversalMode) -> f32 {
        match mode {
            TraversalMode::Flat      => self.walk,
            TraversalMode::StairUp   => self.stair_up,
            TraversalMode::StairDown => self.stair_down,
        }
    }
}

impl EdgeCost for SpeedProfile {
    #[inline]
    fn edge_cost(&self, graph: &BuildingGraph, edge: EdgeId) -> u64 {
        let len = graph.edge_length_m[edge.index()] as f64;
        let speed = self.speed(graph.edge_mode[edge.index()]) as f64;
        SimTime::from_secs_f64(len / speed).as_millis()
    }
}
