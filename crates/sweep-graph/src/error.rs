//! Graph-subsystem error type.

use thiserror::Error;

use sweep_core::WaypointId;

/// Errors produced by `sweep-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: WaypointId, to: WaypointId },

    #[error("waypoint {0} not found in graph")]
    WaypointNotFound(WaypointId),

    #[error("waypoint label {0:?} is used more than once")]
    DuplicateWaypoint(String),

    #[error("edge {from} -> {to} has invalid length {length_m}")]
    InvalidLength {
        from:     WaypointId,
        to:       WaypointId,
        length_m: f32,
    },

    #[error("edge {from:?} -> {to:?} enters a room centre without passing through a door")]
    RoomShortcut { from: String, to: String },
}

pub type GraphResult<T> = Result<T, GraphError>;
