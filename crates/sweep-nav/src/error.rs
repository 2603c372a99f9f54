use sweep_graph::GraphError;
use thiserror::Error;

/// Input errors found while laying out a building, plus routing failures.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("building has no rooms")]
    NoRooms,

    #[error("building has no exits")]
    NoExits,

    #[error("id {0:?} is used by more than one entity")]
    DuplicateId(String),

    #[error("connection references unknown entity {0:?}")]
    UnknownEntity(String),

    #[error("stair {stair:?} has no landing on floor {floor}")]
    NoLanding { stair: String, floor: i32 },

    #[error("rooms {from:?} and {to:?} cannot be connected directly")]
    RoomShortcut { from: String, to: String },

    #[error("connection {from:?} -> {to:?} joins two floors without a stair")]
    CrossFloorConnection { from: String, to: String },

    #[error("stair {0:?} is connected to another bare stair; name a landing instead")]
    AmbiguousLanding(String),

    #[error("no stair connects floor {lower} to floor {upper}")]
    DisconnectedFloors { lower: i32, upper: i32 },

    #[error("waypoint {0:?} is unreachable from every exit")]
    Unreachable(String),

    #[error("{entity}: invalid {field} {value}")]
    InvalidValue {
        entity: String,
        field:  &'static str,
        value:  f32,
    },

    #[error("responder {responder:?} starts at {start:?}, which is not an exit")]
    NotAnExit { responder: String, start: String },

    #[error("routing failed: {0}")]
    Graph(#[from] GraphError),
}

pub type NavResult<T> = Result<T, NavError>;
