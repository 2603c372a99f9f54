use sweep_core::RoomId;
use sweep_nav::NavError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("the team has no responders")]
    NoResponders,

    #[error("assignment has {got} routes but the team has {expected} responders")]
    ResponderCountMismatch { expected: usize, got: usize },

    #[error("assignment references unknown room {0}")]
    UnknownRoom(RoomId),

    #[error("room {0} is assigned more than once")]
    DuplicateRoom(RoomId),

    #[error("room {0} is not assigned to any responder")]
    MissingRoom(RoomId),

    #[error("responder {responder:?} cannot reach {to:?}")]
    NoRoute { responder: String, to: String },

    #[error("navigation error: {0}")]
    Nav(#[from] NavError),
}

pub type SimResult<T> = Result<T, SimError>;
