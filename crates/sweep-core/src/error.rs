//! Shared error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `SweepError` via `From` impls or wrap it as one variant.

use thiserror::Error;

use crate::{ResponderId, RoomId, WaypointId};

/// The common base error for `sweep-*` crates.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error("responder {0} not found")]
    ResponderNotFound(ResponderId),

    #[error("waypoint {0} not found")]
    WaypointNotFound(WaypointId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `sweep-core`.
pub type SweepResult<T> = Result<T, SweepError>;
