//! Timeline events.

use sweep_core::{ResponderId, RoomId, SimTime, WaypointId};

/// What a responder did at an instant.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Left `location` for the next room (or the exit).
    Depart,
    /// Reached a room centre.
    Arrive,
    CheckStart,
    CheckComplete,
    /// Reached an exit after the last room.
    ReturnToExit,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Depart        => "depart",
            Action::Arrive        => "arrive",
            Action::CheckStart    => "check_start",
            Action::CheckComplete => "check_complete",
            Action::ReturnToExit  => "return_to_exit",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub time:      SimTime,
    pub responder: ResponderId,
    pub action:    Action,
    pub location:  WaypointId,
    /// The room involved, if any.
    pub room:      Option<RoomId>,
}
