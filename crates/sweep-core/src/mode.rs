//! Waypoint kinds and edge traversal modes shared by the graph and
//! navigation crates.

/// What a navigation waypoint physically is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaypointKind {
    /// The centre of a room, where the room check happens.
    RoomCenter,
    /// A room's doorway; the only way in or out of a room centre.
    Door,
    /// A point on a corridor (ends, junctions, attachment points).
    CorridorPoint,
    /// One floor's landing of a stairwell.
    StairLanding,
    /// A building exit; responders start here.
    Exit,
}

impl WaypointKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WaypointKind::RoomCenter    => "room_center",
            WaypointKind::Door          => "door",
            WaypointKind::CorridorPoint => "corridor_point",
            WaypointKind::StairLanding  => "stair_landing",
            WaypointKind::Exit          => "exit",
        }
    }
}

impl std::fmt::Display for WaypointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The physical nature of a directed edge, which selects the speed used to
/// turn its length into a traversal time.
///
/// Stair edges are direction-dependent: the same flight is stored as a
/// `StairUp` edge from the lower landing and a `StairDown` edge from the
/// upper one.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraversalMode {
    /// Level walking (rooms, doors, corridors, exits).
    #[default]
    Flat,
    /// Climbing one stair flight.
    StairUp,
    /// Descending one stair flight.
    StairDown,
}

impl TraversalMode {
    #[inline]
    pub fn is_stair(self) -> bool {
        !matches!(self, TraversalMode::Flat)
    }

    /// Label for CSV columns and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            TraversalMode::Flat      => "flat",
            TraversalMode::StairUp   => "stair_up",
            TraversalMode::StairDown => "stair_down",
        }
    }
}

impl std::fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
