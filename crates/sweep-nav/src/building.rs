//! The building entity model: rooms, corridors, stairs, exits and the
//! connections between them.
//!
//! Entities are addressed by string id.  Rooms are additionally addressed by
//! [`RoomId`], which is their index in [`Building::rooms`]; every assignment
//! and result in the downstream crates uses that index.

use std::collections::BTreeSet;

use sweep_core::{Point, RoomId};

/// Default room area in square metres.
pub const DEFAULT_ROOM_AREA_M2: f32 = 16.0;

/// Default corridor width in metres.
pub const DEFAULT_CORRIDOR_WIDTH_M: f32 = 2.0;

/// Default length of one stair flight between consecutive floors, in metres.
pub const DEFAULT_FLIGHT_LENGTH_M: f32 = 4.0;

// ── Entities ──────────────────────────────────────────────────────────────────

/// A room to be swept.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub id:               String,
    pub floor:            i32,
    pub area_m2:          f32,
    pub position:         Point,
    /// Higher tiers should be visited no later than lower ones.
    pub priority:         u8,
    /// Informational only; not used by any strategy.
    pub occupancy:        u32,
    /// Multiplier on the area-dependent part of the check time.
    pub check_complexity: f32,
    pub room_type:        String,
}

impl Room {
    /// A 16 m² office on `floor` with priority 1.
    pub fn new(id: impl Into<String>, floor: i32, position: Point) -> Self {
        Self {
            id: id.into(),
            floor,
            area_m2: DEFAULT_ROOM_AREA_M2,
            position,
            priority: 1,
            occupancy: 0,
            check_complexity: 1.0,
            room_type: "office".to_string(),
        }
    }

    pub fn with_area(mut self, area_m2: f32) -> Self {
        self.area_m2 = area_m2;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_complexity(mut self, check_complexity: f32) -> Self {
        self.check_complexity = check_complexity;
        self
    }

    pub fn with_occupancy(mut self, occupancy: u32) -> Self {
        self.occupancy = occupancy;
        self
    }

    /// Side of the square with this room's area.
    #[inline]
    pub fn side_m(&self) -> f32 {
        self.area_m2.max(0.0).sqrt()
    }
}

/// A straight corridor segment on one floor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Corridor {
    pub id:      String,
    pub floor:   i32,
    pub start:   Point,
    pub end:     Point,
    pub width_m: f32,
}

impl Corridor {
    pub fn new(id: impl Into<String>, floor: i32, start: Point, end: Point) -> Self {
        Self { id: id.into(), floor, start, end, width_m: DEFAULT_CORRIDOR_WIDTH_M }
    }

    #[inline]
    pub fn length_m(&self) -> f32 {
        self.start.distance_m(self.end)
    }

    /// Point at parameter `t ∈ [0, 1]` along the corridor.
    #[inline]
    pub fn at(&self, t: f32) -> Point {
        self.start.lerp(self.end, t)
    }
}

/// A stairwell with one landing on each floor it serves.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stair {
    pub id:              String,
    pub position:        Point,
    /// Floors served, in any order; landings are linked in ascending order.
    pub floors:          Vec<i32>,
    pub flight_length_m: f32,
}

impl Stair {
    pub fn new(id: impl Into<String>, position: Point, floors: impl Into<Vec<i32>>) -> Self {
        Self {
            id: id.into(),
            position,
            floors: floors.into(),
            flight_length_m: DEFAULT_FLIGHT_LENGTH_M,
        }
    }

    /// Waypoint label of this stair's landing on `floor`.
    pub fn landing_label(&self, floor: i32) -> String {
        format!("{}_F{}", self.id, floor)
    }

    /// Served floors, ascending and deduplicated.
    pub fn sorted_floors(&self) -> Vec<i32> {
        self.floors.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
    }

    pub fn serves(&self, floor: i32) -> bool {
        self.floors.contains(&floor)
    }
}

/// A building exit; responders start at exits.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exit {
    pub id:       String,
    pub floor:    i32,
    pub position: Point,
}

impl Exit {
    pub fn new(id: impl Into<String>, floor: i32, position: Point) -> Self {
        Self { id: id.into(), floor, position }
    }
}

/// A walkable link between two entities.
///
/// `from`/`to` name a room, corridor, exit, stair landing
/// (`"<stair>_F<floor>"`), or a bare stair id when the stair has a landing
/// on the other endpoint's floor.  Without an explicit distance the
/// straight-line distance between the two attachment points is used.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    pub from:       String,
    pub to:         String,
    pub distance_m: Option<f32>,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance_m: f32) -> Self {
        Self { from: from.into(), to: to.into(), distance_m: Some(distance_m) }
    }

    pub fn euclidean(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { from: from.into(), to: to.into(), distance_m: None }
    }
}

// ── Building ──────────────────────────────────────────────────────────────────

/// A complete building description.
///
/// This is plain data; nothing is validated until
/// [`Navigator::build`](crate::Navigator::build).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    pub name:        String,
    pub rooms:       Vec<Room>,
    pub corridors:   Vec<Corridor>,
    pub stairs:      Vec<Stair>,
    pub exits:       Vec<Exit>,
    pub connections: Vec<Connection>,
}

impl Building {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Add a room and return its `RoomId`.
    pub fn add_room(&mut self, room: Room) -> RoomId {
        let id = RoomId(self.rooms.len() as u32);
        self.rooms.push(room);
        id
    }

    pub fn add_corridor(&mut self, corridor: Corridor) {
        self.corridors.push(corridor);
    }

    pub fn add_stair(&mut self, stair: Stair) {
        self.stairs.push(stair);
    }

    pub fn add_exit(&mut self, exit: Exit) {
        self.exits.push(exit);
    }

    pub fn connect(&mut self, connection: Connection) {
        self.connections.push(connection);
    }

    /// Remove every connection touching `id`.  Returns how many were removed.
    pub fn disconnect(&mut self, id: &str) -> usize {
        let before = self.connections.len();
        self.connections.retain(|c| c.from != id && c.to != id);
        before - self.connections.len()
    }

    /// One floor, `rooms_per_side` rooms on each side of a straight
    /// north–south corridor, and an exit at each corridor end.
    ///
    /// The west rooms are `R1..=Rn` at x = 5, the east rooms continue the
    /// numbering at x = 25, evenly spaced along the corridor at x = 15.  Each
    /// room is 12 m of walking from the corridor; the exits sit on the
    /// corridor ends at distance 0.
    pub fn two_sided_corridor(rooms_per_side: usize, corridor_length_m: f32, room_area_m2: f32) -> Self {
        const CORRIDOR_X: f32 = 15.0;
        let mut b = Building::new("Two-sided corridor");
        let spacing = corridor_length_m / (rooms_per_side as f32 + 1.0);
        for (side, x) in [5.0f32, 25.0].into_iter().enumerate() {
            for i in 0..rooms_per_side {
                let n = side * rooms_per_side + i + 1;
                let y = spacing * (i as f32 + 1.0);
                b.add_room(Room::new(format!("R{n}"), 1, Point::new(x, y)).with_area(room_area_m2));
            }
        }
        b.add_corridor(Corridor::new(
            "C_main",
            1,
            Point::new(CORRIDOR_X, 0.0),
            Point::new(CORRIDOR_X, corridor_length_m),
        ));
        b.add_exit(Exit::new("E1", 1, Point::new(CORRIDOR_X, 0.0)));
        b.add_exit(Exit::new("E2", 1, Point::new(CORRIDOR_X, corridor_length_m)));
        let links: Vec<Connection> = b
            .rooms
            .iter()
            .map(|r| Connection::new(r.id.clone(), "C_main", (r.position.x - CORRIDOR_X).abs() + 2.0))
            .collect();
        b.connections.extend(links);
        b.connect(Connection::new("C_main", "E1", 0.0));
        b.connect(Connection::new("C_main", "E2", 0.0));
        b
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.index())
    }

    pub fn room_id(&self, label: &str) -> Option<RoomId> {
        self.rooms
            .iter()
            .position(|r| r.id == label)
            .map(|i| RoomId(i as u32))
    }

    /// All room ids in ascending order.
    pub fn room_ids(&self) -> impl Iterator<Item = RoomId> + '_ {
        (0..self.rooms.len()).map(|i| RoomId(i as u32))
    }

    /// Every floor that holds a room, corridor or exit, ascending.
    pub fn floors(&self) -> Vec<i32> {
        let mut floors = BTreeSet::new();
        floors.extend(self.rooms.iter().map(|r| r.floor));
        floors.extend(self.corridors.iter().map(|c| c.floor));
        floors.extend(self.exits.iter().map(|e| e.floor));
        floors.into_iter().collect()
    }

    pub fn floor_count(&self) -> usize {
        self.floors().len()
    }

    /// Distinct priority tiers present, highest first.
    pub fn priority_tiers(&self) -> Vec<u8> {
        let tiers: BTreeSet<u8> = self.rooms.iter().map(|r| r.priority).collect();
        tiers.into_iter().rev().collect()
    }
}
