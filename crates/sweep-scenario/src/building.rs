//! JSON building loader.
//!
//! # JSON format
//!
//! ```json
//! {
//!   "name": "Office",
//!   "rooms": [
//!     { "id": "R1", "position": { "x": 5, "y": 7.5 }, "area": 16, "priority": 2 }
//!   ],
//!   "corridors": [
//!     { "id": "C_main", "start": [15, 0], "end": [15, 30] }
//!   ],
//!   "stairs": [
//!     { "id": "S1", "position": [15, 30], "connects": [1, 2] }
//!   ],
//!   "exits": [
//!     { "id": "E1", "position": [15, 0] }
//!   ],
//!   "connections": [
//!     { "from": "R1", "to": "C_main", "distance": 12 },
//!     { "from": "C_main", "to": "E1" }
//!   ]
//! }
//! ```
//!
//! The object may also be wrapped as `{ "building": { ... } }`.  Positions
//! are either `{ "x": .., "y": .. }` or `[x, y]`.
//!
//! | Field                      | Default    |
//! |----------------------------|------------|
//! | `floor`                    | `1`        |
//! | room `area`                | `16` m²    |
//! | room `priority`            | `1`        |
//! | room `check_complexity`    | `1.0`      |
//! | room `occupancy`           | `0`        |
//! | room `type`                | `"office"` |
//! | corridor `width`           | `2` m      |
//! | stair `flight_length`      | `4` m      |
//! | connection `distance`      | straight-line distance |
//!
//! Stairs list their floors under `connects` (or `floors`).  Nothing beyond
//! the JSON shape is checked here; [`Navigator::build`](sweep_nav::Navigator::build)
//! validates the layout.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use sweep_core::Point;
use sweep_nav::{Building, Connection, Corridor, Exit, Room, Stair};
use sweep_nav::building::{DEFAULT_CORRIDOR_WIDTH_M, DEFAULT_FLIGHT_LENGTH_M, DEFAULT_ROOM_AREA_M2};

use crate::{ScenarioError, ScenarioResult};

// ── JSON records ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Clone, Copy)]
#[serde(untagged)]
pub(crate) enum PositionRecord {
    Object { x: f32, y: f32 },
    Pair([f32; 2]),
}

impl From<PositionRecord> for Point {
    fn from(p: PositionRecord) -> Point {
        match p {
            PositionRecord::Object { x, y } => Point::new(x, y),
            PositionRecord::Pair([x, y])    => Point::new(x, y),
        }
    }
}

fn first_floor() -> i32 { 1 }
fn default_area() -> f32 { DEFAULT_ROOM_AREA_M2 }
fn default_priority() -> u8 { 1 }
fn default_complexity() -> f32 { 1.0 }
fn default_width() -> f32 { DEFAULT_CORRIDOR_WIDTH_M }
fn default_flight() -> f32 { DEFAULT_FLIGHT_LENGTH_M }
fn default_name() -> String { "Building".to_string() }

#[derive(Deserialize)]
struct RoomRecord {
    id:               String,
    position:         PositionRecord,
    #[serde(default = "first_floor")]
    floor:            i32,
    #[serde(default = "default_area")]
    area:             f32,
    #[serde(default = "default_priority")]
    priority:         u8,
    #[serde(default)]
    occupancy:        u32,
    #[serde(default = "default_complexity")]
    check_complexity: f32,
    #[serde(rename = "type", default)]
    room_type:        Option<String>,
}

#[derive(Deserialize)]
struct CorridorRecord {
    id:    String,
    start: PositionRecord,
    end:   PositionRecord,
    #[serde(default = "first_floor")]
    floor: i32,
    #[serde(default = "default_width")]
    width: f32,
}

#[derive(Deserialize)]
struct StairRecord {
    id:            String,
    position:      PositionRecord,
    #[serde(alias = "floors")]
    connects:      Vec<i32>,
    #[serde(default = "default_flight")]
    flight_length: f32,
}

#[derive(Deserialize)]
struct ExitRecord {
    id:       String,
    position: PositionRecord,
    #[serde(default = "first_floor")]
    floor:    i32,
}

#[derive(Deserialize)]
struct ConnectionRecord {
    from:     String,
    to:       String,
    #[serde(default)]
    distance: Option<f32>,
}

#[derive(Deserialize)]
pub(crate) struct BuildingRecord {
    #[serde(default = "default_name")]
    name:        String,
    #[serde(default)]
    rooms:       Vec<RoomRecord>,
    #[serde(default)]
    corridors:   Vec<CorridorRecord>,
    #[serde(default)]
    stairs:      Vec<StairRecord>,
    #[serde(default)]
    exits:       Vec<ExitRecord>,
    #[serde(default)]
    connections: Vec<ConnectionRecord>,
}

impl BuildingRecord {
    pub(crate) fn into_building(self) -> Building {
        let mut b = Building::new(self.name);
        for r in self.rooms {
            let mut room = Room::new(r.id, r.floor, r.position.into())
                .with_area(r.area)
                .with_priority(r.priority)
                .with_complexity(r.check_complexity)
                .with_occupancy(r.occupancy);
            if let Some(t) = r.room_type {
                room.room_type = t;
            }
            b.add_room(room);
        }
        for c in self.corridors {
            let mut corridor = Corridor::new(c.id, c.floor, c.start.into(), c.end.into());
            corridor.width_m = c.width;
            b.add_corridor(corridor);
        }
        for s in self.stairs {
            let mut stair = Stair::new(s.id, s.position.into(), s.connects);
            stair.flight_length_m = s.flight_length;
            b.add_stair(stair);
        }
        for e in self.exits {
            b.add_exit(Exit::new(e.id, e.floor, e.position.into()));
        }
        for c in self.connections {
            b.connect(match c.distance {
                Some(d) => Connection::new(c.from, c.to, d),
                None    => Connection::euclidean(c.from, c.to),
            });
        }
        b
    }
}

/// Accept both a bare building object and `{ "building": { ... } }`.
pub(crate) fn unwrap_building(mut value: serde_json::Value) -> serde_json::Value {
    match value.as_object_mut().and_then(|o| o.remove("building")) {
        Some(inner) => inner,
        None        => value,
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Building`] from a JSON file.
pub fn load_building_json(path: &Path) -> ScenarioResult<Building> {
    let file = std::fs::File::open(path).map_err(ScenarioError::Io)?;
    load_building_reader(file)
}

/// Like [`load_building_json`] but accepts any `Read` source.
pub fn load_building_reader<R: Read>(reader: R) -> ScenarioResult<Building> {
    let value: serde_json::Value = serde_json::from_reader(reader)?;
    let record: BuildingRecord = serde_json::from_value(unwrap_building(value))?;
    let building = record.into_building();
    debug!(
        name = %building.name,
        rooms = building.rooms.len(),
        corridors = building.corridors.len(),
        stairs = building.stairs.len(),
        exits = building.exits.len(),
        "loaded building"
    );
    Ok(building)
}
