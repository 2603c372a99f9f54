//! Translating a [`Building`] into a waypoint graph.
//!
//! # Layout rules
//!
//! | Entity    | Waypoints                                                    |
//! |-----------|--------------------------------------------------------------|
//! | Room      | centre (label = room id) and door (`<room>/door`)            |
//! | Corridor  | both ends plus one point per attachment (`<corridor>#<n>`)   |
//! | Exit      | one exit waypoint (label = exit id)                          |
//! | Stair     | one landing per served floor (`<stair>_F<floor>`)            |
//!
//! A room's centre is joined only to its own door.  The centre–door edge is
//! half the room's side, capped at the shortest connection distance; each
//! connection then runs from the door for the remaining distance.  Corridor
//! attachment points are the projections of the connected entity onto the
//! corridor segment; points closer than 1 cm are merged.  Consecutive
//! landings of a stair are joined by one flight (up and down edges).

use std::collections::HashMap;

use tracing::debug;

use sweep_core::{Point, WaypointId, WaypointKind};
use sweep_graph::{BuildingGraph, BuildingGraphBuilder};

use crate::building::{Building, Corridor};
use crate::{NavError, NavResult};

/// Corridor attachment points closer than this (metres) share a waypoint.
const MERGE_TOLERANCE_M: f32 = 0.01;

/// The laid-out graph plus the waypoints the rest of the crate addresses.
pub(crate) struct Layout {
    pub graph: BuildingGraph,
    /// Room centre per `RoomId`.
    pub rooms: Vec<WaypointId>,
    /// Exit waypoint per building exit, in building order.
    pub exits: Vec<WaypointId>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Entity {
    Room(usize),
    Corridor(usize),
    Exit(usize),
    Stair(usize),
    Landing(usize, i32),
}

/// Where a connection touches one of its endpoints.
#[derive(Copy, Clone, Debug)]
enum Attach {
    Room(usize),
    Exit(usize),
    Landing(usize, i32),
    /// Parameter `t ∈ [0, 1]` along a corridor.
    Corridor(usize, f32),
}

struct Link {
    a:          Attach,
    b:          Attach,
    distance_m: f32,
}

pub(crate) fn lay_out(building: &Building) -> NavResult<Layout> {
    if building.rooms.is_empty() {
        return Err(NavError::NoRooms);
    }
    if building.exits.is_empty() {
        return Err(NavError::NoExits);
    }
    check_values(building)?;
    let index = index_entities(building)?;
    check_floors(building)?;
    let links = resolve_links(building, &index)?;

    let mut b = BuildingGraphBuilder::new();

    // ── Waypoints ─────────────────────────────────────────────────────────
    let rooms: Vec<WaypointId> = building
        .rooms
        .iter()
        .map(|r| b.add_waypoint(r.id.as_str(), r.floor, r.position, WaypointKind::RoomCenter))
        .collect();
    let doors: Vec<WaypointId> = building
        .rooms
        .iter()
        .map(|r| b.add_waypoint(format!("{}/door", r.id), r.floor, r.position, WaypointKind::Door))
        .collect();
    let exits: Vec<WaypointId> = building
        .exits
        .iter()
        .map(|e| b.add_waypoint(e.id.as_str(), e.floor, e.position, WaypointKind::Exit))
        .collect();

    let mut landings: HashMap<(usize, i32), WaypointId> = HashMap::new();
    for (s, stair) in building.stairs.iter().enumerate() {
        let floors = stair.sorted_floors();
        for &floor in &floors {
            let w = b.add_waypoint(
                stair.landing_label(floor),
                floor,
                stair.position,
                WaypointKind::StairLanding,
            );
            landings.insert((s, floor), w);
        }
        for pair in floors.windows(2) {
            b.add_stair_flight(landings[&(s, pair[0])], landings[&(s, pair[1])], stair.flight_length_m);
        }
    }

    // Corridor points: ends plus every attachment, merged.
    let mut stops: Vec<Vec<f32>> = vec![vec![0.0, 1.0]; building.corridors.len()];
    for link in &links {
        for attach in [link.a, link.b] {
            if let Attach::Corridor(c, t) = attach {
                stops[c].push(t);
            }
        }
    }
    let mut corridor_points: Vec<Vec<(f32, WaypointId)>> = Vec::with_capacity(stops.len());
    let mut corridor_point_count = 0usize;
    for (c, corridor) in building.corridors.iter().enumerate() {
        let merged = merge_stops(std::mem::take(&mut stops[c]), corridor.length_m());
        let mut points = Vec::with_capacity(merged.len());
        for (n, t) in merged.into_iter().enumerate() {
            let w = b.add_waypoint(
                format!("{}#{}", corridor.id, n),
                corridor.floor,
                corridor.at(t),
                WaypointKind::CorridorPoint,
            );
            points.push((t, w));
        }
        for pair in points.windows(2) {
            let len = corridor.at(pair[0].0).distance_m(corridor.at(pair[1].0));
            b.add_walkway(pair[0].1, pair[1].1, len);
        }
        corridor_point_count += points.len();
        corridor_points.push(points);
    }

    // ── Room centre to door ───────────────────────────────────────────────
    let mut centre_to_door: Vec<f32> = building.rooms.iter().map(|r| r.side_m() / 2.0).collect();
    for link in &links {
        for attach in [link.a, link.b] {
            if let Attach::Room(r) = attach {
                centre_to_door[r] = centre_to_door[r].min(link.distance_m);
            }
        }
    }
    for (r, &len) in centre_to_door.iter().enumerate() {
        b.add_walkway(rooms[r], doors[r], len);
    }

    // ── Connections ───────────────────────────────────────────────────────
    let waypoint_of = |attach: Attach| -> WaypointId {
        match attach {
            Attach::Room(r)       => doors[r],
            Attach::Exit(e)       => exits[e],
            Attach::Landing(s, f) => landings[&(s, f)],
            Attach::Corridor(c, t) => nearest_point(&corridor_points[c], t),
        }
    };
    for link in &links {
        let (wa, wb) = (waypoint_of(link.a), waypoint_of(link.b));
        if wa == wb {
            continue;
        }
        let mut len = link.distance_m;
        for attach in [link.a, link.b] {
            if let Attach::Room(r) = attach {
                len -= centre_to_door[r];
            }
        }
        b.add_walkway(wa, wb, len.max(0.0));
    }

    let graph = b.build()?;

    // ── Reachability ──────────────────────────────────────────────────────
    let seen = graph.reachable_from(&exits);
    if let Some(i) = seen.iter().position(|&s| !s) {
        return Err(NavError::Unreachable(graph.node_label[i].clone()));
    }

    debug!(
        rooms = rooms.len(),
        exits = exits.len(),
        landings = landings.len(),
        corridor_points = corridor_point_count,
        connections = links.len(),
        "laid out building"
    );

    Ok(Layout { graph, rooms, exits })
}

// ── Validation ────────────────────────────────────────────────────────────────

fn check_values(building: &Building) -> NavResult<()> {
    let invalid = |entity: &str, field: &'static str, value: f32| NavError::InvalidValue {
        entity: entity.to_string(),
        field,
        value,
    };
    for room in &building.rooms {
        if !room.area_m2.is_finite() || room.area_m2 <= 0.0 {
            return Err(invalid(&room.id, "area_m2", room.area_m2));
        }
        if !room.check_complexity.is_finite() || room.check_complexity < 0.0 {
            return Err(invalid(&room.id, "check_complexity", room.check_complexity));
        }
    }
    for stair in &building.stairs {
        if !stair.flight_length_m.is_finite() || stair.flight_length_m < 0.0 {
            return Err(invalid(&stair.id, "flight_length_m", stair.flight_length_m));
        }
    }
    for conn in &building.connections {
        if let Some(d) = conn.distance_m {
            if !d.is_finite() || d < 0.0 {
                return Err(invalid(&format!("{}->{}", conn.from, conn.to), "distance_m", d));
            }
        }
    }
    Ok(())
}

fn index_entities(building: &Building) -> NavResult<HashMap<String, Entity>> {
    let mut index = HashMap::new();
    let mut insert = |id: String, entity: Entity| -> NavResult<()> {
        if index.insert(id.clone(), entity).is_some() {
            return Err(NavError::DuplicateId(id));
        }
        Ok(())
    };
    for (i, r) in building.rooms.iter().enumerate() {
        insert(r.id.clone(), Entity::Room(i))?;
    }
    for (i, c) in building.corridors.iter().enumerate() {
        insert(c.id.clone(), Entity::Corridor(i))?;
    }
    for (i, e) in building.exits.iter().enumerate() {
        insert(e.id.clone(), Entity::Exit(i))?;
    }
    for (i, s) in building.stairs.iter().enumerate() {
        insert(s.id.clone(), Entity::Stair(i))?;
        for floor in s.sorted_floors() {
            insert(s.landing_label(floor), Entity::Landing(i, floor))?;
        }
    }
    Ok(index)
}

/// Every pair of consecutive floors in use must share a stair.
fn check_floors(building: &Building) -> NavResult<()> {
    for pair in building.floors().windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        let joined = building.stairs.iter().any(|s| s.serves(lower) && s.serves(upper));
        if !joined {
            return Err(NavError::DisconnectedFloors { lower, upper });
        }
    }
    Ok(())
}

// ── Connection resolution ─────────────────────────────────────────────────────

fn resolve_links(building: &Building, index: &HashMap<String, Entity>) -> NavResult<Vec<Link>> {
    let lookup = |id: &str| -> NavResult<Entity> {
        index.get(id).copied().ok_or_else(|| NavError::UnknownEntity(id.to_string()))
    };

    let mut links = Vec::with_capacity(building.connections.len());
    for conn in &building.connections {
        let a = lookup(&conn.from)?;
        let b = lookup(&conn.to)?;
        if let (Entity::Room(_), Entity::Room(_)) = (a, b) {
            return Err(NavError::RoomShortcut { from: conn.from.clone(), to: conn.to.clone() });
        }

        let (at_a, floor_a) = attach(building, a, b, &conn.from)?;
        let (at_b, floor_b) = attach(building, b, a, &conn.to)?;
        if floor_a != floor_b {
            return Err(NavError::CrossFloorConnection { from: conn.from.clone(), to: conn.to.clone() });
        }
        let distance_m = match conn.distance_m {
            Some(d) => d,
            None => position(building, at_a).distance_m(position(building, at_b)),
        };
        links.push(Link { a: at_a, b: at_b, distance_m });
    }
    Ok(links)
}

/// Floor of a connection endpoint.  A bare stair has none of its own.
fn floor_of(building: &Building, entity: Entity) -> Option<i32> {
    match entity {
        Entity::Room(i)       => Some(building.rooms[i].floor),
        Entity::Corridor(i)   => Some(building.corridors[i].floor),
        Entity::Exit(i)       => Some(building.exits[i].floor),
        Entity::Landing(_, f) => Some(f),
        Entity::Stair(_)      => None,
    }
}

/// Where `this` is touched by a connection to `other`, and on which floor.
/// A bare stair id resolves to its landing on the other endpoint's floor.
fn attach(building: &Building, this: Entity, other: Entity, id: &str) -> NavResult<(Attach, i32)> {
    let placed = match this {
        Entity::Room(i)       => (Attach::Room(i), building.rooms[i].floor),
        Entity::Exit(i)       => (Attach::Exit(i), building.exits[i].floor),
        Entity::Landing(s, f) => (Attach::Landing(s, f), f),
        Entity::Stair(s) => {
            let stair = &building.stairs[s];
            let floor = floor_of(building, other).ok_or_else(|| NavError::AmbiguousLanding(id.to_string()))?;
            if !stair.serves(floor) {
                return Err(NavError::NoLanding { stair: stair.id.clone(), floor });
            }
            (Attach::Landing(s, floor), floor)
        }
        Entity::Corridor(c) => {
            let corridor = &building.corridors[c];
            let target = reference_point(building, other, corridor);
            (Attach::Corridor(c, target.project_onto(corridor.start, corridor.end)), corridor.floor)
        }
    };
    Ok(placed)
}

/// The point of `other` that a connection to `corridor` attaches from.
/// For another corridor this is whichever of its ends lies closer.
fn reference_point(building: &Building, other: Entity, corridor: &Corridor) -> Point {
    match other {
        Entity::Room(i)                      => building.rooms[i].position,
        Entity::Exit(i)                      => building.exits[i].position,
        Entity::Stair(s) | Entity::Landing(s, _) => building.stairs[s].position,
        Entity::Corridor(o) => {
            let o = &building.corridors[o];
            let gap = |p: Point| {
                let t = p.project_onto(corridor.start, corridor.end);
                p.distance_m(corridor.at(t))
            };
            if gap(o.end) < gap(o.start) { o.end } else { o.start }
        }
    }
}

fn position(building: &Building, attach: Attach) -> Point {
    match attach {
        Attach::Room(i)        => building.rooms[i].position,
        Attach::Exit(i)        => building.exits[i].position,
        Attach::Landing(s, _)  => building.stairs[s].position,
        Attach::Corridor(c, t) => building.corridors[c].at(t),
    }
}

// ── Corridor points ───────────────────────────────────────────────────────────

/// Sort corridor parameters and merge those within the tolerance.
fn merge_stops(mut stops: Vec<f32>, length_m: f32) -> Vec<f32> {
    stops.sort_by(f32::total_cmp);
    let mut merged: Vec<f32> = Vec::with_capacity(stops.len());
    for t in stops {
        match merged.last() {
            Some(&last) if (t - last) * length_m < MERGE_TOLERANCE_M => {}
            _ => merged.push(t),
        }
    }
    merged
}

fn nearest_point(points: &[(f32, WaypointId)], t: f32) -> WaypointId {
    points
        .iter()
        .min_by(|a, b| (a.0 - t).abs().total_cmp(&(b.0 - t).abs()))
        .map(|&(_, w)| w)
        .unwrap_or(WaypointId::INVALID)
}
