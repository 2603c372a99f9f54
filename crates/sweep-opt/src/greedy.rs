//! Constructive greedy strategies.
//!
//! All four build the assignment one room at a time from each responder's
//! current position, using that responder's own travel table.  Ties on time
//! go to the lowest `RoomId`, and ties between responders to the lowest
//! `ResponderId`, so the output depends only on the inputs.

use std::cmp::Reverse;

use sweep_core::{ResponderId, RoomId, SimTime, WaypointId};
use sweep_sim::{Assignment, Simulator};

use crate::OptResult;

/// Responders take turns in index order; on its turn a responder claims the
/// unassigned room it can reach soonest.
pub fn nearest_first(sim: &Simulator<'_>) -> OptResult<Assignment> {
    let all: Vec<RoomId> = sim.building().room_ids().collect();
    round_robin(sim, vec![all])
}

/// Like [`nearest_first`], but rooms are handed out tier by tier, highest
/// priority first.  The turn order carries over between tiers.
pub fn priority_first(sim: &Simulator<'_>) -> OptResult<Assignment> {
    let building = sim.building();
    let tiers = building
        .priority_tiers()
        .into_iter()
        .map(|tier| {
            building
                .room_ids()
                .filter(|&r| building.rooms[r.index()].priority == tier)
                .collect()
        })
        .collect();
    round_robin(sim, tiers)
}

/// Makespan heuristic: whichever responder has the least estimated work so
/// far claims its nearest unassigned room.
pub fn balanced(sim: &Simulator<'_>) -> OptResult<Assignment> {
    let n = sim.responder_count();
    let mut assignment = Assignment::empty(n);
    let mut pos: Vec<WaypointId> = (0..n).map(|i| sim.start(ResponderId(i as u32))).collect();
    let mut load = vec![SimTime::ZERO; n];
    let mut open: Vec<RoomId> = sim.building().room_ids().collect();

    while !open.is_empty() {
        let Some(i) = (0..n).min_by_key(|&i| (load[i], i)) else {
            break;
        };
        let r = ResponderId(i as u32);
        let (slot, travel) = nearest(sim, r, pos[i], &open)?;
        let room = open.remove(slot);
        load[i] += travel + sim.check_time(r, room);
        pos[i] = sim.room_waypoint(room);
        assignment.push(r, room);
    }
    Ok(assignment)
}

/// Floor-by-floor sweep for tall buildings.  Floors are handled from the top
/// down; each floor's rooms are dealt to responders in turn, highest priority
/// first, and every responder then visits its share of the floor nearest-first
/// before descending.  The deal order carries over between floors.
pub fn top_down(sim: &Simulator<'_>) -> OptResult<Assignment> {
    let building = sim.building();
    let n = sim.responder_count();
    let mut assignment = Assignment::empty(n);
    let mut pos: Vec<WaypointId> = (0..n).map(|i| sim.start(ResponderId(i as u32))).collect();
    let mut turn = 0usize;

    for floor in building.floors().into_iter().rev() {
        let mut rooms: Vec<RoomId> = building
            .room_ids()
            .filter(|&r| building.rooms[r.index()].floor == floor)
            .collect();
        rooms.sort_by_key(|&r| (Reverse(building.rooms[r.index()].priority), r));

        let mut shares: Vec<Vec<RoomId>> = vec![Vec::new(); n];
        for room in rooms {
            shares[turn % n].push(room);
            turn += 1;
        }
        for (i, mut open) in shares.into_iter().enumerate() {
            open.sort_unstable();
            let r = ResponderId(i as u32);
            while !open.is_empty() {
                let (slot, _) = nearest(sim, r, pos[i], &open)?;
                let room = open.remove(slot);
                pos[i] = sim.room_waypoint(room);
                assignment.push(r, room);
            }
        }
    }
    Ok(assignment)
}

/// Turn-taking nearest-first over successive groups of rooms.
fn round_robin(sim: &Simulator<'_>, groups: Vec<Vec<RoomId>>) -> OptResult<Assignment> {
    let n = sim.responder_count();
    let mut assignment = Assignment::empty(n);
    let mut pos: Vec<WaypointId> = (0..n).map(|i| sim.start(ResponderId(i as u32))).collect();
    let mut turn = 0usize;

    for mut open in groups {
        while !open.is_empty() {
            let i = turn % n;
            let r = ResponderId(i as u32);
            let (slot, _) = nearest(sim, r, pos[i], &open)?;
            let room = open.remove(slot);
            pos[i] = sim.room_waypoint(room);
            assignment.push(r, room);
            turn += 1;
        }
    }
    Ok(assignment)
}

/// Index into `open` of the room `responder` reaches soonest from `from`,
/// with its travel time.  `open` must be non-empty and sorted by id.
fn nearest(
    sim:       &Simulator<'_>,
    responder: ResponderId,
    from:      WaypointId,
    open:      &[RoomId],
) -> OptResult<(usize, SimTime)> {
    let mut best: Option<(SimTime, RoomId, usize)> = None;
    for (slot, &room) in open.iter().enumerate() {
        let t = sim.travel_to_room(responder, from, room)?;
        if best.is_none_or(|(bt, br, _)| (t, room) < (bt, br)) {
            best = Some((t, room, slot));
        }
    }
    Ok(best.map(|(t, _, slot)| (slot, t)).unwrap_or((0, SimTime::ZERO)))
}
