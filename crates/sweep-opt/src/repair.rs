//! Restoring the partition invariant after crossover.
//!
//! 1. Duplicates are dropped; the first occurrence in responder order wins.
//! 2. Each orphaned room, in ascending id order, goes to the responder with
//!    the shortest current route time (ties to the lowest index), at the
//!    position that keeps that route fastest (ties to the earliest slot).

use sweep_core::{ResponderId, RoomId, SimTime};
use sweep_sim::{Assignment, Simulator};

use crate::OptResult;

pub fn repair(sim: &Simulator<'_>, mut routes: Vec<Vec<RoomId>>) -> OptResult<Assignment> {
    let room_count = sim.room_count();
    routes.resize(sim.responder_count(), Vec::new());

    let mut seen = vec![false; room_count];
    for route in &mut routes {
        route.retain(|room| match seen.get_mut(room.index()) {
            Some(s) if !*s => {
                *s = true;
                true
            }
            _ => false,
        });
    }

    let orphans: Vec<RoomId> = (0..room_count)
        .filter(|&i| !seen[i])
        .map(|i| RoomId(i as u32))
        .collect();
    if orphans.is_empty() {
        return Ok(Assignment::from_routes(routes));
    }

    let mut times = routes
        .iter()
        .enumerate()
        .map(|(i, route)| sim.route_time(ResponderId(i as u32), route))
        .collect::<Result<Vec<SimTime>, _>>()?;

    for room in orphans {
        let Some(i) = (0..routes.len()).min_by_key(|&i| (times[i], i)) else {
            break;
        };
        let r = ResponderId(i as u32);
        let (at, time) = cheapest_insertion(sim, r, &routes[i], room)?;
        routes[i].insert(at, room);
        times[i] = time;
    }
    Ok(Assignment::from_routes(routes))
}

/// Best slot for `room` in `route`, and the resulting route time.
pub fn cheapest_insertion(
    sim:   &Simulator<'_>,
    r:     ResponderId,
    route: &[RoomId],
    room:  RoomId,
) -> OptResult<(usize, SimTime)> {
    let mut best: Option<(SimTime, usize)> = None;
    let mut trial = Vec::with_capacity(route.len() + 1);
    for at in 0..=route.len() {
        trial.clear();
        trial.extend_from_slice(&route[..at]);
        trial.push(room);
        trial.extend_from_slice(&route[at..]);
        let t = sim.route_time(r, &trial)?;
        if best.is_none_or(|b| (t, at) < b) {
            best = Some((t, at));
        }
    }
    Ok(best.map(|(t, at)| (at, t)).unwrap_or((0, SimTime::ZERO)))
}
