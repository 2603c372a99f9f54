//! Rooms → responders, with a visit order per responder.

use sweep_core::{ResponderId, RoomId};
use sweep_nav::Building;

use crate::{SimError, SimResult};

/// One ordered room sequence per responder.
///
/// A valid assignment is a partition: every room of the building appears in
/// exactly one sequence.  Responders may have empty sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    routes: Vec<Vec<RoomId>>,
}

impl Assignment {
    /// `responders` empty sequences.
    pub fn empty(responders: usize) -> Self {
        Self { routes: vec![Vec::new(); responders] }
    }

    pub fn from_routes(routes: Vec<Vec<RoomId>>) -> Self {
        Self { routes }
    }

    pub fn into_routes(self) -> Vec<Vec<RoomId>> {
        self.routes
    }

    #[inline]
    pub fn route(&self, responder: ResponderId) -> &[RoomId] {
        &self.routes[responder.index()]
    }

    #[inline]
    pub fn routes(&self) -> &[Vec<RoomId>] {
        &self.routes
    }

    #[inline]
    pub fn routes_mut(&mut self) -> &mut [Vec<RoomId>] {
        &mut self.routes
    }

    pub fn push(&mut self, responder: ResponderId, room: RoomId) {
        self.routes[responder.index()].push(room);
    }

    pub fn responder_count(&self) -> usize {
        self.routes.len()
    }

    /// Total rooms across all sequences (duplicates counted).
    pub fn room_count(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    /// `(responder, route)` pairs in responder order.
    pub fn iter(&self) -> impl Iterator<Item = (ResponderId, &[RoomId])> + '_ {
        self.routes
            .iter()
            .enumerate()
            .map(|(i, r)| (ResponderId(i as u32), r.as_slice()))
    }

    /// Which responder holds each room, for `room_count` rooms.
    pub fn owners(&self, room_count: usize) -> Vec<Option<ResponderId>> {
        let mut owner = vec![None; room_count];
        for (r, route) in self.iter() {
            for room in route {
                if let Some(slot) = owner.get_mut(room.index()) {
                    *slot = Some(r);
                }
            }
        }
        owner
    }

    /// Check the partition invariant against `room_count` rooms.
    pub fn validate(&self, room_count: usize) -> SimResult<()> {
        let mut seen = vec![false; room_count];
        for (_, route) in self.iter() {
            for &room in route {
                let slot = seen.get_mut(room.index()).ok_or(SimError::UnknownRoom(room))?;
                if *slot {
                    return Err(SimError::DuplicateRoom(room));
                }
                *slot = true;
            }
        }
        match seen.iter().position(|s| !s) {
            Some(i) => Err(SimError::MissingRoom(RoomId(i as u32))),
            None => Ok(()),
        }
    }

    /// Pairs within one responder's sequence where a lower-priority room is
    /// visited before a higher-priority one.
    pub fn priority_inversions(&self, building: &Building) -> usize {
        self.routes
            .iter()
            .map(|route| route_inversions(building, route))
            .sum()
    }
}

/// Inversion count of one sequence.
pub fn route_inversions(building: &Building, route: &[RoomId]) -> usize {
    let prio = |r: RoomId| building.room(r).map_or(0, |room| room.priority);
    let mut count = 0;
    for (i, &a) in route.iter().enumerate() {
        for &b in &route[i + 1..] {
            if prio(a) < prio(b) {
                count += 1;
            }
        }
    }
    count
}
