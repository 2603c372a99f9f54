//! Unit tests for sweep-sim.
//!
//! The fixture is the six-room corridor building with two responders, one
//! at each exit.  With default speeds every room is 12 m of walking from
//! the corridor and takes 26 s to check.

#[cfg(test)]
mod helpers {
    use sweep_core::RoomId;
    use sweep_nav::{Building, Navigator, Responder};

    use crate::Assignment;

    pub fn building() -> Building {
        Building::two_sided_corridor(3, 30.0, 16.0)
    }

    pub fn team() -> Vec<Responder> {
        vec![Responder::new("A", "E1"), Responder::new("B", "E2")]
    }

    pub fn nav(b: &Building) -> Navigator {
        Navigator::build(b).unwrap()
    }

    /// R1, R4, R2 for A and R3, R6, R5 for B.
    pub fn split() -> Assignment {
        let r = |i: u32| RoomId(i);
        Assignment::from_routes(vec![vec![r(0), r(3), r(1)], vec![r(2), r(5), r(4)]])
    }
}

// ── Assignment ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod assignment {
    use sweep_core::{ResponderId, RoomId};
    use crate::{Assignment, SimError};

    #[test]
    fn valid_partition() {
        let a = super::helpers::split();
        assert!(a.validate(6).is_ok());
        assert_eq!(a.room_count(), 6);
        assert_eq!(a.route(ResponderId(1)), &[RoomId(2), RoomId(5), RoomId(4)]);
    }

    #[test]
    fn missing_room() {
        let a = Assignment::from_routes(vec![vec![RoomId(0)], vec![RoomId(2)]]);
        assert!(matches!(a.validate(3), Err(SimError::MissingRoom(RoomId(1)))));
    }

    #[test]
    fn duplicate_room() {
        let a = Assignment::from_routes(vec![vec![RoomId(0), RoomId(1)], vec![RoomId(1)]]);
        assert!(matches!(a.validate(2), Err(SimError::DuplicateRoom(RoomId(1)))));
    }

    #[test]
    fn unknown_room() {
        let a = Assignment::from_routes(vec![vec![RoomId(0), RoomId(7)]]);
        assert!(matches!(a.validate(1), Err(SimError::UnknownRoom(RoomId(7)))));
    }

    #[test]
    fn owners() {
        let owners = super::helpers::split().owners(6);
        assert_eq!(owners[3], Some(ResponderId(0)));
        assert_eq!(owners[4], Some(ResponderId(1)));
    }

    #[test]
    fn priority_inversions() {
        let mut b = super::helpers::building();
        b.rooms[1].priority = 3; // R2, visited last by A
        assert_eq!(super::helpers::split().priority_inversions(&b), 2);
    }
}

// ── Replay ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod replay {
    use sweep_core::{ResponderId, RoomId, SimTime};
    use sweep_nav::Responder;

    use crate::{Action, Assignment, ClearancePolicy, SimConfig, SimError, Simulator};

    #[test]
    fn balanced_split_times() {
        let b = super::helpers::building();
        let nav = super::helpers::nav(&b);
        let team = super::helpers::team();
        let sim = Simulator::new(&b, &nav, &team, SimConfig::default()).unwrap();
        let report = sim.simulate(&super::helpers::split()).unwrap();

        // 13 + 26, then 16 + 26, then 21 + 26 seconds.
        assert_eq!(report.total_time, SimTime(128_000));
        assert!(report.success);
        for r in &report.responders {
            assert_eq!(r.total_time, SimTime(128_000));
            assert!((r.distance_m - 75.0).abs() < 1e-3);
            assert_eq!(r.rooms_checked(), 3);
        }
        assert_eq!(report.clearance(RoomId(0)).unwrap().cleared_at, SimTime(39_000));
        assert_eq!(report.clearance(RoomId(3)).unwrap().cleared_at, SimTime(81_000));
        assert_eq!(report.clearance(RoomId(4)).unwrap().cleared_by, ResponderId(1));
        assert!((report.metrics.load_balance - 1.0).abs() < 1e-9);
        assert!((report.metrics.average_clearance_secs - 248.0 / 3.0).abs() < 1e-9);
        assert!((report.metrics.total_distance_m - 150.0).abs() < 1e-3);
        assert_eq!(report.metrics.room_count, 6);
    }

    #[test]
    fn timeline_shape() {
        let b = super::helpers::building();
        let nav = super::helpers::nav(&b);
        let team = super::helpers::team();
        let sim = Simulator::new(&b, &nav, &team, SimConfig::default()).unwrap();
        let report = sim.simulate(&super::helpers::split()).unwrap();

        let a = &report.responders[0];
        let actions: Vec<Action> = a.timeline.iter().take(4).map(|e| e.action).collect();
        assert_eq!(actions, [Action::Depart, Action::Arrive, Action::CheckStart, Action::CheckComplete]);
        assert_eq!(a.timeline.len(), 12);
        assert_eq!(a.timeline[1].time, SimTime(13_000));
        assert_eq!(a.timeline.last().unwrap().action, Action::CheckComplete);

        for r in &report.responders {
            assert!(r.timeline.windows(2).all(|w| w[0].time <= w[1].time));
        }
        assert_eq!(nav.graph().label(a.path[0]), "E1");
        assert_eq!(nav.graph().label(*a.path.last().unwrap()), "R2");
    }

    #[test]
    fn idempotent() {
        let b = super::helpers::building();
        let nav = super::helpers::nav(&b);
        let team = super::helpers::team();
        let sim = Simulator::new(&b, &nav, &team, SimConfig::default()).unwrap();
        let first = sim.simulate(&super::helpers::split()).unwrap();
        let second = sim.simulate(&super::helpers::split()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn evaluate_agrees_with_simulate() {
        let b = super::helpers::building();
        let nav = super::helpers::nav(&b);
        let team = super::helpers::team();
        let odd = Assignment::from_routes(vec![
            vec![RoomId(5), RoomId(0)],
            vec![RoomId(1), RoomId(4), RoomId(2), RoomId(3)],
        ]);
        for policy in [ClearancePolicy::LastCheckComplete, ClearancePolicy::ReturnToExit] {
            let sim = Simulator::new(&b, &nav, &team, SimConfig::default().with_policy(policy)).unwrap();
            let eval = sim.evaluate(&odd).unwrap();
            let report = sim.simulate(&odd).unwrap();
            assert_eq!(eval.total_time, report.total_time);
            let times: Vec<SimTime> = report.responders.iter().map(|r| r.total_time).collect();
            assert_eq!(eval.responder_times, times);
        }
    }

    #[test]
    fn return_to_exit_policy() {
        let b = super::helpers::building();
        let nav = super::helpers::nav(&b);
        let team = super::helpers::team();
        let config = SimConfig::default().with_policy(ClearancePolicy::ReturnToExit);
        let sim = Simulator::new(&b, &nav, &team, config).unwrap();
        let report = sim.simulate(&super::helpers::split()).unwrap();

        // R2 and R5 sit mid-corridor: 18 s to either exit, tie goes to E1.
        assert_eq!(report.total_time, SimTime(146_000));
        for r in &report.responders {
            let last = r.timeline.last().unwrap();
            assert_eq!(last.action, Action::ReturnToExit);
            assert_eq!(nav.graph().label(last.location), "E1");
        }
        // Clearance times are unaffected by the walk out.
        assert_eq!(report.clearance(RoomId(1)).unwrap().cleared_at, SimTime(128_000));
    }

    #[test]
    fn time_bound_is_soft() {
        let b = super::helpers::building();
        let nav = super::helpers::nav(&b);
        let team = super::helpers::team();
        let config = SimConfig::default().with_max_time(SimTime::from_secs(100));
        let sim = Simulator::new(&b, &nav, &team, config).unwrap();
        let report = sim.simulate(&super::helpers::split()).unwrap();
        assert!(!report.success);
        assert_eq!(report.rooms.len(), 6);
    }

    #[test]
    fn idle_responder() {
        let b = super::helpers::building();
        let nav = super::helpers::nav(&b);
        let mut team = super::helpers::team();
        team.push(Responder::new("C", "E1"));
        let sim = Simulator::new(&b, &nav, &team, SimConfig::default()).unwrap();
        let mut routes = super::helpers::split().into_routes();
        routes.push(Vec::new());
        let report = sim.simulate(&Assignment::from_routes(routes)).unwrap();
        let idle = &report.responders[2];
        assert!(idle.timeline.is_empty());
        assert_eq!(idle.total_time, SimTime::ZERO);
        assert_eq!(report.metrics.load_balance, 0.0);
    }

    #[test]
    fn shape_errors() {
        let b = super::helpers::building();
        let nav = super::helpers::nav(&b);
        let team = super::helpers::team();
        let sim = Simulator::new(&b, &nav, &team, SimConfig::default()).unwrap();
        let one = Assignment::from_routes(vec![(0..6).map(RoomId).collect()]);
        assert!(matches!(
            sim.simulate(&one),
            Err(SimError::ResponderCountMismatch { expected: 2, got: 1 })
        ));
        let partial = Assignment::from_routes(vec![vec![RoomId(0)], vec![RoomId(1)]]);
        assert!(matches!(sim.evaluate(&partial), Err(SimError::MissingRoom(RoomId(2)))));
    }

    #[test]
    fn empty_team() {
        let b = super::helpers::building();
        let nav = super::helpers::nav(&b);
        assert!(matches!(
            Simulator::new(&b, &nav, &[], SimConfig::default()),
            Err(SimError::NoResponders)
        ));
    }

    #[test]
    fn enormous_room_saturates() {
        let mut b = super::helpers::building();
        b.rooms[0].area_m2 = 1e20;
        let nav = super::helpers::nav(&b);
        let team = super::helpers::team();
        let sim = Simulator::new(&b, &nav, &team, SimConfig::default()).unwrap();
        let report = sim.simulate(&super::helpers::split()).unwrap();
        assert_eq!(report.total_time, SimTime(u64::MAX));
        assert_eq!(report.responders[1].total_time, SimTime(128_000));
    }

    #[test]
    fn check_time_scales_with_area() {
        let mut b = super::helpers::building();
        b.rooms[0].area_m2 = 36.0;
        let nav = super::helpers::nav(&b);
        let team = super::helpers::team();
        let sim = Simulator::new(&b, &nav, &team, SimConfig::default()).unwrap();
        assert_eq!(sim.check_time(ResponderId(0), RoomId(0)), SimTime(46_000));
        assert_eq!(sim.check_time(ResponderId(0), RoomId(1)), SimTime(26_000));
    }
}
