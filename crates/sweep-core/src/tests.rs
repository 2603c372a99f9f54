//! Unit tests for sweep-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, ResponderId, RoomId, WaypointId};

    #[test]
    fn index_roundtrip() {
        let id = RoomId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(RoomId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(RoomId(0) < RoomId(1));
        assert!(WaypointId(100) > WaypointId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(WaypointId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert_eq!(ResponderId::default(), ResponderId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(ResponderId(7).to_string(), "ResponderId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::Point;

    #[test]
    fn three_four_five() {
        let d = Point::new(0.0, 0.0).distance_m(Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn projection_clamps_to_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((Point::new(4.0, 3.0).project_onto(a, b) - 0.4).abs() < 1e-6);
        assert_eq!(Point::new(-5.0, 1.0).project_onto(a, b), 0.0);
        assert_eq!(Point::new(15.0, 1.0).project_onto(a, b), 1.0);
    }

    #[test]
    fn degenerate_segment_projects_to_start() {
        let a = Point::new(2.0, 2.0);
        assert_eq!(Point::new(9.0, 9.0).project_onto(a, a), 0.0);
    }

    #[test]
    fn lerp_midpoint() {
        let m = Point::new(0.0, 0.0).lerp(Point::new(10.0, 20.0), 0.5);
        assert_eq!(m, Point::new(5.0, 10.0));
    }
}

#[cfg(test)]
mod time {
    use crate::SimTime;

    #[test]
    fn rounds_to_millis() {
        assert_eq!(SimTime::from_secs_f64(1.2344), SimTime(1234));
        assert_eq!(SimTime::from_secs_f64(1.2346), SimTime(1235));
        assert_eq!(SimTime::from_secs(3), SimTime(3000));
    }

    #[test]
    fn invalid_inputs_clamp_to_zero() {
        assert_eq!(SimTime::from_secs_f64(-4.0), SimTime::ZERO);
        assert_eq!(SimTime::from_secs_f64(f64::NAN), SimTime::ZERO);
        assert_eq!(SimTime::from_secs_f64(f64::INFINITY), SimTime::ZERO);
    }

    #[test]
    fn arithmetic() {
        let mut t = SimTime(1500);
        t += SimTime(500);
        assert_eq!(t, SimTime(2000));
        assert_eq!(t + SimTime(1), SimTime(2001));
        assert_eq!(SimTime(10).since(SimTime(4)), SimTime(6));
        assert_eq!(SimTime(4).since(SimTime(10)), SimTime::ZERO);
        let total: SimTime = [SimTime(1), SimTime(2), SimTime(3)].into_iter().sum();
        assert_eq!(total, SimTime(6));
    }

    #[test]
    fn huge_values_saturate() {
        let huge = SimTime::from_secs_f64(1e30);
        assert_eq!(huge, SimTime(u64::MAX));
        assert_eq!(huge + huge, SimTime(u64::MAX));
        let mut t = SimTime(5);
        t += huge;
        assert_eq!(t, SimTime(u64::MAX));
        let total: SimTime = [huge, SimTime(1)].into_iter().sum();
        assert_eq!(total, SimTime(u64::MAX));
        assert_eq!(SimTime::from_secs(u64::MAX), SimTime(u64::MAX));
    }

    #[test]
    fn display() {
        assert_eq!(SimTime(39_000).to_string(), "39.000s");
        assert_eq!(SimTime(1_005).to_string(), "1.005s");
        assert!((SimTime(2_500).as_secs_f64() - 2.5).abs() < 1e-12);
    }
}

#[cfg(test)]
mod rng {
    use crate::SearchRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SearchRng::new(12345);
        let mut r2 = SearchRng::new(12345);
        for _ in 0..100 {
            let a: u64 = r1.random();
            let b: u64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = SearchRng::new(1);
        let mut c0 = root.child(0);
        let mut c1 = root.child(1);
        let a: u64 = c0.random();
        let b: u64 = c1.random();
        assert_ne!(a, b);
    }

    #[test]
    fn distinct_pair_is_distinct() {
        let mut rng = SearchRng::new(7);
        assert_eq!(rng.distinct_pair(1), None);
        for _ in 0..500 {
            let (a, b) = rng.distinct_pair(3).unwrap();
            assert_ne!(a, b);
            assert!(a < 3 && b < 3);
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SearchRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod mode {
    use crate::{TraversalMode, WaypointKind};

    #[test]
    fn stair_modes() {
        assert!(!TraversalMode::Flat.is_stair());
        assert!(TraversalMode::StairUp.is_stair());
        assert!(TraversalMode::StairDown.is_stair());
    }

    #[test]
    fn display() {
        assert_eq!(TraversalMode::StairDown.to_string(), "stair_down");
        assert_eq!(WaypointKind::RoomCenter.to_string(), "room_center");
    }
}
