//! Unit tests for sweep-scenario.

#[cfg(test)]
mod helpers {
    /// The six-room corridor, mixing both position forms.
    pub const BUILDING: &str = r#"{
        "name": "Basic office",
        "rooms": [
            { "id": "R1", "position": { "x": 5, "y": 7.5 } },
            { "id": "R2", "position": [5, 15] },
            { "id": "R3", "position": [5, 22.5] },
            { "id": "R4", "position": [25, 7.5] },
            { "id": "R5", "position": [25, 15] },
            { "id": "R6", "position": { "x": 25, "y": 22.5 } }
        ],
        "corridors": [ { "id": "C_main", "start": [15, 0], "end": [15, 30] } ],
        "exits": [
            { "id": "E1", "position": [15, 0] },
            { "id": "E2", "position": [15, 30] }
        ],
        "connections": [
            { "from": "R1", "to": "C_main", "distance": 12 },
            { "from": "R2", "to": "C_main", "distance": 12 },
            { "from": "R3", "to": "C_main", "distance": 12 },
            { "from": "R4", "to": "C_main", "distance": 12 },
            { "from": "R5", "to": "C_main", "distance": 12 },
            { "from": "R6", "to": "C_main", "distance": 12 },
            { "from": "C_main", "to": "E1", "distance": 0 },
            { "from": "C_main", "to": "E2", "distance": 0 }
        ]
    }"#;

    pub fn scenario(parameters: &str) -> String {
        format!(
            r#"{{
                "building": {BUILDING},
                "responders": [ {{ "id": "A", "start": "E1" }}, {{ "id": "B", "start": "E2" }} ],
                "parameters": {parameters}
            }}"#
        )
    }
}

// ── Building JSON ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod building {
    use std::io::{Cursor, Write};

    use sweep_core::Point;
    use sweep_nav::Navigator;

    use crate::{load_building_json, load_building_reader, ScenarioError};

    #[test]
    fn defaults_applied() {
        let b = load_building_reader(Cursor::new(super::helpers::BUILDING)).unwrap();
        assert_eq!(b.name, "Basic office");
        assert_eq!(b.room_count(), 6);
        let r1 = &b.rooms[0];
        assert_eq!(r1.floor, 1);
        assert_eq!(r1.area_m2, 16.0);
        assert_eq!(r1.priority, 1);
        assert_eq!(r1.check_complexity, 1.0);
        assert_eq!(r1.room_type, "office");
        assert_eq!(b.corridors[0].width_m, 2.0);
    }

    #[test]
    fn position_forms_agree() {
        let b = load_building_reader(Cursor::new(super::helpers::BUILDING)).unwrap();
        assert_eq!(b.rooms[0].position, Point::new(5.0, 7.5));
        assert_eq!(b.rooms[1].position, Point::new(5.0, 15.0));
    }

    #[test]
    fn wrapped_matches_bare() {
        let wrapped = format!(r#"{{ "building": {} }}"#, super::helpers::BUILDING);
        let a = load_building_reader(Cursor::new(super::helpers::BUILDING)).unwrap();
        let b = load_building_reader(Cursor::new(wrapped)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn loaded_building_lays_out() {
        let b = load_building_reader(Cursor::new(super::helpers::BUILDING)).unwrap();
        let nav = Navigator::build(&b).unwrap();
        assert_eq!(nav.room_count(), 6);
        assert_eq!(nav.exits().len(), 2);
    }

    #[test]
    fn stairs_and_optional_fields() {
        let json = r#"{
            "rooms": [ { "id": "R1", "position": [0, 0], "floor": 2, "area": 25, "priority": 3,
                         "type": "lab", "check_complexity": 1.5, "occupancy": 4 } ],
            "stairs": [ { "id": "S", "position": [1, 1], "floors": [2, 1], "flight_length": 6 } ],
            "connections": [ { "from": "R1", "to": "S" } ]
        }"#;
        let b = load_building_reader(Cursor::new(json)).unwrap();
        let r = &b.rooms[0];
        assert_eq!((r.floor, r.area_m2, r.priority, r.occupancy), (2, 25.0, 3, 4));
        assert_eq!(r.room_type, "lab");
        assert_eq!(b.stairs[0].sorted_floors(), [1, 2]);
        assert_eq!(b.stairs[0].flight_length_m, 6.0);
        assert_eq!(b.connections[0].distance_m, None);
    }

    #[test]
    fn malformed_json() {
        let err = load_building_reader(Cursor::new(r#"{ "rooms": [ { "position": [0, 0] } ] }"#));
        assert!(matches!(err, Err(ScenarioError::Json(_))));
        assert!(matches!(load_building_reader(Cursor::new("not json")), Err(ScenarioError::Json(_))));
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(super::helpers::BUILDING.as_bytes()).unwrap();
        let b = load_building_json(file.path()).unwrap();
        assert_eq!(b.exits.len(), 2);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_building_json(&dir.path().join("nope.json"));
        assert!(matches!(err, Err(ScenarioError::Io(_))));
    }
}

// ── Responder CSV ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod responders {
    use std::io::{Cursor, Write};

    use sweep_nav::NavError;

    use crate::{load_responders_csv, load_responders_reader, ScenarioError};

    const HEADER: &str = "id,start,walk_speed,stair_up_speed,stair_down_speed,check_rate,base_check_secs\n";

    #[test]
    fn blanks_take_defaults() {
        let csv = format!("{HEADER}A,E1,1.2,0.5,0.8,2.0,5\nB, E2 ,,,,,\n");
        let team = load_responders_reader(Cursor::new(csv)).unwrap();
        assert_eq!(team.len(), 2);
        assert_eq!(team[0].walk_speed, 1.2);
        assert_eq!(team[0].base_check_secs, 5.0);
        assert_eq!(team[1], sweep_nav::Responder::new("B", "E2"));
    }

    #[test]
    fn bad_speed_rejected() {
        let csv = format!("{HEADER}A,E1,0,,,,\n");
        let err = load_responders_reader(Cursor::new(csv));
        assert!(matches!(
            err,
            Err(ScenarioError::Nav(NavError::InvalidValue { field: "walk_speed", .. }))
        ));
    }

    #[test]
    fn unparsable_cell() {
        let csv = format!("{HEADER}A,E1,fast,,,,\n");
        assert!(matches!(load_responders_reader(Cursor::new(csv)), Err(ScenarioError::Csv(_))));
    }

    #[test]
    fn empty_file_is_empty_team() {
        assert!(load_responders_reader(Cursor::new(HEADER)).unwrap().is_empty());
    }

    #[test]
    fn from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}A,E1,,,,,").unwrap();
        let team = load_responders_csv(file.path()).unwrap();
        assert_eq!(team[0].start, "E1");
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario {
    use std::io::Cursor;

    use sweep_core::SimTime;
    use sweep_nav::NavError;
    use sweep_opt::Strategy;
    use sweep_sim::ClearancePolicy;

    use crate::{load_scenario_reader, Scenario, ScenarioError, ScenarioParams};

    #[test]
    fn parameters_parsed() {
        let json = super::helpers::scenario(
            r#"{ "emergency_type": "gas", "max_time_secs": 600, "strategy": "ga",
                 "clearance_policy": "return_to_exit", "seed": 7 }"#,
        );
        let s = load_scenario_reader(Cursor::new(json)).unwrap();
        assert_eq!(s.responders.len(), 2);
        assert_eq!(s.params.emergency_type, "gas");
        assert_eq!(s.params.max_time, Some(SimTime(600_000)));
        assert_eq!(s.params.strategy, Strategy::Genetic);
        assert_eq!(s.params.policy, ClearancePolicy::ReturnToExit);
        assert_eq!(s.opt_config().genetic.seed, 7);
        assert_eq!(s.sim_config().policy, ClearancePolicy::ReturnToExit);
    }

    #[test]
    fn parameters_optional() {
        let json = super::helpers::scenario("{}");
        let s = load_scenario_reader(Cursor::new(json)).unwrap();
        assert_eq!(s.params, ScenarioParams::default());
    }

    #[test]
    fn unknown_strategy() {
        let json = super::helpers::scenario(r#"{ "strategy": "fastest" }"#);
        assert!(matches!(load_scenario_reader(Cursor::new(json)), Err(ScenarioError::Opt(_))));
    }

    #[test]
    fn unknown_policy() {
        let json = super::helpers::scenario(r#"{ "clearance_policy": "whenever" }"#);
        assert!(matches!(load_scenario_reader(Cursor::new(json)), Err(ScenarioError::Parse(_))));
    }

    #[test]
    fn unreachable_room_fails_load() {
        let json = super::helpers::scenario("{}")
            .replace(r#"{ "from": "R3", "to": "C_main", "distance": 12 },"#, "");
        let err = load_scenario_reader(Cursor::new(json));
        assert!(matches!(err, Err(ScenarioError::Nav(NavError::Unreachable(l))) if l == "R3"));
    }

    #[test]
    fn responder_must_start_at_exit() {
        let json = super::helpers::scenario("{}").replace(r#""start": "E2""#, r#""start": "R1""#);
        assert!(matches!(load_scenario_reader(Cursor::new(json)), Err(ScenarioError::Nav(_))));
    }

    #[test]
    fn empty_team() {
        let s = Scenario::new(sweep_nav::Building::two_sided_corridor(3, 30.0, 16.0), Vec::new());
        assert!(matches!(s.navigator(), Err(ScenarioError::NoResponders)));
    }

    #[test]
    fn canonical_run() {
        let run = Scenario::canonical_basic().run().unwrap();
        assert_eq!(run.optimized.strategy, Strategy::BalancedGreedy);
        assert_eq!(run.report.total_time, SimTime(128_000));
        assert!(run.report.success);
        assert_eq!(run.report.rooms.len(), 6);
    }

    #[test]
    fn loaded_matches_canonical() {
        let s = load_scenario_reader(Cursor::new(super::helpers::scenario(r#"{ "strategy": "nearest" }"#))).unwrap();
        assert_eq!(s.run().unwrap().report.total_time, SimTime(128_000));
    }

    #[test]
    fn time_bound_reported() {
        let params = ScenarioParams { max_time: Some(SimTime::from_secs(100)), ..ScenarioParams::default() };
        let run = Scenario::canonical_basic().with_params(params).run().unwrap();
        assert!(!run.report.success);
        assert_eq!(run.report.total_time, SimTime(128_000));
    }
}
