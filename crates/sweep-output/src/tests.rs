//! Unit tests for sweep-output.

#[cfg(test)]
mod helpers {
    use sweep_core::RoomId;
    use sweep_nav::{Building, Navigator, Responder};
    use sweep_sim::{simulate, Assignment, SimConfig, SweepReport};

    pub struct Fixture {
        pub building: Building,
        pub nav:      Navigator,
        pub report:   SweepReport,
    }

    /// The six-room corridor swept as R1,R4,R2 / R3,R6,R5 (128 s).
    pub fn canonical() -> Fixture {
        let building = Building::two_sided_corridor(3, 30.0, 16.0);
        let nav = Navigator::build(&building).unwrap();
        let team = vec![Responder::new("A", "E1"), Responder::new("B", "E2")];
        let r = |i: u32| RoomId(i);
        let assignment = Assignment::from_routes(vec![vec![r(0), r(3), r(1)], vec![r(2), r(5), r(4)]]);
        let report = simulate(&building, &nav, &team, &assignment, &SimConfig::default()).unwrap();
        Fixture { building, nav, report }
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rows {
    use crate::{OutputError, ReportRows};

    #[test]
    fn labels_resolved() {
        let f = super::helpers::canonical();
        let rows = ReportRows::build(&f.report, &f.building, &f.nav).unwrap();
        assert_eq!(rows.summary.total_time_secs, 128.0);
        assert_eq!(rows.responders[0].rooms, ["R1", "R4", "R2"]);
        assert_eq!(rows.responders[1].rooms, ["R3", "R6", "R5"]);
        assert_eq!(rows.responders[0].path.first().map(String::as_str), Some("E1"));
        assert_eq!(rows.responders[0].path.last().map(String::as_str), Some("R2"));
    }

    #[test]
    fn timeline_rows() {
        let f = super::helpers::canonical();
        let rows = ReportRows::build(&f.report, &f.building, &f.nav).unwrap();
        assert_eq!(rows.timeline.len(), 24);
        let first = &rows.timeline[0];
        assert_eq!((first.responder.as_str(), first.time_ms, first.action), ("A", 0, "depart"));
        assert_eq!(first.location, "E1");
        assert!(first.room.is_empty());
        let done = &rows.timeline[3];
        assert_eq!((done.action, done.time_ms, done.room.as_str()), ("check_complete", 39_000, "R1"));
    }

    #[test]
    fn clearance_rows() {
        let f = super::helpers::canonical();
        let rows = ReportRows::build(&f.report, &f.building, &f.nav).unwrap();
        assert_eq!(rows.clearances.len(), 6);
        let r1 = &rows.clearances[0];
        assert_eq!((r1.room.as_str(), r1.cleared_ms, r1.cleared_by.as_str()), ("R1", 39_000, "A"));
        assert_eq!(rows.clearances[2].cleared_by, "B");
    }

    #[test]
    fn mismatched_building() {
        let f = super::helpers::canonical();
        let mut smaller = f.building.clone();
        smaller.rooms.truncate(3);
        assert!(matches!(
            ReportRows::build(&f.report, &smaller, &f.nav),
            Err(OutputError::Mismatch(_))
        ));
    }
}

// ── CSV backend ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::{write_report, CsvWriter, ResultWriter};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("room_clearance.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["room", "floor", "priority", "cleared_ms", "cleared_by"]);
        for file in ["summary.csv", "responders.csv", "responder_timeline.csv"] {
            assert!(dir.path().join(file).exists());
        }
    }

    #[test]
    fn report_written() {
        let f = super::helpers::canonical();
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        write_report(&mut w, &f.report, &f.building, &f.nav).unwrap();

        let summary = records(&dir, "summary.csv");
        assert_eq!(summary.len(), 1);
        assert_eq!(&summary[0][0], "128.000");
        assert_eq!(&summary[0][1], "true");

        let responders = records(&dir, "responders.csv");
        assert_eq!(&responders[0][0], "A");
        assert_eq!(&responders[0][4], "R1 R4 R2");

        assert_eq!(records(&dir, "responder_timeline.csv").len(), 24);

        let clearance = records(&dir, "room_clearance.csv");
        assert_eq!(clearance.len(), 6);
        assert_eq!(&clearance[0][3], "39000");
        assert_eq!(&clearance[0][4], "A");
    }
}

// ── Key-value text ────────────────────────────────────────────────────────────

#[cfg(test)]
mod key_value {
    use crate::to_key_value;

    fn value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
        text.lines().find_map(|l| l.strip_prefix(key)?.strip_prefix('='))
    }

    #[test]
    fn summary_keys() {
        let f = super::helpers::canonical();
        let text = to_key_value(&f.report, &f.building, &f.nav).unwrap();
        assert_eq!(value(&text, "total_time"), Some("128.000"));
        assert_eq!(value(&text, "success"), Some("true"));
        assert_eq!(value(&text, "load_balance"), Some("1.0000"));
        assert_eq!(value(&text, "rooms"), Some("6"));
    }

    #[test]
    fn responder_and_room_keys() {
        let f = super::helpers::canonical();
        let text = to_key_value(&f.report, &f.building, &f.nav).unwrap();
        assert_eq!(value(&text, "responder.A.rooms"), Some("R1,R4,R2"));
        assert_eq!(value(&text, "responder.B.total_time"), Some("128.000"));
        assert_eq!(value(&text, "timeline.A.0"), Some("0.000 depart E1"));
        assert_eq!(value(&text, "timeline.A.3"), Some("39.000 check_complete R1 R1"));
        assert_eq!(value(&text, "room.R1.cleared_at"), Some("39.000"));
        assert_eq!(value(&text, "room.R5.cleared_by"), Some("B"));
    }

    #[test]
    fn every_line_is_a_pair() {
        let f = super::helpers::canonical();
        let text = to_key_value(&f.report, &f.building, &f.nav).unwrap();
        assert!(text.lines().all(|l| l.split_once('=').is_some_and(|(k, _)| !k.is_empty())));
    }
}
