//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `summary.csv`
//! - `responders.csv`
//! - `responder_timeline.csv`
//! - `room_clearance.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::row::{ClearanceRow, ResponderRow, SummaryRow, TimelineRow};
use crate::writer::ResultWriter;
use crate::OutputResult;

/// Writes sweep results to CSV files.
pub struct CsvWriter {
    summary:    Writer<File>,
    responders: Writer<File>,
    timeline:   Writer<File>,
    clearance:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record([
            "total_time_secs",
            "success",
            "average_clearance_secs",
            "load_balance",
            "total_distance_m",
            "priority_inversions",
            "responders",
            "rooms",
        ])?;

        let mut responders = Writer::from_path(dir.join("responders.csv"))?;
        responders.write_record(["responder", "total_time_secs", "rooms_checked", "distance_m", "rooms"])?;

        let mut timeline = Writer::from_path(dir.join("responder_timeline.csv"))?;
        timeline.write_record(["responder", "time_ms", "action", "location", "room"])?;

        let mut clearance = Writer::from_path(dir.join("room_clearance.csv"))?;
        clearance.write_record(["room", "floor", "priority", "cleared_ms", "cleared_by"])?;

        debug!(dir = %dir.display(), "opened CSV output");
        Ok(Self { summary, responders, timeline, clearance, finished: false })
    }
}

impl ResultWriter for CsvWriter {
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            format!("{:.3}", row.total_time_secs),
            row.success.to_string(),
            format!("{:.3}", row.average_clearance_secs),
            format!("{:.4}", row.load_balance),
            format!("{:.2}", row.total_distance_m),
            row.priority_inversions.to_string(),
            row.responder_count.to_string(),
            row.room_count.to_string(),
        ])?;
        Ok(())
    }

    fn write_responders(&mut self, rows: &[ResponderRow]) -> OutputResult<()> {
        for row in rows {
            self.responders.write_record(&[
                row.responder.clone(),
                format!("{:.3}", row.total_time.as_secs_f64()),
                row.rooms.len().to_string(),
                format!("{:.2}", row.distance_m),
                row.rooms.join(" "),
            ])?;
        }
        Ok(())
    }

    fn write_timeline(&mut self, rows: &[TimelineRow]) -> OutputResult<()> {
        for row in rows {
            let time = row.time_ms.to_string();
            self.timeline.write_record([
                row.responder.as_str(),
                time.as_str(),
                row.action,
                row.location.as_str(),
                row.room.as_str(),
            ])?;
        }
        Ok(())
    }

    fn write_clearances(&mut self, rows: &[ClearanceRow]) -> OutputResult<()> {
        for row in rows {
            self.clearance.write_record(&[
                row.room.clone(),
                row.floor.to_string(),
                row.priority.to_string(),
                row.cleared_ms.to_string(),
                row.cleared_by.clone(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summary.flush()?;
        self.responders.flush()?;
        self.timeline.flush()?;
        self.clearance.flush()?;
        Ok(())
    }
}
