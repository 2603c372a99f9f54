//! Line-oriented `key=value` text form.
//!
//! ```text
//! total_time=128.000
//! success=true
//! responder.A.rooms=R1,R4,R2
//! responder.A.total_time=128.000
//! timeline.A.0=0.000 depart E1
//! room.R1.cleared_at=39.000
//! room.R1.cleared_by=A
//! ```
//!
//! Times are seconds with millisecond precision.

use std::io::Write;

use sweep_nav::{Building, Navigator};
use sweep_sim::SweepReport;

use crate::row::{ClearanceRow, ResponderRow, SummaryRow, TimelineRow};
use crate::writer::{write_report, ResultWriter};
use crate::OutputResult;

/// Writes `key=value` lines to any `Write` sink.
pub struct KeyValueWriter<W: Write> {
    out:      W,
    /// Events seen so far per responder, for `timeline.<id>.<n>` keys.
    counters: Vec<(String, usize)>,
    finished: bool,
}

impl<W: Write> KeyValueWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, counters: Vec::new(), finished: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn next_index(&mut self, responder: &str) -> usize {
        match self.counters.iter_mut().find(|(r, _)| r == responder) {
            Some((_, n)) => {
                *n += 1;
                *n
            }
            None => {
                self.counters.push((responder.to_string(), 0));
                0
            }
        }
    }
}

fn secs_ms(ms: u64) -> String {
    format!("{}.{:03}", ms / 1000, ms % 1000)
}

impl<W: Write> ResultWriter for KeyValueWriter<W> {
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()> {
        let o = &mut self.out;
        writeln!(o, "total_time={:.3}", row.total_time_secs)?;
        writeln!(o, "success={}", row.success)?;
        writeln!(o, "average_clearance_time={:.3}", row.average_clearance_secs)?;
        writeln!(o, "load_balance={:.4}", row.load_balance)?;
        writeln!(o, "total_distance={:.2}", row.total_distance_m)?;
        writeln!(o, "priority_inversions={}", row.priority_inversions)?;
        writeln!(o, "responders={}", row.responder_count)?;
        writeln!(o, "rooms={}", row.room_count)?;
        Ok(())
    }

    fn write_responders(&mut self, rows: &[ResponderRow]) -> OutputResult<()> {
        let o = &mut self.out;
        for r in rows {
            let id = &r.responder;
            writeln!(o, "responder.{id}.rooms={}", r.rooms.join(","))?;
            writeln!(o, "responder.{id}.rooms_checked={}", r.rooms.len())?;
            writeln!(o, "responder.{id}.total_time={}", secs_ms(r.total_time.as_millis()))?;
            writeln!(o, "responder.{id}.distance={:.2}", r.distance_m)?;
            writeln!(o, "responder.{id}.path={}", r.path.join(","))?;
        }
        Ok(())
    }

    fn write_timeline(&mut self, rows: &[TimelineRow]) -> OutputResult<()> {
        for row in rows {
            let n = self.next_index(&row.responder);
            write!(self.out, "timeline.{}.{n}={} {} {}", row.responder, secs_ms(row.time_ms), row.action, row.location)?;
            if row.room.is_empty() {
                writeln!(self.out)?;
            } else {
                writeln!(self.out, " {}", row.room)?;
            }
        }
        Ok(())
    }

    fn write_clearances(&mut self, rows: &[ClearanceRow]) -> OutputResult<()> {
        let o = &mut self.out;
        for c in rows {
            writeln!(o, "room.{}.cleared_at={}", c.room, secs_ms(c.cleared_ms))?;
            writeln!(o, "room.{}.cleared_by={}", c.room, c.cleared_by)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}

/// The whole report as `key=value` text.
pub fn to_key_value(report: &SweepReport, building: &Building, nav: &Navigator) -> OutputResult<String> {
    let mut writer = KeyValueWriter::new(Vec::new());
    write_report(&mut writer, report, building, nav)?;
    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}
