//! Plain data rows written by output backends.
//!
//! A [`SweepReport`] refers to rooms, responders and waypoints by index;
//! [`ReportRows::build`] resolves those to their string ids once, so every
//! backend writes the same labels.

use sweep_core::{RoomId, SimTime};
use sweep_nav::{Building, Navigator};
use sweep_sim::SweepReport;

use crate::{OutputError, OutputResult};

/// One line of `summary.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub total_time_secs:        f64,
    pub success:                bool,
    pub average_clearance_secs: f64,
    pub load_balance:           f64,
    pub total_distance_m:       f64,
    pub priority_inversions:    usize,
    pub responder_count:        usize,
    pub room_count:             usize,
}

/// One timeline event.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub responder: String,
    pub time_ms:   u64,
    pub action:    &'static str,
    pub location:  String,
    /// Empty when the event involves no room.
    pub room:      String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClearanceRow {
    pub room:       String,
    pub floor:      i32,
    pub priority:   u8,
    pub cleared_ms: u64,
    pub cleared_by: String,
}

/// Per-responder totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponderRow {
    pub responder:  String,
    pub rooms:      Vec<String>,
    pub path:       Vec<String>,
    pub total_time: SimTime,
    pub distance_m: f32,
}

/// Every row of one report, labels resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRows {
    pub summary:    SummaryRow,
    pub responders: Vec<ResponderRow>,
    pub timeline:   Vec<TimelineRow>,
    pub clearances: Vec<ClearanceRow>,
}

impl ReportRows {
    /// Flatten `report`, looking labels up in `building` and `nav`.
    pub fn build(report: &SweepReport, building: &Building, nav: &Navigator) -> OutputResult<Self> {
        let graph = nav.graph();
        let room_label = |id: RoomId| -> OutputResult<String> {
            building
                .room(id)
                .map(|r| r.id.clone())
                .ok_or_else(|| OutputError::Mismatch(format!("no room {id}")))
        };

        let m = &report.metrics;
        let summary = SummaryRow {
            total_time_secs:        report.total_time.as_secs_f64(),
            success:                report.success,
            average_clearance_secs: m.average_clearance_secs,
            load_balance:           m.load_balance,
            total_distance_m:       m.total_distance_m,
            priority_inversions:    m.priority_inversions,
            responder_count:        m.responder_count,
            room_count:             m.room_count,
        };

        let mut responders = Vec::with_capacity(report.responders.len());
        let mut timeline = Vec::new();
        for r in &report.responders {
            responders.push(ResponderRow {
                responder:  r.label.clone(),
                rooms:      r.rooms.iter().map(|&id| room_label(id)).collect::<OutputResult<_>>()?,
                path:       r.path.iter().map(|&w| graph.label(w).to_string()).collect(),
                total_time: r.total_time,
                distance_m: r.distance_m,
            });
            for e in &r.timeline {
                timeline.push(TimelineRow {
                    responder: r.label.clone(),
                    time_ms:   e.time.as_millis(),
                    action:    e.action.as_str(),
                    location:  graph.label(e.location).to_string(),
                    room:      e.room.map(&room_label).transpose()?.unwrap_or_default(),
                });
            }
        }

        let mut clearances = Vec::with_capacity(report.rooms.len());
        for c in &report.rooms {
            let room = building
                .room(c.room)
                .ok_or_else(|| OutputError::Mismatch(format!("no room {}", c.room)))?;
            let by = report
                .responder(c.cleared_by)
                .ok_or_else(|| OutputError::Mismatch(format!("no responder {}", c.cleared_by)))?;
            clearances.push(ClearanceRow {
                room:       room.id.clone(),
                floor:      room.floor,
                priority:   room.priority,
                cleared_ms: c.cleared_at.as_millis(),
                cleared_by: by.label.clone(),
            });
        }

        Ok(Self { summary, responders, timeline, clearances })
    }
}
