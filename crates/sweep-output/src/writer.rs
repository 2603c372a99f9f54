//! The `ResultWriter` trait implemented by all backends.

use sweep_nav::{Building, Navigator};
use sweep_sim::SweepReport;

use crate::row::{ClearanceRow, ReportRows, ResponderRow, SummaryRow, TimelineRow};
use crate::OutputResult;

/// Trait implemented by the CSV and key-value writers.
pub trait ResultWriter {
    fn write_summary(&mut self, row: &SummaryRow) -> OutputResult<()>;

    fn write_responders(&mut self, rows: &[ResponderRow]) -> OutputResult<()>;

    fn write_timeline(&mut self, rows: &[TimelineRow]) -> OutputResult<()>;

    fn write_clearances(&mut self, rows: &[ClearanceRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;

    /// Write every section of `rows`, summary first.
    fn write_rows(&mut self, rows: &ReportRows) -> OutputResult<()> {
        self.write_summary(&rows.summary)?;
        self.write_responders(&rows.responders)?;
        self.write_timeline(&rows.timeline)?;
        self.write_clearances(&rows.clearances)
    }
}

/// Resolve labels for `report` and write it through `writer`, then finish.
pub fn write_report<W: ResultWriter>(
    writer:   &mut W,
    report:   &SweepReport,
    building: &Building,
    nav:      &Navigator,
) -> OutputResult<()> {
    let rows = ReportRows::build(report, building, nav)?;
    writer.write_rows(&rows)?;
    writer.finish()
}
