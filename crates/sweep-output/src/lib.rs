//! `sweep-output` — writers for sweep results.
//!
//! | Backend            | Output                                                        |
//! |--------------------|---------------------------------------------------------------|
//! | [`CsvWriter`]      | `summary.csv`, `responders.csv`, `responder_timeline.csv`, `room_clearance.csv` |
//! | [`KeyValueWriter`] | `key=value` lines on any `io::Write`                          |
//!
//! Both implement [`ResultWriter`].  [`write_report`] resolves the report's
//! indices to labels ([`ReportRows`]) and drives any writer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sweep_output::{write_report, CsvWriter};
//!
//! let mut csv = CsvWriter::new(Path::new("./output"))?;
//! write_report(&mut csv, &report, &building, &nav)?;
//! println!("{}", to_key_value(&report, &building, &nav)?);
//! ```

pub mod csv;
pub mod error;
pub mod key_value;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use key_value::{to_key_value, KeyValueWriter};
pub use row::{ClearanceRow, ReportRows, ResponderRow, SummaryRow, TimelineRow};
pub use writer::{write_report, ResultWriter};
