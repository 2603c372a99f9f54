//! `sweep-sim` — assignments and the deterministic timing simulator.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`assignment`] | `Assignment`: per-responder room sequences, partition check |
//! | [`config`]     | `SimConfig`, `ClearancePolicy`                          |
//! | [`event`]      | `Event`, `Action`                                       |
//! | [`report`]     | `SweepReport`, `ResponderReport`, `RoomClearance`, `Metrics` |
//! | [`sim`]        | `Simulator`, `Evaluation`, `simulate`                   |
//! | [`error`]      | `SimError`, `SimResult<T>`                              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let nav = Navigator::build(&building)?;
//! let sim = Simulator::new(&building, &nav, &team, SimConfig::default())?;
//! let report = sim.simulate(&assignment)?;
//! println!("all rooms clear after {}", report.total_time);
//! ```

pub mod assignment;
pub mod config;
pub mod error;
pub mod event;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use assignment::Assignment;
pub use config::{ClearancePolicy, SimConfig};
pub use error::{SimError, SimResult};
pub use event::{Action, Event};
pub use report::{Metrics, ResponderReport, RoomClearance, SweepReport};
pub use sim::{simulate, Evaluation, Simulator};
