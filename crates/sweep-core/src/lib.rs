//! `sweep-core` — foundational types for the building sweep optimizer.
//!
//! This crate is a dependency of every other `sweep-*` crate.  It has no
//! `sweep-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `WaypointId`, `EdgeId`, `RoomId`, `ResponderId`       |
//! | [`geo`]         | `Point`, euclidean distance, segment projection       |
//! | [`time`]        | `SimTime` (integer milliseconds)                      |
//! | [`rng`]         | `SearchRng` (seeded, reproducible)                    |
//! | [`mode`]        | `TraversalMode`, `WaypointKind`                       |
//! | [`error`]       | `SweepError`, `SweepResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod mode;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SweepError, SweepResult};
pub use geo::Point;
pub use ids::{EdgeId, ResponderId, RoomId, WaypointId};
pub use mode::{TraversalMode, WaypointKind};
pub use rng::SearchRng;
pub use time::SimTime;
