//! `sweep-nav` — the building entity model and the navigation layer on top
//! of the waypoint graph.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`building`]  | `Building`, `Room`, `Corridor`, `Stair`, `Exit`, `Connection` |
//! | [`responder`] | `Responder`, `SpeedProfile` (ms edge costs)                |
//! | [`navigator`] | `Navigator`: layout, validation, `travel_time`            |
//! | [`table`]     | `TravelTable`, `TravelTables`: precomputed lookups        |
//! | [`error`]     | `NavError`, `NavResult<T>`                                 |
//!
//! # Usage
//!
//! ```ignore
//! let nav = Navigator::build(&building)?;          // validates the input
//! let tables = nav.travel_tables(&responders)?;    // one per speed profile
//! let t = tables.for_responder(ResponderId(0)).time(exit, room);
//! ```

pub mod building;
pub mod error;
mod layout;
pub mod navigator;
pub mod responder;
pub mod table;


pub use building::{Building, Connection, Corridor, Exit, Room, Stair};
pub use error::{NavError, NavResult};
pub use navigator::Navigator;
pub use responder::{Responder, SpeedProfile};
pub use table::{TravelTable, TravelTables};
