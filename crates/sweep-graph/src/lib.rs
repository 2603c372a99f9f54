//! `sweep-graph` — the building's navigation graph and its shortest-path
//! primitive.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `BuildingGraph` (CSR), `BuildingGraphBuilder`               |
//! | [`router`]  | `Router` trait, `Route`, `ShortestPathTree`, `DijkstraRouter`, `EdgeCost`, `Distance` |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! # Geometric fidelity
//!
//! [`BuildingGraphBuilder::build`] refuses any edge that touches a room
//! centre from anything other than a door, so no path can ever pass from one
//! room to another without going through doors, corridors or stairs.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use network::{BuildingGraph, BuildingGraphBuilder};
pub use router::{DijkstraRouter, Distance, EdgeCost, Route, Router, ShortestPathTree};
