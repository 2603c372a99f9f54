//! `sweep-scenario` — loading buildings, teams and run parameters.
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`building`]    | `load_building_json`, `load_building_reader`           |
//! | [`responders`]  | `load_responders_csv`, `load_responders_reader`        |
//! | [`scenario`]    | `Scenario`, `ScenarioParams`, `load_scenario_json`     |
//! | [`error`]       | `ScenarioError`, `ScenarioResult<T>`                   |

pub mod building;
pub mod error;
pub mod responders;
pub mod scenario;

#[cfg(test)]
mod tests;

pub use building::{load_building_json, load_building_reader};
pub use error::{ScenarioError, ScenarioResult};
pub use responders::{load_responders_csv, load_responders_reader};
pub use scenario::{load_scenario_json, load_scenario_reader, Scenario, ScenarioParams, ScenarioRun};
