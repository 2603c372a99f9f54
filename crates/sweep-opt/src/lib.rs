//! `sweep-opt` — assigning rooms to responders.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`strategy`] | `Strategy`, `optimize`, `optimize_with`, `Optimized`       |
//! | [`greedy`]   | nearest-first, priority-first, balanced and top-down       |
//! | [`genetic`]  | genetic search, `Cost`, crossover and mutation operators   |
//! | [`repair`]   | partition repair after crossover                           |
//! | [`selector`] | `select_strategy` for `Strategy::Auto`                     |
//! | [`config`]   | `OptConfig`, `GeneticConfig`, `SelectorConfig`             |
//! | [`error`]    | `OptError`, `OptResult<T>`                                 |
//!
//! Every strategy returns a partition of the building's rooms; scoring goes
//! through [`sweep_sim::Simulator`], the same code that produces the final
//! report.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Evaluates each GA generation on Rayon's thread pool.   |
//! | `serde`    | Derives `Serialize`/`Deserialize` on config types.     |

pub mod config;
pub mod error;
pub mod genetic;
pub mod greedy;
pub mod repair;
pub mod selector;
pub mod strategy;


pub use config::{GeneticConfig, OptConfig, SelectorConfig};
pub use error::{OptError, OptResult};
pub use genetic::{Cost, GeneticOutcome};
pub use selector::select_strategy;
pub use strategy::{optimize, optimize_with, Optimized, Strategy};
