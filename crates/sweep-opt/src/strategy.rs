//! The closed set of strategies and the single `optimize` entry point.

use std::str::FromStr;

use tracing::info;

use sweep_nav::{Building, Navigator, Responder};
use sweep_sim::{Assignment, Evaluation, Simulator};

use crate::config::OptConfig;
use crate::genetic::{self, Cost};
use crate::selector::select_strategy;
use crate::{greedy, OptError, OptResult};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    NearestGreedy,
    PriorityGreedy,
    BalancedGreedy,
    /// Floor by floor from the top; see [`greedy::top_down`].
    TopDown,
    Genetic,
    /// Resolved by [`select_strategy`] at optimisation time.
    #[default]
    Auto,
}

impl Strategy {
    /// Every strategy except `Auto`.
    pub const CONCRETE: [Strategy; 5] = [
        Strategy::NearestGreedy,
        Strategy::PriorityGreedy,
        Strategy::BalancedGreedy,
        Strategy::TopDown,
        Strategy::Genetic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::NearestGreedy  => "nearest_greedy",
            Strategy::PriorityGreedy => "priority_greedy",
            Strategy::BalancedGreedy => "balanced_greedy",
            Strategy::TopDown        => "top_down",
            Strategy::Genetic        => "genetic",
            Strategy::Auto           => "auto",
        }
    }

    pub fn is_greedy(self) -> bool {
        matches!(
            self,
            Strategy::NearestGreedy | Strategy::PriorityGreedy | Strategy::BalancedGreedy | Strategy::TopDown
        )
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest_greedy" | "nearest"   => Ok(Strategy::NearestGreedy),
            "priority_greedy" | "priority" => Ok(Strategy::PriorityGreedy),
            "balanced_greedy" | "balanced" => Ok(Strategy::BalancedGreedy),
            "top_down" | "topdown"         => Ok(Strategy::TopDown),
            "genetic" | "ga"               => Ok(Strategy::Genetic),
            "auto"                         => Ok(Strategy::Auto),
            other => Err(OptError::Config(format!("unknown strategy {other:?}"))),
        }
    }
}

/// The chosen assignment and how it scored.
pub struct Optimized {
    /// The strategy that actually ran (never `Auto`).
    pub strategy:    Strategy,
    pub assignment:  Assignment,
    pub evaluation:  Evaluation,
    pub cost:        Cost,
    /// Per-generation best cost; empty for greedy strategies.
    pub history:     Vec<Cost>,
    pub generations: usize,
}

/// Assign every room of `building` to the team.
///
/// # Errors
///
/// [`OptError::NoRooms`] / [`OptError::NoResponders`] for empty inputs,
/// before any work is done; simulator and navigation errors otherwise.
pub fn optimize(
    building:   &Building,
    nav:        &Navigator,
    responders: &[Responder],
    strategy:   Strategy,
    config:     &OptConfig,
) -> OptResult<Optimized> {
    if building.rooms.is_empty() {
        return Err(OptError::NoRooms);
    }
    if responders.is_empty() {
        return Err(OptError::NoResponders);
    }
    let sim = Simulator::new(building, nav, responders, config.sim.clone())?;
    optimize_with(&sim, strategy, config)
}

/// [`optimize`] against an existing simulator.
pub fn optimize_with(sim: &Simulator<'_>, strategy: Strategy, config: &OptConfig) -> OptResult<Optimized> {
    if sim.room_count() == 0 {
        return Err(OptError::NoRooms);
    }
    let strategy = match strategy {
        Strategy::Auto => select_strategy(sim.building(), &config.selector),
        s => s,
    };

    let (assignment, history, generations) = match strategy {
        Strategy::NearestGreedy  => (greedy::nearest_first(sim)?, Vec::new(), 0),
        Strategy::PriorityGreedy => (greedy::priority_first(sim)?, Vec::new(), 0),
        Strategy::BalancedGreedy | Strategy::Auto => (greedy::balanced(sim)?, Vec::new(), 0),
        Strategy::TopDown        => (greedy::top_down(sim)?, Vec::new(), 0),
        Strategy::Genetic => {
            let seeds = vec![
                greedy::nearest_first(sim)?,
                greedy::priority_first(sim)?,
                greedy::balanced(sim)?,
                greedy::top_down(sim)?,
            ];
            let outcome = genetic::search(sim, &config.genetic, seeds)?;
            (outcome.best, outcome.history, outcome.generations)
        }
    };

    let evaluation = sim.evaluate(&assignment)?;
    let cost = Cost::of(&evaluation);
    info!(strategy = %strategy, total = %cost.total_time, inversions = cost.priority_inversions, "optimized assignment");
    Ok(Optimized { strategy, assignment, evaluation, cost, history, generations })
}
