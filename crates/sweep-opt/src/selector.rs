//! Choosing a strategy from the shape of the building.

use tracing::info;

use sweep_nav::Building;

use crate::config::SelectorConfig;
use crate::strategy::Strategy;

/// Balanced greedy for small single-floor buildings, genetic search for
/// anything larger or taller.
pub fn select_strategy(building: &Building, config: &SelectorConfig) -> Strategy {
    let rooms = building.room_count();
    let floors = building.floor_count();
    let strategy = if rooms <= config.max_simple_rooms && floors <= config.max_simple_floors {
        Strategy::BalancedGreedy
    } else {
        Strategy::Genetic
    };
    info!(rooms, floors, strategy = %strategy, "selected strategy");
    strategy
}
