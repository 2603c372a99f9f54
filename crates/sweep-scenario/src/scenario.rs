//! Whole scenarios: building, team and run parameters.
//!
//! ```json
//! {
//!   "building":   { "rooms": [...], "corridors": [...], "exits": [...], "connections": [...] },
//!   "responders": [ { "id": "A", "start": "E1" }, { "id": "B", "start": "E2", "walk_speed": 1.2 } ],
//!   "parameters": {
//!     "emergency_type":   "fire",
//!     "max_time_secs":    600,
//!     "strategy":         "genetic",
//!     "clearance_policy": "return_to_exit",
//!     "seed":             7
//!   }
//! }
//! ```
//!
//! `parameters` and every field in it are optional.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use sweep_core::SimTime;
use sweep_nav::{Building, Navigator, Responder};
use sweep_opt::{optimize_with, GeneticConfig, OptConfig, Optimized, Strategy};
use sweep_sim::{ClearancePolicy, SimConfig, Simulator, SweepReport};

use crate::building::{unwrap_building, BuildingRecord};
use crate::responders::ResponderRecord;
use crate::{ScenarioError, ScenarioResult};

// ── Parameters ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioParams {
    /// Free text carried into the report; not interpreted.
    pub emergency_type: String,
    /// Soft bound on the sweep; exceeding it reports `success = false`.
    pub max_time:       Option<SimTime>,
    pub strategy:       Strategy,
    pub policy:         ClearancePolicy,
    /// Genetic search seed.
    pub seed:           u64,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self {
            emergency_type: "fire".to_string(),
            max_time:       None,
            strategy:       Strategy::Auto,
            policy:         ClearancePolicy::default(),
            seed:           GeneticConfig::default().seed,
        }
    }
}

#[derive(Deserialize, Default)]
struct ParamsRecord {
    #[serde(default)]
    emergency_type:   Option<String>,
    #[serde(default)]
    max_time_secs:    Option<f64>,
    #[serde(default)]
    strategy:         Option<String>,
    #[serde(default)]
    clearance_policy: Option<String>,
    #[serde(default)]
    seed:             Option<u64>,
}

impl ParamsRecord {
    fn into_params(self) -> ScenarioResult<ScenarioParams> {
        let mut p = ScenarioParams::default();
        if let Some(e) = self.emergency_type {
            p.emergency_type = e;
        }
        if let Some(secs) = self.max_time_secs {
            if !secs.is_finite() || secs < 0.0 {
                return Err(ScenarioError::Parse(format!("max_time_secs {secs} must be a non-negative number")));
            }
            p.max_time = Some(SimTime::from_secs_f64(secs));
        }
        if let Some(s) = self.strategy {
            p.strategy = s.parse()?;
        }
        if let Some(c) = self.clearance_policy {
            p.policy = c.parse().map_err(ScenarioError::Parse)?;
        }
        if let Some(seed) = self.seed {
            p.seed = seed;
        }
        Ok(p)
    }
}

#[derive(Deserialize)]
struct ScenarioRecord {
    building:   serde_json::Value,
    #[serde(default)]
    responders: Vec<ResponderRecord>,
    #[serde(default)]
    parameters: ParamsRecord,
}

// ── Scenario ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub building:   Building,
    pub responders: Vec<Responder>,
    pub params:     ScenarioParams,
}

/// Output of [`Scenario::run`].
pub struct ScenarioRun {
    pub optimized: Optimized,
    pub report:    SweepReport,
}

impl Scenario {
    pub fn new(building: Building, responders: Vec<Responder>) -> Self {
        Self { building, responders, params: ScenarioParams::default() }
    }

    /// Six 16 m² rooms on both sides of a 30 m corridor with an exit at each
    /// end, swept by one responder from each exit.
    pub fn canonical_basic() -> Self {
        Self::new(
            Building::two_sided_corridor(3, 30.0, 16.0),
            vec![Responder::new("A", "E1"), Responder::new("B", "E2")],
        )
    }

    pub fn with_params(mut self, params: ScenarioParams) -> Self {
        self.params = params;
        self
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig { max_time: self.params.max_time, policy: self.params.policy }
    }

    pub fn opt_config(&self) -> OptConfig {
        OptConfig {
            genetic: GeneticConfig { seed: self.params.seed, ..GeneticConfig::default() },
            sim: self.sim_config(),
            ..OptConfig::default()
        }
    }

    /// Validate the team and lay out the building.
    ///
    /// # Errors
    ///
    /// [`ScenarioError::NoResponders`] for an empty team; otherwise the
    /// navigation error naming the offending entity.
    pub fn navigator(&self) -> ScenarioResult<Navigator> {
        if self.responders.is_empty() {
            return Err(ScenarioError::NoResponders);
        }
        for r in &self.responders {
            r.validate()?;
        }
        let nav = Navigator::build(&self.building)?;
        for r in &self.responders {
            nav.start_of(r)?;
        }
        Ok(nav)
    }

    /// Optimise with the scenario's strategy and replay the winner.
    pub fn run(&self) -> ScenarioResult<ScenarioRun> {
        let nav = self.navigator()?;
        let config = self.opt_config();
        let sim = Simulator::new(&self.building, &nav, &self.responders, config.sim.clone())?;
        let optimized = optimize_with(&sim, self.params.strategy, &config)?;
        let report = sim.simulate(&optimized.assignment)?;
        info!(
            emergency = %self.params.emergency_type,
            strategy = %optimized.strategy,
            total = %report.total_time,
            success = report.success,
            "scenario finished"
        );
        Ok(ScenarioRun { optimized, report })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate a whole scenario from a JSON file.
pub fn load_scenario_json(path: &Path) -> ScenarioResult<Scenario> {
    let file = std::fs::File::open(path).map_err(ScenarioError::Io)?;
    load_scenario_reader(file)
}

/// Like [`load_scenario_json`] but accepts any `Read` source.
///
/// The scenario is validated before it is returned, so layout errors
/// surface here rather than at optimisation time.
pub fn load_scenario_reader<R: Read>(reader: R) -> ScenarioResult<Scenario> {
    let record: ScenarioRecord = serde_json::from_reader(reader)?;
    let building: BuildingRecord = serde_json::from_value(unwrap_building(record.building))?;
    let responders = record
        .responders
        .into_iter()
        .map(ResponderRecord::into_responder)
        .collect::<ScenarioResult<Vec<_>>>()?;
    let scenario = Scenario {
        building: building.into_building(),
        responders,
        params: record.parameters.into_params()?,
    };
    scenario.navigator()?;
    Ok(scenario)
}
