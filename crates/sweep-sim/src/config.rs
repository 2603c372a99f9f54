//! Simulation configuration.

use std::str::FromStr;

use sweep_core::SimTime;

/// When a responder's sweep counts as finished.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClearancePolicy {
    /// At the end of the last room check.
    #[default]
    LastCheckComplete,
    /// On arrival at the nearest exit after the last room.
    ReturnToExit,
}

impl ClearancePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            ClearancePolicy::LastCheckComplete => "last_check_complete",
            ClearancePolicy::ReturnToExit      => "return_to_exit",
        }
    }
}

impl std::fmt::Display for ClearancePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClearancePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last_check_complete" => Ok(ClearancePolicy::LastCheckComplete),
            "return_to_exit"      => Ok(ClearancePolicy::ReturnToExit),
            other => Err(format!("unknown clearance policy {other:?}")),
        }
    }
}

/// Replay settings.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Soft bound: a sweep finishing later is reported with
    /// `success = false`.
    pub max_time: Option<SimTime>,
    pub policy:   ClearancePolicy,
}

impl SimConfig {
    pub fn with_max_time(mut self, max_time: SimTime) -> Self {
        self.max_time = Some(max_time);
        self
    }

    pub fn with_policy(mut self, policy: ClearancePolicy) -> Self {
        self.policy = policy;
        self
    }
}
