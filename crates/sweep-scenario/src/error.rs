use thiserror::Error;

use sweep_nav::NavError;
use sweep_opt::OptError;
use sweep_sim::SimError;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario parse error: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario has no responders")]
    NoResponders,

    #[error(transparent)]
    Nav(#[from] NavError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Opt(#[from] OptError),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
