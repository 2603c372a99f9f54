use sweep_nav::NavError;
use sweep_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptError {
    #[error("no responders to assign rooms to")]
    NoResponders,

    #[error("building has no rooms to assign")]
    NoRooms,

    #[error("optimizer configuration error: {0}")]
    Config(String),

    #[error("simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("navigation error: {0}")]
    Nav(#[from] NavError),
}

pub type OptResult<T> = Result<T, OptError>;
