//! Error types for PetalSonic channels

use crate::asset::Priority;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PetalSonicError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid sound asset: {0}")]
    InvalidAsset(String),

    #[error("No channel available for a {requested:?} priority sound")]
    ChannelsExhausted { requested: Priority },

    #[error("Engine error: {0}")]
    Engine(String),
}

pub type Result<T> = std::result::Result<T, PetalSonicError>;
