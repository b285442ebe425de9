use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Actor not found: {0:?}")]
    ActorNotFound(crate::core::types::ActorId),

    #[error("Event not found: {0:?}")]
    EventNotFound(crate::core::types::EventId),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Scenario parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
