//! CLI errors

use xv_core::{ConfigError, SceneError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing scene file argument")]
    MissingScene,
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
    #[error("unknown flag: {0}")]
    UnknownFlag(String),
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
    #[error("scene: {0}")]
    Scene(#[from] SceneError),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}
