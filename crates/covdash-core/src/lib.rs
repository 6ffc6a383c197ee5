//! Shared configuration and wall-clock primitives for covdash.

use thiserror::Error;

pub mod app_config;
pub mod clock;
mod config;

pub use app_config::AppConfig;
pub use clock::{hhmm_to_seconds, hours_to_minutes, minutes_to_seconds, seconds_until, ClockError};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
