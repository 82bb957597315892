#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod response;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use env::ExpandError;
pub use response::ResponseConfig;
pub use server::{HealthConfig, ServerConfig};
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level identity repository configuration
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Error response envelope configuration
    #[serde(default)]
    pub response: ResponseConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
