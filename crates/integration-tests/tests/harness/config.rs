//! Programmatic configuration builder for integration tests

use std::collections::HashMap;
use std::net::SocketAddr;

use idrepo_config::{Config, HealthConfig, ResponseConfig, ServerConfig, TelemetryConfig};
use idrepo_core::Operation;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder with every operation identifier configured
    pub fn new() -> Self {
        let ids = [
            (Operation::Read, "mosip.id.read"),
            (Operation::Create, "mosip.id.create"),
            (Operation::Update, "mosip.id.update"),
            (Operation::Deactivate, "mosip.id.deactivate"),
            (Operation::Reactivate, "mosip.id.reactivate"),
        ]
        .into_iter()
        .map(|(op, id)| (op, id.to_owned()))
        .collect::<HashMap<_, _>>();

        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                response: ResponseConfig {
                    version: "v1".to_owned(),
                    ids,
                },
                telemetry: TelemetryConfig::default(),
            },
        }
    }

    /// Drop the identifier of one operation
    pub fn without_id(mut self, operation: Operation) -> Self {
        self.config.response.ids.remove(&operation);
        self
    }

    /// Set the payload version marker
    pub fn with_version(mut self, version: &str) -> Self {
        self.config.response.version = version.to_owned();
        self
    }

    /// Disable the health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
