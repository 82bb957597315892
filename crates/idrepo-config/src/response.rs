use std::collections::HashMap;

use idrepo_core::Operation;
use serde::Deserialize;

/// Response envelope settings
///
/// Read once at startup; the exception handler keeps an immutable copy.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseConfig {
    /// Payload version marker written into every error response
    #[serde(default = "default_version")]
    pub version: String,

    /// Response identifier per operation
    ///
    /// Operations without an entry produce responses without an `id`.
    #[serde(default)]
    pub ids: HashMap<Operation, String>,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            ids: HashMap::new(),
        }
    }
}

fn default_version() -> String {
    "v1".to_string()
}
