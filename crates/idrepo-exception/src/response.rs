use std::sync::Arc;

use http::Method;
use idrepo_config::ResponseConfig;
use idrepo_core::{Fault, Operation};
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate;
use crate::operation::ResponseIds;
use crate::walker::domain_cause;

/// Single `(errorCode, message)` record of an error response
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceError {
    pub error_code: String,
    pub message: String,
}

impl ServiceError {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// Error response body
///
/// `id` and `errors` are omitted from the JSON when absent; an empty
/// `errors` list is serialized as `[]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ServiceError>>,
}

/// Assembles [`ResponseEnvelope`]s from classified faults
///
/// Holds the identifier table and version fixed at startup. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    ids: ResponseIds,
    version: String,
}

impl ResponseBuilder {
    pub fn new(config: &ResponseConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                ids: ResponseIds::new(config.ids.clone()),
                version: config.version.clone(),
            }),
        }
    }

    /// Build the envelope for an already classified fault
    ///
    /// Errors come from the fault's domain cause; the identifier from the
    /// explicit operation or, failing that, the request method.
    pub fn build(&self, fault: &Fault, method: Option<&Method>, operation: Option<Operation>) -> ResponseEnvelope {
        let content = domain_cause(fault);

        ResponseEnvelope {
            id: self.inner.ids.resolve_id(operation, method).map(str::to_owned),
            version: self.inner.version.clone(),
            errors: aggregate(content),
        }
    }
}
