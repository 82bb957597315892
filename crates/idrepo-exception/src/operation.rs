use std::collections::HashMap;

use http::Method;
use idrepo_core::Operation;

/// Pick the operation a response belongs to
///
/// An explicit operation always wins. Otherwise GET maps to `read`, POST to
/// `create` and PATCH to `update`; any other method yields no operation.
pub fn resolve(explicit: Option<Operation>, method: Option<&Method>) -> Option<Operation> {
    if explicit.is_some() {
        return explicit;
    }

    match method? {
        m if *m == Method::GET => Some(Operation::Read),
        m if *m == Method::POST => Some(Operation::Create),
        m if *m == Method::PATCH => Some(Operation::Update),
        _ => None,
    }
}

/// Operation to response identifier table
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct ResponseIds {
    ids: HashMap<Operation, String>,
}

impl ResponseIds {
    pub const fn new(ids: HashMap<Operation, String>) -> Self {
        Self { ids }
    }

    /// Identifier for `operation`, `None` when not configured
    pub fn get(&self, operation: Operation) -> Option<&str> {
        self.ids.get(&operation).map(String::as_str)
    }

    /// Resolve the operation and look up its identifier
    pub fn resolve_id(&self, explicit: Option<Operation>, method: Option<&Method>) -> Option<&str> {
        resolve(explicit, method).and_then(|op| self.get(op))
    }
}
