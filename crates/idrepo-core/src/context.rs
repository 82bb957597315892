use http::Method;

/// Authenticated user attached to a request by upstream auth middleware
///
/// Only used to attribute log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
}

/// Request facts the exception handler needs
#[derive(Debug, Clone, Default)]
pub struct RequestInfo {
    /// HTTP method of the originating request
    pub method: Option<Method>,
    /// Request path, used to detect trailing operation segments
    pub path: Option<String>,
    /// User for log attribution
    pub user: Option<UserContext>,
}

impl RequestInfo {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method: Some(method),
            path: Some(path.into()),
            user: None,
        }
    }

    /// Build from HTTP request parts, picking up any [`UserContext`] extension
    pub fn from_parts(parts: &http::request::Parts) -> Self {
        Self {
            method: Some(parts.method.clone()),
            path: Some(parts.uri.path().to_owned()),
            user: parts.extensions.get::<UserContext>().cloned(),
        }
    }

    /// User name for logs, empty when the request is unauthenticated
    pub fn user_name(&self) -> &str {
        self.user.as_ref().map_or("", |u| u.user_id.as_str())
    }

    /// Whether the request path ends with `suffix`
    pub fn path_ends_with(&self, suffix: &str) -> bool {
        self.path.as_deref().is_some_and(|p| p.ends_with(suffix))
    }
}
