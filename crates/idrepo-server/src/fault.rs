use std::any::Any;
use std::sync::Arc;

use axum::Json;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use idrepo_core::{Fault, RequestInfo};
use idrepo_exception::ExceptionHandler;

/// Handler error carrying a [`Fault`]
///
/// The response produced here is a placeholder: the fault travels in the
/// response extensions and [`exception_middleware`] replaces the response
/// with the translated envelope.
#[derive(Debug, Clone)]
pub struct ApiFault(pub Fault);

impl From<Fault> for ApiFault {
    fn from(fault: Fault) -> Self {
        Self(fault)
    }
}

impl IntoResponse for ApiFault {
    fn into_response(self) -> Response {
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(self.0);
        response
    }
}

/// Middleware that turns faults raised by inner handlers into error envelopes
///
/// Captures the request method, path and user before the handler runs,
/// since the handler consumes the request.
pub async fn exception_middleware(handler: Arc<ExceptionHandler>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let info = RequestInfo::from_parts(&parts);

    let mut response = next.run(Request::from_parts(parts, body)).await;

    match response.extensions_mut().remove::<Fault>() {
        Some(fault) => translate(&handler, &fault, &info),
        None => response,
    }
}

/// Translate a fault into the JSON envelope response
pub fn translate(handler: &ExceptionHandler, fault: &Fault, info: &RequestInfo) -> Response {
    let handled = handler.handle(fault, info);
    (handled.status, Json(handled.envelope)).into_response()
}

/// Fallback for routes that exist but not for the request method
pub async fn method_not_allowed(request: Request) -> ApiFault {
    ApiFault(Fault::transport(format!(
        "request method '{}' is not supported",
        request.method()
    )))
}

/// Turn a handler panic into a fault for [`exception_middleware`]
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = match panic.downcast::<String>() {
        Ok(message) => *message,
        Err(panic) => panic
            .downcast_ref::<&str>()
            .map_or_else(|| "unknown panic payload".to_owned(), |message| (*message).to_owned()),
    };

    ApiFault(Fault::other(format!("handler panicked: {detail}"))).into_response()
}
