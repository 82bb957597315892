use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use idrepo_core::Fault;
use idrepo_exception::handler::REQUEST_TIME;

use crate::fault::ApiFault;

/// JSON body extractor whose rejections become [`Fault`]s
///
/// A body that fails to deserialize is reported as an unreadable message.
/// When the failing field is the request timestamp the cause is tagged as
/// a date/time parse failure so the handler can name the field.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiFault;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiFault(rejection_to_fault(&rejection))),
        }
    }
}

/// Map an axum JSON rejection onto the fault taxonomy
pub fn rejection_to_fault(rejection: &JsonRejection) -> Fault {
    match rejection {
        JsonRejection::JsonDataError(e) => {
            let text = e.body_text();
            let cause = if is_request_time_parse_failure(&text) {
                Fault::date_time_parse(text)
            } else {
                Fault::other(text)
            };
            Fault::message_not_readable("JSON body does not match the expected type").with_cause(cause)
        }
        JsonRejection::JsonSyntaxError(e) => {
            Fault::message_not_readable("JSON body is malformed").with_cause(Fault::other(e.body_text()))
        }
        JsonRejection::MissingJsonContentType(e) => Fault::transport(e.body_text()),
        other => Fault::message_not_readable(other.body_text()),
    }
}

/// serde reasons describing a shape mismatch rather than a rejected value
const STRUCTURAL_REASONS: [&str; 4] = ["invalid type:", "invalid length", "unknown variant", "missing field"];

/// Whether a deserialization error is a value at the request timestamp
/// that failed to parse
///
/// Data errors read `...target type: <path>: <reason>`. The path's last
/// segment must be the timestamp field and the reason must come from the
/// value parser, not from serde's shape checks.
fn is_request_time_parse_failure(text: &str) -> bool {
    request_time_reason(text)
        .is_some_and(|reason| !STRUCTURAL_REASONS.iter().any(|prefix| reason.starts_with(prefix)))
}

fn request_time_reason(text: &str) -> Option<&str> {
    let mut rest = text;
    while let Some((path, reason)) = rest.split_once(": ") {
        if path.rsplit('.').next() == Some(REQUEST_TIME) {
            return Some(reason);
        }
        rest = reason;
    }
    None
}
