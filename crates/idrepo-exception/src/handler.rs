use std::borrow::Cow;

use http::StatusCode;
use idrepo_config::ResponseConfig;
use idrepo_core::codes::{
    AUTHORIZATION_FAILED, INVALID_INPUT_PARAMETER, INVALID_REQUEST, UNAUTHORIZED, UNKNOWN_ERROR,
};
use idrepo_core::{ErrorConstant, Fault, FaultKind, Operation, RequestInfo};

use crate::response::{ResponseBuilder, ResponseEnvelope};
use crate::walker::{render_chain, root_cause};

/// Field reported when a request timestamp fails to parse
pub const REQUEST_TIME: &str = "requesttime";

/// Classification rules in priority order, first match wins
///
/// [`Rule::CatchAll`] applies when none of these match.
pub const RULES: [Rule; 7] = [
    Rule::BeanCreation,
    Rule::AccessDenied,
    Rule::Authentication,
    Rule::UnreadableRequestTime,
    Rule::InvalidRequest,
    Rule::App,
    Rule::AppUnchecked,
];

/// Handling path selected for a fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Component construction failed; reclassified by its root cause
    BeanCreation,
    AccessDenied,
    /// Downstream authentication failed; the only rule that varies status
    Authentication,
    /// Unreadable body caused by a malformed request timestamp
    UnreadableRequestTime,
    /// Unreadable body, transport or wiring fault
    InvalidRequest,
    /// Declared application fault, passed through with its operation
    App,
    /// Unchecked application fault, passed through
    AppUnchecked,
    CatchAll,
}

impl Rule {
    /// Select the first rule matching `fault`
    pub fn classify(fault: &Fault) -> Self {
        RULES.into_iter().find(|rule| rule.matches(fault)).unwrap_or(Self::CatchAll)
    }

    pub fn matches(self, fault: &Fault) -> bool {
        let kind = fault.kind();
        match self {
            Self::BeanCreation => matches!(kind, FaultKind::BeanCreation),
            Self::AccessDenied => matches!(kind, FaultKind::AccessDenied),
            Self::Authentication => matches!(kind, FaultKind::Authentication { .. }),
            Self::UnreadableRequestTime => {
                matches!(kind, FaultKind::MessageNotReadable)
                    && matches!(root_cause(fault).fault().kind(), FaultKind::DateTimeParse)
            }
            Self::InvalidRequest => matches!(
                kind,
                FaultKind::MessageNotReadable | FaultKind::Transport | FaultKind::BeanWiring
            ),
            Self::App => matches!(kind, FaultKind::App { .. }),
            Self::AppUnchecked => matches!(kind, FaultKind::AppUnchecked { .. }),
            Self::CatchAll => true,
        }
    }

    /// Fixed error this rule responds with, if any
    pub const fn template(self) -> Option<ErrorConstant> {
        match self {
            Self::AccessDenied => Some(AUTHORIZATION_FAILED),
            Self::Authentication => Some(UNAUTHORIZED),
            Self::UnreadableRequestTime => Some(INVALID_INPUT_PARAMETER),
            Self::InvalidRequest => Some(INVALID_REQUEST),
            Self::CatchAll => Some(UNKNOWN_ERROR),
            Self::BeanCreation | Self::App | Self::AppUnchecked => None,
        }
    }

    pub const fn handler_name(self) -> &'static str {
        match self {
            Self::BeanCreation => "handle_bean_creation",
            Self::AccessDenied => "handle_access_denied",
            Self::Authentication => "handle_authentication",
            Self::UnreadableRequestTime | Self::InvalidRequest => "handle_request_internal",
            Self::App => "handle_app",
            Self::AppUnchecked => "handle_app_unchecked",
            Self::CatchAll => "handle_all",
        }
    }
}

/// Translated fault: transport status plus response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandledFault {
    pub status: StatusCode,
    pub envelope: ResponseEnvelope,
}

/// Fault after classification, before envelope assembly
struct Classified<'a> {
    fault: Cow<'a, Fault>,
    status: StatusCode,
    operation: Option<Operation>,
}

impl<'a> Classified<'a> {
    fn ok(fault: Cow<'a, Fault>, operation: Option<Operation>) -> Self {
        Self {
            fault,
            status: StatusCode::OK,
            operation,
        }
    }
}

/// Terminal fault handler
///
/// Every fault resolves to an envelope and a status code. All statuses are
/// `200 OK` except for authentication faults.
#[derive(Debug, Clone)]
pub struct ExceptionHandler {
    builder: ResponseBuilder,
}

impl ExceptionHandler {
    pub fn new(config: &ResponseConfig) -> Self {
        Self {
            builder: ResponseBuilder::new(config),
        }
    }

    /// Translate `fault` raised while serving `request`
    pub fn handle(&self, fault: &Fault, request: &RequestInfo) -> HandledFault {
        let classified = self.dispatch(Rule::classify(fault), fault, request);
        let envelope = self
            .builder
            .build(&classified.fault, request.method.as_ref(), classified.operation);

        HandledFault {
            status: classified.status,
            envelope,
        }
    }

    fn dispatch<'a>(&self, rule: Rule, fault: &'a Fault, request: &RequestInfo) -> Classified<'a> {
        log_fault(rule, fault, request);

        match rule {
            Rule::BeanCreation => self.reclassify_by_root(fault, request),
            Rule::Authentication => classify_authentication(fault),
            Rule::UnreadableRequestTime => Classified::ok(
                Cow::Owned(Fault::app(
                    INVALID_INPUT_PARAMETER.code,
                    INVALID_INPUT_PARAMETER.message_with(REQUEST_TIME),
                )),
                trailing_operation(request),
            ),
            Rule::App => Classified::ok(Cow::Borrowed(fault), fault.operation()),
            Rule::AppUnchecked => Classified::ok(Cow::Borrowed(fault), None),
            Rule::AccessDenied | Rule::InvalidRequest | Rule::CatchAll => {
                Classified::ok(Cow::Owned(fixed_fault(rule)), None)
            }
        }
    }

    fn reclassify_by_root<'a>(&self, fault: &'a Fault, request: &RequestInfo) -> Classified<'a> {
        let root = root_cause(fault).fault();
        let rule = match root.kind() {
            FaultKind::Authentication { .. } => Rule::Authentication,
            FaultKind::AppUnchecked { .. } => Rule::AppUnchecked,
            _ => Rule::CatchAll,
        };
        self.dispatch(rule, root, request)
    }
}

fn classify_authentication(fault: &Fault) -> Classified<'_> {
    let FaultKind::Authentication { texts, status_code } = fault.kind() else {
        return Classified::ok(Cow::Owned(fixed_fault(Rule::CatchAll)), None);
    };

    let translated = match (texts.first_code(), texts.first_message()) {
        (Some(code), Some(message)) => Fault::app_unchecked(code, message),
        _ => Fault::app_unchecked(UNAUTHORIZED.code, UNAUTHORIZED.message),
    };

    let status = match *status_code {
        0 => StatusCode::UNAUTHORIZED,
        declared => StatusCode::from_u16(declared).unwrap_or(StatusCode::UNAUTHORIZED),
    };

    Classified {
        fault: Cow::Owned(translated),
        status,
        operation: None,
    }
}

fn fixed_fault(rule: Rule) -> Fault {
    let constant = rule.template().unwrap_or(UNKNOWN_ERROR);
    Fault::app_unchecked(constant.code, constant.message)
}

/// Operation named by the last path segment of a deactivate/reactivate call
fn trailing_operation(request: &RequestInfo) -> Option<Operation> {
    [Operation::Deactivate, Operation::Reactivate]
        .into_iter()
        .find(|op| request.path_ends_with(op.as_ref()))
}

fn log_fault(rule: Rule, fault: &Fault, request: &RequestInfo) {
    let root = root_cause(fault).fault();
    tracing::error!(
        handler = rule.handler_name(),
        user = request.user_name(),
        kind = %fault.kind(),
        root_cause = %root,
        chain = %render_chain(fault),
        "{} - fault translated to error response",
        rule.handler_name()
    );
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use http::Method;
    use idrepo_core::ErrorTexts;

    use super::*;
    use crate::response::ServiceError;

    fn handler() -> ExceptionHandler {
        ExceptionHandler::new(&ResponseConfig {
            version: "v1".to_owned(),
            ids: HashMap::from([
                (Operation::Read, "mosip.id.read".to_owned()),
                (Operation::Create, "mosip.id.create".to_owned()),
                (Operation::Update, "mosip.id.update".to_owned()),
                (Operation::Deactivate, "mosip.id.deactivate".to_owned()),
                (Operation::Reactivate, "mosip.id.reactivate".to_owned()),
            ]),
        })
    }

    fn single(constant: ErrorConstant) -> Option<Vec<ServiceError>> {
        Some(vec![ServiceError::new(constant.code, constant.message)])
    }

    fn unreadable_time() -> Fault {
        Fault::message_not_readable("JSON parse error")
            .with_cause(Fault::other("invalid format").with_cause(Fault::date_time_parse("bad timestamp")))
    }

    #[test]
    fn rules_are_tried_in_priority_order() {
        assert_eq!(Rule::classify(&Fault::bean_creation("x")), Rule::BeanCreation);
        assert_eq!(Rule::classify(&unreadable_time()), Rule::UnreadableRequestTime);
        assert_eq!(Rule::classify(&Fault::message_not_readable("x")), Rule::InvalidRequest);
        assert_eq!(Rule::classify(&Fault::transport("x")), Rule::InvalidRequest);
        assert_eq!(Rule::classify(&Fault::bean_wiring("x")), Rule::InvalidRequest);
        assert_eq!(Rule::classify(&Fault::app("C", "m")), Rule::App);
        assert_eq!(Rule::classify(&Fault::date_time_parse("x")), Rule::CatchAll);
        assert_eq!(Rule::classify(&Fault::other("x")), Rule::CatchAll);
    }

    #[test]
    fn access_denied_is_fixed_regardless_of_method() {
        for method in [Method::GET, Method::POST, Method::DELETE] {
            let request = RequestInfo::new(method, "/idrepository/v1/identity/");
            let handled = handler().handle(&Fault::access_denied("denied"), &request);
            assert_eq!(handled.status, StatusCode::OK);
            assert_eq!(handled.envelope.errors, single(AUTHORIZATION_FAILED));
        }
    }

    #[test]
    fn authentication_uses_fault_texts_and_declared_status() {
        let texts: ErrorTexts = [("KER-ATH-403", "Forbidden"), ("KER-ATH-500", "other")]
            .into_iter()
            .collect();
        let request = RequestInfo::new(Method::GET, "/identity/123");
        let handled = handler().handle(&Fault::authentication(texts, 403), &request);

        assert_eq!(handled.status, StatusCode::FORBIDDEN);
        assert_eq!(handled.envelope.id.as_deref(), Some("mosip.id.read"));
        assert_eq!(
            handled.envelope.errors,
            Some(vec![ServiceError::new("KER-ATH-403", "Forbidden")])
        );
    }

    #[test]
    fn invalid_declared_status_falls_back_to_unauthorized() {
        let handled = handler().handle(
            &Fault::authentication(ErrorTexts::default(), 42),
            &RequestInfo::default(),
        );
        assert_eq!(handled.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn bean_creation_with_authentication_root() {
        let fault = Fault::bean_creation("validator init failed")
            .with_cause(Fault::other("rest call").with_cause(Fault::authentication(ErrorTexts::default(), 0)));
        let handled = handler().handle(&fault, &RequestInfo::new(Method::POST, "/identity"));

        assert_eq!(handled.status, StatusCode::UNAUTHORIZED);
        assert_eq!(handled.envelope.errors, single(UNAUTHORIZED));
        assert_eq!(handled.envelope.id.as_deref(), Some("mosip.id.create"));
    }

    #[test]
    fn bean_creation_with_unchecked_root() {
        let fault = Fault::bean_creation("init").with_cause(Fault::app_unchecked("IDR-IDC-010", "master data"));
        let handled = handler().handle(&fault, &RequestInfo::default());

        assert_eq!(handled.status, StatusCode::OK);
        assert_eq!(
            handled.envelope.errors,
            Some(vec![ServiceError::new("IDR-IDC-010", "master data")])
        );
    }

    #[test]
    fn bean_creation_with_opaque_root_is_unknown() {
        let fault = Fault::bean_creation("init").with_cause(Fault::other("io"));
        let handled = handler().handle(&fault, &RequestInfo::default());
        assert_eq!(handled.status, StatusCode::OK);
        assert_eq!(handled.envelope.errors, single(UNKNOWN_ERROR));
    }

    #[test]
    fn unreadable_request_time_on_deactivate_path() {
        let request = RequestInfo::new(Method::PATCH, "/idrepository/v1/vid/deactivate");
        let handled = handler().handle(&unreadable_time(), &request);

        assert_eq!(handled.status, StatusCode::OK);
        assert_eq!(handled.envelope.id.as_deref(), Some("mosip.id.deactivate"));
        let errors = handled.envelope.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_code, INVALID_INPUT_PARAMETER.code);
        assert!(errors[0].message.contains("requesttime"));
    }

    #[test]
    fn unreadable_request_time_on_reactivate_path() {
        let request = RequestInfo::new(Method::POST, "/idrepository/v1/vid/reactivate");
        let handled = handler().handle(&unreadable_time(), &request);
        assert_eq!(handled.envelope.id.as_deref(), Some("mosip.id.reactivate"));
    }

    #[test]
    fn unreadable_request_time_elsewhere_uses_method() {
        let request = RequestInfo::new(Method::PATCH, "/idrepository/v1/identity/");
        let handled = handler().handle(&unreadable_time(), &request);
        assert_eq!(handled.envelope.id.as_deref(), Some("mosip.id.update"));
    }

    #[test]
    fn unreadable_body_is_invalid_request() {
        let fault = Fault::message_not_readable("bad json").with_cause(Fault::other("eof"));
        let handled = handler().handle(&fault, &RequestInfo::new(Method::POST, "/identity"));
        assert_eq!(handled.status, StatusCode::OK);
        assert_eq!(handled.envelope.errors, single(INVALID_REQUEST));
    }

    #[test]
    fn app_fault_operation_overrides_method() {
        let fault = Fault::app("IDR-IDC-005", "record exists").with_operation(Operation::Update);
        let handled = handler().handle(&fault, &RequestInfo::new(Method::GET, "/identity"));
        assert_eq!(handled.envelope.id.as_deref(), Some("mosip.id.update"));
    }

    #[test]
    fn unchecked_app_fault_has_no_explicit_operation() {
        let fault = Fault::app_unchecked("IDR-IDC-006", "db error");
        let handled = handler().handle(&fault, &RequestInfo::new(Method::DELETE, "/identity"));
        assert!(handled.envelope.id.is_none());
        assert_eq!(handled.envelope.version, "v1");
    }

    #[test]
    fn app_fault_duplicates_collapse() {
        let texts: ErrorTexts = [("C1", "dup"), ("C2", "dup"), ("C3", "unique")].into_iter().collect();
        let handled = handler().handle(&Fault::app_with_texts(texts), &RequestInfo::default());
        assert_eq!(
            handled.envelope.errors,
            Some(vec![ServiceError::new("C1", "dup"), ServiceError::new("C3", "unique")])
        );
    }

    #[test]
    fn anything_else_is_unknown_error() {
        for fault in [Fault::other("panic"), Fault::date_time_parse("bare")] {
            let handled = handler().handle(&fault, &RequestInfo::new(Method::GET, "/identity"));
            assert_eq!(handled.status, StatusCode::OK);
            assert_eq!(handled.envelope.errors, single(UNKNOWN_ERROR));
        }
    }
}
