/// Fixed error code and message template
///
/// Templates use `%s` as the placeholder for a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorConstant {
    pub code: &'static str,
    pub message: &'static str,
}

impl ErrorConstant {
    pub const fn new(code: &'static str, message: &'static str) -> Self {
        Self { code, message }
    }

    /// Fill the `%s` placeholder of the message template
    pub fn message_with(&self, param: &str) -> String {
        self.message.replacen("%s", param, 1)
    }
}

pub const MISSING_INPUT_PARAMETER: ErrorConstant =
    ErrorConstant::new("IDR-IDC-001", "Missing Input Parameter - %s");

pub const INVALID_INPUT_PARAMETER: ErrorConstant =
    ErrorConstant::new("IDR-IDC-002", "Invalid Input Parameter - %s");

pub const INVALID_REQUEST: ErrorConstant = ErrorConstant::new("IDR-IDC-003", "Invalid Request");

pub const UNKNOWN_ERROR: ErrorConstant = ErrorConstant::new("IDR-IDC-004", "Unknown error occurred");

pub const AUTHORIZATION_FAILED: ErrorConstant = ErrorConstant::new("IDR-IDC-007", "Authorization Failed");

/// Default used when an authentication fault carries no error texts
pub const UNAUTHORIZED: ErrorConstant = ErrorConstant::new("KER-ATH-401", "Authentication Failed");
