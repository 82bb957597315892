use std::fmt;

use thiserror::Error;

use crate::operation::Operation;

/// Parallel error code and message lists carried by application faults
///
/// Entries are only ever added as `(code, message)` pairs, so both lists
/// always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTexts {
    codes: Vec<String>,
    messages: Vec<String>,
}

impl ErrorTexts {
    /// Create a list holding a single pair
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        let mut texts = Self::default();
        texts.push(code, message);
        texts
    }

    /// Append a pair to both lists
    pub fn push(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.codes.push(code.into());
        self.messages.push(message.into());
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Iterate `(code, message)` pairs in insertion order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.codes.iter().map(String::as_str).zip(self.messages.iter().map(String::as_str))
    }

    pub fn first_code(&self) -> Option<&str> {
        self.codes.first().map(String::as_str)
    }

    pub fn first_message(&self) -> Option<&str> {
        self.messages.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

impl<C: Into<String>, M: Into<String>> FromIterator<(C, M)> for ErrorTexts {
    fn from_iter<I: IntoIterator<Item = (C, M)>>(iter: I) -> Self {
        let mut texts = Self::default();
        for (code, message) in iter {
            texts.push(code, message);
        }
        texts
    }
}

/// Closed set of failure kinds understood by the exception handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaultKind {
    /// Lazily constructed component failed during initialization
    BeanCreation,
    /// Caller is not permitted to use the API
    AccessDenied,
    /// Downstream authentication call failed
    Authentication {
        texts: ErrorTexts,
        /// Declared HTTP status, `0` when none was declared
        status_code: u16,
    },
    /// Request body could not be read or deserialized
    MessageNotReadable,
    /// Protocol-level request fault (unsupported method, media type, ...)
    Transport,
    /// Component wiring failure other than construction
    BeanWiring,
    /// A date/time value failed to parse
    DateTimeParse,
    /// Declared application fault
    App {
        texts: ErrorTexts,
        /// Operation the failing request belonged to, if known
        operation: Option<Operation>,
    },
    /// Unchecked application fault
    AppUnchecked { texts: ErrorTexts },
    /// Opaque runtime fault with no domain semantics
    Other,
}

impl FaultKind {
    /// Short kind name used in logs
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BeanCreation => "bean_creation",
            Self::AccessDenied => "access_denied",
            Self::Authentication { .. } => "authentication",
            Self::MessageNotReadable => "message_not_readable",
            Self::Transport => "transport",
            Self::BeanWiring => "bean_wiring",
            Self::DateTimeParse => "date_time_parse",
            Self::App { .. } => "app",
            Self::AppUnchecked { .. } => "app_unchecked",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failure raised while processing a request
///
/// Faults form a chain through [`Fault::cause`]. The exception handler
/// walks that chain to classify wrapped failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct Fault {
    kind: FaultKind,
    message: String,
    #[source]
    cause: Option<Box<Fault>>,
}

impl Fault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Wrap `cause` as the direct cause of this fault
    #[must_use]
    pub fn with_cause(mut self, cause: Self) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn bean_creation(message: impl Into<String>) -> Self {
        Self::new(FaultKind::BeanCreation, message)
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::new(FaultKind::AccessDenied, message)
    }

    /// Authentication fault with a declared status (`0` for none)
    pub fn authentication(texts: ErrorTexts, status_code: u16) -> Self {
        let message = texts.first_message().unwrap_or("authentication failed").to_owned();
        Self::new(FaultKind::Authentication { texts, status_code }, message)
    }

    pub fn message_not_readable(message: impl Into<String>) -> Self {
        Self::new(FaultKind::MessageNotReadable, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Transport, message)
    }

    pub fn bean_wiring(message: impl Into<String>) -> Self {
        Self::new(FaultKind::BeanWiring, message)
    }

    pub fn date_time_parse(message: impl Into<String>) -> Self {
        Self::new(FaultKind::DateTimeParse, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Other, message)
    }

    /// Declared application fault with a single code and message
    pub fn app(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::app_with_texts(ErrorTexts::new(code, message))
    }

    /// Declared application fault carrying several code/message pairs
    pub fn app_with_texts(texts: ErrorTexts) -> Self {
        let message = texts.first_message().unwrap_or_default().to_owned();
        Self::new(FaultKind::App { texts, operation: None }, message)
    }

    /// Unchecked application fault with a single code and message
    pub fn app_unchecked(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::app_unchecked_with_texts(ErrorTexts::new(code, message))
    }

    pub fn app_unchecked_with_texts(texts: ErrorTexts) -> Self {
        let message = texts.first_message().unwrap_or_default().to_owned();
        Self::new(FaultKind::AppUnchecked { texts }, message)
    }

    /// Tag a declared application fault with the operation it belongs to
    ///
    /// Has no effect on other kinds.
    #[must_use]
    pub fn with_operation(mut self, op: Operation) -> Self {
        if let FaultKind::App { operation, .. } = &mut self.kind {
            *operation = Some(op);
        }
        self
    }

    pub const fn kind(&self) -> &FaultKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Direct cause of this fault
    pub fn cause(&self) -> Option<&Self> {
        self.cause.as_deref()
    }

    /// Code/message lists, for kinds that carry them
    pub const fn error_texts(&self) -> Option<&ErrorTexts> {
        match &self.kind {
            FaultKind::App { texts, .. }
            | FaultKind::AppUnchecked { texts }
            | FaultKind::Authentication { texts, .. } => Some(texts),
            _ => None,
        }
    }

    /// Operation declared on an application fault
    pub const fn operation(&self) -> Option<Operation> {
        match &self.kind {
            FaultKind::App { operation, .. } => *operation,
            _ => None,
        }
    }

    pub const fn is_app(&self) -> bool {
        matches!(self.kind, FaultKind::App { .. })
    }
}
