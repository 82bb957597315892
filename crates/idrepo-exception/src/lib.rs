//! Fault to error-response translation
//!
//! [`ExceptionHandler`] classifies any [`idrepo_core::Fault`] through an
//! ordered rule table and assembles the [`ResponseEnvelope`] and status
//! code sent back to the caller. The handler is terminal: it never fails.

#![allow(clippy::must_use_candidate)]

pub mod aggregate;
pub mod handler;
pub mod operation;
pub mod response;
pub mod walker;

pub use handler::{ExceptionHandler, HandledFault, Rule, RULES};
pub use operation::ResponseIds;
pub use response::{ResponseBuilder, ResponseEnvelope, ServiceError};
pub use walker::{RootCause, domain_cause, root_cause};
