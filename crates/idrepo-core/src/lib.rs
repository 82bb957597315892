#![allow(clippy::must_use_candidate)]

pub mod codes;
mod context;
mod fault;
mod operation;

pub use codes::ErrorConstant;
pub use context::{RequestInfo, UserContext};
pub use fault::{ErrorTexts, Fault, FaultKind};
pub use operation::Operation;
