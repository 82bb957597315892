//! Cause-chain walkers
//!
//! Two walkers that intentionally disagree: [`root_cause`] goes to the
//! deepest cause and feeds diagnostics and reclassification, while
//! [`domain_cause`] stops at the last declared application fault of the
//! leading chain and selects response content.

use idrepo_core::Fault;

/// Upper bound on the number of links followed in a cause chain
pub const MAX_CAUSE_DEPTH: usize = 64;

/// Outcome of a root-cause walk
#[derive(Debug, Clone, Copy)]
pub enum RootCause<'a> {
    /// Deepest cause in the chain (the fault itself when it has no cause)
    Deepest(&'a Fault),
    /// The walk was abandoned and the domain cause was used instead
    DomainFallback(&'a Fault),
}

impl<'a> RootCause<'a> {
    pub const fn fault(self) -> &'a Fault {
        match self {
            Self::Deepest(fault) | Self::DomainFallback(fault) => fault,
        }
    }
}

/// Resolve the deepest cause of `fault`
///
/// Never fails: chains longer than [`MAX_CAUSE_DEPTH`] links fall back to
/// [`domain_cause`] with a warning.
pub fn root_cause(fault: &Fault) -> RootCause<'_> {
    let (last, exhausted) = walk(fault, |_| true);
    if !exhausted {
        return RootCause::Deepest(last);
    }

    tracing::warn!(
        max_depth = MAX_CAUSE_DEPTH,
        fault = %fault,
        "cause chain exceeds maximum depth, falling back to domain cause"
    );
    RootCause::DomainFallback(domain_cause(fault))
}

/// Follow causes only while the next cause is a declared application fault
///
/// Stops after [`MAX_CAUSE_DEPTH`] links with a warning, returning the
/// fault reached so far.
pub fn domain_cause(fault: &Fault) -> &Fault {
    let (last, exhausted) = walk(fault, Fault::is_app);
    if exhausted {
        tracing::warn!(
            max_depth = MAX_CAUSE_DEPTH,
            fault = %fault,
            "application fault chain exceeds maximum depth, truncating"
        );
    }
    last
}

/// Follow at most [`MAX_CAUSE_DEPTH`] links while `follow` accepts the next
/// cause; the flag is set when an accepted link remained past the bound
fn walk<'a>(fault: &'a Fault, follow: impl Fn(&Fault) -> bool) -> (&'a Fault, bool) {
    let mut current = fault;
    for _ in 0..MAX_CAUSE_DEPTH {
        match current.cause() {
            Some(next) if follow(next) => current = next,
            _ => return (current, false),
        }
    }
    (current, current.cause().is_some_and(follow))
}

/// Render a fault chain on one line for logs, outermost first
pub fn render_chain(fault: &Fault) -> String {
    let mut rendered = fault.to_string();
    let mut current = fault;
    for _ in 0..MAX_CAUSE_DEPTH {
        let Some(next) = current.cause() else {
            return rendered;
        };
        rendered.push_str(" <- ");
        rendered.push_str(&next.to_string());
        current = next;
    }
    rendered.push_str(" <- ...");
    rendered
}
