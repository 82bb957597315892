use idrepo_core::{ErrorTexts, Fault};
use indexmap::IndexMap;

use crate::response::ServiceError;

/// Collect the error records of a fault
///
/// Returns `None` for faults that carry no code/message lists. Records are
/// deduplicated by message text: when the same message appears under
/// several codes, only the first code is kept. First-seen order is
/// preserved.
pub fn aggregate(fault: &Fault) -> Option<Vec<ServiceError>> {
    fault.error_texts().map(dedupe_by_message)
}

fn dedupe_by_message(texts: &ErrorTexts) -> Vec<ServiceError> {
    let mut seen: IndexMap<&str, &str> = IndexMap::with_capacity(texts.len());
    for (code, message) in texts.pairs() {
        seen.entry(message).or_insert(code);
    }

    seen.into_iter()
        .map(|(message, code)| ServiceError::new(code, message))
        .collect()
}
