use serde::{Deserialize, Serialize};

/// Logical operation a response belongs to
///
/// Selects the response identifier from the configured table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Read,
    Create,
    Update,
    Deactivate,
    Reactivate,
}
