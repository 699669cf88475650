use serde::{Deserialize, Serialize};
use strum::Display;

/// How a wild encounter was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Method {
    Grass,
    Surf,
    Fish,
}

/// Rod used for a fishing encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RodKind {
    Old,
    Good,
    Super,
}

/// Outcome of a resolved encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CatchStatus {
    Caught,
    Fled,
}
