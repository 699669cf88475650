//! Typed event records and the single serialization boundary.
//!
//! Detection logic produces [`EventKind`] values; the emitter stamps the
//! run/player/time envelope and serializes exactly once. No component builds
//! event payloads out of strings.

mod emitter;

pub use emitter::{EventEmitter, EventSink, FileSink, MemorySink};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::game::{CatchStatus, Method, RodKind};

/// Reference back to the encounter a catch result resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterRef {
    pub route_id: u16,
    pub species_id: u16,
}

/// The per-type payload of an emitted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    Encounter {
        route_id: u16,
        species_id: u16,
        level: u8,
        shiny: bool,
        method: Method,
        #[serde(skip_serializing_if = "Option::is_none")]
        rod_kind: Option<RodKind>,
    },
    CatchResult {
        encounter_ref: EncounterRef,
        status: CatchStatus,
    },
    Faint {
        pokemon_key: String,
        party_index: usize,
        species_id: u16,
        level: u8,
    },
    Test {
        message: String,
    },
}

impl EventKind {
    /// Short tag used in sink file names.
    pub fn tag(&self) -> &'static str {
        match self {
            EventKind::Encounter { .. } => "encounter",
            EventKind::CatchResult { .. } => "catch_result",
            EventKind::Faint { .. } => "faint",
            EventKind::Test { .. } => "test",
        }
    }
}

/// One emitted fact: envelope plus payload, flattened to a single JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub run_id: String,
    pub player_id: String,
    /// UTC, second precision.
    pub time: String,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl EventRecord {
    pub fn new(run_id: &str, player_id: &str, at: DateTime<Utc>, kind: EventKind) -> Self {
        Self {
            run_id: run_id.to_string(),
            player_id: player_id.to_string(),
            time: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            kind,
        }
    }
}
