//! Game-side domain types: decoded creature records, the battle lifecycle
//! state machine, and the party diff tracker.

mod battle;
mod creature;
mod enums;
mod party;

pub use battle::{BattleEvent, BattleLifecycle, BattlePhase, EncounterContext};
pub use creature::CreatureRecord;
pub use enums::{CatchStatus, Method, RodKind};
pub use party::{Faint, PartySnapshot, PartyTracker};

use serde::{Deserialize, Serialize};

/// Player position context, recomputed each poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub route_id: u16,
    pub map_id: u16,
}
