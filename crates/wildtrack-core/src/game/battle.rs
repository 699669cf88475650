use std::collections::HashSet;

use tracing::{debug, info};

use crate::game::{CatchStatus, CreatureRecord, Location, Method, PartySnapshot, RodKind};

/// Battle lifecycle phase. Exactly two states, cycling for the process
/// lifetime; an [`EncounterContext`] exists if and only if the phase is
/// `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    Idle,
    Active,
}

/// State captured at encounter start and consumed at encounter end.
#[derive(Debug, Clone)]
pub struct EncounterContext {
    pub species_id: u16,
    pub level: u8,
    pub shiny: bool,
    pub location: Location,
    pub method: Method,
    pub rod_kind: Option<RodKind>,
    /// Party personality keys at encounter start, for outcome resolution.
    party_keys: HashSet<u32>,
}

/// Transition produced by one lifecycle tick. At most one per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    Encounter {
        route_id: u16,
        species_id: u16,
        level: u8,
        shiny: bool,
        method: Method,
        rod_kind: Option<RodKind>,
    },
    CatchResult {
        route_id: u16,
        species_id: u16,
        status: CatchStatus,
    },
}

/// Edge-triggered encounter start/end detection over sampled battle flags.
///
/// The battle flag is polled at a coarse interval and can glitch or be read
/// mid-update, so transitions fire only on an edge: repeated ticks with the
/// same flag value never produce additional events. Entering `Active`
/// additionally requires a present wild record, which filters out flag reads
/// taken before the wild creature block is populated.
#[derive(Debug, Default)]
pub struct BattleLifecycle {
    context: Option<EncounterContext>,
}

impl BattleLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> BattlePhase {
        if self.context.is_some() {
            BattlePhase::Active
        } else {
            BattlePhase::Idle
        }
    }

    pub fn context(&self) -> Option<&EncounterContext> {
        self.context.as_ref()
    }

    /// Advance the machine by one sampled tick.
    ///
    /// `party` is the party snapshot taken this tick; it seeds the key set on
    /// encounter start and resolves the outcome on encounter end.
    pub fn tick(
        &mut self,
        battle_flag: u8,
        wild: &CreatureRecord,
        location: Location,
        method: Method,
        rod_kind: Option<RodKind>,
        party: &PartySnapshot,
    ) -> Option<BattleEvent> {
        match &self.context {
            None => {
                if battle_flag == 0 || !wild.is_present() {
                    return None;
                }
                info!(
                    "Encounter started: species={} level={} route={} method={}",
                    wild.species_id, wild.level, location.route_id, method
                );
                self.context = Some(EncounterContext {
                    species_id: wild.species_id,
                    level: wild.level,
                    shiny: wild.shiny,
                    location,
                    method,
                    rod_kind,
                    party_keys: party.keys().collect(),
                });
                Some(BattleEvent::Encounter {
                    route_id: location.route_id,
                    species_id: wild.species_id,
                    level: wild.level,
                    shiny: wild.shiny,
                    method,
                    rod_kind,
                })
            }
            Some(_) => {
                if battle_flag != 0 {
                    return None;
                }
                // Context exists by the match arm; take() keeps the
                // phase/context invariant in one move.
                let context = self.context.take()?;
                let status = resolve_outcome(&context, party);
                info!(
                    "Encounter resolved: species={} status={}",
                    context.species_id, status
                );
                Some(BattleEvent::CatchResult {
                    route_id: context.location.route_id,
                    species_id: context.species_id,
                    status,
                })
            }
        }
    }
}

/// Compare party composition before and after the battle: a creature of the
/// encountered species under a personality key that was not in the party at
/// encounter start means the wild one was caught.
fn resolve_outcome(context: &EncounterContext, party: &PartySnapshot) -> CatchStatus {
    let caught = party.slots().iter().any(|member| {
        member.species_id == context.species_id && !context.party_keys.contains(&member.personality)
    });
    if caught {
        CatchStatus::Caught
    } else {
        debug!(
            "No new party member of species {}, classifying as fled",
            context.species_id
        );
        CatchStatus::Fled
    }
}
