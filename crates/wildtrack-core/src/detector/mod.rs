//! The detection pipeline: one explicit context object owning every stage.

mod scheduler;

pub use scheduler::{PollScheduler, RunState};

use tracing::trace;

use crate::config::Config;
use crate::event::{EncounterRef, EventEmitter, EventKind, EventSink};
use crate::game::{
    BattleEvent, BattleLifecycle, CreatureRecord, Location, Method, PartySnapshot, PartyTracker,
};
use crate::layout::LayoutProfile;
use crate::memory::MemoryAdapter;

/// Game state event detector.
///
/// Constructed once at startup from explicit parts — no component reads
/// ambient globals. All work happens synchronously inside [`Detector::on_frame`],
/// which the host calls once per rendered frame; each detection pass is a
/// small, bounded amount of work and never blocks.
pub struct Detector<'a, S: EventSink> {
    profile: LayoutProfile,
    adapter: MemoryAdapter<'a>,
    scheduler: PollScheduler,
    battle: BattleLifecycle,
    party: PartyTracker,
    emitter: EventEmitter<S>,
}

impl<'a, S: EventSink> Detector<'a, S> {
    pub fn new(config: &Config, profile: LayoutProfile, adapter: MemoryAdapter<'a>, sink: S) -> Self {
        Self {
            profile,
            adapter,
            scheduler: PollScheduler::new(config.poll_interval, config.max_runtime),
            battle: BattleLifecycle::new(),
            party: PartyTracker::new(),
            emitter: EventEmitter::new(sink, &config.run_id, &config.player_id),
        }
    }

    /// Per-frame entry point. Throttled by the scheduler; skipped entirely
    /// while a menu or other non-interactive screen is open, because several
    /// sampled structures hold stale or mid-update values there.
    pub fn on_frame(&mut self) {
        if !self.scheduler.on_frame() {
            return;
        }

        if self.adapter.read_u8(self.profile.menu_state) != 0 {
            trace!("Menu open, skipping detection pass");
            return;
        }

        self.detection_pass();
    }

    /// One full pass: battle lifecycle check, then party diff.
    fn detection_pass(&mut self) {
        let location = Location {
            route_id: self.adapter.read_u16(self.profile.route),
            map_id: self.adapter.read_u16(self.profile.map),
        };
        let party = PartySnapshot::read(&self.adapter, &self.profile);

        let battle_flag = self.adapter.read_u8(self.profile.battle_flag);
        let wild = CreatureRecord::decode(&self.adapter, self.profile.wild_base);
        let method = self
            .profile
            .methods
            .classify(self.adapter.read_u8(self.profile.player_activity));
        let rod_kind = (method == Method::Fish)
            .then(|| self.profile.methods.rod_kind(self.adapter.read_u8(self.profile.rod_type)));

        if let Some(event) = self
            .battle
            .tick(battle_flag, &wild, location, method, rod_kind, &party)
        {
            self.emitter.emit(battle_event_kind(event));
        }

        for faint in self.party.diff(party) {
            self.emitter.emit(EventKind::Faint {
                pokemon_key: format!("{:#010x}", faint.personality),
                party_index: faint.party_index,
                species_id: faint.species_id,
                level: faint.level,
            });
        }
    }

    /// Emit a test event for verifying the output pipeline end to end.
    pub fn emit_test(&mut self, message: &str) -> bool {
        self.emitter.emit(EventKind::Test {
            message: message.to_string(),
        })
    }

    pub fn is_stopped(&self) -> bool {
        self.scheduler.state() == RunState::Stopped
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn emitter(&self) -> &EventEmitter<S> {
        &self.emitter
    }
}

fn battle_event_kind(event: BattleEvent) -> EventKind {
    match event {
        BattleEvent::Encounter {
            route_id,
            species_id,
            level,
            shiny,
            method,
            rod_kind,
        } => EventKind::Encounter {
            route_id,
            species_id,
            level,
            shiny,
            method,
            rod_kind,
        },
        BattleEvent::CatchResult {
            route_id,
            species_id,
            status,
        } => EventKind::CatchResult {
            encounter_ref: EncounterRef {
                route_id,
                species_id,
            },
            status,
        },
    }
}
