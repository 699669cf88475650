use tracing::debug;

use crate::game::CreatureRecord;
use crate::layout::{LayoutProfile, creature};
use crate::memory::MemoryAdapter;

/// Ordered party state at one tick.
///
/// Slot order is preserved; the uniqueness key is the personality value,
/// which stays stable for an individual across ticks even as HP changes and
/// distinguishes same-species individuals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartySnapshot {
    slots: Vec<CreatureRecord>,
}

impl PartySnapshot {
    pub fn new(slots: Vec<CreatureRecord>) -> Self {
        Self { slots }
    }

    /// Read the party count (clamped to the slot maximum) and decode each
    /// present slot.
    pub fn read(adapter: &MemoryAdapter, profile: &LayoutProfile) -> Self {
        let count = (adapter.read_u8(profile.party_count) as usize).min(creature::MAX_PARTY_SLOTS);
        let slots = (0..count)
            .map(|slot| {
                CreatureRecord::decode(
                    adapter,
                    profile.party_base + slot as u64 * creature::BLOCK_SIZE,
                )
            })
            .filter(|record| record.is_present())
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> &[CreatureRecord] {
        &self.slots
    }

    pub fn get(&self, personality: u32) -> Option<&CreatureRecord> {
        self.slots.iter().find(|r| r.personality == personality)
    }

    pub fn contains(&self, personality: u32) -> bool {
        self.get(personality).is_some()
    }

    /// Personality keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.iter().map(|r| r.personality)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// A party member whose HP crossed to zero between two ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Faint {
    pub personality: u32,
    pub party_index: usize,
    pub species_id: u16,
    pub level: u8,
}

/// Retains the previous party snapshot and diffs it against the current one.
///
/// Only a key present in both snapshots can faint; members that joined or
/// left the party between ticks never produce an event.
#[derive(Debug, Default)]
pub struct PartyTracker {
    previous: Option<PartySnapshot>,
}

impl PartyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `current` against the retained snapshot, then replace it.
    pub fn diff(&mut self, current: PartySnapshot) -> Vec<Faint> {
        let mut faints = Vec::new();

        if let Some(previous) = &self.previous {
            for (index, member) in current.slots.iter().enumerate() {
                let Some(before) = previous.get(member.personality) else {
                    continue;
                };
                if before.hp_current > 0 && member.hp_current == 0 {
                    debug!(
                        "Party member fainted: key={:#010x} slot={} species={}",
                        member.personality, index, member.species_id
                    );
                    faints.push(Faint {
                        personality: member.personality,
                        party_index: index,
                        species_id: member.species_id,
                        level: member.level,
                    });
                }
            }
        }

        self.previous = Some(current);
        faints
    }

    pub fn last_snapshot(&self) -> Option<&PartySnapshot> {
        self.previous.as_ref()
    }
}
