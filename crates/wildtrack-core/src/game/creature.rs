use serde::{Deserialize, Serialize};

use crate::layout::creature;
use crate::memory::MemoryAdapter;

/// Shiny heuristic threshold for the XOR fold of personality and trainer id.
///
/// This approximates the real game's determination rule, which compares a
/// similar fold against a small cutoff. The exact formula is not recoverable
/// here; the flag has a non-trivial false-positive/negative rate and must not
/// be treated as authoritative.
const SHINY_FOLD_THRESHOLD: u16 = 8;

/// One decoded creature snapshot.
///
/// A value type with no identity beyond its personality value. Decoding is a
/// pure function of the byte window: the same bytes always produce the same
/// record, and a failed read decodes as an all-zero (absent) record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub species_id: u16,
    pub personality: u32,
    pub trainer_id: u32,
    pub level: u8,
    pub hp_current: u16,
    pub hp_max: u16,
    pub status: u32,
    pub shiny: bool,
}

impl CreatureRecord {
    /// Decode the creature block at `base`.
    pub fn decode(adapter: &MemoryAdapter, base: u64) -> Self {
        let personality = adapter.read_u32(base + creature::PERSONALITY);
        let trainer_id = adapter.read_u32(base + creature::TRAINER_ID);
        Self {
            species_id: adapter.read_u16(base + creature::SPECIES),
            personality,
            trainer_id,
            level: adapter.read_u8(base + creature::LEVEL),
            hp_current: adapter.read_u16(base + creature::HP_CURRENT),
            hp_max: adapter.read_u16(base + creature::HP_MAX),
            status: adapter.read_u32(base + creature::STATUS),
            shiny: shiny_fold(personality, trainer_id) < SHINY_FOLD_THRESHOLD,
        }
    }

    /// Whether this slot holds a creature at all.
    ///
    /// A species id outside the valid range means "no creature present",
    /// never an error; the remaining fields are populated but meaningless
    /// for an absent record and must be ignored.
    pub fn is_present(&self) -> bool {
        (creature::MIN_SPECIES..=creature::MAX_SPECIES).contains(&self.species_id)
    }

    pub fn is_fainted(&self) -> bool {
        self.hp_current == 0
    }
}

/// XOR-fold the 16-bit halves of personality and trainer id.
fn shiny_fold(personality: u32, trainer_id: u32) -> u16 {
    let p = (personality >> 16) as u16 ^ personality as u16;
    let t = (trainer_id >> 16) as u16 ^ trainer_id as u16;
    p ^ t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryAdapter, MockMemoryBuilder, MockMemoryReader};

    fn adapter_with_creature(
        species: u16,
        personality: u32,
        trainer_id: u32,
        level: u8,
        hp: u16,
        hp_max: u16,
    ) -> MemoryAdapter<'static> {
        let reader = MockMemoryBuilder::new()
            .with_size(creature::BLOCK_SIZE as usize)
            .write_u32(creature::PERSONALITY as usize, personality)
            .write_u32(creature::TRAINER_ID as usize, trainer_id)
            .write_u16(creature::SPECIES as usize, species)
            .write_u8(creature::LEVEL as usize, level)
            .write_u16(creature::HP_CURRENT as usize, hp)
            .write_u16(creature::HP_MAX as usize, hp_max)
            .build();
        MemoryAdapter::new(Box::new(reader))
    }

    #[test]
    fn test_decode_known_bytes() {
        let adapter = adapter_with_creature(1, 0xAABB_CCDD, 0x1122_3344, 5, 20, 20);
        let record = CreatureRecord::decode(&adapter, 0x1000);

        assert_eq!(record.species_id, 1);
        assert_eq!(record.level, 5);
        assert_eq!(record.hp_current, 20);
        assert_eq!(record.hp_max, 20);
        assert!(record.is_present());
    }

    #[test]
    fn test_decode_is_deterministic() {
        let adapter = adapter_with_creature(25, 0xDEAD_BEEF, 0xCAFE_F00D, 36, 81, 95);
        let first = CreatureRecord::decode(&adapter, 0x1000);
        let second = CreatureRecord::decode(&adapter, 0x1000);
        assert_eq!(first, second);
    }

    #[test]
    fn test_species_zero_is_absent() {
        let adapter = adapter_with_creature(0, 12345, 678, 50, 100, 100);
        let record = CreatureRecord::decode(&adapter, 0x1000);
        assert!(!record.is_present());
    }

    #[test]
    fn test_species_out_of_range_is_absent() {
        let adapter = adapter_with_creature(1000, 1, 1, 1, 1, 1);
        assert!(!CreatureRecord::decode(&adapter, 0x1000).is_present());

        let adapter = adapter_with_creature(0xFFFF, 1, 1, 1, 1, 1);
        assert!(!CreatureRecord::decode(&adapter, 0x1000).is_present());
    }

    #[test]
    fn test_species_range_boundaries_are_present() {
        let adapter = adapter_with_creature(1, 1, 1, 1, 1, 1);
        assert!(CreatureRecord::decode(&adapter, 0x1000).is_present());

        let adapter = adapter_with_creature(999, 1, 1, 1, 1, 1);
        assert!(CreatureRecord::decode(&adapter, 0x1000).is_present());
    }

    #[test]
    fn test_unreadable_window_decodes_as_absent_zero_record() {
        let adapter = MemoryAdapter::new(Box::new(MockMemoryReader::new(Vec::new())));
        let record = CreatureRecord::decode(&adapter, 0x1000);

        assert_eq!(record.species_id, 0);
        assert_eq!(record.hp_max, 0);
        assert!(!record.is_present());
    }

    #[test]
    fn test_shiny_fold() {
        // Halves cancel: fold is zero, well under the threshold.
        assert_eq!(shiny_fold(0x1234_1234, 0xABCD_ABCD), 0);
        // Arbitrary mismatched halves land far above it.
        assert!(shiny_fold(0x0001_8000, 0x4000_0002) >= SHINY_FOLD_THRESHOLD);
    }

    #[test]
    fn test_shiny_flag_from_decode() {
        let adapter = adapter_with_creature(7, 0x5555_5555, 0x9999_9999, 10, 30, 30);
        let record = CreatureRecord::decode(&adapter, 0x1000);
        // 0x5555^0x5555 = 0, 0x9999^0x9999 = 0, fold 0 < threshold
        assert!(record.shiny);

        let adapter = adapter_with_creature(7, 0x1234_5678, 0x0000_0000, 10, 30, 30);
        let record = CreatureRecord::decode(&adapter, 0x1000);
        // 0x1234^0x5678 = 0x444C, fold well above threshold
        assert!(!record.shiny);
    }
}
