//! Sentinel-valued memory access over one bound host read primitive.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::memory::ReadMemory;

/// Uniform, non-failing reads over an absolute address space.
///
/// The emulator host exposes several equivalent read primitives; exactly one
/// is bound at startup via [`MemoryAdapter::negotiate`] and used for the rest
/// of the process lifetime.
///
/// Any host-level failure (unmapped address, host not ready) yields a zero
/// sentinel instead of an error: memory is legitimately unreadable during
/// save-state transitions, and the detection pipeline must never take down
/// the host's per-frame callback. Callers must treat an all-zero decode as
/// inconclusive, not authoritative.
pub struct MemoryAdapter<'a> {
    source: Box<dyn ReadMemory + 'a>,
}

impl<'a> MemoryAdapter<'a> {
    /// Bind directly to a single read primitive, skipping negotiation.
    pub fn new(source: Box<dyn ReadMemory + 'a>) -> Self {
        Self { source }
    }

    /// Probe each candidate read primitive once and bind to the first one
    /// that answers at `probe_address`. The binding is immutable afterwards.
    pub fn negotiate(
        candidates: Vec<Box<dyn ReadMemory + 'a>>,
        probe_address: u64,
    ) -> Result<Self> {
        let total = candidates.len();
        for (index, candidate) in candidates.into_iter().enumerate() {
            match candidate.read_bytes(probe_address, 1) {
                Ok(_) => {
                    debug!(
                        "Bound memory read primitive {}/{} (probe at {:#x})",
                        index + 1,
                        total,
                        probe_address
                    );
                    return Ok(Self { source: candidate });
                }
                Err(e) => {
                    debug!("Read primitive {}/{} failed probe: {}", index + 1, total, e);
                }
            }
        }
        Err(Error::NoReadPrimitive { candidates: total })
    }

    pub fn read_u8(&self, address: u64) -> u8 {
        self.source.read_u8(address).unwrap_or_else(|e| {
            trace!("read_u8 at {:#x} failed, returning 0: {}", address, e);
            0
        })
    }

    pub fn read_u16(&self, address: u64) -> u16 {
        self.source.read_u16(address).unwrap_or_else(|e| {
            trace!("read_u16 at {:#x} failed, returning 0: {}", address, e);
            0
        })
    }

    pub fn read_u32(&self, address: u64) -> u32 {
        self.source.read_u32(address).unwrap_or_else(|e| {
            trace!("read_u32 at {:#x} failed, returning 0: {}", address, e);
            0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MockMemoryBuilder, MockMemoryReader};

    struct DeadReader;

    impl ReadMemory for DeadReader {
        fn read_bytes(&self, address: u64, _size: usize) -> Result<Vec<u8>> {
            Err(Error::MemoryReadFailed {
                address,
                message: "host not ready".to_string(),
            })
        }
    }

    #[test]
    fn test_reads_pass_through() {
        let reader = MockMemoryBuilder::new()
            .write_u8(0, 7)
            .write_u16(2, 513)
            .write_u32(4, 0xDEADBEEF)
            .build();
        let adapter = MemoryAdapter::new(Box::new(reader));

        assert_eq!(adapter.read_u8(0x1000), 7);
        assert_eq!(adapter.read_u16(0x1002), 513);
        assert_eq!(adapter.read_u32(0x1004), 0xDEADBEEF);
    }

    #[test]
    fn test_failed_read_yields_zero_sentinel() {
        let adapter = MemoryAdapter::new(Box::new(DeadReader));

        assert_eq!(adapter.read_u8(0x1000), 0);
        assert_eq!(adapter.read_u16(0x1000), 0);
        assert_eq!(adapter.read_u32(0x1000), 0);
    }

    #[test]
    fn test_out_of_bounds_read_yields_zero_sentinel() {
        let adapter = MemoryAdapter::new(Box::new(MockMemoryReader::new(vec![1, 2])));

        assert_eq!(adapter.read_u32(0x1000), 0);
    }

    #[test]
    fn test_negotiate_binds_first_working_primitive() {
        let working = MockMemoryBuilder::new().write_u8(0, 42).build();
        let adapter = MemoryAdapter::negotiate(
            vec![Box::new(DeadReader), Box::new(working)],
            0x1000,
        )
        .unwrap();

        assert_eq!(adapter.read_u8(0x1000), 42);
    }

    #[test]
    fn test_negotiate_fails_when_no_primitive_answers() {
        let result = MemoryAdapter::negotiate(
            vec![Box::new(DeadReader), Box::new(DeadReader)],
            0x1000,
        );
        assert!(result.is_err());
    }
}
