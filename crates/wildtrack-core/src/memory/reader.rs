#![cfg_attr(not(target_os = "windows"), allow(dead_code, unused_variables))]

use crate::error::{Error, Result};
use crate::memory::ProcessHandle;

#[cfg(target_os = "windows")]
use windows::Win32::System::Diagnostics::Debug::ReadProcessMemory;

/// Trait for reading memory from a process or buffer.
///
/// This is the boundary to the host's raw read primitives. It enables mocking
/// for tests and abstracts over different memory sources.
pub trait ReadMemory {
    /// Read raw bytes from memory at the given absolute address
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    /// Read an unsigned 8-bit integer from memory
    fn read_u8(&self, address: u64) -> Result<u8> {
        let bytes = self.read_bytes(address, 1)?;
        Ok(bytes[0])
    }

    /// Read an unsigned 16-bit integer from memory (little-endian)
    fn read_u16(&self, address: u64) -> Result<u16> {
        let bytes = self.read_bytes(address, 2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read an unsigned 32-bit integer from memory (little-endian)
    fn read_u32(&self, address: u64) -> Result<u32> {
        let bytes = self.read_bytes(address, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

pub struct MemoryReader<'a> {
    process: &'a ProcessHandle,
}

impl<'a> MemoryReader<'a> {
    pub fn new(process: &'a ProcessHandle) -> Self {
        Self { process }
    }

    #[cfg(target_os = "windows")]
    fn read_bytes_impl(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; size];
        let mut bytes_read = 0;

        // SAFETY: ReadProcessMemory is called with:
        // - A valid process handle from ProcessHandle (obtained via OpenProcess with PROCESS_VM_READ)
        // - An address within the target process's address space
        // - A properly allocated buffer of the requested size
        // - A pointer to receive the actual bytes read
        // The function may fail if the address is invalid, but this is handled via Result.
        unsafe {
            ReadProcessMemory(
                self.process.handle(),
                address as *const _,
                buffer.as_mut_ptr() as *mut _,
                size,
                Some(&mut bytes_read),
            )
            .map_err(|e| Error::MemoryReadFailed {
                address,
                message: e.to_string(),
            })?;
        }

        // All-or-nothing reads. A partially read creature block would decode
        // into garbage, so a short read is an error.
        if bytes_read != size {
            return Err(Error::MemoryReadFailed {
                address,
                message: format!("Expected {} bytes, read {}", size, bytes_read),
            });
        }

        Ok(buffer)
    }

    #[cfg(not(target_os = "windows"))]
    fn read_bytes_impl(&self, address: u64, _size: usize) -> Result<Vec<u8>> {
        Err(Error::MemoryReadFailed {
            address,
            message: "Windows only: memory reading not supported on this platform".to_string(),
        })
    }
}

impl ReadMemory for MemoryReader<'_> {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.read_bytes_impl(address, size)
    }
}
