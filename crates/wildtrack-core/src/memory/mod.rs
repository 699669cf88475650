//! Memory access: the host read-primitive boundary and the sentinel adapter.

mod adapter;
mod mock;
mod process;
mod reader;

pub use adapter::MemoryAdapter;
pub use mock::{MockMemoryBuilder, MockMemoryReader};
pub use process::ProcessHandle;
pub use reader::{MemoryReader, ReadMemory};
