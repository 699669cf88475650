//! Core library for wildtrack: observes the live memory image of a running
//! Gen-3-era creature-collecting game and turns polled snapshots into a
//! de-duplicated stream of domain events.

pub mod config;
pub mod detector;
pub mod error;
pub mod event;
pub mod game;
pub mod layout;
pub mod memory;

pub use config::Config;
pub use detector::{Detector, PollScheduler, RunState};
pub use error::{Error, Result};
pub use event::{EventEmitter, EventKind, EventRecord, EventSink, FileSink};
pub use game::{
    BattleLifecycle, BattlePhase, CatchStatus, CreatureRecord, Location, Method, PartySnapshot,
    PartyTracker, RodKind,
};
pub use layout::{GameTitle, LayoutProfile, Region};
pub use memory::{MemoryAdapter, MemoryReader, MockMemoryBuilder, MockMemoryReader, ProcessHandle, ReadMemory};
