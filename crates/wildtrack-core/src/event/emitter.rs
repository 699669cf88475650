use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::event::{EventKind, EventRecord};

/// Output sink for serialized event records.
///
/// The file sink is the production path; the in-memory sink backs tests.
pub trait EventSink {
    fn write(&mut self, name: &str, payload: &str) -> Result<()>;
}

/// Writes one file per event under a base directory.
pub struct FileSink {
    base_dir: PathBuf,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }
}

impl EventSink for FileSink {
    fn write(&mut self, name: &str, payload: &str) -> Result<()> {
        fs::create_dir_all(&self.base_dir)?;
        let path = self.base_dir.join(name);
        fs::write(path, payload)?;
        Ok(())
    }
}

/// Collects written events in memory for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub written: Vec<(String, String)>,
    pub fail_writes: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for MemorySink {
    fn write(&mut self, name: &str, payload: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::SinkWriteFailed {
                name: name.to_string(),
                message: "sink configured to fail".to_string(),
            });
        }
        self.written.push((name.to_string(), payload.to_string()));
        Ok(())
    }
}

/// Placeholder identifier value; events stamped with it are rejected
/// downstream, so every emit warns about it.
const PLACEHOLDER_ID: &str = "unset";

/// Serializes typed events and hands them to the sink, fire-and-forget.
///
/// Names combine a UTC timestamp with a process-lifetime monotonic sequence,
/// so multiple events within the same sampling tick never collide. Delivery
/// is best-effort, at-most-once: a failed write is logged and dropped, never
/// retried, and the attempt never blocks beyond the single write call.
pub struct EventEmitter<S: EventSink> {
    sink: S,
    run_id: String,
    player_id: String,
    sequence: u64,
}

impl<S: EventSink> EventEmitter<S> {
    pub fn new(sink: S, run_id: &str, player_id: &str) -> Self {
        Self {
            sink,
            run_id: run_id.to_string(),
            player_id: player_id.to_string(),
            sequence: 0,
        }
    }

    /// Stamp the envelope, serialize and write the event. Returns whether the
    /// write succeeded; failure is already logged and carries no obligation
    /// for the caller.
    pub fn emit(&mut self, kind: EventKind) -> bool {
        if self.run_id == PLACEHOLDER_ID || self.player_id == PLACEHOLDER_ID {
            warn!(
                "run_id/player_id not configured; event will be rejected downstream \
                 (run_id={}, player_id={})",
                self.run_id, self.player_id
            );
        }

        let now = Utc::now();
        let record = EventRecord::new(&self.run_id, &self.player_id, now, kind);
        let name = format!(
            "{}_{:06}_{}.json",
            now.format("%Y%m%dT%H%M%S"),
            self.sequence,
            record.kind.tag()
        );
        self.sequence += 1;

        let payload = match serde_json::to_string_pretty(&record) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize {} event: {}", record.kind.tag(), e);
                return false;
            }
        };

        match self.sink.write(&name, &payload) {
            Ok(()) => {
                debug!("Emitted {} as {}", record.kind.tag(), name);
                true
            }
            Err(e) => {
                warn!("Dropping {} event: {}", record.kind.tag(), e);
                false
            }
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_event(message: &str) -> EventKind {
        EventKind::Test {
            message: message.to_string(),
        }
    }

    #[test]
    fn test_emit_writes_serialized_record() {
        let mut emitter = EventEmitter::new(MemorySink::new(), "run-1", "player-1");

        assert!(emitter.emit(test_event("hello")));

        let written = &emitter.sink().written;
        assert_eq!(written.len(), 1);
        assert!(written[0].0.ends_with("_test.json"));

        let json: serde_json::Value = serde_json::from_str(&written[0].1).unwrap();
        assert_eq!(json["type"], "test");
        assert_eq!(json["run_id"], "run-1");
        assert_eq!(json["message"], "hello");
    }

    #[test]
    fn test_names_are_unique_within_one_tick() {
        let mut emitter = EventEmitter::new(MemorySink::new(), "run-1", "player-1");

        for i in 0..5 {
            emitter.emit(test_event(&format!("event {}", i)));
        }

        let names: Vec<_> = emitter.sink().written.iter().map(|(n, _)| n).collect();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let sink = MemorySink {
            fail_writes: true,
            ..MemorySink::new()
        };
        let mut emitter = EventEmitter::new(sink, "run-1", "player-1");

        // Must not panic or propagate; just reports failure.
        assert!(!emitter.emit(test_event("lost")));
        assert!(emitter.sink().written.is_empty());
    }

    #[test]
    fn test_placeholder_ids_still_emit() {
        let mut emitter = EventEmitter::new(MemorySink::new(), "unset", "unset");

        assert!(emitter.emit(test_event("still flows")));
        assert_eq!(emitter.sink().written.len(), 1);
    }

    #[test]
    fn test_file_sink_writes_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut emitter = EventEmitter::new(FileSink::new(dir.path()), "run-1", "player-1");

        assert!(emitter.emit(test_event("on disk")));

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_file_sink_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("events").join("out");
        let mut emitter = EventEmitter::new(FileSink::new(&nested), "run-1", "player-1");

        assert!(emitter.emit(test_event("nested")));
        assert!(nested.exists());
    }
}
