//! Logging sink used by the detector.
//!
//! The detector reports every step (sampling plan, skipped frames, fallbacks)
//! through a [`LogSink`] handed to it at construction time. The default sink,
//! [`FacadeSink`], forwards to the `log` facade, so whatever logger the binary
//! installs (env_logger in moviedim-cli) receives the messages. Embedders can
//! route detector output elsewhere by supplying their own sink.

use std::sync::Mutex;

use log::Level;

/// Receives severity-tagged messages from the detector.
pub trait LogSink: Send + Sync {
    fn log(&self, level: Level, message: &str);
}

/// Forwards messages to the `log` facade under a fixed target.
#[derive(Debug, Clone)]
pub struct FacadeSink {
    target: &'static str,
}

impl FacadeSink {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for FacadeSink {
    fn default() -> Self {
        Self::new("moviedim::detector")
    }
}

impl LogSink for FacadeSink {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: self.target, level, "{}", message);
    }
}

/// Keeps every message in memory. Handy for tests and for callers that want
/// to attach the detector's trail to their own report.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything logged so far.
    pub fn records(&self) -> Vec<(Level, String)> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// True if any message at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.records()
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, message: &str) {
        let mut records = match self.records.lock() {
            Ok(records) => records,
            Err(poisoned) => poisoned.into_inner(),
        };
        records.push((level, message.to_string()));
    }
}
