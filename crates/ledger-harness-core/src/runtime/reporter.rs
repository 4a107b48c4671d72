// crates/ledger-harness-core/src/runtime/reporter.rs
// ============================================================================
// Module: Harness Reporters
// Description: JSON-line event sinks for harness progress.
// Purpose: Emit structured, redacted run events without hard dependencies.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Reporter sinks serialize each [`HarnessEvent`] as one JSON line. Write
//! failures are swallowed: reporting never changes the outcome of a run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use crate::core::events::HarnessEvent;
use crate::interfaces::HarnessReporter;

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Reporter that logs JSON lines to stderr.
pub struct StderrReporter;

impl HarnessReporter for StderrReporter {
    fn record(&self, event: &HarnessEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Reporter that appends JSON lines to a file.
pub struct FileReporter {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileReporter {
    /// Opens the report file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl HarnessReporter for FileReporter {
    fn record(&self, event: &HarnessEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Reporter that keeps serialized events in memory.
#[derive(Default)]
pub struct MemoryReporter {
    /// Captured JSON lines.
    lines: Mutex<Vec<String>>,
}

impl MemoryReporter {
    /// Creates an empty in-memory reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the captured JSON lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|lines| lines.clone()).unwrap_or_default()
    }

    /// Returns captured events parsed back into JSON values.
    #[must_use]
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.lines().iter().filter_map(|line| serde_json::from_str(line).ok()).collect()
    }
}

impl HarnessReporter for MemoryReporter {
    fn record(&self, event: &HarnessEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut lines) = self.lines.lock()
        {
            lines.push(payload);
        }
    }
}

/// No-op reporter.
pub struct NoopReporter;

impl HarnessReporter for NoopReporter {
    fn record(&self, _event: &HarnessEvent) {}
}
