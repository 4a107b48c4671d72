// system-tests/tests/helpers/artifacts.rs
// ============================================================================
// Module: Test Artifacts
// Description: Per-test artifact directory with a closing summary.
// Purpose: Leave run summaries and event logs behind for every system test.
// Dependencies: system-tests, serde, serde_jcs, serde_json
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use serde_json::Value;
use system_tests::config::SystemTestConfig;

/// File name of the machine-readable summary.
const SUMMARY_JSON: &str = "summary.json";
/// File name of the human-readable summary.
const SUMMARY_MD: &str = "summary.md";

/// Closing record for one test.
#[derive(Serialize)]
struct TestSummary<'a> {
    test_name: &'a str,
    status: &'a str,
    duration_ms: u128,
    notes: &'a [String],
    artifacts: &'a [String],
}

/// Artifact directory plus the summary written when the test ends.
///
/// A test that returns early or panics still gets a summary from `Drop`.
pub struct TestReporter {
    test_name: String,
    root: PathBuf,
    started: Instant,
    written: Vec<String>,
    closed: bool,
}

impl TestReporter {
    /// Creates `<artifact root>/<test_name>`, refusing to reuse a finished one.
    pub fn new(test_name: &str) -> io::Result<Self> {
        let config = SystemTestConfig::load().map_err(io::Error::other)?;
        let base = config.artifact_root.unwrap_or_else(|| {
            let stamp =
                SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
            PathBuf::from("target/system-tests").join(format!("run_{stamp}"))
        });
        let root = base.join(test_name);
        if root.join(SUMMARY_JSON).exists() && !config.allow_overwrite {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already holds a finished test", root.display()),
            ));
        }
        fs::create_dir_all(&root)?;
        Ok(Self {
            test_name: test_name.to_string(),
            root,
            started: Instant::now(),
            written: Vec::new(),
            closed: false,
        })
    }

    /// Returns the artifact directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Registers a file some other component wrote into the directory.
    pub fn adopt(&mut self, name: &str) {
        self.written.push(name.to_string());
    }

    /// Writes `value` as canonical JSON.
    pub fn write_json<T: Serialize>(&mut self, name: &str, value: &T) -> io::Result<()> {
        let bytes = serde_jcs::to_vec(value).map_err(|err| io::Error::other(err.to_string()))?;
        self.write(name, &bytes)
    }

    /// Writes harness events as JSON lines.
    pub fn write_events(&mut self, name: &str, events: &[Value]) -> io::Result<()> {
        let mut lines = String::new();
        for event in events {
            let _ = writeln!(lines, "{event}");
        }
        self.write(name, lines.as_bytes())
    }

    /// Closes the test as passed.
    pub fn pass(mut self, notes: Vec<String>) -> io::Result<()> {
        self.close("pass", &notes)
    }

    /// Closes the test as skipped.
    pub fn skip(mut self, reason: &str) -> io::Result<()> {
        self.close("skip", &[reason.to_string()])
    }

    /// Writes one artifact and records its name.
    fn write(&mut self, name: &str, bytes: &[u8]) -> io::Result<()> {
        fs::write(self.root.join(name), bytes)?;
        self.written.push(name.to_string());
        Ok(())
    }

    /// Writes both summaries.
    fn close(&mut self, status: &str, notes: &[String]) -> io::Result<()> {
        self.closed = true;
        let mut artifacts = self.written.clone();
        artifacts.extend([SUMMARY_JSON.to_string(), SUMMARY_MD.to_string()]);
        let summary = TestSummary {
            test_name: &self.test_name,
            status,
            duration_ms: self.started.elapsed().as_millis(),
            notes,
            artifacts: &artifacts,
        };
        let json = serde_jcs::to_vec(&summary).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(self.root.join(SUMMARY_JSON), json)?;
        fs::write(self.root.join(SUMMARY_MD), render_markdown(&summary))
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        let status = if std::thread::panicking() { "panic" } else { "fail" };
        let _ = self.close(status, &["test ended before reporting a result".to_string()]);
    }
}

/// Renders the summary for people reading the artifact tree.
fn render_markdown(summary: &TestSummary<'_>) -> String {
    let mut out = format!("# {}\n\n", summary.test_name);
    let _ = writeln!(out, "**{}** in {} ms", summary.status, summary.duration_ms);
    for note in summary.notes {
        let _ = writeln!(out, "\n> {note}");
    }
    out.push_str("\n## Files\n\n");
    for artifact in summary.artifacts {
        let _ = writeln!(out, "- `{artifact}`");
    }
    out
}
