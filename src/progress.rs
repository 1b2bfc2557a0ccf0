//! Harvest progress reporting.
//!
//! Reports what is being scanned and how much is left while a folder is
//! harvested. Progress goes to **stderr** so stdout stays parseable.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A single progress event.
#[derive(Clone, Debug)]
pub enum ProgressEvent {
    /// Walking the tree for documents. Total unknown.
    Discovering { root: PathBuf },
    /// About to process document `n` of `total` (1-based).
    Processing { n: u64, total: u64, path: PathBuf },
    /// Report written.
    Written { path: PathBuf, records: u64 },
}

/// Receives progress events from the harvest pipeline.
pub trait ProgressReporter {
    fn report(&self, event: ProgressEvent);
}

/// Human-friendly progress on stderr: "harvest  processing  12 / 1,500  notes/a.odt".
pub struct StderrProgress;

impl ProgressReporter for StderrProgress {
    fn report(&self, event: ProgressEvent) {
        let line = match &event {
            ProgressEvent::Discovering { root } => {
                format!("harvest  discovering {}...\n", root.display())
            }
            ProgressEvent::Processing { n, total, path } => format!(
                "harvest  processing  {} / {}  {}\n",
                format_number(*n),
                format_number(*total),
                path.display()
            ),
            ProgressEvent::Written { path, records } => format!(
                "harvest  wrote {} hashtags to {}\n",
                format_number(*records),
                path.display()
            ),
        };
        let mut stderr = std::io::stderr().lock();
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl ProgressReporter for JsonProgress {
    fn report(&self, event: ProgressEvent) {
        let obj = match &event {
            ProgressEvent::Discovering { root } => serde_json::json!({
                "event": "progress",
                "phase": "discovering",
                "root": path_str(root),
            }),
            ProgressEvent::Processing { n, total, path } => serde_json::json!({
                "event": "progress",
                "phase": "processing",
                "n": n,
                "total": total,
                "path": path_str(path),
            }),
            ProgressEvent::Written { path, records } => serde_json::json!({
                "event": "written",
                "path": path_str(path),
                "records": records,
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{}", line);
            let _ = stderr.flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: ProgressEvent) {}
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn ProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}

impl FromStr for ProgressMode {
    type Err = String;

    /// `auto` resolves against the current stderr.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ProgressMode::default_for_tty()),
            "human" => Ok(ProgressMode::Human),
            "json" => Ok(ProgressMode::Json),
            "off" => Ok(ProgressMode::Off),
            other => Err(format!(
                "unknown progress mode '{}': expected auto, human, json, or off",
                other
            )),
        }
    }
}
