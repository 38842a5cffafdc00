//! Data types and error definitions for process discovery and termination.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// A running instance of the target CLI tool, as seen in one listing pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    pub pid: i32,
    /// Full command line (`args` column).
    pub command: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    /// Resident memory in MB. Starts as the listing's RSS and may be replaced
    /// by a [`MemoryProbe`](crate::MemoryProbe) reading.
    pub memory_mb: f64,
}

impl fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PID {}: {} (CPU: {:.1}%, MEM: {:.1}% / {:.1} MB)",
            self.pid, self.command, self.cpu_percent, self.memory_percent, self.memory_mb
        )
    }
}

/// Result of a single kill attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillOutcome {
    pub pid: i32,
    pub succeeded: bool,
    pub error: Option<String>,
}

impl KillOutcome {
    pub fn success(pid: i32) -> Self {
        Self {
            pid,
            succeeded: true,
            error: None,
        }
    }

    pub fn failure(pid: i32, error: impl Into<String>) -> Self {
        Self {
            pid,
            succeeded: false,
            error: Some(error.into()),
        }
    }
}

impl fmt::Display for KillOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.succeeded {
            write!(f, "PID {}", self.pid)
        } else {
            write!(
                f,
                "PID {}: {}",
                self.pid,
                self.error.as_deref().unwrap_or("Unknown error")
            )
        }
    }
}

/// Errors that make a discovery pass fail as a whole.
///
/// Row-level problems never show up here; malformed rows are skipped.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Failed to list processes: {0}")]
    ListFailed(String),
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Process listing did not finish within {0:?}")]
    TimedOut(Duration),
    #[error("Process listing exceeded {limit} bytes")]
    OutputTooLarge { limit: usize },
    #[error("Failed to decode process listing: {0}")]
    DecodeFailed(#[from] std::string::FromUtf8Error),
    #[error("IO error while reading process listing: {0}")]
    Io(#[from] std::io::Error),
}
