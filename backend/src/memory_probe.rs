//! Best-effort per-process memory readings used to refine the listing's RSS.
//!
//! Every probe answers with an `Option`: a failed reading means "keep the
//! figure from the listing", never an error for the caller.

use crate::command::run_capped;
use async_trait::async_trait;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::path::PathBuf;

const FOOTPRINT_OUTPUT_LIMIT: usize = 1024 * 1024;

lazy_static! {
    static ref FOOTPRINT_RE: Regex =
        Regex::new(r"Footprint:\s+(\d+(?:\.\d+)?)\s+(KB|MB|GB)").unwrap();
}

#[async_trait]
pub trait MemoryProbe: Send + Sync {
    /// Resident memory of `pid` in MB, if it can be measured.
    async fn resident_mb(&self, pid: i32) -> Option<f64>;
}

/// Reads the `Footprint: <n> <unit>` line printed by macOS `footprint -p`.
#[derive(Debug, Clone)]
pub struct FootprintProbe {
    pub program: PathBuf,
    /// Arguments placed before the pid.
    pub args: Vec<String>,
}

impl Default for FootprintProbe {
    fn default() -> Self {
        Self {
            program: PathBuf::from("/usr/bin/footprint"),
            args: vec!["-p".to_string()],
        }
    }
}

#[async_trait]
impl MemoryProbe for FootprintProbe {
    async fn resident_mb(&self, pid: i32) -> Option<f64> {
        let mut args = self.args.clone();
        args.push(pid.to_string());
        let captured = match run_capped(&self.program, &args, FOOTPRINT_OUTPUT_LIMIT).await {
            Ok(captured) => captured,
            Err(e) => {
                debug!("footprint unavailable for PID {}: {}", pid, e);
                return None;
            }
        };

        if !captured.status.success() {
            debug!("footprint exited with {} for PID {}", captured.status, pid);
            return None;
        }

        let output = String::from_utf8(captured.stdout).ok()?;
        parse_footprint_output(&output)
    }
}

/// Extract the footprint in MB from `footprint` output.
///
/// `"Footprint: 821 MB"` gives `821.0`, `"Footprint: 1.5 GB"` gives `1536.0`.
pub fn parse_footprint_output(output: &str) -> Option<f64> {
    let caps = FOOTPRINT_RE.captures(output)?;
    let value: f64 = caps[1].parse().ok()?;
    match &caps[2] {
        "GB" => Some(value * 1024.0),
        "KB" => Some(value / 1024.0),
        _ => Some(value),
    }
}

/// Reads `VmRSS` from `/proc/<pid>/status`.
#[cfg(target_os = "linux")]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcfsProbe;

#[cfg(target_os = "linux")]
#[async_trait]
impl MemoryProbe for ProcfsProbe {
    async fn resident_mb(&self, pid: i32) -> Option<f64> {
        let status = procfs::process::Process::new(pid)
            .and_then(|proc| proc.status())
            .map_err(|e| debug!("procfs status unavailable for PID {}: {}", pid, e))
            .ok()?;
        status.vmrss.map(|kib| kib as f64 / 1024.0)
    }
}

/// Probe for the current platform.
pub fn default_probe() -> Box<dyn MemoryProbe> {
    #[cfg(target_os = "linux")]
    return Box::new(ProcfsProbe);
    #[cfg(not(target_os = "linux"))]
    return Box::new(FootprintProbe::default());
}
