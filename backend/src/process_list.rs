//! Process listing functionality: `ps` snapshot, three-criteria filter and
//! memory enrichment.

use crate::command::run_capped;
use crate::memory_probe::{default_probe, MemoryProbe};
use crate::types::{DiscoveryError, ProcessRecord};
use log::{debug, info, trace};
use std::path::PathBuf;
use std::time::Duration;

/// pid, comm, %cpu, %mem, rss, args
const LISTING_COLUMNS: usize = 6;

/// Settings for a discovery pass.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    pub ps_program: PathBuf,
    /// Must produce the columns `pid comm pcpu pmem rss args`, in that order,
    /// with a header line.
    pub ps_args: Vec<String>,
    /// Exact short process name (`comm`) of the target tool.
    pub target_name: String,
    /// Command lines containing this path belong to the desktop app.
    pub excluded_path: String,
    pub max_output_bytes: usize,
    pub timeout: Option<Duration>,
    pub enrich_memory: bool,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            ps_program: PathBuf::from("/bin/ps"),
            ps_args: vec![
                "-ww".to_string(),
                "-eo".to_string(),
                "pid,comm,pcpu,pmem,rss,args".to_string(),
            ],
            target_name: "claude".to_string(),
            excluded_path: "/Applications/Claude.app".to_string(),
            max_output_bytes: 1024 * 1024,
            timeout: None,
            enrich_memory: true,
        }
    }
}

/// Finds running instances of the target CLI tool.
pub struct ProcessFinder {
    config: FinderConfig,
    probe: Box<dyn MemoryProbe>,
}

impl Default for ProcessFinder {
    fn default() -> Self {
        Self::new(FinderConfig::default())
    }
}

impl ProcessFinder {
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            probe: default_probe(),
        }
    }

    pub fn with_probe(mut self, probe: Box<dyn MemoryProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Take one snapshot of the process table and return the matching rows,
    /// in listing order.
    pub async fn discover(&self) -> Result<Vec<ProcessRecord>, DiscoveryError> {
        let output = self.run_listing().await?;
        let mut records = parse_listing(&output, &self.config);
        info!("Found {} matching process(es)", records.len());

        if self.config.enrich_memory {
            for record in records.iter_mut() {
                if let Some(mb) = self.measure(record.pid).await {
                    trace!("PID {}: {:.1} MB -> {:.1} MB", record.pid, record.memory_mb, mb);
                    record.memory_mb = mb;
                }
            }
        }

        Ok(records)
    }

    /// Ask the probe for one pid, bounded by the same timeout as the listing.
    async fn measure(&self, pid: i32) -> Option<f64> {
        let probe = self.probe.resident_mb(pid);
        match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, probe)
                .await
                .map_err(|_| debug!("Memory probe for PID {} timed out after {:?}", pid, limit))
                .ok()
                .flatten(),
            None => probe.await,
        }
    }

    async fn run_listing(&self) -> Result<String, DiscoveryError> {
        let run = run_capped(
            &self.config.ps_program,
            &self.config.ps_args,
            self.config.max_output_bytes,
        );
        let captured = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, run)
                .await
                .map_err(|_| DiscoveryError::TimedOut(limit))??,
            None => run.await?,
        };

        if !captured.status.success() {
            return Err(DiscoveryError::ListFailed(format!(
                "{} exited with {}",
                self.config.ps_program.display(),
                captured.status
            )));
        }

        debug!("Process listing: {} bytes", captured.stdout.len());
        Ok(String::from_utf8(captured.stdout)?)
    }
}

/// Parse a full `ps` listing (header first) into the matching records.
pub fn parse_listing(output: &str, config: &FinderConfig) -> Vec<ProcessRecord> {
    output
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| parse_line(line, config))
        .collect()
}

/// Parse one data row. Returns `None` for malformed rows and for rows that
/// fail any of the three criteria.
pub fn parse_line(line: &str, config: &FinderConfig) -> Option<ProcessRecord> {
    let Some(columns) = split_columns::<LISTING_COLUMNS>(line) else {
        trace!("Skipping short row: {:?}", line);
        return None;
    };
    let [pid, comm, cpu, mem, rss, args] = columns;

    if !is_target(comm, args, config) {
        return None;
    }

    let parsed = (
        parse_pid(pid),
        cpu.parse::<f64>(),
        mem.parse::<f64>(),
        rss.parse::<u64>(),
    );
    let (Some(pid), Ok(cpu_percent), Ok(memory_percent), Ok(rss_kib)) = parsed else {
        trace!("Skipping row with non-numeric columns: {:?}", line);
        return None;
    };

    Some(ProcessRecord {
        pid,
        command: args.to_string(),
        cpu_percent,
        memory_percent,
        memory_mb: rss_kib as f64 / 1024.0,
    })
}

/// Plain digits and strictly positive. `kill(2)` gives 0 and negative pids
/// group-wide meaning, so they never become records.
fn parse_pid(column: &str) -> Option<i32> {
    if column.is_empty() || !column.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    column.parse::<i32>().ok().filter(|pid| *pid > 0)
}

/// The three criteria: exact short name, not the desktop app, invoked as
/// the target tool.
pub fn is_target(comm: &str, args: &str, config: &FinderConfig) -> bool {
    comm == config.target_name
        && !args.contains(&config.excluded_path)
        && args.starts_with(&config.target_name)
}

/// Split `line` into `N` whitespace-separated columns; the last one keeps the
/// remainder of the line untouched.
fn split_columns<const N: usize>(line: &str) -> Option<[&str; N]> {
    let mut columns = [""; N];
    let mut rest = line.trim_start();
    for column in columns.iter_mut().take(N - 1) {
        let (head, tail) = rest.split_once(char::is_whitespace)?;
        *column = head;
        rest = tail.trim_start();
    }
    if rest.is_empty() {
        return None;
    }
    columns[N - 1] = rest.trim_end();
    Some(columns)
}
