//! Process discovery and termination for the `cckill` CLI.
//!
//! Finds running `claude` CLI processes (leaving the Claude desktop app
//! alone), optionally refines their memory figures, and signals them.
//! Uses `ps` for the snapshot, `procfs`/`footprint` for memory and `nix`
//! for signals.

mod command;
mod memory_probe;
mod process_kill;
mod process_list;
mod types;

pub use memory_probe::{default_probe, parse_footprint_output, FootprintProbe, MemoryProbe};
#[cfg(target_os = "linux")]
pub use memory_probe::ProcfsProbe;
pub use nix::errno::Errno;
pub use nix::sys::signal::Signal;
pub use nix::unistd::Pid;
pub use process_kill::{signal_for, NixSignals, ProcessKiller, SignalSender};
pub use process_list::{is_target, parse_line, parse_listing, FinderConfig, ProcessFinder};
pub use types::{DiscoveryError, KillOutcome, ProcessRecord};
