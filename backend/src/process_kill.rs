//! Process killing functionality.

use crate::types::{KillOutcome, ProcessRecord};
use log::{info, warn};
use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

/// Delivers a signal to a process.
pub trait SignalSender {
    fn send(&self, pid: Pid, signal: Signal) -> nix::Result<()>;
}

/// Sends real signals with `kill(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NixSignals;

impl SignalSender for NixSignals {
    fn send(&self, pid: Pid, signal: Signal) -> nix::Result<()> {
        signal::kill(pid, signal)
    }
}

/// SIGKILL when forced, SIGTERM otherwise.
pub fn signal_for(force: bool) -> Signal {
    if force {
        Signal::SIGKILL
    } else {
        Signal::SIGTERM
    }
}

/// Terminates processes and reports each attempt as a [`KillOutcome`].
#[derive(Debug, Clone, Default)]
pub struct ProcessKiller<S: SignalSender = NixSignals> {
    sender: S,
}

impl ProcessKiller {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: SignalSender> ProcessKiller<S> {
    pub fn with_sender(sender: S) -> Self {
        Self { sender }
    }

    /// Send one signal to `record.pid`.
    ///
    /// Success means the kernel accepted the signal; the process may still be
    /// running when this returns.
    pub fn terminate(&self, record: &ProcessRecord, force: bool) -> KillOutcome {
        let signal = signal_for(force);
        if record.pid <= 0 {
            warn!("Refusing to signal non-positive PID {}", record.pid);
            return KillOutcome::failure(record.pid, "Invalid PID");
        }
        match self.sender.send(Pid::from_raw(record.pid), signal) {
            Ok(()) => {
                info!("Sent {} to PID {}", signal.as_str(), record.pid);
                KillOutcome::success(record.pid)
            }
            Err(Errno::EPERM) => {
                warn!("Not allowed to signal PID {}", record.pid);
                KillOutcome::failure(record.pid, "Permission denied")
            }
            Err(errno) => {
                warn!("Failed to send {} to PID {}: {}", signal.as_str(), record.pid, errno);
                KillOutcome::failure(record.pid, errno.desc())
            }
        }
    }

    /// Terminate every record in order, continuing past failures.
    pub fn terminate_all(&self, records: &[ProcessRecord], force: bool) -> Vec<KillOutcome> {
        records
            .iter()
            .map(|record| self.terminate(record, force))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Answers from a pid -> result table and records every call.
    #[derive(Default)]
    struct ScriptedSender {
        results: HashMap<i32, Errno>,
        calls: RefCell<Vec<(i32, Signal)>>,
    }

    impl ScriptedSender {
        fn failing(pid: i32, errno: Errno) -> Self {
            let mut sender = Self::default();
            sender.results.insert(pid, errno);
            sender
        }
    }

    impl SignalSender for &ScriptedSender {
        fn send(&self, pid: Pid, signal: Signal) -> nix::Result<()> {
            self.calls.borrow_mut().push((pid.as_raw(), signal));
            match self.results.get(&pid.as_raw()) {
                Some(errno) => Err(*errno),
                None => Ok(()),
            }
        }
    }

    fn record(pid: i32) -> ProcessRecord {
        ProcessRecord {
            pid,
            command: "claude".to_string(),
            cpu_percent: 0.0,
            memory_percent: 0.0,
            memory_mb: 0.0,
        }
    }

    #[test]
    fn success_outcome() {
        let sender = ScriptedSender::default();
        let killer = ProcessKiller::with_sender(&sender);
        assert_eq!(killer.terminate(&record(10), false), KillOutcome::success(10));
        assert_eq!(*sender.calls.borrow(), vec![(10, Signal::SIGTERM)]);
    }

    #[test]
    fn force_sends_sigkill() {
        let sender = ScriptedSender::default();
        let killer = ProcessKiller::with_sender(&sender);
        killer.terminate(&record(10), true);
        assert_eq!(*sender.calls.borrow(), vec![(10, Signal::SIGKILL)]);
    }

    #[test]
    fn eperm_is_permission_denied() {
        let sender = ScriptedSender::failing(10, Errno::EPERM);
        let killer = ProcessKiller::with_sender(&sender);
        assert_eq!(
            killer.terminate(&record(10), false),
            KillOutcome::failure(10, "Permission denied")
        );
    }

    #[test]
    fn other_errors_carry_os_description() {
        let sender = ScriptedSender::failing(10, Errno::ESRCH);
        let killer = ProcessKiller::with_sender(&sender);
        let outcome = killer.terminate(&record(10), false);
        assert!(!outcome.succeeded);
        assert_eq!(outcome.error.as_deref(), Some(Errno::ESRCH.desc()));
    }

    #[test]
    fn terminate_all_keeps_order_and_continues() {
        let mut sender = ScriptedSender::failing(2, Errno::EPERM);
        sender.results.insert(3, Errno::ESRCH);
        let killer = ProcessKiller::with_sender(&sender);

        let records = [record(3), record(1), record(2), record(4)];
        let outcomes = killer.terminate_all(&records, false);

        let pids: Vec<i32> = outcomes.iter().map(|o| o.pid).collect();
        assert_eq!(pids, vec![3, 1, 2, 4]);
        let succeeded: Vec<bool> = outcomes.iter().map(|o| o.succeeded).collect();
        assert_eq!(succeeded, vec![false, true, false, true]);
        assert_eq!(sender.calls.borrow().len(), 4);
    }

    #[test]
    fn terminate_all_of_nothing() {
        let sender = ScriptedSender::default();
        let killer = ProcessKiller::with_sender(&sender);
        assert!(killer.terminate_all(&[], true).is_empty());
        assert!(sender.calls.borrow().is_empty());
    }

    #[test]
    fn non_positive_pids_are_never_signalled() {
        let sender = ScriptedSender::default();
        let killer = ProcessKiller::with_sender(&sender);
        let outcomes = killer.terminate_all(&[record(-1), record(0)], true);
        assert_eq!(
            outcomes,
            vec![
                KillOutcome::failure(-1, "Invalid PID"),
                KillOutcome::failure(0, "Invalid PID"),
            ]
        );
        assert!(sender.calls.borrow().is_empty());
    }

    #[test]
    fn nix_signals_reports_missing_process() {
        // Signal 0 only checks existence; pid i32::MAX is never allocated.
        let result = signal::kill(Pid::from_raw(i32::MAX), None);
        assert_eq!(result, Err(Errno::ESRCH));
        let outcome = ProcessKiller::new().terminate(&record(i32::MAX), false);
        assert_eq!(outcome.error.as_deref(), Some(Errno::ESRCH.desc()));
    }
}
