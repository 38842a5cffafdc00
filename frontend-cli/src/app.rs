//! Discovery, then list or kill, then report.

use crate::ui::kill_report::KillReport;
use crate::ui::process_table::ProcessTable;
use crate::ui::status_bar::StatusBar;
use anyhow::Result;
use backend::{signal_for, ProcessFinder, ProcessKiller, SignalSender};
use std::io::Write;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub list_only: bool,
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    NothingFound,
    Listed,
    AllKilled,
    SomeFailed,
}

impl RunStatus {
    pub fn exit_code(self) -> ExitCode {
        match self {
            RunStatus::SomeFailed => ExitCode::FAILURE,
            _ => ExitCode::SUCCESS,
        }
    }
}

pub async fn run<S: SignalSender>(
    finder: &ProcessFinder,
    killer: &ProcessKiller<S>,
    options: RunOptions,
    out: &mut dyn Write,
) -> Result<RunStatus> {
    let processes = finder.discover().await?;

    if processes.is_empty() {
        writeln!(out, "No Claude Code processes found.")?;
        return Ok(RunStatus::NothingFound);
    }

    if options.list_only {
        ProcessTable::show(out, &processes)?;
        StatusBar::show(out, &processes)?;
        return Ok(RunStatus::Listed);
    }

    let outcomes = killer.terminate_all(&processes, options.force);
    KillReport::show(out, &outcomes, signal_for(options.force))?;

    if outcomes.iter().all(|o| o.succeeded) {
        Ok(RunStatus::AllKilled)
    } else {
        Ok(RunStatus::SomeFailed)
    }
}
