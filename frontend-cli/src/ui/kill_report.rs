//! Per-process kill results.

use backend::{KillOutcome, Signal};
use std::io::{self, Write};

pub struct KillReport;

impl KillReport {
    pub fn show(out: &mut dyn Write, outcomes: &[KillOutcome], signal: Signal) -> io::Result<()> {
        let succeeded = outcomes.iter().filter(|o| o.succeeded).count();
        writeln!(
            out,
            "Killed {}/{} Claude Code processes ({}):",
            succeeded,
            outcomes.len(),
            signal.as_str()
        )?;
        for outcome in outcomes {
            let mark = if outcome.succeeded { "✅" } else { "❌" };
            writeln!(out, "  {} {}", mark, outcome)?;
        }
        Ok(())
    }
}
