//! Plain-text process list for `--list`.

use backend::ProcessRecord;
use std::io::{self, Write};

pub struct ProcessTable;

impl ProcessTable {
    pub fn show(out: &mut dyn Write, processes: &[ProcessRecord]) -> io::Result<()> {
        writeln!(out, "Claude Code Processes:")?;
        for process in processes {
            writeln!(out, "  {}", process)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_process() {
        let processes = vec![
            ProcessRecord {
                pid: 1,
                command: "claude".to_string(),
                cpu_percent: 0.0,
                memory_percent: 0.5,
                memory_mb: 100.0,
            },
            ProcessRecord {
                pid: 2,
                command: "claude --resume".to_string(),
                cpu_percent: 99.5,
                memory_percent: 2.0,
                memory_mb: 1536.0,
            },
        ];
        let mut out = Vec::new();
        ProcessTable::show(&mut out, &processes).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Claude Code Processes:\n\
             \x20 PID 1: claude (CPU: 0.0%, MEM: 0.5% / 100.0 MB)\n\
             \x20 PID 2: claude --resume (CPU: 99.5%, MEM: 2.0% / 1536.0 MB)\n"
        );
    }
}
