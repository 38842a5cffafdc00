//! Summary line showing process count and memory total.

use backend::ProcessRecord;
use std::io::{self, Write};

pub struct StatusBar;

impl StatusBar {
    pub fn show(out: &mut dyn Write, processes: &[ProcessRecord]) -> io::Result<()> {
        let total_memory: f64 = processes.iter().map(|p| p.memory_mb).sum();
        let noun = if processes.len() == 1 {
            "process"
        } else {
            "processes"
        };
        writeln!(
            out,
            "{} {}, {:.1} MB total",
            processes.len(),
            noun,
            total_memory
        )
    }
}
