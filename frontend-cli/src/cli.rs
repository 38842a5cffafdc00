use backend::FinderConfig;
use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "cckill",
    version,
    about = "Kill Claude Code CLI processes (excluding Claude Desktop App)"
)]
pub struct Cli {
    /// List Claude Code processes without killing
    #[arg(short, long)]
    pub list: bool,

    /// Force kill using SIGKILL instead of SIGTERM
    #[arg(short, long)]
    pub force: bool,

    /// Give up on the process listing, and on each memory measurement, after
    /// this many seconds
    #[arg(long, env = "CCKILL_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Keep the memory figures from `ps` instead of measuring each process
    #[arg(long)]
    pub no_footprint: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig {
            timeout: self.timeout.map(Duration::from_secs),
            enrich_memory: !self.no_footprint,
            ..FinderConfig::default()
        }
    }
}
