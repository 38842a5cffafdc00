use app::{run, RunOptions};
use backend::{ProcessFinder, ProcessKiller};
use clap::Parser;
use cli::Cli;
use logger::init_logger;
use std::process::ExitCode;

mod app;
mod cli;
mod logger;
mod ui;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let finder = ProcessFinder::new(cli.finder_config());
    let killer = ProcessKiller::new();
    let options = RunOptions {
        list_only: cli.list,
        force: cli.force,
    };

    let mut stdout = std::io::stdout().lock();
    match run(&finder, &killer, options, &mut stdout).await {
        Ok(status) => status.exit_code(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
