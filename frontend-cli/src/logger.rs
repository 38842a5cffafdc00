use env_logger::{Builder, Target};
use log::LevelFilter;

/// Log to stderr at `warn` by default, one level more per `-v`.
/// `RUST_LOG` takes precedence.
pub fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(Target::Stderr)
        .init();
}
