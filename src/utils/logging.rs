use crate::config::Config;
use log::LevelFilter;

pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger at the level implied by `config.verbosity`.
/// `RUST_LOG` still overrides per-module filters. Calling it twice is a no-op.
pub fn init(config: &Config) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for(config.verbosity))
        .parse_default_env()
        .format_timestamp_secs()
        .try_init();
}
