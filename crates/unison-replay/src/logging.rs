use anyhow::Result;
use env_logger::Env;

/// Initialize the logging system.
///
/// `RUST_LOG` overrides the default filter. The `verbose` flag raises the
/// default to debug so per-event traces from the coordinator are shown.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        "unison_engine=debug,unison_replay=debug,warn"
    } else {
        "unison_engine=info,unison_replay=info,warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .try_init()?;
    Ok(())
}
