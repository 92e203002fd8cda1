// unison-replay: run a recorded unison session script and print the
// lifecycle notifications it produces.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use unison_engine::UnisonConfig;
use unison_replay::logging::init_logging;
use unison_replay::{load_script, run_script};

#[derive(Parser, Debug)]
#[command(name = "unison-replay", about = "Replay a unison phrase session script")]
struct Args {
    /// Path to the session script JSON file.
    #[arg(long)]
    script: PathBuf,

    /// Path to the unison config JSON file (defaults used if missing).
    #[arg(long, default_value = "unison.json", env = "UNISON_CONFIG")]
    config: PathBuf,

    /// Show per-event debug logs.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = UnisonConfig::load_from(&args.config)?;
    info!("Loaded unison config from {}", args.config.display());
    let script = load_script(&args.script)?;

    let report = run_script(&script, config)?;
    for event in &report.events {
        println!("{}", serde_json::to_string(event)?);
    }
    info!("Award rate {:.0}%", report.award_rate * 100.0);
    println!("{}", serde_json::to_string_pretty(&report.summary)?);
    println!("{}", serde_json::to_string_pretty(&report.players)?);
    Ok(())
}
