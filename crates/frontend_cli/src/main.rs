//! Linkfield scenario runner.
//!
//! Loads a scenario file, binds the configured field to the scenario's record
//! and reports primary, render order and change notifications after every step.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

mod session;

use session::Session;

/// Scenario runner command line arguments.
#[derive(Parser, Debug)]
#[command(name = "linkfield")]
#[command(about = "Run a scripted link field session")]
#[command(version)]
struct Args {
	/// Scenario file (TOML)
	#[arg(value_name = "PATH")]
	scenario: PathBuf,

	/// Print step reports as JSON
	#[arg(long)]
	json: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	setup_tracing(args.verbose);

	let scenario = linkfield_config::load(&args.scenario)
		.with_context(|| format!("loading scenario {}", args.scenario.display()))?;
	info!(field = scenario.field.name(), mode = scenario.field.mode().name(), "starting session");

	let mut session = Session::start(&scenario.field, scenario.record.clone())?;
	let reports = session.run_all(&scenario.steps);
	let rejected = reports.iter().filter(|report| report.error.is_some()).count();

	if args.json {
		println!("{}", serde_json::to_string_pretty(&reports)?);
	} else {
		for report in &reports {
			println!("{report}");
		}
	}
	info!(steps = reports.len(), rejected, "session finished");

	Ok(())
}

fn setup_tracing(verbose: bool) {
	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_max_level(if verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.init();
}
