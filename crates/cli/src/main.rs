#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Strata binary.
//!
//! Loads a lattice (builtin or from a TOML file), replays its registration scripts and runs the
//! requested command, writing results to stdout and logs to stderr.

use std::io::{self, Write};

use clap::Parser;
use strata::Cli;
#[allow(unused_imports, reason = "strata-hierarchy is used by the strata library target")]
use strata_hierarchy as _;
use tracing::info;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	info!(config = ?cli.config, strict = cli.strict, "starting strata");

	let mut lattice = strata::open(cli.config.as_deref(), cli.strict)?;
	let mut out = io::stdout().lock();
	strata::run(&mut lattice, cli.command.as_ref(), &mut out)?;
	out.flush()?;
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	// STRATA_LOG takes precedence over RUST_LOG
	let filter = EnvFilter::try_from_env("STRATA_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("strata=trace,debug")
			} else {
				EnvFilter::new("warn")
			}
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(verbose)
		.init();
}
