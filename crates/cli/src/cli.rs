use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(about = "Replay registration scripts and walk ancestor chains")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Lattice file to load (uses the builtin lattice if omitted)
	#[arg(short, long, value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Reject candidate sets that are not totally ordered
	#[arg(long, global = true)]
	pub strict: bool,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute (checks, then walks `D` and `K` in `full`, if omitted).
	#[command(subcommand)]
	pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Run every fixture check in the lattice
	Check,
	/// Print the snapshot of a registry
	Snapshot {
		/// Registry to read
		registry: String,
	},
	/// Resolve and walk the ancestor chains of the given classes
	Walk {
		/// Registry whose snapshot supplies the candidates
		#[arg(short, long, default_value = crate::DEFAULT_REGISTRY)]
		registry: String,

		/// Classes to walk
		#[arg(required = true)]
		targets: Vec<String>,
	},
}
