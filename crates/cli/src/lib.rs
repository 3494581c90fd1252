#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Command implementations behind the `strata` binary.
//!
//! Every command works on a [`Lattice`]: either the [`builtin`] one or a lattice file loaded
//! with [`load_lattice`]. Output goes to a caller-supplied writer so commands can be driven
//! from tests.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, bail};
use strata_hierarchy::{Instance, Lattice, Linearization, WriteReporter, load_lattice, walk};
use tracing::{info, warn};
#[allow(unused_imports, reason = "the strata binary installs the subscriber")]
use tracing_subscriber as _;

pub mod builtin;
pub mod cli;

pub use cli::{Cli, Command};

/// Registry walked when no registry is named.
pub const DEFAULT_REGISTRY: &str = "full";

/// Classes walked when no subcommand is given.
pub const DEFAULT_TARGETS: &[&str] = &["D", "K"];

/// Loads the lattice at `path`, or the builtin one.
pub fn open(path: Option<&Path>, strict: bool) -> anyhow::Result<Lattice> {
	let mut lattice = match path {
		Some(path) => load_lattice(path)?
			.build()
			.with_context(|| format!("failed to build lattice {}", path.display()))?,
		None => builtin::lattice().context("failed to build builtin lattice")?,
	};
	if strict {
		lattice.set_linearization(Linearization::Strict);
	}
	Ok(lattice)
}

/// Runs `command` against `lattice`, writing results to `out`.
pub fn run(lattice: &mut Lattice, command: Option<&Command>, out: &mut dyn Write) -> anyhow::Result<()> {
	match command {
		Some(Command::Check) => check(lattice, out),
		Some(Command::Snapshot { registry }) => snapshot(lattice, registry, out),
		Some(Command::Walk { registry, targets }) => {
			walk_targets(lattice, registry, targets.as_slice(), out)
		}
		None => {
			check(lattice, out)?;
			walk_targets(lattice, DEFAULT_REGISTRY, DEFAULT_TARGETS, out)
		}
	}
}

/// Runs every check, failing if any does not hold.
pub fn check(lattice: &mut Lattice, out: &mut dyn Write) -> anyhow::Result<()> {
	let total = lattice.checks().len();
	let failures = lattice.verify();
	for failure in &failures {
		warn!(%failure, "check failed");
		writeln!(out, "FAIL {failure}")?;
	}
	writeln!(out, "{} of {total} checks passed", total - failures.len())?;
	if !failures.is_empty() {
		bail!("{} of {total} checks failed", failures.len());
	}
	info!(checks = total, "all checks passed");
	Ok(())
}

/// Prints the current snapshot of `registry`.
pub fn snapshot(lattice: &mut Lattice, registry: &str, out: &mut dyn Write) -> anyhow::Result<()> {
	let list = lattice.snapshot(registry);
	writeln!(out, "{registry} = {}", list.display(lattice.hierarchy().table()))?;
	Ok(())
}

/// Resolves each target's chain in `registry` and walks an instance of it up the chain.
pub fn walk_targets<S: AsRef<str>>(
	lattice: &mut Lattice,
	registry: &str,
	targets: &[S],
	out: &mut dyn Write,
) -> anyhow::Result<()> {
	for target in targets {
		let target = target.as_ref();
		let chain = lattice
			.ancestors(registry, target)
			.with_context(|| format!("failed to resolve ancestors of {target}"))?;
		let hierarchy = lattice.hierarchy();
		writeln!(out, "{target} : {}", chain.display(hierarchy.table()))?;

		let instance = Instance::new(hierarchy, chain.target())?;
		let mut reporter = WriteReporter::new(&mut *out);
		walk(&chain, &instance, &mut reporter)?;
	}
	Ok(())
}
