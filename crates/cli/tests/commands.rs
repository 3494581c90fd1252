#![allow(unused_crate_dependencies)]

use std::io::Write;

use clap::Parser;
use pretty_assertions::assert_eq;
use strata::{Cli, Command, builtin, open, run};

fn output(lattice: &mut strata_hierarchy::Lattice, command: Option<&Command>) -> anyhow::Result<String> {
	let mut out = Vec::new();
	run(lattice, command, &mut out)?;
	Ok(String::from_utf8(out)?)
}

#[test]
fn test_builtin_checks_pass() {
	let mut lattice = builtin::lattice().expect("builtin lattice builds");
	assert_eq!(lattice.hierarchy().len(), 14);
	assert!(lattice.verify().is_empty());
	assert_eq!(
		output(&mut lattice, Some(&Command::Check)).expect("checks pass"),
		"8 of 8 checks passed\n"
	);
}

#[test]
fn test_default_command_checks_then_walks() {
	let mut lattice = open(None, false).expect("builtin lattice builds");
	let out = output(&mut lattice, None).expect("default run");
	assert_eq!(
		out,
		"8 of 8 checks passed\n\
		 D : [A, C]\n\
		 base = A\n\
		 base = C\n\
		 K : [F, H, I, J]\n\
		 base = F\n\
		 base = H\n\
		 base = I\n\
		 base = J\n"
	);
}

#[test]
fn test_snapshot_command() {
	let mut lattice = open(None, false).expect("builtin lattice builds");
	let command = Command::Snapshot {
		registry: "interleaved".into(),
	};
	assert_eq!(
		output(&mut lattice, Some(&command)).expect("snapshot"),
		"interleaved = [I, E, C, D, B, F, H, G, A]\n"
	);
}

#[test]
fn test_strict_walk_rejects_diamond() {
	let mut lattice = open(None, true).expect("builtin lattice builds");
	let command = Command::Walk {
		registry: "full".into(),
		targets: vec!["Z".into(), "K".into()],
	};
	let mut out = Vec::new();
	let err = run(&mut lattice, Some(&command), &mut out).expect_err("K has unrelated bases");
	assert!(format!("{err:#}").contains("not a chain"), "{err:#}");
	assert_eq!(
		String::from_utf8(out).expect("utf8"),
		"Z : [F, G]\nbase = F\nbase = G\n"
	);
}

#[test]
fn test_walk_unknown_target() {
	let mut lattice = open(None, false).expect("builtin lattice builds");
	let command = Command::Walk {
		registry: "full".into(),
		targets: vec!["Q".into()],
	};
	assert!(output(&mut lattice, Some(&command)).is_err());
}

#[test]
fn test_lattice_file_with_failing_check() {
	let mut file = tempfile::NamedTempFile::new().expect("temp file");
	file.write_all(
		br#"
[[class]]
name = "Root"
[[class]]
name = "Leaf"
bases = ["Root"]

[[registry]]
name = "full"
script = ["Leaf", "~", "Root"]

[[check]]
registry = "full"
target = "Leaf"
expect = []
"#,
	)
	.expect("write lattice");

	let mut lattice = open(Some(file.path()), false).expect("lattice file builds");
	let mut out = Vec::new();
	let err = run(&mut lattice, Some(&Command::Check), &mut out).expect_err("check fails");
	assert_eq!(err.to_string(), "1 of 1 checks failed");
	assert_eq!(
		String::from_utf8(out).expect("utf8"),
		"FAIL registry \"full\", ancestors of \"Leaf\": expected [], got [Root]\n\
		 0 of 1 checks passed\n"
	);

	let walk = Command::Walk {
		registry: "full".into(),
		targets: vec!["Leaf".into()],
	};
	assert_eq!(
		output(&mut lattice, Some(&walk)).expect("walk"),
		"Leaf : [Root]\nbase = Root\n"
	);
}

#[test]
fn test_cli_parses_walk() {
	let cli = Cli::try_parse_from(["strata", "--strict", "walk", "D", "K"]).expect("valid args");
	assert!(cli.strict);
	match cli.command {
		Some(Command::Walk { registry, targets }) => {
			assert_eq!(registry, "full");
			assert_eq!(targets, vec!["D", "K"]);
		}
		other => panic!("unexpected command: {other:?}"),
	}
	assert!(Cli::try_parse_from(["strata", "walk"]).is_err());
}
