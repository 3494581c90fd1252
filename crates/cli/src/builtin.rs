//! Builtin lattice used when no lattice file is given.
//!
//! ```text
//!                                     F
//!                                    / \
//!      A                            H   \
//!     / \                          / \   \
//!    B   C                        I   J   G
//!   /   / \                        \ /   / \
//!  T   D   E                        K   L   Z
//! ```

use strata_hierarchy::config::{NOISE_TOKEN as N, parse_script};
use strata_hierarchy::registry::RegistryContext;
use strata_hierarchy::{Check, ConfigError, Hierarchy, Lattice, Linearization, class};
use tracing::debug;

class!(A);
class!(B: A);
class!(C: A);
class!(T: B);
class!(D: C);
class!(E: C);
class!(F);
class!(G: F);
class!(L: G);
class!(Z: G);
class!(H: F);
class!(I: H);
class!(J: H);
class!(
	/// Only class with two direct bases.
	K: I, J
);

/// Registrations interleaved with unrelated events.
pub const INTERLEAVED: &[&str] = &[
	"I", "E", N, "C", "D", "B", N, "F", "H", "G", N, N, N, N, N, N, "A",
];

/// A prefix of [`FULL`] with noise between registrations.
pub const PARTIAL: &[&str] = &["I", N, "C", "Z", N, N, "G", "D", N, "F"];

/// Every class at least once, with repeats.
pub const FULL: &[&str] = &[
	"I", "C", "Z", "G", "D", "F", "L", "C", "I", "A", "T", "B", "J", "K", "H", "E", "E",
];

/// Registries in declaration order.
pub const REGISTRIES: &[(&str, &[&str])] = &[
	("interleaved", INTERLEAVED),
	("partial", PARTIAL),
	("full", FULL),
];

/// Expected snapshots and chains of the builtin registries.
pub fn checks() -> Vec<Check> {
	vec![
		Check::snapshot("interleaved", &["I", "E", "C", "D", "B", "F", "H", "G", "A"]),
		Check::chain("interleaved", "D", &["A", "C"]),
		Check::snapshot("partial", &["I", "C", "Z", "G", "D", "F"]),
		Check::chain("partial", "D", &["C"]),
		Check::chain("full", "D", &["A", "C"]),
		Check::chain("full", "K", &["F", "H", "I", "J"]),
		Check::chain("full", "Z", &["F", "G"]),
		Check::chain("full", "A", &[]),
	]
}

/// Collects the `class!` declarations and replays [`REGISTRIES`].
pub fn lattice() -> Result<Lattice, ConfigError> {
	let hierarchy = Hierarchy::from_inventory()?;
	let mut registries = RegistryContext::new();
	for &(name, script) in REGISTRIES {
		registries.declare(name)?;
		let steps = parse_script(&hierarchy, name, script)?;
		registries.replay(name, &steps)?;
	}
	debug!(
		classes = hierarchy.len(),
		registries = REGISTRIES.len(),
		"built builtin lattice"
	);
	Ok(Lattice::new(
		hierarchy,
		registries,
		checks(),
		Linearization::Stable,
	))
}
