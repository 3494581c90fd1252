//! TOML lattice files.
//!
//! A lattice file declares classes, replays registration scripts into named registries and
//! lists fixture checks:
//!
//! ```toml
//! linearization = "stable"
//!
//! [[class]]
//! name = "A"
//!
//! [[class]]
//! name = "C"
//! bases = ["A"]
//!
//! [[registry]]
//! name = "main"
//! script = ["C", "~", "A"]
//!
//! [[check]]
//! registry = "main"
//! target = "C"
//! expect = ["A"]
//! ```
//!
//! Script entries are class names, or [`NOISE_TOKEN`] for an event that only advances the
//! counter. A check without `target` compares the registry snapshot itself.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use strata_registry::{RegistryContext, RegistryError, ScriptStep};
use strata_typelist::TypeList;
use tracing::{debug, info};

use crate::{
	AncestorChain, Hierarchy, HierarchyBuilder, HierarchyError, Linearization, ResolveError,
	find_ancestors_with,
};

/// Script token standing for a noise event.
pub const NOISE_TOKEN: &str = "~";

/// Failures loading, building or querying a lattice.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read {}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("invalid lattice file: {0}")]
	Parse(#[from] toml::de::Error),

	#[error(transparent)]
	Hierarchy(#[from] HierarchyError),

	#[error(transparent)]
	Registry(#[from] RegistryError),

	#[error(transparent)]
	Resolve(#[from] ResolveError),

	#[error("registry {registry:?} script names undeclared class {class:?}")]
	UnknownClass { registry: String, class: String },
}

/// Parsed lattice file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LatticeConfig {
	#[serde(default)]
	pub linearization: Linearization,
	#[serde(default, rename = "class")]
	pub classes: Vec<ClassConfig>,
	#[serde(default, rename = "registry")]
	pub registries: Vec<RegistryConfig>,
	#[serde(default, rename = "check")]
	pub checks: Vec<Check>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassConfig {
	pub name: String,
	#[serde(default)]
	pub bases: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
	pub name: String,
	#[serde(default)]
	pub script: Vec<String>,
}

/// Expected snapshot of `registry`, or expected ancestor chain of `target` within it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Check {
	pub registry: String,
	#[serde(default)]
	pub target: Option<String>,
	pub expect: Vec<String>,
}

impl Check {
	/// Check on the registry snapshot.
	pub fn snapshot(registry: &str, expect: &[&str]) -> Self {
		Self {
			registry: registry.to_owned(),
			target: None,
			expect: expect.iter().map(|s| (*s).to_owned()).collect(),
		}
	}

	/// Check on the ancestor chain of `target`.
	pub fn chain(registry: &str, target: &str, expect: &[&str]) -> Self {
		Self {
			target: Some(target.to_owned()),
			..Self::snapshot(registry, expect)
		}
	}
}

/// A check whose observed value differs from its expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
	pub check: Check,
	pub actual: Result<Vec<String>, String>,
}

impl fmt::Display for CheckFailure {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "registry {:?}", self.check.registry)?;
		if let Some(target) = &self.check.target {
			write!(f, ", ancestors of {target:?}")?;
		}
		write!(f, ": expected [{}], ", self.check.expect.join(", "))?;
		match &self.actual {
			Ok(actual) => write!(f, "got [{}]", actual.join(", ")),
			Err(error) => write!(f, "failed: {error}"),
		}
	}
}

/// Reads and parses a lattice file.
pub fn load_lattice(path: &Path) -> Result<LatticeConfig, ConfigError> {
	let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	let config = LatticeConfig::from_toml(&content)?;
	info!(
		path = %path.display(),
		classes = config.classes.len(),
		registries = config.registries.len(),
		checks = config.checks.len(),
		"loaded lattice"
	);
	Ok(config)
}

impl LatticeConfig {
	pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}

	/// Builds the inheritance relation declared by `[[class]]` entries.
	pub fn hierarchy(&self) -> Result<Hierarchy, HierarchyError> {
		let mut builder = HierarchyBuilder::new();
		for class in &self.classes {
			let bases: Vec<&str> = class.bases.iter().map(String::as_str).collect();
			builder.class(&class.name, &bases)?;
		}
		builder.build()
	}

	/// Builds the hierarchy and replays every registry script in file order.
	pub fn build(&self) -> Result<Lattice, ConfigError> {
		let hierarchy = self.hierarchy()?;
		let mut registries = RegistryContext::new();
		for registry in &self.registries {
			registries.declare(&registry.name)?;
			let steps = parse_script(&hierarchy, &registry.name, &registry.script)?;
			registries.replay(&registry.name, &steps)?;
			debug!(registry = %registry.name, steps = steps.len(), "replayed script");
		}
		Ok(Lattice::new(
			hierarchy,
			registries,
			self.checks.clone(),
			self.linearization,
		))
	}
}

impl FromStr for LatticeConfig {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_toml(s)
	}
}

/// Resolves script tokens against `hierarchy`.
pub fn parse_script<S: AsRef<str>>(
	hierarchy: &Hierarchy,
	registry: &str,
	tokens: &[S],
) -> Result<Vec<ScriptStep>, ConfigError> {
	tokens
		.iter()
		.map(|token| match token.as_ref() {
			NOISE_TOKEN => Ok(ScriptStep::Noise),
			name => hierarchy
				.key(name)
				.map(ScriptStep::Register)
				.ok_or_else(|| ConfigError::UnknownClass {
					registry: registry.to_owned(),
					class: name.to_owned(),
				}),
		})
		.collect()
}

/// A hierarchy with populated registries and the checks to run against them.
#[derive(Debug)]
pub struct Lattice {
	hierarchy: Hierarchy,
	registries: RegistryContext,
	checks: Vec<Check>,
	linearization: Linearization,
}

impl Lattice {
	pub fn new(
		hierarchy: Hierarchy,
		registries: RegistryContext,
		checks: Vec<Check>,
		linearization: Linearization,
	) -> Self {
		Self {
			hierarchy,
			registries,
			checks,
			linearization,
		}
	}

	pub fn hierarchy(&self) -> &Hierarchy {
		&self.hierarchy
	}

	pub fn registries(&self) -> &RegistryContext {
		&self.registries
	}

	pub fn checks(&self) -> &[Check] {
		&self.checks
	}

	pub fn linearization(&self) -> Linearization {
		self.linearization
	}

	pub fn set_linearization(&mut self, linearization: Linearization) {
		self.linearization = linearization;
	}

	/// Reads the current snapshot of `registry`.
	pub fn snapshot(&mut self, registry: &str) -> TypeList {
		self.registries.read(registry)
	}

	/// Resolves the ancestors of `target` among the current snapshot of `registry`.
	pub fn ancestors(&mut self, registry: &str, target: &str) -> Result<AncestorChain, ConfigError> {
		let target = self.hierarchy.require(target)?;
		let candidates = self.registries.read(registry);
		Ok(find_ancestors_with(
			&self.hierarchy,
			&candidates,
			target,
			self.linearization,
		)?)
	}

	/// Runs every check, returning the ones that failed.
	pub fn verify(&mut self) -> Vec<CheckFailure> {
		let checks = self.checks.clone();
		checks
			.into_iter()
			.filter_map(|check| {
				let actual = self.observe(&check);
				let passed = matches!(&actual, Ok(names) if *names == check.expect);
				debug!(registry = %check.registry, target = ?check.target, passed, "ran check");
				(!passed).then_some(CheckFailure { check, actual })
			})
			.collect()
	}

	fn observe(&mut self, check: &Check) -> Result<Vec<String>, String> {
		let list = match &check.target {
			None => self.snapshot(&check.registry),
			Some(target) => self
				.ancestors(&check.registry, target)
				.map_err(|error| error.to_string())?
				.into_links(),
		};
		Ok(list
			.iter()
			.map(|key| self.hierarchy.display_name(key))
			.collect())
	}
}
