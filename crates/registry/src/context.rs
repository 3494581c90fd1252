//! Registry container sharing one event counter.
//!
//! # Role
//!
//! Owns the [`EventCounter`] and every declared [`Registry`]. All counter-consuming
//! operations go through here so positions stay globally ordered across registries.

use indexmap::IndexMap;
use strata_typelist::{TypeKey, TypeList};
use tracing::{debug, trace, warn};

use crate::{EventCounter, Position, Registry, RegistryError, ScriptStep};

/// Set of named registries over a shared monotonic counter.
#[derive(Debug, Default)]
pub struct RegistryContext {
	counter: EventCounter,
	registries: IndexMap<Box<str>, Registry>,
}

impl RegistryContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares an empty registry and captures its baseline position.
	pub fn declare(&mut self, name: &str) -> Result<Position, RegistryError> {
		if let Some(existing) = self.registries.get(name) {
			warn!(registry = name, baseline = %existing.baseline(), "registry declared twice");
			return Err(RegistryError::AlreadyDeclared {
				name: Box::from(name),
				baseline: existing.baseline(),
			});
		}
		let baseline = self.counter.tick();
		self.registries
			.insert(Box::from(name), Registry::new(name, baseline));
		debug!(registry = name, %baseline, "declared registry");
		Ok(baseline)
	}

	/// Appends `key` to `name` at a fresh position.
	pub fn register(&mut self, name: &str, key: TypeKey) -> Result<Position, RegistryError> {
		let registry = self
			.registries
			.get_mut(name)
			.ok_or_else(|| RegistryError::Undeclared {
				name: Box::from(name),
			})?;
		let position = self.counter.tick();
		let len = registry.record(key, position).len();
		debug!(registry = name, %position, key = key.as_u32(), len, "registered type");
		Ok(position)
	}

	/// Returns everything registered into `name` up to a fresh position.
	///
	/// Consumes a counter position like any other event. Undeclared registries read as empty.
	pub fn read(&mut self, name: &str) -> TypeList {
		let position = self.counter.tick();
		self.read_at(name, position)
	}

	/// Returns everything registered into `name` at or before `position`.
	pub fn read_at(&self, name: &str, position: Position) -> TypeList {
		let snapshot = self
			.registries
			.get(name)
			.map(|registry| registry.snapshot_at(position))
			.unwrap_or_default();
		trace!(registry = name, %position, len = snapshot.len(), "read registry");
		snapshot
	}

	/// Advances the counter without registering anything.
	pub fn noise(&mut self) -> Position {
		self.counter.tick()
	}

	/// Replays `steps` into `name`, returning the position of every step.
	pub fn replay(&mut self, name: &str, steps: &[ScriptStep]) -> Result<Vec<Position>, RegistryError> {
		steps
			.iter()
			.map(|step| match *step {
				ScriptStep::Register(key) => self.register(name, key),
				ScriptStep::Noise => Ok(self.noise()),
			})
			.collect()
	}

	/// Position the next event will occupy.
	pub fn position(&self) -> Position {
		self.counter.peek()
	}

	/// Returns the registry declared under `name`.
	pub fn registry(&self, name: &str) -> Option<&Registry> {
		self.registries.get(name)
	}

	/// Returns declared registry names in declaration order.
	pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
		self.registries.keys().map(|name| &**name)
	}

	/// Number of registrations recorded into `name` so far.
	pub fn count(&self, name: &str) -> usize {
		self.registries.get(name).map_or(0, Registry::len)
	}
}
