//! A single named registry log.
//!
//! # Role
//!
//! Holds the baseline position captured at declaration and one memoized snapshot per
//! registration position. Contains no counter logic; positions are handed in by
//! [`crate::RegistryContext`].

use std::collections::BTreeMap;

use strata_typelist::{TypeKey, TypeList};

use crate::Position;

/// One registration: the key recorded at a position and the snapshot it produced.
#[derive(Debug, Clone)]
struct Entry {
	key: TypeKey,
	snapshot: TypeList,
}

/// Append-only log of registrations for one registry name.
#[derive(Debug, Clone)]
pub struct Registry {
	name: Box<str>,
	baseline: Position,
	entries: BTreeMap<Position, Entry>,
}

impl Registry {
	pub(crate) fn new(name: &str, baseline: Position) -> Self {
		Self {
			name: Box::from(name),
			baseline,
			entries: BTreeMap::new(),
		}
	}

	/// Records `key` at `at`, which must be later than every recorded position.
	pub(crate) fn record(&mut self, key: TypeKey, at: Position) -> &TypeList {
		debug_assert!(
			at > self.baseline && self.entries.keys().next_back().is_none_or(|&last| last < at),
			"registry {}: position {at} is not monotonic",
			self.name
		);
		let previous = at
			.prev()
			.map(|p| self.snapshot_at(p))
			.unwrap_or_default();
		let snapshot = previous.append(key);
		&self.entries.entry(at).or_insert(Entry { key, snapshot }).snapshot
	}

	/// Returns every key registered at or before `at`, in position order.
	///
	/// Walks backward from `at` to the latest recorded position, bounded below by the baseline.
	/// Positions before the baseline, or a registry with no entries yet, yield the empty list.
	pub fn snapshot_at(&self, at: Position) -> TypeList {
		if at < self.baseline {
			return TypeList::empty();
		}
		self.entries
			.range(self.baseline..=at)
			.next_back()
			.map(|(_, entry)| entry.snapshot.clone())
			.unwrap_or_default()
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Position captured when the registry was declared.
	pub fn baseline(&self) -> Position {
		self.baseline
	}

	/// Returns `(position, key)` for every registration in order.
	pub fn entries(&self) -> impl Iterator<Item = (Position, TypeKey)> + '_ {
		self.entries.iter().map(|(&pos, entry)| (pos, entry.key))
	}

	/// Number of registrations recorded.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
