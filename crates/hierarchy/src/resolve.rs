//! Ancestor-chain resolution.
//!
//! # Role
//!
//! Turns a typelist of candidates into the root-first chain of those candidates that are bases
//! of a target type.
//!
//! # Invariants
//!
//! - The target itself never appears in its chain (the relation is strict).
//! - The chain is duplicate-free: extracting a key removes every copy of it from the working set.
//! - Under [`Linearization::Stable`], incomparable candidates come out in candidate order.

use serde::Deserialize;
use strata_typelist::{TypeKey, TypeList, TypeTable};
use tracing::trace;

use crate::Hierarchy;

/// Policy for working sets whose most ancient element is not a base of every peer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linearization {
	/// Keep the fold's tie-break: the earliest incomparable candidate is extracted first.
	#[default]
	Stable,
	/// Reject candidate sets that are not totally ordered by the base relation.
	Strict,
}

/// Resolver failures. Only [`Linearization::Strict`] can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
	#[error("ancestors of {target:?} are not a chain: {left:?} and {right:?} are unrelated")]
	Ambiguous {
		target: Box<str>,
		left: Box<str>,
		right: Box<str>,
	},
}

/// Root-first, duplicate-free ancestors of a target, restricted to a candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorChain {
	target: TypeKey,
	links: TypeList,
}

impl AncestorChain {
	/// The type whose ancestors this chain lists.
	pub fn target(&self) -> TypeKey {
		self.target
	}

	pub fn links(&self) -> &TypeList {
		&self.links
	}

	pub fn into_links(self) -> TypeList {
		self.links
	}

	pub fn iter(&self) -> impl DoubleEndedIterator<Item = TypeKey> + '_ {
		self.links.iter()
	}

	/// Most distant ancestor, if any.
	pub fn root(&self) -> Option<TypeKey> {
		self.links.first()
	}

	pub fn len(&self) -> usize {
		self.links.len()
	}

	pub fn is_empty(&self) -> bool {
		self.links.is_empty()
	}

	/// Renders the links as `[A, C]`.
	pub fn display<'a>(&'a self, table: &'a TypeTable) -> strata_typelist::ListDisplay<'a> {
		self.links.display(table)
	}
}

/// Resolves the ancestor chain of `target` among `candidates` with [`Linearization::Stable`].
pub fn find_ancestors(hierarchy: &Hierarchy, candidates: &TypeList, target: TypeKey) -> AncestorChain {
	let mut working = candidates.filter(|candidate| hierarchy.is_base_of(candidate, target));
	let mut links = Vec::with_capacity(working.len());

	while let Ok(most_ancient) = working.max_by(|a, b| hierarchy.is_base_of(a, b)) {
		trace!(
			target = %hierarchy.display_name(target),
			most_ancient = %hierarchy.display_name(most_ancient),
			remaining = working.len(),
			"extracted ancestor"
		);
		links.push(most_ancient);
		working = working.remove_all(most_ancient);
	}

	AncestorChain {
		target,
		links: links.into(),
	}
}

/// Resolves the ancestor chain of `target` among `candidates` under `policy`.
pub fn find_ancestors_with(
	hierarchy: &Hierarchy,
	candidates: &TypeList,
	target: TypeKey,
	policy: Linearization,
) -> Result<AncestorChain, ResolveError> {
	let chain = find_ancestors(hierarchy, candidates, target);
	if policy == Linearization::Strict {
		// Each link must be a base of every later link.
		let links = chain.links.as_slice();
		for (idx, &earlier) in links.iter().enumerate() {
			if let Some(&later) = links[idx + 1..]
				.iter()
				.find(|&&later| !hierarchy.is_base_of(earlier, later))
			{
				return Err(ResolveError::Ambiguous {
					target: hierarchy.display_name(target).into(),
					left: hierarchy.display_name(earlier).into(),
					right: hierarchy.display_name(later).into(),
				});
			}
		}
	}
	Ok(chain)
}
