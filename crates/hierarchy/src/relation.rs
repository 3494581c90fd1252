//! The inheritance relation.
//!
//! # Role
//!
//! Validates class declarations and precomputes, per class, the transitive closure of its
//! bases. After [`HierarchyBuilder::build`] the relation never changes.
//!
//! # Invariants
//!
//! - Every base named by a declaration is itself declared (`UnknownBase` otherwise).
//! - The relation is acyclic, so [`Hierarchy::is_base_of`] is a strict partial order.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use strata_typelist::{TypeKey, TypeList, TypeTable};
use tracing::debug;

use crate::{Class, ClassReg};

/// Invalid class declarations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
	#[error("class {class:?} is declared more than once")]
	DuplicateClass { class: Box<str> },

	#[error("class {class:?} names undeclared base {base:?}")]
	UnknownBase { class: Box<str>, base: Box<str> },

	#[error("class {class:?} inherits from itself")]
	Cycle { class: Box<str> },

	#[error("class {class:?} is not declared")]
	UnknownClass { class: Box<str> },
}

#[derive(Debug, Clone)]
struct Node {
	bases: SmallVec<[TypeKey; 2]>,
	ancestors: TypeList,
	ancestor_set: FxHashSet<TypeKey>,
}

/// Immutable inheritance relation over the classes of one [`TypeTable`].
#[derive(Debug, Clone)]
pub struct Hierarchy {
	table: TypeTable,
	nodes: Vec<Node>,
}

impl Hierarchy {
	/// Builds the relation from an explicit set of declarations.
	pub fn from_decls<'a, I>(decls: I) -> Result<Self, HierarchyError>
	where
		I: IntoIterator<Item = &'a crate::ClassDecl>,
	{
		let mut builder = HierarchyBuilder::new();
		for decl in decls {
			builder.class(decl.name, decl.bases)?;
		}
		builder.build()
	}

	/// Builds the relation from every [`crate::class!`] declaration linked into the binary.
	///
	/// Link order is unspecified, so declarations are sorted by name first; key assignment is
	/// therefore stable across builds.
	pub fn from_inventory() -> Result<Self, HierarchyError> {
		let mut decls: Vec<&'static crate::ClassDecl> =
			inventory::iter::<ClassReg>.into_iter().map(|reg| reg.0).collect();
		decls.sort_by_key(|decl| decl.name);
		Self::from_decls(decls)
	}

	#[inline]
	pub fn table(&self) -> &TypeTable {
		&self.table
	}

	/// Looks up a class key by name.
	#[inline]
	pub fn key(&self, name: &str) -> Option<TypeKey> {
		self.table.get(name)
	}

	/// Looks up the key of a [`Class`] marker type.
	pub fn key_of<T: Class>(&self) -> Option<TypeKey> {
		self.key(T::NAME)
	}

	/// Like [`Hierarchy::key`], failing with [`HierarchyError::UnknownClass`].
	pub fn require(&self, name: &str) -> Result<TypeKey, HierarchyError> {
		self.key(name).ok_or_else(|| HierarchyError::UnknownClass {
			class: Box::from(name),
		})
	}

	#[inline]
	pub fn name(&self, key: TypeKey) -> Option<&str> {
		self.table.resolve(key)
	}

	/// Name of `key`, or `#<raw>` for keys outside this hierarchy.
	pub fn display_name(&self, key: TypeKey) -> String {
		match self.name(key) {
			Some(name) => name.to_owned(),
			None => format!("#{}", key.as_u32()),
		}
	}

	/// Direct bases of `key` in declaration order; empty for unknown keys.
	pub fn direct_bases(&self, key: TypeKey) -> &[TypeKey] {
		self.node(key).map_or(&[][..], |node| node.bases.as_slice())
	}

	/// Every (transitive) base of `key`, nearest first, without duplicates.
	pub fn ancestors(&self, key: TypeKey) -> TypeList {
		self.node(key)
			.map(|node| node.ancestors.clone())
			.unwrap_or_default()
	}

	/// True iff `base` is a strict, direct or transitive, base of `derived`.
	#[inline]
	pub fn is_base_of(&self, base: TypeKey, derived: TypeKey) -> bool {
		self.node(derived)
			.is_some_and(|node| node.ancestor_set.contains(&base))
	}

	/// Returns every declared class key.
	pub fn classes(&self) -> impl Iterator<Item = TypeKey> + '_ {
		self.table.iter().map(|(key, _)| key)
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	#[inline]
	fn node(&self, key: TypeKey) -> Option<&Node> {
		self.nodes.get(key.as_u32() as usize)
	}
}

/// Collects class declarations and validates them into a [`Hierarchy`].
///
/// Declarations may reference bases declared later; references are checked in
/// [`HierarchyBuilder::build`].
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
	table: TypeTable,
	declared: Vec<Option<SmallVec<[TypeKey; 2]>>>,
}

impl HierarchyBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares `name` with the given direct bases.
	pub fn class(&mut self, name: &str, bases: &[&str]) -> Result<TypeKey, HierarchyError> {
		let key = self.intern(name);
		if self.declared[key.as_u32() as usize].is_some() {
			return Err(HierarchyError::DuplicateClass {
				class: Box::from(name),
			});
		}
		let bases: SmallVec<[TypeKey; 2]> = bases.iter().map(|base| self.intern(base)).collect();
		self.declared[key.as_u32() as usize] = Some(bases);
		Ok(key)
	}

	/// Validates every declaration and computes the transitive closures.
	pub fn build(self) -> Result<Hierarchy, HierarchyError> {
		let HierarchyBuilder { table, declared } = self;

		let mut direct: Vec<SmallVec<[TypeKey; 2]>> = Vec::with_capacity(declared.len());
		for (key, name) in table.iter() {
			match &declared[key.as_u32() as usize] {
				Some(bases) => direct.push(bases.clone()),
				None => {
					let class = declared
						.iter()
						.zip(table.iter())
						.find(|(bases, _)| bases.as_ref().is_some_and(|b| b.contains(&key)))
						.map(|(_, (_, owner))| owner)
						.unwrap_or(name);
					return Err(HierarchyError::UnknownBase {
						class: Box::from(class),
						base: Box::from(name),
					});
				}
			}
		}

		let closures = close_all(&direct, &table)?;

		let nodes: Vec<Node> = direct
			.into_iter()
			.zip(closures)
			.map(|(bases, ancestors)| {
				let ancestor_set = ancestors.iter().collect();
				Node {
					bases,
					ancestors,
					ancestor_set,
				}
			})
			.collect();

		debug!(classes = nodes.len(), "built hierarchy");
		Ok(Hierarchy { table, nodes })
	}

	fn intern(&mut self, name: &str) -> TypeKey {
		let key = self.table.intern(name);
		let idx = key.as_u32() as usize;
		if idx >= self.declared.len() {
			self.declared.resize(idx + 1, None);
		}
		key
	}
}

/// Closure of every class: each direct base followed by its own closure, deduplicated.
///
/// Depth-first over an explicit stack; inheritance depth never grows the call stack.
fn close_all(
	direct: &[SmallVec<[TypeKey; 2]>],
	table: &TypeTable,
) -> Result<Vec<TypeList>, HierarchyError> {
	let mut closures: Vec<Option<TypeList>> = vec![None; direct.len()];
	let mut visiting = vec![false; direct.len()];
	// (class, index of the next direct base to visit)
	let mut stack: Vec<(usize, usize)> = Vec::new();

	for root in 0..direct.len() {
		if closures[root].is_some() {
			continue;
		}
		visiting[root] = true;
		stack.push((root, 0));

		while let Some(top) = stack.last_mut() {
			let (idx, next) = *top;
			if let Some(&base) = direct[idx].get(next) {
				top.1 += 1;
				let base_idx = base.as_u32() as usize;
				if closures[base_idx].is_some() {
					continue;
				}
				if visiting[base_idx] {
					return Err(HierarchyError::Cycle {
						class: Box::from(table.resolve(base).unwrap_or("?")),
					});
				}
				visiting[base_idx] = true;
				stack.push((base_idx, 0));
				continue;
			}

			stack.pop();
			let mut acc = Vec::new();
			for &base in &direct[idx] {
				acc.push(base);
				if let Some(inherited) = &closures[base.as_u32() as usize] {
					acc.extend(inherited.iter());
				}
			}
			visiting[idx] = false;
			closures[idx] = Some(TypeList::from(acc).dedup_first());
		}
	}

	Ok(closures.into_iter().map(Option::unwrap_or_default).collect())
}
