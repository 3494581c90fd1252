//! The immutable [`TypeList`] and its algebra.
//!
//! # Invariants
//!
//! - No operation mutates its receiver; shared storage is never written after construction.
//! - Element order is insertion order; duplicates survive every operation except
//!   [`TypeList::remove_all`] and [`TypeList::dedup_first`].
//! - [`TypeList::max_by`] folds left to right and keeps the current candidate unless the
//!   next element strictly dominates it.

use std::fmt;
use std::sync::Arc;

use crate::{TypeKey, TypeListError, TypeTable};

/// Ordered, immutable sequence of [`TypeKey`]s.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeList {
	items: Arc<[TypeKey]>,
}

impl TypeList {
	/// Returns the zero-element list.
	pub fn empty() -> Self {
		Self {
			items: Arc::from(Vec::new()),
		}
	}

	/// Builds a list holding `keys` in order.
	pub fn from_slice(keys: &[TypeKey]) -> Self {
		Self {
			items: Arc::from(keys),
		}
	}

	/// Returns a new list with `key` after every existing element.
	pub fn append(&self, key: TypeKey) -> Self {
		let mut items = Vec::with_capacity(self.items.len() + 1);
		items.extend_from_slice(&self.items);
		items.push(key);
		Self {
			items: items.into(),
		}
	}

	/// Returns a new list with `key` before every existing element.
	pub fn prepend(&self, key: TypeKey) -> Self {
		let mut items = Vec::with_capacity(self.items.len() + 1);
		items.push(key);
		items.extend_from_slice(&self.items);
		Self {
			items: items.into(),
		}
	}

	/// Returns the list without its first element.
	pub fn pop_front(&self) -> Result<Self, TypeListError> {
		match self.items.split_first() {
			Some((_, rest)) => Ok(Self::from_slice(rest)),
			None => Err(TypeListError::Empty { op: "pop_front" }),
		}
	}

	/// Returns the element at 0-based position `index`.
	pub fn at(&self, index: usize) -> Result<TypeKey, TypeListError> {
		self.items
			.get(index)
			.copied()
			.ok_or(TypeListError::OutOfBounds {
				index,
				len: self.items.len(),
			})
	}

	/// Keeps the elements for which `pred` holds, preserving their relative order.
	pub fn filter<F>(&self, mut pred: F) -> Self
	where
		F: FnMut(TypeKey) -> bool,
	{
		self.items.iter().copied().filter(|&key| pred(key)).collect()
	}

	/// Selects the dominant element under `dominates(a, b)` ("a dominates b").
	///
	/// Left fold: the candidate switches to the next element only when the next element
	/// dominates the candidate and not the other way round. Ties and incomparable pairs keep
	/// the earlier element, so among equals the first occurrence wins.
	pub fn max_by<F>(&self, mut dominates: F) -> Result<TypeKey, TypeListError>
	where
		F: FnMut(TypeKey, TypeKey) -> bool,
	{
		let (&first, rest) = self
			.items
			.split_first()
			.ok_or(TypeListError::Empty { op: "max" })?;
		Ok(rest.iter().fold(first, |best, &next| {
			if dominates(next, best) && !dominates(best, next) {
				next
			} else {
				best
			}
		}))
	}

	/// Removes every element equal to `key`.
	pub fn remove_all(&self, key: TypeKey) -> Self {
		self.filter(|other| other != key)
	}

	/// Keeps only the first occurrence of each key.
	pub fn dedup_first(&self) -> Self {
		let mut seen = rustc_hash::FxHashSet::default();
		self.filter(|key| seen.insert(key))
	}

	/// Returns `self` followed by `other`.
	pub fn concat(&self, other: &TypeList) -> Self {
		self.iter().chain(other.iter()).collect()
	}

	/// Returns the first element, if any.
	#[inline]
	pub fn first(&self) -> Option<TypeKey> {
		self.items.first().copied()
	}

	/// Returns true if `key` occurs at least once.
	#[inline]
	pub fn contains(&self, key: TypeKey) -> bool {
		self.items.contains(&key)
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	#[inline]
	pub fn as_slice(&self) -> &[TypeKey] {
		&self.items
	}

	/// Returns an iterator over the keys in order.
	pub fn iter(&self) -> impl DoubleEndedIterator<Item = TypeKey> + ExactSizeIterator + '_ {
		self.items.iter().copied()
	}

	/// Returns a displayable view resolving names through `table`.
	pub fn display<'a>(&'a self, table: &'a TypeTable) -> ListDisplay<'a> {
		ListDisplay { list: self, table }
	}
}

impl Default for TypeList {
	fn default() -> Self {
		Self::empty()
	}
}

impl fmt::Debug for TypeList {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.items.iter()).finish()
	}
}

impl FromIterator<TypeKey> for TypeList {
	fn from_iter<I: IntoIterator<Item = TypeKey>>(iter: I) -> Self {
		let items: Vec<TypeKey> = iter.into_iter().collect();
		Self {
			items: items.into(),
		}
	}
}

impl<'a> IntoIterator for &'a TypeList {
	type Item = TypeKey;
	type IntoIter = std::iter::Copied<std::slice::Iter<'a, TypeKey>>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter().copied()
	}
}

impl From<Vec<TypeKey>> for TypeList {
	fn from(items: Vec<TypeKey>) -> Self {
		Self {
			items: items.into(),
		}
	}
}

/// Renders a [`TypeList`] as `[A, B, C]` using names from a [`TypeTable`].
///
/// Keys the table does not know render as `#<raw>`.
pub struct ListDisplay<'a> {
	list: &'a TypeList,
	table: &'a TypeTable,
}

impl fmt::Display for ListDisplay<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[")?;
		for (idx, key) in self.list.iter().enumerate() {
			if idx > 0 {
				f.write_str(", ")?;
			}
			match self.table.resolve(key) {
				Some(name) => f.write_str(name)?,
				None => write!(f, "#{}", key.as_u32())?,
			}
		}
		f.write_str("]")
	}
}
