use rustc_hash::FxHashMap;

/// Dense identifier of a declared type.
///
/// Keys are only meaningful relative to the [`TypeTable`] that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey(u32);

impl TypeKey {
	/// Wraps a raw dense index.
	#[inline]
	pub const fn from_u32(raw: u32) -> Self {
		Self(raw)
	}

	/// Returns the raw dense index.
	#[inline]
	pub const fn as_u32(self) -> u32 {
		self.0
	}
}

/// Interner mapping type names to [`TypeKey`]s and back.
///
/// Keys are assigned densely in first-intern order, starting at zero.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
	names: Vec<Box<str>>,
	by_name: FxHashMap<Box<str>, TypeKey>,
}

impl TypeTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the key for `name`, interning it on first use.
	pub fn intern(&mut self, name: &str) -> TypeKey {
		if let Some(&key) = self.by_name.get(name) {
			return key;
		}
		let key = TypeKey(u32_index(self.names.len(), "type_table"));
		self.names.push(Box::from(name));
		self.by_name.insert(Box::from(name), key);
		key
	}

	/// Looks up an already interned name.
	#[inline]
	pub fn get(&self, name: &str) -> Option<TypeKey> {
		self.by_name.get(name).copied()
	}

	/// Resolves a key back to its name, if this table produced it.
	#[inline]
	pub fn resolve(&self, key: TypeKey) -> Option<&str> {
		self.names.get(key.0 as usize).map(|name| &**name)
	}

	/// Returns the number of interned names.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	/// Returns true if nothing has been interned.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Returns `(key, name)` pairs in key order.
	pub fn iter(&self) -> impl Iterator<Item = (TypeKey, &str)> + '_ {
		self.names
			.iter()
			.enumerate()
			.map(|(idx, name)| (TypeKey(u32_index(idx, "type_table_iter")), &**name))
	}
}

#[inline]
fn u32_index(idx: usize, label: &'static str) -> u32 {
	u32::try_from(idx).unwrap_or_else(|_| panic!("{label}: index {idx} exceeds u32::MAX"))
}
