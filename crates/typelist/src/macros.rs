/// Builds a [`TypeList`](crate::TypeList) from key expressions, in order.
///
/// ```
/// use strata_typelist::{TypeTable, typelist};
///
/// let mut table = TypeTable::new();
/// let a = table.intern("A");
/// let c = table.intern("C");
/// let list = typelist![a, c, a];
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.display(&table).to_string(), "[A, C, A]");
/// ```
#[macro_export]
macro_rules! typelist {
	() => {
		$crate::TypeList::empty()
	};
	($($key:expr),+ $(,)?) => {
		$crate::TypeList::from_slice(&[$($key),+])
	};
}
