/// Precondition failures of [`crate::TypeList`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TypeListError {
	/// Positional access past the end of the list.
	#[error("index {index} out of bounds for typelist of length {len}")]
	OutOfBounds { index: usize, len: usize },
	/// An operation that needs at least one element ran on an empty list.
	#[error("{op} on an empty typelist")]
	Empty { op: &'static str },
}
