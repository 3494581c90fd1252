use crate::Position;

/// Registry misuse.
///
/// Reading never fails; only declaring twice and registering into an unknown name do.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error("registry {name:?} is already declared (baseline {baseline})")]
	AlreadyDeclared { name: Box<str>, baseline: Position },

	#[error("registry {name:?} is not declared")]
	Undeclared { name: Box<str> },
}
