use strata_typelist::TypeKey;

/// One step of a registration script replayed into a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
	/// Register a key into the target registry.
	Register(TypeKey),
	/// Advance the shared counter without registering anything.
	Noise,
}
