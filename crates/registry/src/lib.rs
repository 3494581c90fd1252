#![cfg_attr(test, allow(unused_crate_dependencies))]
#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Positional typelist registries.
//!
//! # Purpose
//!
//! A registry collects [`TypeKey`]s one registration at a time and answers "what has been
//! registered so far" at any later point, without the registration sites knowing about each
//! other or about the total count.
//!
//! # Mental Model
//!
//! 1. **Ordering:** A [`RegistryContext`] owns one [`EventCounter`]. Every declare, register,
//!    read and noise event consumes a fresh, strictly increasing [`Position`].
//! 2. **Recording:** [`RegistryContext::register`] stores, at its position, the snapshot of the
//!    previous position with the new key appended. Snapshots are memoized per position.
//! 3. **Reading:** [`RegistryContext::read`] walks backward from its own position to the latest
//!    recorded entry (never past the registry's baseline) and returns that snapshot.
//!
//! # Invariants
//!
//! - Must preserve registration order, duplicates included.
//!   - Enforced in: [`Registry::record`].
//!   - Tested by: `tests::test_read_after_each_registration`, `prop_order_preserved`
//!   - Failure symptom: Snapshot out of order or missing repeated keys.
//!
//! - Must be invariant under noise events.
//!   - Enforced in: [`Registry::snapshot_at`] (backward search skips positions without entries).
//!   - Tested by: `prop_noise_invariance`
//!   - Failure symptom: Snapshot changes when unrelated events are interleaved.
//!
//! - Reads must not mutate a registry.
//!   - Enforced in: [`Registry::snapshot_at`] takes `&self`.
//!   - Tested by: `tests::test_reads_are_idempotent`
//!
//! - Undeclared or empty registries read as the empty list.
//!   - Enforced in: [`RegistryContext::read_at`].
//!   - Tested by: `tests::test_read_undeclared_is_empty`

mod context;
mod counter;
mod error;
mod registry;
mod script;

pub use context::RegistryContext;
pub use counter::{EventCounter, Position};
pub use error::RegistryError;
pub use registry::Registry;
pub use script::ScriptStep;
pub use strata_typelist::{TypeKey, TypeList};
