#![cfg_attr(test, allow(unused_crate_dependencies))]
#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Class lattices and ancestor chains.
//!
//! # Purpose
//!
//! Given a fixed inheritance relation and a typelist of candidate types, compute the chain of
//! ancestors of a target type from the most distant root down to the most immediate base, and
//! walk an instance up that chain.
//!
//! # Mental Model
//!
//! 1. **Relation:** A [`Hierarchy`] maps each declared class to its ordered direct bases and
//!    precomputes the transitive closure. [`Hierarchy::is_base_of`] is strict.
//! 2. **Resolution:** [`find_ancestors`] filters candidates down to bases of the target, then
//!    repeatedly extracts the most ancient remaining candidate with [`TypeList::max_by`].
//! 3. **Walking:** [`walk`] upcasts an [`Instance`] to each link in turn and hands the
//!    resulting [`View`] to a [`Reporter`].
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`Hierarchy`] | Immutable inheritance relation with precomputed closures. |
//! | [`HierarchyBuilder`] | Validating constructor (unknown bases, duplicates, cycles). |
//! | [`AncestorChain`] | Root-first, duplicate-free resolver output. |
//! | [`Linearization`] | Policy for candidates that are not totally ordered. |
//! | [`Instance`] / [`View`] | Value of a concrete type and its upcast views. |
//! | [`Lattice`] | Hierarchy plus replayed registries and fixture checks. |
//!
//! # Static declarations
//!
//! The [`class!`] macro declares a marker type, implements [`Class`] for it and submits a
//! [`ClassDecl`] to a link-time collection, so [`Hierarchy::from_inventory`] sees every class
//! declared anywhere in the final binary.

mod class;
pub mod config;
mod relation;
mod resolve;
mod walk;

pub use class::{Class, ClassDecl, ClassReg};
pub use config::{Check, CheckFailure, ConfigError, Lattice, LatticeConfig, load_lattice};
pub use relation::{Hierarchy, HierarchyBuilder, HierarchyError};
pub use resolve::{AncestorChain, Linearization, ResolveError, find_ancestors, find_ancestors_with};
pub use strata_registry as registry;
pub use strata_typelist::{TypeKey, TypeList, TypeTable};
pub use walk::{CollectReporter, Instance, Reporter, View, WalkError, WriteReporter, walk};

#[doc(hidden)]
pub use {inventory, paste};

#[cfg(test)]
mod tests;
