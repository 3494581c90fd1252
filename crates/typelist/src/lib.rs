#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Value-level typelists.
//!
//! # Purpose
//!
//! A [`TypeList`] is an immutable, ordered sequence of [`TypeKey`]s. Every
//! operation returns a new list and leaves its input untouched, so a list can
//! be shared freely between registry snapshots and resolver passes.
//!
//! # Mental Model
//!
//! 1. **Identity:** A [`TypeTable`] interns class names into dense [`TypeKey`]s.
//!    Two keys from the same table are equal iff they name the same class.
//! 2. **Construction:** Lists grow only through [`TypeList::append`] and
//!    [`TypeList::prepend`]. Duplicates are kept; order is meaningful.
//! 3. **Queries:** [`TypeList::at`], [`TypeList::filter`] and [`TypeList::max_by`]
//!    are pure. Misuse (empty list, bad index) is a [`TypeListError`].
//!
//! # Key Types
//!
//! | Type | Role |
//! |------|------|
//! | [`TypeKey`] | Dense, copyable type identifier. |
//! | [`TypeTable`] | Name interner producing and resolving keys. |
//! | [`TypeList`] | Shared immutable sequence of keys. |
//! | [`TypeListError`] | Precondition failures of list operations. |

mod error;
mod key;
mod list;
mod macros;

pub use error::TypeListError;
pub use key::{TypeKey, TypeTable};
pub use list::{ListDisplay, TypeList};
