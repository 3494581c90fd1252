//! Upcast-and-report walking of an ancestor chain.

use std::io::{self, Write};

use strata_typelist::{TypeKey, TypeList};
use tracing::trace;

use crate::{AncestorChain, Class, Hierarchy};

/// Walker failures.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
	#[error("{base} is not a base of {ty}")]
	NotABase { base: Box<str>, ty: Box<str> },

	#[error("type #{} is not declared in the hierarchy", .key.as_u32())]
	UnknownType { key: TypeKey },

	#[error("class {class:?} is not declared in the hierarchy")]
	UnknownClass { class: Box<str> },

	#[error("failed to report ancestor")]
	Io(#[from] io::Error),
}

/// A value of one concrete declared type.
///
/// Carries the closure of its type's bases, so viewing it as an ancestor is a lookup rather
/// than a reinterpretation.
#[derive(Debug, Clone)]
pub struct Instance<'h> {
	hierarchy: &'h Hierarchy,
	ty: TypeKey,
	ancestors: TypeList,
}

impl<'h> Instance<'h> {
	/// Creates an instance of the class `ty`.
	pub fn new(hierarchy: &'h Hierarchy, ty: TypeKey) -> Result<Self, WalkError> {
		if hierarchy.name(ty).is_none() {
			return Err(WalkError::UnknownType { key: ty });
		}
		Ok(Self {
			hierarchy,
			ty,
			ancestors: hierarchy.ancestors(ty),
		})
	}

	/// Creates an instance of the marker type `T`.
	pub fn of<T: Class>(hierarchy: &'h Hierarchy) -> Result<Self, WalkError> {
		let ty = hierarchy.key_of::<T>().ok_or_else(|| WalkError::UnknownClass {
			class: Box::from(T::NAME),
		})?;
		Self::new(hierarchy, ty)
	}

	/// The instance's own (most derived) type.
	pub fn ty(&self) -> TypeKey {
		self.ty
	}

	/// Views the instance as `ancestor`, which must be its own type or one of its bases.
	pub fn view_as(&self, ancestor: TypeKey) -> Result<View<'h>, WalkError> {
		let hierarchy: &'h Hierarchy = self.hierarchy;
		if ancestor != self.ty && !self.ancestors.contains(ancestor) {
			return Err(WalkError::NotABase {
				base: hierarchy.display_name(ancestor).into(),
				ty: hierarchy.display_name(self.ty).into(),
			});
		}
		Ok(View {
			ty: self.ty,
			viewed_as: ancestor,
			name: hierarchy.name(ancestor).unwrap_or_default(),
		})
	}
}

/// An instance seen through one of its types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View<'h> {
	/// The underlying instance's own type.
	pub ty: TypeKey,
	/// The type the instance is viewed as.
	pub viewed_as: TypeKey,
	/// Name of `viewed_as`.
	pub name: &'h str,
}

/// Receives one [`View`] per walked link.
pub trait Reporter {
	fn report(&mut self, view: &View<'_>) -> io::Result<()>;
}

/// Writes `base = <Name>` lines to any [`Write`] sink.
#[derive(Debug)]
pub struct WriteReporter<W> {
	out: W,
}

impl<W: Write> WriteReporter<W> {
	pub fn new(out: W) -> Self {
		Self { out }
	}

	pub fn into_inner(self) -> W {
		self.out
	}
}

impl<W: Write> Reporter for WriteReporter<W> {
	fn report(&mut self, view: &View<'_>) -> io::Result<()> {
		writeln!(self.out, "base = {}", view.name)
	}
}

/// Collects the viewed types in walk order.
#[derive(Debug, Default)]
pub struct CollectReporter {
	pub seen: Vec<TypeKey>,
}

impl Reporter for CollectReporter {
	fn report(&mut self, view: &View<'_>) -> io::Result<()> {
		self.seen.push(view.viewed_as);
		Ok(())
	}
}

/// Walks `chain` root-first, upcasting `instance` at each link and reporting the view.
///
/// Returns the number of links walked. Stops at the first invalid upcast or report failure.
pub fn walk<R>(chain: &AncestorChain, instance: &Instance<'_>, reporter: &mut R) -> Result<usize, WalkError>
where
	R: Reporter + ?Sized,
{
	let mut steps = 0;
	for link in chain.iter() {
		let view = instance.view_as(link)?;
		trace!(ty = instance.ty.as_u32(), base = view.name, step = steps, "walk step");
		reporter.report(&view)?;
		steps += 1;
	}
	Ok(steps)
}
