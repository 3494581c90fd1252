//! Static class declarations.

/// A Rust marker type standing for a declared class.
pub trait Class {
	/// Class name, unique within a hierarchy.
	const NAME: &'static str;
	/// Names of the direct bases, in declaration order.
	const BASES: &'static [&'static str];
}

/// Name and direct bases of one declared class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassDecl {
	pub name: &'static str,
	pub bases: &'static [&'static str],
}

impl ClassDecl {
	/// Declaration of the marker type `T`.
	pub const fn of<T: Class>() -> Self {
		Self {
			name: T::NAME,
			bases: T::BASES,
		}
	}
}

/// Link-time registration wrapper collected by [`crate::Hierarchy::from_inventory`].
pub struct ClassReg(pub &'static ClassDecl);

inventory::collect!(ClassReg);

/// Declares a class marker type and registers it for [`crate::Hierarchy::from_inventory`].
///
/// ```ignore
/// class!(A);
/// class!(C: A);
/// class!(K: I, J);
/// ```
#[macro_export]
macro_rules! class {
	($(#[$attr:meta])* $name:ident $(: $($base:ident),+ $(,)?)?) => {
		$crate::paste::paste! {
			$(#[$attr])*
			#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
			pub struct $name;

			impl $crate::Class for $name {
				const NAME: &'static str = stringify!($name);
				const BASES: &'static [&'static str] = &[$($(stringify!($base)),+)?];
			}

			#[allow(non_upper_case_globals)]
			pub static [<CLASS_ $name>]: $crate::ClassDecl = $crate::ClassDecl::of::<$name>();

			$crate::inventory::submit! { $crate::ClassReg(&[<CLASS_ $name>]) }
		}
	};
}
