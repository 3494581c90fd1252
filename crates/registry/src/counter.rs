use std::fmt;

/// A value of the shared monotonic event counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u64);

impl Position {
	/// The first position a fresh counter hands out.
	pub const ZERO: Position = Position(0);

	#[inline]
	pub const fn new(raw: u64) -> Self {
		Self(raw)
	}

	#[inline]
	pub const fn get(self) -> u64 {
		self.0
	}

	/// Returns the position immediately before this one, if any.
	#[inline]
	pub fn prev(self) -> Option<Position> {
		self.0.checked_sub(1).map(Position)
	}
}

impl fmt::Display for Position {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "@{}", self.0)
	}
}

/// Single-writer monotonic counter.
///
/// Each [`EventCounter::tick`] returns the current value and advances by one, so no two
/// events ever share a position.
#[derive(Debug, Default)]
pub struct EventCounter {
	next: u64,
}

impl EventCounter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Consumes and returns the next position.
	pub fn tick(&mut self) -> Position {
		let pos = Position(self.next);
		self.next += 1;
		pos
	}

	/// Returns the position the next [`EventCounter::tick`] will hand out.
	pub fn peek(&self) -> Position {
		Position(self.next)
	}
}
