#[derive(PartialEq, Clone)]
pub struct Error {
	pub kind: ErrorKind,
	pub message: &'static str,
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ErrorKind {
	/// A signed input was below zero.
	Negative,
	/// Decrement of the value zero.
	Underflow,
	/// Exact division by three of a value that is not a multiple of three.
	NotDivisible,
	/// The codec was given zero, which has no trajectory.
	Zero,
	/// A raw limb was not below the radix.
	InvalidLimb,
	InvalidKey,
}

impl std::fmt::Debug for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Error").field("kind", &self.kind).field("message", &self.message).finish()
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}: {}", self.kind, self.message)
	}
}

impl std::error::Error for Error {}

impl Error {
	pub fn new(kind: ErrorKind, msg: &'static str) -> Self {
		Self { kind, message: msg }
	}

	pub fn new_negative(msg: &'static str) -> Self {
		Self::new(ErrorKind::Negative, msg)
	}

	pub fn new_underflow(msg: &'static str) -> Self {
		Self::new(ErrorKind::Underflow, msg)
	}

	pub fn new_not_divisible(msg: &'static str) -> Self {
		Self::new(ErrorKind::NotDivisible, msg)
	}

	pub fn new_zero(msg: &'static str) -> Self {
		Self::new(ErrorKind::Zero, msg)
	}

	pub fn new_invalid_limb(msg: &'static str) -> Self {
		Self::new(ErrorKind::InvalidLimb, msg)
	}

	pub fn new_invalid_key(msg: &'static str) -> Self {
		Self::new(ErrorKind::InvalidKey, msg)
	}
}

#[inline(always)]
#[must_use]
pub fn assert(what: bool, err: fn() -> Error) -> Result<(), Error> {
	if what { Ok(()) } else { Err(err()) }
}
