pub type Value = u64;
pub type Double = u128;

/// One digit of a limb vector.
///
/// The container is always 64 bits wide. How much of it is used depends on the radix
/// the limb belongs to, see `crate::radix`.
#[derive(Clone, Copy, Default, PartialEq, Debug, Eq, Ord, PartialOrd, Hash)]
pub struct Limb(pub Value);

impl Limb {
	/// Width of the container, not of the radix.
	pub const BITS: usize = Value::BITS as usize;

	pub const ZERO: Limb = Self(0);
	pub const MAX: Limb = Self(Value::MAX);

	#[inline]
	pub const fn as_double(self) -> Double {
		self.0 as Double
	}

	/// Returns:
	///     (value % base, value / base)
	/// The quotient is truncated to a limb. Callers guarantee it fits.
	#[inline]
	pub const fn split_double(value: Double, base: Double) -> (Limb, Value) {
		(Limb((value % base) as Value), (value / base) as Value)
	}

	/// Returns number of bits needed to store the value.
	/// If the value is zero, it returns 0.
	#[inline]
	pub const fn bit_width(self) -> usize {
		Self::BITS - self.0.leading_zeros() as usize
	}

	#[inline]
	pub const fn is_zero(self) -> bool {
		self.0 == 0
	}

	#[inline]
	pub const fn is_not_zero(self) -> bool {
		self.0 != 0
	}

	#[inline]
	pub const fn is_odd(self) -> bool {
		self.0 & 1 != 0
	}

	#[inline]
	pub const fn bit(self, index: usize) -> bool {
		(self.0 >> index) & 1 != 0
	}

	#[inline]
	pub const fn with_bit(self, index: usize) -> Limb {
		Limb(self.0 | (1 << index))
	}

	/// Returns:
	///     (value, borrow)
	/// Where:
	///     value = (a - b - borrow) mod base
	///     borrow = (a - b - borrow) < 0
	///
	/// `a` and `b` must both be below `base`.
	#[inline]
	pub const fn subb(a: Limb, b: Limb, borrow: bool, base: Double) -> (Limb, bool) {
		let sub = b.0 as Double + borrow as Double;
		let a = a.0 as Double;
		if a >= sub {
			(Limb((a - sub) as Value), false)
		} else {
			(Limb((a + base - sub) as Value), true)
		}
	}
}

impl std::ops::BitXor for Limb {
	type Output = Self;

	#[inline]
	fn bitxor(self, rhs: Self) -> Self {
		Self(self.0 ^ rhs.0)
	}
}

impl std::ops::BitXorAssign for Limb {
	#[inline]
	fn bitxor_assign(&mut self, rhs: Self) {
		self.0 ^= rhs.0;
	}
}

impl std::cmp::PartialEq<Value> for Limb {
	#[inline]
	fn eq(&self, other: &Value) -> bool {
		self.0 == *other
	}
}
