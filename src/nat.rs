use std::marker::PhantomData;

use smallvec::SmallVec;

use crate::error::{Error, assert};
use crate::limb::{Limb, Value};
use crate::ll;
use crate::radix::{BinaryRadix, Div3, MixedRadix, Radix};

/// Limbs stored inline before the vector spills to the heap.
const INLINE_LIMBS: usize = 4;

pub type LimbVec = SmallVec<[Limb; INLINE_LIMBS]>;

/// A non-negative integer stored as limbs in radix `R`, least significant limb first.
///
/// Every limb is below `R::BASE`. Zero is the empty vector once canonicalized, but operations
/// may leave trailing zero limbs behind. `canonicalize()` removes them. Comparison ignores them.
///
/// Mutating operations take `&mut self` and return it, so a caller that needs the old value must
/// clone first.
pub struct Nat<R: Radix> {
	limbs: LimbVec,
	radix: PhantomData<R>,
}

impl<R: Radix> Nat<R> {
	pub fn new_zero() -> Self {
		Self { limbs: LimbVec::new(), radix: PhantomData }
	}

	pub fn one() -> Self {
		Self::from_value(1)
	}

	pub fn from_value(mut value: Value) -> Self {
		let mut limbs = LimbVec::new();
		while value != 0 {
			let (low, high) = Limb::split_double(value as u128, R::BASE);
			limbs.push(low);
			value = high;
		}
		Self { limbs, radix: PhantomData }
	}

	/// Takes ownership of raw limbs, least significant first. Fails if any limb is not below the
	/// radix. The result is not canonicalized.
	pub fn from_limbs(limbs: impl Into<LimbVec>) -> Result<Self, Error> {
		let limbs = limbs.into();
		assert(ll::is_valid::<R>(&limbs), || {
			Error::new_invalid_limb("Nat::from_limbs: limb is not below the radix")
		})?;
		Ok(Self { limbs, radix: PhantomData })
	}

	pub(crate) fn from_limbs_unchecked(limbs: LimbVec) -> Self {
		debug_assert!(ll::is_valid::<R>(&limbs));
		Self { limbs, radix: PhantomData }
	}

	pub fn limbs(&self) -> &[Limb] {
		&self.limbs
	}

	pub fn len(&self) -> usize {
		self.limbs.len()
	}

	pub fn is_empty(&self) -> bool {
		self.limbs.is_empty()
	}

	pub fn is_zero(&self) -> bool {
		ll::is_zero(&self.limbs)
	}

	pub fn is_canonical(&self) -> bool {
		self.limbs.last().is_none_or(|limb| limb.is_not_zero())
	}

	/// Strips trailing zero limbs. Idempotent.
	pub fn canonicalize(&mut self) -> &mut Self {
		let n = ll::trim(&self.limbs);
		self.limbs.truncate(n);
		self
	}

	/// Overwrites `self` with `a`, reusing `self`'s storage.
	pub fn assign(&mut self, a: &Self) {
		self.limbs.clear();
		self.limbs.extend_from_slice(&a.limbs);
	}

	pub fn is_even(&self) -> bool {
		ll::is_even(&self.limbs)
	}

	/// Canonicalizes, then checks for exactly one limb equal to 1.
	pub fn equals_one(&mut self) -> bool {
		self.canonicalize();
		self.limbs.len() == 1 && self.limbs[0] == 1
	}

	/// Returns `self % 3`.
	pub fn mod3(&self) -> Value {
		ll::mod3::<R>(&self.limbs)
	}

	/// Runs an operation with one spare zero limb on top, so its carry always has room.
	/// The spare limb is dropped again if nothing landed in it.
	fn with_headroom(&mut self, op: impl FnOnce(&mut [Limb]) -> u128, what: &'static str) {
		self.limbs.push(Limb::ZERO);
		let residual = op(&mut self.limbs);
		assert!(residual == 0, "{}: carry left the top limb in radix {}", what, R::NAME);
		if self.limbs.last().is_some_and(|limb| limb.is_zero()) {
			self.limbs.pop();
		}
	}

	/// self *= 2
	pub fn double(&mut self) -> &mut Self {
		self.with_headroom(ll::double::<R>, "Nat::double");
		self
	}

	/// self /= 2, rounded down.
	pub fn halve(&mut self) -> &mut Self {
		ll::halve::<R>(&mut self.limbs);
		self
	}

	/// self += 1
	pub fn increment(&mut self) -> &mut Self {
		self.with_headroom(ll::increment::<R>, "Nat::increment");
		self
	}

	/// self -= 1
	///
	/// Fails without touching `self` if it is zero.
	pub fn decrement(&mut self) -> Result<&mut Self, Error> {
		assert(!self.is_zero(), || Error::new_underflow("Nat::decrement: value is zero"))?;
		let borrow = ll::decrement::<R>(&mut self.limbs);
		debug_assert!(!borrow);
		Ok(self)
	}

	/// self += b
	///
	/// `self` grows to `b`'s length if it is shorter, and by one more limb if the sum carries.
	pub fn add(&mut self, b: &Self) -> &mut Self {
		if self.limbs.len() < b.limbs.len() {
			self.limbs.resize(b.limbs.len(), Limb::ZERO);
		}
		let b = &b.limbs;
		self.with_headroom(|r| ll::add::<R>(r, b), "Nat::add");
		self
	}

	/// self /= 3, for values known to be multiples of three.
	///
	/// Dispatches to the closed form or the weighted sum, whichever the radix supports. Fails
	/// without touching `self` if the value is not a multiple of three. The Collatz decoder only
	/// ever divides `2v - 1` where the forward step guarantees divisibility, so an error here
	/// means the bit-sequence was not produced by the encoder.
	pub fn exact_divide_by_three(&mut self) -> Result<&mut Self, Error> {
		match R::DIV3 {
			Div3::ClosedForm => {
				assert(self.mod3() == 0, || {
					Error::new_not_divisible("Nat::exact_divide_by_three: not a multiple of 3")
				})?;
				ll::div3_closed::<R>(&mut self.limbs);
				Ok(self)
			},
			Div3::WeightedSum => {
				assert(self.mod3() == 0, || {
					Error::new_not_divisible("Nat::exact_divide_by_three: not a multiple of 3")
				})?;
				Ok(self.div3_weighted())
			},
		}
	}

	/// self /= 3 as a weighted sum. `self` must be a multiple of three and `B % 3` must be 1.
	///
	/// With `a[i] = 3 * q[i] + r[i]` and `B**i = 3 * (B**i - 1) / 3 + 1`:
	///
	/// ```text
	/// n / 3 = sum(q[i] * B**i) + sum(r[i] * (B**i - 1) / 3) + sum(r[i]) / 3
	/// ```
	///
	/// `r * (B**i - 1) / 3` is `i` limbs of `DIV3_LUT[r]`. Every term is accumulated with `add`, so
	/// this is quadratic in the number of limbs.
	fn div3_weighted(&mut self) -> &mut Self {
		debug_assert!(matches!(R::DIV3, Div3::WeightedSum));
		debug_assert!(self.mod3() == 0);

		let digits = std::mem::take(&mut self.limbs);
		self.limbs.extend(digits.iter().map(|limb| Limb(limb.0 / 3)));

		let mut correction = Self::new_zero();
		let mut rem_sum: Value = 0;
		for (i, limb) in digits.iter().enumerate() {
			let rem = limb.0 % 3;
			rem_sum += rem;
			if rem != 0 && i > 0 {
				correction.limbs.clear();
				correction.limbs.resize(i, Limb(R::DIV3_LUT[rem as usize]));
				self.add(&correction);
			}
		}

		self.add(&Self::from_value(rem_sum / 3));
		self.canonicalize()
	}

	/// Converts to another radix without going through a native big integer.
	///
	/// Between two power-of-two radices the bits are copied. Otherwise the bits are peeled off
	/// with `halve` and rebuilt with `double` and `increment`, which is quadratic.
	pub fn to_radix<S: Radix>(&self) -> Nat<S> {
		let mut out = Nat::<S>::new_zero();
		if let (Some(src_bits), Some(dst_bits)) = (R::POW2_BITS, S::POW2_BITS) {
			let width = ll::bit_width(&self.limbs, src_bits);
			out.limbs.resize(width.div_ceil(dst_bits), Limb::ZERO);
			for i in (0..width).filter(|i| ll::get_bit(&self.limbs, src_bits, *i)) {
				ll::set_bit(&mut out.limbs, dst_bits, i);
			}
			return out;
		}

		let mut src = self.clone();
		let mut bits: Vec<bool> = Vec::new();
		while !src.is_zero() {
			bits.push(!src.is_even());
			src.halve();
		}
		for bit in bits.iter().rev() {
			out.double();
			if *bit {
				out.increment();
			}
		}
		log::debug!("converted {} bits from radix {} to {}", bits.len(), R::NAME, S::NAME);
		out
	}
}

impl<R: MixedRadix> Nat<R> {
	/// self /= 3, rounded down, in one pass with no carry chain. Returns the remainder.
	pub fn divide_by_three(&mut self) -> Value {
		ll::div3_closed::<R>(&mut self.limbs)
	}
}

impl<R: BinaryRadix> Nat<R> {
	/// self /= 3 as a weighted sum of per-limb quotients and correction constants. Fails without
	/// touching `self` if the value is not a multiple of three.
	pub fn divide_by_three_weighted(&mut self) -> Result<&mut Self, Error> {
		assert(self.mod3() == 0, || {
			Error::new_not_divisible("Nat::divide_by_three_weighted: not a multiple of 3")
		})?;
		Ok(self.div3_weighted())
	}

	/// Number of bits needed to store the value. Zero has width 0.
	pub fn bit_width(&self) -> usize {
		ll::bit_width(&self.limbs, R::BITS)
	}

	/// Canonicalizes, then returns the bit width.
	pub fn bit_length(&mut self) -> usize {
		self.canonicalize().bit_width()
	}

	/// Bits past the end read as zero.
	pub fn get_bit(&self, index: usize) -> bool {
		ll::get_bit(&self.limbs, R::BITS, index)
	}

	/// Grows with zero limbs as needed.
	pub fn set_bit(&mut self, index: usize) -> &mut Self {
		let limb = index / R::BITS;
		if self.limbs.len() <= limb {
			self.limbs.resize(limb + 1, Limb::ZERO);
		}
		ll::set_bit(&mut self.limbs, R::BITS, index);
		self
	}

	/// self >>= shift. The low `shift` bits are discarded.
	pub fn shr(&mut self, shift: usize) -> &mut Self {
		let whole = (shift / R::BITS).min(self.limbs.len());
		self.limbs.drain(..whole);
		ll::shr_bits(&mut self.limbs, R::BITS, shift % R::BITS);
		self.canonicalize()
	}

	/// self ^= a
	pub fn xor(&mut self, a: &Self) -> &mut Self {
		if self.limbs.len() < a.limbs.len() {
			self.limbs.resize(a.limbs.len(), Limb::ZERO);
		}
		ll::xor(&mut self.limbs, &a.limbs);
		self.canonicalize()
	}
}

impl<R: Radix> Clone for Nat<R> {
	fn clone(&self) -> Self {
		Self { limbs: self.limbs.clone(), radix: PhantomData }
	}
}

impl<R: Radix> Default for Nat<R> {
	fn default() -> Self {
		Self::new_zero()
	}
}

impl<R: Radix> PartialEq for Nat<R> {
	fn eq(&self, other: &Self) -> bool {
		let a = &self.limbs[..ll::trim(&self.limbs)];
		let b = &other.limbs[..ll::trim(&other.limbs)];
		a == b
	}
}

impl<R: Radix> Eq for Nat<R> {}

impl<R: Radix> std::fmt::Debug for Nat<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Nat<{}>", R::NAME)?;
		f.debug_list().entries(self.limbs.iter().map(|limb| limb.0)).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ErrorKind;
	use crate::radix::{Byte, Mixed7, Mixed63, Word};
	use crate::testvec;

	fn nat<R: Radix>(limbs: Vec<Limb>) -> Nat<R> {
		Nat::from_limbs(limbs).unwrap()
	}

	#[test]
	fn test_from_value() {
		assert_eq!(Nat::<Mixed7>::from_value(0).limbs(), &testvec![][..]);
		assert_eq!(Nat::<Mixed7>::from_value(127).limbs(), &testvec![1, 1][..]);
		assert_eq!(Nat::<Word>::from_value(u64::MAX).limbs(), &testvec![u64::MAX][..]);
		assert_eq!(Nat::<Byte>::from_value(0x1234).limbs(), &testvec![0x34, 0x12][..]);
	}

	#[test]
	fn test_from_limbs_rejects_large_limbs() {
		let err = Nat::<Mixed7>::from_limbs(testvec![3, 126]).unwrap_err();
		assert_eq!(err.kind, ErrorKind::InvalidLimb);
		assert!(Nat::<Byte>::from_limbs(testvec![255, 0]).is_ok());
	}

	#[test]
	fn test_canonicalize() {
		let mut a = nat::<Byte>(testvec![1, 0, 0]);
		assert!(!a.is_canonical());
		a.canonicalize();
		assert_eq!(a.limbs(), &testvec![1][..]);
		a.canonicalize();
		assert_eq!(a.len(), 1);

		let mut z = nat::<Byte>(testvec![0, 0]);
		z.canonicalize();
		assert!(z.is_empty());
		assert!(z.is_zero());
	}

	#[test]
	fn test_equality_ignores_trailing_zeros() {
		assert_eq!(nat::<Byte>(testvec![5, 0]), nat::<Byte>(testvec![5]));
		assert_eq!(nat::<Byte>(testvec![0]), Nat::<Byte>::new_zero());
		assert_ne!(nat::<Byte>(testvec![5, 1]), nat::<Byte>(testvec![5]));
	}

	#[test]
	fn test_equals_one() {
		assert!(nat::<Mixed7>(testvec![1, 0, 0]).equals_one());
		assert!(!nat::<Mixed7>(testvec![1, 1]).equals_one());
		assert!(!Nat::<Mixed7>::new_zero().equals_one());
	}

	#[test]
	fn test_double_grows() {
		let mut a = nat::<Byte>(testvec![0x80]);
		a.double();
		assert_eq!(a.limbs(), &testvec![0, 1][..]);

		let mut a = nat::<Byte>(testvec![0x7f]);
		a.double();
		assert_eq!(a.limbs(), &testvec![0xfe][..]);

		let mut z = Nat::<Mixed63>::new_zero();
		z.double();
		assert!(z.is_empty());
	}

	#[test]
	fn test_increment_from_zero() {
		let mut a = Nat::<Mixed7>::new_zero();
		a.increment();
		assert_eq!(a.limbs(), &testvec![1][..]);

		let mut a = nat::<Mixed7>(testvec![125, 125]);
		a.increment();
		assert_eq!(a.limbs(), &testvec![0, 0, 1][..]);
	}

	#[test]
	fn test_decrement_zero_fails() {
		let mut a = nat::<Word>(testvec![0, 0]);
		let err = a.decrement().unwrap_err();
		assert_eq!(err.kind, ErrorKind::Underflow);
		assert_eq!(a.limbs(), &testvec![0, 0][..]);

		let mut a = Nat::<Word>::one();
		a.decrement().unwrap();
		assert!(a.is_zero());
	}

	#[test]
	fn test_add_grows() {
		let mut a = nat::<Byte>(testvec![1]);
		a.add(&nat::<Byte>(testvec![255, 255]));
		assert_eq!(a.limbs(), &testvec![0, 0, 1][..]);

		// Both tops are non-zero and equal length.
		let mut a = nat::<Mixed7>(testvec![125, 0]);
		a.add(&nat::<Mixed7>(testvec![1, 125]));
		assert_eq!(a.limbs(), &testvec![0, 0, 1][..]);

		let mut a = nat::<Mixed7>(testvec![5]);
		a.add(&Nat::new_zero());
		assert_eq!(a.limbs(), &testvec![5][..]);
	}

	#[test]
	fn test_exact_divide_by_three_closed_form() {
		let mut a = Nat::<Mixed7>::from_value(3 * 126 * 126 + 3);
		a.exact_divide_by_three().unwrap();
		assert_eq!(a, Nat::from_value(126 * 126 + 1));

		let mut a = Nat::<Mixed7>::from_value(100);
		let err = a.exact_divide_by_three().unwrap_err();
		assert_eq!(err.kind, ErrorKind::NotDivisible);
		assert_eq!(a, Nat::from_value(100));
	}

	#[test]
	fn test_exact_divide_by_three_weighted() {
		for value in [0, 3, 6, 255, 258, 3 * 0x10000, 0xffff_ffff_ffff_fff0] {
			let mut a = Nat::<Byte>::from_value(value);
			a.exact_divide_by_three().unwrap();
			assert_eq!(a, Nat::from_value(value / 3), "{value}");

			let mut a = Nat::<Word>::from_value(value);
			a.exact_divide_by_three().unwrap();
			assert_eq!(a, Nat::from_value(value / 3), "{value}");
		}

		let mut a = Nat::<Byte>::from_value(257);
		assert_eq!(a.exact_divide_by_three().unwrap_err().kind, ErrorKind::NotDivisible);
		assert_eq!(a, Nat::from_value(257));
	}

	#[test]
	fn test_divide_by_three_weighted() {
		let mut a = nat::<Byte>(testvec![1, 1, 1]);
		// 1 + 256 + 65536 = 65793 = 3 * 21931
		a.divide_by_three_weighted().unwrap();
		assert_eq!(a, Nat::from_value(21931));

		let mut a = nat::<Word>(testvec![u64::MAX, u64::MAX]);
		a.divide_by_three_weighted().unwrap();
		assert_eq!(a.limbs(), &testvec![u64::MAX / 3, u64::MAX / 3][..]);

		let mut a = nat::<Word>(testvec![1, 1]);
		let err = a.divide_by_three_weighted().unwrap_err();
		assert_eq!(err.kind, ErrorKind::NotDivisible);
		assert_eq!(a.limbs(), &testvec![1, 1][..]);
	}

	#[test]
	fn test_divide_by_three_floor() {
		let mut a = Nat::<Mixed7>::from_value(1000);
		assert_eq!(a.divide_by_three(), 1);
		assert_eq!(a, Nat::from_value(333));

		let mut z = Nat::<Mixed63>::new_zero();
		assert_eq!(z.divide_by_three(), 0);
		assert!(z.is_zero());
	}

	#[test]
	fn test_bits() {
		let mut a = Nat::<Byte>::new_zero();
		assert_eq!(a.bit_length(), 0);
		a.set_bit(17);
		assert_eq!(a.limbs(), &testvec![0, 0, 2][..]);
		assert!(a.get_bit(17));
		assert!(!a.get_bit(16));
		assert!(!a.get_bit(1 << 20));
		assert_eq!(a.bit_length(), 18);

		let mut one = nat::<Word>(testvec![1, 0]);
		assert_eq!(one.bit_length(), 1);
		assert_eq!(one.len(), 1);
	}

	#[test]
	fn test_shr() {
		let mut a = Nat::<Byte>::from_value(0b1011_0110_1100_0001);
		a.shr(6);
		assert_eq!(a, Nat::from_value(0b1011_0110_11));

		let mut a = Nat::<Word>::from_value(5);
		a.shr(200);
		assert!(a.is_empty());

		let mut a = nat::<Word>(testvec![0, 0, 6]);
		a.shr(129);
		assert_eq!(a.limbs(), &testvec![3][..]);
	}

	#[test]
	fn test_xor() {
		let mut a = Nat::<Byte>::from_value(0b1100);
		a.xor(&Nat::from_value(0x1_0110));
		assert_eq!(a, Nat::from_value(0x1_0110 ^ 0b1100));

		let mut a = Nat::<Byte>::from_value(0xabcd);
		a.xor(&Nat::from_value(0xabcd));
		assert!(a.is_empty());
	}

	#[test]
	fn test_to_radix() {
		let value = 0xdead_beef_cafe_f00d;
		let a = Nat::<Mixed7>::from_value(value);
		assert_eq!(a.to_radix::<Word>(), Nat::from_value(value));
		assert_eq!(a.to_radix::<Mixed63>(), Nat::from_value(value));
		assert_eq!(a.to_radix::<Byte>().to_radix::<Mixed7>(), a);
		assert_eq!(Nat::<Word>::from_value(value).to_radix::<Byte>(), Nat::from_value(value));
		assert!(Nat::<Word>::new_zero().to_radix::<Mixed7>().is_empty());
	}
}
