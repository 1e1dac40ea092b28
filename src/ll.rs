//! Low-level primitives over limb slices.
//!
//! Nothing here allocates on behalf of the caller or changes a slice's length. Functions that
//! can carry out of the top limb return the residual and the caller decides whether that is
//! growth or a bug. `crate::nat` is the only intended caller.

use smallvec::SmallVec;

use crate::limb::{Double, Limb, Value};
use crate::radix::{Div3, Radix};

/// Returns the length of `a` without its trailing zero limbs.
#[inline]
pub fn trim(a: &[Limb]) -> usize {
	let mut n = a.len();
	while n > 0 && a[n - 1].is_zero() {
		n -= 1;
	}
	n
}

#[inline]
pub fn is_zero(a: &[Limb]) -> bool {
	a.iter().all(|limb| limb.is_zero())
}

/// Zero is even. Every supported radix is even, so only the lowest limb matters.
#[inline]
pub fn is_even(a: &[Limb]) -> bool {
	a.first().is_none_or(|limb| !limb.is_odd())
}

pub fn is_valid<R: Radix>(a: &[Limb]) -> bool {
	a.iter().all(|limb| R::is_valid(*limb))
}

//--------------------------------------------------------------------------------------------------
// bits

/// Returns the number of bits needed to store the number.
///
/// `bits` is the number of bits per limb. Trailing zero limbs are skipped.
pub fn bit_width(a: &[Limb], bits: usize) -> usize {
	let n = trim(a);
	if n == 0 { 0 } else { (n - 1) * bits + a[n - 1].bit_width() }
}

/// Bits past the end of `a` read as zero.
#[inline]
pub fn get_bit(a: &[Limb], bits: usize, index: usize) -> bool {
	a.get(index / bits).is_some_and(|limb| limb.bit(index % bits))
}

/// Preconditions:
/// - `index / bits < r.len()`
#[inline]
pub fn set_bit(r: &mut [Limb], bits: usize, index: usize) {
	let limb = &mut r[index / bits];
	*limb = limb.with_bit(index % bits);
}

/// r >>= shift, where `shift < bits`. Bits shifted out of the lowest limb are lost.
pub fn shr_bits(r: &mut [Limb], bits: usize, shift: usize) {
	debug_assert!(shift < bits);
	if shift == 0 {
		return;
	}
	let mask = if bits == Limb::BITS { Value::MAX } else { (1 << bits) - 1 };
	for i in 0..r.len() {
		let high = r.get(i + 1).map_or(0, |limb| limb.0 << (bits - shift));
		r[i] = Limb(((r[i].0 >> shift) | high) & mask);
	}
}

/// r ^= a, where `a.len() <= r.len()`.
pub fn xor(r: &mut [Limb], a: &[Limb]) {
	debug_assert!(a.len() <= r.len());
	for (r, a) in r.iter_mut().zip(a) {
		*r ^= *a;
	}
}

//--------------------------------------------------------------------------------------------------
// carry propagation

/// Replaces every limb `r[i]` with `raw(i, r[i])` and resolves the overflow.
///
/// The first pass stores `raw % B` in each limb and remembers `raw / B`. The second pass adds each
/// remembered overflow to the limb above it and ripples whatever that produces.
///
/// Returns the residual carry out of the top limb.
pub fn carry_propagate<R: Radix>(
	r: &mut [Limb], mut raw: impl FnMut(usize, Limb) -> Double,
) -> Double {
	let mut carries: SmallVec<[Value; 16]> = SmallVec::with_capacity(r.len());
	for (i, limb) in r.iter_mut().enumerate() {
		let (low, carry) = Limb::split_double(raw(i, *limb), R::BASE);
		*limb = low;
		carries.push(carry);
	}

	let mut ripple: Double = 0;
	for i in 1..r.len() {
		let sum = r[i].as_double() + carries[i - 1] as Double + ripple;
		let (low, carry) = Limb::split_double(sum, R::BASE);
		r[i] = low;
		ripple = carry as Double;
	}

	carries.last().map_or(0, |carry| *carry as Double) + ripple
}

//--------------------------------------------------------------------------------------------------
// add / sub

/// r += b, where `b.len() <= r.len()`. Returns the residual carry.
pub fn add<R: Radix>(r: &mut [Limb], b: &[Limb]) -> Double {
	debug_assert!(b.len() <= r.len());
	carry_propagate::<R>(r, |i, limb| {
		limb.as_double() + b.get(i).map_or(0, |limb| limb.as_double())
	})
}

/// r += 1. Returns the residual carry.
pub fn increment<R: Radix>(r: &mut [Limb]) -> Double {
	carry_propagate::<R>(r, |i, limb| limb.as_double() + (i == 0) as Double)
}

/// r -= 1. Returns the borrow out of the top limb, which is set only if `r` was zero.
pub fn decrement<R: Radix>(r: &mut [Limb]) -> bool {
	let mut borrow = true;
	for limb in r.iter_mut() {
		if !borrow {
			break;
		}
		(*limb, borrow) = Limb::subb(*limb, Limb::ZERO, borrow, R::BASE);
	}
	borrow
}

//--------------------------------------------------------------------------------------------------
// multiply / divide by small constants

/// r *= 2. Returns the residual carry.
pub fn double<R: Radix>(r: &mut [Limb]) -> Double {
	carry_propagate::<R>(r, |_, limb| limb.as_double() << 1)
}

/// r /= 2, rounded down.
///
/// Since `B` is even, `a[i + 1] * B**(i + 1) / 2` contributes `(a[i + 1] % 2) * B / 2` to limb `i`
/// and `(a[i + 1] / 2)` to limb `i + 1`. The sum is at most `B - 1`, so there is no carry.
pub fn halve<R: Radix>(r: &mut [Limb]) {
	for i in 0..r.len() {
		let upper_odd = r.get(i + 1).is_some_and(|limb| limb.is_odd());
		r[i] = Limb(r[i].0 / 2 + (upper_odd as Value) * R::HALF);
	}
}

/// Returns `a % 3`.
pub fn mod3<R: Radix>(a: &[Limb]) -> Value {
	match R::DIV3 {
		// B is a multiple of 3, so every limb above the lowest is too.
		Div3::ClosedForm => a.first().map_or(0, |limb| limb.0 % 3),
		// B = 1 (mod 3), so the number is congruent to the sum of its limbs.
		Div3::WeightedSum => a.iter().fold(0, |acc, limb| (acc + limb.0 % 3) % 3),
	}
}

/// r /= 3, rounded down, for radices divisible by three. Returns the remainder.
///
/// Each output limb is `a[i] / 3 + DIV3_LUT[a[i + 1] % 3]`. The radix is chosen so this never
/// exceeds `B - 1`, so there is no carry chain.
pub fn div3_closed<R: Radix>(r: &mut [Limb]) -> Value {
	assert!(matches!(R::DIV3, Div3::ClosedForm), "radix {} is not divisible by 3", R::NAME);
	let rem = mod3::<R>(r);
	for i in 0..r.len() {
		let upper = r.get(i + 1).map_or(0, |limb| limb.0 % 3);
		r[i] = Limb(r[i].0 / 3 + R::DIV3_LUT[upper as usize]);
	}
	rem
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::radix::{Byte, Mixed7, Mixed63, Word};
	use crate::testvec;

	#[test]
	fn test_trim() {
		assert_eq!(trim(&testvec![]), 0);
		assert_eq!(trim(&testvec![0, 0]), 0);
		assert_eq!(trim(&testvec![1, 0, 3, 0, 0]), 3);
		assert!(is_zero(&testvec![0, 0, 0]));
		assert!(!is_zero(&testvec![0, 1]));
	}

	#[test]
	fn test_is_even() {
		assert!(is_even(&testvec![]));
		assert!(is_even(&testvec![0, 1]));
		assert!(!is_even(&testvec![125, 4]));
	}

	#[test]
	fn test_bit_width() {
		assert_eq!(bit_width(&testvec![], 8), 0);
		assert_eq!(bit_width(&testvec![0], 8), 0);
		assert_eq!(bit_width(&testvec![1], 8), 1);
		assert_eq!(bit_width(&testvec![0, 0, 7], 8), 8 * 2 + 3);
		assert_eq!(bit_width(&testvec![0, 0x12345678, 0], 64), 64 + 29);
	}

	#[test]
	fn test_bits() {
		let mut r = testvec![0, 0, 0];
		set_bit(&mut r, 8, 0);
		set_bit(&mut r, 8, 9);
		set_bit(&mut r, 8, 23);
		assert_eq!(r, testvec![1, 2, 128]);
		assert!(get_bit(&r, 8, 9));
		assert!(!get_bit(&r, 8, 10));
		assert!(!get_bit(&r, 8, 1000));
	}

	#[test]
	fn test_shr_bits() {
		let mut r = testvec![0b1000_0001, 0b0000_0011];
		shr_bits(&mut r, 8, 1);
		assert_eq!(r, testvec![0b1100_0000, 0b0000_0001]);

		let mut r = testvec![0, 1];
		shr_bits(&mut r, 64, 63);
		assert_eq!(r, testvec![2, 0]);

		let mut r = testvec![5];
		shr_bits(&mut r, 64, 0);
		assert_eq!(r, testvec![5]);
	}

	#[test]
	fn test_xor() {
		let mut r = testvec![0b1100, 0b1111];
		xor(&mut r, &testvec![0b0110]);
		assert_eq!(r, testvec![0b1010, 0b1111]);
	}

	#[test]
	fn test_carry_propagate() {
		// 125 + 125 * 126 = 126**2 - 1; adding 1 ripples through both limbs.
		let mut r = testvec![125, 125, 0];
		assert_eq!(increment::<Mixed7>(&mut r), 0);
		assert_eq!(r, testvec![0, 0, 1]);

		let mut r = testvec![125, 125];
		assert_eq!(increment::<Mixed7>(&mut r), 1);
		assert_eq!(r, testvec![0, 0]);

		let mut r = testvec![u64::MAX, u64::MAX, 0];
		assert_eq!(increment::<Word>(&mut r), 0);
		assert_eq!(r, testvec![0, 0, 1]);
	}

	#[test]
	fn test_add() {
		let mut r = testvec![100, 125, 3, 0];
		assert_eq!(add::<Mixed7>(&mut r, &testvec![30, 1, 122]), 0);
		assert_eq!(r, testvec![4, 1, 0, 1]);

		let mut r = testvec![255, 255];
		assert_eq!(add::<Byte>(&mut r, &testvec![1]), 1);
		assert_eq!(r, testvec![0, 0]);

		let mut r = testvec![1, 2, 3];
		assert_eq!(add::<Byte>(&mut r, &testvec![]), 0);
		assert_eq!(r, testvec![1, 2, 3]);
	}

	#[test]
	fn test_decrement() {
		let mut r = testvec![0, 0, 1];
		assert!(!decrement::<Mixed7>(&mut r));
		assert_eq!(r, testvec![125, 125, 0]);

		let mut r = testvec![7, 1];
		assert!(!decrement::<Byte>(&mut r));
		assert_eq!(r, testvec![6, 1]);

		let mut r = testvec![0, 0];
		assert!(decrement::<Word>(&mut r));
	}

	#[test]
	fn test_double() {
		let mut r = testvec![125, 63, 0];
		assert_eq!(double::<Mixed7>(&mut r), 0);
		assert_eq!(r, testvec![124, 1, 1]);

		let mut r = testvec![1 << 63];
		assert_eq!(double::<Word>(&mut r), 1);
		assert_eq!(r, testvec![0]);
	}

	#[test]
	fn test_halve() {
		// 1 + 3 * 126 = 379; 379 / 2 = 189 = 63 + 1 * 126
		let mut r = testvec![1, 3];
		halve::<Mixed7>(&mut r);
		assert_eq!(r, testvec![63, 1]);

		let mut r = testvec![0, 1];
		halve::<Word>(&mut r);
		assert_eq!(r, testvec![1 << 63, 0]);

		let mut r = testvec![125, 125];
		halve::<Mixed7>(&mut r);
		assert_eq!(r, testvec![125, 62]);
	}

	#[test]
	fn test_mod3() {
		assert_eq!(mod3::<Mixed7>(&testvec![]), 0);
		assert_eq!(mod3::<Mixed7>(&testvec![5, 17]), 2);
		// 2 + 2 * 256 = 514 = 3 * 171 + 1
		assert_eq!(mod3::<Byte>(&testvec![2, 2]), 1);
		assert_eq!(mod3::<Word>(&testvec![u64::MAX, u64::MAX]), 0);
	}

	#[test]
	fn test_div3_closed() {
		// 125 + 125 * 126 = 15875 = 3 * 5291 + 2; 5291 = 125 + 41 * 126
		let mut r = testvec![125, 125];
		assert_eq!(div3_closed::<Mixed7>(&mut r), 2);
		assert_eq!(r, testvec![125, 41]);

		let mut r = testvec![0, 1];
		assert_eq!(div3_closed::<Mixed63>(&mut r), 0);
		assert_eq!(r, testvec![Mixed63::DIV3_LUT[1], 0]);
	}
}
