//! The only boundary between limb vectors and `num_bigint`.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

use crate::error::{Error, assert};
use crate::limb::Limb;
use crate::nat::{LimbVec, Nat};
use crate::radix::Radix;

/// Converts a non-negative integer to its canonical limb vector in radix `R`.
pub fn to_limbs<R: Radix>(n: &BigUint) -> Nat<R> {
	let mut limbs = LimbVec::new();
	if R::POW2_BITS == Some(Limb::BITS) {
		limbs.extend(n.iter_u64_digits().map(Limb));
	} else {
		let base = BigUint::from(R::BASE);
		let mut n = n.clone();
		while !n.is_zero() {
			let rem = &n % &base;
			// `rem < base <= 2**64`, so it has at most one digit.
			limbs.push(Limb(rem.iter_u64_digits().next().unwrap_or(0)));
			n /= &base;
		}
	}
	Nat::from_limbs_unchecked(limbs)
}

/// Like `to_limbs()`, for signed input. Negative values are rejected.
pub fn try_to_limbs<R: Radix>(n: &BigInt) -> Result<Nat<R>, Error> {
	assert(n.sign() != Sign::Minus, || Error::new_negative("convert::try_to_limbs: negative input"))?;
	Ok(to_limbs(n.magnitude()))
}

/// Converts a limb vector back to an integer. Trailing zero limbs are harmless.
pub fn to_int<R: Radix>(a: &Nat<R>) -> BigUint {
	let base = BigUint::from(R::BASE);
	a.limbs().iter().rev().fold(BigUint::zero(), |acc, limb| acc * &base + limb.0)
}

impl<R: Radix> From<&BigUint> for Nat<R> {
	fn from(n: &BigUint) -> Self {
		to_limbs(n)
	}
}

impl<R: Radix> TryFrom<&BigInt> for Nat<R> {
	type Error = Error;

	fn try_from(n: &BigInt) -> Result<Self, Error> {
		try_to_limbs(n)
	}
}

impl<R: Radix> From<&Nat<R>> for BigUint {
	fn from(a: &Nat<R>) -> Self {
		to_int(a)
	}
}
