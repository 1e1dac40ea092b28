//! The Collatz codec.
//!
//! `encode` walks the trajectory of `n` under
//!
//! ```text
//! x -> x / 2            (x even)
//! x -> (3x + 1) / 2     (x odd)
//! ```
//!
//! until it reaches 1, recording an odd step as a set bit. Bit 0 is the first step. One more bit
//! is set past the last step as a sentinel, so the bit length is the step count plus one.
//!
//! `decode` replays the steps backwards from 1.

use bit_set::BitSet;

use crate::error::{Error, assert};
use crate::nat::Nat;
use crate::radix::{Radix, Word};

/// A bit-sequence produced by `encode`.
pub type Bits = Nat<Word>;

/// Encodes `value >= 1` as its trajectory bits.
///
/// `value` is consumed as the working register.
pub fn encode<R: Radix>(mut value: Nat<R>) -> Result<Bits, Error> {
	assert(!value.is_zero(), || Error::new_zero("collatz::encode: zero has no trajectory"))?;

	let mut bits = Bits::new_zero();
	let mut half = Nat::<R>::new_zero();
	let mut step = 0;
	while !value.equals_one() {
		if value.is_even() {
			value.halve();
		} else {
			// (3x + 1) / 2 = x + (x + 1) / 2 = x + floor(x / 2) + 1
			half.assign(&value);
			half.halve().increment();
			value.add(&half);
			bits.set_bit(step);
		}
		step += 1;
	}
	bits.set_bit(step);

	if log::log_enabled!(log::Level::Trace) {
		log::trace!("encode: {} steps, {} odd, in radix {}", step, odd_steps(&bits).len(), R::NAME);
	}
	Ok(bits)
}

/// Decodes a bit-sequence back to the integer whose trajectory it records.
///
/// Sequences that `encode` never produces may fail with `NotDivisible`, or may decode to a value
/// whose encoding is different.
pub fn decode<R: Radix>(bits: &Bits) -> Result<Nat<R>, Error> {
	let len = bits.bit_width();
	assert(len != 0, || Error::new_zero("collatz::decode: empty bit-sequence"))?;

	let mut value = Nat::<R>::one();
	for i in (0..len - 1).rev() {
		value.double();
		if bits.get_bit(i) {
			value.decrement()?.exact_divide_by_three()?;
		}
	}

	log::trace!("decode: {} steps in radix {}", len - 1, R::NAME);
	Ok(value)
}

/// Indices of the odd steps of a bit-sequence. The sentinel is not included.
pub fn odd_steps(bits: &Bits) -> BitSet {
	let len = bits.bit_width();
	(0..len.saturating_sub(1)).filter(|i| bits.get_bit(*i)).collect()
}
