//! A keystream XOR layer over the Collatz codec. It offers no security.
//!
//! The keystream for `n` bits is grown from the key value `k` by
//!
//! ```text
//! s <- k
//! s <- encode(2s + 1)     until bit_length(s) >= n
//! s >>= bit_length(s) - n
//! ```
//!
//! `2s + 1` is odd and at least 3, and its trajectory is longer than `s` is wide, so every round
//! grows `s`. Plain `encode(s)` would stall on powers of two.

use crate::collatz::{self, Bits};
use crate::error::{Error, assert};
use crate::nat::Nat;
use crate::pack;
use crate::radix::Radix;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Key {
	value: Bits,
}

impl Key {
	pub fn new(mut value: Bits) -> Result<Key, Error> {
		assert(!value.canonicalize().is_zero(), || Error::new_invalid_key("Key::new: key is zero"))?;
		Ok(Key { value })
	}

	/// Packs `text` 7 bits per character.
	pub fn from_text(text: &str) -> Result<Key, Error> {
		Key::new(pack::pack(text).value).map_err(|_| Error::new_invalid_key("Key::from_text: no usable characters"))
	}

	pub fn value(&self) -> &Bits {
		&self.value
	}
}

/// Returns exactly `len` bits of keystream grown from `seed`.
pub fn keystream(seed: &Bits, len: usize) -> Result<Bits, Error> {
	let mut s = seed.clone();
	let mut rounds = 0;
	while s.bit_width() < len {
		s.double().increment();
		s = collatz::encode(s)?;
		rounds += 1;
		log::debug!("keystream: round {} has {} of {} bits", rounds, s.bit_width(), len);
	}
	let excess = s.bit_width() - len;
	s.shr(excess);
	Ok(s)
}

/// Encodes `plain` and masks every bit below the sentinel with the keystream.
pub fn encrypt<R: Radix>(plain: Nat<R>, key: &Key) -> Result<Bits, Error> {
	let mut bits = collatz::encode(plain)?;
	let len = bits.bit_width();
	bits.xor(&keystream(&key.value, len - 1)?);
	Ok(bits)
}

/// Unmasks `cipher` with the keystream and decodes it.
pub fn decrypt<R: Radix>(cipher: &Bits, key: &Key) -> Result<Nat<R>, Error> {
	let len = cipher.bit_width();
	assert(len != 0, || Error::new_zero("cipher::decrypt: empty cipher"))?;
	let mut bits = cipher.clone();
	bits.xor(&keystream(&key.value, len - 1)?);
	collatz::decode(&bits)
}
