//! Text to integer packing, 7 bits per character.
//!
//! The first character occupies bits 0..7, the second bits 7..14 and so on. Only characters with
//! a code below 127 survive. Trailing NUL characters contribute no set bits, so `unpack` cannot
//! tell them apart from the end of the text.

use crate::collatz::Bits;

const CHAR_BITS: usize = 7;
const CHAR_LIMIT: u32 = 127;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Packed {
	pub value: Bits,
	/// Characters that did not fit in 7 bits and were skipped.
	pub dropped: usize,
}

pub fn pack(text: &str) -> Packed {
	let mut value = Bits::new_zero();
	let mut dropped = 0;
	let mut pos = 0;
	for c in text.chars() {
		let code = c as u32;
		if code >= CHAR_LIMIT {
			dropped += 1;
			continue;
		}
		for bit in (0..CHAR_BITS).filter(|bit| code & (1 << bit) != 0) {
			value.set_bit(pos + bit);
		}
		pos += CHAR_BITS;
	}
	value.canonicalize();
	if dropped != 0 {
		log::warn!("pack: dropped {} characters outside 0..{}", dropped, CHAR_LIMIT);
	}
	Packed { value, dropped }
}

pub fn unpack(value: &Bits) -> String {
	let width = value.bit_width();
	let mut text = String::with_capacity(width.div_ceil(CHAR_BITS));
	let mut pos = 0;
	while pos < width {
		let code = (0..CHAR_BITS).fold(0u8, |acc, bit| acc | ((value.get_bit(pos + bit) as u8) << bit));
		text.push(char::from(code));
		pos += CHAR_BITS;
	}
	text
}
