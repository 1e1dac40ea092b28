//! Big-endian byte strings as `Nat<Byte>`.

use crate::limb::{Limb, Value};
use crate::nat::{LimbVec, Nat};
use crate::radix::Byte;

/// Leading zero bytes vanish. The result is canonical.
pub fn from_be_bytes(bytes: &[u8]) -> Nat<Byte> {
	let limbs: LimbVec = bytes.iter().rev().map(|byte| Limb(*byte as Value)).collect();
	let mut value = Nat::from_limbs_unchecked(limbs);
	value.canonicalize();
	value
}

/// Minimal big-endian bytes. Zero is the empty string.
pub fn to_be_bytes(value: &Nat<Byte>) -> Vec<u8> {
	let limbs = value.limbs();
	let len = crate::ll::trim(limbs);
	limbs[..len].iter().rev().map(|limb| limb.0 as u8).collect()
}
