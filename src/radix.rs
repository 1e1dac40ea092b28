use crate::limb::{Double, Limb, Value};

/// How a radix computes exact division by three.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Div3 {
	/// `B % 3 == 0`. Each output limb is `a[i] / 3 + (a[i + 1] % 3) * (B / 3)`.
	ClosedForm,
	/// `B % 3 == 1`. Weighted sum of per-limb quotients and correction constants.
	WeightedSum,
}

/// A compile-time limb radix.
///
/// All supported radices are even, so parity and halving never need a carry chain.
pub trait Radix: Copy + Default + std::fmt::Debug + Send + Sync + 'static {
	const NAME: &'static str;

	/// The radix itself. It may be `2**64`, so it does not fit in a `Value`.
	const BASE: Double;

	/// `Some(k)` if the radix is `2**k`.
	const POW2_BITS: Option<usize> = None;

	/// Largest limb value.
	const MAX: Value = (Self::BASE - 1) as Value;

	/// `B / 2`, the contribution of an odd upper limb when halving.
	const HALF: Value = (Self::BASE / 2) as Value;

	const DIV3: Div3 = match Self::BASE % 3 {
		0 => Div3::ClosedForm,
		1 => Div3::WeightedSum,
		_ => panic!("radix must be congruent to 0 or 1 modulo 3"),
	};

	/// Correction constants indexed by the remainder of a limb divided by three.
	///
	/// For `ClosedForm` these are `r * B / 3`, added to the limb below.
	/// For `WeightedSum` these are `r * (B - 1) / 3`, the repeating limb of `r * (B**i - 1) / 3`.
	const DIV3_LUT: [Value; 3] = match Self::DIV3 {
		Div3::ClosedForm => {
			let third = (Self::BASE / 3) as Value;
			[0, third, 2 * third]
		},
		Div3::WeightedSum => {
			let third = ((Self::BASE - 1) / 3) as Value;
			[0, third, 2 * third]
		},
	};

	#[inline]
	fn is_valid(limb: Limb) -> bool {
		limb.as_double() < Self::BASE
	}
}

/// A radix that is an even power of two, so every limb holds exactly `BITS` bits
/// and bits can be addressed directly. `B % 3 == 1`, so it divides by three with the weighted sum.
pub trait BinaryRadix: Radix {
	const BITS: usize = match Self::POW2_BITS {
		Some(bits) if bits % 2 == 0 => bits,
		_ => panic!("binary radix must be an even power of two"),
	};
}

/// A radix divisible by both 2 and 3.
pub trait MixedRadix: Radix {
	const THIRD: Value = (Self::BASE / 3) as Value;
}

/// `2**64`, the radix of bit-sequences.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Word;

impl Radix for Word {
	const NAME: &'static str = "2^64";
	const BASE: Double = 1 << 64;
	const POW2_BITS: Option<usize> = Some(64);
}

impl BinaryRadix for Word {}

/// `2**8`, byte limbs.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Byte;

impl Radix for Byte {
	const NAME: &'static str = "2^8";
	const BASE: Double = 1 << 8;
	const POW2_BITS: Option<usize> = Some(8);
}

impl BinaryRadix for Byte {}

/// `2**63 - 2`. The largest radix of the form `2**odd - 2` that fits a 64-bit limb.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Mixed63;

impl Radix for Mixed63 {
	const NAME: &'static str = "2^63-2";
	const BASE: Double = (1 << 63) - 2;
}

impl MixedRadix for Mixed63 {}

/// `2**7 - 2`. Mostly useful to exercise many limbs with small numbers.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Mixed7;

impl Radix for Mixed7 {
	const NAME: &'static str = "2^7-2";
	const BASE: Double = (1 << 7) - 2;
}

impl MixedRadix for Mixed7 {}
