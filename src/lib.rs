//! Reversible Collatz encoding of arbitrarily large integers.
//!
//! Numbers are stored as limb vectors in a compile-time radix. The codec maps every `n >= 1` to
//! the bit-sequence of branches its trajectory takes under `x -> x / 2`, `x -> (3x + 1) / 2`,
//! terminated by a sentinel bit, and maps such a sequence back to `n`.
//!
//! ```
//! use collatz_limb::{collatz, convert, radix::Mixed63};
//! use num_bigint::BigUint;
//!
//! let n = convert::to_limbs::<Mixed63>(&BigUint::from(6u32));
//! let bits = collatz::encode(n).unwrap();
//! assert_eq!(convert::to_int(&bits), BigUint::from(70u32));
//!
//! let n = collatz::decode::<Mixed63>(&bits).unwrap();
//! assert_eq!(convert::to_int(&n), BigUint::from(6u32));
//! ```

pub mod bytes;
pub mod cipher;
pub mod collatz;
pub mod convert;
pub mod error;
pub mod limb;
pub mod ll;
pub mod nat;
pub mod pack;
pub mod radix;

pub use collatz::{Bits, decode, encode};
pub use error::{Error, ErrorKind};
pub use limb::Limb;
pub use nat::Nat;

#[macro_export]
macro_rules! testvec {
	($($x:expr),* $(,)?) => {{
		let v: Vec<$crate::limb::Limb> = vec![$($crate::limb::Limb($x)),*];
		v
	}};
}
