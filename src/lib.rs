#![forbid(unsafe_code)]

//! Arbitrary-precision signed integer arithmetic.
//!
//! The central type is [`BigInt`]: an exact integer of unbounded magnitude
//! supporting the full operator set of the built-in integer types, plus
//! conversion to and from decimal strings. Division truncates toward zero
//! and the remainder takes the dividend's sign, as with `i64`.
//!
//! Values are cheap to clone: limb storage is shared between clones and
//! only copied when one of them is written to. Small values (up to 64
//! bits of magnitude) avoid heap allocation entirely.
//!
//! ```
//! use exint::BigInt;
//!
//! let a: BigInt = "123456789123456789123456789".parse()?;
//! let b = BigInt::from(-7);
//! let (q, r) = a.div_rem(&b);
//! assert_eq!(q * b + r, a);
//! assert_eq!((BigInt::from(1) << 100).to_string(), "1267650600228229401496703205376");
//! # Ok::<(), exint::ParseBigIntError>(())
//! ```

mod bigint;
mod biguint;
mod buffer;
mod divide;
mod error;
#[cfg(feature = "serde")]
mod serde;

pub use bigint::BigInt;
pub use error::{ParseBigIntError, TryFromBigIntError};
