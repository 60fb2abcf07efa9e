//! Arbitrary-precision signed integers with copy-on-write storage.
//!
//! [`BigInt`] behaves like a native signed integer with unbounded range:
//! full arithmetic (`+`, `-`, `*`, `/`, `%`), bitwise operators over an
//! implicit two's-complement representation, shifts, comparisons, and
//! decimal string conversion.
//!
//! Magnitudes of at most two 32-bit limbs are stored inline with no heap
//! allocation. Larger magnitudes spill into a reference-counted block that
//! is shared between clones and copied only when one of the owners writes
//! through it, so cloning is `O(1)` and chains of operator temporaries stay
//! cheap.
//!
//! ```
//! use cowint::BigInt;
//!
//! let a: BigInt = "123456789012345678901234567890".parse().unwrap();
//! let b = BigInt::from(97);
//! assert_eq!((&a % &b).to_string(), "52");
//! assert_eq!((&a / &b) * &b + &a % &b, a);
//! ```
//!
//! The reference count is not atomic: `BigInt` is a single-threaded value
//! type and is deliberately neither `Send` nor `Sync`.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![allow(clippy::needless_doctest_main)]

#[cfg(not(any(feature = "std", feature = "alloc")))]
compile_error! {
    "cowint requires that either the `std` (default) or `alloc` feature is enabled"
}

extern crate alloc;

// MODULES
mod bits;
mod buffer;
mod error;
mod int;
mod math;
mod ops;

#[cfg(feature = "serde")]
mod ser;

// API
pub use crate::error::ParseBigIntError;
pub use crate::int::BigInt;
