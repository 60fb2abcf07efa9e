//! The arbitrary-precision signed integer type.

use crate::buffer::{Limb, LimbBuffer};
use crate::error::ParseBigIntError;
use crate::math::{self, large, small};
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::{self, Debug, Display};
use core::hash::{Hash, Hasher};
use core::str::FromStr;

/// An arbitrary-precision signed integer.
///
/// Stored as a sign flag plus a little-endian magnitude of 32-bit limbs.
/// The magnitude is canonical: no trailing zero limbs, and zero is never
/// negative, so `+0 == -0` by construction.
///
/// Cloning is cheap: magnitudes beyond two limbs live in a shared
/// reference-counted block that is copied only when a clone writes through
/// it. The count is not atomic, which makes `BigInt` a single-threaded
/// value type (`!Send`, `!Sync`).
///
/// ```
/// use cowint::BigInt;
///
/// let a = BigInt::from(1) << 70;
/// assert_eq!(a.to_string(), "1180591620717411303424");
/// assert_eq!(a >> 70, BigInt::from(1));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BigInt {
    pub(crate) magnitude: LimbBuffer,
    pub(crate) negative: bool,
}

impl BigInt {
    /// The value zero.
    pub const ZERO: BigInt = BigInt {
        magnitude: LimbBuffer::single(0),
        negative: false,
    };

    /// Makes a new `BigInt` equal to zero.
    #[inline]
    pub fn new() -> BigInt {
        BigInt::ZERO
    }

    /// Returns true if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        math::is_zero(&self.magnitude)
    }

    /// Returns true if the value is strictly negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Assembles a value from a magnitude and sign, re-establishing the
    /// canonical form: trailing zero limbs dropped, zero never negative.
    pub(crate) fn from_buffer(mut magnitude: LimbBuffer, negative: bool) -> BigInt {
        small::normalize(&mut magnitude);
        let negative = negative && !math::is_zero(&magnitude);
        BigInt { magnitude, negative }
    }
}

impl Default for BigInt {
    #[inline]
    fn default() -> BigInt {
        BigInt::ZERO
    }
}

impl PartialOrd for BigInt {
    #[inline]
    fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &BigInt) -> Ordering {
        match (self.negative, other.negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            // Both negative: the larger magnitude is the smaller value.
            (true, true) => large::compare(&other.magnitude, &self.magnitude),
            (false, false) => large::compare(&self.magnitude, &other.magnitude),
        }
    }
}

impl Hash for BigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.negative.hash(state);
        self.magnitude.as_slice().hash(state);
    }
}

// CONVERSIONS
// -----------

impl From<u32> for BigInt {
    #[inline]
    fn from(value: u32) -> BigInt {
        BigInt {
            magnitude: LimbBuffer::single(value),
            negative: false,
        }
    }
}

impl From<i32> for BigInt {
    /// The magnitude is computed in the unsigned domain, so `i32::MIN`
    /// converts without overflowing.
    #[inline]
    fn from(value: i32) -> BigInt {
        BigInt {
            magnitude: LimbBuffer::single(value.unsigned_abs()),
            negative: value < 0,
        }
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> BigInt {
        let low = value as Limb;
        let high = (value >> 32) as Limb;
        let mut magnitude = LimbBuffer::single(low);
        if high != 0 {
            magnitude.push(high);
        }
        BigInt {
            magnitude,
            negative: false,
        }
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> BigInt {
        let mut int = BigInt::from(value.unsigned_abs());
        int.negative = value < 0;
        int
    }
}

// PARSING
// -------

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    /// Parses `-?[0-9]+` by accumulating `value = value * 10 + digit`.
    ///
    /// The empty string parses as zero, as do `"0"` and `"-0"`; a lone
    /// sign or any byte outside `0-9` is an error.
    fn from_str(s: &str) -> Result<BigInt, ParseBigIntError> {
        let bytes = s.as_bytes();
        let (negative, digits) = match bytes.first() {
            Some(b'-') => (true, &bytes[1..]),
            _ => (false, bytes),
        };
        if negative && digits.is_empty() {
            return Err(ParseBigIntError::empty_sign());
        }
        let mut magnitude = LimbBuffer::single(0);
        for (i, &byte) in digits.iter().enumerate() {
            let digit = match byte {
                b'0'..=b'9' => (byte - b'0') as Limb,
                _ => return Err(ParseBigIntError::invalid_digit(i + negative as usize)),
            };
            small::imul(&mut magnitude, 10);
            small::iadd(&mut magnitude, digit);
        }
        Ok(BigInt::from_buffer(magnitude, negative))
    }
}

// FORMATTING
// ----------

// Largest power of ten in a limb, and its digit count. Extracting nine
// decimal digits per division keeps the repeated-division loop to one
// limb-division per chunk.
const CHUNK: Limb = 1_000_000_000;
const CHUNK_DIGITS: usize = 9;

impl Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return f.pad_integral(true, "", "0");
        }
        let mut magnitude = self.magnitude.clone();
        let mut chunks: Vec<Limb> = Vec::new();
        while !math::is_zero(&magnitude) {
            chunks.push(small::div_rem(&mut magnitude, CHUNK));
        }
        let mut buffer = itoa::Buffer::new();
        let mut out = String::with_capacity(chunks.len() * CHUNK_DIGITS);
        for (i, &chunk) in chunks.iter().rev().enumerate() {
            let digits = buffer.format(chunk);
            // Every chunk below the most significant is zero padded.
            if i > 0 {
                for _ in digits.len()..CHUNK_DIGITS {
                    out.push('0');
                }
            }
            out.push_str(digits);
        }
        f.pad_integral(!self.negative, "", &out)
    }
}

impl Debug for BigInt {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(self, f)
    }
}
