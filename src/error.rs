//! When parsing a decimal string into a [`BigInt`] goes wrong.
//!
//! [`BigInt`]: crate::BigInt

use core::fmt::{self, Debug, Display};

/// This type represents the ways a decimal string can fail to parse as a
/// [`BigInt`].
///
/// [`BigInt`]: crate::BigInt
#[derive(Clone, PartialEq, Eq)]
pub struct ParseBigIntError {
    code: ErrorCode,
}

#[derive(Clone, PartialEq, Eq)]
enum ErrorCode {
    /// A byte outside `0-9` at the given offset into the input.
    InvalidDigit(usize),

    /// A sign with no digits after it.
    EmptySign,
}

impl ParseBigIntError {
    pub(crate) fn invalid_digit(offset: usize) -> Self {
        ParseBigIntError {
            code: ErrorCode::InvalidDigit(offset),
        }
    }

    pub(crate) fn empty_sign() -> Self {
        ParseBigIntError {
            code: ErrorCode::EmptySign,
        }
    }
}

impl Display for ParseBigIntError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.code {
            ErrorCode::InvalidDigit(offset) => {
                write!(f, "invalid decimal digit at byte {}", offset)
            }
            ErrorCode::EmptySign => f.write_str("sign without any digits"),
        }
    }
}

impl Debug for ParseBigIntError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ParseBigIntError({})", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseBigIntError {}
