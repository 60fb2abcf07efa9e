//! Operator implementations for [`BigInt`].
//!
//! The sign algebra lives here; the limb work is delegated to `math` and
//! the two's-complement conversions to `bits`. Each operator is a free
//! function over borrowed operands, with trait implementations forwarded
//! to it for every owned/borrowed combination, so temporaries in operator
//! chains move instead of cloning.

use crate::bits;
use crate::buffer::Limb;
use crate::int::BigInt;
use crate::math::{self, large, small};
use core::ops::{Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign};
use core::ops::{Div, DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign};
use core::ops::{Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign};

// SIGN LAYER
// ----------

/// Same signs ripple-add; opposite signs reduce to subtraction, exactly
/// once.
fn add(a: &BigInt, b: &BigInt) -> BigInt {
    if a.negative != b.negative {
        return if a.negative { sub(b, &-a) } else { sub(a, &-b) };
    }
    BigInt::from_buffer(large::add(&a.magnitude, &b.magnitude), a.negative)
}

/// Reduces every case to a magnitude subtraction with the larger operand
/// on the left.
fn sub(a: &BigInt, b: &BigInt) -> BigInt {
    if a.negative != b.negative {
        return if a.negative { -add(&-a, b) } else { add(a, &-b) };
    }
    if a.negative {
        return sub(&-b, &-a);
    }
    if a < b {
        return -sub(b, a);
    }
    BigInt::from_buffer(large::sub(&a.magnitude, &b.magnitude), false)
}

fn mul(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::ZERO;
    }
    BigInt::from_buffer(
        large::mul(&a.magnitude, &b.magnitude),
        a.negative != b.negative,
    )
}

/// Truncating division: the quotient rounds toward zero and its sign is
/// the XOR of the operand signs.
fn div(a: &BigInt, b: &BigInt) -> BigInt {
    if b.is_zero() {
        panic!("attempt to divide by zero");
    }
    if math::is_one(&b.magnitude) {
        return if b.negative { -a.clone() } else { a.clone() };
    }
    let quotient = large::div(&a.magnitude, &b.magnitude);
    BigInt::from_buffer(quotient, a.negative != b.negative)
}

/// `a - (a / b) * b`, so the remainder's sign matches the dividend's.
fn rem(a: &BigInt, b: &BigInt) -> BigInt {
    if b.is_zero() {
        panic!("attempt to calculate the remainder with a divisor of zero");
    }
    sub(a, &mul(&div(a, b), b))
}

/// Applies `op` limb-wise over both operands' two's-complement forms at a
/// common width. The result's sign bit is `op` applied to the operand sign
/// bits; a negative result converts back to sign-magnitude before storing.
fn bitwise(a: &BigInt, b: &BigInt, op: fn(Limb, Limb) -> Limb) -> BigInt {
    let width = a.magnitude.len().max(b.magnitude.len());
    let x = bits::to_twos(&a.magnitude, a.negative, width);
    let y = bits::to_twos(&b.magnitude, b.negative, width);
    let mut z = x;
    for i in 0..width {
        let limb = op(z[i], y[i]);
        z[i] = limb;
    }
    let negative = op(a.negative as Limb, b.negative as Limb) & 1 == 1;
    if negative {
        bits::from_twos(&mut z);
    }
    BigInt::from_buffer(z, negative)
}

fn bitand(a: &BigInt, b: &BigInt) -> BigInt {
    bitwise(a, b, |x, y| x & y)
}

fn bitor(a: &BigInt, b: &BigInt) -> BigInt {
    bitwise(a, b, |x, y| x | y)
}

fn bitxor(a: &BigInt, b: &BigInt) -> BigInt {
    bitwise(a, b, |x, y| x ^ y)
}

/// Left shift multiplies by `2^k` regardless of sign.
fn shl(a: &BigInt, k: u32) -> BigInt {
    let mut magnitude = a.magnitude.clone();
    large::ishl(&mut magnitude, k as usize);
    BigInt::from_buffer(magnitude, a.negative)
}

/// Right shift is arithmetic: it floors, matching a two's-complement
/// shift. For negative values `a >> k == -(((|a| - 1) >> k) + 1)`.
fn shr(a: &BigInt, k: u32) -> BigInt {
    let mut magnitude = a.magnitude.clone();
    if a.negative {
        small::isub(&mut magnitude, 1);
        large::ishr(&mut magnitude, k as usize);
        small::iadd(&mut magnitude, 1);
        BigInt::from_buffer(magnitude, true)
    } else {
        large::ishr(&mut magnitude, k as usize);
        BigInt::from_buffer(magnitude, false)
    }
}

// UNARY
// -----

impl Neg for BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(mut self) -> BigInt {
        // Zero keeps its non-negative sign.
        if !self.is_zero() {
            self.negative = !self.negative;
        }
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(self) -> BigInt {
        -self.clone()
    }
}

impl Not for BigInt {
    type Output = BigInt;

    /// `!a == -a - 1`, the infinite-precision two's-complement complement.
    #[inline]
    fn not(self) -> BigInt {
        -self - BigInt::from(1)
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    #[inline]
    fn not(self) -> BigInt {
        !self.clone()
    }
}

// FORWARDING
// ----------

macro_rules! forward_binop {
    (impl $imp:ident, $method:ident, $func:path) => {
        impl $imp<BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: BigInt) -> BigInt {
                $func(&self, &rhs)
            }
        }

        impl $imp<&BigInt> for BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: &BigInt) -> BigInt {
                $func(&self, rhs)
            }
        }

        impl $imp<BigInt> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: BigInt) -> BigInt {
                $func(self, &rhs)
            }
        }

        impl $imp<&BigInt> for &BigInt {
            type Output = BigInt;

            #[inline]
            fn $method(self, rhs: &BigInt) -> BigInt {
                $func(self, rhs)
            }
        }
    };
}

macro_rules! forward_assign {
    (impl $imp:ident, $method:ident, $func:path) => {
        impl $imp<BigInt> for BigInt {
            #[inline]
            fn $method(&mut self, rhs: BigInt) {
                *self = $func(&*self, &rhs);
            }
        }

        impl $imp<&BigInt> for BigInt {
            #[inline]
            fn $method(&mut self, rhs: &BigInt) {
                *self = $func(&*self, rhs);
            }
        }
    };
}

forward_binop!(impl Add, add, add);
forward_binop!(impl Sub, sub, sub);
forward_binop!(impl Mul, mul, mul);
forward_binop!(impl Div, div, div);
forward_binop!(impl Rem, rem, rem);
forward_binop!(impl BitAnd, bitand, bitand);
forward_binop!(impl BitOr, bitor, bitor);
forward_binop!(impl BitXor, bitxor, bitxor);

forward_assign!(impl AddAssign, add_assign, add);
forward_assign!(impl SubAssign, sub_assign, sub);
forward_assign!(impl MulAssign, mul_assign, mul);
forward_assign!(impl DivAssign, div_assign, div);
forward_assign!(impl RemAssign, rem_assign, rem);
forward_assign!(impl BitAndAssign, bitand_assign, bitand);
forward_assign!(impl BitOrAssign, bitor_assign, bitor);
forward_assign!(impl BitXorAssign, bitxor_assign, bitxor);

// SHIFTS
// ------

impl Shl<u32> for BigInt {
    type Output = BigInt;

    #[inline]
    fn shl(self, rhs: u32) -> BigInt {
        shl(&self, rhs)
    }
}

impl Shl<u32> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn shl(self, rhs: u32) -> BigInt {
        shl(self, rhs)
    }
}

impl Shr<u32> for BigInt {
    type Output = BigInt;

    #[inline]
    fn shr(self, rhs: u32) -> BigInt {
        shr(&self, rhs)
    }
}

impl Shr<u32> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn shr(self, rhs: u32) -> BigInt {
        shr(self, rhs)
    }
}

impl ShlAssign<u32> for BigInt {
    #[inline]
    fn shl_assign(&mut self, rhs: u32) {
        *self = shl(&*self, rhs);
    }
}

impl ShrAssign<u32> for BigInt {
    #[inline]
    fn shr_assign(&mut self, rhs: u32) {
        *self = shr(&*self, rhs);
    }
}
