//! Building-blocks for arbitrary-precision math over magnitudes.
//!
//! Everything here is sign-free: the functions operate on little-endian
//! limb buffers and leave sign handling to the operator layer. The modules
//! are layered the same way as the storage they manipulate: `scalar` for
//! limb-to-limb primitives, `small` for buffer-by-limb operations, `large`
//! for buffer-by-buffer operations.
//!
//! Canonical form: no trailing zero limbs, except that zero is exactly one
//! zero limb. Every function that assembles a result re-establishes it.

use crate::buffer::{Limb, LimbBuffer};

/// Bit width of a limb.
pub(crate) const LIMB_BITS: usize = 32;

/// Wide intermediate holding any `limb * limb + limb + limb`.
type Wide = u64;

/// `2^32`, the magnitude base, as a wide value.
const BASE: Wide = (Limb::MAX as Wide) + 1;

/// Whether `x` is canonical zero.
#[inline]
pub(crate) fn is_zero(x: &LimbBuffer) -> bool {
    x.len() == 1 && x[0] == 0
}

/// Whether `x` is exactly one.
#[inline]
pub(crate) fn is_one(x: &LimbBuffer) -> bool {
    x.len() == 1 && x[0] == 1
}

// SCALAR
// ------

// Scalar-to-scalar operations, building-blocks for everything below.

pub(crate) mod scalar {
    use super::*;

    /// AddAssign two limbs and return whether the add overflowed.
    #[inline]
    pub fn iadd(x: &mut Limb, y: Limb) -> bool {
        let (value, overflow) = x.overflowing_add(y);
        *x = value;
        overflow
    }

    /// SubAssign two limbs and return whether the subtract underflowed.
    #[inline]
    pub fn isub(x: &mut Limb, y: Limb) -> bool {
        let (value, underflow) = x.overflowing_sub(y);
        *x = value;
        underflow
    }

    /// Multiply two limbs with a carry-in, returning `(low, high)`.
    ///
    /// Cannot overflow: `Wide::MAX - Limb::MAX * Limb::MAX >= Limb::MAX`.
    #[inline]
    pub fn mul(x: Limb, y: Limb, carry: Limb) -> (Limb, Limb) {
        let wide = x as Wide * y as Wide + carry as Wide;
        (wide as Limb, (wide >> LIMB_BITS) as Limb)
    }
}

// SMALL
// -----

// Buffer-by-limb operations, used by parsing, formatting, and the shift
// adjustments.

pub(crate) mod small {
    use super::*;

    /// AddAssign a limb to a magnitude.
    pub fn iadd(x: &mut LimbBuffer, y: Limb) {
        let mut carry = scalar::iadd(&mut x[0], y);
        let mut i = 1;
        while carry && i < x.len() {
            carry = scalar::iadd(&mut x[i], 1);
            i += 1;
        }
        if carry {
            x.push(1);
        }
    }

    /// SubAssign a limb from a magnitude. The caller guarantees `x >= y`.
    pub fn isub(x: &mut LimbBuffer, y: Limb) {
        debug_assert!(x.len() > 1 || x[0] >= y);
        let mut borrow = scalar::isub(&mut x[0], y);
        let mut i = 1;
        while borrow && i < x.len() {
            borrow = scalar::isub(&mut x[i], 1);
            i += 1;
        }
        normalize(x);
    }

    /// MulAssign a magnitude by a limb.
    pub fn imul(x: &mut LimbBuffer, y: Limb) {
        let mut carry = 0;
        for i in 0..x.len() {
            let (low, high) = scalar::mul(x[i], y, carry);
            x[i] = low;
            carry = high;
        }
        if carry != 0 {
            x.push(carry);
        }
    }

    /// DivAssign a magnitude by a nonzero limb, returning the remainder.
    ///
    /// Iterates most-significant-first: `curr = rest * 2^32 + limb`.
    pub fn div_rem(x: &mut LimbBuffer, y: Limb) -> Limb {
        debug_assert!(y != 0);
        let mut rest: Wide = 0;
        for i in (0..x.len()).rev() {
            let curr = (rest << LIMB_BITS) | x[i] as Wide;
            x[i] = (curr / y as Wide) as Limb;
            rest = curr % y as Wide;
        }
        normalize(x);
        rest as Limb
    }

    /// Drops trailing zero limbs, keeping the single zero limb of zero.
    pub fn normalize(x: &mut LimbBuffer) {
        while x.len() > 1 && x.last() == 0 {
            x.pop();
        }
    }
}

// LARGE
// -----

// Buffer-by-buffer operations. Inputs are canonical magnitudes; outputs
// are canonical magnitudes.

pub(crate) mod large {
    use super::*;
    use core::cmp::Ordering;

    /// Compare two canonical magnitudes: limb count first, then limbs from
    /// the most significant end.
    pub fn compare(x: &LimbBuffer, y: &LimbBuffer) -> Ordering {
        if x.len() != y.len() {
            return x.len().cmp(&y.len());
        }
        for i in (0..x.len()).rev() {
            if x[i] != y[i] {
                return x[i].cmp(&y[i]);
            }
        }
        Ordering::Equal
    }

    /// Add two magnitudes: ripple-carry across `max(len) + 1` limbs.
    pub fn add(x: &LimbBuffer, y: &LimbBuffer) -> LimbBuffer {
        let max_len = x.len().max(y.len());
        let mut z = LimbBuffer::single(0);
        z.resize(max_len + 1);
        let mut carry: Wide = 0;
        for i in 0..max_len {
            let mut sum = carry;
            if i < x.len() {
                sum += x[i] as Wide;
            }
            if i < y.len() {
                sum += y[i] as Wide;
            }
            z[i] = sum as Limb;
            carry = sum >> LIMB_BITS;
        }
        z[max_len] = carry as Limb;
        small::normalize(&mut z);
        z
    }

    /// Subtract `y` from `x`. The caller guarantees `x >= y`.
    pub fn sub(x: &LimbBuffer, y: &LimbBuffer) -> LimbBuffer {
        debug_assert!(compare(x, y) != Ordering::Less);
        let mut z = LimbBuffer::single(0);
        z.resize(x.len());
        let mut borrow: Wide = 0;
        for i in 0..x.len() {
            let yi = if i < y.len() { y[i] as Wide } else { 0 };
            let diff = BASE + x[i] as Wide - yi - borrow;
            z[i] = diff as Limb;
            borrow = 1 - (diff >> LIMB_BITS);
        }
        debug_assert_eq!(borrow, 0);
        small::normalize(&mut z);
        z
    }

    /// Schoolbook multiplication into `x.len() + y.len()` limbs.
    ///
    /// `O(n*m)`, with a wide intermediate per limb product so partial sums
    /// cannot overflow. The caller short-circuits zero operands.
    pub fn mul(x: &LimbBuffer, y: &LimbBuffer) -> LimbBuffer {
        let mut z = LimbBuffer::single(0);
        z.resize(x.len() + y.len());
        for i in 0..x.len() {
            let mut carry: Wide = 0;
            for j in 0..y.len() {
                let t = x[i] as Wide * y[j] as Wide + z[i + j] as Wide + carry;
                z[i + j] = t as Limb;
                carry = t >> LIMB_BITS;
            }
            // The limb above this row has not been written yet.
            z[i + y.len()] = carry as Limb;
        }
        small::normalize(&mut z);
        z
    }

    /// Divide magnitude `x` by nonzero magnitude `y`, returning the
    /// quotient.
    pub fn div(x: &LimbBuffer, y: &LimbBuffer) -> LimbBuffer {
        debug_assert!(!is_zero(y));
        if compare(x, y) == Ordering::Less {
            return LimbBuffer::single(0);
        }
        if y.len() == 1 {
            div_small(x, y[0])
        } else {
            div_knuth(x, y)
        }
    }

    /// One-limb divisor: scalar long division, most-significant-first.
    ///
    /// Quotient limbs are appended high-to-low on top of an initial zero
    /// limb; the reversal puts them in little-endian order and leaves that
    /// zero at the top, where normalization drops it.
    fn div_small(x: &LimbBuffer, y: Limb) -> LimbBuffer {
        let mut quotient = LimbBuffer::single(0);
        let mut rest: Wide = 0;
        for i in (0..x.len()).rev() {
            let curr = (rest << LIMB_BITS) | x[i] as Wide;
            quotient.push((curr / y as Wide) as Limb);
            rest = curr % y as Wide;
        }
        quotient.reverse();
        small::normalize(&mut quotient);
        quotient
    }

    /// Multi-limb divisor: long division after the fashion of Knuth's
    /// Algorithm D, as presented in "Multiple-Length Division Revisited:
    /// A Tour of the Minefield".
    ///
    /// A zero guard limb appended to the dividend guarantees a full
    /// three-limb window for every trial estimate. Each trial quotient is
    /// verified against the remainder window and decremented at most once.
    fn div_knuth(x: &LimbBuffer, y: &LimbBuffer) -> LimbBuffer {
        let mut rem = x.clone();
        rem.push(0);
        let m = y.len();
        let n = rem.len();
        let mut quotient = LimbBuffer::single(0);
        quotient.resize(n - m);
        for j in (0..n - m).rev() {
            let mut qt = trial(&rem, y);
            let mut prod = y.clone();
            small::imul(&mut prod, qt);
            if !window_ge(&rem, &prod, m + 1) {
                qt -= 1;
                prod = y.clone();
                small::imul(&mut prod, qt);
            }
            quotient[j] = qt;
            isub_window(&mut rem, &prod, m + 1);
            rem.pop();
        }
        small::normalize(&mut quotient);
        quotient
    }

    /// Estimate a quotient limb from the top three limbs of the remainder
    /// over the top two limbs of the divisor, clamped to `Limb::MAX`.
    fn trial(rem: &LimbBuffer, div: &LimbBuffer) -> Limb {
        let n = rem.len();
        let m = div.len();
        debug_assert!(n >= 3, "trial window needs three remainder limbs");
        debug_assert!(m >= 2, "one-limb divisors take the scalar path");
        let x = ((rem[n - 1] as u128) << 64) | ((rem[n - 2] as u128) << 32) | rem[n - 3] as u128;
        let y = ((div[m - 1] as u128) << 32) | div[m - 2] as u128;
        (x / y).min(Limb::MAX as u128) as Limb
    }

    /// Whether the top `window` limbs of `rem` are at least `prod`,
    /// comparing from the most significant end with `prod` zero-extended.
    fn window_ge(rem: &LimbBuffer, prod: &LimbBuffer, window: usize) -> bool {
        debug_assert!(window <= rem.len());
        for i in 0..window {
            let r = rem[rem.len() - 1 - i];
            let idx = window - 1 - i;
            let p = if idx < prod.len() { prod[idx] } else { 0 };
            if r != p {
                return r > p;
            }
        }
        true
    }

    /// Borrow-subtract `prod` from the top `window` limbs of `rem`.
    fn isub_window(rem: &mut LimbBuffer, prod: &LimbBuffer, window: usize) {
        let start = rem.len() - window;
        let mut borrow: Wide = 0;
        for i in 0..window {
            let p = if i < prod.len() { prod[i] as Wide } else { 0 };
            let diff = BASE + rem[start + i] as Wide - p - borrow;
            rem[start + i] = diff as Limb;
            borrow = 1 - (diff >> LIMB_BITS);
        }
        debug_assert_eq!(borrow, 0, "trial quotient was not corrected enough");
    }

    /// Shift a magnitude left by `n` bits: a sub-limb carry pass, then
    /// whole-limb moves.
    pub fn ishl(x: &mut LimbBuffer, n: usize) {
        if is_zero(x) || n == 0 {
            return;
        }
        let bits = n % LIMB_BITS;
        let limbs = n / LIMB_BITS;
        if bits != 0 {
            let mut prev: Limb = 0;
            for i in 0..x.len() {
                let t = x[i];
                x[i] = (t << bits) | prev;
                prev = t >> (LIMB_BITS - bits);
            }
            if prev != 0 {
                x.push(prev);
            }
        }
        if limbs != 0 {
            let old_len = x.len();
            x.resize(old_len + limbs);
            for i in (0..old_len).rev() {
                let t = x[i];
                x[i + limbs] = t;
            }
            for i in 0..limbs {
                x[i] = 0;
            }
        }
    }

    /// Shift a magnitude right by `n` bits, discarding shifted-out bits.
    pub fn ishr(x: &mut LimbBuffer, n: usize) {
        let bits = n % LIMB_BITS;
        let limbs = n / LIMB_BITS;
        if limbs >= x.len() {
            x.resize(1);
            x[0] = 0;
            return;
        }
        if limbs != 0 {
            let new_len = x.len() - limbs;
            for i in 0..new_len {
                let t = x[i + limbs];
                x[i] = t;
            }
            x.resize(new_len);
        }
        if bits != 0 {
            for i in 0..x.len() {
                let high = if i + 1 < x.len() { x[i + 1] } else { 0 };
                let low = x[i];
                x[i] = (low >> bits) | (high << (LIMB_BITS - bits));
            }
        }
        small::normalize(x);
    }
}

// TESTS
// -----

#[cfg(test)]
mod tests {
    use super::*;
    use core::cmp::Ordering;

    fn buf(limbs: &[Limb]) -> LimbBuffer {
        LimbBuffer::from_limbs(limbs.to_vec())
    }

    #[test]
    fn compare_test() {
        assert_eq!(large::compare(&buf(&[1]), &buf(&[2])), Ordering::Less);
        assert_eq!(large::compare(&buf(&[2]), &buf(&[2])), Ordering::Equal);
        assert_eq!(large::compare(&buf(&[5, 1]), &buf(&[2])), Ordering::Greater);
        // Reverse ordering: the most significant limb decides.
        assert_eq!(
            large::compare(&buf(&[0, 1, 9]), &buf(&[Limb::MAX, 0, 9])),
            Ordering::Greater
        );
    }

    #[test]
    fn iadd_small_test() {
        let mut x = buf(&[Limb::MAX]);
        small::iadd(&mut x, 5);
        assert_eq!(x.as_slice(), [4, 1]);

        let mut x = buf(&[Limb::MAX, Limb::MAX]);
        small::iadd(&mut x, 7);
        assert_eq!(x.as_slice(), [6, 0, 1]);
    }

    #[test]
    fn isub_small_test() {
        let mut x = buf(&[0, 1]);
        small::isub(&mut x, 1);
        assert_eq!(x.as_slice(), [Limb::MAX]);
    }

    #[test]
    fn imul_small_test() {
        let mut x = buf(&[0x3333_3334]);
        small::imul(&mut x, 5);
        assert_eq!(x.as_slice(), [4, 1]);

        let mut x = buf(&[0x3333_3334, 0x3333_3333]);
        small::imul(&mut x, 5);
        assert_eq!(x.as_slice(), [4, 0, 1]);
    }

    #[test]
    fn div_rem_small_test() {
        // 2^64 / 2 == 2^63.
        let mut x = buf(&[0, 0, 1]);
        let rest = small::div_rem(&mut x, 2);
        assert_eq!(rest, 0);
        assert_eq!(x.as_slice(), [0, 0x8000_0000]);

        let mut x = buf(&[7]);
        let rest = small::div_rem(&mut x, 3);
        assert_eq!(rest, 1);
        assert_eq!(x.as_slice(), [2]);
    }

    #[test]
    fn add_ripples_carry() {
        let z = large::add(&buf(&[Limb::MAX, Limb::MAX]), &buf(&[1]));
        assert_eq!(z.as_slice(), [0, 0, 1]);
    }

    #[test]
    fn sub_borrows() {
        let z = large::sub(&buf(&[0, 0, 1]), &buf(&[1]));
        assert_eq!(z.as_slice(), [Limb::MAX, Limb::MAX]);
    }

    #[test]
    fn mul_schoolbook() {
        // (2^64 - 1)^2 == 2^128 - 2^65 + 1.
        let x = buf(&[Limb::MAX, Limb::MAX]);
        let z = large::mul(&x, &x);
        assert_eq!(z.as_slice(), [1, 0, 0xFFFF_FFFE, Limb::MAX]);
    }

    #[test]
    fn div_single_limb() {
        // 2^64 / 2 == 2^63.
        let q = large::div(&buf(&[0, 0, 1]), &buf(&[2]));
        assert_eq!(q.as_slice(), [0, 0x8000_0000]);
    }

    #[test]
    fn div_smaller_dividend_is_zero() {
        let q = large::div(&buf(&[5]), &buf(&[0, 1]));
        assert_eq!(q.as_slice(), [0]);
    }

    #[test]
    fn div_knuth_exact() {
        // 2^96 / 2^64 == 2^32.
        let q = large::div(&buf(&[0, 0, 0, 1]), &buf(&[0, 0, 1]));
        assert_eq!(q.as_slice(), [0, 1]);
    }

    #[test]
    fn div_knuth_trial_at_limb_boundary() {
        // (2^96 - 1) / (2^64 + 5) == 2^32 - 1: the trial estimate sits
        // right at the top of the limb range.
        let q = large::div(
            &buf(&[Limb::MAX, Limb::MAX, Limb::MAX]),
            &buf(&[5, 0, 1]),
        );
        assert_eq!(q.as_slice(), [Limb::MAX]);
    }

    #[test]
    fn div_knuth_cross_limb() {
        // 0xDEADBEEFCAFEBABE1234567890ABCDEF / 0xFFFF0000FFFF.
        let q = large::div(
            &buf(&[0x90AB_CDEF, 0x1234_5678, 0xCAFE_BABE, 0xDEAD_BEEF]),
            &buf(&[0xFFFF, 0xFFFF]),
        );
        assert_eq!(q.as_slice(), [0x85BD_ABA1, 0x9D9D_89EE, 0xDEAE]);
    }

    #[test]
    fn div_equal_operands() {
        let x = buf(&[3, 4, 5]);
        let q = large::div(&x, &x);
        assert_eq!(q.as_slice(), [1]);
    }

    #[test]
    fn shl_test() {
        let mut x = buf(&[0xD221_0408]);
        large::ishl(&mut x, 5);
        assert_eq!(x.as_slice(), [0x4420_8100, 0x1A]);
        large::ishl(&mut x, 32);
        assert_eq!(x.as_slice(), [0, 0x4420_8100, 0x1A]);
        large::ishl(&mut x, 27);
        assert_eq!(x.as_slice(), [0, 0, 0xD221_0408]);
    }

    #[test]
    fn shr_test() {
        let mut x = buf(&[0, 0, 0xD221_0408]);
        large::ishr(&mut x, 27);
        assert_eq!(x.as_slice(), [0, 0x4420_8100, 0x1A]);
        large::ishr(&mut x, 32);
        assert_eq!(x.as_slice(), [0x4420_8100, 0x1A]);
        large::ishr(&mut x, 5);
        assert_eq!(x.as_slice(), [0xD221_0408]);
        large::ishr(&mut x, 64);
        assert_eq!(x.as_slice(), [0]);
    }
}
