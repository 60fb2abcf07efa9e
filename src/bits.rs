//! Sign-magnitude ⇄ two's-complement conversion.
//!
//! The bitwise operators must behave as if both operands were
//! infinite-precision two's-complement values. The conversion in each
//! direction is isolated here as a pair of pure functions so that the sign
//! handling never leaks into the operator loops: a non-negative value is
//! its zero-extended magnitude, and a negative value is the complement of
//! the zero-extended magnitude plus one, modulo `2^(32 * width)`.

use crate::buffer::{Limb, LimbBuffer};

/// Convert a magnitude and sign into a two's-complement limb sequence of
/// exactly `width` limbs.
pub(crate) fn to_twos(magnitude: &LimbBuffer, negative: bool, width: usize) -> LimbBuffer {
    debug_assert!(width >= magnitude.len());
    let mut buf = magnitude.clone();
    buf.resize(width);
    if negative {
        negate(&mut buf);
    }
    buf
}

/// Convert a two's-complement limb sequence known to encode a negative
/// value back into its magnitude, in place.
pub(crate) fn from_twos(buf: &mut LimbBuffer) {
    negate(buf);
}

/// Complement every limb and add one. A carry can only survive past the
/// top limb when every limb is zero; it is kept as a new limb so that an
/// all-zero window negates to `2^(32 * len)` instead of collapsing to
/// zero. Magnitudes entering [`to_twos`] are nonzero, so the forward
/// conversion always stays at exactly `width` limbs.
fn negate(buf: &mut LimbBuffer) {
    for i in 0..buf.len() {
        let limb = buf[i];
        buf[i] = !limb;
    }
    let mut carry = true;
    let mut i = 0;
    while carry && i < buf.len() {
        let (limb, overflow) = buf[i].overflowing_add(1);
        buf[i] = limb;
        carry = overflow;
        i += 1;
    }
    if carry {
        buf.push(1);
    }
}
