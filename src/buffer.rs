//! Copy-on-write limb storage with a small-buffer optimization.
//!
//! A magnitude is a little-endian sequence of 32-bit limbs: for
//! `[0, 1, 2, 3]`, `3` is the most significant limb and `0` the least
//! significant. Buffers of at most [`MAX_INLINE`] limbs are held by value;
//! growing past that spills the limbs into a reference-counted heap block
//! that clones share. Every mutating path obtains exclusive ownership of
//! the block first, so writes through one owner are never observable
//! through another.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

/// A single limb of a magnitude, a digit in base 2^32.
pub(crate) type Limb = u32;

/// Number of limbs stored inline before spilling to the heap.
const MAX_INLINE: usize = 2;

/// A variable-length sequence of limbs.
///
/// The representation tag is determined by whether the length has ever
/// exceeded `MAX_INLINE`: once promoted to `Shared`, a buffer stays heap
/// backed even if later shrunk below the threshold. While `Shared`, the
/// vector inside the block has exactly `len` elements.
#[derive(Clone)]
pub(crate) struct LimbBuffer {
    len: usize,
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Inline([Limb; MAX_INLINE]),
    Shared(Rc<Vec<Limb>>),
}

impl LimbBuffer {
    /// A one-limb buffer holding `limb`.
    pub(crate) const fn single(limb: Limb) -> Self {
        LimbBuffer {
            len: 1,
            repr: Repr::Inline([limb, 0]),
        }
    }

    /// Seeds a buffer from scratch storage, inline when it fits.
    pub(crate) fn from_limbs(limbs: Vec<Limb>) -> Self {
        if limbs.len() <= MAX_INLINE {
            let mut small = [0; MAX_INLINE];
            small[..limbs.len()].copy_from_slice(&limbs);
            LimbBuffer {
                len: limbs.len(),
                repr: Repr::Inline(small),
            }
        } else {
            LimbBuffer {
                len: limbs.len(),
                repr: Repr::Shared(Rc::new(limbs)),
            }
        }
    }

    /// Number of limbs in use.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Read-only view of the limbs. Never clones.
    #[inline]
    pub(crate) fn as_slice(&self) -> &[Limb] {
        match &self.repr {
            Repr::Inline(limbs) => &limbs[..self.len],
            Repr::Shared(block) => block,
        }
    }

    /// The most significant limb.
    #[inline]
    pub(crate) fn last(&self) -> Limb {
        assert!(self.len > 0, "last() on an empty limb buffer");
        self.as_slice()[self.len - 1]
    }

    /// Appends a limb. Growing past the inline capacity for the first time
    /// promotes to a heap block seeded with the inline limbs.
    pub(crate) fn push(&mut self, limb: Limb) {
        match &mut self.repr {
            Repr::Inline(limbs) if self.len < MAX_INLINE => {
                limbs[self.len] = limb;
            }
            Repr::Inline(limbs) => {
                let mut spilled = Vec::with_capacity(MAX_INLINE + 1);
                spilled.extend_from_slice(&limbs[..]);
                spilled.push(limb);
                self.repr = Repr::Shared(Rc::new(spilled));
            }
            Repr::Shared(block) => {
                Rc::make_mut(block).push(limb);
            }
        }
        self.len += 1;
    }

    /// Drops the most significant limb.
    pub(crate) fn pop(&mut self) {
        assert!(self.len > 0, "pop() on an empty limb buffer");
        if let Repr::Shared(block) = &mut self.repr {
            Rc::make_mut(block).pop();
        }
        self.len -= 1;
    }

    /// Grows with zero limbs or drops trailing limbs. Growth past the
    /// inline capacity promotes; shrinking a shared buffer never demotes.
    pub(crate) fn resize(&mut self, new_len: usize) {
        match &mut self.repr {
            Repr::Inline(limbs) if new_len <= MAX_INLINE => {
                for limb in &mut limbs[self.len.min(new_len)..new_len] {
                    *limb = 0;
                }
            }
            Repr::Inline(limbs) => {
                let mut spilled = Vec::with_capacity(new_len);
                spilled.extend_from_slice(&limbs[..self.len]);
                spilled.resize(new_len, 0);
                self.repr = Repr::Shared(Rc::new(spilled));
            }
            Repr::Shared(block) => {
                Rc::make_mut(block).resize(new_len, 0);
            }
        }
        self.len = new_len;
    }

    /// Reverses the limb order in place.
    pub(crate) fn reverse(&mut self) {
        match &mut self.repr {
            Repr::Inline(limbs) => limbs[..self.len].reverse(),
            Repr::Shared(block) => Rc::make_mut(block).reverse(),
        }
    }

    #[cfg(test)]
    fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline(_))
    }

    #[cfg(test)]
    fn is_shared_with(&self, other: &LimbBuffer) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Shared(a), Repr::Shared(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Index<usize> for LimbBuffer {
    type Output = Limb;

    /// Reads limb `i`. Never clones.
    #[inline]
    fn index(&self, i: usize) -> &Limb {
        assert!(i < self.len, "limb index {} out of range for length {}", i, self.len);
        &self.as_slice()[i]
    }
}

impl IndexMut<usize> for LimbBuffer {
    /// Writes limb `i`, cloning the backing block first when it is shared
    /// with another owner.
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Limb {
        assert!(i < self.len, "limb index {} out of range for length {}", i, self.len);
        match &mut self.repr {
            Repr::Inline(limbs) => &mut limbs[i],
            Repr::Shared(block) => &mut Rc::make_mut(block)[i],
        }
    }
}

impl PartialEq for LimbBuffer {
    #[inline]
    fn eq(&self, other: &LimbBuffer) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for LimbBuffer {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_until_three_limbs() {
        let mut buf = LimbBuffer::single(7);
        assert!(buf.is_inline());
        buf.push(8);
        assert!(buf.is_inline());
        buf.push(9);
        assert!(!buf.is_inline());
        assert_eq!(buf.as_slice(), [7, 8, 9]);
    }

    #[test]
    fn promotion_is_permanent() {
        let mut buf = LimbBuffer::from_limbs(alloc::vec![1, 2, 3, 4]);
        assert!(!buf.is_inline());
        buf.pop();
        buf.pop();
        buf.pop();
        assert!(!buf.is_inline());
        assert_eq!(buf.as_slice(), [1]);
    }

    #[test]
    fn clone_shares_heap_block() {
        let a = LimbBuffer::from_limbs(alloc::vec![1, 2, 3]);
        let b = a.clone();
        assert!(a.is_shared_with(&b));
    }

    #[test]
    fn write_unshares() {
        let a = LimbBuffer::from_limbs(alloc::vec![1, 2, 3]);
        let mut b = a.clone();
        b[0] = 99;
        assert!(!a.is_shared_with(&b));
        assert_eq!(a.as_slice(), [1, 2, 3]);
        assert_eq!(b.as_slice(), [99, 2, 3]);
    }

    #[test]
    fn push_and_pop_unshare() {
        let a = LimbBuffer::from_limbs(alloc::vec![1, 2, 3]);
        let mut b = a.clone();
        b.push(4);
        assert_eq!(a.as_slice(), [1, 2, 3]);
        assert_eq!(b.as_slice(), [1, 2, 3, 4]);

        let mut c = a.clone();
        c.pop();
        assert_eq!(a.as_slice(), [1, 2, 3]);
        assert_eq!(c.as_slice(), [1, 2]);
    }

    #[test]
    fn resize_zero_fills() {
        let mut buf = LimbBuffer::single(5);
        buf.resize(2);
        assert_eq!(buf.as_slice(), [5, 0]);
        buf.resize(4);
        assert_eq!(buf.as_slice(), [5, 0, 0, 0]);
        assert!(!buf.is_inline());
        buf.resize(1);
        assert_eq!(buf.as_slice(), [5]);
    }

    #[test]
    fn resize_regrow_is_zeroed() {
        let mut buf = LimbBuffer::from_limbs(alloc::vec![1, 2]);
        buf.resize(1);
        buf.resize(2);
        assert_eq!(buf.as_slice(), [1, 0]);
    }

    #[test]
    fn reverse_applies_copy_on_write() {
        let a = LimbBuffer::from_limbs(alloc::vec![1, 2, 3]);
        let mut b = a.clone();
        b.reverse();
        assert_eq!(a.as_slice(), [1, 2, 3]);
        assert_eq!(b.as_slice(), [3, 2, 1]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_out_of_range() {
        let buf = LimbBuffer::single(1);
        let _ = buf[1];
    }

    #[test]
    #[should_panic(expected = "empty limb buffer")]
    fn pop_empty() {
        let mut buf = LimbBuffer::single(1);
        buf.pop();
        buf.pop();
    }
}
