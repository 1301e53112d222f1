//! Fixed-width bit vectors.
//!
//! This module contains the struct [`BitRow`], a 320-bit vector used to hold
//! one row of the Star code construction. The Star code matrices have at most
//! 320 message variables, so a single `BitRow` can record which of them take
//! part in a check equation.

use core::ops::{BitAnd, BitAndAssign, BitXor, BitXorAssign};

const WORDS: usize = 5;

/// Fixed-width bit vector.
///
/// A `BitRow` holds [`BitRow::BITS`] independent bits, all initialized to
/// zero. Indices must be smaller than [`BitRow::BITS`]; out of range indices
/// panic in the same way as slice indexing does.
///
/// # Examples
/// ```
/// # use star_ldpc::bitrow::BitRow;
/// let mut a = BitRow::new();
/// a.set(3);
/// a.toggle(200);
/// let mut b = BitRow::new();
/// b.set(200);
/// assert_eq!((a & b).popcount(), 1);
/// assert_eq!((a ^ b).iter_ones().collect::<Vec<_>>(), vec![3]);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct BitRow([u64; WORDS]);

impl BitRow {
    /// Number of bits in a row.
    pub const BITS: usize = 64 * WORDS;

    /// Creates a new row with all bits cleared.
    pub fn new() -> BitRow {
        BitRow::default()
    }

    /// Clears all the bits.
    pub fn reset(&mut self) {
        self.0 = [0; WORDS];
    }

    /// Sets bit `idx` to one.
    pub fn set(&mut self, idx: usize) {
        self.0[idx >> 6] |= 1u64 << (idx & 63);
    }

    /// Flips bit `idx`.
    pub fn toggle(&mut self, idx: usize) {
        self.0[idx >> 6] ^= 1u64 << (idx & 63);
    }

    /// Returns `true` if bit `idx` is one.
    pub fn get(&self, idx: usize) -> bool {
        (self.0[idx >> 6] >> (idx & 63)) & 1 == 1
    }

    /// Returns the number of bits equal to one.
    pub fn popcount(&self) -> usize {
        self.0.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if all the bits are zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Returns an [Iterator] over the indices of the bits equal to one, in
    /// increasing order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().enumerate().flat_map(|(n, &word)| {
            let mut w = word;
            std::iter::from_fn(move || {
                if w == 0 {
                    return None;
                }
                let bit = w.trailing_zeros() as usize;
                w &= w - 1;
                Some(64 * n + bit)
            })
        })
    }

    /// Returns the 64-bit words of the row, least significant first.
    pub fn words(&self) -> &[u64; WORDS] {
        &self.0
    }
}

impl BitAnd for BitRow {
    type Output = BitRow;

    fn bitand(mut self, rhs: BitRow) -> BitRow {
        self &= rhs;
        self
    }
}

impl BitXor for BitRow {
    type Output = BitRow;

    fn bitxor(mut self, rhs: BitRow) -> BitRow {
        self ^= rhs;
        self
    }
}

macro_rules! impl_assign_ops {
    ($opassign:ident, $opassign_method:ident, $op:tt) => {
        impl $opassign for BitRow {
            fn $opassign_method(&mut self, rhs: BitRow) {
                for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
                    *a $op *b;
                }
            }
        }

        impl $opassign<&BitRow> for BitRow {
            fn $opassign_method(&mut self, rhs: &BitRow) {
                self.$opassign_method(*rhs);
            }
        }
    };
}

impl_assign_ops!(BitAndAssign, bitand_assign, &=);
impl_assign_ops!(BitXorAssign, bitxor_assign, ^=);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn set_and_toggle() {
        let mut a = BitRow::new();
        assert!(a.is_zero());
        a.set(0);
        a.set(0);
        a.set(63);
        a.set(64);
        a.set(319);
        assert_eq!(a.popcount(), 4);
        a.toggle(64);
        a.toggle(100);
        assert!(!a.get(64));
        assert!(a.get(100));
        assert_eq!(a.iter_ones().collect::<Vec<_>>(), vec![0, 63, 100, 319]);
        a.reset();
        assert!(a.is_zero());
        assert_eq!(a.popcount(), 0);
    }

    #[test]
    fn ops() {
        let mut a = BitRow::new();
        let mut b = BitRow::new();
        for j in (0..BitRow::BITS).step_by(3) {
            a.set(j);
        }
        for j in (0..BitRow::BITS).step_by(5) {
            b.set(j);
        }
        let and = a & b;
        assert_eq!(
            and.iter_ones().collect::<Vec<_>>(),
            (0..BitRow::BITS).step_by(15).collect::<Vec<_>>()
        );
        let xor = a ^ b;
        assert_eq!(xor.popcount(), a.popcount() + b.popcount() - 2 * and.popcount());
        let mut c = a;
        c ^= a;
        assert!(c.is_zero());
        c ^= &b;
        c &= a;
        assert_eq!(c, and);
    }

    #[test]
    #[should_panic]
    fn out_of_range() {
        let mut a = BitRow::new();
        a.set(BitRow::BITS);
    }
}
