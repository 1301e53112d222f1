//! GF(2) scalars for dense matrices.
//!
//! [`GF2`] is the element type of the `ndarray` matrices built by the
//! [`encoder`](crate::encoder). Addition is XOR and multiplication is AND.
//! Only the operations needed by Gauss-Jordan reduction and by encoding are
//! provided.

use core::ops::{Add, AddAssign, Mul};
use num_traits::{One, Zero};

/// Finite field GF(2) element.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct GF2(bool);

impl From<GF2> for u8 {
    fn from(x: GF2) -> u8 {
        u8::from(x.0)
    }
}

impl Zero for GF2 {
    fn zero() -> GF2 {
        GF2(false)
    }

    fn is_zero(&self) -> bool {
        !self.0
    }
}

impl One for GF2 {
    fn one() -> GF2 {
        GF2(true)
    }

    fn is_one(&self) -> bool {
        self.0
    }
}

impl Add for GF2 {
    type Output = GF2;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: GF2) -> GF2 {
        GF2(self.0 ^ rhs.0)
    }
}

// Row operations in ndarray need `AddAssign` on the elements
impl AddAssign for GF2 {
    #[allow(clippy::suspicious_op_assign_impl)]
    fn add_assign(&mut self, rhs: GF2) {
        self.0 ^= rhs.0;
    }
}

impl Mul for GF2 {
    type Output = GF2;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn mul(self, rhs: GF2) -> GF2 {
        GF2(self.0 & rhs.0)
    }
}

impl core::iter::Sum for GF2 {
    fn sum<I: Iterator<Item = GF2>>(iter: I) -> GF2 {
        iter.fold(GF2::zero(), Add::add)
    }
}
