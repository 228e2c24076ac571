//! Nim-sum of heap sizes

use auto_ops::impl_op_ex;
use std::{
    fmt::{self, Display},
    iter::Sum,
};

/// Bitwise XOR of heap sizes.
///
/// Adding a heap flips its bits in the sum, so adding the same heap twice cancels it out.
#[repr(transparent)]
#[derive(Debug, Default, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NimSum(u32);

impl NimSum {
    /// Wrap an already computed XOR
    #[inline]
    pub const fn new(value: u32) -> NimSum {
        NimSum(value)
    }

    /// Raw XOR value
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Check if every bit is set in an even number of heaps
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Size `heap` has to shrink to so that the sum becomes zero.
    ///
    /// `None` if that would keep the heap as it is or grow it.
    #[inline]
    pub const fn target(self, heap: u32) -> Option<u32> {
        let target = heap ^ self.0;
        if target < heap { Some(target) } else { None }
    }
}

impl_op_ex!(+|lhs: &NimSum, rhs: &NimSum| -> NimSum { NimSum(lhs.0 ^ rhs.0) });
impl_op_ex!(+=|lhs: &mut NimSum, rhs: &NimSum| { lhs.0 ^= rhs.0 });
impl_op_ex!(+|lhs: &NimSum, heap: &u32| -> NimSum { NimSum(lhs.0 ^ heap) });
impl_op_ex!(+=|lhs: &mut NimSum, heap: &u32| { lhs.0 ^= heap });

impl Sum<u32> for NimSum {
    fn sum<I: Iterator<Item = u32>>(heaps: I) -> NimSum {
        heaps.fold(NimSum::default(), |acc, heap| acc + heap)
    }
}

impl Display for NimSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
