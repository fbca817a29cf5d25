//! A single two-valued logic element, plus helpers for treating a run of 
//! bits as an unsigned number.

use bitvec::prelude::*;
use crate::Outcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bit { Zero, One }

impl std::ops::BitXor for Bit {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        Bit::from(bool::from(self) ^ bool::from(rhs))
    }
}
impl std::ops::Not for Bit { 
    type Output = Self;
    fn not(self) -> Self { 
        match self { 
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }
}
impl From<bool> for Bit {
    fn from(x: bool) -> Self { 
        if x { Self::One } else { Self::Zero }
    }
}
impl From<Bit> for bool {
    fn from(x: Bit) -> Self { 
        matches!(x, Bit::One)
    }
}

/// A taken branch shifts a ONE into history, a not-taken branch a ZERO.
impl From<Outcome> for Bit {
    fn from(x: Outcome) -> Self { 
        Bit::from(bool::from(x))
    }
}

impl std::fmt::Display for Bit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self { 
            Self::Zero => write!(f, "0"),
            Self::One => write!(f, "1"),
        }
    }
}

/// Interpret a slice of bits as an unsigned number. 
/// Index 0 is the most-significant bit.
pub fn to_usize(bits: &BitSlice) -> usize {
    assert!(bits.len() <= usize::BITS as usize);
    bits.iter().by_vals().fold(0, |acc, b| (acc << 1) | (b as usize))
}

/// The inverse of [to_usize]: produce `width` bits, most-significant first.
pub fn from_usize(value: usize, width: usize) -> BitVec {
    (0..width).rev()
        .map(|shamt| shamt < usize::BITS as usize && (value >> shamt) & 1 == 1)
        .collect()
}

/// Render bits as a string of '0'/'1', index 0 leftmost.
pub fn bit_string(bits: &BitSlice) -> String {
    bits.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod test { 
    use super::*;

    #[test]
    fn xor_truth_table() {
        assert_eq!(Bit::Zero ^ Bit::Zero, Bit::Zero);
        assert_eq!(Bit::Zero ^ Bit::One, Bit::One);
        assert_eq!(Bit::One ^ Bit::Zero, Bit::One);
        assert_eq!(Bit::One ^ Bit::One, Bit::Zero);
    }

    #[test]
    fn outcome_to_bit() {
        assert_eq!(Bit::from(Outcome::T), Bit::One);
        assert_eq!(Bit::from(Outcome::N), Bit::Zero);
    }

    #[test]
    fn usize_conversion_is_msb_first() {
        let bits = bitvec![1, 0, 1, 1];
        assert_eq!(to_usize(&bits), 0b1011);
        assert_eq!(from_usize(0b1011, 4), bits);
        assert_eq!(from_usize(1, 3), bitvec![0, 0, 1]);
        assert_eq!(bit_string(&bits), "1011");
    }
}
