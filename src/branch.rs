//! Branch instructions as seen by a predictor.

use bitvec::prelude::*;

/// A conditional branch, identified only by its address. 
///
/// Bit 0 of the address is the least-significant bit of the program counter,
/// so the low-order bits of the address are always the first bits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    addr: BitVec,
}
impl Instruction {
    /// Build an address `width` bits wide from a program counter value.
    pub fn from_pc(pc: u64, width: usize) -> Self { 
        let addr = (0..width)
            .map(|idx| idx < u64::BITS as usize && (pc >> idx) & 1 == 1)
            .collect();
        Self { addr }
    }

    pub fn from_bits(bits: &BitSlice) -> Self { 
        Self { addr: bits.to_bitvec() }
    }

    pub fn address(&self) -> &BitSlice { &self.addr }
    pub fn width(&self) -> usize { self.addr.len() }
}

#[cfg(test)]
mod test { 
    use super::*;

    #[test]
    fn low_order_bits_first() {
        let inst = Instruction::from_pc(0b1101, 6);
        assert_eq!(inst.width(), 6);
        assert_eq!(inst.address(), bits![1, 0, 1, 1, 0, 0]);
    }
}
