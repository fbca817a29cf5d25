
use bitvec::prelude::*;
use crate::bit::*;
use crate::error::*;

/// The widest selector for which a [RegisterBank] will allocate registers.
pub const MAX_SELECTOR_BITS: usize = 20;

/// A fixed-width shift register.
///
/// New bits enter at the highest index and the bit at index 0 falls off, 
/// so after `n` insertions the last `min(n, len)` bits are the most recent
/// outcomes in insertion order. 
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftRegister {
    data: BitVec,
}

impl std::fmt::Display for ShiftRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", bit_string(&self.data))
    }
}

impl ShiftRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero. 
    pub fn new(len: usize) -> Result<Self> { 
        if len == 0 { 
            return Err(ConstructionError::ZeroWidth("register").into());
        }
        Ok(Self { data: bitvec![0; len] })
    }

    /// Create a register holding a copy of `init`.
    pub fn with_content(init: &BitSlice) -> Result<Self> { 
        let mut res = Self::new(init.len())?;
        res.data.copy_from_bitslice(init);
        Ok(res)
    }

    pub fn len(&self) -> usize { self.data.len() }
    pub fn read(&self) -> &BitSlice { &self.data }

    /// Return a single bit.
    pub fn bit(&self, idx: usize) -> Bit { Bit::from(self.data[idx]) }

    /// The bit at index 0.
    pub fn msb(&self) -> Bit { self.bit(0) }

    /// Replace the whole content of the register. 
    pub fn load(&mut self, values: &BitSlice) -> Result<()> {
        check_width(self.len(), values.len())?;
        self.data.copy_from_bitslice(values);
        Ok(())
    }

    /// Shift the register by one bit. 
    /// The bit at index 0 is discarded and `bit` becomes the last bit.
    pub fn insert(&mut self, bit: Bit) {
        let last = self.len() - 1;
        self.data.shift_left(1);
        self.data.set(last, bit.into());
    }
}


/// A set of `2^selector_bits` independent [ShiftRegister]s.
///
/// All registers exist from construction; a selector picks one of them by
/// interpreting its first `selector_bits` bits as an unsigned index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterBank {
    selector_bits: usize,
    data: Vec<ShiftRegister>,
}

impl std::fmt::Display for RegisterBank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (idx, reg) in self.data.iter().enumerate() { 
            let sel = bit_string(&from_usize(idx, self.selector_bits));
            writeln!(f, "  [{}]: {}", sel, reg)?;
        }
        Ok(())
    }
}

impl RegisterBank {
    pub fn new(selector_bits: usize, register_bits: usize) -> Result<Self> {
        if selector_bits == 0 { 
            return Err(ConstructionError::ZeroWidth("selector").into());
        }
        if selector_bits > MAX_SELECTOR_BITS { 
            return Err(ConstructionError::SelectorTooWide { 
                what: "selector", bits: selector_bits
            }.into());
        }
        let reg = ShiftRegister::new(register_bits)?;
        Ok(Self { 
            selector_bits,
            data: vec![reg; 1 << selector_bits],
        })
    }

    /// Returns the number of registers in the bank.
    pub fn size(&self) -> usize { self.data.len() }
    pub fn selector_bits(&self) -> usize { self.selector_bits }
    pub fn register_bits(&self) -> usize { self.data[0].len() }

    pub fn iter(&self) -> impl Iterator<Item = &ShiftRegister> { 
        self.data.iter()
    }

    /// Convert a selector into an index. 
    /// Only the first `selector_bits` bits of the selector are considered.
    fn index(&self, selector: &BitSlice) -> Result<usize> {
        if selector.len() < self.selector_bits { 
            return Err(Error::WidthMismatch { 
                expected: self.selector_bits, actual: selector.len()
            });
        }
        Ok(to_usize(&selector[..self.selector_bits]))
    }

    pub fn read(&self, selector: &BitSlice) -> Result<&ShiftRegister> {
        let idx = self.index(selector)?;
        Ok(&self.data[idx])
    }

    pub fn read_mut(&mut self, selector: &BitSlice) 
        -> Result<&mut ShiftRegister> 
    {
        let idx = self.index(selector)?;
        Ok(&mut self.data[idx])
    }

    /// Overwrite the content of the selected register.
    pub fn write(&mut self, selector: &BitSlice, content: &BitSlice) 
        -> Result<()> 
    {
        self.read_mut(selector)?.load(content)
    }
}
