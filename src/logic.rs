//! Stateless combinational logic: counters and address hashing.

use bitvec::prelude::*;
use crate::error::*;

/// Policy applied when stepping a counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountMode { 
    /// Clamp at zero and at the all-ones value
    Saturating,
}

/// Strategy used to reduce an address to a set index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashMode { 
    /// Fold the address onto the output with XOR
    Xor,
}

/// Step a counter by one. 
///
/// `counter` is read as an unsigned number with the most-significant bit at
/// index 0. The result has the same width as the input.
pub fn count(counter: &BitSlice, incremented: bool, mode: CountMode) -> BitVec {
    let mut res = counter.to_bitvec();
    match mode { 
        CountMode::Saturating => {
            // Ripple from the least-significant end: the first bit that 
            // differs from the carry value absorbs it.
            let at_limit = if incremented { res.all() } else { res.not_any() };
            if at_limit { 
                return res;
            }
            for idx in (0..res.len()).rev() {
                let bit = res[idx];
                res.set(idx, !bit);
                if bit != incremented { 
                    break;
                }
            }
        },
    }
    res
}

/// Reduce the first `prefix_bits` bits of `address` to `output_bits` bits. 
///
/// With [HashMode::Xor], address bit `i` is XOR'ed into output bit 
/// `i % output_bits`. Output bits that receive no address bit are zero.
pub fn hash(address: &BitSlice, prefix_bits: usize, output_bits: usize, 
    mode: HashMode) -> Result<BitVec>
{
    if output_bits == 0 { 
        return Err(ConstructionError::ZeroWidth("hash output").into());
    }
    if address.len() < prefix_bits { 
        return Err(Error::WidthMismatch { 
            expected: prefix_bits, actual: address.len()
        });
    }
    let mut res = bitvec![0; output_bits];
    match mode { 
        HashMode::Xor => {
            for (idx, bit) in address[..prefix_bits].iter().by_vals().enumerate() {
                let j = idx % output_bits;
                let val = res[j] ^ bit;
                res.set(j, val);
            }
        },
    }
    Ok(res)
}

/// Build a table key from the first `prefix_bits` bits of `prefix` followed
/// immediately by all of `history`. 
///
/// The key is exactly `prefix_bits + history.len()` wide, no matter how 
/// wide `prefix` is.
pub fn concat(prefix: &BitSlice, prefix_bits: usize, history: &BitSlice) 
    -> Result<BitVec>
{
    if prefix.len() < prefix_bits { 
        return Err(Error::WidthMismatch { 
            expected: prefix_bits, actual: prefix.len()
        });
    }
    let mut res = BitVec::with_capacity(prefix_bits + history.len());
    res.extend_from_bitslice(&prefix[..prefix_bits]);
    res.extend_from_bitslice(history);
    Ok(res)
}
