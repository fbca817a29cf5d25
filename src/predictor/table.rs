//! A pattern history table: bit-vector keys mapped to counter values.

use std::collections::HashMap;
use bitvec::prelude::*;
use itertools::*;
use crate::bit::*;
use crate::error::*;

/// A table of saturating counters, created lazily on first touch. 
///
/// Keys and values each have a width fixed at construction. 
#[derive(Clone, Debug)]
pub struct PatternTable { 
    /// Width of every key
    key_bits: usize,

    /// Width of every stored value
    value_bits: usize,

    data: HashMap<BitVec, BitVec>,
}

impl std::fmt::Display for PatternTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (key, val) in self.data.iter().sorted() { 
            writeln!(f, "  {}: {}", bit_string(key), bit_string(val))?;
        }
        Ok(())
    }
}

impl PatternTable {
    pub fn new(key_bits: usize, value_bits: usize) -> Result<Self> { 
        if key_bits == 0 { 
            return Err(ConstructionError::ZeroWidth("table key").into());
        }
        if value_bits == 0 { 
            return Err(ConstructionError::ZeroWidth("table value").into());
        }
        Ok(Self { key_bits, value_bits, data: HashMap::new() })
    }

    pub fn key_bits(&self) -> usize { self.key_bits }
    pub fn value_bits(&self) -> usize { self.value_bits }

    /// Returns the number of entries that have been touched.
    pub fn len(&self) -> usize { self.data.len() }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Iterate over all entries, ordered by key.
    pub fn entries(&self) -> impl Iterator<Item = (&BitSlice, &BitSlice)> { 
        self.data.iter().sorted()
            .map(|(k, v)| (k.as_bitslice(), v.as_bitslice()))
    }

    fn check(&self, key: &BitSlice, value: Option<&BitSlice>) -> Result<()> { 
        check_width(self.key_bits, key.len())?;
        if let Some(value) = value { 
            check_width(self.value_bits, value.len())?;
        }
        Ok(())
    }

    /// Insert `value` unless the key already has an entry.
    pub fn set_default(&mut self, key: &BitSlice, value: &BitSlice) 
        -> Result<()> 
    {
        self.check(key, Some(value))?;
        self.data.entry(key.to_bitvec()).or_insert_with(|| value.to_bitvec());
        Ok(())
    }

    /// Insert or overwrite the entry for a key. 
    pub fn put(&mut self, key: &BitSlice, value: &BitSlice) -> Result<()> {
        self.check(key, Some(value))?;
        self.data.insert(key.to_bitvec(), value.to_bitvec());
        Ok(())
    }

    pub fn get(&self, key: &BitSlice) -> Result<&BitSlice> {
        self.check(key, None)?;
        self.data.get(key)
            .map(|v| v.as_bitslice())
            .ok_or_else(|| Error::KeyNotFound(key.to_bitvec()))
    }
}

#[cfg(test)]
mod test { 
    use super::*;

    #[test]
    fn set_default_only_fills_missing() {
        let mut t = PatternTable::new(2, 2).unwrap();
        t.set_default(bits![0, 1], bits![0, 0]).unwrap();
        assert_eq!(t.get(bits![0, 1]).unwrap(), bits![0, 0]);

        t.put(bits![0, 1], bits![1, 0]).unwrap();
        t.set_default(bits![0, 1], bits![0, 0]).unwrap();
        assert_eq!(t.get(bits![0, 1]).unwrap(), bits![1, 0]);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn get_unseeded_key() {
        let mut t = PatternTable::new(3, 2).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.get(bits![1, 1, 0]), 
            Err(Error::KeyNotFound(bitvec![1, 1, 0])));
        t.put(bits![1, 1, 0], bits![0, 1]).unwrap();
        assert_eq!(t.get(bits![1, 1, 0]).unwrap(), bits![0, 1]);
    }

    #[test]
    fn widths_are_enforced() {
        let mut t = PatternTable::new(3, 2).unwrap();
        assert_eq!(t.put(bits![1, 1], bits![0, 1]), 
            Err(Error::WidthMismatch { expected: 3, actual: 2 }));
        assert_eq!(t.put(bits![1, 1, 1], bits![0, 1, 1]), 
            Err(Error::WidthMismatch { expected: 2, actual: 3 }));
        assert!(t.set_default(bits![1, 1, 1], bits![0]).is_err());
        assert!(t.is_empty());
        assert!(matches!(PatternTable::new(0, 2), Err(Error::Construction(_))));
        assert!(matches!(PatternTable::new(2, 0), Err(Error::Construction(_))));
    }

    #[test]
    fn display_is_sorted() {
        let mut t = PatternTable::new(2, 2).unwrap();
        t.put(bits![1, 1], bits![0, 1]).unwrap();
        t.put(bits![0, 0], bits![1, 1]).unwrap();
        t.put(bits![0, 1], bits![0, 0]).unwrap();
        assert_eq!(t.to_string(), "  00: 11\n  01: 00\n  11: 01\n");
        let keys: Vec<_> = t.entries().map(|(k, _)| bit_string(k)).collect();
        assert_eq!(keys, ["00", "01", "11"]);
    }
}
