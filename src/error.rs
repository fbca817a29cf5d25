//! Error types shared by every component.

use std::fmt;
use bitvec::prelude::*;
use crate::bit::bit_string;

/// Reasons a register, table or predictor could not be constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructionError {
    /// Some width parameter was zero
    ZeroWidth(&'static str),
    /// A selector is too wide to allocate one register per index
    SelectorTooWide { what: &'static str, bits: usize },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWidth(what) => write!(f, "{what} width must be non-zero"),
            Self::SelectorTooWide { what, bits } => {
                write!(f, "{what} width of {bits} bits exceeds the supported maximum")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Invalid construction parameters
    Construction(ConstructionError),
    /// A value does not have the width fixed for its destination
    WidthMismatch { expected: usize, actual: usize },
    /// A table lookup on a key that was never seeded
    ///
    /// Every lookup is expected to be preceded by a default insertion, so 
    /// this indicates misuse of the table rather than a runtime condition.
    KeyNotFound(BitVec),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<ConstructionError> for Error {
    fn from(e: ConstructionError) -> Self { Self::Construction(e) }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construction(e) => write!(f, "construction failed: {e}"),
            Self::WidthMismatch { expected, actual } => {
                write!(f, "expected {expected} bits, got {actual}")
            }
            Self::KeyNotFound(key) => write!(f, "no entry for key {}", bit_string(key)),
        }
    }
}

/// Fail unless `actual` equals the fixed width `expected`.
pub(crate) fn check_width(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::WidthMismatch { expected, actual })
    }
}

#[cfg(test)]
mod test { 
    use super::*;

    #[test]
    fn display() {
        let e = Error::WidthMismatch { expected: 4, actual: 2 };
        assert_eq!(e.to_string(), "expected 4 bits, got 2");
        let e = Error::KeyNotFound(bitvec![0, 1, 1]);
        assert_eq!(e.to_string(), "no entry for key 011");
        let e = Error::from(ConstructionError::ZeroWidth("BHR"));
        assert_eq!(e.to_string(), "construction failed: BHR width must be non-zero");
    }
}
