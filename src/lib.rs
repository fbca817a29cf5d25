
pub mod bit;
pub mod error;
pub mod branch;
pub mod history;
pub mod logic;
pub mod predictor;

pub use bit::*;
pub use error::*;
pub use branch::*;
pub use history::*;
pub use logic::*;
pub use predictor::*;

/// A branch outcome. 
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome { N, T }
impl std::ops::Not for Outcome { 
    type Output = Self;
    fn not(self) -> Self { 
        match self { 
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}
impl From<bool> for Outcome {
    fn from(x: bool) -> Self { 
        match x { 
            true => Self::T,
            false => Self::N 
        }
    }
}
impl From<Outcome> for bool {
    fn from(x: Outcome) -> Self { 
        match x { 
            Outcome::T => true,
            Outcome::N => false,
        }
    }
}
impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self { 
            Self::T => write!(f, "TAKEN"),
            Self::N => write!(f, "NOT_TAKEN"),
        }
    }
}

