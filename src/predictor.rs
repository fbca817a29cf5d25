//! Two-level adaptive branch predictors. 

pub mod table;
pub mod two_level;

pub use table::*;
pub use two_level::*;

use std::str::FromStr;
use crate::branch::Instruction;
use crate::error::*;
use crate::logic::HashMode;
use crate::Outcome;

/// Interface to a predictor whose state changes only when the correct 
/// outcome of a branch is reported.
pub trait BranchPredictor { 
    fn name(&self) -> &'static str;

    /// Return the predicted outcome for a branch.
    fn predict(&mut self, inst: &Instruction) -> Result<Outcome>;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, inst: &Instruction, outcome: Outcome) -> Result<()>;

    /// Render the contents of every register and table.
    fn monitor(&self) -> String;
}

/// Where branch history is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryScope { 
    /// A single register shared by every branch
    Global,
    /// One register per branch address
    PerAddress,
    /// One register per set of hashed addresses
    PerSet,
}

/// Which bits, besides history, select a pattern table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableScope { 
    /// History alone
    Global,
    /// Address bits followed by history
    PerAddress,
    /// Set index followed by history
    PerSet,
}

/// The six classic two-level schemes. 
///
/// The first letter names the history scope (Global, Per-address, per-Set),
/// the last letter names the pattern table scope. 
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheme { GAg, GAp, PAg, PAp, SAg, SAs }

impl Scheme {
    pub const ALL: [Scheme; 6] = [
        Scheme::GAg, Scheme::GAp, Scheme::PAg, 
        Scheme::PAp, Scheme::SAg, Scheme::SAs,
    ];

    pub fn name(&self) -> &'static str {
        match self { 
            Self::GAg => "GAg",
            Self::GAp => "GAp",
            Self::PAg => "PAg",
            Self::PAp => "PAp",
            Self::SAg => "SAg",
            Self::SAs => "SAs",
        }
    }

    pub fn history_scope(&self) -> HistoryScope {
        match self { 
            Self::GAg | Self::GAp => HistoryScope::Global,
            Self::PAg | Self::PAp => HistoryScope::PerAddress,
            Self::SAg | Self::SAs => HistoryScope::PerSet,
        }
    }

    pub fn table_scope(&self) -> TableScope {
        match self { 
            Self::GAg | Self::PAg | Self::SAg => TableScope::Global,
            Self::GAp | Self::PAp => TableScope::PerAddress,
            Self::SAs => TableScope::PerSet,
        }
    }

    /// Whether the scheme reads any bits of the branch address.
    pub fn uses_address(&self) -> bool {
        self.history_scope() != HistoryScope::Global 
            || self.table_scope() != TableScope::Global
    }

    /// Whether the scheme hashes addresses into sets.
    pub fn uses_sets(&self) -> bool {
        self.history_scope() == HistoryScope::PerSet
            || self.table_scope() == TableScope::PerSet
    }

    /// The usual textbook sizing for this scheme.
    pub fn default_config(&self) -> PredictorConfig {
        match self { 
            Self::GAg => PredictorConfig::gag(4, 2),
            Self::GAp => PredictorConfig::gap(4, 2, 8),
            Self::PAg => PredictorConfig::pag(4, 2, 8),
            Self::PAp => PredictorConfig::pap(4, 2, 8),
            Self::SAg => PredictorConfig::sag(4, 2, 8, 4),
            Self::SAs => PredictorConfig::sas(4, 2, 8, 4, HashMode::Xor),
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Scheme {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL.iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown scheme '{s}'"))
    }
}

/// Configuration for building a [TwoLevelPredictor].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PredictorConfig {
    pub scheme: Scheme,

    /// Width of each branch history register
    pub bhr_bits: usize,

    /// Width of each saturating counter
    pub sc_bits: usize,

    /// Number of low-order address bits used to select a register, to form 
    /// a table key, or to feed the set hash
    pub addr_bits: usize,

    /// Width of a set index (per-set schemes only)
    pub set_bits: usize,

    pub hash_mode: HashMode,
}

impl PredictorConfig {
    pub fn gag(bhr_bits: usize, sc_bits: usize) -> Self {
        Self { 
            scheme: Scheme::GAg, bhr_bits, sc_bits, 
            addr_bits: 0, set_bits: 0, hash_mode: HashMode::Xor 
        }
    }
    pub fn gap(bhr_bits: usize, sc_bits: usize, addr_bits: usize) -> Self {
        Self { scheme: Scheme::GAp, addr_bits, ..Self::gag(bhr_bits, sc_bits) }
    }
    pub fn pag(bhr_bits: usize, sc_bits: usize, addr_bits: usize) -> Self {
        Self { scheme: Scheme::PAg, addr_bits, ..Self::gag(bhr_bits, sc_bits) }
    }
    pub fn pap(bhr_bits: usize, sc_bits: usize, addr_bits: usize) -> Self {
        Self { scheme: Scheme::PAp, addr_bits, ..Self::gag(bhr_bits, sc_bits) }
    }
    pub fn sag(bhr_bits: usize, sc_bits: usize, addr_bits: usize, 
        set_bits: usize) -> Self 
    {
        Self { 
            scheme: Scheme::SAg, addr_bits, set_bits, 
            ..Self::gag(bhr_bits, sc_bits) 
        }
    }
    pub fn sas(bhr_bits: usize, sc_bits: usize, addr_bits: usize, 
        set_bits: usize, hash_mode: HashMode) -> Self 
    {
        Self { 
            scheme: Scheme::SAs, addr_bits, set_bits, hash_mode,
            ..Self::gag(bhr_bits, sc_bits) 
        }
    }

    /// Width of the keys used to index the pattern table.
    pub fn key_bits(&self) -> usize {
        match self.scheme.table_scope() { 
            TableScope::Global => self.bhr_bits,
            TableScope::PerAddress => self.addr_bits + self.bhr_bits,
            TableScope::PerSet => self.set_bits + self.bhr_bits,
        }
    }

    /// Reject any width that the scheme depends on being zero.
    pub fn validate(&self) -> Result<()> {
        if self.bhr_bits == 0 { 
            return Err(ConstructionError::ZeroWidth("BHR").into());
        }
        if self.sc_bits == 0 { 
            return Err(ConstructionError::ZeroWidth("SC").into());
        }
        if self.scheme.uses_address() && self.addr_bits == 0 { 
            return Err(ConstructionError::ZeroWidth("address").into());
        }
        if self.scheme.uses_sets() && self.set_bits == 0 { 
            return Err(ConstructionError::ZeroWidth("set").into());
        }
        Ok(())
    }

    pub fn build(self) -> Result<TwoLevelPredictor> {
        TwoLevelPredictor::new(self)
    }
}

impl Default for PredictorConfig {
    fn default() -> Self { Scheme::GAg.default_config() }
}
