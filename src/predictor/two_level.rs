//! A two-level adaptive predictor covering GAg, GAp, PAg, PAp, SAg and SAs.
//!
//! All six schemes share one state machine. A prediction reads a history 
//! register, forms a pattern table key from it, and reports the 
//! most-significant bit of the counter stored under that key. An update 
//! steps the same counter toward the real outcome and then shifts the 
//! outcome into the history register. The schemes only differ in where the
//! history register comes from and in how the key is formed.

use std::fmt::Write;
use bitvec::prelude::*;
use crate::bit::*;
use crate::branch::Instruction;
use crate::error::*;
use crate::history::*;
use crate::logic::*;
use crate::predictor::*;
use crate::Outcome;

/// Storage for branch history.
#[derive(Clone, Debug)]
enum HistorySource { 
    Global(ShiftRegister),
    PerAddress(RegisterBank),
    PerSet(RegisterBank),
}

/// Hash the address of a branch into a set index.
fn set_index(cfg: &PredictorConfig, inst: &Instruction) -> Result<BitVec> {
    hash(inst.address(), cfg.addr_bits, cfg.set_bits, cfg.hash_mode)
}

/// See the module-level documentation.
#[derive(Clone, Debug)]
pub struct TwoLevelPredictor {
    cfg: PredictorConfig,

    /// Branch history register(s)
    history: HistorySource,

    /// Pattern history table
    pht: PatternTable,

    /// Holds the counter most recently read from or written to the table
    sc: ShiftRegister,
}

impl TwoLevelPredictor {
    pub fn new(cfg: PredictorConfig) -> Result<Self> {
        cfg.validate()?;
        let history = match cfg.scheme.history_scope() { 
            HistoryScope::Global => {
                HistorySource::Global(ShiftRegister::new(cfg.bhr_bits)?)
            },
            HistoryScope::PerAddress => HistorySource::PerAddress(
                RegisterBank::new(cfg.addr_bits, cfg.bhr_bits)?
            ),
            HistoryScope::PerSet => HistorySource::PerSet(
                RegisterBank::new(cfg.set_bits, cfg.bhr_bits)?
            ),
        };
        Ok(Self { 
            cfg,
            history,
            pht: PatternTable::new(cfg.key_bits(), cfg.sc_bits)?,
            sc: ShiftRegister::new(cfg.sc_bits)?,
        })
    }

    pub fn config(&self) -> &PredictorConfig { &self.cfg }
    pub fn table(&self) -> &PatternTable { &self.pht }
    pub fn counter(&self) -> &ShiftRegister { &self.sc }

    /// Every history register, in selector order.
    pub fn history_registers(&self) -> Vec<&ShiftRegister> {
        match &self.history { 
            HistorySource::Global(reg) => vec![reg],
            HistorySource::PerAddress(bank) 
            | HistorySource::PerSet(bank) => bank.iter().collect(),
        }
    }

    /// The history register used for some branch.
    pub fn history(&self, inst: &Instruction) -> Result<&ShiftRegister> {
        match &self.history { 
            HistorySource::Global(reg) => Ok(reg),
            HistorySource::PerAddress(bank) => bank.read(inst.address()),
            HistorySource::PerSet(bank) => bank.read(&set_index(&self.cfg, inst)?),
        }
    }

    fn history_mut(&mut self, inst: &Instruction) 
        -> Result<&mut ShiftRegister> 
    {
        let cfg = self.cfg;
        match &mut self.history { 
            HistorySource::Global(reg) => Ok(reg),
            HistorySource::PerAddress(bank) => bank.read_mut(inst.address()),
            HistorySource::PerSet(bank) => bank.read_mut(&set_index(&cfg, inst)?),
        }
    }

    /// Form the pattern table key for a branch from the current history.
    pub fn table_key(&self, inst: &Instruction) -> Result<BitVec> {
        let history = self.history(inst)?.read();
        match self.cfg.scheme.table_scope() { 
            TableScope::Global => Ok(history.to_bitvec()),
            TableScope::PerAddress => {
                concat(inst.address(), self.cfg.addr_bits, history)
            },
            TableScope::PerSet => {
                let set = set_index(&self.cfg, inst)?;
                concat(&set, self.cfg.set_bits, history)
            },
        }
    }

    /// Read the counter for a key, creating a zeroed counter on first touch.
    fn lookup(&mut self, key: &BitSlice) -> Result<BitVec> {
        let zero = bitvec![0; self.cfg.sc_bits];
        self.pht.set_default(key, &zero)?;
        Ok(self.pht.get(key)?.to_bitvec())
    }
}

impl BranchPredictor for TwoLevelPredictor {
    fn name(&self) -> &'static str { self.cfg.scheme.name() }

    fn predict(&mut self, inst: &Instruction) -> Result<Outcome> {
        let key = self.table_key(inst)?;
        let ctr = self.lookup(&key)?;
        self.sc.load(&ctr)?;
        Ok(Outcome::from(bool::from(self.sc.msb())))
    }

    fn update(&mut self, inst: &Instruction, outcome: Outcome) -> Result<()> {
        // The key must come from history as it was before this outcome
        let key = self.table_key(inst)?;
        let ctr = self.lookup(&key)?;
        let next = count(&ctr, outcome.into(), CountMode::Saturating);
        self.pht.put(&key, &next)?;
        self.sc.load(&next)?;
        self.history_mut(inst)?.insert(Bit::from(outcome));
        Ok(())
    }

    fn monitor(&self) -> String {
        let pht = match self.cfg.scheme.table_scope() { 
            TableScope::Global => "PHT",
            TableScope::PerAddress => "PAPHT",
            TableScope::PerSet => "PSPHT",
        };
        let mut res = String::new();
        let _ = writeln!(res, "{} predictor snapshot:", self.name());
        let _ = match &self.history { 
            HistorySource::Global(reg) => writeln!(res, "BHR: {reg}"),
            HistorySource::PerAddress(bank) => write!(res, "PABHR:\n{bank}"),
            HistorySource::PerSet(bank) => write!(res, "PSBHR:\n{bank}"),
        };
        let _ = writeln!(res, "SC: {}", self.sc);
        let _ = write!(res, "{pht}:\n{}", self.pht);
        res
    }
}
