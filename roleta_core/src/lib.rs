pub mod engine;
pub mod error;
pub mod prizes;
pub mod rng;
pub mod symbols;

pub use crate::engine::{
    shuffle_reels, spin_once, spin_with_seeds, verify_spin, EngineParams, SpinOutcome,
};
pub use crate::error::ParamsError;
pub use crate::prizes::{
    select_prize, EntryOdds, FallbackPrize, OddsReport, PrizeEntry, PrizeTable,
};
pub use crate::rng::{derive_hash_hex, ProvablyFairSource, RandomSource, RngSource, ScriptedSource};
pub use crate::symbols::{
    decompose, round2, FixedDecompositions, Reels, SymbolSet, SEARCH_ATTEMPTS, SUM_TOLERANCE,
};
