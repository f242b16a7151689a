use thiserror::Error;

/// Rejected game data. Spins themselves never fail; only building the parameters can.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    #[error("symbol set is empty")]
    EmptySymbols,
    #[error("prize {label:?}: chance {chance}% is outside 0..=100")]
    InvalidChance { label: String, chance: f64 },
    #[error("prize {label:?}: value {value} must be finite and non-negative")]
    InvalidValue { label: String, value: f64 },
    #[error("decomposition of {target}: {part} is not a reel symbol")]
    NotASymbol { target: f64, part: f64 },
    #[error("decomposition of {target}: parts sum to {sum}")]
    SumMismatch { target: f64, sum: f64 },
    #[error("prize {label:?}: value {value} has no fixed decomposition and is above the floor")]
    Undecomposable { label: String, value: f64 },
}
