use serde::{Deserialize, Serialize};

use crate::{
    error::ParamsError,
    prizes::{select_prize, FallbackPrize, PrizeTable},
    rng::{ProvablyFairSource, RandomSource},
    symbols::{decompose, reels_sum, FixedDecompositions, Reels, SymbolSet, SUM_TOLERANCE},
};

/// Immutable game data, built once at startup and handed to every spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineParams {
    pub prizes: PrizeTable,
    pub fallback: FallbackPrize,
    pub symbols: SymbolSet,
    pub decompositions: FixedDecompositions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub total_label: String,
    pub total_value: f64,
    pub reels: Reels, // display order
}

impl EngineParams {
    pub fn standard() -> Self {
        Self {
            prizes: PrizeTable::standard(),
            fallback: FallbackPrize::standard(),
            symbols: SymbolSet::standard(),
            decompositions: FixedDecompositions::standard(),
        }
    }

    /// Build and validate substituted game data.
    pub fn new(
        prizes: PrizeTable,
        fallback: FallbackPrize,
        symbols: SymbolSet,
        decompositions: FixedDecompositions,
    ) -> Result<Self, ParamsError> {
        let params = Self {
            prizes,
            fallback,
            symbols,
            decompositions,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks that every payable value decomposes without touching the random search:
    /// each prize and the fallback is either a fixed key or below the floor.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.symbols.is_empty() {
            return Err(ParamsError::EmptySymbols);
        }

        for (target, reels) in self.decompositions.entries() {
            if let Some(part) = reels.iter().copied().find(|p| !self.symbols.contains(*p)) {
                return Err(ParamsError::NotASymbol {
                    target: *target,
                    part,
                });
            }
            let sum = reels_sum(reels);
            if (sum - target).abs() > SUM_TOLERANCE {
                return Err(ParamsError::SumMismatch {
                    target: *target,
                    sum,
                });
            }
        }

        let floor = self.symbols.floor();
        let payable = self
            .prizes
            .entries()
            .iter()
            .map(|e| (&e.label, e.value, Some(e.chance_percent)))
            .chain(std::iter::once((
                &self.fallback.label,
                self.fallback.value,
                None,
            )));
        for (label, value, chance) in payable {
            if let Some(chance) = chance {
                if !(0.0..=100.0).contains(&chance) {
                    return Err(ParamsError::InvalidChance {
                        label: label.clone(),
                        chance,
                    });
                }
            }
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::InvalidValue {
                    label: label.clone(),
                    value,
                });
            }
            if self.decompositions.get(value).is_none() && value >= floor {
                return Err(ParamsError::Undecomposable {
                    label: label.clone(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Uniform Fisher-Yates over the three reels.
pub fn shuffle_reels<R: RandomSource + ?Sized>(reels: &mut Reels, rng: &mut R) {
    for i in (1..reels.len()).rev() {
        let j = rng.next_index(i + 1);
        reels.swap(i, j);
    }
}

pub fn spin_once<R: RandomSource + ?Sized>(rng: &mut R, params: &EngineParams) -> SpinOutcome {
    let prize = select_prize(&params.prizes, &params.fallback, rng);
    let mut reels = decompose(prize.value, &params.symbols, &params.decompositions, rng);
    shuffle_reels(&mut reels, rng);
    SpinOutcome {
        total_label: prize.label,
        total_value: prize.value,
        reels,
    }
}

/// Convenience: perform a spin off the provably-fair stream for these seeds.
pub fn spin_with_seeds(
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
    params: &EngineParams,
) -> SpinOutcome {
    let mut rng = ProvablyFairSource::new(server_seed, client_seed, nonce);
    spin_once(&mut rng, params)
}

/// Verify that an outcome is exactly what the seeds produce.
pub fn verify_spin(
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
    params: &EngineParams,
    expected: &SpinOutcome,
) -> bool {
    spin_with_seeds(server_seed, client_seed, nonce, params) == *expected
}
