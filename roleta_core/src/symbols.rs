use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

/// Trials spent by the random search before falling back to the floor triple.
pub const SEARCH_ATTEMPTS: usize = 100;

/// Tolerance used when comparing a reel sum with the prize value.
pub const SUM_TOLERANCE: f64 = 0.01;

pub type Reels = [f64; 3];

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn reels_sum(reels: &Reels) -> f64 {
    reels.iter().sum()
}

/// Face values a reel may show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSet(Vec<f64>);

impl SymbolSet {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self(values.into())
    }

    pub fn standard() -> Self {
        Self(vec![
            0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 10.0, 20.0, 25.0, 50.0,
        ])
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, v: f64) -> bool {
        self.0.iter().any(|s| *s == v)
    }

    pub fn min(&self) -> Option<f64> {
        self.0.iter().copied().reduce(f64::min)
    }

    /// Three copies of the smallest symbol. An empty set yields zeros.
    pub fn floor_triple(&self) -> Reels {
        let m = self.min().unwrap_or(0.0);
        [m, m, m]
    }

    /// Smallest total three reels can show.
    pub fn floor(&self) -> f64 {
        reels_sum(&self.floor_triple())
    }

    fn pick<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        self.0[rng.next_index(self.0.len())]
    }
}

/// Precomputed triples for targets that must never depend on the random search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedDecompositions(Vec<(f64, Reels)>);

impl FixedDecompositions {
    pub fn new(entries: impl Into<Vec<(f64, Reels)>>) -> Self {
        Self(entries.into())
    }

    pub fn standard() -> Self {
        Self(vec![
            (1.5, [0.5, 0.5, 0.5]),
            (2.0, [1.0, 0.5, 0.5]),
            (5.0, [2.0, 2.0, 1.0]),
            (10.0, [5.0, 2.5, 2.5]),
            (20.0, [10.0, 5.0, 5.0]),
            (50.0, [20.0, 20.0, 10.0]),
            (100.0, [50.0, 25.0, 25.0]),
        ])
    }

    /// Exact float match on the stored key.
    pub fn get(&self, target: f64) -> Option<Reels> {
        self.0
            .iter()
            .find(|(key, _)| *key == target)
            .map(|(_, reels)| *reels)
    }

    pub fn entries(&self) -> &[(f64, Reels)] {
        &self.0
    }
}

/// Split `target` into three symbols summing to it. The result is not shuffled.
///
/// Fixed table first, then the floor shortcut for targets below `3 * min`, then up to
/// [`SEARCH_ATTEMPTS`] random pairs whose remainder must itself be a symbol. When all
/// of that fails the floor triple is returned, so this never fails.
pub fn decompose<R: RandomSource + ?Sized>(
    target: f64,
    symbols: &SymbolSet,
    fixed: &FixedDecompositions,
    rng: &mut R,
) -> Reels {
    if let Some(reels) = fixed.get(target) {
        return reels;
    }

    if symbols.is_empty() || target.is_nan() || target < symbols.floor() {
        tracing::debug!(value = target, "below floor, using floor triple");
        return symbols.floor_triple();
    }

    for _ in 0..SEARCH_ATTEMPTS {
        let v1 = symbols.pick(rng);
        let v2 = symbols.pick(rng);
        let needed = round2(target - v1 - v2);
        if symbols.contains(needed) {
            return [v1, v2, needed];
        }
    }

    tracing::warn!(
        value = target,
        attempts = SEARCH_ATTEMPTS,
        "no decomposition found, using floor triple"
    );
    symbols.floor_triple()
}
