use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeEntry {
    pub label: String,
    pub chance_percent: f64, // independent trial, 0..=100
    pub value: f64,
}

impl PrizeEntry {
    pub fn new(label: impl Into<String>, chance_percent: f64, value: f64) -> Self {
        Self {
            label: label.into(),
            chance_percent,
            value,
        }
    }
}

/// Paid out when no table entry triggers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackPrize {
    pub label: String,
    pub value: f64,
}

impl FallbackPrize {
    pub fn standard() -> Self {
        Self {
            label: "1.5 USDT".into(),
            value: 1.5,
        }
    }

    pub fn to_entry(&self) -> PrizeEntry {
        PrizeEntry::new(self.label.clone(), 0.0, self.value)
    }
}

/// Ordered prize table. Order is priority: see [`select_prize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeTable(pub Vec<PrizeEntry>);

impl PrizeTable {
    /// Rarest first, so the jackpot gets its trial before anything can shadow it.
    pub fn standard() -> Self {
        Self(vec![
            PrizeEntry::new("100 USDT", 0.01, 100.0),
            PrizeEntry::new("50 USDT", 1.0, 50.0),
            PrizeEntry::new("20 USDT", 2.0, 20.0),
            PrizeEntry::new("10 USDT", 5.0, 10.0),
            PrizeEntry::new("5 USDT", 10.0, 5.0),
            PrizeEntry::new("2 USDT", 30.0, 2.0),
            PrizeEntry::new("1.5 USDT", 80.0, 1.5),
        ])
    }

    pub fn entries(&self) -> &[PrizeEntry] {
        &self.0
    }

    /// Real win probabilities under first-match-wins evaluation:
    /// `p_i = c_i * prod_{j<i}(1 - c_j)`, the fallback taking what is left.
    pub fn effective_odds(&self, fallback: &FallbackPrize) -> OddsReport {
        let mut reach = 1.0; // probability that evaluation gets to the current entry
        let mut entries = Vec::with_capacity(self.0.len());
        let mut expected_value = 0.0;
        for e in &self.0 {
            let c = (e.chance_percent / 100.0).clamp(0.0, 1.0);
            let probability = reach * c;
            reach *= 1.0 - c;
            expected_value += probability * e.value;
            entries.push(EntryOdds {
                label: e.label.clone(),
                value: e.value,
                probability,
            });
        }
        expected_value += reach * fallback.value;
        OddsReport {
            entries,
            fallback_probability: reach,
            expected_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryOdds {
    pub label: String,
    pub value: f64,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsReport {
    pub entries: Vec<EntryOdds>,
    pub fallback_probability: f64,
    pub expected_value: f64,
}

/// Pick one prize.
///
/// Each entry, in table order, gets its own fresh draw in [0,100) and wins when the
/// draw is below its `chance_percent`; the first winner is returned without drawing
/// for the rest. This is NOT a weighted choice over a partition: percentages are not
/// normalized and an early entry shadows later ones, so table order is part of the
/// odds. When nothing wins the fallback is returned (with a chance of 0).
pub fn select_prize<R: RandomSource + ?Sized>(
    table: &PrizeTable,
    fallback: &FallbackPrize,
    rng: &mut R,
) -> PrizeEntry {
    for entry in &table.0 {
        let draw = rng.next_unit() * 100.0;
        if draw < entry.chance_percent {
            return entry.clone();
        }
    }
    fallback.to_entry()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    fn three_way() -> PrizeTable {
        PrizeTable(vec![
            PrizeEntry::new("A", 50.0, 3.0),
            PrizeEntry::new("B", 50.0, 2.0),
            PrizeEntry::new("C", 50.0, 1.0),
        ])
    }

    #[test]
    fn zero_draw_wins_first_entry() {
        let mut rng = ScriptedSource::constant(0.0);
        let won = select_prize(&PrizeTable::standard(), &FallbackPrize::standard(), &mut rng);
        assert_eq!(won.label, "100 USDT");
        assert_eq!(won.value, 100.0);
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn all_trials_fail_returns_fallback() {
        let table = PrizeTable(
            PrizeTable::standard()
                .0
                .into_iter()
                .map(|e| PrizeEntry { chance_percent: 0.0, ..e })
                .collect(),
        );
        let fallback = FallbackPrize::standard();
        // even a 0.0 draw cannot beat a 0% chance
        let mut rng = ScriptedSource::constant(0.0);
        assert_eq!(select_prize(&table, &fallback, &mut rng), fallback.to_entry());
        assert_eq!(rng.consumed(), table.0.len());
    }

    #[test]
    fn high_draws_fall_through_standard_table() {
        let mut rng = ScriptedSource::constant(0.999);
        let won = select_prize(&PrizeTable::standard(), &FallbackPrize::standard(), &mut rng);
        assert_eq!(won.label, "1.5 USDT");
        assert_eq!(won.chance_percent, 0.0);
    }

    #[test]
    fn first_match_wins_regardless_of_later_draws() {
        let table = three_way();
        let fallback = FallbackPrize::standard();
        // A loses (90 >= 50), B wins (0 < 50); C would also win but is never drawn
        let mut rng = ScriptedSource::new(vec![0.9, 0.0, 0.0]);
        let won = select_prize(&table, &fallback, &mut rng);
        assert_eq!(won.label, "B");
        assert_eq!(rng.consumed(), 2);

        let mut rng = ScriptedSource::new(vec![0.0, 0.0, 0.0]);
        assert_eq!(select_prize(&table, &fallback, &mut rng).label, "A");
    }

    #[test]
    fn effective_odds_follow_table_order() {
        let report = three_way().effective_odds(&FallbackPrize::standard());
        let probs: Vec<f64> = report.entries.iter().map(|e| e.probability).collect();
        assert_eq!(probs, vec![0.5, 0.25, 0.125]);
        assert_eq!(report.fallback_probability, 0.125);
        assert!((report.expected_value - (1.5 + 0.5 + 0.125 + 0.1875)).abs() < 1e-12);
    }

    #[test]
    fn standard_odds_sum_to_one() {
        let report = PrizeTable::standard().effective_odds(&FallbackPrize::standard());
        let total: f64 =
            report.entries.iter().map(|e| e.probability).sum::<f64>() + report.fallback_probability;
        assert!((total - 1.0).abs() < 1e-12);
        assert!((report.entries[0].probability - 0.0001).abs() < 1e-15);
        // the 80% entry only sees what the six before it left over
        assert!(report.entries[6].probability < 0.5);
    }
}
