//! Bracket records that make up a tax curve

use serde::{Deserialize, Serialize};

/// Per-schedule result at one absolute income
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxBundle {
    /// Rate in force at the evaluated income
    pub rate: f64,
    /// Rate added at exactly this point (the jump, for threshold schedules)
    pub marginal: f64,
    /// Cumulative dollars owed under the schedule at the evaluated income
    pub amount: f64,
}

impl TaxBundle {
    pub fn new(rate: f64, marginal: f64, amount: f64) -> Self {
        Self { rate, marginal, amount }
    }

    /// Build from a `(rate, marginal)` pair and an amount
    pub fn from_rates((rate, marginal): (f64, f64), amount: f64) -> Self {
        Self { rate, marginal, amount }
    }
}

/// A conversion interval `[lower, upper]` with the four schedules evaluated
/// at its upper end
///
/// `lower == upper` marks a zero-width point, used for capital-gains and
/// NIT jumps and for the zero-conversion baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower: f64,
    pub upper: f64,

    pub state: TaxBundle,
    pub federal: TaxBundle,
    pub nit: TaxBundle,
    pub longterm: TaxBundle,
}

impl TaxBracket {
    /// Dollars owed across all four schedules
    pub fn total_tax(&self) -> f64 {
        self.state.amount + self.federal.amount + self.nit.amount + self.longterm.amount
    }

    /// Dollars owed under the two threshold schedules
    pub fn total_capital_tax(&self) -> f64 {
        self.nit.amount + self.longterm.amount
    }

    /// Federal plus state rate
    ///
    /// This is a rate used to label and compare intervals, not a liability.
    pub fn combined_marginal_rate(&self) -> f64 {
        self.federal.rate + self.state.rate
    }

    pub fn is_point(&self) -> bool {
        self.lower == self.upper
    }

    /// True when the federal and state rates match, i.e. the two brackets
    /// describe the same income tier combination
    pub fn same_income_rates(&self, other: &TaxBracket) -> bool {
        self.state.rate == other.state.rate && self.federal.rate == other.federal.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> TaxBracket {
        TaxBracket {
            lower: 1_000.0,
            upper: 5_000.0,
            state: TaxBundle::new(0.05, 0.05, 200.0),
            federal: TaxBundle::new(0.12, 0.12, 700.0),
            nit: TaxBundle::from_rates((0.038, 0.0), 38.0),
            longterm: TaxBundle::new(0.15, 0.15, 150.0),
        }
    }

    #[test]
    fn test_totals() {
        let bracket = sample();
        assert_relative_eq!(bracket.total_tax(), 1_088.0);
        assert_relative_eq!(bracket.total_capital_tax(), 188.0);
        assert_relative_eq!(bracket.combined_marginal_rate(), 0.17);
        assert!(!bracket.is_point());
    }

    #[test]
    fn test_same_income_rates_ignores_capital_bundles() {
        let a = sample();
        let mut b = sample();
        b.nit = TaxBundle::default();
        b.upper = 9_000.0;
        assert!(a.same_income_rates(&b));
        b.state.rate = 0.07;
        assert!(!a.same_income_rates(&b));
    }
}
