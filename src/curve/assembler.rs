//! Curve assembly: keypoints from all four schedules turned into brackets

use log::debug;
use serde::{Deserialize, Serialize};

use super::bracket::TaxBracket;
use super::profile::TaxProfile;
use crate::schedule::{merge_keypoints, unique_keypoints};

/// Ordered brackets covering a conversion range
pub type Curve = Vec<TaxBracket>;

/// The three curves and the baseline computed for one profile and ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxCurve {
    /// Federal/state intervals with equal-rate neighbours coalesced
    pub income_only: Curve,
    /// One zero-width bracket per NIT or long-term gains jump
    pub capital_taxes: Curve,
    /// Income-only boundaries merged with every capital keypoint, not coalesced
    pub entire: Curve,
    /// State at zero conversion
    pub initial_tax: TaxBracket,
    pub max_conversion: f64,
}

impl TaxCurve {
    /// Split into `(income_only, capital_taxes, entire, initial_tax)`
    pub fn into_parts(self) -> (Curve, Curve, Curve, TaxBracket) {
        (self.income_only, self.capital_taxes, self.entire, self.initial_tax)
    }
}

impl TaxProfile {
    /// Zero-conversion baseline
    pub fn initial_tax(&self) -> TaxBracket {
        self.from_one_point(0.0)
    }

    /// Extra dollars owed for converting `conversion` over the baseline
    pub fn additional_tax(&self, conversion: f64) -> f64 {
        self.from_one_point(conversion).total_tax() - self.initial_tax().total_tax()
    }

    /// `{0, max}` plus every federal and state boundary in range
    pub fn income_keypoints(&self, max_conversion: f64) -> Vec<f64> {
        let federal = self.federal_schedule.keypoints(self.federal_income(), max_conversion);
        let state = self.state_schedule.keypoints(self.state_income(), max_conversion);
        unique_keypoints(&[&[0.0], federal.as_slice(), state.as_slice(), &[max_conversion]])
    }

    /// Every NIT and long-term gains boundary in range
    pub fn capital_keypoints(&self, max_conversion: f64) -> Vec<f64> {
        let base = self.capital_income_base();
        let nit = self.nit_schedule.keypoints(base, max_conversion);
        let longterm = self.longterm_schedule.keypoints(base, max_conversion);
        unique_keypoints(&[nit.as_slice(), longterm.as_slice()])
    }

    /// Brackets between each adjacent pair of `points`
    ///
    /// A single point yields the one zero-width bracket at that point.
    fn brackets_between(&self, points: &[f64]) -> Curve {
        match points {
            [] => Vec::new(),
            [only] => vec![self.from_one_point(*only)],
            _ => points
                .windows(2)
                .map(|pair| self.from_two_points(pair[0], pair[1]))
                .collect(),
        }
    }

    /// Compute all three curves for conversions in `[0, max_conversion]`
    pub fn compute_curve(&self, max_conversion: f64) -> TaxCurve {
        let income_points = self.income_keypoints(max_conversion);
        let capital_points = self.capital_keypoints(max_conversion);
        debug!(
            "keypoints up to {max_conversion}: income {income_points:?}, capital {capital_points:?}"
        );

        let income_only = coalesce(self.brackets_between(&income_points));
        let capital_taxes: Curve = capital_points
            .iter()
            .map(|&point| self.from_one_point(point))
            .collect();
        let entire = self.brackets_between(&merge_keypoints(&boundaries(&income_only), &capital_points));

        debug!(
            "curve sizes: income_only={}, capital_taxes={}, entire={}",
            income_only.len(),
            capital_taxes.len(),
            entire.len()
        );

        TaxCurve {
            income_only,
            capital_taxes,
            entire,
            initial_tax: self.initial_tax(),
            max_conversion,
        }
    }
}

/// Merge neighbours whose `(state.rate, federal.rate)` match
///
/// The earlier bracket keeps its `lower` and takes everything else from the
/// later one, so amounts stay evaluated at the bracket's upper end.
pub fn coalesce(brackets: Curve) -> Curve {
    let mut merged: Curve = Vec::with_capacity(brackets.len());
    for bracket in brackets {
        match merged.last_mut() {
            Some(last) if last.same_income_rates(&bracket) => {
                *last = TaxBracket {
                    lower: last.lower,
                    ..bracket
                };
            }
            _ => merged.push(bracket),
        }
    }
    merged
}

/// First `lower` followed by every `upper`
///
/// A lone zero-width bracket gives just its point.
fn boundaries(curve: &[TaxBracket]) -> Vec<f64> {
    match curve {
        [] => Vec::new(),
        [only] if only.is_point() => vec![only.lower],
        _ => std::iter::once(curve[0].lower)
            .chain(curve.iter().map(|b| b.upper))
            .collect(),
    }
}

/// Free-function form of [`TaxProfile::compute_curve`]
pub fn compute_curve(profile: &TaxProfile, max_conversion: f64) -> TaxCurve {
    profile.compute_curve(max_conversion)
}

/// Free-function form of [`TaxProfile::additional_tax`]
pub fn additional_tax(profile: &TaxProfile, conversion: f64) -> f64 {
    profile.additional_tax(conversion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::build_schedule;
    use crate::schedule::{RateSchedule, MAX_INCOME};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    const TOP: f64 = 99_999_999.0;

    fn profile() -> TaxProfile {
        build_schedule(
            50_000.0,
            10_000.0,
            5_000.0,
            RateSchedule::from_pairs(&[(0.1, 9_875.0), (0.12, 40_125.0), (0.22, 85_525.0), (0.3, TOP)]),
            RateSchedule::from_pairs(&[(0.03, 9_875.0), (0.05, 40_125.0), (0.07, 999_999_999.0)]),
            RateSchedule::from_pairs(&[(0.0, 100_000.0), (0.2, TOP)]),
            RateSchedule::from_pairs(&[(0.0, 56_000.0), (0.15, 100_000.0), (0.2, TOP)]),
            12_000.0,
            5_000.0,
        )
    }

    /// Federal 10/12/22, state 5/9, no capital income, flat capital schedules
    fn wages_only(wages: f64) -> TaxProfile {
        build_schedule(
            wages,
            0.0,
            0.0,
            RateSchedule::from_pairs(&[(0.10, 10_000.0), (0.12, 40_000.0), (0.22, MAX_INCOME)]),
            RateSchedule::from_pairs(&[(0.05, 10_000.0), (0.09, MAX_INCOME)]),
            RateSchedule::flat(0.0),
            RateSchedule::flat(0.15),
            0.0,
            0.0,
        )
    }

    fn assert_contiguous(curve: &[TaxBracket], max_conversion: f64) {
        assert_eq!(curve.first().map(|b| b.lower), Some(0.0));
        assert_eq!(curve.last().map(|b| b.upper), Some(max_conversion));
        for pair in curve.windows(2) {
            assert_eq!(pair[0].upper, pair[1].lower);
        }
    }

    #[test]
    fn test_income_keypoints() {
        // Federal base 48k reaches 85,525 at 37,525; state base 60k reaches nothing
        assert_eq!(profile().income_keypoints(50_000.0), vec![0.0, 37_525.0, 50_000.0]);
    }

    #[test]
    fn test_capital_keypoints() {
        // Capital base 53k: long-term bounds at 56k and 100k, NIT at 100k
        assert_eq!(profile().capital_keypoints(50_000.0), vec![3_000.0, 47_000.0]);
    }

    #[test]
    fn test_baseline_identity() {
        let p = profile();
        assert_eq!(p.additional_tax(0.0), 0.0);
        assert_eq!(additional_tax(&p, 0.0), 0.0);
    }

    #[test]
    fn test_additional_tax_includes_capital_jump() {
        let p = profile();
        let before = p.additional_tax(46_999.0);
        let after = p.additional_tax(47_000.0);
        // One extra dollar of income, plus NIT on 15k and 5% more on 5k of gains
        let expected_jump = 0.3 + 0.07 + 0.2 * 15_000.0 + 0.05 * 5_000.0;
        assert_abs_diff_eq!(after - before, expected_jump, epsilon = 1e-6);
    }

    #[test]
    fn test_compute_curve_shapes() {
        let p = profile();
        let curve = compute_curve(&p, 50_000.0);

        assert_eq!(curve.initial_tax, p.from_one_point(0.0));
        assert_eq!(curve.capital_taxes.len(), 2);
        assert!(curve.capital_taxes.iter().all(|b| b.is_point()));
        assert_abs_diff_eq!(curve.capital_taxes[0].longterm.marginal, 0.15);
        assert_abs_diff_eq!(curve.capital_taxes[1].nit.marginal, 0.2);

        let bounds: Vec<(f64, f64)> = curve.entire.iter().map(|b| (b.lower, b.upper)).collect();
        // 37,525 separates two equal-rate income intervals, so only the capital points split the range
        assert_eq!(curve.income_only.len(), 1);
        assert_eq!(bounds, vec![(0.0, 3_000.0), (3_000.0, 47_000.0), (47_000.0, 50_000.0)]);
        assert_contiguous(&curve.entire, 50_000.0);
        assert_contiguous(&curve.income_only, 50_000.0);
    }

    #[test]
    fn test_coalesce_merges_trailing_ceiling_interval() {
        let p = wages_only(5_000.0);
        let curve = p.compute_curve(40_000.0);
        // Keypoints 0, 5k, 35k, 40k; the last two intervals share rates at their upper ends
        assert_eq!(curve.income_only.len(), 2);
        assert_eq!(curve.entire, curve.income_only);
        let last = curve.income_only[1];
        assert_eq!((last.lower, last.upper), (5_000.0, 40_000.0));
        assert_abs_diff_eq!(last.federal.amount, p.federal_tax(40_000.0));
        assert!(curve.capital_taxes.is_empty());
    }

    #[test]
    fn test_shared_keypoint_yields_zero_width_bracket() {
        // Federal bound and long-term bound both reached at a 10k conversion
        let p = build_schedule(
            20_000.0,
            0.0,
            0.0,
            RateSchedule::from_pairs(&[(0.1, 30_000.0), (0.2, 35_000.0), (0.3, MAX_INCOME)]),
            RateSchedule::no_tax(),
            RateSchedule::no_tax(),
            RateSchedule::from_pairs(&[(0.0, 30_000.0), (0.15, MAX_INCOME)]),
            0.0,
            0.0,
        );
        let curve = p.compute_curve(20_000.0);
        let bounds: Vec<(f64, f64)> = curve.entire.iter().map(|b| (b.lower, b.upper)).collect();
        assert_eq!(bounds, vec![(0.0, 10_000.0), (10_000.0, 10_000.0), (10_000.0, 20_000.0)]);
        assert_abs_diff_eq!(curve.entire[1].longterm.marginal, 0.15);
    }

    #[test]
    fn test_no_capital_income_has_no_jumps() {
        // Income keypoints 0, 5k, 35k, 60k; 35k only separates equal-rate intervals
        let p = wages_only(5_000.0);
        let curve = p.compute_curve(60_000.0);
        assert!(curve.capital_taxes.is_empty());
        let bounds: Vec<(f64, f64)> = curve.income_only.iter().map(|b| (b.lower, b.upper)).collect();
        assert_eq!(bounds, vec![(0.0, 5_000.0), (5_000.0, 60_000.0)]);
        assert_eq!(curve.entire, curve.income_only);
    }

    #[test]
    fn test_capital_base_on_bound_starts_with_jump() {
        // Capital base 50k sits exactly on the long-term bound
        let p = build_schedule(
            40_000.0,
            0.0,
            10_000.0,
            RateSchedule::from_pairs(&[(0.1, 60_000.0), (0.2, MAX_INCOME)]),
            RateSchedule::no_tax(),
            RateSchedule::flat(0.0),
            RateSchedule::from_pairs(&[(0.0, 50_000.0), (0.15, MAX_INCOME)]),
            0.0,
            0.0,
        );
        let curve = p.compute_curve(30_000.0);

        assert_eq!(p.capital_keypoints(30_000.0), vec![0.0]);
        assert_eq!(curve.capital_taxes.len(), 1);
        assert_abs_diff_eq!(curve.capital_taxes[0].longterm.marginal, 0.15);
        assert_abs_diff_eq!(curve.capital_taxes[0].longterm.amount, 1_500.0);

        let first = curve.entire[0];
        assert_eq!((first.lower, first.upper), (0.0, 0.0));
        assert_contiguous(&curve.entire, 30_000.0);
        assert_eq!(p.additional_tax(0.0), 0.0);
    }

    #[test]
    fn test_zero_ceiling_is_baseline_only() {
        let p = profile();
        let curve = p.compute_curve(0.0);
        assert!(curve.capital_taxes.is_empty());
        assert_eq!(curve.income_only, vec![curve.initial_tax]);
        assert_eq!(curve.entire, vec![curve.initial_tax]);
    }

    #[test]
    fn test_into_parts_order() {
        let curve = profile().compute_curve(50_000.0);
        let expected = curve.clone();
        let (income_only, capital_taxes, entire, initial_tax) = curve.into_parts();
        assert_eq!(income_only, expected.income_only);
        assert_eq!(capital_taxes, expected.capital_taxes);
        assert_eq!(entire, expected.entire);
        assert_eq!(initial_tax, expected.initial_tax);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_curves_cover_range(
            wages in 0.0f64..300_000.0,
            ordinary in 0.0f64..80_000.0,
            qualified in 0.0f64..80_000.0,
            max in 1.0f64..500_000.0,
        ) {
            let p = build_schedule(
                wages,
                ordinary,
                qualified,
                RateSchedule::from_pairs(&[(0.1, 23_200.0), (0.12, 94_300.0), (0.22, 201_050.0), (0.24, 383_900.0), (0.32, MAX_INCOME)]),
                RateSchedule::from_pairs(&[(0.01, 21_512.0), (0.02, 50_998.0), (0.04, 80_490.0), (0.093, MAX_INCOME)]),
                RateSchedule::from_pairs(&[(0.0, 250_000.0), (0.038, MAX_INCOME)]),
                RateSchedule::from_pairs(&[(0.0, 94_050.0), (0.15, 583_750.0), (0.2, MAX_INCOME)]),
                0.0,
                0.0,
            );
            let curve = p.compute_curve(max);

            prop_assert_eq!(p.additional_tax(0.0), 0.0);

            prop_assert_eq!(curve.entire.first().map(|b| b.lower), Some(0.0));
            prop_assert_eq!(curve.entire.last().map(|b| b.upper), Some(max));
            for pair in curve.entire.windows(2) {
                prop_assert_eq!(pair[0].upper, pair[1].lower);
                prop_assert!(pair[0].lower <= pair[0].upper);
            }

            for pair in curve.income_only.windows(2) {
                prop_assert!(!pair[0].same_income_rates(&pair[1]));
            }
            prop_assert_eq!(coalesce(curve.income_only.clone()), curve.income_only.clone());
            if curve.capital_taxes.is_empty() {
                prop_assert_eq!(&curve.entire, &curve.income_only);
            }
        }
    }
}
