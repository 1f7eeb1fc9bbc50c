//! Rate schedules: ordered (rate, upper bound) tiers and their evaluation

mod evaluator;
mod keypoints;

pub use evaluator::{rate_at, total_tax};
pub use keypoints::{keypoints, merge_keypoints, unique_keypoints};

use serde::{Deserialize, Serialize};

/// Sentinel upper bound of the last tier ("no ceiling")
pub const MAX_INCOME: f64 = 9_999_999.0;

/// How a schedule's rate applies to income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleKind {
    /// Each tier's rate applies to the income inside it (federal, state)
    Progressive,
    /// One rate applies to a whole income component once a bound is
    /// crossed (NIT, long-term gains)
    Threshold,
}

/// One tier of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTier {
    /// Rate as a fraction (0.22 for 22%)
    pub rate: f64,
    /// Exclusive upper bound of the tier in absolute income
    pub upper_bound: f64,
}

impl RateTier {
    pub fn new(rate: f64, upper_bound: f64) -> Self {
        Self { rate, upper_bound }
    }
}

/// Ordered list of tiers with strictly increasing bounds
///
/// Tiers are taken as supplied: the engine neither sorts nor validates them,
/// and the final bound is expected to be a sentinel such as [`MAX_INCOME`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateSchedule {
    tiers: Vec<RateTier>,
}

impl RateSchedule {
    pub fn new(tiers: Vec<RateTier>) -> Self {
        Self { tiers }
    }

    /// Build from `(rate, upper_bound)` pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self {
            tiers: pairs
                .iter()
                .map(|&(rate, upper_bound)| RateTier::new(rate, upper_bound))
                .collect(),
        }
    }

    /// Single tier at `rate` up to the sentinel
    pub fn flat(rate: f64) -> Self {
        Self::from_pairs(&[(rate, MAX_INCOME)])
    }

    /// Schedule for jurisdictions without the tax
    pub fn no_tax() -> Self {
        Self::flat(0.0)
    }

    pub fn tiers(&self) -> &[RateTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Rate of the last tier, 0 for an empty schedule
    pub fn top_rate(&self) -> f64 {
        self.tiers.last().map(|t| t.rate).unwrap_or(0.0)
    }

    /// Scale every bound by `1 + ccpi`, e.g. to roll a table forward a year
    pub fn adjusted(&self, ccpi: f64) -> Self {
        Self {
            tiers: self
                .tiers
                .iter()
                .map(|t| RateTier::new(t.rate, t.upper_bound * (1.0 + ccpi)))
                .collect(),
        }
    }
}

impl From<Vec<(f64, f64)>> for RateSchedule {
    fn from(pairs: Vec<(f64, f64)>) -> Self {
        Self::from_pairs(&pairs)
    }
}
