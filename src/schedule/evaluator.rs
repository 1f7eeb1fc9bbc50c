//! Tax owed and instantaneous rates under a schedule
//!
//! Incomes here are absolute (already net of deductions and including any
//! conversion). Negative income is a caller error.

use super::{RateSchedule, ScheduleKind};

impl RateSchedule {
    /// Cumulative progressive tax from zero up to `income`
    pub fn total_tax(&self, income: f64) -> f64 {
        let mut tax = 0.0;
        let mut prev_bound = 0.0;
        for tier in &self.tiers {
            if income <= prev_bound {
                break;
            }
            tax += (tier.upper_bound.min(income) - prev_bound) * tier.rate;
            prev_bound = tier.upper_bound;
        }
        tax
    }

    /// Flat threshold tax: the rate of the tier containing `bracket_income`
    /// applied to the whole `component`
    ///
    /// Past the final bound the last rate applies.
    pub fn threshold_tax(&self, component: f64, bracket_income: f64) -> f64 {
        let mut prev_bound = 0.0;
        for tier in &self.tiers {
            if prev_bound <= bracket_income && bracket_income < tier.upper_bound {
                return tier.rate * component;
            }
            prev_bound = tier.upper_bound;
        }
        self.top_rate() * component
    }

    /// Returns `(rate, marginal)` at `income`
    ///
    /// Progressive schedules report the tier rate twice. Threshold schedules
    /// report the jump just crossed when `income` sits exactly on a tier's
    /// left edge, and 0 anywhere else.
    pub fn rate_at(&self, income: f64, kind: ScheduleKind) -> (f64, f64) {
        let mut prev_rate = 0.0;
        let mut prev_bound = 0.0;
        for tier in &self.tiers {
            if income < tier.upper_bound {
                return match kind {
                    ScheduleKind::Progressive => (tier.rate, tier.rate),
                    ScheduleKind::Threshold if income == prev_bound => {
                        (tier.rate, tier.rate - prev_rate)
                    }
                    ScheduleKind::Threshold => (tier.rate, 0.0),
                };
            }
            prev_rate = tier.rate;
            prev_bound = tier.upper_bound;
        }
        let last = self.top_rate();
        match kind {
            ScheduleKind::Progressive => (last, last),
            ScheduleKind::Threshold => (last, 0.0),
        }
    }
}

/// Cumulative progressive tax under `schedule` at `income`
pub fn total_tax(schedule: &RateSchedule, income: f64) -> f64 {
    schedule.total_tax(income)
}

/// `(rate, marginal)` under `schedule` at `income`
pub fn rate_at(schedule: &RateSchedule, income: f64, kind: ScheduleKind) -> (f64, f64) {
    schedule.rate_at(income, kind)
}
