//! Taxpayer profile and the bracket builder

use serde::{Deserialize, Serialize};

use super::bracket::{TaxBracket, TaxBundle};
use crate::schedule::{RateSchedule, ScheduleKind};

/// Immutable engine input: incomes, deductions and the four schedules
///
/// Incomes and deductions are expected to be non-negative and deductions not
/// to exceed income; nothing here enforces that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxProfile {
    pub pretax_wage_income: f64,
    /// Short-term gains and ordinary dividends
    pub ordinary_capital_income: f64,
    /// Long-term gains and qualified dividends
    pub qualified_capital_income: f64,

    pub federal_schedule: RateSchedule,
    pub state_schedule: RateSchedule,
    pub nit_schedule: RateSchedule,
    pub longterm_schedule: RateSchedule,

    pub federal_deduction: f64,
    pub state_deduction: f64,
}

/// Assemble a profile from its parts
#[allow(clippy::too_many_arguments)]
pub fn build_schedule(
    pretax_wage_income: f64,
    ordinary_capital_income: f64,
    qualified_capital_income: f64,
    federal_schedule: RateSchedule,
    state_schedule: RateSchedule,
    nit_schedule: RateSchedule,
    longterm_schedule: RateSchedule,
    federal_deduction: f64,
    state_deduction: f64,
) -> TaxProfile {
    TaxProfile {
        pretax_wage_income,
        ordinary_capital_income,
        qualified_capital_income,
        federal_schedule,
        state_schedule,
        nit_schedule,
        longterm_schedule,
        federal_deduction,
        state_deduction,
    }
}

impl TaxProfile {
    /// Federal ordinary taxable income before any conversion
    pub fn federal_income(&self) -> f64 {
        self.pretax_wage_income + self.ordinary_capital_income - self.federal_deduction
    }

    /// State taxable income before any conversion (states tax all gains as ordinary)
    pub fn state_income(&self) -> f64 {
        self.pretax_wage_income + self.ordinary_capital_income + self.qualified_capital_income
            - self.state_deduction
    }

    /// Income that positions the taxpayer in the NIT and long-term gains schedules
    pub fn capital_income_base(&self) -> f64 {
        self.federal_income() + self.qualified_capital_income
    }

    /// Investment income subject to NIT
    pub fn net_investment_income(&self) -> f64 {
        self.ordinary_capital_income + self.qualified_capital_income
    }

    pub fn state_tax(&self, conversion: f64) -> f64 {
        self.state_schedule.total_tax(self.state_income() + conversion)
    }

    pub fn federal_tax(&self, conversion: f64) -> f64 {
        self.federal_schedule.total_tax(self.federal_income() + conversion)
    }

    pub fn nit_tax(&self, conversion: f64) -> f64 {
        self.nit_schedule
            .threshold_tax(self.net_investment_income(), self.capital_income_base() + conversion)
    }

    pub fn longterm_tax(&self, conversion: f64) -> f64 {
        self.longterm_schedule
            .threshold_tax(self.qualified_capital_income, self.capital_income_base() + conversion)
    }

    /// Zero-width bracket describing the state at exactly `conversion`
    pub fn from_one_point(&self, conversion: f64) -> TaxBracket {
        self.from_two_points(conversion, conversion)
    }

    /// Bracket spanning `[lower, upper]`, every schedule evaluated at `upper`
    ///
    /// Amounts are the absolute liability at `upper`, not the change over the
    /// interval.
    pub fn from_two_points(&self, lower: f64, upper: f64) -> TaxBracket {
        let state_income = self.state_income() + upper;
        let federal_income = self.federal_income() + upper;
        let capital_income = self.capital_income_base() + upper;

        TaxBracket {
            lower,
            upper,
            state: TaxBundle::from_rates(
                self.state_schedule.rate_at(state_income, ScheduleKind::Progressive),
                self.state_tax(upper),
            ),
            federal: TaxBundle::from_rates(
                self.federal_schedule.rate_at(federal_income, ScheduleKind::Progressive),
                self.federal_tax(upper),
            ),
            nit: TaxBundle::from_rates(
                self.nit_schedule.rate_at(capital_income, ScheduleKind::Threshold),
                self.nit_tax(upper),
            ),
            longterm: TaxBundle::from_rates(
                self.longterm_schedule.rate_at(capital_income, ScheduleKind::Threshold),
                self.longterm_tax(upper),
            ),
        }
    }
}
