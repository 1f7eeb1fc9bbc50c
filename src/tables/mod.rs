//! Bracket and deduction tables keyed by tax year, filing status and state
//!
//! Lookups fail here, before a profile is built, so the curve engine only
//! ever sees well-formed schedules.

mod data;
pub mod loader;

pub use loader::{load_schedule, load_schedule_from_reader, write_schedule};

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::curve::{build_schedule, TaxProfile};
use crate::error::{Result, TaxError};
use crate::schedule::RateSchedule;

/// Years with published tables
pub const SUPPORTED_YEARS: &[u16] = &[2024, 2025];

/// Federal filing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilingStatus {
    /// Single or married filing separately
    Single,
    /// Married filing jointly
    Married,
    /// Head of household
    Head,
}

impl FilingStatus {
    fn pick<T: Copy>(&self, (single, married, head): (T, T, T)) -> T {
        match self {
            FilingStatus::Single => single,
            FilingStatus::Married => married,
            FilingStatus::Head => head,
        }
    }
}

impl FromStr for FilingStatus {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(FilingStatus::Single),
            "married" | "joint" => Ok(FilingStatus::Married),
            "head" => Ok(FilingStatus::Head),
            other => Err(TaxError::UnknownFilingStatus(other.to_string())),
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FilingStatus::Single => "single",
            FilingStatus::Married => "married",
            FilingStatus::Head => "head",
        };
        f.write_str(label)
    }
}

/// State whose income tax applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateCode {
    #[serde(rename = "CA")]
    California,
    /// No state income tax
    #[serde(rename = "none")]
    NoIncomeTax,
}

impl FromStr for StateCode {
    type Err = TaxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CA" => Ok(StateCode::California),
            "NONE" | "" => Ok(StateCode::NoIncomeTax),
            _ => Err(TaxError::UnsupportedState(s.to_string())),
        }
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateCode::California => f.write_str("CA"),
            StateCode::NoIncomeTax => f.write_str("none"),
        }
    }
}

/// The four schedules for one year, status and state
#[derive(Debug, Clone, PartialEq)]
pub struct TaxSchedules {
    pub federal: RateSchedule,
    pub state: RateSchedule,
    pub nit: RateSchedule,
    pub longterm: RateSchedule,
}

fn check_year(year: u16) -> Result<()> {
    if SUPPORTED_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(TaxError::UnsupportedYear(year))
    }
}

pub fn federal_schedule(year: u16, status: FilingStatus) -> Result<RateSchedule> {
    let pairs = match year {
        2024 => status.pick((data::FEDERAL_2024_SINGLE, data::FEDERAL_2024_MARRIED, data::FEDERAL_2024_HEAD)),
        2025 => status.pick((data::FEDERAL_2025_SINGLE, data::FEDERAL_2025_MARRIED, data::FEDERAL_2025_HEAD)),
        _ => return Err(TaxError::UnsupportedYear(year)),
    };
    Ok(RateSchedule::from_pairs(pairs))
}

/// State brackets; states without a table pay nothing
pub fn state_schedule(state: StateCode, year: u16, status: FilingStatus) -> Result<RateSchedule> {
    check_year(year)?;
    match state {
        StateCode::NoIncomeTax => Ok(RateSchedule::no_tax()),
        StateCode::California => {
            let base = RateSchedule::from_pairs(status.pick((
                data::CALIFORNIA_2024_SINGLE,
                data::CALIFORNIA_2024_MARRIED,
                data::CALIFORNIA_2024_HEAD,
            )));
            Ok(match year {
                2024 => base,
                _ => base.adjusted(data::CALIFORNIA_2025_CCPI),
            })
        }
    }
}

pub fn gains_schedule(year: u16, status: FilingStatus) -> Result<RateSchedule> {
    let pairs = match year {
        2024 => status.pick((data::GAINS_2024_SINGLE, data::GAINS_2024_MARRIED, data::GAINS_2024_HEAD)),
        2025 => status.pick((data::GAINS_2025_SINGLE, data::GAINS_2025_MARRIED, data::GAINS_2025_HEAD)),
        _ => return Err(TaxError::UnsupportedYear(year)),
    };
    Ok(RateSchedule::from_pairs(pairs))
}

pub fn nit_schedule(status: FilingStatus) -> RateSchedule {
    RateSchedule::from_pairs(status.pick((data::NIT_SINGLE, data::NIT_MARRIED, data::NIT_HEAD)))
}

pub fn standard_deduction(year: u16, status: FilingStatus) -> Result<f64> {
    match year {
        2024 => Ok(status.pick(data::STANDARD_DEDUCTION_2024)),
        2025 => Ok(status.pick(data::STANDARD_DEDUCTION_2025)),
        _ => Err(TaxError::UnsupportedYear(year)),
    }
}

/// State standard deduction, zero where no table is published
pub fn state_deduction(state: StateCode, year: u16, status: FilingStatus) -> f64 {
    match (state, year) {
        (StateCode::California, 2024) => status.pick(data::CALIFORNIA_DEDUCTION_2024),
        _ => {
            debug!("no {state} deduction table for {year}, using 0");
            0.0
        }
    }
}

pub fn schedules_for(year: u16, status: FilingStatus, state: StateCode) -> Result<TaxSchedules> {
    Ok(TaxSchedules {
        federal: federal_schedule(year, status)?,
        state: state_schedule(state, year, status)?,
        nit: nit_schedule(status),
        longterm: gains_schedule(year, status)?,
    })
}

/// Incomes and filing details needed to build a profile from the tables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Household {
    pub wage_income: f64,
    pub ordinary_capital_income: f64,
    pub qualified_capital_income: f64,
    pub year: u16,
    pub status: FilingStatus,
    pub state: StateCode,
    /// Replaces the federal standard deduction when set
    pub custom_deduction: Option<f64>,
}

impl Household {
    /// Look up schedules and deductions and build the engine profile
    pub fn profile(&self, schedules: TaxSchedules) -> Result<TaxProfile> {
        let federal_deduction = match self.custom_deduction {
            Some(amount) => amount,
            None => standard_deduction(self.year, self.status)?,
        };
        Ok(build_schedule(
            self.wage_income,
            self.ordinary_capital_income,
            self.qualified_capital_income,
            schedules.federal,
            schedules.state,
            schedules.nit,
            schedules.longterm,
            federal_deduction,
            state_deduction(self.state, self.year, self.status),
        ))
    }

    /// Profile built entirely from the published tables
    pub fn profile_from_tables(&self) -> Result<TaxProfile> {
        self.profile(schedules_for(self.year, self.status, self.state)?)
    }
}
