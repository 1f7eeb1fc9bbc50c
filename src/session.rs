//! Conversion session: request inputs plus the curve computed from them
//!
//! The session owns the cached curve for one interaction and recomputes it
//! whenever the request changes.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::curve::{TaxCurve, TaxProfile};
use crate::error::Result;
use crate::schedule::RateSchedule;
use crate::summary::{summary_rows, Recommendation, SummaryRow};
use crate::tables::{schedules_for, FilingStatus, Household, StateCode};

fn default_assets() -> f64 {
    750_000.0
}

fn default_wage_income() -> f64 {
    100_000.0
}

fn default_ordinary_capital_income() -> f64 {
    40_000.0
}

fn default_qualified_capital_income() -> f64 {
    20_000.0
}

fn default_tax_year() -> u16 {
    2024
}

fn default_filing_status() -> FilingStatus {
    FilingStatus::Married
}

fn default_state() -> StateCode {
    StateCode::California
}

fn default_future_rate() -> f64 {
    0.25
}

/// Everything a user supplies for one conversion analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Pre-tax retirement assets; the conversion ceiling
    #[serde(default = "default_assets")]
    pub assets: f64,

    /// Wage income after adjustments
    #[serde(default = "default_wage_income")]
    pub wage_income: f64,

    /// Ordinary dividends and short-term gains
    #[serde(default = "default_ordinary_capital_income")]
    pub ordinary_capital_income: f64,

    /// Qualified dividends and long-term gains
    #[serde(default = "default_qualified_capital_income")]
    pub qualified_capital_income: f64,

    #[serde(default = "default_tax_year")]
    pub tax_year: u16,

    #[serde(default = "default_filing_status")]
    pub filing_status: FilingStatus,

    #[serde(default = "default_state")]
    pub state: StateCode,

    /// Replaces the standard federal deduction
    #[serde(default)]
    pub custom_deduction: Option<f64>,

    /// Expected rate when the money is withdrawn later (fraction)
    #[serde(default = "default_future_rate")]
    pub future_rate: f64,

    /// Replaces the published federal brackets
    #[serde(default)]
    pub federal_brackets: Option<RateSchedule>,

    /// Replaces the published state brackets
    #[serde(default)]
    pub state_brackets: Option<RateSchedule>,
}

impl Default for ConversionRequest {
    fn default() -> Self {
        Self {
            assets: default_assets(),
            wage_income: default_wage_income(),
            ordinary_capital_income: default_ordinary_capital_income(),
            qualified_capital_income: default_qualified_capital_income(),
            tax_year: default_tax_year(),
            filing_status: default_filing_status(),
            state: default_state(),
            custom_deduction: None,
            future_rate: default_future_rate(),
            federal_brackets: None,
            state_brackets: None,
        }
    }
}

impl ConversionRequest {
    /// Read a JSON request file; missing fields take their defaults
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn household(&self) -> Household {
        Household {
            wage_income: self.wage_income,
            ordinary_capital_income: self.ordinary_capital_income,
            qualified_capital_income: self.qualified_capital_income,
            year: self.tax_year,
            status: self.filing_status,
            state: self.state,
            custom_deduction: self.custom_deduction,
        }
    }

    /// Build the engine profile from the tables and any bracket overrides
    pub fn profile(&self) -> Result<TaxProfile> {
        let mut schedules = schedules_for(self.tax_year, self.filing_status, self.state)?;
        if let Some(federal) = &self.federal_brackets {
            schedules.federal = federal.clone();
        }
        if let Some(state) = &self.state_brackets {
            schedules.state = state.clone();
        }
        self.household().profile(schedules)
    }
}

/// Request, profile and curve for one interaction
#[derive(Debug, Clone)]
pub struct ConversionSession {
    request: ConversionRequest,
    profile: TaxProfile,
    curve: TaxCurve,
}

impl ConversionSession {
    pub fn new(request: ConversionRequest) -> Result<Self> {
        let profile = request.profile()?;
        let curve = profile.compute_curve(request.assets);
        Ok(Self {
            request,
            profile,
            curve,
        })
    }

    /// Replace the request, recomputing only when it changed
    ///
    /// Returns whether the curve was recomputed. On error the previous
    /// request and curve are kept.
    pub fn update(&mut self, request: ConversionRequest) -> Result<bool> {
        if request == self.request {
            debug!("request unchanged, keeping cached curve");
            return Ok(false);
        }
        let profile = request.profile()?;
        self.curve = profile.compute_curve(request.assets);
        self.profile = profile;
        self.request = request;
        Ok(true)
    }

    pub fn request(&self) -> &ConversionRequest {
        &self.request
    }

    pub fn profile(&self) -> &TaxProfile {
        &self.profile
    }

    pub fn curve(&self) -> &TaxCurve {
        &self.curve
    }

    pub fn recommendation(&self) -> Recommendation {
        Recommendation::from_curve(&self.curve, self.request.future_rate)
    }

    pub fn summary(&self) -> Vec<SummaryRow> {
        summary_rows(&self.curve)
    }

    pub fn additional_tax(&self, conversion: f64) -> f64 {
        self.profile.additional_tax(conversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaxError;

    #[test]
    fn test_request_defaults_from_empty_json() {
        let request: ConversionRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, ConversionRequest::default());
        assert_eq!(request.filing_status, FilingStatus::Married);
        assert_eq!(request.state, StateCode::California);
    }

    #[test]
    fn test_request_json_fields() {
        let json = r#"{
            "assets": 200000,
            "filing_status": "single",
            "state": "none",
            "tax_year": 2025,
            "federal_brackets": [{"rate": 0.1, "upper_bound": 50000}, {"rate": 0.3, "upper_bound": 9999999}]
        }"#;
        let request: ConversionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.filing_status, FilingStatus::Single);
        assert_eq!(request.state, StateCode::NoIncomeTax);

        let profile = request.profile().unwrap();
        assert_eq!(profile.federal_schedule.len(), 2);
        assert_eq!(profile.state_schedule, RateSchedule::no_tax());
        assert_eq!(profile.federal_deduction, 15_000.0);
    }

    #[test]
    fn test_session_caches_until_request_changes() {
        let mut session = ConversionSession::new(ConversionRequest::default()).unwrap();
        let first = session.curve().clone();
        assert_eq!(first.max_conversion, 750_000.0);

        assert!(!session.update(ConversionRequest::default()).unwrap());
        assert_eq!(session.curve(), &first);

        let smaller = ConversionRequest {
            assets: 50_000.0,
            ..ConversionRequest::default()
        };
        assert!(session.update(smaller).unwrap());
        assert_eq!(session.curve().max_conversion, 50_000.0);
        assert_eq!(session.additional_tax(0.0), 0.0);
        assert_eq!(session.summary().len(), session.curve().entire.len());
    }

    #[test]
    fn test_failed_update_keeps_previous_state() {
        let mut session = ConversionSession::new(ConversionRequest::default()).unwrap();
        let bad = ConversionRequest {
            tax_year: 2001,
            ..ConversionRequest::default()
        };
        assert!(matches!(session.update(bad), Err(TaxError::UnsupportedYear(2001))));
        assert_eq!(session.request().tax_year, 2024);
    }

    #[test]
    fn test_default_household_recommendation() {
        let session = ConversionSession::new(ConversionRequest::default()).unwrap();
        // Married in California starts above 25% once state tax is added
        let advice = session.recommendation();
        assert!(matches!(
            advice,
            Recommendation::CurrentRateHigher { .. } | Recommendation::CurrentRateSlightlyHigher { .. }
        ));
    }
}
