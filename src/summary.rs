//! Presentation helpers: conversion recommendation, summary table and
//! currency/percent formatting

use std::fmt;
use std::io::Write;

use csv::Writer;
use serde::Serialize;

use crate::curve::{TaxBracket, TaxCurve};
use crate::error::{Result, TaxError};

/// Future rates below this are flagged as implausible
pub const MIN_PLAUSIBLE_FUTURE_RATE: f64 = 0.15;

/// Margin by which today's rate must exceed the future rate to advise against converting
pub const CLEAR_LOSS_MARGIN: f64 = 0.01;

/// Advice on how much to convert
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recommendation {
    NothingToConvert,
    UnrealisticFutureRate { future_rate: f64 },
    /// Today's rate beats the future rate by more than [`CLEAR_LOSS_MARGIN`]
    CurrentRateHigher { current_rate: f64 },
    /// Today's rate is above the future rate, but only slightly
    CurrentRateSlightlyHigher { current_rate: f64 },
    /// Convert up to `amount`, staying at `marginal_rate`
    ConvertUpTo { amount: f64, marginal_rate: f64 },
    /// Even the full conversion stays below the future rate
    ConvertAll { amount: f64 },
}

impl Recommendation {
    /// Compare the entire curve's federal+state rate against `future_rate`
    pub fn from_curve(curve: &TaxCurve, future_rate: f64) -> Self {
        recommend(&curve.entire, curve.max_conversion, future_rate)
    }
}

/// Largest conversion whose marginal income rate stays at or below `future_rate`
pub fn recommend(entire: &[TaxBracket], max_conversion: f64, future_rate: f64) -> Recommendation {
    if max_conversion <= 0.0 {
        return Recommendation::NothingToConvert;
    }
    if future_rate < MIN_PLAUSIBLE_FUTURE_RATE {
        return Recommendation::UnrealisticFutureRate { future_rate };
    }
    let Some(first) = entire.first() else {
        return Recommendation::NothingToConvert;
    };

    let current_rate = first.combined_marginal_rate();
    if current_rate > future_rate + CLEAR_LOSS_MARGIN {
        return Recommendation::CurrentRateHigher { current_rate };
    }
    if current_rate > future_rate {
        return Recommendation::CurrentRateSlightlyHigher { current_rate };
    }

    for pair in entire.windows(2) {
        let (bracket, next) = (&pair[0], &pair[1]);
        if next.combined_marginal_rate() > future_rate {
            return Recommendation::ConvertUpTo {
                amount: bracket.upper,
                marginal_rate: bracket.combined_marginal_rate(),
            };
        }
    }
    Recommendation::ConvertAll {
        amount: max_conversion,
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Recommendation::NothingToConvert => {
                write!(f, "You have no money to convert. Easy decision.")
            }
            Recommendation::UnrealisticFutureRate { future_rate } => write!(
                f,
                "A future rate of {} seems unrealistically low. Are you sure you're not missing anything?",
                format_percent(future_rate)
            ),
            Recommendation::CurrentRateHigher { current_rate } => write!(
                f,
                "Your current tax rate of {} is higher than your future tax rate. It might not be worth converting.",
                format_percent(current_rate)
            ),
            Recommendation::CurrentRateSlightlyHigher { current_rate } => write!(
                f,
                "Your current tax rate of {} is slightly higher than your future tax rate. You might consider converting, but it's not a clear win.",
                format_percent(current_rate)
            ),
            Recommendation::ConvertUpTo {
                amount,
                marginal_rate,
            } => write!(
                f,
                "Consider converting {}. That will keep your marginal rate at {} which is lower than your expected future tax rate.",
                format_currency(amount),
                format_percent(marginal_rate)
            ),
            Recommendation::ConvertAll { amount } => write!(
                f,
                "You should convert all {}. Your tax rate stays below your expected future tax rate even if you convert everything.",
                format_currency(amount)
            ),
        }
    }
}

/// One line of the conversion table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Conversion Amount")]
    pub conversion_amount: f64,
    #[serde(rename = "Additional Tax")]
    pub additional_tax: f64,
    #[serde(rename = "Marginal Tax Rate")]
    pub marginal_tax_rate: f64,
    #[serde(rename = "Capital Gains Rate")]
    pub capital_gains_rate: f64,
    #[serde(rename = "Net Investment Tax Rate")]
    pub net_investment_tax_rate: f64,
}

impl SummaryRow {
    pub fn from_bracket(bracket: &TaxBracket, initial_tax: &TaxBracket) -> Self {
        Self {
            conversion_amount: bracket.upper,
            additional_tax: bracket.total_tax() - initial_tax.total_tax(),
            marginal_tax_rate: bracket.combined_marginal_rate(),
            capital_gains_rate: bracket.longterm.rate,
            net_investment_tax_rate: bracket.nit.rate,
        }
    }
}

/// One row per bracket of the entire curve
pub fn summary_rows(curve: &TaxCurve) -> Vec<SummaryRow> {
    curve
        .entire
        .iter()
        .map(|bracket| SummaryRow::from_bracket(bracket, &curve.initial_tax))
        .collect()
}

/// Write rows as CSV with display headers
pub fn write_summary_csv<W: Write>(writer: W, rows: &[SummaryRow]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// `$1,234` for whole amounts, `$1,234.56` otherwise
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let abs = amount.abs();
    let cents = (abs * 100.0).round() as u64;
    let (dollars, fraction) = (cents / 100, cents % 100);

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative && cents > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction:02}")
    }
}

/// `0.2235` becomes `22.35%`
pub fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Parse `"$100,000"`, `"100000"` or `"1,234.50"` into an amount
pub fn parse_currency(text: &str) -> Result<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TaxError::InvalidAmount(text.to_string()))
}
