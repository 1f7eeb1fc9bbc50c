//! Conversion Tax CLI
//!
//! Computes the tax curve for a household and prints how much of a
//! pre-tax retirement balance is worth converting this year

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use conversion_tax::summary::{format_currency, format_percent, parse_currency, write_summary_csv};
use conversion_tax::tables::load_schedule;
use conversion_tax::{ConversionRequest, ConversionSession, FilingStatus, StateCode};
use log::info;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "conversion_tax")]
#[command(about = "Marginal tax curve for retirement-account conversions", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON request file; flags given on the command line override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pre-tax retirement assets available to convert
    #[arg(long, value_parser = currency)]
    assets: Option<f64>,

    /// Wage income after adjustments
    #[arg(long, value_parser = currency)]
    wages: Option<f64>,

    /// Ordinary dividends and short-term gains
    #[arg(long, value_parser = currency)]
    ordinary_capital: Option<f64>,

    /// Qualified dividends and long-term gains
    #[arg(long, value_parser = currency)]
    qualified_capital: Option<f64>,

    #[arg(long)]
    year: Option<u16>,

    /// single, married or head
    #[arg(long)]
    status: Option<FilingStatus>,

    /// CA or none
    #[arg(long)]
    state: Option<StateCode>,

    /// Replaces the standard federal deduction
    #[arg(long, value_parser = currency)]
    deduction: Option<f64>,

    /// Expected tax rate on later withdrawals, as a fraction (0.25)
    #[arg(long)]
    future_rate: Option<f64>,

    /// CSV file (rate,upper_bound) replacing the federal brackets
    #[arg(long)]
    federal_brackets: Option<PathBuf>,

    /// CSV file (rate,upper_bound) replacing the state brackets
    #[arg(long)]
    state_brackets: Option<PathBuf>,

    /// Write the summary table to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the full curve as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn currency(text: &str) -> std::result::Result<f64, String> {
    parse_currency(text).map_err(|e| e.to_string())
}

impl Cli {
    fn request(&self) -> Result<ConversionRequest> {
        let mut request = match &self.config {
            Some(path) => ConversionRequest::from_json_path(path)
                .with_context(|| format!("Failed to read request {}", path.display()))?,
            None => ConversionRequest::default(),
        };

        if let Some(assets) = self.assets {
            request.assets = assets;
        }
        if let Some(wages) = self.wages {
            request.wage_income = wages;
        }
        if let Some(ordinary) = self.ordinary_capital {
            request.ordinary_capital_income = ordinary;
        }
        if let Some(qualified) = self.qualified_capital {
            request.qualified_capital_income = qualified;
        }
        if let Some(year) = self.year {
            request.tax_year = year;
        }
        if let Some(status) = self.status {
            request.filing_status = status;
        }
        if let Some(state) = self.state {
            request.state = state;
        }
        if self.deduction.is_some() {
            request.custom_deduction = self.deduction;
        }
        if let Some(rate) = self.future_rate {
            request.future_rate = rate;
        }
        if let Some(path) = &self.federal_brackets {
            let schedule = load_schedule(path)
                .with_context(|| format!("Failed to load federal brackets {}", path.display()))?;
            request.federal_brackets = Some(schedule);
        }
        if let Some(path) = &self.state_brackets {
            let schedule = load_schedule(path)
                .with_context(|| format!("Failed to load state brackets {}", path.display()))?;
            request.state_brackets = Some(schedule);
        }
        Ok(request)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    request: &'a ConversionRequest,
    curve: &'a conversion_tax::TaxCurve,
    summary: Vec<conversion_tax::SummaryRow>,
    recommendation: String,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let request = cli.request()?;
    info!(
        "request: {} {} in {}, converting up to {}",
        request.tax_year,
        request.filing_status,
        request.state,
        format_currency(request.assets)
    );

    let session = ConversionSession::new(request).context("Failed to build tax profile")?;
    let rows = session.summary();
    let advice = session.recommendation();

    if cli.json {
        let report = JsonReport {
            request: session.request(),
            curve: session.curve(),
            summary: rows.clone(),
            recommendation: advice.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let initial = &session.curve().initial_tax;
        println!("Conversion Tax v{}", env!("CARGO_PKG_VERSION"));
        println!("=====================\n");
        println!("Tax before conversion: {}", format_currency(initial.total_tax()));
        println!();
        println!(
            "{:>18} {:>16} {:>12} {:>14} {:>12}",
            "Conversion", "Additional Tax", "Marginal", "Capital Gains", "NIT"
        );
        for row in &rows {
            println!(
                "{:>18} {:>16} {:>12} {:>14} {:>12}",
                format_currency(row.conversion_amount),
                format_currency(row.additional_tax),
                format_percent(row.marginal_tax_rate),
                format_percent(row.capital_gains_rate),
                format_percent(row.net_investment_tax_rate),
            );
        }
        println!("\n{advice}");
    }

    if let Some(path) = &cli.output {
        let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        write_summary_csv(file, &rows)?;
        info!("summary written to {}", path.display());
    }

    Ok(())
}
