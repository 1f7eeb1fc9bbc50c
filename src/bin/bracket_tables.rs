//! Print a built-in rate schedule as CSV
//!
//! The output loads back with `--federal-brackets` / `--state-brackets`, so a
//! published table can be copied and edited.

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use conversion_tax::tables::{federal_schedule, gains_schedule, nit_schedule, state_schedule, write_schedule};
use conversion_tax::{FilingStatus, StateCode};
use log::info;

#[derive(Clone, Copy, ValueEnum)]
enum Table {
    Federal,
    State,
    Gains,
    Nit,
}

#[derive(Parser)]
#[command(name = "bracket_tables")]
#[command(about = "Dump a built-in bracket table as rate,upper_bound CSV", long_about = None)]
struct Args {
    #[arg(value_enum)]
    table: Table,

    #[arg(long, default_value_t = 2024)]
    year: u16,

    /// single, married or head
    #[arg(long, default_value = "married")]
    status: FilingStatus,

    /// CA or none
    #[arg(long, default_value = "CA")]
    state: StateCode,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let schedule = match args.table {
        Table::Federal => federal_schedule(args.year, args.status),
        Table::State => state_schedule(args.state, args.year, args.status),
        Table::Gains => gains_schedule(args.year, args.status),
        Table::Nit => Ok(nit_schedule(args.status)),
    }
    .with_context(|| format!("No table for {} {}", args.year, args.status))?;

    info!("{} tiers", schedule.len());
    write_schedule(io::stdout().lock(), &schedule)?;
    Ok(())
}
