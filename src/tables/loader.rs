//! CSV-based schedule loader
//!
//! A schedule file has a `rate,upper_bound` header and one tier per row, in
//! ascending bound order. Rows are taken as given.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{Reader, Writer};
use log::debug;

use crate::error::{Result, TaxError};
use crate::schedule::{RateSchedule, RateTier};

/// Load a schedule from a CSV file
pub fn load_schedule<P: AsRef<Path>>(path: P) -> Result<RateSchedule> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let schedule = read_tiers(file, &path.display().to_string())?;
    debug!("loaded {} tiers from {}", schedule.len(), path.display());
    Ok(schedule)
}

/// Load a schedule from any reader (e.g. an in-memory buffer)
pub fn load_schedule_from_reader<R: Read>(reader: R) -> Result<RateSchedule> {
    read_tiers(reader, "<reader>")
}

fn read_tiers<R: Read>(reader: R, source: &str) -> Result<RateSchedule> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut tiers = Vec::new();

    for result in csv_reader.deserialize() {
        let tier: RateTier = result?;
        tiers.push(tier);
    }

    if tiers.is_empty() {
        return Err(TaxError::EmptySchedule(source.to_string()));
    }
    Ok(RateSchedule::new(tiers))
}

/// Write a schedule in the format [`load_schedule`] reads
pub fn write_schedule<W: Write>(writer: W, schedule: &RateSchedule) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    for tier in schedule.tiers() {
        csv_writer.serialize(tier)?;
    }
    csv_writer.flush()?;
    Ok(())
}
