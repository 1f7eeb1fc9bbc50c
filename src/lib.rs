//! Conversion Tax - marginal tax curves for sizing retirement-account conversions
//!
//! This library provides:
//! - Progressive and threshold rate schedules with boundary keypoints
//! - Piecewise tax curves over conversion amounts (income, capital, combined)
//! - Federal, California, capital gains and net investment tax tables
//! - Conversion recommendations and summary tables

pub mod curve;
pub mod error;
pub mod schedule;
pub mod session;
pub mod summary;
pub mod tables;

// Re-export commonly used types
pub use curve::{compute_curve, Curve, TaxBracket, TaxBundle, TaxCurve, TaxProfile};
pub use error::{Result, TaxError};
pub use schedule::{RateSchedule, RateTier, ScheduleKind, MAX_INCOME};
pub use session::{ConversionRequest, ConversionSession};
pub use summary::{Recommendation, SummaryRow};
pub use tables::{FilingStatus, Household, StateCode, TaxSchedules};
