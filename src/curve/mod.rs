//! Tax curve engine: brackets, profiles and curve assembly

mod assembler;
mod bracket;
mod profile;

pub use assembler::{additional_tax, coalesce, compute_curve, Curve, TaxCurve};
pub use bracket::{TaxBracket, TaxBundle};
pub use profile::{build_schedule, TaxProfile};
