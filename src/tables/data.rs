//! Published bracket tables as `(rate, upper_bound)` pairs

use crate::schedule::MAX_INCOME;

pub const FEDERAL_2024_SINGLE: &[(f64, f64)] = &[
    (0.10, 11_600.0),
    (0.12, 47_150.0),
    (0.22, 100_525.0),
    (0.24, 191_950.0),
    (0.32, 243_725.0),
    (0.35, 609_351.0),
    (0.37, MAX_INCOME),
];

pub const FEDERAL_2024_MARRIED: &[(f64, f64)] = &[
    (0.10, 23_200.0),
    (0.12, 94_300.0),
    (0.22, 201_050.0),
    (0.24, 383_900.0),
    (0.32, 487_450.0),
    (0.35, 731_200.0),
    (0.37, MAX_INCOME),
];

pub const FEDERAL_2024_HEAD: &[(f64, f64)] = &[
    (0.10, 16_550.0),
    (0.12, 63_100.0),
    (0.22, 100_500.0),
    (0.24, 191_950.0),
    (0.32, 243_700.0),
    (0.35, 609_350.0),
    (0.37, MAX_INCOME),
];

pub const FEDERAL_2025_SINGLE: &[(f64, f64)] = &[
    (0.10, 11_925.0),
    (0.12, 48_475.0),
    (0.22, 103_350.0),
    (0.24, 197_300.0),
    (0.32, 250_525.0),
    (0.35, 626_350.0),
    (0.37, MAX_INCOME),
];

pub const FEDERAL_2025_MARRIED: &[(f64, f64)] = &[
    (0.10, 23_850.0),
    (0.12, 96_950.0),
    (0.22, 206_700.0),
    (0.24, 394_600.0),
    (0.32, 501_050.0),
    (0.35, 751_600.0),
    (0.37, MAX_INCOME),
];

pub const FEDERAL_2025_HEAD: &[(f64, f64)] = &[
    (0.10, 17_000.0),
    (0.12, 64_850.0),
    (0.22, 103_350.0),
    (0.24, 197_300.0),
    (0.32, 250_500.0),
    (0.35, 626_350.0),
    (0.37, MAX_INCOME),
];

pub const CALIFORNIA_2024_SINGLE: &[(f64, f64)] = &[
    (0.01, 10_756.0),
    (0.02, 25_499.0),
    (0.04, 40_245.0),
    (0.06, 55_866.0),
    (0.08, 70_606.0),
    (0.093, 360_659.0),
    (0.103, 432_787.0),
    (0.113, 721_314.0),
    (0.123, MAX_INCOME),
];

pub const CALIFORNIA_2024_MARRIED: &[(f64, f64)] = &[
    (0.01, 21_512.0),
    (0.02, 50_998.0),
    (0.04, 80_490.0),
    (0.06, 111_732.0),
    (0.08, 141_212.0),
    (0.093, 721_318.0),
    (0.103, 865_574.0),
    (0.113, 1_442_628.0),
    (0.123, MAX_INCOME),
];

pub const CALIFORNIA_2024_HEAD: &[(f64, f64)] = &[
    (0.01, 21_527.0),
    (0.02, 51_000.0),
    (0.04, 65_744.0),
    (0.06, 81_364.0),
    (0.08, 96_107.0),
    (0.093, 490_493.0),
    (0.103, 588_593.0),
    (0.113, 980_987.0),
    (0.123, MAX_INCOME),
];

/// Inflation adjustment applied to the 2024 California table for 2025
pub const CALIFORNIA_2025_CCPI: f64 = 0.03;

pub const GAINS_2024_SINGLE: &[(f64, f64)] = &[(0.0, 47_025.0), (0.15, 518_900.0), (0.20, MAX_INCOME)];
pub const GAINS_2024_MARRIED: &[(f64, f64)] = &[(0.0, 94_050.0), (0.15, 583_750.0), (0.20, MAX_INCOME)];
pub const GAINS_2024_HEAD: &[(f64, f64)] = &[(0.0, 63_000.0), (0.15, 551_350.0), (0.20, MAX_INCOME)];

pub const GAINS_2025_SINGLE: &[(f64, f64)] = &[(0.0, 48_350.0), (0.15, 533_400.0), (0.20, MAX_INCOME)];
pub const GAINS_2025_MARRIED: &[(f64, f64)] = &[(0.0, 96_700.0), (0.15, 600_050.0), (0.20, MAX_INCOME)];
pub const GAINS_2025_HEAD: &[(f64, f64)] = &[(0.0, 64_750.0), (0.15, 566_700.0), (0.20, MAX_INCOME)];

/// NIT thresholds are not indexed, so one table serves every year
pub const NIT_SINGLE: &[(f64, f64)] = &[(0.0, 125_000.0), (0.038, MAX_INCOME)];
pub const NIT_MARRIED: &[(f64, f64)] = &[(0.0, 250_000.0), (0.038, MAX_INCOME)];
pub const NIT_HEAD: &[(f64, f64)] = &[(0.0, 200_000.0), (0.038, MAX_INCOME)];

/// Standard deductions as (single, married, head)
pub const STANDARD_DEDUCTION_2024: (f64, f64, f64) = (14_600.0, 29_200.0, 21_900.0);
pub const STANDARD_DEDUCTION_2025: (f64, f64, f64) = (15_000.0, 30_000.0, 22_500.0);

/// California standard deduction as (single, married, head)
pub const CALIFORNIA_DEDUCTION_2024: (f64, f64, f64) = (5_540.0, 11_080.0, 11_080.0);
