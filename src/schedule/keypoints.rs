//! Keypoints: conversion amounts at which a schedule boundary is crossed

use super::RateSchedule;

impl RateSchedule {
    /// Offsets from `base_income` at which each remaining bound is reached,
    /// limited to conversions below `max_conversion`
    ///
    /// Bounds already behind the taxpayer are skipped; scanning stops at the
    /// first bound out of reach. The result is ascending by construction.
    pub fn keypoints(&self, base_income: f64, max_conversion: f64) -> Vec<f64> {
        let mut points = Vec::new();
        for tier in &self.tiers {
            if base_income > tier.upper_bound {
                continue;
            }
            if base_income + max_conversion > tier.upper_bound {
                points.push(tier.upper_bound - base_income);
            } else {
                break;
            }
        }
        points
    }
}

/// Free-function form of [`RateSchedule::keypoints`]
pub fn keypoints(base_income: f64, schedule: &RateSchedule, max_conversion: f64) -> Vec<f64> {
    schedule.keypoints(base_income, max_conversion)
}

/// Sorted union of keypoint lists with equal values collapsed
pub fn unique_keypoints(lists: &[&[f64]]) -> Vec<f64> {
    let mut points: Vec<f64> = lists.iter().flat_map(|l| l.iter().copied()).collect();
    points.sort_by(f64::total_cmp);
    points.dedup();
    points
}

/// Ordered merge of two ascending lists
///
/// A value present in both lists is kept twice, so a shared keypoint still
/// produces a zero-width interval between its two copies.
pub fn merge_keypoints(left: &[f64], right: &[f64]) -> Vec<f64> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}
