//! Cross-venue spread metric.

use crate::merge::MIN_VENUES_FOR_SPREAD;
use std::collections::BTreeMap;
use xvd_core::{SpreadSample, BPS_SCALE};

/// Compute the spread metric over a merged venue view.
///
/// Scans the map in key order (lexicographic by venue id) with strict
/// comparisons, so on equal mids the first venue holding the extreme value
/// wins the tie.
///
/// Returns `None` when fewer than two venues are present or when
/// `avg_mid <= 0` (the metric is undefined for that instant and the
/// sample is skipped).
pub fn spread_sample(ts_ms: i64, venues: &BTreeMap<String, f64>) -> Option<SpreadSample> {
    if venues.len() < MIN_VENUES_FOR_SPREAD {
        return None;
    }

    let mut iter = venues.iter();
    let (first_venue, first_mid) = iter.next()?;
    let mut min_venue = first_venue;
    let mut min_mid = *first_mid;
    let mut max_venue = first_venue;
    let mut max_mid = *first_mid;
    for (venue, mid) in iter {
        if *mid < min_mid {
            min_venue = venue;
            min_mid = *mid;
        }
        if *mid > max_mid {
            max_venue = venue;
            max_mid = *mid;
        }
    }

    let avg_mid = (min_mid + max_mid) / 2.0;
    if avg_mid <= 0.0 {
        return None;
    }
    let spread_bps = (max_mid - min_mid) / avg_mid * BPS_SCALE;

    Some(SpreadSample {
        ts_ms,
        min_venue: min_venue.clone(),
        max_venue: max_venue.clone(),
        min_mid,
        max_mid,
        spread_bps,
    })
}
