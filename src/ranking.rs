//! Brightness ranking and tier slicing
//!
//! Lower magnitude is brighter. Unknown magnitudes are stored as +inf so they
//! sink to the end of the ranking; NaN of either sign lands after them.

use h3o::Resolution;
use std::cmp::Ordering;
use std::ops::Range;

/// Stable ascending sort by magnitude.
pub fn rank_by_magnitude<T>(items: &mut [T], mag: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| compare_magnitudes(mag(a), mag(b)));
}

fn compare_magnitudes(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    }
}

/// Rank and keep the `n` brightest.
pub fn take_brightest<T>(mut items: Vec<T>, n: usize, mag: impl Fn(&T) -> f64) -> Vec<T> {
    rank_by_magnitude(&mut items, mag);
    items.truncate(n);
    items
}

/// `[start, start + count)` clamped to `len`.
pub fn slice_range(len: usize, start: usize, count: usize) -> Range<usize> {
    let start = start.min(len);
    let end = start.saturating_add(count).min(len);
    start..end
}

/// How many ranked stars go into each H3 tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierCounts {
    /// Brightest stars left out entirely
    pub skip: usize,
    pub lvl_0_count: usize,
    pub lvl_1_count: usize,
    /// Put every remaining star into a resolution 2 tier
    pub include_rest: bool,
}

impl TierCounts {
    /// Stars needed to fill the skip window and both fixed tiers
    pub fn requested(&self) -> usize {
        self.skip
            .saturating_add(self.lvl_0_count)
            .saturating_add(self.lvl_1_count)
    }
}

/// A slice of the ranking bucketed at one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierPlan {
    pub resolution: Resolution,
    pub range: Range<usize>,
}

impl TierPlan {
    pub fn table_name(&self) -> String {
        format!("stars_h3_{}", u8::from(self.resolution))
    }
}

/// Lay out the tiers over a ranking of `total` stars.
pub fn plan_tiers(total: usize, counts: &TierCounts) -> Vec<TierPlan> {
    let lvl_1_start = counts.skip.saturating_add(counts.lvl_0_count);
    let mut tiers = vec![
        TierPlan {
            resolution: Resolution::Zero,
            range: slice_range(total, counts.skip, counts.lvl_0_count),
        },
        TierPlan {
            resolution: Resolution::One,
            range: slice_range(total, lvl_1_start, counts.lvl_1_count),
        },
    ];

    let lvl_2_start = counts.requested();
    if counts.include_rest && total > lvl_2_start {
        tiers.push(TierPlan {
            resolution: Resolution::Two,
            range: lvl_2_start..total,
        });
    }

    tiers
}
