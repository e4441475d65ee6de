//! Prayer and fasting exemption accounting.
//!
//! # Prayer
//! Each cycle segment contributes one cycle's worth of exempt days for every
//! whole approximate month it spans:
//!
//! ```text
//! exempt(segment) = floor(days / approx_month_days) * min(duration, max_cycle_days)
//! ```
//!
//! Postpartum days are added in full and the total is clamped to the range
//! length.  Every daily prayer is owed once per remaining day.
//!
//! # Fasting
//! For each approximate fasting month (see [`lunar`](crate::lunar)) the
//! postpartum days inside the block are exempt in full, and each cycle
//! segment contributes its proportional share
//! `floor(overlap * duration / approx_month_days)`.  The exempt count is
//! subtracted from the full month length and the result clamped to the
//! number of block days that fall inside the range.

use std::collections::BTreeMap;

use qd_core::Days;
use qd_time::{Date, DateRange};
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::history::{cycle_days_for, CycleProfile};
use crate::lunar::LunarCalendar;
use crate::partition::{Partition, Segment};

/// Day counts for the prayer obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrayerDays {
    /// Days in the range.
    pub range_days: Days,
    /// Estimated cycle-exempt days.
    pub cycle_days: Days,
    /// Postpartum-exempt days.
    pub postpartum_days: Days,
    /// Total exempt days, clamped to the range.
    pub exempt_days: Days,
    /// Days on which each daily prayer is owed.
    pub owed_days: Days,
}

/// Compute the prayer day counts over `range`.
///
/// `segments` and `postpartum_exempt_days` come from
/// [`partition`](crate::partition::partition) of the same range.  An empty
/// or inverted range gives all zeros.
pub fn compute_prayer_days(
    range: DateRange,
    segments: &[Segment],
    profiles: &[CycleProfile],
    postpartum_exempt_days: Days,
    config: &CalculatorConfig,
) -> PrayerDays {
    if range.is_empty() {
        return PrayerDays::default();
    }
    let range_days = range.days();
    let month = u64::from(config.approx_month_days.max(1));

    let cycle: u64 = segments
        .iter()
        .map(|s| {
            let per_month = u64::from(cycle_days_for(profiles, s.cycle_segment_index, config));
            u64::from(s.days()) / month * per_month
        })
        .sum();
    let cycle_days = clamp_days(cycle, range_days);
    let exempt_days = clamp_days(cycle + u64::from(postpartum_exempt_days), range_days);

    PrayerDays {
        range_days,
        cycle_days,
        postpartum_days: postpartum_exempt_days.min(range_days),
        exempt_days,
        owed_days: range_days - exempt_days,
    }
}

/// One approximate fasting month, clipped to the requested range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FastBlock {
    /// First day of the clipped block.
    pub start: Date,
    /// First day after the clipped block.
    pub end: Date,
    /// Days of the block inside the range.
    pub days: Days,
    /// Estimated exempt days inside the block.
    pub exempt_days: Days,
    /// Fasting days owed for this block.
    pub owed_days: Days,
}

/// Fasting day counts, one block per year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FastDays {
    /// Blocks keyed by the year of the fasting month.
    pub blocks: BTreeMap<u16, FastBlock>,
}

impl FastDays {
    /// Owed days for `year`, if its block overlaps the range.
    pub fn owed_for(&self, year: u16) -> Option<Days> {
        self.blocks.get(&year).map(|b| b.owed_days)
    }

    /// Sum of owed days over every block.
    pub fn total_owed(&self) -> u64 {
        self.blocks.values().map(|b| u64::from(b.owed_days)).sum()
    }

    /// Return `true` if no block overlaps the range.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Compute the fasting day counts over `range`.
///
/// `partition` must cover the same range.  With no profiles and no
/// postpartum spans (men) every block day inside the range is owed.
pub fn compute_fast_days(
    range: DateRange,
    partition: &Partition,
    profiles: &[CycleProfile],
    calendar: &LunarCalendar,
    config: &CalculatorConfig,
) -> FastDays {
    let month = u64::from(config.approx_month_days.max(1));
    let full_month = u64::from(calendar.month_days());

    let blocks = calendar
        .blocks_overlapping(range)
        .into_iter()
        .map(|(year, block)| {
            let days = block.days();
            let postpartum: u64 = partition
                .postpartum()
                .iter()
                .map(|span| u64::from(span.range().overlap_days(&block)))
                .sum();
            let cycle: u64 = partition
                .segments()
                .iter()
                .map(|s| {
                    let overlap = u64::from(s.range().overlap_days(&block));
                    let per_month =
                        u64::from(cycle_days_for(profiles, s.cycle_segment_index, config));
                    overlap * per_month / month
                })
                .sum();
            let exempt_days = clamp_days(postpartum + cycle, days);
            let owed_days = clamp_days(full_month.saturating_sub(postpartum + cycle), days);
            debug!(year, %block, exempt_days, owed_days, "fasting block");
            (
                year,
                FastBlock {
                    start: block.start,
                    end: block.end,
                    days,
                    exempt_days,
                    owed_days,
                },
            )
        })
        .collect();

    FastDays { blocks }
}

fn clamp_days(value: u64, max: Days) -> Days {
    value.min(u64::from(max)) as Days
}
