//! Cycle profiles, childbirth records, and their validation.
//!
//! A woman's history is a sequence of [`PostpartumEvent`]s (childbirths,
//! numbered from 1 in date order) and a set of [`CycleProfile`]s, one per
//! life-stage segment: segment 0 is before the first birth, segment `n` is
//! after birth `n`.
//!
//! # Profile fallback
//! A segment with no profile of its own uses the segment-0 profile; with no
//! segment-0 profile either, its cycle duration counts as zero days.  This is
//! a default-value rule, not an error.

use qd_core::errors::{Error, Result};
use qd_core::{ensure, Days};
use qd_time::Date;

use crate::config::CalculatorConfig;

/// Average cycle duration for one life-stage segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CycleProfile {
    /// 0 before the first birth, `n` after birth `n`.
    pub segment_index: u32,
    /// Average number of exempt days per cycle.
    pub average_duration_days: Days,
}

impl CycleProfile {
    /// Create a profile.
    pub fn new(segment_index: u32, average_duration_days: Days) -> Self {
        Self {
            segment_index,
            average_duration_days,
        }
    }
}

/// One childbirth and the postpartum span that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PostpartumEvent {
    /// 1-based position in date order.
    pub sequence_number: u32,
    /// Day of the birth.
    pub event_date: Date,
    /// Length of the fully exempt postpartum span.
    pub duration_days: Days,
}

impl PostpartumEvent {
    /// Create an event.
    pub fn new(sequence_number: u32, event_date: Date, duration_days: Days) -> Self {
        Self {
            sequence_number,
            event_date,
            duration_days,
        }
    }
}

/// Look up the profile for `segment_index` using the fallback rule.
///
/// `profiles` need not be sorted.
pub fn profile_for(profiles: &[CycleProfile], segment_index: u32) -> Option<&CycleProfile> {
    profiles
        .iter()
        .find(|p| p.segment_index == segment_index)
        .or_else(|| profiles.iter().find(|p| p.segment_index == 0))
}

/// Exempt days per approximate month for `segment_index`, capped at the
/// configured maximum; zero when no profile applies.
pub fn cycle_days_for(
    profiles: &[CycleProfile],
    segment_index: u32,
    config: &CalculatorConfig,
) -> Days {
    profile_for(profiles, segment_index)
        .map_or(0, |p| p.average_duration_days.min(config.max_cycle_days))
}

/// A validated set of cycle profiles and childbirth events.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CycleHistory {
    profiles: Vec<CycleProfile>,
    events: Vec<PostpartumEvent>,
}

impl CycleHistory {
    /// A history with no records (men, or women who recorded nothing).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and store `profiles` and `events`.
    ///
    /// Profiles are kept sorted by segment index; events must already be in
    /// date order.
    ///
    /// # Errors
    /// * [`Error::OutOfRange`] for a cycle or postpartum duration outside the
    ///   configured bounds.
    /// * [`Error::Validation`] for duplicate or dangling segment indices and
    ///   for events that are not numbered `1..=N` in strictly increasing date
    ///   order.
    pub fn new(
        mut profiles: Vec<CycleProfile>,
        events: Vec<PostpartumEvent>,
        config: &CalculatorConfig,
    ) -> Result<Self> {
        profiles.sort_by_key(|p| p.segment_index);
        let history = Self { profiles, events };
        history.validate(config)?;
        Ok(history)
    }

    /// Check every record against `config`.
    pub fn validate(&self, config: &CalculatorConfig) -> Result<()> {
        for (i, event) in self.events.iter().enumerate() {
            let expected = i as u32 + 1;
            ensure!(
                event.sequence_number == expected,
                "sequence_number",
                "expected birth #{expected}, got #{}",
                event.sequence_number
            );
            if event.duration_days > config.max_postpartum_days {
                return Err(Error::out_of_range(
                    "postpartum duration",
                    event.duration_days,
                    0,
                    config.max_postpartum_days,
                ));
            }
        }
        for pair in self.events.windows(2) {
            ensure!(
                pair[0].event_date < pair[1].event_date,
                "event_date",
                "birth #{} on {} is not after birth #{} on {}",
                pair[1].sequence_number,
                pair[1].event_date,
                pair[0].sequence_number,
                pair[0].event_date
            );
        }

        for profile in &self.profiles {
            let days = profile.average_duration_days;
            if !(config.min_cycle_days..=config.max_cycle_days).contains(&days) {
                return Err(Error::out_of_range(
                    "duration",
                    days,
                    config.min_cycle_days,
                    config.max_cycle_days,
                ));
            }
            ensure!(
                profile.segment_index as usize <= self.events.len(),
                "segment_index",
                "segment {} refers to a birth that was not recorded ({} recorded)",
                profile.segment_index,
                self.events.len()
            );
        }
        let mut indices: Vec<u32> = self.profiles.iter().map(|p| p.segment_index).collect();
        indices.sort_unstable();
        for pair in indices.windows(2) {
            ensure!(
                pair[0] != pair[1],
                "segment_index",
                "more than one profile for segment {}",
                pair[0]
            );
        }
        Ok(())
    }

    /// Profiles, sorted by segment index.
    pub fn profiles(&self) -> &[CycleProfile] {
        &self.profiles
    }

    /// Childbirth events in date order.
    pub fn events(&self) -> &[PostpartumEvent] {
        &self.events
    }

    /// Return `true` if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty() && self.events.is_empty()
    }

    /// See [`profile_for`].
    pub fn profile_for(&self, segment_index: u32) -> Option<&CycleProfile> {
        profile_for(&self.profiles, segment_index)
    }
}
