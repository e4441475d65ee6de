//! Splitting a date range at childbirth events.
//!
//! [`partition`] walks the events in date order with a cursor that starts at
//! the beginning of the range.  Each birth inside the range closes the
//! current cycle segment at the birth date and opens a fully exempt
//! postpartum span; the cursor then jumps to the end of that span.  Whatever
//! is left after the last birth becomes the final segment.
//!
//! The cycle segments and postpartum spans together tile the range exactly:
//! no gaps, no overlaps.  Births dated before the range or on/after its end
//! are ignored.  A birth that falls inside an earlier postpartum span (or on
//! the first day of the range) opens no segment; its span starts at the
//! cursor, and the cursor never passes the end of the range.

use qd_core::errors::Result;
use qd_core::{ensure, Days};
use qd_time::{Date, DateRange};
use tracing::debug;

use crate::history::PostpartumEvent;

/// A stretch of days governed by one cycle profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    /// First day of the segment.
    pub start: Date,
    /// First day after the segment.
    pub end: Date,
    /// Profile segment that applies: 0 before the first birth, `n` after
    /// birth `n`.
    pub cycle_segment_index: u32,
}

impl Segment {
    /// The segment as a range.
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }

    /// Length in days.
    pub fn days(&self) -> Days {
        self.range().days()
    }
}

/// A fully exempt stretch after a birth, clipped to the partitioned range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostpartumSpan {
    /// First exempt day.
    pub start: Date,
    /// First day after the span.
    pub end: Date,
    /// Sequence number of the birth.
    pub sequence_number: u32,
}

impl PostpartumSpan {
    /// The span as a range.
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }

    /// Length in days.
    pub fn days(&self) -> Days {
        self.range().days()
    }
}

/// Result of [`partition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    range: DateRange,
    segments: Vec<Segment>,
    postpartum: Vec<PostpartumSpan>,
}

impl Partition {
    /// The partitioned range.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Cycle segments in date order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Postpartum spans in date order.
    pub fn postpartum(&self) -> &[PostpartumSpan] {
        &self.postpartum
    }

    /// Total postpartum days inside the range.
    pub fn postpartum_days(&self) -> Days {
        self.postpartum.iter().map(PostpartumSpan::days).sum()
    }

    /// Total days covered by cycle segments.
    pub fn segment_days(&self) -> Days {
        self.segments.iter().map(Segment::days).sum()
    }

    /// Return `true` if the range was empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.postpartum.is_empty()
    }
}

/// Split `range` at the births in `events`.
///
/// An empty or inverted range yields an empty partition.
///
/// # Errors
/// [`Error::Validation`](qd_core::Error::Validation) if `events` is not
/// sorted by date.
pub fn partition(range: DateRange, events: &[PostpartumEvent]) -> Result<Partition> {
    for pair in events.windows(2) {
        ensure!(
            pair[0].event_date <= pair[1].event_date,
            "event_date",
            "events are not in date order ({} before {})",
            pair[0].event_date,
            pair[1].event_date
        );
    }

    let mut segments = Vec::new();
    let mut postpartum = Vec::new();
    if range.is_empty() {
        return Ok(Partition {
            range,
            segments,
            postpartum,
        });
    }

    let mut cursor = range.start;
    let mut active = 0;
    for event in events.iter().filter(|e| range.contains(e.event_date)) {
        if event.event_date > cursor {
            segments.push(Segment {
                start: cursor,
                end: event.event_date,
                cycle_segment_index: active,
            });
            cursor = event.event_date;
        }
        let duration = i32::try_from(event.duration_days).unwrap_or(i32::MAX);
        let span_end = event.event_date.saturating_add_days(duration).min(range.end);
        if span_end > cursor {
            postpartum.push(PostpartumSpan {
                start: cursor,
                end: span_end,
                sequence_number: event.sequence_number,
            });
            cursor = span_end;
        }
        active = event.sequence_number;
    }
    if cursor < range.end {
        segments.push(Segment {
            start: cursor,
            end: range.end,
            cycle_segment_index: active,
        });
    }

    let partition = Partition {
        range,
        segments,
        postpartum,
    };
    debug!(
        %range,
        segments = partition.segments.len(),
        postpartum_days = partition.postpartum_days(),
        "partitioned range"
    );
    Ok(partition)
}
