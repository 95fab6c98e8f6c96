//! Scheduling cursor: the "current date" threaded through milestones and
//! tasks.
//!
//! The cursor is a plain value. Each scheduling step takes it in and hands
//! an advanced copy back, so day-advancement rules can be tested alone.

use chrono::NaiveDate;

use crate::models::{next_day, DayCapacities};

/// Date position of the sequential scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SchedulingCursor {
    date: NaiveDate,
}

impl SchedulingCursor {
    /// Places the cursor on `date`.
    pub fn at(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Current date.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Moves to the next calendar day.
    pub fn next_day(self) -> Self {
        Self::at(next_day(self.date))
    }

    /// Moves forward to the first working day at or after the current date.
    ///
    /// Returns `None` if no weekday has capacity.
    pub fn to_working_day(self, capacities: &DayCapacities) -> Option<Self> {
        capacities.next_working_day(self.date).map(Self::at)
    }

    /// Jumps to a pinned date, forward or backward.
    pub fn jump_to(self, date: NaiveDate) -> Self {
        Self::at(date)
    }

    /// Start cursor for a milestone.
    ///
    /// The start is the later of `min_start` (gate) and `requested` (the
    /// milestone's own start date), moved forward to a working day. With
    /// no working weekday the unadjusted start is kept.
    pub fn milestone_start(
        min_start: NaiveDate,
        requested: Option<NaiveDate>,
        capacities: &DayCapacities,
    ) -> Self {
        let raw = requested.map_or(min_start, |r| r.max(min_start));
        let cursor = Self::at(raw);
        cursor.to_working_day(capacities).unwrap_or(cursor)
    }
}
