//! Date-indexed day arena used while scheduling.
//!
//! Days are stored once in a `Vec` and looked up through a `BTreeMap`
//! keyed on the date, so lookups stay logarithmic over long projects and
//! the final output comes out sorted without a separate sort pass.
//! Placed fragments are addressed by [`PartHandle`]s, which lets the
//! scheduler backfill `total_parts` once a task is complete.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{DaySchedule, TaskPart};

/// Location of a placed fragment: day slot and position within that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartHandle {
    day: usize,
    part: usize,
}

/// Arena of scheduled days.
#[derive(Debug, Default)]
pub struct DayBook {
    days: Vec<DaySchedule>,
    index: BTreeMap<NaiveDate, usize>,
}

impl DayBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot of the day for `date`, creating it with `capacity` if absent.
    ///
    /// An existing day keeps its capacity.
    pub fn get_or_create(&mut self, date: NaiveDate, capacity: f64) -> usize {
        if let Some(&slot) = self.index.get(&date) {
            return slot;
        }
        let slot = self.days.len();
        self.days.push(DaySchedule::new(date, capacity));
        self.index.insert(date, slot);
        slot
    }

    /// Slot of the day for `date`, if it exists.
    pub fn slot_of(&self, date: NaiveDate) -> Option<usize> {
        self.index.get(&date).copied()
    }

    /// Day at `slot`.
    pub fn day(&self, slot: usize) -> &DaySchedule {
        &self.days[slot]
    }

    /// Mutable day at `slot`.
    pub fn day_mut(&mut self, slot: usize) -> &mut DaySchedule {
        &mut self.days[slot]
    }

    /// Appends a fragment to a day, consuming its hours from the day's
    /// remaining capacity.
    pub fn place(&mut self, slot: usize, part: TaskPart) -> PartHandle {
        let day = &mut self.days[slot];
        day.remaining_capacity -= part.hours_spent;
        day.parts.push(part);
        PartHandle {
            day: slot,
            part: day.parts.len() - 1,
        }
    }

    /// Sets `total_parts` on every handled fragment.
    pub fn finalize(&mut self, handles: &[PartHandle]) {
        let total = handles.len();
        for h in handles {
            self.days[h.day].parts[h.part].total_parts = total;
        }
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether no day has been created.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Consumes the book, returning days in ascending date order.
    pub fn into_days(self) -> Vec<DaySchedule> {
        let mut slots: Vec<Option<DaySchedule>> = self.days.into_iter().map(Some).collect();
        self.index
            .values()
            .filter_map(|&slot| slots[slot].take())
            .collect()
    }
}
