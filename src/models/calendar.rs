//! Project calendar: start date and per-weekday capacity.
//!
//! # Weekday Numbering
//! Weekdays are numbered 0 (Sunday) through 6 (Saturday). A weekday with
//! capacity 0 is non-working: flexible work never lands on it, although a
//! pinned appointment may.
//!
//! # Dates
//! All dates are calendar dates (`NaiveDate`), i.e. already normalized to
//! local midnight. No time zone arithmetic takes place.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Upper bound for a single weekday's capacity (hours).
pub const MAX_DAY_HOURS: f64 = 24.0;

/// Weekday number of a date (0 = Sunday .. 6 = Saturday).
#[inline]
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// The calendar day after `date`.
///
/// Saturates at `NaiveDate::MAX`.
#[inline]
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)
}

/// Available work hours per weekday.
///
/// Missing weekdays read as capacity 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayCapacities(BTreeMap<u8, f64>);

impl DayCapacities {
    /// Creates a table with every weekday at capacity 0.
    pub fn empty() -> Self {
        Self((0..7).map(|d| (d, 0.0)).collect())
    }

    /// Creates a table with Monday–Friday at `hours` and the weekend off.
    pub fn weekdays(hours: f64) -> Self {
        Self::empty()
            .with(1, hours)
            .with(2, hours)
            .with(3, hours)
            .with(4, hours)
            .with(5, hours)
    }

    /// Sets a weekday's capacity (builder form of [`set`](Self::set)).
    pub fn with(mut self, weekday: u8, hours: f64) -> Self {
        self.set(weekday, hours);
        self
    }

    /// Sets a weekday's capacity, clamped to `0..=24` hours.
    ///
    /// Weekdays outside `0..=6` are ignored.
    pub fn set(&mut self, weekday: u8, hours: f64) {
        if weekday > 6 {
            return;
        }
        self.0.insert(weekday, hours.clamp(0.0, MAX_DAY_HOURS));
    }

    /// Capacity for a weekday number.
    #[inline]
    pub fn get(&self, weekday: u8) -> f64 {
        self.0.get(&weekday).copied().unwrap_or(0.0)
    }

    /// Capacity for the weekday of `date`.
    #[inline]
    pub fn for_date(&self, date: NaiveDate) -> f64 {
        self.get(weekday_number(date))
    }

    /// Whether `date` falls on a working weekday.
    #[inline]
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.for_date(date) > 0.0
    }

    /// Whether any weekday has positive capacity.
    pub fn has_working_day(&self) -> bool {
        (0..7).any(|d| self.get(d) > 0.0)
    }

    /// First working day at or after `date`.
    ///
    /// Returns `None` if no weekday has capacity.
    pub fn next_working_day(&self, date: NaiveDate) -> Option<NaiveDate> {
        let mut candidate = date;
        for _ in 0..7 {
            if self.is_working_day(candidate) {
                return Some(candidate);
            }
            candidate = next_day(candidate);
        }
        None
    }

    /// Raw entries, including any out-of-range keys read from input.
    pub fn entries(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.0.iter().map(|(&d, &h)| (d, h))
    }
}

impl Default for DayCapacities {
    /// Mon–Fri 8h, Saturday 4h, Sunday off.
    fn default() -> Self {
        Self::weekdays(8.0).with(6, 4.0)
    }
}

/// Project-level scheduling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Earliest date the plan may begin.
    pub start_date: NaiveDate,
    /// Work hours per weekday.
    #[serde(default)]
    pub day_capacities: DayCapacities,
}

impl ProjectConfig {
    /// Creates a config with the default renovation week.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            day_capacities: DayCapacities::default(),
        }
    }

    /// Replaces the capacity table.
    pub fn with_capacities(mut self, capacities: DayCapacities) -> Self {
        self.day_capacities = capacities;
        self
    }

    /// Loads a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Configured capacity for the weekday of `date`.
    #[inline]
    pub fn capacity_for(&self, date: NaiveDate) -> f64 {
        self.day_capacities.for_date(date)
    }
}
