//! Conflict detection between flexible work and pinned appointments.
//!
//! # Rules
//!
//! **Hours-based** (per day with configured capacity): when a day carries
//! both pinned and flexible fragments, the flexible hours must fit in
//! what the appointment leaves free:
//! - appointment with a start time: `max(0, start − 08:00)` hours →
//!   overflow is a *timed* conflict (yellow);
//! - otherwise: `weekday capacity − pinned hours` → overflow is an
//!   *amber* conflict.
//!
//! **Date overflow** (per flexible task): amber when the task's last day is
//! strictly after the hard date of a pinned task that follows it in the
//! same milestone.
//!
//! Pinned tasks are never flagged. Amber takes precedence over timed.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use super::appointment::{hours_before, parse_appointment_time};
use crate::models::{ConflictInfo, ConflictMap, DaySchedule, Milestone, ProjectConfig, Task};

/// Detects conflicts for every task across all milestones.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_renovate::conflict::detect_conflicts;
/// use u_renovate::models::{DayCapacities, Milestone, ProjectConfig, Task};
/// use u_renovate::scheduler::calculate_schedule;
///
/// let day = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
/// let config = ProjectConfig::new(day).with_capacities(DayCapacities::weekdays(8.0));
/// let milestones = vec![Milestone::new("m1", "Bad")
///     .with_task(Task::new("tN", "Rive flis", 6.0))
///     .with_task(Task::new("tP", "Rørlegger", 2.0).pinned_on(day).at("13:00"))];
///
/// let schedule = calculate_schedule(&milestones, &config);
/// let conflicts = detect_conflicts(&schedule, &milestones, &config);
/// assert!(conflicts["tN"].is_timed_conflict);
/// assert_eq!(conflicts["tN"].conflicting_appointment_time.as_deref(), Some("13:00"));
/// ```
pub fn detect_conflicts(
    schedule: &[DaySchedule],
    milestones: &[Milestone],
    config: &ProjectConfig,
) -> ConflictMap {
    let last_scheduled = last_scheduled_dates(schedule);
    let pinned = pinned_appointments(milestones);
    let flags = hours_conflicts(schedule, &pinned, config);

    let mut map = ConflictMap::new();
    for milestone in milestones {
        for task in &milestone.tasks {
            if task.is_pinned() {
                map.insert(task.id.clone(), ConflictInfo::clear());
                continue;
            }

            let is_conflicted = flags.amber.contains(task.id.as_str())
                || overflows_appointment(task, milestone, &last_scheduled);
            let is_timed_conflict = !is_conflicted && flags.timed.contains(task.id.as_str());
            map.insert(
                task.id.clone(),
                ConflictInfo {
                    is_conflicted,
                    is_timed_conflict,
                    conflicting_appointment_time: flags.times.get(task.id.as_str()).cloned(),
                },
            );
        }
    }

    debug!(
        tasks = map.len(),
        conflicted = map.values().filter(|c| c.has_conflict()).count(),
        "conflict detection complete"
    );
    map
}

/// Appointment start of a pinned task.
#[derive(Debug, Clone, Copy)]
struct Appointment<'a> {
    /// Raw "HH:MM" text and its parsed value.
    start: Option<(&'a str, NaiveTime)>,
}

/// Output of the hours-based pass.
#[derive(Debug, Default)]
struct HoursFlags<'a> {
    amber: HashSet<&'a str>,
    timed: HashSet<&'a str>,
    /// First appointment time recorded per task.
    times: HashMap<&'a str, String>,
}

/// Latest day on which each task has a fragment.
fn last_scheduled_dates(schedule: &[DaySchedule]) -> HashMap<&str, NaiveDate> {
    let mut last: HashMap<&str, NaiveDate> = HashMap::new();
    for day in schedule {
        for part in &day.parts {
            let entry = last.entry(part.task_id.as_str()).or_insert(day.date);
            if day.date > *entry {
                *entry = day.date;
            }
        }
    }
    last
}

/// Pinned task ids with their parsed start times.
fn pinned_appointments(milestones: &[Milestone]) -> HashMap<&str, Appointment<'_>> {
    milestones
        .iter()
        .flat_map(|m| &m.tasks)
        .filter(|t| t.is_pinned())
        .map(|t| {
            let start = t.start_time.as_deref().and_then(|s| match parse_appointment_time(s) {
                Some(time) => Some((s, time)),
                None => {
                    warn!(task = %t.id, start_time = s, "ignoring malformed appointment time");
                    None
                }
            });
            (t.id.as_str(), Appointment { start })
        })
        .collect()
}

/// Per-day comparison of flexible hours against the room left by
/// appointments.
fn hours_conflicts<'a>(
    schedule: &'a [DaySchedule],
    pinned: &HashMap<&str, Appointment<'_>>,
    config: &ProjectConfig,
) -> HoursFlags<'a> {
    let mut flags = HoursFlags::default();

    for day in schedule {
        let base_capacity = config.capacity_for(day.date);
        // Flexible work never lands on a day without configured capacity.
        if base_capacity <= 0.0 {
            continue;
        }

        let mut pinned_hours = 0.0;
        let mut flexible_hours = 0.0;
        let mut earliest: Option<(&str, NaiveTime)> = None;
        let mut flexible_ids: Vec<&'a str> = Vec::new();

        for part in &day.parts {
            match pinned.get(part.task_id.as_str()) {
                Some(appointment) => {
                    pinned_hours += part.hours_spent;
                    if let Some((text, time)) = appointment.start {
                        if earliest.map_or(true, |(_, e)| time < e) {
                            earliest = Some((text, time));
                        }
                    }
                }
                None => {
                    flexible_hours += part.hours_spent;
                    flexible_ids.push(part.task_id.as_str());
                }
            }
        }

        if pinned_hours == 0.0 || flexible_ids.is_empty() {
            continue;
        }

        let available = match earliest {
            Some((_, time)) => hours_before(time),
            None => base_capacity - pinned_hours,
        };
        if flexible_hours <= available {
            continue;
        }

        debug!(
            date = %day.date,
            flexible_hours,
            available,
            appointment = earliest.map(|(text, _)| text),
            "flexible work overflows appointment day"
        );
        for id in flexible_ids {
            match earliest {
                Some((text, _)) => {
                    flags.timed.insert(id);
                    flags.times.entry(id).or_insert_with(|| text.to_string());
                }
                None => {
                    flags.amber.insert(id);
                }
            }
        }
    }

    flags
}

/// Whether a flexible task's last day falls after a later appointment in
/// its own milestone.
fn overflows_appointment(
    task: &Task,
    milestone: &Milestone,
    last_scheduled: &HashMap<&str, NaiveDate>,
) -> bool {
    let Some(&last) = last_scheduled.get(task.id.as_str()) else {
        return false;
    };
    milestone
        .pinned_after(&task.id)
        .filter_map(|t| t.hard_start_date)
        .any(|wall| last > wall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayCapacities, TaskPart};
    use crate::scheduler::calculate_schedule;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn config() -> ProjectConfig {
        ProjectConfig::new(date(3)).with_capacities(DayCapacities::weekdays(8.0))
    }

    fn task(id: &str, hours: f64) -> Task {
        Task::new(id, id, hours)
    }

    fn pinned(id: &str, hours: f64, on: NaiveDate) -> Task {
        task(id, hours).pinned_on(on)
    }

    fn milestone(id: &str, tasks: Vec<Task>) -> Milestone {
        tasks
            .into_iter()
            .fold(Milestone::new(id, id), Milestone::with_task)
    }

    /// Builds a fragment with placeholder indices.
    fn part(task_id: &str, hours: f64, milestone_id: &str) -> TaskPart {
        let t = task(task_id, hours);
        let m = Milestone::new(milestone_id, milestone_id);
        let mut p = TaskPart::new(&t, &m, hours, 1);
        p.total_parts = 1;
        p
    }

    /// Builds a day from fragments with the given total capacity.
    fn day(on: NaiveDate, parts: Vec<TaskPart>, total: f64) -> DaySchedule {
        let used: f64 = parts.iter().map(|p| p.hours_spent).sum();
        DaySchedule {
            date: on,
            parts,
            remaining_capacity: total - used,
            total_capacity: total,
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(detect_conflicts(&[], &[], &config()).is_empty());
    }

    #[test]
    fn test_day_without_appointment() {
        let schedule = vec![day(date(3), vec![part("t1", 6.0, "m1")], 8.0)];
        let milestones = vec![milestone("m1", vec![task("t1", 6.0)])];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert_eq!(result["t1"], ConflictInfo::clear());
    }

    #[test]
    fn test_exact_boundary_no_conflict() {
        // available = 8 - 2 = 6; flexible = 6
        let schedule = vec![day(
            date(3),
            vec![part("tN", 6.0, "m1"), part("tP", 2.0, "m1")],
            10.0,
        )];
        let milestones = vec![milestone("m1", vec![task("tN", 6.0), pinned("tP", 2.0, date(3))])];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(!result["tN"].has_conflict());
    }

    #[test]
    fn test_timed_appointment_with_room() {
        // 13:00 leaves 5h; 4h flexible fits
        let schedule = vec![day(
            date(3),
            vec![part("tN", 4.0, "m1"), part("tP", 4.0, "m1")],
            10.0,
        )];
        let milestones = vec![milestone(
            "m1",
            vec![task("tN", 4.0), pinned("tP", 4.0, date(3)).at("13:00")],
        )];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(!result["tN"].has_conflict());
    }

    #[test]
    fn test_amber_hours_conflict() {
        // available = 8 - 2 = 6; flexible = 7
        let schedule = vec![day(
            date(3),
            vec![part("tN", 7.0, "m1"), part("tP", 2.0, "m1")],
            10.0,
        )];
        let milestones = vec![milestone("m1", vec![task("tN", 7.0), pinned("tP", 2.0, date(3))])];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(result["tN"].is_conflicted);
        assert!(!result["tN"].is_timed_conflict);
        assert!(result["tN"].conflicting_appointment_time.is_none());
    }

    #[test]
    fn test_amber_marks_every_flexible_task_that_day() {
        let schedule = vec![day(
            date(3),
            vec![
                part("tN1", 4.0, "m1"),
                part("tN2", 3.0, "m1"),
                part("tP", 2.0, "m1"),
            ],
            10.0,
        )];
        let milestones = vec![milestone(
            "m1",
            vec![task("tN1", 4.0), task("tN2", 3.0), pinned("tP", 2.0, date(3))],
        )];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(result["tN1"].is_conflicted);
        assert!(result["tN2"].is_conflicted);
    }

    #[test]
    fn test_timed_conflict() {
        // 13:00 leaves 5h; 6h flexible
        let schedule = vec![day(
            date(3),
            vec![part("tN", 6.0, "m1"), part("tP", 2.0, "m1")],
            10.0,
        )];
        let milestones = vec![milestone(
            "m1",
            vec![task("tN", 6.0), pinned("tP", 2.0, date(3)).at("13:00")],
        )];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(result["tN"].is_timed_conflict);
        assert!(!result["tN"].is_conflicted);
        assert_eq!(result["tN"].conflicting_appointment_time.as_deref(), Some("13:00"));
    }

    #[test]
    fn test_early_appointment() {
        // 09:00 leaves 1h; 3h flexible
        let schedule = vec![day(
            date(3),
            vec![part("tN", 3.0, "m1"), part("tP", 4.0, "m1")],
            10.0,
        )];
        let milestones = vec![milestone(
            "m1",
            vec![task("tN", 3.0), pinned("tP", 4.0, date(3)).at("09:00")],
        )];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(result["tN"].is_timed_conflict);
        assert_eq!(result["tN"].conflicting_appointment_time.as_deref(), Some("09:00"));
    }

    #[test]
    fn test_earliest_appointment_wins() {
        let schedule = vec![day(
            date(3),
            vec![
                part("tN", 2.0, "m1"),
                part("tP1", 1.0, "m1"),
                part("tP2", 1.0, "m1"),
            ],
            10.0,
        )];
        let milestones = vec![milestone(
            "m1",
            vec![
                task("tN", 2.0),
                pinned("tP1", 1.0, date(3)).at("14:00"),
                pinned("tP2", 1.0, date(3)).at("09:00"),
            ],
        )];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert_eq!(result["tN"].conflicting_appointment_time.as_deref(), Some("09:00"));
    }

    #[test]
    fn test_first_recorded_time_kept() {
        // tN overflows two timed days; the first day's time is kept.
        let schedule = vec![
            day(date(3), vec![part("tN", 6.0, "m1"), part("tA", 1.0, "m1")], 9.0),
            day(date(4), vec![part("tN", 6.0, "m1"), part("tB", 1.0, "m1")], 9.0),
        ];
        let milestones = vec![milestone(
            "m1",
            vec![
                task("tN", 12.0),
                pinned("tA", 1.0, date(3)).at("10:00"),
                pinned("tB", 1.0, date(4)).at("09:00"),
            ],
        )];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert_eq!(result["tN"].conflicting_appointment_time.as_deref(), Some("10:00"));
    }

    #[test]
    fn test_timed_conflict_without_date_overflow() {
        // tN ends on the appointment day itself: no overflow, timed only.
        let schedule = vec![
            day(date(3), vec![part("tN", 8.0, "m1")], 8.0),
            day(date(4), vec![part("tN", 4.0, "m1"), part("tP", 2.0, "m1")], 10.0),
        ];
        let milestones = vec![milestone(
            "m1",
            vec![task("tN", 12.0), pinned("tP", 2.0, date(4)).at("10:00")],
        )];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(result["tN"].is_timed_conflict);
        assert!(!result["tN"].is_conflicted);
    }

    #[test]
    fn test_amber_takes_precedence_over_timed() {
        // Mar 4: timed overflow (4h > 2h before 10:00). tN also runs to
        // Mar 5, past tP's date → amber wins.
        let schedule = vec![
            day(date(3), vec![part("tN", 8.0, "m1")], 8.0),
            day(date(4), vec![part("tN", 4.0, "m1"), part("tP", 2.0, "m1")], 10.0),
            day(date(5), vec![part("tN", 4.0, "m1")], 8.0),
        ];
        let milestones = vec![milestone(
            "m1",
            vec![task("tN", 16.0), pinned("tP", 2.0, date(4)).at("10:00")],
        )];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(result["tN"].is_conflicted);
        assert!(!result["tN"].is_timed_conflict);
        // The recorded time is still reported.
        assert_eq!(result["tN"].conflicting_appointment_time.as_deref(), Some("10:00"));
    }

    #[test]
    fn test_date_overflow() {
        let schedule = vec![
            day(date(3), vec![part("tN", 8.0, "m1")], 8.0),
            day(date(4), vec![part("tN", 4.0, "m1"), part("tP", 2.0, "m1")], 10.0),
            day(date(5), vec![part("tN", 4.0, "m1")], 8.0),
        ];
        let milestones = vec![milestone("m1", vec![task("tN", 16.0), pinned("tP", 2.0, date(4))])];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(result["tN"].is_conflicted);
    }

    #[test]
    fn test_ending_on_appointment_day_is_not_overflow() {
        let schedule = vec![
            day(date(3), vec![part("tN", 8.0, "m1")], 8.0),
            day(date(4), vec![part("tN", 4.0, "m1"), part("tP", 2.0, "m1")], 10.0),
        ];
        let milestones = vec![milestone("m1", vec![task("tN", 12.0), pinned("tP", 2.0, date(4))])];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(!result["tN"].is_conflicted);
    }

    #[test]
    fn test_upstream_appointment_not_a_wall() {
        // tP precedes tN in the list, so its date is no wall for tN.
        let schedule = vec![
            day(date(3), vec![part("tP", 2.0, "m1")], 8.0),
            day(date(5), vec![part("tN", 4.0, "m1")], 8.0),
        ];
        let milestones = vec![milestone("m1", vec![pinned("tP", 2.0, date(3)), task("tN", 4.0)])];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(!result["tN"].has_conflict());
    }

    #[test]
    fn test_pinned_never_flagged() {
        let schedule = vec![day(
            date(3),
            vec![part("tN", 8.0, "m1"), part("tP", 2.0, "m1")],
            10.0,
        )];
        let milestones = vec![milestone(
            "m1",
            vec![task("tN", 8.0), pinned("tP", 2.0, date(3)).at("09:00")],
        )];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert_eq!(result["tP"], ConflictInfo::clear());
        assert!(result["tN"].is_timed_conflict);
    }

    #[test]
    fn test_cross_milestone_same_day() {
        let schedule = vec![day(
            date(3),
            vec![part("tN", 7.0, "m1"), part("tP", 2.0, "m2")],
            10.0,
        )];
        let milestones = vec![
            milestone("m1", vec![task("tN", 7.0)]),
            milestone("m2", vec![pinned("tP", 2.0, date(3))]),
        ];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(result["tN"].is_conflicted);
    }

    #[test]
    fn test_cross_milestone_overflow_not_flagged() {
        // tN in m1 runs past tP's date in m2; only same-milestone walls count.
        let schedule = vec![
            day(date(3), vec![part("tP", 2.0, "m2")], 8.0),
            day(date(4), vec![part("tN", 4.0, "m1")], 8.0),
        ];
        let milestones = vec![
            milestone("m1", vec![task("tN", 4.0)]),
            milestone("m2", vec![pinned("tP", 2.0, date(3))]),
        ];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(!result["tN"].has_conflict());
    }

    #[test]
    fn test_non_working_day_skipped() {
        // Saturday has no configured capacity; the hours rule does not apply.
        let saturday = date(7);
        let schedule = vec![day(
            saturday,
            vec![part("tN", 6.0, "m1"), part("tP", 2.0, "m1")],
            8.0,
        )];
        let milestones = vec![milestone("m1", vec![task("tN", 6.0), pinned("tP", 2.0, saturday)])];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(!result["tN"].has_conflict());
    }

    #[test]
    fn test_malformed_time_treated_as_untimed() {
        let schedule = vec![day(
            date(3),
            vec![part("tN", 7.0, "m1"), part("tP", 2.0, "m1")],
            10.0,
        )];
        let milestones = vec![milestone(
            "m1",
            vec![task("tN", 7.0), pinned("tP", 2.0, date(3)).at("1pm")],
        )];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(result["tN"].is_conflicted);
        assert!(!result["tN"].is_timed_conflict);
    }

    #[test]
    fn test_errand_markers_do_not_count_as_appointments() {
        // A zero-hour pinned errand adds no pinned hours.
        let schedule = vec![day(
            date(3),
            vec![part("tN", 8.0, "m1"), part("e1", 0.0, "m1")],
            8.0,
        )];
        let milestones = vec![milestone("m1", vec![task("tN", 8.0), pinned("e1", 0.0, date(3))])];
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(!result["tN"].has_conflict());
        assert_eq!(result["e1"], ConflictInfo::clear());
    }

    #[test]
    fn test_one_entry_per_task() {
        let milestones = vec![
            milestone("m1", vec![task("t1", 4.0), task("t2", 0.0)]),
            milestone("m2", vec![pinned("t3", 2.0, date(10)), task("t4", 3.0)]),
        ];
        let schedule = calculate_schedule(&milestones, &config());
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_scheduled_amber_scenario() {
        // Scheduler output feeding the detector: 7h flexible then a 2h
        // untimed appointment on the same day.
        let milestones = vec![milestone("m1", vec![task("tN", 7.0), pinned("tP", 2.0, date(3))])];
        let schedule = calculate_schedule(&milestones, &config());
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(result["tN"].is_conflicted);
        assert!(!result["tP"].has_conflict());
    }

    #[test]
    fn test_scheduled_date_overflow_scenario() {
        // tN (24h) runs Mar 3–5; tP is pinned to Mar 4 in the same milestone.
        let milestones = vec![milestone("m1", vec![task("tN", 24.0), pinned("tP", 2.0, date(4))])];
        let schedule = calculate_schedule(&milestones, &config());
        let result = detect_conflicts(&schedule, &milestones, &config());
        assert!(result["tN"].is_conflicted);
        assert!(!result["tN"].is_timed_conflict);
    }

    #[test]
    fn test_flags_mutually_exclusive() {
        let milestones = vec![
            milestone(
                "m1",
                vec![
                    task("a", 14.0),
                    pinned("p1", 2.0, date(4)).at("11:00"),
                    task("b", 6.0),
                    pinned("p2", 3.0, date(6)),
                ],
            ),
            milestone("m2", vec![task("c", 9.0), pinned("p3", 1.0, date(10)).at("08:00")]),
        ];
        let schedule = calculate_schedule(&milestones, &config());
        let result = detect_conflicts(&schedule, &milestones, &config());
        for (id, info) in &result {
            assert!(!(info.is_conflicted && info.is_timed_conflict), "{id}");
        }
        for id in ["p1", "p2", "p3"] {
            assert!(!result[id].has_conflict());
        }
    }
}
