//! Conflict report model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-task conflict flags, keyed by task id.
pub type ConflictMap = HashMap<String, ConflictInfo>;

/// Conflict status of a single task.
///
/// `is_conflicted` (amber) and `is_timed_conflict` (yellow) are never both
/// true; amber wins. Pinned tasks always report both as false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictInfo {
    /// Flexible work overflows the hours left beside an appointment, or
    /// spills past a later appointment in the same milestone.
    pub is_conflicted: bool,
    /// Flexible work does not fit before a timed appointment starts.
    pub is_timed_conflict: bool,
    /// "HH:MM" of the appointment behind a timed conflict.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_appointment_time: Option<String>,
}

impl ConflictInfo {
    /// No conflict.
    pub fn clear() -> Self {
        Self::default()
    }

    /// Whether either flag is set.
    #[inline]
    pub fn has_conflict(&self) -> bool {
        self.is_conflicted || self.is_timed_conflict
    }
}
