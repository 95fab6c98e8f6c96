//! Task model.
//!
//! A task is a unit of renovation work owned by a milestone. It is either
//! flexible work (placed wherever capacity allows) or a pinned appointment
//! (`hard_start_date` set), and may be a zero-hour errand marker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Labor role performing a task.
///
/// Serialized with the planner UI's labels; snake_case English names are
/// accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Assignee {
    /// Work done by the homeowner.
    #[default]
    #[serde(rename = "Meg selv", alias = "self_performed")]
    SelfPerformed,
    #[serde(rename = "Snekker", alias = "carpenter")]
    Carpenter,
    #[serde(rename = "Rørlegger", alias = "plumber")]
    Plumber,
    #[serde(rename = "Elektriker", alias = "electrician")]
    Electrician,
    #[serde(rename = "Maler", alias = "painter")]
    Painter,
}

/// Kind of equipment line attached to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    /// Consumed material.
    Material,
    /// Purchased tools and protective gear.
    Equipment,
    /// Rented tools, priced per unit of time.
    Rental,
}

/// An equipment or material line carried by a task.
///
/// The scheduler passes it through to every fragment of the task untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub unit_price: f64,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EquipmentCategory>,
}

impl EquipmentItem {
    /// Creates an uncategorized item with quantity 1.
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit: unit.into(),
            unit_price: 0.0,
            quantity: 1.0,
            category: None,
        }
    }

    /// Sets price and quantity.
    pub fn with_price(mut self, unit_price: f64, quantity: f64) -> Self {
        self.unit_price = unit_price;
        self.quantity = quantity;
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: EquipmentCategory) -> Self {
        self.category = Some(category);
        self
    }
}

/// A unit of work inside a milestone.
///
/// # Kinds
/// - **Errand**: `estimate_hours == 0`. Placed as a zero-hour marker.
/// - **Pinned appointment**: `hard_start_date` set. Always lands on that date.
/// - **Flexible**: everything else. Packed into daily capacity in list order.
///
/// `start_time` ("HH:MM", 24-hour) only has meaning for pinned tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Estimated work hours. Expected to be non-negative.
    pub estimate_hours: f64,
    /// Labor role.
    #[serde(default)]
    pub assignee: Assignee,
    /// Equipment lines passed through to the schedule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<EquipmentItem>,
    /// Fixed appointment date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard_start_date: Option<NaiveDate>,
    /// Appointment time of day ("HH:MM").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
}

impl Task {
    /// Creates a flexible task.
    pub fn new(id: impl Into<String>, name: impl Into<String>, estimate_hours: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            estimate_hours,
            assignee: Assignee::default(),
            equipment: Vec::new(),
            hard_start_date: None,
            start_time: None,
        }
    }

    /// Sets the estimate, clamping negative values to zero.
    pub fn with_estimate(mut self, hours: f64) -> Self {
        self.estimate_hours = hours.max(0.0);
        self
    }

    /// Sets the assignee.
    pub fn with_assignee(mut self, assignee: Assignee) -> Self {
        self.assignee = assignee;
        self
    }

    /// Adds an equipment line.
    pub fn with_equipment(mut self, item: EquipmentItem) -> Self {
        self.equipment.push(item);
        self
    }

    /// Pins the task to a fixed appointment date.
    pub fn pinned_on(mut self, date: NaiveDate) -> Self {
        self.hard_start_date = Some(date);
        self
    }

    /// Sets the appointment time of day ("HH:MM").
    pub fn at(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    /// Whether this task is a pinned appointment.
    #[inline]
    pub fn is_pinned(&self) -> bool {
        self.hard_start_date.is_some()
    }

    /// Whether this task is a zero-hour errand marker.
    #[inline]
    pub fn is_errand(&self) -> bool {
        self.estimate_hours == 0.0
    }
}
