use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::snapshot::ExistingBookingSnapshot;
use crate::models::worker::Specialization;

/// Result of validating a proposed assignment against the snapshot of other
/// bookings. Business failures land here as data, never as errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub error: Option<String>,
    pub warnings: Vec<String>,
    pub assignments_to_cancel: Vec<ExistingBookingSnapshot>,
    pub has_emergency_conflicts: bool,
    pub emergency_conflicts: Vec<ExistingBookingSnapshot>,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            ..Self::default()
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: i32,
    pub specialization_bonus: i32,
    pub availability_bonus: i32,
    pub workload_relief: i32,
    pub emergency_bonus: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.base
            + self.specialization_bonus
            + self.availability_bonus
            + self.workload_relief
            + self.emergency_bonus
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub worker_email: String,
    pub worker_name: String,
    pub score: i32,
    pub breakdown: ScoreBreakdown,
    pub confidence: f64,
    pub reasoning: String,
    pub estimated_completion_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySummary {
    pub worker_email: String,
    pub worker_name: String,
    pub specialization: Specialization,
    pub is_active: bool,
    pub next_fully_available_date: Option<NaiveDate>,
    pub upcoming_workload: usize,
    pub fully_booked_dates: Vec<NaiveDate>,
    pub partially_booked_dates: Vec<NaiveDate>,
    pub availability_score: i64,
    pub active_assignment_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadDistribution {
    pub total_workers: usize,
    pub average_workload: f64,
    pub min_workload: usize,
    pub max_workload: usize,
    pub overloaded_count: usize,
}
