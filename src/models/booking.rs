use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

const WORK_ORDER_MIN_LEN: usize = 3;
const WORK_ORDER_MAX_LEN: usize = 20;
const MAX_DAYS_AHEAD: i64 = 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionStatus {
    NotCompleted,
    CompletedSuccessfully,
    CompletedUnsuccessfully,
}

/// One worker/date/work-order commitment. Immutable once created; completion
/// produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub work_order: String,
    pub scheduled_date: NaiveDate,
    pub assigned_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub completion: CompletionStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub completion_notes: Option<String>,
}

impl Booking {
    /// No lower bound on the date: historical bookings are reconstructed at
    /// load time. Newly created bookings are expected to be future-dated by
    /// the caller.
    pub fn new(
        work_order: &str,
        scheduled_date: NaiveDate,
        notes: Option<String>,
    ) -> Result<Self, EngineError> {
        let work_order = normalize_work_order(work_order)?;

        let today = Utc::now().date_naive();
        if scheduled_date > today + Duration::days(MAX_DAYS_AHEAD) {
            return Err(EngineError::ScheduledDateTooFar(scheduled_date));
        }

        Ok(Self {
            work_order,
            scheduled_date,
            assigned_at: Utc::now(),
            notes,
            completion: CompletionStatus::NotCompleted,
            completed_at: None,
            completion_notes: None,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.completion != CompletionStatus::NotCompleted
    }

    /// One-shot transition; completing twice is an error.
    pub fn complete(&self, successful: bool, notes: Option<String>) -> Result<Self, EngineError> {
        if self.is_completed() {
            return Err(EngineError::BookingAlreadyCompleted(self.work_order.clone()));
        }

        let mut completed = self.clone();
        completed.completion = if successful {
            CompletionStatus::CompletedSuccessfully
        } else {
            CompletionStatus::CompletedUnsuccessfully
        };
        completed.completed_at = Some(Utc::now());
        completed.completion_notes = notes;
        Ok(completed)
    }

    /// Day-granular overlap against the half-open range starting at `start`.
    pub fn overlaps_with(&self, start: NaiveDate, duration: Duration) -> bool {
        let days = duration.num_days().max(1);
        self.scheduled_date >= start && self.scheduled_date < start + Duration::days(days)
    }

    pub fn days_until_scheduled(&self, from: NaiveDate) -> i64 {
        (self.scheduled_date - from).num_days()
    }

    pub fn is_scheduled_for_today(&self) -> bool {
        self.scheduled_date == Utc::now().date_naive()
    }

    pub fn is_overdue(&self) -> bool {
        !self.is_completed() && self.scheduled_date < Utc::now().date_naive()
    }
}

fn normalize_work_order(raw: &str) -> Result<String, EngineError> {
    let normalized = raw.trim().to_uppercase();

    if normalized.len() < WORK_ORDER_MIN_LEN || normalized.len() > WORK_ORDER_MAX_LEN {
        return Err(EngineError::InvalidWorkOrder(format!(
            "{raw:?} must be {WORK_ORDER_MIN_LEN}-{WORK_ORDER_MAX_LEN} characters"
        )));
    }
    if !normalized.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(EngineError::InvalidWorkOrder(format!(
            "{raw:?} may only contain letters, digits and hyphens"
        )));
    }

    Ok(normalized)
}
