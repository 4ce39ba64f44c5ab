use chrono::NaiveDate;
use thiserror::Error;

/// Invariant violations: bad data reaching a constructor or an illegal
/// state transition. These should never occur given valid upstream input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid work order number: {0}")]
    InvalidWorkOrder(String),

    #[error("invalid time slot: {0}")]
    InvalidTimeSlot(String),

    #[error("booking {0} is already completed")]
    BookingAlreadyCompleted(String),

    #[error("scheduled date {0} is more than one year ahead")]
    ScheduledDateTooFar(NaiveDate),

    #[error("invalid request transition: {0}")]
    InvalidTransition(String),

    #[error("worker {0} is not active")]
    InactiveWorker(String),

    #[error("worker {worker} is fully booked on {date}")]
    DateFullyBooked { worker: String, date: NaiveDate },

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Business rejections from worker-level assignment checks. Returned as
/// values so the caller can retry with another worker or date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentRejection {
    #[error("worker {0} is not active")]
    WorkerInactive(String),

    #[error("scheduled date {0} must be in the future")]
    DateNotInFuture(NaiveDate),
}
