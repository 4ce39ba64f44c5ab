use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    Normal,
    High,
    Emergency,
}

impl Urgency {
    pub fn is_emergency(self) -> bool {
        self == Urgency::Emergency
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Draft,
    Submitted,
    Scheduled,
    Done,
    Closed,
    Declined,
    Failed,
}

impl RequestStatus {
    /// A request in a terminal state neither accepts assignments nor blocks
    /// a unit during conflict scans.
    pub fn is_active(self) -> bool {
        !matches!(
            self,
            RequestStatus::Done | RequestStatus::Closed | RequestStatus::Failed | RequestStatus::Declined
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairRequest {
    pub id: Uuid,
    pub property_code: String,
    pub unit: String,
    pub title: String,
    pub description: String,
    pub urgency: Urgency,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl RepairRequest {
    pub fn new(
        property_code: impl Into<String>,
        unit: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        urgency: Urgency,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            property_code: property_code.into(),
            unit: unit.into(),
            title: title.into(),
            description: description.into(),
            urgency,
            status: RequestStatus::Draft,
            created_at: Utc::now(),
        }
    }

    pub fn submit(&mut self) -> Result<(), EngineError> {
        self.transition(RequestStatus::Submitted, &[RequestStatus::Draft])
    }

    pub fn schedule(&mut self) -> Result<(), EngineError> {
        self.transition(RequestStatus::Scheduled, &[RequestStatus::Submitted])
    }

    pub fn decline(&mut self) -> Result<(), EngineError> {
        self.transition(RequestStatus::Declined, &[RequestStatus::Submitted])
    }

    pub fn mark_done(&mut self) -> Result<(), EngineError> {
        self.transition(RequestStatus::Done, &[RequestStatus::Scheduled])
    }

    pub fn close(&mut self) -> Result<(), EngineError> {
        self.transition(RequestStatus::Closed, &[RequestStatus::Done])
    }

    /// Taken when an emergency bumps this request's booking off its slot so
    /// the request can be rescheduled.
    pub fn fail_for_emergency_override(&mut self) -> Result<(), EngineError> {
        self.transition(RequestStatus::Failed, &[RequestStatus::Scheduled])
    }

    fn transition(
        &mut self,
        to: RequestStatus,
        allowed_from: &[RequestStatus],
    ) -> Result<(), EngineError> {
        if !allowed_from.contains(&self.status) {
            return Err(EngineError::InvalidTransition(format!(
                "{:?} -> {:?}",
                self.status, to
            )));
        }
        self.status = to;
        Ok(())
    }
}
