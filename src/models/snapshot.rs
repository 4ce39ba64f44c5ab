use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::request::RequestStatus;
use crate::models::worker::Specialization;

/// Immutable projection of another request's current booking, supplied by
/// the caller for conflict detection. The engine never mutates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingBookingSnapshot {
    pub request_id: Uuid,
    pub property_code: String,
    pub unit: String,
    pub worker_email: String,
    pub worker_specialization: Specialization,
    pub work_order: String,
    pub scheduled_date: NaiveDate,
    pub status: RequestStatus,
    pub is_emergency: bool,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::ExistingBookingSnapshot;
    use crate::models::request::RequestStatus;
    use crate::models::worker::Specialization;

    #[test]
    fn snapshot_survives_a_serde_round_trip() {
        let snapshot = ExistingBookingSnapshot {
            request_id: Uuid::from_u128(7),
            property_code: "PROP-A".to_string(),
            unit: "101".to_string(),
            worker_email: "p.fernandez@example.com".to_string(),
            worker_specialization: Specialization::Plumbing,
            work_order: "WO-1042".to_string(),
            scheduled_date: NaiveDate::from_ymd_opt(2031, 3, 14).unwrap(),
            status: RequestStatus::Scheduled,
            is_emergency: false,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: ExistingBookingSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
