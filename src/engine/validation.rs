use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::outcome::ValidationOutcome;
use crate::models::snapshot::ExistingBookingSnapshot;
use crate::models::worker::Specialization;

/// Everything the validator needs to judge one assignment, detached from the
/// live request and worker so callers can validate before mutating anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentProposal {
    pub request_id: Uuid,
    pub property_code: String,
    pub unit: String,
    pub scheduled_date: NaiveDate,
    pub worker_email: String,
    pub worker_specialization: Specialization,
    pub required_specialization: Specialization,
    pub is_emergency: bool,
}

struct ConflictIndex<'a> {
    by_slot: HashMap<(&'a str, &'a str, NaiveDate), Vec<&'a ExistingBookingSnapshot>>,
}

impl<'a> ConflictIndex<'a> {
    fn build(snapshots: &'a [ExistingBookingSnapshot]) -> Self {
        let mut by_slot: HashMap<_, Vec<_>> = HashMap::new();
        for snapshot in snapshots.iter().filter(|s| s.status.is_active()) {
            by_slot
                .entry((
                    snapshot.property_code.as_str(),
                    snapshot.unit.as_str(),
                    snapshot.scheduled_date,
                ))
                .or_default()
                .push(snapshot);
        }
        Self { by_slot }
    }

    fn conflicts_for(
        &self,
        property_code: &str,
        unit: &str,
        date: NaiveDate,
        excluding_request: Uuid,
    ) -> Vec<&'a ExistingBookingSnapshot> {
        self.by_slot
            .get(&(property_code, unit, date))
            .map(|entries| {
                entries
                    .iter()
                    .filter(|s| s.request_id != excluding_request)
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Same unit, same property, same date is a conflict. Emergencies may bump
/// normal bookings; colliding emergencies are surfaced, never auto-resolved.
pub fn validate_assignment(
    proposal: &AssignmentProposal,
    existing: &[ExistingBookingSnapshot],
) -> ValidationOutcome {
    if !proposal
        .worker_specialization
        .can_service(proposal.required_specialization)
    {
        warn!(
            worker = %proposal.worker_email,
            specialization = %proposal.worker_specialization,
            required = %proposal.required_specialization,
            "assignment rejected on specialization"
        );
        return ValidationOutcome::invalid(format!(
            "worker {} has {} specialization but the request requires {}",
            proposal.worker_email, proposal.worker_specialization, proposal.required_specialization
        ));
    }

    let index = ConflictIndex::build(existing);
    let conflicts = index.conflicts_for(
        &proposal.property_code,
        &proposal.unit,
        proposal.scheduled_date,
        proposal.request_id,
    );

    if conflicts.is_empty() {
        return ValidationOutcome::valid();
    }

    if !proposal.is_emergency {
        warn!(
            request = %proposal.request_id,
            property = %proposal.property_code,
            unit = %proposal.unit,
            date = %proposal.scheduled_date,
            conflicts = conflicts.len(),
            "assignment rejected on unit conflict"
        );
        return ValidationOutcome::invalid(format!(
            "unit {} at {} already has a booking on {}",
            proposal.unit, proposal.property_code, proposal.scheduled_date
        ));
    }

    let mut outcome = ValidationOutcome::valid();
    for conflict in conflicts {
        if conflict.is_emergency {
            outcome.has_emergency_conflicts = true;
            outcome.warnings.push(format!(
                "emergency booking {} also holds unit {} on {}; resolve manually",
                conflict.work_order, conflict.unit, conflict.scheduled_date
            ));
            outcome.emergency_conflicts.push(conflict.clone());
        } else {
            outcome.warnings.push(format!(
                "booking {} for worker {} will be cancelled for this emergency",
                conflict.work_order, conflict.worker_email
            ));
            outcome.assignments_to_cancel.push(conflict.clone());
        }
    }

    info!(
        request = %proposal.request_id,
        to_cancel = outcome.assignments_to_cancel.len(),
        emergency_conflicts = outcome.emergency_conflicts.len(),
        "emergency assignment validated against existing bookings"
    );
    outcome
}

/// Projects the cancellation set to the request ids a caller must reschedule.
pub fn process_emergency_override(to_cancel: &[ExistingBookingSnapshot]) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for snapshot in to_cancel {
        if !ids.contains(&snapshot.request_id) {
            ids.push(snapshot.request_id);
        }
    }
    ids
}
