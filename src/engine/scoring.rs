use chrono::NaiveDate;

use crate::config::ScoringConfig;
use crate::engine::classifier;
use crate::models::outcome::ScoreBreakdown;
use crate::models::request::RepairRequest;
use crate::models::worker::{Specialization, SpecializationMatch, Worker};

pub const INACTIVE_REASONING: &str = "Worker is inactive";

const EXACT_MATCH_COMPLETION_MINUTES: i64 = 120;
const FALLBACK_COMPLETION_MINUTES: i64 = 180;

pub fn required_specialization(request: &RepairRequest) -> Specialization {
    classifier::classify(&request.title, &request.description)
}

pub fn compute_score(
    worker: &Worker,
    request: &RepairRequest,
    target_date: NaiveDate,
    config: &ScoringConfig,
) -> (i32, ScoreBreakdown) {
    if !worker.is_active {
        return (0, ScoreBreakdown::default());
    }

    let required = required_specialization(request);

    let specialization_bonus = match worker.specialization.match_against(required) {
        SpecializationMatch::Exact => config.exact_match_bonus,
        SpecializationMatch::GeneralFallback => config.general_fallback_bonus,
        SpecializationMatch::None => 0,
    };

    let availability_bonus = if worker.is_available_on(target_date) {
        config.availability_bonus
    } else {
        0
    };

    let workload = worker.upcoming_workload_count(target_date) as i32;
    let workload_relief = (config.workload_relief_cap - workload).max(0);

    let emergency_bonus = if request.urgency.is_emergency() {
        config.emergency_bonus
    } else {
        0
    };

    let breakdown = ScoreBreakdown {
        base: config.base_score,
        specialization_bonus,
        availability_bonus,
        workload_relief,
        emergency_bonus,
    };

    (breakdown.total(), breakdown)
}

pub fn score(worker: &Worker, request: &RepairRequest, target_date: NaiveDate) -> i32 {
    compute_score(worker, request, target_date, &ScoringConfig::default()).0
}

/// Hard filter applied before any ranking; scoring only orders the workers
/// that pass it.
pub fn is_eligible(worker: &Worker, request: &RepairRequest) -> bool {
    worker.is_active
        && worker.specialization.can_service(required_specialization(request))
        && request.status.is_active()
}

pub fn recommendation_confidence(worker: &Worker, request: &RepairRequest) -> f64 {
    if !worker.is_active {
        return 0.0;
    }

    match worker.specialization.match_against(required_specialization(request)) {
        SpecializationMatch::Exact => {
            if request.urgency.is_emergency() {
                0.95
            } else {
                0.90
            }
        }
        SpecializationMatch::GeneralFallback => 0.70,
        SpecializationMatch::None => 0.40,
    }
}

pub fn recommendation_reasoning(
    worker: &Worker,
    request: &RepairRequest,
    target_date: NaiveDate,
) -> String {
    if !worker.is_active {
        return INACTIVE_REASONING.to_string();
    }

    let required = required_specialization(request);
    let mut parts = Vec::new();

    match worker.specialization.match_against(required) {
        SpecializationMatch::Exact => {
            parts.push(format!("exact {required} specialization"));
        }
        SpecializationMatch::GeneralFallback => {
            parts.push(format!("general maintenance coverage for {required} work"));
        }
        SpecializationMatch::None => {
            parts.push(format!("no {required} specialization"));
        }
    }

    if worker.is_available_on(target_date) {
        parts.push(format!("available on {target_date}"));
    } else {
        parts.push(format!("fully booked on {target_date}"));
    }

    if request.urgency.is_emergency() {
        if worker.emergency_capable {
            parts.push("equipped for emergency callouts".to_string());
        } else {
            parts.push("not equipped for emergency callouts".to_string());
        }
    }

    parts.join("; ")
}

pub fn estimated_completion_minutes(worker: &Worker, request: &RepairRequest) -> i64 {
    if !worker.is_active {
        return 0;
    }

    match worker.specialization.match_against(required_specialization(request)) {
        SpecializationMatch::Exact => EXACT_MATCH_COMPLETION_MINUTES,
        _ => FALLBACK_COMPLETION_MINUTES,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};

    use super::{
        compute_score, estimated_completion_minutes, is_eligible, recommendation_confidence,
        recommendation_reasoning, required_specialization, score, INACTIVE_REASONING,
    };
    use crate::config::ScoringConfig;
    use crate::models::request::{RepairRequest, Urgency};
    use crate::models::worker::{Specialization, Worker};

    fn target() -> NaiveDate {
        Utc::now().date_naive() + Duration::days(3)
    }

    fn worker(specialization: Specialization) -> Worker {
        Worker::new("m.okafor@example.com", "Maya Okafor", specialization)
    }

    fn plumbing_request(urgency: Urgency) -> RepairRequest {
        RepairRequest::new(
            "PROP-A",
            "101",
            "Burst pipe in bathroom",
            "Water spraying from the supply line",
            urgency,
        )
    }

    #[test]
    fn title_and_description_drive_the_required_trade() {
        let request = plumbing_request(Urgency::Normal);
        assert_eq!(required_specialization(&request), Specialization::Plumbing);
    }

    #[test]
    fn exact_match_scores_above_three_hundred() {
        let s = score(&worker(Specialization::Plumbing), &plumbing_request(Urgency::Normal), target());
        assert!(s > 300, "got {s}");
    }

    #[test]
    fn general_fallback_lands_between_exact_and_nothing() {
        let request = plumbing_request(Urgency::Normal);
        let exact = score(&worker(Specialization::Plumbing), &request, target());
        let general = score(&worker(Specialization::GeneralMaintenance), &request, target());

        assert!(general > 200 && general < 400, "got {general}");
        assert!(general < exact);
    }

    #[test]
    fn emergency_lifts_an_exact_match_past_330() {
        let s = score(
            &worker(Specialization::Plumbing),
            &plumbing_request(Urgency::Emergency),
            target(),
        );
        assert!(s > 330, "got {s}");
    }

    #[test]
    fn inactive_worker_scores_zero_with_empty_breakdown() {
        let mut w = worker(Specialization::Plumbing);
        w.is_active = false;

        let (s, breakdown) = compute_score(
            &w,
            &plumbing_request(Urgency::Emergency),
            target(),
            &ScoringConfig::default(),
        );
        assert_eq!(s, 0);
        assert_eq!(breakdown.total(), 0);
    }

    #[test]
    fn busy_worker_loses_availability_and_relief_points() {
        let date = target();
        let mut busy = worker(Specialization::Plumbing);
        busy.assign_to_work("WO-1", date).unwrap();
        busy.assign_to_work("WO-2", date).unwrap();

        let request = plumbing_request(Urgency::Normal);
        let fresh_score = score(&worker(Specialization::Plumbing), &request, date);
        let busy_score = score(&busy, &request, date);

        assert!(busy_score < fresh_score);
    }

    #[test]
    fn eligibility_filters_trade_activity_and_request_state() {
        let request = plumbing_request(Urgency::Normal);
        assert!(is_eligible(&worker(Specialization::Plumbing), &request));
        assert!(is_eligible(&worker(Specialization::GeneralMaintenance), &request));
        assert!(!is_eligible(&worker(Specialization::Painting), &request));

        let mut inactive = worker(Specialization::Plumbing);
        inactive.is_active = false;
        assert!(!is_eligible(&inactive, &request));

        let mut closed = plumbing_request(Urgency::Normal);
        closed.submit().unwrap();
        closed.decline().unwrap();
        assert!(!is_eligible(&worker(Specialization::Plumbing), &closed));
    }

    #[test]
    fn confidence_is_graded_by_match_quality() {
        let normal = plumbing_request(Urgency::Normal);
        let emergency = plumbing_request(Urgency::Emergency);

        assert_eq!(recommendation_confidence(&worker(Specialization::Plumbing), &normal), 0.90);
        assert_eq!(recommendation_confidence(&worker(Specialization::Plumbing), &emergency), 0.95);
        assert_eq!(
            recommendation_confidence(&worker(Specialization::GeneralMaintenance), &normal),
            0.70
        );
        assert_eq!(recommendation_confidence(&worker(Specialization::Painting), &normal), 0.40);

        let mut inactive = worker(Specialization::Plumbing);
        inactive.is_active = false;
        assert_eq!(recommendation_confidence(&inactive, &normal), 0.0);
    }

    #[test]
    fn reasoning_names_the_match_and_the_date() {
        let request = plumbing_request(Urgency::Normal);
        let date = target();

        let text = recommendation_reasoning(&worker(Specialization::Plumbing), &request, date);
        assert!(text.contains("exact Plumbing specialization"));
        assert!(text.contains(&date.to_string()));

        let mut inactive = worker(Specialization::Plumbing);
        inactive.is_active = false;
        assert_eq!(recommendation_reasoning(&inactive, &request, date), INACTIVE_REASONING);
    }

    #[test]
    fn completion_estimate_rewards_the_exact_trade() {
        let request = plumbing_request(Urgency::Normal);
        assert_eq!(
            estimated_completion_minutes(&worker(Specialization::Plumbing), &request),
            120
        );
        assert_eq!(
            estimated_completion_minutes(&worker(Specialization::GeneralMaintenance), &request),
            180
        );

        let mut inactive = worker(Specialization::Plumbing);
        inactive.is_active = false;
        assert_eq!(estimated_completion_minutes(&inactive, &request), 0);
    }
}
