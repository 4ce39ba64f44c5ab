use std::collections::HashMap;

use chrono::NaiveDate;

use crate::config::ScoringConfig;
use crate::engine::scoring;
use crate::models::outcome::{Recommendation, WorkloadDistribution};
use crate::models::request::RepairRequest;
use crate::models::worker::{Specialization, Worker};

pub const OVERLOADED_THRESHOLD: usize = 10;

pub fn available_for_emergency<'a>(workers: &'a [Worker]) -> Vec<&'a Worker> {
    workers
        .iter()
        .filter(|w| w.is_active && w.emergency_capable)
        .collect()
}

pub fn with_specialization<'a>(
    workers: &'a [Worker],
    required: Specialization,
) -> Vec<&'a Worker> {
    workers
        .iter()
        .filter(|w| w.is_active && w.specialization.can_service(required))
        .collect()
}

pub fn available_on_date<'a>(workers: &'a [Worker], date: NaiveDate) -> Vec<&'a Worker> {
    workers.iter().filter(|w| w.is_available_on(date)).collect()
}

pub fn with_light_workload<'a>(
    workers: &'a [Worker],
    reference_date: NaiveDate,
    max_count: usize,
) -> Vec<&'a Worker> {
    workers
        .iter()
        .filter(|w| w.is_active && w.upcoming_workload_count(reference_date) <= max_count)
        .collect()
}

pub fn best_match<'a>(
    workers: &'a [Worker],
    request: &RepairRequest,
    target_date: NaiveDate,
) -> Option<&'a Worker> {
    workers
        .iter()
        .filter(|w| scoring::is_eligible(w, request))
        .max_by_key(|w| scoring::score(w, request, target_date))
}

/// Ranked suggestions for dispatchers; eligibility filters first, then the
/// score orders what remains.
pub fn recommendations(
    workers: &[Worker],
    request: &RepairRequest,
    target_date: NaiveDate,
    top_n: usize,
) -> Vec<Recommendation> {
    let config = ScoringConfig::default();
    let mut ranked: Vec<Recommendation> = workers
        .iter()
        .filter(|w| scoring::is_eligible(w, request))
        .map(|w| {
            let (score, breakdown) = scoring::compute_score(w, request, target_date, &config);
            Recommendation {
                worker_email: w.email.clone(),
                worker_name: w.name.clone(),
                score,
                breakdown,
                confidence: scoring::recommendation_confidence(w, request),
                reasoning: scoring::recommendation_reasoning(w, request, target_date),
                estimated_completion_minutes: scoring::estimated_completion_minutes(w, request),
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(top_n);
    ranked
}

pub fn group_by_specialization(workers: &[Worker]) -> HashMap<Specialization, Vec<&Worker>> {
    let mut groups: HashMap<Specialization, Vec<&Worker>> = HashMap::new();
    for worker in workers.iter().filter(|w| w.is_active) {
        groups.entry(worker.specialization).or_default().push(worker);
    }
    groups
}

pub fn workload_distribution(workers: &[Worker], reference_date: NaiveDate) -> WorkloadDistribution {
    let workloads: Vec<usize> = workers
        .iter()
        .filter(|w| w.is_active)
        .map(|w| w.upcoming_workload_count(reference_date))
        .collect();

    if workloads.is_empty() {
        return WorkloadDistribution::default();
    }

    let total: usize = workloads.iter().sum();
    WorkloadDistribution {
        total_workers: workloads.len(),
        average_workload: total as f64 / workloads.len() as f64,
        min_workload: workloads.iter().copied().min().unwrap_or(0),
        max_workload: workloads.iter().copied().max().unwrap_or(0),
        overloaded_count: workloads.iter().filter(|w| **w > OVERLOADED_THRESHOLD).count(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};

    use super::{
        available_for_emergency, available_on_date, best_match, group_by_specialization,
        recommendations, with_light_workload, with_specialization, workload_distribution,
    };
    use crate::models::request::{RepairRequest, Urgency};
    use crate::models::worker::{Specialization, Worker};

    fn target() -> NaiveDate {
        Utc::now().date_naive() + Duration::days(3)
    }

    fn roster() -> Vec<Worker> {
        vec![
            Worker::new("g.santos@example.com", "Gabriel Santos", Specialization::GeneralMaintenance),
            Worker::new("p.fernandez@example.com", "Paula Fernandez", Specialization::Plumbing),
            Worker::new("j.kim@example.com", "Jisoo Kim", Specialization::Electrical),
        ]
    }

    fn plumbing_request() -> RepairRequest {
        RepairRequest::new(
            "PROP-A",
            "101",
            "Clogged drain",
            "Kitchen sink backs up",
            Urgency::Normal,
        )
    }

    #[test]
    fn best_match_prefers_the_exact_trade() {
        let workers = roster();
        let best = best_match(&workers, &plumbing_request(), target()).unwrap();
        assert_eq!(best.email, "p.fernandez@example.com");
    }

    #[test]
    fn best_match_falls_back_to_general_maintenance() {
        let workers: Vec<Worker> = roster()
            .into_iter()
            .filter(|w| w.specialization != Specialization::Plumbing)
            .collect();

        let best = best_match(&workers, &plumbing_request(), target()).unwrap();
        assert_eq!(best.specialization, Specialization::GeneralMaintenance);
    }

    #[test]
    fn best_match_on_an_empty_roster_is_none() {
        assert!(best_match(&[], &plumbing_request(), target()).is_none());
    }

    #[test]
    fn recommendations_are_ranked_and_truncated() {
        let workers = roster();
        let ranked = recommendations(&workers, &plumbing_request(), target(), 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].worker_email, "p.fernandez@example.com");
        assert!(ranked[0].score >= ranked[1].score);
        assert_eq!(ranked[0].score, ranked[0].breakdown.total());
        assert!(ranked[0].confidence > ranked[1].confidence);
    }

    #[test]
    fn ineligible_trades_never_appear_in_recommendations() {
        let workers = roster();
        let ranked = recommendations(&workers, &plumbing_request(), target(), 10);

        assert!(ranked.iter().all(|r| r.worker_email != "j.kim@example.com"));
    }

    #[test]
    fn roster_filters_respect_activity_flags() {
        let mut workers = roster();
        workers[1].emergency_capable = true;
        workers[2].is_active = false;

        assert_eq!(available_for_emergency(&workers).len(), 1);
        assert_eq!(with_specialization(&workers, Specialization::Plumbing).len(), 2);
        assert_eq!(with_specialization(&workers, Specialization::Electrical).len(), 1);
        assert_eq!(available_on_date(&workers, target()).len(), 2);
    }

    #[test]
    fn light_workload_filter_uses_the_horizon_count() {
        let mut workers = roster();
        workers[0].assign_to_work("WO-1", target()).unwrap();
        workers[0].assign_to_work("WO-2", target() + Duration::days(1)).unwrap();

        assert_eq!(with_light_workload(&workers, Utc::now().date_naive(), 1).len(), 2);
        assert_eq!(with_light_workload(&workers, Utc::now().date_naive(), 2).len(), 3);
    }

    #[test]
    fn grouping_skips_inactive_workers() {
        let mut workers = roster();
        workers[2].is_active = false;

        let groups = group_by_specialization(&workers);
        assert_eq!(groups.len(), 2);
        assert!(!groups.contains_key(&Specialization::Electrical));
    }

    #[test]
    fn workload_distribution_covers_active_workers_only() {
        let mut workers = roster();
        workers[0].assign_to_work("WO-1", target()).unwrap();
        workers[0].assign_to_work("WO-2", target() + Duration::days(1)).unwrap();
        workers[1].assign_to_work("WO-3", target()).unwrap();
        workers.push({
            let mut inactive = Worker::new("idle@example.com", "Idle", Specialization::Painting);
            inactive.is_active = false;
            inactive
        });

        let dist = workload_distribution(&workers, Utc::now().date_naive());
        assert_eq!(dist.total_workers, 3);
        assert_eq!(dist.max_workload, 2);
        assert_eq!(dist.min_workload, 0);
        assert!((dist.average_workload - 1.0).abs() < f64::EPSILON);
        assert_eq!(dist.overloaded_count, 0);
    }

    #[test]
    fn empty_or_fully_inactive_rosters_yield_the_default_distribution() {
        let dist = workload_distribution(&[], Utc::now().date_naive());
        assert_eq!(dist.total_workers, 0);
        assert_eq!(dist.average_workload, 0.0);

        let mut workers = roster();
        for w in &mut workers {
            w.is_active = false;
        }
        let dist = workload_distribution(&workers, Utc::now().date_naive());
        assert_eq!(dist.total_workers, 0);
    }
}
