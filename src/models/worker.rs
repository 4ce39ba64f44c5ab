use std::collections::BTreeMap;
use std::fmt;

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AssignmentRejection, EngineError};
use crate::models::booking::Booking;
use crate::models::outcome::AvailabilitySummary;

pub const SLOT_CAPACITY_PER_DAY: usize = 2;
pub const WORKLOAD_HORIZON_DAYS: i64 = 30;
pub const AVAILABILITY_LOOKAHEAD_DAYS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialization {
    Plumbing,
    Electrical,
    Hvac,
    Painting,
    Carpentry,
    Locksmith,
    ApplianceRepair,
    GeneralMaintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecializationMatch {
    Exact,
    GeneralFallback,
    None,
}

impl Specialization {
    /// The one place the general-maintenance fallback rule lives: a general
    /// maintenance worker can service any category at lower priority.
    pub fn match_against(self, required: Specialization) -> SpecializationMatch {
        if self == required {
            SpecializationMatch::Exact
        } else if self == Specialization::GeneralMaintenance {
            SpecializationMatch::GeneralFallback
        } else {
            SpecializationMatch::None
        }
    }

    pub fn can_service(self, required: Specialization) -> bool {
        self.match_against(required) != SpecializationMatch::None
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Specialization::Plumbing => "Plumbing",
            Specialization::Electrical => "Electrical",
            Specialization::Hvac => "HVAC",
            Specialization::Painting => "Painting",
            Specialization::Carpentry => "Carpentry",
            Specialization::Locksmith => "Locksmith",
            Specialization::ApplianceRepair => "Appliance Repair",
            Specialization::GeneralMaintenance => "General Maintenance",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub email: String,
    pub name: String,
    pub specialization: Specialization,
    pub is_active: bool,
    pub emergency_capable: bool,
    pub bookings: Vec<Booking>,
}

impl Worker {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        specialization: Specialization,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            specialization,
            is_active: true,
            emergency_capable: false,
            bookings: Vec::new(),
        }
    }

    fn open_bookings(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.iter().filter(|b| !b.is_completed())
    }

    pub fn bookings_on(&self, date: NaiveDate) -> usize {
        self.open_bookings()
            .filter(|b| b.scheduled_date == date)
            .count()
    }

    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.is_active && self.bookings_on(date) < SLOT_CAPACITY_PER_DAY
    }

    /// Not-completed bookings within the 30-day horizon from `reference_date`.
    pub fn upcoming_workload_count(&self, reference_date: NaiveDate) -> usize {
        if !self.is_active {
            return 0;
        }
        let horizon_end = reference_date + Duration::days(WORKLOAD_HORIZON_DAYS);
        self.open_bookings()
            .filter(|b| b.scheduled_date >= reference_date && b.scheduled_date < horizon_end)
            .count()
    }

    fn booking_histogram(&self, from: NaiveDate, to: NaiveDate) -> BTreeMap<NaiveDate, usize> {
        let mut per_date = BTreeMap::new();
        for booking in self
            .open_bookings()
            .filter(|b| b.scheduled_date >= from && b.scheduled_date < to)
        {
            *per_date.entry(booking.scheduled_date).or_insert(0) += 1;
        }
        per_date
    }

    /// Dates in `[from, to)` holding both daily slots, ascending.
    pub fn booked_dates(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        if !self.is_active {
            return Vec::new();
        }
        self.booking_histogram(from, to)
            .into_iter()
            .filter(|(_, count)| *count >= SLOT_CAPACITY_PER_DAY)
            .map(|(date, _)| date)
            .collect()
    }

    /// Dates in `[from, to)` holding exactly one of the two daily slots.
    pub fn partially_booked_dates(&self, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
        if !self.is_active {
            return Vec::new();
        }
        self.booking_histogram(from, to)
            .into_iter()
            .filter(|(_, count)| *count == 1)
            .map(|(date, _)| date)
            .collect()
    }

    /// Earliest date with zero bookings within the 60-day lookahead.
    pub fn next_fully_available_date(&self, reference_date: NaiveDate) -> Option<NaiveDate> {
        if !self.is_active {
            return None;
        }
        (0..AVAILABILITY_LOOKAHEAD_DAYS)
            .map(|offset| reference_date + Duration::days(offset))
            .find(|date| self.bookings_on(*date) == 0)
    }

    /// Display ranking: lower is better. Inactive workers sort last.
    pub fn availability_score(&self, reference_date: NaiveDate) -> i64 {
        if !self.is_active {
            return i64::MAX;
        }
        let workload = self.upcoming_workload_count(reference_date) as i64;
        match self.next_fully_available_date(reference_date) {
            Some(date) => (date - reference_date).num_days() * 100 + workload,
            None => AVAILABILITY_LOOKAHEAD_DAYS * 100 + workload,
        }
    }

    pub fn active_assignment_count(&self) -> usize {
        if !self.is_active {
            return 0;
        }
        self.open_bookings().count()
    }

    pub fn availability_summary(&self, reference_date: NaiveDate) -> AvailabilitySummary {
        let window_end = reference_date + Duration::days(WORKLOAD_HORIZON_DAYS);
        AvailabilitySummary {
            worker_email: self.email.clone(),
            worker_name: self.name.clone(),
            specialization: self.specialization,
            is_active: self.is_active,
            next_fully_available_date: self.next_fully_available_date(reference_date),
            upcoming_workload: self.upcoming_workload_count(reference_date),
            fully_booked_dates: self.booked_dates(reference_date, window_end),
            partially_booked_dates: self.partially_booked_dates(reference_date, window_end),
            availability_score: self.availability_score(reference_date),
            active_assignment_count: self.active_assignment_count(),
        }
    }

    /// Worker-level business checks before a booking is attempted. Returned
    /// as a value so the caller can retry with another worker or date.
    pub fn validate_assignment(&self, scheduled_date: NaiveDate) -> Result<(), AssignmentRejection> {
        if !self.is_active {
            return Err(AssignmentRejection::WorkerInactive(self.email.clone()));
        }
        if scheduled_date < Utc::now().date_naive() {
            return Err(AssignmentRejection::DateNotInFuture(scheduled_date));
        }
        Ok(())
    }

    /// The only mutation on the worker; call after validation succeeds.
    pub fn assign_to_work(
        &mut self,
        work_order: &str,
        scheduled_date: NaiveDate,
    ) -> Result<(), EngineError> {
        if !self.is_active {
            return Err(EngineError::InactiveWorker(self.email.clone()));
        }
        if self.bookings_on(scheduled_date) >= SLOT_CAPACITY_PER_DAY {
            return Err(EngineError::DateFullyBooked {
                worker: self.email.clone(),
                date: scheduled_date,
            });
        }

        let booking = Booking::new(work_order, scheduled_date, None)?;
        info!(
            worker = %self.email,
            work_order = %booking.work_order,
            date = %scheduled_date,
            "work order assigned"
        );
        self.bookings.push(booking);
        Ok(())
    }
}
