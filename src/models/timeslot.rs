use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

const MIN_DURATION_MINUTES: i64 = 30;
const MAX_DURATION_MINUTES: i64 = 8 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotCategory {
    Standard,
    Morning,
    Afternoon,
    Evening,
    TenantPreferred,
    Emergency,
    Flexible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub category: SlotCategory,
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("literal time is valid")
}

impl TimeSlot {
    pub fn new(
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        category: SlotCategory,
    ) -> Result<Self, EngineError> {
        if date < Utc::now().date_naive() {
            return Err(EngineError::InvalidTimeSlot(format!("date {date} is in the past")));
        }
        if start >= end {
            return Err(EngineError::InvalidTimeSlot(format!(
                "start {start} is not before end {end}"
            )));
        }
        let minutes = (end - start).num_minutes();
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
            return Err(EngineError::InvalidTimeSlot(format!(
                "duration of {minutes} minutes is outside 30 minutes to 8 hours"
            )));
        }

        Ok(Self {
            date,
            start,
            end,
            category,
        })
    }

    /// Maps a tenant's free-text preference to a canonical window. Anything
    /// unrecognized (including "anytime" and empty input) falls back to the
    /// full working day, which is exempt from the 8 hour cap on explicitly
    /// constructed slots.
    pub fn from_preference(date: NaiveDate, preference: &str) -> Result<Self, EngineError> {
        if date < Utc::now().date_naive() {
            return Err(EngineError::InvalidTimeSlot(format!("date {date} is in the past")));
        }

        let text = preference.to_lowercase();
        let (start, end) = if text.contains("morning") {
            (hm(8, 0), hm(12, 0))
        } else if text.contains("afternoon") {
            (hm(12, 0), hm(17, 0))
        } else if text.contains("evening") {
            (hm(17, 0), hm(20, 0))
        } else {
            (hm(8, 0), hm(17, 0))
        };

        Ok(Self {
            date,
            start,
            end,
            category: SlotCategory::TenantPreferred,
        })
    }

    /// The three canonical windows offered when a tenant has no preference.
    pub fn standard_slots_for(date: NaiveDate) -> Result<Vec<Self>, EngineError> {
        Ok(vec![
            Self::new(date, hm(8, 0), hm(12, 0), SlotCategory::Morning)?,
            Self::new(date, hm(12, 0), hm(17, 0), SlotCategory::Afternoon)?,
            Self::new(date, hm(17, 0), hm(20, 0), SlotCategory::Evening)?,
        ])
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn overlaps_with(&self, other: &TimeSlot) -> bool {
        self.date == other.date && self.start < other.end && other.start < self.end
    }

    pub fn is_within_business_hours(&self) -> bool {
        self.start >= hm(7, 0) && self.end <= hm(21, 0)
    }

    pub fn is_suitable_for_emergency(&self) -> bool {
        self.category == SlotCategory::Emergency || self.is_within_business_hours()
    }

    /// Canonical timestamp when a window, not an exact time, is booked.
    pub fn midpoint_timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.start) + Duration::seconds(self.duration().num_seconds() / 2)
    }
}
