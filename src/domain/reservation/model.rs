//! Reservation domain entity

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Lowest bookable room id
pub const MIN_ROOM_ID: i32 = 1;
/// Highest bookable room id
pub const MAX_ROOM_ID: i32 = 10;

/// Bookable calendar years. Stored dates compare as text, which only
/// matches calendar order for four-digit years.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Storage format for dates (ISO 8601 calendar date)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Room booking for an inclusive date range.
///
/// There is no surrogate key: the full `(name, start_date, end_date, room_id)`
/// tuple identifies a stored reservation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reservation {
    /// Booking holder
    pub name: String,
    /// First booked day
    pub start_date: NaiveDate,
    /// Last booked day (inclusive)
    pub end_date: NaiveDate,
    /// Booked room (1..=10)
    pub room_id: i32,
}

impl Reservation {
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        room_id: i32,
    ) -> Self {
        Self {
            name: name.into(),
            start_date,
            end_date,
            room_id,
        }
    }

    /// Copy of this reservation moved to a new date range
    pub fn with_dates(&self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            ..self.clone()
        }
    }

    /// Check whether this booking collides with `[start, end]`.
    ///
    /// Closed intervals: a shared endpoint counts as overlap.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        let starts_inside = self.start_date <= start && start <= self.end_date;
        let ends_inside = self.start_date <= end && end <= self.end_date;
        let contained = start <= self.start_date && self.end_date <= end;
        starts_inside || ends_inside || contained
    }
}

/// Reject room ids outside `MIN_ROOM_ID..=MAX_ROOM_ID`
pub fn validate_room_id(room_id: i32) -> DomainResult<()> {
    if (MIN_ROOM_ID..=MAX_ROOM_ID).contains(&room_id) {
        Ok(())
    } else {
        Err(DomainError::invalid_room_id())
    }
}

/// Narrow a wire room id, rejecting anything outside the bookable range
pub fn narrow_room_id(raw: i64) -> DomainResult<i32> {
    let room_id = i32::try_from(raw).map_err(|_| DomainError::invalid_room_id())?;
    validate_room_id(room_id)?;
    Ok(room_id)
}

/// Reject dates outside `MIN_YEAR..=MAX_YEAR`
pub fn validate_date(date: NaiveDate) -> DomainResult<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        Ok(())
    } else {
        Err(DomainError::date_out_of_range())
    }
}

/// Reject ranges where `start` falls after `end`, or either end lies
/// outside the bookable years
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> DomainResult<()> {
    validate_date(start)?;
    validate_date(end)?;
    if start > end {
        return Err(DomainError::invalid_date_range());
    }
    Ok(())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DomainError::Storage(format!("Malformed stored date '{}': {}", s, e)))
}

// ── Tests ──────────────────────────────────────────────────────
