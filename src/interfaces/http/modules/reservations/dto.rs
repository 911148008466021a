//! Reservation DTOs

use std::borrow::Cow;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::reservation::{narrow_room_id, MAX_YEAR, MIN_YEAR};
use crate::domain::{DomainError, Reservation};

/// Reservation as sent and returned over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct ReservationDto {
    /// Booking holder
    #[validate(length(min = 1, message = "must not be empty"))]
    #[schema(example = "Alice")]
    pub name: String,
    /// First booked day (YYYY-MM-DD)
    #[validate(custom(function = "validate_year"))]
    #[schema(example = "2024-03-01")]
    pub start_date: NaiveDate,
    /// Last booked day, inclusive (YYYY-MM-DD)
    #[validate(custom(function = "validate_year"))]
    #[schema(example = "2024-03-03")]
    pub end_date: NaiveDate,
    /// Room number, 1 to 10. Wider integers are accepted here and rejected
    /// by the booking rules.
    #[serde(deserialize_with = "deserialize_room_id")]
    #[schema(example = 3)]
    pub room_id: i64,
}

impl TryFrom<ReservationDto> for Reservation {
    type Error = DomainError;

    fn try_from(dto: ReservationDto) -> Result<Self, Self::Error> {
        let room_id = narrow_room_id(dto.room_id)?;
        Ok(Reservation::new(dto.name, dto.start_date, dto.end_date, room_id))
    }
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            name: r.name,
            start_date: r.start_date,
            end_date: r.end_date,
            room_id: i64::from(r.room_id),
        }
    }
}

/// Request to move an existing reservation to new dates
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateReservationRequest {
    /// The reservation as currently stored
    #[validate(nested)]
    pub reservation: ReservationDto,
    #[validate(custom(function = "validate_year"))]
    pub new_start_date: NaiveDate,
    #[validate(custom(function = "validate_year"))]
    pub new_end_date: NaiveDate,
}

/// Lookup result: zero or one reservation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationQueryResponse {
    pub result: Vec<ReservationDto>,
}

impl From<Option<Reservation>> for ReservationQueryResponse {
    fn from(found: Option<Reservation>) -> Self {
        Self {
            result: found.into_iter().map(ReservationDto::from).collect(),
        }
    }
}

fn validate_year(date: &NaiveDate) -> Result<(), ValidationError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Ok(());
    }
    let mut err = ValidationError::new("year_range");
    err.message = Some(Cow::from(format!(
        "year must be between {} and {}",
        MIN_YEAR, MAX_YEAR
    )));
    Err(err)
}

/// Any JSON integer, saturated into `i64`
fn deserialize_room_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct RoomIdVisitor;

    impl<'de> Visitor<'de> for RoomIdVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer room id")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        // integers past u64 arrive as floats
        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.is_finite() && v.fract() == 0.0 {
                Ok(v as i64)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(RoomIdVisitor)
}
