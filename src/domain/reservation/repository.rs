//! Reservation repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::Reservation;
use crate::domain::DomainResult;

/// Document-style reservation store.
///
/// Lookups are exact matches on fields; "first" means the earliest stored
/// record. Writes touch at most one record.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// First reservation held under `name`
    async fn find_first_by_name(&self, name: &str) -> DomainResult<Option<Reservation>>;

    /// First reservation for `room_id`
    async fn find_first_by_room(&self, room_id: i32) -> DomainResult<Option<Reservation>>;

    /// Stored record equal to the full tuple, if any
    async fn find_exact(&self, reservation: &Reservation) -> DomainResult<Option<Reservation>>;

    /// All reservations of `room_id` colliding with `[start, end]`
    async fn find_overlapping(
        &self,
        room_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Reservation>>;

    /// Store a new record
    async fn insert(&self, reservation: Reservation) -> DomainResult<()>;

    /// Overwrite the date range of the first record equal to `reservation`
    async fn update_dates(
        &self,
        reservation: &Reservation,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<()>;

    /// Remove the first record equal to `reservation`
    async fn delete(&self, reservation: &Reservation) -> DomainResult<()>;

    /// Number of stored records
    async fn count(&self) -> DomainResult<u64>;
}
