//! Room reservation business logic service

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, info};

use super::room_locks::RoomLocks;
use crate::domain::reservation::{validate_date_range, validate_room_id};
use crate::domain::{DomainError, DomainResult, Reservation, ReservationRepository};

/// Service for booking, moving and cancelling room reservations.
///
/// Checks run in a fixed order and the first failure wins. The store is
/// injected; the service keeps no booking state of its own.
pub struct ReservationService {
    repo: Arc<dyn ReservationRepository>,
    room_locks: Option<RoomLocks>,
}

impl ReservationService {
    pub fn new(repo: Arc<dyn ReservationRepository>) -> Self {
        Self {
            repo,
            room_locks: None,
        }
    }

    /// Hold a per-room lock across each check-then-write sequence.
    pub fn with_room_locks(mut self) -> Self {
        self.room_locks = Some(RoomLocks::new());
        self
    }

    pub fn serializes_room_writes(&self) -> bool {
        self.room_locks.is_some()
    }

    async fn lock_room(&self, room_id: i32) -> Option<OwnedMutexGuard<()>> {
        match &self.room_locks {
            Some(locks) => Some(locks.acquire(room_id).await),
            None => None,
        }
    }

    /// First stored reservation held under `name`
    pub async fn get_by_name(&self, name: &str) -> DomainResult<Option<Reservation>> {
        self.repo.find_first_by_name(name).await
    }

    /// First stored reservation for `room_id`
    pub async fn get_by_room(&self, room_id: i32) -> DomainResult<Option<Reservation>> {
        validate_room_id(room_id)?;
        self.repo.find_first_by_room(room_id).await
    }

    /// `true` when no reservation of `room_id` collides with `[start, end]`
    pub async fn is_room_available(
        &self,
        room_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<bool> {
        let clashes = self.repo.find_overlapping(room_id, start, end).await?;
        Ok(clashes.is_empty())
    }

    /// Book a room
    pub async fn create(&self, reservation: Reservation) -> DomainResult<()> {
        validate_room_id(reservation.room_id)?;
        validate_date_range(reservation.start_date, reservation.end_date)?;

        let _guard = self.lock_room(reservation.room_id).await;

        if !self
            .is_room_available(
                reservation.room_id,
                reservation.start_date,
                reservation.end_date,
            )
            .await?
        {
            debug!(room_id = reservation.room_id, "Room not available for requested range");
            return Err(DomainError::room_not_available());
        }

        if self.repo.find_exact(&reservation).await?.is_some() {
            return Err(DomainError::already_exists());
        }

        info!(
            name = %reservation.name,
            room_id = reservation.room_id,
            start = %reservation.start_date,
            end = %reservation.end_date,
            "Reservation created"
        );
        self.repo.insert(reservation).await
    }

    /// Move an existing reservation to `[new_start, new_end]`.
    ///
    /// The availability check runs against the store as it is, so the
    /// reservation's own record still counts. Moving a booking to a range
    /// that touches its old one is reported as a conflict.
    pub async fn update(
        &self,
        reservation: &Reservation,
        new_start: NaiveDate,
        new_end: NaiveDate,
    ) -> DomainResult<()> {
        validate_room_id(reservation.room_id)?;
        validate_date_range(new_start, new_end)?;

        let _guard = self.lock_room(reservation.room_id).await;

        if self.repo.find_exact(reservation).await?.is_none() {
            return Err(DomainError::not_found());
        }

        if !self
            .is_room_available(reservation.room_id, new_start, new_end)
            .await?
        {
            debug!(room_id = reservation.room_id, "Room not available for new range");
            return Err(DomainError::room_not_available());
        }

        self.repo
            .update_dates(reservation, new_start, new_end)
            .await?;
        info!(
            name = %reservation.name,
            room_id = reservation.room_id,
            start = %new_start,
            end = %new_end,
            "Reservation updated"
        );
        Ok(())
    }

    /// Remove the stored record equal to `reservation`
    pub async fn cancel(&self, reservation: &Reservation) -> DomainResult<()> {
        validate_room_id(reservation.room_id)?;
        validate_date_range(reservation.start_date, reservation.end_date)?;

        let _guard = self.lock_room(reservation.room_id).await;

        if self.repo.find_exact(reservation).await?.is_none() {
            return Err(DomainError::not_found());
        }

        self.repo.delete(reservation).await?;
        info!(
            name = %reservation.name,
            room_id = reservation.room_id,
            "Reservation deleted"
        );
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryReservationRepository;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn rsvp(name: &str, start: &str, end: &str, room: i32) -> Reservation {
        Reservation::new(name, d(start), d(end), room)
    }

    fn service() -> ReservationService {
        ReservationService::new(Arc::new(InMemoryReservationRepository::new()))
    }

    #[tokio::test]
    async fn out_of_range_room_rejected_everywhere() {
        let svc = service();
        for room in [0, 11, -5] {
            let r = rsvp("x", "2024-01-01", "2024-01-02", room);
            assert_eq!(svc.get_by_room(room).await, Err(DomainError::invalid_room_id()));
            assert_eq!(svc.create(r.clone()).await, Err(DomainError::invalid_room_id()));
            assert_eq!(
                svc.update(&r, d("2024-02-01"), d("2024-02-02")).await,
                Err(DomainError::invalid_room_id())
            );
            assert_eq!(svc.cancel(&r).await, Err(DomainError::invalid_room_id()));
        }
    }

    #[tokio::test]
    async fn inverted_range_rejected() {
        let svc = service();
        let backwards = rsvp("x", "2024-01-05", "2024-01-01", 2);
        assert_eq!(svc.create(backwards.clone()).await, Err(DomainError::invalid_date_range()));
        assert_eq!(svc.cancel(&backwards).await, Err(DomainError::invalid_date_range()));

        let ok = rsvp("x", "2024-01-01", "2024-01-05", 2);
        svc.create(ok.clone()).await.unwrap();
        assert_eq!(
            svc.update(&ok, d("2024-02-05"), d("2024-02-01")).await,
            Err(DomainError::invalid_date_range())
        );
    }

    #[tokio::test]
    async fn room_check_precedes_date_check() {
        let svc = service();
        let r = rsvp("x", "2024-01-05", "2024-01-01", 42);
        assert_eq!(svc.create(r).await, Err(DomainError::invalid_room_id()));
    }

    #[tokio::test]
    async fn booking_scenario_room_three() {
        let svc = service();
        svc.create(rsvp("Alice", "2024-03-01", "2024-03-03", 3)).await.unwrap();

        assert_eq!(
            svc.create(rsvp("Bob", "2024-03-02", "2024-03-04", 3)).await,
            Err(DomainError::room_not_available())
        );
        svc.create(rsvp("Bob", "2024-03-04", "2024-03-06", 3)).await.unwrap();

        // other rooms are independent
        svc.create(rsvp("Bob", "2024-03-02", "2024-03-04", 5)).await.unwrap();
    }

    #[tokio::test]
    async fn shared_endpoint_is_unavailable() {
        let svc = service();
        svc.create(rsvp("a", "2024-01-01", "2024-01-05", 1)).await.unwrap();
        assert!(!svc.is_room_available(1, d("2024-01-05"), d("2024-01-10")).await.unwrap());
        assert!(svc.is_room_available(1, d("2024-01-06"), d("2024-01-10")).await.unwrap());
        assert!(svc.is_room_available(2, d("2024-01-01"), d("2024-01-05")).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_create_conflicts() {
        let svc = service();
        let r = rsvp("Dup", "2024-06-01", "2024-06-02", 6);
        assert_eq!(svc.create(r.clone()).await, Ok(()));
        assert!(matches!(svc.create(r).await, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn queries_return_first_stored() {
        let svc = service();
        assert_eq!(svc.get_by_name("nobody").await, Ok(None));
        assert_eq!(svc.get_by_room(9).await, Ok(None));

        let first = rsvp("Erin", "2024-07-01", "2024-07-02", 9);
        svc.create(first.clone()).await.unwrap();
        svc.create(rsvp("Erin", "2024-08-01", "2024-08-02", 9)).await.unwrap();

        assert_eq!(svc.get_by_name("Erin").await, Ok(Some(first.clone())));
        assert_eq!(svc.get_by_room(9).await, Ok(Some(first)));
    }

    #[tokio::test]
    async fn cancel_removes_exact_tuple() {
        let svc = service();
        let r = rsvp("Frank", "2024-09-01", "2024-09-03", 7);
        svc.create(r.clone()).await.unwrap();

        let wrong = rsvp("Frank", "2024-09-01", "2024-09-04", 7);
        assert_eq!(svc.cancel(&wrong).await, Err(DomainError::not_found()));

        svc.cancel(&r).await.unwrap();
        assert_eq!(svc.get_by_name("Frank").await, Ok(None));
        assert_eq!(svc.cancel(&r).await, Err(DomainError::not_found()));

        // freed range can be booked again
        svc.create(rsvp("Gina", "2024-09-02", "2024-09-02", 7)).await.unwrap();
    }

    #[tokio::test]
    async fn update_unknown_reservation_not_found() {
        let svc = service();
        let r = rsvp("Hank", "2024-10-01", "2024-10-02", 8);
        assert_eq!(
            svc.update(&r, d("2024-11-01"), d("2024-11-02")).await,
            Err(DomainError::not_found())
        );
    }

    #[tokio::test]
    async fn update_to_disjoint_range_moves_booking() {
        let svc = service();
        let r = rsvp("Ivy", "2024-04-01", "2024-04-05", 4);
        svc.create(r.clone()).await.unwrap();

        svc.update(&r, d("2024-04-10"), d("2024-04-12")).await.unwrap();

        let stored = svc.get_by_name("Ivy").await.unwrap().unwrap();
        assert_eq!(stored, r.with_dates(d("2024-04-10"), d("2024-04-12")));
        // old range is free again
        assert!(svc.is_room_available(4, d("2024-04-01"), d("2024-04-05")).await.unwrap());
    }

    #[tokio::test]
    async fn update_overlapping_own_range_conflicts() {
        let svc = service();
        let r = rsvp("Carol", "2024-04-01", "2024-04-05", 4);
        svc.create(r.clone()).await.unwrap();

        assert_eq!(
            svc.update(&r, d("2024-04-02"), d("2024-04-06")).await,
            Err(DomainError::room_not_available())
        );
        // record left untouched
        assert_eq!(svc.get_by_name("Carol").await, Ok(Some(r)));
    }

    #[tokio::test]
    async fn update_into_other_booking_conflicts() {
        let svc = service();
        let r = rsvp("Jo", "2024-05-01", "2024-05-02", 2);
        svc.create(r.clone()).await.unwrap();
        svc.create(rsvp("Kai", "2024-05-10", "2024-05-12", 2)).await.unwrap();

        assert_eq!(
            svc.update(&r, d("2024-05-12"), d("2024-05-13")).await,
            Err(DomainError::room_not_available())
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn room_locks_admit_one_of_concurrent_overlapping_creates() {
        let svc = Arc::new(service().with_room_locks());
        assert!(svc.serializes_room_writes());

        let mut tasks = Vec::new();
        for i in 0..8 {
            let svc = svc.clone();
            tasks.push(tokio::spawn(async move {
                svc.create(rsvp(&format!("guest-{}", i), "2024-12-20", "2024-12-27", 10))
                    .await
            }));
        }

        let mut ok = 0;
        for t in tasks {
            if t.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
    }
}
