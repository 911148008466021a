//! In-memory reservation store

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use log::debug;

use crate::domain::{DomainResult, Reservation, ReservationRepository};

/// In-memory storage for development and testing.
///
/// Records are keyed by an insertion sequence so "first match" is the
/// oldest stored record, as with a document collection scan.
pub struct InMemoryReservationRepository {
    reservations: DashMap<u64, Reservation>,
    sequence: AtomicU64,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self {
            reservations: DashMap::new(),
            sequence: AtomicU64::new(1),
        }
    }

    /// Key of the oldest record satisfying `pred`
    fn first_key(&self, pred: impl Fn(&Reservation) -> bool) -> Option<u64> {
        self.reservations
            .iter()
            .filter(|e| pred(e.value()))
            .map(|e| *e.key())
            .min()
    }

    fn first(&self, pred: impl Fn(&Reservation) -> bool) -> Option<Reservation> {
        self.first_key(pred)
            .and_then(|k| self.reservations.get(&k).map(|r| r.clone()))
    }
}

impl Default for InMemoryReservationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn find_first_by_name(&self, name: &str) -> DomainResult<Option<Reservation>> {
        Ok(self.first(|r| r.name == name))
    }

    async fn find_first_by_room(&self, room_id: i32) -> DomainResult<Option<Reservation>> {
        Ok(self.first(|r| r.room_id == room_id))
    }

    async fn find_exact(&self, reservation: &Reservation) -> DomainResult<Option<Reservation>> {
        Ok(self.first(|r| r == reservation))
    }

    async fn find_overlapping(
        &self,
        room_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        let mut hits: Vec<(u64, Reservation)> = self
            .reservations
            .iter()
            .filter(|e| e.room_id == room_id && e.overlaps(start, end))
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        hits.sort_by_key(|(k, _)| *k);
        Ok(hits.into_iter().map(|(_, r)| r).collect())
    }

    async fn insert(&self, reservation: Reservation) -> DomainResult<()> {
        let key = self.sequence.fetch_add(1, Ordering::SeqCst);
        debug!("Inserting reservation #{}: {:?}", key, reservation);
        self.reservations.insert(key, reservation);
        Ok(())
    }

    async fn update_dates(
        &self,
        reservation: &Reservation,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<()> {
        if let Some(key) = self.first_key(|r| r == reservation) {
            if let Some(mut stored) = self.reservations.get_mut(&key) {
                debug!("Updating dates of reservation #{}", key);
                stored.start_date = start;
                stored.end_date = end;
            }
        }
        Ok(())
    }

    async fn delete(&self, reservation: &Reservation) -> DomainResult<()> {
        if let Some(key) = self.first_key(|r| r == reservation) {
            debug!("Deleting reservation #{}", key);
            self.reservations.remove(&key);
        }
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.reservations.len() as u64)
    }
}

// ── Tests ──────────────────────────────────────────────────────
