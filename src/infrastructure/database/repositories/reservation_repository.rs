//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::reservation::{format_date, parse_date};
use crate::domain::{DomainError, DomainResult, Reservation, ReservationRepository};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn first_where(&self, cond: Condition) -> DomainResult<Option<reservation::Model>> {
        reservation::Entity::find()
            .filter(cond)
            .order_by_asc(reservation::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    Ok(Reservation {
        name: m.name,
        start_date: parse_date(&m.start_date)?,
        end_date: parse_date(&m.end_date)?,
        room_id: m.room_id,
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

/// Exact match on all four tuple fields
fn exact(r: &Reservation) -> Condition {
    Condition::all()
        .add(reservation::Column::Name.eq(r.name.as_str()))
        .add(reservation::Column::StartDate.eq(format_date(r.start_date)))
        .add(reservation::Column::EndDate.eq(format_date(r.end_date)))
        .add(reservation::Column::RoomId.eq(r.room_id))
}

/// Closed-interval collision with `[start, end]`, evaluated on ISO date text
fn overlapping(room_id: i32, start: NaiveDate, end: NaiveDate) -> Condition {
    use reservation::Column::{EndDate, StartDate};

    let start = format_date(start);
    let end = format_date(end);

    Condition::all()
        .add(reservation::Column::RoomId.eq(room_id))
        .add(
            Condition::any()
                .add(
                    Condition::all()
                        .add(StartDate.lte(start.as_str()))
                        .add(EndDate.gte(start.as_str())),
                )
                .add(
                    Condition::all()
                        .add(StartDate.lte(end.as_str()))
                        .add(EndDate.gte(end.as_str())),
                )
                .add(
                    Condition::all()
                        .add(StartDate.gte(start.as_str()))
                        .add(EndDate.lte(end.as_str())),
                ),
        )
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn find_first_by_name(&self, name: &str) -> DomainResult<Option<Reservation>> {
        self.first_where(Condition::all().add(reservation::Column::Name.eq(name)))
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_first_by_room(&self, room_id: i32) -> DomainResult<Option<Reservation>> {
        self.first_where(Condition::all().add(reservation::Column::RoomId.eq(room_id)))
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_exact(&self, r: &Reservation) -> DomainResult<Option<Reservation>> {
        self.first_where(exact(r)).await?.map(model_to_domain).transpose()
    }

    async fn find_overlapping(
        &self,
        room_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(overlapping(room_id, start, end))
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn insert(&self, r: Reservation) -> DomainResult<()> {
        debug!("Saving reservation: {} room {}", r.name, r.room_id);

        let model = reservation::ActiveModel {
            name: Set(r.name),
            start_date: Set(format_date(r.start_date)),
            end_date: Set(format_date(r.end_date)),
            room_id: Set(r.room_id),
            ..Default::default()
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn update_dates(
        &self,
        r: &Reservation,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<()> {
        let Some(existing) = self.first_where(exact(r)).await? else {
            return Ok(());
        };
        debug!("Updating reservation row {}", existing.id);

        let mut active = existing.into_active_model();
        active.start_date = Set(format_date(start));
        active.end_date = Set(format_date(end));
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, r: &Reservation) -> DomainResult<()> {
        let Some(existing) = self.first_where(exact(r)).await? else {
            return Ok(());
        };
        debug!("Deleting reservation row {}", existing.id);

        existing.delete(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        reservation::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Tests ──────────────────────────────────────────────────────
