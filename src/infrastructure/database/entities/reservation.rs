//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    /// Row id, internal to the store
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// ISO `YYYY-MM-DD`; text order equals calendar order
    pub start_date: String,
    pub end_date: String,

    pub room_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
