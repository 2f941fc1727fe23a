use crate::entities::{date, prelude::*};
use crate::models::catalog::NewDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

pub struct DateRepository {
    conn: DatabaseConnection,
}

impl DateRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn save(&self, new: &NewDate) -> Result<date::Model, DbErr> {
        date::ActiveModel {
            date_premiere: Set(new.date_premiere),
            date_start: Set(new.date_start),
            date_end: Set(new.date_end),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
    }

    pub async fn list(&self) -> Result<Vec<date::Model>, DbErr> {
        Dates::find()
            .order_by_asc(date::Column::DateId)
            .all(&self.conn)
            .await
    }
}
