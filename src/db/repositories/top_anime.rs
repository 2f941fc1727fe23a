use crate::entities::{prelude::*, top_anime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

pub struct TopAnimeRepository {
    conn: DatabaseConnection,
}

impl TopAnimeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn save(&self, name: &str) -> Result<top_anime::Model, DbErr> {
        top_anime::ActiveModel {
            top_anime_name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<top_anime::Model>, DbErr> {
        TopAnime::find()
            .filter(top_anime::Column::TopAnimeName.eq(name))
            .one(&self.conn)
            .await
    }

    pub async fn list(&self) -> Result<Vec<top_anime::Model>, DbErr> {
        TopAnime::find()
            .order_by_asc(top_anime::Column::TopAnimeId)
            .all(&self.conn)
            .await
    }
}
