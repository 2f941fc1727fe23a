use crate::entities::{character, prelude::*};
use crate::models::catalog::NewCharacter;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

pub struct CharacterRepository {
    conn: DatabaseConnection,
}

impl CharacterRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn save(
        &self,
        anime_id: i32,
        new: &NewCharacter,
    ) -> Result<character::Model, DbErr> {
        character::ActiveModel {
            character_name: Set(new.character_name.clone()),
            character_image: Set(new.character_image.clone()),
            anime_id: Set(anime_id),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
    }

    pub async fn list_for_anime(&self, anime_id: i32) -> Result<Vec<character::Model>, DbErr> {
        Character::find()
            .filter(character::Column::AnimeId.eq(anime_id))
            .order_by_asc(character::Column::CharacterId)
            .all(&self.conn)
            .await
    }
}
