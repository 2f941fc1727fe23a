use crate::entities::{anime_genres, anime_tags, genre, prelude::*, tag};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

/// Genres, tags and their association rows.
pub struct TaxonomyRepository {
    conn: DatabaseConnection,
}

impl TaxonomyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_genres(&self) -> Result<Vec<genre::Model>, DbErr> {
        Genre::find()
            .order_by_asc(genre::Column::GenreName)
            .all(&self.conn)
            .await
    }

    pub async fn list_tags(&self) -> Result<Vec<tag::Model>, DbErr> {
        Tag::find()
            .order_by_asc(tag::Column::TagName)
            .all(&self.conn)
            .await
    }

    pub async fn ensure_genre<C: ConnectionTrait>(
        conn: &C,
        name: &str,
    ) -> Result<genre::Model, DbErr> {
        if let Some(existing) = Genre::find()
            .filter(genre::Column::GenreName.eq(name))
            .one(conn)
            .await?
        {
            return Ok(existing);
        }

        genre::ActiveModel {
            genre_name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(conn)
        .await
    }

    pub async fn ensure_tag<C: ConnectionTrait>(conn: &C, name: &str) -> Result<tag::Model, DbErr> {
        if let Some(existing) = Tag::find()
            .filter(tag::Column::TagName.eq(name))
            .one(conn)
            .await?
        {
            return Ok(existing);
        }

        tag::ActiveModel {
            tag_name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(conn)
        .await
    }

    pub async fn link_genre<C: ConnectionTrait>(
        conn: &C,
        anime_id: i32,
        genre_id: i32,
    ) -> Result<(), DbErr> {
        AnimeGenres::insert(anime_genres::ActiveModel {
            anime_id: Set(anime_id),
            genre_id: Set(genre_id),
        })
        .exec_without_returning(conn)
        .await?;
        Ok(())
    }

    pub async fn link_tag<C: ConnectionTrait>(
        conn: &C,
        anime_id: i32,
        tag_id: i32,
    ) -> Result<(), DbErr> {
        AnimeTags::insert(anime_tags::ActiveModel {
            anime_id: Set(anime_id),
            tag_id: Set(tag_id),
        })
        .exec_without_returning(conn)
        .await?;
        Ok(())
    }
}
