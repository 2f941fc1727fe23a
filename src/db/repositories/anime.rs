use crate::entities::{anime, genre, prelude::*, tag};
use crate::models::catalog::{AnimeRecord, NewAnime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, LoaderTrait,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::taxonomy::TaxonomyRepository;

pub struct AnimeRepository {
    conn: DatabaseConnection,
}

impl AnimeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn into_record(
        anime: anime::Model,
        mut genres: Vec<genre::Model>,
        mut tags: Vec<tag::Model>,
    ) -> AnimeRecord {
        genres.sort_by(|a, b| a.genre_name.cmp(&b.genre_name));
        tags.sort_by(|a, b| a.tag_name.cmp(&b.tag_name));
        AnimeRecord {
            anime,
            genres,
            tags,
        }
    }

    /// Inserts the anime and links its genres and tags in one transaction.
    pub async fn save(&self, new: &NewAnime) -> Result<AnimeRecord, DbErr> {
        let txn = self.conn.begin().await?;

        let anime = anime::ActiveModel {
            anime_name: Set(new.anime_name.clone()),
            anime_description: Set(new.anime_description.clone()),
            anime_image: Set(new.anime_image.clone()),
            anime_studio: Set(new.anime_studio.clone()),
            number_of_episodes: Set(new.number_of_episodes),
            anime_type: Set(new.anime_type.clone()),
            anime_status: Set(new.anime_status.clone()),
            anime_rating: Set(new.anime_rating),
            anime_score: Set(new.anime_score),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut genres = Vec::with_capacity(new.genres.len());
        for name in &new.genres {
            let genre = TaxonomyRepository::ensure_genre(&txn, name).await?;
            TaxonomyRepository::link_genre(&txn, anime.anime_id, genre.genre_id).await?;
            genres.push(genre);
        }

        let mut tags = Vec::with_capacity(new.tags.len());
        for name in &new.tags {
            let tag = TaxonomyRepository::ensure_tag(&txn, name).await?;
            TaxonomyRepository::link_tag(&txn, anime.anime_id, tag.tag_id).await?;
            tags.push(tag);
        }

        txn.commit().await?;

        info!(
            "Saved anime {} ({} genres, {} tags)",
            anime.anime_name,
            genres.len(),
            tags.len()
        );

        Ok(Self::into_record(anime, genres, tags))
    }

    pub async fn get(&self, id: i32) -> Result<Option<AnimeRecord>, DbErr> {
        let Some(anime) = Anime::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let genres = anime.find_related(Genre).all(&self.conn).await?;
        let tags = anime.find_related(Tag).all(&self.conn).await?;

        Ok(Some(Self::into_record(anime, genres, tags)))
    }

    pub async fn exists(&self, id: i32) -> Result<bool, DbErr> {
        Ok(Anime::find_by_id(id).one(&self.conn).await?.is_some())
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<anime::Model>, DbErr> {
        Anime::find()
            .filter(anime::Column::AnimeName.eq(name))
            .one(&self.conn)
            .await
    }

    pub async fn list(&self) -> Result<Vec<AnimeRecord>, DbErr> {
        let animes = Anime::find()
            .order_by_asc(anime::Column::AnimeId)
            .all(&self.conn)
            .await?;

        let genres = animes
            .load_many_to_many(Genre, AnimeGenres, &self.conn)
            .await?;
        let tags = animes.load_many_to_many(Tag, AnimeTags, &self.conn).await?;

        Ok(animes
            .into_iter()
            .zip(genres)
            .zip(tags)
            .map(|((anime, genres), tags)| Self::into_record(anime, genres, tags))
            .collect())
    }
}
