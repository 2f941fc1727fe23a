//! `SeaORM` implementation of the [`CatalogService`] trait.

use crate::db::Store;
use crate::entities::{character, date, genre, tag, top_anime};
use crate::models::catalog::{AnimeRecord, NewAnime, NewCharacter, NewDate, NewTopAnime};
use crate::services::catalog_service::{
    CatalogError, CatalogService, MAX_ANIME_NAME_LEN, MAX_CHARACTER_NAME_LEN, normalize_name,
    normalize_names, validate_date_range,
};

pub struct SeaOrmCatalogService {
    store: Store,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn ensure_anime(&self, anime_id: i32) -> Result<(), CatalogError> {
        if self.store.anime_exists(anime_id).await? {
            Ok(())
        } else {
            Err(CatalogError::NotFound(format!("Anime {anime_id}")))
        }
    }
}

#[async_trait::async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn create_anime(&self, mut anime: NewAnime) -> Result<AnimeRecord, CatalogError> {
        anime.anime_name = normalize_name("Anime", &anime.anime_name, MAX_ANIME_NAME_LEN)?;
        anime.genres = normalize_names("Genre", &anime.genres)?;
        anime.tags = normalize_names("Tag", &anime.tags)?;

        if self.store.anime_name_taken(&anime.anime_name).await? {
            return Err(CatalogError::Conflict(format!(
                "Anime '{}'",
                anime.anime_name
            )));
        }

        Ok(self.store.save_anime(&anime).await?)
    }

    async fn get_anime(&self, id: i32) -> Result<AnimeRecord, CatalogError> {
        self.store
            .get_anime(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Anime {id}")))
    }

    async fn list_anime(&self) -> Result<Vec<AnimeRecord>, CatalogError> {
        Ok(self.store.list_anime().await?)
    }

    async fn add_character(
        &self,
        anime_id: i32,
        mut character: NewCharacter,
    ) -> Result<character::Model, CatalogError> {
        character.character_name = normalize_name(
            "Character",
            &character.character_name,
            MAX_CHARACTER_NAME_LEN,
        )?;
        self.ensure_anime(anime_id).await?;

        Ok(self.store.save_character(anime_id, &character).await?)
    }

    async fn list_characters(&self, anime_id: i32) -> Result<Vec<character::Model>, CatalogError> {
        self.ensure_anime(anime_id).await?;
        Ok(self.store.list_characters(anime_id).await?)
    }

    async fn list_genres(&self) -> Result<Vec<genre::Model>, CatalogError> {
        Ok(self.store.list_genres().await?)
    }

    async fn list_tags(&self) -> Result<Vec<tag::Model>, CatalogError> {
        Ok(self.store.list_tags().await?)
    }

    async fn add_date(&self, date: NewDate) -> Result<date::Model, CatalogError> {
        validate_date_range(&date)?;
        Ok(self.store.save_date(&date).await?)
    }

    async fn list_dates(&self) -> Result<Vec<date::Model>, CatalogError> {
        Ok(self.store.list_dates().await?)
    }

    async fn add_top_anime(&self, entry: NewTopAnime) -> Result<top_anime::Model, CatalogError> {
        let name = normalize_name("Top anime", &entry.top_anime_name, MAX_ANIME_NAME_LEN)?;

        if self.store.top_anime_name_taken(&name).await? {
            return Err(CatalogError::Conflict(format!("Top anime '{name}'")));
        }

        Ok(self.store.save_top_anime(&name).await?)
    }

    async fn list_top_anime(&self) -> Result<Vec<top_anime::Model>, CatalogError> {
        Ok(self.store.list_top_anime().await?)
    }
}
