use crate::entities::{character, date, genre, tag, top_anime};
use crate::models::catalog::{AnimeRecord, NewAnime, NewCharacter, NewDate};
use anyhow::{Context, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Handle over the catalog database. Cloning shares the connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory {}", parent.display())
                })?;
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file {path_str}"))?;
            }
        }

        // Every pooled connection to `:memory:` would open its own empty database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn anime_repo(&self) -> repositories::anime::AnimeRepository {
        repositories::anime::AnimeRepository::new(self.conn.clone())
    }

    fn character_repo(&self) -> repositories::character::CharacterRepository {
        repositories::character::CharacterRepository::new(self.conn.clone())
    }

    fn taxonomy_repo(&self) -> repositories::taxonomy::TaxonomyRepository {
        repositories::taxonomy::TaxonomyRepository::new(self.conn.clone())
    }

    fn date_repo(&self) -> repositories::date::DateRepository {
        repositories::date::DateRepository::new(self.conn.clone())
    }

    fn top_anime_repo(&self) -> repositories::top_anime::TopAnimeRepository {
        repositories::top_anime::TopAnimeRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Anime
    // ========================================================================

    pub async fn save_anime(&self, anime: &NewAnime) -> Result<AnimeRecord, DbErr> {
        self.anime_repo().save(anime).await
    }

    pub async fn get_anime(&self, id: i32) -> Result<Option<AnimeRecord>, DbErr> {
        self.anime_repo().get(id).await
    }

    pub async fn anime_exists(&self, id: i32) -> Result<bool, DbErr> {
        self.anime_repo().exists(id).await
    }

    pub async fn anime_name_taken(&self, name: &str) -> Result<bool, DbErr> {
        Ok(self.anime_repo().find_by_name(name).await?.is_some())
    }

    pub async fn list_anime(&self) -> Result<Vec<AnimeRecord>, DbErr> {
        self.anime_repo().list().await
    }

    // ========================================================================
    // Characters
    // ========================================================================

    pub async fn save_character(
        &self,
        anime_id: i32,
        character: &NewCharacter,
    ) -> Result<character::Model, DbErr> {
        self.character_repo().save(anime_id, character).await
    }

    pub async fn list_characters(&self, anime_id: i32) -> Result<Vec<character::Model>, DbErr> {
        self.character_repo().list_for_anime(anime_id).await
    }

    // ========================================================================
    // Genres & tags
    // ========================================================================

    pub async fn list_genres(&self) -> Result<Vec<genre::Model>, DbErr> {
        self.taxonomy_repo().list_genres().await
    }

    pub async fn list_tags(&self) -> Result<Vec<tag::Model>, DbErr> {
        self.taxonomy_repo().list_tags().await
    }

    // ========================================================================
    // Dates & rankings
    // ========================================================================

    pub async fn save_date(&self, date: &NewDate) -> Result<date::Model, DbErr> {
        self.date_repo().save(date).await
    }

    pub async fn list_dates(&self) -> Result<Vec<date::Model>, DbErr> {
        self.date_repo().list().await
    }

    pub async fn save_top_anime(&self, name: &str) -> Result<top_anime::Model, DbErr> {
        self.top_anime_repo().save(name).await
    }

    pub async fn top_anime_name_taken(&self, name: &str) -> Result<bool, DbErr> {
        Ok(self.top_anime_repo().find_by_name(name).await?.is_some())
    }

    pub async fn list_top_anime(&self) -> Result<Vec<top_anime::Model>, DbErr> {
        self.top_anime_repo().list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> Store {
        Store::new("sqlite::memory:").await.unwrap()
    }

    fn naruto() -> NewAnime {
        NewAnime {
            anime_name: "Naruto".to_string(),
            anime_studio: Some("Pierrot".to_string()),
            number_of_episodes: Some(220),
            anime_score: Some(79.0),
            genres: vec!["Action".to_string(), "Adventure".to_string()],
            tags: vec!["Ninja".to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_unusable_database_directory_is_reported() {
        let blocker = std::env::temp_dir().join(format!("animerec-{}", uuid::Uuid::new_v4()));
        std::fs::write(&blocker, b"not a directory").unwrap();

        let url = format!("sqlite:{}/nested/animerec.db", blocker.display());
        let err = Store::new(&url).await.err().unwrap();
        assert!(
            err.to_string().starts_with("Failed to create database directory"),
            "{err}"
        );

        std::fs::remove_file(&blocker).unwrap();
    }

    #[tokio::test]
    async fn test_save_anime_links_genres_and_tags() {
        let store = store().await;

        let saved = store.save_anime(&naruto()).await.unwrap();
        assert_eq!(saved.anime.anime_name, "Naruto");
        assert_eq!(saved.genres.len(), 2);
        assert_eq!(saved.tags.len(), 1);

        let loaded = store
            .get_anime(saved.anime.anime_id)
            .await
            .unwrap()
            .unwrap();
        let genre_names: Vec<_> = loaded.genres.iter().map(|g| g.genre_name.as_str()).collect();
        assert_eq!(genre_names, vec!["Action", "Adventure"]);
        assert_eq!(loaded.tags[0].tag_name, "Ninja");
    }

    #[tokio::test]
    async fn test_genres_are_shared_between_anime() {
        let store = store().await;

        store.save_anime(&naruto()).await.unwrap();
        store
            .save_anime(&NewAnime {
                anime_name: "Bleach".to_string(),
                genres: vec!["Action".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();

        let genres = store.list_genres().await.unwrap();
        assert_eq!(genres.len(), 2);

        let listed = store.list_anime().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].anime.anime_name, "Bleach");
        assert_eq!(listed[1].genres[0].genre_id, listed[0].genres[0].genre_id);
        assert!(listed[1].tags.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_anime_name_is_rejected() {
        let store = store().await;

        store.save_anime(&naruto()).await.unwrap();
        assert!(store.anime_name_taken("Naruto").await.unwrap());
        assert!(store.save_anime(&naruto()).await.is_err());
        assert_eq!(store.list_genres().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_characters_belong_to_anime() {
        let store = store().await;
        let saved = store.save_anime(&naruto()).await.unwrap();
        let id = saved.anime.anime_id;

        store
            .save_character(
                id,
                &NewCharacter {
                    character_name: "Naruto Uzumaki".to_string(),
                    character_image: Some("naruto.png".to_string()),
                },
            )
            .await
            .unwrap();

        let characters = store.list_characters(id).await.unwrap();
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].anime_id, id);
        assert!(store.list_characters(id + 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dates_and_rankings() {
        let store = store().await;

        let date = store
            .save_date(&NewDate {
                date_premiere: chrono::NaiveDate::from_ymd_opt(2002, 10, 3),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(store.list_dates().await.unwrap(), vec![date]);

        store.save_top_anime("Frieren").await.unwrap();
        assert!(store.top_anime_name_taken("Frieren").await.unwrap());
        assert!(store.save_top_anime("Frieren").await.is_err());
        assert_eq!(store.list_top_anime().await.unwrap().len(), 1);
    }
}
