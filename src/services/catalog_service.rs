//! Domain service for the locally stored catalog (anime, characters,
//! genres, tags, dates and the top-anime list).

use crate::entities::{character, date, genre, tag, top_anime};
use crate::models::catalog::{AnimeRecord, NewAnime, NewCharacter, NewDate, NewTopAnime};
use thiserror::Error;

pub const MAX_ANIME_NAME_LEN: usize = 100;
pub const MAX_CHARACTER_NAME_LEN: usize = 100;
pub const MAX_TAXONOMY_NAME_LEN: usize = 50;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("Invalid catalog data: {0}")]
    InvalidData(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(msg)) => Self::InvalidData(msg),
            _ => Self::Database(err.to_string()),
        }
    }
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Saves an anime along with its genre and tag names.
    ///
    /// # Errors
    ///
    /// - Returns [`CatalogError::InvalidData`] for empty or over-long names
    /// - Returns [`CatalogError::Conflict`] if the anime name is taken
    async fn create_anime(&self, anime: NewAnime) -> Result<AnimeRecord, CatalogError>;

    async fn get_anime(&self, id: i32) -> Result<AnimeRecord, CatalogError>;

    async fn list_anime(&self) -> Result<Vec<AnimeRecord>, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the anime does not exist.
    async fn add_character(
        &self,
        anime_id: i32,
        character: NewCharacter,
    ) -> Result<character::Model, CatalogError>;

    async fn list_characters(&self, anime_id: i32) -> Result<Vec<character::Model>, CatalogError>;

    async fn list_genres(&self) -> Result<Vec<genre::Model>, CatalogError>;

    async fn list_tags(&self) -> Result<Vec<tag::Model>, CatalogError>;

    async fn add_date(&self, date: NewDate) -> Result<date::Model, CatalogError>;

    async fn list_dates(&self) -> Result<Vec<date::Model>, CatalogError>;

    async fn add_top_anime(&self, entry: NewTopAnime) -> Result<top_anime::Model, CatalogError>;

    async fn list_top_anime(&self) -> Result<Vec<top_anime::Model>, CatalogError>;
}

/// Trims `name` and checks it is non-empty and at most `max` characters.
pub fn normalize_name(kind: &str, name: &str, max: usize) -> Result<String, CatalogError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidData(format!(
            "{kind} name cannot be empty"
        )));
    }
    if trimmed.chars().count() > max {
        return Err(CatalogError::InvalidData(format!(
            "{kind} name must be {max} characters or less"
        )));
    }
    Ok(trimmed.to_string())
}

/// Normalizes a list of genre/tag names, dropping duplicates while keeping order.
pub fn normalize_names(kind: &str, names: &[String]) -> Result<Vec<String>, CatalogError> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = normalize_name(kind, name, MAX_TAXONOMY_NAME_LEN)?;
        if !out.contains(&name) {
            out.push(name);
        }
    }
    Ok(out)
}

pub fn validate_date_range(date: &NewDate) -> Result<(), CatalogError> {
    if let (Some(start), Some(end)) = (date.date_start, date.date_end)
        && end < start
    {
        return Err(CatalogError::InvalidData(format!(
            "date_end {end} is before date_start {start}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Anime", "  Mushishi ", 100).unwrap(), "Mushishi");
        assert!(normalize_name("Anime", "   ", 100).is_err());
        assert!(normalize_name("Genre", &"x".repeat(51), MAX_TAXONOMY_NAME_LEN).is_err());
        assert!(normalize_name("Genre", &"x".repeat(50), MAX_TAXONOMY_NAME_LEN).is_ok());
    }

    #[test]
    fn test_normalize_names_dedupes_in_order() {
        let names = vec![
            "Action".to_string(),
            " Drama".to_string(),
            "Action ".to_string(),
        ];
        assert_eq!(
            normalize_names("Genre", &names).unwrap(),
            vec!["Action".to_string(), "Drama".to_string()]
        );
        assert!(normalize_names("Tag", &[String::new()]).is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let ok = NewDate {
            date_start: chrono::NaiveDate::from_ymd_opt(2020, 1, 1),
            date_end: chrono::NaiveDate::from_ymd_opt(2020, 3, 1),
            ..Default::default()
        };
        assert!(validate_date_range(&ok).is_ok());

        let reversed = NewDate {
            date_start: ok.date_end,
            date_end: ok.date_start,
            ..Default::default()
        };
        assert!(validate_date_range(&reversed).is_err());

        assert!(validate_date_range(&NewDate::default()).is_ok());
    }
}
