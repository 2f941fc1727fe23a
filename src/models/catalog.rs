use crate::entities::{anime, genre, tag};
use serde::{Deserialize, Serialize};

/// Serialized anime row together with its genres and tags.
#[derive(Debug, Clone, Serialize)]
pub struct AnimeRecord {
    #[serde(flatten)]
    pub anime: anime::Model,
    pub genres: Vec<genre::Model>,
    pub tags: Vec<tag::Model>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAnime {
    pub anime_name: String,
    pub anime_description: Option<String>,
    pub anime_image: Option<String>,
    pub anime_studio: Option<String>,
    pub number_of_episodes: Option<i32>,
    pub anime_type: Option<String>,
    pub anime_status: Option<String>,
    pub anime_rating: Option<f64>,
    pub anime_score: Option<f64>,
    /// Genre names; unknown names are created on save.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Tag names; unknown names are created on save.
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCharacter {
    pub character_name: String,
    pub character_image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDate {
    pub date_premiere: Option<chrono::NaiveDate>,
    pub date_start: Option<chrono::NaiveDate>,
    pub date_end: Option<chrono::NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTopAnime {
    pub top_anime_name: String,
}
