use axum::{
    Json,
    extract::State,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::extract::ApiQuery;
use super::{ApiError, AppState};
use crate::api::validation::{require_param, split_list, validate_season, validate_year};
use crate::models::media::MediaQuery;

/// Raw query string of the discovery routes. Every field is optional so
/// that missing parameters reach validation instead of the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct DiscoverParams {
    pub genre: Option<String>,
    pub tag: Option<String>,
    pub season: Option<String>,
    pub year: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

async fn dispatch(state: &AppState, query: MediaQuery) -> Result<Json<Vec<Value>>, ApiError> {
    tracing::Span::current().record("media_query", query.name());
    let media = state.discover().fetch(&query).await?;
    Ok(Json(media))
}

/// Serves both `get_topAnime` and `get_anime`.
pub async fn top_anime(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DiscoverParams>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let query = MediaQuery::Top {
        genre: non_empty(params.genre),
        tag: non_empty(params.tag),
    };
    dispatch(&state, query).await
}

pub async fn popular_anime(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Value>>, ApiError> {
    dispatch(&state, MediaQuery::Popular).await
}

pub async fn seasonal_anime(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DiscoverParams>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let season = validate_season(params.season.as_deref())?;
    let year = validate_year(params.year.as_deref())?;
    dispatch(&state, MediaQuery::Seasonal { season, year }).await
}

pub async fn genre_anime(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DiscoverParams>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let genre = require_param("genre", params.genre.as_deref())?.to_string();
    dispatch(&state, MediaQuery::Genre { genre }).await
}

pub async fn tag_anime(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DiscoverParams>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let tag = require_param("tag", params.tag.as_deref())?.to_string();
    dispatch(&state, MediaQuery::Tag { tag }).await
}

pub async fn multi_genre_anime(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DiscoverParams>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let genres = split_list("genre", params.genre.as_deref())?;
    dispatch(&state, MediaQuery::MultiGenre { genres }).await
}

pub async fn multi_tag_anime(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DiscoverParams>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let tags = split_list("tag", params.tag.as_deref())?;
    dispatch(&state, MediaQuery::MultiTag { tags }).await
}

pub async fn yearly_anime(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<DiscoverParams>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let year = validate_year(params.year.as_deref())?;
    dispatch(&state, MediaQuery::Yearly { year }).await
}
