use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use std::sync::Arc;

use super::extract::{ApiJson, ApiPath};
use super::{ApiError, AppState};
use crate::api::validation::validate_catalog_id;
use crate::entities::{character, date, genre, tag, top_anime};
use crate::models::catalog::{AnimeRecord, NewAnime, NewCharacter, NewDate, NewTopAnime};

pub async fn list_anime(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AnimeRecord>>, ApiError> {
    Ok(Json(state.catalog().list_anime().await?))
}

pub async fn create_anime(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewAnime>,
) -> Result<(StatusCode, Json<AnimeRecord>), ApiError> {
    let record = state.catalog().create_anime(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_anime(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<AnimeRecord>, ApiError> {
    let id = validate_catalog_id(id)?;
    Ok(Json(state.catalog().get_anime(id).await?))
}

pub async fn list_characters(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<Vec<character::Model>>, ApiError> {
    let id = validate_catalog_id(id)?;
    Ok(Json(state.catalog().list_characters(id).await?))
}

pub async fn create_character(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<NewCharacter>,
) -> Result<(StatusCode, Json<character::Model>), ApiError> {
    let id = validate_catalog_id(id)?;
    let character = state.catalog().add_character(id, payload).await?;
    Ok((StatusCode::CREATED, Json(character)))
}

pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<genre::Model>>, ApiError> {
    Ok(Json(state.catalog().list_genres().await?))
}

pub async fn list_tags(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<tag::Model>>, ApiError> {
    Ok(Json(state.catalog().list_tags().await?))
}

pub async fn list_dates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<date::Model>>, ApiError> {
    Ok(Json(state.catalog().list_dates().await?))
}

pub async fn create_date(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewDate>,
) -> Result<(StatusCode, Json<date::Model>), ApiError> {
    let date = state.catalog().add_date(payload).await?;
    Ok((StatusCode::CREATED, Json(date)))
}

pub async fn list_top_anime(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<top_anime::Model>>, ApiError> {
    Ok(Json(state.catalog().list_top_anime().await?))
}

pub async fn create_top_anime(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewTopAnime>,
) -> Result<(StatusCode, Json<top_anime::Model>), ApiError> {
    let entry = state.catalog().add_top_anime(payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
