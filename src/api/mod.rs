use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::anilist::GraphQlTransport;
use crate::config::Config;
use crate::state::SharedState;

mod catalog;
mod discover;
mod error;
mod extract;
mod observability;
mod system;
pub mod validation;

pub use error::{ApiError, ErrorBody, UPSTREAM_FAILURE_MESSAGE};
pub use observability::REQUEST_ID_HEADER;

use crate::services::{CatalogService, DiscoverService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<Config> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn discover(&self) -> &DiscoverService {
        &self.shared.discover
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<dyn CatalogService> {
        &self.shared.catalog
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Builds the state around a caller-supplied upstream transport.
pub async fn create_app_state_with_upstream(
    config: Config,
    upstream: Arc<dyn GraphQlTransport>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::with_upstream(config, upstream).await?);
    Ok(create_app_state(shared, None))
}

pub fn router(state: Arc<AppState>) -> Router {
    let (images_path, cors_origins) = {
        let config = state.config();
        (
            config.general.images_path.clone(),
            config.server.cors_allowed_origins.clone(),
        )
    };

    let api_router = Router::new()
        .merge(discover_routes())
        .nest("/catalog", catalog_routes())
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .nest_service("/images", tower_http::services::ServeDir::new(images_path))
        .layer(
            cors_layer
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

fn discover_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/get_topAnime", get(discover::top_anime))
        .route("/get_anime", get(discover::top_anime))
        .route("/get_popularAnime", get(discover::popular_anime))
        .route("/get_seasonalAnime", get(discover::seasonal_anime))
        .route("/get_genreAnime", get(discover::genre_anime))
        .route("/get_tagAnime", get(discover::tag_anime))
        .route("/get_multgenreAnime", get(discover::multi_genre_anime))
        .route("/get_multtagAnime", get(discover::multi_tag_anime))
        .route("/get_yearlyAnime", get(discover::yearly_anime))
}

fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/anime",
            get(catalog::list_anime).post(catalog::create_anime),
        )
        .route("/anime/{id}", get(catalog::get_anime))
        .route(
            "/anime/{id}/characters",
            get(catalog::list_characters).post(catalog::create_character),
        )
        .route("/genres", get(catalog::list_genres))
        .route("/tags", get(catalog::list_tags))
        .route(
            "/dates",
            get(catalog::list_dates).post(catalog::create_date),
        )
        .route(
            "/top-anime",
            get(catalog::list_top_anime).post(catalog::create_top_anime),
        )
}
