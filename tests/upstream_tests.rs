//! Drives the real HTTP client against a throwaway GraphQL server.

use animerec::clients::anilist::{AnilistClient, GraphQlRequest, GraphQlTransport, UpstreamError};
use animerec::config::{Config, UpstreamConfig};
use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::post,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::net::SocketAddr;
use tower::ServiceExt;

async fn graphql_ok(Json(body): Json<Value>) -> impl IntoResponse {
    let per_page = body["variables"]["perPage"].clone();
    Json(json!({
        "data": {
            "Page": {
                "media": [
                    { "id": 21, "title": { "romaji": "One Piece" }, "perPage": per_page }
                ]
            }
        }
    }))
}

async fn rate_limited() -> impl IntoResponse {
    (StatusCode::TOO_MANY_REQUESTS, Json(json!({ "errors": [] })))
}

async fn server_error() -> impl IntoResponse {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn missing_page() -> impl IntoResponse {
    Json(json!({ "data": null, "errors": [{ "message": "Validation error" }] }))
}

async fn not_json() -> impl IntoResponse {
    "<html>maintenance</html>"
}

async fn too_slow() -> impl IntoResponse {
    tokio::time::sleep(std::time::Duration::from_secs(3)).await;
    Json(json!({ "data": { "Page": { "media": [] } } }))
}

async fn spawn_fake_anilist() -> SocketAddr {
    let app = Router::new()
        .route("/ok", post(graphql_ok))
        .route("/rate-limited", post(rate_limited))
        .route("/error", post(server_error))
        .route("/missing-page", post(missing_page))
        .route("/not-json", post(not_json))
        .route("/slow", post(too_slow));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(url: String) -> AnilistClient {
    let config = UpstreamConfig {
        api_url: url,
        timeout_seconds: 1,
        ..Default::default()
    };
    AnilistClient::new(&config).unwrap()
}

fn request() -> GraphQlRequest {
    GraphQlRequest {
        query: "query { Page { media { id } } }".to_string(),
        variables: json!({ "page": 1, "perPage": 20 }),
    }
}

#[tokio::test]
async fn test_client_extracts_media() {
    let addr = spawn_fake_anilist().await;
    let client = client_for(format!("http://{addr}/ok"));

    let media = client.fetch_media_page(&request()).await.unwrap();
    assert_eq!(media.len(), 1);
    assert_eq!(media[0]["title"]["romaji"], "One Piece");
    assert_eq!(media[0]["perPage"], 20);
}

#[tokio::test]
async fn test_client_reports_status_and_payload_errors() {
    let addr = spawn_fake_anilist().await;

    let err = client_for(format!("http://{addr}/rate-limited"))
        .fetch_media_page(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Status(429)));

    let err = client_for(format!("http://{addr}/missing-page"))
        .fetch_media_page(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Decode(_)));

    let err = client_for(format!("http://{addr}/not-json"))
        .fetch_media_page(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Decode(_)));
}

#[tokio::test]
async fn test_client_reports_unreachable_host() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(format!("http://{addr}/graphql"))
        .fetch_media_page(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Transport(_)));
}

#[tokio::test]
async fn test_client_reports_timeout() {
    let addr = spawn_fake_anilist().await;

    let err = client_for(format!("http://{addr}/slow"))
        .fetch_media_page(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, UpstreamError::Timeout), "{err}");
}

async fn spawn_app(api_url: String) -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.upstream.api_url = api_url;
    config.upstream.timeout_seconds = 1;

    let state = animerec::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    animerec::api::router(state)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_routes_end_to_end() {
    let addr = spawn_fake_anilist().await;

    let app = spawn_app(format!("http://{addr}/ok")).await;
    let (status, body) = get(&app, "/api/get_seasonalAnime?season=SPRING&year=2024").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], 21);
    assert_eq!(body[0]["perPage"], 50);

    let app = spawn_app(format!("http://{addr}/error")).await;
    let (status, body) = get(&app, "/api/get_topAnime").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch data from Anilist API" }));

    let app = spawn_app(format!("http://{addr}/rate-limited")).await;
    let (status, body) = get(&app, "/api/get_genreAnime?genre=Action").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Failed to fetch data from Anilist API");

    let app = spawn_app(format!("http://{addr}/not-json")).await;
    let (status, body) = get(&app, "/api/get_popularAnime").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Anilist API returned an unexpected response");

    let app = spawn_app(format!("http://{addr}/slow")).await;
    let (status, body) = get(&app, "/api/get_yearlyAnime?year=2001").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "Anilist API timed out");
}
