use crate::api::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, field, info, info_span, warn};
use uuid::Uuid;

/// Response header carrying the id logged with every line of the request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Wraps each routed request in a span. Discovery handlers fill in the
/// `media_query` field so upstream log lines can be tied to their route.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();
    let method = req.method().clone();

    // Route template, not the raw path, so metric labels stay bounded.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        route = %route,
        params = req.uri().query().unwrap_or_default(),
        media_query = field::Empty,
    );

    let mut response = next.run(req).instrument(span.clone()).await;
    let status = response.status();
    let elapsed = start.elapsed();

    let labels = [
        ("method", method.to_string()),
        ("path", route),
        ("status", status.as_u16().to_string()),
    ];
    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!("http_request_duration_seconds", &labels).record(elapsed.as_secs_f64());

    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    span.in_scope(|| {
        if status.is_server_error() {
            warn!(status = status.as_u16(), duration_ms, "Request failed");
        } else {
            info!(status = status.as_u16(), duration_ms, "Request finished");
        }
    });

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
