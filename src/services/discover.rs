//! Dispatches discovery queries to the upstream GraphQL API.

use crate::clients::anilist::{GraphQlRequest, GraphQlTransport, UpstreamError};
use crate::models::media::MediaQuery;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("failed to encode query variables: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One generic dispatcher shared by every `/api/get_*` route.
#[derive(Clone)]
pub struct DiscoverService {
    upstream: Arc<dyn GraphQlTransport>,
}

impl DiscoverService {
    #[must_use]
    pub fn new(upstream: Arc<dyn GraphQlTransport>) -> Self {
        Self { upstream }
    }

    pub fn build_request(query: &MediaQuery) -> Result<GraphQlRequest, serde_json::Error> {
        Ok(GraphQlRequest {
            query: query.document(),
            variables: serde_json::to_value(query.variables())?,
        })
    }

    /// Runs `query` once against the upstream and returns the page's media list.
    pub async fn fetch(&self, query: &MediaQuery) -> Result<Vec<Value>, DiscoverError> {
        let request = Self::build_request(query)?;
        let start = Instant::now();

        let result = self.upstream.fetch_media_page(&request).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(UpstreamError::Status(_)) => "upstream_error",
            Err(UpstreamError::Timeout | UpstreamError::Transport(_)) => "transport_error",
            Err(UpstreamError::Decode(_)) => "decode_error",
        };

        metrics::counter!(
            "upstream_requests_total",
            "query" => query.name(),
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!("upstream_request_duration_seconds", "query" => query.name())
            .record(start.elapsed().as_secs_f64());

        match &result {
            Ok(media) => info!(
                query = query.name(),
                count = media.len(),
                duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                "Upstream query finished"
            ),
            Err(e) => warn!(query = query.name(), error = %e, "Upstream query failed"),
        }

        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::Season;
    use serde_json::json;
    use std::sync::Mutex;

    struct Recorder {
        requests: Mutex<Vec<GraphQlRequest>>,
        reply: fn() -> Result<Vec<Value>, UpstreamError>,
    }

    #[async_trait::async_trait]
    impl GraphQlTransport for Recorder {
        async fn fetch_media_page(
            &self,
            request: &GraphQlRequest,
        ) -> Result<Vec<Value>, UpstreamError> {
            self.requests.lock().unwrap().push(request.clone());
            (self.reply)()
        }
    }

    fn service(reply: fn() -> Result<Vec<Value>, UpstreamError>) -> (DiscoverService, Arc<Recorder>) {
        let recorder = Arc::new(Recorder {
            requests: Mutex::new(Vec::new()),
            reply,
        });
        (DiscoverService::new(recorder.clone()), recorder)
    }

    #[tokio::test]
    async fn test_fetch_relays_media_unchanged() {
        let (service, _) = service(|| Ok(vec![json!({ "id": 1, "popularity": 10 })]));

        let media = service.fetch(&MediaQuery::Popular).await.unwrap();
        assert_eq!(media, vec![json!({ "id": 1, "popularity": 10 })]);
    }

    #[tokio::test]
    async fn test_fetch_sends_document_and_variables() {
        let (service, recorder) = service(|| Ok(vec![]));

        service
            .fetch(&MediaQuery::Seasonal {
                season: Season::Summer,
                year: 2021,
            })
            .await
            .unwrap();

        let requests = recorder.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].query.contains("season: $season"));
        assert_eq!(
            requests[0].variables,
            json!({ "page": 1, "perPage": 50, "season": "SUMMER", "year": 2021 })
        );
    }

    #[tokio::test]
    async fn test_fetch_does_not_retry_failures() {
        let (service, recorder) = service(|| Err(UpstreamError::Status(503)));

        let err = service
            .fetch(&MediaQuery::Tag {
                tag: "Mecha".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoverError::Upstream(UpstreamError::Status(503))));
        assert_eq!(recorder.requests.lock().unwrap().len(), 1);
    }
}
