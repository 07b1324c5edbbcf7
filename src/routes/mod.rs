pub mod feed;
pub mod health;

use axum::{
    Router,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .merge(health::router())
        .merge(feed::router())
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(cors),
        )
}

/// Plain-text response with a bare `text/plain` content type
pub fn plain_text(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "text/plain")], body).into_response()
}

async fn not_found() -> Response {
    plain_text(StatusCode::NOT_FOUND, "Not Found")
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Request handler panicked: {}", detail);
    plain_text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

/// Convert handler errors to a generic 500 response
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request error: {:#}", self.0);
        plain_text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use notion_ical_core::notion::{DatabaseSource, EventFetcher, QueryPage, Record};
    use notion_ical_core::{FeedCache, NotionIcalError, NotionIcalResult, PropertyNames};
    use serde_json::json;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tower::ServiceExt;

    /// Serves one fixed page, or fails every call
    pub(crate) struct StaticDatabase {
        records: Vec<Record>,
        fail: bool,
        pub calls: AtomicUsize,
    }

    #[async_trait]
    impl DatabaseSource for StaticDatabase {
        async fn query_page(
            &self,
            _date_property: &str,
            _cursor: Option<&str>,
        ) -> NotionIcalResult<QueryPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NotionIcalError::Decode("unexpected response".into()));
            }
            Ok(QueryPage {
                records: self.records.clone(),
                has_more: false,
                next_cursor: None,
            })
        }
    }

    pub(crate) fn test_database(fail: bool) -> Arc<StaticDatabase> {
        let record: Record = serde_json::from_value(json!({
            "id": "test-event-1",
            "url": "https://notion.so/test-event-1",
            "properties": {
                "Name": { "type": "title", "title": [{ "plain_text": "Test Event" }] },
                "Date": {
                    "type": "date",
                    "date": { "start": "2024-01-15T10:00:00Z", "end": "2024-01-15T11:00:00Z" }
                },
                "Description": { "type": "rich_text", "rich_text": [{ "plain_text": "Test description" }] },
                "Location": { "type": "rich_text", "rich_text": [{ "plain_text": "Test location" }] }
            }
        }))
        .unwrap();

        Arc::new(StaticDatabase {
            records: vec![record],
            fail,
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn test_app(db: Arc<StaticDatabase>) -> Router {
        let names = PropertyNames {
            description: Some("Description".into()),
            location: Some("Location".into()),
            ..PropertyNames::default()
        };
        let fetcher = EventFetcher::new(db, names, 10);
        let cache = FeedCache::new(fetcher, Duration::from_secs(300));
        app(AppState::new(cache))
    }

    pub(crate) async fn get(app: &Router, path: &str) -> (StatusCode, Option<String>, String) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let app = test_app(test_database(false));

        let (status, content_type, body) = get(&app, "/foo").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type.as_deref(), Some("text/plain"));
        assert_eq!(body, "Not Found");
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_500() {
        async fn boom() -> &'static str {
            panic!("boom")
        }

        let app = Router::new()
            .route("/boom", axum::routing::get(boom))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Internal Server Error");
    }
}
