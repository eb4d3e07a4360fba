//! API route handlers for the gateway.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, extract::State};
use sitechat_core::error::SiteChatError;
use std::sync::Arc;

use super::server::AppState;

pub const QUERY_REQUIRED: &str = "Query is required";
pub const GENERIC_FAILURE: &str = "An error occurred while processing your request.";

/// Error returned to HTTP clients. Internal details are logged, never sent.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str),
    Internal,
}

impl From<SiteChatError> for ApiError {
    fn from(e: SiteChatError) -> Self {
        if e.is_client_error() {
            Self::BadRequest(QUERY_REQUIRED)
        } else {
            tracing::error!("Error: {e}");
            Self::Internal
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "sitechat-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

/// Answer a chat query: `{ "query": string }` → `{ "answer": string }`.
pub async fn rag(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Ok(Json(body)) = body else {
        return Err(ApiError::BadRequest(QUERY_REQUIRED));
    };
    let query = body["query"].as_str().unwrap_or("");
    if query.trim().is_empty() {
        return Err(ApiError::BadRequest(QUERY_REQUIRED));
    }

    let table = state.index.snapshot()?;
    let response = state.matcher.respond(query, &table)?;
    tracing::debug!(topic = ?response.topic, sources = ?response.sources, "answered query");
    Ok(Json(serde_json::json!({"answer": response.answer})))
}

/// Rebuild the index from the configured pages and publish it.
pub async fn reindex(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let shared = state.clone();
    let pages = tokio::task::spawn_blocking(move || shared.index.reindex(&shared.indexer))
        .await
        .map_err(|e| SiteChatError::Internal(format!("reindex task failed: {e}")))??;
    Ok(Json(serde_json::json!({"ok": true, "pages": pages})))
}

/// List indexed pages.
pub async fn list_pages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let table = state.index.snapshot()?;
    let pages: Vec<_> = table
        .iter()
        .map(|r| serde_json::json!({"url": r.url, "title": r.title, "headers": r.headers}))
        .collect();
    Ok(Json(serde_json::json!({"ok": true, "count": pages.len(), "pages": pages})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitechat_core::config::{PageConfig, SiteChatConfig};
    use sitechat_knowledge::rules::{CONTACT_ANSWER, VISA_ANSWER};
    use sitechat_knowledge::{DocumentRecord, IndexTable, Indexer, Matcher, SharedIndex};

    fn test_state(table: IndexTable) -> State<Arc<AppState>> {
        let config = SiteChatConfig::default();
        State(Arc::new(AppState {
            indexer: Arc::new(Indexer::from_config(&config.site).unwrap()),
            matcher: Matcher::new(config.site.fallback_context.clone()),
            index: Arc::new(SharedIndex::with_table(table)),
            config,
            start_time: std::time::Instant::now(),
        }))
    }

    fn sample_table() -> IndexTable {
        let mut t = IndexTable::new();
        t.insert(DocumentRecord {
            url: "/f1-students".into(),
            title: "F1 Students".into(),
            headers: vec!["F1 Student Resources".into()],
            content: "F1 Student Resources Guidance for international students".into(),
        });
        t
    }

    #[tokio::test]
    async fn test_health_check() {
        let json = health_check(test_state(IndexTable::new())).await.0;
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
        assert!(json["uptime_secs"].is_number());
    }

    #[tokio::test]
    async fn test_rag_visa_answer() {
        let body = Ok(Json(serde_json::json!({"query": "What about my VISA?"})));
        let json = rag(test_state(sample_table()), body).await.unwrap().0;
        assert_eq!(json["answer"], VISA_ANSWER);
    }

    #[tokio::test]
    async fn test_rag_contact_with_empty_index() {
        let body = Ok(Json(serde_json::json!({"query": "How can I contact you?"})));
        let json = rag(test_state(IndexTable::new()), body).await.unwrap().0;
        assert_eq!(json["answer"], CONTACT_ANSWER);
    }

    #[tokio::test]
    async fn test_rag_rejects_missing_or_blank_query() {
        for body in [
            serde_json::json!({}),
            serde_json::json!({"query": ""}),
            serde_json::json!({"query": "   "}),
            serde_json::json!({"query": 42}),
        ] {
            let err = rag(test_state(sample_table()), Ok(Json(body))).await.unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(QUERY_REQUIRED)));
        }
    }

    #[tokio::test]
    async fn test_list_pages() {
        let json = list_pages(test_state(sample_table())).await.unwrap().0;
        assert_eq!(json["count"], 1);
        assert_eq!(json["pages"][0]["url"], "/f1-students");
        assert_eq!(json["pages"][0]["headers"][0], "F1 Student Resources");
    }

    #[tokio::test]
    async fn test_reindex_replaces_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("about.html"),
            "<html><head><title>About</title></head><body><main><p>About us</p></main></body></html>",
        )
        .unwrap();
        let mut config = SiteChatConfig::default();
        config.site.root = dir.path().to_string_lossy().to_string();
        config.site.pages = vec![PageConfig { url: "/about".into(), path: "about.html".into() }];

        let state = Arc::new(AppState {
            indexer: Arc::new(Indexer::from_config(&config.site).unwrap()),
            matcher: Matcher::new(config.site.fallback_context.clone()),
            index: Arc::new(SharedIndex::with_table(sample_table())),
            config,
            start_time: std::time::Instant::now(),
        });

        let json = reindex(State(state.clone())).await.unwrap().0;
        assert_eq!(json["pages"], 1);
        let table = state.index.snapshot().unwrap();
        assert!(table.get("/about").is_some());
        assert!(table.get("/f1-students").is_none());
    }

    #[test]
    fn test_internal_error_hides_details() {
        let err: ApiError = SiteChatError::Internal("secret detail".into()).into();
        assert!(matches!(err, ApiError::Internal));
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
