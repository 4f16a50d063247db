// src/server.rs

use crate::config::Config;
use crate::constants::{SERVER_DEFAULT_LIMIT, SERVER_DEFAULT_OFFSET};
use crate::db::Db;
use crate::models::{NewLogEntry, ProblemDetails};
use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct ServerState {
    pub db: Db,
    pub config: Config,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    offset: Option<u64>,
    limit: Option<u64>,
}

/// Request failures, rendered as problem-details JSON.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, problem) = match self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, ProblemDetails::bad_request(detail))
            }
            ApiError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ProblemDetails::internal_server_error(detail),
            ),
        };
        (status, Json(problem)).into_response()
    }
}

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/logs", get(get_logs).post(post_log))
        .route("/errors", get(get_errors))
        .with_state(state)
}

/// Serves until `shutdown` resolves, then drains in-flight requests.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<ServerState>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("listening on http://{}", addr);
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn get_logs(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|e| {
        warn!("rejected log query: {}", e);
        ApiError::BadRequest("offset and limit must be non-negative integers".to_string())
    })?;
    let offset = query.offset.unwrap_or(SERVER_DEFAULT_OFFSET);
    let limit = query.limit.unwrap_or(SERVER_DEFAULT_LIMIT);
    let (Ok(offset), Ok(limit)) = (i64::try_from(offset), i64::try_from(limit)) else {
        warn!("rejected log query: offset {} limit {} out of range", offset, limit);
        return Err(ApiError::BadRequest(
            "offset and limit must fit in a signed 64-bit integer".to_string(),
        ));
    };

    let entries = state.db.query_logs(offset, limit).await.map_err(|e| {
        error!("error retrieving logs: {}", e);
        ApiError::Internal("Error retrieving the log entries".to_string())
    })?;
    Ok(Json(entries))
}

async fn post_log(
    State(state): State<Arc<ServerState>>,
    body: Result<Json<NewLogEntry>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(entry) = body.map_err(|e| {
        warn!("rejected log submission: {}", e);
        ApiError::BadRequest("Invalid JSON format".to_string())
    })?;
    info!("received log: {}", entry);

    state.db.insert_log(&entry).await.map_err(|e| {
        error!("error saving log: {}", e);
        ApiError::Internal("Error saving the log entry".to_string())
    })?;

    Ok(Json(json!({
        "status": format!("Log entry received: {}", entry)
    })))
}

async fn get_errors(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/markdown")],
        state.config.error_markdown(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogEntry;
    use tempfile::{tempdir, TempDir};

    async fn spawn_server() -> (String, TempDir, tokio::sync::oneshot::Sender<()>) {
        let dir = tempdir().unwrap();
        let db = Db::open(&dir.path().join("logs.db")).await.unwrap();
        let state = Arc::new(ServerState {
            db,
            config: Config::default(),
        });
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(serve(listener, state, async {
            let _ = rx.await;
        }));
        (format!("http://{}", addr), dir, tx)
    }

    #[tokio::test]
    async fn test_post_then_get_round_trip() {
        let (base, _dir, _stop) = spawn_server().await;
        let client = reqwest::Client::new();

        for key in ["first", "second", "third"] {
            let reply: serde_json::Value = client
                .post(format!("{}/logs", base))
                .json(&json!({"key": key, "message": "boot", "environment": "dev",
                              "app_version": "1.0.0", "device_name": "phone"}))
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            assert_eq!(
                reply["status"],
                format!("Log entry received: [dev] 1.0.0 phone {}: boot", key)
            );
        }

        let response = client
            .get(format!("{}/logs?offset=1&limit=5", base))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let entries: Vec<LogEntry> = response.json().await.unwrap();
        let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["second", "third"]);
        assert!(entries[0].created_at.timestamp() > 0);
    }

    #[tokio::test]
    async fn test_get_defaults_to_ten() {
        let (base, _dir, _stop) = spawn_server().await;
        let client = reqwest::Client::new();
        for i in 0..12 {
            client
                .post(format!("{}/logs", base))
                .json(&json!({"key": format!("k{}", i), "message": "m"}))
                .send()
                .await
                .unwrap();
        }

        let entries: Vec<LogEntry> = client
            .get(format!("{}/logs", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].key, "k0");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (base, _dir, _stop) = spawn_server().await;
        let response = reqwest::Client::new()
            .post(format!("{}/logs", base))
            .header("content-type", "application/json")
            .body("{oops")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let problem: ProblemDetails = response.json().await.unwrap();
        assert_eq!(problem.kind, "/errors#bad-request");
        assert_eq!(problem.detail, "Invalid JSON format");
    }

    #[tokio::test]
    async fn test_bad_query_is_bad_request() {
        let (base, _dir, _stop) = spawn_server().await;
        let response = reqwest::get(format!("{}/logs?offset=-3", base)).await.unwrap();
        assert_eq!(response.status(), 400);
        let problem: ProblemDetails = response.json().await.unwrap();
        assert_eq!(problem.status, 400);
    }

    #[tokio::test]
    async fn test_limit_beyond_u32_is_served() {
        let (base, _dir, _stop) = spawn_server().await;
        let response = reqwest::get(format!("{}/logs?offset=0&limit={}", base, 1u64 << 32))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let entries: Vec<LogEntry> = response.json().await.unwrap();
        assert!(entries.is_empty());

        let response = reqwest::get(format!("{}/logs?limit={}", base, u64::MAX))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }

    #[tokio::test]
    async fn test_errors_markdown() {
        let (base, _dir, _stop) = spawn_server().await;
        let response = reqwest::get(format!("{}/errors", base)).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["content-type"].to_str().unwrap(),
            "text/markdown"
        );
        let body = response.text().await.unwrap();
        assert!(body.starts_with("### Bad Request\n"));
        assert!(body.contains("### Internal Server Error"));
    }
}
