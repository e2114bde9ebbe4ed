//! Application setup and router configuration.

use std::path::PathBuf;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes::{health_handler, ingest_pdf_handler, pipeline_run_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub upload_dir: PathBuf,
}

/// Build the Axum application router
pub fn build_app(upload_dir: PathBuf) -> Router {
    let state = AppState { upload_dir };

    // CORS configuration - allow any origin for development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/ingest_pdf", post(ingest_pdf_handler))
        .route("/pipeline/run", post(pipeline_run_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        let dir = std::env::temp_dir().join("screening-server-test");
        std::fs::create_dir_all(&dir).unwrap();
        build_app(dir)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn run_rejects_missing_files() {
        let request = Request::post("/pipeline/run")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"files": ["/no/such/file.pdf"]}"#))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn run_acknowledges_existing_files() {
        let dir = std::env::temp_dir().join("screening-server-run");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("deck.pdf");
        std::fs::write(&file, b"%PDF-stub").unwrap();

        let body = serde_json::json!({ "files": [file.to_string_lossy()] }).to_string();
        let request = Request::post("/pipeline/run")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
