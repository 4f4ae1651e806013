use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::aggregate::aggregate;
use crate::board_config::BoardToml;
use crate::dashboard::{RenderOptions, render_document};
use crate::errors::{DashboardError, SourceError};
use crate::model::FeatureDocument;
use crate::overlay::requirements_for;
use crate::render::render_error_page;
use crate::source::DataSource;

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub source: Arc<dyn DataSource>,
    pub board: BoardToml,
    /// Fixed render date; today when unset.
    pub now: Option<NaiveDate>,
}

impl AppState {
    fn today(&self) -> NaiveDate {
        self.now.unwrap_or_else(|| Local::now().date_naive())
    }

    async fn load(&self) -> Result<FeatureDocument, ApiError> {
        self.source.load().await.map_err(|e| {
            tracing::warn!(source = %self.source.describe(), error = %e, "document load failed");
            ApiError::from(e)
        })
    }
}

pub type SharedState = Arc<AppState>;

// ── Request payload types ─────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SizeQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl SizeQuery {
    /// Sizes must be finite and positive.
    fn validate(&self) -> Result<(), ApiError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if let Some(value) = value
                && !(value.is_finite() && value > 0.0)
            {
                return Err(ApiError::Unprocessable(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

// ── Error handling ────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    /// The document loaded but its content is unusable.
    Unprocessable(String),
    /// The document could not be fetched or read.
    BadGateway(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg) | ApiError::Unprocessable(msg) | ApiError::BadGateway(msg) => {
                msg
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(serde_json::json!({"error": self.message()})),
        )
            .into_response()
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::UnknownFeature { .. } => ApiError::NotFound(err.to_string()),
            _ => ApiError::Unprocessable(err.to_string()),
        }
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Parse(_) => ApiError::Unprocessable(err.to_string()),
            _ => ApiError::BadGateway(err.to_string()),
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/summary", get(summary))
        .route("/api/features/{id}/requirements", get(feature_requirements))
        .route("/health", get(health_check))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Full HTML dashboard; failures render the error page with the API status.
async fn dashboard(State(state): State<SharedState>, Query(size): Query<SizeQuery>) -> Response {
    let title = state.board.chart.title.clone();
    match render_fresh(&state, size).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            (err.status(), Html(render_error_page(&title, err.message()))).into_response()
        }
    }
}

async fn render_fresh(state: &AppState, size: SizeQuery) -> Result<String, ApiError> {
    size.validate()?;
    let document = state.load().await?;
    let options = RenderOptions::from_config(&state.board, state.today(), state.source.describe())
        .with_size(size.width, size.height);
    let html = render_document(&document, &options).map_err(|e| {
        tracing::warn!(error = %e, "render failed");
        ApiError::from(e)
    })?;
    tracing::debug!(bytes = html.len(), "served dashboard");
    Ok(html)
}

async fn summary(State(state): State<SharedState>) -> Result<Response, ApiError> {
    let document = state.load().await?;
    let aggregation = aggregate(&document.features)?;
    Ok(Json(&aggregation).into_response())
}

async fn feature_requirements(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let document = state.load().await?;
    let rows = requirements_for(&document, &id)?;
    Ok(Json(rows).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FileSource;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const DOC: &str = r#"{
        "features": {
            "f-2": {"description": "Two", "status": "NotStarted"},
            "f-1": {"description": "One", "status": "Completed",
                    "startDate": "2018-01-10", "completedDate": "2018-03-05",
                    "requirements": ["r-1"]},
            "f-bad": {"description": "Bad", "status": "NotStarted", "requirements": ["r-gone"]}
        },
        "requirements": {
            "r-1": {"description": "Req", "status": "Completed", "issues": [4]}
        },
        "issues": {
            "4": {"url": "https://t/4", "title": "Four", "status": "Completed"}
        }
    }"#;

    fn test_app(contents: Option<&str>) -> (TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.json");
        if let Some(contents) = contents {
            std::fs::write(&path, contents).unwrap();
        }
        let state = Arc::new(AppState {
            source: Arc::new(FileSource::new(path)),
            board: BoardToml::default(),
            now: Some("2018-06-01".parse().unwrap()),
        });
        (dir, api_router().with_state(state))
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    fn json(body: &[u8]) -> serde_json::Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (_dir, app) = test_app(None);
        let (status, body) = fetch(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["status"], "ok");
    }

    #[tokio::test]
    async fn test_summary_counts_and_order() {
        let (_dir, app) = test_app(Some(DOC));
        let (status, body) = fetch(app, "/api/summary").await;
        assert_eq!(status, StatusCode::OK);
        let value = json(&body);
        assert_eq!(value["statusCounts"][0]["count"], 1);
        assert_eq!(value["statusCounts"][2]["count"], 2);
        assert_eq!(value["orderedFeatures"][0]["id"], "f-1");
        assert_eq!(value["orderedFeatures"][1]["id"], "f-2");
    }

    #[tokio::test]
    async fn test_feature_requirements() {
        let (_dir, app) = test_app(Some(DOC));
        let (status, body) = fetch(app, "/api/features/f-1/requirements").await;
        assert_eq!(status, StatusCode::OK);
        let value = json(&body);
        assert_eq!(value[0]["id"], "r-1");
        assert_eq!(value[0]["issues"][0]["number"], 4);
        assert_eq!(value[0]["issues"][0]["completed"], true);
    }

    #[tokio::test]
    async fn test_unknown_feature_is_404() {
        let (_dir, app) = test_app(Some(DOC));
        let (status, body) = fetch(app, "/api/features/nope/requirements").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body)["error"], "Feature 'nope' not found");
    }

    #[tokio::test]
    async fn test_dangling_reference_is_422() {
        let (_dir, app) = test_app(Some(DOC));
        let (status, body) = fetch(app, "/api/features/f-bad/requirements").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json(&body)["error"].as_str().unwrap().contains("r-gone"));
    }

    #[tokio::test]
    async fn test_dashboard_renders_html() {
        let doc = r#"{"features": {"f": {"description": "Only", "status": "InProgress",
                       "startDate": "2018-04-01"}}}"#;
        let (_dir, app) = test_app(Some(doc));
        let (status, body) = fetch(app, "/?width=900&height=600").await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains(r#"id="burn-down-chart" class="chart" width="900" height="600""#));
        assert!(html.contains(r#"id="feature-f""#));
    }

    #[tokio::test]
    async fn test_dashboard_rejects_non_finite_size() {
        let doc = r#"{"features": {"f": {"status": "NotStarted"}}}"#;
        for query in ["/?width=NaN", "/?height=inf", "/?width=-5", "/?width=0"] {
            let (_dir, app) = test_app(Some(doc));
            let (status, body) = fetch(app, query).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", query);
            let html = String::from_utf8(body).unwrap();
            assert!(html.contains("must be a positive number"), "{}", query);
            assert!(!html.contains(r#"width="NaN""#));
        }
    }

    #[tokio::test]
    async fn test_dashboard_malformed_data_is_422_error_page() {
        let (_dir, app) = test_app(Some(DOC));
        let (status, body) = fetch(app, "/").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains(r#"<p class="error">"#));
        assert!(html.contains("r-gone"));
    }

    #[tokio::test]
    async fn test_dashboard_missing_source_is_502() {
        let (_dir, app) = test_app(None);
        let (status, body) = fetch(app, "/").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(String::from_utf8(body).unwrap().contains("Failed to read input file"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_422() {
        let (_dir, app) = test_app(Some("{ not json"));
        let (status, _) = fetch(app, "/api/summary").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
