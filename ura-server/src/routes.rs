//! API route handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ura_core::{DanglingReference, Project};
use ura_export::{ExportError, ExportMode, ExportOutput};

use crate::metrics::{self, ExportTimer};
use crate::validation::{validate_project, ValidationError};
use crate::AppState;

/// Body of `POST /api/export`.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// Project to export.
    pub project: Project,
    /// Delivery mode (default: html).
    #[serde(default)]
    pub mode: ExportMode,
}

/// Response of `POST /api/export`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    /// `htmlText`, `zipBase64` or `hostedUrl`.
    #[serde(flatten)]
    pub output: ExportOutput,
    /// References to pages the project does not contain.
    pub dangling_references: Vec<DanglingReference>,
}

/// Errors returned by the API as `{ "error": "<message>" }`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The project failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The exporter failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Export(ExportError::EmptyProject) => {
                StatusCode::BAD_REQUEST
            }
            Self::Export(ExportError::Upload(_)) => StatusCode::BAD_GATEWAY,
            Self::Export(ExportError::UploaderMissing) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Export(ExportError::Packaging(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

fn validated(project: &Project) -> Result<(), ApiError> {
    validate_project(project).map_err(|e| {
        metrics::record_validation_failure(e.kind());
        ApiError::from(e)
    })
}

/// Export a project in the requested mode.
#[tracing::instrument(
    name = "export_project",
    skip(state, request),
    fields(mode = %request.mode, pages = request.project.pages.len())
)]
pub async fn export_project(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, ApiError> {
    let ExportRequest { project, mode } = request;
    validated(&project)?;

    let dangling_references = project.dangling_references();
    for dangling in &dangling_references {
        tracing::warn!(
            page = %dangling.page_id,
            kind = ?dangling.kind,
            target = %dangling.target,
            "Project references a missing page"
        );
    }

    let timer = ExportTimer::start(mode, project.pages.len());
    let result = state.exporter.export(&project, mode).await;
    timer.finish(result.is_ok());

    Ok(Json(ExportResponse {
        output: result?,
        dangling_references,
    }))
}

/// Compile a project and return the document for inline preview.
#[tracing::instrument(name = "preview_project", skip(state, project), fields(pages = project.pages.len()))]
pub async fn preview_project(
    State(state): State<AppState>,
    Json(project): Json<Project>,
) -> Result<Response, ApiError> {
    validated(&project)?;
    let html = state.exporter.html(&project)?;
    Ok((
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use ura_core::{Element, Page};
    use ura_export::ProjectExporter;

    fn app() -> axum::Router {
        crate::router(
            AppState::new(ProjectExporter::with_defaults()),
            crate::config::DEFAULT_MAX_BODY_BYTES,
        )
    }

    fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn project_json() -> serde_json::Value {
        let project = Project::new("Demo").with_page(
            Page::new("Home")
                .with_id("home")
                .with_element(Element::button("Go").with_id("b").linking_to("missing")),
        );
        serde_json::to_value(project).expect("project json")
    }

    #[tokio::test]
    async fn test_export_html_with_dangling_references() {
        let response = app()
            .oneshot(post_json(
                "/api/export",
                &serde_json::json!({ "project": project_json(), "mode": "html" }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert!(body["htmlText"]
            .as_str()
            .expect("html text")
            .starts_with("<!DOCTYPE html>"));
        assert_eq!(body["danglingReferences"][0]["target"], "missing");
        assert_eq!(body["danglingReferences"][0]["kind"], "buttonLink");
    }

    #[tokio::test]
    async fn test_export_defaults_to_html() {
        let response = app()
            .oneshot(post_json(
                "/api/export",
                &serde_json::json!({ "project": project_json() }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await.get("htmlText").is_some());
    }

    #[tokio::test]
    async fn test_invalid_project_is_bad_request() {
        let response = app()
            .oneshot(post_json(
                "/api/export",
                &serde_json::json!({ "project": { "name": "Empty", "pages": [] } }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "project has no pages");
    }

    #[tokio::test]
    async fn test_share_without_uploader_is_unavailable() {
        let response = app()
            .oneshot(post_json(
                "/api/export",
                &serde_json::json!({ "project": project_json(), "mode": "share" }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_preview_returns_html() {
        let response = app()
            .oneshot(post_json("/api/preview", &project_json()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("text/html; charset=utf-8")
        );
    }
}
