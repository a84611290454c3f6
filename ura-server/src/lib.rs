//! # URA Server Library
//!
//! Router, handlers and state of the local export server.
//! This library is used by both the binary and integration tests.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;
use ura_export::{HttpUploader, ProjectExporter, UploadError};

pub mod config;
pub mod health;
pub mod metrics;
pub mod routes;
pub mod telemetry;
pub mod validation;

pub use config::ServerArgs;

/// Shared application state.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Exporter used by every route.
    pub exporter: Arc<ProjectExporter>,
}

impl AppState {
    /// Wrap an exporter.
    #[must_use]
    pub fn new(exporter: ProjectExporter) -> Self {
        Self {
            exporter: Arc::new(exporter),
        }
    }

    /// Build the state described by the server arguments.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::InvalidUrl`] if share mode is enabled with a
    /// malformed upload URL.
    pub fn from_args(args: &ServerArgs) -> Result<Self, UploadError> {
        let mut exporter = ProjectExporter::with_defaults();
        if !args.disable_share {
            exporter = exporter.with_uploader(Arc::new(HttpUploader::new(&args.upload_url)?));
        }
        Ok(Self::new(exporter))
    }

    /// Get a reference to the exporter.
    #[must_use]
    pub fn exporter(&self) -> &ProjectExporter {
        &self.exporter
    }
}

/// API and health routes with request counting and the body limit.
///
/// The binary wraps it with [`telemetry::instrument`].
#[must_use]
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/api/export", post(routes::export_project))
        .route("/api/preview", post(routes::preview_project))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(middleware::from_fn(metrics::track_requests))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_args() {
        let state = AppState::from_args(&ServerArgs::default()).expect("default args");
        assert!(state.exporter().has_uploader());

        let disabled = ServerArgs {
            disable_share: true,
            ..ServerArgs::default()
        };
        let state = AppState::from_args(&disabled).expect("share disabled");
        assert!(!state.exporter().has_uploader());

        let broken = ServerArgs {
            upload_url: "not a url".to_string(),
            ..ServerArgs::default()
        };
        assert!(matches!(
            AppState::from_args(&broken),
            Err(UploadError::InvalidUrl(_))
        ));
    }
}
