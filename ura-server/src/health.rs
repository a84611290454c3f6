//! Liveness and readiness checks.
//!
//! `/health/live` answers as long as the process serves requests.
//! `/health/ready` compiles a one-page canary project and reports each
//! component; only the compiler decides readiness.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use ura_core::{Element, Page, Project};

use crate::AppState;

/// State of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    /// Working.
    Up,
    /// Turned off by configuration.
    Disabled,
    /// Broken.
    Down,
}

/// Body of `/health/ready`.
#[derive(Debug, Serialize)]
pub struct Readiness {
    /// `ready` or `unready`.
    pub status: &'static str,
    /// Server version.
    pub version: &'static str,
    /// Document compiler.
    pub exporter: ComponentStatus,
    /// Share-mode uploads.
    pub share: ComponentStatus,
}

impl Readiness {
    fn is_ready(&self) -> bool {
        self.exporter == ComponentStatus::Up
    }
}

const CANARY_PAGE: &str = "health-canary";

fn canary_project() -> Project {
    Project::new("canary").with_page(
        Page::new("canary")
            .with_id(CANARY_PAGE)
            .with_element(Element::text("ok")),
    )
}

/// Whether the compiled canary kept its page section.
fn canary_compiled(html: &str) -> bool {
    html.contains(&format!("id=\"{CANARY_PAGE}\""))
}

/// Always 200.
#[tracing::instrument(name = "liveness_check")]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// 200 when the compiler works, 503 otherwise.
#[tracing::instrument(name = "readiness_check", skip(state))]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let exporter = match state.exporter.html(&canary_project()) {
        Ok(html) if canary_compiled(&html) => ComponentStatus::Up,
        Ok(_) => {
            tracing::error!("Canary document is missing its page");
            ComponentStatus::Down
        }
        Err(e) => {
            tracing::error!(error = %e, "Canary export failed");
            ComponentStatus::Down
        }
    };
    let share = if state.exporter.has_uploader() {
        ComponentStatus::Up
    } else {
        ComponentStatus::Disabled
    };

    let mut report = Readiness {
        status: "ready",
        version: env!("CARGO_PKG_VERSION"),
        exporter,
        share,
    };
    if !report.is_ready() {
        report.status = "unready";
        return (StatusCode::SERVICE_UNAVAILABLE, Json(report));
    }
    (StatusCode::OK, Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ura_export::ProjectExporter;

    #[test]
    fn test_readiness_serialization() {
        let report = Readiness {
            status: "ready",
            version: "0.2.0",
            exporter: ComponentStatus::Up,
            share: ComponentStatus::Disabled,
        };
        let json = serde_json::to_value(&report).expect("serialize");
        assert_eq!(json["exporter"], "up");
        assert_eq!(json["share"], "disabled");
        assert_eq!(json["version"], "0.2.0");
    }

    #[tokio::test]
    async fn test_ready_without_uploader() {
        let state = AppState::new(ProjectExporter::with_defaults());
        let (code, Json(report)) = readiness(State(state)).await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(report.status, "ready");
        assert_eq!(report.exporter, ComponentStatus::Up);
        assert_eq!(report.share, ComponentStatus::Disabled);
    }

    #[test]
    fn test_canary_marker_is_emitted() {
        let html = ProjectExporter::with_defaults()
            .html(&canary_project())
            .expect("canary compiles");
        assert!(canary_compiled(&html));
        assert!(!canary_compiled("<div id=\"other\"></div>"));
    }

    #[tokio::test]
    async fn test_liveness() {
        assert_eq!(liveness().await, StatusCode::OK);
    }
}
