//! Prometheus instrumentation.
//!
//! | name | kind | labels |
//! |------|------|--------|
//! | `ura_http_requests_total` | counter | method, path, status |
//! | `ura_http_request_duration_seconds` | histogram | method, path |
//! | `ura_exports_total` | counter | mode, outcome |
//! | `ura_export_duration_seconds` | histogram | mode |
//! | `ura_export_pages` | gauge | |
//! | `ura_validation_failures_total` | counter | type |

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use ura_export::ExportMode;

const HTTP_REQUESTS: &str = "ura_http_requests_total";
const HTTP_LATENCY: &str = "ura_http_request_duration_seconds";
const EXPORTS: &str = "ura_exports_total";
const EXPORT_LATENCY: &str = "ura_export_duration_seconds";
const EXPORT_PAGES: &str = "ura_export_pages";
const VALIDATION_FAILURES: &str = "ura_validation_failures_total";

/// Install the global recorder.
///
/// # Errors
///
/// Fails if a recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Count one HTTP request and record its latency.
pub fn record_http_request(method: &str, path: &str, status: u16, seconds: f64) {
    let (method, path) = (method.to_owned(), path.to_owned());
    counter!(
        HTTP_REQUESTS,
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(HTTP_LATENCY, "method" => method, "path" => path).record(seconds);
}

/// Count a rejected project by check (`page_id`, `geometry`, ...).
pub fn record_validation_failure(kind: &'static str) {
    counter!(VALIDATION_FAILURES, "type" => kind).increment(1);
}

/// Times one export. Call [`ExportTimer::finish`] with the outcome.
#[derive(Debug)]
pub struct ExportTimer {
    mode: ExportMode,
    pages: usize,
    started: Instant,
}

impl ExportTimer {
    /// Start timing an export of `pages` pages.
    #[must_use]
    pub fn start(mode: ExportMode, pages: usize) -> Self {
        Self {
            mode,
            pages,
            started: Instant::now(),
        }
    }

    /// Record the export as a success or a failure.
    #[allow(clippy::cast_precision_loss)]
    pub fn finish(self, succeeded: bool) {
        let mode = self.mode.as_str();
        let outcome = if succeeded { "success" } else { "failure" };
        counter!(EXPORTS, "mode" => mode, "outcome" => outcome).increment(1);
        histogram!(EXPORT_LATENCY, "mode" => mode).record(self.started.elapsed().as_secs_f64());
        gauge!(EXPORT_PAGES).set(self.pages as f64);
    }
}

/// Middleware feeding [`record_http_request`].
pub async fn track_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;
    record_http_request(
        method.as_str(),
        &path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}
