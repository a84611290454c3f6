//! A real `ura-server` on an ephemeral localhost port.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use ura_export::{HttpUploader, ProjectExporter, RetryConfig};
use ura_server::{config::DEFAULT_MAX_BODY_BYTES, router, AppState};

/// Options for [`TestServer`].
pub struct TestServerBuilder {
    upload_url: Option<String>,
    max_body_bytes: usize,
}

impl TestServerBuilder {
    /// Enable share mode against `url`, with retries off.
    #[allow(dead_code)]
    pub fn upload_url(mut self, url: impl Into<String>) -> Self {
        self.upload_url = Some(url.into());
        self
    }

    /// Override the request body limit.
    #[allow(dead_code)]
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Bind and serve.
    ///
    /// # Panics
    ///
    /// Panics if no port is free or the upload URL is invalid.
    pub async fn start(self) -> TestServer {
        let mut exporter = ProjectExporter::with_defaults();
        if let Some(url) = self.upload_url {
            let uploader = HttpUploader::with_retry_config(&url, RetryConfig::none())
                .expect("valid upload url");
            exporter = exporter.with_uploader(Arc::new(uploader));
        }
        let app = router(AppState::new(exporter), self.max_body_bytes);

        let port = portpicker::pick_unused_port().expect("free port");
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    stop_rx.await.ok();
                })
                .await
                .expect("serve");
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        TestServer {
            addr,
            stop_tx: Some(stop_tx),
            task,
        }
    }
}

/// Running server; call [`TestServer::shutdown`] at the end of a test.
pub struct TestServer {
    addr: SocketAddr,
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TestServer {
    /// Options with share disabled and the default body limit.
    pub fn builder() -> TestServerBuilder {
        TestServerBuilder {
            upload_url: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Start with defaults.
    pub async fn start() -> Self {
        Self::builder().start().await
    }

    /// Absolute URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// `POST /api/export`.
    pub fn export_url(&self) -> String {
        self.url("/api/export")
    }

    /// Stop accepting connections and wait up to five seconds.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop_tx.take() {
            stop.send(()).ok();
        }
        tokio::time::timeout(Duration::from_secs(5), self.task)
            .await
            .ok();
    }
}
