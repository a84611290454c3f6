//! Server configuration from flags and environment.

use clap::{Parser, ValueEnum};
use ura_export::DEFAULT_UPLOAD_URL;

/// Default port for the export server.
pub const DEFAULT_PORT: u16 = 9474;

/// Default request body limit (8 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Editor dev-server origins allowed in addition to the server's own.
pub const EDITOR_DEV_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Command-line arguments of `ura-server`.
#[derive(Debug, Clone, Parser)]
#[command(name = "ura-server", version, about = "Local URA export and preview server")]
pub struct ServerArgs {
    /// Port to listen on (localhost only).
    #[arg(long, env = "URA_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Upload endpoint used by share mode.
    #[arg(long, env = "URA_UPLOAD_URL", default_value = DEFAULT_UPLOAD_URL)]
    pub upload_url: String,

    /// Disable share mode entirely.
    #[arg(long, env = "URA_DISABLE_SHARE")]
    pub disable_share: bool,

    /// Largest accepted request body in bytes.
    #[arg(long, env = "URA_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Extra CORS origin, repeatable.
    #[arg(long = "allow-origin", env = "URA_ALLOW_ORIGINS", value_delimiter = ',')]
    pub allow_origins: Vec<String>,

    /// Log format.
    #[arg(long, env = "RUST_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl ServerArgs {
    /// Origins the CORS layer accepts: the server itself, the editor dev
    /// servers and any `--allow-origin`.
    #[must_use]
    pub fn cors_origins(&self) -> Vec<String> {
        let own = [
            format!("http://localhost:{}", self.port),
            format!("http://127.0.0.1:{}", self.port),
        ];
        own.into_iter()
            .chain(EDITOR_DEV_ORIGINS.iter().map(ToString::to_string))
            .chain(self.allow_origins.iter().cloned())
            .collect()
    }
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            disable_share: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            allow_origins: Vec::new(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = ServerArgs::parse_from(["ura-server"]);
        assert_eq!(args.port, DEFAULT_PORT);
        assert_eq!(args.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(!args.disable_share);
        assert!(args.allow_origins.is_empty());
    }

    #[test]
    fn test_flags_override() {
        let args = ServerArgs::parse_from([
            "ura-server",
            "--port",
            "8000",
            "--upload-url",
            "http://127.0.0.1:9/upload",
            "--disable-share",
            "--log-format",
            "json",
        ]);
        assert_eq!(args.port, 8000);
        assert_eq!(args.upload_url, "http://127.0.0.1:9/upload");
        assert!(args.disable_share);
        assert_eq!(args.log_format, LogFormat::Json);
    }

    #[test]
    fn test_cors_origins() {
        let args = ServerArgs::parse_from([
            "ura-server",
            "--port",
            "8000",
            "--allow-origin",
            "https://editor.example",
        ]);
        let origins = args.cors_origins();
        assert_eq!(origins[0], "http://localhost:8000");
        assert!(origins.contains(&"http://127.0.0.1:5173".to_string()));
        assert_eq!(origins.last().map(String::as_str), Some("https://editor.example"));
    }
}
