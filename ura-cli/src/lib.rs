//! # URA CLI
//!
//! Compiles a saved URA project into a standalone document.
//!
//! ## Usage
//!
//! ```bash
//! ura build project.json --out site.html
//! ura zip project.json
//! ura zip project.json --data-url
//! ura share project.json --upload-url https://files.example/api.php
//! ```
//!
//! Without `--out` the output lands next to the input, named after the
//! project (`my-project.html` / `my-project.zip`).

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use ura_core::{Project, SceneError};
use ura_export::{
    slugify, ExportConfig, ExportError, HttpUploader, ProjectExporter, UploadError,
    DEFAULT_UPLOAD_URL,
};

/// Command-line arguments for `ura`.
#[derive(Debug, Clone, Parser)]
#[command(name = "ura")]
#[command(about = "Compile URA projects into standalone HTML documents")]
#[command(version)]
pub struct CliArgs {
    /// What to produce.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands, one per export mode.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write the compiled document as an `.html` file.
    Build(OutputArgs),
    /// Write the compiled document inside a `.zip` archive.
    Zip(ZipArgs),
    /// Upload the zip archive and print the hosted URL.
    Share(ShareArgs),
}

/// Arguments shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Project JSON file saved by the editor.
    pub project: PathBuf,

    /// Document title used when the project name is blank.
    #[arg(long)]
    pub title: Option<String>,
}

/// Arguments of `build` and `zip`.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    #[command(flatten)]
    #[allow(missing_docs)]
    pub input: InputArgs,

    /// Output path (default: next to the input, named after the project).
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

/// Arguments of `zip`.
#[derive(Debug, Clone, Args)]
pub struct ZipArgs {
    #[command(flatten)]
    #[allow(missing_docs)]
    pub output: OutputArgs,

    /// Print the archive as a `data:` URL instead of writing a file.
    #[arg(long, conflicts_with = "out")]
    pub data_url: bool,
}

/// Arguments of `share`.
#[derive(Debug, Clone, Args)]
pub struct ShareArgs {
    #[command(flatten)]
    #[allow(missing_docs)]
    pub input: InputArgs,

    /// Upload endpoint.
    #[arg(long, env = "URA_UPLOAD_URL", default_value = DEFAULT_UPLOAD_URL)]
    pub upload_url: String,
}

/// Errors reported by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading the project or writing the output failed.
    #[error("{path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The project file is not a valid project.
    #[error("{path}: {source}")]
    Project {
        /// Project file.
        path: PathBuf,
        /// Underlying error.
        source: SceneError,
    },

    /// The upload endpoint is unusable.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Export failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// What a finished command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A file was written.
    Written {
        /// Output path.
        path: PathBuf,
        /// Bytes written.
        bytes: usize,
    },
    /// The archive was encoded inline.
    DataUrl {
        /// `data:application/zip;base64,...`
        url: String,
    },
    /// The archive was uploaded.
    Shared {
        /// Hosted URL.
        url: String,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written { path, bytes } => write!(f, "wrote {} ({bytes} bytes)", path.display()),
            Self::DataUrl { url } | Self::Shared { url } => f.write_str(url),
        }
    }
}

/// Read and parse a project file.
///
/// # Errors
///
/// Returns [`CliError::Io`] if the file cannot be read and
/// [`CliError::Project`] if it is not a project.
pub fn load_project(path: &Path) -> Result<Project, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let project = Project::from_json(&json).map_err(|source| CliError::Project {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        pages = project.pages.len(),
        elements = project.element_count(),
        "Loaded project"
    );
    for dangling in project.dangling_references() {
        tracing::warn!(
            page = %dangling.page_id,
            kind = ?dangling.kind,
            target = %dangling.target,
            "Project references a missing page"
        );
    }
    Ok(project)
}

/// Output path used when `--out` is not given.
#[must_use]
pub fn default_output(input: &Path, project: &Project, extension: &str) -> PathBuf {
    let file = format!("{}.{extension}", slugify(&project.name));
    match input.parent() {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}

fn exporter(input: &InputArgs) -> ProjectExporter {
    let mut config = ExportConfig::default();
    if let Some(title) = &input.title {
        config.fallback_title.clone_from(title);
    }
    ProjectExporter::new(config)
}

fn write_output(path: PathBuf, bytes: &[u8]) -> Result<Outcome, CliError> {
    std::fs::write(&path, bytes).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(Outcome::Written {
        path,
        bytes: bytes.len(),
    })
}

/// Run a parsed command.
///
/// # Errors
///
/// Returns the first failure of loading, exporting or writing.
pub async fn run(command: Command) -> Result<Outcome, CliError> {
    match command {
        Command::Build(args) => {
            let project = load_project(&args.input.project)?;
            let html = exporter(&args.input).html(&project)?;
            let out = args
                .out
                .unwrap_or_else(|| default_output(&args.input.project, &project, "html"));
            write_output(out, html.as_bytes())
        }
        Command::Zip(ZipArgs { output, data_url }) => {
            let project = load_project(&output.input.project)?;
            let exporter = exporter(&output.input);
            if data_url {
                let url = exporter.zip_data_url(&project)?;
                return Ok(Outcome::DataUrl { url });
            }
            let archive = exporter.zip(&project)?;
            let out = output
                .out
                .unwrap_or_else(|| default_output(&output.input.project, &project, "zip"));
            write_output(out, &archive)
        }
        Command::Share(args) => {
            let project = load_project(&args.input.project)?;
            let uploader = HttpUploader::new(&args.upload_url)?;
            tracing::info!(endpoint = %uploader.endpoint(), "Uploading project archive");
            let url = exporter(&args.input)
                .with_uploader(Arc::new(uploader))
                .share(&project)
                .await?;
            Ok(Outcome::Shared { url })
        }
    }
}
