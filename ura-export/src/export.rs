//! Project export to text, zip archive, or hosted URL.
//!
//! All three modes start from the same compiled document. Zip archives
//! hold a single `<slug>.html` entry and are byte-for-byte reproducible.

use std::io::{Cursor, Write};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use ura_core::Project;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::document::{DocumentCompiler, DEFAULT_TITLE};
use crate::error::{ExportError, ExportResult};
use crate::upload::{UploadPayload, Uploader};

/// Requested delivery mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Document text for inline preview.
    #[default]
    Html,
    /// Base64 zip archive.
    Zip,
    /// Hosted URL of the uploaded archive.
    Share,
}

impl ExportMode {
    /// Lowercase mode name, as used in logs and metrics labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Zip => "zip",
            Self::Share => "share",
        }
    }
}

impl std::fmt::Display for ExportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an export, one field per mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportOutput {
    /// Document text.
    Html {
        /// The standalone document.
        #[serde(rename = "htmlText")]
        html_text: String,
    },
    /// Zip archive.
    Zip {
        /// Base64 of the archive bytes.
        #[serde(rename = "zipBase64")]
        zip_base64: String,
    },
    /// Uploaded archive.
    Share {
        /// Public URL returned by the uploader.
        #[serde(rename = "hostedUrl")]
        hosted_url: String,
    },
}

impl ExportOutput {
    /// The mode that produced this output.
    #[must_use]
    pub const fn mode(&self) -> ExportMode {
        match self {
            Self::Html { .. } => ExportMode::Html,
            Self::Zip { .. } => ExportMode::Zip,
            Self::Share { .. } => ExportMode::Share,
        }
    }
}

/// Configuration for project export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Document title when the project name is blank.
    pub fallback_title: String,
    /// Compression of the archive entry (default: deflate).
    pub compression: CompressionMethod,
    /// MIME type handed to the uploader.
    pub content_type: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            fallback_title: DEFAULT_TITLE.to_string(),
            compression: CompressionMethod::Deflated,
            content_type: "application/zip".to_string(),
        }
    }
}

/// Exports a [`Project`] in any [`ExportMode`].
#[derive(Clone)]
pub struct ProjectExporter {
    config: ExportConfig,
    compiler: DocumentCompiler,
    uploader: Option<Arc<dyn Uploader>>,
}

impl std::fmt::Debug for ProjectExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectExporter")
            .field("config", &self.config)
            .field("uploader", &self.uploader.is_some())
            .finish_non_exhaustive()
    }
}

impl ProjectExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        let compiler = DocumentCompiler::new(config.fallback_title.clone());
        Self {
            config,
            compiler,
            uploader: None,
        }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Attach the collaborator used by share mode.
    #[must_use]
    pub fn with_uploader(mut self, uploader: Arc<dyn Uploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Whether share mode is available.
    #[must_use]
    pub fn has_uploader(&self) -> bool {
        self.uploader.is_some()
    }

    /// Compile the project into document text.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::EmptyProject`] if the project has no pages.
    pub fn html(&self, project: &Project) -> ExportResult<String> {
        if project.is_empty() {
            return Err(ExportError::EmptyProject);
        }
        Ok(self.compiler.compile(project))
    }

    /// Archive file name of a project, e.g. `my-project.zip`.
    #[must_use]
    pub fn archive_name(project: &Project) -> String {
        format!("{}.zip", slugify(&project.name))
    }

    /// Package the document into a zip archive.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::EmptyProject`] for a project without pages,
    /// [`ExportError::Packaging`] if the archive cannot be written.
    pub fn zip(&self, project: &Project) -> ExportResult<Vec<u8>> {
        let html = self.html(project)?;
        let entry = format!("{}.html", slugify(&project.name));

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let file_options: FileOptions<'_, ()> = FileOptions::default()
            .compression_method(self.config.compression)
            .last_modified_time(zip::DateTime::default())
            .unix_permissions(0o644);

        zip.start_file(entry.as_str(), file_options)?;
        zip.write_all(html.as_bytes())?;
        let bytes = zip.finish()?.into_inner();

        tracing::debug!(entry = %entry, bytes = bytes.len(), "Packaged document");
        Ok(bytes)
    }

    /// Package the document as the archive payload handed to uploaders.
    ///
    /// # Errors
    ///
    /// See [`ProjectExporter::zip`].
    pub fn payload(&self, project: &Project) -> ExportResult<UploadPayload> {
        Ok(UploadPayload::new(
            Self::archive_name(project),
            self.config.content_type.clone(),
            self.zip(project)?,
        ))
    }

    /// Package the document and encode the archive as base64.
    ///
    /// # Errors
    ///
    /// See [`ProjectExporter::zip`].
    pub fn zip_base64(&self, project: &Project) -> ExportResult<String> {
        Ok(self.payload(project)?.data_base64())
    }

    /// Package the document as a `data:` URL of the archive.
    ///
    /// # Errors
    ///
    /// See [`ProjectExporter::zip`].
    pub fn zip_data_url(&self, project: &Project) -> ExportResult<String> {
        Ok(self.payload(project)?.data_url())
    }

    /// Package the document and upload the archive.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::UploaderMissing`] without an uploader,
    /// [`ExportError::Upload`] if the upload fails, and the errors of
    /// [`ProjectExporter::zip`].
    pub async fn share(&self, project: &Project) -> ExportResult<String> {
        let uploader = self.uploader.as_ref().ok_or(ExportError::UploaderMissing)?;
        let payload = self.payload(project)?;
        uploader.upload(payload).await.map_err(|e| {
            tracing::error!(error = %e, "Upload failed");
            ExportError::from(e)
        })
    }

    /// Export the project in the requested mode.
    ///
    /// # Errors
    ///
    /// Returns the error of the mode's operation.
    pub async fn export(&self, project: &Project, mode: ExportMode) -> ExportResult<ExportOutput> {
        let output = match mode {
            ExportMode::Html => ExportOutput::Html {
                html_text: self.html(project)?,
            },
            ExportMode::Zip => ExportOutput::Zip {
                zip_base64: self.zip_base64(project)?,
            },
            ExportMode::Share => ExportOutput::Share {
                hosted_url: self.share(project).await?,
            },
        };

        let bytes = match &output {
            ExportOutput::Html { html_text } => html_text.len(),
            ExportOutput::Zip { zip_base64 } => zip_base64.len(),
            ExportOutput::Share { hosted_url } => hosted_url.len(),
        };
        tracing::info!(
            mode = %mode,
            pages = project.pages.len(),
            bytes,
            "Export complete"
        );
        Ok(output)
    }
}

/// File-name slug of a project name.
///
/// Lowercases, and replaces every whitespace character and path separator
/// with `-`. Leading and trailing whitespace is kept as dashes; only an
/// empty name gives `index`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let slug: String = name
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '-'
            } else {
                c
            }
        })
        .flat_map(char::to_lowercase)
        .collect();
    if slug.is_empty() {
        "index".to_string()
    } else {
        slug
    }
}
