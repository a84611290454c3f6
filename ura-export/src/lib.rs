//! # URA Export
//!
//! Compiles a [`ura_core::Project`] into one standalone HTML document and
//! delivers it as text, a zip archive, or a hosted URL.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    ProjectExporter                       │
//! │            html  ·  zip  ·  share (Uploader)             │
//! ├──────────────────────────────────────────────────────────┤
//! │                   DocumentCompiler                       │
//! ├───────────────┬────────────────┬─────────────────────────┤
//! │ stylesheet    │ markup         │ script                  │
//! │ (keyframes)   │ (pages, style) │ (runtime + CONFIG json) │
//! └───────────────┴───────┬────────┴──────────┬──────────────┘
//!                         └──── protocol ─────┘
//! ```
//!
//! The markup and the runtime script meet only through the attribute
//! vocabulary in [`protocol`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod error;
pub mod export;
pub mod markup;
pub mod protocol;
pub mod script;
pub mod style;
pub mod stylesheet;
pub mod upload;

pub use document::{compile, DocumentCompiler};
pub use error::{ExportError, ExportResult, UploadError};
pub use export::{slugify, ExportConfig, ExportMode, ExportOutput, ProjectExporter};
pub use protocol::{Vocabulary, PROTOCOL_VERSION};
pub use upload::{UploadPayload, Uploader};

#[cfg(feature = "upload")]
pub use upload::{HttpUploader, RetryConfig, DEFAULT_UPLOAD_URL};
