//! Error types for scene model operations.

use thiserror::Error;

/// Result type for scene model operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while building or loading a project.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Page not found in the project.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Element not found on a page.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The project has no pages.
    #[error("Project has no pages")]
    EmptyProject,

    /// Invalid operation on the scene.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Project serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
