//! Input validation for untrusted projects.
//!
//! Projects posted to the server MUST pass [`validate_project`] before
//! they reach the exporter.

use std::collections::HashSet;

use thiserror::Error;
use ura_core::{Element, ElementKind, Page, Project};

/// Maximum length for page IDs.
pub const MAX_PAGE_ID_LEN: usize = 64;
/// Maximum length for element IDs (UUIDs are 36 chars).
pub const MAX_ELEMENT_ID_LEN: usize = 64;
/// Maximum pages per project.
pub const MAX_PAGES: usize = 500;
/// Maximum elements across all pages.
pub const MAX_ELEMENTS: usize = 10_000;
/// Maximum custom markup length per page.
pub const MAX_CUSTOM_HTML_LEN: usize = 1_048_576; // 1MB
/// Maximum text content length in elements.
pub const MAX_TEXT_CONTENT_LEN: usize = 65_536;

/// Validation error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The project has no pages.
    #[error("project has no pages")]
    NoPages,
    /// Too many pages.
    #[error("too many pages (max {MAX_PAGES})")]
    TooManyPages,
    /// Too many elements across the project.
    #[error("too many elements (max {MAX_ELEMENTS})")]
    TooManyElements,
    /// Page ID exceeds maximum length.
    #[error("page id too long (max {MAX_PAGE_ID_LEN} chars)")]
    PageIdTooLong,
    /// Page ID is empty or contains invalid characters.
    #[error("page id contains invalid characters: {0:?}")]
    PageIdInvalidChars(String),
    /// Two pages share an ID.
    #[error("duplicate page id: {0}")]
    DuplicatePageId(String),
    /// Element ID exceeds maximum length.
    #[error("element id too long (max {MAX_ELEMENT_ID_LEN} chars)")]
    ElementIdTooLong,
    /// Element ID is empty or contains invalid characters.
    #[error("element id contains invalid characters: {0:?}")]
    ElementIdInvalidChars(String),
    /// Two elements of one page share an ID.
    #[error("duplicate element id {element} on page {page}")]
    DuplicateElementId {
        /// Page holding both elements.
        page: String,
        /// The repeated element ID.
        element: String,
    },
    /// Custom markup exceeds maximum length.
    #[error("custom markup of page {0} too long (max {MAX_CUSTOM_HTML_LEN} bytes)")]
    CustomHtmlTooLong(String),
    /// Text content exceeds maximum length.
    #[error("text content of element {0} too long (max {MAX_TEXT_CONTENT_LEN} bytes)")]
    TextContentTooLong(String),
    /// Position, size or rotation is not usable.
    #[error("invalid geometry on element {element}: {reason}")]
    InvalidGeometry {
        /// Offending element.
        element: String,
        /// What is wrong.
        reason: &'static str,
    },
    /// Redirect delay is negative or not finite.
    #[error("invalid redirect delay on page {0}")]
    InvalidRedirectDelay(String),
}

impl ValidationError {
    /// Short label for metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NoPages | Self::TooManyPages | Self::TooManyElements => "size",
            Self::PageIdTooLong | Self::PageIdInvalidChars(_) | Self::DuplicatePageId(_) => {
                "page_id"
            }
            Self::ElementIdTooLong
            | Self::ElementIdInvalidChars(_)
            | Self::DuplicateElementId { .. } => "element_id",
            Self::CustomHtmlTooLong(_) | Self::TextContentTooLong(_) => "content",
            Self::InvalidGeometry { .. } => "geometry",
            Self::InvalidRedirectDelay(_) => "redirect",
        }
    }
}

/// Check if a character is valid for IDs (alphanumeric, hyphen, or underscore).
fn is_valid_id_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Validate a page ID.
///
/// Valid page IDs:
/// - 1-64 characters
/// - Alphanumeric, hyphen, underscore only
///
/// # Errors
///
/// Returns [`ValidationError::PageIdTooLong`] if the ID exceeds 64 characters.
/// Returns [`ValidationError::PageIdInvalidChars`] if the ID is empty or contains invalid characters.
pub fn validate_page_id(id: &str) -> Result<(), ValidationError> {
    if id.len() > MAX_PAGE_ID_LEN {
        return Err(ValidationError::PageIdTooLong);
    }
    if id.is_empty() || !id.chars().all(is_valid_id_char) {
        return Err(ValidationError::PageIdInvalidChars(id.to_string()));
    }
    Ok(())
}

/// Validate an element ID.
///
/// Same rules as page IDs; UUIDs are valid.
///
/// # Errors
///
/// Returns [`ValidationError::ElementIdTooLong`] if the ID exceeds 64 characters.
/// Returns [`ValidationError::ElementIdInvalidChars`] if the ID is empty or contains invalid characters.
pub fn validate_element_id(id: &str) -> Result<(), ValidationError> {
    if id.len() > MAX_ELEMENT_ID_LEN {
        return Err(ValidationError::ElementIdTooLong);
    }
    if id.is_empty() || !id.chars().all(is_valid_id_char) {
        return Err(ValidationError::ElementIdInvalidChars(id.to_string()));
    }
    Ok(())
}

/// Validate position, size and rotation of an element.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidGeometry`] for non-finite values or
/// negative sizes.
pub fn validate_geometry(element: &Element) -> Result<(), ValidationError> {
    let invalid = |reason| ValidationError::InvalidGeometry {
        element: element.id.to_string(),
        reason,
    };
    if !element.position.x.is_finite() || !element.position.y.is_finite() {
        return Err(invalid("position is not finite"));
    }
    let size = element.size;
    if !size.width.is_finite() || !size.height.is_finite() {
        return Err(invalid("size is not finite"));
    }
    if size.width < 0.0 || size.height < 0.0 {
        return Err(invalid("size is negative"));
    }
    if !element.rotation.is_finite() {
        return Err(invalid("rotation is not finite"));
    }
    Ok(())
}

fn validate_text(element: &Element) -> Result<(), ValidationError> {
    let content = match &element.kind {
        ElementKind::Text(text) => &text.content,
        ElementKind::Button(button) => &button.content,
        _ => return Ok(()),
    };
    if content.len() > MAX_TEXT_CONTENT_LEN {
        return Err(ValidationError::TextContentTooLong(element.id.to_string()));
    }
    Ok(())
}

fn validate_page(page: &Page) -> Result<(), ValidationError> {
    validate_page_id(page.id.as_str())?;

    for markup in [&page.custom_html, &page.build_html].into_iter().flatten() {
        if markup.len() > MAX_CUSTOM_HTML_LEN {
            return Err(ValidationError::CustomHtmlTooLong(page.id.to_string()));
        }
    }

    if let Some(redirect) = &page.redirect {
        if !redirect.delay.is_finite() || redirect.delay < 0.0 {
            return Err(ValidationError::InvalidRedirectDelay(page.id.to_string()));
        }
    }

    let mut seen = HashSet::new();
    for element in &page.elements {
        validate_element_id(element.id.as_str())?;
        if !seen.insert(element.id.as_str()) {
            return Err(ValidationError::DuplicateElementId {
                page: page.id.to_string(),
                element: element.id.to_string(),
            });
        }
        validate_geometry(element)?;
        validate_text(element)?;
    }
    Ok(())
}

/// Validate a whole project.
///
/// Dangling page references are not an error; they are reported alongside
/// the export instead.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.pages.is_empty() {
        return Err(ValidationError::NoPages);
    }
    if project.pages.len() > MAX_PAGES {
        return Err(ValidationError::TooManyPages);
    }
    if project.element_count() > MAX_ELEMENTS {
        return Err(ValidationError::TooManyElements);
    }

    let mut ids = HashSet::new();
    for page in &project.pages {
        validate_page(page)?;
        if !ids.insert(page.id.as_str()) {
            return Err(ValidationError::DuplicatePageId(page.id.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ura_core::templates::page_templates;

    fn project_with(page: Page) -> Project {
        Project::new("Test").with_page(page)
    }

    #[test]
    fn test_valid_page_ids() {
        assert!(validate_page_id("home").is_ok());
        assert!(validate_page_id("template-mcq").is_ok());
        assert!(validate_page_id("page_2").is_ok());
        assert!(validate_page_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
    }

    #[test]
    fn test_invalid_page_ids() {
        assert!(validate_page_id("").is_err());
        assert!(validate_page_id("has spaces").is_err());
        assert!(validate_page_id("a\"b").is_err());
        assert!(validate_page_id("../../etc/passwd").is_err());
        assert!(validate_page_id("contains<script>").is_err());
        assert_eq!(
            validate_page_id(&"x".repeat(MAX_PAGE_ID_LEN + 1)),
            Err(ValidationError::PageIdTooLong)
        );
    }

    #[test]
    fn test_id_boundary() {
        assert!(validate_element_id(&"x".repeat(MAX_ELEMENT_ID_LEN)).is_ok());
        assert!(validate_element_id(&"x".repeat(MAX_ELEMENT_ID_LEN + 1)).is_err());
    }

    #[test]
    fn test_empty_project() {
        assert_eq!(
            validate_project(&Project::new("Empty")),
            Err(ValidationError::NoPages)
        );
    }

    #[test]
    fn test_duplicate_page_ids() {
        let project = Project::new("Dup")
            .with_page(Page::new("A").with_id("same"))
            .with_page(Page::new("B").with_id("same"));
        assert_eq!(
            validate_project(&project),
            Err(ValidationError::DuplicatePageId("same".into()))
        );
    }

    #[test]
    fn test_element_ids_unique_per_page_only() {
        let project = Project::new("Ids")
            .with_page(Page::new("A").with_id("a").with_element(Element::text("x").with_id("e")))
            .with_page(Page::new("B").with_id("b").with_element(Element::text("y").with_id("e")));
        assert!(validate_project(&project).is_ok());

        let page = Page::new("A")
            .with_id("a")
            .with_element(Element::text("x").with_id("e"))
            .with_element(Element::text("y").with_id("e"));
        assert!(matches!(
            validate_project(&project_with(page)),
            Err(ValidationError::DuplicateElementId { .. })
        ));
    }

    #[test]
    fn test_geometry() {
        let negative = Element::text("x").with_id("e").sized(-1.0, 10.0);
        assert!(validate_geometry(&negative).is_err());

        let nan = Element::text("x").with_id("e").at(f64::NAN, 0.0);
        assert!(validate_geometry(&nan).is_err());

        let spun = Element::text("x").with_id("e").with_rotation(f64::INFINITY);
        assert_eq!(
            validate_geometry(&spun).map_err(|e| e.kind()),
            Err("geometry")
        );
    }

    #[test]
    fn test_redirect_delay() {
        let page = Page::new("A").with_id("a").with_redirect("a", -1.0);
        assert_eq!(
            validate_project(&project_with(page)),
            Err(ValidationError::InvalidRedirectDelay("a".into()))
        );

        let zero = Page::new("A").with_id("a").with_redirect("a", 0.0);
        assert!(validate_project(&project_with(zero)).is_ok());
    }

    #[test]
    fn test_custom_html_limit() {
        let page = Page::new("A")
            .with_id("a")
            .with_custom_html("x".repeat(MAX_CUSTOM_HTML_LEN + 1));
        assert_eq!(
            validate_project(&project_with(page)).map_err(|e| e.kind()),
            Err("content")
        );
    }

    #[test]
    fn test_dangling_references_are_allowed() {
        let page = Page::new("A")
            .with_id("a")
            .with_element(Element::button("Go").with_id("b").linking_to("nowhere"));
        assert!(validate_project(&project_with(page)).is_ok());
    }

    #[test]
    fn test_templates_validate() {
        let mut project = Project::new("Templates");
        for page in page_templates() {
            project.add_page(page);
        }
        assert!(validate_project(&project).is_ok());
    }

    proptest! {
        #[test]
        fn prop_id_charset_accepted(id in "[a-zA-Z0-9_-]{1,64}") {
            prop_assert!(validate_page_id(&id).is_ok());
            prop_assert!(validate_element_id(&id).is_ok());
        }

        #[test]
        fn prop_markup_characters_rejected(
            prefix in "[a-z]{0,8}",
            bad in prop::sample::select(vec!['<', '>', '"', '\'', ' ', '/', '#']),
        ) {
            let id = format!("{prefix}{bad}");
            prop_assert!(validate_page_id(&id).is_err());
        }
    }
}
