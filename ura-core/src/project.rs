//! Projects - the ordered collection of pages handed to the exporter.

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::page::{Page, PageId};
use crate::{SceneError, SceneResult};

/// A multi-page project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project name, used for the document title and archive file name.
    #[serde(default)]
    pub name: String,
    /// Pages in navigation/display order.
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// How a page reference is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceKind {
    /// `linkToPageId` of a button.
    ButtonLink,
    /// `redirect.toPageId` of a page.
    Redirect,
    /// `successPageId` of a login form.
    LoginSuccess,
    /// `failurePageId` of a login form.
    LoginFailure,
}

/// A page reference that does not resolve within the project.
///
/// These are kept in the export as-is; the runtime ignores navigation to
/// unknown pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingReference {
    /// Page holding the reference.
    pub page_id: PageId,
    /// Element holding the reference, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<ElementId>,
    /// Where the reference came from.
    pub kind: ReferenceKind,
    /// The unresolved target.
    pub target: PageId,
}

impl Project {
    /// Create an empty project.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: Vec::new(),
        }
    }

    /// Append a page.
    #[must_use]
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    /// Append a page, returning its id.
    pub fn add_page(&mut self, page: Page) -> PageId {
        let id = page.id.clone();
        self.pages.push(page);
        id
    }

    /// Remove a page by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the page is not found.
    pub fn remove_page(&mut self, id: &str) -> SceneResult<Page> {
        let index = self
            .pages
            .iter()
            .position(|p| p.id.as_str() == id)
            .ok_or_else(|| SceneError::PageNotFound(id.to_string()))?;
        Ok(self.pages.remove(index))
    }

    /// Get a page by id.
    #[must_use]
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id.as_str() == id)
    }

    /// Get a mutable page by id.
    pub fn page_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id.as_str() == id)
    }

    /// The page shown when a document opens without a fragment.
    #[must_use]
    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    /// Check the started-project precondition of having at least one page.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::EmptyProject`] if there are no pages.
    pub fn ensure_started(&self) -> SceneResult<&Page> {
        self.first_page().ok_or(SceneError::EmptyProject)
    }

    /// Total number of elements across all pages.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(|p| p.elements.len()).sum()
    }

    /// Check if the project has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// List every page reference that does not resolve to a page here.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        let mut check = |page: &Page, element_id: Option<&ElementId>, kind, target: &PageId| {
            if self.page(target.as_str()).is_none() {
                dangling.push(DanglingReference {
                    page_id: page.id.clone(),
                    element_id: element_id.cloned(),
                    kind,
                    target: target.clone(),
                });
            }
        };

        for page in &self.pages {
            if let Some(redirect) = &page.redirect {
                check(page, None, ReferenceKind::Redirect, &redirect.to_page_id);
            }
            for element in page.rendered_elements() {
                match &element.kind {
                    crate::ElementKind::Button(button) => {
                        if let Some(target) = &button.link_to_page_id {
                            check(page, Some(&element.id), ReferenceKind::ButtonLink, target);
                        }
                    }
                    crate::ElementKind::LoginForm(form) => {
                        if let Some(target) = &form.success_page_id {
                            check(page, Some(&element.id), ReferenceKind::LoginSuccess, target);
                        }
                        if let Some(target) = &form.failure_page_id {
                            check(page, Some(&element.id), ReferenceKind::LoginFailure, target);
                        }
                    }
                    _ => {}
                }
            }
        }

        dangling
    }

    /// Serialize the project to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> SceneResult<String> {
        serde_json::to_string(self).map_err(SceneError::Serialization)
    }

    /// Deserialize a project from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        serde_json::from_str(json).map_err(SceneError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Element;

    fn two_pages() -> Project {
        Project::new("Demo")
            .with_page(
                Page::new("Home")
                    .with_id("p1")
                    .with_element(Element::button("Next").with_id("b1").linking_to("p2")),
            )
            .with_page(Page::new("Next").with_id("p2"))
    }

    #[test]
    fn test_project_add_remove() {
        let mut project = Project::new("Demo");
        assert!(project.is_empty());
        assert!(matches!(project.ensure_started(), Err(SceneError::EmptyProject)));

        let id = project.add_page(Page::new("Home"));
        assert!(project.page(id.as_str()).is_some());
        assert_eq!(project.first_page().map(|p| &p.id), Some(&id));

        project.remove_page(id.as_str()).expect("should remove");
        assert!(project.is_empty());
        assert!(matches!(
            project.remove_page("missing"),
            Err(SceneError::PageNotFound(_))
        ));
    }

    #[test]
    fn test_resolved_references_are_not_dangling() {
        assert!(two_pages().dangling_references().is_empty());
    }

    #[test]
    fn test_dangling_references_are_reported() {
        let mut project = two_pages();
        project.remove_page("p2").expect("should remove");
        if let Some(page) = project.page_mut("p1") {
            page.redirect = Some(crate::Redirect::new("gone", 1.0));
        }

        let dangling = project.dangling_references();
        assert_eq!(dangling.len(), 2);
        assert_eq!(dangling[0].kind, ReferenceKind::Redirect);
        assert_eq!(dangling[0].target.as_str(), "gone");
        assert_eq!(dangling[1].kind, ReferenceKind::ButtonLink);
        assert_eq!(dangling[1].element_id, Some(ElementId::new("b1")));
    }

    #[test]
    fn test_json_round_trip() {
        let project = two_pages();
        let json = project.to_json().expect("should serialize");
        let parsed = Project::from_json(&json).expect("should parse");
        assert_eq!(parsed, project);
        assert_eq!(parsed.element_count(), 1);
    }
}
