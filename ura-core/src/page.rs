//! Pages - one screen of a project, with its elements and entry behavior.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::Element;

/// Identifier of a page, unique within its project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Timed automatic navigation away from a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    /// Destination page.
    pub to_page_id: PageId,
    /// Delay in seconds.
    #[serde(alias = "delaySeconds")]
    pub delay: f64,
}

impl Redirect {
    /// Create a redirect after `delay` seconds.
    #[must_use]
    pub fn new(to_page_id: impl Into<PageId>, delay: f64) -> Self {
        Self {
            to_page_id: to_page_id.into(),
            delay,
        }
    }

    /// Delay in whole milliseconds, as carried by the exported document.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn delay_ms(&self) -> u64 {
        if self.delay.is_finite() && self.delay > 0.0 {
            (self.delay * 1000.0).round() as u64
        } else {
            0
        }
    }

    /// Whether the redirect will actually fire at runtime.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        !self.to_page_id.as_str().is_empty() && self.delay_ms() > 0
    }
}

/// Which source supplies a page's body at export time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentMode {
    /// Positioned elements from `Page::elements`.
    #[default]
    Visual,
    /// Raw author markup from `Page::custom_html`.
    CustomHtml,
    /// A fully custom document from `Page::build_html`.
    BuildFromHtml,
}

/// Borrowed view of the body source selected by the content mode.
#[derive(Debug, Clone, Copy)]
pub enum PageBody<'a> {
    /// Render these elements.
    Elements(&'a [Element]),
    /// Insert this markup verbatim.
    Raw(&'a str),
}

/// A page of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PageWire")]
pub struct Page {
    /// Identifier, unique within the project.
    pub id: PageId,
    /// Display name.
    pub name: String,
    /// Optional description (templates carry one).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Elements in paint order.
    pub elements: Vec<Element>,
    /// Background fill color.
    pub background_color: String,
    /// Background image URL, drawn with `cover` sizing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Background audio URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Whether the background audio loops; unset means loop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_loop: Option<bool>,
    /// Timed redirect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<Redirect>,
    /// Active body source.
    pub content_mode: ContentMode,
    /// Markup used in [`ContentMode::CustomHtml`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_html: Option<String>,
    /// Markup used in [`ContentMode::BuildFromHtml`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_html: Option<String>,
}

impl Page {
    /// Create an empty visual page with a generated id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PageId::generate(),
            name: name.into(),
            description: None,
            elements: Vec::new(),
            background_color: "#ffffff".to_string(),
            background_image: None,
            audio_url: None,
            audio_loop: None,
            redirect: None,
            content_mode: ContentMode::Visual,
            custom_html: None,
            build_html: None,
        }
    }

    /// Replace the generated identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<PageId>) -> Self {
        self.id = id.into();
        self
    }

    /// Append an element.
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Set the background image.
    #[must_use]
    pub fn with_background_image(mut self, url: impl Into<String>) -> Self {
        self.background_image = Some(url.into());
        self
    }

    /// Set the background audio.
    #[must_use]
    pub fn with_audio(mut self, url: impl Into<String>, looped: bool) -> Self {
        self.audio_url = Some(url.into());
        self.audio_loop = Some(looped);
        self
    }

    /// Redirect to another page after `delay` seconds.
    #[must_use]
    pub fn with_redirect(mut self, to_page_id: impl Into<PageId>, delay: f64) -> Self {
        self.redirect = Some(Redirect::new(to_page_id, delay));
        self
    }

    /// Switch to raw custom markup.
    #[must_use]
    pub fn with_custom_html(mut self, html: impl Into<String>) -> Self {
        self.content_mode = ContentMode::CustomHtml;
        self.custom_html = Some(html.into());
        self
    }

    /// Switch to a fully custom document.
    #[must_use]
    pub fn with_build_html(mut self, html: impl Into<String>) -> Self {
        self.content_mode = ContentMode::BuildFromHtml;
        self.build_html = Some(html.into());
        self
    }

    /// The body source selected by the content mode.
    #[must_use]
    pub fn body(&self) -> PageBody<'_> {
        match self.content_mode {
            ContentMode::Visual => PageBody::Elements(&self.elements),
            ContentMode::CustomHtml => PageBody::Raw(self.custom_html.as_deref().unwrap_or("")),
            ContentMode::BuildFromHtml => {
                PageBody::Raw(self.build_html.as_deref().unwrap_or(""))
            }
        }
    }

    /// Whether background audio loops (the editor defaults to looping).
    #[must_use]
    pub fn audio_loops(&self) -> bool {
        self.audio_loop.unwrap_or(true)
    }

    /// Find an element by id.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id.as_str() == id)
    }

    /// Elements that are rendered, i.e. none outside [`ContentMode::Visual`].
    pub fn rendered_elements(&self) -> impl Iterator<Item = &Element> {
        let elements: &[Element] = match self.body() {
            PageBody::Elements(elements) => elements,
            PageBody::Raw(_) => &[],
        };
        elements.iter()
    }
}

/// Wire shape accepted from the editor, including its legacy mode flags.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageWire {
    id: PageId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    elements: Vec<Element>,
    #[serde(default = "default_background")]
    background_color: String,
    #[serde(default)]
    background_image: Option<String>,
    #[serde(default)]
    audio_url: Option<String>,
    #[serde(default)]
    audio_loop: Option<bool>,
    #[serde(default)]
    redirect: Option<Redirect>,
    #[serde(default)]
    content_mode: Option<ContentMode>,
    #[serde(default)]
    is_custom_html: bool,
    #[serde(default)]
    custom_html: Option<String>,
    #[serde(default)]
    is_build_from_html: bool,
    #[serde(default)]
    build_html: Option<String>,
}

fn default_background() -> String {
    "#ffffff".to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl From<PageWire> for Page {
    fn from(wire: PageWire) -> Self {
        let content_mode = wire.content_mode.unwrap_or(if wire.is_custom_html {
            ContentMode::CustomHtml
        } else if wire.is_build_from_html {
            ContentMode::BuildFromHtml
        } else {
            ContentMode::Visual
        });

        Self {
            id: wire.id,
            name: wire.name,
            description: wire.description,
            elements: wire.elements,
            background_color: wire.background_color,
            background_image: non_empty(wire.background_image),
            audio_url: non_empty(wire.audio_url),
            audio_loop: wire.audio_loop,
            redirect: wire
                .redirect
                .filter(|r| !r.to_page_id.as_str().is_empty()),
            content_mode,
            custom_html: wire.custom_html,
            build_html: wire.build_html,
        }
    }
}
