//! Page elements - the positioned building blocks of a page.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::page::PageId;

/// Identifier of an element, unique within its owning page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
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

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Top-left corner of an element, in pixels relative to its page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Pixels from the left edge of the page.
    pub x: f64,
    /// Pixels from the top edge of the page.
    pub y: f64,
}

/// Bounding box dimensions in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

/// CSS font weight offered by the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

impl FontWeight {
    /// CSS keyword for this weight.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
        }
    }
}

/// Outline of a button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonShape {
    /// Rectangle with the stored corner radius.
    #[default]
    Rectangle,
    /// Fully rounded ends.
    Pill,
    /// Ellipse inscribed in the bounding box.
    Circle,
    /// Triangle pointing up.
    TriangleUp,
    /// Triangle pointing down.
    TriangleDown,
}

/// Procedural particle effect rendered by an animation element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationType {
    /// Canvas rocket and particle simulation.
    Fireworks,
    /// Falling paper bursts.
    Confetti,
    /// Short radial spark bursts.
    Sparks,
}

impl AnimationType {
    /// Lowercase identifier used by the editor and the exported runtime.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fireworks => "fireworks",
            Self::Confetti => "confetti",
            Self::Sparks => "sparks",
        }
    }

    /// All effect types in a fixed order.
    pub const ALL: [Self; 3] = [Self::Fireworks, Self::Confetti, Self::Sparks];
}

/// Styled text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    /// Text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Text color.
    pub color: String,
    /// Font weight.
    #[serde(default)]
    pub font_weight: FontWeight,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            content: "Your Text Here".to_string(),
            font_size: 16.0,
            color: "#000000".to_string(),
            font_weight: FontWeight::Normal,
        }
    }
}

/// Clickable button, optionally navigating to another page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    /// Button label.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Label color.
    pub color: String,
    /// Fill color.
    pub background_color: String,
    /// Font weight.
    #[serde(default)]
    pub font_weight: FontWeight,
    /// Corner radius in pixels, used by rectangular buttons only.
    #[serde(default)]
    pub border_radius: f64,
    /// Outline shape.
    #[serde(default)]
    pub shape: ButtonShape,
    /// Page shown when the button is clicked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_to_page_id: Option<PageId>,
}

impl Default for Button {
    fn default() -> Self {
        Self {
            content: "Click Me".to_string(),
            font_size: 14.0,
            color: "#ffffff".to_string(),
            background_color: "#000000".to_string(),
            font_weight: FontWeight::Normal,
            border_radius: 4.0,
            shape: ButtonShape::Rectangle,
            link_to_page_id: None,
        }
    }
}

/// Raster image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL.
    pub src: String,
}

/// Muted autoplaying video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Video URL.
    pub src: String,
    /// Restart playback when it ends.
    #[serde(default, rename = "loop")]
    pub looped: bool,
}

/// Plain colored block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Fill color.
    pub background_color: String,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            background_color: "transparent".to_string(),
        }
    }
}

/// Particle effect anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    /// Which effect to run.
    pub animation_type: AnimationType,
}

/// Username/password form with independent success and failure outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    /// Heading above the inputs.
    pub title_text: String,
    /// Label of the username input.
    pub username_label: String,
    /// Label of the password input.
    pub password_label: String,
    /// Submit button label.
    pub button_text: String,
    /// Username accepted as correct (exact match).
    pub correct_username: String,
    /// Password accepted as correct (exact match).
    pub correct_password: String,
    /// Alert shown on a correct submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
    /// Alert shown on an incorrect submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
    /// Page shown on a correct submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_page_id: Option<PageId>,
    /// Page shown on an incorrect submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_page_id: Option<PageId>,
    /// Form fill color.
    pub form_background_color: String,
    /// Form border color.
    pub form_border_color: String,
    /// Heading color.
    pub title_color: String,
    /// Heading font size in pixels.
    pub title_font_size: f64,
    /// Heading font weight.
    #[serde(default)]
    pub title_font_weight: FontWeight,
    /// Label color.
    pub label_color: String,
    /// Label font size in pixels.
    pub label_font_size: f64,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            title_text: "Login".to_string(),
            username_label: "Username".to_string(),
            password_label: "Password".to_string(),
            button_text: "Submit".to_string(),
            correct_username: "user".to_string(),
            correct_password: "123".to_string(),
            success_message: Some("Login successful!".to_string()),
            failure_message: Some("Wrong credentials.".to_string()),
            success_page_id: None,
            failure_page_id: None,
            form_background_color: "#ffffff".to_string(),
            form_border_color: "#e5e7eb".to_string(),
            title_color: "#000000".to_string(),
            title_font_size: 24.0,
            title_font_weight: FontWeight::Bold,
            label_color: "#374151".to_string(),
            label_font_size: 14.0,
        }
    }
}

/// The variant-specific content of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ElementKind {
    /// A text label.
    Text(Text),
    /// A button.
    Button(Button),
    /// An image.
    Image(Image),
    /// A video.
    Video(Video),
    /// A colored block.
    Container(Container),
    /// A particle effect.
    Animation(Animation),
    /// A login form.
    LoginForm(Box<LoginForm>),
}

impl ElementKind {
    /// Editor tag of this variant.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Button(_) => "button",
            Self::Image(_) => "image",
            Self::Video(_) => "video",
            Self::Container(_) => "container",
            Self::Animation(_) => "animation",
            Self::LoginForm(_) => "login-form",
        }
    }

    /// Editor default name for a freshly inserted element of this kind.
    fn default_name(&self) -> String {
        match self {
            Self::Text(_) => "Text".to_string(),
            Self::Button(_) => "Button".to_string(),
            Self::Image(_) => "Image".to_string(),
            Self::Video(_) => "Video".to_string(),
            Self::Container(_) => "Container".to_string(),
            Self::Animation(anim) => {
                let name = anim.animation_type.as_str();
                let mut chars = name.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            }
            Self::LoginForm(_) => "Login Form".to_string(),
        }
    }

    /// Editor default size for a freshly inserted element of this kind.
    const fn default_size(&self) -> Size {
        let (width, height) = match self {
            Self::Text(_) => (150.0, 30.0),
            Self::Button(_) => (100.0, 32.0),
            Self::Image(_) | Self::Video(_) | Self::Container(_) => (300.0, 200.0),
            Self::Animation(_) => (100.0, 100.0),
            Self::LoginForm(_) => (350.0, 420.0),
        };
        Size { width, height }
    }
}

/// A positioned element on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Identifier, unique within the owning page.
    pub id: ElementId,
    /// Display name in the editor.
    #[serde(default)]
    pub name: String,
    /// Top-left corner.
    pub position: Position,
    /// Bounding box.
    pub size: Size,
    /// Clockwise rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Stored entrance/emphasis animation identifier (e.g. `anim-fade-in`).
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub animation: Option<String>,
    /// Repeat the animation forever instead of once.
    #[serde(default)]
    pub loop_animation: bool,
    /// Variant content.
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create a new element with editor defaults for the given kind.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        let position = if matches!(kind, ElementKind::Animation(_)) {
            Position { x: 200.0, y: 200.0 }
        } else {
            Position { x: 50.0, y: 50.0 }
        };
        Self {
            id: ElementId::generate(),
            name: kind.default_name(),
            position,
            size: kind.default_size(),
            rotation: 0.0,
            animation: None,
            loop_animation: false,
            kind,
        }
    }

    /// Create a text element.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(ElementKind::Text(Text {
            content: content.into(),
            ..Text::default()
        }))
    }

    /// Create a button element.
    #[must_use]
    pub fn button(content: impl Into<String>) -> Self {
        Self::new(ElementKind::Button(Button {
            content: content.into(),
            ..Button::default()
        }))
    }

    /// Create an image element.
    #[must_use]
    pub fn image(src: impl Into<String>) -> Self {
        Self::new(ElementKind::Image(Image { src: src.into() }))
    }

    /// Create a video element.
    #[must_use]
    pub fn video(src: impl Into<String>) -> Self {
        Self::new(ElementKind::Video(Video {
            src: src.into(),
            looped: false,
        }))
    }

    /// Create a container element.
    #[must_use]
    pub fn container(background_color: impl Into<String>) -> Self {
        Self::new(ElementKind::Container(Container {
            background_color: background_color.into(),
        }))
    }

    /// Create a particle effect element.
    #[must_use]
    pub fn animation(animation_type: AnimationType) -> Self {
        Self::new(ElementKind::Animation(Animation { animation_type }))
    }

    /// Create a login form with editor defaults.
    #[must_use]
    pub fn login_form() -> Self {
        Self::new(ElementKind::LoginForm(Box::default()))
    }

    /// Replace the generated identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    /// Move the element.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }

    /// Resize the element.
    #[must_use]
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.size = Size { width, height };
        self
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Attach a stored animation identifier. An empty identifier only sets the loop flag.
    #[must_use]
    pub fn with_animation(mut self, animation: impl Into<String>, looped: bool) -> Self {
        self.animation = Some(animation.into()).filter(|a| !a.trim().is_empty());
        self.loop_animation = looped;
        self
    }

    /// Point a button at another page. Has no effect on other kinds.
    #[must_use]
    pub fn linking_to(mut self, page_id: impl Into<PageId>) -> Self {
        if let ElementKind::Button(button) = &mut self.kind {
            button.link_to_page_id = Some(page_id.into());
        }
        self
    }

    /// Whether this is a particle effect element.
    #[must_use]
    pub fn is_animation(&self) -> bool {
        matches!(self.kind, ElementKind::Animation(_))
    }

    /// Page ids this element can navigate to.
    pub fn page_references(&self) -> impl Iterator<Item = &PageId> {
        let (first, second) = match &self.kind {
            ElementKind::Button(button) => (button.link_to_page_id.as_ref(), None),
            ElementKind::LoginForm(form) => {
                (form.success_page_id.as_ref(), form.failure_page_id.as_ref())
            }
            _ => (None, None),
        };
        first.into_iter().chain(second)
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_from_editor_json() {
        let json = r##"{
            "id": "btn-1",
            "name": "Next",
            "type": "button",
            "position": { "x": 10, "y": 20 },
            "size": { "width": 100, "height": 32 },
            "rotation": 0,
            "animation": "",
            "content": "Go",
            "fontSize": 14,
            "color": "#fff",
            "backgroundColor": "#000",
            "fontWeight": "bold",
            "borderRadius": 8,
            "shape": "triangle-up",
            "linkToPageId": "p2"
        }"##;

        let element: Element = serde_json::from_str(json).expect("should parse");
        assert_eq!(element.id.as_str(), "btn-1");
        assert!(element.animation.is_none());
        match &element.kind {
            ElementKind::Button(button) => {
                assert_eq!(button.shape, ButtonShape::TriangleUp);
                assert_eq!(button.font_weight, FontWeight::Bold);
                assert_eq!(button.link_to_page_id, Some(PageId::new("p2")));
            }
            other => panic!("expected button, got {}", other.tag()),
        }
    }

    #[test]
    fn test_login_form_tag_round_trips() {
        let element = Element::login_form().with_id("form");
        let json = serde_json::to_string(&element).expect("should serialize");
        assert!(json.contains("\"type\":\"login-form\""));
        assert!(json.contains("\"correctUsername\":\"user\""));

        let parsed: Element = serde_json::from_str(&json).expect("should parse");
        assert_eq!(parsed, element);
    }

    #[test]
    fn test_video_loop_field_name() {
        let json = r#"{"id":"v","type":"video","position":{"x":0,"y":0},
            "size":{"width":1,"height":1},"src":"clip.mp4","loop":true}"#;
        let element: Element = serde_json::from_str(json).expect("should parse");
        assert!(matches!(element.kind, ElementKind::Video(Video { looped: true, .. })));
    }

    #[test]
    fn test_editor_defaults() {
        let fireworks = Element::animation(AnimationType::Fireworks);
        assert_eq!(fireworks.name, "Fireworks");
        assert!((fireworks.position.x - 200.0).abs() < f64::EPSILON);
        assert!(fireworks.is_animation());

        let form = Element::login_form();
        assert!((form.size.height - 420.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_page_references() {
        let form = LoginForm {
            success_page_id: Some(PageId::new("ok")),
            failure_page_id: Some(PageId::new("bad")),
            ..LoginForm::default()
        };
        let element = Element::new(ElementKind::LoginForm(Box::new(form)));

        let refs: Vec<_> = element.page_references().map(PageId::as_str).collect();
        assert_eq!(refs, vec!["ok", "bad"]);

        assert_eq!(Element::text("x").page_references().count(), 0);
    }
}
