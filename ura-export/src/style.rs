//! Style and geometry resolution.
//!
//! Pure functions from element properties to inline CSS. Buttons use two
//! separate shape mechanisms: a corner radius for circles and pills, a
//! clip-path polygon for triangles. They are never combined on one button.

use std::fmt;

use ura_core::{Button, ButtonShape, Element, ElementKind};

/// An ordered list of CSS declarations, rendered as `name:value;` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDecl {
    props: Vec<(&'static str, String)>,
}

impl StyleDecl {
    /// Create an empty declaration list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration.
    pub fn push(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.props.push((name, value.into()));
        self
    }

    /// Append a declaration, builder style.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Append every declaration of another list.
    pub fn extend(&mut self, other: Self) -> &mut Self {
        self.props.extend(other.props);
        self
    }

    /// Value of the last declaration with this name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.props
            .iter()
            .rev()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check if there are no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

impl fmt::Display for StyleDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.props {
            write!(f, "{name}:{value};")?;
        }
        Ok(())
    }
}

/// Format a pixel length.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}

/// Quote a URL for use inside `url(...)`.
#[must_use]
pub fn css_url(url: &str) -> String {
    let mut quoted = String::with_capacity(url.len() + 7);
    quoted.push_str("url(\"");
    for c in url.chars() {
        match c {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' | '\r' => {}
            _ => quoted.push(c),
        }
    }
    quoted.push_str("\")");
    quoted
}

/// Entrance and emphasis animations of the shared keyframe library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyframeAnimation {
    /// Opacity from 0 to 1.
    FadeIn,
    /// Rise into place while fading in.
    SlideInUp,
    /// Gentle repeated scale.
    Pulse,
    /// Scale up from 80%.
    Pop,
    /// Horizontal shake.
    Shake,
    /// Scale out while fading.
    Explode,
    /// Pulsing glow.
    Glow,
    /// Vertical bounce.
    Bounce,
}

impl KeyframeAnimation {
    /// Every animation, in stylesheet order.
    pub const ALL: [Self; 8] = [
        Self::FadeIn,
        Self::SlideInUp,
        Self::Pulse,
        Self::Pop,
        Self::Shake,
        Self::Explode,
        Self::Glow,
        Self::Bounce,
    ];

    /// Resolve a stored identifier such as `anim-fade-in`.
    ///
    /// The `anim-` prefix is optional; both the kebab-case form and the
    /// keyframe name are accepted.
    #[must_use]
    pub fn parse(identifier: &str) -> Option<Self> {
        let name = identifier.trim();
        let name = name.strip_prefix("anim-").unwrap_or(name);
        Self::ALL
            .into_iter()
            .find(|a| a.kebab_name() == name || a.keyframe_name() == name)
    }

    /// Editor identifier without the prefix.
    #[must_use]
    pub const fn kebab_name(self) -> &'static str {
        match self {
            Self::FadeIn => "fade-in",
            Self::SlideInUp => "slide-in-up",
            Self::Pulse => "pulse",
            Self::Pop => "pop",
            Self::Shake => "shake",
            Self::Explode => "explode",
            Self::Glow => "glow",
            Self::Bounce => "bounce",
        }
    }

    /// Name of the `@keyframes` rule.
    #[must_use]
    pub const fn keyframe_name(self) -> &'static str {
        match self {
            Self::FadeIn => "fadeIn",
            Self::SlideInUp => "slideInUp",
            Self::Pulse => "pulse",
            Self::Pop => "pop",
            Self::Shake => "shake",
            Self::Explode => "explode",
            Self::Glow => "glow",
            Self::Bounce => "bounce",
        }
    }

    /// Duration and timing function.
    #[must_use]
    pub const fn timing(self) -> (&'static str, &'static str) {
        match self {
            Self::FadeIn | Self::SlideInUp => ("0.5s", "ease-out"),
            Self::Pulse | Self::Glow => ("1.5s", "ease-in-out"),
            Self::Pop => ("0.4s", "ease-out"),
            Self::Shake => ("0.5s", "ease-in-out"),
            Self::Explode => ("0.6s", "ease-out"),
            Self::Bounce => ("1s", "ease"),
        }
    }

    /// Value of the `animation` shorthand.
    #[must_use]
    pub fn shorthand(self, looped: bool) -> String {
        let (duration, timing) = self.timing();
        let iteration = if looped { "infinite" } else { "forwards" };
        format!("{} {duration} {timing} {iteration}", self.keyframe_name())
    }
}

/// Positioning, size, rotation, overflow and animation of an element box.
#[must_use]
pub fn resolve_element_style(element: &Element) -> StyleDecl {
    let mut style = StyleDecl::new()
        .with("position", "absolute")
        .with("left", px(element.position.x))
        .with("top", px(element.position.y))
        .with("width", px(element.size.width))
        .with("height", px(element.size.height))
        .with("transform", format!("rotate({}deg)", element.rotation));

    // Particle effects draw outside their anchor box.
    let overflow = if element.is_animation() {
        "visible"
    } else {
        "hidden"
    };
    style.push("overflow", overflow);

    if let Some(identifier) = &element.animation {
        match KeyframeAnimation::parse(identifier) {
            Some(animation) => {
                style.push("animation", animation.shorthand(element.loop_animation));
            }
            None => {
                tracing::debug!(
                    element = %element.id,
                    identifier = %identifier,
                    "Unknown animation identifier"
                );
            }
        }
    }

    if let ElementKind::Container(container) = &element.kind {
        style.push("background-color", container.background_color.clone());
    }

    style
}

/// Clip-path polygon of a button shape, if the shape uses one.
#[must_use]
pub const fn resolve_shape_clip(shape: ButtonShape) -> Option<&'static str> {
    match shape {
        ButtonShape::TriangleUp => Some("polygon(50% 0%, 0% 100%, 100% 100%)"),
        ButtonShape::TriangleDown => Some("polygon(0% 0%, 100% 0%, 50% 100%)"),
        ButtonShape::Rectangle | ButtonShape::Pill | ButtonShape::Circle => None,
    }
}

/// Corner radius of a button, `None` for clipped shapes.
#[must_use]
pub fn resolve_border_radius(button: &Button) -> Option<String> {
    match button.shape {
        ButtonShape::Circle => Some("50%".to_string()),
        ButtonShape::Pill => Some("9999px".to_string()),
        ButtonShape::Rectangle => Some(px(button.border_radius)),
        ButtonShape::TriangleUp | ButtonShape::TriangleDown => None,
    }
}

/// Centered label typography shared by text elements and buttons.
#[must_use]
pub fn label_style(font_size: f64, color: &str, weight: ura_core::FontWeight) -> StyleDecl {
    StyleDecl::new()
        .with("font-size", px(font_size))
        .with("color", color)
        .with("font-weight", weight.as_css())
        .with("display", "flex")
        .with("align-items", "center")
        .with("justify-content", "center")
}
