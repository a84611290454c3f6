//! Markup emission for elements and pages.
//!
//! Every element becomes a positioned box built from [`Node`]s. Text and
//! attribute values are escaped; raw page markup is inserted verbatim.

use ura_core::{ContentMode, Element, ElementKind, LoginForm, Page, PageBody};

use crate::protocol::{
    container_class, login_form_id, ATTR_ANIMATION, ATTR_AUDIO_LOOP, ATTR_AUDIO_SRC,
    ATTR_CONTENT, ATTR_ELEMENT_ID, ATTR_LINK_TO, ATTR_REDIRECT_DELAY, ATTR_REDIRECT_TO,
    CLASS_ANIMATION_CONTAINER, CLASS_LOOP, CLASS_PAGE,
};
use crate::style::{
    css_url, label_style, px, resolve_border_radius, resolve_element_style, resolve_shape_clip,
    StyleDecl,
};

/// Escape text for HTML content and double-quoted attribute values.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone)]
enum Child {
    Node(Node),
    Text(String),
    Raw(String),
}

/// An HTML element under construction.
#[derive(Debug, Clone)]
pub struct Node {
    tag: &'static str,
    attrs: Vec<(&'static str, Option<String>)>,
    children: Vec<Child>,
    void: bool,
}

impl Node {
    /// Start an element with a closing tag.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
            void: false,
        }
    }

    /// Start a void element (`<img>`, `<input>`, ...).
    #[must_use]
    pub fn void(tag: &'static str) -> Self {
        Self {
            void: true,
            ..Self::new(tag)
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, Some(value.into())));
        self
    }

    /// Add an attribute if a value is present.
    #[must_use]
    pub fn attr_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Add a boolean attribute.
    #[must_use]
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attrs.push((name, None));
        self
    }

    /// Add a `style` attribute unless there are no declarations.
    #[must_use]
    pub fn style(self, style: &StyleDecl) -> Self {
        if style.is_empty() {
            self
        } else {
            self.attr("style", style.to_string())
        }
    }

    /// Append a child element.
    #[must_use]
    pub fn child(mut self, node: Self) -> Self {
        self.children.push(Child::Node(node));
        self
    }

    /// Append escaped text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Text(text.into()));
        self
    }

    /// Append markup without escaping.
    #[must_use]
    pub fn raw(mut self, markup: impl Into<String>) -> Self {
        self.children.push(Child::Raw(markup.into()));
        self
    }

    /// Write the element to `out`.
    pub fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape(value));
                out.push('"');
            }
        }
        out.push('>');
        if self.void {
            return;
        }
        for child in &self.children {
            match child {
                Child::Node(node) => node.render_into(out),
                Child::Text(text) => out.push_str(&escape(text)),
                Child::Raw(markup) => out.push_str(markup),
            }
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }

    /// Render the element to a new string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

fn fill() -> StyleDecl {
    StyleDecl::new().with("width", "100%").with("height", "100%")
}

fn media_style() -> StyleDecl {
    fill().with("object-fit", "cover")
}

fn login_form_node(element: &Element, form: &LoginForm) -> Node {
    let label = |text: &str| {
        Node::new("label")
            .style(
                &StyleDecl::new()
                    .with("color", form.label_color.clone())
                    .with("font-size", px(form.label_font_size))
                    .with("display", "flex")
                    .with("flex-direction", "column")
                    .with("gap", "4px"),
            )
            .text(text)
    };
    let input = |kind: &'static str, name: &'static str| {
        Node::void("input")
            .attr("type", kind)
            .attr("name", name)
            .attr(
                "autocomplete",
                if name == "password" {
                    "current-password"
                } else {
                    "username"
                },
            )
            .style(
                &StyleDecl::new()
                    .with("padding", "8px")
                    .with("border", format!("1px solid {}", form.form_border_color))
                    .with("border-radius", "4px"),
            )
    };

    let form_style = fill()
        .with("box-sizing", "border-box")
        .with("display", "flex")
        .with("flex-direction", "column")
        .with("gap", "12px")
        .with("padding", "24px")
        .with("margin", "0")
        .with("background-color", form.form_background_color.clone())
        .with("border", format!("1px solid {}", form.form_border_color))
        .with("border-radius", "8px");

    Node::new("form")
        .attr("id", login_form_id(element.id.as_str()))
        .attr(ATTR_ELEMENT_ID, element.id.as_str())
        .style(&form_style)
        .child(
            Node::new("h2")
                .style(
                    &StyleDecl::new()
                        .with("margin", "0")
                        .with("color", form.title_color.clone())
                        .with("font-size", px(form.title_font_size))
                        .with("font-weight", form.title_font_weight.as_css()),
                )
                .text(form.title_text.clone()),
        )
        .child(label(&form.username_label).child(input("text", "username")))
        .child(label(&form.password_label).child(input("password", "password")))
        .child(
            Node::new("button")
                .attr("type", "submit")
                .style(
                    &StyleDecl::new()
                        .with("padding", "10px")
                        .with("border", "none")
                        .with("border-radius", "4px")
                        .with("cursor", "pointer"),
                )
                .text(form.button_text.clone()),
        )
}

/// Build the node of one element.
#[must_use]
pub fn element_node(element: &Element) -> Node {
    let mut style = resolve_element_style(element);
    let node = Node::new("div");

    match &element.kind {
        ElementKind::Text(text) => {
            style.extend(label_style(text.font_size, &text.color, text.font_weight));
            node.style(&style).text(text.content.clone())
        }
        ElementKind::Button(button) => {
            let mut wrapper = StyleDecl::new();
            if let Some(clip) = resolve_shape_clip(button.shape) {
                wrapper.push("clip-path", clip);
            }
            wrapper.extend(fill());

            let mut inner = label_style(button.font_size, &button.color, button.font_weight)
                .with("background-color", button.background_color.clone());
            if let Some(radius) = resolve_border_radius(button) {
                inner.push("border-radius", radius);
            }
            inner
                .extend(fill())
                .push("border", "none")
                .push("cursor", "pointer");

            node.style(&style).child(
                Node::new("div").style(&wrapper).child(
                    Node::new("button")
                        .attr("type", "button")
                        .style(&inner)
                        .attr_opt(
                            ATTR_LINK_TO,
                            button.link_to_page_id.as_ref().map(ToString::to_string),
                        )
                        .text(button.content.clone()),
                ),
            )
        }
        ElementKind::Image(image) => node.style(&style).child(
            Node::void("img")
                .attr("src", image.src.clone())
                .attr("alt", element.name.clone())
                .style(&media_style()),
        ),
        ElementKind::Video(video) => {
            let mut player = Node::new("video")
                .attr("src", video.src.clone())
                .flag("autoplay")
                .flag("muted")
                .flag("playsinline");
            if video.looped {
                player = player.flag("loop");
            }
            node.style(&style).child(player.style(&media_style()))
        }
        ElementKind::Container(_) => node.style(&style),
        ElementKind::Animation(animation) => {
            style.push("pointer-events", "none");
            let mut classes = format!(
                "{CLASS_ANIMATION_CONTAINER} {}",
                container_class(animation.animation_type)
            );
            if element.loop_animation {
                classes.push(' ');
                classes.push_str(CLASS_LOOP);
            }
            node.attr("class", classes)
                .attr(ATTR_ANIMATION, animation.animation_type.as_str())
                .style(&style)
        }
        ElementKind::LoginForm(form) => node.style(&style).child(login_form_node(element, form)),
    }
}

/// Emit the markup of one element.
#[must_use]
pub fn emit_element(element: &Element) -> String {
    element_node(element).render()
}

/// Emit a page root with its body.
///
/// `visible` selects the initial `display` value; exactly one page of a
/// document is emitted visible.
#[must_use]
pub fn emit_page(page: &Page, visible: bool) -> String {
    let mut style =
        StyleDecl::new().with("display", if visible { "block" } else { "none" });
    style.push("overflow", "hidden");

    let mut node = Node::new("div")
        .attr("id", page.id.as_str())
        .attr("class", CLASS_PAGE);

    match page.body() {
        PageBody::Elements(elements) => {
            style
                .push("position", "relative")
                .push("width", "100vw")
                .push("height", "100vh")
                .push("background-color", page.background_color.clone());
            if let Some(image) = &page.background_image {
                style
                    .push("background-image", css_url(image))
                    .push("background-size", "cover")
                    .push("background-position", "center");
            }
            for element in elements {
                tracing::debug!(
                    page = %page.id,
                    element = %element.id,
                    kind = element.kind.tag(),
                    "Emitting element"
                );
                node = node.child(element_node(element));
            }
        }
        PageBody::Raw(markup) => {
            let source = if page.content_mode == ContentMode::CustomHtml {
                "custom-html"
            } else {
                "build-from-html"
            };
            node = node.attr(ATTR_CONTENT, source).raw(markup);
        }
    }

    node = node.style(&style);

    if let Some(redirect) = page.redirect.as_ref().filter(|r| r.is_armed()) {
        node = node
            .attr(ATTR_REDIRECT_TO, redirect.to_page_id.as_str())
            .attr(ATTR_REDIRECT_DELAY, redirect.delay_ms().to_string());
    }
    if let Some(audio) = &page.audio_url {
        node = node
            .attr(ATTR_AUDIO_SRC, audio.clone())
            .attr(ATTR_AUDIO_LOOP, page.audio_loops().to_string());
    }

    node.render()
}
