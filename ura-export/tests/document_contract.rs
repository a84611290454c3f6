//! Contract tests for the generated document.
//!
//! Pins the parts of the output the runtime script and external tooling
//! depend on: page roots, navigation attributes, shapes, raw pages, login
//! forms, animation containers, keyframes and the attribute vocabulary.

use proptest::prelude::*;
use ura_core::{AnimationType, Button, ButtonShape, Element, ElementKind, Page, Project};
use ura_export::protocol::Vocabulary;
use ura_export::{compile, DocumentCompiler};

fn button(id: &str, shape: ButtonShape, border_radius: f64) -> Element {
    Element::new(ElementKind::Button(Button {
        shape,
        border_radius,
        ..Button::default()
    }))
    .with_id(id)
}

/// A project touching every attribute of the vocabulary.
fn showcase() -> Project {
    Project::new("Showcase")
        .with_page(
            Page::new("Start")
                .with_id("p1")
                .with_audio("theme.mp3", false)
                .with_redirect("p2", 2.5)
                .with_element(Element::button("Next").with_id("b1").linking_to("p2"))
                .with_element(Element::animation(AnimationType::Fireworks).with_animation("", true))
                .with_element(Element::animation(AnimationType::Confetti)),
        )
        .with_page(
            Page::new("Gate")
                .with_id("p2")
                .with_element(Element::login_form().with_id("f1"))
                .with_element(Element::animation(AnimationType::Sparks).with_animation("", true)),
        )
        .with_page(Page::new("Raw").with_id("p3").with_custom_html("<div>X</div>"))
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

// ==========================================================================
// Page roots
// ==========================================================================

#[test]
fn test_one_root_per_page() {
    let html = compile(&showcase());
    assert_eq!(count(&html, "class=\"page\""), 3);
    for id in ["p1", "p2", "p3"] {
        assert!(html.contains(&format!("<div id=\"{id}\" class=\"page\"")));
    }
}

#[test]
fn test_only_first_page_visible() {
    let html = compile(&showcase());
    assert_eq!(count(&html, "style=\"display:block;"), 1);
    assert_eq!(count(&html, "style=\"display:none;"), 2);

    let visible = html.find("style=\"display:block;").expect("visible page");
    let first = html.find("<div id=\"p1\"").expect("first page");
    let second = html.find("<div id=\"p2\"").expect("second page");
    assert!(first < visible && visible < second);
}

#[test]
fn test_page_order_follows_project() {
    let html = compile(&showcase());
    let p1 = html.find("id=\"p1\"").expect("p1");
    let p2 = html.find("id=\"p2\"").expect("p2");
    let p3 = html.find("id=\"p3\"").expect("p3");
    assert!(p1 < p2 && p2 < p3);
}

// ==========================================================================
// Navigation, redirect and audio attributes
// ==========================================================================

#[test]
fn test_link_on_exactly_one_button() {
    let html = compile(&showcase());
    assert_eq!(count(&html, "data-link-to=\"p2\""), 1);

    let at = html.find("data-link-to=\"p2\"").expect("link attribute");
    let tag_start = html[..at].rfind('<').expect("enclosing tag");
    assert!(html[tag_start..].starts_with("<button"));
}

#[test]
fn test_redirect_delay_in_milliseconds() {
    let html = compile(&showcase());
    assert!(html.contains("data-redirect-to=\"p2\""));
    assert!(html.contains("data-redirect-delay=\"2500\""));
}

#[test]
fn test_audio_attributes() {
    let html = compile(&showcase());
    assert!(html.contains("data-audio-src=\"theme.mp3\""));
    assert!(html.contains("data-audio-loop=\"false\""));
    assert_eq!(count(&html, "<audio id=\"background-audio\""), 1);
}

// ==========================================================================
// Element variants
// ==========================================================================

#[test]
fn test_circle_uses_radius_not_clip() {
    let project = Project::new("Shapes")
        .with_page(Page::new("Only").with_element(button("c", ButtonShape::Circle, 4.0)));
    let html = compile(&project);
    assert!(html.contains("border-radius:50%"));
    assert!(!html.contains("clip-path"));
}

#[test]
fn test_triangle_uses_clip_not_radius() {
    let project = Project::new("Shapes")
        .with_page(Page::new("Only").with_element(button("t", ButtonShape::TriangleUp, 12.0)));
    let html = compile(&project);
    assert!(html.contains("clip-path:polygon(50% 0%, 0% 100%, 100% 100%)"));
    assert!(!html.contains("border-radius:12px"));
}

#[test]
fn test_custom_html_passthrough() {
    let mut page = Page::new("Raw")
        .with_id("raw")
        .with_element(Element::text("should not render"));
    page = page.with_custom_html("<div>X</div>");
    let html = compile(&Project::new("Raw").with_page(page));

    assert!(html.contains("<div>X</div>"));
    assert!(!html.contains("should not render"));
    assert!(html.contains("data-content=\"custom-html\""));
}

#[test]
fn test_login_form_structure() {
    let html = compile(&showcase());
    assert!(html.contains("id=\"login-form-f1\""));
    assert!(html.contains("name=\"username\""));
    assert!(html.contains("name=\"password\""));
    assert!(html.contains("type=\"submit\""));
    // Credentials live in the script configuration, not in the form markup.
    let form_start = html.find("id=\"login-form-f1\"").expect("form");
    let form_end = form_start + html[form_start..].find("</form>").expect("form end");
    assert!(!html[form_start..form_end].contains("123"));
}

#[test]
fn test_animation_container_classes() {
    let html = compile(&showcase());
    assert!(html.contains("animation-container fireworks-container loop"));
    assert!(html.contains("class=\"animation-container confetti-container\""));
    assert!(html.contains("animation-container sparks-container loop"));
}

#[test]
fn test_keyframe_library_present() {
    let html = compile(&showcase());
    for name in [
        "fadeIn",
        "slideInUp",
        "pulse",
        "pop",
        "shake",
        "explode",
        "glow",
        "bounce",
        "confetti-fall",
        "spark-flow",
    ] {
        assert!(html.contains(&format!("@keyframes {name} ")), "missing {name}");
    }
}

#[test]
fn test_element_animation_references_keyframes() {
    let project = Project::new("Anim").with_page(
        Page::new("Only").with_element(Element::text("hi").with_animation("anim-slide-in-up", true)),
    );
    let html = compile(&project);
    assert!(html.contains("animation:slideInUp 0.5s ease-out infinite;"));
}

// ==========================================================================
// Markup/runtime vocabulary agreement
// ==========================================================================

#[test]
fn test_runtime_reads_every_emitted_name() {
    let html = compile(&showcase());
    let vocabulary = serde_json::to_value(Vocabulary::current()).expect("should serialize");
    let entries = vocabulary.as_object().expect("vocabulary is an object");

    for (key, value) in entries {
        if key == "version" {
            continue;
        }
        let name = value.as_str().expect("names are strings");
        assert!(html.contains(name), "markup never emits {name}");
        assert!(
            html.contains(&format!("ATTR.{key}")),
            "runtime never reads ATTR.{key}"
        );
    }
}

#[test]
fn test_config_embeds_login_and_schedule() {
    let html = compile(&showcase());
    assert!(html.contains("const CONFIG = {"));
    assert!(html.contains("\"loginForms\":[{\"pageId\":\"p2\",\"elementId\":\"f1\""));
    assert!(html.contains("\"milestones\":[[5,\"bigRed\"]"));
}

#[test]
fn test_script_closes_once() {
    let mut project = showcase();
    if let Some(page) = project.page_mut("p2") {
        page.elements[0] = Element::new(ElementKind::LoginForm(Box::new(ura_core::LoginForm {
            success_message: Some("</script><script>alert(1)</script>".to_string()),
            ..ura_core::LoginForm::default()
        })))
        .with_id("f1");
    }
    let html = compile(&project);
    assert_eq!(count(&html, "</script>"), 1);
}

#[test]
fn test_author_form_keeps_native_submit() {
    let page = Page::new("News").with_id("news").with_custom_html(
        "<form id=\"login-form-news\" action=\"https://example.com/subscribe\"></form>",
    );
    let html = compile(&Project::new("News").with_page(page));

    // No login entry exists for an author form, so the handler must bail
    // out before it blocks the submission.
    assert!(html.contains("\"loginForms\":[]"));
    let guard = html.find("if (!config) return;").expect("config guard");
    let block = html.find("event.preventDefault()").expect("preventDefault");
    assert!(guard < block);
}

#[test]
fn test_fallback_title() {
    let project = Project::new("").with_page(Page::new("Only"));
    let html = DocumentCompiler::new("Untitled").compile(&project);
    assert!(html.contains("<title>Untitled</title>"));
}

// ==========================================================================
// Properties over generated projects
// ==========================================================================

fn arb_project() -> impl Strategy<Value = Project> {
    (
        "[a-zA-Z ]{0,16}",
        prop::collection::vec(("[a-zA-Z0-9 <>&]{0,12}", 0usize..4, any::<bool>()), 1..6),
    )
        .prop_map(|(name, pages)| {
            let total = pages.len();
            let mut project = Project::new(name);
            for (index, (label, texts, redirect)) in pages.into_iter().enumerate() {
                let mut page = Page::new(format!("Page {index}")).with_id(format!("p{index}"));
                for n in 0..texts {
                    page = page.with_element(
                        Element::text(format!("{label} {n}")).with_id(format!("t{n}")),
                    );
                }
                if redirect {
                    page = page.with_redirect(format!("p{}", (index + 1) % total), 1.0);
                }
                project = project.with_page(page);
            }
            project
        })
}

proptest! {
    #[test]
    fn prop_compile_is_deterministic(project in arb_project()) {
        prop_assert_eq!(compile(&project), compile(&project));
    }

    #[test]
    fn prop_page_roots_match_pages(project in arb_project()) {
        let html = compile(&project);
        prop_assert_eq!(count(&html, "class=\"page\""), project.pages.len());
        prop_assert_eq!(count(&html, "style=\"display:block;"), 1);
    }
}
