//! Document assembly.
//!
//! ```text
//! <!DOCTYPE html> head(meta, title, style) body(pages..., audio, script)
//! ```
//!
//! [`DocumentBuilder`] walks the sections in a fixed order: the
//! stylesheet closes the head, pages go into the body, the script closes
//! the document. Skipping or reordering a step does not compile.

use std::fmt::Write;
use std::marker::PhantomData;

use ura_core::Project;

use crate::markup::{emit_page, escape};
use crate::protocol::{AUDIO_ELEMENT_ID, PROTOCOL_VERSION};
use crate::script::runtime_script;
use crate::stylesheet::stylesheet;

/// Title used when the project name is blank.
pub const DEFAULT_TITLE: &str = "URA Project";

/// Builder state: writing the head.
#[derive(Debug)]
pub struct Head;
/// Builder state: writing page markup into the body.
#[derive(Debug)]
pub struct Body;
/// Builder state: document closed.
#[derive(Debug)]
pub struct Closed;

/// Writes one HTML document in head, body, script order.
#[derive(Debug)]
pub struct DocumentBuilder<S> {
    out: String,
    pages: usize,
    _state: PhantomData<S>,
}

impl<S> DocumentBuilder<S> {
    fn into_state<T>(self) -> DocumentBuilder<T> {
        DocumentBuilder {
            out: self.out,
            pages: self.pages,
            _state: PhantomData,
        }
    }
}

impl DocumentBuilder<Head> {
    /// Open a document with the given (unescaped) title.
    #[must_use]
    pub fn new(title: &str) -> Self {
        let mut out = String::with_capacity(16 * 1024);
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        out.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        let _ = writeln!(
            out,
            "<meta name=\"generator\" content=\"ura-export runtime-protocol/{PROTOCOL_VERSION}\">"
        );
        let _ = writeln!(out, "<title>{}</title>", escape(title));
        Self {
            out,
            pages: 0,
            _state: PhantomData,
        }
    }

    /// Embed the stylesheet and open the body.
    #[must_use]
    pub fn stylesheet(mut self, css: &str) -> DocumentBuilder<Body> {
        let _ = write!(self.out, "<style>\n{css}</style>\n</head>\n<body>\n");
        self.into_state()
    }
}

impl DocumentBuilder<Body> {
    /// Append one page root.
    #[must_use]
    pub fn page(mut self, markup: &str) -> Self {
        self.out.push_str(markup);
        self.out.push('\n');
        self.pages += 1;
        self
    }

    /// Number of pages written so far.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.pages
    }

    /// Append the shared audio element and the runtime script, closing the
    /// document.
    #[must_use]
    pub fn script(mut self, script: &str) -> DocumentBuilder<Closed> {
        let _ = writeln!(
            self.out,
            "<audio id=\"{AUDIO_ELEMENT_ID}\" preload=\"auto\"></audio>"
        );
        let _ = write!(self.out, "<script>\n{script}</script>\n</body>\n</html>\n");
        self.into_state()
    }
}

impl DocumentBuilder<Closed> {
    /// The finished document text.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

/// Compiles projects into standalone documents.
#[derive(Debug, Clone)]
pub struct DocumentCompiler {
    fallback_title: String,
}

impl Default for DocumentCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl DocumentCompiler {
    /// Create a compiler with the given fallback title.
    #[must_use]
    pub fn new(fallback_title: impl Into<String>) -> Self {
        Self {
            fallback_title: fallback_title.into(),
        }
    }

    /// Document title of a project.
    #[must_use]
    pub fn title<'a>(&'a self, project: &'a Project) -> &'a str {
        let name = project.name.trim();
        if name.is_empty() {
            &self.fallback_title
        } else {
            name
        }
    }

    /// Compile a project into document text.
    ///
    /// The output depends only on the project: compiling the same project
    /// twice gives identical text. The first page is the visible one.
    /// Callers check for an empty project first (see
    /// [`Project::ensure_started`]).
    #[must_use]
    pub fn compile(&self, project: &Project) -> String {
        debug_assert!(!project.is_empty(), "compiling a project without pages");

        for dangling in project.dangling_references() {
            tracing::warn!(
                page = %dangling.page_id,
                element = ?dangling.element_id.as_ref().map(ToString::to_string),
                kind = ?dangling.kind,
                target = %dangling.target,
                "Reference to a missing page, emitted as is"
            );
        }

        let mut body = DocumentBuilder::new(self.title(project)).stylesheet(&stylesheet());
        for (index, page) in project.pages.iter().enumerate() {
            tracing::debug!(page = %page.id, elements = page.elements.len(), "Emitting page");
            body = body.page(&emit_page(page, index == 0));
        }
        body.script(&runtime_script(project)).finish()
    }
}

/// Compile a project with the default settings.
#[must_use]
pub fn compile(project: &Project) -> String {
    DocumentCompiler::default().compile(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ura_core::Page;

    fn two_pages() -> Project {
        Project::new("Demo")
            .with_page(Page::new("One").with_id("p1"))
            .with_page(Page::new("Two").with_id("p2"))
    }

    #[test]
    fn test_document_skeleton() {
        let html = compile(&two_pages());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Demo</title>"));
        assert!(html.trim_end().ends_with("</html>"));

        let style = html.find("<style>").expect("stylesheet");
        let body = html.find("<body>").expect("body");
        let script = html.find("<script>").expect("script");
        let audio = html.find("id=\"background-audio\"").expect("audio element");
        assert!(style < body);
        assert!(body < audio);
        assert!(audio < script);
    }

    #[test]
    fn test_title_fallback_and_escaping() {
        let compiler = DocumentCompiler::default();
        let blank = Project::new("   ").with_page(Page::new("Only"));
        assert_eq!(compiler.title(&blank), DEFAULT_TITLE);

        let html = compile(&Project::new("Tom & Jerry <3").with_page(Page::new("Only")));
        assert!(html.contains("<title>Tom &amp; Jerry &lt;3</title>"));
    }

    #[test]
    fn test_builder_counts_pages() {
        let body = DocumentBuilder::new("t")
            .stylesheet("")
            .page("<div></div>")
            .page("<div></div>");
        assert_eq!(body.page_count(), 2);
        let html = body.script("").finish();
        assert!(html.contains("<script>\n</script>"));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let project = two_pages();
        assert_eq!(compile(&project), compile(&project));
    }
}
