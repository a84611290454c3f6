//! Runtime script emission.
//!
//! The script is assembled from static sections plus one JSON
//! configuration object built from the project. Sections always render in
//! [`Section`] order, whatever order they were added in.

mod js;

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::Serialize;
use ura_core::runtime::{CONFETTI_PERIOD_MS, SPARKS_PERIOD_MS};
use ura_core::{ElementKind, Project, ShotSchedule};

use crate::protocol::Vocabulary;

/// Confetti pieces per burst.
pub const CONFETTI_PIECES: u32 = 50;
/// Sparks per burst.
pub const SPARK_COUNT: u32 = 8;

const CONFETTI_COLORS: [&str; 6] = [
    "#f44336", "#e91e63", "#9c27b0", "#2196f3", "#4caf50", "#ffeb3b",
];
const SPARK_COLORS: [&str; 3] = ["#ffd700", "#ffa500", "#ffffff"];

/// Ordered sections of the runtime script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    /// `const CONFIG = {...};`
    Config,
    /// Runtime state and DOM helpers.
    State,
    /// Page switching, leave/enter lifecycle, redirects.
    Navigation,
    /// Background audio and the first-interaction latch.
    Audio,
    /// Confetti and sparks.
    Bursts,
    /// Canvas fireworks.
    Fireworks,
    /// Animation container startup.
    Animations,
    /// Login form submission.
    Login,
    /// Click and hash change handlers.
    Events,
    /// Initial page selection.
    Boot,
}

/// Burst effect settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurstConfig {
    /// Period of looping confetti.
    pub confetti_period_ms: u64,
    /// Period of looping sparks.
    pub sparks_period_ms: u64,
    /// Pieces per confetti burst.
    pub confetti_pieces: u32,
    /// Sparks per burst.
    pub spark_count: u32,
    /// Confetti piece colors.
    pub confetti_colors: Vec<&'static str>,
    /// Spark colors.
    pub spark_colors: Vec<&'static str>,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            confetti_period_ms: CONFETTI_PERIOD_MS,
            sparks_period_ms: SPARKS_PERIOD_MS,
            confetti_pieces: CONFETTI_PIECES,
            spark_count: SPARK_COUNT,
            confetti_colors: CONFETTI_COLORS.to_vec(),
            spark_colors: SPARK_COLORS.to_vec(),
        }
    }
}

/// Credentials and outcomes of one login form, keyed by page and element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginFormConfig<'a> {
    /// Page holding the form.
    pub page_id: &'a str,
    /// Element id of the form.
    pub element_id: &'a str,
    /// Accepted username.
    pub correct_username: &'a str,
    /// Accepted password.
    pub correct_password: &'a str,
    /// Alert on success.
    pub success_message: Option<&'a str>,
    /// Alert on failure.
    pub failure_message: Option<&'a str>,
    /// Page shown on success.
    pub success_page_id: Option<&'a str>,
    /// Page shown on failure.
    pub failure_page_id: Option<&'a str>,
}

/// Everything the runtime reads besides the markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig<'a> {
    /// Attribute and class names.
    pub protocol: Vocabulary,
    /// Login forms of every page, in document order.
    pub login_forms: Vec<LoginFormConfig<'a>>,
    /// Fireworks tiers and launch timing.
    pub fireworks: ShotSchedule,
    /// Confetti and sparks settings.
    pub bursts: BurstConfig,
}

impl<'a> RuntimeConfig<'a> {
    /// Collect the configuration of a project.
    #[must_use]
    pub fn from_project(project: &'a Project) -> Self {
        let login_forms = project
            .pages
            .iter()
            .flat_map(|page| {
                page.rendered_elements().filter_map(move |element| {
                    let ElementKind::LoginForm(form) = &element.kind else {
                        return None;
                    };
                    Some(LoginFormConfig {
                        page_id: page.id.as_str(),
                        element_id: element.id.as_str(),
                        correct_username: &form.correct_username,
                        correct_password: &form.correct_password,
                        success_message: form.success_message.as_deref(),
                        failure_message: form.failure_message.as_deref(),
                        success_page_id: form.success_page_id.as_ref().map(|p| p.as_str()),
                        failure_page_id: form.failure_page_id.as_ref().map(|p| p.as_str()),
                    })
                })
            })
            .collect();

        Self {
            protocol: Vocabulary::current(),
            login_forms,
            fireworks: ShotSchedule::default(),
            bursts: BurstConfig::default(),
        }
    }

    /// JSON safe to embed inside a `<script>` element.
    #[must_use]
    pub fn to_script_json(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to serialize runtime config");
            "{}".to_string()
        });
        escape_script_json(&json)
    }
}

/// Keep embedded JSON from closing the script element or opening a comment.
#[must_use]
pub fn escape_script_json(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "\\u003c!--")
}

/// Assembles the runtime script from sections.
#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder {
    sections: BTreeMap<Section, Cow<'static, str>>,
}

impl ScriptBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder holding every static runtime section.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .section(Section::State, js::STATE)
            .section(Section::Navigation, js::NAVIGATION)
            .section(Section::Audio, js::AUDIO)
            .section(Section::Bursts, js::BURSTS)
            .section(Section::Fireworks, js::FIREWORKS)
            .section(Section::Animations, js::ANIMATIONS)
            .section(Section::Login, js::LOGIN)
            .section(Section::Events, js::EVENTS)
            .section(Section::Boot, js::BOOT)
    }

    /// Set a section, replacing any previous body.
    #[must_use]
    pub fn section(mut self, section: Section, body: impl Into<Cow<'static, str>>) -> Self {
        self.sections.insert(section, body.into());
        self
    }

    /// Set the configuration section.
    #[must_use]
    pub fn config(self, config: &RuntimeConfig<'_>) -> Self {
        let body = format!("const CONFIG = {};\n", config.to_script_json());
        self.section(Section::Config, body)
    }

    /// Check whether a section is present.
    #[must_use]
    pub fn has(&self, section: Section) -> bool {
        self.sections.contains_key(&section)
    }

    /// Render the script body, wrapped in a strict-mode IIFE.
    #[must_use]
    pub fn build(&self) -> String {
        let mut script = String::from("(function () {\n'use strict';\n");
        for body in self.sections.values() {
            script.push_str(body);
            script.push('\n');
        }
        script.push_str("})();\n");
        script
    }
}

/// The complete runtime script of a project.
#[must_use]
pub fn runtime_script(project: &Project) -> String {
    ScriptBuilder::standard()
        .config(&RuntimeConfig::from_project(project))
        .build()
}
