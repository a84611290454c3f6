//! Attribute vocabulary shared by the markup and the runtime script.
//!
//! The markup emitter writes these names into the document and the runtime
//! script reads them back. The script never spells a name itself: it gets
//! [`Vocabulary`] as part of its embedded configuration.

use serde::Serialize;
use ura_core::AnimationType;

/// Version of the markup/runtime contract.
pub const PROTOCOL_VERSION: u32 = 1;

/// Button attribute naming the page to show on click.
pub const ATTR_LINK_TO: &str = "data-link-to";
/// Page attribute naming the redirect target.
pub const ATTR_REDIRECT_TO: &str = "data-redirect-to";
/// Page attribute with the redirect delay in milliseconds.
pub const ATTR_REDIRECT_DELAY: &str = "data-redirect-delay";
/// Page attribute with the background audio URL.
pub const ATTR_AUDIO_SRC: &str = "data-audio-src";
/// Page attribute with the background audio loop flag (`true`/`false`).
pub const ATTR_AUDIO_LOOP: &str = "data-audio-loop";
/// Page attribute marking raw markup pages (`custom-html`/`build-from-html`).
pub const ATTR_CONTENT: &str = "data-content";
/// Animation container attribute with the effect type.
pub const ATTR_ANIMATION: &str = "data-animation";
/// Element id of login forms, unprefixed.
pub const ATTR_ELEMENT_ID: &str = "data-element-id";

/// Class of every page root.
pub const CLASS_PAGE: &str = "page";
/// Class of looping animation containers.
pub const CLASS_LOOP: &str = "loop";
/// Class of every animation container.
pub const CLASS_ANIMATION_CONTAINER: &str = "animation-container";
/// Suffix appended to the effect type for the per-type container class.
pub const CONTAINER_CLASS_SUFFIX: &str = "-container";

/// Prefix of login form element ids.
pub const LOGIN_FORM_PREFIX: &str = "login-form-";
/// Id of the shared background audio element.
pub const AUDIO_ELEMENT_ID: &str = "background-audio";

/// Per-type class of an animation container, e.g. `fireworks-container`.
#[must_use]
pub fn container_class(animation_type: AnimationType) -> String {
    format!("{}{CONTAINER_CLASS_SUFFIX}", animation_type.as_str())
}

/// Id of a login form element.
#[must_use]
pub fn login_form_id(element_id: &str) -> String {
    format!("{LOGIN_FORM_PREFIX}{element_id}")
}

/// The vocabulary as handed to the runtime script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    /// Contract version.
    pub version: u32,
    /// See [`ATTR_LINK_TO`].
    pub link_to: &'static str,
    /// See [`ATTR_REDIRECT_TO`].
    pub redirect_to: &'static str,
    /// See [`ATTR_REDIRECT_DELAY`].
    pub redirect_delay: &'static str,
    /// See [`ATTR_AUDIO_SRC`].
    pub audio_src: &'static str,
    /// See [`ATTR_AUDIO_LOOP`].
    pub audio_loop: &'static str,
    /// See [`ATTR_ANIMATION`].
    pub animation: &'static str,
    /// See [`CLASS_PAGE`].
    pub page_class: &'static str,
    /// See [`CLASS_LOOP`].
    pub loop_class: &'static str,
    /// See [`CLASS_ANIMATION_CONTAINER`].
    pub animation_container_class: &'static str,
    /// See [`LOGIN_FORM_PREFIX`].
    pub login_form_prefix: &'static str,
    /// See [`AUDIO_ELEMENT_ID`].
    pub audio_element_id: &'static str,
}

impl Vocabulary {
    /// The vocabulary of [`PROTOCOL_VERSION`].
    #[must_use]
    pub const fn current() -> Self {
        Self {
            version: PROTOCOL_VERSION,
            link_to: ATTR_LINK_TO,
            redirect_to: ATTR_REDIRECT_TO,
            redirect_delay: ATTR_REDIRECT_DELAY,
            audio_src: ATTR_AUDIO_SRC,
            audio_loop: ATTR_AUDIO_LOOP,
            animation: ATTR_ANIMATION,
            page_class: CLASS_PAGE,
            loop_class: CLASS_LOOP,
            animation_container_class: CLASS_ANIMATION_CONTAINER,
            login_form_prefix: LOGIN_FORM_PREFIX,
            audio_element_id: AUDIO_ELEMENT_ID,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_classes() {
        assert_eq!(container_class(AnimationType::Fireworks), "fireworks-container");
        assert_eq!(container_class(AnimationType::Confetti), "confetti-container");
        assert_eq!(container_class(AnimationType::Sparks), "sparks-container");
    }

    #[test]
    fn test_vocabulary_serializes_every_name() {
        let json = serde_json::to_value(Vocabulary::current()).expect("should serialize");
        assert_eq!(json["linkTo"], ATTR_LINK_TO);
        assert_eq!(json["redirectDelay"], ATTR_REDIRECT_DELAY);
        assert_eq!(json["loginFormPrefix"], LOGIN_FORM_PREFIX);
        assert_eq!(json["version"], PROTOCOL_VERSION);
    }
}
