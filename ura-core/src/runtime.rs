//! Deterministic model of the exported document runtime.
//!
//! [`RuntimeState`] owns everything the emitted script keeps as document
//! state: the current page, the single redirect timer, burst intervals and
//! fireworks instances keyed by their container, the shared audio channel
//! and the first-interaction latch. Time only moves through
//! [`RuntimeState::advance`], so navigation sequences can be replayed
//! exactly.
//!
//! Entering a page always runs the same four steps in order:
//! cleanup, redirect scheduling, audio reconciliation, animation start.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::element::{AnimationType, ElementId, ElementKind};
use crate::fireworks::{ShotCounter, ShotTier, ONE_SHOT_WINDOW_MS};
use crate::page::{Page, PageId};
use crate::project::Project;
use crate::{SceneError, SceneResult};

/// Repeat period of looping confetti bursts, in milliseconds.
pub const CONFETTI_PERIOD_MS: u64 = 5000;
/// Repeat period of looping spark bursts, in milliseconds.
pub const SPARKS_PERIOD_MS: u64 = 200;

/// Identifies an animation container: element ids are only unique per page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerKey {
    /// Owning page.
    pub page_id: PageId,
    /// Animation element.
    pub element_id: ElementId,
}

impl ContainerKey {
    fn new(page_id: &PageId, element_id: &ElementId) -> Self {
        Self {
            page_id: page_id.clone(),
            element_id: element_id.clone(),
        }
    }
}

/// State of the shared background audio element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioState {
    /// Loaded source, if any.
    pub src: Option<String>,
    /// Loop flag.
    pub looped: bool,
    /// Whether playback is running.
    pub playing: bool,
    /// Times a new source was loaded.
    pub loads: u32,
}

/// The one-shot redirect timer of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTimer {
    /// Destination page.
    pub target: PageId,
    /// Clock time at which the timer fires.
    pub due_at_ms: u64,
}

/// A repeating burst interval of a looping confetti or sparks container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurstInterval {
    /// Effect repeated.
    pub animation_type: AnimationType,
    /// Repeat period.
    pub period_ms: u64,
    /// Clock time of the next burst.
    pub next_due_ms: u64,
}

/// A fireworks simulation bound to one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireworksInstance {
    /// Keep launching for as long as the page is shown.
    pub looped: bool,
    /// Whether the frame loop is running.
    pub running: bool,
    /// Clock time of the last start.
    pub started_at_ms: u64,
    /// Rockets launched over the instance lifetime.
    pub launched: u32,
    counter: ShotCounter,
}

impl FireworksInstance {
    fn new(looped: bool) -> Self {
        Self {
            looped,
            running: false,
            started_at_ms: 0,
            launched: 0,
            counter: ShotCounter::new(),
        }
    }

    /// Whether a launch at `now_ms` is allowed.
    #[must_use]
    pub fn is_spawning(&self, now_ms: u64) -> bool {
        self.running
            && (self.looped
                || now_ms.saturating_sub(self.started_at_ms) < u64::from(ONE_SHOT_WINDOW_MS))
    }

    /// Shots counted towards the next milestone.
    #[must_use]
    pub fn shot_count(&self) -> u32 {
        self.counter.count()
    }
}

/// Result of submitting a login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    /// Whether both credentials matched exactly.
    pub success: bool,
    /// Alert shown, if a message is configured for the outcome.
    pub message: Option<String>,
    /// Page navigated to, if one is configured and resolves.
    pub navigated_to: Option<PageId>,
}

/// Runtime state of one opened document.
#[derive(Debug)]
pub struct RuntimeState<'a> {
    project: &'a Project,
    current: &'a Page,
    fragment: String,
    now_ms: u64,
    redirect: Option<RedirectTimer>,
    intervals: BTreeMap<ContainerKey, BurstInterval>,
    fireworks: BTreeMap<ContainerKey, FireworksInstance>,
    audio: AudioState,
    interacted: bool,
    unmuted_videos: BTreeSet<ContainerKey>,
    bursts: BTreeMap<AnimationType, u32>,
    alerts: Vec<String>,
}

impl<'a> RuntimeState<'a> {
    /// Open a document. `fragment` is the URL hash, with or without `#`.
    ///
    /// The initial page is the one named by the fragment, or the first page
    /// when the fragment is absent or unknown.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::EmptyProject`] if the project has no pages.
    pub fn boot(project: &'a Project, fragment: Option<&str>) -> SceneResult<Self> {
        let first = project.ensure_started()?;
        let initial = fragment
            .map(|f| f.trim_start_matches('#'))
            .and_then(|id| project.page(id))
            .unwrap_or(first);

        let mut state = Self {
            project,
            current: initial,
            fragment: String::new(),
            now_ms: 0,
            redirect: None,
            intervals: BTreeMap::new(),
            fireworks: BTreeMap::new(),
            audio: AudioState::default(),
            interacted: false,
            unmuted_videos: BTreeSet::new(),
            bursts: BTreeMap::new(),
            alerts: Vec::new(),
        };
        state.show(initial);
        Ok(state)
    }

    /// Show a page. Unknown ids are ignored and return `false`.
    pub fn navigate_to(&mut self, page_id: &str) -> bool {
        let Some(page) = self.project.page(page_id) else {
            tracing::debug!("Ignoring navigation to unknown page {page_id}");
            return false;
        };
        self.show(page);
        true
    }

    fn show(&mut self, page: &'a Page) {
        let outgoing = self.current;
        self.current = page;
        self.fragment = page.id.to_string();
        self.enter(page, outgoing);
    }

    fn enter(&mut self, page: &'a Page, outgoing: &Page) {
        tracing::debug!(page = %page.id, at_ms = self.now_ms, "Entering page");
        self.leave(outgoing);
        self.schedule_redirect(page);
        self.sync_audio(page);
        self.start_animations(page);
    }

    fn leave(&mut self, outgoing: &Page) {
        self.redirect = None;
        self.intervals.clear();
        for (key, instance) in &mut self.fireworks {
            if key.page_id == outgoing.id {
                instance.running = false;
            }
        }
    }

    fn schedule_redirect(&mut self, page: &Page) {
        if let Some(redirect) = page.redirect.as_ref().filter(|r| r.is_armed()) {
            self.redirect = Some(RedirectTimer {
                target: redirect.to_page_id.clone(),
                due_at_ms: self.now_ms + redirect.delay_ms(),
            });
        }
    }

    fn sync_audio(&mut self, page: &Page) {
        match &page.audio_url {
            Some(url) => {
                if self.audio.src.as_deref() != Some(url.as_str()) {
                    self.audio.src = Some(url.clone());
                    self.audio.loads += 1;
                    self.audio.playing = false;
                }
                self.audio.looped = page.audio_loops();
                if self.interacted {
                    self.audio.playing = true;
                }
            }
            None => {
                self.audio.src = None;
                self.audio.playing = false;
            }
        }
    }

    fn start_animations(&mut self, page: &Page) {
        for element in page.rendered_elements() {
            let ElementKind::Animation(animation) = &element.kind else {
                continue;
            };
            let key = ContainerKey::new(&page.id, &element.id);
            let looped = element.loop_animation;
            match animation.animation_type {
                AnimationType::Fireworks => {
                    let instance = self
                        .fireworks
                        .entry(key)
                        .or_insert_with(|| FireworksInstance::new(looped));
                    instance.looped = looped;
                    instance.running = true;
                    instance.started_at_ms = self.now_ms;
                }
                kind @ (AnimationType::Confetti | AnimationType::Sparks) => {
                    self.burst(kind);
                    if looped {
                        let period_ms = if kind == AnimationType::Confetti {
                            CONFETTI_PERIOD_MS
                        } else {
                            SPARKS_PERIOD_MS
                        };
                        self.intervals.insert(
                            key,
                            BurstInterval {
                                animation_type: kind,
                                period_ms,
                                next_due_ms: self.now_ms + period_ms,
                            },
                        );
                    }
                }
            }
        }
    }

    fn burst(&mut self, kind: AnimationType) {
        *self.bursts.entry(kind).or_insert(0) += 1;
    }

    /// Register the first user interaction and reconcile audio playback.
    ///
    /// Returns `true` only the first time.
    pub fn first_interaction(&mut self) -> bool {
        if self.interacted {
            return false;
        }
        self.interacted = true;
        if self.audio.src.is_some() {
            self.audio.playing = true;
        }
        true
    }

    /// Click an element of the current page.
    ///
    /// Returns `true` if the click navigated.
    pub fn click_button(&mut self, element_id: &str) -> bool {
        self.first_interaction();
        let target = self.current_page().element(element_id).and_then(|e| match &e.kind {
            ElementKind::Button(button) => button.link_to_page_id.clone(),
            _ => None,
        });
        target.is_some_and(|t| self.navigate_to(t.as_str()))
    }

    /// Click a video of the current page, toggling its mute flag.
    ///
    /// Returns the new muted state, or `None` if the element is not a video.
    pub fn click_video(&mut self, element_id: &str) -> Option<bool> {
        self.first_interaction();
        let page = self.current_page();
        let element = page.element(element_id)?;
        if !matches!(element.kind, ElementKind::Video(_)) {
            return None;
        }
        let key = ContainerKey::new(&page.id, &element.id);
        if self.unmuted_videos.remove(&key) {
            Some(true)
        } else {
            self.unmuted_videos.insert(key);
            Some(false)
        }
    }

    /// Submit a login form of the current page.
    ///
    /// Credentials are compared for exact equality. The configured message
    /// is recorded as an alert, then the configured page is shown.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ElementNotFound`] if the current page has no
    /// login form with that id.
    pub fn submit_login(
        &mut self,
        element_id: &str,
        username: &str,
        password: &str,
    ) -> SceneResult<LoginOutcome> {
        self.first_interaction();
        let form = match self.current_page().element(element_id).map(|e| &e.kind) {
            Some(ElementKind::LoginForm(form)) => form,
            _ => return Err(SceneError::ElementNotFound(element_id.to_string())),
        };

        let success = username == form.correct_username && password == form.correct_password;
        let (message, target) = if success {
            (&form.success_message, &form.success_page_id)
        } else {
            (&form.failure_message, &form.failure_page_id)
        };
        let message = message.clone().filter(|m| !m.is_empty());
        if let Some(text) = &message {
            self.alerts.push(text.clone());
        }

        let navigated_to = target
            .clone()
            .filter(|t| self.navigate_to(t.as_str()));

        Ok(LoginOutcome {
            success,
            message,
            navigated_to,
        })
    }

    /// Launch a rocket from a fireworks container of the current page.
    ///
    /// Returns the shot tier, or `None` when the instance is stopped or its
    /// launch window has closed.
    pub fn launch_rocket(&mut self, element_id: &str) -> Option<ShotTier> {
        let key = ContainerKey::new(&self.current.id, &ElementId::new(element_id));
        let now = self.now_ms;
        let instance = self.fireworks.get_mut(&key)?;
        if !instance.is_spawning(now) {
            return None;
        }
        instance.launched += 1;
        Some(instance.counter.next_shot())
    }

    /// Move the clock forward, firing due bursts and redirects in time order.
    pub fn advance(&mut self, ms: u64) {
        let end = self.now_ms + ms;
        loop {
            let next_interval = self
                .intervals
                .iter()
                .map(|(key, interval)| (interval.next_due_ms, key.clone()))
                .min();
            let next_redirect = self.redirect.as_ref().map(|r| r.due_at_ms);

            match (next_interval, next_redirect) {
                (Some((due, key)), redirect) if due <= end && !redirect.is_some_and(|r| r < due) => {
                    self.now_ms = due;
                    if let Some(interval) = self.intervals.get_mut(&key) {
                        interval.next_due_ms += interval.period_ms;
                        let kind = interval.animation_type;
                        self.burst(kind);
                    }
                }
                (_, Some(due)) if due <= end => {
                    self.now_ms = due;
                    if let Some(timer) = self.redirect.take() {
                        self.navigate_to(timer.target.as_str());
                    }
                }
                _ => break,
            }
        }
        self.now_ms = end;
    }

    /// The page currently shown.
    #[must_use]
    pub fn current_page(&self) -> &'a Page {
        self.current
    }

    /// Id of the page currently shown.
    #[must_use]
    pub fn current_page_id(&self) -> &'a PageId {
        &self.current.id
    }

    /// The URL fragment, replaced on every navigation.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Clock time in milliseconds since boot.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Pending redirect timer, if any.
    #[must_use]
    pub fn redirect_timer(&self) -> Option<&RedirectTimer> {
        self.redirect.as_ref()
    }

    /// Number of pending redirect timers (never more than one).
    #[must_use]
    pub fn active_redirect_timers(&self) -> usize {
        usize::from(self.redirect.is_some())
    }

    /// Number of running burst intervals.
    #[must_use]
    pub fn active_intervals(&self) -> usize {
        self.intervals.len()
    }

    /// Number of fireworks instances still launching rockets.
    ///
    /// A one-shot instance stops counting once its launch window closes,
    /// which is when the document's frame loop winds down.
    #[must_use]
    pub fn live_fireworks(&self) -> usize {
        self.fireworks
            .values()
            .filter(|i| i.is_spawning(self.now_ms))
            .count()
    }

    /// Fireworks instance of a container, running or not.
    #[must_use]
    pub fn fireworks(&self, page_id: &str, element_id: &str) -> Option<&FireworksInstance> {
        self.fireworks
            .get(&ContainerKey::new(&PageId::new(page_id), &ElementId::new(element_id)))
    }

    /// Number of fireworks instances ever created.
    #[must_use]
    pub fn fireworks_instances(&self) -> usize {
        self.fireworks.len()
    }

    /// Shared audio channel.
    #[must_use]
    pub fn audio(&self) -> &AudioState {
        &self.audio
    }

    /// Whether the first-interaction latch has fired.
    #[must_use]
    pub fn has_interacted(&self) -> bool {
        self.interacted
    }

    /// Bursts emitted so far for an effect type.
    #[must_use]
    pub fn bursts(&self, kind: AnimationType) -> u32 {
        self.bursts.get(&kind).copied().unwrap_or(0)
    }

    /// Alerts shown so far, oldest first.
    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}
