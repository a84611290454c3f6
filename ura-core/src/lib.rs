//! # URA Core
//!
//! Scene model for URA projects and an executable model of the runtime
//! embedded in exported documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  ura-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Scene Model     │  Runtime Model           │
//! │  - Project       │  - Navigation            │
//! │  - Pages         │  - Redirect timers       │
//! │  - Elements      │  - Audio latch           │
//! ├─────────────────────────────────────────────┤
//! │  Fireworks Tiers │  Templates               │
//! │  - Shot counter  │  - MCQ / table / content │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod element;
pub mod error;
pub mod fireworks;
pub mod page;
pub mod project;
pub mod runtime;
pub mod templates;

pub use element::{
    Animation, AnimationType, Button, ButtonShape, Container, Element, ElementId, ElementKind,
    FontWeight, Image, LoginForm, Position, Size, Text, Video,
};
pub use error::{SceneError, SceneResult};
pub use fireworks::{ShotCounter, ShotSchedule, ShotTier, TierProfile};
pub use page::{ContentMode, Page, PageBody, PageId, Redirect};
pub use project::{DanglingReference, Project, ReferenceKind};
pub use runtime::{AudioState, LoginOutcome, RuntimeState};

/// URA core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
