//! Shared stylesheet embedded in every document.

use crate::style::KeyframeAnimation;

const RESET: &str = "\
*, *::before, *::after { box-sizing: border-box; }
html, body { margin: 0; padding: 0; font-family: sans-serif; }
.page { width: 100vw; min-height: 100vh; }
.animation-container { pointer-events: none; }
";

const PARTICLES: &str = "\
.confetti-piece { position: absolute; top: -10px; width: 8px; height: 14px; opacity: 0.9; animation-name: confetti-fall; animation-timing-function: linear; animation-fill-mode: forwards; }
.spark { position: absolute; left: 50%; top: 50%; width: 4px; height: 4px; border-radius: 50%; animation: spark-flow 0.6s ease-out forwards; }
.fireworks-canvas { position: absolute; left: -50%; top: -50%; width: 200%; height: 200%; pointer-events: none; }
@keyframes confetti-fall { 0% { transform: translateY(0) rotate(0deg); opacity: 1; } 100% { transform: translateY(110vh) rotate(720deg); opacity: 0; } }
@keyframes spark-flow { 0% { transform: translate(0, 0) scale(1); opacity: 1; } 100% { transform: translate(var(--dx), var(--dy)) scale(0.2); opacity: 0; } }
";

/// Body of the `@keyframes` rule of an entrance/emphasis animation.
#[must_use]
pub const fn keyframes_body(animation: KeyframeAnimation) -> &'static str {
    match animation {
        KeyframeAnimation::FadeIn => "from { opacity: 0; } to { opacity: 1; }",
        KeyframeAnimation::SlideInUp => {
            "from { transform: translateY(20px); opacity: 0; } to { transform: translateY(0); opacity: 1; }"
        }
        KeyframeAnimation::Pulse => {
            "0%, 100% { transform: scale(1); } 50% { transform: scale(1.05); }"
        }
        KeyframeAnimation::Pop => {
            "0% { transform: scale(0.8); opacity: 0; } 100% { transform: scale(1); opacity: 1; }"
        }
        KeyframeAnimation::Shake => {
            "0%, 100% { transform: translateX(0); } 20%, 60% { transform: translateX(-6px); } 40%, 80% { transform: translateX(6px); }"
        }
        KeyframeAnimation::Explode => {
            "0% { transform: scale(1); opacity: 1; } 100% { transform: scale(1.6); opacity: 0; }"
        }
        KeyframeAnimation::Glow => {
            "0%, 100% { filter: drop-shadow(0 0 0 rgba(255, 255, 255, 0)); } 50% { filter: drop-shadow(0 0 12px rgba(255, 215, 0, 0.9)); }"
        }
        KeyframeAnimation::Bounce => {
            "0%, 20%, 50%, 80%, 100% { transform: translateY(0); } 40% { transform: translateY(-20px); } 60% { transform: translateY(-10px); }"
        }
    }
}

/// The complete stylesheet.
#[must_use]
pub fn stylesheet() -> String {
    let mut css = String::from(RESET);
    for animation in KeyframeAnimation::ALL {
        css.push_str("@keyframes ");
        css.push_str(animation.keyframe_name());
        css.push_str(" { ");
        css.push_str(keyframes_body(animation));
        css.push_str(" }\n");
    }
    css.push_str(PARTICLES);
    css
}
