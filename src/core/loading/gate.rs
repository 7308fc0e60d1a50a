//=========================================================================
// Loading Gate
//=========================================================================
//
// State machine of the transient loading overlay scene.
//
//   FadeIn ──content visible──► Loading ──request_fade_out()──► FadeOut
//                                                                 │
//   Complete ◄──fade-out clip active and progress > 1.0───────────┘
//
// The orchestrator reads `is_loading()` / `is_complete()` and calls
// `request_fade_out()`; the overlay scene calls `update()` each frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::OverlayAnimator;

//=== GatePhase ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    FadeIn,
    Loading,
    FadeOut,
    Complete,
}

//=== LoadingGate =========================================================

pub struct LoadingGate {
    phase: GatePhase,
    animator: Box<dyn OverlayAnimator>,
}

impl LoadingGate {
    pub fn new(animator: Box<dyn OverlayAnimator>) -> Self {
        Self {
            phase: GatePhase::FadeIn,
            animator,
        }
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    /// True only while waiting for the next scene.
    pub fn is_loading(&self) -> bool {
        self.phase == GatePhase::Loading
    }

    /// True once the fade-out has played through.
    pub fn is_complete(&self) -> bool {
        self.phase == GatePhase::Complete
    }

    /// Starts the fade-out. Refused (returns false) unless `Loading`.
    pub fn request_fade_out(&mut self) -> bool {
        if !self.is_loading() {
            return false;
        }
        self.animator.trigger_fade_out();
        self.phase = GatePhase::FadeOut;
        debug!("Loading gate: fade-out started");
        true
    }

    /// Advances the animator and evaluates at most one phase change.
    pub fn update(&mut self, dt: f32) {
        self.animator.advance(dt);

        match self.phase {
            GatePhase::FadeIn => {
                if self.animator.content_visible() {
                    self.phase = GatePhase::Loading;
                    debug!("Loading gate: ready for next scene");
                }
            }
            GatePhase::FadeOut => {
                if self.animator.fade_out().has_finished() {
                    self.phase = GatePhase::Complete;
                    debug!("Loading gate: complete");
                }
            }
            GatePhase::Loading | GatePhase::Complete => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
