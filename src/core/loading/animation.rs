//=========================================================================
// Overlay Animation
//=========================================================================
//
// Capability interfaces the loading gate polls, plus a timer-backed
// implementation.
//
//   AnimationProgress   is_active() + normalized_progress()
//   OverlayAnimator     advance / content_visible / trigger_fade_out
//
// Completion is detected by polling progress, never by an event: a clip
// counts as finished once it is active and its progress exceeds 1.0.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::config::OverlayConfig;

//=== Traits ==============================================================

/// Progress of a single animation clip.
pub trait AnimationProgress {
    /// True while this clip is the one currently playing.
    fn is_active(&self) -> bool;

    /// Elapsed time over clip length. Keeps growing past 1.0.
    fn normalized_progress(&self) -> f32;

    fn has_finished(&self) -> bool {
        self.is_active() && self.normalized_progress() > 1.0
    }
}

/// Animation backend of the loading overlay.
pub trait OverlayAnimator {
    /// Advances playback by one frame.
    fn advance(&mut self, _dt: f32) {}

    /// True once the fade-in has revealed the loading content.
    fn content_visible(&self) -> bool;

    /// Starts the fade-out clip.
    fn trigger_fade_out(&mut self);

    /// The fade-out clip.
    fn fade_out(&self) -> &dyn AnimationProgress;
}

//=== TimedClip ===========================================================

/// Fixed-length clip driven by frame deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedClip {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl TimedClip {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
        }
    }

    pub fn play(&mut self) {
        self.active = true;
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        if self.active {
            self.elapsed += dt;
        }
    }
}

impl AnimationProgress for TimedClip {
    fn is_active(&self) -> bool {
        self.active
    }

    fn normalized_progress(&self) -> f32 {
        if self.duration <= 0.0 {
            // Zero-length clips finish on their first advanced frame
            return if self.elapsed > 0.0 { f32::INFINITY } else { 0.0 };
        }
        self.elapsed / self.duration
    }
}

//=== TimedOverlay ========================================================

/// Fade-in then hold, fade-out on trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedOverlay {
    fade_in: TimedClip,
    fade_out: TimedClip,
}

impl TimedOverlay {
    /// Starts playing the fade-in immediately.
    pub fn new(fade_in_secs: f32, fade_out_secs: f32) -> Self {
        let mut fade_in = TimedClip::new(fade_in_secs);
        fade_in.play();
        Self {
            fade_in,
            fade_out: TimedClip::new(fade_out_secs),
        }
    }

    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(config.fade_in_secs, config.fade_out_secs)
    }
}

impl OverlayAnimator for TimedOverlay {
    fn advance(&mut self, dt: f32) {
        self.fade_in.advance(dt);
        self.fade_out.advance(dt);
    }

    fn content_visible(&self) -> bool {
        self.fade_in.normalized_progress() >= 1.0
    }

    fn trigger_fade_out(&mut self) {
        self.fade_in.active = false;
        self.fade_out.play();
    }

    fn fade_out(&self) -> &dyn AnimationProgress {
        &self.fade_out
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_progress_grows_past_one() {
        let mut clip = TimedClip::new(0.5);
        clip.play();
        clip.advance(0.25);
        assert_eq!(clip.normalized_progress(), 0.5);
        clip.advance(0.5);
        assert_eq!(clip.normalized_progress(), 1.5);
        assert!(clip.has_finished());
    }

    #[test]
    fn inactive_clip_does_not_advance() {
        let mut clip = TimedClip::new(1.0);
        clip.advance(5.0);
        assert_eq!(clip.normalized_progress(), 0.0);
        assert!(!clip.has_finished());
    }

    #[test]
    fn exactly_one_is_not_finished() {
        let mut clip = TimedClip::new(1.0);
        clip.play();
        clip.advance(1.0);
        assert!(!clip.has_finished());
    }

    #[test]
    fn overlay_reveals_content_after_fade_in() {
        let mut overlay = TimedOverlay::new(0.5, 0.5);
        assert!(!overlay.content_visible());
        overlay.advance(0.5);
        assert!(overlay.content_visible());
        assert!(!overlay.fade_out().is_active());
    }

    #[test]
    fn zero_length_fade_out_finishes_after_one_frame() {
        let mut overlay = TimedOverlay::new(0.0, 0.0);
        overlay.trigger_fade_out();
        assert!(!overlay.fade_out().has_finished());
        overlay.advance(1.0 / 60.0);
        assert!(overlay.fade_out().has_finished());
    }
}
