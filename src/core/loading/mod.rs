//=========================================================================
// Loading Overlay
//=========================================================================
//
// Gate state machine, animation capabilities and the overlay scene that
// hosts them during a scene transition.
//
//=========================================================================

//=== Module Declarations =================================================

mod animation;
mod gate;
mod scene;

//=== Public API ==========================================================

pub use animation::{AnimationProgress, OverlayAnimator, TimedClip, TimedOverlay};
pub use gate::{GatePhase, LoadingGate};
pub use scene::LoadingScene;
