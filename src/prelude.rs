//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use runner_core::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder, ShutdownHandle, TickControl};
pub use crate::error::{RunnerError, RunnerResult};
pub use crate::config::RunnerConfig;

// Scene system
pub use crate::core::scene::{Scene, SceneContext, SceneHost, SceneKey, TransitionError};
pub use crate::core::loading::{LoadingScene, OverlayAnimator, TimedOverlay};

// Session
pub use crate::core::clock::FrameTick;
pub use crate::core::record::{RecordStore, RECORD_LIMIT};
pub use crate::core::session::{PlayerControl, SessionHud};

// Runner scenes
pub use crate::scenes::{build_engine, RunnerDeps, RunnerScene};
