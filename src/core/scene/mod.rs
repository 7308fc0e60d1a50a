//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle, asynchronous scene hosting and cross-scene transitions.
//
// Architecture:
//   LocalSceneHost (implements SceneHost)
//     ├─ registry: HashMap<S, Registration>
//     ├─ loaded:   Vec<(S, Box<dyn Scene>)>   additive, load order
//     └─ pending:  VecDeque<PendingOp>        FIFO completion
//
//   SceneTransitionOrchestrator
//     └─ Idle → FadeOut → SceneLoad → FadeIn → Finished
//
// Flow (per frame):
//   host.pump() → host.update() → orchestrator.tick() → drain requests
//
//=========================================================================

//=== Module Declarations =================================================

mod context;
mod host;
mod init_barrier;
mod local_host;
mod orchestrator;
mod transition_queue;

//=== Public API ==========================================================

pub use context::{SceneContext, SceneLinks};
pub use host::{AsyncOp, OpCompleter, SceneHost};
pub use init_barrier::{InitBarrier, InitState};
pub use local_host::{LocalSceneHost, SceneFactory, SceneRole};
pub use orchestrator::{
    SceneTransitionOrchestrator, TransitionError, TransitionPhase, TransitionReport,
    TransitionStatus,
};
pub use transition_queue::{TransitionQueue, TransitionRequest};

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Scene keys are the names the host loads and unloads by. Typically
/// implemented by a game-specific enum.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== Scene Trait =========================================================

/// Behavior of a loaded scene.
///
/// A scene is constructed by its host factory when a load completes,
/// receives `on_enter` once, `update` every frame while loaded, and
/// `on_exit` when its unload completes.
///
/// # Minimal Implementation
///
/// ```rust
/// # use runner_core::core::scene::{Scene, SceneContext, SceneKey};
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum GameScene { Main }
/// # impl SceneKey for GameScene {}
/// struct MainScene;
///
/// impl Scene<GameScene> for MainScene {
///     fn on_enter(&mut self, ctx: &mut SceneContext<'_, GameScene>) {
///         ctx.signal_initialized();
///     }
///
///     fn update(&mut self, _ctx: &mut SceneContext<'_, GameScene>) {}
/// }
/// ```
pub trait Scene<S: SceneKey> {
    /// Called once when the scene's load completes.
    ///
    /// Scenes entered through a transition must eventually signal the
    /// initialization barrier (ready or failed) through the context.
    fn on_enter(&mut self, _ctx: &mut SceneContext<'_, S>) {}

    /// Called once when the scene's unload completes.
    fn on_exit(&mut self, _ctx: &mut SceneContext<'_, S>) {}

    /// Called every frame while loaded.
    fn update(&mut self, ctx: &mut SceneContext<'_, S>);
}
