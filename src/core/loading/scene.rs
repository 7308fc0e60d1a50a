//=========================================================================
// Loading Scene
//=========================================================================
//
// The overlay scene loaded for the duration of a transition. It owns no
// logic of its own: it publishes a `LoadingGate` for the orchestrator,
// drives it every frame, and withdraws it when unloaded.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{LoadingGate, OverlayAnimator};
use crate::core::scene::{Scene, SceneContext, SceneKey};

//=== LoadingScene ========================================================

pub struct LoadingScene {
    animator: Option<Box<dyn OverlayAnimator>>,
}

impl LoadingScene {
    pub fn new(animator: Box<dyn OverlayAnimator>) -> Self {
        Self {
            animator: Some(animator),
        }
    }
}

impl<S: SceneKey> Scene<S> for LoadingScene {
    fn on_enter(&mut self, ctx: &mut SceneContext<'_, S>) {
        let Some(animator) = self.animator.take() else {
            warn!("Loading scene entered twice; keeping the existing gate");
            return;
        };
        debug!("Loading overlay entered, publishing gate");
        ctx.publish_loading_gate(LoadingGate::new(animator));
    }

    fn on_exit(&mut self, ctx: &mut SceneContext<'_, S>) {
        ctx.withdraw_loading_gate();
        debug!("Loading overlay exited, gate withdrawn");
    }

    fn update(&mut self, ctx: &mut SceneContext<'_, S>) {
        let dt = ctx.tick.dt;
        if let Some(gate) = ctx.loading_gate_mut() {
            gate.update(dt);
        }
    }
}
