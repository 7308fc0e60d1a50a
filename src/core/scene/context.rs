//=========================================================================
// Scene Context
//=========================================================================
//
// Per-call view handed to scenes by the host.
//
// Contains:
// - tick:        current frame
// - loaded:      snapshot of loaded scene keys
// - transitions: request queue drained by the engine
// - links:       cross-scene handshake state (init barrier, loading gate)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{InitBarrier, SceneKey, TransitionQueue};
use crate::core::clock::FrameTick;
use crate::core::loading::LoadingGate;

//=== SceneLinks ==========================================================

/// Handshake state shared by the scenes and the orchestrator.
///
/// Owned by the engine. Scenes write it through [`SceneContext`], the
/// orchestrator reads it during its tick.
#[derive(Default)]
pub struct SceneLinks {
    /// Written by the entering scene, read by the orchestrator.
    pub init: InitBarrier,
    /// Published by the loading overlay scene while it is loaded.
    pub loading_gate: Option<LoadingGate>,
}

impl SceneLinks {
    pub fn new() -> Self {
        Self::default()
    }
}

//=== SceneContext ========================================================

pub struct SceneContext<'a, S: SceneKey> {
    pub tick: FrameTick,
    loaded: &'a [S],
    transitions: &'a mut TransitionQueue<S>,
    links: &'a mut SceneLinks,
}

impl<'a, S: SceneKey> SceneContext<'a, S> {
    pub fn new(
        tick: FrameTick,
        loaded: &'a [S],
        transitions: &'a mut TransitionQueue<S>,
        links: &'a mut SceneLinks,
    ) -> Self {
        Self {
            tick,
            loaded,
            transitions,
            links,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_loaded(&self, key: S) -> bool {
        self.loaded.contains(&key)
    }

    pub fn loaded_scenes(&self) -> &[S] {
        self.loaded
    }

    //--- Transitions ------------------------------------------------------

    /// Asks the engine to transition to `target` at the end of this frame.
    pub fn request_transition(&mut self, target: S) -> bool {
        self.transitions.push(target, self.tick.frame)
    }

    //--- Initialization Barrier -------------------------------------------

    pub fn signal_initialized(&mut self) {
        self.links.init.signal_ready();
    }

    pub fn signal_init_failed(&mut self, reason: impl Into<String>) {
        self.links.init.signal_failed(reason);
    }

    //--- Loading Gate -----------------------------------------------------

    pub fn publish_loading_gate(&mut self, gate: LoadingGate) {
        self.links.loading_gate = Some(gate);
    }

    pub fn loading_gate_mut(&mut self) -> Option<&mut LoadingGate> {
        self.links.loading_gate.as_mut()
    }

    pub fn withdraw_loading_gate(&mut self) -> Option<LoadingGate> {
        self.links.loading_gate.take()
    }
}
