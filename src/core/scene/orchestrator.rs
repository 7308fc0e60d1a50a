//=========================================================================
// Scene Transition Orchestrator
//=========================================================================
//
// Coordinates one scene-to-scene transition behind a loading overlay.
//
//   Idle ──load_scene()──► FadeOut   overlay loading, waiting for its gate
//                            │        to report `Loading`
//                            ▼
//                         SceneLoad  unload old → load new → wait for the
//                            │        new scene's initialization barrier
//                            ▼
//                         FadeIn     gate fading out; on completion the
//                            │        overlay is unloaded
//                            ▼
//                         Finished
//
// Every wait is a condition poll against host or gate state; there is no
// timer here. Each tick advances at most one step.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info, warn};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::{AsyncOp, InitState, SceneHost, SceneKey, SceneLinks};

//=== TransitionError =====================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// A transition is already running.
    #[error("scene transition already in progress ({phase:?})")]
    Busy { phase: TransitionPhase },

    /// The host has no scene registered under this key.
    #[error("scene {0} is not registered")]
    UnknownScene(String),
}

//=== TransitionPhase =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    FadeOut,
    SceneLoad,
    FadeIn,
    /// Terminal. Seen only between the last tick and the engine dropping
    /// the orchestrator; a later request builds a fresh one.
    Finished,
}

//=== TransitionStatus / Report ===========================================

/// Summary of a finished transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionReport<S: SceneKey> {
    pub from: Option<S>,
    pub to: S,
    /// Diagnostic from an entering scene that failed to initialize.
    pub init_failure: Option<String>,
    /// Ticks spent between acceptance and completion.
    pub frames: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionStatus<S: SceneKey> {
    Idle,
    Running(TransitionPhase),
    Finished(TransitionReport<S>),
}

//=== LoadStep ============================================================

enum LoadStep {
    Unloading(AsyncOp),
    Loading(AsyncOp),
    AwaitingInit,
}

//=== SceneTransitionOrchestrator =========================================

pub struct SceneTransitionOrchestrator<S: SceneKey> {
    phase: TransitionPhase,
    step: Option<LoadStep>,
    loading_scene: S,
    from: Option<S>,
    to: Option<S>,
    overlay_load: Option<AsyncOp>,
    init_failure: Option<String>,
    frames: u64,
}

impl<S: SceneKey> SceneTransitionOrchestrator<S> {
    //--- Construction -----------------------------------------------------

    /// Creates an idle orchestrator that uses `loading_scene` as overlay.
    pub fn new(loading_scene: S) -> Self {
        Self {
            phase: TransitionPhase::Idle,
            step: None,
            loading_scene,
            from: None,
            to: None,
            overlay_load: None,
            init_failure: None,
            frames: 0,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == TransitionPhase::Idle
    }

    pub fn from_scene(&self) -> Option<S> {
        self.from
    }

    pub fn target_scene(&self) -> Option<S> {
        self.to
    }

    //--- Requests ---------------------------------------------------------

    /// Starts a transition to `target`.
    ///
    /// Rejected without any state change unless idle, or when the host
    /// cannot load `target`.
    pub fn load_scene(
        &mut self,
        target: S,
        host: &mut dyn SceneHost<S>,
        links: &mut SceneLinks,
    ) -> Result<(), TransitionError> {
        if self.phase != TransitionPhase::Idle {
            return Err(TransitionError::Busy { phase: self.phase });
        }
        if !host.contains(target) {
            return Err(TransitionError::UnknownScene(format!("{:?}", target)));
        }

        self.from = host.active_scene();
        self.to = Some(target);
        self.init_failure = None;
        self.frames = 0;
        links.init.reset();

        self.overlay_load = Some(host.load_async(self.loading_scene));
        self.phase = TransitionPhase::FadeOut;

        info!("Scene transition {:?} → {:?} started", self.from, target);
        Ok(())
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the transition by at most one step.
    pub fn tick(&mut self, host: &mut dyn SceneHost<S>, links: &mut SceneLinks) -> TransitionStatus<S> {
        let Some(target) = self.to else {
            return TransitionStatus::Idle;
        };
        if self.phase == TransitionPhase::Finished {
            return TransitionStatus::Finished(self.report(target));
        }
        self.frames += 1;

        match self.phase {
            TransitionPhase::FadeOut => self.tick_fade_out(target, host, links),
            TransitionPhase::SceneLoad => self.tick_scene_load(target, host, links),
            TransitionPhase::FadeIn => {
                let complete = links.loading_gate.as_ref().map_or(true, |gate| gate.is_complete());
                if complete {
                    // The overlay unloads on its own; nothing waits on it
                    drop(host.unload_async(self.loading_scene));
                    self.enter(TransitionPhase::Finished);
                    info!(
                        "Scene transition {:?} → {:?} finished in {} frames",
                        self.from, target, self.frames
                    );
                    return TransitionStatus::Finished(self.report(target));
                }
            }
            TransitionPhase::Idle | TransitionPhase::Finished => {}
        }

        TransitionStatus::Running(self.phase)
    }

    //--- Internal Helpers -------------------------------------------------

    fn tick_fade_out(&mut self, target: S, host: &mut dyn SceneHost<S>, links: &mut SceneLinks) {
        if let Some(op) = self.overlay_load.as_mut() {
            op.poll();
        }

        let gate_ready = links.loading_gate.as_ref().map_or(false, |gate| gate.is_loading());
        if !gate_ready {
            return;
        }

        self.step = Some(match self.from {
            Some(from) => LoadStep::Unloading(host.unload_async(from)),
            None => LoadStep::Loading(host.load_async(target)),
        });
        self.enter(TransitionPhase::SceneLoad);
    }

    fn tick_scene_load(&mut self, target: S, host: &mut dyn SceneHost<S>, links: &mut SceneLinks) {
        let next = match self.step.take() {
            Some(LoadStep::Unloading(mut op)) => {
                if op.poll() {
                    LoadStep::Loading(host.load_async(target))
                } else {
                    LoadStep::Unloading(op)
                }
            }
            Some(LoadStep::Loading(mut op)) => {
                if op.poll() {
                    LoadStep::AwaitingInit
                } else {
                    LoadStep::Loading(op)
                }
            }
            Some(LoadStep::AwaitingInit) | None => match links.init.state() {
                InitState::Pending => LoadStep::AwaitingInit,
                InitState::Ready => {
                    self.begin_fade_in(links);
                    return;
                }
                InitState::Failed(reason) => {
                    error!("Scene {:?} failed to initialize: {}", target, reason);
                    self.init_failure = Some(reason.clone());
                    self.begin_fade_in(links);
                    return;
                }
            },
        };
        self.step = Some(next);
    }

    fn begin_fade_in(&mut self, links: &mut SceneLinks) {
        match links.loading_gate.as_mut() {
            Some(gate) => {
                if !gate.request_fade_out() {
                    warn!("Loading gate refused fade-out in phase {:?}", gate.phase());
                }
            }
            None => warn!("Loading overlay gone before fade-in"),
        }
        self.step = None;
        self.enter(TransitionPhase::FadeIn);
    }

    fn enter(&mut self, phase: TransitionPhase) {
        debug!("Transition phase {:?} → {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn report(&self, target: S) -> TransitionReport<S> {
        TransitionReport {
            from: self.from,
            to: target,
            init_failure: self.init_failure.clone(),
            frames: self.frames,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
