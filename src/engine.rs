//=========================================================================
// Runner Engine
//
// Main entry point and frame driver.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Frame Loop]
//         │                          │
//         ├─ with_tps()              ├─ host.pump()        op completion
//         ├─ with_load_latency()     ├─ host.update()      scene updates
//         ├─ with_scene()            ├─ transition.tick()  orchestrator
//         ├─ with_overlay_scene()    └─ drain requests     new transitions
//         ├─ with_loading_scene()
//         └─ with_initial_scene()
// ```
//
// Everything runs on the calling thread. The only cross-thread surface is
// the shutdown handle.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::clock::FrameTick;
use crate::core::scene::{
    LocalSceneHost, Scene, SceneFactory, SceneHost, SceneKey, SceneLinks, SceneRole,
    SceneTransitionOrchestrator, TransitionError, TransitionPhase, TransitionQueue,
    TransitionReport, TransitionStatus,
};
use crate::error::{RunnerError, RunnerResult};

//=== TickControl =========================================================

/// Whether the frame loop should keep going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== ShutdownHandle ======================================================

/// Ends [`Engine::run`] at the next frame boundary. Cloneable and `Send`.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    sender: Sender<()>,
}

impl ShutdownHandle {
    pub fn request_shutdown(&self) {
        match self.sender.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => {}
            Err(TrySendError::Disconnected(())) => debug!("Shutdown requested after engine drop"),
        }
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0
/// - **Load latency**: 1 frame per scene load or unload
///
/// # Examples
///
/// ```no_run
/// use runner_core::core::loading::{LoadingScene, TimedOverlay};
/// use runner_core::core::scene::{Scene, SceneContext, SceneKey};
/// use runner_core::EngineBuilder;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameScene { Menu, Loading }
/// impl SceneKey for GameScene {}
///
/// struct Menu;
/// impl Scene<GameScene> for Menu {
///     fn update(&mut self, _ctx: &mut SceneContext<'_, GameScene>) {}
/// }
///
/// let mut engine = EngineBuilder::new()
///     .with_tps(30.0)
///     .with_scene(GameScene::Menu, || Box::new(Menu) as Box<dyn Scene<GameScene>>)
///     .with_loading_scene(GameScene::Loading, || {
///         Box::new(LoadingScene::new(Box::new(TimedOverlay::new(0.5, 0.5))))
///             as Box<dyn Scene<GameScene>>
///     })
///     .with_initial_scene(GameScene::Menu)
///     .build()
///     .unwrap();
///
/// engine.run();
/// ```
pub struct EngineBuilder<S: SceneKey> {
    tps: f64,
    load_latency_frames: u32,
    scenes: Vec<(S, SceneFactory<S>, SceneRole)>,
    loading_scene: Option<S>,
    initial_scene: Option<S>,
}

impl<S: SceneKey> EngineBuilder<S> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            load_latency_frames: 1,
            scenes: Vec::new(),
            loading_scene: None,
            initial_scene: None,
        }
    }

    /// Sets the target ticks per second of [`Engine::run`].
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets how many frames each asynchronous load or unload takes.
    pub fn with_load_latency(mut self, frames: u32) -> Self {
        self.load_latency_frames = frames;
        self
    }

    /// Registers a primary scene.
    pub fn with_scene<F>(mut self, key: S, factory: F) -> Self
    where
        F: FnMut() -> Box<dyn Scene<S>> + 'static,
    {
        self.scenes.push((key, Box::new(factory), SceneRole::Primary));
        self
    }

    /// Registers an overlay scene that never becomes active.
    pub fn with_overlay_scene<F>(mut self, key: S, factory: F) -> Self
    where
        F: FnMut() -> Box<dyn Scene<S>> + 'static,
    {
        self.scenes.push((key, Box::new(factory), SceneRole::Overlay));
        self
    }

    /// Registers the overlay scene shown during every transition.
    pub fn with_loading_scene<F>(mut self, key: S, factory: F) -> Self
    where
        F: FnMut() -> Box<dyn Scene<S>> + 'static,
    {
        self.loading_scene = Some(key);
        self.with_overlay_scene(key, factory)
    }

    /// Sets the scene loaded by [`Engine::start`].
    pub fn with_initial_scene(mut self, key: S) -> Self {
        self.initial_scene = Some(key);
        self
    }

    /// Builds the engine.
    ///
    /// Fails when no loading scene was registered or when the initial
    /// scene is not a registered scene.
    pub fn build(self) -> RunnerResult<Engine<S>> {
        let loading_scene = self
            .loading_scene
            .ok_or(RunnerError::MissingCollaborator("loading scene"))?;

        let mut host = LocalSceneHost::new(self.load_latency_frames);
        for (key, factory, role) in self.scenes {
            match role {
                SceneRole::Primary => host.register_scene(key, factory),
                SceneRole::Overlay => host.register_overlay(key, factory),
            }
        }

        if let Some(initial) = self.initial_scene {
            if !host.contains(initial) {
                return Err(TransitionError::UnknownScene(format!("{:?}", initial)).into());
            }
        }

        info!(
            "Building engine (TPS: {}, load latency: {} frames, loading scene: {:?})",
            self.tps, self.load_latency_frames, loading_scene
        );

        let (shutdown_tx, shutdown_rx) = bounded(1);

        Ok(Engine {
            host,
            links: SceneLinks::new(),
            requests: TransitionQueue::new(),
            transition: None,
            loading_scene,
            initial_scene: self.initial_scene,
            started: false,
            frame: 0,
            tps: self.tps,
            shutdown_tx,
            shutdown_rx,
            last_report: None,
        })
    }
}

impl<S: SceneKey> Default for EngineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Runner engine runtime.
///
/// Owns the scene host, the cross-scene handshake state and, while a
/// transition is running, the one orchestrator instance. The orchestrator
/// is created when a request is accepted and dropped when it finishes.
pub struct Engine<S: SceneKey> {
    host: LocalSceneHost<S>,
    links: SceneLinks,
    requests: TransitionQueue<S>,
    transition: Option<SceneTransitionOrchestrator<S>>,
    loading_scene: S,
    initial_scene: Option<S>,
    started: bool,
    frame: u64,
    tps: f64,
    shutdown_tx: Sender<()>,
    shutdown_rx: Receiver<()>,
    last_report: Option<TransitionReport<S>>,
}

impl<S: SceneKey> Engine<S> {
    //--- Queries ----------------------------------------------------------

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn tps(&self) -> f64 {
        self.tps
    }

    pub fn active_scene(&self) -> Option<S> {
        self.host.active_scene()
    }

    pub fn is_loaded(&self, key: S) -> bool {
        self.host.is_loaded(key)
    }

    pub fn loaded_scenes(&self) -> Vec<S> {
        self.host.loaded_keys()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Phase of the running transition, `Idle` when there is none.
    pub fn transition_phase(&self) -> TransitionPhase {
        self.transition
            .as_ref()
            .map_or(TransitionPhase::Idle, |t| t.phase())
    }

    /// Report of the most recently finished transition.
    pub fn last_report(&self) -> Option<&TransitionReport<S>> {
        self.last_report.as_ref()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            sender: self.shutdown_tx.clone(),
        }
    }

    //--- Transitions ------------------------------------------------------

    /// Starts a transition to `target`.
    ///
    /// Rejected with [`TransitionError::Busy`] while another transition
    /// runs and with [`TransitionError::UnknownScene`] for unregistered
    /// targets. A rejected request changes nothing.
    pub fn request_transition(&mut self, target: S) -> Result<(), TransitionError> {
        if let Some(running) = self.transition.as_mut() {
            return running.load_scene(target, &mut self.host, &mut self.links);
        }

        let mut orchestrator = SceneTransitionOrchestrator::new(self.loading_scene);
        orchestrator.load_scene(target, &mut self.host, &mut self.links)?;
        self.transition = Some(orchestrator);
        Ok(())
    }

    //--- Execution --------------------------------------------------------

    /// Loads the initial scene immediately. Called by the first tick if
    /// not called explicitly.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        match self.initial_scene {
            Some(initial) => {
                let tick = FrameTick::new(self.frame, 0.0);
                self.host.load_now(initial, tick, &mut self.requests, &mut self.links);
                info!("Engine started in scene {:?}", initial);
            }
            None => info!("Engine started without an initial scene"),
        }
    }

    /// Runs one frame.
    ///
    /// Order: pending load/unload completion, scene updates, orchestrator
    /// step, then the transition requests scenes raised this frame.
    pub fn tick(&mut self, dt: f32) -> TickControl {
        if self.shutdown_rx.try_recv().is_ok() {
            info!("Shutdown requested at frame {}", self.frame);
            return TickControl::Exit;
        }
        self.start();

        self.frame += 1;
        let tick = FrameTick::new(self.frame, dt);

        //--- 1. Complete due scene operations -----------------------------
        self.host.pump(tick, &mut self.requests, &mut self.links);

        //--- 2. Update loaded scenes --------------------------------------
        self.host.update(tick, &mut self.requests, &mut self.links);

        //--- 3. Advance the running transition ----------------------------
        if let Some(orchestrator) = self.transition.as_mut() {
            if let TransitionStatus::Finished(report) = orchestrator.tick(&mut self.host, &mut self.links) {
                if let Some(reason) = &report.init_failure {
                    warn!("Transition to {:?} finished with failed init: {}", report.to, reason);
                }
                self.last_report = Some(report);
                self.transition = None;
            }
        }

        //--- 4. Forward queued requests -----------------------------------
        for request in self.requests.take() {
            if let Err(e) = self.request_transition(request.target) {
                warn!(
                    "Transition to {:?} requested in frame {} rejected: {}",
                    request.target, request.frame, e
                );
            }
        }

        TickControl::Continue
    }

    /// Runs up to `frames` frames with a fixed `dt`, without pacing.
    /// Returns the number of frames run.
    pub fn run_frames(&mut self, frames: u64, dt: f32) -> u64 {
        for ran in 0..frames {
            if self.tick(dt) == TickControl::Exit {
                return ran;
            }
        }
        frames
    }

    /// Runs the paced frame loop until a shutdown is requested.
    pub fn run(&mut self) {
        let frame_duration = Duration::from_secs_f64(1.0 / self.tps);
        let dt = frame_duration.as_secs_f32();
        info!("Starting frame loop (TPS: {})", self.tps);

        loop {
            let frame_start = Instant::now();

            if self.tick(dt) == TickControl::Exit {
                break;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }

        info!("Frame loop exited after {} frames", self.frame);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loading::{LoadingScene, TimedOverlay};
    use crate::core::scene::SceneContext;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        A,
        B,
        Loading,
    }

    impl SceneKey for TestScene {}

    struct Ready {
        updates: Rc<RefCell<u32>>,
    }

    impl Scene<TestScene> for Ready {
        fn on_enter(&mut self, ctx: &mut SceneContext<'_, TestScene>) {
            ctx.signal_initialized();
        }

        fn update(&mut self, _ctx: &mut SceneContext<'_, TestScene>) {
            *self.updates.borrow_mut() += 1;
        }
    }

    // Requests a transition to B on its first update
    struct Jumper;

    impl Scene<TestScene> for Jumper {
        fn on_enter(&mut self, ctx: &mut SceneContext<'_, TestScene>) {
            ctx.signal_initialized();
        }

        fn update(&mut self, ctx: &mut SceneContext<'_, TestScene>) {
            ctx.request_transition(TestScene::B);
        }
    }

    fn builder() -> EngineBuilder<TestScene> {
        let updates = Rc::new(RefCell::new(0));
        EngineBuilder::new()
            .with_scene(TestScene::A, || Box::new(Jumper) as Box<dyn Scene<TestScene>>)
            .with_scene(TestScene::B, move || {
                Box::new(Ready { updates: Rc::clone(&updates) }) as Box<dyn Scene<TestScene>>
            })
            .with_loading_scene(TestScene::Loading, || {
                Box::new(LoadingScene::new(Box::new(TimedOverlay::new(0.1, 0.1))))
                    as Box<dyn Scene<TestScene>>
            })
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::<TestScene>::new();
        assert_eq!(builder.tps, 60.0);
        assert_eq!(builder.load_latency_frames, 1);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        EngineBuilder::<TestScene>::new().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        EngineBuilder::<TestScene>::new().with_tps(-60.0);
    }

    #[test]
    fn build_requires_loading_scene() {
        let err = EngineBuilder::<TestScene>::new().build().err().unwrap();
        assert!(matches!(err, RunnerError::MissingCollaborator("loading scene")));
    }

    #[test]
    fn build_rejects_unregistered_initial_scene() {
        let err = EngineBuilder::new()
            .with_loading_scene(TestScene::Loading, || {
                Box::new(LoadingScene::new(Box::new(TimedOverlay::new(0.1, 0.1))))
                    as Box<dyn Scene<TestScene>>
            })
            .with_initial_scene(TestScene::A)
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, RunnerError::Transition(TransitionError::UnknownScene(_))));
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn start_loads_initial_scene() {
        let mut engine = builder().with_initial_scene(TestScene::B).build().unwrap();
        engine.start();
        assert_eq!(engine.active_scene(), Some(TestScene::B));
        assert_eq!(engine.frame(), 0);
    }

    #[test]
    fn scene_request_runs_a_full_transition() {
        let mut engine = builder().with_initial_scene(TestScene::A).build().unwrap();

        engine.tick(0.05);
        assert!(engine.is_transitioning());

        // Second request while busy is rejected
        assert!(matches!(
            engine.request_transition(TestScene::A),
            Err(TransitionError::Busy { .. })
        ));

        let mut frames = 0;
        while engine.last_report().is_none() && frames < 100 {
            engine.tick(0.05);
            frames += 1;
        }

        let report = engine.last_report().unwrap();
        assert_eq!(report.from, Some(TestScene::A));
        assert_eq!(report.to, TestScene::B);
        assert!(report.init_failure.is_none());
        assert!(!engine.is_transitioning());
        assert_eq!(engine.active_scene(), Some(TestScene::B));
        assert_eq!(engine.transition_phase(), TransitionPhase::Idle);

        // Overlay unload completes on the next frame
        engine.tick(0.05);
        assert_eq!(engine.loaded_scenes(), vec![TestScene::B]);
    }

    #[test]
    fn unknown_target_is_rejected_without_orchestrator() {
        let mut engine = EngineBuilder::new()
            .with_scene(TestScene::A, || Box::new(Jumper) as Box<dyn Scene<TestScene>>)
            .with_loading_scene(TestScene::Loading, || {
                Box::new(LoadingScene::new(Box::new(TimedOverlay::new(0.1, 0.1))))
                    as Box<dyn Scene<TestScene>>
            })
            .build()
            .unwrap();

        let err = engine.request_transition(TestScene::B).unwrap_err();
        assert!(matches!(err, TransitionError::UnknownScene(_)));
        assert!(!engine.is_transitioning());
        assert_eq!(engine.transition_phase(), TransitionPhase::Idle);
    }

    #[test]
    fn shutdown_handle_stops_run_frames() {
        let mut engine = builder().with_initial_scene(TestScene::B).build().unwrap();
        let handle = engine.shutdown_handle();

        assert_eq!(engine.run_frames(3, 0.016), 3);
        handle.request_shutdown();
        handle.request_shutdown();
        assert_eq!(engine.run_frames(10, 0.016), 0);
        assert_eq!(engine.frame(), 3);
    }

    #[test]
    fn shutdown_from_another_thread_ends_run() {
        let mut engine = builder()
            .with_tps(1000.0)
            .with_initial_scene(TestScene::B)
            .build()
            .unwrap();
        let handle = engine.shutdown_handle();

        let signaller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.request_shutdown();
        });

        engine.run();
        signaller.join().unwrap();
        assert!(engine.frame() > 0);
    }
}
