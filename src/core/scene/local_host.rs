//=========================================================================
// Local Scene Host
//=========================================================================
//
// In-process scene host with additive loading.
//
// Scenes are registered once as factories keyed by scene key. A load
// constructs a fresh instance; an unload drops it. Loads and unloads are
// asynchronous: each takes `latency_frames` frames and operations
// complete strictly in the order they were requested.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, VecDeque};

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::{
    AsyncOp, OpCompleter, Scene, SceneContext, SceneHost, SceneKey, SceneLinks, TransitionQueue,
};
use crate::core::clock::FrameTick;

//=== Types ===============================================================

/// Builds a fresh scene instance for each load.
pub type SceneFactory<S> = Box<dyn FnMut() -> Box<dyn Scene<S>>>;

/// How a loaded scene relates to the active scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRole {
    /// Becomes the active scene when loaded.
    Primary,
    /// Layered on top; never becomes active.
    Overlay,
}

struct Registration<S: SceneKey> {
    factory: SceneFactory<S>,
    role: SceneRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpKind {
    Load,
    Unload,
}

struct PendingOp<S: SceneKey> {
    kind: OpKind,
    key: S,
    frames_left: u32,
    completer: OpCompleter,
}

//=== LocalSceneHost ======================================================

pub struct LocalSceneHost<S: SceneKey> {
    registry: HashMap<S, Registration<S>>,
    loaded: Vec<(S, Box<dyn Scene<S>>)>,
    pending: VecDeque<PendingOp<S>>,
    active: Option<S>,
    latency_frames: u32,
}

impl<S: SceneKey> LocalSceneHost<S> {
    //--- Construction -----------------------------------------------------

    pub fn new(latency_frames: u32) -> Self {
        Self {
            registry: HashMap::new(),
            loaded: Vec::new(),
            pending: VecDeque::new(),
            active: None,
            latency_frames,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a primary scene factory.
    pub fn register_scene<F>(&mut self, key: S, factory: F)
    where
        F: FnMut() -> Box<dyn Scene<S>> + 'static,
    {
        self.register(key, Box::new(factory), SceneRole::Primary);
    }

    /// Registers an overlay scene factory.
    pub fn register_overlay<F>(&mut self, key: S, factory: F)
    where
        F: FnMut() -> Box<dyn Scene<S>> + 'static,
    {
        self.register(key, Box::new(factory), SceneRole::Overlay);
    }

    fn register(&mut self, key: S, factory: SceneFactory<S>, role: SceneRole) {
        if self.registry.insert(key, Registration { factory, role }).is_some() {
            warn!("Scene {:?} was already registered and has been replaced", key);
        }
    }

    pub fn role(&self, key: S) -> Option<SceneRole> {
        self.registry.get(&key).map(|r| r.role)
    }

    //--- Queries ----------------------------------------------------------

    pub fn loaded_keys(&self) -> Vec<S> {
        self.loaded.iter().map(|(key, _)| *key).collect()
    }

    pub fn pending_ops(&self) -> usize {
        self.pending.len()
    }

    pub fn latency_frames(&self) -> u32 {
        self.latency_frames
    }

    //--- Frame Processing -------------------------------------------------

    /// Loads `key` immediately, bypassing latency. Used for the boot scene.
    pub fn load_now(
        &mut self,
        key: S,
        tick: FrameTick,
        transitions: &mut TransitionQueue<S>,
        links: &mut SceneLinks,
    ) -> bool {
        self.execute_load(key, tick, transitions, links)
    }

    /// Advances pending operations and completes those that are due.
    ///
    /// Scene `on_enter` / `on_exit` hooks run here.
    pub fn pump(
        &mut self,
        tick: FrameTick,
        transitions: &mut TransitionQueue<S>,
        links: &mut SceneLinks,
    ) {
        for op in self.pending.iter_mut() {
            op.frames_left = op.frames_left.saturating_sub(1);
        }

        while self.pending.front().map_or(false, |op| op.frames_left == 0) {
            let Some(op) = self.pending.pop_front() else {
                break;
            };
            match op.kind {
                OpKind::Load => {
                    self.execute_load(op.key, tick, transitions, links);
                }
                OpKind::Unload => self.execute_unload(op.key, tick, transitions, links),
            }
            op.completer.complete();
        }
    }

    /// Updates every loaded scene in load order.
    pub fn update(
        &mut self,
        tick: FrameTick,
        transitions: &mut TransitionQueue<S>,
        links: &mut SceneLinks,
    ) {
        let keys = self.loaded_keys();
        for (_, scene) in self.loaded.iter_mut() {
            let mut ctx = SceneContext::new(tick, &keys, transitions, links);
            scene.update(&mut ctx);
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn enqueue(&mut self, kind: OpKind, key: S) -> AsyncOp {
        let (completer, op) = AsyncOp::channel();
        self.pending.push_back(PendingOp {
            kind,
            key,
            frames_left: self.latency_frames,
            completer,
        });
        op
    }

    fn execute_load(
        &mut self,
        key: S,
        tick: FrameTick,
        transitions: &mut TransitionQueue<S>,
        links: &mut SceneLinks,
    ) -> bool {
        if self.is_loaded(key) {
            warn!("Scene {:?} is already loaded, skipping load", key);
            return false;
        }

        let Some(registration) = self.registry.get_mut(&key) else {
            error!("Attempted to load unregistered scene {:?}", key);
            return false;
        };

        let mut scene = (registration.factory)();
        let role = registration.role;

        let mut keys = self.loaded_keys();
        keys.push(key);
        let mut ctx = SceneContext::new(tick, &keys, transitions, links);
        scene.on_enter(&mut ctx);

        self.loaded.push((key, scene));
        if role == SceneRole::Primary {
            self.active = Some(key);
        }

        info!("Scene {:?} loaded ({:?})", key, role);
        true
    }

    fn execute_unload(
        &mut self,
        key: S,
        tick: FrameTick,
        transitions: &mut TransitionQueue<S>,
        links: &mut SceneLinks,
    ) {
        let Some(pos) = self.loaded.iter().position(|(k, _)| *k == key) else {
            debug!("Scene {:?} not loaded, skipping unload", key);
            return;
        };

        let (_, mut scene) = self.loaded.remove(pos);
        let keys = self.loaded_keys();
        let mut ctx = SceneContext::new(tick, &keys, transitions, links);
        scene.on_exit(&mut ctx);

        if self.active == Some(key) {
            self.active = None;
        }

        info!("Scene {:?} unloaded", key);
    }
}

//--- SceneHost Implementation --------------------------------------------

impl<S: SceneKey> SceneHost<S> for LocalSceneHost<S> {
    fn load_async(&mut self, key: S) -> AsyncOp {
        debug!("Queueing load of {:?} ({} frame latency)", key, self.latency_frames);
        self.enqueue(OpKind::Load, key)
    }

    fn unload_async(&mut self, key: S) -> AsyncOp {
        debug!("Queueing unload of {:?} ({} frame latency)", key, self.latency_frames);
        self.enqueue(OpKind::Unload, key)
    }

    fn is_loaded(&self, key: S) -> bool {
        self.loaded.iter().any(|(k, _)| *k == key)
    }

    fn contains(&self, key: S) -> bool {
        self.registry.contains_key(&key)
    }

    fn active_scene(&self) -> Option<S> {
        self.active
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        A,
        B,
        Overlay,
    }

    impl SceneKey for TestScene {}

    // Records lifecycle calls into a shared log
    struct Probe {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Scene<TestScene> for Probe {
        fn on_enter(&mut self, ctx: &mut SceneContext<'_, TestScene>) {
            self.log.borrow_mut().push(format!("enter {} f{}", self.name, ctx.tick.frame));
            ctx.signal_initialized();
        }

        fn on_exit(&mut self, _ctx: &mut SceneContext<'_, TestScene>) {
            self.log.borrow_mut().push(format!("exit {}", self.name));
        }

        fn update(&mut self, _ctx: &mut SceneContext<'_, TestScene>) {
            self.log.borrow_mut().push(format!("update {}", self.name));
        }
    }

    struct Fixture {
        host: LocalSceneHost<TestScene>,
        queue: TransitionQueue<TestScene>,
        links: SceneLinks,
        log: Rc<RefCell<Vec<String>>>,
        frame: u64,
    }

    impl Fixture {
        fn new(latency: u32) -> Self {
            let log = Rc::new(RefCell::new(Vec::new()));
            let mut host = LocalSceneHost::new(latency);
            for (key, name) in [(TestScene::A, "A"), (TestScene::B, "B")] {
                let log = Rc::clone(&log);
                host.register_scene(key, move || {
                    Box::new(Probe { name, log: Rc::clone(&log) }) as Box<dyn Scene<TestScene>>
                });
            }
            let overlay_log = Rc::clone(&log);
            host.register_overlay(TestScene::Overlay, move || {
                Box::new(Probe { name: "Overlay", log: Rc::clone(&overlay_log) })
                    as Box<dyn Scene<TestScene>>
            });

            Self {
                host,
                queue: TransitionQueue::new(),
                links: SceneLinks::new(),
                log,
                frame: 0,
            }
        }

        fn frame(&mut self) {
            self.frame += 1;
            let tick = FrameTick::new(self.frame, 1.0 / 60.0);
            self.host.pump(tick, &mut self.queue, &mut self.links);
            self.host.update(tick, &mut self.queue, &mut self.links);
        }
    }

    #[test]
    fn load_completes_after_latency() {
        let mut fx = Fixture::new(2);
        let mut op = fx.host.load_async(TestScene::A);

        fx.frame();
        assert!(!op.poll());
        assert!(!fx.host.is_loaded(TestScene::A));

        fx.frame();
        assert!(op.poll());
        assert!(fx.host.is_loaded(TestScene::A));
        assert_eq!(fx.host.active_scene(), Some(TestScene::A));
        assert!(fx.links.init.is_ready());
    }

    #[test]
    fn overlay_never_becomes_active() {
        let mut fx = Fixture::new(0);
        fx.host.load_now(TestScene::A, FrameTick::new(0, 0.0), &mut fx.queue, &mut fx.links);
        let _op = fx.host.load_async(TestScene::Overlay);
        fx.frame();

        assert!(fx.host.is_loaded(TestScene::Overlay));
        assert_eq!(fx.host.active_scene(), Some(TestScene::A));
        assert_eq!(fx.host.role(TestScene::Overlay), Some(SceneRole::Overlay));
    }

    #[test]
    fn ops_complete_in_request_order() {
        let mut fx = Fixture::new(1);
        fx.host.load_now(TestScene::A, FrameTick::new(0, 0.0), &mut fx.queue, &mut fx.links);

        let mut unload = fx.host.unload_async(TestScene::A);
        let mut load = fx.host.load_async(TestScene::B);
        fx.frame();

        assert!(unload.poll());
        assert!(load.poll());
        let log = fx.log.borrow();
        let exit_a = log.iter().position(|l| l == "exit A").unwrap();
        let enter_b = log.iter().position(|l| l.starts_with("enter B")).unwrap();
        assert!(exit_a < enter_b);
        assert_eq!(fx.host.loaded_keys(), vec![TestScene::B]);
    }

    #[test]
    fn unload_of_active_clears_active() {
        let mut fx = Fixture::new(0);
        fx.host.load_now(TestScene::A, FrameTick::new(0, 0.0), &mut fx.queue, &mut fx.links);
        let _op = fx.host.unload_async(TestScene::A);
        fx.frame();

        assert_eq!(fx.host.active_scene(), None);
        assert!(fx.host.loaded_keys().is_empty());
    }

    #[test]
    fn unload_of_unloaded_scene_still_completes() {
        let mut fx = Fixture::new(0);
        let mut op = fx.host.unload_async(TestScene::B);
        fx.frame();
        assert!(op.poll());
    }

    #[test]
    fn double_load_keeps_single_instance() {
        let mut fx = Fixture::new(0);
        fx.host.load_now(TestScene::A, FrameTick::new(0, 0.0), &mut fx.queue, &mut fx.links);
        let mut op = fx.host.load_async(TestScene::A);
        fx.frame();

        assert!(op.poll());
        assert_eq!(fx.host.loaded_keys(), vec![TestScene::A]);
    }

    #[test]
    fn update_runs_every_loaded_scene() {
        let mut fx = Fixture::new(0);
        fx.host.load_now(TestScene::A, FrameTick::new(0, 0.0), &mut fx.queue, &mut fx.links);
        fx.host.load_now(TestScene::Overlay, FrameTick::new(0, 0.0), &mut fx.queue, &mut fx.links);
        fx.log.borrow_mut().clear();

        fx.frame();
        assert_eq!(*fx.log.borrow(), vec!["update A".to_string(), "update Overlay".to_string()]);
    }

    #[test]
    fn unregistered_load_is_not_contained() {
        let host: LocalSceneHost<TestScene> = LocalSceneHost::new(0);
        assert!(!host.contains(TestScene::A));
    }
}
