//=========================================================================
// Action Scene
//=========================================================================
//
// Hosts one play session.
//
//   on_enter: build session ──ok──► Running ──ReturnToTitle──► Leaving
//                           └─err─► Halted ──overlay gone────► Leaving
//
// A session that cannot be built signals `Failed` on the init barrier so
// the transition still completes, then asks to go back to the title.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use log::{error, info};

//=== Internal Dependencies ===============================================

use super::{RunnerDeps, RunnerScene};
use crate::config::RunnerConfig;
use crate::core::scene::{Scene, SceneContext};
use crate::core::session::{GameplaySequencer, SessionBuilder, SessionSignal};
use crate::core::track::TrackGenerator;
use crate::error::RunnerResult;

//=== ActionScene =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionState {
    Starting,
    Running,
    Halted,
    Leaving,
}

pub struct ActionScene {
    config: Rc<RunnerConfig>,
    deps: RunnerDeps,
    state: ActionState,
    session: Option<GameplaySequencer>,
}

impl ActionScene {
    pub fn new(config: Rc<RunnerConfig>, deps: RunnerDeps) -> Self {
        Self {
            config,
            deps,
            state: ActionState::Starting,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&GameplaySequencer> {
        self.session.as_ref()
    }

    fn build_session(&self) -> RunnerResult<GameplaySequencer> {
        let mut builder = SessionBuilder::new(self.config.session.clone())
            .with_generator(TrackGenerator::from_config(&self.config.track));

        if let Some(factory) = &self.deps.player {
            builder = builder.with_player(factory());
        }
        if let Some(factory) = &self.deps.hud {
            builder = builder.with_hud(factory());
        }
        if let Some(factory) = &self.deps.records {
            builder = builder.with_records(factory());
        }

        builder.build()
    }
}

impl Scene<RunnerScene> for ActionScene {
    fn on_enter(&mut self, ctx: &mut SceneContext<'_, RunnerScene>) {
        match self.build_session() {
            Ok(session) => {
                self.session = Some(session);
                self.state = ActionState::Running;
                ctx.signal_initialized();
            }
            Err(e) => {
                error!("Action scene cannot start: {}", e);
                self.state = ActionState::Halted;
                ctx.signal_init_failed(e.to_string());
            }
        }
    }

    fn update(&mut self, ctx: &mut SceneContext<'_, RunnerScene>) {
        let overlay_loaded = ctx.is_loaded(RunnerScene::Loading);

        match self.state {
            ActionState::Running => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                if session.tick(ctx.tick, overlay_loaded) == SessionSignal::ReturnToTitle {
                    info!("Session over at {:.2}, returning to title", session.distance());
                    ctx.request_transition(RunnerScene::Title);
                    self.state = ActionState::Leaving;
                }
            }
            ActionState::Halted => {
                if !overlay_loaded {
                    ctx.request_transition(RunnerScene::Title);
                    self.state = ActionState::Leaving;
                }
            }
            ActionState::Starting | ActionState::Leaving => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackConfig;
    use crate::core::clock::FrameTick;
    use crate::core::record::MemoryRecordStore;
    use crate::core::scene::{InitState, SceneLinks, TransitionQueue};
    use crate::core::session::{LogHud, RunnerCharacter, SessionPhase};
    use crate::core::track::SegmentTemplate;
    use glam::Vec3;

    fn config() -> Rc<RunnerConfig> {
        Rc::new(RunnerConfig {
            track: TrackConfig {
                seed: Some(3),
                track_segments: vec![SegmentTemplate::new("road", Vec3::new(0.0, 0.0, 20.0))],
                obstacle_segments: vec![SegmentTemplate::new("cones", Vec3::new(0.0, 0.0, 10.0))],
                ..TrackConfig::default()
            },
            ..RunnerConfig::default()
        })
    }

    fn deps(config: &RunnerConfig) -> RunnerDeps {
        let player_config = config.player.clone();
        RunnerDeps::default()
            .with_player(move || Box::new(RunnerCharacter::new(&player_config)))
            .with_hud(|| Box::new(LogHud::new()))
            .with_records(|| Box::new(MemoryRecordStore::new()))
    }

    fn enter(scene: &mut ActionScene, queue: &mut TransitionQueue<RunnerScene>) -> SceneLinks {
        let mut links = SceneLinks::new();
        let mut ctx = SceneContext::new(FrameTick::new(0, 0.0), &[], queue, &mut links);
        scene.on_enter(&mut ctx);
        links
    }

    fn update(scene: &mut ActionScene, frame: u64, loaded: &[RunnerScene], queue: &mut TransitionQueue<RunnerScene>) {
        let mut links = SceneLinks::new();
        let mut ctx = SceneContext::new(FrameTick::new(frame, 0.1), loaded, queue, &mut links);
        scene.update(&mut ctx);
    }

    #[test]
    fn builds_session_and_waits_for_overlay() {
        let config = config();
        let mut scene = ActionScene::new(Rc::clone(&config), deps(&config));
        let mut queue = TransitionQueue::new();

        let links = enter(&mut scene, &mut queue);
        assert!(links.init.is_ready());

        update(&mut scene, 1, &[RunnerScene::Action, RunnerScene::Loading], &mut queue);
        assert_eq!(scene.session().map(|s| s.phase()), Some(SessionPhase::FadeWait));

        update(&mut scene, 2, &[RunnerScene::Action], &mut queue);
        assert_eq!(scene.session().map(|s| s.phase()), Some(SessionPhase::CountDown));
        assert!(queue.is_empty());
    }

    #[test]
    fn halted_scene_leaves_once_overlay_is_gone() {
        let config = config();
        let mut deps = deps(&config);
        deps.hud = None;
        let mut scene = ActionScene::new(config, deps);
        let mut queue = TransitionQueue::new();

        let links = enter(&mut scene, &mut queue);
        match links.init.state() {
            InitState::Failed(reason) => assert!(reason.contains("hud"), "{}", reason),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(scene.session().is_none());

        update(&mut scene, 1, &[RunnerScene::Action, RunnerScene::Loading], &mut queue);
        assert!(queue.is_empty());

        update(&mut scene, 2, &[RunnerScene::Action], &mut queue);
        update(&mut scene, 3, &[RunnerScene::Action], &mut queue);
        let requests = queue.take();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, RunnerScene::Title);
    }
}
