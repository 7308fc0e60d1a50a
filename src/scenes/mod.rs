//=========================================================================
// Runner Scenes
//=========================================================================
//
// The game's three scenes and the wiring that puts them into an engine.
//
//   Title ──start pressed──► Action ──session finished──► Title
//     (both transitions run behind the Loading overlay)
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod title;

//=== External Dependencies ===============================================

use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::config::RunnerConfig;
use crate::core::clock::FrameTick;
use crate::core::loading::{LoadingScene, TimedOverlay};
use crate::core::record::{FileRecordStore, RecordStore};
use crate::core::scene::{Scene, SceneKey};
use crate::core::session::{LogHud, PlayerControl, RunnerCharacter, SessionHud};
use crate::engine::{Engine, EngineBuilder};
use crate::error::RunnerResult;

//=== Public API ==========================================================

pub use action::ActionScene;
pub use title::{MenuInput, TitleScene};

//=== RunnerScene =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunnerScene {
    Title,
    Action,
    Loading,
}

impl SceneKey for RunnerScene {}

//=== RunnerDeps ==========================================================

pub type PlayerFactory = Rc<dyn Fn() -> Box<dyn PlayerControl>>;
pub type HudFactory = Rc<dyn Fn() -> Box<dyn SessionHud>>;
pub type MenuFactory = Rc<dyn Fn() -> Box<dyn MenuInput>>;
pub type RecordFactory = Rc<dyn Fn() -> Box<dyn RecordStore>>;

/// Collaborator factories for the scenes. Each scene load builds fresh
/// collaborators; a factory left unset surfaces as a missing collaborator
/// when the scene that needs it starts.
#[derive(Clone, Default)]
pub struct RunnerDeps {
    pub player: Option<PlayerFactory>,
    pub hud: Option<HudFactory>,
    pub menu: Option<MenuFactory>,
    pub records: Option<RecordFactory>,
}

impl RunnerDeps {
    /// Kinematic runner, log HUD, file records and a menu that starts
    /// immediately.
    pub fn headless(config: &RunnerConfig) -> Self {
        let player_config = config.player.clone();
        let record_config = config.records.clone();

        Self::default()
            .with_player(move || Box::new(RunnerCharacter::new(&player_config)))
            .with_hud(|| Box::new(LogHud::new()))
            .with_menu(|| Box::new(|_: FrameTick| true))
            .with_records(move || Box::new(FileRecordStore::from_config(&record_config)))
    }

    pub fn with_player<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn PlayerControl> + 'static,
    {
        self.player = Some(Rc::new(factory));
        self
    }

    pub fn with_hud<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn SessionHud> + 'static,
    {
        self.hud = Some(Rc::new(factory));
        self
    }

    pub fn with_menu<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn MenuInput> + 'static,
    {
        self.menu = Some(Rc::new(factory));
        self
    }

    pub fn with_records<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn RecordStore> + 'static,
    {
        self.records = Some(Rc::new(factory));
        self
    }
}

//=== Wiring ==============================================================

/// Builds an engine with all runner scenes registered, starting at the
/// title scene.
pub fn build_engine(config: &RunnerConfig, deps: RunnerDeps) -> RunnerResult<Engine<RunnerScene>> {
    config.validate()?;

    let title_deps = deps.clone();
    let action_deps = deps;
    let action_config = Rc::new(config.clone());
    let overlay = config.overlay.clone();

    EngineBuilder::new()
        .with_tps(config.engine.tps)
        .with_load_latency(config.engine.load_latency_frames)
        .with_scene(RunnerScene::Title, move || {
            Box::new(TitleScene::new(&title_deps)) as Box<dyn Scene<RunnerScene>>
        })
        .with_scene(RunnerScene::Action, move || {
            Box::new(ActionScene::new(Rc::clone(&action_config), action_deps.clone()))
                as Box<dyn Scene<RunnerScene>>
        })
        .with_loading_scene(RunnerScene::Loading, move || {
            Box::new(LoadingScene::new(Box::new(TimedOverlay::from_config(&overlay))))
                as Box<dyn Scene<RunnerScene>>
        })
        .with_initial_scene(RunnerScene::Title)
        .build()
}

//=========================================================================
// Unit Tests
//=========================================================================
