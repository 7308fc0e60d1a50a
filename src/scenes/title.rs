//=========================================================================
// Title Scene
//=========================================================================
//
//   FadeWait ──overlay gone──► Menu ──start pressed──► Leaving
//
// The leaderboard is read once the overlay is gone, padded with zeros to
// RECORD_LIMIT entries.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{RunnerDeps, RunnerScene};
use crate::core::clock::FrameTick;
use crate::core::record::{RecordStore, RECORD_LIMIT};
use crate::core::scene::{Scene, SceneContext};
use crate::core::session::format_distance;

//=== MenuInput ===========================================================

/// Title menu input. Returns true on the frame the player confirms
/// "start".
pub trait MenuInput {
    fn start_pressed(&mut self, tick: FrameTick) -> bool;
}

impl<F> MenuInput for F
where
    F: FnMut(FrameTick) -> bool,
{
    fn start_pressed(&mut self, tick: FrameTick) -> bool {
        self(tick)
    }
}

//=== TitleScene ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitlePhase {
    FadeWait,
    Menu,
    Leaving,
}

pub struct TitleScene {
    phase: TitlePhase,
    input: Option<Box<dyn MenuInput>>,
    records: Option<Box<dyn RecordStore>>,
    leaderboard: Vec<f32>,
}

impl TitleScene {
    pub fn new(deps: &RunnerDeps) -> Self {
        Self {
            phase: TitlePhase::FadeWait,
            input: deps.menu.as_ref().map(|factory| factory()),
            records: deps.records.as_ref().map(|factory| factory()),
            leaderboard: Vec::new(),
        }
    }

    /// Distances shown on the title screen, always `RECORD_LIMIT` long.
    pub fn leaderboard(&self) -> &[f32] {
        &self.leaderboard
    }

    fn read_leaderboard(&mut self) {
        let mut board = match self.records.as_ref().map(|store| store.load()) {
            Some(Ok(records)) => records,
            Some(Err(e)) => {
                warn!("Failed to read records: {}", e);
                Vec::new()
            }
            None => {
                warn!("No record store; showing an empty leaderboard");
                Vec::new()
            }
        };
        board.truncate(RECORD_LIMIT);
        board.resize(RECORD_LIMIT, 0.0);

        for (rank, distance) in board.iter().enumerate() {
            info!("#{} {}", rank + 1, format_distance(*distance));
        }
        self.leaderboard = board;
    }
}

impl Scene<RunnerScene> for TitleScene {
    fn on_enter(&mut self, ctx: &mut SceneContext<'_, RunnerScene>) {
        ctx.signal_initialized();
    }

    fn update(&mut self, ctx: &mut SceneContext<'_, RunnerScene>) {
        match self.phase {
            TitlePhase::FadeWait => {
                if ctx.is_loaded(RunnerScene::Loading) {
                    return;
                }
                self.read_leaderboard();
                self.phase = TitlePhase::Menu;
            }
            TitlePhase::Menu => {
                let Some(input) = self.input.as_mut() else {
                    return;
                };
                if input.start_pressed(ctx.tick) {
                    debug!("Start pressed at frame {}", ctx.tick.frame);
                    ctx.request_transition(RunnerScene::Action);
                    self.phase = TitlePhase::Leaving;
                }
            }
            TitlePhase::Leaving => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::MemoryRecordStore;
    use crate::core::scene::{SceneLinks, TransitionQueue};

    fn deps(records: &MemoryRecordStore) -> RunnerDeps {
        let records = records.clone();
        RunnerDeps::default()
            .with_records(move || Box::new(records.clone()))
            .with_menu(|| Box::new(|tick: FrameTick| tick.frame >= 3))
    }

    fn update(scene: &mut TitleScene, frame: u64, loaded: &[RunnerScene], queue: &mut TransitionQueue<RunnerScene>) {
        let mut links = SceneLinks::new();
        let mut ctx = SceneContext::new(FrameTick::new(frame, 0.016), loaded, queue, &mut links);
        scene.update(&mut ctx);
    }

    #[test]
    fn leaderboard_is_padded_after_overlay_leaves() {
        let records = MemoryRecordStore::with_records([42.0, 7.5]);
        let mut scene = TitleScene::new(&deps(&records));
        let mut queue = TransitionQueue::new();

        update(&mut scene, 1, &[RunnerScene::Title, RunnerScene::Loading], &mut queue);
        assert!(scene.leaderboard().is_empty());

        update(&mut scene, 2, &[RunnerScene::Title], &mut queue);
        assert_eq!(scene.leaderboard(), &[42.0, 7.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn start_requests_action_once() {
        let records = MemoryRecordStore::new();
        let mut scene = TitleScene::new(&deps(&records));
        let mut queue = TransitionQueue::new();

        for frame in 1..=3 {
            update(&mut scene, frame, &[RunnerScene::Title], &mut queue);
        }
        assert_eq!(queue.len(), 1);

        update(&mut scene, 4, &[RunnerScene::Title], &mut queue);
        let requests = queue.take();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].target, RunnerScene::Action);
        assert_eq!(requests[0].frame, 3);
    }

    #[test]
    fn init_is_signalled_on_enter() {
        let mut scene = TitleScene::new(&RunnerDeps::default());
        let mut queue = TransitionQueue::new();
        let mut links = SceneLinks::new();
        let mut ctx = SceneContext::new(FrameTick::new(0, 0.0), &[], &mut queue, &mut links);
        scene.on_enter(&mut ctx);
        assert!(links.init.is_ready());
    }
}
