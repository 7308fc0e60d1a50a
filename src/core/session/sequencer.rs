//=========================================================================
// Gameplay Sequencer
//=========================================================================
//
// Per-session state machine, advanced once per frame.
//
//   FadeWait ──overlay unloaded──► CountDown ──count reaches 0──► Playing
//                                                                   │
//   Idle ◄──finish delay elapsed── Finished ◄──player damaged───────┘
//
// Playing, each frame:
//   1. distance = forward * distance_scale     → HUD
//   2. clamped level                           → HUD
//   3. unclamped level changed and > rank max  → player speed-up
//   4. track generator refill
//   5. damage flag                             → Finished
//
// Finished saves the distance once, then waits `finish_delay_secs` and
// emits `SessionSignal::ReturnToTitle` exactly once.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{PlayerControl, SessionHud};
use crate::config::SessionConfig;
use crate::core::clock::{Countdown, FrameTick};
use crate::core::record::RecordStore;
use crate::core::track::TrackGenerator;
use crate::error::{RunnerError, RunnerResult};

//=== SessionPhase ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    FadeWait,
    CountDown,
    Playing,
    Finished,
    Idle,
}

/// What the owning scene should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    Continue,
    ReturnToTitle,
}

//=== SessionBuilder ======================================================

/// Collects the session's collaborators and validates them.
///
/// `build` fails with [`RunnerError::MissingCollaborator`] for any
/// collaborator never provided and with [`RunnerError::EmptyCatalog`] when
/// either segment catalog is empty. A window left empty by the initial
/// fill (zero target length) is [`RunnerError::EmptyWindow`]. On success
/// the track windows are already filled.
pub struct SessionBuilder {
    config: SessionConfig,
    generator: Option<TrackGenerator>,
    player: Option<Box<dyn PlayerControl>>,
    hud: Option<Box<dyn SessionHud>>,
    records: Option<Box<dyn RecordStore>>,
}

impl SessionBuilder {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            generator: None,
            player: None,
            hud: None,
            records: None,
        }
    }

    pub fn with_generator(mut self, generator: TrackGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_player(mut self, player: Box<dyn PlayerControl>) -> Self {
        self.player = Some(player);
        self
    }

    pub fn with_hud(mut self, hud: Box<dyn SessionHud>) -> Self {
        self.hud = Some(hud);
        self
    }

    pub fn with_records(mut self, records: Box<dyn RecordStore>) -> Self {
        self.records = Some(records);
        self
    }

    pub fn build(self) -> RunnerResult<GameplaySequencer> {
        let mut generator = self.generator.ok_or(RunnerError::MissingCollaborator("track generator"))?;
        let player = self.player.ok_or(RunnerError::MissingCollaborator("player"))?;
        let hud = self.hud.ok_or(RunnerError::MissingCollaborator("hud"))?;
        let records = self.records.ok_or(RunnerError::MissingCollaborator("record store"))?;

        if generator.track_catalog().is_empty() {
            return Err(RunnerError::EmptyCatalog { window: "track" });
        }
        if generator.obstacle_catalog().is_empty() {
            return Err(RunnerError::EmptyCatalog { window: "obstacle" });
        }

        generator.fill_initial();
        if generator.track().is_empty() {
            return Err(RunnerError::EmptyWindow { window: "track" });
        }
        if generator.obstacles().is_empty() {
            return Err(RunnerError::EmptyWindow { window: "obstacle" });
        }
        let last_level = generator.curve().level(player.forward_position());

        info!(
            "Session ready: {} track / {} obstacle segments resident",
            generator.track().len(),
            generator.obstacles().len()
        );

        Ok(GameplaySequencer {
            phase: SessionPhase::FadeWait,
            countdown_remaining: 0,
            timer: Countdown::new(self.config.countdown_step_secs),
            config: self.config,
            generator,
            player,
            hud,
            records,
            last_level,
            distance: 0.0,
            speed_ups: 0,
        })
    }
}

//=== GameplaySequencer ===================================================

pub struct GameplaySequencer {
    phase: SessionPhase,
    config: SessionConfig,
    countdown_remaining: u32,
    timer: Countdown,
    generator: TrackGenerator,
    player: Box<dyn PlayerControl>,
    hud: Box<dyn SessionHud>,
    records: Box<dyn RecordStore>,
    /// Last unclamped level that triggered a speed-up (initially the
    /// clamped starting level).
    last_level: u32,
    distance: f32,
    speed_ups: u32,
}

impl GameplaySequencer {
    //--- Queries ----------------------------------------------------------

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Reported distance of the current or finished run.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn speed_ups(&self) -> u32 {
        self.speed_ups
    }

    pub fn generator(&self) -> &TrackGenerator {
        &self.generator
    }

    pub fn player(&self) -> &dyn PlayerControl {
        self.player.as_ref()
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the session by one frame.
    ///
    /// `overlay_loaded` tells whether the loading overlay scene is still
    /// present; the countdown does not start until it is gone.
    pub fn tick(&mut self, tick: FrameTick, overlay_loaded: bool) -> SessionSignal {
        self.player.advance(tick.dt);

        match self.phase {
            SessionPhase::FadeWait => {
                if !overlay_loaded {
                    self.begin_countdown();
                }
            }
            SessionPhase::CountDown => self.tick_countdown(tick.dt),
            SessionPhase::Playing => self.tick_playing(),
            SessionPhase::Finished => {
                if self.timer.advance(tick.dt) {
                    self.enter(SessionPhase::Idle);
                    return SessionSignal::ReturnToTitle;
                }
            }
            SessionPhase::Idle => {}
        }

        SessionSignal::Continue
    }

    //--- Internal Helpers -------------------------------------------------

    fn begin_countdown(&mut self) {
        self.countdown_remaining = self.config.countdown_from;
        self.timer = Countdown::new(self.config.countdown_step_secs);
        self.enter(SessionPhase::CountDown);

        if self.countdown_remaining == 0 {
            self.begin_playing();
        } else {
            self.hud.show_countdown(self.countdown_remaining);
        }
    }

    fn tick_countdown(&mut self, dt: f32) {
        if !self.timer.advance(dt) {
            return;
        }
        self.countdown_remaining = self.countdown_remaining.saturating_sub(1);
        if self.countdown_remaining == 0 {
            self.begin_playing();
        } else {
            self.hud.show_countdown(self.countdown_remaining);
            self.timer.rearm();
        }
    }

    fn begin_playing(&mut self) {
        self.hud.show_start();
        self.player.set_movement_enabled(true);
        self.enter(SessionPhase::Playing);
    }

    fn tick_playing(&mut self) {
        let forward = self.player.forward_position();
        let curve = *self.generator.curve();

        self.distance = forward * self.config.distance_scale;
        self.hud.show_distance(self.distance);
        self.hud.show_level(curve.level(forward));

        let level = curve.level_unclamped(forward);
        if level != self.last_level && level > curve.rank_max() {
            self.player.speed_up();
            self.last_level = level;
            self.speed_ups += 1;
            info!("Speed-up at level {} (#{})", level, self.speed_ups);
        }

        let report = self.generator.refill_if_needed(forward);
        if !report.is_empty() {
            debug!(
                "Refilled {} track / {} obstacle segments at z = {:.2}",
                report.track_retired, report.obstacles_retired, forward
            );
        }

        if self.player.is_damaged() {
            self.hud.show_finish();
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.enter(SessionPhase::Finished);
        if let Err(e) = self.records.save(self.distance) {
            warn!("Failed to save record {:.2}: {}", self.distance, e);
        }
        self.timer = Countdown::new(self.config.finish_delay_secs);
    }

    fn enter(&mut self, phase: SessionPhase) {
        debug!("Session phase {:?} → {:?}", self.phase, phase);
        self.phase = phase;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
