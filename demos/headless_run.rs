//=========================================================================
// Headless Run
//=========================================================================
//
// Plays title → action → title rounds without any presentation layer.
// The runner crashes at a random distance each round; distances land in
// the record file.
//
//   cargo run --example headless_run [config.toml] [rounds]
//
//=========================================================================

use std::cell::Cell;
use std::rc::Rc;

use log::{error, info};
use rand::Rng;

use runner_core::core::record::{FileRecordStore, RecordStore};
use runner_core::core::session::{CollisionKind, LogHud, PlayerControl, RunnerCharacter};
use runner_core::core::track::SegmentTemplate;
use runner_core::prelude::*;

/// Runner that hits an obstacle at a fixed forward position.
struct Autopilot {
    runner: RunnerCharacter,
    crash_at: f32,
}

impl PlayerControl for Autopilot {
    fn forward_position(&self) -> f32 {
        self.runner.forward_position()
    }

    fn is_damaged(&self) -> bool {
        self.runner.is_damaged()
    }

    fn set_movement_enabled(&mut self, enabled: bool) {
        self.runner.set_movement_enabled(enabled);
    }

    fn speed_up(&mut self) {
        self.runner.speed_up();
    }

    fn advance(&mut self, dt: f32) {
        self.runner.advance(dt);
        if self.runner.forward_position() >= self.crash_at {
            self.runner.collide(CollisionKind::Obstacle);
        }
    }
}

fn default_segments(config: &mut RunnerConfig) {
    if config.track.track_segments.is_empty() {
        config.track.track_segments = vec![
            SegmentTemplate::new("road_straight", glam::Vec3::new(0.0, 0.0, 30.0)),
            SegmentTemplate::new("road_long", glam::Vec3::new(0.0, 0.0, 60.0)),
        ];
    }
    if config.track.obstacle_segments.is_empty() {
        config.track.obstacle_segments = vec![
            SegmentTemplate::new("cones", glam::Vec3::new(0.0, 0.0, 10.0)),
            SegmentTemplate::new("barrier", glam::Vec3::new(0.0, 0.0, 20.0)),
        ];
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => match RunnerConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                error!("Cannot load {}: {}", path, e);
                return;
            }
        },
        None => RunnerConfig::default(),
    };
    let rounds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2);
    default_segments(&mut config);

    let player_config = config.player.clone();
    let records_path = config.records.path.clone();
    let started = Rc::new(Cell::new(0u32));
    let menu_started = Rc::clone(&started);

    let deps = RunnerDeps::headless(&config)
        .with_player(move || {
            let crash_at = rand::thread_rng().gen_range(150.0..600.0);
            Box::new(Autopilot {
                runner: RunnerCharacter::new(&player_config),
                crash_at,
            })
        })
        .with_hud(|| Box::new(LogHud::new()))
        .with_menu(move || {
            let started = Rc::clone(&menu_started);
            Box::new(move |_: FrameTick| {
                if started.get() >= rounds {
                    return false;
                }
                started.set(started.get() + 1);
                true
            })
        });

    let mut engine = match build_engine(&config, deps) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Cannot build engine: {}", e);
            return;
        }
    };

    // Ends once every round has been played and the title is back up
    let dt = (1.0 / config.engine.tps) as f32;
    loop {
        if engine.tick(dt) == TickControl::Exit {
            break;
        }
        let back_on_title = engine.active_scene() == Some(RunnerScene::Title) && !engine.is_transitioning();
        if started.get() >= rounds && back_on_title && engine.frame() > 1 {
            break;
        }
    }

    info!("Played {} rounds in {} frames", started.get(), engine.frame());
    match FileRecordStore::new(records_path).load() {
        Ok(records) => info!("Records: {:?}", records),
        Err(e) => error!("Cannot read records: {}", e),
    }
}
