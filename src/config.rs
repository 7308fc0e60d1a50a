//=========================================================================
// Runner Configuration
//=========================================================================
//
// TOML-backed tuning values for every subsystem.
//
// Layout:
//   [engine]   tick rate, simulated scene load latency
//   [track]    window sizes, spacing, difficulty curve, segment templates
//   [session]  countdown / finish timings, distance scale
//   [player]   speeds and speed-up increments
//   [overlay]  loading overlay fade durations
//   [records]  record file location
//
// Every section falls back to the defaults below, so an empty document
// is a valid configuration.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

//=== Internal Dependencies ===============================================

use crate::core::track::SegmentTemplate;
use crate::error::{RunnerError, RunnerResult};

//=== RunnerConfig ========================================================

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub engine: EngineConfig,
    pub track: TrackConfig,
    pub session: SessionConfig,
    pub player: PlayerConfig,
    pub overlay: OverlayConfig,
    pub records: RecordConfig,
}

impl RunnerConfig {
    /// Parses and validates a configuration document.
    pub fn from_toml_str(source: &str) -> RunnerResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> RunnerResult<Self> {
        let path = path.as_ref();
        debug!("Loading runner config from {}", path.display());
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Rejects values the state machines cannot work with.
    pub fn validate(&self) -> RunnerResult<()> {
        if !(self.engine.tps > 0.0) {
            return Err(invalid("engine.tps", format!("must be positive, got {}", self.engine.tps)));
        }
        self.track.validate()?;
        non_negative("session.countdown_step_secs", self.session.countdown_step_secs)?;
        non_negative("session.finish_delay_secs", self.session.finish_delay_secs)?;
        non_negative("session.distance_scale", self.session.distance_scale)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> RunnerError {
    RunnerError::InvalidConfig { field, reason }
}

// NaN and infinity fail here as well as negatives
fn non_negative(field: &'static str, value: f32) -> RunnerResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite and not negative, got {}", value)))
    }
}

//=== EngineConfig ========================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logic ticks per second.
    pub tps: f64,
    /// Frames an asynchronous scene load or unload takes to complete.
    pub load_latency_frames: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tps: 60.0,
            load_latency_frames: 1,
        }
    }
}

//=== TrackConfig =========================================================

/// Streaming window and difficulty tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Resident track segments.
    pub track_count: usize,
    /// Resident obstacle segments.
    pub obstacle_count: usize,
    /// Forward spacing unit for obstacles; also the clear stretch at start.
    pub obstacle_interval: f32,
    /// Forward distance per difficulty level.
    pub level_interval: f32,
    /// Highest displayed difficulty level.
    pub level_rank_max: u32,
    /// Fixed seed for segment selection; entropy when absent.
    pub seed: Option<u64>,
    pub track_segments: Vec<SegmentTemplate>,
    pub obstacle_segments: Vec<SegmentTemplate>,
}

impl TrackConfig {
    fn validate(&self) -> RunnerResult<()> {
        if self.level_rank_max == 0 {
            return Err(invalid("track.level_rank_max", "must be at least 1".into()));
        }
        if self.track_count == 0 {
            return Err(invalid("track.track_count", "must be at least 1".into()));
        }
        if self.obstacle_count == 0 {
            return Err(invalid("track.obstacle_count", "must be at least 1".into()));
        }
        if !(self.level_interval.is_finite() && self.level_interval > 0.0) {
            return Err(invalid(
                "track.level_interval",
                format!("must be positive, got {}", self.level_interval),
            ));
        }
        non_negative("track.obstacle_interval", self.obstacle_interval)
    }
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            track_count: 5,
            obstacle_count: 10,
            obstacle_interval: 50.0,
            level_interval: 100.0,
            level_rank_max: 10,
            seed: None,
            track_segments: Vec::new(),
            obstacle_segments: Vec::new(),
        }
    }
}

//=== SessionConfig =======================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub countdown_from: u32,
    pub countdown_step_secs: f32,
    pub finish_delay_secs: f32,
    /// Reported distance per unit of forward position.
    pub distance_scale: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            countdown_from: 3,
            countdown_step_secs: 1.0,
            finish_delay_secs: 4.0,
            distance_scale: 0.5,
        }
    }
}

//=== PlayerConfig ========================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub forward_speed: f32,
    pub animation_speed: f32,
    /// Added to `forward_speed` on each speed-up.
    pub speed_step: f32,
    /// Added to `animation_speed` on each speed-up.
    pub animation_step: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            forward_speed: 7.0,
            animation_speed: 1.5,
            speed_step: 1.0,
            animation_step: 0.2,
        }
    }
}

//=== OverlayConfig =======================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub fade_in_secs: f32,
    pub fade_out_secs: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fade_in_secs: 0.5,
            fade_out_secs: 0.5,
        }
    }
}

//=== RecordConfig ========================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RecordConfig {
    pub path: PathBuf,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("record.dat"),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
