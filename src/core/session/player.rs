//=========================================================================
// Player Control
//=========================================================================
//
// The player collaborator seen by the gameplay sequencer, plus a
// kinematic runner that implements it without any physics.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::config::PlayerConfig;

//=== PlayerControl =======================================================

/// What the sequencer needs from the player character.
pub trait PlayerControl {
    /// Position along the running direction.
    fn forward_position(&self) -> f32;

    /// True once the player has hit an obstacle.
    fn is_damaged(&self) -> bool;

    fn set_movement_enabled(&mut self, enabled: bool);

    /// One speed increment past the displayed difficulty cap.
    fn speed_up(&mut self);

    /// Moves the player by one frame.
    fn advance(&mut self, _dt: f32) {}
}

//=== CollisionKind =======================================================

/// What the player ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Road,
    Obstacle,
}

//=== RunnerCharacter =====================================================

/// Runs straight ahead at `forward_speed` while enabled and undamaged.
#[derive(Debug, Clone)]
pub struct RunnerCharacter {
    position: Vec3,
    forward_speed: f32,
    animation_speed: f32,
    speed_step: f32,
    animation_step: f32,
    movement_enabled: bool,
    damaged: bool,
}

impl RunnerCharacter {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            position: Vec3::ZERO,
            forward_speed: config.forward_speed,
            animation_speed: config.animation_speed,
            speed_step: config.speed_step,
            animation_step: config.animation_step,
            movement_enabled: false,
            damaged: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward_speed(&self) -> f32 {
        self.forward_speed
    }

    pub fn animation_speed(&self) -> f32 {
        self.animation_speed
    }

    pub fn is_movement_enabled(&self) -> bool {
        self.movement_enabled
    }

    /// Road contacts are ignored; anything else damages the runner.
    pub fn collide(&mut self, kind: CollisionKind) {
        if kind == CollisionKind::Road || self.damaged {
            return;
        }
        self.damaged = true;
        info!("Runner hit an obstacle at z = {:.2}", self.position.z);
    }
}

impl PlayerControl for RunnerCharacter {
    fn forward_position(&self) -> f32 {
        self.position.z
    }

    fn is_damaged(&self) -> bool {
        self.damaged
    }

    fn set_movement_enabled(&mut self, enabled: bool) {
        self.movement_enabled = enabled;
    }

    fn speed_up(&mut self) {
        self.forward_speed += self.speed_step;
        self.animation_speed += self.animation_step;
        debug!(
            "Runner speed-up: forward {:.1}, animation {:.1}",
            self.forward_speed, self.animation_speed
        );
    }

    fn advance(&mut self, dt: f32) {
        if !self.movement_enabled || self.damaged {
            return;
        }
        self.position += Vec3::Z * self.forward_speed * dt;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
