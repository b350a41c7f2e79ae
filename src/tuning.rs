//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads comes from a [`Tuning`] value,
//! so a round can be played (or tested) on a different field size or pace
//! without touching the code.

use std::fmt;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay constants for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield width in pixels
    pub field_width: f32,
    /// Playfield height in pixels
    pub field_height: f32,

    /// Side of the ship's square bounding box
    pub ship_size: f32,
    /// Degrees added per rotate command
    pub ship_rotation_speed: f32,
    /// Velocity added per thrust command
    pub ship_acceleration: f32,
    /// Velocity magnitude cap
    pub ship_max_speed: f32,

    pub projectile_speed: f32,
    pub projectile_radius: f32,
    /// In-flight projectile cap
    pub max_projectiles: usize,

    /// Side of an obstacle's square bounding box
    pub obstacle_size: f32,
    pub obstacle_min_speed: f32,
    pub obstacle_max_speed: f32,
    /// Live obstacle population
    pub obstacle_count: usize,
    /// Number of cosmetic sprite variants
    pub obstacle_variants: u8,

    /// Explosion lifetime in frames
    pub effect_frames: u32,
    /// Score per destroyed obstacle
    pub hit_reward: u64,
    /// Round length in whole seconds
    pub round_secs: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            ship_size: SHIP_SIZE,
            ship_rotation_speed: SHIP_ROTATION_SPEED,
            ship_acceleration: SHIP_ACCELERATION,
            ship_max_speed: SHIP_MAX_SPEED,

            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
            max_projectiles: MAX_PROJECTILES,

            obstacle_size: OBSTACLE_SIZE,
            obstacle_min_speed: OBSTACLE_MIN_SPEED,
            obstacle_max_speed: OBSTACLE_MAX_SPEED,
            obstacle_count: OBSTACLE_COUNT,
            obstacle_variants: OBSTACLE_VARIANTS,

            effect_frames: EFFECT_FRAMES,
            hit_reward: HIT_REWARD,
            round_secs: ROUND_SECS,
        }
    }
}

/// A tuning value that would break a simulation invariant
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// Field too small to hold the ship's bounding box
    FieldTooSmall {
        width: f32,
        height: f32,
        ship_size: f32,
    },
    /// A value that must be strictly positive was not
    NotPositive(&'static str),
    /// Obstacle speed range is inverted
    SpeedRange { min: f32, max: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldTooSmall {
                width,
                height,
                ship_size,
            } => write!(
                f,
                "field {width}x{height} cannot hold a ship of size {ship_size}"
            ),
            Self::NotPositive(name) => write!(f, "`{name}` must be greater than zero"),
            Self::SpeedRange { min, max } => {
                write!(f, "obstacle speed range {min}..={max} is empty")
            }
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Check the values the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("ship_size", self.ship_size),
            ("ship_max_speed", self.ship_max_speed),
            ("projectile_speed", self.projectile_speed),
            ("projectile_radius", self.projectile_radius),
            ("obstacle_size", self.obstacle_size),
        ];
        for (name, value) in positive {
            // Also rejects NaN
            if !(value > 0.0) {
                return Err(TuningError::NotPositive(name));
            }
        }
        if self.obstacle_count == 0 {
            return Err(TuningError::NotPositive("obstacle_count"));
        }
        if self.obstacle_variants == 0 {
            return Err(TuningError::NotPositive("obstacle_variants"));
        }
        if self.effect_frames == 0 {
            return Err(TuningError::NotPositive("effect_frames"));
        }
        if self.round_secs == 0 {
            return Err(TuningError::NotPositive("round_secs"));
        }
        if self.obstacle_min_speed < 0.0 || self.obstacle_min_speed > self.obstacle_max_speed {
            return Err(TuningError::SpeedRange {
                min: self.obstacle_min_speed,
                max: self.obstacle_max_speed,
            });
        }
        if self.ship_size > self.field_width || self.ship_size > self.field_height {
            return Err(TuningError::FieldTooSmall {
                width: self.field_width,
                height: self.field_height,
                ship_size: self.ship_size,
            });
        }
        Ok(())
    }

    /// Playfield dimensions as a vector
    #[inline]
    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Playfield centre (ship spawn point)
    #[inline]
    pub fn field_center(&self) -> Vec2 {
        self.field_size() / 2.0
    }

    /// Total round length
    #[inline]
    pub fn round_duration(&self) -> Duration {
        Duration::from_secs(self.round_secs)
    }
}
