//! Astrocrash - a time-limited asteroid shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, round clock)
//! - `session`: Menu / Playing / GameOver state machine
//! - `renderer`: Drawing interface and the terminal renderer
//! - `platform`: Input interface and the terminal input reader
//! - `audio`: Sound interface
//! - `highscores`: Best-score persistence
//! - `settings` / `tuning`: Configuration and game balance

pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::{FileScoreStore, ScoreStore};
pub use session::{Flow, GameSession, Screen};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`] and [`Settings`])
pub mod consts {
    /// Target frame rate
    pub const FPS: u32 = 60;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Ship defaults
    pub const SHIP_SIZE: f32 = 50.0;
    /// Degrees per frame while a rotate key is held
    pub const SHIP_ROTATION_SPEED: f32 = 3.0;
    pub const SHIP_ACCELERATION: f32 = 0.2;
    pub const SHIP_MAX_SPEED: f32 = 5.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    /// Simultaneously alive projectiles
    pub const MAX_PROJECTILES: usize = 5;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 60.0;
    pub const OBSTACLE_MIN_SPEED: f32 = 1.0;
    pub const OBSTACLE_MAX_SPEED: f32 = 3.0;
    pub const OBSTACLE_COUNT: usize = 5;
    /// Number of cosmetic sprite variants
    pub const OBSTACLE_VARIANTS: u8 = 4;

    /// Explosion lifetime in frames
    pub const EFFECT_FRAMES: u32 = 15;

    /// Score per destroyed obstacle
    pub const HIT_REWARD: u64 = 10;

    /// Round length (3 minutes)
    pub const ROUND_SECS: u64 = 3 * 60;

    /// Default high score file (plain integer)
    pub const HIGH_SCORE_FILE: &str = "highscore.txt";
    /// Default settings file
    pub const SETTINGS_FILE: &str = "astrocrash.json";
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Unit vector for a heading in degrees (0° = +x, 90° = +y, screen y points down)
#[inline]
pub fn heading_to_direction(degrees: f32) -> Vec2 {
    let rad = normalize_degrees(degrees).to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
    }

    #[test]
    fn test_heading_to_direction() {
        let right = heading_to_direction(0.0);
        assert!((right - Vec2::X).length() < 1e-6);

        let down = heading_to_direction(90.0);
        assert!((down - Vec2::Y).length() < 1e-6);

        // Unbounded headings map to the same direction
        let wrapped = heading_to_direction(90.0 + 360.0 * 7.0);
        assert!((wrapped - down).length() < 1e-4);
    }
}
