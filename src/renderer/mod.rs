//! Rendering module
//!
//! The game describes each frame as a handful of draw calls in playfield
//! coordinates; a [`Renderer`] decides how that reaches the screen.

pub mod scene;
pub mod terminal;

use glam::Vec2;

use crate::platform::PlatformError;

pub use scene::{draw_game_over, draw_menu, draw_round};
pub use terminal::TerminalRenderer;

/// Images the game can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Ship,
    /// Obstacle with its cosmetic variant index
    Obstacle(u8),
    Explosion,
}

/// Full-screen background for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    /// Title screen background
    Menu,
    /// In-round background
    Playfield,
    /// Solid black (game over)
    Black,
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors for game elements
pub mod colors {
    use super::Rgb;

    pub const TEXT: Rgb = Rgb(255, 255, 255);
    pub const HIGH_SCORE: Rgb = Rgb(255, 255, 0);
    pub const GAME_OVER: Rgb = Rgb(255, 0, 0);
    pub const PROJECTILE: Rgb = Rgb(255, 0, 0);
}

/// Font size for text draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Large,
}

/// Horizontal anchoring of a text draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `pos` is the left edge
    Left,
    /// `pos` is the horizontal centre
    Center,
}

/// Draw target for one frame at a time
pub trait Renderer {
    /// Start a new frame over the given background
    fn begin_frame(&mut self, backdrop: Backdrop);

    /// Draw an image centred on `pos`, rotated by `rotation` degrees
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, rotation: f32);

    /// Draw a filled circle
    fn draw_circle(&mut self, pos: Vec2, color: Rgb, radius: f32);

    /// Draw a line of text; `pos.y` is the top of the line
    fn draw_text(&mut self, text: &str, pos: Vec2, align: Align, size: TextSize, color: Rgb);

    /// Show the finished frame
    fn present(&mut self) -> Result<(), PlatformError>;
}
