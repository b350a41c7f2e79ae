//! Screen layouts
//!
//! Turns game state into draw calls. Positions are in playfield pixels.

use glam::Vec2;

use super::{Align, Backdrop, Renderer, Sprite, TextSize, colors};
use crate::sim::GameState;

/// Title screen
pub fn draw_menu(r: &mut impl Renderer, field: Vec2, high_score: u64) {
    let cx = field.x / 2.0;
    r.begin_frame(Backdrop::Menu);
    r.draw_text(
        "ASTROCRASH",
        Vec2::new(cx, 150.0),
        Align::Center,
        TextSize::Large,
        colors::TEXT,
    );
    r.draw_text(
        "Press ENTER to Start",
        Vec2::new(cx, 300.0),
        Align::Center,
        TextSize::Small,
        colors::TEXT,
    );
    r.draw_text(
        "Press ESC to Quit",
        Vec2::new(cx, 350.0),
        Align::Center,
        TextSize::Small,
        colors::TEXT,
    );
    r.draw_text(
        &format!("High Score: {high_score}"),
        Vec2::new(cx, 450.0),
        Align::Center,
        TextSize::Small,
        colors::HIGH_SCORE,
    );
}

/// One in-round frame: entities, then the HUD on top
pub fn draw_round(r: &mut impl Renderer, state: &GameState) {
    let field = state.field();
    r.begin_frame(Backdrop::Playfield);

    // Sprites rotate counter-clockwise for positive angles; heading grows clockwise
    r.draw_sprite(Sprite::Ship, state.ship.pos, -state.ship.heading);
    for projectile in &state.projectiles {
        r.draw_circle(projectile.pos, colors::PROJECTILE, projectile.radius);
    }
    for obstacle in &state.obstacles {
        r.draw_sprite(Sprite::Obstacle(obstacle.variant), obstacle.pos, 0.0);
    }
    for effect in &state.effects {
        r.draw_sprite(Sprite::Explosion, effect.pos, 0.0);
    }

    r.draw_text(
        &format!("Score: {}", state.score),
        Vec2::new(10.0, 10.0),
        Align::Left,
        TextSize::Small,
        colors::TEXT,
    );
    r.draw_text(
        &format!("Time: {}", state.clock.format_remaining()),
        Vec2::new(field.x - 150.0, 10.0),
        Align::Left,
        TextSize::Small,
        colors::TEXT,
    );
}

/// Final score screen
pub fn draw_game_over(r: &mut impl Renderer, field: Vec2, score: u64) {
    let cx = field.x / 2.0;
    r.begin_frame(Backdrop::Black);
    r.draw_text(
        "GAME OVER",
        Vec2::new(cx, 200.0),
        Align::Center,
        TextSize::Large,
        colors::GAME_OVER,
    );
    r.draw_text(
        &format!("Your Score: {score}"),
        Vec2::new(cx, 300.0),
        Align::Center,
        TextSize::Small,
        colors::TEXT,
    );
    r.draw_text(
        "Press ENTER to return to menu",
        Vec2::new(cx, 400.0),
        Align::Center,
        TextSize::Small,
        colors::TEXT,
    );
}
