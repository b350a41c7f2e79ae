//! Per-frame simulation step
//!
//! One call advances the round by exactly one frame of movement; the clock is
//! advanced by the measured frame time.

use std::time::Duration;

use super::collision::resolve_collisions;
use super::state::{GameState, Turn};

/// Held-key intents for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

/// Advance the round by one frame
///
/// Order: ship intents, projectiles (off-screen ones dropped), obstacles,
/// collisions, effects, clock. Does nothing once the countdown has run out.
pub fn tick(state: &mut GameState, input: &TickInput, dt: Duration) {
    if state.is_time_up() {
        return;
    }

    state.time_ticks += 1;
    let field = state.field();

    // Ship
    if input.rotate_left {
        state.ship.rotate(Turn::Left);
    }
    if input.rotate_right {
        state.ship.rotate(Turn::Right);
    }
    if input.thrust {
        state.ship.thrust(field);
    }
    if input.fire {
        state.try_fire();
    }

    // Projectiles
    for projectile in &mut state.projectiles {
        projectile.update();
    }
    state.projectiles.retain(|p| !p.is_off_screen(field));

    // Obstacles
    for obstacle in &mut state.obstacles {
        obstacle.update(field);
    }

    let hits = resolve_collisions(state);
    if hits > 0 {
        log::debug!("{} hit(s), score {}", hits, state.score);
    }

    // Effects
    for effect in &mut state.effects {
        effect.update();
    }
    state.effects.retain(|e| !e.done);

    state.clock.advance(dt);
    if state.is_time_up() {
        log::info!(
            "Time up after {} ticks, score {}",
            state.time_ticks,
            state.score
        );
    }
}
