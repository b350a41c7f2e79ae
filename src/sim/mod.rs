//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - One `tick` per frame, movement in per-frame units
//! - Seeded RNG only
//! - Stable iteration order (list order)
//! - No rendering, input or audio dependencies

pub mod bounds;
pub mod clock;
pub mod collision;
pub mod state;
pub mod tick;

pub use bounds::{Aabb, clamp_center, wrap_axis, wrap_point};
pub use clock::RoundClock;
pub use collision::{projectile_hits_obstacle, resolve_collisions};
pub use state::{Effect, GameEvent, GameState, Obstacle, Projectile, Ship, Turn};
pub use tick::{TickInput, tick};
