//! Round state and entity types
//!
//! Everything alive during one round is owned by [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bounds::{Aabb, clamp_center, wrap_point};
use super::clock::RoundClock;
use crate::heading_to_direction;
use crate::tuning::Tuning;

/// Rotation command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Counter-clockwise on screen (heading decreases)
    Left,
    /// Clockwise on screen (heading increases)
    Right,
}

impl Turn {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Turn::Left => -1.0,
            Turn::Right => 1.0,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    /// Centre of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, unbounded (only normalized when turned into a direction)
    pub heading: f32,
    /// Side of the square bounding box
    pub size: f32,
    pub rotation_speed: f32,
    pub acceleration: f32,
    pub max_speed: f32,
}

impl Ship {
    /// Ship at rest at `pos`, facing +x
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            heading: 0.0,
            size: tuning.ship_size,
            rotation_speed: tuning.ship_rotation_speed,
            acceleration: tuning.ship_acceleration,
            max_speed: tuning.ship_max_speed,
        }
    }

    pub fn rotate(&mut self, turn: Turn) {
        self.heading += self.rotation_speed * turn.sign();
    }

    /// Unit vector along the current heading
    #[inline]
    pub fn direction(&self) -> Vec2 {
        heading_to_direction(self.heading)
    }

    /// Accelerate along the heading, cap speed, move, then clamp into `field`
    pub fn thrust(&mut self, field: Vec2) {
        self.vel += self.direction() * self.acceleration;
        if self.vel.length() > self.max_speed {
            self.vel = self.vel.normalize_or_zero() * self.max_speed;
        }
        self.pos += self.vel;
        self.pos = clamp_center(self.pos, Vec2::splat(self.size), field);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.size))
    }
}

/// A shot fired by the ship
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Hit-test radius
    pub radius: f32,
}

impl Projectile {
    pub fn fire(origin: Vec2, heading: f32, speed: f32, radius: f32) -> Self {
        Self {
            pos: origin,
            vel: heading_to_direction(heading) * speed,
            radius,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// Outside `[0, field]` on either axis
    pub fn is_off_screen(&self, field: Vec2) -> bool {
        self.pos.x < 0.0 || self.pos.x > field.x || self.pos.y < 0.0 || self.pos.y > field.y
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_circle(self.pos, self.radius)
    }
}

/// A drifting target
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Side of the square bounding box
    pub size: f32,
    /// Cosmetic sprite index
    pub variant: u8,
}

impl Obstacle {
    /// Random position on the field, random heading and speed
    pub fn spawn(rng: &mut impl Rng, tuning: &Tuning) -> Self {
        let x = rng.random_range(0..(tuning.field_width as u32).max(1)) as f32;
        let y = rng.random_range(0..(tuning.field_height as u32).max(1)) as f32;
        let heading: f32 = rng.random_range(0.0..360.0);
        let speed = rng.random_range(tuning.obstacle_min_speed..=tuning.obstacle_max_speed);
        let variant = rng.random_range(0..tuning.obstacle_variants.max(1));

        Self {
            pos: Vec2::new(x, y),
            vel: heading_to_direction(heading) * speed,
            size: tuning.obstacle_size,
            variant,
        }
    }

    /// Drift, then wrap across the field edges
    pub fn update(&mut self, field: Vec2) {
        self.pos = wrap_point(self.pos + self.vel, field);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.size))
    }

    /// Position folded into `[0, field)`; an obstacle sitting exactly on the
    /// far edge maps to the near one
    pub fn wrapped_pos(&self, field: Vec2) -> Vec2 {
        let mut p = self.pos;
        if p.x >= field.x {
            p.x = 0.0;
        }
        if p.y >= field.y {
            p.y = 0.0;
        }
        p
    }
}

/// Explosion marker left where an obstacle was destroyed
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub pos: Vec2,
    /// Frames left to display
    pub frames_left: u32,
    pub done: bool,
}

impl Effect {
    pub fn spawn(pos: Vec2, frames: u32) -> Self {
        Self {
            pos,
            frames_left: frames,
            done: frames == 0,
        }
    }

    pub fn update(&mut self) {
        self.frames_left = self.frames_left.saturating_sub(1);
        if self.frames_left == 0 {
            self.done = true;
        }
    }
}

/// Something the front end should react to (sounds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A projectile left the ship
    ProjectileFired,
    /// A projectile destroyed an obstacle at `pos`
    ObstacleDestroyed { pos: Vec2 },
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Balance values this round was started with
    pub tuning: Tuning,
    pub ship: Ship,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub effects: Vec<Effect>,
    pub score: u64,
    pub clock: RoundClock,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// Start a round: ship at the centre, full obstacle population
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ship: Ship::new(tuning.field_center(), &tuning),
            projectiles: Vec::with_capacity(tuning.max_projectiles),
            obstacles: Vec::with_capacity(tuning.obstacle_count),
            effects: Vec::new(),
            score: 0,
            clock: RoundClock::new(tuning.round_duration()),
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        };

        for _ in 0..state.tuning.obstacle_count {
            state.spawn_obstacle();
        }
        log::debug!(
            "Round started (seed {}, {} obstacles)",
            seed,
            state.obstacles.len()
        );

        state
    }

    /// Playfield dimensions
    #[inline]
    pub fn field(&self) -> Vec2 {
        self.tuning.field_size()
    }

    /// Append one randomly placed obstacle
    pub fn spawn_obstacle(&mut self) {
        let obstacle = Obstacle::spawn(&mut self.rng, &self.tuning);
        self.obstacles.push(obstacle);
    }

    /// Fire from the ship unless the in-flight cap is reached
    ///
    /// Returns whether a projectile was spawned.
    pub fn try_fire(&mut self) -> bool {
        if self.projectiles.len() >= self.tuning.max_projectiles {
            return false;
        }
        self.projectiles.push(Projectile::fire(
            self.ship.pos,
            self.ship.heading,
            self.tuning.projectile_speed,
            self.tuning.projectile_radius,
        ));
        self.events.push(GameEvent::ProjectileFired);
        true
    }

    /// Record an event for the front end
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The countdown has run out
    pub fn is_time_up(&self) -> bool {
        self.clock.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> Tuning {
        Tuning::default()
    }

    #[test]
    fn test_rotate_is_unbounded() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0), &tuning());
        for _ in 0..200 {
            ship.rotate(Turn::Right);
        }
        assert_eq!(ship.heading, 600.0);
        ship.rotate(Turn::Left);
        assert_eq!(ship.heading, 597.0);
    }

    #[test]
    fn test_thrust_from_rest() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0), &tuning());
        ship.thrust(tuning().field_size());
        assert!((ship.vel - Vec2::new(0.2, 0.0)).length() < 1e-6);
        assert!((ship.pos - Vec2::new(400.2, 300.0)).length() < 1e-4);
    }

    #[test]
    fn test_thrust_caps_speed_and_keeps_direction() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0), &tuning());
        ship.heading = 90.0;
        ship.vel = Vec2::new(0.0, 4.9);
        ship.thrust(tuning().field_size());
        assert!((ship.vel.length() - 5.0).abs() < 1e-5);
        assert!(ship.vel.x.abs() < 1e-4);
        assert!(ship.vel.y > 0.0);
    }

    #[test]
    fn test_thrust_clamps_but_keeps_velocity() {
        let mut ship = Ship::new(Vec2::new(780.0, 300.0), &tuning());
        ship.vel = Vec2::new(5.0, 0.0);
        ship.thrust(tuning().field_size());
        assert_eq!(ship.pos.x, 775.0);
        // No bounce
        assert!(ship.vel.x > 0.0);
    }

    #[test]
    fn test_projectile_off_screen_edges() {
        let field = Vec2::new(800.0, 600.0);
        let mut p = Projectile::fire(Vec2::new(800.0, 300.0), 0.0, 10.0, 4.0);
        assert!(!p.is_off_screen(field));
        p.update();
        assert!(p.is_off_screen(field));

        let p = Projectile::fire(Vec2::new(10.0, -0.1), 0.0, 10.0, 4.0);
        assert!(p.is_off_screen(field));
    }

    #[test]
    fn test_obstacle_spawn_ranges() {
        let t = tuning();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let o = Obstacle::spawn(&mut rng, &t);
            assert!(o.pos.x >= 0.0 && o.pos.x < t.field_width);
            assert!(o.pos.y >= 0.0 && o.pos.y < t.field_height);
            assert_eq!(o.pos.x.fract(), 0.0);
            let speed = o.vel.length();
            assert!(speed >= t.obstacle_min_speed - 1e-4);
            assert!(speed <= t.obstacle_max_speed + 1e-4);
            assert!(o.variant < t.obstacle_variants);
        }
    }

    #[test]
    fn test_obstacle_wraps_left_to_right() {
        let field = Vec2::new(800.0, 600.0);
        let mut o = Obstacle {
            pos: Vec2::new(1.0, 300.0),
            vel: Vec2::new(-2.0, 0.0),
            size: 60.0,
            variant: 0,
        };
        o.update(field);
        assert_eq!(o.pos.x, 800.0);
        assert_eq!(o.wrapped_pos(field).x, 0.0);
        o.update(field);
        assert_eq!(o.pos.x, 798.0);
    }

    #[test]
    fn test_obstacle_wraps_bottom_to_top() {
        let field = Vec2::new(800.0, 600.0);
        let mut o = Obstacle {
            pos: Vec2::new(400.0, 599.0),
            vel: Vec2::new(0.0, 3.0),
            size: 60.0,
            variant: 2,
        };
        o.update(field);
        assert_eq!(o.pos.y, 0.0);
    }

    #[test]
    fn test_effect_lifetime() {
        let mut e = Effect::spawn(Vec2::ZERO, 15);
        for _ in 0..14 {
            e.update();
            assert!(!e.done);
        }
        e.update();
        assert!(e.done);
        assert_eq!(e.frames_left, 0);
    }

    #[test]
    fn test_new_round() {
        let state = GameState::new(42, tuning());
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.obstacles.len(), 5);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 0);
        assert!(!state.is_time_up());
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let a = GameState::new(1234, tuning());
        let b = GameState::new(1234, tuning());
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_fire_cap() {
        let mut state = GameState::new(1, tuning());
        for _ in 0..5 {
            assert!(state.try_fire());
        }
        assert!(!state.try_fire());
        assert_eq!(state.projectiles.len(), 5);
        let fired = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::ProjectileFired)
            .count();
        assert_eq!(fired, 5);
        assert!(state.drain_events().is_empty());
    }
}
