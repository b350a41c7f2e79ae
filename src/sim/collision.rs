//! Projectile ↔ obstacle hit detection and resolution
//!
//! A plain pairwise scan: projectile and obstacle counts are small and fixed.
//! Hits only mark entities dead during the scan; the lists are swept once the
//! scan is finished.

use super::state::{Effect, GameEvent, GameState, Obstacle, Projectile};

/// Bounding-box overlap between a projectile and an obstacle
#[inline]
pub fn projectile_hits_obstacle(projectile: &Projectile, obstacle: &Obstacle) -> bool {
    projectile.bounds().intersects(&obstacle.bounds())
}

/// Resolve all projectile ↔ obstacle hits for this frame
///
/// Projectiles are scanned in list order, each against obstacles in list order;
/// the first obstacle hit wins. A hit leaves an effect at the obstacle's
/// position, adds the reward, kills both entities and appends a replacement
/// obstacle that later projectiles in the same scan can hit.
///
/// Returns the number of hits.
pub fn resolve_collisions(state: &mut GameState) -> usize {
    let mut projectile_dead = vec![false; state.projectiles.len()];
    let mut obstacle_dead = vec![false; state.obstacles.len()];
    let mut hits = 0;

    for (pi, dead) in projectile_dead.iter_mut().enumerate() {
        // The obstacle list grows while scanning, so index rather than iterate
        let mut oi = 0;
        while oi < state.obstacles.len() {
            if !obstacle_dead[oi]
                && projectile_hits_obstacle(&state.projectiles[pi], &state.obstacles[oi])
            {
                let pos = state.obstacles[oi].pos;
                state
                    .effects
                    .push(Effect::spawn(pos, state.tuning.effect_frames));
                state.score += state.tuning.hit_reward;

                *dead = true;
                obstacle_dead[oi] = true;

                state.spawn_obstacle();
                obstacle_dead.push(false);

                state.push_event(GameEvent::ObstacleDestroyed { pos });
                hits += 1;
                break;
            }
            oi += 1;
        }
    }

    if hits > 0 {
        sweep(&mut state.projectiles, &projectile_dead);
        sweep(&mut state.obstacles, &obstacle_dead);
    }

    hits
}

/// Drop every element whose flag is set, keeping order
fn sweep<T>(items: &mut Vec<T>, dead: &[bool]) {
    let kept = std::mem::take(items)
        .into_iter()
        .zip(dead.iter())
        .filter(|(_, dead)| !**dead)
        .map(|(item, _)| item);
    items.extend(kept);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    /// Round with obstacles placed by hand
    fn state_with(obstacles: &[Vec2]) -> GameState {
        let mut state = GameState::new(7, Tuning::default());
        state.obstacles = obstacles
            .iter()
            .map(|&pos| Obstacle {
                pos,
                vel: Vec2::ZERO,
                size: 60.0,
                variant: 0,
            })
            .collect();
        state
    }

    fn shot_at(pos: Vec2) -> Projectile {
        Projectile {
            pos,
            vel: Vec2::ZERO,
            radius: 4.0,
        }
    }

    #[test]
    fn test_exact_overlap_hit() {
        let target = Vec2::new(200.0, 200.0);
        let mut state = state_with(&[Vec2::new(600.0, 100.0), target]);
        state.projectiles.push(shot_at(target));

        let hits = resolve_collisions(&mut state);

        assert_eq!(hits, 1);
        assert_eq!(state.score, 10);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[0].pos, Vec2::new(600.0, 100.0));
        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects[0].pos, target);
        assert_eq!(state.effects[0].frames_left, 15);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ObstacleDestroyed { pos: target }]
        );
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut state = state_with(&[Vec2::new(100.0, 100.0)]);
        // Obstacle box ends at x=130, shot box starts at x=130: touching only
        state.projectiles.push(shot_at(Vec2::new(134.0, 100.0)));

        assert_eq!(resolve_collisions(&mut state), 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_first_obstacle_wins() {
        // Two overlapping obstacles under one shot: only the first is destroyed
        let first = Vec2::new(300.0, 300.0);
        let second = Vec2::new(310.0, 300.0);
        let mut state = state_with(&[first, second]);
        state.projectiles.push(shot_at(Vec2::new(305.0, 300.0)));

        assert_eq!(resolve_collisions(&mut state), 1);
        assert_eq!(state.score, 10);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[0].pos, second);
        assert_eq!(state.effects[0].pos, first);
    }

    #[test]
    fn test_obstacle_cannot_be_hit_twice() {
        let target = Vec2::new(500.0, 400.0);
        let mut state = state_with(&[target]);
        state.projectiles.push(shot_at(target));
        state.projectiles.push(shot_at(target + Vec2::new(2.0, 0.0)));

        let hits = resolve_collisions(&mut state);

        // The second shot may only hit the replacement if it happens to overlap
        assert!(hits >= 1);
        assert_eq!(state.score, 10 * hits as u64);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.projectiles.len(), 2 - hits);
        assert_eq!(state.effects[0].pos, target);
    }

    #[test]
    fn test_two_shots_two_targets() {
        let a = Vec2::new(100.0, 500.0);
        let b = Vec2::new(700.0, 80.0);
        let mut state = state_with(&[a, b]);
        state.projectiles.push(shot_at(b));
        state.projectiles.push(shot_at(a));

        assert_eq!(resolve_collisions(&mut state), 2);
        assert_eq!(state.score, 20);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.effects.len(), 2);
        assert_eq!(state.effects[0].pos, b);
        assert_eq!(state.effects[1].pos, a);
    }

    #[test]
    fn test_sweep_keeps_order() {
        let mut items = vec![1, 2, 3, 4];
        sweep(&mut items, &[false, true, false, true]);
        assert_eq!(items, vec![1, 3]);
    }
}
