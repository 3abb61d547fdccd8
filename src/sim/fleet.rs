//! Fleet controller: formation spawn, edge-bounce march, tempo curve
//!
//! The fleet marches on the ambient beat. Each step it either shifts the
//! whole formation horizontally or, when the leading edge would leave the
//! playfield, flips direction and drops one row instead. The march interval
//! shrinks cubically as enemies die, and the per-step distance grows at
//! fixed thresholds so the last few survivors sprint.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, EnemyKind};
use crate::consts::*;

/// Horizontal march direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FleetDirection {
    Left,
    Right,
}

impl FleetDirection {
    pub fn flipped(self) -> Self {
        match self {
            FleetDirection::Left => FleetDirection::Right,
            FleetDirection::Right => FleetDirection::Left,
        }
    }
}

/// What a single march step did, for the state machine to react to
#[derive(Debug, Clone, Copy, Default)]
pub struct FleetAdvance {
    /// The formation hit an edge and descended one row
    pub dropped: bool,
    /// Some enemy is now at or below the shield line
    pub crossed_shield_line: bool,
    /// Some enemy's bottom edge reached the invasion boundary
    pub reached_bottom: bool,
}

/// Seconds between march steps: cubic in the fraction of the fleet left,
/// from a leisurely start down to a floor for the final survivors
pub fn compute_step_tempo(remaining: usize, initial: usize) -> f32 {
    if initial == 0 {
        return MIN_TEMPO;
    }
    let ratio = remaining as f32 / initial as f32;
    MIN_TEMPO + (INITIAL_TEMPO - MIN_TEMPO) * ratio.powf(TEMPO_DECAY)
}

/// Horizontal pixels per march step, stepping up as the fleet thins
pub fn step_size(remaining: usize) -> f32 {
    if remaining < 2 {
        20.0
    } else if remaining < 4 {
        12.0
    } else if remaining < 11 {
        8.0
    } else if remaining < 22 {
        6.0
    } else {
        4.0
    }
}

/// The enemy formation and its march state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fleet {
    pub enemies: Vec<Enemy>,
    pub direction: FleetDirection,
    /// Fleet size at wave start; tempo is relative to this
    pub initial_count: usize,
    /// Accumulates sim time toward the next march step
    pub step_timer: f32,
}

impl Fleet {
    /// Full formation for the given wave. Later waves start lower.
    pub fn spawn(wave: u32) -> Self {
        let y_start = match wave {
            1 => 192.0,
            2 => 256.0,
            3 => 320.0,
            _ => 384.0,
        };
        let mut enemies = Vec::with_capacity(FLEET_ROWS * FLEET_COLS);
        for row in 0..FLEET_ROWS {
            let kind = EnemyKind::for_row(row);
            for col in 0..FLEET_COLS {
                let pos = Vec2::new(
                    FLEET_X_PADDING + col as f32 * FLEET_SPACING,
                    y_start + row as f32 * FLEET_SPACING,
                );
                enemies.push(Enemy::new(kind, pos));
            }
        }
        let initial_count = enemies.len();
        Self {
            enemies,
            // The formation opens marching toward the near (left) edge
            direction: FleetDirection::Left,
            initial_count,
            step_timer: 0.0,
        }
    }

    /// Enemies still occupying formation slots (alive or mid-explosion)
    pub fn remaining(&self) -> usize {
        self.enemies.iter().filter(|e| !e.is_dead()).count()
    }

    /// Seconds until the next march step at the current fleet size
    pub fn current_tempo(&self) -> f32 {
        compute_step_tempo(self.remaining(), self.initial_count)
    }

    /// Execute one march step: shift horizontally, or flip and drop at an
    /// edge. A drop step performs no horizontal movement.
    pub fn advance(&mut self) -> FleetAdvance {
        let mut result = FleetAdvance::default();
        let step = step_size(self.remaining());

        let at_edge = self.enemies.iter().filter(|e| !e.is_dead()).any(|e| {
            match self.direction {
                FleetDirection::Left => e.pos.x - step < 0.0,
                FleetDirection::Right => e.pos.x + ENEMY_SIZE + step > PLAYFIELD_WIDTH,
            }
        });

        if at_edge {
            self.direction = self.direction.flipped();
            for enemy in self.enemies.iter_mut().filter(|e| !e.is_dead()) {
                enemy.pos.y += FLEET_DROP;
                if enemy.pos.y >= SHIELD_LINE_Y {
                    result.crossed_shield_line = true;
                }
                if enemy.pos.y + ENEMY_SIZE >= BOTTOM_LINE_Y {
                    result.reached_bottom = true;
                }
            }
            result.dropped = true;
        } else {
            let dx = match self.direction {
                FleetDirection::Left => -step,
                FleetDirection::Right => step,
            };
            for enemy in self.enemies.iter_mut().filter(|e| !e.is_dead()) {
                enemy.pos.x += dx;
                enemy.toggle_frame();
            }
        }
        result
    }

    /// Drop fully-dead enemies from the formation; returns true when the
    /// fleet is empty
    pub fn reap_dead(&mut self) -> bool {
        self.enemies.retain(|e| !e.is_dead());
        self.enemies.is_empty()
    }

    /// Indices of the lowest alive enemy in each occupied column, ordered
    /// left to right. Candidates for dropping a projectile.
    pub fn bottom_shooters(&self) -> Vec<usize> {
        let mut lowest: BTreeMap<i32, usize> = BTreeMap::new();
        for (index, enemy) in self.enemies.iter().enumerate() {
            if !enemy.is_alive() {
                continue;
            }
            let column = enemy.pos.x.round() as i32;
            match lowest.get(&column) {
                Some(&other) if self.enemies[other].pos.y >= enemy.pos.y => {}
                _ => {
                    lowest.insert(column, index);
                }
            }
        }
        lowest.into_values().collect()
    }

    /// Freeze or resume march animation (cannon respawn pause)
    pub fn set_moving(&mut self, moving: bool) {
        for enemy in &mut self.enemies {
            enemy.moving = moving;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_formation_layout() {
        let fleet = Fleet::spawn(1);
        assert_eq!(fleet.enemies.len(), 55);
        assert_eq!(fleet.direction, FleetDirection::Left);

        // Top row is the high-value kind, bottom two rows the cheapest
        assert_eq!(fleet.enemies[0].kind, EnemyKind::C);
        assert_eq!(fleet.enemies[11].kind, EnemyKind::B);
        assert_eq!(fleet.enemies[22].kind, EnemyKind::B);
        assert_eq!(fleet.enemies[33].kind, EnemyKind::A);
        assert_eq!(fleet.enemies[44].kind, EnemyKind::A);

        assert_eq!(fleet.enemies[0].pos, Vec2::new(64.0, 192.0));
        assert_eq!(fleet.enemies[10].pos, Vec2::new(64.0 + 10.0 * 64.0, 192.0));
        assert_eq!(fleet.enemies[54].pos, Vec2::new(64.0 + 10.0 * 64.0, 192.0 + 4.0 * 64.0));
    }

    #[test]
    fn test_later_waves_start_lower() {
        assert_eq!(Fleet::spawn(1).enemies[0].pos.y, 192.0);
        assert_eq!(Fleet::spawn(2).enemies[0].pos.y, 256.0);
        assert_eq!(Fleet::spawn(3).enemies[0].pos.y, 320.0);
        assert_eq!(Fleet::spawn(4).enemies[0].pos.y, 384.0);
        assert_eq!(Fleet::spawn(9).enemies[0].pos.y, 384.0);
    }

    #[test]
    fn test_tempo_endpoints() {
        assert!((compute_step_tempo(55, 55) - INITIAL_TEMPO).abs() < 1e-6);
        assert!((compute_step_tempo(0, 55) - MIN_TEMPO).abs() < 1e-6);
    }

    #[test]
    fn test_step_size_thresholds() {
        assert_eq!(step_size(55), 4.0);
        assert_eq!(step_size(22), 4.0);
        assert_eq!(step_size(21), 6.0);
        assert_eq!(step_size(11), 6.0);
        assert_eq!(step_size(10), 8.0);
        assert_eq!(step_size(4), 8.0);
        assert_eq!(step_size(3), 12.0);
        assert_eq!(step_size(2), 12.0);
        assert_eq!(step_size(1), 20.0);
    }

    #[test]
    fn test_advance_moves_and_toggles_frames() {
        let mut fleet = Fleet::spawn(1);
        let x_before = fleet.enemies[0].pos.x;
        let result = fleet.advance();
        assert!(!result.dropped);
        assert_eq!(fleet.enemies[0].pos.x, x_before - 4.0);
        assert!(fleet.enemies.iter().all(|e| e.frame == 1));
    }

    #[test]
    fn test_edge_bounce_drops_without_horizontal_move() {
        let mut fleet = Fleet::spawn(1);
        fleet.direction = FleetDirection::Right;
        // Rightmost column starts at x=704; right edge trigger is
        // x + 32 + step > 896
        for enemy in &mut fleet.enemies {
            enemy.pos.x += 158.0;
        }
        let y_before = fleet.enemies[0].pos.y;
        let x_before = fleet.enemies[0].pos.x;

        let result = fleet.advance();
        assert!(result.dropped);
        assert_eq!(fleet.direction, FleetDirection::Left);
        assert_eq!(fleet.enemies[0].pos.y, y_before + FLEET_DROP);
        assert_eq!(fleet.enemies[0].pos.x, x_before);
        // Drop steps do not toggle march frames
        assert!(fleet.enemies.iter().all(|e| e.frame == 0));
    }

    #[test]
    fn test_drop_flags_shield_line_and_bottom() {
        let mut fleet = Fleet::spawn(1);
        fleet.enemies.truncate(1);
        fleet.enemies[0].pos = Vec2::new(0.0, SHIELD_LINE_Y - FLEET_DROP);
        fleet.direction = FleetDirection::Left;

        let result = fleet.advance();
        assert!(result.dropped);
        assert!(result.crossed_shield_line);
        assert!(!result.reached_bottom);

        fleet.enemies[0].pos = Vec2::new(0.0, BOTTOM_LINE_Y - ENEMY_SIZE - FLEET_DROP);
        fleet.direction = FleetDirection::Left;
        let result = fleet.advance();
        assert!(result.reached_bottom);
    }

    #[test]
    fn test_bottom_shooters_pick_lowest_per_column() {
        let mut fleet = Fleet::spawn(1);
        let shooters = fleet.bottom_shooters();
        assert_eq!(shooters.len(), FLEET_COLS);
        // All candidates come from the bottom row
        for &index in &shooters {
            assert_eq!(fleet.enemies[index].pos.y, 192.0 + 4.0 * FLEET_SPACING);
        }

        // Killing a bottom-row enemy promotes the one above it
        let victim = shooters[0];
        let column_x = fleet.enemies[victim].pos.x;
        fleet.enemies[victim].explode();
        let shooters = fleet.bottom_shooters();
        assert_eq!(shooters.len(), FLEET_COLS);
        let promoted = shooters
            .iter()
            .find(|&&i| fleet.enemies[i].pos.x == column_x)
            .copied()
            .expect("column lost its shooter");
        assert_eq!(fleet.enemies[promoted].pos.y, 192.0 + 3.0 * FLEET_SPACING);
    }

    #[test]
    fn test_reap_dead_clears_fleet() {
        let mut fleet = Fleet::spawn(1);
        for enemy in &mut fleet.enemies {
            enemy.explode();
            while !enemy.tick_explosion(0.05) {}
        }
        assert!(fleet.reap_dead());
        assert_eq!(fleet.remaining(), 0);
    }

    proptest! {
        #[test]
        fn prop_tempo_monotonic_in_remaining(a in 0usize..=55, b in 0usize..=55) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(compute_step_tempo(lo, 55) <= compute_step_tempo(hi, 55) + 1e-6);
        }

        #[test]
        fn prop_tempo_within_bounds(remaining in 0usize..=55) {
            let tempo = compute_step_tempo(remaining, 55);
            prop_assert!(tempo >= MIN_TEMPO - 1e-6);
            prop_assert!(tempo <= INITIAL_TEMPO + 1e-6);
        }
    }
}
