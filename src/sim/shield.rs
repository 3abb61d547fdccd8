//! Destructible shields
//!
//! Each shield is a 16x24 grid of 4px cells carrying a damage level 0..=3
//! (3 = destroyed). Projectile hits land on the surface the projectile
//! approaches from and erode a 3x3 neighbourhood, so shields crumble from
//! the outside in. Vertical movement is swept across the whole tick so a
//! fast projectile cannot pass through a thin shield between samples.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Projectile, ShotDirection};
use crate::consts::*;

pub const SHIELD_ROWS: usize = 16;
pub const SHIELD_COLS: usize = 24;

/// Cell damage level at which the cell stops existing
const DESTROYED: u8 = 3;

/// Arch silhouette; '1' cells start pristine, '0' cells never exist
const SHIELD_SHAPE: [&str; SHIELD_ROWS] = [
    "000000000000000000000000",
    "000000111111111111000000",
    "000011111111111111110000",
    "000111111111111111111000",
    "001111111111111111111100",
    "011111111111111111111110",
    "011111111111111111111110",
    "111111111111111111111111",
    "111111111111111111111111",
    "111111110000000011111111",
    "111111100000000001111111",
    "111111000000000000111111",
    "111110000000000000011111",
    "111100000000000000001111",
    "111000000000000000000111",
    "011000000000000000000110",
];

/// Precomputed per-cell damage cosmetics so the renderer draws stable chips
/// and scuffs instead of re-rolling every frame
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CellVisual {
    pub chip_x: u8,
    pub chip_y: u8,
    pub scuff_x: u8,
    pub scuff_y: u8,
    pub extra_chip: bool,
}

impl CellVisual {
    fn roll(rng: &mut Pcg32) -> Self {
        Self {
            chip_x: rng.random_range(0..3),
            chip_y: rng.random_range(0..3),
            scuff_x: rng.random_range(0..2),
            scuff_y: rng.random_range(0..2),
            extra_chip: rng.random_bool(0.5),
        }
    }
}

/// One shield emplacement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub origin: Vec2,
    cells: Vec<Vec<u8>>,
    visuals: Vec<Vec<CellVisual>>,
}

impl Shield {
    pub fn new(origin: Vec2, rng: &mut Pcg32) -> Self {
        let cells = SHIELD_SHAPE
            .iter()
            .map(|row| {
                row.bytes()
                    .map(|c| if c == b'1' { 0 } else { DESTROYED })
                    .collect()
            })
            .collect();
        let visuals = (0..SHIELD_ROWS)
            .map(|_| (0..SHIELD_COLS).map(|_| CellVisual::roll(rng)).collect())
            .collect();
        Self {
            origin,
            cells,
            visuals,
        }
    }

    /// Damage level for a cell, 0..=3
    pub fn damage_at(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    pub fn visual_at(&self, row: usize, col: usize) -> CellVisual {
        self.visuals[row][col]
    }

    /// True while no cell of the arch has been damaged
    pub fn is_pristine(&self) -> bool {
        SHIELD_SHAPE.iter().enumerate().all(|(r, row)| {
            row.bytes()
                .enumerate()
                .all(|(c, ch)| ch != b'1' || self.cells[r][c] == 0)
        })
    }

    /// Erode the 3x3 neighbourhood around an impact, each cell capped at
    /// the destroyed level
    pub fn apply_blast_damage(&mut self, row: usize, col: usize) {
        for dr in -1i32..=1 {
            for dc in -1i32..=1 {
                let r = row as i32 + dr;
                let c = col as i32 + dc;
                if (0..SHIELD_ROWS as i32).contains(&r)
                    && (0..SHIELD_COLS as i32).contains(&c)
                    && self.cells[r as usize][c as usize] < DESTROYED
                {
                    self.cells[r as usize][c as usize] += 1;
                }
            }
        }
    }

    /// Test a projectile against this shield, consuming it on impact.
    ///
    /// The projectile's vertical span for the tick (previous position to
    /// current, both extended by its height) is swept in 1px steps until a
    /// surviving cell is found in the projectile's column. The impact then
    /// snaps to the outermost surviving cell on the side the projectile
    /// approached from, so damage always lands on the facing surface.
    pub fn check_collision(&mut self, shot: &mut Projectile) -> bool {
        let cell = SPRITE_PIXEL;
        let rel_x = shot.pos.x - self.origin.x;
        let col = (rel_x / cell).floor() as i32;
        if !(0..SHIELD_COLS as i32).contains(&col) {
            return false;
        }
        let col = col as usize;

        let start_y = shot.prev_y.min(shot.pos.y);
        let end_y = (shot.prev_y + SHOT_HEIGHT).max(shot.pos.y + SHOT_HEIGHT);

        let mut hit_row = None;
        let mut y = start_y;
        while y <= end_y {
            let row = ((y - self.origin.y) / cell).floor() as i32;
            if (0..SHIELD_ROWS as i32).contains(&row) && self.cells[row as usize][col] < DESTROYED {
                hit_row = Some(row as usize);
                break;
            }
            y += 1.0;
        }
        let Some(hit_row) = hit_row else {
            return false;
        };

        let target_row = match shot.direction {
            // Downward shots erode the top surface, upward shots the bottom
            ShotDirection::Down => (0..=hit_row)
                .find(|&r| self.cells[r][col] < DESTROYED)
                .unwrap_or(hit_row),
            ShotDirection::Up => (hit_row..SHIELD_ROWS)
                .rev()
                .find(|&r| self.cells[r][col] < DESTROYED)
                .unwrap_or(hit_row),
        };
        self.apply_blast_damage(target_row, col);
        shot.active = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn shield() -> Shield {
        let mut rng = Pcg32::seed_from_u64(1);
        Shield::new(Vec2::new(64.0, SHIELD_Y), &mut rng)
    }

    fn shot_up(x: f32, y: f32) -> Projectile {
        Projectile::new(Vec2::new(x, y), PLAYER_SHOT_SPEED, ShotDirection::Up)
    }

    fn shot_down(x: f32, y: f32) -> Projectile {
        Projectile::new(Vec2::new(x, y), ENEMY_SHOT_SPEED, ShotDirection::Down)
    }

    #[test]
    fn test_shape_mask() {
        let shield = shield();
        // Top row never exists, the full-width rows are pristine
        assert_eq!(shield.damage_at(0, 0), 3);
        assert_eq!(shield.damage_at(7, 0), 0);
        assert_eq!(shield.damage_at(7, 23), 0);
        // Interior of the arch is hollow
        assert_eq!(shield.damage_at(11, 12), 3);
        assert!(shield.is_pristine());
    }

    #[test]
    fn test_blast_damage_caps_and_spreads() {
        let mut shield = shield();
        // Rows 2..=4 are solid across cols 9..=11
        shield.apply_blast_damage(3, 10);
        for r in 2..=4 {
            for c in 9..=11 {
                assert_eq!(shield.damage_at(r, c), 1);
            }
        }
        assert_eq!(shield.damage_at(3, 13), 0);
        assert!(!shield.is_pristine());

        for _ in 0..10 {
            shield.apply_blast_damage(3, 10);
        }
        assert_eq!(shield.damage_at(3, 10), 3);
    }

    #[test]
    fn test_blast_skips_hollow_cells() {
        let mut shield = shield();
        // A blast centred on row 8 borders the hollow interior at row 9
        shield.apply_blast_damage(8, 10);
        for c in 9..=11 {
            assert_eq!(shield.damage_at(7, c), 1);
            assert_eq!(shield.damage_at(8, c), 1);
            // Non-existent material stays destroyed, never wraps or revives
            assert_eq!(shield.damage_at(9, c), 3);
        }
    }

    #[test]
    fn test_upward_shot_erodes_bottom_surface() {
        let mut shield = shield();
        // Column 0: rows 7..=14 exist; an upward shot must land on row 14
        let mut shot = shot_up(shield.origin.x + 1.0, shield.origin.y + 8.0 * 4.0);
        shot.prev_y = shot.pos.y;
        assert!(shield.check_collision(&mut shot));
        assert!(!shot.active);
        assert_eq!(shield.damage_at(14, 0), 1);
        assert_eq!(shield.damage_at(7, 0), 0);
    }

    #[test]
    fn test_downward_shot_erodes_top_surface() {
        let mut shield = shield();
        // Column 12: rows 1..=8 exist; a downward shot must land on row 1
        let mut shot = shot_down(shield.origin.x + 12.0 * 4.0 + 1.0, shield.origin.y - 20.0);
        shot.prev_y = shot.pos.y - 10.0;
        assert!(shield.check_collision(&mut shot));
        assert_eq!(shield.damage_at(1, 12), 1);
        assert_eq!(shield.damage_at(8, 12), 0);
    }

    #[test]
    fn test_fast_shot_cannot_tunnel() {
        let mut shield = shield();
        // One tick moved the shot from below the shield to above it
        let mut shot = shot_up(shield.origin.x + 1.0, shield.origin.y - 60.0);
        shot.prev_y = shield.origin.y + SHIELD_ROWS as f32 * 4.0 + 20.0;
        assert!(shield.check_collision(&mut shot));
        assert!(!shot.active);
    }

    #[test]
    fn test_miss_outside_columns() {
        let mut shield = shield();
        let mut shot = shot_up(shield.origin.x - 10.0, shield.origin.y + 10.0);
        assert!(!shield.check_collision(&mut shot));
        assert!(shot.active);
        assert!(shield.is_pristine());
    }

    proptest! {
        #[test]
        fn prop_damage_never_exceeds_cap(
            hits in proptest::collection::vec((0usize..SHIELD_ROWS, 0usize..SHIELD_COLS), 0..200)
        ) {
            let mut shield = shield();
            for (row, col) in hits {
                shield.apply_blast_damage(row, col);
            }
            for r in 0..SHIELD_ROWS {
                for c in 0..SHIELD_COLS {
                    prop_assert!(shield.damage_at(r, c) <= 3);
                }
            }
        }

        #[test]
        fn prop_collision_consumes_active_shot(x_offset in 0.0f32..96.0, y in 700.0f32..900.0) {
            let mut shield = shield();
            let mut shot = shot_up(shield.origin.x + x_offset, y);
            shot.prev_y = y + 22.5;
            let was_pristine = shield.is_pristine();
            let hit = shield.check_collision(&mut shot);
            prop_assert_eq!(hit, !shot.active);
            if !hit {
                prop_assert!(was_pristine && shield.is_pristine());
            }
        }
    }
}
