//! Immutable sprite bitmaps and lookups for the rendering collaborator
//!
//! Bitmaps are 0/1 pixel masks; the renderer scales each set bit to
//! `consts::SPRITE_PIXEL` logical pixels in whatever colour it likes.
//! Lookups with an out-of-range frame are configuration errors and fail
//! fast - no silent substitution.

use thiserror::Error;

use super::state::EnemyKind;

/// A row-major 0/1 pixel mask
pub type Sprite = &'static [&'static [u8]];

/// A sprite lookup that cannot be satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpriteError {
    #[error("no frame {frame} for enemy kind {kind:?}")]
    EnemyFrame { kind: EnemyKind, frame: u8 },
    #[error("no remnant explosion frame {0}")]
    RemnantFrame(u8),
    #[error("no blast frame {0}")]
    BlastFrame(u8),
}

/// Animation frame for an enemy kind (two-frame march cycle)
pub fn enemy_sprite(kind: EnemyKind, frame: u8) -> Result<Sprite, SpriteError> {
    let frames: &[Sprite; 2] = match kind {
        EnemyKind::A => &ENEMY_A,
        EnemyKind::B => &ENEMY_B,
        EnemyKind::C => &ENEMY_C,
    };
    frames
        .get(frame as usize)
        .copied()
        .ok_or(SpriteError::EnemyFrame { kind, frame })
}

/// Explosion remnant frame shown while an enemy dies (3 frames)
pub fn remnant_sprite(frame: u8) -> Result<Sprite, SpriteError> {
    REMNANT
        .get(frame as usize)
        .copied()
        .ok_or(SpriteError::RemnantFrame(frame))
}

/// Cannon/bonus destruction blast frame (10 frames, ends empty)
pub fn blast_sprite(frame: u8) -> Result<Sprite, SpriteError> {
    BLAST
        .get(frame as usize)
        .copied()
        .ok_or(SpriteError::BlastFrame(frame))
}

/// The player's cannon
pub const CANNON: Sprite = &[
    &[0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0],
    &[0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0],
    &[0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0],
    &[0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0],
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// The flying bonus saucer
pub const BONUS: Sprite = &[
    &[0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0],
    &[0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0],
    &[0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0],
    &[0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0],
    &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    &[0, 0, 1, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 1, 0, 0],
    &[0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0],
    &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

const ENEMY_A: [Sprite; 2] = [
    &[
        &[0, 0, 1, 0, 0, 1, 0, 0],
        &[0, 0, 0, 1, 1, 0, 0, 0],
        &[0, 0, 1, 1, 1, 1, 0, 0],
        &[0, 1, 1, 1, 1, 1, 1, 0],
        &[1, 1, 0, 1, 1, 0, 1, 1],
        &[1, 1, 1, 1, 1, 1, 1, 1],
        &[0, 0, 1, 0, 0, 1, 0, 0],
        &[0, 1, 0, 0, 0, 0, 1, 0],
    ],
    &[
        &[0, 0, 1, 0, 0, 1, 0, 0],
        &[0, 1, 0, 1, 1, 0, 1, 0],
        &[1, 1, 1, 1, 1, 1, 1, 1],
        &[1, 1, 0, 1, 1, 0, 1, 1],
        &[0, 1, 1, 1, 1, 1, 1, 0],
        &[0, 0, 1, 1, 1, 1, 0, 0],
        &[0, 1, 0, 0, 0, 0, 1, 0],
        &[1, 0, 0, 0, 0, 0, 0, 1],
    ],
];

const ENEMY_B: [Sprite; 2] = [
    &[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 1, 0, 0, 0, 0, 1, 0],
        &[0, 0, 1, 1, 1, 1, 0, 0],
        &[1, 1, 0, 1, 1, 0, 1, 1],
        &[1, 1, 1, 1, 1, 1, 1, 1],
        &[0, 1, 1, 0, 0, 1, 1, 0],
        &[0, 0, 1, 0, 0, 1, 0, 0],
        &[1, 0, 0, 0, 0, 0, 0, 1],
    ],
    &[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 1, 0, 0, 0, 0, 1, 0],
        &[0, 0, 1, 1, 1, 1, 0, 0],
        &[1, 1, 0, 1, 1, 0, 1, 1],
        &[1, 1, 1, 1, 1, 1, 1, 1],
        &[0, 0, 1, 1, 1, 1, 0, 0],
        &[0, 1, 0, 0, 0, 0, 1, 0],
        &[0, 0, 1, 0, 0, 1, 0, 0],
    ],
];

const ENEMY_C: [Sprite; 2] = [
    &[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 1, 1, 1, 1, 0, 0],
        &[0, 1, 1, 0, 0, 1, 1, 0],
        &[1, 1, 0, 1, 1, 0, 1, 1],
        &[1, 1, 1, 1, 1, 1, 1, 1],
        &[0, 1, 0, 0, 0, 0, 1, 0],
        &[1, 0, 1, 0, 0, 1, 0, 1],
        &[0, 0, 0, 1, 1, 0, 0, 0],
    ],
    &[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 1, 1, 1, 1, 0, 0],
        &[0, 1, 1, 0, 0, 1, 1, 0],
        &[1, 1, 0, 1, 1, 0, 1, 1],
        &[1, 1, 1, 1, 1, 1, 1, 1],
        &[0, 0, 1, 0, 0, 1, 0, 0],
        &[0, 1, 0, 1, 1, 0, 1, 0],
        &[1, 0, 0, 0, 0, 0, 0, 1],
    ],
];

// Burst, dissipating fragments, final fade
const REMNANT: [Sprite; 3] = [
    &[
        &[0, 0, 1, 0, 0, 1, 0, 0],
        &[0, 1, 0, 1, 1, 0, 1, 0],
        &[1, 0, 1, 1, 1, 1, 0, 1],
        &[0, 1, 1, 0, 0, 1, 1, 0],
        &[0, 1, 1, 0, 0, 1, 1, 0],
        &[1, 0, 1, 1, 1, 1, 0, 1],
        &[0, 1, 0, 1, 1, 0, 1, 0],
        &[0, 0, 1, 0, 0, 1, 0, 0],
    ],
    &[
        &[0, 1, 0, 0, 0, 0, 1, 0],
        &[1, 0, 1, 0, 0, 1, 0, 1],
        &[0, 1, 0, 1, 1, 0, 1, 0],
        &[1, 0, 1, 0, 0, 1, 0, 1],
        &[0, 1, 0, 1, 1, 0, 1, 0],
        &[1, 0, 1, 0, 0, 1, 0, 1],
        &[0, 1, 0, 0, 0, 0, 1, 0],
        &[0, 0, 0, 1, 1, 0, 0, 0],
    ],
    &[
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 1, 0, 0, 1, 0, 0],
        &[0, 1, 0, 0, 0, 0, 1, 0],
        &[0, 0, 0, 1, 1, 0, 0, 0],
        &[0, 0, 1, 0, 0, 1, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 1, 0, 0, 0, 0, 1, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0],
    ],
];

// Ten-frame destruction blast shared by the cannon and the bonus saucer:
// impact, jagged burst, chaotic scatter, radial scatter, fragmenting,
// sparse flicker, then fading to empty
const BLAST: [Sprite; 10] = [
    &[
        &[0, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 1, 1, 0, 1, 0, 1, 1, 0, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 1, 1, 0, 1, 1, 0, 1, 0, 0, 0, 0],
        &[0, 1, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 1, 1, 0, 0],
        &[1, 0, 1, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 1, 0],
        &[0, 1, 0, 1, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 1],
        &[1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0],
        &[0, 0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0],
    ],
    &[
        &[0, 0, 0, 1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0],
        &[0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0],
        &[1, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0],
        &[0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 1, 0],
        &[1, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1, 0, 1, 0, 1, 0],
        &[0, 1, 0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 1, 0, 1, 0],
        &[1, 0, 1, 0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 1, 0, 1],
        &[0, 0, 1, 0, 1, 0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 0],
    ],
    &[
        &[1, 0, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
        &[0, 1, 0, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
        &[1, 0, 1, 0, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
        &[0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
        &[1, 0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
        &[0, 1, 0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 1, 0, 1, 0],
        &[1, 0, 1, 0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 1, 0, 1],
        &[0, 1, 0, 1, 0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 1, 0],
    ],
    &[
        &[0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0],
        &[0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0],
        &[1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1],
        &[0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1],
        &[1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0],
        &[0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0],
        &[0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0],
    ],
    &[
        &[0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 0],
        &[0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0],
        &[0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0],
        &[1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1],
        &[0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0],
        &[0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0],
        &[0, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 0],
    ],
    &[
        &[0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
        &[0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0],
        &[1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
    ],
    &[
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
    &[
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
    &[
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
    &[
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    ],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_lookups() {
        for kind in [EnemyKind::A, EnemyKind::B, EnemyKind::C] {
            for frame in 0..2 {
                let sprite = enemy_sprite(kind, frame).unwrap();
                assert_eq!(sprite.len(), 8);
                assert!(sprite.iter().all(|row| row.len() == 8));
            }
        }
        for frame in 0..3 {
            assert!(remnant_sprite(frame).is_ok());
        }
        for frame in 0..10 {
            assert!(blast_sprite(frame).is_ok());
        }
        assert_eq!(CANNON.len(), 8);
        assert_eq!(BONUS[0].len(), 16);
    }

    #[test]
    fn test_out_of_range_frames_fail_fast() {
        assert_eq!(
            enemy_sprite(EnemyKind::B, 2),
            Err(SpriteError::EnemyFrame {
                kind: EnemyKind::B,
                frame: 2
            })
        );
        assert_eq!(remnant_sprite(3), Err(SpriteError::RemnantFrame(3)));
        assert_eq!(blast_sprite(10), Err(SpriteError::BlastFrame(10)));
    }
}
