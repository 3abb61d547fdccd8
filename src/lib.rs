//! Grid Invaders - simulation core for a classic fleet-defense arcade shooter
//!
//! Core module:
//! - `sim`: Deterministic simulation (game state machine, fleet movement,
//!   shield damage model, collisions)
//!
//! Rendering, audio and input capture live outside this crate. Per tick the
//! host samples its input devices into a [`sim::TickInput`], calls
//! [`sim::tick`], reads the [`sim::GameState`] to draw a frame, and drains
//! [`sim::GameEvent`]s to trigger sounds.

pub mod sim;

pub use sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (coordinate system never changes with window size)
    pub const PLAYFIELD_WIDTH: f32 = 896.0;
    pub const PLAYFIELD_HEIGHT: f32 = 1024.0;

    /// One background tile in logical pixels
    pub const TILE: f32 = 32.0;
    /// One sprite pixel in logical pixels
    pub const SPRITE_PIXEL: f32 = 4.0;

    /// Largest elapsed time a single tick will integrate; bigger deltas
    /// (backgrounded host, debugger stall) are clamped to this
    pub const MAX_TICK_DT: f32 = 0.03;

    /// Cannon: 16x8 sprite, bottom row of the playfield
    pub const CANNON_WIDTH: f32 = 16.0 * SPRITE_PIXEL;
    pub const CANNON_HEIGHT: f32 = 8.0 * SPRITE_PIXEL;
    pub const CANNON_Y: f32 = 27.0 * TILE;
    pub const CANNON_START_X: f32 = PLAYFIELD_WIDTH / 2.0 - 32.0;
    pub const CANNON_SPEED: f32 = 200.0;

    /// Enemies: 8x8 sprites
    pub const ENEMY_SIZE: f32 = 8.0 * SPRITE_PIXEL;
    pub const FLEET_ROWS: usize = 5;
    pub const FLEET_COLS: usize = 11;
    /// Left/right inset of the spawn formation
    pub const FLEET_X_PADDING: f32 = 64.0;
    /// Horizontal and vertical spacing between formation slots
    pub const FLEET_SPACING: f32 = 64.0;
    /// Row height the whole fleet drops when it bounces off an edge
    pub const FLEET_DROP: f32 = 32.0;

    /// Fleet step tempo curve
    pub const INITIAL_TEMPO: f32 = 1.5;
    pub const MIN_TEMPO: f32 = 0.05;
    pub const TEMPO_DECAY: f32 = 3.0;
    /// The ambient beat follows the tempo but stays audible/playable
    pub const BEAT_MIN_INTERVAL: f32 = 0.15;
    pub const BEAT_MAX_INTERVAL: f32 = 1.0;
    pub const BEAT_STEPS: u8 = 4;

    /// Projectiles: 1x8 sprite
    pub const SHOT_WIDTH: f32 = 1.0 * SPRITE_PIXEL;
    pub const SHOT_HEIGHT: f32 = 8.0 * SPRITE_PIXEL;
    pub const PLAYER_SHOT_SPEED: f32 = 750.0;
    pub const ENEMY_SHOT_SPEED: f32 = 300.0;
    pub const MAX_ENEMY_SHOTS: usize = 4;
    /// Player shots die above this line, enemy shots below the bottom line
    pub const SHOT_TOP_LIMIT: f32 = 3.0 * TILE;
    pub const SHOT_BOTTOM_LIMIT: f32 = 28.0 * TILE;

    /// Shields
    pub const SHIELD_Y: f32 = 768.0;
    pub const SHIELD_XS: [f32; 4] = [64.0, 288.0, 512.0, 740.0];
    /// Enemies at or below this line burn the shields out for the wave
    pub const SHIELD_LINE_Y: f32 = 736.0;

    /// An enemy whose bottom edge reaches this line has reached the cannon's
    /// row band; the game is over
    pub const BOTTOM_LINE_Y: f32 = 28.0 * TILE;

    /// Flying bonus saucer
    pub const BONUS_Y: f32 = 145.0;
    pub const BONUS_SPEED: f32 = 96.0;
    /// Off-screen start/exit margin on the left side
    pub const BONUS_OFFSCREEN_X: f32 = -64.0;
    pub const BONUS_MIN_DELAY: u32 = 20;
    pub const BONUS_MAX_DELAY: u32 = 30;
    pub const BONUS_SCORES: [u32; 4] = [50, 100, 150, 300];

    /// Phase timers (seconds)
    pub const WAVE_CLEARED_SECS: f32 = 5.0;
    pub const LIFE_LOST_SECS: f32 = 3.0;
    pub const GAME_OVER_SECS: f32 = 15.0;
    /// Ignore confirm input for this long after entering Title/GameOver so a
    /// held key from the previous phase can't skip straight through
    pub const CONFIRM_IGNORE_SECS: f32 = 1.0;
    /// Title showcase formation frame toggle
    pub const TITLE_ANIM_SECS: f32 = 0.5;
    /// GAME OVER banner flash period
    pub const BANNER_FLASH_SECS: f32 = 0.5;

    /// Enemy remnant explosion: 3 frames at this rate
    pub const REMNANT_FRAME_SECS: f32 = 0.05;
    /// Cannon/bonus blast: 10 frames at this rate
    pub const BLAST_FRAME_SECS: f32 = 0.1;

    pub const STARTING_LIVES: u8 = 3;
}
