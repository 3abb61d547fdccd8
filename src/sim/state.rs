//! Game state and core simulation types
//!
//! Everything the renderer needs to draw a frame is reachable (read-only)
//! from [`GameState`]; everything the audio collaborator needs arrives as
//! drained [`GameEvent`]s. Entities expose a narrow command surface
//! (`move_by`, `explode`, `advance`) that keeps their invariants - clamped
//! cannon position, monotonic explosion progress - inside the type.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::fleet::Fleet;
use super::shield::Shield;
use crate::consts::*;

/// Current phase of gameplay. Transitions are the only way the global
/// counters (score, lives, wave) change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Attract screen with the showcase formation
    Title,
    /// Active gameplay
    Playing,
    /// Fleet destroyed; banner countdown before the next wave
    WaveCleared,
    /// Cannon destroyed; blast animation countdown before respawn
    LifeLost,
    /// Run ended; flashing banner until reset
    GameOver,
}

/// Fire-and-forget notification for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player projectile launched
    PlayerFired,
    /// An enemy started exploding
    EnemyHit,
    /// An enemy projectile reached the cannon
    CannonHit,
    /// The bonus saucer entered the playfield
    BonusSpawned,
    /// The bonus saucer was destroyed
    BonusHit,
    /// Ambient rhythmic beat, cycling `step` 0..BEAT_STEPS
    TempoTick { step: u8 },
}

/// Vertical travel direction of a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotDirection {
    Up,
    Down,
}

/// A projectile (player or enemy)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// y before the most recent move; shields sweep this span so fast shots
    /// cannot tunnel between ticks
    pub prev_y: f32,
    pub speed: f32,
    pub direction: ShotDirection,
    pub active: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, speed: f32, direction: ShotDirection) -> Self {
        Self {
            pos,
            prev_y: pos.y,
            speed,
            direction,
            active: true,
        }
    }

    /// Move for one tick and deactivate on leaving the vertical play bounds
    pub fn advance(&mut self, dt: f32) {
        self.prev_y = self.pos.y;
        let distance = self.speed * dt;
        match self.direction {
            ShotDirection::Up => {
                self.pos.y -= distance;
                if self.pos.y + SHOT_HEIGHT < SHOT_TOP_LIMIT {
                    self.active = false;
                }
            }
            ShotDirection::Down => {
                self.pos.y += distance;
                if self.pos.y > SHOT_BOTTOM_LIMIT {
                    self.active = false;
                }
            }
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, SHOT_WIDTH, SHOT_HEIGHT)
    }
}

/// The player's cannon
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Cannon {
    x: f32,
    pub y: f32,
}

impl Cannon {
    pub fn new() -> Self {
        Self {
            x: CANNON_START_X,
            y: CANNON_Y,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    /// Move horizontally, clamped to the playfield
    pub fn move_by(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(0.0, PLAYFIELD_WIDTH - CANNON_WIDTH);
    }

    /// Back to the centre (new wave, life respawn)
    pub fn reset_position(&mut self) {
        self.x = CANNON_START_X;
    }

    /// Where the player projectile leaves the barrel
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.x + CANNON_WIDTH / 2.0, self.y)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, CANNON_WIDTH, CANNON_HEIGHT)
    }
}

impl Default for Cannon {
    fn default() -> Self {
        Self::new()
    }
}

/// Enemy row classification; decides sprite and score value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    A,
    B,
    C,
}

impl EnemyKind {
    /// Points awarded for destroying this kind
    pub fn score_value(self) -> u32 {
        match self {
            EnemyKind::A => 10,
            EnemyKind::B => 20,
            EnemyKind::C => 30,
        }
    }

    /// Formation row (top-down) to kind
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => EnemyKind::C,
            1 | 2 => EnemyKind::B,
            _ => EnemyKind::A,
        }
    }
}

/// Explosion sub-state machine: Alive -> Exploding (3 timed frames) -> Dead
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyPhase {
    Alive,
    Exploding { frame: u8, timer: f32 },
    Dead,
}

/// One enemy in the fleet
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// March animation frame, 0 or 1
    pub frame: u8,
    pub pos: Vec2,
    /// Cleared while the cannon respawns; the fleet holds formation
    pub moving: bool,
    phase: EnemyPhase,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            kind,
            frame: 0,
            pos,
            moving: true,
            phase: EnemyPhase::Alive,
        }
    }

    pub fn phase(&self) -> EnemyPhase {
        self.phase
    }

    pub fn is_alive(&self) -> bool {
        self.phase == EnemyPhase::Alive
    }

    pub fn is_exploding(&self) -> bool {
        matches!(self.phase, EnemyPhase::Exploding { .. })
    }

    pub fn is_dead(&self) -> bool {
        self.phase == EnemyPhase::Dead
    }

    /// Start the explosion remnant sequence. No-op unless alive.
    pub fn explode(&mut self) {
        if self.phase == EnemyPhase::Alive {
            self.phase = EnemyPhase::Exploding {
                frame: 0,
                timer: REMNANT_FRAME_SECS,
            };
        }
    }

    /// Advance the explosion timer; returns true the tick the enemy dies
    pub fn tick_explosion(&mut self, dt: f32) -> bool {
        if let EnemyPhase::Exploding { frame, timer } = &mut self.phase {
            *timer -= dt;
            if *timer < 0.0 {
                *frame += 1;
                *timer = REMNANT_FRAME_SECS;
                if *frame == 3 {
                    self.phase = EnemyPhase::Dead;
                    return true;
                }
            }
        }
        false
    }

    /// Toggle the two-frame march cycle
    pub fn toggle_frame(&mut self) {
        self.frame ^= 1;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ENEMY_SIZE, ENEMY_SIZE)
    }
}

/// The flying bonus saucer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlyingBonus {
    pub pos: Vec2,
    /// Signed horizontal speed; the sign encodes the entry side
    pub speed: f32,
    pub active: bool,
}

impl FlyingBonus {
    /// An inactive saucer parked off-screen
    pub fn idle() -> Self {
        Self {
            pos: Vec2::new(BONUS_OFFSCREEN_X, BONUS_Y),
            speed: BONUS_SPEED,
            active: false,
        }
    }

    /// Enter from a random side, crossing toward the other
    pub fn spawn(rng: &mut Pcg32) -> Self {
        let (x, speed) = if rng.random_bool(0.5) {
            (PLAYFIELD_WIDTH, -BONUS_SPEED)
        } else {
            (BONUS_OFFSCREEN_X, BONUS_SPEED)
        };
        Self {
            pos: Vec2::new(x, BONUS_Y),
            speed,
            active: true,
        }
    }

    /// Move for one tick; returns true if the saucer just left the playfield
    /// (caller schedules the respawn delay)
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.pos.x += self.speed * dt;
        let exited = if self.speed < 0.0 {
            self.pos.x < BONUS_OFFSCREEN_X
        } else {
            self.pos.x > PLAYFIELD_WIDTH
        };
        if exited {
            self.active = false;
        }
        exited
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, 16.0 * SPRITE_PIXEL, 8.0 * SPRITE_PIXEL)
    }
}

/// Timed playback of the 10-frame blast sprite sequence
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExplosionAnim {
    pub pos: Vec2,
    pub frame: u8,
    pub timer: f32,
    pub active: bool,
}

impl ExplosionAnim {
    pub fn start(pos: Vec2) -> Self {
        Self {
            pos,
            frame: 0,
            timer: BLAST_FRAME_SECS,
            active: true,
        }
    }

    pub fn idle() -> Self {
        Self {
            pos: Vec2::ZERO,
            frame: 0,
            timer: 0.0,
            active: false,
        }
    }

    /// Advance one tick; returns true when the last frame has played out
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.timer -= dt;
        if self.timer < 0.0 {
            self.frame += 1;
            self.timer = BLAST_FRAME_SECS;
            if self.frame == 10 {
                return true;
            }
        }
        false
    }

    /// Hold the final frame instead of finishing (cannon wreck stays visible
    /// for the rest of the LifeLost countdown)
    pub fn clamp_last_frame(&mut self) {
        if self.frame > 9 {
            self.frame = 9;
        }
    }
}

/// Decorative formation shown on the title screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleScene {
    pub enemies: Vec<Enemy>,
    pub bonus: FlyingBonus,
    pub anim_timer: f32,
}

impl TitleScene {
    pub fn new() -> Self {
        let mut enemies = vec![
            Enemy::new(EnemyKind::C, Vec2::new(280.0, 415.0)),
            Enemy::new(EnemyKind::B, Vec2::new(290.0, 460.0)),
            Enemy::new(EnemyKind::A, Vec2::new(300.0, 505.0)),
        ];
        for enemy in &mut enemies {
            enemy.moving = false;
        }
        let mut bonus = FlyingBonus::idle();
        bonus.pos = Vec2::new(280.0, 370.0);
        bonus.active = true;
        Self {
            enemies,
            bonus,
            anim_timer: 0.0,
        }
    }

    /// Toggle the showcase march frames on a slow cycle
    pub fn animate(&mut self, dt: f32) {
        self.anim_timer += dt;
        if self.anim_timer > TITLE_ANIM_SECS {
            self.anim_timer = 0.0;
            for enemy in &mut self.enemies {
                enemy.toggle_frame();
            }
        }
    }
}

impl Default for TitleScene {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    /// 1-based wave counter
    pub wave: u32,
    pub cannon: Cannon,
    pub fleet: Fleet,
    pub shields: Vec<Shield>,
    /// Cleared for the rest of the wave once the fleet reaches the shield line
    pub shields_enabled: bool,
    /// At most one player projectile at a time
    pub player_shot: Option<Projectile>,
    pub enemy_shots: Vec<Projectile>,
    pub bonus: FlyingBonus,
    /// Seconds until the next bonus spawn while the saucer is inactive
    pub bonus_timer: f32,
    /// Blast played where the saucer was destroyed
    pub bonus_blast: ExplosionAnim,
    /// Blast played over the cannon during LifeLost
    pub cannon_blast: ExplosionAnim,
    /// Seconds until an enemy may drop another projectile
    pub enemy_shot_cooldown: f32,
    /// Confirm input is ignored while positive (carry-over suppression)
    pub confirm_ignore: f32,
    pub wave_cleared_timer: f32,
    pub life_lost_timer: f32,
    pub game_over_timer: f32,
    pub banner_visible: bool,
    pub banner_flash_timer: f32,
    /// Accumulator for the ambient beat
    pub beat_timer: f32,
    pub beat_step: u8,
    pub title: TitleScene,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh state on the title screen
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let fleet = Fleet::spawn(1);
        let shields = Self::build_shields(&mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Title,
            score: 0,
            lives: STARTING_LIVES,
            wave: 1,
            cannon: Cannon::new(),
            fleet,
            shields,
            shields_enabled: true,
            player_shot: None,
            enemy_shots: Vec::new(),
            bonus: FlyingBonus::idle(),
            bonus_timer: 0.0,
            bonus_blast: ExplosionAnim::idle(),
            cannon_blast: ExplosionAnim::idle(),
            enemy_shot_cooldown: 0.0,
            confirm_ignore: CONFIRM_IGNORE_SECS,
            wave_cleared_timer: 0.0,
            life_lost_timer: 0.0,
            game_over_timer: 0.0,
            banner_visible: false,
            banner_flash_timer: BANNER_FLASH_SECS,
            beat_timer: 0.0,
            beat_step: 0,
            title: TitleScene::new(),
            events: Vec::new(),
        }
    }

    /// Four pristine shields, cosmetic seeds drawn from the state RNG
    pub fn build_shields(rng: &mut Pcg32) -> Vec<Shield> {
        SHIELD_XS
            .iter()
            .map(|&x| Shield::new(Vec2::new(x, SHIELD_Y), rng))
            .collect()
    }

    /// Replace all shields with pristine ones (wave transition)
    pub fn rebuild_shields(&mut self) {
        self.shields = Self::build_shields(&mut self.rng);
    }

    /// The state-owned RNG; all simulation randomness flows through it
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Leave the title screen with counters reset
    pub fn start_game(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.wave = 1;
        self.shields_enabled = true;
        self.bonus_timer = self.roll_bonus_delay();
        self.fleet.step_timer = 0.0;
        self.phase = GamePhase::Playing;
        log::info!("New game (seed {})", self.seed);
    }

    /// Rebuild everything and return to the title screen
    pub fn reset(&mut self) {
        self.fleet = Fleet::spawn(1);
        self.rebuild_shields();
        self.shields_enabled = true;
        self.enemy_shots.clear();
        self.player_shot = None;
        self.bonus = FlyingBonus::idle();
        self.bonus_blast = ExplosionAnim::idle();
        self.cannon_blast = ExplosionAnim::idle();
        self.cannon.reset_position();
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.wave = 1;
        self.confirm_ignore = CONFIRM_IGNORE_SECS;
        self.phase = GamePhase::Title;
    }

    /// Random 20-30s delay before the next bonus appearance
    pub fn roll_bonus_delay(&mut self) -> f32 {
        self.rng.random_range(BONUS_MIN_DELAY..=BONUS_MAX_DELAY) as f32
    }

    /// One of the mystery score values, uniformly
    pub fn roll_bonus_score(&mut self) -> u32 {
        let index = self.rng.random_range(0..BONUS_SCORES.len());
        BONUS_SCORES[index]
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand this tick's audio notifications to the collaborator
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Banner alpha for the wave-cleared overlay: fade in to the midpoint of
    /// the countdown, then fade out
    pub fn wave_banner_opacity(&self) -> f32 {
        let timer = self.wave_cleared_timer;
        let midpoint = WAVE_CLEARED_SECS / 2.0;
        if timer <= 0.0 || timer >= WAVE_CLEARED_SECS {
            0.0
        } else if timer <= midpoint {
            timer / midpoint
        } else {
            (WAVE_CLEARED_SECS - timer) / midpoint
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannon_clamps_to_playfield() {
        let mut cannon = Cannon::new();
        cannon.move_by(-10_000.0);
        assert_eq!(cannon.x(), 0.0);
        cannon.move_by(10_000.0);
        assert_eq!(cannon.x(), PLAYFIELD_WIDTH - CANNON_WIDTH);
    }

    #[test]
    fn test_enemy_explosion_sequence() {
        let mut enemy = Enemy::new(EnemyKind::B, Vec2::new(100.0, 100.0));
        assert!(enemy.is_alive());

        enemy.explode();
        assert!(enemy.is_exploding());
        // A second hit while exploding must not restart the sequence
        let phase = enemy.phase();
        enemy.explode();
        assert_eq!(enemy.phase(), phase);

        // Three frames at 0.05s each
        let mut died_at = None;
        for step in 0..20 {
            if enemy.tick_explosion(0.02) {
                died_at = Some(step);
                break;
            }
        }
        let died_at = died_at.expect("enemy never finished exploding");
        assert!(enemy.is_dead());
        // 3 frames x 0.05s budget at 0.02s per tick: death lands past 0.15s
        assert!(died_at >= 7);
    }

    #[test]
    fn test_projectile_leaves_play_bounds() {
        let mut up = Projectile::new(Vec2::new(400.0, 200.0), PLAYER_SHOT_SPEED, ShotDirection::Up);
        for _ in 0..100 {
            up.advance(0.03);
        }
        assert!(!up.active);

        let mut down =
            Projectile::new(Vec2::new(400.0, 400.0), ENEMY_SHOT_SPEED, ShotDirection::Down);
        for _ in 0..100 {
            down.advance(0.03);
        }
        assert!(!down.active);
    }

    #[test]
    fn test_projectile_records_prev_y() {
        let mut shot = Projectile::new(Vec2::new(100.0, 500.0), 750.0, ShotDirection::Up);
        shot.advance(0.02);
        assert_eq!(shot.prev_y, 500.0);
        assert!(shot.pos.y < 500.0);
    }

    #[test]
    fn test_bonus_exits_and_deactivates() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut bonus = FlyingBonus::spawn(&mut rng);
        assert!(bonus.active);

        let mut exited = false;
        for _ in 0..2000 {
            if bonus.advance(0.03) {
                exited = true;
                break;
            }
        }
        assert!(exited);
        assert!(!bonus.active);
        // Further advances are no-ops once inactive
        assert!(!bonus.advance(0.03));
    }

    #[test]
    fn test_blast_anim_runs_ten_frames() {
        let mut blast = ExplosionAnim::start(Vec2::new(50.0, 145.0));
        let mut ticks = 0;
        while !blast.advance(0.05) {
            ticks += 1;
            assert!(ticks < 100, "blast never finished");
        }
        assert_eq!(blast.frame, 10);
        blast.clamp_last_frame();
        assert_eq!(blast.frame, 9);
    }

    #[test]
    fn test_wave_banner_opacity_triangle() {
        let mut state = GameState::new(1);
        state.wave_cleared_timer = WAVE_CLEARED_SECS;
        assert_eq!(state.wave_banner_opacity(), 0.0);
        state.wave_cleared_timer = WAVE_CLEARED_SECS / 2.0;
        assert!((state.wave_banner_opacity() - 1.0).abs() < 1e-6);
        state.wave_cleared_timer = WAVE_CLEARED_SECS / 4.0;
        assert!((state.wave_banner_opacity() - 0.5).abs() < 1e-6);
        state.wave_cleared_timer = 0.0;
        assert_eq!(state.wave_banner_opacity(), 0.0);
    }

    #[test]
    fn test_reset_round_trip() {
        let mut state = GameState::new(42);
        state.score = 990;
        state.lives = 1;
        state.wave = 4;
        state.shields_enabled = false;
        state.fleet.enemies.truncate(3);
        state.enemy_shots.push(Projectile::new(
            Vec2::new(100.0, 400.0),
            ENEMY_SHOT_SPEED,
            ShotDirection::Down,
        ));

        state.reset();

        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.wave, 1);
        assert_eq!(state.fleet.enemies.len(), FLEET_ROWS * FLEET_COLS);
        assert!(state.shields_enabled);
        assert_eq!(state.shields.len(), 4);
        assert!(state.shields.iter().all(|s| s.is_pristine()));
        assert!(state.enemy_shots.is_empty());
        assert!(state.player_shot.is_none());
        assert!(!state.bonus.active);
    }
}
