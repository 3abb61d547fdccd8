//! Fixed-timestep simulation driver
//!
//! The host calls [`tick`] once per frame with sampled input. All state
//! mutation happens here or in the entity methods it calls; nothing in the
//! simulation reads wall-clock time or any RNG other than the state's own.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::overlaps;
use super::state::{
    ExplosionAnim, FlyingBonus, GameEvent, GamePhase, GameState, Projectile, ShotDirection,
};
use crate::consts::*;

/// Input sampled by the host for one tick
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub confirm: bool,
}

/// Advance the simulation by `dt` seconds.
///
/// A non-finite or non-positive `dt` is rejected with a warning and the
/// tick becomes a no-op; oversized steps (tab switch, debugger pause) are
/// clamped so a single frame can never teleport entities.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if !dt.is_finite() || dt <= 0.0 {
        log::warn!("Rejecting invalid tick dt: {dt}");
        return;
    }
    let dt = dt.min(MAX_TICK_DT);

    if state.confirm_ignore > 0.0 {
        state.confirm_ignore -= dt;
    }

    match state.phase {
        GamePhase::Title => tick_title(state, input, dt),
        GamePhase::Playing => tick_playing(state, input, dt),
        GamePhase::WaveCleared => tick_wave_cleared(state, input, dt),
        GamePhase::LifeLost => tick_life_lost(state, dt),
        GamePhase::GameOver => tick_game_over(state, input, dt),
    }
}

fn tick_title(state: &mut GameState, input: &TickInput, dt: f32) {
    state.title.animate(dt);
    if (input.confirm || input.fire) && state.confirm_ignore <= 0.0 {
        state.start_game();
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    // Finish any in-flight explosions before anything can move; a cleared
    // wave ends the phase immediately
    advance_explosions(state, dt);
    if state.fleet.reap_dead() {
        state.wave_cleared_timer = WAVE_CLEARED_SECS;
        state.phase = GamePhase::WaveCleared;
        log::info!("Wave {} cleared", state.wave);
        return;
    }

    advance_bonus(state, dt);
    advance_beat(state, dt);
    roll_enemy_shot(state, dt);

    // Player input
    if input.move_left {
        state.cannon.move_by(-CANNON_SPEED * dt);
    }
    if input.move_right {
        state.cannon.move_by(CANNON_SPEED * dt);
    }
    if input.fire && state.player_shot.is_none() {
        let muzzle = state.cannon.muzzle();
        state.player_shot = Some(Projectile::new(
            Vec2::new(muzzle.x - SHOT_WIDTH / 2.0, muzzle.y - SHOT_HEIGHT),
            PLAYER_SHOT_SPEED,
            ShotDirection::Up,
        ));
        state.push_event(GameEvent::PlayerFired);
    }

    // Fleet march
    state.fleet.step_timer += dt;
    let tempo = state.fleet.current_tempo();
    if state.fleet.step_timer >= tempo {
        state.fleet.step_timer -= tempo;
        let result = state.fleet.advance();
        if result.crossed_shield_line && state.shields_enabled {
            state.shields_enabled = false;
            log::info!("Fleet crossed the shield line; shields down for wave {}", state.wave);
        }
        if result.reached_bottom {
            enter_game_over(state);
            return;
        }
    }

    advance_player_shot(state, dt);
    advance_enemy_shots(state, dt);
}

fn tick_wave_cleared(state: &mut GameState, _input: &TickInput, dt: f32) {
    // Projectiles and the saucer keep flying under the banner, and a stray
    // enemy shot can still cost a life
    advance_bonus(state, dt);
    advance_player_shot(state, dt);
    advance_enemy_shots(state, dt);
    if state.phase != GamePhase::WaveCleared {
        // Cannon was hit; the wave advance resolves after the respawn
        return;
    }

    state.wave_cleared_timer -= dt;
    if state.wave_cleared_timer <= 0.0 {
        state.wave += 1;
        state.fleet = super::fleet::Fleet::spawn(state.wave);
        state.rebuild_shields();
        state.shields_enabled = true;
        state.enemy_shots.clear();
        state.player_shot = None;
        state.cannon.reset_position();
        state.bonus = FlyingBonus::idle();
        state.bonus_timer = state.roll_bonus_delay();
        state.phase = GamePhase::Playing;
        log::info!("Starting wave {}", state.wave);
    }
}

fn tick_life_lost(state: &mut GameState, dt: f32) {
    // The wreck animation holds its last frame for the rest of the pause
    if state.cannon_blast.advance(dt) {
        state.cannon_blast.clamp_last_frame();
    }
    if state.bonus_blast.advance(dt) {
        state.bonus_blast = ExplosionAnim::idle();
    }
    // Explosions already in flight finish, but reaping never changes phase
    // here; a simultaneous wave clear resolves after the respawn
    advance_explosions(state, dt);
    state.fleet.reap_dead();

    state.life_lost_timer -= dt;
    if state.life_lost_timer > 0.0 {
        return;
    }

    state.lives -= 1;
    state.cannon_blast = ExplosionAnim::idle();
    if state.lives == 0 {
        enter_game_over(state);
    } else {
        state.cannon.reset_position();
        state.fleet.set_moving(true);
        state.phase = GamePhase::Playing;
        log::debug!("Respawned; {} lives left", state.lives);
    }
}

fn tick_game_over(state: &mut GameState, input: &TickInput, dt: f32) {
    state.banner_flash_timer -= dt;
    if state.banner_flash_timer <= 0.0 {
        state.banner_visible = !state.banner_visible;
        state.banner_flash_timer = BANNER_FLASH_SECS;
    }

    state.game_over_timer -= dt;
    let confirmed = input.confirm && state.confirm_ignore <= 0.0;
    if confirmed || state.game_over_timer <= 0.0 {
        log::info!("Run over: score {}, wave {}", state.score, state.wave);
        state.reset();
    }
}

fn enter_game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.game_over_timer = GAME_OVER_SECS;
    state.confirm_ignore = CONFIRM_IGNORE_SECS;
    state.banner_visible = true;
    state.banner_flash_timer = BANNER_FLASH_SECS;
    state.fleet.set_moving(false);
}

/// Advance remnant timers for every exploding enemy
fn advance_explosions(state: &mut GameState, dt: f32) {
    for enemy in &mut state.fleet.enemies {
        enemy.tick_explosion(dt);
    }
}

/// Saucer movement, spawn scheduling, and its blast animation
fn advance_bonus(state: &mut GameState, dt: f32) {
    if state.bonus_blast.advance(dt) {
        state.bonus_blast = ExplosionAnim::idle();
    }
    if state.bonus.active {
        if state.bonus.advance(dt) {
            state.bonus_timer = state.roll_bonus_delay();
        }
    } else if state.phase == GamePhase::Playing {
        state.bonus_timer -= dt;
        if state.bonus_timer <= 0.0 {
            state.bonus = FlyingBonus::spawn(state.rng());
            state.push_event(GameEvent::BonusSpawned);
        }
    }
}

/// The ambient four-step beat, tracking fleet tempo within audible bounds
fn advance_beat(state: &mut GameState, dt: f32) {
    let interval = state
        .fleet
        .current_tempo()
        .clamp(BEAT_MIN_INTERVAL, BEAT_MAX_INTERVAL);
    state.beat_timer += dt;
    if state.beat_timer >= interval {
        state.beat_timer = 0.0;
        let step = state.beat_step;
        state.push_event(GameEvent::TempoTick { step });
        state.beat_step = (state.beat_step + 1) % BEAT_STEPS;
    }
}

/// Chance roll for an enemy projectile from a random bottom-most enemy
fn roll_enemy_shot(state: &mut GameState, dt: f32) {
    if state.enemy_shot_cooldown > 0.0 {
        state.enemy_shot_cooldown -= dt;
        return;
    }
    if state.enemy_shots.len() >= MAX_ENEMY_SHOTS {
        return;
    }
    let chance = (0.01 + 0.005 * state.wave as f64).min(0.1);
    if !state.rng().random_bool(chance) {
        return;
    }
    let shooters = state.fleet.bottom_shooters();
    if shooters.is_empty() {
        return;
    }
    let pick = state.rng().random_range(0..shooters.len());
    let Some(shooter) = state.fleet.enemies.get(shooters[pick]) else {
        log::warn!("Shooter candidate {} vanished before firing", shooters[pick]);
        return;
    };
    let origin = Vec2::new(shooter.pos.x + 8.0, shooter.pos.y);
    state
        .enemy_shots
        .push(Projectile::new(origin, ENEMY_SHOT_SPEED, ShotDirection::Down));
    state.enemy_shot_cooldown = (1.0 - 0.1 * state.wave as f32).max(0.3);
}

/// Move the player projectile and resolve its collisions: shields first,
/// then enemies front to back, then the saucer
fn advance_player_shot(state: &mut GameState, dt: f32) {
    let Some(mut shot) = state.player_shot.take() else {
        return;
    };
    shot.advance(dt);

    if shot.active && state.shields_enabled {
        for shield in &mut state.shields {
            if shield.check_collision(&mut shot) {
                break;
            }
        }
    }

    if shot.active {
        let shot_bounds = shot.bounds();
        for index in 0..state.fleet.enemies.len() {
            let enemy = &state.fleet.enemies[index];
            if !enemy.is_alive() || !overlaps(&shot_bounds, &enemy.bounds()) {
                continue;
            }
            let kind = enemy.kind;
            state.fleet.enemies[index].explode();
            state.score += kind.score_value();
            state.push_event(GameEvent::EnemyHit);
            shot.active = false;
            break;
        }
    }

    if shot.active && state.bonus.active && overlaps(&shot.bounds(), &state.bonus.bounds()) {
        let award = state.roll_bonus_score();
        state.score += award;
        state.push_event(GameEvent::BonusHit);
        state.bonus_blast = ExplosionAnim::start(state.bonus.pos);
        state.bonus = FlyingBonus::idle();
        state.bonus_timer = state.roll_bonus_delay();
        shot.active = false;
        log::debug!("Bonus destroyed for {award}");
    }

    state.player_shot = shot.active.then_some(shot);
}

/// Move enemy projectiles, erode shields, and detect the cannon hit
fn advance_enemy_shots(state: &mut GameState, dt: f32) {
    let mut cannon_hit = false;
    for shot in &mut state.enemy_shots {
        shot.advance(dt);
        if shot.active && state.shields_enabled {
            for shield in &mut state.shields {
                if shield.check_collision(shot) {
                    break;
                }
            }
        }
        if shot.active && overlaps(&shot.bounds(), &state.cannon.bounds()) {
            shot.active = false;
            cannon_hit = true;
        }
    }
    state.enemy_shots.retain(|shot| shot.active);

    if cannon_hit && matches!(state.phase, GamePhase::Playing | GamePhase::WaveCleared) {
        state.push_event(GameEvent::CannonHit);
        state.enemy_shots.clear();
        state.player_shot = None;
        state.bonus = FlyingBonus::idle();
        state.bonus_timer = state.roll_bonus_delay();
        state.cannon_blast = ExplosionAnim::start(Vec2::new(state.cannon.x(), state.cannon.y));
        state.fleet.set_moving(false);
        state.life_lost_timer = LIFE_LOST_SECS;
        state.phase = GamePhase::LifeLost;
        log::debug!("Cannon destroyed");
    }
}
