//! Particle bursts and power-up lifecycle.
//!
//! Power-up effects expire on a frame count stored next to the thing they
//! changed, and are undone inside the regular tick by [`expire`].

use std::f64::consts::TAU;

use rand::{seq::IndexedRandom, Rng};
use ratatui::style::Color;
use tracing::debug;

use crate::{
    config::{
        COLLECT_BURST, ENLARGED_PADDLE_HEIGHT, HEIGHT, PADDLE_HEIGHT, POWER_UP_INTERVAL,
        POWER_UP_RADIUS, POWER_UP_SPAWN_CHANCE, SIZE_DURATION, SLOW_DURATION, SLOW_FACTOR,
        SPEED_DURATION, WIDTH,
    },
    entities::{Particle, PowerUp, PowerUpKind, Side},
    game::GameState,
    game_theme::CLASSIC,
};

/// `count` particles flying out from `(x, y)` at evenly spaced angles.
pub fn spawn_burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    x: f64,
    y: f64,
    count: usize,
    color: Color,
    rng: &mut R,
) {
    for i in 0..count {
        let angle = i as f64 / count as f64 * TAU;
        let speed = rng.random_range(0.3..1.0);
        let life = rng.random_range(10..20);
        particles.push(Particle {
            x,
            y,
            // cells are about twice as tall as they are wide
            vx: angle.cos() * speed * 2.0,
            vy: angle.sin() * speed,
            life,
            max_life: life,
            color,
        });
    }
}

/// Rolls for a new power-up every `POWER_UP_INTERVAL` frames while none is live.
pub fn maybe_spawn_power_up<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    if state.frame % POWER_UP_INTERVAL != 0 || state.power_up.is_some() {
        return;
    }
    if rng.random::<f64>() >= POWER_UP_SPAWN_CHANCE {
        return;
    }
    let Some(&kind) = PowerUpKind::SPAWNABLE.choose(rng) else {
        return;
    };
    let x = WIDTH / 2.0 + rng.random_range(-10.0..10.0);
    let y = rng.random_range(3.0..HEIGHT - 3.0);
    debug!(?kind, x, y, "power-up spawned");
    state.power_up = Some(PowerUp::new(x, y, kind));
}

/// Hands the live power-up to `side` if the ball is on top of it.
pub fn try_collect<R: Rng + ?Sized>(
    state: &mut GameState,
    side: Side,
    rng: &mut R,
) -> Option<PowerUpKind> {
    let near = state
        .power_up
        .as_ref()
        .is_some_and(|p| p.is_near(state.ball.x, state.ball.y, POWER_UP_RADIUS));
    if !near {
        return None;
    }
    let power_up = state.power_up.take()?;

    apply(state, side, power_up.kind);
    state.stats.power_ups_collected += 1;
    spawn_burst(
        &mut state.particles,
        power_up.x,
        power_up.y,
        COLLECT_BURST,
        CLASSIC.power_up(power_up.kind),
        rng,
    );
    debug!(?side, kind = ?power_up.kind, "power-up collected");
    Some(power_up.kind)
}

pub fn apply(state: &mut GameState, side: Side, kind: PowerUpKind) {
    let frame = state.frame;
    let paddle = state.paddle_mut(side);
    paddle.power_up = Some(kind);

    match kind {
        PowerUpKind::Size => {
            paddle.height = ENLARGED_PADDLE_HEIGHT;
            paddle.expires_at = Some(frame + SIZE_DURATION);
            paddle.size_expires_at = Some(frame + SIZE_DURATION);
            paddle.clamp_to_field();
        }
        PowerUpKind::Speed => {
            paddle.expires_at = Some(frame + SPEED_DURATION);
        }
        PowerUpKind::Slow => {
            paddle.expires_at = Some(frame + SLOW_DURATION);
            state.ball.vx *= SLOW_FACTOR;
            state.ball.vy *= SLOW_FACTOR;
            state.slow_expires_at = Some(frame + SLOW_DURATION);
        }
        PowerUpKind::MultiBall => {
            paddle.expires_at = None;
        }
    }
}

/// Undoes every effect whose expiry frame has been reached.
pub fn expire(state: &mut GameState) {
    let frame = state.frame;
    for side in [Side::Left, Side::Right] {
        let paddle = state.paddle_mut(side);
        if paddle.size_expires_at.is_some_and(|at| frame >= at) {
            paddle.height = PADDLE_HEIGHT;
            paddle.clamp_to_field();
            paddle.size_expires_at = None;
        }
        if paddle.expires_at.is_some_and(|at| frame >= at) {
            paddle.power_up = None;
            paddle.expires_at = None;
        }
    }

    if state.slow_expires_at.is_some_and(|at| frame >= at) {
        // divides back out rather than restoring a saved velocity, so two
        // overlapping slows would not cancel cleanly
        state.ball.vx /= SLOW_FACTOR;
        state.ball.vy /= SLOW_FACTOR;
        state.slow_expires_at = None;
    }
}
