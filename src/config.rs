//! Fixed tuning constants. The game has no runtime configuration; everything
//! that shapes play lives here.

use std::time::Duration;

/// Playfield size in character cells.
pub const WIDTH: f64 = 60.0;
pub const HEIGHT: f64 = 20.0;

/// Frame buffer size: the playfield, its border, and the HUD rows below it.
pub const FRAME_WIDTH: usize = WIDTH as usize + 2;
pub const FRAME_HEIGHT: usize = HEIGHT as usize + 5;

pub const TICK_RATE: Duration = Duration::from_millis(33);

// Paddles
pub const PADDLE_HEIGHT: f64 = 4.0;
pub const ENLARGED_PADDLE_HEIGHT: f64 = 6.0;
pub const PADDLE_SPEED: f64 = 2.0;
pub const SPEED_BOOST: f64 = 1.5;
pub const LEFT_PADDLE_X: f64 = 1.0;
pub const RIGHT_PADDLE_X: f64 = WIDTH - 1.0;

// Ball
pub const BALL_SPEED: f64 = 1.0;
pub const BALL_RADIUS: f64 = 0.5;
pub const MAX_BALL_VX: f64 = 3.5;
pub const MAX_BALL_VY: f64 = 3.0;
pub const HIT_ACCELERATION: f64 = 1.08;
pub const PADDLE_HIT_DISTANCE: f64 = 1.5;
pub const TRAIL_LENGTH: usize = 5;

pub const WIN_SCORE: u32 = 5;

// AI
pub const AI_NOISE_SPREAD: f64 = 10.0;
pub const AI_DEAD_ZONE: f64 = 0.5;

// Particles
pub const PARTICLE_GRAVITY: f64 = 0.05;
pub const HIT_BURST: usize = 8;
pub const SCORE_BURST: usize = 20;
pub const COLLECT_BURST: usize = 12;

// Power-ups (durations in ticks)
pub const POWER_UP_INTERVAL: u64 = 300;
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.5;
pub const POWER_UP_LIFE: u32 = 240;
pub const POWER_UP_RADIUS: f64 = 2.0;
pub const SIZE_DURATION: u64 = 300;
pub const SLOW_DURATION: u64 = 150;
pub const SPEED_DURATION: u64 = 300;
pub const SLOW_FACTOR: f64 = 0.7;

// Files
pub const APP_DIR_NAME: &str = "terminal-pong";
pub const STATS_FILE_NAME: &str = "stats.json";
pub const LOG_FILE_NAME: &str = "pong.log";
