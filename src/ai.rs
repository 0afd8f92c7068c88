//! Computer opponent for the right paddle.

use rand::Rng;

use crate::{
    config::{AI_DEAD_ZONE, AI_NOISE_SPREAD, PADDLE_SPEED},
    entities::{Ball, Paddle},
    helpers::reflect_into_field,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Impossible,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiProfile {
    /// Multiplier on paddle speed.
    pub reaction: f64,
    /// 0.0 aims wildly, 1.0 aims perfectly.
    pub accuracy: f64,
}

impl Difficulty {
    pub fn profile(self) -> AiProfile {
        let (reaction, accuracy) = match self {
            Difficulty::Easy => (0.08, 0.3),
            Difficulty::Medium => (0.2, 0.45),
            Difficulty::Hard => (0.5, 0.7),
            Difficulty::Impossible => (0.7, 0.85),
        };
        AiProfile { reaction, accuracy }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Impossible,
            Difficulty::Impossible => Difficulty::Easy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Impossible => "Impossible",
        }
    }
}

/// Where the ball will cross `paddle_x`, folded back onto the field for wall
/// bounces. A ball travelling away is simply tracked at its current height.
pub fn predict_target(ball: &Ball, paddle_x: f64) -> f64 {
    let approaching = (paddle_x - ball.x) * ball.vx > 0.0;
    if !approaching {
        return ball.y;
    }
    let time_to_paddle = (paddle_x - ball.x) / ball.vx;
    reflect_into_field(ball.y + ball.vy * time_to_paddle)
}

pub fn update_paddle<R: Rng + ?Sized>(
    paddle: &mut Paddle,
    paddle_x: f64,
    ball: &Ball,
    difficulty: Difficulty,
    rng: &mut R,
) {
    let profile = difficulty.profile();
    let noise = (rng.random::<f64>() - 0.5) * (1.0 - profile.accuracy) * AI_NOISE_SPREAD;
    let target = predict_target(ball, paddle_x) + noise;

    let offset = target - paddle.center();
    if offset.abs() > AI_DEAD_ZONE {
        paddle.shift(offset.signum() * PADDLE_SPEED * profile.reaction);
    }
}
