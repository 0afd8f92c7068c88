//! Ball integration and collision handling.
//!
//! One call to [`step`] is one tick of ball motion: trail bookkeeping, Euler
//! integration, wall bounces, paddle hits, scoring and the speed cap. There is
//! no swept collision, so a fast enough ball can skip over a paddle.

use rand::Rng;

use crate::{
    config::{
        BALL_RADIUS, BALL_SPEED, HEIGHT, HIT_ACCELERATION, HIT_BURST, MAX_BALL_VX, MAX_BALL_VY,
        PADDLE_HIT_DISTANCE, SCORE_BURST, TRAIL_LENGTH, WIDTH,
    },
    effects,
    entities::{Ball, Paddle, Side},
    game::{GameEvent, GameState},
    game_theme::CLASSIC,
};

pub fn step<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> Vec<GameEvent> {
    let mut events = Vec::new();

    state.trail.push_back((state.ball.x, state.ball.y));
    while state.trail.len() > TRAIL_LENGTH {
        state.trail.pop_front();
    }

    state.ball.x += state.ball.vx;
    state.ball.y += state.ball.vy;

    bounce_off_walls(&mut state.ball);

    for side in [Side::Left, Side::Right] {
        if !touches_paddle(&state.ball, state.paddle(side), side) {
            continue;
        }
        let paddle = state.paddle(side).clone();
        deflect(&mut state.ball, &paddle, side);
        state.rally += 1;
        state.last_hitter = Some(side);
        events.push(GameEvent::PaddleHit(side));

        effects::spawn_burst(
            &mut state.particles,
            state.ball.x,
            state.ball.y,
            HIT_BURST,
            CLASSIC.hit_burst,
            rng,
        );
        if let Some(kind) = effects::try_collect(state, side, rng) {
            events.push(GameEvent::PowerUpCollected(side, kind));
        }
    }

    if let Some(scorer) = scorer(&state.ball) {
        score_point(state, scorer, rng);
        events.push(GameEvent::Scored(scorer));
    }

    cap_speed(&mut state.ball);
    events
}

/// Reflects `vy` away from whichever wall the ball reached and pulls it back
/// onto the field.
pub fn bounce_off_walls(ball: &mut Ball) {
    let bottom = HEIGHT - 1.0;
    if ball.y <= 0.0 {
        ball.vy = ball.vy.abs();
        ball.y = 0.0;
    } else if ball.y >= bottom {
        ball.vy = -ball.vy.abs();
        ball.y = bottom;
    }
}

pub fn touches_paddle(ball: &Ball, paddle: &Paddle, side: Side) -> bool {
    (ball.x - side.paddle_x()).abs() < PADDLE_HIT_DISTANCE
        && ball.y >= paddle.y - BALL_RADIUS
        && ball.y <= paddle.y + paddle.height + BALL_RADIUS
}

/// Sends the ball back out, a little faster, at an angle set by where on the
/// paddle it struck: top edge -3, bottom edge +3.
pub fn deflect(ball: &mut Ball, paddle: &Paddle, side: Side) {
    ball.vx = side.away() * ball.vx.abs() * HIT_ACCELERATION;
    let fraction = (ball.y - paddle.y) / paddle.height;
    ball.vy = (fraction * 2.0 - 1.0) * MAX_BALL_VY;
    ball.x = side.paddle_x() + side.away();
}

fn scorer(ball: &Ball) -> Option<Side> {
    if ball.x <= 0.0 {
        Some(Side::Right)
    } else if ball.x >= WIDTH {
        Some(Side::Left)
    } else {
        None
    }
}

fn score_point<R: Rng + ?Sized>(state: &mut GameState, scorer: Side, rng: &mut R) {
    state.score.add_point(scorer);
    state.stats.record_rally(state.rally);

    // the serve heads toward the side that just won the point
    serve(&mut state.ball, -scorer.away(), rng);
    state.rally = 0;
    state.trail.clear();
    state.power_up = None;
    state.last_hitter = None;

    effects::spawn_burst(
        &mut state.particles,
        WIDTH / 2.0,
        HEIGHT / 2.0,
        SCORE_BURST,
        CLASSIC.side(scorer),
        rng,
    );
}

/// Re-centres the ball moving horizontally in `direction` with a random
/// vertical component in `[-1, 1]`.
pub fn serve<R: Rng + ?Sized>(ball: &mut Ball, direction: f64, rng: &mut R) {
    ball.x = WIDTH / 2.0;
    ball.y = HEIGHT / 2.0;
    ball.vx = BALL_SPEED * direction;
    ball.vy = rng.random_range(-1.0..=1.0);
}

pub fn cap_speed(ball: &mut Ball) {
    ball.vx = ball.vx.signum() * ball.vx.abs().min(MAX_BALL_VX);
    ball.vy = ball.vy.signum() * ball.vy.abs().min(MAX_BALL_VY);
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        config::LEFT_PADDLE_X,
        entities::{PowerUp, PowerUpKind},
        game::GameType,
        stats::Stats,
    };

    fn state() -> GameState {
        let mut state = GameState::new(Stats::default());
        state.start_match(GameType::TwoPlayer);
        state
    }

    #[test]
    fn free_flight_is_plain_euler_integration() {
        let mut state = state();
        let mut rng = StdRng::seed_from_u64(0);
        state.ball = Ball::new(30.0, 10.0, 1.0, 1.0);

        let events = step(&mut state, &mut rng);

        assert!(events.is_empty());
        assert_eq!(state.ball, Ball::new(31.0, 11.0, 1.0, 1.0));
        assert_eq!(state.score.left + state.score.right, 0);
        assert_eq!(state.rally, 0);
        assert_eq!(state.trail.back(), Some(&(30.0, 10.0)));
    }

    #[test]
    fn reaching_the_left_edge_scores_for_right_and_serves() {
        let mut state = state();
        let mut rng = StdRng::seed_from_u64(0);
        state.left.y = 0.0;
        state.rally = 4;
        state.power_up = Some(PowerUp::new(30.0, 10.0, PowerUpKind::Size));
        state.ball = Ball::new(1.0, 10.0, -1.0, 0.0);

        let events = step(&mut state, &mut rng);

        assert_eq!(events, vec![GameEvent::Scored(Side::Right)]);
        assert_eq!(state.score.right, 1);
        assert_eq!(state.score.left, 0);
        assert_eq!((state.ball.x, state.ball.y), (30.0, 10.0));
        assert_eq!(state.ball.vx, 1.0);
        assert!((-1.0..=1.0).contains(&state.ball.vy));
        assert_eq!(state.rally, 0);
        assert!(state.trail.is_empty());
        assert!(state.power_up.is_none());
        assert_eq!(state.stats.longest_rally, 4);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn reaching_the_right_edge_scores_for_left() {
        let mut state = state();
        let mut rng = StdRng::seed_from_u64(0);
        state.right.y = 0.0;
        state.ball = Ball::new(59.5, 10.0, 1.0, 0.0);

        assert_eq!(step(&mut state, &mut rng), vec![GameEvent::Scored(Side::Left)]);
        assert_eq!(state.score.left, 1);
        assert_eq!(state.ball.vx, -1.0);
    }

    #[test]
    fn paddle_hit_reverses_accelerates_and_angles_the_ball() {
        let mut state = state();
        let mut rng = StdRng::seed_from_u64(0);
        state.left.y = 8.0;
        state.ball = Ball::new(3.0, 9.0, -1.0, 0.0);

        let events = step(&mut state, &mut rng);

        assert_eq!(events, vec![GameEvent::PaddleHit(Side::Left)]);
        assert!((state.ball.vx - 1.08).abs() < 1e-12);
        assert!((state.ball.vy - -1.5).abs() < 1e-12);
        assert_eq!(state.ball.x, LEFT_PADDLE_X + 1.0);
        assert_eq!(state.rally, 1);
        assert_eq!(state.last_hitter, Some(Side::Left));
    }

    #[test]
    fn rally_counts_each_hit_exactly_once() {
        let mut state = state();
        let mut rng = StdRng::seed_from_u64(0);
        state.left.y = 8.0;
        state.right.y = 8.0;
        state.ball = Ball::new(3.0, 10.0, -1.0, 0.0);

        let mut hits = 0;
        for _ in 0..400 {
            // keep both paddles under the ball so the rally never ends
            state.left.y = (state.ball.y - 2.0).clamp(0.0, HEIGHT - 4.0);
            state.right.y = state.left.y;
            let before = state.rally;
            let events = step(&mut state, &mut rng);
            let hit = events
                .iter()
                .filter(|e| matches!(e, GameEvent::PaddleHit(_)))
                .count() as u32;
            assert!(hit <= 1);
            if events.iter().any(|e| matches!(e, GameEvent::Scored(_))) {
                assert_eq!(state.rally, 0);
            } else {
                assert_eq!(state.rally, before + hit);
            }
            hits += hit;
        }
        assert!(hits > 2);
    }

    #[test]
    fn right_paddle_sends_the_ball_left() {
        let mut state = state();
        let mut rng = StdRng::seed_from_u64(0);
        state.right.y = 8.0;
        state.ball = Ball::new(57.0, 10.0, 2.0, 0.0);

        step(&mut state, &mut rng);

        assert!(state.ball.vx < 0.0);
        assert!((state.ball.vx.abs() - 2.0 * HIT_ACCELERATION).abs() < 1e-12);
        assert_eq!(state.ball.vy, 0.0);
        assert_eq!(state.ball.x, WIDTH - 2.0);
    }

    #[test]
    fn walls_reflect_and_clamp() {
        let mut ball = Ball::new(30.0, 20.5, 1.0, 1.0);
        bounce_off_walls(&mut ball);
        assert_eq!(ball.y, HEIGHT - 1.0);
        assert_eq!(ball.vy, -1.0);

        let mut ball = Ball::new(30.0, -0.7, 1.0, -2.0);
        bounce_off_walls(&mut ball);
        assert_eq!(ball.y, 0.0);
        assert_eq!(ball.vy, 2.0);
    }

    #[test]
    fn speed_cap_preserves_sign() {
        let mut ball = Ball::new(0.0, 0.0, -9.0, 4.0);
        cap_speed(&mut ball);
        assert_eq!((ball.vx, ball.vy), (-MAX_BALL_VX, MAX_BALL_VY));
    }

    #[test]
    fn invariants_hold_over_a_long_random_game() {
        let mut state = state();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..5_000 {
            state.left.y = rng.random_range(0.0..=HEIGHT - state.left.height);
            state.right.y = rng.random_range(0.0..=HEIGHT - state.right.height);
            step(&mut state, &mut rng);

            assert!(state.ball.vx.abs() <= MAX_BALL_VX);
            assert!(state.ball.vy.abs() <= MAX_BALL_VY);
            assert!((0.0..=HEIGHT - 1.0).contains(&state.ball.y));
            assert!(state.trail.len() <= TRAIL_LENGTH);
        }
    }

    #[test]
    fn trail_keeps_only_the_latest_positions() {
        let mut state = state();
        let mut rng = StdRng::seed_from_u64(0);
        state.ball = Ball::new(20.0, 10.0, 1.0, 0.0);
        for _ in 0..8 {
            step(&mut state, &mut rng);
        }
        let xs: Vec<f64> = state.trail.iter().map(|(x, _)| *x).collect();
        assert_eq!(xs, vec![23.0, 24.0, 25.0, 26.0, 27.0]);
    }

    // No swept collision: a ball that starts just outside the hit window and
    // moves far enough in one tick passes the paddle and scores.
    #[test]
    fn fast_ball_can_tunnel_through_a_paddle() {
        let mut state = state();
        let mut rng = StdRng::seed_from_u64(0);
        state.left.y = 8.0;
        state.ball = Ball::new(2.6, 10.0, -MAX_BALL_VX, 0.0);

        let events = step(&mut state, &mut rng);

        assert_eq!(events, vec![GameEvent::Scored(Side::Right)]);
    }

    #[test]
    fn hitting_near_a_power_up_collects_it_for_the_hitter() {
        let mut state = state();
        let mut rng = StdRng::seed_from_u64(0);
        state.left.y = 8.0;
        state.power_up = Some(PowerUp::new(3.0, 9.5, PowerUpKind::Size));
        state.ball = Ball::new(3.0, 9.0, -1.0, 0.0);

        let events = step(&mut state, &mut rng);

        assert!(events.contains(&GameEvent::PowerUpCollected(Side::Left, PowerUpKind::Size)));
        assert!(state.power_up.is_none());
        assert_eq!(state.left.power_up, Some(PowerUpKind::Size));
        assert_eq!(state.stats.power_ups_collected, 1);
    }

    #[test]
    fn free_flight_over_a_power_up_leaves_it_alone() {
        let mut state = state();
        let mut rng = StdRng::seed_from_u64(0);
        state.last_hitter = Some(Side::Left);
        state.power_up = Some(PowerUp::new(31.0, 11.0, PowerUpKind::Slow));
        state.ball = Ball::new(30.0, 10.0, 1.0, 1.0);

        let events = step(&mut state, &mut rng);

        assert!(events.is_empty());
        assert_eq!(state.ball, Ball::new(31.0, 11.0, 1.0, 1.0));
        assert!(state.power_up.is_some());
        assert_eq!(state.left.power_up, None);
        assert_eq!(state.stats.power_ups_collected, 0);
    }

    #[test]
    fn nothing_is_collected_before_the_first_hit() {
        let mut state = state();
        let mut rng = StdRng::seed_from_u64(0);
        state.power_up = Some(PowerUp::new(29.0, 10.0, PowerUpKind::Speed));
        state.ball = Ball::new(30.0, 10.0, -1.0, 0.0);

        assert!(step(&mut state, &mut rng).is_empty());
        assert!(state.power_up.is_some());
    }
}
