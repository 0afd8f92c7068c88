use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use tracing::{debug, info};

use crate::{
    ai::{self, Difficulty},
    config::{PADDLE_SPEED, SPEED_BOOST, WIN_SCORE},
    effects,
    entities::{Ball, Effect, Paddle, Particle, PowerUp, PowerUpKind, Side},
    physics,
    stats::Stats,
};

pub const MENU_OPTIONS: [&str; 5] = [
    "Two Players",
    "Versus AI",
    "AI Difficulty",
    "Statistics",
    "Quit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Playing,
    Paused,
    GameOver,
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameType {
    TwoPlayer,
    VsAi,
}

/// Things that happened during a tick that the loop may want to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PaddleHit(Side),
    Scored(Side),
    PowerUpCollected(Side, PowerUpKind),
    MatchWon(Side),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn add_point(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }
}

#[derive(Debug)]
pub struct GameState {
    pub mode: Mode,
    pub game_type: GameType,
    pub difficulty: Difficulty,
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    pub particles: Vec<Particle>,
    pub power_up: Option<PowerUp>,
    pub score: Score,
    pub stats: Stats,
    pub frame: u64,
    pub menu_selected: usize,
    /// Most recent ball positions, oldest first.
    pub trail: VecDeque<(f64, f64)>,
    pub rally: u32,
    pub last_hitter: Option<Side>,
    /// Frame at which an active slow effect is undone.
    pub slow_expires_at: Option<u64>,
    pub winner: Option<Side>,
    pub should_quit: bool,
}

impl GameState {
    pub fn new(stats: Stats) -> Self {
        Self {
            mode: Mode::Menu,
            game_type: GameType::TwoPlayer,
            difficulty: Difficulty::default(),
            ball: Ball::centered(),
            left: Paddle::new(),
            right: Paddle::new(),
            particles: Vec::new(),
            power_up: None,
            score: Score::default(),
            stats,
            frame: 0,
            menu_selected: 0,
            trail: VecDeque::new(),
            rally: 0,
            last_hitter: None,
            slow_expires_at: None,
            winner: None,
            should_quit: false,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Resets everything that belongs to a single match. Aggregate stats
    /// carry over.
    pub fn start_match(&mut self, game_type: GameType) {
        self.game_type = game_type;
        self.ball = Ball::centered();
        self.left = Paddle::new();
        self.right = Paddle::new();
        self.particles.clear();
        self.power_up = None;
        self.score = Score::default();
        self.frame = 0;
        self.trail.clear();
        self.rally = 0;
        self.last_hitter = None;
        self.slow_expires_at = None;
        self.winner = None;
        self.mode = Mode::Playing;
        info!(?game_type, difficulty = ?self.difficulty, "match started");
    }

    /// Advances the simulation by one tick. Only does anything while playing.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<GameEvent> {
        if self.mode != Mode::Playing {
            return Vec::new();
        }
        self.frame += 1;

        effects::expire(self);

        if self.game_type == GameType::VsAi {
            ai::update_paddle(
                &mut self.right,
                Side::Right.paddle_x(),
                &self.ball,
                self.difficulty,
                rng,
            );
        }

        let mut events = physics::step(self, rng);

        self.particles.retain_mut(|particle| particle.advance());
        if let Some(power_up) = self.power_up.as_mut() {
            if !power_up.advance() {
                self.power_up = None;
            }
        }
        effects::maybe_spawn_power_up(self, rng);

        let scorer = events.iter().find_map(|event| match event {
            GameEvent::Scored(side) => Some(*side),
            _ => None,
        });
        if let Some(side) = scorer {
            debug!(
                scorer = ?side,
                left = self.score.left,
                right = self.score.right,
                "point scored"
            );
            if self.score.get(side) >= WIN_SCORE {
                self.finish_match(side);
                events.push(GameEvent::MatchWon(side));
            }
        }

        events
    }

    fn finish_match(&mut self, winner: Side) {
        self.winner = Some(winner);
        self.mode = Mode::GameOver;
        self.stats.record_match(winner);
        info!(
            ?winner,
            left = self.score.left,
            right = self.score.right,
            "match finished"
        );
    }

    pub fn move_paddle(&mut self, side: Side, direction: f64) {
        let paddle = self.paddle_mut(side);
        let boost = if paddle.power_up == Some(PowerUpKind::Speed) {
            SPEED_BOOST
        } else {
            1.0
        };
        paddle.shift(direction * PADDLE_SPEED * boost);
    }

    fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match self.mode {
            Mode::Menu => self.handle_menu_key(key.code),
            Mode::Playing => self.handle_playing_key(key.code),
            Mode::Paused => match key.code {
                KeyCode::Char('p') | KeyCode::Char('P') => self.mode = Mode::Playing,
                KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
                _ => {}
            },
            Mode::GameOver => match key.code {
                KeyCode::Enter => self.mode = Mode::Menu,
                KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
                _ => {}
            },
            Mode::Stats => self.mode = Mode::Menu,
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        let last = MENU_OPTIONS.len() - 1;
        match code {
            KeyCode::Up | KeyCode::Char('w') => {
                self.menu_selected = if self.menu_selected > 0 {
                    self.menu_selected - 1
                } else {
                    last
                };
            }
            KeyCode::Down | KeyCode::Char('s') => {
                self.menu_selected = if self.menu_selected < last {
                    self.menu_selected + 1
                } else {
                    0
                };
            }
            KeyCode::Enter => match self.menu_selected {
                0 => self.start_match(GameType::TwoPlayer),
                1 => self.start_match(GameType::VsAi),
                2 => self.difficulty = self.difficulty.next(),
                3 => self.mode = Mode::Stats,
                4 => self.quit(),
                _ => {}
            },
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            _ => {}
        }
    }

    fn handle_playing_key(&mut self, code: KeyCode) {
        // arrows drive the right paddle unless the computer owns it
        let arrow_side = match self.game_type {
            GameType::TwoPlayer => Side::Right,
            GameType::VsAi => Side::Left,
        };
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') => self.move_paddle(Side::Left, -1.0),
            KeyCode::Char('s') | KeyCode::Char('S') => self.move_paddle(Side::Left, 1.0),
            KeyCode::Up => self.move_paddle(arrow_side, -1.0),
            KeyCode::Down => self.move_paddle(arrow_side, 1.0),
            KeyCode::Char('p') | KeyCode::Char('P') => self.mode = Mode::Paused,
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            _ => {}
        }
    }
}
