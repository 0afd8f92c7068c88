use std::f64::consts::TAU;

use ratatui::style::{Color, Modifier, Style};

use crate::{
    config::{
        BALL_SPEED, HEIGHT, LEFT_PADDLE_X, PADDLE_HEIGHT, PARTICLE_GRAVITY, POWER_UP_LIFE,
        RIGHT_PADDLE_X, WIDTH,
    },
    frame_buffer::FrameBuffer,
    game_theme::ThemeColors,
    helpers::field_to_screen,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn paddle_x(self) -> f64 {
        match self {
            Side::Left => LEFT_PADDLE_X,
            Side::Right => RIGHT_PADDLE_X,
        }
    }

    /// +1 for the direction that points away from this side's paddle.
    pub fn away(self) -> f64 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "LEFT",
            Side::Right => "RIGHT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Ball {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self { x, y, vx, vy }
    }

    pub fn centered() -> Self {
        Self::new(WIDTH / 2.0, HEIGHT / 2.0, BALL_SPEED, BALL_SPEED)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Speed,
    Size,
    Slow,
    /// Never spawned.
    MultiBall,
}

impl PowerUpKind {
    pub const SPAWNABLE: [PowerUpKind; 3] = [PowerUpKind::Speed, PowerUpKind::Size, PowerUpKind::Slow];

    pub fn glyph(self) -> char {
        match self {
            PowerUpKind::Speed => 'S',
            PowerUpKind::Size => 'L',
            PowerUpKind::Slow => 'W',
            PowerUpKind::MultiBall => 'M',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::Size => "size",
            PowerUpKind::Slow => "slow",
            PowerUpKind::MultiBall => "multi-ball",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub y: f64,
    pub height: f64,
    pub power_up: Option<PowerUpKind>,
    /// Frame at which `power_up` wears off.
    pub expires_at: Option<u64>,
    /// Frame at which an enlarged paddle shrinks back, independent of
    /// `power_up`.
    pub size_expires_at: Option<u64>,
}

impl Paddle {
    pub fn new() -> Self {
        Self {
            y: HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
            height: PADDLE_HEIGHT,
            power_up: None,
            expires_at: None,
            size_expires_at: None,
        }
    }

    pub fn center(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Moves by `dy`, keeping the whole paddle on the field.
    pub fn shift(&mut self, dy: f64) {
        self.y = (self.y + dy).clamp(0.0, HEIGHT - self.height);
    }

    pub fn clamp_to_field(&mut self) {
        self.shift(0.0);
    }
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient things that live for a number of ticks and draw themselves.
pub trait Effect {
    /// Steps one tick. Returns `false` once the effect is spent.
    fn advance(&mut self) -> bool;

    fn render(&self, fb: &mut FrameBuffer, colors: &ThemeColors);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub life: u32,
    pub max_life: u32,
    pub color: Color,
}

impl Particle {
    pub fn life_fraction(&self) -> f64 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f64 / self.max_life as f64
        }
    }

    pub fn glyph(&self) -> char {
        match self.life_fraction() {
            f if f > 0.75 => '*',
            f if f > 0.5 => '+',
            f if f > 0.25 => '·',
            _ => '.',
        }
    }
}

impl Effect for Particle {
    fn advance(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }

    fn render(&self, fb: &mut FrameBuffer, _colors: &ThemeColors) {
        if !(0.0..HEIGHT).contains(&self.y) {
            return;
        }
        let (col, row) = field_to_screen(self.x, self.y);
        let mut style = Style::default().fg(self.color);
        if self.life_fraction() <= 0.25 {
            style = style.add_modifier(Modifier::DIM);
        }
        fb.set_pixel(col, row, self.glyph(), style);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub x: f64,
    pub y: f64,
    pub kind: PowerUpKind,
    pub life: u32,
    pub pulse: f64,
}

impl PowerUp {
    pub fn new(x: f64, y: f64, kind: PowerUpKind) -> Self {
        Self {
            x,
            y,
            kind,
            life: POWER_UP_LIFE,
            pulse: 0.0,
        }
    }

    pub fn is_near(&self, x: f64, y: f64, radius: f64) -> bool {
        (self.x - x).hypot(self.y - y) <= radius
    }
}

impl Effect for PowerUp {
    fn advance(&mut self) -> bool {
        self.pulse = (self.pulse + 0.2) % TAU;
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }

    fn render(&self, fb: &mut FrameBuffer, colors: &ThemeColors) {
        let (col, row) = field_to_screen(self.x, self.y);
        let mut style = Style::default().fg(colors.power_up(self.kind));
        if self.pulse.sin() > 0.0 {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        fb.set_pixel(col - 1, row, '[', style);
        fb.set_pixel(col, row, self.kind.glyph(), style);
        fb.set_pixel(col + 1, row, ']', style);
    }
}
