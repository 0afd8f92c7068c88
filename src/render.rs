//! Draws the current mode into the frame buffer. Nothing here touches the
//! terminal; `FrameBuffer::flush` does that once per tick.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::Widget,
};
use tui_big_text::{BigText, PixelSize};

use crate::{
    config::{FRAME_WIDTH, HEIGHT, WIDTH, WIN_SCORE},
    entities::{Effect, Side},
    frame_buffer::FrameBuffer,
    game::{GameState, GameType, Mode, MENU_OPTIONS},
    game_theme::{ThemeColors, CLASSIC},
    helpers::{centered_col, centered_rect, field_to_screen},
};

const FIELD_BOTTOM: i32 = HEIGHT as i32 + 1;
const STATUS_ROW: i32 = FIELD_BOTTOM + 1;
const CONTROLS_ROW: i32 = FIELD_BOTTOM + 2;
const HINT_ROW: i32 = FIELD_BOTTOM + 3;

pub fn draw(state: &GameState, fb: &mut FrameBuffer) {
    match state.mode {
        Mode::Menu => draw_menu(state, fb),
        Mode::Playing => draw_playing(state, fb),
        Mode::Paused => {
            draw_playing(state, fb);
            draw_pause_overlay(fb);
        }
        Mode::GameOver => draw_game_over(state, fb),
        Mode::Stats => draw_stats(state, fb),
    }
}

fn put_centered(fb: &mut FrameBuffer, row: i32, text: &str, style: Style) {
    fb.put_str(centered_col(text), row, text, style);
}

/// Big-text banner, three rows tall, starting at `row`.
fn draw_banner(fb: &mut FrameBuffer, row: i32, text: &str, style: Style) {
    let area = Rect::new(0, 0, fb.width() as u16, 3);
    let mut buffer = Buffer::empty(area);
    BigText::builder()
        .pixel_size(PixelSize::Sextant)
        .style(style)
        .lines(vec![text.into()])
        .alignment(Alignment::Center)
        .build()
        .render(area, &mut buffer);
    fb.blit(&buffer, 0, row);
}

fn draw_frame_border(fb: &mut FrameBuffer, colors: &ThemeColors) {
    let style = ThemeColors::fg(colors.border);
    for x in 0..FRAME_WIDTH as i32 {
        fb.set_pixel(x, 0, '═', style);
        fb.set_pixel(x, FIELD_BOTTOM, '═', style);
    }
}

fn draw_menu(state: &GameState, fb: &mut FrameBuffer) {
    let colors = &CLASSIC;
    draw_frame_border(fb, colors);
    draw_banner(fb, 2, "PONG", ThemeColors::bold(colors.accent));
    put_centered(fb, 7, "first to 5 wins", ThemeColors::fg(colors.text));

    for (i, option) in MENU_OPTIONS.iter().enumerate() {
        let label = if i == 2 {
            format!("{}: {}", option, state.difficulty.label())
        } else {
            option.to_string()
        };
        let row = 10 + i as i32 * 2;
        if i == state.menu_selected {
            let text = format!("> {} <", label);
            let style = ThemeColors::bold(colors.ball).add_modifier(Modifier::ITALIC);
            put_centered(fb, row, &text, style);
        } else {
            put_centered(fb, row, &label, ThemeColors::fg(colors.paddle));
        }
    }

    put_centered(
        fb,
        CONTROLS_ROW,
        "↑/↓ select  |  Enter choose  |  Q quit",
        ThemeColors::fg(colors.text),
    );
}

fn draw_court(state: &GameState, fb: &mut FrameBuffer, colors: &ThemeColors) {
    draw_frame_border(fb, colors);

    let center = (WIDTH / 2.0) as i32;
    for row in 1..FIELD_BOTTOM {
        if row % 2 == 0 {
            fb.set_pixel(center, row, '│', ThemeColors::fg(colors.center_line));
        }
    }

    let score_style = ThemeColors::bold(colors.score);
    fb.put_str(center - 8, 0, &format!(" {} ", state.score.left), score_style);
    fb.put_str(center + 4, 0, &format!(" {} ", state.score.right), score_style);
}

fn draw_paddles(state: &GameState, fb: &mut FrameBuffer, colors: &ThemeColors) {
    for side in [Side::Left, Side::Right] {
        let paddle = state.paddle(side);
        let color = if paddle.power_up.is_some() {
            colors.paddle_powered
        } else {
            colors.paddle
        };
        let (col, top) = field_to_screen(side.paddle_x(), paddle.y);
        for i in 0..paddle.height.round() as i32 {
            fb.set_pixel(col, top + i, '█', ThemeColors::fg(color));
        }
    }
}

fn draw_ball(state: &GameState, fb: &mut FrameBuffer, colors: &ThemeColors) {
    let len = state.trail.len();
    for (i, &(x, y)) in state.trail.iter().enumerate() {
        let (col, row) = field_to_screen(x, y);
        let style = if i + 2 >= len {
            ThemeColors::fg(colors.trail)
        } else {
            ThemeColors::fg(colors.trail).add_modifier(Modifier::DIM)
        };
        fb.set_pixel(col, row, '·', style);
    }

    let (col, row) = field_to_screen(state.ball.x, state.ball.y);
    fb.set_pixel(col, row, '●', ThemeColors::bold(colors.ball));
}

fn draw_hud(state: &GameState, fb: &mut FrameBuffer, colors: &ThemeColors) {
    let text_style = ThemeColors::fg(colors.text);

    let mode_label = match state.game_type {
        GameType::TwoPlayer => "2 players".to_string(),
        GameType::VsAi => format!("vs AI ({})", state.difficulty.label()),
    };
    fb.put_str(1, STATUS_ROW, &mode_label, text_style);

    let rally = format!("rally {}", state.rally);
    put_centered(fb, STATUS_ROW, &rally, ThemeColors::bold(colors.score));

    let effects: Vec<String> = [Side::Left, Side::Right]
        .into_iter()
        .filter_map(|side| {
            state
                .paddle(side)
                .power_up
                .map(|kind| format!("{}:{}", side.label(), kind.label()))
        })
        .collect();
    if !effects.is_empty() {
        let text = effects.join(" ");
        let col = FRAME_WIDTH as i32 - 1 - text.chars().count() as i32;
        fb.put_str(col, STATUS_ROW, &text, ThemeColors::fg(colors.paddle_powered));
    }

    let controls = match state.game_type {
        GameType::TwoPlayer => "Left: W/S  |  Right: ↑/↓  |  P pause  |  Q quit",
        GameType::VsAi => "You: W/S or ↑/↓  |  P pause  |  Q quit",
    };
    put_centered(fb, CONTROLS_ROW, controls, text_style);
    put_centered(
        fb,
        HINT_ROW,
        &format!("First to {} wins!", WIN_SCORE),
        text_style,
    );
}

fn draw_playing(state: &GameState, fb: &mut FrameBuffer) {
    let colors = &CLASSIC;
    draw_court(state, fb, colors);
    if let Some(power_up) = &state.power_up {
        power_up.render(fb, colors);
    }
    for particle in &state.particles {
        particle.render(fb, colors);
    }
    draw_paddles(state, fb, colors);
    draw_ball(state, fb, colors);
    draw_hud(state, fb, colors);
}

fn draw_pause_overlay(fb: &mut FrameBuffer) {
    let colors = &CLASSIC;
    let style = ThemeColors::bold(colors.accent).add_modifier(Modifier::REVERSED);
    let lines = ["            ", "   PAUSED   ", " P  resume  ", " Q  quit    ", "            "];
    let area = centered_rect(12, lines.len() as u16, FRAME_WIDTH as u16, FIELD_BOTTOM as u16 + 1);
    for (i, line) in lines.iter().enumerate() {
        fb.put_str(area.x as i32, area.y as i32 + i as i32, line, style);
    }
}

fn draw_game_over(state: &GameState, fb: &mut FrameBuffer) {
    let colors = &CLASSIC;
    draw_frame_border(fb, colors);

    let winner = state.winner.unwrap_or(Side::Left);
    draw_banner(fb, 2, "GAME OVER", ThemeColors::bold(colors.side(winner)));

    let headline = match (state.game_type, winner) {
        (GameType::VsAi, Side::Left) => "YOU WIN!".to_string(),
        (GameType::VsAi, Side::Right) => "THE COMPUTER WINS".to_string(),
        (GameType::TwoPlayer, side) => format!("{} PLAYER WINS!", side.label()),
    };
    put_centered(fb, 8, &headline, ThemeColors::bold(colors.score));
    put_centered(
        fb,
        10,
        &format!("Final Score: {} - {}", state.score.left, state.score.right),
        ThemeColors::fg(colors.text),
    );
    put_centered(
        fb,
        12,
        &format!(
            "Longest rally ever: {}   Games played: {}",
            state.stats.longest_rally, state.stats.games_played
        ),
        ThemeColors::fg(colors.text),
    );
    put_centered(
        fb,
        CONTROLS_ROW,
        "Enter menu  |  Q quit",
        ThemeColors::fg(colors.ball),
    );
}

fn draw_stats(state: &GameState, fb: &mut FrameBuffer) {
    let colors = &CLASSIC;
    draw_frame_border(fb, colors);
    put_centered(fb, 2, "STATISTICS", ThemeColors::bold(colors.accent));

    let stats = &state.stats;
    let rows = [
        ("Games played", stats.games_played),
        ("Left wins", stats.wins.left),
        ("Right wins", stats.wins.right),
        ("Longest rally", stats.longest_rally),
        ("Average rally", stats.average_rally),
        ("Points played", stats.total_rallies),
        ("Power-ups collected", stats.power_ups_collected),
    ];
    for (i, (label, value)) in rows.iter().enumerate() {
        let line = format!("{:<22}{:>6}", label, value);
        put_centered(fb, 5 + i as i32 * 2, &line, ThemeColors::fg(colors.text));
    }

    put_centered(
        fb,
        CONTROLS_ROW,
        "press any key to return",
        ThemeColors::fg(colors.ball),
    );
}
