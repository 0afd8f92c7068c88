use std::{
    fs::{self, File},
    io::{self, Stdout},
    sync::Mutex,
    thread::sleep,
    time::Instant,
};

use anyhow::{Context, Result};
use tracing::{error, info, trace};

mod ai;
mod config;
mod effects;
mod entities;
mod frame_buffer;
mod game;
mod game_theme;
mod helpers;
mod input;
mod physics;
mod render;
mod stats;
mod terminal;
#[cfg(test)]
mod test_support;

use crate::{
    config::{FRAME_HEIGHT, FRAME_WIDTH, LOG_FILE_NAME, TICK_RATE},
    frame_buffer::FrameBuffer,
    game::{GameEvent, GameState},
    input::InputQueue,
    stats::StatsStore,
    terminal::TerminalGuard,
};

struct App {
    state: GameState,
    store: StatsStore,
    frame: FrameBuffer,
    stdout: Stdout,
    saved: bool,
}

impl App {
    fn new(store: StatsStore) -> Self {
        let stats = store.load();
        Self {
            state: GameState::new(stats),
            store,
            frame: FrameBuffer::new(FRAME_WIDTH, FRAME_HEIGHT),
            stdout: io::stdout(),
            saved: false,
        }
    }

    fn run(&mut self) -> Result<()> {
        let input = InputQueue::spawn().context("failed to start the input thread")?;
        let mut rng = rand::rng();
        let mut deadline = Instant::now();

        loop {
            for key in input.drain() {
                self.state.handle_key(key);
            }
            if self.state.should_quit {
                break;
            }

            for event in self.state.tick(&mut rng) {
                match event {
                    GameEvent::PaddleHit(_) => self.frame.ring_bell(),
                    GameEvent::MatchWon(winner) => {
                        info!(?winner, "saving stats after match");
                        self.store.persist(&self.state.stats);
                    }
                    GameEvent::PowerUpCollected(side, kind) => {
                        trace!(?side, ?kind, rally = self.state.rally, "power-up event")
                    }
                    GameEvent::Scored(_) => {}
                }
            }

            render::draw(&self.state, &mut self.frame);
            self.frame
                .flush(&mut self.stdout, self.state.mode)
                .context("failed to draw frame")?;

            deadline += TICK_RATE;
            let now = Instant::now();
            if deadline > now {
                sleep(deadline - now);
            } else {
                // fell behind, don't try to catch up
                deadline = now;
            }
        }

        Ok(())
    }

    fn shutdown(&mut self) {
        if self.saved {
            return;
        }
        self.saved = true;
        self.store.persist(&self.state.stats);
        info!(games = self.state.stats.games_played, "stats saved on exit");
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn init_logging() {
    let log_dir = stats::app_dir();
    fs::create_dir_all(&log_dir).ok();

    // no log file is not a reason to refuse to play
    let Ok(log_file) = File::create(log_dir.join(LOG_FILE_NAME)) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

fn play() -> Result<(u32, u32)> {
    let store = StatsStore::default_location();
    info!(path = %store.path().display(), "starting");

    let guard = TerminalGuard::enter().context("failed to set up the terminal")?;
    let mut app = App::new(store);
    let result = app.run();

    app.shutdown();
    drop(guard);

    result.map(|()| (app.state.score.left, app.state.score.right))
}

fn main() {
    terminal::install_panic_hook();
    init_logging();

    match play() {
        Ok((left, right)) => {
            println!("Thanks for playing terminal pong! 🏓");
            println!("Final Score: {} - {}", left, right);
        }
        Err(err) => {
            error!("game ended with error: {err:#}");
            eprintln!("Game ended with error: {err:#}");
        }
    }
    info!("exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_saves_stats_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let mut app = App::new(StatsStore::new(&path));
        app.state.stats.games_played = 3;
        app.shutdown();
        assert_eq!(StatsStore::new(&path).load().games_played, 3);

        app.state.stats.games_played = 7;
        app.shutdown();
        drop(app);
        assert_eq!(StatsStore::new(&path).load().games_played, 3);
    }

    #[test]
    fn dropping_the_app_saves_when_shutdown_never_ran() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let mut app = App::new(StatsStore::new(&path));
        app.state.stats.longest_rally = 12;
        drop(app);

        assert_eq!(StatsStore::new(&path).load().longest_rally, 12);
    }
}
