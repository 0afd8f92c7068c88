use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc, Arc,
    },
    thread,
    time::Duration,
};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Key presses read off the terminal by a background thread. The game loop
/// drains whatever arrived since the last tick.
pub struct InputQueue {
    rx: mpsc::Receiver<KeyEvent>,
    running: Arc<AtomicBool>,
    reader: Option<thread::JoinHandle<()>>,
}

impl InputQueue {
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = mpsc::channel::<KeyEvent>();
        let running = Arc::new(AtomicBool::new(true));

        let flag = Arc::clone(&running);
        let reader = thread::Builder::new()
            .name("input".into())
            .spawn(move || read_keys(tx, flag))?;

        Ok(Self {
            rx,
            running,
            reader: Some(reader),
        })
    }

    /// Everything queued since the last call, oldest first.
    pub fn drain(&self) -> Vec<KeyEvent> {
        self.rx.try_iter().collect()
    }
}

impl Drop for InputQueue {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(reader) = self.reader.take() {
            if reader.join().is_err() {
                warn!("input thread panicked");
            }
        }
    }
}

fn read_keys(tx: mpsc::Sender<KeyEvent>, running: Arc<AtomicBool>) {
    while running.load(Ordering::Relaxed) {
        match event::poll(POLL_INTERVAL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(err) => {
                warn!("input poll failed: {err}");
                break;
            }
        }
        match event::read() {
            // Windows reports releases too
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if tx.send(key).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(err) => {
                warn!("input read failed: {err}");
                break;
            }
        }
    }
    debug!("input thread stopped");
}
