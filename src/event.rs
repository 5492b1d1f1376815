use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(#[allow(dead_code)] u16, #[allow(dead_code)] u16),
    /// SIGTERM or SIGHUP arrived; the main loop must exit so the terminal
    /// guard can restore the screen.
    Shutdown,
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        let shutdown = Arc::new(AtomicBool::new(false));
        #[cfg(unix)]
        {
            use signal_hook::consts::signal::{SIGHUP, SIGTERM};
            signal_hook::flag::register(SIGTERM, Arc::clone(&shutdown))?;
            signal_hook::flag::register(SIGHUP, Arc::clone(&shutdown))?;
        }

        thread::spawn(move || {
            loop {
                if shutdown.load(Ordering::Relaxed) {
                    let _ = tx.send(AppEvent::Shutdown);
                    return;
                }

                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key)) => {
                            if tx.send(AppEvent::Key(key)).is_err() {
                                return;
                            }
                        }
                        Ok(Event::Resize(w, h)) => {
                            if tx.send(AppEvent::Resize(w, h)).is_err() {
                                return;
                            }
                        }
                        _ => {}
                    }
                } else if tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Ok(Self { rx, _tx })
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
