//! Periodic refresh tick for the countdown display.
//!
//! The timer is scoped: it only produces ticks between [`Model::start`] and
//! [`Model::stop`]. Every start or stop bumps an internal tag, so a tick that
//! was already scheduled when the timer stopped is rejected when it arrives
//! and is never rescheduled. Dropping the owning widget therefore leaves no
//! callback running past the next interval.
//!
//! # Usage
//!
//! ```rust
//! use countdown_widget::timer;
//! use std::time::Duration;
//!
//! let mut ticker = timer::new(Duration::from_secs(1));
//! assert!(!ticker.running());
//!
//! let _first_tick = ticker.start();
//! assert!(ticker.running());
//!
//! ticker.stop();
//! assert!(!ticker.running());
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for timer instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message delivered once per interval while the timer runs.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The timer that scheduled this tick.
    pub id: i64,
    tag: i64,
}

/// Scoped tick source.
#[derive(Debug, Clone)]
pub struct Model {
    /// Time between ticks.
    pub interval: Duration,
    id: i64,
    tag: i64,
    running: bool,
}

/// Creates a stopped timer with the given interval.
pub fn new(interval: Duration) -> Model {
    Model {
        interval,
        id: next_id(),
        tag: 0,
        running: false,
    }
}

impl Model {
    /// Identifier carried by this timer's ticks.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Whether ticks are being scheduled.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Starts ticking and returns the command that delivers the first tick.
    ///
    /// Calling `start` on a running timer restarts the chain; the tick
    /// already in flight is discarded.
    pub fn start(&mut self) -> Cmd {
        self.running = true;
        self.tag += 1;
        tracing::trace!(id = self.id, tag = self.tag, "timer started");
        self.tick()
    }

    /// Cancels the tick chain.
    pub fn stop(&mut self) {
        if self.running {
            tracing::trace!(id = self.id, tag = self.tag, "timer stopped");
        }
        self.running = false;
        self.tag += 1;
    }

    /// Returns the next tick command when `msg` is a live tick of this timer.
    ///
    /// `None` means the message was not ours, was stale, or arrived after
    /// the timer stopped.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let tick = msg.downcast_ref::<TickMsg>()?;
        if !self.accepts(tick) {
            return None;
        }
        Some(self.tick())
    }

    fn accepts(&self, tick: &TickMsg) -> bool {
        self.running && tick.id == self.id && tick.tag == self.tag
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }
}

impl Default for Model {
    fn default() -> Self {
        new(Duration::from_millis(crate::countdown::COUNTDOWN_TICK_MS))
    }
}
