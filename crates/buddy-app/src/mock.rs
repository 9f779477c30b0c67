//! Scripted work-signal source for running the companion without an assistant.
//!
//! Each `advance` is one bridge update: busy toggles every 3rd step, a task
//! completes every 4th step, and a finished session is replaced by a fresh one
//! with 3-7 tasks on the following step.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use buddy_core::signal::SessionInfo;

/// Seconds between mock bridge updates.
pub const UPDATE_INTERVAL_SECS: f64 = 2.0;

pub struct MockSessionSource {
    rng: ChaCha8Rng,
    step: u64,
    session_number: u64,
    total: u32,
    done: u32,
    busy: bool,
}

impl MockSessionSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            step: 0,
            session_number: 1,
            total: 5,
            done: 0,
            busy: false,
        }
    }

    /// Current session without advancing.
    pub fn current(&self) -> SessionInfo {
        SessionInfo {
            id: format!("mock-session-{}", self.session_number),
            busy: self.busy,
            idle: !self.busy,
            open_todos: self.total - self.done,
            done_todos: self.done,
            total_todos: self.total,
        }
    }

    /// Advance one update and return the new session.
    pub fn advance(&mut self) -> SessionInfo {
        self.step += 1;

        // A completed session is shown for one update before it is replaced.
        if self.done >= self.total {
            self.session_number += 1;
            self.done = 0;
            self.total = self.rng.gen_range(3..=7);
            return self.current();
        }

        if self.step % 3 == 0 {
            self.busy = !self.busy;
        }
        if self.step % 4 == 0 && self.done < self.total {
            self.done += 1;
        }

        self.current()
    }
}
