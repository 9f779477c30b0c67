//! Battle loop thread. Ticks the engine at 30Hz with real elapsed time.
//!
//! The engine is moved into the thread, so it has exactly one writer. Commands
//! arrive via `mpsc` channel; the latest snapshot is published behind a mutex
//! for polling readers.

use std::io;
use std::ops::ControlFlow;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use buddy_core::events::BattleEvent;
use buddy_core::signal::{SessionInfo, WorkSignal};
use buddy_sim::BattleEngine;

use crate::state::{HostCommand, HostSnapshot, SharedSnapshot};

/// Host tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Largest `dt` handed to the engine. Longer gaps (a stall, a suspended
/// laptop) are treated as a single short step.
pub const MAX_TICK_DT: f64 = 0.1;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Clamp a measured frame interval to a sane engine `dt`.
pub fn clamp_dt(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64().min(MAX_TICK_DT)
}

/// Engine plus the host-side inputs it is ticked with.
pub struct HostLoop {
    engine: BattleEngine,
    session: Option<SessionInfo>,
    paused: bool,
    tick: u64,
}

impl HostLoop {
    pub fn new(engine: BattleEngine) -> Self {
        Self {
            engine,
            session: None,
            paused: false,
            tick: 0,
        }
    }

    /// Apply one command. `Break` means the loop should exit.
    pub fn handle_command(&mut self, command: HostCommand) -> ControlFlow<()> {
        match command {
            HostCommand::UpdateSession(session) => self.session = session,
            HostCommand::Pause => self.paused = true,
            HostCommand::Resume => self.paused = false,
            HostCommand::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Tick the engine once with the current signal. Paused loops return `None`.
    pub fn step(&mut self, dt: f64) -> Option<HostSnapshot> {
        if self.paused {
            return None;
        }

        let signal = WorkSignal::from_session(self.session.as_ref());
        let events = self.engine.tick(dt, &signal);
        self.tick += 1;
        log_events(&events);

        Some(HostSnapshot {
            tick: self.tick,
            state: self.engine.snapshot(),
            events,
        })
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn engine(&self) -> &BattleEngine {
        &self.engine
    }
}

fn log_events(events: &[BattleEvent]) {
    for event in events {
        match event {
            BattleEvent::PhaseChange { phase } => info!(?phase, "phase change"),
            BattleEvent::TodoResolved { count } => info!(count, "todo resolved"),
            BattleEvent::Victory => info!("victory"),
            other => debug!(kind = other.kind(), "battle event"),
        }
    }
}

/// Handle to a running battle loop thread.
pub struct LoopHandle {
    pub commands: mpsc::Sender<HostCommand>,
    pub latest: SharedSnapshot,
    thread: JoinHandle<()>,
}

impl LoopHandle {
    /// Latest published snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<HostSnapshot> {
        self.latest.lock().ok().and_then(|slot| slot.clone())
    }

    /// Ask the loop to stop and wait for it.
    pub fn shutdown(self) {
        let _ = self.commands.send(HostCommand::Shutdown);
        let _ = self.thread.join();
    }
}

/// Spawn the battle loop on a new thread, moving the engine into it.
pub fn spawn_battle_loop(engine: BattleEngine, latest: SharedSnapshot) -> io::Result<LoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<HostCommand>();
    let shared = latest.clone();

    let thread = std::thread::Builder::new()
        .name("buddy-battle-loop".into())
        .spawn(move || run_battle_loop(HostLoop::new(engine), cmd_rx, &shared))?;

    Ok(LoopHandle {
        commands: cmd_tx,
        latest,
        thread,
    })
}

/// The loop body. Runs until Shutdown or channel disconnect.
fn run_battle_loop(
    mut host: HostLoop,
    cmd_rx: mpsc::Receiver<HostCommand>,
    latest: &SharedSnapshot,
) {
    let mut last_frame = Instant::now();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(command) => {
                    let was_paused = host.is_paused();
                    if host.handle_command(command).is_break() {
                        return;
                    }
                    if was_paused && !host.is_paused() {
                        // Don't bill the paused interval to the first tick.
                        last_frame = Instant::now();
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick with real elapsed time
        let now = Instant::now();
        let dt = clamp_dt(now - last_frame);
        last_frame = now;

        // 3. Publish the snapshot
        if let Some(snapshot) = host.step(dt) {
            if let Ok(mut slot) = latest.lock() {
                *slot = Some(snapshot);
            }
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
