//! Headless buddy run: a mock assistant session drives the battle and events
//! are logged. `RUST_LOG=debug` shows every hit.

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use buddy_app::game_loop::spawn_battle_loop;
use buddy_app::mock::{MockSessionSource, UPDATE_INTERVAL_SECS};
use buddy_app::state::{HostCommand, SharedSnapshot};
use buddy_core::config::BattleConfig;
use buddy_sim::{BattleEngine, SimConfig};

/// Mock updates to run before exiting.
const DEMO_UPDATES: u32 = 60;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let seed = std::env::var("BUDDY_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(SimConfig::default().seed);

    let mut engine = BattleEngine::with_default_policies(SimConfig { seed }, BattleConfig::default())?;
    engine.add_hero("hero1", "soldier", 100.0);

    let latest: SharedSnapshot = Arc::new(Mutex::new(None));
    let handle = spawn_battle_loop(engine, latest)?;
    let mut source = MockSessionSource::new(seed);
    info!(seed, updates = DEMO_UPDATES, "buddy battle started");

    handle
        .commands
        .send(HostCommand::UpdateSession(Some(source.current())))?;
    for _ in 0..DEMO_UPDATES {
        std::thread::sleep(Duration::from_secs_f64(UPDATE_INTERVAL_SECS));
        let session = source.advance();
        info!(
            done = session.done_todos,
            total = session.total_todos,
            busy = session.busy,
            "work signal"
        );
        handle.commands.send(HostCommand::UpdateSession(Some(session)))?;

        if let Some(snapshot) = handle.snapshot() {
            info!(
                tick = snapshot.tick,
                phase = ?snapshot.state.phase,
                enemies = snapshot.state.enemies.len(),
                "battle status"
            );
        }
    }

    handle.shutdown();
    Ok(())
}
