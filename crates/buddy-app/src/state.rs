//! State shared between the host loop thread and its readers.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use buddy_core::events::BattleEvent;
use buddy_core::signal::SessionInfo;
use buddy_core::state::BattleState;

/// Commands sent to the battle loop thread.
#[derive(Debug, Clone)]
pub enum HostCommand {
    /// Latest session from the work-signal source. `None` means no session.
    UpdateSession(Option<SessionInfo>),
    /// Stop ticking. Timers freeze.
    Pause,
    /// Resume ticking without replaying the paused interval.
    Resume,
    /// Shut down the loop thread gracefully.
    Shutdown,
}

/// What readers see after each tick.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostSnapshot {
    /// Number of ticks run so far.
    pub tick: u64,
    pub state: BattleState,
    /// Events of the tick that produced this snapshot.
    pub events: Vec<BattleEvent>,
}

/// Latest snapshot slot. Written only by the loop thread.
pub type SharedSnapshot = Arc<Mutex<Option<HostSnapshot>>>;
