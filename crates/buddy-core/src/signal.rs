//! The external work signal that paces the battle.

use serde::{Deserialize, Serialize};

/// Session section of the bridge state written by the assistant plugin.
///
/// Only the fields the battle needs are kept; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: String,
    pub busy: bool,
    pub idle: bool,
    pub open_todos: u32,
    pub done_todos: u32,
    pub total_todos: u32,
}

/// Per-tick progress snapshot. Immutable for the duration of a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSignal {
    pub total_tasks: u32,
    pub done_tasks: u32,
    /// Always `total_tasks - done_tasks`.
    pub open_tasks: u32,
    pub busy: bool,
    pub idle: bool,
}

impl WorkSignal {
    pub fn new(total_tasks: u32, done_tasks: u32, busy: bool) -> Self {
        Self {
            total_tasks,
            done_tasks,
            open_tasks: total_tasks.saturating_sub(done_tasks),
            busy,
            idle: !busy,
        }
    }

    /// The signal used when no session exists.
    pub fn no_session() -> Self {
        Self {
            idle: true,
            ..Self::default()
        }
    }

    /// Derive the signal from the current session, if any.
    pub fn from_session(session: Option<&SessionInfo>) -> Self {
        match session {
            Some(session) => Self::new(session.total_todos, session.done_todos, session.busy),
            None => Self::no_session(),
        }
    }

    /// True once a session with tasks has none left open.
    pub fn all_tasks_complete(&self) -> bool {
        self.total_tasks > 0 && self.open_tasks == 0
    }
}
