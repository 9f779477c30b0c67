//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Battle phase (top-level state).
///
/// `Dormant -> SessionStart -> Combat <-> ResolveTodo`, `Combat -> Victory -> Dormant`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlePhase {
    /// No session detected; waiting for work.
    #[default]
    Dormant,
    /// Single-tick entrance beat.
    SessionStart,
    /// Heroes and enemies fight while enemies spawn.
    Combat,
    /// A task completed; the board is cleared.
    ResolveTodo,
    /// Every task is done.
    Victory,
}

impl BattlePhase {
    /// Whether heroes and enemies are on the field in a fighting sense.
    pub fn is_active_battle(self) -> bool {
        matches!(self, BattlePhase::Combat | BattlePhase::ResolveTodo)
    }

    /// Whether the spawner may create enemies in this phase.
    pub fn can_spawn_enemies(self) -> bool {
        self == BattlePhase::Combat
    }
}

/// Hero combat status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatStatus {
    #[default]
    Combat,
    /// Incapacitated and recovering. Heroes never die permanently.
    Downed,
}

/// Everything an entity can be doing in a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    #[default]
    Idle,
    Walk,
    Attack,
    /// Hero skill hit, damage scaled by the crit multiplier.
    Skill,
    Hit,
    Die,
    /// Recovery animation for a downed hero. No combat effect.
    Heal,
    /// Reserved. No decision path produces it yet.
    Defend,
}
