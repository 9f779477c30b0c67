//! Hero and enemy components: mutable combat data plus lifecycle transitions.

use serde::{Deserialize, Serialize};

use crate::config::UnitStats;
use crate::enums::{ActionKind, CombatStatus};

/// A roster hero. Created once per slot, never removed during a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroState {
    pub id: String,
    /// Character template this hero was built from.
    pub character_id: String,
    pub hp: f64,
    pub max_hp: f64,
    pub status: CombatStatus,
    /// Seconds until forced recovery. Zero outside `Downed`.
    pub downtime_remaining: f64,
    /// Seconds since the last heal pulse.
    pub heal_tick_accumulator: f64,
}

/// Outcome of advancing a hero's recovery by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStep {
    /// Hero was not downed; nothing happened.
    NotDowned,
    /// Still downed, no pulse this tick.
    Waiting,
    /// Still downed, a heal pulse landed.
    Pulse,
    /// Back in combat at full hp.
    Recovered,
}

impl HeroState {
    pub fn new(id: impl Into<String>, character_id: impl Into<String>, max_hp: f64) -> Self {
        Self {
            id: id.into(),
            character_id: character_id.into(),
            hp: max_hp,
            max_hp,
            status: CombatStatus::Combat,
            downtime_remaining: 0.0,
            heal_tick_accumulator: 0.0,
        }
    }

    /// Whether this hero can act or be targeted.
    pub fn can_fight(&self) -> bool {
        self.status == CombatStatus::Combat && self.hp > 0.0
    }

    /// Apply damage, clamped at zero. Returns the hp lost.
    pub fn take_damage(&mut self, damage: f64) -> f64 {
        let before = self.hp;
        self.hp = (self.hp - damage).max(0.0);
        before - self.hp
    }

    /// Knock the hero down: hp pinned to 0 and the recovery clock started.
    pub fn enter_downed(&mut self, recovery_duration: f64) {
        self.status = CombatStatus::Downed;
        self.hp = 0.0;
        self.downtime_remaining = recovery_duration;
        self.heal_tick_accumulator = 0.0;
    }

    /// Advance downed recovery by `dt` seconds.
    ///
    /// Healing is stepped: every `heal_interval` seconds the hero regains
    /// `max_hp * hp_regen_percent`. Recovery completes when the downtime runs
    /// out or hp is full, whichever comes first.
    pub fn tick_recovery(&mut self, dt: f64, heal_interval: f64, hp_regen_percent: f64) -> RecoveryStep {
        if self.status != CombatStatus::Downed {
            return RecoveryStep::NotDowned;
        }

        self.downtime_remaining -= dt;
        self.heal_tick_accumulator += dt;

        let mut step = RecoveryStep::Waiting;
        if self.heal_tick_accumulator >= heal_interval {
            self.heal_tick_accumulator = 0.0;
            self.hp = (self.hp + self.max_hp * hp_regen_percent).min(self.max_hp);
            step = RecoveryStep::Pulse;
        }

        if self.downtime_remaining <= 0.0 || self.hp >= self.max_hp {
            self.status = CombatStatus::Combat;
            self.hp = self.max_hp;
            self.downtime_remaining = 0.0;
            self.heal_tick_accumulator = 0.0;
            return RecoveryStep::Recovered;
        }

        step
    }
}

/// A spawned enemy instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyState {
    /// Unique per spawn (`enemy_<n>`).
    pub id: String,
    /// Stat-table key this enemy was built from.
    pub template_id: String,
    pub hp: f64,
    pub max_hp: f64,
    pub atk: f64,
    pub def: f64,
    pub spd: f64,
    pub alive: bool,
    pub current_action: ActionKind,
    /// Reserved for timed actions; the loop currently acts every tick.
    pub action_timer: f64,
}

impl EnemyState {
    pub fn new(id: impl Into<String>, template_id: impl Into<String>, stats: &UnitStats) -> Self {
        Self {
            id: id.into(),
            template_id: template_id.into(),
            hp: stats.hp,
            max_hp: stats.hp,
            atk: stats.atk,
            def: stats.def,
            spd: stats.spd,
            alive: true,
            current_action: ActionKind::Idle,
            action_timer: 0.0,
        }
    }

    /// Apply damage. Returns `true` only on the hit that kills.
    ///
    /// Dead enemies ignore further damage, so `alive` never flips back.
    pub fn take_damage(&mut self, damage: f64) -> bool {
        if !self.alive {
            return false;
        }

        self.hp = (self.hp - damage).max(0.0);
        if self.hp <= 0.0 {
            self.alive = false;
            self.current_action = ActionKind::Die;
            return true;
        }
        false
    }
}
