//! Events emitted by the battle loop for the presentation layer.
//!
//! Events are produced fresh each tick and carry no state between ticks.

use serde::{Deserialize, Serialize};

use crate::enums::BattlePhase;

/// A single battle event, serialized as `{ "type": ..., "data": {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum BattleEvent {
    PhaseChange {
        phase: BattlePhase,
    },
    EnemySpawn {
        enemy_id: String,
        template_id: String,
    },
    EnemyDeath {
        enemy_id: String,
    },
    HeroAttack {
        hero_id: String,
        target_id: String,
        damage: f64,
        killed: bool,
    },
    HeroSkill {
        hero_id: String,
        target_id: String,
        damage: f64,
        killed: bool,
    },
    EnemyAttack {
        enemy_id: String,
        target_id: String,
        damage: f64,
    },
    HeroDowned {
        hero_id: String,
    },
    HeroRecovered {
        hero_id: String,
    },
    TodoResolved {
        count: u32,
    },
    Victory,
}

impl BattleEvent {
    /// Wire name of the event type.
    pub fn kind(&self) -> &'static str {
        match self {
            BattleEvent::PhaseChange { .. } => "phase_change",
            BattleEvent::EnemySpawn { .. } => "enemy_spawn",
            BattleEvent::EnemyDeath { .. } => "enemy_death",
            BattleEvent::HeroAttack { .. } => "hero_attack",
            BattleEvent::HeroSkill { .. } => "hero_skill",
            BattleEvent::EnemyAttack { .. } => "enemy_attack",
            BattleEvent::HeroDowned { .. } => "hero_downed",
            BattleEvent::HeroRecovered { .. } => "hero_recovered",
            BattleEvent::TodoResolved { .. } => "todo_resolved",
            BattleEvent::Victory => "victory",
        }
    }
}
