//! Battle configuration consumed by the engine at construction.
//!
//! Everything here is resolved by the host before the engine sees it. The
//! engine only checks ranges (see [`BattleConfig::validate`]); it never loads
//! files itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Base stats of a unit template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub hp: f64,
    pub atk: f64,
    pub def: f64,
    pub spd: f64,
}

/// One weighted entry of the enemy pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyPoolEntry {
    pub id: String,
    pub weight: f64,
}

impl EnemyPoolEntry {
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }
}

/// Spawn pressure parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpawnParams {
    pub base_alive_count: u32,
    pub alive_per_task: u32,
    pub respawn_delay_min: f64,
    pub respawn_delay_max: f64,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            base_alive_count: BASE_ALIVE_COUNT,
            alive_per_task: ALIVE_PER_TASK,
            respawn_delay_min: RESPAWN_DELAY_MIN_SECS,
            respawn_delay_max: RESPAWN_DELAY_MAX_SECS,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BattleConfig {
    /// Seconds a downed hero stays down.
    pub recovery_duration: f64,
    /// Seconds between heal pulses.
    pub heal_interval: f64,
    /// Fraction of max hp restored per pulse.
    pub hp_regen_percent: f64,
    /// Length of the ResolveTodo beat.
    pub resolve_duration: f64,
    /// Length of the Victory beat.
    pub victory_duration: f64,
    pub crit_multiplier: f64,
    /// Reserved for the `defend` action.
    pub defend_damage_reduction: f64,
    pub hero_base_attack: f64,
    pub hero_defense: f64,
    pub skill_chance: f64,
    pub busy_idle_chance: f64,
    pub spawn: SpawnParams,
    pub enemy_pool: Vec<EnemyPoolEntry>,
    /// Base stats per enemy template id.
    pub enemy_stats: BTreeMap<String, UnitStats>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        let mut enemy_stats = BTreeMap::new();
        enemy_stats.insert(
            DEFAULT_ENEMY_TEMPLATE.to_string(),
            UnitStats {
                hp: 50.0,
                atk: 10.0,
                def: 3.0,
                spd: 0.9,
            },
        );

        Self {
            recovery_duration: RECOVERY_DURATION_SECS,
            heal_interval: HEAL_INTERVAL_SECS,
            hp_regen_percent: HP_REGEN_PERCENT,
            resolve_duration: RESOLVE_DURATION_SECS,
            victory_duration: VICTORY_DURATION_SECS,
            crit_multiplier: CRIT_MULTIPLIER,
            defend_damage_reduction: DEFEND_DAMAGE_REDUCTION,
            hero_base_attack: HERO_BASE_ATTACK,
            hero_defense: HERO_DEFENSE,
            skill_chance: SKILL_CHANCE,
            busy_idle_chance: BUSY_IDLE_CHANCE,
            spawn: SpawnParams::default(),
            enemy_pool: vec![EnemyPoolEntry::new(DEFAULT_ENEMY_TEMPLATE, 1.0)],
            enemy_stats,
        }
    }
}

/// Reasons a configuration is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be within [0, 1], got {value}")]
    NotAProbability { field: &'static str, value: f64 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("respawn delay min {min} exceeds max {max}")]
    InvertedDelay { min: f64, max: f64 },

    #[error("enemy pool entry '{id}' has non-positive weight {weight}")]
    PoolWeight { id: String, weight: f64 },

    #[error("enemy template '{id}' has invalid stats")]
    InvalidStats { id: String },

    #[error("failed to parse battle config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BattleConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        probability("hpRegenPercent", self.hp_regen_percent)?;
        probability("defendDamageReduction", self.defend_damage_reduction)?;
        probability("skillChance", self.skill_chance)?;
        probability("busyIdleChance", self.busy_idle_chance)?;

        positive("recoveryDuration", self.recovery_duration)?;
        positive("healInterval", self.heal_interval)?;
        positive("critMultiplier", self.crit_multiplier)?;
        non_negative("resolveDuration", self.resolve_duration)?;
        non_negative("victoryDuration", self.victory_duration)?;
        non_negative("heroBaseAttack", self.hero_base_attack)?;
        non_negative("heroDefense", self.hero_defense)?;

        let spawn = &self.spawn;
        non_negative("respawnDelayMin", spawn.respawn_delay_min)?;
        positive("respawnDelayMax", spawn.respawn_delay_max)?;
        if spawn.respawn_delay_min > spawn.respawn_delay_max {
            return Err(ConfigError::InvertedDelay {
                min: spawn.respawn_delay_min,
                max: spawn.respawn_delay_max,
            });
        }

        for entry in &self.enemy_pool {
            if !(entry.weight > 0.0 && entry.weight.is_finite()) {
                return Err(ConfigError::PoolWeight {
                    id: entry.id.clone(),
                    weight: entry.weight,
                });
            }
        }

        for (id, stats) in &self.enemy_stats {
            let ok = stats.hp > 0.0 && stats.atk >= 0.0 && stats.def >= 0.0 && stats.spd > 0.0;
            if !ok {
                return Err(ConfigError::InvalidStats { id: id.clone() });
            }
        }

        Ok(())
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::NotAProbability { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}
